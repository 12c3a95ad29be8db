//! The inline markup language used inside word contents.
//!
//! Contents may contain:
//!
//! * `{...}` braces: a run of links to other words. The text is split into link spans on
//!   spaces and the punctuation `,.!?`, which themselves pass through as literal text.
//! * `[...]` brackets: a span of literal text which is not split into links.
//! * `/.../` slashes: an inflected or otherwise highlighted part of a name. Slashes nest
//!   inside braces and brackets, and the text of a slash inside a brace still counts
//!   towards the enclosing link's name: `{milcit/a/s}` links to `milcitas`.
//! * `` ` `` escapes the character after it.
//! * `H<digits>` is a reference to a hairia date.
//!
//! The parser never fails. A missing `}`, `]` or `/`, or a trailing `` ` ``, is closed by the
//! end of the input.
//!
//! What the parser produces is up to a [`Resolver`]. See [`resolver`] for the standard ones.

pub mod resolver;

use once_cell::sync::Lazy;
use regex::Regex;

pub use resolver::{KeepResolver, Node, SimpleResolver, TreeResolver};

/// A child produced while parsing: either literal text or something the resolver built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece<E> {
    Text(String),
    Element(E),
}

/// Hooks which turn parsed markup into an output value.
///
/// Links, brackets, braces, slashes and hairia references may resolve either to literal
/// text or to an element of the resolver's choosing. Pieces are finally combined into the
/// output with [`join`](Resolver::join).
pub trait Resolver {
    type Element;
    type Output;

    /// Resolves one link span inside a brace. `name` is the concatenated text of the span
    /// including the text of any slashes inside it.
    fn resolve_link(&self, name: String, children: Vec<Piece<Self::Element>>)
        -> Piece<Self::Element>;

    fn resolve_bracket(&self, children: Vec<Piece<Self::Element>>) -> Piece<Self::Element>;

    fn resolve_brace(&self, children: Vec<Piece<Self::Element>>) -> Piece<Self::Element> {
        self.resolve_bracket(children)
    }

    fn resolve_slash(&self, text: String) -> Piece<Self::Element>;

    fn resolve_hairia(&self, hairia: u32) -> Piece<Self::Element> {
        Piece::Text(format!("H{hairia}"))
    }

    /// Resolves the character following a backtick.
    fn resolve_escape(&self, ch: char) -> String {
        ch.to_string()
    }

    fn join(&self, pieces: Vec<Piece<Self::Element>>) -> Self::Output;

    /// Whether top-level literal text gets spacing around Japanese punctuation.
    fn modifies_punctuations(&self) -> bool {
        false
    }
}

/// A recursive descent parser for the inline markup.
///
/// ```
/// use xdn::markup::{KeepResolver, MarkupParser, SimpleResolver};
///
/// let simple = MarkupParser::new(SimpleResolver::default());
/// assert_eq!(simple.parse("{salat/es/} [ces]"), "salates ces");
///
/// let keep = MarkupParser::new(KeepResolver);
/// assert_eq!(keep.parse("{salat a tel"), "{salat a tel}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarkupParser<R> {
    resolver: R,
}

impl<R: Resolver> MarkupParser<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn parse(&self, source: &str) -> R::Output {
        let mut cx = Context {
            resolver: &self.resolver,
            source,
            pointer: 0,
        };
        let pieces = cx.consume();
        self.resolver.join(pieces)
    }
}

struct Context<'a, R> {
    resolver: &'a R,
    source: &'a str,
    /// Byte offset of the next character.
    pointer: usize,
}

/// A link span being collected inside a brace.
struct PendingLink<E> {
    name: String,
    children: Vec<Piece<E>>,
}

impl<'a, R: Resolver> Context<'a, R> {
    fn peek(&self) -> Option<char> {
        self.source[self.pointer..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pointer += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, expected: char) {
        if self.peek() == Some(expected) {
            self.bump();
        }
    }

    fn at_hairia(&self) -> bool {
        let mut chars = self.source[self.pointer..].chars();
        chars.next() == Some('H') && chars.next().is_some_and(|ch| ch.is_ascii_digit())
    }

    fn consume(&mut self) -> Vec<Piece<R::Element>> {
        let mut pieces = Vec::new();
        while let Some(ch) = self.peek() {
            let piece = match ch {
                '{' => self.consume_brace(),
                '[' => self.consume_bracket(),
                '/' => self.consume_slash().1,
                _ if self.at_hairia() => self.consume_hairia(),
                _ => Piece::Text(self.consume_text()),
            };
            pieces.push(piece);
        }
        pieces
    }

    fn consume_brace(&mut self) -> Piece<R::Element> {
        self.bump();
        let mut children = Vec::new();
        let mut link = PendingLink {
            name: String::new(),
            children: Vec::new(),
        };
        loop {
            match self.peek() {
                Some(ch @ (' ' | ',' | '.' | '!' | '?')) => {
                    self.flush_link(&mut link, &mut children);
                    self.bump();
                    children.push(Piece::Text(ch.to_string()));
                }
                None | Some('}') => {
                    self.flush_link(&mut link, &mut children);
                    break;
                }
                Some('/') => {
                    let (text, piece) = self.consume_slash();
                    link.name.push_str(&text);
                    link.children.push(piece);
                }
                Some(_) => {
                    let text = self.consume_until(is_brace_stop);
                    link.name.push_str(&text);
                    link.children.push(Piece::Text(text));
                }
            }
        }
        self.eat('}');
        self.resolver.resolve_brace(children)
    }

    fn flush_link(
        &self,
        link: &mut PendingLink<R::Element>,
        children: &mut Vec<Piece<R::Element>>,
    ) {
        if !link.children.is_empty() {
            let name = core::mem::take(&mut link.name);
            let link_children = core::mem::take(&mut link.children);
            children.push(self.resolver.resolve_link(name, link_children));
        }
    }

    fn consume_bracket(&mut self) -> Piece<R::Element> {
        self.bump();
        let mut children = Vec::new();
        loop {
            match self.peek() {
                Some('/') => children.push(self.consume_slash().1),
                None | Some(']') => break,
                Some(_) => children.push(Piece::Text(self.consume_until(is_bracket_stop))),
            }
        }
        self.eat(']');
        self.resolver.resolve_bracket(children)
    }

    /// Returns the raw text of the slash alongside its resolved piece.
    fn consume_slash(&mut self) -> (String, Piece<R::Element>) {
        self.bump();
        let text = self.consume_until(|ch| ch == '/');
        self.eat('/');
        let piece = self.resolver.resolve_slash(text.clone());
        (text, piece)
    }

    fn consume_hairia(&mut self) -> Piece<R::Element> {
        self.bump();
        let start = self.pointer;
        while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
            self.bump();
        }
        let digits = &self.source[start..self.pointer];
        match digits.parse() {
            Ok(hairia) => self.resolver.resolve_hairia(hairia),
            // Out of range for a date, so the reference stays literal text.
            Err(_) => Piece::Text(format!("H{digits}")),
        }
    }

    fn consume_text(&mut self) -> String {
        let mut string = String::new();
        while let Some(ch) = self.peek() {
            match ch {
                '{' | '[' | '/' => break,
                '`' => string.push_str(&self.consume_escape()),
                _ if self.at_hairia() => break,
                _ => {
                    self.bump();
                    string.push(ch);
                }
            }
        }
        if self.resolver.modifies_punctuations() {
            modify_punctuations(&string)
        } else {
            string
        }
    }

    fn consume_until(&mut self, is_stop: fn(char) -> bool) -> String {
        let mut string = String::new();
        while let Some(ch) = self.peek() {
            if is_stop(ch) {
                break;
            } else if ch == '`' {
                string.push_str(&self.consume_escape());
            } else {
                self.bump();
                string.push(ch);
            }
        }
        string
    }

    fn consume_escape(&mut self) -> String {
        self.bump();
        match self.bump() {
            Some(ch) => self.resolver.resolve_escape(ch),
            None => String::new(),
        }
    }
}

fn is_brace_stop(ch: char) -> bool {
    matches!(ch, '}' | '/' | ' ' | ',' | '.' | '!' | '?')
}

fn is_bracket_stop(ch: char) -> bool {
    matches!(ch, ']' | '/')
}

static PUNCTUATION_COLLAPSES: Lazy<[(Regex, &'static str); 3]> = Lazy::new(|| {
    [
        (r"(、|。)\s+(」|』)", "${1}${2}"),
        (r"(」|』|〉)\s+(、|。|,|\.)", "${1}${2}"),
        (r"(\(|「|『)\s+(「|『)", "${1}${2}"),
    ]
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
});

/// Pads Japanese quotation and punctuation marks with a space on their open side, then
/// removes the padding where two such marks meet.
fn modify_punctuations(text: &str) -> String {
    let mut string = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '、' | '。' | '」' | '』' | '〉' => {
                string.push(ch);
                string.push(' ');
            }
            '「' | '『' | '〈' => {
                string.push(' ');
                string.push(ch);
            }
            _ => string.push(ch),
        }
    }
    for (regex, replacement) in PUNCTUATION_COLLAPSES.iter() {
        string = regex.replace_all(&string, *replacement).into_owned();
    }
    string
}

#[cfg(test)]
mod test {
    use super::*;

    /// Renders every hook visibly so the shape of the parse is easy to assert on.
    struct Annotate;

    impl Resolver for Annotate {
        type Element = String;
        type Output = String;

        fn resolve_link(&self, name: String, children: Vec<Piece<String>>) -> Piece<String> {
            Piece::Element(format!("<L:{name}|{}>", concat(children)))
        }

        fn resolve_bracket(&self, children: Vec<Piece<String>>) -> Piece<String> {
            Piece::Element(format!("<B|{}>", concat(children)))
        }

        fn resolve_brace(&self, children: Vec<Piece<String>>) -> Piece<String> {
            Piece::Element(format!("<C|{}>", concat(children)))
        }

        fn resolve_slash(&self, text: String) -> Piece<String> {
            Piece::Element(format!("<S|{text}>"))
        }

        fn resolve_escape(&self, ch: char) -> String {
            format!("<E|{ch}>")
        }

        fn join(&self, pieces: Vec<Piece<String>>) -> String {
            concat(pieces)
        }
    }

    fn concat(pieces: Vec<Piece<String>>) -> String {
        pieces
            .into_iter()
            .map(|piece| match piece {
                Piece::Text(text) | Piece::Element(text) => text,
            })
            .collect()
    }

    fn parse(source: &str) -> String {
        MarkupParser::new(Annotate).parse(source)
    }

    #[test]
    fn bracket() {
        assert_eq!(parse("[kol]"), "<B|kol>");
        assert_eq!(parse("foofoo [kol]bar[ces]"), "foofoo <B|kol>bar<B|ces>");
    }

    #[test]
    fn brace() {
        assert_eq!(parse("{ces}"), "<C|<L:ces|ces>>");
        assert_eq!(
            parse("{salat a tel}"),
            "<C|<L:salat|salat> <L:a|a> <L:tel|tel>>"
        );
        assert_eq!(
            parse("{kâkak, obâl, a cit.}"),
            "<C|<L:kâkak|kâkak>, <L:obâl|obâl>, <L:a|a> <L:cit|cit>.>"
        );
        assert_eq!(
            parse("{â! pa e ayát?}"),
            "<C|<L:â|â>! <L:pa|pa> <L:e|e> <L:ayát|ayát>?>"
        );
        assert_eq!(
            parse("foofoo {ces, cit}bar{cal} baz"),
            "foofoo <C|<L:ces|ces>, <L:cit|cit>>bar<C|<L:cal|cal>> baz"
        );
    }

    #[test]
    fn slash() {
        assert_eq!(parse("/neko/"), "<S|neko>");
        assert_eq!(
            parse("foo/neko//usagi/ bar/neko/"),
            "foo<S|neko><S|usagi> bar<S|neko>"
        );
    }

    #[test]
    fn escape() {
        assert_eq!(
            parse("`{`}`[`]```/"),
            "<E|{><E|}><E|[><E|]><E|`><E|/>"
        );
        assert_eq!(
            parse("/`// `/ `/```/"),
            "<S|<E|/>> <E|/> <E|/><E|`><E|/>"
        );
    }

    #[test]
    fn nested() {
        assert_eq!(parse("[/K/o/s/ a tel]"), "<B|<S|K>o<S|s> a tel>");
        assert_eq!(parse("{milcit/a/s}"), "<C|<L:milcitas|milcit<S|a>s>>");
        assert_eq!(
            parse("{kôm/os/, a}[ /K/, ]{e hâl.}"),
            "<C|<L:kômos|kôm<S|os>>, <L:a|a>><B| <S|K>, ><C|<L:e|e> <L:hâl|hâl>.>"
        );
    }

    #[test]
    fn unterminated_constructs_close_at_end() {
        assert_eq!(parse("[ces"), parse("[ces]"));
        assert_eq!(parse("{tel"), parse("{tel}"));
        assert_eq!(parse("/foo"), parse("/foo/"));
        assert_eq!(parse("{sôd/es"), parse("{sôd/es/}"));
        assert_eq!(parse("foo`"), parse("foo"));
    }

    #[test]
    fn hairia() {
        assert_eq!(parse("H1234 and H"), "H1234 and H");
        let tree = MarkupParser::new(TreeResolver::default()).parse("@H1234は");
        assert_eq!(
            tree,
            vec![
                Node::Text("@".to_string()),
                Node::Hairia(1234),
                Node::Text("は".to_string())
            ]
        );
        // Hairia references are only recognized at the top level.
        assert_eq!(parse("[H12]"), "<B|H12>");
    }

    #[test]
    fn oversized_hairia_is_text() {
        let source = "@H99999999999 H4294967296";
        assert_eq!(MarkupParser::new(KeepResolver).parse(source), source);
        let tree = MarkupParser::new(TreeResolver::default()).parse("H99999999999");
        assert_eq!(tree, vec![Node::Text("H99999999999".to_string())]);
    }

    #[test]
    fn punctuation_spacing() {
        assert_eq!(modify_punctuations("これは「本」です。"), "これは 「本」 です。 ");
        assert_eq!(modify_punctuations("「はい。」"), " 「はい。」 ");
        assert_eq!(modify_punctuations("〈本〉、"), " 〈本〉、 ");
        assert_eq!(modify_punctuations("(「a」)"), "(「a」 )");
    }
}
