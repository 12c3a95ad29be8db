//! Conversion of headwords to IPA.

use crate::version::{Grammar, Version};

/// Converts a word name to its IPA transcription.
pub trait Pronouncer {
    fn convert(&self, name: &str) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PronouncerOptions {
    /// Separate syllables with `.`.
    pub show_syllables: bool,
    /// Use the dental fricatives `θ` and `ð` for `c` and `q` rather than the affricates
    /// `t͡s` and `d͡z`.
    pub light: bool,
}

impl Default for PronouncerOptions {
    fn default() -> Self {
        Self {
            show_syllables: false,
            light: true,
        }
    }
}

/// Picks the pronouncer for a dictionary version, or `None` if the version has none.
pub fn create_pronouncer(version: &str, options: PronouncerOptions) -> Option<Box<dyn Pronouncer>> {
    let pronouncer: Box<dyn Pronouncer> = match Version::grammar_of(version)? {
        Grammar::Stable => Box::new(StablePronouncer::new(options)),
        Grammar::Shal => Box::new(ShalPronouncer::new(options)),
    };
    Some(pronouncer)
}

/// Pronouncer for the stable grammar (versions `S`, `6`, `7.0` and `7.1`).
///
/// A consonant doubled across a syllable boundary is pronounced once.
#[derive(Debug, Clone, Copy, Default)]
pub struct StablePronouncer {
    options: PronouncerOptions,
}

impl StablePronouncer {
    pub fn new(options: PronouncerOptions) -> Self {
        Self { options }
    }
}

impl Pronouncer for StablePronouncer {
    fn convert(&self, name: &str) -> String {
        if let Some(exception) = exception(name) {
            return exception.to_string();
        }
        let tokens = syllabify(name, &['\'', '-']);
        render(&collapse_geminates(tokens), self.options)
    }
}

/// Pronouncer for the shal grammar (versions `7.2` and later).
///
/// Doubled consonants are pronounced twice, and the `+` affix markers are silent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShalPronouncer {
    options: PronouncerOptions,
}

impl ShalPronouncer {
    pub fn new(options: PronouncerOptions) -> Self {
        Self { options }
    }
}

impl Pronouncer for ShalPronouncer {
    fn convert(&self, name: &str) -> String {
        if let Some(exception) = exception(name) {
            return exception.to_string();
        }
        let tokens = syllabify(name, &['\'', '-', '+']);
        render(&tokens, self.options)
    }
}

fn exception(name: &str) -> Option<&'static str> {
    let pronunciation = match name {
        "kin" => "kiɴ",
        "'n" => "ɴ",
        "á" => "aɪ",
        "é" => "eɪ",
        "à" => "aʊ",
        "ò" => "ɔɐ",
        "lá" => "laɪ",
        "lé" => "leɪ",
        "dà" => "daʊ",
        _ => return None,
    };
    Some(pronunciation)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Letter(char),
    Break,
}

fn is_consonant(ch: char) -> bool {
    matches!(
        ch,
        's' | 'z' | 't' | 'd' | 'k' | 'g' | 'f' | 'v' | 'p' | 'b' | 'c' | 'q' | 'x' | 'j' | 'r'
            | 'l' | 'm' | 'n' | 'h' | 'y'
    )
}

fn is_vowel(ch: char) -> bool {
    vowel_quality(ch).is_some()
}

fn vowel_quality(ch: char) -> Option<&'static str> {
    let quality = match ch {
        'a' | 'â' | 'á' | 'à' => "a",
        'e' | 'ê' | 'é' | 'è' => "e",
        'i' | 'î' | 'í' | 'ì' => "i",
        'o' | 'ô' | 'ó' | 'ò' => "ɔ",
        'u' | 'û' | 'ú' | 'ù' => "u",
        _ => return None,
    };
    Some(quality)
}

/// Splits `name` into `(C)V(C)` syllables, preferring codas over onsets.
///
/// Syllables are taken greedily from the end of the word, so a consonant between two
/// vowels opens the later syllable. Characters in `silent` and characters outside the
/// alphabet are dropped first.
fn syllabify(name: &str, silent: &[char]) -> Vec<Token> {
    let reversed: Vec<char> = name
        .chars()
        .rev()
        .filter(|ch| !silent.contains(ch) && (is_consonant(*ch) || is_vowel(*ch)))
        .collect();
    let mut tokens = Vec::with_capacity(reversed.len() * 2);
    let mut index = 0;
    while index < reversed.len() {
        let ch = reversed[index];
        let next = reversed.get(index + 1).copied();
        let nucleus = if is_vowel(ch) {
            Some(index)
        } else if next.map_or(false, is_vowel) {
            Some(index + 1)
        } else {
            None
        };
        match nucleus {
            Some(nucleus) => {
                tokens.extend(reversed[index..=nucleus].iter().map(|ch| Token::Letter(*ch)));
                index = nucleus + 1;
                if let Some(&coda) = reversed.get(index).filter(|ch| is_consonant(**ch)) {
                    tokens.push(Token::Letter(coda));
                    index += 1;
                }
                tokens.push(Token::Break);
            }
            None => {
                tokens.push(Token::Letter(ch));
                index += 1;
            }
        }
    }
    tokens.reverse();
    if tokens.first() == Some(&Token::Break) {
        tokens.remove(0);
    }
    tokens
}

/// Rewrites `x.x` to `.x` for every consonant `x`.
fn collapse_geminates(tokens: Vec<Token>) -> Vec<Token> {
    let mut collapsed = Vec::with_capacity(tokens.len());
    let mut index = 0;
    while index < tokens.len() {
        if let &[Token::Letter(first), Token::Break, Token::Letter(second), ..] = &tokens[index..] {
            if first == second && is_consonant(first) {
                collapsed.push(Token::Break);
                collapsed.push(Token::Letter(second));
                index += 3;
                continue;
            }
        }
        collapsed.push(tokens[index]);
        index += 1;
    }
    collapsed
}

fn render(tokens: &[Token], options: PronouncerOptions) -> String {
    let mut string = String::new();
    for (index, token) in tokens.iter().enumerate() {
        let before_vowel = matches!(tokens.get(index + 1), Some(Token::Letter(next)) if is_vowel(*next));
        let ch = match token {
            Token::Break => {
                if options.show_syllables {
                    string.push('.');
                }
                continue;
            }
            Token::Letter(ch) => *ch,
        };
        let sound = match ch {
            'g' => "ɡ",
            'c' if options.light => "θ",
            'c' => "t͡s",
            'q' if options.light => "ð",
            'q' => "d͡z",
            'x' => "ʃ",
            'j' => "ʒ",
            'r' => "ɹ",
            'l' if before_vowel => "l",
            'l' => "ɾ",
            'h' if before_vowel => "h",
            'h' => "",
            'y' => "j",
            _ => match vowel_quality(ch) {
                Some(quality) => quality,
                None => {
                    string.push(ch);
                    continue;
                }
            },
        };
        string.push_str(sound);
    }
    string
}
