//! Standard [`Resolver`]s.

use super::{Piece, Resolver};

/// Strips all markup and returns plain text. Used to extract search candidates.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleResolver {
    pub modify_punctuations: bool,
}

impl Resolver for SimpleResolver {
    type Element = String;
    type Output = String;

    fn resolve_link(&self, _name: String, children: Vec<Piece<String>>) -> Piece<String> {
        Piece::Element(concat(children))
    }

    fn resolve_bracket(&self, children: Vec<Piece<String>>) -> Piece<String> {
        Piece::Element(concat(children))
    }

    fn resolve_slash(&self, text: String) -> Piece<String> {
        Piece::Element(text)
    }

    fn join(&self, pieces: Vec<Piece<String>>) -> String {
        concat(pieces)
    }

    fn modifies_punctuations(&self) -> bool {
        self.modify_punctuations
    }
}

/// Reproduces the markup as written, escapes included. Used where the markup has to
/// survive, for example when looking up a word's sort.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeepResolver;

impl Resolver for KeepResolver {
    type Element = String;
    type Output = String;

    fn resolve_link(&self, _name: String, children: Vec<Piece<String>>) -> Piece<String> {
        Piece::Element(concat(children))
    }

    fn resolve_bracket(&self, children: Vec<Piece<String>>) -> Piece<String> {
        Piece::Element(format!("[{}]", concat(children)))
    }

    fn resolve_brace(&self, children: Vec<Piece<String>>) -> Piece<String> {
        Piece::Element(format!("{{{}}}", concat(children)))
    }

    fn resolve_slash(&self, text: String) -> Piece<String> {
        Piece::Element(format!("/{text}/"))
    }

    fn resolve_escape(&self, ch: char) -> String {
        format!("`{ch}")
    }

    fn join(&self, pieces: Vec<Piece<String>>) -> String {
        concat(pieces)
    }
}

/// A node of the markup tree built by [`TreeResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    /// One link span of a brace, with the name of the word it links to.
    Link {
        name: String,
        children: Vec<Node>,
    },
    Bracket(Vec<Node>),
    Brace(Vec<Node>),
    Slash(String),
    Hairia(u32),
}

impl Node {
    /// The text this node displays, with all structure dropped.
    pub fn plain_text(&self) -> String {
        let mut string = String::new();
        self.push_plain_text(&mut string);
        string
    }

    fn push_plain_text(&self, string: &mut String) {
        match self {
            Self::Text(text) | Self::Slash(text) => string.push_str(text),
            Self::Link { children, .. } | Self::Bracket(children) | Self::Brace(children) => {
                for child in children {
                    child.push_plain_text(string);
                }
            }
            Self::Hairia(hairia) => {
                string.push('H');
                string.push_str(&hairia.to_string());
            }
        }
    }
}

/// Builds a [`Node`] tree, for renderers which want to style each construct.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeResolver {
    pub modify_punctuations: bool,
}

impl Resolver for TreeResolver {
    type Element = Node;
    type Output = Vec<Node>;

    fn resolve_link(&self, name: String, children: Vec<Piece<Node>>) -> Piece<Node> {
        Piece::Element(Node::Link {
            name,
            children: nodes(children),
        })
    }

    fn resolve_bracket(&self, children: Vec<Piece<Node>>) -> Piece<Node> {
        Piece::Element(Node::Bracket(nodes(children)))
    }

    fn resolve_brace(&self, children: Vec<Piece<Node>>) -> Piece<Node> {
        Piece::Element(Node::Brace(nodes(children)))
    }

    fn resolve_slash(&self, text: String) -> Piece<Node> {
        Piece::Element(Node::Slash(text))
    }

    fn resolve_hairia(&self, hairia: u32) -> Piece<Node> {
        Piece::Element(Node::Hairia(hairia))
    }

    fn join(&self, pieces: Vec<Piece<Node>>) -> Vec<Node> {
        nodes(pieces)
    }

    fn modifies_punctuations(&self) -> bool {
        self.modify_punctuations
    }
}

fn concat(pieces: Vec<Piece<String>>) -> String {
    let mut string = String::new();
    for piece in pieces {
        match piece {
            Piece::Text(text) | Piece::Element(text) => string.push_str(&text),
        }
    }
    string
}

fn nodes(pieces: Vec<Piece<Node>>) -> Vec<Node> {
    pieces
        .into_iter()
        .map(|piece| match piece {
            Piece::Text(text) => Node::Text(text),
            Piece::Element(node) => node,
        })
        .collect()
}
