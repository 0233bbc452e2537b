//! Compound selectors: `tag.class#id[attr][attr="value"]`.
//!
//! Only single compound selectors are supported, which is all the card and
//! marker lookups need. Combinators (descendant, child, sibling), lists and
//! pseudo-classes are rejected at parse time.

use std::fmt;

use logos::Logos;

use super::node::NodeData;

/// Errors from selector parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected {found:?} at byte {position}")]
    Unexpected { position: usize, found: String },
    #[error("unexpected end of selector, expected {0}")]
    UnexpectedEnd(&'static str),
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    #[regex(r"[ \t\n\r\f]+")]
    Whitespace,

    #[regex(r#""[^"]*""#)]
    StringLiteral,

    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    #[regex(r"[0-9]+")]
    Number,

    #[regex(r"-?[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    #[token(".")]
    Dot,

    #[token("#")]
    Hash,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("=")]
    Equals,
}

/// A single attribute condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrMatch {
    pub name: String,
    /// `None` matches presence only.
    pub value: Option<String>,
}

/// A parsed compound selector. Every present part must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<AttrMatch>,
}

impl Selector {
    /// Parse selector text.
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        Parser::new(source.trim())?.parse()
    }

    /// Selector matching a tag name.
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into().to_ascii_lowercase()),
            ..Self::default()
        }
    }

    /// Selector matching a class.
    pub fn class(class: impl Into<String>) -> Self {
        Self {
            classes: vec![class.into()],
            ..Self::default()
        }
    }

    /// Selector matching attribute presence.
    pub fn attr(name: impl Into<String>) -> Self {
        Self {
            attributes: vec![AttrMatch {
                name: name.into(),
                value: None,
            }],
            ..Self::default()
        }
    }

    /// Selector matching an exact attribute value.
    pub fn attr_eq(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attributes: vec![AttrMatch {
                name: name.into(),
                value: Some(value.into()),
            }],
            ..Self::default()
        }
    }

    /// Whether `node` satisfies every part of this selector.
    pub fn matches(&self, node: &NodeData) -> bool {
        if let Some(tag) = &self.tag {
            if node.tag != *tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| node.has_class(c)) {
            return false;
        }
        self.attributes.iter().all(|a| match &a.value {
            None => node.has_attr(&a.name),
            Some(v) => node.attr(&a.name) == Some(v.as_str()),
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            f.write_str(tag)?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        for attr in &self.attributes {
            match &attr.value {
                None => write!(f, "[{}]", attr.name)?,
                Some(v) => write!(f, "[{}={v:?}]", attr.name)?,
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

struct PToken {
    token: Token,
    text: String,
    position: usize,
}

struct Parser {
    tokens: Vec<PToken>,
    pos: usize,
}

impl Parser {
    fn new(source: &str) -> Result<Self, SelectorError> {
        if source.is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut lexer = Token::lexer(source);
        let mut tokens = Vec::new();
        while let Some(result) = lexer.next() {
            let position = lexer.span().start;
            let text = lexer.slice().to_owned();
            match result {
                Ok(token) => tokens.push(PToken {
                    token,
                    text,
                    position,
                }),
                Err(()) => return Err(SelectorError::Unexpected { position, found: text }),
            }
        }
        Ok(Self { tokens, pos: 0 })
    }

    fn next(&mut self) -> Option<&PToken> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, kinds: &[Token], expected: &'static str) -> Result<&PToken, SelectorError> {
        match self.next() {
            Some(tok) if kinds.contains(&tok.token) => Ok(tok),
            Some(tok) => Err(SelectorError::Unexpected {
                position: tok.position,
                found: tok.text.clone(),
            }),
            None => Err(SelectorError::UnexpectedEnd(expected)),
        }
    }

    fn parse(mut self) -> Result<Selector, SelectorError> {
        let mut selector = Selector::default();
        let mut first = true;

        while let Some(tok) = self.next() {
            let (token, position, text) = (tok.token, tok.position, tok.text.clone());
            match token {
                Token::Ident if first => selector.tag = Some(text.to_ascii_lowercase()),
                Token::Dot => {
                    let name = self.expect(&[Token::Ident], "class name")?.text.clone();
                    selector.classes.push(name);
                }
                Token::Hash => {
                    let name = self.expect(&[Token::Ident], "id")?.text.clone();
                    selector.id = Some(name);
                }
                Token::BracketOpen => selector.attributes.push(self.parse_attr()?),
                _ => return Err(SelectorError::Unexpected { position, found: text }),
            }
            first = false;
        }
        Ok(selector)
    }

    fn parse_attr(&mut self) -> Result<AttrMatch, SelectorError> {
        let name = self.expect(&[Token::Ident], "attribute name")?.text.clone();
        let tok = self.expect(&[Token::BracketClose, Token::Equals], "`]` or `=`")?;
        if tok.token == Token::BracketClose {
            return Ok(AttrMatch { name, value: None });
        }

        let value = self.expect(
            &[
                Token::Ident,
                Token::Number,
                Token::StringLiteral,
                Token::StringLiteralSingle,
            ],
            "attribute value",
        )?;
        let value = match value.token {
            Token::StringLiteral | Token::StringLiteralSingle => {
                value.text[1..value.text.len() - 1].to_owned()
            }
            _ => value.text.clone(),
        };
        self.expect(&[Token::BracketClose], "`]`")?;
        Ok(AttrMatch {
            name,
            value: Some(value),
        })
    }
}
