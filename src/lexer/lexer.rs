use std::{fs, path::Path, rc::Rc};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Anything that can feed tokens to the parser.
///
/// Implementations must keep returning an EOF token once the input is
/// exhausted, however many times they are asked.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

pub type RegexHandler = fn(&str) -> TokenKind;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[a-zA-Z]+").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Integer) },
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Whitespace) },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LParen) },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RParen) },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assign) },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Add) },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Sub) },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Mul) },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Div) },
    ];
}

#[derive(Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source,
            pos: 0,
            file: file_name,
        }
    }

    /// Reads the file at `path`, naming tokens after its file name.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Lexer, Error> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|err| {
            Error::new(
                ErrorImpl::FileRead {
                    path: path.display().to_string(),
                    message: err.to_string(),
                },
                Position(0, Rc::new(path.display().to_string())),
            )
        })?;
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());

        Ok(Lexer::new(source, file))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn span_of(&self, len: usize) -> Span {
        Span {
            start: Position(self.pos as u32, Rc::clone(&self.file)),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        if self.at_eof() {
            return MK_TOKEN!(TokenKind::EOF, String::from("EOF"), self.span_of(0));
        }

        for pattern in PATTERNS.iter() {
            if let Some(found) = pattern.regex.find(self.remainder()) {
                let (value, end) = (found.as_str().to_string(), found.end());
                let token = MK_TOKEN!((pattern.handler)(&value), value, self.span_of(end));
                self.advance_n(end);
                trace!(kind = %token.kind, value = %token.value, "Lexed token");
                return token;
            }
        }

        // Nothing matched: hand the character to the parser and let it recover.
        let len = self.remainder().chars().next().map_or(1, char::len_utf8);
        let value = self.remainder()[..len].to_string();
        let token = MK_TOKEN!(TokenKind::Unknown, value, self.span_of(len));
        self.advance_n(len);
        trace!(value = %token.value, "Unrecognised character");
        token
    }
}

/// Pre-built token streams, padded with EOF once drained.
impl TokenSource for std::vec::IntoIter<Token> {
    fn next_token(&mut self) -> Token {
        self.next()
            .unwrap_or_else(|| MK_TOKEN!(TokenKind::EOF, String::from("EOF"), Span::null()))
    }
}

fn symbol_handler(value: &str) -> TokenKind {
    RESERVED_LOOKUP
        .get(value)
        .copied()
        .unwrap_or(TokenKind::Identifier)
}

/// Lexes the whole source eagerly, whitespace included, ending with a single EOF.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);
        if done {
            break;
        }
    }

    tokens
}
