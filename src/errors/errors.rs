use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedFactor { .. } => "UnexpectedFactor",
            ErrorImpl::FileRead { .. } => "FileRead",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { expected, .. } => match expected.as_str() {
                "IDENTIFIER" => ErrorTip::Suggestion(String::from(
                    "a statement starts with an identifier or `print`",
                )),
                "ASSIGN" => ErrorTip::Suggestion(String::from(
                    "an assignment needs `=` after the identifier",
                )),
                "RPAREN" => ErrorTip::Suggestion(String::from("is a closing `)` missing?")),
                _ => ErrorTip::None,
            },
            ErrorImpl::UnexpectedFactor { .. } => ErrorTip::Suggestion(String::from(
                "an operand must be a parenthesized expression, an integer or an identifier",
            )),
            ErrorImpl::FileRead { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("Expected {expected} found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("Expected ( or INT or ID found {found}")]
    UnexpectedFactor { found: String },
    #[error("could not read {path}: {message}")]
    FileRead { path: String, message: String },
}
