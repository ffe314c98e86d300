//! Lexical analysis for TINY source text.
//!
//! The lexer hands out one token per call through the [`lexer::TokenSource`]
//! trait. Whitespace runs come out as their own token kind; filtering them
//! is left to the parser's cursor.

pub mod lexer;
pub mod tokens;
