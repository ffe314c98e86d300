use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::TokenSource,
        tokens::{Token, TokenKind},
    },
};

/// Lookahead cursor over a token source.
///
/// Holds the next significant token (whitespace is dropped on the way in)
/// and every error reported so far. One cursor serves one parse.
pub struct Cursor<S: TokenSource> {
    /// Where tokens come from
    source: S,
    /// Next unconsumed, non-whitespace token
    lookahead: Token,
    /// Number of errors reported, never reset
    error_count: usize,
    /// The reported errors, in order
    diagnostics: Vec<Error>,
}

impl<S: TokenSource> Cursor<S> {
    /// Creates a cursor and primes the first lookahead.
    pub fn new(mut source: S) -> Self {
        let lookahead = source.next_token();
        let mut cursor = Cursor {
            source,
            lookahead,
            error_count: 0,
            diagnostics: vec![],
        };
        cursor.skip_whitespace();
        cursor
    }

    pub fn token_source(&self) -> &S {
        &self.source
    }

    pub fn current_token(&self) -> &Token {
        &self.lookahead
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.lookahead.kind
    }

    /// Moves the lookahead to the next significant token.
    pub fn consume(&mut self) {
        self.lookahead = self.source.next_token();
        self.skip_whitespace();
    }

    /// Consumes the lookahead and hands it back.
    pub fn advance(&mut self) -> Token {
        let next = self.source.next_token();
        let token = std::mem::replace(&mut self.lookahead, next);
        self.skip_whitespace();
        trace!(kind = %token.kind, value = %token.value, "Consumed token");
        token
    }

    fn skip_whitespace(&mut self) {
        while self.lookahead.kind == TokenKind::Whitespace {
            self.lookahead = self.source.next_token();
        }
    }

    /// Consumes the lookahead whether or not it is of `expected_kind`.
    ///
    /// A mismatch is reported and the offending token skipped, so the caller
    /// always makes progress. Returns the token only when it matched.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Option<Token> {
        if self.lookahead.kind == expected_kind {
            return Some(self.advance());
        }

        self.report(ErrorImpl::UnexpectedToken {
            expected: expected_kind.to_string(),
            found: self.lookahead.value.clone(),
        });
        self.consume();
        None
    }

    /// Reports an error at the lookahead without consuming anything.
    pub fn report(&mut self, error_impl: ErrorImpl) {
        let error = Error::new(error_impl, self.lookahead.span.start.clone());
        debug!(error = %error, position = error.get_position().0, "Parse error");

        self.error_count += 1;
        self.diagnostics.push(error);
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }
}
