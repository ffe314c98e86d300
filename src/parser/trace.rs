//! Tracing parser.
//!
//! Walks the grammar exactly like [`super::parser::Parser`] but builds no
//! tree. Instead it records what it does, one [`TraceEvent`] per line of
//! output:
//!
//! ```text
//! Entering STMT Rule
//! Found PRINT Token: print
//! Entering EXP Rule
//! ...
//! There were 0 parse errors found.
//! ```

use std::{fmt::Display, path::Path};

use crate::{
    errors::errors::{Error, ErrorImpl},
    grammar::Rule,
    lexer::{
        lexer::{Lexer, TokenSource},
        tokens::TokenKind,
    },
};

use super::cursor::Cursor;

#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    Enter(Rule),
    Exit(Rule),
    /// The lookahead was the token the rule wanted.
    Found { kind: TokenKind, value: String },
    /// A tail rule saw no operator and took the empty production.
    Epsilon(Rule),
    Diagnostic(Error),
    Summary(usize),
}

impl Display for TraceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceEvent::Enter(rule) => write!(f, "Entering {} Rule", rule.grammar_name()),
            TraceEvent::Exit(rule) => write!(f, "Exiting {} Rule", rule.grammar_name()),
            TraceEvent::Found { kind, value } => write!(f, "Found {} Token: {}", kind, value),
            TraceEvent::Epsilon(Rule::TTail) => write!(
                f,
                "Did not find {} or {} Token, choosing EPSILON production",
                TokenKind::Mul,
                TokenKind::Div
            ),
            TraceEvent::Epsilon(_) => write!(
                f,
                "Did not find {} or {} Token, choosing EPSILON production",
                TokenKind::Add,
                TokenKind::Sub
            ),
            TraceEvent::Diagnostic(error) => write!(f, "{}", error),
            TraceEvent::Summary(errors) => write!(f, "There were {} parse errors found.", errors),
        }
    }
}

pub struct TraceParser<S: TokenSource = Lexer> {
    cursor: Cursor<S>,
    events: Vec<TraceEvent>,
}

impl TraceParser<Lexer> {
    /// Creates a trace parser over the contents of the file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        Ok(TraceParser::new(Lexer::from_path(path)?))
    }
}

impl<S: TokenSource> TraceParser<S> {
    pub fn new(source: S) -> Self {
        TraceParser {
            cursor: Cursor::new(source),
            events: vec![],
        }
    }

    pub fn error_count(&self) -> usize {
        self.cursor.error_count()
    }

    pub fn diagnostics(&self) -> &[Error] {
        self.cursor.diagnostics()
    }

    /// Parses every statement and hands back the trace, ending with the
    /// error summary.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn program(&mut self) -> Vec<TraceEvent> {
        while self.cursor.current_token_kind() != TokenKind::EOF {
            self.statement();
        }

        self.events.push(TraceEvent::Summary(self.error_count()));
        std::mem::take(&mut self.events)
    }

    pub fn statement(&mut self) {
        self.events.push(TraceEvent::Enter(Rule::Statement));

        if self.cursor.current_token_kind() == TokenKind::Print {
            self.found();
            self.expect(TokenKind::Print);
            self.expression();
        } else {
            self.assignment();
        }

        self.events.push(TraceEvent::Exit(Rule::Statement));
    }

    pub fn assignment(&mut self) {
        self.events.push(TraceEvent::Enter(Rule::Assignment));

        let has_id = self.found_if(TokenKind::Identifier);
        self.expect(TokenKind::Identifier);
        let has_assign = self.found_if(TokenKind::Assign);
        self.expect(TokenKind::Assign);

        if has_id && has_assign {
            self.expression();
        }

        self.events.push(TraceEvent::Exit(Rule::Assignment));
    }

    pub fn expression(&mut self) {
        self.events.push(TraceEvent::Enter(Rule::Expression));
        self.term();
        self.etail();
        self.events.push(TraceEvent::Exit(Rule::Expression));
    }

    pub fn etail(&mut self) {
        self.tail(Rule::ETail, &[TokenKind::Add, TokenKind::Sub], Self::term);
    }

    pub fn term(&mut self) {
        self.events.push(TraceEvent::Enter(Rule::Term));
        self.factor();
        self.ttail();
        self.events.push(TraceEvent::Exit(Rule::Term));
    }

    pub fn ttail(&mut self) {
        self.tail(Rule::TTail, &[TokenKind::Mul, TokenKind::Div], Self::factor);
    }

    pub fn factor(&mut self) {
        self.events.push(TraceEvent::Enter(Rule::Factor));

        match self.cursor.current_token_kind() {
            TokenKind::LParen => {
                self.found();
                self.expect(TokenKind::LParen);
                if self.cursor.current_token_kind() != TokenKind::RParen {
                    self.expression();
                }
                self.found_if(TokenKind::RParen);
                self.expect(TokenKind::RParen);
            }
            kind @ (TokenKind::Integer | TokenKind::Identifier) => {
                self.found();
                self.expect(kind);
            }
            _ => {
                let before = self.error_count();
                self.cursor.report(ErrorImpl::UnexpectedFactor {
                    found: self.cursor.current_token().value.clone(),
                });
                self.record_diagnostics(before);
                self.cursor.consume();
            }
        }

        self.events.push(TraceEvent::Exit(Rule::Factor));
    }

    /// Each pass through the loop stands for one level of the right-recursive
    /// rule, so the exits are emitted together once the EPSILON branch is hit.
    fn tail(&mut self, rule: Rule, operators: &[TokenKind], operand: fn(&mut Self)) {
        let mut depth = 0;

        loop {
            self.events.push(TraceEvent::Enter(rule));
            depth += 1;

            let kind = self.cursor.current_token_kind();
            if !operators.contains(&kind) {
                self.events.push(TraceEvent::Epsilon(rule));
                break;
            }

            self.found();
            self.expect(kind);
            operand(self);
        }

        for _ in 0..depth {
            self.events.push(TraceEvent::Exit(rule));
        }
    }

    fn found(&mut self) {
        let token = self.cursor.current_token();
        self.events.push(TraceEvent::Found {
            kind: token.kind,
            value: token.value.clone(),
        });
    }

    fn found_if(&mut self, kind: TokenKind) -> bool {
        let matched = self.cursor.current_token_kind() == kind;
        if matched {
            self.found();
        }
        matched
    }

    fn expect(&mut self, kind: TokenKind) {
        let before = self.error_count();
        self.cursor.expect(kind);
        self.record_diagnostics(before);
    }

    fn record_diagnostics(&mut self, before: usize) {
        self.events.extend(
            self.cursor.diagnostics()[before..]
                .iter()
                .cloned()
                .map(TraceEvent::Diagnostic),
        );
    }
}

/// Traces a whole TINY program.
pub fn trace(source: String, file: Option<String>) -> (TraceParser<Lexer>, Vec<TraceEvent>) {
    let mut parser = TraceParser::new(Lexer::new(source, file));
    let events = parser.program();
    (parser, events)
}
