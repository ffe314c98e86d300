//! Tree-building parser.
//!
//! Each grammar rule is a method returning the subtree it parsed. Operator
//! nodes are labelled by their operator token and take their operands as
//! children, so `x = 2 * 3 + 4` becomes `(= x (+ (* 2 3) 4))`.
//!
//! ETAIL and TTAIL are right recursive in the grammar but the operators are
//! left associative. The tail rules therefore collect `(operator, operand)`
//! pairs in a loop and the caller folds them onto the leading operand from
//! the left, which gives `(+ (+ 1 2) 3)` for `1 + 2 + 3` without recursing
//! once per operator.

use std::path::Path;

use tracing::debug;

use crate::{
    ast::ast::{Label, Node},
    errors::errors::{Error, ErrorImpl},
    grammar::Rule,
    lexer::{
        lexer::{Lexer, TokenSource},
        tokens::{Token, TokenKind},
    },
};

use super::cursor::Cursor;

/// Operators and their right-hand operands, in source order.
///
/// An empty tail is the EPSILON production.
pub type Tail = Vec<(Token, Node)>;

pub struct Parser<S: TokenSource = Lexer> {
    cursor: Cursor<S>,
}

impl Parser<Lexer> {
    /// Creates a parser over the contents of the file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        Ok(Parser::new(Lexer::from_path(path)?))
    }

    /// The full text being parsed, for rendering error snippets.
    pub fn source_text(&self) -> &str {
        self.cursor.token_source().source()
    }
}

impl<S: TokenSource> Parser<S> {
    pub fn new(source: S) -> Self {
        Parser {
            cursor: Cursor::new(source),
        }
    }

    pub fn error_count(&self) -> usize {
        self.cursor.error_count()
    }

    pub fn diagnostics(&self) -> &[Error] {
        self.cursor.diagnostics()
    }

    pub fn summary(&self) -> String {
        format!("There were {} parse errors found.", self.error_count())
    }

    /// PGM --> STMT+
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn program(&mut self) -> Node {
        let mut program = Node::program();

        while self.cursor.current_token_kind() != TokenKind::EOF {
            program.add_child(self.statement());
        }

        debug!(
            statements = program.children.len(),
            errors = self.error_count(),
            "Parsed program"
        );
        program
    }

    /// STMT --> ASSGN | "print" EXP
    pub fn statement(&mut self) -> Node {
        if self.cursor.current_token_kind() == TokenKind::Print {
            let print = self.cursor.advance();
            Node::with_children(Label::Token(print), vec![self.expression()])
        } else {
            self.assignment()
        }
    }

    /// ASSGN --> ID "=" EXP
    ///
    /// Without an identifier the `=` is still matched, then the rule gives
    /// up. Without the `=` no expression is parsed. Both cases yield a bare
    /// recovered `assignment` node.
    pub fn assignment(&mut self) -> Node {
        let Some(id) = self.cursor.expect(TokenKind::Identifier) else {
            self.cursor.expect(TokenKind::Assign);
            return Node::recovered(Rule::Assignment);
        };
        match self.cursor.expect(TokenKind::Assign) {
            Some(assign) => {
                let value = self.expression();
                Node::with_children(Label::Token(assign), vec![Node::leaf(id), value])
            }
            None => Node::recovered(Rule::Assignment),
        }
    }

    /// EXP --> TERM ETAIL
    pub fn expression(&mut self) -> Node {
        let term = self.term();
        let tail = self.etail();
        fold_left(term, tail)
    }

    /// ETAIL --> "+" TERM ETAIL | "-" TERM ETAIL | EPSILON
    pub fn etail(&mut self) -> Tail {
        self.tail(&[TokenKind::Add, TokenKind::Sub], Self::term)
    }

    /// TERM --> FACTOR TTAIL
    pub fn term(&mut self) -> Node {
        let factor = self.factor();
        let tail = self.ttail();
        fold_left(factor, tail)
    }

    /// TTAIL --> "*" FACTOR TTAIL | "/" FACTOR TTAIL | EPSILON
    pub fn ttail(&mut self) -> Tail {
        self.tail(&[TokenKind::Mul, TokenKind::Div], Self::factor)
    }

    /// FACTOR --> "(" EXP ")" | INT | ID
    ///
    /// Parentheses leave no node behind; `()` is accepted as an empty group.
    pub fn factor(&mut self) -> Node {
        match self.cursor.current_token_kind() {
            TokenKind::LParen => {
                self.cursor.advance();

                if self.cursor.current_token_kind() == TokenKind::RParen {
                    self.cursor.advance();
                    return Node::new(Label::Group);
                }

                let inner = self.expression();
                self.cursor.expect(TokenKind::RParen);
                inner
            }
            TokenKind::Integer | TokenKind::Identifier => Node::leaf(self.cursor.advance()),
            _ => {
                self.cursor.report(ErrorImpl::UnexpectedFactor {
                    found: self.cursor.current_token().value.clone(),
                });
                self.cursor.consume();
                Node::recovered(Rule::Factor)
            }
        }
    }

    fn tail(&mut self, operators: &[TokenKind], operand: fn(&mut Self) -> Node) -> Tail {
        let mut tail = vec![];

        while operators.contains(&self.cursor.current_token_kind()) {
            let operator = self.cursor.advance();
            tail.push((operator, operand(self)));
        }

        tail
    }
}

/// Hangs each `(operator, operand)` pair onto the tree built so far, so the
/// leftmost operator ends up deepest.
fn fold_left(first: Node, tail: Tail) -> Node {
    tail.into_iter().fold(first, |left, (operator, right)| {
        Node::with_children(Label::Token(operator), vec![left, right])
    })
}

/// Parses a whole TINY program.
///
/// Returns the parser alongside the tree so callers can inspect the
/// recorded errors.
pub fn parse(source: String, file: Option<String>) -> (Parser<Lexer>, Node) {
    let mut parser = Parser::new(Lexer::new(source, file));
    let program = parser.program();
    (parser, program)
}
