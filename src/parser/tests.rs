//! Unit tests for the parser module.
//!
//! This module contains tests for:
//! - Operator precedence and left associativity
//! - Statement and assignment shapes
//! - Error recovery and the recovered-node markers
//! - The trace parser's event stream

use insta::assert_snapshot;

use crate::{
    ast::ast::Label,
    grammar::Rule,
    lexer::{
        lexer::tokenize,
        tokens::{Token, TokenKind},
    },
    Span,
};

use super::{
    parser::{parse, Parser},
    trace::{trace, TraceEvent, TraceParser},
};

fn parse_str(source: &str) -> (Parser, crate::ast::ast::Node) {
    parse(source.to_string(), Some("test.tiny".to_string()))
}

fn render_trace(source: &str) -> String {
    let (_, events) = trace(source.to_string(), Some("test.tiny".to_string()));
    events
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn token(kind: TokenKind, value: &str) -> Token {
    Token {
        kind,
        value: value.to_string(),
        span: Span::null(),
    }
}

#[test]
fn test_parse_single_assignment() {
    let (parser, program) = parse_str("x = 42");

    assert_eq!(parser.error_count(), 0);
    assert_eq!(program.label, Label::Program);
    assert_eq!(program.children.len(), 1);
    assert_eq!(program.children[0].to_string(), "(= x 42)");
}

#[test]
fn test_addition_is_left_associative() {
    let (parser, program) = parse_str("x = 1 + 2 + 3");

    assert_eq!(parser.error_count(), 0);
    assert_eq!(program.children[0].to_string(), "(= x (+ (+ 1 2) 3))");
}

#[test]
fn test_subtraction_and_division_are_left_associative() {
    let (_, program) = parse_str("a = x - y - z b = 8 / 4 / 2");

    assert_eq!(program.children[0].to_string(), "(= a (- (- x y) z))");
    assert_eq!(program.children[1].to_string(), "(= b (/ (/ 8 4) 2))");
}

#[test]
fn test_multiplication_binds_tighter() {
    let (_, program) = parse_str("x = 2 * 3 + 4");
    assert_eq!(program.children[0].to_string(), "(= x (+ (* 2 3) 4))");

    let (_, program) = parse_str("x = 1 + 2 * 3 - 4");
    assert_eq!(program.children[0].to_string(), "(= x (- (+ 1 (* 2 3)) 4))");
}

#[test]
fn test_parentheses_override_precedence() {
    let (parser, program) = parse_str("x = (1 + 2) * 3");

    assert_eq!(parser.error_count(), 0);
    assert_eq!(program.children[0].to_string(), "(= x (* (+ 1 2) 3))");
}

#[test]
fn test_parenthesized_factor_collapses() {
    let (parser, program) = parse_str("print (5)");

    assert_eq!(parser.error_count(), 0);
    assert_eq!(program.children[0].to_string(), "(print 5)");
    assert_eq!(program.children[0].children[0].children.len(), 0);
}

#[test]
fn test_empty_parentheses_are_accepted() {
    let (parser, program) = parse_str("print ()");

    assert_eq!(parser.error_count(), 0);
    assert_eq!(program.children[0].to_string(), "(print ())");
    assert_eq!(program.children[0].children[0].label, Label::Group);
    assert!(!program.has_recovered());
}

#[test]
fn test_string_list_is_pre_order() {
    let (_, program) = parse_str("x = 1\ny = x * 2\nprint y");

    assert_eq!(
        program.to_string_list(),
        vec!["program", "=", "x", "1", "=", "y", "*", "x", "2", "print", "y"]
    );
}

#[test]
fn test_empty_program() {
    let (parser, program) = parse_str("");
    assert_eq!(parser.error_count(), 0);
    assert!(program.children.is_empty());

    let (parser, program) = parse_str("  \n\t ");
    assert_eq!(parser.error_count(), 0);
    assert!(program.children.is_empty());
}

#[test]
fn test_valid_programs_have_no_recovered_nodes() {
    for source in [
        "x = 1",
        "print x",
        "x = (a + b) * (c - d) / 2",
        "total = price * count\nprint total - discount",
        "x = ((((1))))",
    ] {
        let (parser, program) = parse_str(source);
        assert_eq!(parser.error_count(), 0, "{source}");
        assert!(!program.has_recovered(), "{source}");
    }
}

#[test]
fn test_missing_expression() {
    let (parser, program) = parse_str("x =");

    assert_eq!(parser.error_count(), 1);
    assert_eq!(
        parser.diagnostics()[0].to_string(),
        "Expected ( or INT or ID found EOF"
    );
    assert_eq!(program.children[0].to_string(), "(= x factor)");
    assert_eq!(
        program.children[0].children[1].label,
        Label::Recovered(Rule::Factor)
    );
}

#[test]
fn test_missing_identifier() {
    let (parser, program) = parse_str("= 5");

    assert_eq!(parser.error_count(), 2);
    assert_eq!(parser.diagnostics()[0].to_string(), "Expected IDENTIFIER found =");
    assert_eq!(parser.diagnostics()[1].to_string(), "Expected ASSIGN found 5");
    assert_eq!(program.children.len(), 1);
    assert!(program.children[0].is_recovered());
    assert!(program.children[0].children.is_empty());
}

#[test]
fn test_missing_assign_drops_identifier() {
    let (parser, program) = parse_str("x 5");

    assert_eq!(parser.error_count(), 1);
    assert_eq!(parser.diagnostics()[0].to_string(), "Expected ASSIGN found 5");
    assert_eq!(program.to_string_list(), vec!["program", "assignment"]);
    assert!(program.children[0].children.is_empty());
    assert_eq!(
        program.children[0].label,
        Label::Recovered(Rule::Assignment)
    );
}

#[test]
fn test_missing_close_paren() {
    let (parser, program) = parse_str("x = (1 + 2");

    assert_eq!(parser.error_count(), 1);
    assert_eq!(parser.diagnostics()[0].to_string(), "Expected RPAREN found EOF");
    assert_eq!(program.children[0].to_string(), "(= x (+ 1 2))");
}

#[test]
fn test_bad_factor_is_skipped() {
    let (parser, program) = parse_str("x = ) print 1");

    assert_eq!(parser.error_count(), 1);
    assert_eq!(program.children.len(), 2);
    assert_eq!(program.children[0].to_string(), "(= x factor)");
    assert_eq!(program.children[1].to_string(), "(print 1)");
}

#[test]
fn test_unknown_character_recovers() {
    let (parser, program) = parse_str("x = 1 $");

    assert_eq!(parser.error_count(), 2);
    assert_eq!(parser.diagnostics()[0].to_string(), "Expected IDENTIFIER found $");
    assert_eq!(parser.diagnostics()[1].to_string(), "Expected ASSIGN found EOF");
    assert_eq!(program.children[0].to_string(), "(= x 1)");
    assert!(program.children[1].is_recovered());
}

#[test]
fn test_error_positions_point_at_the_offending_token() {
    let (parser, _) = parse_str("x = 1\ny 2");

    assert_eq!(parser.error_count(), 1);
    assert_eq!(parser.diagnostics()[0].get_position().0, 8);
    assert_eq!(*parser.diagnostics()[0].get_position().1, "test.tiny");
}

#[test]
fn test_summary_wording() {
    let (parser, _) = parse_str("= = =");
    assert_eq!(parser.summary(), "There were 3 parse errors found.");
}

#[test]
fn test_parse_from_token_stream() {
    let tokens = vec![
        token(TokenKind::Whitespace, "  "),
        token(TokenKind::Identifier, "x"),
        token(TokenKind::Whitespace, " "),
        token(TokenKind::Assign, "="),
        token(TokenKind::Integer, "1"),
        token(TokenKind::Whitespace, "\n"),
        token(TokenKind::Sub, "-"),
        token(TokenKind::Identifier, "y"),
    ];

    let mut parser = Parser::new(tokens.into_iter());
    let program = parser.program();

    assert_eq!(parser.error_count(), 0);
    assert_eq!(program.to_string(), "(program (= x (- 1 y)))");
}

#[test]
fn test_reparse_is_structurally_identical() {
    let source = "x = (a + 1) * b / 2\nprint x - 3";

    let (_, first) = parse_str(source);
    let (_, second) = parse_str(source);

    assert!(first.same_shape(&second));
    assert_eq!(first, second);
}

#[test]
fn test_long_operator_chain() {
    let source = format!("x = 0{}", " + 1".repeat(2_000));
    let (parser, program) = parse_str(&source);

    assert_eq!(parser.error_count(), 0);
    // program, =, x, then 2000 operators and 2001 operands
    assert_eq!(program.node_count(), 3 + 2_000 + 2_001);

    // the last operator sits on top
    let value = &program.children[0].children[1];
    assert_eq!(value.children[1].to_string(), "1");
    assert_eq!(value.children[0].children.len(), 2);
}

#[test]
fn test_garbage_input_terminates() {
    let (parser, program) = parse_str(&")".repeat(1_000));

    // each statement eats two tokens: one as the identifier, one as the `=`
    assert_eq!(parser.error_count(), 1_000);
    assert_eq!(program.children.len(), 500);
    assert!(program.children.iter().all(|child| child.is_recovered()));
}

#[test]
fn test_trace_assignment() {
    assert_snapshot!(render_trace("x = 1 + 2"), @r"
    Entering STMT Rule
    Entering ASSGN Rule
    Found IDENTIFIER Token: x
    Found ASSIGN Token: =
    Entering EXP Rule
    Entering TERM Rule
    Entering FACTOR Rule
    Found INTEGER Token: 1
    Exiting FACTOR Rule
    Entering TTAIL Rule
    Did not find MUL or DIV Token, choosing EPSILON production
    Exiting TTAIL Rule
    Exiting TERM Rule
    Entering ETAIL Rule
    Found ADD Token: +
    Entering TERM Rule
    Entering FACTOR Rule
    Found INTEGER Token: 2
    Exiting FACTOR Rule
    Entering TTAIL Rule
    Did not find MUL or DIV Token, choosing EPSILON production
    Exiting TTAIL Rule
    Exiting TERM Rule
    Entering ETAIL Rule
    Did not find ADD or SUB Token, choosing EPSILON production
    Exiting ETAIL Rule
    Exiting ETAIL Rule
    Exiting EXP Rule
    Exiting ASSGN Rule
    Exiting STMT Rule
    There were 0 parse errors found.
    ");
}

#[test]
fn test_trace_print_with_parentheses() {
    assert_snapshot!(render_trace("print (a)"), @r"
    Entering STMT Rule
    Found PRINT Token: print
    Entering EXP Rule
    Entering TERM Rule
    Entering FACTOR Rule
    Found LPAREN Token: (
    Entering EXP Rule
    Entering TERM Rule
    Entering FACTOR Rule
    Found IDENTIFIER Token: a
    Exiting FACTOR Rule
    Entering TTAIL Rule
    Did not find MUL or DIV Token, choosing EPSILON production
    Exiting TTAIL Rule
    Exiting TERM Rule
    Entering ETAIL Rule
    Did not find ADD or SUB Token, choosing EPSILON production
    Exiting ETAIL Rule
    Exiting EXP Rule
    Found RPAREN Token: )
    Exiting FACTOR Rule
    Entering TTAIL Rule
    Did not find MUL or DIV Token, choosing EPSILON production
    Exiting TTAIL Rule
    Exiting TERM Rule
    Entering ETAIL Rule
    Did not find ADD or SUB Token, choosing EPSILON production
    Exiting ETAIL Rule
    Exiting EXP Rule
    Exiting STMT Rule
    There were 0 parse errors found.
    ");
}

#[test]
fn test_trace_reports_errors_in_place() {
    let (parser, events) = trace("x = )".to_string(), None);

    assert_eq!(parser.error_count(), 1);

    let factor_error = events
        .iter()
        .position(|event| matches!(event, TraceEvent::Diagnostic(_)))
        .unwrap();
    assert_eq!(events[factor_error - 1], TraceEvent::Enter(Rule::Factor));
    assert_eq!(
        events[factor_error].to_string(),
        "Expected ( or INT or ID found )"
    );
    assert_eq!(events[factor_error + 1], TraceEvent::Exit(Rule::Factor));
    assert_eq!(events.last(), Some(&TraceEvent::Summary(1)));
}

#[test]
fn test_trace_skips_expression_after_failed_assignment() {
    let (_, events) = trace("x 5".to_string(), None);

    assert!(!events.contains(&TraceEvent::Enter(Rule::Expression)));
    assert_eq!(
        events.last().map(ToString::to_string).as_deref(),
        Some("There were 1 parse errors found.")
    );
}

#[test]
fn test_trace_and_tree_agree_on_errors() {
    for source in [
        "x = 1 + 2",
        "x =",
        "= 5",
        "x 5",
        "x = (1 + 2",
        "x = ) print 1",
        "print () + * 3",
        "x = 1 $ y = 2",
        ")))",
    ] {
        let (tree_parser, _) = parse_str(source);
        let mut trace_parser = TraceParser::new(tokenize(source.to_string(), None).into_iter());
        trace_parser.program();

        assert_eq!(
            tree_parser.error_count(),
            trace_parser.error_count(),
            "{source}"
        );
        let tree_messages: Vec<String> = tree_parser
            .diagnostics()
            .iter()
            .map(ToString::to_string)
            .collect();
        let trace_messages: Vec<String> = trace_parser
            .diagnostics()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(tree_messages, trace_messages, "{source}");
    }
}
