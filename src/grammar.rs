//! The TINY grammar.
//!
//! ```text
//! PGM     -->  STMT+
//! STMT    -->  ASSGN  |  "print" EXP
//! ASSGN   -->  ID "=" EXP
//! EXP     -->  TERM ETAIL
//! ETAIL   -->  "+" TERM ETAIL  |  "-" TERM ETAIL  |  EPSILON
//! TERM    -->  FACTOR TTAIL
//! TTAIL   -->  "*" FACTOR TTAIL  |  "/" FACTOR TTAIL  |  EPSILON
//! FACTOR  -->  "(" EXP ")"  |  INT  |  ID
//! ```

use std::fmt::Display;

/// One nonterminal of the grammar.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Rule {
    Statement,
    Assignment,
    Expression,
    ETail,
    Term,
    TTail,
    Factor,
}

impl Rule {
    /// The nonterminal as written in the grammar, used in trace output.
    pub fn grammar_name(&self) -> &'static str {
        match self {
            Rule::Statement => "STMT",
            Rule::Assignment => "ASSGN",
            Rule::Expression => "EXP",
            Rule::ETail => "ETAIL",
            Rule::Term => "TERM",
            Rule::TTail => "TTAIL",
            Rule::Factor => "FACTOR",
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rule::Statement => "statement",
            Rule::Assignment => "assignment",
            Rule::Expression => "expression",
            Rule::ETail => "etail",
            Rule::Term => "term",
            Rule::TTail => "ttail",
            Rule::Factor => "factor",
        };
        write!(f, "{}", name)
    }
}
