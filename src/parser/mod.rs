//! Recursive-descent parsers for TINY.
//!
//! Both parsers walk the same LL(1) grammar (see [`crate::grammar`]) with one
//! method per nonterminal and share the token cursor in [`cursor`]:
//!
//! - [`parser::Parser`] builds the syntax tree
//! - [`trace::TraceParser`] records which rules it entered and left instead
//!
//! Errors never stop a parse. A mismatching token is reported, skipped, and
//! parsing carries on until EOF.

pub mod cursor;
pub mod parser;
pub mod trace;

#[cfg(test)]
mod tests;
