/// AST (Abstract Syntax Tree) module
///
/// The tree is uniform: every node carries a label and an ordered list of
/// owned children. Operators and `=` label interior nodes, identifiers and
/// integers are leaves, and `program` sits at the root.
pub mod ast;
