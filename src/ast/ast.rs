use std::fmt::Display;

use crate::{grammar::Rule, lexer::tokens::Token};

/// What a node stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    /// Root of a parsed program.
    Program,
    /// The token that decided the construct: an operator, `=`, `print`,
    /// an identifier or an integer.
    Token(Token),
    /// An empty pair of parentheses, accepted by the grammar with no meaning
    /// attached.
    Group,
    /// Stand-in produced when `rule` could not be parsed and the parser
    /// resynchronised. Never appears in the tree of an error-free parse.
    Recovered(Rule),
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Program => write!(f, "program"),
            Label::Token(token) => write!(f, "{}", token.value),
            Label::Group => write!(f, "()"),
            Label::Recovered(rule) => write!(f, "{}", rule),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub label: Label,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(label: Label) -> Self {
        Node {
            label,
            children: vec![],
        }
    }

    pub fn program() -> Self {
        Node::new(Label::Program)
    }

    pub fn leaf(token: Token) -> Self {
        Node::new(Label::Token(token))
    }

    pub fn recovered(rule: Rule) -> Self {
        Node::new(Label::Recovered(rule))
    }

    /// Builds an interior node from its label and children in one go.
    pub fn with_children(label: Label, children: Vec<Node>) -> Self {
        Node { label, children }
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.children.first()
    }

    /// The token behind the label, if the label came from one.
    pub fn token(&self) -> Option<&Token> {
        match &self.label {
            Label::Token(token) => Some(token),
            _ => None,
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self.label, Label::Recovered(_))
    }

    /// Whether any node in this subtree came out of error recovery.
    pub fn has_recovered(&self) -> bool {
        self.iter().any(Node::is_recovered)
    }

    /// Walks the subtree in pre-order, depth first.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Number of nodes in the subtree, this one included.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Pre-order listing of the labels in this subtree.
    pub fn to_string_list(&self) -> Vec<String> {
        self.iter().map(|node| node.label.to_string()).collect()
    }

    /// Label and child count for each node, in pre-order.
    pub fn shape(&self) -> Vec<(String, usize)> {
        self.iter()
            .map(|node| (node.label.to_string(), node.children.len()))
            .collect()
    }

    /// Structural equality: same labels in the same places, ignoring spans.
    pub fn same_shape(&self, other: &Node) -> bool {
        self.shape() == other.shape()
    }
}

pub struct PreOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

enum Step<'a> {
    Enter(&'a Node),
    Close,
}

/// S-expression form, e.g. `(= x (+ (+ 1 2) 3))`. Leaves print bare.
impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut stack = vec![Step::Enter(self)];
        let mut first = true;

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(node) => {
                    if !first {
                        write!(f, " ")?;
                    }
                    first = false;

                    if node.children.is_empty() {
                        write!(f, "{}", node.label)?;
                    } else {
                        write!(f, "({}", node.label)?;
                        stack.push(Step::Close);
                        stack.extend(node.children.iter().rev().map(Step::Enter));
                    }
                }
                Step::Close => write!(f, ")")?,
            }
        }

        Ok(())
    }
}
