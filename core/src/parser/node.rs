use core::fmt;

use serde::{Deserialize, Serialize};

/// A compiled expression tree.
///
/// Every variant carries the `name` it was built from (the operator sign,
/// function or method name, or the matched condition text) and exactly the
/// children its arity requires. Trees own their data and do not refer back
/// to the source, so they can be stored and executed any number of times.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// Leaf: a variable or literal, resolved by the interpreter.
    Condition { name: String },
    Unary {
        name: String,
        operand: Box<Node>,
    },
    Binary {
        name: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// `name` is the open sign followed by the close sign, e.g. `?:`.
    Ternary {
        name: String,
        condition: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Box<Node>,
    },
    Function { name: String, args: Vec<Node> },
    /// `context#name(args)`: a call on the value `context` evaluates to.
    Method {
        name: String,
        context: Box<Node>,
        args: Vec<Node>,
    },
}

impl Node {
    pub fn condition(name: impl Into<String>) -> Self {
        Node::Condition { name: name.into() }
    }

    pub fn unary(name: impl Into<String>, operand: Node) -> Self {
        Node::Unary {
            name: name.into(),
            operand: Box::new(operand),
        }
    }

    pub fn binary(name: impl Into<String>, left: Node, right: Node) -> Self {
        Node::Binary {
            name: name.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn ternary(
        name: impl Into<String>,
        condition: Node,
        then_branch: Node,
        else_branch: Node,
    ) -> Self {
        Node::Ternary {
            name: name.into(),
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn function(name: impl Into<String>, args: Vec<Node>) -> Self {
        Node::Function {
            name: name.into(),
            args,
        }
    }

    pub fn method(name: impl Into<String>, context: Node, args: Vec<Node>) -> Self {
        Node::Method {
            name: name.into(),
            context: Box::new(context),
            args,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Condition { name }
            | Node::Unary { name, .. }
            | Node::Binary { name, .. }
            | Node::Ternary { name, .. }
            | Node::Function { name, .. }
            | Node::Method { name, .. } => name,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Condition { .. } => "condition",
            Node::Unary { .. } => "unary",
            Node::Binary { .. } => "binary",
            Node::Ternary { .. } => "ternary",
            Node::Function { .. } => "function",
            Node::Method { .. } => "method",
        }
    }

    /// Operands or call arguments in order. The receiver of a method call is
    /// not included, see [`Node::context`].
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Condition { .. } => vec![],
            Node::Unary { operand, .. } => vec![operand],
            Node::Binary { left, right, .. } => vec![left, right],
            Node::Ternary {
                condition,
                then_branch,
                else_branch,
                ..
            } => vec![condition, then_branch, else_branch],
            Node::Function { args, .. } | Node::Method { args, .. } => args.iter().collect(),
        }
    }

    /// The receiver of a method call.
    pub fn context(&self) -> Option<&Node> {
        match self {
            Node::Method { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Number of nodes in the tree, receivers included.
    pub fn size(&self) -> usize {
        1 + self.context().map_or(0, Node::size)
            + self.children().into_iter().map(Node::size).sum::<usize>()
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Node]) -> fmt::Result {
    write!(f, "(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{arg}")?;
    }
    write!(f, ")")
}

/// Fully parenthesized rendering, useful in logs and test failures.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Condition { name } => write!(f, "{name}"),
            Node::Unary { name, operand } => write!(f, "({name}{operand})"),
            Node::Binary { name, left, right } => write!(f, "({left} {name} {right})"),
            Node::Ternary {
                name,
                condition,
                then_branch,
                else_branch,
            } => write!(f, "({name} {condition} {then_branch} {else_branch})"),
            Node::Function { name, args } => {
                write!(f, "{name}")?;
                write_args(f, args)
            }
            Node::Method {
                name,
                context,
                args,
            } => {
                write!(f, "{context}.{name}")?;
                write_args(f, args)
            }
        }
    }
}
