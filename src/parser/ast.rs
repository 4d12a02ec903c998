// AST (Abstract Syntax Tree) definitions for the expression language

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub index: usize, // 0-based code point index
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(index: usize, line: usize, column: usize) -> Self {
        Self {
            index,
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index {} (line {}, column {})",
            self.index, self.line, self.column
        )
    }
}

/// Numeric literal value.
///
/// Only `0.<digits>` literals lex to [`Number::Float`]; every other literal is
/// an exact integer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// Shortest `0.<digits>` spelling that lexes to exactly 1.0
const ONE_AS_FRACTION: &str = "0.99999999999999999";

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            // a `0.<digits>` literal rounds up to at most 1.0
            Number::Float(x) if *x >= 1.0 => write!(f, "{}", ONE_AS_FRACTION),
            Number::Float(x) => {
                let text = x.to_string();
                // keep the '.' so the literal re-lexes as a float
                if text.contains('.') {
                    write!(f, "{}", text)
                } else {
                    write!(f, "{}.0", text)
                }
            }
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add, // +
    Sub, // −
    Mul, // ×
    Eq,  // =
}

impl BinOp {
    /// The glyph this operator is written with.
    pub fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '\u{2212}',
            BinOp::Mul => '\u{00D7}',
            BinOp::Eq => '=',
        }
    }
}

/// AST nodes. Each child is exclusively owned by its parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(Number),
    Identifier(String),
    BinaryOp {
        op: BinOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Conditional {
        test: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Box<Node>,
    },
    Abstraction {
        param: String,
        body: Box<Node>,
    },
    Binding {
        name: String,
        value: Box<Node>,
        body: Box<Node>,
    },
    /// `args` is never empty: `(f)` collapses to `f` at parse time.
    Application {
        callee: Box<Node>,
        args: Vec<Node>,
    },
}

impl Node {
    /// Short label for the node kind, used by tree renderings.
    pub fn label(&self) -> String {
        match self {
            Node::Number(n) => format!("Number {}", n),
            Node::Identifier(name) => format!("Identifier {}", name),
            Node::BinaryOp { op, .. } => format!("BinaryOp {}", op.symbol()),
            Node::Conditional { .. } => "Conditional".to_string(),
            Node::Abstraction { param, .. } => format!("Abstraction λ{}", param),
            Node::Binding { name, .. } => format!("Binding {}", name),
            Node::Application { args, .. } => format!("Application ({} args)", args.len()),
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Number(_) | Node::Identifier(_) => Vec::new(),
            Node::BinaryOp { left, right, .. } => vec![&**left, &**right],
            Node::Conditional {
                test,
                then_branch,
                else_branch,
            } => vec![&**test, &**then_branch, &**else_branch],
            Node::Abstraction { body, .. } => vec![&**body],
            Node::Binding { value, body, .. } => vec![&**value, &**body],
            Node::Application { callee, args } => {
                let mut children = vec![&**callee];
                children.extend(args.iter());
                children
            }
        }
    }

    /// One line per node, children indented two spaces below their parent.
    pub fn tree_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut pending = vec![(self, 0usize)];
        while let Some((node, depth)) = pending.pop() {
            lines.push(format!("{}{}", "  ".repeat(depth), node.label()));
            for child in node.children().into_iter().rev() {
                pending.push((child, depth + 1));
            }
        }
        lines
    }
}

impl Node {
    /// Move the boxed children of `self` onto `out`, leaving leaves behind.
    fn detach_children(&mut self, out: &mut Vec<Node>) {
        fn detach(slot: &mut Node) -> Node {
            std::mem::replace(slot, Node::Number(Number::Int(0)))
        }
        match self {
            Node::Number(_) | Node::Identifier(_) => {}
            Node::BinaryOp { left, right, .. } => {
                out.push(detach(left));
                out.push(detach(right));
            }
            Node::Conditional {
                test,
                then_branch,
                else_branch,
            } => {
                out.push(detach(test));
                out.push(detach(then_branch));
                out.push(detach(else_branch));
            }
            Node::Abstraction { body, .. } => out.push(detach(body)),
            Node::Binding { value, body, .. } => {
                out.push(detach(value));
                out.push(detach(body));
            }
            Node::Application { callee, args } => {
                out.push(detach(callee));
                out.append(args);
            }
        }
    }
}

// Dropping with a worklist keeps deep trees off the native stack.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

/// Canonical fully-parenthesized form; re-parsing it yields an equal tree.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(n) => write!(f, "{}", n),
            Node::Identifier(name) => write!(f, "{}", name),
            Node::BinaryOp { op, left, right } => {
                write!(f, "({} {} {})", op.symbol(), left, right)
            }
            Node::Conditional {
                test,
                then_branch,
                else_branch,
            } => write!(f, "(? {} {} {})", test, then_branch, else_branch),
            Node::Abstraction { param, body } => write!(f, "(λ {} {})", param, body),
            Node::Binding { name, value, body } => {
                write!(f, "(≜ {} {} {})", name, value, body)
            }
            Node::Application { callee, args } => {
                write!(f, "({}", callee)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Box<Node> {
        Box::new(Node::Identifier(name.to_string()))
    }

    #[test]
    fn test_float_display_keeps_point() {
        assert_eq!(Number::Float(0.0).to_string(), "0.0");
        assert_eq!(Number::Float(0.25).to_string(), "0.25");
        assert_eq!(Number::Int(0).to_string(), "0");
    }

    #[test]
    fn test_float_rounded_to_one_keeps_fraction_form() {
        assert_eq!("0.99999999999999999".parse::<f64>().unwrap(), 1.0);
        assert_eq!(Number::Float(1.0).to_string(), "0.99999999999999999");
    }

    #[test]
    fn test_deep_tree_drops_iteratively() {
        let mut node = Node::Identifier("x".to_string());
        for _ in 0..200_000 {
            node = Node::Abstraction {
                param: "x".to_string(),
                body: Box::new(node),
            };
        }
        drop(node);
    }

    #[test]
    fn test_canonical_form() {
        let node = Node::Application {
            callee: Box::new(Node::Abstraction {
                param: "x".to_string(),
                body: Box::new(Node::BinaryOp {
                    op: BinOp::Sub,
                    left: ident("x"),
                    right: Box::new(Node::Number(Number::Int(1))),
                }),
            }),
            args: vec![Node::Number(Number::Int(5))],
        };
        assert_eq!(node.to_string(), "((λ x (− x 1)) 5)");
    }

    #[test]
    fn test_tree_lines_preorder() {
        let node = Node::Binding {
            name: "y".to_string(),
            value: Box::new(Node::Number(Number::Int(10))),
            body: ident("y"),
        };
        assert_eq!(
            node.tree_lines(),
            vec!["Binding y", "  Number 10", "  Identifier y"]
        );
    }
}
