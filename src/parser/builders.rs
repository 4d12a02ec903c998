//! AST node builders
//!
//! Each production in the grammar table names one of these functions. The
//! parser calls it at reduction time with the values that the production's
//! right-hand side left on the value stack, in left-to-right order. Fixed-form
//! tokens (operators, parentheses) contribute nothing to that list; only
//! `NUMBER` and `IDENTIFIER` terminals and reduced non-terminals do.

use super::ast::{BinOp, Node, Number};
use super::parser::ParseError;
use std::fmt;

/// Synthesized attribute stored on the parser's value stack
#[derive(Debug, Clone, PartialEq)]
pub enum StackValue {
    Number(Number),
    Name(String),
    Node(Node),
    /// Pending application arguments, produced by ARG-TAIL; stored last
    /// argument first so each cons is a push
    Args(Vec<Node>),
}

impl fmt::Display for StackValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackValue::Number(n) => write!(f, "{}", n),
            StackValue::Name(name) => write!(f, "{}", name),
            StackValue::Node(node) => write!(f, "{}", node),
            StackValue::Args(args) => {
                let args: Vec<String> = args.iter().rev().map(Node::to_string).collect();
                write!(f, "[{}]", args.join(" "))
            }
        }
    }
}

/// Reduction function stored in the grammar table
pub type Builder = fn(Vec<StackValue>) -> Result<StackValue, ParseError>;

fn internal(message: String) -> ParseError {
    ParseError::Internal { message }
}

/// Split `children` into exactly `N` values.
fn take<const N: usize>(children: Vec<StackValue>) -> Result<[StackValue; N], ParseError> {
    children.try_into().map_err(|children: Vec<StackValue>| {
        internal(format!(
            "builder expected {} children, got {}",
            N,
            children.len()
        ))
    })
}

fn into_node(value: StackValue) -> Result<Node, ParseError> {
    match value {
        StackValue::Node(node) => Ok(node),
        other => Err(internal(format!("expected a node, got {:?}", other))),
    }
}

fn into_name(value: StackValue) -> Result<String, ParseError> {
    match value {
        StackValue::Name(name) => Ok(name),
        other => Err(internal(format!("expected a name, got {:?}", other))),
    }
}

fn into_args(value: StackValue) -> Result<Vec<Node>, ParseError> {
    match value {
        StackValue::Args(args) => Ok(args),
        other => Err(internal(format!("expected an argument list, got {:?}", other))),
    }
}

/// Forward the single child unchanged (PROGRAM → EXPR, EXPR → ( PAREN-BODY )).
pub fn pass(children: Vec<StackValue>) -> Result<StackValue, ParseError> {
    let [child] = take::<1>(children)?;
    Ok(child)
}

pub fn number(children: Vec<StackValue>) -> Result<StackValue, ParseError> {
    match take::<1>(children)? {
        [StackValue::Number(n)] => Ok(StackValue::Node(Node::Number(n))),
        [other] => Err(internal(format!("expected a number, got {:?}", other))),
    }
}

pub fn identifier(children: Vec<StackValue>) -> Result<StackValue, ParseError> {
    let [name] = take::<1>(children)?;
    Ok(StackValue::Node(Node::Identifier(into_name(name)?)))
}

fn binary(op: BinOp, children: Vec<StackValue>) -> Result<StackValue, ParseError> {
    let [left, right] = take::<2>(children)?;
    Ok(StackValue::Node(Node::BinaryOp {
        op,
        left: Box::new(into_node(left)?),
        right: Box::new(into_node(right)?),
    }))
}

pub fn add(children: Vec<StackValue>) -> Result<StackValue, ParseError> {
    binary(BinOp::Add, children)
}

pub fn sub(children: Vec<StackValue>) -> Result<StackValue, ParseError> {
    binary(BinOp::Sub, children)
}

pub fn mul(children: Vec<StackValue>) -> Result<StackValue, ParseError> {
    binary(BinOp::Mul, children)
}

pub fn equals(children: Vec<StackValue>) -> Result<StackValue, ParseError> {
    binary(BinOp::Eq, children)
}

pub fn conditional(children: Vec<StackValue>) -> Result<StackValue, ParseError> {
    let [test, then_branch, else_branch] = take::<3>(children)?;
    Ok(StackValue::Node(Node::Conditional {
        test: Box::new(into_node(test)?),
        then_branch: Box::new(into_node(then_branch)?),
        else_branch: Box::new(into_node(else_branch)?),
    }))
}

pub fn abstraction(children: Vec<StackValue>) -> Result<StackValue, ParseError> {
    let [param, body] = take::<2>(children)?;
    Ok(StackValue::Node(Node::Abstraction {
        param: into_name(param)?,
        body: Box::new(into_node(body)?),
    }))
}

pub fn binding(children: Vec<StackValue>) -> Result<StackValue, ParseError> {
    let [name, value, body] = take::<3>(children)?;
    Ok(StackValue::Node(Node::Binding {
        name: into_name(name)?,
        value: Box::new(into_node(value)?),
        body: Box::new(into_node(body)?),
    }))
}

/// `(f)` collapses to `f`; `(f a ...)` becomes an application.
pub fn application(children: Vec<StackValue>) -> Result<StackValue, ParseError> {
    let [callee, args] = take::<2>(children)?;
    let callee = into_node(callee)?;
    let mut args = into_args(args)?;
    if args.is_empty() {
        return Ok(StackValue::Node(callee));
    }
    args.reverse();
    Ok(StackValue::Node(Node::Application {
        callee: Box::new(callee),
        args,
    }))
}

pub fn args_cons(children: Vec<StackValue>) -> Result<StackValue, ParseError> {
    let [head, tail] = take::<2>(children)?;
    let mut args = into_args(tail)?;
    args.push(into_node(head)?);
    Ok(StackValue::Args(args))
}

pub fn args_empty(children: Vec<StackValue>) -> Result<StackValue, ParseError> {
    let [] = take::<0>(children)?;
    Ok(StackValue::Args(Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> StackValue {
        StackValue::Node(Node::Number(Number::Int(n)))
    }

    #[test]
    fn test_application_collapses_without_args() {
        let result = application(vec![int(1), StackValue::Args(Vec::new())]).unwrap();
        assert_eq!(result, int(1));
    }

    /// Reduce `(f a1 … ak)` the way the parser does: innermost ARG-TAIL first.
    fn apply(callee: StackValue, args: Vec<StackValue>) -> StackValue {
        let mut tail = args_empty(Vec::new()).unwrap();
        for arg in args.into_iter().rev() {
            tail = args_cons(vec![arg, tail]).unwrap();
        }
        application(vec![callee, tail]).unwrap()
    }

    #[test]
    fn test_application_keeps_argument_order() {
        let callee = StackValue::Node(Node::Identifier("f".to_string()));
        let result = apply(callee, (1..=4).map(int).collect());
        assert_eq!(
            result,
            StackValue::Node(Node::Application {
                callee: Box::new(Node::Identifier("f".to_string())),
                args: (1..=4).map(|n| Node::Number(Number::Int(n))).collect(),
            })
        );
    }

    #[test]
    fn test_long_argument_list() {
        let callee = StackValue::Node(Node::Identifier("f".to_string()));
        match apply(callee, (0..50_000).map(int).collect()) {
            StackValue::Node(Node::Application { ref args, .. }) => {
                assert_eq!(args.len(), 50_000);
                assert_eq!(args[0], Node::Number(Number::Int(0)));
                assert_eq!(args[49_999], Node::Number(Number::Int(49_999)));
            }
            other => panic!("expected an application, got {}", other),
        }
    }

    #[test]
    fn test_arity_mismatch_is_internal() {
        let err = add(vec![int(1)]).unwrap_err();
        assert!(err.is_internal());
    }

    #[test]
    fn test_wrong_child_shape_is_internal() {
        let err = abstraction(vec![int(1), int(2)]).unwrap_err();
        assert!(matches!(err, ParseError::Internal { .. }));
    }

    #[test]
    fn test_args_display() {
        let half = StackValue::Node(Node::Number(Number::Float(0.5)));
        let name = StackValue::Node(Node::Identifier("a".to_string()));
        let tail = args_cons(vec![half, args_empty(Vec::new()).unwrap()]).unwrap();
        let args = args_cons(vec![name, tail]).unwrap();
        assert_eq!(args.to_string(), "[a 0.5]");
    }
}
