// Integration tests for the source → AST pipeline

use tabula::parser::ast::{BinOp, Node, Number};
use tabula::parser::grammar::NonTerminal;
use tabula::parser::lexer::{LexError, TokenKind};
use tabula::parser::parser::ParseError;
use tabula::parser::{parse_source, Error};
use tabula::samples::run_samples;
use tabula::session::ParseSession;
use tabula::snapshot::Step;

fn parse(source: &str) -> Node {
    match parse_source(source) {
        Ok(node) => node,
        Err(e) => panic!("{:?} failed to parse: {}", source, e),
    }
}

fn int(n: i64) -> Node {
    Node::Number(Number::Int(n))
}

fn ident(name: &str) -> Node {
    Node::Identifier(name.to_string())
}

fn binary(op: BinOp, left: Node, right: Node) -> Node {
    Node::BinaryOp {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

#[test]
fn test_integer_literal() {
    assert_eq!(parse("42"), int(42));
}

#[test]
fn test_addition() {
    assert_eq!(parse("(+ 2 3)"), binary(BinOp::Add, int(2), int(3)));
}

#[test]
fn test_multiplication_with_identifier() {
    assert_eq!(parse("(× x 5)"), binary(BinOp::Mul, ident("x"), int(5)));
}

#[test]
fn test_nested_binary() {
    assert_eq!(
        parse("(+ (× 2 3) 4)"),
        binary(BinOp::Add, binary(BinOp::Mul, int(2), int(3)), int(4))
    );
}

#[test]
fn test_conditional() {
    assert_eq!(
        parse("(? (= x 0) 1 0)"),
        Node::Conditional {
            test: Box::new(binary(BinOp::Eq, ident("x"), int(0))),
            then_branch: Box::new(int(1)),
            else_branch: Box::new(int(0)),
        }
    );
}

#[test]
fn test_applied_abstraction() {
    assert_eq!(
        parse("((λ x (+ x 1)) 5)"),
        Node::Application {
            callee: Box::new(Node::Abstraction {
                param: "x".to_string(),
                body: Box::new(binary(BinOp::Add, ident("x"), int(1))),
            }),
            args: vec![int(5)],
        }
    );
}

#[test]
fn test_binding() {
    assert_eq!(
        parse("(≜ n (− 10 y) (× n n))"),
        Node::Binding {
            name: "n".to_string(),
            value: Box::new(binary(BinOp::Sub, int(10), ident("y"))),
            body: Box::new(binary(BinOp::Mul, ident("n"), ident("n"))),
        }
    );
}

#[test]
fn test_integer_literals() {
    for text in ["0", "7", "10", "123", "9000000000", "9223372036854775807"] {
        let expected: i64 = text.parse().unwrap();
        assert_eq!(parse(text), int(expected), "literal {}", text);
    }
}

#[test]
fn test_fraction_literals() {
    for text in ["0.0", "0.5", "0.25", "0.001", "0.999999"] {
        let expected: f64 = text.parse().unwrap();
        assert_eq!(parse(text), Node::Number(Number::Float(expected)));
    }
}

#[test]
fn test_missing_fraction_digits() {
    for text in ["0.", "(+ 0. 1)", "0.x"] {
        assert!(
            matches!(
                parse_source(text),
                Err(Error::Lex(LexError::MissingFractionDigits { .. }))
            ),
            "{:?} should be rejected",
            text
        );
    }
}

#[test]
fn test_fraction_on_non_zero_literal() {
    assert!(matches!(
        parse_source("12.5"),
        Err(Error::Lex(LexError::FractionOnNonZeroLiteral { .. }))
    ));
}

#[test]
fn test_identifiers() {
    for name in ["x", "Y", "_", "foo_bar", "a1b2", "_tmp9", "CamelCase"] {
        assert_eq!(parse(name), ident(name));
    }
}

#[test]
fn test_binary_shape_law() {
    let operands = ["1", "x", "(+ 1 2)", "0.5", "(f y)"];
    let ops = [
        ('+', BinOp::Add),
        ('×', BinOp::Mul),
        ('=', BinOp::Eq),
        ('−', BinOp::Sub),
    ];
    for (glyph, op) in ops {
        for a in operands {
            for b in operands {
                let source = format!("({} {} {})", glyph, a, b);
                assert_eq!(parse(&source), binary(op, parse(a), parse(b)), "{}", source);
            }
        }
    }
}

#[test]
fn test_application_arguments_in_order() {
    let args = ["1", "y", "(× 2 z)", "0.5"];
    for k in 1..=args.len() {
        let source = format!("(f {})", args[..k].join(" "));
        assert_eq!(
            parse(&source),
            Node::Application {
                callee: Box::new(ident("f")),
                args: args[..k].iter().map(|a| parse(a)).collect(),
            },
            "{}",
            source
        );
    }
}

#[test]
fn test_group_collapses() {
    for inner in ["x", "42", "(+ 1 2)", "(λ y y)"] {
        let grouped = format!("({})", inner);
        assert_eq!(parse(&grouped), parse(inner));
        let doubled = format!("(({}))", inner);
        assert_eq!(parse(&doubled), parse(inner));
    }
}

#[test]
fn test_canonical_form_reparses() {
    let sources = [
        "42",
        "0.125",
        "0.99999999999999999",
        "(+ 0.99999999999999999 0.5)",
        "(+ (× 2 3) 4)",
        "(? (= x 0) 1 0)",
        "((λ x (+ x 1)) 5)",
        "(≜ f (λ n (− n 1)) (f (f 3)))",
        "(g 0.0 h (k))",
        "  (\n+\t1\n 2 )  ",
    ];
    for source in sources {
        let node = parse(source);
        let canonical = node.to_string();
        assert_eq!(parse(&canonical), node, "{} → {}", source, canonical);
    }
}

#[test]
fn test_fraction_rounding_to_one() {
    let node = parse("0.99999999999999999");
    assert_eq!(node, Node::Number(Number::Float(1.0)));
    assert_eq!(node.to_string(), "0.99999999999999999");
}

fn nested_sums(depth: usize) -> String {
    format!("{}0{}", "(+ 1 ".repeat(depth), ")".repeat(depth))
}

#[test]
fn test_deep_nesting_parses_and_drops() {
    let result = parse_source(&nested_sums(100_000));
    assert!(result.is_ok());
    drop(result);
}

#[test]
fn test_deep_nesting_error_drops_partial_tree() {
    let mut source = nested_sums(100_000);
    source.pop();
    let result = parse_source(&source);
    assert!(matches!(
        result,
        Err(Error::Parse(ParseError::UnexpectedToken {
            found: TokenKind::End,
            expected: TokenKind::RParen,
            ..
        }))
    ));
}

#[test]
fn test_unterminated_group() {
    let err = parse_source("(+ 2").unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ParseError::NoProduction {
            nonterminal: NonTerminal::Expr,
            found: TokenKind::End,
            ..
        })
    ));
}

#[test]
fn test_close_paren_at_start() {
    let err = parse_source(")").unwrap_err();
    match err {
        Error::Parse(ParseError::NoProduction {
            nonterminal,
            found,
            expected,
            ..
        }) => {
            assert_eq!(nonterminal, NonTerminal::Program);
            assert_eq!(found, TokenKind::RParen);
            assert_eq!(
                expected,
                vec![TokenKind::Identifier, TokenKind::LParen, TokenKind::Number]
            );
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_extra_operand() {
    let err = parse_source("(+ 2 3 4)").unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ParseError::UnexpectedToken {
            found: TokenKind::Number,
            expected: TokenKind::RParen,
            ..
        })
    ));
    assert_eq!(err.location().map(|l| l.index), Some(7));
}

#[test]
fn test_two_programs() {
    let err = parse_source("1 2").unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ParseError::TrailingInput {
            found: TokenKind::Number,
            ..
        })
    ));
    assert!(!err.is_internal());
}

#[test]
fn test_illegal_characters() {
    for (source, ch, index) in [("#", '#', 0), ("(+ 1 .5)", '.', 5), ("(- 1 2)", '-', 1)] {
        match parse_source(source) {
            Err(Error::Lex(e)) => {
                assert_eq!(e.offending_char(), Some(ch), "{}", source);
                assert_eq!(e.location().index, index, "{}", source);
            }
            other => panic!("{:?} should be a lexical error, got {:?}", source, other),
        }
    }
}

#[test]
fn test_empty_source() {
    let err = parse_source("").unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ParseError::NoProduction {
            nonterminal: NonTerminal::Program,
            found: TokenKind::End,
            ..
        })
    ));
}

#[test]
fn test_trace_matches_untraced_parse() {
    for source in ["(+ (× 2 3) 4)", "((λ x x) 1 2)", "(+ 2 3 4)"] {
        let mut session = ParseSession::trace(source, 1024 * 1024);
        assert_eq!(session.outcome(), &parse_source(source));
        assert!(session.total_snapshots() > 1);

        session.jump_to_end().unwrap();
        let final_step = session.current().map(|s| s.step.clone());
        match session.outcome() {
            Ok(_) => assert_eq!(final_step, Some(Step::Accept)),
            Err(_) => assert!(matches!(final_step, Some(Step::Failed { .. }))),
        }
    }
}

#[test]
fn test_samples_pass() {
    let reports = run_samples();
    assert!(!reports.is_empty());
    for report in &reports {
        assert!(report.passed(), "{}", report);
    }
}
