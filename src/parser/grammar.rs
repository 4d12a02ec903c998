//! LL(1) grammar table
//!
//! Maps `(nonterminal, lookahead)` to the single production the parser must
//! expand. Each production also names the builder that synthesizes its value
//! once all right-hand-side children are on the value stack.
//!
//! ```text
//! PROGRAM    → EXPR
//! EXPR       → NUMBER | IDENTIFIER | LPAREN PAREN-BODY RPAREN
//! PAREN-BODY → PLUS EXPR EXPR | MINUS EXPR EXPR | MULT EXPR EXPR | EQUALS EXPR EXPR
//!            | QUESTION EXPR EXPR EXPR
//!            | LAMBDA IDENTIFIER EXPR
//!            | DEF IDENTIFIER EXPR EXPR
//!            | EXPR ARG-TAIL
//! ARG-TAIL   → EXPR ARG-TAIL | ε
//! ```
//!
//! The operator-headed alternatives of PAREN-BODY start with operator or
//! keyword tokens while the application alternative starts with an operand
//! token, so one token of lookahead always selects exactly one production.

use super::builders::{self, Builder};
use super::lexer::TokenKind;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::LazyLock;

/// Non-terminal grammar symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonTerminal {
    Program,
    Expr,
    ParenBody,
    ArgTail,
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NonTerminal::Program => "PROGRAM",
            NonTerminal::Expr => "EXPR",
            NonTerminal::ParenBody => "PAREN-BODY",
            NonTerminal::ArgTail => "ARG-TAIL",
        })
    }
}

/// A right-hand-side symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(TokenKind),
    NonTerminal(NonTerminal),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(kind) => write!(f, "{}", kind),
            Symbol::NonTerminal(nt) => write!(f, "{}", nt),
        }
    }
}

/// Convenience macro for creating a terminal symbol by name.
macro_rules! term {
    ($kind:ident) => {
        Symbol::Terminal(TokenKind::$kind)
    };
}

/// Convenience macro for creating a non-terminal symbol by name.
macro_rules! nonterm {
    ($nonterminal:ident) => {
        Symbol::NonTerminal(NonTerminal::$nonterminal)
    };
}

/// One table entry: the expansion and how to reduce it.
#[derive(Clone, Copy)]
pub struct Production {
    pub name: &'static str,
    pub rhs: &'static [Symbol],
    pub builder: Builder,
}

impl fmt::Debug for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Production")
            .field("name", &self.name)
            .field("rhs", &self.rhs)
            .finish()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rhs.is_empty() {
            return write!(f, "ε");
        }
        let rhs: Vec<String> = self.rhs.iter().map(Symbol::to_string).collect();
        write!(f, "{}", rhs.join(" "))
    }
}

const OPERAND_STARTS: [TokenKind; 3] = [
    TokenKind::Number,
    TokenKind::Identifier,
    TokenKind::LParen,
];

type Table = FxHashMap<(NonTerminal, TokenKind), Production>;

fn add(
    table: &mut Table,
    nonterminal: NonTerminal,
    lookaheads: &[TokenKind],
    name: &'static str,
    rhs: &'static [Symbol],
    builder: Builder,
) {
    for &lookahead in lookaheads {
        let previous = table.insert((nonterminal, lookahead), Production { name, rhs, builder });
        debug_assert!(
            previous.is_none(),
            "LL(1) conflict at ({}, {})",
            nonterminal,
            lookahead
        );
    }
}

/// The LL(1) parse table.
static TABLE: LazyLock<Table> = LazyLock::new(|| {
    let mut table = Table::default();

    // program -> expression
    add(
        &mut table,
        NonTerminal::Program,
        &OPERAND_STARTS,
        "program",
        &[nonterm!(Expr)],
        builders::pass,
    );

    // expression -> number | identifier | ( paren body )
    add(
        &mut table,
        NonTerminal::Expr,
        &[TokenKind::Number],
        "number",
        &[term!(Number)],
        builders::number,
    );
    add(
        &mut table,
        NonTerminal::Expr,
        &[TokenKind::Identifier],
        "identifier",
        &[term!(Identifier)],
        builders::identifier,
    );
    add(
        &mut table,
        NonTerminal::Expr,
        &[TokenKind::LParen],
        "group",
        &[term!(LParen), nonterm!(ParenBody), term!(RParen)],
        builders::pass,
    );

    // paren body -> operator-headed forms
    add(
        &mut table,
        NonTerminal::ParenBody,
        &[TokenKind::Plus],
        "plus",
        &[term!(Plus), nonterm!(Expr), nonterm!(Expr)],
        builders::add,
    );
    add(
        &mut table,
        NonTerminal::ParenBody,
        &[TokenKind::Mult],
        "mult",
        &[term!(Mult), nonterm!(Expr), nonterm!(Expr)],
        builders::mul,
    );
    add(
        &mut table,
        NonTerminal::ParenBody,
        &[TokenKind::Equals],
        "equals",
        &[term!(Equals), nonterm!(Expr), nonterm!(Expr)],
        builders::equals,
    );
    add(
        &mut table,
        NonTerminal::ParenBody,
        &[TokenKind::Minus],
        "minus",
        &[term!(Minus), nonterm!(Expr), nonterm!(Expr)],
        builders::sub,
    );
    add(
        &mut table,
        NonTerminal::ParenBody,
        &[TokenKind::Question],
        "conditional",
        &[term!(Question), nonterm!(Expr), nonterm!(Expr), nonterm!(Expr)],
        builders::conditional,
    );
    add(
        &mut table,
        NonTerminal::ParenBody,
        &[TokenKind::Lambda],
        "abstraction",
        &[term!(Lambda), term!(Identifier), nonterm!(Expr)],
        builders::abstraction,
    );
    add(
        &mut table,
        NonTerminal::ParenBody,
        &[TokenKind::Def],
        "binding",
        &[term!(Def), term!(Identifier), nonterm!(Expr), nonterm!(Expr)],
        builders::binding,
    );

    // paren body -> application (or a bare group when there are no arguments)
    add(
        &mut table,
        NonTerminal::ParenBody,
        &OPERAND_STARTS,
        "application",
        &[nonterm!(Expr), nonterm!(ArgTail)],
        builders::application,
    );

    // argument tail -> expression argument tail | ε
    add(
        &mut table,
        NonTerminal::ArgTail,
        &OPERAND_STARTS,
        "argument",
        &[nonterm!(Expr), nonterm!(ArgTail)],
        builders::args_cons,
    );
    add(
        &mut table,
        NonTerminal::ArgTail,
        &[TokenKind::RParen],
        "end of arguments",
        &[],
        builders::args_empty,
    );

    table
});

/// Look up the production for `nonterminal` under `lookahead`.
pub fn lookup(nonterminal: NonTerminal, lookahead: TokenKind) -> Option<&'static Production> {
    TABLE.get(&(nonterminal, lookahead))
}

/// Every lookahead with an entry for `nonterminal`, sorted by name.
pub fn expected(nonterminal: NonTerminal) -> Vec<TokenKind> {
    let mut kinds: Vec<TokenKind> = TABLE
        .keys()
        .filter(|(nt, _)| *nt == nonterminal)
        .map(|&(_, kind)| kind)
        .collect();
    kinds.sort_by_key(|kind| kind.name());
    kinds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size() {
        // 3 + 3 + 7 + 3 + 3 + 1
        assert_eq!(TABLE.len(), 20);
    }

    #[test]
    fn test_paren_body_alternatives_are_disjoint() {
        let operators = [
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Mult,
            TokenKind::Equals,
            TokenKind::Question,
            TokenKind::Lambda,
            TokenKind::Def,
        ];
        for kind in operators {
            let production = lookup(NonTerminal::ParenBody, kind).unwrap();
            assert_eq!(production.rhs[0], Symbol::Terminal(kind));
        }
        for kind in OPERAND_STARTS {
            let production = lookup(NonTerminal::ParenBody, kind).unwrap();
            assert_eq!(production.name, "application");
        }
    }

    #[test]
    fn test_arg_tail_epsilon() {
        let production = lookup(NonTerminal::ArgTail, TokenKind::RParen).unwrap();
        assert!(production.rhs.is_empty());
        assert_eq!(production.to_string(), "ε");
        assert!(lookup(NonTerminal::ArgTail, TokenKind::End).is_none());
    }

    #[test]
    fn test_expected_is_sorted() {
        assert_eq!(
            expected(NonTerminal::Expr),
            vec![TokenKind::Identifier, TokenKind::LParen, TokenKind::Number]
        );
        assert_eq!(
            expected(NonTerminal::ArgTail),
            vec![
                TokenKind::Identifier,
                TokenKind::LParen,
                TokenKind::Number,
                TokenKind::RParen
            ]
        );
    }

    #[test]
    fn test_production_display() {
        let production = lookup(NonTerminal::ParenBody, TokenKind::Def).unwrap();
        assert_eq!(production.to_string(), "DEF IDENTIFIER EXPR EXPR");
    }
}
