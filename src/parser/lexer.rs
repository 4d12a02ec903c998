//! Lexer (tokenizer) for the expression language
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Every code point is first run through the [`classify`] table; the lexer only
//! ever dispatches on the resulting [`CharClass`], never on raw characters, except
//! for the `.` that may follow a leading `0`.

use super::ast::{Number, SourceLocation};
use super::chars::{classify, CharClass};
use std::fmt;

/// Token categories. Also serves as the terminal alphabet of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Identifier,
    LParen,
    RParen,
    Plus,
    Minus,
    Mult,
    Equals,
    Question,
    Lambda,
    Def,
    End,
}

impl TokenKind {
    /// Stable diagnostic name
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Mult => "MULT",
            TokenKind::Equals => "EQUALS",
            TokenKind::Question => "QUESTION",
            TokenKind::Lambda => "LAMBDA",
            TokenKind::Def => "DEF",
            TokenKind::End => "END",
        }
    }

    /// Kind of the fixed single-character token for this class, if any.
    fn fixed(class: CharClass) -> Option<TokenKind> {
        match class {
            CharClass::LeftParen => Some(TokenKind::LParen),
            CharClass::RightParen => Some(TokenKind::RParen),
            CharClass::Plus => Some(TokenKind::Plus),
            CharClass::Minus => Some(TokenKind::Minus),
            CharClass::Multiply => Some(TokenKind::Mult),
            CharClass::Equals => Some(TokenKind::Equals),
            CharClass::Question => Some(TokenKind::Question),
            CharClass::Lambda => Some(TokenKind::Lambda),
            CharClass::Definition => Some(TokenKind::Def),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload carried by a token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Number(Number),
    Name(String),
    Symbol(char),
}

/// A single lexeme. `value` is `None` only for [`TokenKind::End`].
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<TokenValue>,
    pub location: SourceLocation,
    pub width: usize, // in code points
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(TokenValue::Number(n)) => write!(f, "{} {}", self.kind, n),
            Some(TokenValue::Name(name)) => write!(f, "{} '{}'", self.kind, name),
            Some(TokenValue::Symbol(ch)) => write!(f, "{} '{}'", self.kind, ch),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// Code point outside every character class
    IllegalCharacter { ch: char, location: SourceLocation },

    /// `0.` not followed by a digit
    MissingFractionDigits { location: SourceLocation },

    /// A literal with a non-zero leading digit followed by `.`
    FractionOnNonZeroLiteral { location: SourceLocation },

    /// Literal too large for its numeric representation
    NumberOutOfRange {
        literal: String,
        location: SourceLocation,
    },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::IllegalCharacter { location, .. }
            | LexError::MissingFractionDigits { location }
            | LexError::FractionOnNonZeroLiteral { location }
            | LexError::NumberOutOfRange { location, .. } => *location,
        }
    }

    /// The character the error points at, when there is a single one.
    pub fn offending_char(&self) -> Option<char> {
        match self {
            LexError::IllegalCharacter { ch, .. } => Some(*ch),
            _ => None,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::IllegalCharacter { ch: '.', location } => write!(
                f,
                "Invalid number at index {}: decimals must start with '0.'",
                location.index
            ),
            LexError::IllegalCharacter { ch, location } => {
                write!(f, "Illegal character {:?} at index {}", ch, location.index)
            }
            LexError::MissingFractionDigits { location } => write!(
                f,
                "Invalid number at index {}: digits required after '.'",
                location.index
            ),
            LexError::FractionOnNonZeroLiteral { location } => write!(
                f,
                "Invalid number at index {}: decimals must be 0.<digits>",
                location.index
            ),
            LexError::NumberOutOfRange { literal, location } => write!(
                f,
                "Invalid number at index {}: {} is out of range",
                location.index, literal
            ),
        }
    }
}

impl std::error::Error for LexError {}

/// Tokenize a whole source string.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Lexer for the expression language
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input. The result always ends with a single
    /// [`TokenKind::End`] token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            let loc = self.current_location();
            let class = classify(ch).ok_or(LexError::IllegalCharacter { ch, location: loc })?;

            if class.is_whitespace() {
                self.advance();
                continue;
            }

            // Digits are dispatched before identifiers, so an identifier can
            // never start with one.
            let token = if class == CharClass::Digit {
                self.number_literal(loc)?
            } else if class.is_identifier_start() {
                self.identifier(loc)
            } else if let Some(kind) = TokenKind::fixed(class) {
                self.advance();
                Token {
                    kind,
                    value: Some(TokenValue::Symbol(ch)),
                    location: loc,
                    width: 1,
                }
            } else {
                return Err(LexError::IllegalCharacter { ch, location: loc });
            };
            tokens.push(token);
        }

        tokens.push(Token {
            kind: TokenKind::End,
            value: None,
            location: self.current_location(),
            width: 0,
        });
        Ok(tokens)
    }

    /// Scan a numeric literal: `0`, `0.` DIGIT+, or [1-9] DIGIT*.
    fn number_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let start = self.position;

        let first = self.advance();
        let value = if first == Some('0') {
            if self.peek() != Some('.') {
                Number::Int(0)
            } else {
                self.advance();
                if !self.peek_is(CharClass::Digit) {
                    return Err(LexError::MissingFractionDigits { location: loc });
                }
                self.skip_digits();
                let literal = self.text_from(start);
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| LexError::NumberOutOfRange {
                        literal: literal.clone(),
                        location: loc,
                    })?;
                Number::Float(value)
            }
        } else {
            // only reached from the digit class
            debug_assert!(
                matches!(first, Some('1'..='9')),
                "number scan entered on {:?}",
                first
            );
            self.skip_digits();
            if self.peek() == Some('.') {
                return Err(LexError::FractionOnNonZeroLiteral { location: loc });
            }
            let literal = self.text_from(start);
            let value = literal
                .parse::<i64>()
                .map_err(|_| LexError::NumberOutOfRange {
                    literal: literal.clone(),
                    location: loc,
                })?;
            Number::Int(value)
        };

        Ok(Token {
            kind: TokenKind::Number,
            value: Some(TokenValue::Number(value)),
            location: loc,
            width: self.position - start,
        })
    }

    /// Scan an identifier: letter or underscore, then letters, digits, underscores.
    fn identifier(&mut self, loc: SourceLocation) -> Token {
        let start = self.position;
        self.advance();
        while self
            .peek()
            .and_then(classify)
            .is_some_and(CharClass::is_identifier_continue)
        {
            self.advance();
        }

        Token {
            kind: TokenKind::Identifier,
            value: Some(TokenValue::Name(self.text_from(start))),
            location: loc,
            width: self.position - start,
        }
    }

    fn skip_digits(&mut self) {
        while self.peek_is(CharClass::Digit) {
            self.advance();
        }
    }

    fn text_from(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_is(&self, class: CharClass) -> bool {
        self.peek().and_then(classify) == Some(class)
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.position, self.line, self.column)
    }
}
