//! Character classifier
//!
//! Maps a single code point to the lexical category the lexer dispatches on.
//! The assignments live in a fixed table of code-point ranges; a code point
//! outside every range has no category and is reported by the lexer as an
//! illegal character.

/// Lexical category of a single code point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Digit,
    LowerLetter,
    UpperLetter,
    Underscore,
    LeftParen,
    RightParen,
    Plus,
    Minus,
    Multiply,
    Equals,
    Question,
    Lambda,
    Definition,
    Space,
    Tab,
    Newline,
}

impl CharClass {
    pub fn is_whitespace(self) -> bool {
        matches!(self, CharClass::Space | CharClass::Tab | CharClass::Newline)
    }

    pub fn is_identifier_start(self) -> bool {
        matches!(
            self,
            CharClass::LowerLetter | CharClass::UpperLetter | CharClass::Underscore
        )
    }

    pub fn is_identifier_continue(self) -> bool {
        self.is_identifier_start() || self == CharClass::Digit
    }
}

/// Inclusive code-point ranges and their category. Single-character
/// categories are ranges of width one.
const CLASS_TABLE: &[(u32, u32, CharClass)] = &[
    (0x0030, 0x0039, CharClass::Digit),       // 0-9
    (0x0061, 0x007A, CharClass::LowerLetter), // a-z
    (0x0041, 0x005A, CharClass::UpperLetter), // A-Z
    (0x005F, 0x005F, CharClass::Underscore),  // _
    (0x0028, 0x0028, CharClass::LeftParen),   // (
    (0x0029, 0x0029, CharClass::RightParen),  // )
    (0x002B, 0x002B, CharClass::Plus),        // +
    (0x2212, 0x2212, CharClass::Minus),       // − (U+2212 MINUS SIGN)
    (0x00D7, 0x00D7, CharClass::Multiply),    // ×
    (0x003D, 0x003D, CharClass::Equals),      // =
    (0x003F, 0x003F, CharClass::Question),    // ?
    (0x03BB, 0x03BB, CharClass::Lambda),      // λ
    (0x225C, 0x225C, CharClass::Definition),  // ≜
    (0x0020, 0x0020, CharClass::Space),
    (0x0009, 0x0009, CharClass::Tab),
    (0x000A, 0x000A, CharClass::Newline),
];

/// Classify a code point, or `None` if it belongs to no category.
pub fn classify(ch: char) -> Option<CharClass> {
    let code = ch as u32;
    CLASS_TABLE
        .iter()
        .find(|(lo, hi, _)| (*lo..=*hi).contains(&code))
        .map(|&(_, _, class)| class)
}
