//! Inline control codes of the game text stream
//!
//! Control codes occupy the reserved `0xF8xx` range of the double-byte
//! stream. Line and page breaks have their own textual forms; every other
//! known code renders as a bracketed `[Name]` or `[Name:NNNN]` token.

/// Opcode for a line break
pub const LINE_BREAK: u16 = 0xF801;

/// Opcode for a page break
pub const PAGE_BREAK: u16 = 0xF802;

/// Keyword of the page break token
pub const PAGE_BREAK_KEYWORD: &str = "Page";

/// Opening delimiter of a token
pub const TOKEN_BEGIN: char = '[';

/// Closing delimiter of a token
pub const TOKEN_END: char = ']';

/// Separates a token's name from its argument
pub const ARGUMENT_SEPARATOR: char = ':';

/// Number of argument values a control code carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Opcode only
    None,
    /// Opcode followed by one little-endian `u16`
    One,
}

/// A known control code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlCode {
    Color,
    Number,
    Variable1,
    Variable2,
    Variable3,
    Guild,
    Item,
    Enemy1,
    Character,
    Skyship,
    Location,
    Enemy2,
    Item2,
    Count,
    Quest,
    Variable4,
}

impl ControlCode {
    /// Every known control code, in opcode order
    pub const ALL: [ControlCode; 16] = [
        Self::Color,
        Self::Number,
        Self::Variable1,
        Self::Variable2,
        Self::Variable3,
        Self::Guild,
        Self::Item,
        Self::Enemy1,
        Self::Character,
        Self::Skyship,
        Self::Location,
        Self::Enemy2,
        Self::Item2,
        Self::Count,
        Self::Quest,
        Self::Variable4,
    ];

    /// Look up the control code for a two-byte value
    #[must_use]
    pub fn from_opcode(value: u16) -> Option<Self> {
        let code = match value {
            0xF804 => Self::Color,
            0xF810 => Self::Number,
            0xF811 => Self::Variable1,
            0xF815 => Self::Variable2,
            0xF819 => Self::Variable3,
            0xF840 => Self::Guild,
            0xF841 => Self::Item,
            0xF842 => Self::Enemy1,
            0xF843 => Self::Character,
            0xF844 => Self::Skyship,
            0xF847 => Self::Location,
            0xF848 => Self::Enemy2,
            0xF849 => Self::Item2,
            0xF84A => Self::Count,
            0xF850 => Self::Quest,
            0xF851 => Self::Variable4,
            _ => return None,
        };
        Some(code)
    }

    /// Look up the control code for a token name (case-sensitive)
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.name() == name)
    }

    /// The reserved two-byte value, stored big-endian in the stream
    #[must_use]
    pub fn opcode(self) -> u16 {
        match self {
            Self::Color => 0xF804,
            Self::Number => 0xF810,
            Self::Variable1 => 0xF811,
            Self::Variable2 => 0xF815,
            Self::Variable3 => 0xF819,
            Self::Guild => 0xF840,
            Self::Item => 0xF841,
            Self::Enemy1 => 0xF842,
            Self::Character => 0xF843,
            Self::Skyship => 0xF844,
            Self::Location => 0xF847,
            Self::Enemy2 => 0xF848,
            Self::Item2 => 0xF849,
            Self::Count => 0xF84A,
            Self::Quest => 0xF850,
            Self::Variable4 => 0xF851,
        }
    }

    /// Token name used in the readable form
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Color => "Color",
            Self::Number => "Number",
            Self::Variable1 => "Variable1",
            Self::Variable2 => "Variable2",
            Self::Variable3 => "Variable3",
            Self::Guild => "Guild",
            Self::Item => "Item",
            Self::Enemy1 => "Enemy1",
            Self::Character => "Character",
            Self::Skyship => "Skyship",
            Self::Location => "Location",
            Self::Enemy2 => "Enemy2",
            Self::Item2 => "Item2",
            Self::Count => "Count",
            Self::Quest => "Quest",
            Self::Variable4 => "Variable4",
        }
    }

    #[must_use]
    pub fn arity(self) -> Arity {
        match self {
            Self::Guild | Self::Skyship | Self::Location | Self::Quest | Self::Variable4 => {
                Arity::None
            }
            _ => Arity::One,
        }
    }
}

/// Split a token body into its name and optional argument
pub(crate) fn split_token(body: &str) -> (&str, Option<&str>) {
    match body.split_once(ARGUMENT_SEPARATOR) {
        Some((name, argument)) => (name, Some(argument)),
        None => (body, None),
    }
}
