//! Character mapping between the double-byte game encoding and readable text
//!
//! Characters go through three layers:
//! - caller-supplied [`CharOverrides`] (checked first)
//! - the built-in full-width to ASCII table
//! - Shift-JIS (code page 932), including the user-defined area

use std::collections::HashMap;
use std::path::Path;

use encoding_rs::SHIFT_JIS;
use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Full-width game characters and their plain ASCII forms
pub const FULL_WIDTH_TO_ASCII: [(char, char); 83] = [
    ('　', ' '), ('，', ','), ('．', '.'), ('：', ':'), ('；', ';'), ('？', '?'), ('！', '!'), ('－', '-'),
    ('／', '/'), ('～', '~'), ('’', '\''), ('”', '"'), ('（', '('), ('）', ')'), ('［', '['), ('］', ']'),
    ('〈', '<'), ('〉', '>'), ('＋', '+'), ('＊', '*'), ('＆', '&'),

    ('０', '0'), ('１', '1'), ('２', '2'), ('３', '3'), ('４', '4'), ('５', '5'), ('６', '6'), ('７', '7'),
    ('８', '8'), ('９', '9'),

    ('Ａ', 'A'), ('Ｂ', 'B'), ('Ｃ', 'C'), ('Ｄ', 'D'), ('Ｅ', 'E'), ('Ｆ', 'F'), ('Ｇ', 'G'), ('Ｈ', 'H'),
    ('Ｉ', 'I'), ('Ｊ', 'J'), ('Ｋ', 'K'), ('Ｌ', 'L'), ('Ｍ', 'M'), ('Ｎ', 'N'), ('Ｏ', 'O'), ('Ｐ', 'P'),
    ('Ｑ', 'Q'), ('Ｒ', 'R'), ('Ｓ', 'S'), ('Ｔ', 'T'), ('Ｕ', 'U'), ('Ｖ', 'V'), ('Ｗ', 'W'), ('Ｘ', 'X'),
    ('Ｙ', 'Y'), ('Ｚ', 'Z'),

    ('ａ', 'a'), ('ｂ', 'b'), ('ｃ', 'c'), ('ｄ', 'd'), ('ｅ', 'e'), ('ｆ', 'f'), ('ｇ', 'g'), ('ｈ', 'h'),
    ('ｉ', 'i'), ('ｊ', 'j'), ('ｋ', 'k'), ('ｌ', 'l'), ('ｍ', 'm'), ('ｎ', 'n'), ('ｏ', 'o'), ('ｐ', 'p'),
    ('ｑ', 'q'), ('ｒ', 'r'), ('ｓ', 's'), ('ｔ', 't'), ('ｕ', 'u'), ('ｖ', 'v'), ('ｗ', 'w'), ('ｘ', 'x'),
    ('ｙ', 'y'), ('ｚ', 'z'),
];

/// First code point of the Private Use Area block that code page 932 maps
/// its user-defined rows (lead bytes `0xF0..=0xF9`) onto
const USER_DEFINED_FIRST: u32 = 0xE000;

/// Number of code points in that block (10 rows of 188 cells)
const USER_DEFINED_LEN: u32 = 1880;

/// Caller-supplied character substitutions
///
/// Maps a game-side character to the character shown in the readable text.
/// Decoding applies the map directly, encoding applies its inverse. Entries
/// take precedence over the built-in full-width table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharOverrides {
    entries: IndexMap<char, char>,
}

impl CharOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an override
    pub fn insert(&mut self, game: char, readable: char) -> Option<char> {
        self.entries.insert(game, readable)
    }

    /// Parse overrides from a JSON object of single-character strings,
    /// e.g. `{"ｱ": "ä"}`
    ///
    /// # Errors
    /// Returns [`Error::JsonError`] if the text is not a JSON object of strings,
    /// or [`Error::InvalidCharOverride`] if a key or value is not exactly one character.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: IndexMap<String, String> = serde_json::from_str(json)?;
        let mut overrides = Self::new();

        for (source_char, replacement) in raw {
            let (Some(game), Some(readable)) = (single_char(&source_char), single_char(&replacement))
            else {
                return Err(Error::InvalidCharOverride {
                    source_char,
                    replacement,
                });
            };
            overrides.insert(game, readable);
        }

        Ok(overrides)
    }

    /// Read overrides from a JSON file
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be read, otherwise as [`CharOverrides::from_json_str`].
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(game, readable)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.entries.iter().map(|(&game, &readable)| (game, readable))
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Lookup tables built once from the built-in table and the overrides
#[derive(Debug, Clone)]
pub(crate) struct CharMaps {
    pub(crate) to_readable: HashMap<char, char>,
    pub(crate) to_game: HashMap<char, char>,
}

impl CharMaps {
    pub(crate) fn new(overrides: &CharOverrides) -> Self {
        let mut to_readable: HashMap<char, char> = FULL_WIDTH_TO_ASCII.iter().copied().collect();
        let mut to_game: HashMap<char, char> =
            FULL_WIDTH_TO_ASCII.iter().map(|&(game, ascii)| (ascii, game)).collect();

        let mut claimed: HashMap<char, char> = HashMap::new();
        for (game, readable) in overrides.iter() {
            if let Some(previous) = claimed.insert(readable, game) {
                tracing::warn!(
                    "Override {readable:?} is used for both {previous:?} and {game:?}; encoding will use {game:?}"
                );
            }
            to_readable.insert(game, readable);
            to_game.insert(readable, game);
        }

        Self { to_readable, to_game }
    }
}

/// Decode one two-byte unit through code page 932
///
/// Only the first character is kept when the pair decodes to more than one
/// (two single-byte characters).
pub(crate) fn decode_pair(pair: [u8; 2]) -> char {
    let (text, _) = SHIFT_JIS.decode_without_bom_handling(&pair);
    text.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Encode one character through code page 932 as a two-byte unit, appending it to `out`
///
/// Printable ASCII without a table entry is written in its full-width form.
/// Anything else without a double-byte mapping becomes `？`.
pub(crate) fn encode_char(ch: char, out: &mut Vec<u8>) {
    if let Some(pair) = encode_user_defined(ch) {
        out.extend_from_slice(&pair);
        return;
    }

    if let Some(pair) = encode_double_byte(ch).or_else(|| full_width_form(ch).and_then(encode_double_byte)) {
        out.extend_from_slice(&pair);
        return;
    }

    tracing::warn!(
        "Character {ch:?} (U+{:04X}) has no double-byte Shift-JIS mapping, writing '？'",
        ch as u32
    );
    out.extend_from_slice(&UNENCODABLE);
}

/// Code page 932 bytes of `？`
const UNENCODABLE: [u8; 2] = [0x81, 0x48];

fn encode_double_byte(ch: char) -> Option<[u8; 2]> {
    let mut buf = [0u8; 4];
    let (bytes, _, had_errors) = SHIFT_JIS.encode(ch.encode_utf8(&mut buf));
    match *bytes {
        [lead, trail] if !had_errors => Some([lead, trail]),
        _ => None,
    }
}

/// Full-width counterpart of a printable ASCII character (`!` to `~`)
fn full_width_form(ch: char) -> Option<char> {
    if ('!'..='~').contains(&ch) {
        char::from_u32(ch as u32 - 0x21 + 0xFF01)
    } else {
        None
    }
}

/// Map a Private Use Area character back to its user-defined row and cell
fn encode_user_defined(ch: char) -> Option<[u8; 2]> {
    let offset = (ch as u32).checked_sub(USER_DEFINED_FIRST)?;
    if offset >= USER_DEFINED_LEN {
        return None;
    }

    let lead = 0xF0 + offset / 188;
    let cell = offset % 188;
    let trail = if cell < 0x3F { cell + 0x40 } else { cell + 0x41 };
    Some([lead as u8, trail as u8])
}
