//! Game text transcoding
//!
//! Converts between the game's double-byte text stream and readable text.
//! The stream is a sequence of big-endian two-byte units: Shift-JIS
//! characters interleaved with `0xF8xx` control codes, optionally ended by
//! `0xFFFF`. In the readable form control codes appear as bracketed tokens:
//!
//! ```text
//! [Color:0003]Welcome[Color:0000] to [Location]!
//! [Page]
//!
//! Next page.
//! ```
//!
//! Decoding never fails. Encoding never fails either: malformed or unknown
//! tokens are written as literal characters.

mod charset;
mod control;

pub use charset::{CharOverrides, FULL_WIDTH_TO_ASCII};
pub use control::{
    ARGUMENT_SEPARATOR, Arity, ControlCode, LINE_BREAK, PAGE_BREAK, PAGE_BREAK_KEYWORD,
    TOKEN_BEGIN, TOKEN_END,
};

use charset::CharMaps;
use control::split_token;

/// Two-byte value that ends a string
pub const STRING_TERMINATOR: u16 = 0xFFFF;

/// Text codec configured with a set of character overrides
///
/// Build one per batch and pass it by reference to every container codec.
#[derive(Debug, Clone)]
pub struct TextCodec {
    overrides: CharOverrides,
    maps: CharMaps,
}

impl Default for TextCodec {
    fn default() -> Self {
        Self::new(CharOverrides::default())
    }
}

impl TextCodec {
    pub fn new(overrides: CharOverrides) -> Self {
        let maps = CharMaps::new(&overrides);
        Self { overrides, maps }
    }

    pub fn overrides(&self) -> &CharOverrides {
        &self.overrides
    }

    /// Decode a double-byte text stream into readable text
    ///
    /// Stops at the `0xFFFF` terminator or when fewer than two bytes remain.
    #[must_use]
    pub fn decode(&self, data: &[u8]) -> String {
        let mut out = String::with_capacity(data.len() / 2);
        let mut idx = 0;

        while idx + 1 < data.len() {
            let pair = [data[idx], data[idx + 1]];
            let value = u16::from_be_bytes(pair);
            if value == STRING_TERMINATOR {
                break;
            }

            match value {
                LINE_BREAK => out.push('\n'),
                PAGE_BREAK => {
                    push_token(&mut out, PAGE_BREAK_KEYWORD, None);
                    out.push_str("\n\n");
                }
                _ => match ControlCode::from_opcode(value) {
                    Some(code) if code.arity() == Arity::One => {
                        let Some(arg) = data.get(idx + 2..idx + 4) else {
                            push_token(&mut out, code.name(), None);
                            break;
                        };
                        let argument = u16::from_le_bytes([arg[0], arg[1]]);
                        push_token(&mut out, code.name(), Some(argument));
                        idx += 2;
                    }
                    Some(code) => push_token(&mut out, code.name(), None),
                    None => out.push(self.decode_char(pair)),
                },
            }

            idx += 2;
        }

        out
    }

    /// Encode readable text into the double-byte text stream
    ///
    /// The result carries no terminator; containers append their own.
    #[must_use]
    pub fn encode(&self, text: &str) -> Vec<u8> {
        let chars: Vec<char> = text.chars().collect();
        let mut out = Vec::with_capacity(chars.len() * 2);
        let mut idx = 0;

        while idx < chars.len() {
            let ch = chars[idx];
            match ch {
                '\r' => {}
                '\n' => out.extend_from_slice(&LINE_BREAK.to_be_bytes()),
                TOKEN_BEGIN => {
                    if let Some(consumed) = encode_token(&chars, idx, &mut out) {
                        idx += consumed;
                        continue;
                    }
                    self.encode_char_into(ch, &mut out);
                }
                _ => self.encode_char_into(ch, &mut out),
            }
            idx += 1;
        }

        out
    }

    /// Decode a single two-byte character unit (no control code handling)
    #[must_use]
    pub fn decode_char(&self, pair: [u8; 2]) -> char {
        let ch = charset::decode_pair(pair);
        self.maps.to_readable.get(&ch).copied().unwrap_or(ch)
    }

    /// Encode a single character (no token handling)
    #[must_use]
    pub fn encode_char(&self, ch: char) -> Vec<u8> {
        let mut out = Vec::with_capacity(2);
        self.encode_char_into(ch, &mut out);
        out
    }

    fn encode_char_into(&self, ch: char, out: &mut Vec<u8>) {
        let game = self.maps.to_game.get(&ch).copied().unwrap_or(ch);
        charset::encode_char(game, out);
    }
}

fn push_token(out: &mut String, name: &str, argument: Option<u16>) {
    out.push(TOKEN_BEGIN);
    out.push_str(name);
    if let Some(argument) = argument {
        out.push(ARGUMENT_SEPARATOR);
        out.push_str(&format!("{argument:04}"));
    }
    out.push(TOKEN_END);
}

/// Length of a token body starting at `start`, if a closing delimiter comes
/// before the next opening one
fn token_len(chars: &[char], start: usize) -> Option<usize> {
    for (len, &c) in chars.get(start..)?.iter().enumerate() {
        match c {
            TOKEN_BEGIN => return None,
            TOKEN_END => return Some(len),
            _ => {}
        }
    }
    None
}

/// Try to encode the token opening at `open`; returns the number of
/// characters consumed, or `None` if it must be written literally
fn encode_token(chars: &[char], open: usize, out: &mut Vec<u8>) -> Option<usize> {
    let len = token_len(chars, open + 1)?;
    let body: String = chars[open + 1..open + 1 + len].iter().collect();
    let (name, argument) = split_token(&body);
    if name == PAGE_BREAK_KEYWORD {
        out.extend_from_slice(&PAGE_BREAK.to_be_bytes());
        let mut end = open + len + 2;
        // The readable form puts a blank line after the page marker.
        for _ in 0..2 {
            match (chars.get(end), chars.get(end + 1)) {
                (Some('\r'), Some('\n')) => end += 2,
                (Some('\n'), _) => end += 1,
                _ => break,
            }
        }
        return Some(end - open);
    }

    let code = ControlCode::from_name(name)?;
    out.extend_from_slice(&code.opcode().to_be_bytes());
    if let Some(value) = argument.and_then(|a| a.trim().parse::<u16>().ok()) {
        out.extend_from_slice(&value.to_le_bytes());
    }
    Some(len + 2)
}
