//! GB2312 character repertoire for gbchat
//!
//! Everything gbchat shows or writes is limited to the characters that
//! GB2312-80 can represent: ASCII plus the assigned cells of the 94x94
//! EUC-CN grid. The byte tables come from `encoding_rs`' GBK codec, which
//! is a superset, so membership is decided here against the assigned
//! GB2312 cells and confirmed with a decode round trip.

use encoding_rs::GBK;
use thiserror::Error;

/// Character substituted for unrepresentable input by [`filter`].
pub const FILTER_REPLACEMENT: char = ' ';

/// Byte substituted for unrepresentable input by [`encode_lossy`].
pub const ENCODE_REPLACEMENT: u8 = b'?';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("malformed GB2312 byte sequence")]
    Malformed,

    #[error("character {ch:?} at position {position} is outside the GB2312 repertoire")]
    OutsideRepertoire { ch: char, position: usize },
}

/// Assigned non-hanzi cells, rows 1-9, as `(lead, first trail, last trail)`.
const SYMBOL_CELLS: &[(u8, u8, u8)] = &[
    (0xA1, 0xA1, 0xFE),
    (0xA2, 0xB1, 0xE2),
    (0xA2, 0xE5, 0xEE),
    (0xA2, 0xF1, 0xFC),
    (0xA3, 0xA1, 0xFE),
    (0xA4, 0xA1, 0xF3),
    (0xA5, 0xA1, 0xF6),
    (0xA6, 0xA1, 0xB8),
    (0xA6, 0xC1, 0xD8),
    (0xA7, 0xA1, 0xC1),
    (0xA7, 0xD1, 0xF1),
    (0xA8, 0xA1, 0xBA),
    (0xA8, 0xC5, 0xE9),
    (0xA9, 0xA4, 0xEF),
];

/// Cells where GB2312 and the GBK table disagree, as
/// `(GB2312 character, GBK character, cell)`. Only the GB2312 side is kept.
const CELL_OVERRIDES: [(char, char, [u8; 2]); 2] = [
    ('\u{30FB}', '\u{00B7}', [0xA1, 0xA4]),
    ('\u{2015}', '\u{2014}', [0xA1, 0xAA]),
];

fn is_assigned_cell(lead: u8, trail: u8) -> bool {
    match lead {
        // Level-1 hanzi end at D7F9.
        0xB0..=0xD6 | 0xD8..=0xF7 => (0xA1..=0xFE).contains(&trail),
        0xD7 => (0xA1..=0xF9).contains(&trail),
        _ => SYMBOL_CELLS
            .iter()
            .any(|&(row, first, last)| row == lead && (first..=last).contains(&trail)),
    }
}

fn is_private_use(ch: char) -> bool {
    ('\u{E000}'..='\u{F8FF}').contains(&ch)
}

/// EUC-CN bytes for a non-ASCII character, if it is a GB2312 character.
fn gb2312_pair(ch: char) -> Option<[u8; 2]> {
    if ch.is_ascii() || is_private_use(ch) {
        return None;
    }
    for &(gb2312, gbk, cell) in &CELL_OVERRIDES {
        if ch == gb2312 {
            return Some(cell);
        }
        if ch == gbk {
            return None;
        }
    }

    let mut buf = [0u8; 4];
    let text: &str = ch.encode_utf8(&mut buf);
    let (bytes, _, had_unmappable) = GBK.encode(text);
    if had_unmappable {
        return None;
    }

    let pair = match *bytes {
        [lead, trail] if is_assigned_cell(lead, trail) => [lead, trail],
        _ => return None,
    };

    // Only keep characters whose mapping survives the trip back.
    match GBK.decode_without_bom_handling_and_without_replacement(&pair) {
        Some(decoded) if decoded == text => Some(pair),
        _ => None,
    }
}

/// Whether `ch` belongs to the GB2312 repertoire.
pub fn is_representable(ch: char) -> bool {
    ch.is_ascii() || gb2312_pair(ch).is_some()
}

/// Replace every character outside the repertoire with a space.
///
/// Total over all input; the output has exactly as many characters as the
/// input, in the same order.
pub fn filter(text: &str) -> String {
    text.chars()
        .map(|ch| if is_representable(ch) { ch } else { FILTER_REPLACEMENT })
        .collect()
}

/// Encode to GB2312 bytes, writing `?` for each unrepresentable character.
pub fn encode_lossy(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii() {
            out.push(ch as u8);
        } else if let Some(pair) = gb2312_pair(ch) {
            out.extend_from_slice(&pair);
        } else {
            out.push(ENCODE_REPLACEMENT);
        }
    }
    out
}

/// Strictly decode GB2312 bytes.
pub fn decode(bytes: &[u8]) -> Result<String, EncodingError> {
    let decoded = GBK
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or(EncodingError::Malformed)?;

    // GBK accepts more than GB2312; reject anything outside the repertoire.
    let mut text = String::with_capacity(decoded.len());
    for (position, ch) in decoded.chars().enumerate() {
        match CELL_OVERRIDES.iter().find(|&&(gb2312, gbk, _)| ch == gbk || ch == gb2312) {
            Some(&(gb2312, gbk, _)) if ch == gbk => text.push(gb2312),
            None if is_representable(ch) => text.push(ch),
            _ => return Err(EncodingError::OutsideRepertoire { ch, position }),
        }
    }
    Ok(text)
}
