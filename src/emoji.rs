//! Emoji-only content classification.
//!
//! Posts may contain nothing but emoji. The check walks grapheme clusters so
//! multi-scalar sequences (flags, skin tones, ZWJ families, keycaps) count as
//! a single emoji rather than a run of loose code points.

use unicode_segmentation::UnicodeSegmentation;

/// True when `text` is non-empty and every grapheme cluster is an emoji.
pub fn is_emoji_only(text: &str) -> bool {
    !text.is_empty() && text.graphemes(true).all(is_emoji_grapheme)
}

fn is_emoji_grapheme(grapheme: &str) -> bool {
    // Keycap sequences: [0-9#*] + optional FE0F + U+20E3.
    if grapheme.contains('\u{20E3}') {
        return grapheme
            .chars()
            .all(|c| matches!(c, '0'..='9' | '#' | '*' | '\u{FE0F}' | '\u{20E3}'));
    }

    let mut has_base = false;
    for c in grapheme.chars() {
        match c {
            // Zero-width joiner and presentation selectors.
            '\u{200D}' | '\u{FE0E}' | '\u{FE0F}' => {}
            // Skin tone modifiers.
            '\u{1F3FB}'..='\u{1F3FF}' => {}
            // Tag characters (subdivision flags).
            '\u{E0020}'..='\u{E007F}' => {}
            c if is_emoji_scalar(c) => has_base = true,
            _ => return false,
        }
    }
    has_base
}

fn is_emoji_scalar(c: char) -> bool {
    matches!(c as u32,
        0x00A9 | 0x00AE                 // copyright, registered
        | 0x203C | 0x2049               // !!, !?
        | 0x2122 | 0x2139               // trade mark, information
        | 0x2194..=0x21AA               // arrows
        | 0x231A..=0x231B               // watch, hourglass
        | 0x2328 | 0x23CF               // keyboard, eject
        | 0x23E9..=0x23FA               // av controls
        | 0x24C2                        // circled M
        | 0x25AA..=0x25FE               // geometric shapes
        | 0x2600..=0x27BF               // misc symbols, dingbats
        | 0x2934..=0x2935               // curved arrows
        | 0x2B00..=0x2BFF               // misc symbols and arrows
        | 0x3030 | 0x303D               // wavy dash, part alternation
        | 0x3297 | 0x3299               // circled ideographs
        | 0x1F000..=0x1F0FF             // mahjong, dominoes, cards
        | 0x1F100..=0x1F1FF             // enclosed alphanumerics, regional indicators
        | 0x1F200..=0x1F2FF             // enclosed ideographic supplement
        | 0x1F300..=0x1F5FF             // misc symbols and pictographs
        | 0x1F600..=0x1F64F             // emoticons
        | 0x1F650..=0x1F67F             // ornamental dingbats
        | 0x1F680..=0x1F6FF             // transport and map
        | 0x1F700..=0x1F77F             // alchemical
        | 0x1F780..=0x1F7FF             // geometric shapes extended
        | 0x1F800..=0x1F8FF             // supplemental arrows-C
        | 0x1F900..=0x1F9FF             // supplemental symbols and pictographs
        | 0x1FA00..=0x1FAFF             // symbols and pictographs extended-A
        | 0x1FB00..=0x1FBFF             // symbols for legacy computing
    )
}
