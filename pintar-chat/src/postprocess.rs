//! Reply cleanup applied between generation and display.

use pintar_core::Style;

/// Emoji stripped from formal replies.
const CASUAL_EMOJI: [&str; 3] = ["😀", "😊", "😅"];

/// Clean up a raw model reply according to the active style.
///
/// Every reply is trimmed. Formal replies additionally lose casual
/// emoji and get their first letter capitalized.
pub fn postprocess_reply(raw: &str, style: Style) -> String {
    let mut text = raw.trim().to_string();

    if style == Style::Formal {
        for emoji in CASUAL_EMOJI {
            if text.contains(emoji) {
                text = text.replace(emoji, "");
            }
        }
        text = text.trim().to_string();

        let mut chars = text.chars();
        if let Some(first) = chars.next() {
            if first.is_lowercase() {
                text = first.to_uppercase().chain(chars).collect();
            }
        }
    }

    text
}
