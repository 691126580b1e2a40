//! Prompt composition for the generation backend.
//!
//! The prompt is a single flat text with labelled sections: persona,
//! retrieved context, recent history, and the task instruction. Keeping
//! everything in one user turn works across hosted models that differ
//! in how they treat system and multi-turn inputs.

use pintar_core::{ChatMessage, Style};

/// Placeholder used when retrieval produced no snippets.
const NO_CONTEXT_PLACEHOLDER: &str = "(tidak ada konteks khusus)";

/// Compose the prompt for one turn.
///
/// `messages` must already end with the user message being answered;
/// the task section points the model back at it. `history_window` is
/// the number of recent user/assistant pairs to include, with zero
/// meaning no limit.
pub fn compose_prompt(
    messages: &[ChatMessage],
    domain: &str,
    style: Style,
    snippets: &[String],
    history_window: usize,
) -> String {
    let style_word = style.as_str();

    let mut system = format!("Anda adalah asisten AI berbahasa Indonesia dengan gaya {style_word}. ");
    if !domain.is_empty() {
        system.push_str(&format!("Fokus domain: {domain}. "));
    }
    system.push_str("Gunakan konteks jika relevan, dan jawab ringkas, jelas, dan akurat.");

    let context = if snippets.is_empty() {
        NO_CONTEXT_PLACEHOLDER.to_string()
    } else {
        snippets
            .iter()
            .map(|snippet| format!("- {snippet}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let window = history_window * 2;
    let recent = if history_window > 0 && messages.len() > window {
        &messages[messages.len() - window..]
    } else {
        messages
    };
    let history_text = recent
        .iter()
        .map(|message| format!("{}: {}", message.role, message.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "[SYSTEM]\n{system}\n\n[KONTEXT]\n{context}\n\n[RIWAYAT]\n{history_text}\n\n[TUGAS]\nBalas pesan pengguna terakhir secara {style_word}. Jika pertanyaan di luar domain, jawab secara umum namun tetap bermanfaat."
    )
}
