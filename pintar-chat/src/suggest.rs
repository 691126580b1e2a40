//! Follow-up suggestions shown under each reply.

/// Keywords that pull the summary suggestion forward in the edukasi domain.
const SUMMARY_KEYWORDS: [&str; 3] = ["materi", "belajar", "ringkas"];

const MAX_SUGGESTIONS: usize = 3;

/// Suggest follow-up actions based on the user's last message and the
/// active domain. Unknown domains fall back to the productivity set.
pub fn suggest_next_actions(user_text: &str, domain: &str) -> Vec<String> {
    let text = user_text.to_lowercase();
    let mut ideas: Vec<String> = Vec::new();

    match domain.to_lowercase().as_str() {
        "edukasi" => {
            if SUMMARY_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
                ideas.push("Minta rangkuman poin-poin kunci dari topik tertentu.".to_string());
            }
            ideas.push("Minta contoh soal dan pembahasannya.".to_string());
            ideas.push("Minta rencana belajar mingguan.".to_string());
        }
        "gizi" => {
            ideas.push("Minta estimasi kebutuhan kalori harian.".to_string());
            ideas.push("Minta contoh menu seimbang 1 hari.".to_string());
            ideas.push("Tanyakan alternatif pengganti bahan makanan tertentu.".to_string());
        }
        "travel" => {
            ideas.push("Minta itinerary singkat untuk 3 hari.".to_string());
            ideas.push("Tanyakan estimasi biaya perjalanan.".to_string());
            ideas.push("Minta tips transportasi lokal.".to_string());
        }
        _ => {
            ideas.push("Minta to-do list prioritas harian.".to_string());
            ideas.push("Minta template pomodoro untuk 2 jam kerja.".to_string());
            ideas.push("Minta ringkasan notulen rapat.".to_string());
        }
    }

    ideas.truncate(MAX_SUGGESTIONS);
    ideas
}
