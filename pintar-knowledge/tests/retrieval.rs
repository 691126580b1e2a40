use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use pintar_knowledge::{
    Embedder, KnowledgeBase, KnowledgeResult, KnowledgeSettings, MissingSourcePolicy,
};

/// Bag-of-words embedder over a fixed vocabulary. Similarity reduces to
/// token overlap, which makes rankings easy to verify by hand.
struct VocabEmbedder {
    vocab: Vec<&'static str>,
}

impl VocabEmbedder {
    fn new(vocab: &[&'static str]) -> Self {
        Self {
            vocab: vocab.to_vec(),
        }
    }

    fn encode(&self, text: &str) -> Vec<f32> {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();
        self.vocab
            .iter()
            .map(|word| tokens.iter().filter(|t| *t == word).count() as f32)
            .collect()
    }
}

#[async_trait]
impl Embedder for VocabEmbedder {
    fn dimension(&self) -> usize {
        self.vocab.len()
    }

    async fn embed_batch(&self, inputs: &[String]) -> KnowledgeResult<Vec<Vec<f32>>> {
        Ok(inputs.iter().map(|text| self.encode(text)).collect())
    }
}

fn settings_for(dir: &TempDir, policy: MissingSourcePolicy) -> KnowledgeSettings {
    let mut settings = KnowledgeSettings::default();
    settings.data_dir = dir.path().to_path_buf();
    settings.missing_source = policy;
    settings
}

#[tokio::test]
async fn test_end_to_end_retrieval() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join("edukasi.txt"),
        "Paris adalah ibu kota Prancis.\n\
         Menara Eiffel berdiri di Paris.\n\
         Pisang kaya akan kalium.\n",
    )
    .unwrap();

    let embedder = Arc::new(VocabEmbedder::new(&[
        "paris", "eiffel", "menara", "kota", "prancis", "pisang", "kalium",
    ]));
    let settings = settings_for(&dir, MissingSourcePolicy::Aggregate);

    let kb = KnowledgeBase::build("edukasi", &settings, embedder)
        .await
        .expect("build knowledge base");

    assert_eq!(kb.corpus().len(), 3);
    assert!(!kb.is_empty());

    let results = kb
        .search("Di kota mana Menara Eiffel berada?", 3)
        .await
        .expect("search");

    // Both Paris chunks must outrank the banana chunk
    assert_eq!(results[0], "Menara Eiffel berdiri di Paris.");
    assert_eq!(results[1], "Paris adalah ibu kota Prancis.");
    assert_eq!(results[2], "Pisang kaya akan kalium.");
}

#[tokio::test]
async fn test_missing_domain_aggregates_all_files() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("edukasi.txt"), "materi belajar\n").unwrap();
    std::fs::write(dir.path().join("travel.txt"), "tips liburan\n").unwrap();

    let embedder = Arc::new(VocabEmbedder::new(&["materi", "liburan"]));
    let settings = settings_for(&dir, MissingSourcePolicy::Aggregate);

    // gizi.txt does not exist, so the whole directory is aggregated
    let kb = KnowledgeBase::build("gizi", &settings, embedder)
        .await
        .expect("build knowledge base");

    assert_eq!(
        kb.corpus(),
        &["materi belajar".to_string(), "tips liburan".to_string()]
    );

    let results = kb.search("rencana liburan", 1).await.expect("search");
    assert_eq!(results, vec!["tips liburan".to_string()]);
}

#[tokio::test]
async fn test_missing_domain_empty_policy() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("edukasi.txt"), "materi belajar\n").unwrap();

    let embedder = Arc::new(VocabEmbedder::new(&["materi"]));
    let settings = settings_for(&dir, MissingSourcePolicy::Empty);

    let kb = KnowledgeBase::build("gizi", &settings, embedder)
        .await
        .expect("build knowledge base");

    assert!(kb.is_empty());
    assert!(kb.search("materi", 3).await.expect("search").is_empty());
}

#[tokio::test]
async fn test_repeated_search_is_deterministic() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join("produktivitas.txt"),
        "Teknik pomodoro membagi kerja.\nIstirahat singkat menjaga fokus.\n",
    )
    .unwrap();

    let embedder = Arc::new(VocabEmbedder::new(&["pomodoro", "kerja", "fokus"]));
    let settings = settings_for(&dir, MissingSourcePolicy::Aggregate);

    let kb = KnowledgeBase::build("produktivitas", &settings, embedder)
        .await
        .expect("build knowledge base");

    let first = kb.search("teknik fokus kerja", 2).await.expect("search");
    let second = kb.search("teknik fokus kerja", 2).await.expect("search");
    assert_eq!(first, second);
}
