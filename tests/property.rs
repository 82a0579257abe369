//! Property-based tests using proptest.

mod common;

use common::txt;
use proptest::prelude::*;
use resume_ranker::{cosine_similarity, normalize, rank, Embedding, RankingPipeline};

// ============================================================================
// STRATEGIES
// ============================================================================

/// Free text mixing case, punctuation, digits, accents and odd whitespace.
fn raw_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "Rust", "PYTHON", "c++", "node.js", "Café", "résumé", "2019-2023", "\t", "\n",
            "  ", "\u{a0}", "—", "@", "SQL;", "über", "数据", "ML/AI", "",
        ]),
        0..20,
    )
    .prop_map(|parts| parts.join(" "))
}

fn embedding_strategy(dimension: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-10.0f32..10.0, dimension)
}

fn candidates_strategy() -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(embedding_strategy(8), 0..12)
}

// ============================================================================
// NORMALIZATION PROPERTIES
// ============================================================================

proptest! {
    /// Output only holds lowercase letters, digits and single inner spaces.
    #[test]
    fn prop_normalize_output_alphabet(text in raw_text_strategy()) {
        let normalized = normalize(&text);

        prop_assert!(normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '));
        prop_assert!(!normalized.contains("  "));
        prop_assert!(!normalized.starts_with(' '));
        prop_assert!(!normalized.ends_with(' '));
    }

    #[test]
    fn prop_normalize_idempotent(text in raw_text_strategy()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn prop_normalize_ignores_case(text in raw_text_strategy()) {
        prop_assert_eq!(normalize(&text.to_uppercase()), normalize(&text.to_lowercase()));
    }
}

// ============================================================================
// SCORING PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_cosine_is_symmetric_and_bounded(
        a in embedding_strategy(16),
        b in embedding_strategy(16),
    ) {
        let a = Embedding::new(a);
        let b = Embedding::new(b);
        let ab = cosine_similarity(&a, &b).unwrap();
        let ba = cosine_similarity(&b, &a).unwrap();

        prop_assert!((ab - ba).abs() < 1e-12);
        prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&ab));
    }

    #[test]
    fn prop_cosine_ignores_positive_scale(a in embedding_strategy(16), factor in 0.5f32..4.0) {
        prop_assume!(a.iter().any(|v| v.abs() > 1e-3));
        let scaled: Vec<f32> = a.iter().map(|v| v * factor).collect();

        let score = cosine_similarity(&Embedding::new(a), &Embedding::new(scaled)).unwrap();
        prop_assert!((score - 1.0).abs() < 1e-5);
    }
}

// ============================================================================
// RANKING PROPERTIES
// ============================================================================

proptest! {
    /// Every candidate appears exactly once, sorted by descending score.
    #[test]
    fn prop_ranking_is_a_sorted_permutation(
        vectors in candidates_strategy(),
        reference in embedding_strategy(8),
    ) {
        let count = vectors.len();
        let candidates = vectors
            .into_iter()
            .enumerate()
            .map(|(i, v)| (format!("resume_{}.txt", i), Embedding::new(v)));

        let ranking = rank(candidates, &Embedding::new(reference)).unwrap();

        prop_assert_eq!(ranking.len(), count);
        let scores: Vec<f64> = ranking.iter().map(|c| c.score).collect();
        prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]));

        let mut seen: Vec<usize> = ranking.iter().map(|c| c.upload_index).collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..count).collect::<Vec<_>>());
    }

    /// Identical documents keep their upload order among themselves.
    #[test]
    fn prop_ties_keep_upload_order(
        pattern in prop::collection::vec(0usize..3, 1..15),
        reference in embedding_strategy(8),
        palette in prop::collection::vec(embedding_strategy(8), 3),
    ) {
        let candidates = pattern
            .iter()
            .map(|&p| (format!("group_{}", p), Embedding::new(palette[p].clone())));

        let ranking = rank(candidates, &Embedding::new(reference)).unwrap();

        for window in ranking.entries().windows(2) {
            if window[0].score == window[1].score {
                prop_assert!(window[0].upload_index < window[1].upload_index);
            }
        }
    }

    #[test]
    fn prop_top_k_is_a_prefix(vectors in candidates_strategy(), k in 0usize..15) {
        let reference = Embedding::new(vec![1.0; 8]);
        let candidates = vectors
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), Embedding::new(v)));

        let ranking = rank(candidates, &reference).unwrap();
        let top = ranking.top(k);

        prop_assert_eq!(top.len(), k.min(ranking.len()));
        prop_assert_eq!(top, &ranking.entries()[..top.len()]);
    }

    /// Ranked plus skipped always accounts for every upload.
    #[test]
    fn prop_pipeline_accounts_for_every_upload(
        texts in prop::collection::vec(raw_text_strategy(), 1..8),
    ) {
        let files: Vec<_> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| txt(&format!("{}.txt", i), text))
            .collect();
        let pipeline = RankingPipeline::new(common::VocabularyEmbedder::new(256));

        match pipeline.run("rust python sql", &files) {
            Ok(outcome) => {
                prop_assert_eq!(outcome.ranking.len() + outcome.skipped.len(), files.len());
                prop_assert!(outcome.ranking.iter().all(|c| !normalize(&texts[c.upload_index]).is_empty()));
            }
            Err(e) => {
                prop_assert!(e.is_user_warning());
                prop_assert!(texts.iter().all(|t| normalize(t).is_empty()));
            }
        }
    }
}

#[test]
fn empty_candidate_list_ranks_to_nothing() {
    let ranking = rank(Vec::<(String, Embedding)>::new(), &Embedding::new(vec![1.0, 0.0])).unwrap();
    assert!(ranking.is_empty());
    assert!(ranking.best().is_none());
}
