//! Top-K chunk retrieval

use std::cmp::Ordering;

/// Number of chunks retrieved when not configured otherwise
pub const DEFAULT_TOP_K: usize = 3;

/// Score reported for pairs whose cosine similarity is undefined. Such chunks
/// rank after every chunk with a defined similarity.
pub const MIN_SCORE: f32 = -1.0;

/// Retrieved chunk with its similarity score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    /// Position of the chunk in the document
    pub index: usize,
    /// Chunk text
    pub text: String,
    /// Cosine similarity to the question (higher is more relevant)
    pub score: f32,
}

/// Cosine similarity between two vectors.
///
/// Returns `None` when either vector has zero norm, the lengths differ, or the
/// result is not a finite number. Rounding error is clamped to `[-1, 1]`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }

    let similarity = dot / (norm_a * norm_b);
    similarity
        .is_finite()
        .then(|| similarity.clamp(-1.0, 1.0))
}

/// Rank `chunks` by cosine similarity of their vectors to `question_vector`.
///
/// Returns at most `min(k, chunks.len())` entries in non-increasing score
/// order; equal scores keep the lower chunk index first, and chunks with an
/// undefined similarity come last. `chunk_vectors` and
/// `chunks` are index-aligned; extra entries in either are ignored.
pub fn retrieve(
    question_vector: &[f32],
    chunk_vectors: &[Vec<f32>],
    chunks: &[String],
    k: usize,
) -> Vec<ScoredChunk> {
    let mut scored: Vec<(usize, Option<f32>)> = chunk_vectors
        .iter()
        .zip(chunks.iter())
        .enumerate()
        .map(|(i, (vector, _))| (i, cosine_similarity(vector, question_vector)))
        .collect();

    scored.sort_by(|a, b| {
        let by_score = match (a.1, b.1) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_score.then_with(|| a.0.cmp(&b.0))
    });
    scored.truncate(k);

    tracing::debug!(
        "Retrieved {} of {} chunks, scores: {:?}",
        scored.len(),
        chunks.len(),
        scored.iter().map(|(_, s)| s.unwrap_or(MIN_SCORE)).collect::<Vec<_>>()
    );

    scored
        .into_iter()
        .map(|(index, score)| ScoredChunk {
            index,
            text: chunks[index].clone(),
            score: score.unwrap_or(MIN_SCORE),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn texts(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("chunk {}", i)).collect()
    }

    #[test]
    fn test_cosine_basics() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]).unwrap() - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap().abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap() + 1.0).abs() < 1e-6);
        // Scale invariant
        assert!((cosine_similarity(&[2.0, 2.0], &[1.0, 1.0]).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_degenerate() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), None);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]), None);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), None);
        assert_eq!(cosine_similarity(&[], &[]), None);
    }

    #[test]
    fn test_ties_prefer_lower_index() {
        // q = (1, 0); chunks 2 and 4 both score 0.8, chunk 0 scores 0.9.
        let q = vec![1.0, 0.0];
        let vectors = vec![
            vec![0.9, 0.435_889_9],
            vec![0.1, 0.994_987_4],
            vec![0.8, 0.6],
            vec![0.3, 0.953_939_2],
            vec![0.8, 0.6],
        ];
        let result = retrieve(&q, &vectors, &texts(5), 3);

        let order: Vec<usize> = result.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![0, 2, 4]);
        assert!((result[1].score - 0.8).abs() < 1e-5);
        assert_eq!(result[1].score, result[2].score);
        assert_eq!(result[1].text, "chunk 2");
    }

    #[test]
    fn test_fewer_chunks_than_k() {
        let q = vec![1.0, 1.0];
        let vectors = vec![vec![1.0, 0.0], vec![1.0, 1.0]];
        let result = retrieve(&q, &vectors, &texts(2), 3);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].index, 1);
        assert_eq!(result[1].index, 0);
    }

    #[test]
    fn test_zero_norm_is_never_preferred() {
        let q = vec![1.0, 0.0];
        let vectors = vec![vec![0.0, 0.0], vec![-0.5, 0.5], vec![0.5, 0.5]];
        let result = retrieve(&q, &vectors, &texts(3), 2);

        let order: Vec<usize> = result.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![2, 1]);
    }

    #[test]
    fn test_zero_norm_ranks_below_opposite_vector() {
        let q = vec![1.0, 0.0];
        let vectors = vec![vec![0.0, 0.0], vec![-1.0, 0.0]];
        let result = retrieve(&q, &vectors, &texts(2), 1);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].index, 1);
        assert!((result[0].score + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rounding_never_escapes_unit_range() {
        for a in 1..60 {
            for b in 1..60 {
                let q = [a as f32 * 0.013, b as f32 * 0.071, 0.3];
                let opposite: Vec<f32> = q.iter().map(|v| -v).collect();
                let s = cosine_similarity(&q, &opposite).unwrap();
                assert!((-1.0..=1.0).contains(&s), "{s} out of range");

                let result = retrieve(&q, &[vec![0.0; 3], opposite], &texts(2), 1);
                assert_eq!(result[0].index, 1);
            }
        }
    }

    #[test]
    fn test_zero_norm_question_scores_minimum() {
        let q = vec![0.0, 0.0];
        let vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let result = retrieve(&q, &vectors, &texts(2), 3);

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|r| r.score == MIN_SCORE));
        assert_eq!(result[0].index, 0);
    }

    #[test]
    fn test_empty_document() {
        assert!(retrieve(&[1.0], &[], &[], 3).is_empty());
    }

    #[test]
    fn test_k_zero() {
        let vectors = vec![vec![1.0]];
        assert!(retrieve(&[1.0], &vectors, &texts(1), 0).is_empty());
    }

    fn vectors_strategy() -> impl Strategy<Value = (Vec<f32>, Vec<Vec<f32>>)> {
        (1usize..6).prop_flat_map(|dim| {
            (
                prop::collection::vec(-4i8..4, dim),
                prop::collection::vec(prop::collection::vec(-4i8..4, dim), 0..12),
            )
                .prop_map(|(q, vs)| {
                    let to_f = |v: Vec<i8>| v.into_iter().map(f32::from).collect::<Vec<f32>>();
                    (to_f(q), vs.into_iter().map(to_f).collect())
                })
        })
    }

    proptest! {
        #[test]
        fn prop_bounded_and_sorted((q, vectors) in vectors_strategy(), k in 0usize..8) {
            let chunks = texts(vectors.len());
            let result = retrieve(&q, &vectors, &chunks, k);

            prop_assert!(result.len() <= k.min(chunks.len()));
            prop_assert_eq!(result.len(), k.min(chunks.len()));
            let defined = |i: usize| cosine_similarity(&vectors[i], &q).is_some();
            for pair in result.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(defined(a.index) || !defined(b.index));
                if defined(a.index) == defined(b.index) {
                    prop_assert!(a.score >= b.score);
                    if a.score == b.score {
                        prop_assert!(a.index < b.index);
                    }
                }
            }
        }

        #[test]
        fn prop_deterministic((q, vectors) in vectors_strategy(), k in 0usize..8) {
            let chunks = texts(vectors.len());
            let first = retrieve(&q, &vectors, &chunks, k);
            let second = retrieve(&q, &vectors, &chunks, k);
            prop_assert_eq!(first, second);
        }
    }
}
