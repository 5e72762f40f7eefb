//! Vector store behavior: search ordering, tie-breaks, durability.

mod common;

use medrag::{InMemoryVectorStore, JsonFileVectorStore, RagError, VectorStore};
use proptest::prelude::*;

use common::embedded_chunk;

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any stored embeddings and any query, search results come back in
    /// descending similarity order, capped at `top_k`.
    #[test]
    fn search_is_ordered_descending_and_bounded_by_top_k(
        embeddings in proptest::collection::vec(arb_normalized_embedding(16), 1..20),
        query in arb_normalized_embedding(16),
        top_k in 1usize..25,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let (results, total) = rt.block_on(async {
            let store = InMemoryVectorStore::new();
            let chunks: Vec<_> = embeddings
                .iter()
                .enumerate()
                .map(|(i, e)| embedded_chunk(&format!("c{i}"), &format!("text {i}"), e.clone()))
                .collect();
            store.replace_collection("test", "fake", &chunks).await.unwrap();
            (store.search("test", &query, top_k).await.unwrap(), chunks.len())
        });

        prop_assert!(results.len() <= top_k);
        prop_assert_eq!(results.len(), top_k.min(total));

        for window in results.windows(2) {
            prop_assert!(
                window[0].score >= window[1].score,
                "results not in descending order: {} < {}",
                window[0].score,
                window[1].score,
            );
        }
    }
}

#[tokio::test]
async fn equal_scores_keep_insertion_order() {
    let store = InMemoryVectorStore::new();
    // Three chunks with the same embedding: scores tie, insertion order wins.
    let shared = vec![0.6f32, 0.8, 0.0];
    let chunks = vec![
        embedded_chunk("first", "a", shared.clone()),
        embedded_chunk("second", "b", shared.clone()),
        embedded_chunk("third", "c", shared.clone()),
    ];
    store.replace_collection("ties", "fake", &chunks).await.unwrap();

    let results = store.search("ties", &[0.6, 0.8, 0.0], 3).await.unwrap();
    let ids: Vec<&str> = results.iter().map(|r| r.chunk.id.as_str()).collect();
    assert_eq!(ids, ["first", "second", "third"]);
}

#[tokio::test]
async fn searching_a_missing_collection_is_an_error() {
    let store = InMemoryVectorStore::new();
    let err = store.search("absent", &[1.0, 0.0], 3).await.unwrap_err();
    assert!(matches!(err, RagError::CollectionNotFound(name) if name == "absent"));
}

#[tokio::test]
async fn json_store_survives_a_process_restart() {
    let dir = tempfile::tempdir().unwrap();
    let chunks = vec![
        embedded_chunk("a", "heart disease risk factors", vec![1.0, 0.0, 0.0]),
        embedded_chunk("b", "stroke warning signs", vec![0.0, 1.0, 0.0]),
    ];

    {
        let store = JsonFileVectorStore::new(dir.path());
        store.replace_collection("docs", "model-x", &chunks).await.unwrap();
        assert!(store.collection_exists("docs").await);
    }

    // A fresh store over the same directory sees the persisted data.
    let store = JsonFileVectorStore::new(dir.path());
    assert!(store.collection_exists("docs").await);
    store.open_collection("docs", "model-x").await.unwrap();

    let results = store.search("docs", &[0.9, 0.1, 0.0], 1).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].chunk.id, "a");
    assert_eq!(results[0].chunk.embedding, vec![1.0, 0.0, 0.0]);
}

#[tokio::test]
async fn json_store_replace_is_a_full_rebuild() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileVectorStore::new(dir.path());

    let original = vec![embedded_chunk("old", "old content", vec![1.0, 0.0])];
    store.replace_collection("docs", "model-x", &original).await.unwrap();

    let replacement = vec![embedded_chunk("new", "new content", vec![0.0, 1.0])];
    store.replace_collection("docs", "model-x", &replacement).await.unwrap();

    let results = store.search("docs", &[1.0, 1.0], 10).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].chunk.id, "new");
}
