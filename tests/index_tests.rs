//! Index lifecycle: build, open, search, and persistence round trips.

mod common;

use std::sync::Arc;

use medrag::{EmbeddingIndex, InMemoryVectorStore, JsonFileVectorStore, RagError};

use common::{HashEmbedder, raw_chunk};

fn sample_chunks() -> Vec<medrag::Chunk> {
    vec![
        raw_chunk("diabetes.txt", 0, "Type 2 diabetes affects how the body processes glucose."),
        raw_chunk("diabetes.txt", 1, "Insulin resistance develops gradually over many years."),
        raw_chunk("asthma.txt", 0, "Asthma inflames and narrows the airways in the lungs."),
        raw_chunk("flu.txt", 0, "Influenza spreads through respiratory droplets in winter."),
        raw_chunk("flu.txt", 1, "Annual vaccination reduces the severity of influenza."),
    ]
}

fn memory_index(collection: &str) -> EmbeddingIndex {
    EmbeddingIndex::new(
        Arc::new(HashEmbedder::new(64)),
        Arc::new(InMemoryVectorStore::new()),
        collection,
    )
}

#[tokio::test]
async fn building_from_no_chunks_is_an_error() {
    let index = memory_index("docs");
    let err = index.build(&[]).await.unwrap_err();
    assert!(matches!(err, RagError::EmptyInput));
}

#[tokio::test]
async fn searching_before_build_or_open_fails_fast() {
    let index = memory_index("docs");
    let err = index.search("anything", 3).await.unwrap_err();
    assert!(matches!(err, RagError::NotInitialized));
}

#[tokio::test]
async fn searching_with_zero_k_is_rejected() {
    let index = memory_index("docs");
    index.build(&sample_chunks()).await.unwrap();
    let err = index.search("influenza", 0).await.unwrap_err();
    assert!(matches!(err, RagError::Config(_)));
}

#[tokio::test]
async fn search_returns_at_most_k_and_at_least_min_of_k_and_total() {
    let index = memory_index("docs");
    index.build(&sample_chunks()).await.unwrap();

    let results = index.search("influenza vaccination", 2).await.unwrap();
    assert_eq!(results.len(), 2);

    let results = index.search("influenza vaccination", 50).await.unwrap();
    assert_eq!(results.len(), 5);
}

#[tokio::test]
async fn self_match_ranks_first_and_scores_descend() {
    let chunks = sample_chunks();
    let target_text = chunks[2].text.clone();

    let index = memory_index("docs");
    index.build(&chunks).await.unwrap();

    let results = index.search(&target_text, 5).await.unwrap();
    assert_eq!(results[0].chunk.text, target_text);
    assert!((results[0].score - 1.0).abs() < 1e-5, "self-match score {}", results[0].score);
    for window in results.windows(2) {
        assert!(window[0].score >= window[1].score, "scores not descending");
    }
}

#[tokio::test]
async fn open_missing_collection_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let index = EmbeddingIndex::new(
        Arc::new(HashEmbedder::new(64)),
        Arc::new(JsonFileVectorStore::new(dir.path())),
        "never_built",
    );
    let err = index.open().await.unwrap_err();
    assert!(matches!(err, RagError::CollectionNotFound(name) if name == "never_built"));
}

#[tokio::test]
async fn opened_index_searches_identically_to_the_built_one() {
    let dir = tempfile::tempdir().unwrap();
    let chunks = sample_chunks();
    let query = "how does diabetes develop";

    let built = EmbeddingIndex::new(
        Arc::new(HashEmbedder::new(64)),
        Arc::new(JsonFileVectorStore::new(dir.path())),
        "docs",
    );
    built.build(&chunks).await.unwrap();
    let direct = built.search(query, 3).await.unwrap();

    // Fresh store and index over the same directory: open, no re-embedding.
    let reopened = EmbeddingIndex::new(
        Arc::new(HashEmbedder::new(64)),
        Arc::new(JsonFileVectorStore::new(dir.path())),
        "docs",
    );
    reopened.open().await.unwrap();
    let persisted = reopened.search(query, 3).await.unwrap();

    assert_eq!(direct.len(), persisted.len());
    for (a, b) in direct.iter().zip(&persisted) {
        assert_eq!(a.chunk.id, b.chunk.id);
        assert_eq!(a.chunk.text, b.chunk.text);
        assert!((a.score - b.score).abs() < 1e-6);
    }
}

#[tokio::test]
async fn opening_with_a_different_embedding_model_is_rejected() {
    let dir = tempfile::tempdir().unwrap();

    let built = EmbeddingIndex::new(
        Arc::new(HashEmbedder::with_model(64, "model-a")),
        Arc::new(JsonFileVectorStore::new(dir.path())),
        "docs",
    );
    built.build(&sample_chunks()).await.unwrap();

    let mismatched = EmbeddingIndex::new(
        Arc::new(HashEmbedder::with_model(64, "model-b")),
        Arc::new(JsonFileVectorStore::new(dir.path())),
        "docs",
    );
    let err = mismatched.open().await.unwrap_err();
    assert!(
        matches!(err, RagError::ModelMismatch { ref stored, ref configured }
            if stored == "model-a" && configured == "model-b"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn rebuild_replaces_the_collection_instead_of_merging() {
    let index = memory_index("docs");
    index.build(&sample_chunks()).await.unwrap();

    let replacement = vec![raw_chunk("new.txt", 0, "Entirely new corpus content.")];
    index.build(&replacement).await.unwrap();

    let results = index.search("anything at all", 10).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].chunk.document_id, "new.txt");
}
