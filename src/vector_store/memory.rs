//! In-memory vector store implementation.

use super::{cosine_similarity, Document, SearchResult, VectorStore};
use crate::error::{Result, TutorError};
use async_trait::async_trait;
use std::sync::RwLock;

/// In-memory vector store. Insertion order breaks score ties.
#[derive(Default)]
pub struct MemoryVectorStore {
    documents: RwLock<Vec<Document>>,
}

impl MemoryVectorStore {
    /// Create a new in-memory vector store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> TutorError {
    TutorError::VectorStore("lock poisoned".to_string())
}

fn insert(docs: &mut Vec<Document>, doc: &Document) {
    match docs.iter_mut().find(|d| d.id == doc.id) {
        Some(existing) => *existing = doc.clone(),
        None => docs.push(doc.clone()),
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn upsert(&self, doc: &Document) -> Result<()> {
        let mut docs = self.documents.write().map_err(poisoned)?;
        insert(&mut docs, doc);
        Ok(())
    }

    async fn upsert_batch(&self, docs: &[Document]) -> Result<usize> {
        let mut store = self.documents.write().map_err(poisoned)?;
        for doc in docs {
            insert(&mut store, doc);
        }
        Ok(docs.len())
    }

    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        self.search_with_threshold(query_embedding, limit, f32::MIN).await
    }

    async fn search_with_threshold(
        &self,
        query_embedding: &[f32],
        limit: usize,
        min_score: f32,
    ) -> Result<Vec<SearchResult>> {
        let docs = self.documents.read().map_err(poisoned)?;

        let mut results: Vec<SearchResult> = docs
            .iter()
            .map(|doc| SearchResult {
                score: cosine_similarity(query_embedding, &doc.embedding),
                document: doc.clone(),
            })
            .filter(|r| r.score >= min_score)
            .collect();

        // Stable sort keeps insertion order among equal scores
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(limit);

        Ok(results)
    }

    async fn document_count(&self) -> Result<usize> {
        let docs = self.documents.read().map_err(poisoned)?;
        Ok(docs.len())
    }

    async fn clear(&self) -> Result<()> {
        self.documents.write().map_err(poisoned)?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::ContentChunk;
    use crate::youtube::VideoId;

    fn doc(content: &str, order: usize, embedding: Vec<f32>) -> Document {
        let chunk = ContentChunk::new(content.to_string(), order, order as f64 * 30.0);
        Document::from_chunk(&VideoId::new("video1"), "Test Video", &chunk, embedding)
    }

    #[tokio::test]
    async fn test_memory_vector_store() {
        let store = MemoryVectorStore::new();

        let docs = vec![
            doc("Hello world", 0, vec![1.0, 0.0, 0.0]),
            doc("Goodbye world", 1, vec![0.0, 1.0, 0.0]),
            doc("Hello again", 2, vec![0.9, 0.1, 0.0]),
        ];
        assert_eq!(store.upsert_batch(&docs).await.unwrap(), 3);
        assert_eq!(store.document_count().await.unwrap(), 3);

        let results = store.search(&[1.0, 0.0, 0.0], 10).await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].document.content, "Hello world");
        assert_eq!(results[1].document.content, "Hello again");
        assert!(results[0].score > results[1].score);
        assert!(results[1].score > results[2].score);
    }

    #[tokio::test]
    async fn test_limit_and_threshold() {
        let store = MemoryVectorStore::new();
        store
            .upsert_batch(&[
                doc("a", 0, vec![1.0, 0.0]),
                doc("b", 1, vec![0.0, 1.0]),
                doc("c", 2, vec![-1.0, 0.0]),
            ])
            .await
            .unwrap();

        let top = store.search(&[1.0, 0.0], 1).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].document.content, "a");

        // Orthogonal scores 0.0 and is kept; opposite is dropped
        let filtered = store.search_with_threshold(&[1.0, 0.0], 10, 0.0).await.unwrap();
        assert_eq!(filtered.len(), 2);

        let none = store.search_with_threshold(&[1.0, 0.0], 10, 1.5).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_ties_keep_insertion_order() {
        let store = MemoryVectorStore::new();
        store
            .upsert_batch(&[doc("first", 0, vec![1.0]), doc("second", 1, vec![1.0])])
            .await
            .unwrap();

        let results = store.search(&[1.0], 2).await.unwrap();
        assert_eq!(results[0].document.content, "first");
        assert_eq!(results[1].document.content, "second");
    }

    #[test]
    fn test_upsert_replaces_and_clear() {
        let store = MemoryVectorStore::new();
        let mut d = doc("old", 0, vec![1.0]);
        tokio_test::block_on(async {
            store.upsert(&d).await.unwrap();
            d.content = "new".to_string();
            store.upsert(&d).await.unwrap();

            assert_eq!(store.document_count().await.unwrap(), 1);
            let results = store.search(&[1.0], 1).await.unwrap();
            assert_eq!(results[0].document.content, "new");

            store.clear().await.unwrap();
            assert_eq!(store.document_count().await.unwrap(), 0);
        });
    }
}
