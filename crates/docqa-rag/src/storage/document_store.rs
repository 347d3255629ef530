//! Process-wide registry of indexed documents

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::types::IndexedDocument;

/// Maps document identifiers to fully indexed documents.
///
/// Documents are only ever inserted whole, so a reader either sees every
/// chunk and vector of a document or does not see it at all.
pub trait DocumentStore: Send + Sync {
    /// Insert a document, replacing any previous entry with the same id
    fn put(&self, document: Arc<IndexedDocument>);

    /// Look up a document
    fn get(&self, id: &Uuid) -> Option<Arc<IndexedDocument>>;

    /// Check if a document exists
    fn exists(&self, id: &Uuid) -> bool {
        self.get(id).is_some()
    }

    /// Number of stored documents
    fn len(&self) -> usize;

    /// Whether the store is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory store; contents are lost on restart
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: DashMap<Uuid, Arc<IndexedDocument>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn put(&self, document: Arc<IndexedDocument>) {
        self.documents.insert(document.id, document);
    }

    fn get(&self, id: &Uuid) -> Option<Arc<IndexedDocument>> {
        self.documents.get(id).map(|entry| Arc::clone(entry.value()))
    }

    fn exists(&self, id: &Uuid) -> bool {
        self.documents.contains_key(id)
    }

    fn len(&self) -> usize {
        self.documents.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(text: &str) -> Arc<IndexedDocument> {
        Arc::new(
            IndexedDocument::new(
                Uuid::new_v4(),
                "doc.txt",
                text.to_string(),
                vec![text.to_string()],
                vec![vec![1.0, 0.0]],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_put_and_get() {
        let store = InMemoryDocumentStore::new();
        assert!(store.is_empty());

        let doc = document("hello world");
        let id = doc.id;
        store.put(doc);

        assert!(store.exists(&id));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().chunks(), ["hello world"]);
    }

    #[test]
    fn test_unknown_id() {
        let store = InMemoryDocumentStore::new();
        store.put(document("something"));

        let missing = Uuid::new_v4();
        assert!(!store.exists(&missing));
        assert!(store.get(&missing).is_none());
    }

    #[test]
    fn test_concurrent_writers_and_readers() {
        let store = Arc::new(InMemoryDocumentStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let doc = document(&format!("document number {i}"));
                    let id = doc.id;
                    store.put(doc);
                    let read = store.get(&id).unwrap();
                    assert_eq!(read.chunk_count(), read.vectors().len());
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 8);
    }
}
