use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};

use super::{
    id_to_string, DeleteOutcome, DocumentStore, InsertOutcome, StoreResult, UpdateOutcome,
};

/// Collections kept in process memory, in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map_or(0, Vec::len)
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: Document) -> StoreResult<Vec<Document>> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| matches(d, &filter)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: &str, filter: Document) -> StoreResult<Option<Document>> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matches(d, &filter)).cloned()))
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> StoreResult<InsertOutcome> {
        if !document.contains_key("_id") {
            document.insert("_id", ObjectId::new());
        }
        let inserted_id = document.get("_id").map(id_to_string).unwrap_or_default();

        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id,
        })
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        set: Document,
        upsert: bool,
    ) -> StoreResult<UpdateOutcome> {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some(existing) = docs.iter_mut().find(|d| matches(d, &filter)) {
            let mut modified = false;
            for (key, value) in set {
                if existing.get(&key) != Some(&value) {
                    existing.insert(key, value);
                    modified = true;
                }
            }
            return Ok(UpdateOutcome {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_id: None,
            });
        }

        if !upsert {
            return Ok(UpdateOutcome {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_id: None,
            });
        }

        let id = ObjectId::new();
        let mut document = filter;
        document.insert("_id", id);
        document.extend(set);
        docs.push(document);

        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(id_to_string(&Bson::ObjectId(id))),
        })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> StoreResult<DeleteOutcome> {
        let mut collections = self.collections.lock().unwrap();
        let deleted_count = match collections.get_mut(collection) {
            Some(docs) => match docs.iter().position(|d| matches(d, &filter)) {
                Some(index) => {
                    docs.remove(index);
                    1
                }
                None => 0,
            },
            None => 0,
        };

        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn upsert_inserts_then_updates_in_place() {
        let store = MemoryStore::new();

        let first = store
            .update_one("users", doc! { "email": "a@x.com" }, doc! { "name": "A" }, true)
            .await
            .unwrap();
        assert!(first.upserted_id.is_some());

        let second = store
            .update_one("users", doc! { "email": "a@x.com" }, doc! { "name": "B" }, true)
            .await
            .unwrap();
        assert_eq!(second.matched_count, 1);
        assert_eq!(second.modified_count, 1);
        assert_eq!(store.count("users"), 1);

        let user = store
            .find_one("users", doc! { "email": "a@x.com" })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.get_str("name").unwrap(), "B");
    }

    #[tokio::test]
    async fn delete_removes_only_the_first_match() {
        let store = MemoryStore::new();
        store.insert_one("orders", doc! { "customerEmail": "a@x.com" }).await.unwrap();
        store.insert_one("orders", doc! { "customerEmail": "a@x.com" }).await.unwrap();

        let outcome = store
            .delete_one("orders", doc! { "customerEmail": "a@x.com" })
            .await
            .unwrap();

        assert_eq!(outcome.deleted_count, 1);
        assert_eq!(store.count("orders"), 1);
    }
}
