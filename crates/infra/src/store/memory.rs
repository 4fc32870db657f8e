//! In-process document store
//!
//! Collections keep documents in insertion order. Listeners are notified
//! synchronously after every committed write, once all internal locks are
//! released, so a listener may call back into the store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use studybuddy_core::store::{
    Document, DocumentPath, DocumentStore, Fields, ListenerRegistration, Query, SnapshotListener,
};
use studybuddy_domain::{Result, StudyBuddyError};
use tracing::{debug, warn};
use uuid::Uuid;

const OFFLINE_MESSAGE: &str = "Failed to get document because the client is offline.";

struct ListenerEntry {
    id: u64,
    collection: String,
    query: Query,
    listener: SnapshotListener,
}

type ListenerTable = Arc<Mutex<Vec<ListenerEntry>>>;

/// Document store backed by process memory.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    listeners: ListenerTable,
    next_listener_id: AtomicU64,
    offline: AtomicBool,
}

impl InMemoryDocumentStore {
    /// Empty, online store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every read, write and new listener fails.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Release);
    }

    /// Whether operations currently fail.
    pub fn is_offline(&self) -> bool {
        self.offline.load(Ordering::Acquire)
    }

    /// Number of registered live queries.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Number of live queries on `collection`.
    pub fn listener_count_for(&self, collection: &str) -> usize {
        self.listeners.lock().iter().filter(|entry| entry.collection == collection).count()
    }

    /// Snapshot of a whole collection, in insertion order.
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections.read().get(collection).cloned().unwrap_or_default()
    }

    /// End every live query on `collection` with `error`, the way a revoked
    /// permission does.
    pub fn fail_listeners(&self, collection: &str, error: &StudyBuddyError) {
        let failed: Vec<SnapshotListener> = {
            let mut listeners = self.listeners.lock();
            let (failed, kept): (Vec<_>, Vec<_>) =
                listeners.drain(..).partition(|entry| entry.collection == collection);
            *listeners = kept;
            failed.into_iter().map(|entry| entry.listener).collect()
        };

        warn!(collection, listeners = failed.len(), error = %error, "ending live queries");
        for listener in failed {
            listener(Err(error.clone()));
        }
    }

    fn ensure_online(&self) -> Result<()> {
        if self.is_offline() {
            return Err(StudyBuddyError::Store(OFFLINE_MESSAGE.to_string()));
        }
        Ok(())
    }

    /// Deliver the current result set of every listener on `collection`.
    fn notify(&self, collection: &str) {
        let targets: Vec<(Query, SnapshotListener)> = self
            .listeners
            .lock()
            .iter()
            .filter(|entry| entry.collection == collection)
            .map(|entry| (entry.query.clone(), Arc::clone(&entry.listener)))
            .collect();
        if targets.is_empty() {
            return;
        }

        let documents = self.documents(collection);
        debug!(collection, listeners = targets.len(), "delivering snapshots");
        for (query, listener) in targets {
            listener(Ok(query.apply(documents.clone())));
        }
    }

    fn remover(&self, id: u64) -> impl FnOnce() + Send + Sync + 'static {
        let listeners = Arc::clone(&self.listeners);
        move || {
            listeners.lock().retain(|entry| entry.id != id);
            debug!(listener_id = id, "listener removed");
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>> {
        self.ensure_online()?;
        Ok(self
            .collections
            .read()
            .get(&path.collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == path.id).cloned()))
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>> {
        self.ensure_online()?;
        Ok(query.apply(self.documents(collection)))
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<String> {
        self.ensure_online()?;
        let id = Uuid::new_v4().simple().to_string();
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .push(Document::new(id.clone(), fields));

        debug!(collection, document_id = %id, "document added");
        self.notify(collection);
        Ok(id)
    }

    async fn set(&self, path: &DocumentPath, fields: Fields) -> Result<()> {
        self.ensure_online()?;
        {
            let mut collections = self.collections.write();
            let docs = collections.entry(path.collection.clone()).or_default();
            match docs.iter_mut().find(|doc| doc.id == path.id) {
                Some(existing) => existing.fields = fields,
                None => docs.push(Document::new(path.id.clone(), fields)),
            }
        }

        debug!(path = %path, "document set");
        self.notify(&path.collection);
        Ok(())
    }

    async fn update(&self, path: &DocumentPath, fields: Fields) -> Result<()> {
        self.ensure_online()?;
        {
            let mut collections = self.collections.write();
            let existing = collections
                .get_mut(&path.collection)
                .and_then(|docs| docs.iter_mut().find(|doc| doc.id == path.id))
                .ok_or_else(|| StudyBuddyError::Store(format!("No document to update: {path}")))?;
            existing.fields.extend(fields);
        }

        debug!(path = %path, "document updated");
        self.notify(&path.collection);
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> Result<()> {
        self.ensure_online()?;
        let removed = {
            let mut collections = self.collections.write();
            collections.get_mut(&path.collection).is_some_and(|docs| {
                let before = docs.len();
                docs.retain(|doc| doc.id != path.id);
                docs.len() != before
            })
        };

        if removed {
            debug!(path = %path, "document deleted");
            self.notify(&path.collection);
        }
        Ok(())
    }

    fn listen(&self, collection: &str, query: Query, listener: SnapshotListener) -> ListenerRegistration {
        if let Err(err) = self.ensure_online() {
            listener(Err(err));
            return ListenerRegistration::noop();
        }

        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push(ListenerEntry {
            id,
            collection: collection.to_string(),
            query: query.clone(),
            listener: Arc::clone(&listener),
        });
        debug!(collection, listener_id = id, "listener registered");

        listener(Ok(query.apply(self.documents(collection))));
        ListenerRegistration::new(self.remover(id))
    }
}

impl std::fmt::Debug for InMemoryDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDocumentStore")
            .field("collections", &self.collections.read().len())
            .field("listeners", &self.listener_count())
            .field("offline", &self.is_offline())
            .finish()
    }
}
