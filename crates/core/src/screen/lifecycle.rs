//! Screen lifecycle: mounted flag and live listener ownership
//!
//! A [`ScreenScope`] is created mounted. Listener registrations taken while
//! the screen is visible are parked in the scope and released on
//! [`ScreenScope::dispose`] (or drop). Callbacks and code resuming after an
//! `.await` check the [`MountFlag`] so nothing is applied to a screen that is
//! gone.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use studybuddy_domain::Result;
use tracing::{debug, warn};

use crate::store::{Document, DocumentStore, ListenerRegistration, Query};

/// Shared view of a scope's mounted state, safe to move into callbacks.
#[derive(Debug, Clone)]
pub struct MountFlag(Arc<AtomicBool>);

impl MountFlag {
    /// Whether the owning screen is still mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Mounted flag plus the listener registrations of one screen
#[derive(Debug)]
pub struct ScreenScope {
    name: &'static str,
    mounted: Arc<AtomicBool>,
    registrations: Mutex<Vec<ListenerRegistration>>,
}

impl ScreenScope {
    /// Mounted scope for the screen called `name`.
    pub fn new(name: &'static str) -> Self {
        Self { name, mounted: Arc::new(AtomicBool::new(true)), registrations: Mutex::new(Vec::new()) }
    }

    /// Screen name used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the screen is still mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Mounted flag to move into callbacks.
    pub fn flag(&self) -> MountFlag {
        MountFlag(Arc::clone(&self.mounted))
    }

    /// Keep `registration` alive until dispose. A registration handed to an
    /// already disposed scope is released immediately.
    pub fn hold(&self, registration: ListenerRegistration) {
        if self.is_mounted() {
            self.registrations.lock().push(registration);
        } else {
            registration.remove();
        }
    }

    /// Registrations still held.
    pub fn active_listeners(&self) -> usize {
        self.registrations.lock().len()
    }

    /// Register a typed live query owned by this scope.
    ///
    /// Documents that fail to decode are skipped with a warning. Deliveries
    /// after dispose are dropped.
    pub fn watch<T, F>(&self, store: &dyn DocumentStore, collection: &str, query: Query, on_snapshot: F)
    where
        T: DeserializeOwned + 'static,
        F: Fn(Result<Vec<T>>) + Send + Sync + 'static,
    {
        let flag = self.flag();
        let screen = self.name;
        let source = collection.to_string();
        let registration = store.listen(
            collection,
            query,
            Arc::new(move |snapshot: Result<Vec<Document>>| {
                if !flag.is_mounted() {
                    debug!(screen, collection = %source, "snapshot after dispose ignored");
                    return;
                }
                on_snapshot(snapshot.map(|docs| decode_all(&source, &docs)));
            }),
        );
        self.hold(registration);
    }

    /// Mark the screen gone and release every listener.
    pub fn dispose(&self) {
        if self.mounted.swap(false, Ordering::AcqRel) {
            let registrations = std::mem::take(&mut *self.registrations.lock());
            debug!(screen = self.name, listeners = registrations.len(), "screen disposed");
            for registration in registrations {
                registration.remove();
            }
        }
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Decode a snapshot, skipping malformed documents.
pub fn decode_all<T: DeserializeOwned>(collection: &str, documents: &[Document]) -> Vec<T> {
    documents
        .iter()
        .filter_map(|doc| match doc.decode::<T>() {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(collection, document_id = %doc.id, error = %err, "skipping malformed document");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    fn counted_registration(counter: &Arc<AtomicUsize>) -> ListenerRegistration {
        let counter = Arc::clone(counter);
        ListenerRegistration::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn dispose_releases_every_registration_once() {
        // Arrange
        let released = Arc::new(AtomicUsize::new(0));
        let scope = ScreenScope::new("home");
        scope.hold(counted_registration(&released));
        scope.hold(counted_registration(&released));
        let flag = scope.flag();

        // Act
        scope.dispose();
        scope.dispose();

        // Assert
        assert_eq!(released.load(Ordering::SeqCst), 2);
        assert!(!flag.is_mounted());
        assert_eq!(scope.active_listeners(), 0);
    }

    #[test]
    fn late_registration_is_released_immediately() {
        let released = Arc::new(AtomicUsize::new(0));
        let scope = ScreenScope::new("progress");
        scope.dispose();

        scope.hold(counted_registration(&released));
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_the_scope_disposes_it() {
        let released = Arc::new(AtomicUsize::new(0));
        let flag = {
            let scope = ScreenScope::new("notes");
            scope.hold(counted_registration(&released));
            scope.flag()
        };
        assert!(!flag.is_mounted());
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }
}
