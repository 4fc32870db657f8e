//! Port interfaces for the remote document database
//!
//! The store is schemaless: documents are JSON objects addressed by a
//! collection path and an id. Typed models go through [`Document::decode`]
//! and [`encode_fields`].

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use studybuddy_domain::{Result, StudyBuddyError};

/// Field map of one document.
pub type Fields = Map<String, Value>;

/// Address of a single document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    /// Collection path, e.g. `users/u1/goals`.
    pub collection: String,
    pub id: String,
}

impl DocumentPath {
    /// Path of document `id` in `collection`.
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self { collection: collection.into(), id: id.into() }
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// A document as returned by reads and live queries.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    /// Document `id` with `fields`.
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self { id: id.into(), fields }
    }

    /// Decode into a typed model. The document id is offered as the `id`
    /// field.
    ///
    /// # Errors
    /// Returns `StudyBuddyError::Store` when the fields do not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        let mut fields = self.fields.clone();
        fields.insert("id".to_string(), Value::String(self.id.clone()));
        serde_json::from_value(Value::Object(fields)).map_err(|err| {
            StudyBuddyError::Store(format!("Malformed document {}: {err}", self.id))
        })
    }

    /// String value of `field`, if present.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }
}

/// Serialize a typed model into document fields.
///
/// # Errors
/// Returns `StudyBuddyError::Internal` if `value` does not serialize to a
/// JSON object.
pub fn encode_fields<T: Serialize>(value: &T) -> Result<Fields> {
    match serde_json::to_value(value) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(StudyBuddyError::Internal(format!(
            "Expected an object, got {other}"
        ))),
        Err(err) => Err(StudyBuddyError::Internal(err.to_string())),
    }
}

/// Build a field map from `(name, value)` pairs.
pub fn fields<const N: usize>(pairs: [(&str, Value); N]) -> Fields {
    pairs.into_iter().map(|(name, value)| (name.to_string(), value)).collect()
}

/// Sort direction of an order-by clause
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// Field and direction to sort by
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Collection query: equality predicates, one order-by and a limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<(String, Value)>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl Query {
    /// Query matching every document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep documents whose `field` equals `value`.
    #[must_use]
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Sort by `field`.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy { field: field.into(), direction });
        self
    }

    /// Keep at most `limit` documents.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `document` satisfies every equality predicate.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        self.filters.iter().all(|(field, value)| document.fields.get(field) == Some(value))
    }

    /// Evaluate the query over a full collection listing.
    ///
    /// Ordering is stable: documents with equal keys keep their listing
    /// order. Documents missing the order field sort first.
    #[must_use]
    pub fn apply(&self, documents: Vec<Document>) -> Vec<Document> {
        let mut selected: Vec<Document> =
            documents.into_iter().filter(|doc| self.matches(doc)).collect();

        if let Some(order) = &self.order_by {
            selected.sort_by(|a, b| {
                let ordering = compare_values(a.fields.get(&order.field), b.fields.get(&order.field));
                match order.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
    }
}

/// Cross-type ordering: null < bool < number < string < array < object.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            x.total_cmp(&y)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Callback receiving the full result set of a live query after every
/// change, or the error that ended the subscription.
pub type SnapshotListener = Arc<dyn Fn(Result<Vec<Document>>) + Send + Sync>;

/// Handle of a live query. Dropping it unregisters the listener.
pub struct ListenerRegistration {
    remover: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl ListenerRegistration {
    /// Registration that runs `remover` once on release.
    pub fn new(remover: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self { remover: Some(Box::new(remover)) }
    }

    /// A registration with nothing to release.
    #[must_use]
    pub fn noop() -> Self {
        Self { remover: None }
    }

    /// Stop further deliveries.
    pub fn remove(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(remover) = self.remover.take() {
            remover();
        }
    }
}

impl Drop for ListenerRegistration {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ListenerRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistration").field("active", &self.remover.is_some()).finish()
    }
}

/// Trait for the remote document database
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document; `None` when it does not exist.
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>>;

    /// One-shot query over a collection.
    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>>;

    /// Create a document with a generated id and return the id.
    async fn add(&self, collection: &str, fields: Fields) -> Result<String>;

    /// Create or replace a document.
    async fn set(&self, path: &DocumentPath, fields: Fields) -> Result<()>;

    /// Merge `fields` into an existing document. Fails when it is missing.
    async fn update(&self, path: &DocumentPath, fields: Fields) -> Result<()>;

    async fn delete(&self, path: &DocumentPath) -> Result<()>;

    /// Register a live query. The listener receives the current result set
    /// right away and again after every change to the collection.
    fn listen(&self, collection: &str, query: Query, listener: SnapshotListener) -> ListenerRegistration;
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    use serde_json::json;

    use super::*;

    fn doc(id: &str, value: Value) -> Document {
        match value {
            Value::Object(fields) => Document::new(id, fields),
            _ => Document::new(id, Fields::new()),
        }
    }

    #[test]
    fn equality_filters_and_ordering() {
        let docs = vec![
            doc("a", json!({ "completed": true, "text": "a" })),
            doc("b", json!({ "completed": false, "text": "b" })),
            doc("c", json!({ "completed": false, "text": "c" })),
            doc("d", json!({ "text": "d" })),
        ];

        let open = Query::new().where_eq("completed", false).apply(docs.clone());
        assert_eq!(open.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(), ["b", "c"]);

        let ordered = Query::new().order_by("completed", Direction::Ascending).apply(docs.clone());
        assert_eq!(ordered.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(), ["d", "b", "c", "a"]);

        let limited = Query::new().order_by("text", Direction::Descending).limit(2).apply(docs);
        assert_eq!(limited.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(), ["d", "c"]);
    }

    #[test]
    fn decode_offers_the_document_id() {
        #[derive(Debug, serde::Deserialize)]
        struct Named {
            id: String,
            name: String,
        }

        let named: Named = doc("n1", json!({ "name": "ada" })).decode().expect("should decode");
        assert_eq!(named.id, "n1");
        assert_eq!(named.name, "ada");

        let err = doc("n2", json!({ "name": 3 })).decode::<Named>().unwrap_err();
        assert!(err.is_remote());
    }

    #[test]
    fn registration_releases_once() {
        let released = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&released);
        let registration = ListenerRegistration::new(move || {
            counter.fetch_add(1, AtomicOrdering::SeqCst);
        });
        registration.remove();
        assert_eq!(released.load(AtomicOrdering::SeqCst), 1);

        let counter = Arc::clone(&released);
        drop(ListenerRegistration::new(move || {
            counter.fetch_add(1, AtomicOrdering::SeqCst);
        }));
        assert_eq!(released.load(AtomicOrdering::SeqCst), 2);
    }

    #[test]
    fn encode_rejects_non_objects() {
        assert!(encode_fields(&3).is_err());
        let fields = encode_fields(&json!({ "theme": "dark" })).expect("object should encode");
        assert_eq!(fields.get("theme"), Some(&json!("dark")));
    }
}
