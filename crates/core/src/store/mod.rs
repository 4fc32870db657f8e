pub mod paths;
pub mod ports;

pub use paths::UserPaths;
pub use ports::{
    encode_fields, fields, Direction, Document, DocumentPath, DocumentStore, Fields,
    ListenerRegistration, OrderBy, Query, SnapshotListener,
};
