//! Database layer (local key-value document store).

pub mod document_store;
pub mod storage;

pub use document_store::{Document, DocumentStore, ID_FIELD};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageMedium};

/// Collection and storage key names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const STRESS_DATA: &str = "stress_data";
    pub const BREAK_SCHEDULES: &str = "break_schedules";
    /// Single-user session blob (the logged-in user object)
    pub const SESSION_USER: &str = "mindease_user";
}

/// Storage and document store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Collection '{collection}' holds unreadable data: {source}")]
    Corrupted {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Document '{id}' already exists in '{collection}'")]
    DuplicateId { collection: String, id: String },

    #[error("Update of '{id}' in '{collection}' rejected: {reason}")]
    InvalidUpdate {
        collection: String,
        id: String,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}
