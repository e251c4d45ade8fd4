//! Fact store abstraction
//!
//! The hosted table is an opaque collaborator: insert a row, update one
//! column of a row, select rows filtered by category. Everything else the
//! client does is built on these calls.
//!
//! ```text
//! FactStore trait
//! ├── RestFactStore   (hosted table over its REST interface)
//! └── MemoryFactStore (demo mode, tests)
//! ```

pub mod memory;
pub mod rest;

pub use memory::MemoryFactStore;
pub use rest::RestFactStore;

use crate::facts::{CategorySelection, Fact, FactId, NewFact, VotePatch};
use async_trait::async_trait;
use std::fmt;

/// Default cap on rows returned by a select
pub const DEFAULT_FETCH_LIMIT: usize = 100;

/// Parameters of a list query: category filter, text descending, capped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactQuery {
    pub selection: CategorySelection,
    pub limit: usize,
}

impl FactQuery {
    pub fn new(selection: CategorySelection, limit: usize) -> Self {
        Self { selection, limit }
    }
}

/// Errors that can occur talking to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Request never got a response (DNS, TLS, connection reset, timeout)
    Transport(String),
    /// Store answered with a non-success status
    Status { status: u16, body: String },
    /// Response body was not the expected shape
    Decode(String),
    /// Update or fetch matched no row
    NotFound(FactId),
    /// Store is not configured (missing URL or key)
    NotConfigured(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Transport(msg) => write!(f, "Network error: {}", msg),
            StoreError::Status { status, body } => {
                write!(f, "Store returned HTTP {}: {}", status, body)
            }
            StoreError::Decode(msg) => write!(f, "Unexpected store response: {}", msg),
            StoreError::NotFound(id) => write!(f, "No fact with id {}", id),
            StoreError::NotConfigured(msg) => write!(f, "Store not configured: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Remote table capability used by the controller and the CLI
///
/// Implementations must be `Send + Sync`: calls are spawned onto the tokio
/// runtime and may run concurrently.
#[async_trait]
pub trait FactStore: Send + Sync {
    /// Human-readable name for logging
    fn name(&self) -> &'static str;

    /// Insert a new fact and return the stored row
    async fn insert(&self, fact: NewFact) -> Result<Fact, StoreError>;

    /// Set one vote column on a row and return the updated row
    async fn update(&self, id: FactId, patch: VotePatch) -> Result<Fact, StoreError>;

    /// Rows matching the query, ordered by text descending
    async fn select(&self, query: FactQuery) -> Result<Vec<Fact>, StoreError>;

    /// A single row by id
    async fn fetch(&self, id: FactId) -> Result<Option<Fact>, StoreError>;
}
