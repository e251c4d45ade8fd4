//! In-process fact store
//!
//! Backs demo mode and the controller tests. Records every call it receives
//! and can be told to fail the next call of a given kind.

use super::{FactQuery, FactStore, StoreError};
use crate::facts::{Fact, FactId, NewFact, VotePatch};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// A call observed by the store, for assertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Insert(NewFact),
    Update(FactId, VotePatch),
    Select(FactQuery),
    Fetch(FactId),
}

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<Fact>,
    next_id: i64,
    calls: Vec<StoreCall>,
    fail_insert: bool,
    fail_update: bool,
    fail_select: bool,
}

/// Vec-backed store with call recording and failure injection
#[derive(Debug, Default)]
pub struct MemoryFactStore {
    inner: Mutex<Inner>,
    latency: Option<Duration>,
}

impl MemoryFactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with rows; new ids continue after the largest one
    pub fn with_facts(rows: Vec<Fact>) -> Self {
        let next_id = rows.iter().map(|f| f.id.0).max().unwrap_or(0) + 1;
        Self {
            inner: Mutex::new(Inner {
                rows,
                next_id,
                ..Default::default()
            }),
            latency: None,
        }
    }

    /// Delay every call, so in-flight states are visible in demo mode
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    /// Calls received so far
    #[cfg(test)]
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Make subsequent inserts fail
    #[cfg(test)]
    pub fn fail_inserts(&self, fail: bool) {
        self.lock().fail_insert = fail;
    }

    /// Make subsequent updates fail
    #[cfg(test)]
    pub fn fail_updates(&self, fail: bool) {
        self.lock().fail_update = fail;
    }

    /// Make subsequent selects fail
    #[cfg(test)]
    pub fn fail_selects(&self, fail: bool) {
        self.lock().fail_select = fail;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means a test panicked mid-call; the rows are still usable
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn injected(what: &str) -> StoreError {
    StoreError::Status {
        status: 500,
        body: format!("injected {} failure", what),
    }
}

#[async_trait]
impl FactStore for MemoryFactStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, fact: NewFact) -> Result<Fact, StoreError> {
        self.simulate_latency().await;
        let mut inner = self.lock();
        inner.calls.push(StoreCall::Insert(fact.clone()));
        if inner.fail_insert {
            return Err(injected("insert"));
        }

        let row = Fact {
            id: FactId(inner.next_id),
            text: fact.text,
            source: fact.source,
            category: fact.category.name().to_string(),
            votes_interesting: 0,
            votes_mindblowing: 0,
            votes_false: 0,
        };
        inner.next_id += 1;
        inner.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: FactId, patch: VotePatch) -> Result<Fact, StoreError> {
        self.simulate_latency().await;
        let mut inner = self.lock();
        inner.calls.push(StoreCall::Update(id, patch));
        if inner.fail_update {
            return Err(injected("update"));
        }

        let row = inner
            .rows
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(StoreError::NotFound(id))?;
        patch.apply_to(row);
        Ok(row.clone())
    }

    async fn select(&self, query: FactQuery) -> Result<Vec<Fact>, StoreError> {
        self.simulate_latency().await;
        let mut inner = self.lock();
        inner.calls.push(StoreCall::Select(query));
        if inner.fail_select {
            return Err(injected("select"));
        }

        let mut rows: Vec<Fact> = inner
            .rows
            .iter()
            .filter(|f| match query.selection.category() {
                Some(c) => f.category == c.name(),
                None => true,
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.text.cmp(&a.text));
        rows.truncate(query.limit);
        Ok(rows)
    }

    async fn fetch(&self, id: FactId) -> Result<Option<Fact>, StoreError> {
        self.simulate_latency().await;
        let mut inner = self.lock();
        inner.calls.push(StoreCall::Fetch(id));
        Ok(inner.rows.iter().find(|f| f.id == id).cloned())
    }
}
