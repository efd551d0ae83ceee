#![forbid(unsafe_code)]

//! Fetch controller: one-entry result cache and remote request supersession.
//!
//! Each remote request carries a sequence number. Only the request recorded
//! as pending may complete; anything else is stale and gets discarded, so an
//! older, slower response can never overwrite a newer one.

use crate::binding::RequestToken;
use crate::suggestion::Suggestion;

/// The most recently recorded `(query, results)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub query: String,
    pub results: Vec<Suggestion>,
}

/// The single in-flight remote request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub seq: u64,
    pub token: RequestToken,
    pub query: String,
}

/// Per-instance fetch state.
#[derive(Debug, Default)]
pub struct FetchController {
    cache: Option<CacheEntry>,
    pending: Option<PendingRequest>,
    seq: u64,
}

impl FetchController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached results, only on an exact repeat of the cached query.
    #[must_use]
    pub fn cached(&self, query: &str) -> Option<&[Suggestion]> {
        self.cache
            .as_ref()
            .filter(|entry| entry.query == query)
            .map(|entry| entry.results.as_slice())
    }

    #[must_use]
    pub fn cached_query(&self) -> Option<&str> {
        self.cache.as_ref().map(|entry| entry.query.as_str())
    }

    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Overwrite the cache entry.
    pub fn record(&mut self, query: impl Into<String>, results: Vec<Suggestion>) {
        self.cache = Some(CacheEntry {
            query: query.into(),
            results,
        });
    }

    /// Allocate the sequence number for the next remote request.
    pub fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Remember an issued request as the pending one.
    pub fn track(&mut self, seq: u64, token: RequestToken, query: impl Into<String>) {
        self.pending = Some(PendingRequest {
            seq,
            token,
            query: query.into(),
        });
    }

    /// Claim the pending request if `seq` matches it.
    ///
    /// Returns `None` for stale or canceled completions.
    pub fn accept(&mut self, seq: u64) -> Option<PendingRequest> {
        match &self.pending {
            Some(pending) if pending.seq == seq => self.pending.take(),
            _ => None,
        }
    }

    /// Forget the pending request and hand it back for transport cancellation.
    pub fn cancel(&mut self) -> Option<PendingRequest> {
        self.pending.take()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingRequest> {
        self.pending.as_ref()
    }
}
