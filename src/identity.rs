// ABOUTME: Cached account identity resolution with single-flight coalescing
// ABOUTME: Concurrent lookups share one upstream fetch; failures are not cached
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Identity Resolver
//!
//! The account identity is needed by nearly every tool (the athlete id is part
//! of every workout URL), so it is fetched once and cached for the life of the
//! process.
//!
//! ## States
//!
//! ```text
//! Empty ──get──▶ Resolving ──ok──▶ Resolved
//!   ▲               │                 │
//!   └────err────────┘                 │
//!   └────────────invalidate───────────┘
//! ```
//!
//! While `Resolving`, every caller awaits the same [`Shared`] future, so at
//! most one fetch is ever in flight. Each attempt carries a generation number;
//! an attempt that finishes after [`IdentityResolver::invalidate`] still hands
//! its outcome to its own waiters but does not write it back.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use peaks_core::models::UserIdentity;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::errors::AppResult;

/// Source of the account identity
#[async_trait]
pub trait IdentityFetcher: Send + Sync {
    /// Perform one upstream lookup
    async fn fetch_identity(&self) -> AppResult<UserIdentity>;
}

type PendingFetch = Shared<BoxFuture<'static, AppResult<UserIdentity>>>;

enum Slot {
    Empty,
    Resolving {
        generation: u64,
        pending: PendingFetch,
    },
    Resolved(UserIdentity),
}

struct State {
    slot: Slot,
    generation: u64,
}

/// Resolves and caches the account identity
pub struct IdentityResolver {
    fetcher: Arc<dyn IdentityFetcher>,
    state: Mutex<State>,
}

impl IdentityResolver {
    /// Create a resolver in the `Empty` state
    pub fn new(fetcher: impl IdentityFetcher + 'static) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            state: Mutex::new(State {
                slot: Slot::Empty,
                generation: 0,
            }),
        }
    }

    /// Return the cached identity, fetching it if needed
    ///
    /// # Errors
    ///
    /// Returns the fetch error. Every caller joined to the failed attempt sees
    /// the same error and the next call starts a fresh fetch.
    pub async fn get_identity(&self) -> AppResult<UserIdentity> {
        let (generation, pending) = {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;
            match &state.slot {
                Slot::Resolved(identity) => return Ok(identity.clone()),
                Slot::Resolving {
                    generation,
                    pending,
                } => {
                    debug!(generation, "Joining in-flight identity fetch");
                    (*generation, pending.clone())
                }
                Slot::Empty => {
                    state.generation += 1;
                    let generation = state.generation;
                    let fetcher = Arc::clone(&self.fetcher);
                    let pending = async move { fetcher.fetch_identity().await }
                        .boxed()
                        .shared();
                    debug!(generation, "Starting identity fetch");
                    state.slot = Slot::Resolving {
                        generation,
                        pending: pending.clone(),
                    };
                    (generation, pending)
                }
            }
        };

        let outcome = pending.await;

        let mut state = self.state.lock().await;
        let current = matches!(
            &state.slot,
            Slot::Resolving { generation: active, .. } if *active == generation
        );
        if current {
            state.slot = match &outcome {
                Ok(identity) => Slot::Resolved(identity.clone()),
                Err(error) => {
                    warn!(generation, "Identity fetch failed: {}", error.message);
                    Slot::Empty
                }
            };
        }

        outcome
    }

    /// Athlete id of the resolved identity
    ///
    /// # Errors
    ///
    /// Returns the identity fetch error
    pub async fn get_athlete_id(&self) -> AppResult<u64> {
        Ok(self.get_identity().await?.athlete_id)
    }

    /// Drop the cached identity so the next call fetches again
    pub async fn invalidate(&self) {
        let mut state = self.state.lock().await;
        if !matches!(state.slot, Slot::Empty) {
            debug!(generation = state.generation, "Identity cache invalidated");
        }
        state.slot = Slot::Empty;
    }

    /// Whether an identity is currently cached
    pub async fn is_resolved(&self) -> bool {
        matches!(self.state.lock().await.slot, Slot::Resolved(_))
    }
}

impl fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityResolver").finish_non_exhaustive()
    }
}
