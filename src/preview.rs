//! Preview cache with request deduplication
//!
//! Resolving a source is expensive (a full yt-dlp probe), so concurrent
//! preview requests for the same resource are collapsed: one caller runs the
//! resolution while the rest wait for its outcome. Successful results are
//! kept and reused; failures are handed to every waiter but never cached.

use crate::resolver::{PreviewResult, Resolver};
use crate::resource::ResourceKey;
use crate::utils::error::ResolutionError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify, OnceCell};
use tracing::debug;

type ResolveOutcome = Result<Arc<PreviewResult>, ResolutionError>;

/// Shared state of one resolution in progress.
///
/// Waiters loop on the cell instead of trusting a single notification, so a
/// wakeup that races the write is harmless.
struct InFlight {
    result: OnceCell<ResolveOutcome>,
    notify: Notify,
}

impl InFlight {
    fn new() -> Self {
        Self {
            result: OnceCell::new(),
            notify: Notify::new(),
        }
    }

    fn set_result(&self, result: ResolveOutcome) {
        let _ = self.result.set(result);
        self.notify.notify_waiters();
    }

    async fn wait(&self) -> ResolveOutcome {
        loop {
            if let Some(result) = self.result.get() {
                return result.clone();
            }

            let notified = self.notify.notified();
            if let Some(result) = self.result.get() {
                return result.clone();
            }

            notified.await;
        }
    }
}

/// Entry table and in-flight table behind one lock, so the hit check and the
/// dedup check cannot interleave with a commit.
#[derive(Default)]
struct CacheState {
    entries: HashMap<ResourceKey, Arc<PreviewResult>>,
    in_flight: HashMap<ResourceKey, Arc<InFlight>>,
}

/// What a lookup decided to do, resolved under the state lock.
enum Role {
    Hit(Arc<PreviewResult>),
    Waiter(Arc<InFlight>),
    Leader(Arc<InFlight>),
}

/// Cache of resolved previews, keyed by resource.
pub struct PreviewCache {
    resolver: Arc<Resolver>,
    state: Mutex<CacheState>,
}

impl PreviewCache {
    pub fn new(resolver: Arc<Resolver>) -> Self {
        Self {
            resolver,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Return the cached preview for a resource, resolving it on a miss.
    ///
    /// `url` is the decoded source URL the key was derived from; callers get
    /// both from the same parse.
    pub async fn get_or_resolve(&self, key: &ResourceKey, url: &str) -> ResolveOutcome {
        self.lookup(key, url, false).await
    }

    /// Re-resolve a resource, replacing whatever was cached.
    ///
    /// A resolution already in flight is joined rather than duplicated; its
    /// result is as fresh as one started now.
    pub async fn refresh(&self, key: &ResourceKey, url: &str) -> ResolveOutcome {
        self.lookup(key, url, true).await
    }

    /// Read the latest committed preview without triggering a resolution.
    pub async fn peek(&self, key: &ResourceKey) -> Option<Arc<PreviewResult>> {
        self.state.lock().await.entries.get(key).cloned()
    }

    /// Number of committed previews.
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.entries.is_empty()
    }

    async fn lookup(&self, key: &ResourceKey, url: &str, force: bool) -> ResolveOutcome {
        let role = {
            let mut state = self.state.lock().await;

            if force {
                state.entries.remove(key);
            }

            if let Some(entry) = state.entries.get(key) {
                Role::Hit(entry.clone())
            } else if let Some(in_flight) = state.in_flight.get(key) {
                Role::Waiter(in_flight.clone())
            } else {
                let in_flight = Arc::new(InFlight::new());
                state.in_flight.insert(key.clone(), in_flight.clone());
                Role::Leader(in_flight)
            }
        };

        match role {
            Role::Hit(entry) => {
                debug!("preview cache hit for {}", key);
                Ok(entry)
            }
            Role::Waiter(in_flight) => {
                debug!("joining in-flight resolution for {}", key);
                in_flight.wait().await
            }
            Role::Leader(in_flight) => {
                let outcome = self.resolver.resolve(url).await.map(Arc::new);

                // Commit before waking anyone: a lookup that lands after the
                // in-flight entry is gone must already see the result.
                {
                    let mut state = self.state.lock().await;
                    state.in_flight.remove(key);
                    if let Ok(preview) = &outcome {
                        state.entries.insert(key.clone(), preview.clone());
                    }
                }

                in_flight.set_result(outcome.clone());
                outcome
            }
        }
    }
}
