//! Search sessions with stale-response suppression.
//!
//! A [`SearchSource`] wraps either a plain function or one returning a future
//! behind the same asynchronous contract. A [`SearchSession`] numbers every
//! search it issues; when a [`SearchResultMsg`] comes back it is only accepted
//! if no newer search was issued in the meantime. Superseded searches still run
//! to completion, their results are simply ignored.
//!
//! ```rust
//! use bubbletea_combobox::search::{SearchResultMsg, SearchSession, SearchSource};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let fruits = vec!["apple", "apricot", "banana"];
//! let mut session = SearchSession::new(SearchSource::sync(move |q: &str| {
//!     fruits
//!         .iter()
//!         .filter(|f| f.starts_with(q))
//!         .map(|f| f.to_string())
//!         .collect::<Vec<_>>()
//! }));
//!
//! let first = session.search("a");
//! let second = session.search("ap");
//!
//! let stale = first.await.unwrap().downcast::<SearchResultMsg<String>>().unwrap();
//! let fresh = second.await.unwrap().downcast::<SearchResultMsg<String>>().unwrap();
//! assert!(session.accept(*stale).is_none());
//! assert_eq!(session.accept(*fresh).unwrap().len(), 2);
//! # });
//! ```

use crate::error::Error;
use bubbletea_rs::{Cmd, Msg};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

// Session ids keep results from one widget out of another.
static LAST_ID: AtomicUsize = AtomicUsize::new(0);

fn next_id() -> usize {
    LAST_ID.fetch_add(1, Ordering::Relaxed)
}

/// Boxed future produced by a search source.
pub type SearchFuture<I> = Pin<Box<dyn Future<Output = Result<Vec<I>, Error>> + Send>>;

type SyncFn<I> = Arc<dyn Fn(&str) -> Vec<I> + Send + Sync>;
type AsyncFn<I> = Arc<dyn Fn(String) -> SearchFuture<I> + Send + Sync>;

enum Source<I> {
    Sync(SyncFn<I>),
    Async(AsyncFn<I>),
}

/// A search callback, synchronous or asynchronous.
pub struct SearchSource<I> {
    source: Source<I>,
}

impl<I> Clone for SearchSource<I> {
    fn clone(&self) -> Self {
        let source = match &self.source {
            Source::Sync(f) => Source::Sync(Arc::clone(f)),
            Source::Async(f) => Source::Async(Arc::clone(f)),
        };
        Self { source }
    }
}

impl<I> fmt::Debug for SearchSource<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.source {
            Source::Sync(_) => "sync",
            Source::Async(_) => "async",
        };
        f.debug_struct("SearchSource").field("kind", &kind).finish()
    }
}

impl<I: Send + 'static> SearchSource<I> {
    /// Wraps a synchronous search function.
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(&str) -> Vec<I> + Send + Sync + 'static,
    {
        Self {
            source: Source::Sync(Arc::new(f)),
        }
    }

    /// Wraps a function returning a future that always resolves.
    pub fn future<F, Fut>(f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Vec<I>> + Send + 'static,
    {
        Self {
            source: Source::Async(Arc::new(move |q| {
                let fut = f(q);
                Box::pin(async move { Ok::<_, Error>(fut.await) }) as SearchFuture<I>
            })),
        }
    }

    /// Wraps a function returning a fallible future. Failures are logged and
    /// treated as an empty result.
    pub fn try_future<F, Fut, E>(f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<I>, E>> + Send + 'static,
        E: fmt::Display,
    {
        Self {
            source: Source::Async(Arc::new(move |q| {
                let fut = f(q);
                Box::pin(async move { fut.await.map_err(|e| Error::Search(e.to_string())) })
                    as SearchFuture<I>
            })),
        }
    }

    fn run(&self, query: String) -> SearchFuture<I> {
        match &self.source {
            Source::Sync(f) => {
                let f = Arc::clone(f);
                Box::pin(async move { Ok::<_, Error>(f(&query)) })
            }
            Source::Async(f) => f(query),
        }
    }
}

/// Message carrying the outcome of one search.
#[derive(Debug)]
pub struct SearchResultMsg<I> {
    /// Id of the session that issued the search.
    pub session: usize,
    /// Sequence number of the search within its session.
    pub seq: u64,
    /// The query that was searched.
    pub query: String,
    /// Results, or the failure of a fallible source.
    pub outcome: Result<Vec<I>, Error>,
}

/// Issues searches and filters out stale results.
#[derive(Debug)]
pub struct SearchSession<I> {
    id: usize,
    counter: u64,
    in_flight: bool,
    source: SearchSource<I>,
}

impl<I: Send + 'static> SearchSession<I> {
    /// Creates a session around a search source.
    pub fn new(source: SearchSource<I>) -> Self {
        Self {
            id: next_id(),
            counter: 0,
            in_flight: false,
            source,
        }
    }

    /// Unique id of this session.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Sequence number of the latest search issued.
    pub fn latest(&self) -> u64 {
        self.counter
    }

    /// Whether the latest search has not been accepted yet.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Issues a search and returns the command that performs it.
    pub fn search(&mut self, query: &str) -> Cmd {
        self.counter += 1;
        self.in_flight = true;

        let session = self.id;
        let seq = self.counter;
        let query = query.to_string();
        debug!(session, seq, query = %query, "search issued");

        let fut = self.source.run(query.clone());
        Box::pin(async move {
            let outcome = fut.await;
            Some(Box::new(SearchResultMsg {
                session,
                seq,
                query,
                outcome,
            }) as Msg)
        })
    }

    /// Returns true if the message was issued by this session, stale or not.
    pub fn owns(&self, msg: &SearchResultMsg<I>) -> bool {
        msg.session == self.id
    }

    /// Accepts a result if it answers the latest search. Failed searches are
    /// accepted as empty results.
    pub fn accept(&mut self, msg: SearchResultMsg<I>) -> Option<Vec<I>> {
        if !self.owns(&msg) {
            return None;
        }
        if msg.seq != self.counter {
            debug!(
                session = self.id,
                seq = msg.seq,
                latest = self.counter,
                "dropping stale search result"
            );
            return None;
        }

        self.in_flight = false;
        match msg.outcome {
            Ok(results) => {
                debug!(session = self.id, seq = msg.seq, count = results.len(), "search accepted");
                Some(results)
            }
            Err(err) => {
                warn!(session = self.id, query = %msg.query, error = %err, "search failed");
                Some(Vec::new())
            }
        }
    }

    /// Makes every search issued so far stale.
    pub fn invalidate(&mut self) {
        self.counter += 1;
        self.in_flight = false;
    }
}
