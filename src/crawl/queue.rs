// src/crawl/queue.rs
// =============================================================================
// The crawl frontier: every URL the crawl knows about, pending or done.
//
// How it works:
// 1. add() records the URL in a "seen" set, bumps the outstanding counter,
//    then hands the URL to an unbounded channel
// 2. Workers pull URLs with next(), which waits until one is available
// 3. Each claimed URL is matched by exactly one complete() call
// 4. await_drained() resolves once the outstanding counter hits zero
// 5. close() ends the stream so idle workers see None and exit
//
// A URL is never removed from "seen", so nothing is ever visited twice.
// URLs are compared by their full serialized form: trailing slashes, query
// order and case all count.
//
// Rust concepts:
// - HashSet: To track seen URLs (O(1) lookup)
// - mpsc::unbounded_channel: Adding never waits on a consumer
// - watch channel: Lets any number of tasks wait for the counter to change
// =============================================================================

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::{mpsc, watch, Mutex as AsyncMutex};
use tracing::warn;
use url::Url;

// Shared mutable part of the frontier, guarded by a single lock
struct FrontierState {
    seen: HashSet<String>,
    // Acceptance order, kept separately because HashSet is unordered
    accepted: Vec<Url>,
    // None once the frontier has been closed
    sender: Option<mpsc::UnboundedSender<Url>>,
}

pub struct Frontier {
    state: Mutex<FrontierState>,
    receiver: AsyncMutex<mpsc::UnboundedReceiver<Url>>,
    outstanding: watch::Sender<usize>,
}

impl Frontier {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (outstanding, _) = watch::channel(0);

        Self {
            state: Mutex::new(FrontierState {
                seen: HashSet::new(),
                accepted: Vec::new(),
                sender: Some(sender),
            }),
            receiver: AsyncMutex::new(receiver),
            outstanding,
        }
    }

    // Adds a URL to the frontier
    //
    // Returns: true if the URL was new and is now waiting for a worker,
    //          false if it was seen before or the frontier is closed
    pub fn add(&self, url: Url) -> bool {
        let mut state = self.lock();

        if state.sender.is_none() || state.seen.contains(url.as_str()) {
            return false;
        }

        state.seen.insert(url.as_str().to_owned());
        state.accepted.push(url.clone());

        // Counted before it is sent, so a worker can never complete it first
        self.outstanding.send_modify(|count| *count += 1);

        if let Some(sender) = &state.sender {
            // The receiver lives as long as self, so this can't fail
            let _ = sender.send(url);
        }

        true
    }

    // Adds every URL; true if at least one of them was new
    pub fn add_bulk<I>(&self, urls: I) -> bool
    where
        I: IntoIterator<Item = Url>,
    {
        urls.into_iter()
            .fold(false, |added, url| self.add(url) || added)
    }

    // Waits for the next URL to visit
    //
    // Returns None once the frontier is closed and nothing is left to hand out.
    // Callers race this against their cancellation token.
    pub async fn next(&self) -> Option<Url> {
        self.receiver.lock().await.recv().await
    }

    // Marks one claimed URL as finished (successfully or not)
    pub fn complete(&self) {
        self.outstanding.send_modify(|count| {
            if *count == 0 {
                warn!("frontier completion signalled with no outstanding work");
            } else {
                *count -= 1;
            }
        });
    }

    // Number of accepted URLs that have not been completed yet
    pub fn outstanding(&self) -> usize {
        *self.outstanding.borrow()
    }

    // Resolves as soon as no URL is pending or in flight
    pub async fn await_drained(&self) {
        let mut receiver = self.outstanding.subscribe();
        // The sender is owned by self, so the channel can't close under us
        let _ = receiver.wait_for(|count| *count == 0).await;
    }

    // Ends the stream of URLs. Calling it again does nothing.
    pub fn close(&self) {
        self.lock().sender.take();
    }

    // Every URL ever accepted, in the order it was accepted
    pub fn snapshot(&self) -> Vec<Url> {
        self.lock().accepted.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        // Nothing panics while holding this lock, but don't cascade if it did
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why two different Mutex types?
//    - std::sync::Mutex guards the seen-set; it is never held across .await
//    - tokio::sync::Mutex guards the receiver, and IS held across .await
//      while a worker waits for a URL. Only tokio's Mutex allows that.
//
// 2. Why a watch channel for the counter?
//    - watch keeps the latest value and wakes every subscriber on change
//    - wait_for() checks the current value first, so a waiter that subscribes
//      after the counter already hit zero doesn't hang
//
// 3. Why is close() just sender.take()?
//    - Dropping the last sender closes an mpsc channel
//    - recv() then returns whatever is still buffered, then None forever
// -----------------------------------------------------------------------------
