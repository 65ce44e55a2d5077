//! # Change Notification
//!
//! Live queries over the store.
//!
//! ## How It Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Change Notification                               │
//! │                                                                         │
//! │  Repository write (insert/update/delete)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ChangeTracker::notify(&[Table::Items])                                │
//! │       │   bumps the per-table generation in a watch channel            │
//! │       ▼                                                                 │
//! │  ┌──────────────────────┐   ┌──────────────────────┐                   │
//! │  │ Subscription (items  │   │ Subscription         │                   │
//! │  │ of category 3)       │   │ (categories)         │                   │
//! │  │ Items gen changed?   │   │ Categories changed?  │                   │
//! │  │ yes → re-query       │   │ no → keep waiting    │                   │
//! │  └──────────────────────┘   └──────────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Delivery Contract
//! - The first [`Subscription::next`] returns the current snapshot at once.
//! - Each later call waits until a table the query depends on changes, then
//!   returns a full fresh snapshot. Several writes that land before the
//!   subscriber wakes collapse into one snapshot.
//! - A write that lands while a snapshot is being read triggers one more
//!   snapshot, so no change is missed (a snapshot may repeat).
//! - Dropping the subscription unsubscribes.
//! - Once the database is closed, `next` returns `None`.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, trace};

use crate::error::DbResult;

/// Tables whose changes subscribers can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Categories,
    Items,
    QuantityUnits,
    Preferences,
}

impl Table {
    const COUNT: usize = 4;

    const fn index(self) -> usize {
        match self {
            Table::Categories => 0,
            Table::Items => 1,
            Table::QuantityUnits => 2,
            Table::Preferences => 3,
        }
    }
}

/// Per-table write counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generations([u64; Table::COUNT]);

impl Generations {
    /// Number of notified writes to `table` so far.
    pub fn get(&self, table: Table) -> u64 {
        self.0[table.index()]
    }
}

/// Broadcasts table changes to subscriptions.
///
/// One tracker is shared (behind an `Arc`) by a [`Database`](crate::Database)
/// handle, its clones, and every repository it hands out.
#[derive(Debug)]
pub struct ChangeTracker {
    generations: watch::Sender<Generations>,
    closed: AtomicBool,
}

impl ChangeTracker {
    pub fn new() -> Self {
        let (generations, _) = watch::channel(Generations::default());
        ChangeTracker {
            generations,
            closed: AtomicBool::new(false),
        }
    }

    /// Records a committed write to each of `tables` and wakes subscribers.
    pub fn notify(&self, tables: &[Table]) {
        self.generations.send_modify(|generations| {
            for table in tables {
                generations.0[table.index()] += 1;
            }
        });
        trace!(?tables, "Tables changed");
    }

    /// Current generations.
    pub fn generations(&self) -> Generations {
        *self.generations.borrow()
    }

    /// Ends every subscription.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        // Wake sleeping subscribers so they observe the closed flag
        self.generations.send_modify(|_| {});
        debug!("Change tracker closed");
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn subscribe(&self) -> watch::Receiver<Generations> {
        self.generations.subscribe()
    }
}

impl Default for ChangeTracker {
    fn default() -> Self {
        ChangeTracker::new()
    }
}

type SnapshotFuture<T> = Pin<Box<dyn Future<Output = DbResult<T>> + Send>>;
type Fetch<T> = Box<dyn Fn() -> SnapshotFuture<T> + Send + Sync>;

/// A live query: yields a fresh snapshot whenever its tables change.
///
/// ## Usage
/// ```rust,ignore
/// let mut categories = db.categories().subscribe();
///
/// // Initial snapshot, immediately
/// let current = categories.next().await.unwrap()?;
///
/// // Waits for the next change to the categories table
/// while let Some(snapshot) = categories.next().await {
///     render(snapshot?);
/// }
/// ```
pub struct Subscription<T> {
    tracker: Arc<ChangeTracker>,
    receiver: watch::Receiver<Generations>,
    tables: Vec<Table>,
    seen: Generations,
    primed: bool,
    fetch: Fetch<T>,
}

impl<T> Subscription<T> {
    /// Creates a subscription that runs `fetch` for every snapshot.
    pub fn new<F, Fut>(tracker: Arc<ChangeTracker>, tables: &[Table], fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = DbResult<T>> + Send + 'static,
    {
        let receiver = tracker.subscribe();
        Subscription {
            tracker,
            receiver,
            tables: tables.to_vec(),
            seen: Generations::default(),
            primed: false,
            fetch: Box::new(move || Box::pin(fetch())),
        }
    }

    /// Returns the next snapshot, or `None` once the database is closed.
    pub async fn next(&mut self) -> Option<DbResult<T>> {
        if self.tracker.is_closed() {
            return None;
        }

        if self.primed {
            self.wait_for_change().await?;
        } else {
            self.primed = true;
            self.seen = *self.receiver.borrow_and_update();
        }

        Some((self.fetch)().await)
    }

    /// Runs the query now without waiting or consuming a change.
    pub async fn refresh(&self) -> DbResult<T> {
        (self.fetch)().await
    }

    /// Tables this subscription listens to.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    async fn wait_for_change(&mut self) -> Option<()> {
        loop {
            // Sender lives as long as the tracker we hold, so this only
            // errors if the tracker itself is gone
            self.receiver.changed().await.ok()?;

            if self.tracker.is_closed() {
                return None;
            }

            let current = *self.receiver.borrow_and_update();
            let relevant = self
                .tables
                .iter()
                .any(|table| current.get(*table) != self.seen.get(*table));
            self.seen = current;

            if relevant {
                return Some(());
            }
        }
    }
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("tables", &self.tables)
            .field("seen", &self.seen)
            .field("primed", &self.primed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn counting_subscription(
        tracker: &Arc<ChangeTracker>,
        tables: &[Table],
    ) -> (Subscription<usize>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let sub = Subscription::new(tracker.clone(), tables, move || {
            let counter = counter.clone();
            async move { Ok(counter.fetch_add(1, Ordering::SeqCst) + 1) }
        });
        (sub, calls)
    }

    #[tokio::test]
    async fn test_first_next_returns_immediately() {
        let tracker = Arc::new(ChangeTracker::new());
        let (mut sub, _) = counting_subscription(&tracker, &[Table::Items]);

        let first = tokio::time::timeout(Duration::from_millis(200), sub.next())
            .await
            .expect("initial snapshot should not wait");
        assert_eq!(first.unwrap().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_next_waits_for_relevant_table() {
        let tracker = Arc::new(ChangeTracker::new());
        let (mut sub, _) = counting_subscription(&tracker, &[Table::Items]);
        sub.next().await.unwrap().unwrap();

        // Unrelated table does not wake the subscriber
        tracker.notify(&[Table::Categories]);
        let pending = tokio::time::timeout(Duration::from_millis(50), sub.next()).await;
        assert!(pending.is_err());

        tracker.notify(&[Table::Items]);
        let snapshot = tokio::time::timeout(Duration::from_millis(200), sub.next())
            .await
            .expect("items change should wake the subscriber");
        assert_eq!(snapshot.unwrap().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_writes_before_wakeup_collapse() {
        let tracker = Arc::new(ChangeTracker::new());
        let (mut sub, calls) = counting_subscription(&tracker, &[Table::Items]);
        sub.next().await.unwrap().unwrap();

        tracker.notify(&[Table::Items]);
        tracker.notify(&[Table::Items]);
        tracker.notify(&[Table::Items]);

        sub.next().await.unwrap().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.generations().get(Table::Items), 3);
    }

    #[tokio::test]
    async fn test_close_ends_subscription() {
        let tracker = Arc::new(ChangeTracker::new());
        let (mut sub, _) = counting_subscription(&tracker, &[Table::Preferences]);
        sub.next().await.unwrap().unwrap();

        let closer = tracker.clone();
        let waiter = tokio::spawn(async move { sub.next().await.is_none() });
        tokio::time::sleep(Duration::from_millis(20)).await;
        closer.close();

        assert!(waiter.await.unwrap());
    }
}
