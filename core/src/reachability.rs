//! Network reachability collaborator.
//!
//! The name index never consults this; it is the typed interface an
//! application shell implements on top of whatever socket reachability API
//! the platform offers. Status changes are delivered to subscribers, and a
//! [`Subscription`] unsubscribes when cancelled or dropped.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReachabilityStatus {
    Unknown,
    NotReachable,
    Wifi,
    Cellular2G,
    Cellular3G,
    Cellular4G,
    Cellular5G,
}

impl ReachabilityStatus {
    /// Numeric code used by platform reachability APIs (-1 is unknown).
    pub fn code(self) -> i8 {
        match self {
            Self::Unknown => -1,
            Self::NotReachable => 0,
            Self::Wifi => 1,
            Self::Cellular2G => 2,
            Self::Cellular3G => 3,
            Self::Cellular4G => 4,
            Self::Cellular5G => 5,
        }
    }

    pub fn from_code(code: i8) -> Self {
        match code {
            0 => Self::NotReachable,
            1 => Self::Wifi,
            2 => Self::Cellular2G,
            3 => Self::Cellular3G,
            4 => Self::Cellular4G,
            5 => Self::Cellular5G,
            _ => Self::Unknown,
        }
    }

    pub fn is_reachable(self) -> bool {
        !matches!(self, Self::Unknown | Self::NotReachable)
    }

    pub fn is_cellular(self) -> bool {
        matches!(
            self,
            Self::Cellular2G | Self::Cellular3G | Self::Cellular4G | Self::Cellular5G
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::NotReachable => "Not Reachable",
            Self::Wifi => "Reachable via WiFi",
            Self::Cellular2G => "Reachable via 2G",
            Self::Cellular3G => "Reachable via 3G",
            Self::Cellular4G => "Reachable via 4G",
            Self::Cellular5G => "Reachable via 5G",
        }
    }
}

impl fmt::Display for ReachabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub trait ReachabilityProvider: Send + Sync {
    fn status(&self) -> ReachabilityStatus;
}

type Callback = Arc<dyn Fn(ReachabilityStatus) + Send + Sync>;

struct Inner {
    status: ReachabilityStatus,
    next_id: u64,
    subscribers: Vec<(u64, Callback)>,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Provider fed from outside via [`update`](ReachabilityNotifier::update).
#[derive(Clone)]
pub struct ReachabilityNotifier {
    inner: Arc<Mutex<Inner>>,
}

impl Default for ReachabilityNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ReachabilityNotifier {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                status: ReachabilityStatus::Unknown,
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Record a new status. Subscribers are called (outside the lock) only
    /// if the status actually changed. Returns whether it changed.
    pub fn update(&self, status: ReachabilityStatus) -> bool {
        let callbacks: Vec<Callback> = {
            let mut inner = lock(&self.inner);
            if inner.status == status {
                return false;
            }
            inner.status = status;
            inner.subscribers.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        tracing::debug!(%status, subscribers = callbacks.len(), "reachability changed");
        for cb in callbacks {
            cb(status);
        }
        true
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(ReachabilityStatus) + Send + Sync + 'static,
    {
        let mut inner = lock(&self.inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Arc::new(callback)));
        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).subscribers.len()
    }
}

impl ReachabilityProvider for ReachabilityNotifier {
    fn status(&self) -> ReachabilityStatus {
        lock(&self.inner).status
    }
}

/// Handle returned by [`ReachabilityNotifier::subscribe`].
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    inner: Weak<Mutex<Inner>>,
}

impl Subscription {
    pub fn cancel(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).subscribers.retain(|(id, _)| *id != self.id);
        }
    }
}
