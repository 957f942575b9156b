//! Navigation state, triggers and outcomes.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::routing::Route;

/// Whether any navigation is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NavState {
    Idle,
    Navigating,
}

/// What started a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Initial document ready.
    Ready,
    HashChange,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Ready => f.write_str("ready"),
            Trigger::HashChange => f.write_str("hash_change"),
        }
    }
}

/// Summary of a completed navigation.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationReport {
    pub id: Uuid,
    pub trigger: Trigger,
    pub route: Route,
    /// Layout fragment paths newly composed, root first.
    pub layouts_composed: Vec<String>,
    /// Layout fragment paths already present and left alone.
    pub layouts_skipped: Vec<String>,
    /// Layout fragment paths confirmed absent.
    pub layouts_absent: Vec<String>,
    pub page_composed: bool,
}

impl NavigationReport {
    pub(crate) fn new(id: Uuid, trigger: Trigger, route: Route) -> Self {
        Self {
            id,
            trigger,
            route,
            layouts_composed: Vec::new(),
            layouts_skipped: Vec::new(),
            layouts_absent: Vec::new(),
            page_composed: false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum NavigationOutcome {
    /// The whole chain was walked.
    Completed(NavigationReport),
    /// The access gate refused the route; nothing was done.
    Denied,
    /// A newer navigation started first (single-flight mode only).
    Superseded,
}

impl NavigationOutcome {
    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            NavigationOutcome::Completed(_) => "completed",
            NavigationOutcome::Denied => "denied",
            NavigationOutcome::Superseded => "superseded",
        }
    }

    pub fn report(&self) -> Option<&NavigationReport> {
        match self {
            NavigationOutcome::Completed(report) => Some(report),
            _ => None,
        }
    }
}

/// RAII counter of in-flight navigations.
///
/// Decrements on drop, so early returns and errors leave the count right.
pub(crate) struct InFlightGuard {
    counter: Arc<AtomicUsize>,
}

impl InFlightGuard {
    pub(crate) fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self { counter }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}
