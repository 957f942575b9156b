//! Router metrics.
//!
//! # Metrics
//! - `router_fetch_total` (counter): fragment fetches and script probes by kind, outcome
//! - `router_absence_hits_total` (counter): requests answered from the absence cache
//! - `router_absent_paths` (gauge): size of the absence cache
//! - `router_compositions_total` (counter): composed fragments by kind
//! - `router_navigations_total` (counter): finished navigations by outcome
//! - `router_navigation_duration_seconds` (histogram): full chain walk latency

use std::time::Duration;

use metrics::{counter, gauge, histogram};

pub fn record_fetch(kind: &'static str, outcome: &'static str) {
    counter!("router_fetch_total", "kind" => kind, "outcome" => outcome).increment(1);
}

pub fn record_absence_hit(kind: &'static str) {
    counter!("router_absence_hits_total", "kind" => kind).increment(1);
}

pub fn record_absent_paths(count: usize) {
    gauge!("router_absent_paths").set(count as f64);
}

pub fn record_composition(kind: &'static str) {
    counter!("router_compositions_total", "kind" => kind).increment(1);
}

pub fn record_navigation(outcome: &'static str, duration: Duration) {
    counter!("router_navigations_total", "outcome" => outcome).increment(1);
    histogram!("router_navigation_duration_seconds").record(duration.as_secs_f64());
}
