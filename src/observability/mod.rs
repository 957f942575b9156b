//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields, per-navigation span)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, env filter)
//!     → whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Every navigation runs inside a span carrying its UUID
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
