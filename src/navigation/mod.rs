//! Navigation subsystem.
//!
//! # Data Flow
//! ```text
//! on_ready / on_hash_change (Trigger)
//!     → gate.rs (AccessGate: allowed?)
//!     → routing::resolve (hash → Route)
//!     → for each layout, root to leaf:
//!           composed already? → skip
//!           FragmentFetcher → Composer → BehaviorLoader (only if composed)
//!     → page: fetch_page (template) → compose(force) → BehaviorLoader
//!     → NavigationOutcome
//! ```
//!
//! # Design Decisions
//! - Levels run strictly in order; the first hard error aborts the rest
//! - Composed ancestors stay in the document after a failure (no rollback)
//! - The document lock is never held across an `.await`
//! - Concurrent navigations interleave unless single-flight mode is on

pub mod controller;
pub mod gate;
pub mod state;

pub use controller::{NavigationError, Navigator};
pub use gate::{AccessGate, AllowAll};
pub use state::{NavState, NavigationOutcome, NavigationReport, Trigger};
