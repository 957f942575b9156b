//! Document composition.
//!
//! # Data Flow
//! ```text
//! (path, fragment, force)
//!     → idempotence check (already composed and not forced → skip)
//!     → outline.rs (Document → tree of composed nodes + placeholder)
//!     → outline::locate (insertion point, "closest relative")
//!     → composer.rs apply (tag fragment root, replace insertion point)
//! ```
//!
//! # Design Decisions
//! - The locating step is pure over the outline; only apply mutates
//! - Replacement is whole-subtree; no merging or patching
//! - No insertion point in a non-empty document is a hard error

pub mod composer;
pub mod outline;

pub use composer::{ComposeError, Composer};
pub use outline::{locate, InsertionPoint, Outline, OutlineNode};
