//! Session-scoped caches.
//!
//! # Design Decisions
//! - Absence is cached, presence is not (fragments are fetched on demand)
//! - Entries live for the whole session; a reload starts a fresh cache
//! - The cache is a handle: clones share the same set

pub mod absence;

pub use absence::AbsenceCache;
