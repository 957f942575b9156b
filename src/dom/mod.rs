//! In-memory document model.
//!
//! # Data Flow
//! ```text
//! fetched HTML text
//!     → parse.rs (tolerant fragment parser)
//!     → Fragment (owned, detached tree)
//!     → Document::replace_with (spliced into the arena)
//!     → serialize.rs (document / fragment → HTML)
//! ```
//!
//! # Design Decisions
//! - The document is an arena of nodes addressed by `NodeId`
//! - Removed subtrees free their slots for reuse
//! - Text and attribute values are kept verbatim (no entity decoding)
//! - No validation or sanitization of fetched markup

pub mod document;
pub mod fragment;
pub mod node;
pub mod parse;
pub mod serialize;

pub use document::{Document, DomError};
pub use fragment::{Fragment, FragmentNode};
pub use node::{ElementData, NodeData, NodeId};
