//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! location hash ("#/users/42")
//!     → resolver.rs (split, classify numeric segments)
//!     → Route { segments, params, chain }
//!     → chain directories → +layout.html / +page.html / .js paths
//!
//! Page rendering:
//!     page HTML text
//!     → template.rs ([name] → params[name])
//!     → fragment parser
//! ```
//!
//! # Design Decisions
//! - Resolution is pure: same hash always yields the same route
//! - Only one reserved parameter (`id`); the last numeric segment wins
//! - No regex in resolution, only in the page template pass

pub mod resolver;
pub mod template;

pub use resolver::{
    layout_fragment_path, page_fragment_path, parent_dir, resolve, resolve_with_base,
    script_path, ParamValue, Params, PathChain, Route, DEFAULT_BASE_PATH, ID_PARAM,
    ID_PLACEHOLDER,
};
pub use template::substitute;
