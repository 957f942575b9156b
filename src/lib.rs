//! Hash-routed fragment composition library.

pub mod behavior;
pub mod cache;
pub mod compose;
pub mod config;
pub mod dom;
pub mod fetch;
pub mod navigation;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use navigation::{NavigationOutcome, Navigator};
