//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → handed to Navigator::new
//!
//! CLI flags (--origin, --log-level) override file values before validation.
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a new session needs a new config
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    DocumentConfig, HttpConfig, NavigationConfig, ObservabilityConfig, RouterConfig,
    RoutingConfig, SiteConfig,
};
pub use validation::{validate_config, ValidationError};
