//! Fragment and script retrieval.
//!
//! # Data Flow
//! ```text
//! route path ("/routes/users/+layout.html")
//!     → locator.rs (origin + path, '+' encoding rule)
//!     → client.rs (absence cache check, GET / HEAD, absence recording)
//!     → transport.rs (Transport trait)
//!         → http.rs   (reqwest, production)
//!         → memory.rs (in-memory files, tests and embedding)
//!     → fragment.rs (template pass, HTML parse)
//! ```
//!
//! # Design Decisions
//! - A non-success status is a confirmed absence and is cached
//! - Transport failures are errors and are never cached
//! - No retries and no implicit timeouts

pub mod client;
pub mod error;
pub mod fragment;
pub mod http;
pub mod locator;
pub mod memory;
pub mod transport;

pub use client::AssetClient;
pub use error::FetchError;
pub use fragment::FragmentFetcher;
pub use http::HttpTransport;
pub use locator::AssetLocator;
pub use memory::MemoryTransport;
pub use transport::{Transport, TransportResponse};
