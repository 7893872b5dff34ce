//! Action node resolution: from a node id picked off a processed snapshot
//! to a unique, actionable element on the live page.
//!
//! - [`pipe`] is the entry point; one pipe per page, owning the selector cache
//! - [`resolver`] probes selector candidates for uniqueness and live state
//! - [`ports`] defines the page driver abstraction the crate is generic over
//! - [`stub`] is the scripted driver the test suites run against

pub mod cache;
pub mod errors;
pub mod events;
pub mod metrics;
pub mod pipe;
pub mod policy;
pub mod ports;
pub mod resolver;
pub mod stub;
pub mod types;

pub use cache::*;
pub use errors::*;
pub use pipe::*;
pub use policy::*;
pub use ports::*;
pub use resolver::*;
pub use stub::*;
pub use types::*;
