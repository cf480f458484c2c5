//! Session orchestration for the character rules engines.
//!
//! A [`Session`] owns one active character and its equipment engine, shares a
//! read-only class catalog, and logs every mutation through `tracing`.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the session and its builder
//! - [`error`] wraps engine and content failures
//! - [`logging`] installs a subscriber for embedding binaries
pub mod error;
pub mod logging;
pub mod session;

pub use error::{Result, SessionError};
pub use logging::init_tracing;
pub use session::{Session, SessionBuilder, SessionSnapshot};
