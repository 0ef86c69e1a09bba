//! Client-side state and action layer for the Habbofutbol league backend.
//!
//! The [`store::Store`] owns the session and every cached collection, and is the only place
//! that talks to the REST backend. Front-ends read its state and call its actions.

/// Request/response types, the transport seam and the backend models.
pub mod api;
/// Configuration loaded from the environment.
pub mod config;
/// Contains functions for logging.
pub mod log;
/// Persistence of the session between runs.
pub mod session;
/// The state container and all of its actions.
pub mod store;

pub mod utils;

/// A thread-safe Error type used for internal plumbing.
///
/// Actions never hand this to their callers; it is logged and turned into an
/// [`store::ActionResult`] or an emptied cache.
pub type ClientError = anyhow::Error;
