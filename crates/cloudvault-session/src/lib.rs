//! # cloudvault-session
//!
//! The session layer of CloudVault: a [`DriveSession`] owns the active
//! vault and linked identity, re-exposes every engine operation with
//! save-on-change scheduling, and routes all persistence through one
//! background saver task.
//!
//! Saves are delayed and coalescing: a burst of mutations commits the
//! latest snapshot once, last-write-wins, with an `is_saving` signal
//! that spans from scheduling to commit.

pub mod saver;
pub mod session;

pub use saver::Saver;
pub use session::DriveSession;
