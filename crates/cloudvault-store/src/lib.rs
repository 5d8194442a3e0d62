//! # cloudvault-store
//!
//! The canonical vault store and everything that operates on it: the
//! mutation engine that keeps the folder tree consistent, the pure view
//! projections used for browsing, and storage accounting.
//!
//! A [`DriveStore`] is plain data; its serde form is exactly the
//! persisted vault blob. All mutation goes through the engine methods so
//! the tree invariants (unique ids, no parent cycles, soft-delete
//! semantics) hold at every step.

pub mod store;
pub mod usage;
pub mod view;

pub use store::DriveStore;
pub use usage::StorageUsage;
pub use view::{Breadcrumb, Listing, RECENT_LIMIT, ROOT_LABEL, ViewMode, ViewRequest};
