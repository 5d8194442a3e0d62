//! # cloudvault-entity
//!
//! Domain entity models for CloudVault. Every struct in this crate
//! represents a record in a persisted vault or a domain value object.
//! All entities derive `Debug`, `Clone`, `Serialize`, and `Deserialize`;
//! the serde form of a record is exactly its persisted JSON layout.

pub mod content;
pub mod file;
pub mod folder;
pub mod identity;
pub mod item;
pub mod kind;
