//! Domain types and pure view-state derivation for todo lists.
//!
//! Nothing in this crate performs I/O; the client crate feeds it records
//! fetched from the backend.

pub mod error;
pub mod pagination;
pub mod presentation;
pub mod scope;
pub mod sort_policy;
pub mod todo;
pub mod types;
