//! Todo list client: data access, REST transport, and per-view controllers.
//!
//! [`controller::TodoListController`] owns the loading/pagination state of
//! one list view and talks to the backend through the
//! [`data_access::TodoDataAccess`] trait, implemented over HTTP by
//! [`api::TodoApi`].

pub mod api;
pub mod command;
pub mod config;
pub mod controller;
pub mod data_access;
pub mod error;
