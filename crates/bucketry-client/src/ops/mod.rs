//! Client operations.
//!
//! Implementations of the client's public operations, organized into
//! submodules by concern. Each submodule adds methods to
//! [`crate::client::ObjectClient`].

pub mod bucket;
pub mod inventory;
pub mod list;
pub mod transfer;
