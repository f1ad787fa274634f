//! Single-user task tracker persisted as a JSON file.
//!
//! [`store::Store`] loads and saves the whole task collection; [`ops`]
//! implements add, list, update, and delete on top of it.

pub mod error;
pub mod model;
pub mod ops;
pub mod output;
pub mod paths;
pub mod store;

pub use error::{Error, Result};
