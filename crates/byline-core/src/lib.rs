//! # Byline Core
//!
//! The domain layer of the Byline blog service.
//! This crate contains the entity model, the error taxonomy, and the
//! repository ports. It has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::RepoError;
