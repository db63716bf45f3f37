//! # Lostfound Core
//!
//! The domain layer of the campus lost-and-found backend.
//! This crate contains the posting model, the ports to the external
//! collaborators (table service, image storage, AI completion, token
//! provider), the authorization check, and the submission field mapper.
//! It has zero infrastructure dependencies.

pub mod authz;
pub mod domain;
pub mod error;
pub mod mapper;
pub mod ports;

pub use error::DomainError;
