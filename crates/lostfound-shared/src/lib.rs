//! # Lostfound Shared
//!
//! Wire types shared between the frontend and the backend: the
//! uniform response envelope and the per-action DTOs.

pub mod dto;
pub mod response;

pub use response::ErrorBody;
