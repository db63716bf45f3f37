//! # Lostfound Infrastructure
//!
//! Concrete implementations of the ports defined in `lostfound-core`:
//! the Lark Bitable table-service client with its cached tenant token,
//! the Apps-Script image upload proxy, and the OpenRouter AI client.

pub mod ai;
pub mod lark;
pub mod storage;

pub use ai::{AiConfig, KeyRing, OpenRouterClient};
pub use lark::{BitableClient, LarkConfig, TenantTokenCache};
pub use storage::GasImageStorage;
