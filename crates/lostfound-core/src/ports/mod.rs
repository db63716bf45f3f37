//! Ports - trait definitions for the external collaborators.
//! These are the "interfaces" that infrastructure must implement.

mod ai;
mod storage;
mod table;
mod token;

pub use ai::{AiError, AiService, ScanOutcome};
pub use storage::{ImageStorage, StorageError};
pub use table::{Record, RecordPage, Table, TableError, TableService, list_all};
pub use token::{AccessTokenProvider, TokenError};
