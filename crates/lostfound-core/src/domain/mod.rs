//! Domain entities - the posting model and raw submissions.

mod posting;
mod submission;

pub use posting::{PostType, ReviewStatus, canonical_category, canonical_group, fields, user_fields};
pub use submission::Submission;
