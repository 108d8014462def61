//! Source index: cached, read-only access to repository files.

pub mod line_index;
pub mod source_index;

pub use line_index::LineIndex;
pub use source_index::{normalize_lexically, SourceIndex};
