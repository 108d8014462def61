//! Re-exports of performance-oriented collection types.

pub use rustc_hash::FxHashMap;
pub use smallvec::SmallVec;
pub use std::collections::{BTreeMap, BTreeSet};

/// SmallVec sized for finding tags (usually <4).
pub type SmallVec4<T> = SmallVec<[T; 4]>;
