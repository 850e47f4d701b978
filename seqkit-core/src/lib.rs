//! # Seqkit Core
//!
//! Extension traits for iterators and maps.
//!
//! ## Features
//!
//! - Accessors that return a caller-supplied default instead of failing
//!   (`first_or`, `last_or`, `single_or`, ...)
//! - Cardinality checks reported as [`SeqError`] values, never panics
//! - Min/max with custom comparers, by-key variants and a NaN-aware float family
//! - `distinct_by`, slicing, zip helpers and reordering by a reference sequence
//! - Comparers ([`Natural`], [`Inverse`], [`ByKey`]) and scope guards
//!
//! ## Example
//!
//! ```rust
//! use seqkit_core::{ExtremaExt, SequenceExt, ZipExt};
//!
//! let scores = vec![("ann", 7), ("bob", 3), ("cid", 7)];
//!
//! // First match or a default
//! let best = scores.iter().first_where_or(|s| s.1 > 5, &("nobody", 0));
//! assert_eq!(best.0, "ann");
//!
//! // By-key extrema keep the first element on ties
//! let top = scores.iter().max_by_key_first(|s| s.1).unwrap();
//! assert_eq!(top.0, "ann");
//!
//! // Unique by score, in first-seen order
//! let unique: Vec<_> = scores.iter().distinct_by(|s| s.1).map(|s| s.0).collect();
//! assert_eq!(unique, vec!["ann", "bob"]);
//!
//! // Strict zip reports mismatched lengths
//! assert!(vec![1, 2].into_iter().zip_strict(vec![1]).is_err());
//! ```

mod comparer;
mod error;
mod extrema;
mod map;
mod scope;
mod sequence;
mod zip;

pub use comparer::{ByKey, Comparer, Inverse, Natural};
pub use error::SeqError;
pub use extrema::{ExtremaExt, FloatExtremaExt, MinMax, PresentExtremaExt};
pub use map::MapExt;
pub use scope::{DisposeScope, ScopeGuard};
pub use sequence::{DistinctBy, SequenceExt};
pub use zip::{ZipExt, ZipItem, ZipLongest};
