//! Error types for sequence and map extensions.

use thiserror::Error;

/// Errors raised by the sequence and map extensions.
///
/// "Not found" is never an error: accessors return the caller's default
/// instead. Errors are reserved for cardinality violations, mismatched
/// lengths and duplicate keys.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeqError {
    /// The sequence was empty where at least one element is required
    #[error("Sequence contains no elements")]
    NoElements,

    /// The sequence held more than one element where at most one is allowed
    #[error("Sequence contains more than one element")]
    MoreThanOneElement,

    /// More than one element satisfied the predicate
    #[error("Sequence contains more than one matching element")]
    MoreThanOneMatch,

    /// Two sequences zipped strictly had different lengths
    #[error("Sequence length mismatch: left has {left} elements, right has {right}")]
    LengthMismatch {
        /// Number of elements yielded by the left sequence
        left: usize,
        /// Number of elements yielded by the right sequence
        right: usize,
    },

    /// The key is already present in the map
    #[error("An item with the same key has already been added")]
    DuplicateKey,
}

impl SeqError {
    /// Returns `true` if the sequence was empty.
    pub fn is_no_elements(&self) -> bool {
        matches!(self, SeqError::NoElements)
    }

    /// Returns `true` for the "more than one" family of errors.
    pub fn is_cardinality(&self) -> bool {
        matches!(
            self,
            SeqError::MoreThanOneElement | SeqError::MoreThanOneMatch
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MapExt, SequenceExt, ZipExt};
    use std::collections::HashMap;

    #[test]
    fn test_every_variant_is_produced_by_an_operation() {
        let mut map = HashMap::new();
        map.insert(1, 'a');

        let produced = vec![
            Vec::<i32>::new().into_iter().single().unwrap_err(),
            vec![1, 2].into_iter().single_or(0).unwrap_err(),
            vec![2, 4].into_iter().single_where_or(|v| v % 2 == 0, 0).unwrap_err(),
            vec![1].into_iter().zip_strict(Vec::<i32>::new()).unwrap_err(),
            map.try_add(1, 'b').unwrap_err(),
        ];

        for err in produced {
            match err {
                SeqError::NoElements
                | SeqError::MoreThanOneElement
                | SeqError::MoreThanOneMatch
                | SeqError::LengthMismatch { .. }
                | SeqError::DuplicateKey => {}
            }
        }
    }

    #[test]
    fn test_cardinality_classification() {
        assert!(SeqError::MoreThanOneElement.is_cardinality());
        assert!(SeqError::MoreThanOneMatch.is_cardinality());
        assert!(!SeqError::NoElements.is_cardinality());
        assert!(SeqError::NoElements.is_no_elements());
    }

    #[test]
    fn test_length_mismatch_message() {
        let err = SeqError::LengthMismatch { left: 3, right: 1 };
        assert_eq!(
            err.to_string(),
            "Sequence length mismatch: left has 3 elements, right has 1"
        );
    }
}
