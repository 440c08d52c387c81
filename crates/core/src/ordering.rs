//! Permutation validation for set reordering.
//!
//! A reorder request must supply *exactly* the current item ids of the set:
//! same cardinality, no duplicates, no foreign ids, none missing. The check
//! is a set-equality test between the supplied sequence and the persisted id
//! set; it does not care where the ids came from or how they are stored.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Why a proposed ordering is not a permutation of the current item ids.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PermutationError {
    #[error("order must contain exactly {expected} item ids, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("order contains item id {0} more than once")]
    Duplicate(DbId),

    #[error("order contains unknown item id {0}")]
    Unknown(DbId),
}

impl From<PermutationError> for CoreError {
    fn from(err: PermutationError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

/// Check that `proposed` is a permutation of `current`.
///
/// `current` is assumed to be duplicate-free (item ids are primary keys).
/// On success the caller may assign each id its zero-based index in
/// `proposed` as the new position.
pub fn validate_permutation(current: &[DbId], proposed: &[DbId]) -> Result<(), PermutationError> {
    if proposed.len() != current.len() {
        return Err(PermutationError::LengthMismatch {
            expected: current.len(),
            got: proposed.len(),
        });
    }

    let current_ids: HashSet<DbId> = current.iter().copied().collect();
    let mut seen: HashSet<DbId> = HashSet::with_capacity(proposed.len());

    for &id in proposed {
        if !current_ids.contains(&id) {
            return Err(PermutationError::Unknown(id));
        }
        if !seen.insert(id) {
            return Err(PermutationError::Duplicate(id));
        }
    }

    // Equal length + all known + no duplicates implies nothing is missing.
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_permutation() {
        assert_eq!(validate_permutation(&[1, 2, 3], &[3, 1, 2]), Ok(()));
    }

    #[test]
    fn test_identity_permutation() {
        assert_eq!(validate_permutation(&[7, 8], &[7, 8]), Ok(()));
    }

    #[test]
    fn test_empty_set() {
        assert_eq!(validate_permutation(&[], &[]), Ok(()));
    }

    #[test]
    fn test_missing_id_rejected() {
        let result = validate_permutation(&[1, 2, 3], &[1, 2]);
        assert_eq!(
            result,
            Err(PermutationError::LengthMismatch {
                expected: 3,
                got: 2
            })
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = validate_permutation(&[1, 2, 3], &[1, 2, 2]);
        assert_eq!(result, Err(PermutationError::Duplicate(2)));
    }

    #[test]
    fn test_foreign_id_rejected() {
        let result = validate_permutation(&[1, 2, 3], &[1, 2, 99]);
        assert_eq!(result, Err(PermutationError::Unknown(99)));
    }

    #[test]
    fn test_error_converts_to_validation() {
        let core: CoreError = PermutationError::Unknown(5).into();
        match core {
            CoreError::Validation(msg) => assert!(msg.contains("unknown item id 5")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
