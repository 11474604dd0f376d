//! Flat input encoding
//!
//! A system is presented as one flat `f64` sequence: the first element
//! is `n` (a positive integer stored as a float), followed by exactly
//! `n * (n+1)` values laid out row-major as the augmented matrix.
//! Validation is local and happens before any communication.

use vstripe_matrix::AugmentedMatrix;

use crate::error::{HarnessError, Result};

/// Parse the flat encoding into an augmented matrix.
pub fn parse(input: &[f64]) -> Result<AugmentedMatrix> {
    let &[head, ref rest @ ..] = input else {
        return Err(HarnessError::EmptyInput);
    };
    if head <= 0.0 || head.fract() != 0.0 {
        return Err(HarnessError::InvalidDimension(head));
    }
    let n = head as usize;
    // A huge integral value saturates the cast; checked arithmetic
    // turns it into a rejection instead of an overflow.
    let expected = n
        .checked_add(1)
        .and_then(|cols| n.checked_mul(cols))
        .ok_or(HarnessError::InvalidDimension(head))?;
    if rest.len() != expected {
        return Err(HarnessError::LengthMismatch {
            expected: 1 + expected,
            got: input.len(),
        });
    }
    Ok(AugmentedMatrix::from_flat(n, rest)?)
}

/// Shape check used by the lifecycle validation stage. Pure: calling it
/// repeatedly on the same input always yields the same answer.
pub fn validate(input: &[f64]) -> bool {
    parse(input).is_ok()
}

/// Encode `n` and a row-major augmented matrix buffer into the flat
/// input form. Test and demo helper; performs no validation.
pub fn encode(n: usize, values: &[f64]) -> Vec<f64> {
    let mut flat = Vec::with_capacity(1 + values.len());
    flat.push(n as f64);
    flat.extend_from_slice(values);
    flat
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_input() {
        let input = encode(2, &[2.0, 1.0, 5.0, 1.0, 3.0, 5.0]);
        let m = parse(&input).unwrap();
        assert_eq!(m.n(), 2);
        assert_eq!(m.get(1, 2), 5.0);
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(parse(&[]), Err(HarnessError::EmptyInput)));
    }

    #[test]
    fn test_rejects_bad_dimension() {
        assert!(matches!(
            parse(&[0.0]),
            Err(HarnessError::InvalidDimension(_))
        ));
        assert!(matches!(
            parse(&[-3.0, 1.0]),
            Err(HarnessError::InvalidDimension(_))
        ));
        assert!(matches!(
            parse(&[1.5, 1.0, 2.0, 3.0]),
            Err(HarnessError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_dimension() {
        // Integral but far beyond any allocatable system; must come
        // back as a rejection, not an arithmetic overflow.
        assert!(matches!(
            parse(&[1e30, 1.0]),
            Err(HarnessError::InvalidDimension(_))
        ));
        assert!(!validate(&[1e30, 1.0]));
        assert!(!validate(&[usize::MAX as f64, 1.0]));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        // n = 2 needs 1 + 6 values.
        assert!(matches!(
            parse(&[2.0, 1.0, 1.0]),
            Err(HarnessError::LengthMismatch { expected: 7, got: 3 })
        ));
    }

    #[test]
    fn test_validate_is_idempotent() {
        let good = encode(1, &[2.0, 4.0]);
        let bad = vec![2.0, 1.0];
        assert_eq!(validate(&good), validate(&good));
        assert_eq!(validate(&bad), validate(&bad));
        assert!(validate(&good));
        assert!(!validate(&bad));
    }
}
