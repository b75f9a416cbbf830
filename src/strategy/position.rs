//! Position sizing

use crate::{ArbitrageError, Result};

/// Sizes a hypothetical position from capital and an allocation percentage
pub struct PositionSizer;

impl PositionSizer {
    /// Quantity to commit: `capital × allocation_percent / 100`.
    ///
    /// # Errors
    /// Fails with `InvalidAllocation` when `allocation_percent` lies outside
    /// `[0, 100]` — a configuration error, fatal to the call only.
    pub fn size(capital: f64, allocation_percent: f64) -> Result<f64> {
        if !(0.0..=100.0).contains(&allocation_percent) {
            return Err(ArbitrageError::InvalidAllocation(allocation_percent).into());
        }

        Ok(capital * allocation_percent / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_basic() {
        assert_eq!(PositionSizer::size(10000.0, 1.0).unwrap(), 100.0);
        assert_eq!(PositionSizer::size(50.0, 50.0).unwrap(), 25.0);
    }

    #[test]
    fn test_size_bounds() {
        assert_eq!(PositionSizer::size(10000.0, 0.0).unwrap(), 0.0);
        assert_eq!(PositionSizer::size(10000.0, 100.0).unwrap(), 10000.0);
    }

    #[test]
    fn test_size_rejects_out_of_range_allocation() {
        let err = PositionSizer::size(10000.0, 150.0).unwrap_err();
        let err = err.downcast::<ArbitrageError>().unwrap();
        assert!(matches!(err, ArbitrageError::InvalidAllocation(a) if a == 150.0));

        assert!(PositionSizer::size(10000.0, -1.0).is_err());
    }
}
