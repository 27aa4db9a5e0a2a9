//! Input validation helpers
//!
//! Centralized quantity bounds shared by cart mutations. Checkout carries
//! the same bounds on its request DTO.

use shared::error::{AppError, AppResult, ErrorCode};

/// Maximum allowed quantity per cart line / order line
pub const MAX_LINE_QUANTITY: i64 = 9_999;

/// Validate a quantity being added to a cart (must buy at least one unit).
pub fn validate_add_quantity(quantity: i64) -> AppResult<()> {
    if quantity < 1 {
        return Err(AppError::with_message(
            ErrorCode::CartQuantityInvalid,
            "Quantity must be at least 1",
        ));
    }
    validate_quantity_cap(quantity)
}

/// Validate a quantity update (0 means remove, negatives are rejected).
pub fn validate_set_quantity(quantity: i64) -> AppResult<()> {
    if quantity < 0 {
        return Err(AppError::with_message(
            ErrorCode::CartQuantityInvalid,
            "Quantity must not be negative",
        ));
    }
    validate_quantity_cap(quantity)
}

fn validate_quantity_cap(quantity: i64) -> AppResult<()> {
    if quantity > MAX_LINE_QUANTITY {
        return Err(AppError::with_message(
            ErrorCode::CartQuantityInvalid,
            format!("Quantity exceeds maximum allowed ({MAX_LINE_QUANTITY})"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn test_add_quantity_bounds() {
        assert!(validate_add_quantity(1).is_ok());
        assert!(validate_add_quantity(9_999).is_ok());
        assert_eq!(
            validate_add_quantity(0).unwrap_err().code,
            ErrorCode::CartQuantityInvalid
        );
        assert_eq!(
            validate_add_quantity(10_000).unwrap_err().code,
            ErrorCode::CartQuantityInvalid
        );
    }

    #[test]
    fn test_set_quantity_allows_zero() {
        assert!(validate_set_quantity(0).is_ok());
        assert!(validate_set_quantity(5).is_ok());
        assert_eq!(
            validate_set_quantity(-1).unwrap_err().code,
            ErrorCode::CartQuantityInvalid
        );
    }
}
