use bigdecimal::BigDecimal;

use super::errors::DomainError;

/// Money columns are `NUMERIC(12, 2)`.
pub const SCALE: i64 = 2;
pub const MAX_ABS: i64 = 10_000_000_000;

/// Rejects amounts the money columns cannot hold: more than two decimal
/// places, or ten or more integer digits.
pub fn ensure_storable(value: &BigDecimal, field: &str) -> Result<(), DomainError> {
    if value.with_scale(SCALE) != *value {
        return Err(DomainError::invalid(format!(
            "{} must have at most {} decimal places",
            field, SCALE
        )));
    }
    if value.abs() >= BigDecimal::from(MAX_ABS) {
        return Err(DomainError::invalid(format!(
            "{} must be less than {}",
            field, MAX_ABS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn accepts_column_sized_amounts() {
        for ok in ["0", "12.5", "10.00", "9999999999.99", "-3.10"] {
            assert!(ensure_storable(&dec(ok), "price").is_ok(), "{}", ok);
        }
    }

    #[test]
    fn rejects_overflowing_magnitude() {
        let err = ensure_storable(&dec("1e20"), "total_amount").unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(msg) if msg.starts_with("total_amount")));
        assert!(ensure_storable(&dec("10000000000"), "price").is_err());
    }

    #[test]
    fn rejects_extra_decimal_places() {
        assert!(ensure_storable(&dec("1.005"), "price").is_err());
    }
}
