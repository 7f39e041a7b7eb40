//! Validation rules for convention payloads.
//!
//! Field-level checks plug into the `validator` derive; the cross-field rules
//! that span several fields (window ordering, the default-price/flat-rate
//! coupling, monthly overrides) live in [`check_upsert_rules`], which the
//! orchestrator runs before touching storage.

use rust_decimal::Decimal;
use validator::{Validate, ValidationError};

use crate::errors::UpsertError;
use crate::models::UpsertConventionRequest;

/// Validates that a price value is strictly positive.
pub fn validate_positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price > Decimal::ZERO {
        Ok(())
    } else {
        let mut err = ValidationError::new("price_positive");
        err.message = Some("Price must be greater than zero".into());
        Err(err)
    }
}

/// Validates that a discount percentage is within 0 to 100.
pub fn validate_discount_percent(percent: &Decimal) -> Result<(), ValidationError> {
    if *percent >= Decimal::ZERO && *percent <= Decimal::ONE_HUNDRED {
        Ok(())
    } else {
        let mut err = ValidationError::new("discount_range");
        err.message = Some("Discount percent must be between 0 and 100".into());
        Err(err)
    }
}

/// Runs the full validation gate for an upsert payload.
///
/// Fails fast with every violation collected into one message; nothing is
/// written when this returns an error.
pub fn check_upsert_rules(input: &UpsertConventionRequest) -> Result<(), UpsertError> {
    let mut violations: Vec<String> = Vec::new();

    if let Err(errors) = input.validate() {
        for (field, field_errors) in errors.field_errors() {
            for err in field_errors {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                violations.push(format!("{}: {}", field, message));
            }
        }
    }

    if let Some(end) = input.validity_end {
        if input.validity_start > end {
            violations.push("validityStart: must not be after validityEnd".to_string());
        }
    }

    // In flat-package mode the default price is carried but never consulted,
    // so its positivity is only enforced for per-night pricing.
    if input.flat_monthly_rate.is_none() && input.default_price <= Decimal::ZERO {
        violations.push("defaultPrice: must be greater than zero".to_string());
    }

    for (month, value) in input.monthly_prices.set_entries() {
        if value <= Decimal::ZERO {
            violations.push(format!("monthlyPrices.{}: must be greater than zero", month));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(UpsertError::Validation(violations.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonthlyPrices;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_request() -> UpsertConventionRequest {
        UpsertConventionRequest {
            id: None,
            client_id: 11,
            category_id: 1,
            hotel_id: None,
            validity_start: date(2024, 1, 1),
            validity_end: Some(date(2024, 12, 31)),
            default_price: dec!(100),
            monthly_prices: MonthlyPrices::default(),
            discount_percent: None,
            flat_monthly_rate: None,
            notes: None,
            active: true,
        }
    }

    #[test]
    fn test_validate_positive_price() {
        assert!(validate_positive_price(&dec!(0.01)).is_ok());
        assert!(validate_positive_price(&dec!(100)).is_ok());
        assert!(validate_positive_price(&Decimal::ZERO).is_err());
        assert!(validate_positive_price(&dec!(-5)).is_err());
    }

    #[test]
    fn test_validate_discount_percent() {
        assert!(validate_discount_percent(&Decimal::ZERO).is_ok());
        assert!(validate_discount_percent(&dec!(15.5)).is_ok());
        assert!(validate_discount_percent(&Decimal::ONE_HUNDRED).is_ok());
        assert!(validate_discount_percent(&dec!(100.01)).is_err());
        assert!(validate_discount_percent(&dec!(-1)).is_err());
    }

    #[test]
    fn test_check_upsert_rules_accepts_valid_request() {
        assert!(check_upsert_rules(&valid_request()).is_ok());
    }

    #[test]
    fn test_check_upsert_rules_rejects_inverted_window() {
        let mut request = valid_request();
        request.validity_start = date(2025, 1, 1);
        request.validity_end = Some(date(2024, 1, 1));

        let err = check_upsert_rules(&request).unwrap_err();
        assert!(err.to_string().contains("validityStart"));
    }

    #[test]
    fn test_check_upsert_rules_open_ended_window_is_valid() {
        let mut request = valid_request();
        request.validity_end = None;
        assert!(check_upsert_rules(&request).is_ok());
    }

    #[test]
    fn test_check_upsert_rules_rejects_non_positive_default_price() {
        let mut request = valid_request();
        request.default_price = Decimal::ZERO;

        let err = check_upsert_rules(&request).unwrap_err();
        assert!(err.to_string().contains("defaultPrice"));
    }

    #[test]
    fn test_check_upsert_rules_default_price_ignored_in_flat_mode() {
        let mut request = valid_request();
        request.default_price = Decimal::ZERO;
        request.flat_monthly_rate = Some(dec!(1800));

        assert!(check_upsert_rules(&request).is_ok());
    }

    #[test]
    fn test_check_upsert_rules_rejects_non_positive_flat_rate() {
        let mut request = valid_request();
        request.flat_monthly_rate = Some(Decimal::ZERO);

        let err = check_upsert_rules(&request).unwrap_err();
        assert!(err.to_string().contains("flat_monthly_rate"));
    }

    #[test]
    fn test_check_upsert_rules_rejects_non_positive_monthly_override() {
        let mut request = valid_request();
        request.monthly_prices.july = Some(dec!(-10));

        let err = check_upsert_rules(&request).unwrap_err();
        assert!(err.to_string().contains("monthlyPrices.july"));
    }

    #[test]
    fn test_check_upsert_rules_rejects_out_of_range_discount() {
        let mut request = valid_request();
        request.discount_percent = Some(dec!(120));

        let err = check_upsert_rules(&request).unwrap_err();
        assert!(err.to_string().contains("discount_percent"));
    }

    #[test]
    fn test_check_upsert_rules_collects_multiple_violations() {
        let mut request = valid_request();
        request.default_price = dec!(-1);
        request.monthly_prices.january = Some(Decimal::ZERO);

        let err = check_upsert_rules(&request).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("defaultPrice"));
        assert!(message.contains("monthlyPrices.january"));
    }
}
