// Vehicle request validation
//
// Covers the catalog rules: required labels of 2..=100 characters after
// trimming, and 0 < assessed_value <= configured maximum.

use motortax::core::AppError;
use motortax::vehicles::models::{DEFAULT_MAX_ASSESSED_VALUE, MAX_LABEL_LENGTH, MAX_VALUE_SCALE};
use motortax::vehicles::VehicleRequest;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn request(name: &str, vehicle_type: &str, value: Decimal) -> VehicleRequest {
    VehicleRequest {
        name: Some(name.to_string()),
        vehicle_type: Some(vehicle_type.to_string()),
        assessed_value: Some(value),
    }
}

fn is_validation_error(req: &VehicleRequest) -> bool {
    matches!(
        req.validate(DEFAULT_MAX_ASSESSED_VALUE),
        Err(AppError::Validation(_))
    )
}

#[test]
fn test_default_upper_bound_is_one_billion() {
    assert_eq!(DEFAULT_MAX_ASSESSED_VALUE, dec!(1000000000));
}

#[test]
fn test_blank_name_rejected() {
    assert!(is_validation_error(&request("   ", "Matic", dec!(1000))));
}

#[test]
fn test_single_character_type_rejected() {
    assert!(is_validation_error(&request("Beat", "M", dec!(1000))));
}

#[test]
fn test_overlong_name_rejected() {
    let name = "x".repeat(MAX_LABEL_LENGTH + 1);
    assert!(is_validation_error(&request(&name, "Matic", dec!(1000))));
}

#[test]
fn test_missing_value_rejected() {
    let req = VehicleRequest {
        name: Some("Beat".to_string()),
        vehicle_type: Some("Matic".to_string()),
        assessed_value: None,
    };
    assert!(is_validation_error(&req));
}

#[test]
fn test_custom_maximum_respected() {
    let req = request("Beat", "Matic", dec!(500));
    assert!(req.validate(dec!(499)).is_err());
    assert!(req.validate(dec!(500)).is_ok());
}

#[test]
fn test_fractional_value_accepted() {
    let draft = request("Beat", "Matic", dec!(0.01))
        .validate(DEFAULT_MAX_ASSESSED_VALUE)
        .unwrap();
    assert_eq!(draft.assessed_value, dec!(0.01));
}

#[test]
fn test_value_beyond_four_decimal_places_rejected() {
    assert_eq!(MAX_VALUE_SCALE, 4);
    assert!(is_validation_error(&request("Beat", "Matic", dec!(1000.00001))));
    assert!(is_validation_error(&request("Beat", "Matic", dec!(0.00005))));
    assert!(!is_validation_error(&request("Beat", "Matic", dec!(1000.0001))));
    assert!(!is_validation_error(&request("Beat", "Matic", dec!(1000.100000))));
}

proptest! {
    #[test]
    fn test_values_in_range_accepted(value in 1i64..=1_000_000_000i64) {
        let req = request("Beat", "Matic", Decimal::from(value));
        prop_assert!(req.validate(DEFAULT_MAX_ASSESSED_VALUE).is_ok());
    }

    #[test]
    fn test_values_above_range_rejected(excess in 1i64..1_000_000_000i64) {
        let req = request("Beat", "Matic", DEFAULT_MAX_ASSESSED_VALUE + Decimal::from(excess));
        prop_assert!(is_validation_error(&req));
    }

    #[test]
    fn test_stored_precision_is_never_exceeded(units in 1i64..1_000_000_000i64, scale in 0u32..8u32) {
        let value = Decimal::new(units, scale);
        let accepted = !is_validation_error(&request("Beat", "Matic", value));
        prop_assert_eq!(accepted, value.normalize().scale() <= MAX_VALUE_SCALE);
    }

    #[test]
    fn test_names_are_trimmed(name in "[A-Za-z0-9]{2,20}", pad in 0usize..5) {
        let padded = format!("{}{}{}", " ".repeat(pad), name, " ".repeat(pad));
        let draft = request(&padded, "Matic", dec!(1000))
            .validate(DEFAULT_MAX_ASSESSED_VALUE)
            .unwrap();
        prop_assert_eq!(draft.name, name);
    }
}
