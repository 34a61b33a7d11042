// Property-based tests for the progressive tax engine
//
// Amounts are generated as whole rupiah or with two decimal places so every
// intermediate product stays exact in Decimal.

use motortax::core::AppError;
use motortax::taxes::{OwnershipRank, TaxCalculator};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn rank(n: u32) -> OwnershipRank {
    OwnershipRank::new(n).unwrap()
}

fn value_from_cents(cents: u64) -> Decimal {
    Decimal::new(cents as i64, 2)
}

proptest! {
    #[test]
    fn test_first_ownership_has_no_surcharge(cents in 1u64..100_000_000_000u64) {
        let result = TaxCalculator::new()
            .compute_tax(value_from_cents(cents), OwnershipRank::FIRST)
            .unwrap();

        prop_assert_eq!(result.progressive_surcharge, Decimal::ZERO);
        prop_assert_eq!(result.base_rate, dec!(16));
    }

    #[test]
    fn test_base_rate_grows_eight_points_per_rank(
        cents in 1u64..100_000_000_000u64,
        k in 1u32..500u32
    ) {
        let result = TaxCalculator::new()
            .compute_tax(value_from_cents(cents), rank(k))
            .unwrap();

        let expected = dec!(16) + dec!(8) * Decimal::from(k - 1);
        prop_assert_eq!(result.base_rate, expected);
    }

    #[test]
    fn test_total_is_vehicle_tax_plus_fixed_fees(
        cents in 1u64..100_000_000_000u64,
        k in 1u32..50u32
    ) {
        let result = TaxCalculator::new()
            .compute_tax(value_from_cents(cents), rank(k))
            .unwrap();

        prop_assert_eq!(
            result.total_tax,
            result.vehicle_tax + dec!(35000) + dec!(100000) + dec!(60000)
        );
        prop_assert_eq!(result.fixed_fees(), dec!(195000));
    }

    #[test]
    fn test_surcharge_is_difference_from_first_ownership(
        cents in 1u64..100_000_000_000u64,
        k in 1u32..50u32
    ) {
        let result = TaxCalculator::new()
            .compute_tax(value_from_cents(cents), rank(k))
            .unwrap();

        prop_assert_eq!(
            result.progressive_surcharge,
            result.vehicle_tax - result.transfer_fee * dec!(0.16)
        );
        prop_assert_eq!(result.transfer_fee, result.assessed_value * dec!(0.125));
    }

    #[test]
    fn test_total_strictly_increases_with_rank(
        cents in 1u64..100_000_000_000u64,
        k in 1u32..100u32
    ) {
        let calculator = TaxCalculator::new();
        let value = value_from_cents(cents);

        let lower = calculator.compute_tax(value, rank(k)).unwrap();
        let higher = calculator.compute_tax(value, rank(k + 1)).unwrap();

        prop_assert!(
            higher.total_tax > lower.total_tax,
            "total at rank {} ({}) should exceed rank {} ({})",
            k + 1, higher.total_tax, k, lower.total_tax
        );
    }

    #[test]
    fn test_vehicle_tax_is_linear_in_value(
        cents in 1u64..50_000_000_000u64,
        k in 1u32..50u32
    ) {
        let calculator = TaxCalculator::new();
        let value = value_from_cents(cents);

        let single = calculator.compute_tax(value, rank(k)).unwrap();
        let double = calculator.compute_tax(value * dec!(2), rank(k)).unwrap();

        prop_assert_eq!(double.vehicle_tax, single.vehicle_tax * dec!(2));
    }

    #[test]
    fn test_calculation_is_deterministic(
        cents in 1u64..100_000_000_000u64,
        k in 1u32..50u32
    ) {
        let calculator = TaxCalculator::new();
        let value = value_from_cents(cents);

        let first = calculator.compute_tax(value, rank(k)).unwrap();
        let second = calculator.compute_tax(value, rank(k)).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_breakdown_is_exact_or_rejected(
        mantissa in 1i128..79_228_162_514_264_337_593_543_950_335i128,
        scale in 0u32..=28u32,
        k in 1u32..20u32
    ) {
        let value = Decimal::from_i128_with_scale(mantissa, scale);
        match TaxCalculator::new().compute_tax(value, rank(k)) {
            Ok(result) => {
                prop_assert_eq!(result.transfer_fee * dec!(8), value);
                prop_assert_eq!(result.total_tax - result.vehicle_tax, dec!(195000));
            }
            Err(err) => prop_assert!(matches!(err, AppError::Validation(_))),
        }
    }

    #[test]
    fn test_non_positive_values_rejected(cents in 0u64..100_000_000u64) {
        let value = -value_from_cents(cents);
        prop_assert!(TaxCalculator::new().compute_tax(value, OwnershipRank::FIRST).is_err());
    }
}

#[test]
fn test_reference_scenarios() {
    let calculator = TaxCalculator::new();
    let cases = [
        (1, dec!(16), dec!(360000), dec!(0), dec!(555000)),
        (2, dec!(24), dec!(540000), dec!(180000), dec!(735000)),
        (3, dec!(32), dec!(720000), dec!(360000), dec!(915000)),
    ];

    for (k, rate, vehicle_tax, surcharge, total) in cases {
        let result = calculator.compute_tax(dec!(18000000), rank(k)).unwrap();
        assert_eq!(result.transfer_fee, dec!(2250000), "rank {}", k);
        assert_eq!(result.base_rate, rate, "rank {}", k);
        assert_eq!(result.vehicle_tax, vehicle_tax, "rank {}", k);
        assert_eq!(result.progressive_surcharge, surcharge, "rank {}", k);
        assert_eq!(result.total_tax, total, "rank {}", k);
    }
}

#[test]
fn test_values_beyond_decimal_precision_rejected() {
    let calculator = TaxCalculator::new();
    for value in [dec!(0.0000000000000000000000000001), dec!(123456789012345678901234567.1)] {
        for k in [1, 2, 5] {
            assert!(
                matches!(calculator.compute_tax(value, rank(k)), Err(AppError::Validation(_))),
                "value {} rank {}",
                value,
                k
            );
        }
    }
}

#[test]
fn test_rank_one_hundred_has_no_ceiling() {
    let result = TaxCalculator::new()
        .compute_tax(dec!(18000000), rank(100))
        .unwrap();
    assert_eq!(result.base_rate, dec!(808));
    assert_eq!(result.vehicle_tax, dec!(18180000));
}
