use pretty_assertions::assert_eq;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use salonbook_core::pricing::{
    discount_amount, points_earned, quote, Discount, DiscountKind, APPOINTMENT_TAX_RATE,
    CART_TAX_RATE,
};

#[test]
fn test_tax_rate_constants() {
    assert_eq!(APPOINTMENT_TAX_RATE, dec!(0.08875));
    assert_eq!(CART_TAX_RATE, dec!(0.07));
}

#[test]
fn test_worked_example_hundred_dollar_appointment() {
    // $100 service, 10% promo, 8.875% tax.
    let discount = Discount {
        kind: DiscountKind::Percentage,
        value: dec!(10),
    };
    let q = quote(dec!(100.00), Some(discount), APPOINTMENT_TAX_RATE);

    assert_eq!(q.subtotal, dec!(100.00));
    assert_eq!(q.discount, dec!(10.00));
    assert_eq!(q.discounted_subtotal, dec!(90.00));
    assert_eq!(q.tax, dec!(7.99));
    assert_eq!(q.total, dec!(97.99));
    assert_eq!(points_earned(q.discounted_subtotal, 1), 90);
}

#[test]
fn test_no_discount() {
    let q = quote(dec!(50.00), None, CART_TAX_RATE);
    assert_eq!(q.discount, Decimal::ZERO);
    assert_eq!(q.tax, dec!(3.50));
    assert_eq!(q.total, dec!(53.50));
}

#[test]
fn test_flat_discount_subtracted_directly() {
    let discount = Discount {
        kind: DiscountKind::Flat,
        value: dec!(15.00),
    };
    let q = quote(dec!(60.00), Some(discount), CART_TAX_RATE);
    assert_eq!(q.discount, dec!(15.00));
    assert_eq!(q.discounted_subtotal, dec!(45.00));
    assert_eq!(q.total, dec!(48.15));
}

#[rstest]
#[case(dec!(20.00), dec!(100.00), dec!(20.00))] // flat larger than subtotal clamps
#[case(dec!(20.00), dec!(-5.00), dec!(0.00))] // negative flat value clamps to zero
#[case(dec!(20.00), dec!(20.00), dec!(20.00))] // exact wipeout allowed
fn test_flat_discount_clamped(
    #[case] subtotal: Decimal,
    #[case] value: Decimal,
    #[case] expected: Decimal,
) {
    let discount = Some(Discount {
        kind: DiscountKind::Flat,
        value,
    });
    assert_eq!(discount_amount(subtotal, discount), expected);
}

#[test]
fn test_discount_never_exceeds_subtotal() {
    let discount = Some(Discount {
        kind: DiscountKind::Flat,
        value: dec!(1000.00),
    });
    let q = quote(dec!(30.00), discount, APPOINTMENT_TAX_RATE);
    assert_eq!(q.discount, dec!(30.00));
    assert_eq!(q.discounted_subtotal, Decimal::ZERO);
    assert_eq!(q.total, Decimal::ZERO);
}

#[test]
fn test_percentage_discount_rounds_to_cents() {
    let discount = Some(Discount {
        kind: DiscountKind::Percentage,
        value: dec!(33),
    });
    // 33% of 9.99 = 3.2967, rounds to 3.30.
    let q = quote(dec!(9.99), discount, CART_TAX_RATE);
    assert_eq!(q.discount, dec!(3.30));
    assert_eq!(q.discounted_subtotal, dec!(6.69));
}

#[rstest]
#[case(dec!(90.00), 1, 90)]
#[case(dec!(90.99), 1, 90)] // floor, not round
#[case(dec!(90.00), 2, 180)] // per-salon configured rate
#[case(dec!(0.50), 1, 0)]
#[case(dec!(0.00), 1, 0)]
fn test_points_earned(
    #[case] discounted_subtotal: Decimal,
    #[case] rate: i64,
    #[case] expected: i64,
) {
    assert_eq!(points_earned(discounted_subtotal, rate), expected);
}
