use chrono::Utc;
use mockall::predicate;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use salonbook_core::errors::SalonError;
use salonbook_core::models::checkout::CardDetails;
use salonbook_core::payment::{self, ValidatedCard};
use salonbook_core::pricing::{self, Discount, DiscountKind, APPOINTMENT_TAX_RATE};
use salonbook_db::mock::repositories::CheckoutOutcome;
use salonbook_db::models::{DbInvoice, DbInvoiceLineItem};
use uuid::Uuid;

use crate::test_utils::TestContext;
use salonbook_api::middleware::error_handling::AppError;

fn good_card() -> CardDetails {
    CardDetails {
        number: "4242424242424242".to_string(),
        cvv: "123".to_string(),
        exp_month: 12,
        exp_year: 2030,
    }
}

// Wrapper mirroring the payment handler: the card is validated before
// the repository is touched.
async fn test_pay_wrapper(
    ctx: &mut TestContext,
    appointment_id: Uuid,
    customer_id: Uuid,
    card: CardDetails,
    promo_code: Option<String>,
    voucher_id: Option<Uuid>,
) -> Result<CheckoutOutcome, AppError> {
    let validated = payment::validate_card(&card)?;

    let outcome = ctx
        .checkout_repo
        .pay_appointment(appointment_id, customer_id, validated, promo_code, voucher_id)
        .await?;

    Ok(outcome)
}

#[tokio::test]
async fn test_pay_appointment_totals() {
    let mut ctx = TestContext::new();
    let appointment_id = Uuid::new_v4();
    let customer_id = Uuid::new_v4();
    let salon_id = Uuid::new_v4();

    // A $100 service with a 10% promo at the appointment tax rate
    let expected = pricing::quote(
        dec!(100),
        Some(Discount {
            kind: DiscountKind::Percentage,
            value: dec!(10),
        }),
        APPOINTMENT_TAX_RATE,
    );
    assert_eq!(expected.discounted_subtotal, dec!(90.00));
    assert_eq!(expected.tax, dec!(7.99));
    assert_eq!(expected.total, dec!(97.99));

    ctx.checkout_repo
        .expect_pay_appointment()
        .with(
            predicate::eq(appointment_id),
            predicate::eq(customer_id),
            predicate::function(|card: &ValidatedCard| card.last4 == "4242"),
            predicate::eq(Some("FALL10".to_string())),
            predicate::eq(None),
        )
        .times(1)
        .returning(move |appointment_id, customer_id, card, _, _| {
            let invoice_id = Uuid::new_v4();
            Ok(CheckoutOutcome {
                invoice: DbInvoice {
                    id: invoice_id,
                    customer_id,
                    salon_id,
                    source: "appointment".to_string(),
                    appointment_id: Some(appointment_id),
                    cart_id: None,
                    subtotal: expected.subtotal,
                    discount: expected.discount,
                    tax: expected.tax,
                    total: expected.total,
                    card_brand: card.brand.to_string(),
                    card_last4: card.last4,
                    status: "paid".to_string(),
                    points_awarded: pricing::points_earned(expected.discounted_subtotal, 1),
                    created_at: Utc::now(),
                },
                line_items: vec![DbInvoiceLineItem {
                    id: Uuid::new_v4(),
                    invoice_id,
                    description: "Haircut".to_string(),
                    unit_price: dec!(100),
                    quantity: 1,
                    line_total: dec!(100),
                }],
            })
        });

    let outcome = test_pay_wrapper(
        &mut ctx,
        appointment_id,
        customer_id,
        good_card(),
        Some("FALL10".to_string()),
        None,
    )
    .await
    .unwrap();

    assert_eq!(outcome.invoice.subtotal, dec!(100));
    assert_eq!(outcome.invoice.discount, dec!(10.00));
    assert_eq!(outcome.invoice.tax, dec!(7.99));
    assert_eq!(outcome.invoice.total, dec!(97.99));
    assert_eq!(outcome.invoice.points_awarded, 90);
    assert_eq!(outcome.invoice.card_brand, "visa");
    assert_eq!(outcome.line_items.len(), 1);
}

#[tokio::test]
async fn test_pay_appointment_bad_card_never_reaches_repo() {
    let mut ctx = TestContext::new();

    ctx.checkout_repo.expect_pay_appointment().times(0);

    let card = CardDetails {
        number: "1234567890123456".to_string(),
        cvv: "123".to_string(),
        exp_month: 12,
        exp_year: 2030,
    };

    let result = test_pay_wrapper(
        &mut ctx,
        Uuid::new_v4(),
        Uuid::new_v4(),
        card,
        None,
        None,
    )
    .await;

    match result.unwrap_err().0 {
        SalonError::Validation(_) => {}
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_pay_appointment_expired_card() {
    let mut ctx = TestContext::new();

    ctx.checkout_repo.expect_pay_appointment().times(0);

    let card = CardDetails {
        number: "4242424242424242".to_string(),
        cvv: "123".to_string(),
        exp_month: 1,
        exp_year: 2020,
    };

    let result = test_pay_wrapper(
        &mut ctx,
        Uuid::new_v4(),
        Uuid::new_v4(),
        card,
        None,
        None,
    )
    .await;

    match result.unwrap_err().0 {
        SalonError::Validation(message) => assert!(message.contains("expired")),
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_pay_appointment_redeemed_voucher_rejected() {
    let mut ctx = TestContext::new();
    let voucher_id = Uuid::new_v4();

    ctx.checkout_repo
        .expect_pay_appointment()
        .times(1)
        .returning(|_, _, _, _, _| {
            Err(SalonError::Conflict(
                "Voucher has already been redeemed".to_string(),
            ))
        });

    let result = test_pay_wrapper(
        &mut ctx,
        Uuid::new_v4(),
        Uuid::new_v4(),
        good_card(),
        None,
        Some(voucher_id),
    )
    .await;

    match result.unwrap_err().0 {
        SalonError::Conflict(message) => assert!(message.contains("redeemed")),
        e => panic!("Expected Conflict error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_checkout_cart_insufficient_stock() {
    let mut ctx = TestContext::new();
    let cart_id = Uuid::new_v4();
    let customer_id = Uuid::new_v4();

    ctx.checkout_repo
        .expect_checkout_cart()
        .with(
            predicate::eq(cart_id),
            predicate::eq(customer_id),
            predicate::always(),
            predicate::eq(None),
            predicate::eq(None),
        )
        .times(1)
        .returning(|_, _, _, _, _| {
            Err(SalonError::Conflict(
                "Insufficient stock for Shampoo".to_string(),
            ))
        });

    let validated = payment::validate_card(&good_card()).unwrap();
    let result = ctx
        .checkout_repo
        .checkout_cart(cart_id, customer_id, validated, None, None)
        .await;

    match result.unwrap_err() {
        SalonError::Conflict(message) => assert!(message.contains("Shampoo")),
        e => panic!("Expected Conflict error, got: {:?}", e),
    }
}
