use chrono::Utc;
use mockall::predicate;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use salonbook_core::errors::SalonError;
use salonbook_db::models::{DbCustomerPoints, DbCustomerVoucher, DbLoyaltyProgram};
use uuid::Uuid;

use crate::test_utils::TestContext;
use salonbook_api::middleware::error_handling::AppError;

fn program(salon_id: Uuid, points_required: i64) -> DbLoyaltyProgram {
    DbLoyaltyProgram {
        id: Uuid::new_v4(),
        salon_id,
        name: "Free blowout".to_string(),
        points_required,
        discount_kind: "flat".to_string(),
        discount_value: dec!(25),
        tag: None,
    }
}

// Mirrors the claim handler: the program is looked up first so the
// response can carry its salon.
async fn test_claim_wrapper(
    ctx: &mut TestContext,
    customer_id: Uuid,
    program_id: Uuid,
) -> Result<(DbCustomerVoucher, Uuid), AppError> {
    let program = ctx
        .loyalty_repo
        .get_program_by_id(program_id)
        .await?
        .ok_or_else(|| {
            SalonError::NotFound(format!("Loyalty program with ID {} not found", program_id))
        })?;

    let voucher = ctx.loyalty_repo.claim_voucher(customer_id, program_id).await?;

    Ok((voucher, program.salon_id))
}

#[tokio::test]
async fn test_claim_voucher_success() {
    let mut ctx = TestContext::new();
    let customer_id = Uuid::new_v4();
    let salon_id = Uuid::new_v4();
    let program = program(salon_id, 100);
    let program_id = program.id;

    ctx.loyalty_repo
        .expect_get_program_by_id()
        .with(predicate::eq(program_id))
        .returning(move |_| Ok(Some(program.clone())));

    ctx.loyalty_repo
        .expect_claim_voucher()
        .with(predicate::eq(customer_id), predicate::eq(program_id))
        .times(1)
        .returning(|customer_id, program_id| {
            Ok(DbCustomerVoucher {
                id: Uuid::new_v4(),
                customer_id,
                program_id,
                redeemed_at: None,
                claimed_at: Utc::now(),
            })
        });

    let (voucher, voucher_salon) = test_claim_wrapper(&mut ctx, customer_id, program_id)
        .await
        .unwrap();

    assert_eq!(voucher.customer_id, customer_id);
    assert_eq!(voucher.program_id, program_id);
    assert!(voucher.redeemed_at.is_none());
    assert_eq!(voucher_salon, salon_id);
}

#[tokio::test]
async fn test_claim_voucher_insufficient_points() {
    let mut ctx = TestContext::new();
    let customer_id = Uuid::new_v4();
    let program = program(Uuid::new_v4(), 500);
    let program_id = program.id;

    ctx.loyalty_repo
        .expect_get_program_by_id()
        .returning(move |_| Ok(Some(program.clone())));

    ctx.loyalty_repo
        .expect_claim_voucher()
        .times(1)
        .returning(|_, _| {
            Err(SalonError::Validation(
                "Not enough points to claim this reward".to_string(),
            ))
        });

    let result = test_claim_wrapper(&mut ctx, customer_id, program_id).await;
    match result.unwrap_err().0 {
        SalonError::Validation(_) => {}
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_claim_voucher_unknown_program() {
    let mut ctx = TestContext::new();
    let program_id = Uuid::new_v4();

    ctx.loyalty_repo
        .expect_get_program_by_id()
        .with(predicate::eq(program_id))
        .returning(|_| Ok(None));

    ctx.loyalty_repo.expect_claim_voucher().times(0);

    let result = test_claim_wrapper(&mut ctx, Uuid::new_v4(), program_id).await;
    match result.unwrap_err().0 {
        SalonError::NotFound(_) => {}
        e => panic!("Expected NotFound error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_points_balance_defaults_to_zero() {
    let mut ctx = TestContext::new();
    let customer_id = Uuid::new_v4();
    let salon_id = Uuid::new_v4();

    ctx.loyalty_repo
        .expect_get_points_balance()
        .with(predicate::eq(customer_id), predicate::eq(salon_id))
        .returning(|_, _| Ok(None));

    // Mirrors the handler: a missing row reads as a zero balance
    let balance = ctx
        .loyalty_repo
        .get_points_balance(customer_id, salon_id)
        .await
        .unwrap();
    let available = balance.map(|points| points.points_available).unwrap_or(0);

    assert_eq!(available, 0);
}

#[tokio::test]
async fn test_points_balance_existing_row() {
    let mut ctx = TestContext::new();
    let customer_id = Uuid::new_v4();
    let salon_id = Uuid::new_v4();

    ctx.loyalty_repo
        .expect_get_points_balance()
        .returning(move |customer_id, salon_id| {
            Ok(Some(DbCustomerPoints {
                customer_id,
                salon_id,
                points_earned: 250,
                points_redeemed: 100,
                points_available: 150,
            }))
        });

    let balance = ctx
        .loyalty_repo
        .get_points_balance(customer_id, salon_id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(balance.points_available, 150);
    assert_eq!(balance.points_earned - balance.points_redeemed, 150);
}
