use chrono::Utc;
use mockall::predicate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use salonbook_core::errors::SalonError;
use salonbook_db::models::{DbCart, DbCartLine};
use uuid::Uuid;

use crate::test_utils::TestContext;

fn active_cart(customer_id: Uuid, salon_id: Uuid) -> DbCart {
    DbCart {
        id: Uuid::new_v4(),
        customer_id,
        salon_id,
        status: "active".to_string(),
        created_at: Utc::now(),
    }
}

// Mirrors the cart view: lines are fetched and the subtotal is the sum of
// quantity times unit price.
async fn test_cart_subtotal_wrapper(
    ctx: &mut TestContext,
    cart_id: Uuid,
) -> Result<Decimal, SalonError> {
    let lines = ctx
        .cart_repo
        .get_cart_lines(cart_id)
        .await
        .map_err(SalonError::Database)?;

    Ok(lines
        .iter()
        .map(|line| line.unit_price * Decimal::from(line.quantity))
        .sum())
}

#[tokio::test]
async fn test_add_item_reuses_active_cart() {
    let mut ctx = TestContext::new();
    let customer_id = Uuid::new_v4();
    let salon_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();
    let cart = active_cart(customer_id, salon_id);
    let cart_id = cart.id;

    // Two adds for the same customer and salon land in the same cart
    ctx.cart_repo
        .expect_add_item()
        .with(
            predicate::eq(customer_id),
            predicate::eq(product_id),
            predicate::always(),
        )
        .times(2)
        .returning(move |_, _, _| Ok(cart.clone()));

    let first = ctx.cart_repo.add_item(customer_id, product_id, 1).await.unwrap();
    let second = ctx.cart_repo.add_item(customer_id, product_id, 2).await.unwrap();

    assert_eq!(first.id, cart_id);
    assert_eq!(second.id, cart_id);
    assert_eq!(second.status, "active");
}

#[tokio::test]
async fn test_cart_subtotal_sums_lines() {
    let mut ctx = TestContext::new();
    let cart_id = Uuid::new_v4();

    ctx.cart_repo
        .expect_get_cart_lines()
        .with(predicate::eq(cart_id))
        .returning(|_| {
            Ok(vec![
                DbCartLine {
                    id: Uuid::new_v4(),
                    product_id: Uuid::new_v4(),
                    product_name: "Shampoo".to_string(),
                    quantity: 2,
                    unit_price: dec!(12.50),
                },
                DbCartLine {
                    id: Uuid::new_v4(),
                    product_id: Uuid::new_v4(),
                    product_name: "Conditioner".to_string(),
                    quantity: 1,
                    unit_price: dec!(9.99),
                },
            ])
        });

    let subtotal = test_cart_subtotal_wrapper(&mut ctx, cart_id).await.unwrap();
    assert_eq!(subtotal, dec!(34.99));
}

#[tokio::test]
async fn test_get_cart_not_found() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.cart_repo
        .expect_get_cart_by_id()
        .with(predicate::eq(id))
        .returning(|_| Ok(None));

    let result = ctx.cart_repo.get_cart_by_id(id).await.unwrap();
    assert!(result.is_none());
}
