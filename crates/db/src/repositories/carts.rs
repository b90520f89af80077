use crate::models::{DbCart, DbCartLine};
use crate::repositories::db_err;
use chrono::Utc;
use eyre::Result;
use salonbook_core::errors::{SalonError, SalonResult};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Adds a product to the customer's active cart at that product's salon,
/// creating the cart if none exists. Re-adding a product increments its
/// quantity and refreshes the captured unit price.
pub async fn add_item(
    pool: &Pool<Postgres>,
    customer_id: Uuid,
    product_id: Uuid,
    quantity: i32,
) -> SalonResult<DbCart> {
    if quantity <= 0 {
        return Err(SalonError::Validation(
            "Quantity must be positive".to_string(),
        ));
    }

    let mut tx = pool.begin().await.map_err(db_err)?;

    let product = sqlx::query_as::<_, (Uuid, rust_decimal::Decimal)>(
        r#"
        SELECT salon_id, price
        FROM products
        WHERE id = $1
        "#,
    )
    .bind(product_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_err)?
    .ok_or_else(|| SalonError::NotFound(format!("Product with ID {} not found", product_id)))?;

    let (salon_id, price) = product;

    // Find or create the one active cart for (customer, salon). The
    // partial unique index makes the insert race-safe.
    let cart = sqlx::query_as::<_, DbCart>(
        r#"
        INSERT INTO carts (id, customer_id, salon_id, status, created_at)
        VALUES ($1, $2, $3, 'active', $4)
        ON CONFLICT (customer_id, salon_id) WHERE status = 'active'
        DO UPDATE SET status = carts.status
        RETURNING id, customer_id, salon_id, status, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(customer_id)
    .bind(salon_id)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await
    .map_err(db_err)?;

    sqlx::query(
        r#"
        INSERT INTO cart_items (id, cart_id, product_id, quantity, unit_price)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (cart_id, product_id)
        DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity,
                      unit_price = EXCLUDED.unit_price
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(cart.id)
    .bind(product_id)
    .bind(quantity)
    .bind(price)
    .execute(&mut *tx)
    .await
    .map_err(db_err)?;

    tx.commit().await.map_err(db_err)?;

    Ok(cart)
}

pub async fn get_cart_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbCart>> {
    let cart = sqlx::query_as::<_, DbCart>(
        r#"
        SELECT id, customer_id, salon_id, status, created_at
        FROM carts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(cart)
}

pub async fn get_active_cart(
    pool: &Pool<Postgres>,
    customer_id: Uuid,
    salon_id: Uuid,
) -> Result<Option<DbCart>> {
    let cart = sqlx::query_as::<_, DbCart>(
        r#"
        SELECT id, customer_id, salon_id, status, created_at
        FROM carts
        WHERE customer_id = $1 AND salon_id = $2 AND status = 'active'
        "#,
    )
    .bind(customer_id)
    .bind(salon_id)
    .fetch_optional(pool)
    .await?;

    Ok(cart)
}

pub async fn get_cart_lines(pool: &Pool<Postgres>, cart_id: Uuid) -> Result<Vec<DbCartLine>> {
    let lines = sqlx::query_as::<_, DbCartLine>(
        r#"
        SELECT ci.id, ci.product_id, p.name AS product_name, ci.quantity, ci.unit_price
        FROM cart_items ci
        JOIN products p ON p.id = ci.product_id
        WHERE ci.cart_id = $1
        ORDER BY p.name ASC
        "#,
    )
    .bind(cart_id)
    .fetch_all(pool)
    .await?;

    Ok(lines)
}

pub async fn remove_item(pool: &Pool<Postgres>, cart_id: Uuid, item_id: Uuid) -> SalonResult<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM cart_items
        WHERE id = $1 AND cart_id = $2
        "#,
    )
    .bind(item_id)
    .bind(cart_id)
    .execute(pool)
    .await
    .map_err(db_err)?;

    if result.rows_affected() == 0 {
        return Err(SalonError::NotFound(format!(
            "Cart item with ID {} not found",
            item_id
        )));
    }

    Ok(())
}
