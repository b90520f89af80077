use crate::models::DbPaymentMethod;
use chrono::Utc;
use eyre::Result;
use salonbook_core::payment::ValidatedCard;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Stores a card reference. Only the brand, last four digits, and expiry
/// survive; the full number and CVV never reach the database.
pub async fn save_payment_method(
    pool: &Pool<Postgres>,
    customer_id: Uuid,
    card: &ValidatedCard,
) -> Result<DbPaymentMethod> {
    let id = Uuid::new_v4();

    let method = sqlx::query_as::<_, DbPaymentMethod>(
        r#"
        INSERT INTO payment_methods (id, customer_id, brand, last4, exp_month, exp_year, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, customer_id, brand, last4, exp_month, exp_year, created_at
        "#,
    )
    .bind(id)
    .bind(customer_id)
    .bind(card.brand.as_str())
    .bind(&card.last4)
    .bind(card.exp_month as i32)
    .bind(card.exp_year)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(method)
}

pub async fn get_payment_method_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbPaymentMethod>> {
    let method = sqlx::query_as::<_, DbPaymentMethod>(
        r#"
        SELECT id, customer_id, brand, last4, exp_month, exp_year, created_at
        FROM payment_methods
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(method)
}

pub async fn list_payment_methods_by_customer(
    pool: &Pool<Postgres>,
    customer_id: Uuid,
) -> Result<Vec<DbPaymentMethod>> {
    let methods = sqlx::query_as::<_, DbPaymentMethod>(
        r#"
        SELECT id, customer_id, brand, last4, exp_month, exp_year, created_at
        FROM payment_methods
        WHERE customer_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    Ok(methods)
}
