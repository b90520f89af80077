use crate::models::DbPromotion;
use chrono::{DateTime, Utc};
use eyre::Result;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

#[allow(clippy::too_many_arguments)]
pub async fn create_promotion(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
    code: &str,
    discount_kind: &str,
    discount_value: Decimal,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
) -> Result<DbPromotion> {
    let id = Uuid::new_v4();

    let promotion = sqlx::query_as::<_, DbPromotion>(
        r#"
        INSERT INTO promotions (id, salon_id, code, discount_kind, discount_value, active, starts_at, ends_at)
        VALUES ($1, $2, $3, $4, $5, TRUE, $6, $7)
        RETURNING id, salon_id, code, discount_kind, discount_value, active, starts_at, ends_at
        "#,
    )
    .bind(id)
    .bind(salon_id)
    .bind(code)
    .bind(discount_kind)
    .bind(discount_value)
    .bind(starts_at)
    .bind(ends_at)
    .fetch_one(pool)
    .await?;

    Ok(promotion)
}

pub async fn list_promotions_by_salon(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
) -> Result<Vec<DbPromotion>> {
    let promotions = sqlx::query_as::<_, DbPromotion>(
        r#"
        SELECT id, salon_id, code, discount_kind, discount_value, active, starts_at, ends_at
        FROM promotions
        WHERE salon_id = $1
        ORDER BY starts_at DESC
        "#,
    )
    .bind(salon_id)
    .fetch_all(pool)
    .await?;

    Ok(promotions)
}

pub async fn deactivate_promotion(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
    id: Uuid,
) -> Result<bool> {
    let result = sqlx::query("UPDATE promotions SET active = FALSE WHERE id = $1 AND salon_id = $2")
        .bind(id)
        .bind(salon_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
