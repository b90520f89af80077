use crate::models::{DbCustomerPoints, DbCustomerVoucher, DbLoyaltyProgram};
use crate::repositories::db_err;
use chrono::Utc;
use eyre::Result;
use rust_decimal::Decimal;
use salonbook_core::errors::{SalonError, SalonResult};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_program(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
    name: &str,
    points_required: i64,
    discount_kind: &str,
    discount_value: Decimal,
    tag: Option<&str>,
) -> Result<DbLoyaltyProgram> {
    let id = Uuid::new_v4();

    tracing::debug!(
        "Creating loyalty program: id={}, salon_id={}, points_required={}",
        id, salon_id, points_required
    );

    let program = sqlx::query_as::<_, DbLoyaltyProgram>(
        r#"
        INSERT INTO loyalty_programs (id, salon_id, name, points_required, discount_kind, discount_value, tag)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, salon_id, name, points_required, discount_kind, discount_value, tag
        "#,
    )
    .bind(id)
    .bind(salon_id)
    .bind(name)
    .bind(points_required)
    .bind(discount_kind)
    .bind(discount_value)
    .bind(tag)
    .fetch_one(pool)
    .await?;

    Ok(program)
}

pub async fn list_programs_by_salon(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
) -> Result<Vec<DbLoyaltyProgram>> {
    let programs = sqlx::query_as::<_, DbLoyaltyProgram>(
        r#"
        SELECT id, salon_id, name, points_required, discount_kind, discount_value, tag
        FROM loyalty_programs
        WHERE salon_id = $1
        ORDER BY points_required ASC
        "#,
    )
    .bind(salon_id)
    .fetch_all(pool)
    .await?;

    Ok(programs)
}

/// Claims a voucher against a loyalty program: debits the customer's point
/// balance and mints an unredeemed voucher, atomically. An insufficient
/// balance leaves no state change.
pub async fn claim_voucher(
    pool: &Pool<Postgres>,
    customer_id: Uuid,
    program_id: Uuid,
) -> SalonResult<DbCustomerVoucher> {
    let mut tx = pool.begin().await.map_err(db_err)?;

    let program = sqlx::query_as::<_, (Uuid, i64)>(
        r#"
        SELECT salon_id, points_required
        FROM loyalty_programs
        WHERE id = $1
        "#,
    )
    .bind(program_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_err)?
    .ok_or_else(|| {
        SalonError::NotFound(format!("Loyalty program with ID {} not found", program_id))
    })?;

    let (salon_id, points_required) = program;

    let available = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT points_available
        FROM customer_points
        WHERE customer_id = $1 AND salon_id = $2
        FOR UPDATE
        "#,
    )
    .bind(customer_id)
    .bind(salon_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_err)?
    .unwrap_or(0);

    if available < points_required {
        return Err(SalonError::Validation(format!(
            "Insufficient points: {} available, {} required",
            available, points_required
        )));
    }

    sqlx::query(
        r#"
        UPDATE customer_points
        SET points_redeemed = points_redeemed + $3,
            points_available = points_available - $3
        WHERE customer_id = $1 AND salon_id = $2
        "#,
    )
    .bind(customer_id)
    .bind(salon_id)
    .bind(points_required)
    .execute(&mut *tx)
    .await
    .map_err(db_err)?;

    let voucher = sqlx::query_as::<_, DbCustomerVoucher>(
        r#"
        INSERT INTO customer_vouchers (id, customer_id, program_id, redeemed_at, claimed_at)
        VALUES ($1, $2, $3, NULL, $4)
        RETURNING id, customer_id, program_id, redeemed_at, claimed_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(customer_id)
    .bind(program_id)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await
    .map_err(db_err)?;

    tx.commit().await.map_err(db_err)?;

    tracing::info!(
        "Voucher {} claimed by {} for {} points",
        voucher.id, customer_id, points_required
    );

    Ok(voucher)
}

pub async fn get_points_balance(
    pool: &Pool<Postgres>,
    customer_id: Uuid,
    salon_id: Uuid,
) -> Result<Option<DbCustomerPoints>> {
    let points = sqlx::query_as::<_, DbCustomerPoints>(
        r#"
        SELECT customer_id, salon_id, points_earned, points_redeemed, points_available
        FROM customer_points
        WHERE customer_id = $1 AND salon_id = $2
        "#,
    )
    .bind(customer_id)
    .bind(salon_id)
    .fetch_optional(pool)
    .await?;

    Ok(points)
}

pub async fn list_vouchers_by_customer(
    pool: &Pool<Postgres>,
    customer_id: Uuid,
) -> Result<Vec<DbCustomerVoucher>> {
    let vouchers = sqlx::query_as::<_, DbCustomerVoucher>(
        r#"
        SELECT id, customer_id, program_id, redeemed_at, claimed_at
        FROM customer_vouchers
        WHERE customer_id = $1
        ORDER BY claimed_at DESC
        "#,
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    Ok(vouchers)
}

pub async fn get_program_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbLoyaltyProgram>> {
    let program = sqlx::query_as::<_, DbLoyaltyProgram>(
        r#"
        SELECT id, salon_id, name, points_required, discount_kind, discount_value, tag
        FROM loyalty_programs
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(program)
}
