use crate::models::DbSalon;
use crate::repositories::db_err;
use salonbook_core::errors::{SalonError, SalonResult};
use salonbook_core::models::salon::VerificationStatus;
use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

/// Records a verification decision. Approval updates the status; rejection
/// cascade-deletes every dependent row in foreign-key order and removes
/// the salon, all in one transaction.
pub async fn verify_salon(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
    decision: VerificationStatus,
) -> SalonResult<Option<DbSalon>> {
    match decision {
        VerificationStatus::Pending => Err(SalonError::Validation(
            "Verification decision must be approved or rejected".to_string(),
        )),
        VerificationStatus::Approved => {
            let salon = sqlx::query_as::<_, DbSalon>(
                r#"
                UPDATE salons
                SET verification_status = 'approved'
                WHERE id = $1
                RETURNING id, owner_id, name, address, verification_status, points_per_dollar, created_at
                "#,
            )
            .bind(salon_id)
            .fetch_optional(pool)
            .await
            .map_err(db_err)?
            .ok_or_else(|| {
                SalonError::NotFound(format!("Salon with ID {} not found", salon_id))
            })?;

            tracing::info!("Salon {} approved", salon_id);
            Ok(Some(salon))
        }
        VerificationStatus::Rejected => {
            let mut tx = pool.begin().await.map_err(db_err)?;

            let locked =
                sqlx::query_scalar::<_, Uuid>("SELECT id FROM salons WHERE id = $1 FOR UPDATE")
                    .bind(salon_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(db_err)?;

            if locked.is_none() {
                return Err(SalonError::NotFound(format!(
                    "Salon with ID {} not found",
                    salon_id
                )));
            }

            delete_salon_cascade(&mut tx, salon_id).await?;

            tx.commit().await.map_err(db_err)?;
            tracing::info!("Salon {} rejected and removed", salon_id);
            Ok(None)
        }
    }
}

/// Deletes a salon and everything hanging off it. Statement order matters:
/// each table is cleared before the tables it references.
async fn delete_salon_cascade(
    tx: &mut Transaction<'_, Postgres>,
    salon_id: Uuid,
) -> SalonResult<()> {
    let statements = [
        "DELETE FROM invoice_line_items WHERE invoice_id IN (SELECT id FROM invoices WHERE salon_id = $1)",
        "DELETE FROM invoices WHERE salon_id = $1",
        "DELETE FROM cart_items WHERE cart_id IN (SELECT id FROM carts WHERE salon_id = $1)",
        "DELETE FROM carts WHERE salon_id = $1",
        "DELETE FROM reviews WHERE salon_id = $1",
        "DELETE FROM customer_vouchers WHERE program_id IN (SELECT id FROM loyalty_programs WHERE salon_id = $1)",
        "DELETE FROM loyalty_programs WHERE salon_id = $1",
        "DELETE FROM customer_points WHERE salon_id = $1",
        "DELETE FROM appointments WHERE salon_id = $1",
        "DELETE FROM time_slots WHERE employee_id IN (SELECT id FROM employees WHERE salon_id = $1)",
        "DELETE FROM services WHERE salon_id = $1",
        "DELETE FROM products WHERE salon_id = $1",
        "DELETE FROM promotions WHERE salon_id = $1",
        "DELETE FROM employees WHERE salon_id = $1",
        "DELETE FROM salons WHERE id = $1",
    ];

    for statement in statements {
        sqlx::query(statement)
            .bind(salon_id)
            .execute(&mut **tx)
            .await
            .map_err(db_err)?;
    }

    Ok(())
}

/// Removes a user and their dependent rows. A user still owning salons
/// cannot be removed; their salons must be rejected first.
pub async fn delete_user(pool: &Pool<Postgres>, user_id: Uuid) -> SalonResult<()> {
    let mut tx = pool.begin().await.map_err(db_err)?;

    let locked = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE id = $1 FOR UPDATE")
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_err)?;

    if locked.is_none() {
        return Err(SalonError::NotFound(format!(
            "User with ID {} not found",
            user_id
        )));
    }

    let owns_salons = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM salons WHERE owner_id = $1)",
    )
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(db_err)?;

    if owns_salons {
        return Err(SalonError::Conflict(
            "User still owns salons; reject them before removal".to_string(),
        ));
    }

    let statements = [
        "DELETE FROM invoice_line_items WHERE invoice_id IN (SELECT id FROM invoices WHERE customer_id = $1)",
        "DELETE FROM invoices WHERE customer_id = $1",
        "DELETE FROM cart_items WHERE cart_id IN (SELECT id FROM carts WHERE customer_id = $1)",
        "DELETE FROM carts WHERE customer_id = $1",
        "DELETE FROM reviews WHERE customer_id = $1",
        "DELETE FROM customer_vouchers WHERE customer_id = $1",
        "DELETE FROM customer_points WHERE customer_id = $1",
        "DELETE FROM appointments WHERE customer_id = $1",
        "DELETE FROM payment_methods WHERE customer_id = $1",
        "DELETE FROM users WHERE id = $1",
    ];

    for statement in statements {
        sqlx::query(statement)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
    }

    tx.commit().await.map_err(db_err)?;
    tracing::info!("User {} removed", user_id);

    Ok(())
}
