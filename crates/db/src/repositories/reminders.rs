use crate::models::DbAppointment;
use eyre::Result;
use sqlx::{Pool, Postgres};

/// Claims appointments due a reminder: upcoming, unsent, and still live.
/// The `UPDATE ... RETURNING` selects and flags in one statement, so a
/// claimed appointment is never handed to two worker passes.
pub async fn claim_due_reminders(
    pool: &Pool<Postgres>,
    lookahead_hours: i64,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET reminder_sent_at = NOW()
        WHERE id IN (
            SELECT id
            FROM appointments
            WHERE reminder_sent_at IS NULL
              AND status IN ('booked', 'confirmed', 'paid')
              AND (date + start_time) BETWEEN NOW()::timestamp
                  AND NOW()::timestamp + make_interval(hours => $1::int)
            FOR UPDATE SKIP LOCKED
        )
        RETURNING id, customer_id, salon_id, employee_id, service_id, date,
                  start_time, end_time, status, reminder_sent_at, created_at
        "#,
    )
    .bind(lookahead_hours)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}
