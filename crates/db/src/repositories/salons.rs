use crate::models::{DbEmployee, DbSalon, DbTimeSlot};
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_salon(
    pool: &Pool<Postgres>,
    owner_id: Uuid,
    name: &str,
    address: &str,
) -> Result<DbSalon> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating salon: id={}, owner_id={}, name={}", id, owner_id, name);

    let salon = sqlx::query_as::<_, DbSalon>(
        r#"
        INSERT INTO salons (id, owner_id, name, address, verification_status, points_per_dollar, created_at)
        VALUES ($1, $2, $3, $4, 'pending', 1, $5)
        RETURNING id, owner_id, name, address, verification_status, points_per_dollar, created_at
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .bind(name)
    .bind(address)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(salon)
}

pub async fn get_salon_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSalon>> {
    let salon = sqlx::query_as::<_, DbSalon>(
        r#"
        SELECT id, owner_id, name, address, verification_status, points_per_dollar, created_at
        FROM salons
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(salon)
}

/// Customer-facing discovery lists only verified salons.
pub async fn list_approved_salons(pool: &Pool<Postgres>) -> Result<Vec<DbSalon>> {
    let salons = sqlx::query_as::<_, DbSalon>(
        r#"
        SELECT id, owner_id, name, address, verification_status, points_per_dollar, created_at
        FROM salons
        WHERE verification_status = 'approved'
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(salons)
}

pub async fn create_employee(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
    name: &str,
    title: &str,
) -> Result<DbEmployee> {
    let id = Uuid::new_v4();

    let employee = sqlx::query_as::<_, DbEmployee>(
        r#"
        INSERT INTO employees (id, salon_id, name, title)
        VALUES ($1, $2, $3, $4)
        RETURNING id, salon_id, name, title
        "#,
    )
    .bind(id)
    .bind(salon_id)
    .bind(name)
    .bind(title)
    .fetch_one(pool)
    .await?;

    Ok(employee)
}

pub async fn get_employee_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbEmployee>> {
    let employee = sqlx::query_as::<_, DbEmployee>(
        r#"
        SELECT id, salon_id, name, title
        FROM employees
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(employee)
}

pub async fn list_employees_by_salon(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
) -> Result<Vec<DbEmployee>> {
    let employees = sqlx::query_as::<_, DbEmployee>(
        r#"
        SELECT id, salon_id, name, title
        FROM employees
        WHERE salon_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(salon_id)
    .fetch_all(pool)
    .await?;

    Ok(employees)
}

pub async fn create_time_slot(
    pool: &Pool<Postgres>,
    employee_id: Uuid,
    date: Option<NaiveDate>,
    day_of_week: Option<i16>,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<DbTimeSlot> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        INSERT INTO time_slots (id, employee_id, date, day_of_week, start_time, end_time, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, employee_id, date, day_of_week, start_time, end_time, created_at
        "#,
    )
    .bind(id)
    .bind(employee_id)
    .bind(date)
    .bind(day_of_week)
    .bind(start_time)
    .bind(end_time)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(time_slot)
}

pub async fn list_time_slots_by_employee(
    pool: &Pool<Postgres>,
    employee_id: Uuid,
) -> Result<Vec<DbTimeSlot>> {
    let time_slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, employee_id, date, day_of_week, start_time, end_time, created_at
        FROM time_slots
        WHERE employee_id = $1
        ORDER BY start_time ASC
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await?;

    Ok(time_slots)
}
