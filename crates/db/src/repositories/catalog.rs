use crate::models::{DbProduct, DbService};
use eyre::Result;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_service(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
    name: &str,
    price: Decimal,
    duration_minutes: i32,
    tags: &[String],
) -> Result<DbService> {
    let id = Uuid::new_v4();

    let service = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services (id, salon_id, name, price, duration_minutes, tags)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, salon_id, name, price, duration_minutes, tags
        "#,
    )
    .bind(id)
    .bind(salon_id)
    .bind(name)
    .bind(price)
    .bind(duration_minutes)
    .bind(tags)
    .fetch_one(pool)
    .await?;

    Ok(service)
}

pub async fn get_service_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, salon_id, name, price, duration_minutes, tags
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn list_services_by_salon(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, salon_id, name, price, duration_minutes, tags
        FROM services
        WHERE salon_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(salon_id)
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn create_product(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
    name: &str,
    price: Decimal,
    stock: i32,
) -> Result<DbProduct> {
    let id = Uuid::new_v4();

    let product = sqlx::query_as::<_, DbProduct>(
        r#"
        INSERT INTO products (id, salon_id, name, price, stock)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, salon_id, name, price, stock
        "#,
    )
    .bind(id)
    .bind(salon_id)
    .bind(name)
    .bind(price)
    .bind(stock)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

pub async fn get_product_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbProduct>> {
    let product = sqlx::query_as::<_, DbProduct>(
        r#"
        SELECT id, salon_id, name, price, stock
        FROM products
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

pub async fn list_products_by_salon(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
) -> Result<Vec<DbProduct>> {
    let products = sqlx::query_as::<_, DbProduct>(
        r#"
        SELECT id, salon_id, name, price, stock
        FROM products
        WHERE salon_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(salon_id)
    .fetch_all(pool)
    .await?;

    Ok(products)
}
