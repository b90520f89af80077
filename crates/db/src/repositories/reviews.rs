use crate::models::DbReview;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_review(
    pool: &Pool<Postgres>,
    customer_id: Uuid,
    salon_id: Uuid,
    rating: i16,
    comment: Option<&str>,
) -> Result<DbReview> {
    let id = Uuid::new_v4();

    let review = sqlx::query_as::<_, DbReview>(
        r#"
        INSERT INTO reviews (id, customer_id, salon_id, rating, comment, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, customer_id, salon_id, rating, comment, created_at
        "#,
    )
    .bind(id)
    .bind(customer_id)
    .bind(salon_id)
    .bind(rating)
    .bind(comment)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(review)
}

pub async fn list_reviews_by_salon(pool: &Pool<Postgres>, salon_id: Uuid) -> Result<Vec<DbReview>> {
    let reviews = sqlx::query_as::<_, DbReview>(
        r#"
        SELECT id, customer_id, salon_id, rating, comment, created_at
        FROM reviews
        WHERE salon_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(salon_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}
