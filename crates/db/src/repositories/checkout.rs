use crate::models::{DbInvoice, DbInvoiceLineItem};
use crate::repositories::db_err;
use chrono::Utc;
use rust_decimal::Decimal;
use salonbook_core::errors::{SalonError, SalonResult};
use salonbook_core::models::appointment::AppointmentStatus;
use salonbook_core::payment::ValidatedCard;
use salonbook_core::pricing::{self, Discount, DiscountKind, Quote};
use salonbook_core::scheduling;
use sqlx::{Pool, Postgres, Transaction};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug)]
pub struct CheckoutOutcome {
    pub invoice: DbInvoice,
    pub line_items: Vec<DbInvoiceLineItem>,
}

/// Pays for an appointment: resolves the discount, prices the service,
/// writes the invoice, marks the appointment paid, redeems any voucher,
/// and awards loyalty points. One transaction; any failure rolls back
/// every write.
pub async fn pay_appointment(
    pool: &Pool<Postgres>,
    appointment_id: Uuid,
    customer_id: Uuid,
    card: &ValidatedCard,
    promo_code: Option<&str>,
    voucher_id: Option<Uuid>,
) -> SalonResult<CheckoutOutcome> {
    let mut tx = pool.begin().await.map_err(db_err)?;

    let appointment = sqlx::query_as::<_, (Uuid, Uuid, Uuid, String)>(
        r#"
        SELECT customer_id, salon_id, service_id, status
        FROM appointments
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(appointment_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_err)?
    .ok_or_else(|| {
        SalonError::NotFound(format!("Appointment with ID {} not found", appointment_id))
    })?;

    let (owner, salon_id, service_id, status) = appointment;

    if owner != customer_id {
        return Err(SalonError::Authorization(
            "Appointment belongs to another customer".to_string(),
        ));
    }
    let current = AppointmentStatus::from_str(&status)?;
    if !scheduling::can_transition(current, AppointmentStatus::Paid) {
        return Err(SalonError::Conflict(format!(
            "Appointment in status {} cannot be paid",
            status
        )));
    }

    let service = sqlx::query_as::<_, (String, Decimal, Vec<String>)>(
        r#"
        SELECT name, price, tags
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(service_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(db_err)?;

    let (service_name, price, tags) = service;

    let discount = resolve_discount(
        &mut tx,
        salon_id,
        customer_id,
        promo_code,
        voucher_id,
        Some(&tags),
    )
    .await?;

    let quote = pricing::quote(price, discount, pricing::APPOINTMENT_TAX_RATE);

    sqlx::query("UPDATE appointments SET status = 'paid' WHERE id = $1")
        .bind(appointment_id)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

    if let Some(voucher_id) = voucher_id {
        redeem_voucher(&mut tx, voucher_id).await?;
    }

    let points = award_points(&mut tx, customer_id, salon_id, quote.discounted_subtotal).await?;

    let invoice = insert_invoice(
        &mut tx,
        customer_id,
        salon_id,
        "appointment",
        Some(appointment_id),
        None,
        &quote,
        card,
        points,
    )
    .await?;

    let line_item = insert_line_item(&mut tx, invoice.id, &service_name, price, 1).await?;

    tx.commit().await.map_err(db_err)?;

    tracing::info!(
        "Appointment {} paid: total={}, points_awarded={}",
        appointment_id, invoice.total, points
    );

    Ok(CheckoutOutcome {
        invoice,
        line_items: vec![line_item],
    })
}

/// Checks out the customer's active cart: decrements stock per line
/// (failing the whole checkout if any line would go negative), writes the
/// invoice and line items, completes the cart, redeems any voucher, and
/// awards points. One transaction.
pub async fn checkout_cart(
    pool: &Pool<Postgres>,
    cart_id: Uuid,
    customer_id: Uuid,
    card: &ValidatedCard,
    promo_code: Option<&str>,
    voucher_id: Option<Uuid>,
) -> SalonResult<CheckoutOutcome> {
    let mut tx = pool.begin().await.map_err(db_err)?;

    let cart = sqlx::query_as::<_, (Uuid, Uuid, String)>(
        r#"
        SELECT customer_id, salon_id, status
        FROM carts
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(cart_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_err)?
    .ok_or_else(|| SalonError::NotFound(format!("Cart with ID {} not found", cart_id)))?;

    let (owner, salon_id, status) = cart;

    if owner != customer_id {
        return Err(SalonError::Authorization(
            "Cart belongs to another customer".to_string(),
        ));
    }
    if status != "active" {
        return Err(SalonError::Conflict(format!(
            "Cart in status {} cannot be checked out",
            status
        )));
    }

    // Lock lines in a stable order so concurrent checkouts touching the
    // same products cannot deadlock.
    let lines = sqlx::query_as::<_, (Uuid, String, i32, Decimal)>(
        r#"
        SELECT ci.product_id, p.name, ci.quantity, ci.unit_price
        FROM cart_items ci
        JOIN products p ON p.id = ci.product_id
        WHERE ci.cart_id = $1
        ORDER BY ci.product_id
        FOR UPDATE OF p
        "#,
    )
    .bind(cart_id)
    .fetch_all(&mut *tx)
    .await
    .map_err(db_err)?;

    if lines.is_empty() {
        return Err(SalonError::Validation("Cart is empty".to_string()));
    }

    let mut subtotal = Decimal::ZERO;
    for (product_id, name, quantity, unit_price) in &lines {
        let updated = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock - $2
            WHERE id = $1 AND stock >= $2
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        if updated.rows_affected() == 0 {
            // Rolls back every decrement made so far.
            return Err(SalonError::Conflict(format!(
                "Insufficient stock for {}",
                name
            )));
        }

        subtotal += *unit_price * Decimal::from(*quantity);
    }

    // Vouchers apply unconditionally to product carts; no tag check.
    let discount =
        resolve_discount(&mut tx, salon_id, customer_id, promo_code, voucher_id, None).await?;

    let quote = pricing::quote(subtotal, discount, pricing::CART_TAX_RATE);

    sqlx::query("UPDATE carts SET status = 'completed' WHERE id = $1")
        .bind(cart_id)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

    if let Some(voucher_id) = voucher_id {
        redeem_voucher(&mut tx, voucher_id).await?;
    }

    let points = award_points(&mut tx, customer_id, salon_id, quote.discounted_subtotal).await?;

    let invoice = insert_invoice(
        &mut tx,
        customer_id,
        salon_id,
        "cart",
        None,
        Some(cart_id),
        &quote,
        card,
        points,
    )
    .await?;

    let mut line_items = Vec::with_capacity(lines.len());
    for (_, name, quantity, unit_price) in &lines {
        line_items.push(insert_line_item(&mut tx, invoice.id, name, *unit_price, *quantity).await?);
    }

    tx.commit().await.map_err(db_err)?;

    tracing::info!(
        "Cart {} checked out: total={}, points_awarded={}",
        cart_id, invoice.total, points
    );

    Ok(CheckoutOutcome {
        invoice,
        line_items,
    })
}

/// Resolves the optional discount for a payment. At most one of
/// `promo_code` / `voucher_id` may be given. The voucher row is locked so
/// a concurrent redemption of the same voucher blocks and then fails.
async fn resolve_discount(
    tx: &mut Transaction<'_, Postgres>,
    salon_id: Uuid,
    customer_id: Uuid,
    promo_code: Option<&str>,
    voucher_id: Option<Uuid>,
    service_tags: Option<&[String]>,
) -> SalonResult<Option<Discount>> {
    match (promo_code, voucher_id) {
        (None, None) => Ok(None),
        (Some(_), Some(_)) => Err(SalonError::Validation(
            "Apply either a promo code or a voucher, not both".to_string(),
        )),
        (Some(code), None) => {
            let promo = sqlx::query_as::<_, (String, Decimal, bool, chrono::DateTime<Utc>, chrono::DateTime<Utc>)>(
                r#"
                SELECT discount_kind, discount_value, active, starts_at, ends_at
                FROM promotions
                WHERE salon_id = $1 AND code = $2
                "#,
            )
            .bind(salon_id)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
            .map_err(db_err)?
            .ok_or_else(|| SalonError::NotFound(format!("Promo code {} not found", code)))?;

            let (kind, value, active, starts_at, ends_at) = promo;
            let now = Utc::now();
            if !active || now < starts_at || now > ends_at {
                return Err(SalonError::Validation(format!(
                    "Promo code {} is not currently active",
                    code
                )));
            }

            Ok(Some(Discount {
                kind: DiscountKind::from_str(&kind)?,
                value,
            }))
        }
        (None, Some(voucher_id)) => {
            let voucher = sqlx::query_as::<_, (Uuid, Option<chrono::DateTime<Utc>>, Uuid, String, Decimal, Option<String>)>(
                r#"
                SELECT v.customer_id, v.redeemed_at, p.salon_id, p.discount_kind, p.discount_value, p.tag
                FROM customer_vouchers v
                JOIN loyalty_programs p ON p.id = v.program_id
                WHERE v.id = $1
                FOR UPDATE OF v
                "#,
            )
            .bind(voucher_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(db_err)?
            .ok_or_else(|| {
                SalonError::NotFound(format!("Voucher with ID {} not found", voucher_id))
            })?;

            let (owner, redeemed_at, voucher_salon, kind, value, tag) = voucher;

            if owner != customer_id {
                return Err(SalonError::Authorization(
                    "Voucher belongs to another customer".to_string(),
                ));
            }
            if voucher_salon != salon_id {
                return Err(SalonError::Validation(
                    "Voucher is not valid at this salon".to_string(),
                ));
            }
            if redeemed_at.is_some() {
                return Err(SalonError::Conflict(
                    "Voucher has already been redeemed".to_string(),
                ));
            }
            if let (Some(tag), Some(tags)) = (tag.as_deref(), service_tags) {
                if !tags.iter().any(|t| t == tag) {
                    return Err(SalonError::Validation(format!(
                        "Voucher only applies to {} services",
                        tag
                    )));
                }
            }

            Ok(Some(Discount {
                kind: DiscountKind::from_str(&kind)?,
                value,
            }))
        }
    }
}

async fn redeem_voucher(tx: &mut Transaction<'_, Postgres>, voucher_id: Uuid) -> SalonResult<()> {
    // resolve_discount already holds the row lock and checked redeemed_at;
    // the guard here keeps redemption single-use even if called alone.
    let updated = sqlx::query(
        r#"
        UPDATE customer_vouchers
        SET redeemed_at = NOW()
        WHERE id = $1 AND redeemed_at IS NULL
        "#,
    )
    .bind(voucher_id)
    .execute(&mut **tx)
    .await
    .map_err(db_err)?;

    if updated.rows_affected() == 0 {
        return Err(SalonError::Conflict(
            "Voucher has already been redeemed".to_string(),
        ));
    }

    Ok(())
}

/// Awards points for a payment, upserting the per-(customer, salon)
/// accumulator. Returns the number of points granted.
async fn award_points(
    tx: &mut Transaction<'_, Postgres>,
    customer_id: Uuid,
    salon_id: Uuid,
    discounted_subtotal: Decimal,
) -> SalonResult<i64> {
    let points_per_dollar = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT points_per_dollar
        FROM salons
        WHERE id = $1
        "#,
    )
    .bind(salon_id)
    .fetch_one(&mut **tx)
    .await
    .map_err(db_err)?;

    let points = pricing::points_earned(discounted_subtotal, points_per_dollar);
    if points == 0 {
        return Ok(0);
    }

    sqlx::query(
        r#"
        INSERT INTO customer_points (customer_id, salon_id, points_earned, points_redeemed, points_available)
        VALUES ($1, $2, $3, 0, $3)
        ON CONFLICT (customer_id, salon_id)
        DO UPDATE SET points_earned = customer_points.points_earned + EXCLUDED.points_earned,
                      points_available = customer_points.points_available + EXCLUDED.points_earned
        "#,
    )
    .bind(customer_id)
    .bind(salon_id)
    .bind(points)
    .execute(&mut **tx)
    .await
    .map_err(db_err)?;

    Ok(points)
}

#[allow(clippy::too_many_arguments)]
async fn insert_invoice(
    tx: &mut Transaction<'_, Postgres>,
    customer_id: Uuid,
    salon_id: Uuid,
    source: &str,
    appointment_id: Option<Uuid>,
    cart_id: Option<Uuid>,
    quote: &Quote,
    card: &ValidatedCard,
    points_awarded: i64,
) -> SalonResult<DbInvoice> {
    let invoice = sqlx::query_as::<_, DbInvoice>(
        r#"
        INSERT INTO invoices
            (id, customer_id, salon_id, source, appointment_id, cart_id,
             subtotal, discount, tax, total, card_brand, card_last4, status,
             points_awarded, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 'paid', $13, $14)
        RETURNING id, customer_id, salon_id, source, appointment_id, cart_id,
                  subtotal, discount, tax, total, card_brand, card_last4,
                  status, points_awarded, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(customer_id)
    .bind(salon_id)
    .bind(source)
    .bind(appointment_id)
    .bind(cart_id)
    .bind(quote.subtotal)
    .bind(quote.discount)
    .bind(quote.tax)
    .bind(quote.total)
    .bind(card.brand.as_str())
    .bind(&card.last4)
    .bind(points_awarded)
    .bind(Utc::now())
    .fetch_one(&mut **tx)
    .await
    .map_err(db_err)?;

    Ok(invoice)
}

async fn insert_line_item(
    tx: &mut Transaction<'_, Postgres>,
    invoice_id: Uuid,
    description: &str,
    unit_price: Decimal,
    quantity: i32,
) -> SalonResult<DbInvoiceLineItem> {
    let line_total = unit_price * Decimal::from(quantity);

    let item = sqlx::query_as::<_, DbInvoiceLineItem>(
        r#"
        INSERT INTO invoice_line_items (id, invoice_id, description, unit_price, quantity, line_total)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, invoice_id, description, unit_price, quantity, line_total
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(invoice_id)
    .bind(description)
    .bind(unit_price)
    .bind(quantity)
    .bind(line_total)
    .fetch_one(&mut **tx)
    .await
    .map_err(db_err)?;

    Ok(item)
}

pub async fn get_invoice_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> eyre::Result<Option<(DbInvoice, Vec<DbInvoiceLineItem>)>> {
    let invoice = sqlx::query_as::<_, DbInvoice>(
        r#"
        SELECT id, customer_id, salon_id, source, appointment_id, cart_id,
               subtotal, discount, tax, total, card_brand, card_last4,
               status, points_awarded, created_at
        FROM invoices
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(invoice) = invoice else {
        return Ok(None);
    };

    let line_items = sqlx::query_as::<_, DbInvoiceLineItem>(
        r#"
        SELECT id, invoice_id, description, unit_price, quantity, line_total
        FROM invoice_line_items
        WHERE invoice_id = $1
        ORDER BY description ASC
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some((invoice, line_items)))
}
