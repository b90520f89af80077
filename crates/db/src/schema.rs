use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // btree_gist lets the appointment exclusion constraint mix UUID
    // equality with range overlap.
    sqlx::query("CREATE EXTENSION IF NOT EXISTS btree_gist;")
        .execute(pool)
        .await?;

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            role VARCHAR(32) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create salons table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS salons (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            owner_id UUID NOT NULL REFERENCES users(id),
            name VARCHAR(255) NOT NULL,
            address VARCHAR(512) NOT NULL,
            verification_status VARCHAR(32) NOT NULL DEFAULT 'pending',
            points_per_dollar BIGINT NOT NULL DEFAULT 1,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create employees table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            salon_id UUID NOT NULL REFERENCES salons(id),
            name VARCHAR(255) NOT NULL,
            title VARCHAR(255) NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            salon_id UUID NOT NULL REFERENCES salons(id),
            name VARCHAR(255) NOT NULL,
            price NUMERIC(10, 2) NOT NULL,
            duration_minutes INTEGER NOT NULL CHECK (duration_minutes > 0),
            tags TEXT[] NOT NULL DEFAULT '{}'
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create products table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            salon_id UUID NOT NULL REFERENCES salons(id),
            name VARCHAR(255) NOT NULL,
            price NUMERIC(10, 2) NOT NULL,
            stock INTEGER NOT NULL CHECK (stock >= 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create time_slots table: availability is either a concrete date or a
    // recurring day of week, never both.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS time_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            employee_id UUID NOT NULL REFERENCES employees(id),
            date DATE NULL,
            day_of_week SMALLINT NULL CHECK (day_of_week BETWEEN 0 AND 6),
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT date_or_day CHECK ((date IS NULL) <> (day_of_week IS NULL))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table. The exclusion constraint is the
    // store-level guarantee that no employee carries two overlapping
    // non-cancelled appointments, regardless of what application code does.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            customer_id UUID NOT NULL REFERENCES users(id),
            salon_id UUID NOT NULL REFERENCES salons(id),
            employee_id UUID NOT NULL REFERENCES employees(id),
            service_id UUID NOT NULL REFERENCES services(id),
            date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            status VARCHAR(32) NOT NULL DEFAULT 'booked',
            reminder_sent_at TIMESTAMP WITH TIME ZONE NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT no_double_booking EXCLUDE USING gist (
                employee_id WITH =,
                tsrange((date + start_time), (date + end_time)) WITH &&
            ) WHERE (status <> 'cancelled')
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create carts table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS carts (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            customer_id UUID NOT NULL REFERENCES users(id),
            salon_id UUID NOT NULL REFERENCES salons(id),
            status VARCHAR(32) NOT NULL DEFAULT 'active',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // One active cart per customer per salon.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_carts_one_active
        ON carts(customer_id, salon_id) WHERE status = 'active';
        "#,
    )
    .execute(pool)
    .await?;

    // Create cart_items table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cart_items (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            cart_id UUID NOT NULL REFERENCES carts(id),
            product_id UUID NOT NULL REFERENCES products(id),
            quantity INTEGER NOT NULL CHECK (quantity > 0),
            unit_price NUMERIC(10, 2) NOT NULL,
            CONSTRAINT one_line_per_product UNIQUE (cart_id, product_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create invoices table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS invoices (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            customer_id UUID NOT NULL REFERENCES users(id),
            salon_id UUID NOT NULL REFERENCES salons(id),
            source VARCHAR(32) NOT NULL,
            appointment_id UUID NULL REFERENCES appointments(id),
            cart_id UUID NULL REFERENCES carts(id),
            subtotal NUMERIC(10, 2) NOT NULL,
            discount NUMERIC(10, 2) NOT NULL,
            tax NUMERIC(10, 2) NOT NULL,
            total NUMERIC(10, 2) NOT NULL,
            card_brand VARCHAR(32) NOT NULL,
            card_last4 VARCHAR(4) NOT NULL,
            status VARCHAR(32) NOT NULL DEFAULT 'paid',
            points_awarded BIGINT NOT NULL DEFAULT 0,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create invoice_line_items table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS invoice_line_items (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            invoice_id UUID NOT NULL REFERENCES invoices(id),
            description VARCHAR(512) NOT NULL,
            unit_price NUMERIC(10, 2) NOT NULL,
            quantity INTEGER NOT NULL CHECK (quantity > 0),
            line_total NUMERIC(10, 2) NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create customer_points table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS customer_points (
            customer_id UUID NOT NULL REFERENCES users(id),
            salon_id UUID NOT NULL REFERENCES salons(id),
            points_earned BIGINT NOT NULL DEFAULT 0,
            points_redeemed BIGINT NOT NULL DEFAULT 0,
            points_available BIGINT NOT NULL DEFAULT 0 CHECK (points_available >= 0),
            PRIMARY KEY (customer_id, salon_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create loyalty_programs table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS loyalty_programs (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            salon_id UUID NOT NULL REFERENCES salons(id),
            name VARCHAR(255) NOT NULL,
            points_required BIGINT NOT NULL CHECK (points_required > 0),
            discount_kind VARCHAR(32) NOT NULL,
            discount_value NUMERIC(10, 2) NOT NULL,
            tag VARCHAR(255) NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create customer_vouchers table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS customer_vouchers (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            customer_id UUID NOT NULL REFERENCES users(id),
            program_id UUID NOT NULL REFERENCES loyalty_programs(id),
            redeemed_at TIMESTAMP WITH TIME ZONE NULL,
            claimed_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create promotions table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS promotions (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            salon_id UUID NOT NULL REFERENCES salons(id),
            code VARCHAR(64) NOT NULL,
            discount_kind VARCHAR(32) NOT NULL,
            discount_value NUMERIC(10, 2) NOT NULL,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            starts_at TIMESTAMP WITH TIME ZONE NOT NULL,
            ends_at TIMESTAMP WITH TIME ZONE NOT NULL,
            CONSTRAINT one_code_per_salon UNIQUE (salon_id, code)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create payment_methods table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS payment_methods (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            customer_id UUID NOT NULL REFERENCES users(id),
            brand VARCHAR(32) NOT NULL,
            last4 VARCHAR(4) NOT NULL,
            exp_month INTEGER NOT NULL,
            exp_year INTEGER NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create reviews table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            customer_id UUID NOT NULL REFERENCES users(id),
            salon_id UUID NOT NULL REFERENCES salons(id),
            rating SMALLINT NOT NULL CHECK (rating BETWEEN 1 AND 5),
            comment TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_salons_owner_id ON salons(owner_id);
        CREATE INDEX IF NOT EXISTS idx_employees_salon_id ON employees(salon_id);
        CREATE INDEX IF NOT EXISTS idx_services_salon_id ON services(salon_id);
        CREATE INDEX IF NOT EXISTS idx_products_salon_id ON products(salon_id);
        CREATE INDEX IF NOT EXISTS idx_time_slots_employee_id ON time_slots(employee_id);
        CREATE INDEX IF NOT EXISTS idx_appointments_employee_date ON appointments(employee_id, date);
        CREATE INDEX IF NOT EXISTS idx_appointments_customer_id ON appointments(customer_id);
        CREATE INDEX IF NOT EXISTS idx_appointments_reminder ON appointments(date) WHERE reminder_sent_at IS NULL;
        CREATE INDEX IF NOT EXISTS idx_cart_items_cart_id ON cart_items(cart_id);
        CREATE INDEX IF NOT EXISTS idx_invoices_customer_id ON invoices(customer_id);
        CREATE INDEX IF NOT EXISTS idx_invoices_salon_id ON invoices(salon_id);
        CREATE INDEX IF NOT EXISTS idx_invoice_line_items_invoice_id ON invoice_line_items(invoice_id);
        CREATE INDEX IF NOT EXISTS idx_customer_vouchers_customer_id ON customer_vouchers(customer_id);
        CREATE INDEX IF NOT EXISTS idx_loyalty_programs_salon_id ON loyalty_programs(salon_id);
        CREATE INDEX IF NOT EXISTS idx_reviews_salon_id ON reviews(salon_id);
        CREATE INDEX IF NOT EXISTS idx_payment_methods_customer_id ON payment_methods(customer_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
