use chrono::{NaiveDate, NaiveTime};
use mockall::mock;
use salonbook_core::errors::SalonResult;
use salonbook_core::models::appointment::AppointmentStatus;
use salonbook_core::payment::ValidatedCard;
use uuid::Uuid;

use crate::models::{
    DbAppointment, DbCart, DbCartLine, DbCustomerPoints, DbCustomerVoucher, DbInvoice,
    DbInvoiceLineItem, DbLoyaltyProgram, DbSalon,
};

#[derive(Debug)]
pub struct CheckoutOutcome {
    pub invoice: DbInvoice,
    pub line_items: Vec<DbInvoiceLineItem>,
}

// Mock repositories for testing
mock! {
    pub AppointmentRepo {
        pub async fn book(
            &self,
            customer_id: Uuid,
            salon_id: Uuid,
            employee_id: Uuid,
            service_id: Uuid,
            date: NaiveDate,
            start_time: NaiveTime,
        ) -> SalonResult<DbAppointment>;

        pub async fn get_appointment_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbAppointment>>;

        pub async fn update_status(
            &self,
            id: Uuid,
            to: AppointmentStatus,
        ) -> SalonResult<DbAppointment>;
    }
}

mock! {
    pub CheckoutRepo {
        pub async fn pay_appointment(
            &self,
            appointment_id: Uuid,
            customer_id: Uuid,
            card: ValidatedCard,
            promo_code: Option<String>,
            voucher_id: Option<Uuid>,
        ) -> SalonResult<CheckoutOutcome>;

        pub async fn checkout_cart(
            &self,
            cart_id: Uuid,
            customer_id: Uuid,
            card: ValidatedCard,
            promo_code: Option<String>,
            voucher_id: Option<Uuid>,
        ) -> SalonResult<CheckoutOutcome>;
    }
}

mock! {
    pub CartRepo {
        pub async fn add_item(
            &self,
            customer_id: Uuid,
            product_id: Uuid,
            quantity: i32,
        ) -> SalonResult<DbCart>;

        pub async fn get_cart_by_id(&self, id: Uuid) -> eyre::Result<Option<DbCart>>;

        pub async fn get_cart_lines(&self, cart_id: Uuid) -> eyre::Result<Vec<DbCartLine>>;
    }
}

mock! {
    pub LoyaltyRepo {
        pub async fn claim_voucher(
            &self,
            customer_id: Uuid,
            program_id: Uuid,
        ) -> SalonResult<DbCustomerVoucher>;

        pub async fn get_program_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbLoyaltyProgram>>;

        pub async fn get_points_balance(
            &self,
            customer_id: Uuid,
            salon_id: Uuid,
        ) -> eyre::Result<Option<DbCustomerPoints>>;
    }
}

mock! {
    pub SalonRepo {
        pub async fn create_salon(
            &self,
            owner_id: Uuid,
            name: String,
            address: String,
        ) -> eyre::Result<DbSalon>;

        pub async fn get_salon_by_id(&self, id: Uuid) -> eyre::Result<Option<DbSalon>>;
    }
}
