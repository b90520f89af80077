pub mod admin;
pub mod appointments;
pub mod carts;
pub mod catalog;
pub mod checkout;
pub mod loyalty;
pub mod promotions;
pub mod salons;
pub mod users;
