pub mod appointment;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod loyalty;
pub mod promotion;
pub mod review;
pub mod salon;
pub mod user;
