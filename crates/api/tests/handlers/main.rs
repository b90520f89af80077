mod test_utils;

mod appointments_test;
mod carts_test;
mod checkout_test;
mod loyalty_test;
mod middleware_test;
