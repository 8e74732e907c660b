pub mod actions;
pub mod coupons;
pub mod models;

pub use coupons::{discounted_sponsor_price, CouponError};
pub use models::{Payment, PaymentStatus};
