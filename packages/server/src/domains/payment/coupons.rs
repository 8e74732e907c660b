//! Static coupon allow-list for sponsor pricing.
//!
//! Lookup is purely local: an unknown code is a validation failure surfaced
//! to the user, never a call to an external service. The list is a fixed
//! table; server-side entitlement checks for discounts are a hardening step
//! that belongs with the payment collaborator, not here.

use rust_decimal::Decimal;
use thiserror::Error;

/// One allow-listed coupon code and the percentage it takes off.
#[derive(Debug, Clone, Copy)]
pub struct Coupon {
    pub code: &'static str,
    pub percent_off: u32,
}

/// The allow-list. Codes are compared case-insensitively.
pub const COUPONS: &[Coupon] = &[
    Coupon {
        code: "LAUNCH20",
        percent_off: 20,
    },
    Coupon {
        code: "OSSFRIEND10",
        percent_off: 10,
    },
    Coupon {
        code: "MAINTAINER50",
        percent_off: 50,
    },
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CouponError {
    #[error("Unknown coupon code: {0}")]
    UnknownCode(String),
}

/// Look up a coupon, case-insensitively, ignoring surrounding whitespace.
pub fn lookup(code: &str) -> Option<&'static Coupon> {
    let normalized = code.trim();
    COUPONS
        .iter()
        .find(|coupon| coupon.code.eq_ignore_ascii_case(normalized))
}

/// Sponsor price after an optional coupon.
///
/// `None` leaves the base price untouched; a known code multiplies it by the
/// discount fraction; an unknown code errors so the caller can surface a
/// local validation message.
pub fn discounted_sponsor_price(
    base: Decimal,
    coupon_code: Option<&str>,
) -> Result<Decimal, CouponError> {
    let Some(code) = coupon_code.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(base);
    };

    let coupon = lookup(code).ok_or_else(|| CouponError::UnknownCode(code.to_string()))?;
    let fraction = Decimal::from(100 - coupon.percent_off) / Decimal::from(100);
    Ok((base * fraction).round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Decimal {
        Decimal::from(99)
    }

    #[test]
    fn no_coupon_keeps_base_price() {
        assert_eq!(discounted_sponsor_price(base(), None).unwrap(), base());
        assert_eq!(discounted_sponsor_price(base(), Some("")).unwrap(), base());
    }

    #[test]
    fn known_code_discounts() {
        let price = discounted_sponsor_price(base(), Some("LAUNCH20")).unwrap();
        assert_eq!(price, Decimal::new(7920, 2)); // 79.20
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let price = discounted_sponsor_price(base(), Some("  launch20 ")).unwrap();
        assert_eq!(price, Decimal::new(7920, 2));
    }

    #[test]
    fn unknown_code_is_local_validation_error() {
        let err = discounted_sponsor_price(base(), Some("FREE100")).unwrap_err();
        assert_eq!(err, CouponError::UnknownCode("FREE100".to_string()));
    }

    #[test]
    fn half_off() {
        let price = discounted_sponsor_price(base(), Some("MAINTAINER50")).unwrap();
        assert_eq!(price, Decimal::new(4950, 2)); // 49.50
    }
}
