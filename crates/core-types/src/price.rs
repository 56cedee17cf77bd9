//! Reserved "no price" values and helpers for reading nullable prices.

/// A 32-bit price field holding this value carries no price.
pub const PRICE_NULL_32: i32 = 2_147_483_647;

/// A 64-bit price field holding this value carries no price.
pub const PRICE_NULL_64: i64 = 9_223_372_036_854_775_807;

/// Reserved security group id used by the host for settlement groups.
pub const GROUP_SETTLE_ID: u32 = 4_294_967_293;

/// Reading of wire prices that may hold the null sentinel.
pub trait NullablePrice: Copy {
    const NULL: Self;

    fn is_null_price(self) -> bool;

    /// `None` for the sentinel, otherwise the raw price.
    fn to_price(self) -> Option<Self> {
        (!self.is_null_price()).then_some(self)
    }
}

impl NullablePrice for i32 {
    const NULL: Self = PRICE_NULL_32;

    fn is_null_price(self) -> bool {
        self == Self::NULL
    }
}

impl NullablePrice for i64 {
    const NULL: Self = PRICE_NULL_64;

    fn is_null_price(self) -> bool {
        self == Self::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_the_type_maximums() {
        assert_eq!(PRICE_NULL_32, i32::MAX);
        assert_eq!(PRICE_NULL_64, i64::MAX);
    }

    #[test]
    fn nullable_prices() {
        assert_eq!(PRICE_NULL_64.to_price(), None);
        assert_eq!(12_500_i64.to_price(), Some(12_500));
        assert!(PRICE_NULL_32.is_null_price());
        assert_eq!((-3_i32).to_price(), Some(-3));
    }
}
