//! # Safe Multiplication and Division
//!
//! Share/asset conversions multiply two u128 values before dividing; the
//! intermediate product does not fit in 128 bits, so the arithmetic runs in
//! 256-bit width and truncates back after the division.
//!
//! The rounding direction always favors the vault pool: `Down` when
//! computing what the vault pays out, `Up` when computing what it charges.

use uint::construct_uint;

construct_uint! {
    pub struct U256(4);
}

/// Rounding direction for division operations.
#[derive(Clone, Copy, Debug)]
pub enum Rounding {
    /// Round towards zero (floor division).
    Down,
    /// Round away from zero (ceiling division).
    Up,
}

/// Performs `(x * y) / denominator` with configurable rounding.
///
/// # Example
///
/// ```ignore
/// // shares = (assets * total_shares) / total_assets, rounded down
/// let shares = mul_div(100, 500, 1000, Rounding::Down);
/// assert_eq!(shares, 50);
/// ```
pub fn mul_div(x: u128, y: u128, denominator: u128, rounding: Rounding) -> u128 {
    let numerator = U256::from(x) * U256::from(y);
    let denominator = U256::from(denominator);
    let result = numerator / denominator;
    let remainder = numerator % denominator;

    match rounding {
        Rounding::Down => result.as_u128(),
        Rounding::Up => {
            if remainder > U256::zero() {
                result.as_u128() + 1
            } else {
                result.as_u128()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_division_ignores_rounding() {
        assert_eq!(mul_div(100, 500, 1000, Rounding::Down), 50);
        assert_eq!(mul_div(100, 500, 1000, Rounding::Up), 50);
    }

    #[test]
    fn remainder_rounds_in_requested_direction() {
        // 7 * 3 / 2 = 10.5
        assert_eq!(mul_div(7, 3, 2, Rounding::Down), 10);
        assert_eq!(mul_div(7, 3, 2, Rounding::Up), 11);
    }

    #[test]
    fn intermediate_product_wider_than_u128() {
        let x = u128::MAX / 2;
        assert_eq!(mul_div(x, 4, 2, Rounding::Down), u128::MAX - 1);
    }

    #[test]
    fn zero_numerator_is_zero_in_both_directions() {
        assert_eq!(mul_div(0, 500, 1000, Rounding::Down), 0);
        assert_eq!(mul_div(0, 500, 1000, Rounding::Up), 0);
    }
}
