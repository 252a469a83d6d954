//! # Internal Conversion Helpers
//!
//! Both conversion directions run through [`mul_div`] with 256-bit
//! intermediates. The empty vault is special-cased: the first depositor sets
//! the rate at 1:1, and no assets are owed against shares that do not exist.

use near_contract_standards::fungible_token::FungibleTokenCore;
use near_sdk::env;

use super::mul_div::{mul_div, Rounding};
use crate::errors;
use crate::Contract;

impl Contract {
    /// Converts an asset amount to shares at the current pool rate.
    ///
    /// With no shares issued the rate is 1:1 regardless of `total_assets`,
    /// letting the first depositor set the initial rate. A nonzero share
    /// supply backed by zero assets means mint and burn stopped moving the
    /// totals in lockstep; the conversion aborts rather than divide by zero.
    pub fn internal_convert_to_shares(&self, assets: u128, rounding: Rounding) -> u128 {
        let total_shares = self.token.ft_total_supply().0;

        if total_shares == 0 {
            return assets;
        }

        if self.total_assets == 0 {
            env::panic_str(errors::ERR_INTERNAL_CONSISTENCY);
        }

        mul_div(assets, total_shares, self.total_assets, rounding)
    }

    /// Converts a share amount to assets at the current pool rate.
    ///
    /// With no shares issued there is nothing to claim, so the result is 0.
    pub fn internal_convert_to_assets(&self, shares: u128, rounding: Rounding) -> u128 {
        let total_shares = self.token.ft_total_supply().0;

        if total_shares == 0 {
            return 0;
        }

        mul_div(shares, self.total_assets, total_shares, rounding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::builders::ContractBuilder;

    #[test]
    fn bootstrap_rate_is_one_to_one_regardless_of_assets() {
        // Donated assets with zero supply must not skew the first deposit
        let contract = ContractBuilder::new("owner.test", "mt.test")
            .total_assets(5_000)
            .build();
        assert_eq!(contract.internal_convert_to_shares(1_000, Rounding::Down), 1_000);
        assert_eq!(contract.internal_convert_to_shares(1_000, Rounding::Up), 1_000);
    }

    #[test]
    fn no_assets_owed_against_zero_supply() {
        let contract = ContractBuilder::new("owner.test", "mt.test")
            .total_assets(5_000)
            .build();
        assert_eq!(contract.internal_convert_to_assets(1_000, Rounding::Down), 0);
    }

    #[test]
    fn converts_at_two_to_one_rate() {
        let contract = ContractBuilder::new("owner.test", "mt.test")
            .total_assets(1_000)
            .with_shares("alice.test", 500)
            .build();
        assert_eq!(contract.internal_convert_to_shares(100, Rounding::Down), 50);
        assert_eq!(contract.internal_convert_to_assets(50, Rounding::Up), 100);
        assert_eq!(contract.internal_convert_to_assets(200, Rounding::Down), 400);
    }

    #[test]
    fn rounding_direction_splits_inexact_conversions() {
        let contract = ContractBuilder::new("owner.test", "mt.test")
            .total_assets(1_000)
            .with_shares("alice.test", 333)
            .build();
        // 100 * 333 / 1000 = 33.3
        assert_eq!(contract.internal_convert_to_shares(100, Rounding::Down), 33);
        assert_eq!(contract.internal_convert_to_shares(100, Rounding::Up), 34);
    }

    #[test]
    fn conversion_is_monotonic_in_the_input() {
        let contract = ContractBuilder::new("owner.test", "mt.test")
            .total_assets(997)
            .with_shares("alice.test", 334)
            .build();
        let mut previous = 0;
        for assets in [0u128, 1, 2, 10, 100, 500, 997, 1_000] {
            let shares = contract.internal_convert_to_shares(assets, Rounding::Down);
            assert!(shares >= previous, "to_shares must be monotonic");
            previous = shares;
        }
    }

    #[test]
    #[should_panic(expected = "Internal consistency fault")]
    fn shares_without_assets_is_a_fatal_fault() {
        let contract = ContractBuilder::new("owner.test", "mt.test")
            .with_shares("alice.test", 100)
            .build();
        contract.internal_convert_to_shares(10, Rounding::Down);
    }
}
