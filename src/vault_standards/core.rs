use near_contract_standards::fungible_token::FungibleTokenCore;
use near_sdk::{json_types::U128, AccountId, PromiseOrValue};

use crate::multi_token::MultiTokenReceiver;

/// NEP-621 tokenized vault interface.
///
/// A vault is a fungible share token (NEP-141) that also receives its
/// underlying NEP-245 asset, so the trait composes both capability
/// interfaces. Conversions and previews are views with no side effects;
/// `redeem` and `withdraw` settle asynchronously against the asset contract.
///
/// Rounding always favors the vault pool: shares minted for a deposit and
/// assets paid for a redemption round down, while assets charged for a mint
/// and shares burned for a withdrawal round up.
pub trait VaultCore: FungibleTokenCore + MultiTokenReceiver {
    /// Account ID of the underlying multi token contract.
    fn asset(&self) -> AccountId;

    /// Token ID of the managed asset within the multi token contract.
    fn asset_token_id(&self) -> String;

    /// Total assets the vault manages.
    fn total_assets(&self) -> U128;

    /// Burns `shares` from the caller and sends the equivalent assets
    /// (rounded down) to `receiver_id`, defaulting to the caller.
    fn redeem(
        &mut self,
        shares: U128,
        receiver_id: Option<AccountId>,
        memo: Option<String>,
    ) -> PromiseOrValue<U128>;

    /// Sends exactly `assets` to `receiver_id`, burning the equivalent
    /// shares (rounded up) from the caller.
    fn withdraw(
        &mut self,
        assets: U128,
        receiver_id: Option<AccountId>,
        memo: Option<String>,
    ) -> PromiseOrValue<U128>;

    /// Shares corresponding to `assets` at the current rate, rounded down.
    fn convert_to_shares(&self, assets: U128) -> U128;

    /// Assets corresponding to `shares` at the current rate, rounded down.
    fn convert_to_assets(&self, shares: U128) -> U128;

    /// Assets required to mint exactly `shares`, rounded up.
    fn preview_mint(&self, shares: U128) -> U128;

    /// Shares burned to withdraw exactly `assets`, rounded up.
    fn preview_withdraw(&self, assets: U128) -> U128;

    /// Upper bound on a deposit for `receiver_id`. Unrestricted by default.
    fn max_deposit(&self, _receiver_id: AccountId) -> U128 {
        U128(u128::MAX)
    }

    /// Shares minted for a deposit of `assets`.
    fn preview_deposit(&self, assets: U128) -> U128 {
        self.convert_to_shares(assets)
    }

    /// Upper bound on shares minted to `receiver_id`. Unrestricted by default.
    fn max_mint(&self, _receiver_id: AccountId) -> U128 {
        U128(u128::MAX)
    }

    /// The owner's redeemable share balance.
    fn max_redeem(&self, owner_id: AccountId) -> U128 {
        self.ft_balance_of(owner_id)
    }

    /// Assets returned for redeeming `shares`.
    fn preview_redeem(&self, shares: U128) -> U128 {
        self.convert_to_assets(shares)
    }

    /// Asset value of the owner's redeemable balance, rounded down.
    fn max_withdraw(&self, owner_id: AccountId) -> U128 {
        self.convert_to_assets(self.ft_balance_of(owner_id))
    }
}
