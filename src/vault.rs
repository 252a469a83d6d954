use near_contract_standards::fungible_token::metadata::{
    FungibleTokenMetadata, FungibleTokenMetadataProvider,
};
use near_contract_standards::fungible_token::{
    core::FungibleTokenCore, events::FtMint, FungibleTokenResolver,
};
use near_contract_standards::storage_management::StorageManagement;
use near_sdk::serde::Deserialize;
use near_sdk::{
    assert_one_yocto, env, json_types::U128, near, require, AccountId, NearToken, PromiseOrValue,
};

use crate::errors;
use crate::multi_token::MultiTokenReceiver;
use crate::settlement::SettlementKind;
use crate::vault_standards::events::VaultDeposit;
use crate::vault_standards::mul_div::Rounding;
use crate::vault_standards::VaultCore;
use crate::{Contract, ContractExt};

/// Options attached to a deposit through the `mt_transfer_call` message.
/// An empty or unparsable message falls back to the defaults.
#[derive(Deserialize, Default)]
#[serde(crate = "near_sdk::serde")]
pub struct DepositMessage {
    /// Reject the deposit if fewer shares than this would be minted.
    pub min_shares: Option<U128>,
    /// Cap the minted shares; the unused asset amount is refunded.
    pub max_shares: Option<U128>,
    /// Mint the shares to this account instead of the sender.
    pub receiver_id: Option<AccountId>,
    /// Memo echoed into the deposit event.
    pub memo: Option<String>,
    /// Credit the assets to the pool without minting shares.
    pub donate: Option<bool>,
}

impl Contract {
    /// Applies a deposit that the asset contract has already credited to the
    /// vault. Returns the unused amount, which the asset contract refunds.
    ///
    /// Deposits commit synchronously: the assets are in hand by the time the
    /// receiver hook runs, so there is no settlement record to track.
    fn handle_deposit(
        &mut self,
        sender_id: AccountId,
        amount: U128,
        parsed_msg: DepositMessage,
    ) -> U128 {
        if parsed_msg.donate.unwrap_or(false) {
            self.total_assets = self
                .total_assets
                .checked_add(amount.0)
                .unwrap_or_else(|| env::panic_str(errors::ERR_INTERNAL_CONSISTENCY));

            return U128(0);
        }

        let calculated_shares = self.internal_convert_to_shares(amount.0, Rounding::Down);

        // Slippage protection: refuse the whole deposit rather than mint
        // fewer shares than the sender asked for
        if let Some(min_shares) = parsed_msg.min_shares {
            if calculated_shares < min_shares.0 {
                return amount;
            }
        }

        let (shares, used_amount) = match parsed_msg.max_shares {
            Some(max_shares) if calculated_shares > max_shares.0 => {
                // Capped shares cost their round-up asset value; the rest
                // is refunded through the unused return value
                let used = if self.token.ft_total_supply().0 == 0 {
                    max_shares.0
                } else {
                    self.internal_convert_to_assets(max_shares.0, Rounding::Up)
                };
                (max_shares.0, used)
            }
            _ => (calculated_shares, amount.0),
        };

        // Too small to mint a single share: refuse rather than absorb
        if shares == 0 {
            return amount;
        }

        let owner_id = parsed_msg.receiver_id.unwrap_or_else(|| sender_id.clone());

        require!(
            shares <= self.max_mint(owner_id.clone()).0,
            errors::ERR_DEPOSIT_EXCEEDS_LIMIT
        );

        self.token.internal_deposit(&owner_id, shares);
        self.total_assets = self
            .total_assets
            .checked_add(used_amount)
            .unwrap_or_else(|| env::panic_str(errors::ERR_INTERNAL_CONSISTENCY));

        FtMint {
            owner_id: &owner_id,
            amount: U128(shares),
            memo: Some("Deposit"),
        }
        .emit();

        VaultDeposit {
            sender_id: &sender_id,
            owner_id: &owner_id,
            token_id: &self.asset_token_id,
            assets: U128(used_amount),
            shares: U128(shares),
            memo: parsed_msg.memo.as_deref(),
        }
        .emit();

        env::log_str(&format!(
            "settlement_committed kind={:?} owner={} shares={} assets={}",
            SettlementKind::Deposit,
            owner_id,
            shares,
            used_amount
        ));

        let unused_amount = amount
            .0
            .checked_sub(used_amount)
            .unwrap_or_else(|| env::panic_str(errors::ERR_INTERNAL_CONSISTENCY));

        U128(unused_amount)
    }
}

#[near]
impl MultiTokenReceiver for Contract {
    /// Deposit entry point. The asset contract routes transfers here via
    /// `mt_transfer_call`; shares are minted synchronously and the returned
    /// vector carries the unused amount to refund.
    fn mt_on_transfer(
        &mut self,
        sender_id: AccountId,
        previous_owner_id: AccountId,
        token_ids: Vec<String>,
        amounts: Vec<U128>,
        msg: String,
    ) -> PromiseOrValue<Vec<U128>> {
        self.require_not_paused();

        require!(
            env::predecessor_account_id() == self.asset,
            "Only the underlying asset can be deposited"
        );
        require!(
            token_ids.len() == 1 && amounts.len() == 1,
            "Only single token deposits supported"
        );
        require!(
            token_ids[0] == self.asset_token_id,
            "Only the configured token_id can be deposited"
        );

        let parsed_msg = serde_json::from_str::<DepositMessage>(&msg).unwrap_or_default();
        let unused_amount = self.handle_deposit(sender_id, amounts[0], parsed_msg);

        PromiseOrValue::Value(vec![unused_amount])
    }
}

// ===== Implement Vault Core Trait =====
#[near]
impl VaultCore for Contract {
    fn asset(&self) -> AccountId {
        self.asset.clone()
    }

    fn asset_token_id(&self) -> String {
        self.asset_token_id.clone()
    }

    fn total_assets(&self) -> U128 {
        U128(self.total_assets)
    }

    #[payable]
    fn redeem(
        &mut self,
        shares: U128,
        receiver_id: Option<AccountId>,
        memo: Option<String>,
    ) -> PromiseOrValue<U128> {
        assert_one_yocto();
        self.require_not_paused();

        let owner = env::predecessor_account_id();

        // Zero-share redeem succeeds as a no-op
        if shares.0 == 0 {
            return PromiseOrValue::Value(U128(0));
        }

        require!(
            shares.0 <= self.max_redeem(owner.clone()).0,
            errors::ERR_REDEEM_EXCEEDS_LIMIT
        );

        let assets = self.internal_convert_to_assets(shares.0, Rounding::Down);

        // Shares worth less than one asset unit would burn for nothing
        if assets == 0 {
            return PromiseOrValue::Value(U128(0));
        }

        let receiver = receiver_id.unwrap_or_else(|| owner.clone());

        PromiseOrValue::Promise(self.internal_execute_settlement(
            SettlementKind::Redeem,
            owner,
            receiver,
            shares.0,
            assets,
            memo,
        ))
    }

    #[payable]
    fn withdraw(
        &mut self,
        assets: U128,
        receiver_id: Option<AccountId>,
        memo: Option<String>,
    ) -> PromiseOrValue<U128> {
        assert_one_yocto();
        self.require_not_paused();

        let owner = env::predecessor_account_id();

        if assets.0 == 0 {
            return PromiseOrValue::Value(U128(0));
        }

        require!(
            assets.0 <= self.max_withdraw(owner.clone()).0,
            errors::ERR_WITHDRAW_EXCEEDS_LIMIT
        );

        let shares = self.internal_convert_to_shares(assets.0, Rounding::Up);
        let receiver = receiver_id.unwrap_or_else(|| owner.clone());

        PromiseOrValue::Promise(self.internal_execute_settlement(
            SettlementKind::Withdraw,
            owner,
            receiver,
            shares,
            assets.0,
            memo,
        ))
    }

    fn convert_to_shares(&self, assets: U128) -> U128 {
        U128(self.internal_convert_to_shares(assets.0, Rounding::Down))
    }

    fn convert_to_assets(&self, shares: U128) -> U128 {
        U128(self.internal_convert_to_assets(shares.0, Rounding::Down))
    }

    fn preview_mint(&self, shares: U128) -> U128 {
        U128(self.internal_convert_to_assets(shares.0, Rounding::Up))
    }

    fn preview_withdraw(&self, assets: U128) -> U128 {
        U128(self.internal_convert_to_shares(assets.0, Rounding::Up))
    }

    fn max_deposit(&self, _receiver_id: AccountId) -> U128 {
        // Capacity headroom before the asset total overflows
        let max_assets = u128::MAX - self.total_assets;
        if self.token.ft_total_supply().0 == 0 {
            return U128(max_assets);
        }

        let max_assets_from_shares = self
            .internal_convert_to_assets(u128::MAX - self.token.ft_total_supply().0, Rounding::Down);

        U128(max_assets.min(max_assets_from_shares))
    }

    fn preview_deposit(&self, assets: U128) -> U128 {
        U128(self.internal_convert_to_shares(assets.0, Rounding::Down))
    }

    fn max_mint(&self, _receiver_id: AccountId) -> U128 {
        // Capacity headroom before the share supply overflows
        let max_shares = u128::MAX - self.token.ft_total_supply().0;
        let max_shares_from_assets =
            self.internal_convert_to_shares(u128::MAX - self.total_assets, Rounding::Down);

        U128(max_shares.min(max_shares_from_assets))
    }

    fn max_redeem(&self, owner_id: AccountId) -> U128 {
        self.token.ft_balance_of(owner_id)
    }

    fn preview_redeem(&self, shares: U128) -> U128 {
        U128(self.internal_convert_to_assets(shares.0, Rounding::Down))
    }

    fn max_withdraw(&self, owner_id: AccountId) -> U128 {
        U128(self.internal_convert_to_assets(
            self.token.ft_balance_of(owner_id).0,
            Rounding::Down,
        ))
    }
}

// ===== Implement Fungible Token Traits for Vault Shares =====
#[near]
impl FungibleTokenCore for Contract {
    #[payable]
    fn ft_transfer(&mut self, receiver_id: AccountId, amount: U128, memo: Option<String>) {
        self.token.ft_transfer(receiver_id, amount, memo)
    }

    #[payable]
    fn ft_transfer_call(
        &mut self,
        receiver_id: AccountId,
        amount: U128,
        memo: Option<String>,
        msg: String,
    ) -> PromiseOrValue<U128> {
        self.token.ft_transfer_call(receiver_id, amount, memo, msg)
    }

    fn ft_total_supply(&self) -> U128 {
        self.token.ft_total_supply()
    }

    fn ft_balance_of(&self, account_id: AccountId) -> U128 {
        self.token.ft_balance_of(account_id)
    }
}

#[near]
impl FungibleTokenResolver for Contract {
    #[private]
    fn ft_resolve_transfer(
        &mut self,
        sender_id: AccountId,
        receiver_id: AccountId,
        amount: U128,
    ) -> U128 {
        self.token
            .ft_resolve_transfer(sender_id, receiver_id, amount)
    }
}

#[near]
impl StorageManagement for Contract {
    #[payable]
    fn storage_deposit(
        &mut self,
        account_id: Option<AccountId>,
        registration_only: Option<bool>,
    ) -> near_contract_standards::storage_management::StorageBalance {
        self.token.storage_deposit(account_id, registration_only)
    }

    #[payable]
    fn storage_withdraw(
        &mut self,
        amount: Option<NearToken>,
    ) -> near_contract_standards::storage_management::StorageBalance {
        self.token.storage_withdraw(amount)
    }

    fn storage_balance_bounds(
        &self,
    ) -> near_contract_standards::storage_management::StorageBalanceBounds {
        self.token.storage_balance_bounds()
    }

    fn storage_balance_of(
        &self,
        account_id: AccountId,
    ) -> Option<near_contract_standards::storage_management::StorageBalance> {
        self.token.storage_balance_of(account_id)
    }

    #[payable]
    fn storage_unregister(&mut self, force: Option<bool>) -> bool {
        self.token.storage_unregister(force)
    }
}

#[near]
impl FungibleTokenMetadataProvider for Contract {
    fn ft_metadata(&self) -> FungibleTokenMetadata {
        self.metadata.clone()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
