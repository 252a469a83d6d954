//! # Tokenized Multi-Token Vault
//!
//! A NEAR smart contract implementing a tokenized vault over a single token
//! ID of an external NEP-245 multi token contract. Depositors route the
//! underlying asset in via `mt_transfer_call` and receive NEP-141 vault
//! shares representing a proportional claim on the managed pool; share
//! holders exit through `redeem` (exact shares) or `withdraw` (exact
//! assets), which settle asynchronously against the asset contract.
//!
//! ## Architecture
//!
//! The contract is organized into several modules:
//! - [`vault`]: Deposit handling and the vault share token surface
//! - [`settlement`]: Lock/commit/rollback lifecycle for outbound transfers
//! - [`multi_token`]: Minimal NEP-245 interfaces used by the vault
//! - [`vault_standards`]: NEP-621 vault standard implementation
//! - [`errors`]: Panic message constants for the vault failure modes

use near_sdk::{
    borsh::{self, BorshDeserialize, BorshSerialize},
    env, near, require,
    store::IterableMap,
    AccountId, BorshStorageKey, PanicOnDefault,
};

use near_contract_standards::fungible_token::{
    core_impl::FungibleToken, metadata::FungibleTokenMetadata,
};

mod errors;
mod multi_token;
mod settlement;
mod vault;
mod vault_standards;

#[cfg(test)]
pub mod test_utils;

use settlement::PendingSettlement;

/// Storage keys for NEAR SDK collections.
#[derive(BorshSerialize, BorshDeserialize, BorshStorageKey)]
pub enum StorageKey {
    /// Storage prefix for the NEP-141 fungible token (vault shares).
    FungibleToken,
    /// Storage prefix for in-flight settlements keyed by share owner.
    PendingSettlements,
}

/// Main contract state: vault configuration, the share ledger and the
/// settlement tracking around it.
#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct Contract {
    /// The account authorized to manage contract settings.
    pub owner_id: AccountId,
    /// Whether the contract is paused (all state-changing operations blocked).
    pub is_paused: bool,
    /// NEP-141 fungible token representing vault shares.
    pub token: FungibleToken,
    /// Metadata for the vault share token.
    pub metadata: FungibleTokenMetadata,
    /// Account ID of the underlying NEP-245 multi token contract.
    pub asset: AccountId,
    /// Token ID of the managed asset within the multi token contract.
    pub asset_token_id: String,
    /// Total assets the vault believes it manages. Mutated only by
    /// committed settlements.
    pub total_assets: u128,
    /// At most one in-flight settlement per share owner.
    pub pending_settlements: IterableMap<AccountId, PendingSettlement>,
}

#[near]
impl Contract {
    /// Initializes the vault.
    ///
    /// # Arguments
    ///
    /// * `owner_id` - Account authorized to manage contract settings
    /// * `asset` - Account ID of the underlying NEP-245 multi token contract
    /// * `asset_token_id` - Token ID this vault manages on that contract
    /// * `metadata` - Fungible token metadata for the vault shares
    #[init]
    #[private]
    pub fn init(
        owner_id: AccountId,
        asset: AccountId,
        asset_token_id: String,
        metadata: FungibleTokenMetadata,
    ) -> Self {
        Self {
            owner_id,
            is_paused: false,
            token: FungibleToken::new(StorageKey::FungibleToken),
            metadata,
            asset,
            asset_token_id,
            total_assets: 0,
            pending_settlements: IterableMap::new(StorageKey::PendingSettlements),
        }
    }

    /// Asserts that the caller is the contract owner.
    pub fn require_owner(&self) {
        require!(env::predecessor_account_id() == self.owner_id);
    }

    /// Asserts that the contract is not paused.
    pub fn require_not_paused(&self) {
        require!(!self.is_paused, "Contract is paused");
    }

    /// Pauses the contract, blocking all state-changing operations.
    /// View methods remain accessible.
    pub fn pause(&mut self) {
        self.require_owner();
        self.is_paused = true;
    }

    /// Unpauses the contract, resuming normal operations.
    pub fn unpause(&mut self) {
        self.require_owner();
        self.is_paused = false;
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::builders::ContractBuilder;
    use crate::test_utils::helpers::{init_contract, init_ctx};
    use crate::vault_standards::VaultCore;
    use near_contract_standards::fungible_token::FungibleTokenCore;
    use near_sdk::json_types::U128;

    #[test]
    fn init_sets_configuration() {
        let contract = init_contract("owner.test", "mt.test");

        assert_eq!(contract.asset(), "mt.test".parse::<near_sdk::AccountId>().unwrap());
        assert_eq!(contract.asset_token_id(), "token1");
        assert_eq!(contract.total_assets(), U128(0));
        assert_eq!(contract.ft_total_supply(), U128(0));
        assert!(!contract.is_paused);
    }

    #[test]
    #[should_panic(expected = "Contract is paused")]
    fn pause_blocks_redeem() {
        let mut contract = ContractBuilder::new("owner.test", "mt.test")
            .total_assets(1_000)
            .with_shares("alice.test", 500)
            .build();

        init_ctx("owner.test", 0);
        contract.pause();

        init_ctx("alice.test", 1);
        let _ = contract.redeem(U128(100), None, None);
    }

    #[test]
    #[should_panic]
    fn pause_requires_owner() {
        let mut contract = init_contract("owner.test", "mt.test");
        init_ctx("mallory.test", 0);
        contract.pause();
    }

    #[test]
    fn unpause_restores_operation() {
        let mut contract = ContractBuilder::new("owner.test", "mt.test")
            .total_assets(1_000)
            .with_shares("alice.test", 500)
            .build();

        init_ctx("owner.test", 0);
        contract.pause();
        contract.unpause();

        init_ctx("alice.test", 1);
        let _ = contract.redeem(U128(100), None, None);
        assert_eq!(contract.total_assets, 800);
    }

    #[test]
    fn share_balances_sum_to_total_supply() {
        let contract = ContractBuilder::new("owner.test", "mt.test")
            .total_assets(1_000)
            .with_shares("alice.test", 200)
            .with_shares("bob.test", 300)
            .build();

        let alice = contract.ft_balance_of("alice.test".parse().unwrap()).0;
        let bob = contract.ft_balance_of("bob.test".parse().unwrap()).0;
        assert_eq!(alice + bob, contract.ft_total_supply().0);
    }
}
