//! # Settlement Module
//!
//! Outbound asset transfers settle asynchronously: the vault debits its own
//! books, dispatches `mt_transfer` on the asset contract, and finalizes in a
//! callback. The optimistic mutation is recorded as a [`PendingSettlement`]
//! keyed by the share owner, which doubles as the per-account settlement
//! lock: an owner cannot start a second redeem or withdraw while one is
//! still awaiting its callback.
//!
//! ## Settlement Lifecycle
//!
//! 1. **Locked**: shares burned and `total_assets` debited, record stored,
//!    transfer dispatched
//! 2. **Committed**: the callback saw success; the record is consumed and
//!    the `VaultWithdraw` event emitted
//! 3. **Rolled back**: the callback saw failure; the record is consumed,
//!    the shares re-minted and `total_assets` restored

use near_contract_standards::fungible_token::{
    events::{FtBurn, FtMint},
    FungibleTokenCore,
};
use near_sdk::serde::Serialize;
use near_sdk::{
    env, ext_contract, json_types::U128, near, require, AccountId, Gas, NearToken, Promise,
    PromiseResult,
};
use schemars::JsonSchema;

use crate::errors;
use crate::multi_token::ext_mt_core;
use crate::vault_standards::events::VaultWithdraw;
use crate::{Contract, ContractExt};

/// Gas allocation for the outbound asset transfer.
const GAS_FOR_MT_TRANSFER: Gas = Gas::from_tgas(30);

/// Gas allocation for the `resolve_settlement` callback.
const GAS_FOR_RESOLVE_SETTLEMENT: Gas = Gas::from_tgas(10);

// ============================================================================
// External Contract Interface
// ============================================================================

/// Callback interface for settlement resolution.
#[allow(dead_code)]
#[ext_contract(ext_self)]
trait _ExtSelf {
    /// Called after the asset transfer to commit or roll back a settlement.
    fn resolve_settlement(&mut self, owner_id: AccountId) -> U128;
}

// ============================================================================
// Data Structures
// ============================================================================

/// The operation a settlement belongs to.
#[near(serializers = [json, borsh])]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum SettlementKind {
    /// Assets in, shares minted. Commits synchronously in the receiver hook.
    Deposit,
    /// Exact shares burned, proportional assets out.
    Redeem,
    /// Exact assets out, proportional shares burned.
    Withdraw,
}

/// Continuation record for one in-flight settlement.
///
/// Created when the outbound transfer is dispatched, consumed exactly once
/// by [`Contract::resolve_settlement`]. Its presence in the settlement map
/// is the per-owner lock.
#[near(serializers = [borsh])]
#[derive(Clone)]
pub struct PendingSettlement {
    /// Which operation initiated the settlement.
    pub kind: SettlementKind,
    /// The account that called the operation.
    pub initiator: AccountId,
    /// The account whose shares were burned.
    pub owner_id: AccountId,
    /// The account receiving the assets.
    pub receiver_id: AccountId,
    /// Assets debited from the vault total.
    pub assets: u128,
    /// Shares burned from the owner.
    pub shares: u128,
    /// Optional memo, echoed into the final event.
    pub memo: Option<String>,
}

/// JSON view of an in-flight settlement.
#[derive(Serialize, JsonSchema, Clone)]
#[serde(crate = "near_sdk::serde")]
pub struct PendingSettlementView {
    pub kind: String,
    pub owner_id: String,
    pub receiver_id: String,
    pub assets: String,
    pub shares: String,
}

impl From<PendingSettlement> for PendingSettlementView {
    fn from(value: PendingSettlement) -> Self {
        PendingSettlementView {
            kind: format!("{:?}", value.kind),
            owner_id: value.owner_id.to_string(),
            receiver_id: value.receiver_id.to_string(),
            assets: value.assets.to_string(),
            shares: value.shares.to_string(),
        }
    }
}

// ============================================================================
// Contract Implementation
// ============================================================================

impl Contract {
    /// Executes a redeem or withdraw settlement following the CEI
    /// (Checks-Effects-Interactions) pattern.
    ///
    /// 1. **Checks**: settlement lock, share balance, vault liquidity
    /// 2. **Effects**: burn shares, debit `total_assets`, store the record
    /// 3. **Interactions**: dispatch the asset transfer with a resolution
    ///    callback
    ///
    /// The ledger is debited and the record stored *before* the outbound
    /// call is created, so any invocation interleaved with the transfer
    /// observes the lock and the already-debited totals.
    pub fn internal_execute_settlement(
        &mut self,
        kind: SettlementKind,
        owner_id: AccountId,
        receiver_id: AccountId,
        shares: u128,
        assets: u128,
        memo: Option<String>,
    ) -> Promise {
        // Checks
        require!(
            !self.pending_settlements.contains_key(&owner_id),
            errors::ERR_OPERATION_IN_PROGRESS
        );
        require!(
            self.token.ft_balance_of(owner_id.clone()).0 >= shares,
            errors::ERR_INSUFFICIENT_BALANCE
        );
        require!(assets <= self.total_assets, "Insufficient vault assets");

        // Effects
        self.token.internal_withdraw(&owner_id, shares);
        self.total_assets = self
            .total_assets
            .checked_sub(assets)
            .unwrap_or_else(|| env::panic_str(errors::ERR_INTERNAL_CONSISTENCY));

        FtBurn {
            owner_id: &owner_id,
            amount: U128(shares),
            memo: Some("Withdrawal"),
        }
        .emit();

        self.pending_settlements.insert(
            owner_id.clone(),
            PendingSettlement {
                kind,
                initiator: env::predecessor_account_id(),
                owner_id: owner_id.clone(),
                receiver_id: receiver_id.clone(),
                assets,
                shares,
                memo: memo.clone(),
            },
        );

        env::log_str(&format!(
            "settlement_locked owner={} receiver={} shares={} assets={}",
            owner_id, receiver_id, shares, assets
        ));

        // Interactions
        ext_mt_core::ext(self.asset.clone())
            .with_attached_deposit(NearToken::from_yoctonear(1))
            .with_static_gas(GAS_FOR_MT_TRANSFER)
            .mt_transfer(
                receiver_id,
                self.asset_token_id.clone(),
                U128(assets),
                None,
                memo,
            )
            .then(
                ext_self::ext(env::current_account_id())
                    .with_static_gas(GAS_FOR_RESOLVE_SETTLEMENT)
                    .resolve_settlement(owner_id),
            )
    }
}

#[near]
impl Contract {
    /// Finalizes a settlement after the asset transfer completes.
    ///
    /// Consumes the pending record for `owner_id`. On success the settlement
    /// commits and `VaultWithdraw` is emitted; on failure the burned shares
    /// are re-minted and `total_assets` restored, leaving the books exactly
    /// as they were before the operation started.
    #[private]
    pub fn resolve_settlement(&mut self, owner_id: AccountId) -> U128 {
        let settlement = self
            .pending_settlements
            .remove(&owner_id)
            .unwrap_or_else(|| env::panic_str(errors::ERR_INTERNAL_CONSISTENCY));

        match env::promise_result(0) {
            PromiseResult::Successful(_) => {
                VaultWithdraw {
                    owner_id: &settlement.owner_id,
                    receiver_id: &settlement.receiver_id,
                    token_id: &self.asset_token_id,
                    shares: U128(settlement.shares),
                    assets: U128(settlement.assets),
                    memo: settlement.memo.as_deref(),
                }
                .emit();

                env::log_str(&format!(
                    "settlement_committed kind={:?} owner={} shares={} assets={}",
                    settlement.kind, settlement.owner_id, settlement.shares, settlement.assets
                ));

                U128(settlement.assets)
            }
            _ => {
                // Transfer failed: reverse the optimistic debit
                self.token
                    .internal_deposit(&settlement.owner_id, settlement.shares);
                self.total_assets = self
                    .total_assets
                    .checked_add(settlement.assets)
                    .unwrap_or_else(|| env::panic_str(errors::ERR_INTERNAL_CONSISTENCY));

                FtMint {
                    owner_id: &settlement.owner_id,
                    amount: U128(settlement.shares),
                    memo: Some("Settlement rollback"),
                }
                .emit();

                env::log_str(&format!(
                    "settlement_rolled_back owner={} shares={} assets={}",
                    settlement.owner_id, settlement.shares, settlement.assets
                ));

                U128(0)
            }
        }
    }

    /// Returns the in-flight settlement for `owner_id`, if any.
    pub fn get_pending_settlement(&self, owner_id: AccountId) -> Option<PendingSettlementView> {
        self.pending_settlements
            .get(&owner_id)
            .cloned()
            .map(PendingSettlementView::from)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
