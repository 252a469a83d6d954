//! # Vault Events
//!
//! NEP-621 event logging for vault operations, emitted as JSON logs with
//! the `EVENT_JSON:` prefix per NEP-297.
//!
//! ## Event Types
//!
//! - `VaultDeposit`: assets entered the vault and shares were minted
//! - `VaultWithdraw`: shares were burned and assets were transferred out

use near_sdk::json_types::U128;
use near_sdk::serde::Serialize;
use near_sdk::{env, AccountIdRef};

// ============================================================================
// Event Wrapper
// ============================================================================

/// Top-level event wrapper carrying the standard identifier.
#[derive(Serialize, Debug)]
#[serde(crate = "near_sdk::serde")]
#[serde(tag = "standard")]
#[must_use = "don't forget to `.emit()` this event"]
#[serde(rename_all = "snake_case")]
pub(crate) enum NearEvent<'a> {
    Nep621(Nep621Event<'a>),
}

impl<'a> NearEvent<'a> {
    fn to_json_string(&self) -> String {
        #[allow(clippy::redundant_closure)]
        serde_json::to_string(self)
            .ok()
            .unwrap_or_else(|| env::abort())
    }

    fn to_json_event_string(&self) -> String {
        format!("EVENT_JSON:{}", self.to_json_string())
    }

    /// Logs the event to the NEAR runtime.
    pub(crate) fn emit(self) {
        near_sdk::env::log_str(&self.to_json_event_string());
    }
}

// ============================================================================
// Vault Deposit Event
// ============================================================================

/// Emitted on every committed deposit.
#[must_use]
#[derive(Serialize, Debug, Clone)]
#[serde(crate = "near_sdk::serde")]
pub struct VaultDeposit<'a> {
    /// The account that sent the assets.
    pub sender_id: &'a AccountIdRef,
    /// The account that received the shares.
    pub owner_id: &'a AccountIdRef,
    /// Token ID of the deposited asset.
    pub token_id: &'a str,
    /// The amount of assets credited to the vault.
    pub assets: U128,
    /// The amount of shares minted.
    pub shares: U128,
    /// Optional memo for the deposit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<&'a str>,
}

impl VaultDeposit<'_> {
    /// Emits a single deposit event.
    pub fn emit(self) {
        Self::emit_many(&[self])
    }

    /// Emits multiple deposit events in a single log.
    pub fn emit_many(data: &[VaultDeposit<'_>]) {
        new_621_v1(Nep621EventKind::VaultDeposit(data)).emit()
    }
}

// ============================================================================
// Vault Withdraw Event
// ============================================================================

/// Emitted on every committed redeem or withdraw.
#[must_use]
#[derive(Serialize, Debug, Clone)]
#[serde(crate = "near_sdk::serde")]
pub struct VaultWithdraw<'a> {
    /// The account that owned the burned shares.
    pub owner_id: &'a AccountIdRef,
    /// The account that received the assets.
    pub receiver_id: &'a AccountIdRef,
    /// Token ID of the transferred asset.
    pub token_id: &'a str,
    /// The amount of shares burned.
    pub shares: U128,
    /// The amount of assets transferred out.
    pub assets: U128,
    /// Optional memo for the withdrawal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<&'a str>,
}

impl VaultWithdraw<'_> {
    /// Emits a single withdraw event.
    pub fn emit(self) {
        Self::emit_many(&[self])
    }

    /// Emits multiple withdraw events in a single log.
    pub fn emit_many(data: &[VaultWithdraw<'_>]) {
        new_621_v1(Nep621EventKind::VaultWithdraw(data)).emit()
    }
}

// ============================================================================
// Internal Event Structures
// ============================================================================

#[derive(Serialize, Debug)]
#[serde(crate = "near_sdk::serde")]
pub(crate) struct Nep621Event<'a> {
    version: &'static str,
    #[serde(flatten)]
    event_kind: Nep621EventKind<'a>,
}

#[derive(Serialize, Debug)]
#[serde(crate = "near_sdk::serde")]
#[serde(tag = "event", content = "data")]
#[serde(rename_all = "snake_case")]
#[allow(clippy::enum_variant_names)]
enum Nep621EventKind<'a> {
    VaultDeposit(&'a [VaultDeposit<'a>]),
    VaultWithdraw(&'a [VaultWithdraw<'a>]),
}

fn new_621<'a>(version: &'static str, event_kind: Nep621EventKind<'a>) -> NearEvent<'a> {
    NearEvent::Nep621(Nep621Event {
        version,
        event_kind,
    })
}

fn new_621_v1(event_kind: Nep621EventKind) -> NearEvent {
    new_621("1.0.0", event_kind)
}
