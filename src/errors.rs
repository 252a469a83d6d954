//! Panic messages for vault failure modes.
//!
//! Limit and balance violations abort synchronously, before any state
//! mutation or external call. A failed outbound transfer is deliberately not
//! in this list: the settlement callback recovers it by rolling the
//! optimistic mutation back instead of panicking.

/// Burn or settlement amount exceeds the holder's share balance.
pub const ERR_INSUFFICIENT_BALANCE: &str = "Insufficient share balance";

/// Deposit would mint more shares than `max_mint` allows for the receiver.
pub const ERR_DEPOSIT_EXCEEDS_LIMIT: &str = "Deposit exceeds limit";

/// Redeem request exceeds `max_redeem` for the owner.
pub const ERR_REDEEM_EXCEEDS_LIMIT: &str = "Exceeds max redeem";

/// Withdraw request exceeds `max_withdraw` for the owner.
pub const ERR_WITHDRAW_EXCEEDS_LIMIT: &str = "Exceeds max withdraw";

/// A settlement for this owner is still awaiting its callback.
pub const ERR_OPERATION_IN_PROGRESS: &str = "Operation already in progress for this account";

/// Vault totals stopped moving in lockstep. Never recovered.
pub const ERR_INTERNAL_CONSISTENCY: &str = "Internal consistency fault: vault totals out of sync";
