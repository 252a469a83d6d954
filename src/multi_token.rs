use near_sdk::{ext_contract, json_types::U128, AccountId, PromiseOrValue};

/// Receiver side of the NEP-245 Multi Token standard.
///
/// The vault implements this to accept deposits: the asset contract routes
/// tokens in via `mt_transfer_call` and invokes `mt_on_transfer` on the
/// receiver. The returned amounts are the unused portion per token, which
/// the asset contract refunds to the sender.
pub trait MultiTokenReceiver {
    fn mt_on_transfer(
        &mut self,
        sender_id: AccountId,
        previous_owner_id: AccountId,
        token_ids: Vec<String>,
        amounts: Vec<U128>,
        msg: String,
    ) -> PromiseOrValue<Vec<U128>>;
}

/// Outbound NEP-245 interface used to return assets to share holders.
#[ext_contract(ext_mt_core)]
pub trait _ExtMultiTokenCore {
    fn mt_transfer(
        &mut self,
        receiver_id: AccountId,
        token_id: String,
        amount: U128,
        approval: Option<u64>,
        memo: Option<String>,
    );
}
