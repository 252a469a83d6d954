//! # Test Utilities
//!
//! Helper functions and builders for unit testing the vault. These handle
//! NEAR SDK context initialization and contract setup so individual tests
//! only state the vault state they care about.

/// Helper functions for test context and contract initialization.
#[cfg(test)]
pub mod helpers {
    use crate::Contract;
    use near_contract_standards::fungible_token::metadata::FungibleTokenMetadata;
    use near_sdk::test_utils::VMContextBuilder;
    use near_sdk::{testing_env, NearToken};

    /// Initializes the NEAR VM context for testing.
    ///
    /// Sets up the predecessor account and attached deposit for the
    /// subsequent contract calls.
    pub fn init_ctx(predecessor: &str, deposit_yocto: u128) {
        let mut builder = VMContextBuilder::new();
        builder
            .predecessor_account_id(predecessor.parse().unwrap())
            .attached_deposit(NearToken::from_yoctonear(deposit_yocto));
        testing_env!(builder.build());
    }

    /// Share token metadata used across tests.
    pub fn share_metadata() -> FungibleTokenMetadata {
        FungibleTokenMetadata {
            spec: "ft-1.0.0".to_string(),
            name: "USDT Vault Shares".to_string(),
            symbol: "vUSDT".to_string(),
            icon: None,
            reference: None,
            reference_hash: None,
            decimals: 6,
        }
    }

    /// Initializes a vault managing `token1` on the given asset contract.
    pub fn init_contract(owner: &str, asset: &str) -> Contract {
        init_ctx(owner, 0);
        Contract::init(
            owner.parse().unwrap(),
            asset.parse().unwrap(),
            "token1".to_string(),
            share_metadata(),
        )
    }
}

/// Builder pattern for flexible vault configuration in tests.
#[cfg(test)]
pub mod builders {
    use crate::test_utils::helpers::{init_ctx, share_metadata};
    use crate::Contract;

    /// Builder for test `Contract` instances with seeded vault state.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let contract = ContractBuilder::new("owner.test", "mt.test")
    ///     .total_assets(1_000)
    ///     .with_shares("alice.test", 500)
    ///     .predecessor("alice.test")
    ///     .attached(1)
    ///     .build();
    /// ```
    pub struct ContractBuilder {
        owner: String,
        asset: String,
        asset_token_id: String,
        total_assets: u128,
        shares: Vec<(String, u128)>,
        predecessor: Option<String>,
        attached: u128,
    }

    impl ContractBuilder {
        /// Creates a new builder with required owner and asset accounts.
        pub fn new(owner: &str, asset: &str) -> Self {
            Self {
                owner: owner.to_string(),
                asset: asset.to_string(),
                asset_token_id: "token1".to_string(),
                total_assets: 0,
                shares: Vec::new(),
                predecessor: Some(owner.to_string()),
                attached: 0,
            }
        }

        /// Sets the managed token ID.
        pub fn asset_token_id(mut self, token_id: &str) -> Self {
            self.asset_token_id = token_id.to_string();
            self
        }

        /// Seeds the vault's managed asset total.
        pub fn total_assets(mut self, n: u128) -> Self {
            self.total_assets = n;
            self
        }

        /// Registers `account` in the share ledger without a balance.
        pub fn register_account(self, account: &str) -> Self {
            self.with_shares(account, 0)
        }

        /// Registers `account` and seeds it with `amount` shares.
        pub fn with_shares(mut self, account: &str, amount: u128) -> Self {
            self.shares.push((account.to_string(), amount));
            self
        }

        /// Sets the predecessor (caller) account for subsequent calls.
        pub fn predecessor(mut self, id: &str) -> Self {
            self.predecessor = Some(id.to_string());
            self
        }

        /// Sets the attached deposit in yoctoNEAR.
        pub fn attached(mut self, yocto: u128) -> Self {
            self.attached = yocto;
            self
        }

        /// Builds and returns the configured `Contract` instance.
        pub fn build(self) -> Contract {
            init_ctx(&self.owner, 0);
            let mut c = Contract::init(
                self.owner.parse().unwrap(),
                self.asset.parse().unwrap(),
                self.asset_token_id.clone(),
                share_metadata(),
            );
            for (account, amount) in &self.shares {
                let account_id = account.parse().unwrap();
                c.token.internal_register_account(&account_id);
                if *amount > 0 {
                    c.token.internal_deposit(&account_id, *amount);
                }
            }
            c.total_assets = self.total_assets;
            if let Some(p) = &self.predecessor {
                init_ctx(p, self.attached);
            }
            c
        }
    }
}
