use soroban_sdk::{contract, contractimpl, panic_with_error, token, Address, Env, Vec};

use crate::errors::WalletError;
use crate::events;
use crate::types::{Action, DataKey, Transaction, MIN_SIGNERS};

#[contract]
pub struct QuorumWallet;

#[contractimpl]
impl QuorumWallet {
    /// Set up the signer set and the token this wallet holds. The quorum
    /// threshold is derived from the signer count as floor(n/2)+1 and is
    /// recomputed whenever membership changes.
    pub fn initialize(env: Env, token: Address, signers: Vec<Address>) {
        if env.storage().instance().has(&DataKey::Initialized) {
            panic_with_error!(&env, WalletError::AlreadyInitialized);
        }

        if signers.len() < MIN_SIGNERS {
            panic_with_error!(&env, WalletError::TooFewSigners);
        }

        // Check for duplicate signers
        for i in 0..signers.len() {
            for j in (i + 1)..signers.len() {
                if signers.get_unchecked(i) == signers.get_unchecked(j) {
                    panic_with_error!(&env, WalletError::DuplicateSigner);
                }
            }
        }

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage()
            .instance()
            .set(&DataKey::SignerCount, &signers.len());
        env.storage()
            .instance()
            .set(&DataKey::Threshold, &(signers.len() / 2 + 1));
        env.storage().instance().set(&DataKey::TxCount, &0u64);

        for signer in signers {
            env.storage().instance().set(&DataKey::Signer(signer), &true);
        }
    }

    /// Fund the wallet. Open to any source, member or not; a zero amount
    /// is a legal no-op.
    pub fn deposit(env: Env, from: Address, amount: i128) {
        Self::require_initialized(&env);

        if amount > 0 {
            let token: Address = env.storage().instance().get(&DataKey::Token).unwrap();
            token::Client::new(&env, &token).transfer(
                &from,
                &env.current_contract_address(),
                &amount,
            );
        }

        events::deposit(&env, &from, amount);
    }

    /// Propose moving `amount` of the wallet token to `to`. The amount is
    /// not validated here; funding only matters at execution time.
    pub fn propose_transfer(env: Env, caller: Address, to: Address, amount: i128) -> u64 {
        Self::require_initialized(&env);
        Self::require_member(&env, &caller);

        Self::submit(
            &env,
            &caller,
            Action::Transfer(to.clone(), amount),
            &to,
            amount,
        )
    }

    pub fn propose_add_signer(env: Env, caller: Address, signer: Address) -> u64 {
        Self::require_initialized(&env);
        Self::require_member(&env, &caller);

        if env
            .storage()
            .instance()
            .has(&DataKey::Signer(signer.clone()))
        {
            panic_with_error!(&env, WalletError::SignerAlreadyExists);
        }

        // Membership actions have no transfer target; the observable
        // fields fall back to the wallet's own address and zero, with the
        // real target carried in the stored action.
        let own = env.current_contract_address();
        Self::submit(&env, &caller, Action::AddSigner(signer), &own, 0)
    }

    pub fn propose_remove_signer(env: Env, caller: Address, signer: Address) -> u64 {
        Self::require_initialized(&env);
        Self::require_member(&env, &caller);

        if !env
            .storage()
            .instance()
            .has(&DataKey::Signer(signer.clone()))
        {
            panic_with_error!(&env, WalletError::SignerNotFound);
        }

        let own = env.current_contract_address();
        Self::submit(&env, &caller, Action::RemoveSigner(signer), &own, 0)
    }

    /// Record the caller's confirmation and, if the quorum threshold is
    /// now met, execute the transaction within this same call.
    pub fn confirm(env: Env, caller: Address, id: u64) {
        Self::require_initialized(&env);
        Self::require_member(&env, &caller);

        Self::record_confirmation(&env, &caller, id);
    }

    /// Withdraw a confirmation given earlier. Only decreases the count,
    /// so it never triggers execution.
    pub fn revoke(env: Env, caller: Address, id: u64) {
        Self::require_initialized(&env);
        Self::require_member(&env, &caller);

        let mut tx = Self::load_transaction(&env, id);
        if tx.executed {
            panic_with_error!(&env, WalletError::AlreadyFinalized);
        }

        let key = DataKey::Confirmed(id, caller.clone());
        if !env.storage().instance().get(&key).unwrap_or(false) {
            panic_with_error!(&env, WalletError::NotConfirmed);
        }

        // Flip the record back rather than deleting it; the caller may
        // confirm again later.
        env.storage().instance().set(&key, &false);
        tx.confirmations -= 1;
        env.storage().instance().set(&DataKey::Transaction(id), &tx);

        events::revoked(&env, id, &caller);
    }

    pub fn is_member(env: Env, who: Address) -> bool {
        Self::require_initialized(&env);
        env.storage().instance().has(&DataKey::Signer(who))
    }

    pub fn has_confirmed(env: Env, id: u64, who: Address) -> bool {
        Self::require_initialized(&env);
        env.storage()
            .instance()
            .get(&DataKey::Confirmed(id, who))
            .unwrap_or(false)
    }

    pub fn get_transaction(env: Env, id: u64) -> Transaction {
        Self::require_initialized(&env);
        Self::load_transaction(&env, id)
    }

    pub fn member_count(env: Env) -> u32 {
        Self::require_initialized(&env);
        env.storage().instance().get(&DataKey::SignerCount).unwrap()
    }

    pub fn threshold(env: Env) -> u32 {
        Self::require_initialized(&env);
        env.storage().instance().get(&DataKey::Threshold).unwrap()
    }

    pub fn transaction_count(env: Env) -> u64 {
        Self::require_initialized(&env);
        env.storage().instance().get(&DataKey::TxCount).unwrap()
    }

    /// Append a pending transaction and auto-confirm it as the proposer.
    /// Ids are zero-based and never reused.
    fn submit(
        env: &Env,
        caller: &Address,
        action: Action,
        observable_target: &Address,
        observable_amount: i128,
    ) -> u64 {
        let id: u64 = env.storage().instance().get(&DataKey::TxCount).unwrap();
        env.storage().instance().set(&DataKey::TxCount, &(id + 1));

        let tx = Transaction {
            id,
            proposer: caller.clone(),
            action,
            executed: false,
            confirmations: 0,
        };
        env.storage().instance().set(&DataKey::Transaction(id), &tx);

        events::proposed(env, id, caller, observable_target, observable_amount);

        Self::record_confirmation(env, caller, id);

        id
    }

    /// Phase one of confirmation: bookkeeping. Phase two (execution) runs
    /// only once the stored count reaches the current threshold.
    fn record_confirmation(env: &Env, caller: &Address, id: u64) {
        let mut tx = Self::load_transaction(env, id);
        if tx.executed {
            panic_with_error!(env, WalletError::AlreadyFinalized);
        }

        let key = DataKey::Confirmed(id, caller.clone());
        if env.storage().instance().get(&key).unwrap_or(false) {
            panic_with_error!(env, WalletError::AlreadyConfirmed);
        }

        env.storage().instance().set(&key, &true);
        tx.confirmations += 1;
        env.storage().instance().set(&DataKey::Transaction(id), &tx);

        events::confirmed(env, id, caller);

        let threshold: u32 = env.storage().instance().get(&DataKey::Threshold).unwrap();
        if tx.confirmations >= threshold {
            Self::try_execute(env, caller, id);
        }
    }

    /// Attempt execution of a transaction whose confirmations have reached
    /// the threshold. The executed flag is flipped before the effect runs;
    /// if the effect fails the flip is undone, the confirmations stay
    /// counted, and the next confirmation retries.
    fn try_execute(env: &Env, caller: &Address, id: u64) {
        let mut tx = Self::load_transaction(env, id);
        if tx.executed {
            panic_with_error!(env, WalletError::InvariantViolation);
        }

        let threshold: u32 = env.storage().instance().get(&DataKey::Threshold).unwrap();
        if tx.confirmations < threshold {
            panic_with_error!(env, WalletError::InvariantViolation);
        }

        tx.executed = true;
        env.storage().instance().set(&DataKey::Transaction(id), &tx);

        match Self::apply_action(env, &tx.action) {
            Ok(()) => {
                events::executed(env, id, caller);
            }
            Err(reason) => {
                tx.executed = false;
                env.storage().instance().set(&DataKey::Transaction(id), &tx);
                events::execution_failed(env, id, caller, reason);
            }
        }
    }

    /// Perform a transaction's external effect. Errors here are reported
    /// through the execution-failed event rather than aborting the call,
    /// so the confirmation that triggered the attempt stays counted.
    fn apply_action(env: &Env, action: &Action) -> Result<(), WalletError> {
        match action {
            Action::Transfer(to, amount) => {
                let token: Address = env.storage().instance().get(&DataKey::Token).unwrap();
                let result = token::Client::new(env, &token).try_transfer(
                    &env.current_contract_address(),
                    to,
                    amount,
                );
                match result {
                    Ok(_) => Ok(()),
                    Err(_) => Err(WalletError::ExecutionFailed),
                }
            }
            Action::AddSigner(signer) => {
                // Re-checked here in case membership changed between
                // proposal and execution.
                if env
                    .storage()
                    .instance()
                    .has(&DataKey::Signer(signer.clone()))
                {
                    return Err(WalletError::SignerAlreadyExists);
                }

                env.storage()
                    .instance()
                    .set(&DataKey::Signer(signer.clone()), &true);
                let count: u32 =
                    env.storage().instance().get(&DataKey::SignerCount).unwrap();
                let threshold = Self::set_membership(env, count + 1);

                events::signer_added(env, signer, threshold);
                Ok(())
            }
            Action::RemoveSigner(signer) => {
                if !env
                    .storage()
                    .instance()
                    .has(&DataKey::Signer(signer.clone()))
                {
                    return Err(WalletError::SignerNotFound);
                }

                let count: u32 =
                    env.storage().instance().get(&DataKey::SignerCount).unwrap();
                if count - 1 < MIN_SIGNERS {
                    return Err(WalletError::BelowMinimumSigners);
                }

                env.storage()
                    .instance()
                    .remove(&DataKey::Signer(signer.clone()));
                let threshold = Self::set_membership(env, count - 1);

                events::signer_removed(env, signer, threshold);
                Ok(())
            }
        }
    }

    /// Store the new signer count and the threshold derived from it.
    fn set_membership(env: &Env, count: u32) -> u32 {
        let threshold = count / 2 + 1;
        env.storage().instance().set(&DataKey::SignerCount, &count);
        env.storage().instance().set(&DataKey::Threshold, &threshold);
        threshold
    }

    fn load_transaction(env: &Env, id: u64) -> Transaction {
        if !env.storage().instance().has(&DataKey::Transaction(id)) {
            panic_with_error!(env, WalletError::NotFound);
        }
        env.storage()
            .instance()
            .get(&DataKey::Transaction(id))
            .unwrap()
    }

    fn require_member(env: &Env, who: &Address) {
        if !env.storage().instance().has(&DataKey::Signer(who.clone())) {
            panic_with_error!(env, WalletError::Unauthorized);
        }
    }

    fn require_initialized(env: &Env) {
        if !env.storage().instance().has(&DataKey::Initialized) {
            panic_with_error!(env, WalletError::NotInitialized);
        }
    }
}
