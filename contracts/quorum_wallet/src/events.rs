use soroban_sdk::{symbol_short, Address, Env};

use crate::errors::WalletError;

// Event topics always carry the transaction id and the acting signer
// where one exists, so an indexer can follow a transaction's lifecycle
// without decoding the data payload.

pub fn proposed(env: &Env, id: u64, proposer: &Address, target: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("proposed"), id, proposer.clone()),
        (target.clone(), amount),
    );
}

pub fn confirmed(env: &Env, id: u64, signer: &Address) {
    env.events()
        .publish((symbol_short!("confirmed"), id, signer.clone()), ());
}

pub fn revoked(env: &Env, id: u64, signer: &Address) {
    env.events()
        .publish((symbol_short!("revoked"), id, signer.clone()), ());
}

pub fn executed(env: &Env, id: u64, executor: &Address) {
    env.events()
        .publish((symbol_short!("executed"), id, executor.clone()), ());
}

pub fn execution_failed(env: &Env, id: u64, executor: &Address, reason: WalletError) {
    env.events().publish(
        (symbol_short!("exec_fail"), id, executor.clone()),
        reason as u32,
    );
}

pub fn signer_added(env: &Env, signer: &Address, threshold: u32) {
    env.events()
        .publish((symbol_short!("sgn_add"), signer.clone()), threshold);
}

pub fn signer_removed(env: &Env, signer: &Address, threshold: u32) {
    env.events()
        .publish((symbol_short!("sgn_rem"), signer.clone()), threshold);
}

pub fn deposit(env: &Env, from: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("deposit"), from.clone()), amount);
}
