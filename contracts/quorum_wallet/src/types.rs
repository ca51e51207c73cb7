use soroban_sdk::{contracttype, Address};

/// Signers must always number at least this many; enforced at
/// initialization and again before any removal executes.
pub const MIN_SIGNERS: u32 = 3;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Token,
    SignerCount,
    Signer(Address),
    Threshold,
    TxCount,
    Transaction(u64),
    Confirmed(u64, Address),
}

/// The effect a transaction performs once it gathers a quorum of
/// confirmations. Membership changes go through the same lifecycle as
/// transfers; the variant tag is the only thing execution dispatches on.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    /// Move (amount) of the wallet token to the destination address.
    Transfer(Address, i128),
    /// Admit a new signer and recompute the threshold.
    AddSigner(Address),
    /// Retire a signer and recompute the threshold. Refused at execution
    /// time if it would leave fewer than MIN_SIGNERS members.
    RemoveSigner(Address),
}

/// Ledger record for one proposed action. Ids are zero-based and strictly
/// increasing; records are never deleted. `executed` flips exactly once.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transaction {
    pub id: u64,
    pub proposer: Address,
    pub action: Action,
    pub executed: bool,
    pub confirmations: u32,
}
