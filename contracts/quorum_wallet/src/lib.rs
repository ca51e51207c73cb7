#![no_std]

mod errors;
mod events;
mod types;
mod wallet;


pub use crate::errors::WalletError;
pub use crate::types::{Action, Transaction, MIN_SIGNERS};
pub use crate::wallet::{QuorumWallet, QuorumWalletClient};
