use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum WalletError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    TooFewSigners = 3,
    DuplicateSigner = 4,
    Unauthorized = 5,
    NotFound = 6,
    AlreadyFinalized = 7,
    AlreadyConfirmed = 8,
    NotConfirmed = 9,
    SignerAlreadyExists = 10,
    SignerNotFound = 11,
    BelowMinimumSigners = 12,
    ExecutionFailed = 13,
    InvariantViolation = 14,
}
