use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ErrorCode {
    AlreadyInitialized = 1,
    NotAuthorized = 2,
    AdminNotSet = 3,
    InvalidActivity = 4,
    ZeroAmount = 5,
    ZeroId = 6,
    ZeroValue = 7,
    NotOwner = 8,
    AlreadyClosed = 9,
    AlreadyReleased = 10,
    AlreadyClaimed = 11,
    AlreadyEnded = 12,
    TimelockActive = 13,
    RoundNotEnded = 14,
    StakedAfterRoundStart = 15,
    InsufficientTokens = 16,
    InvalidTillTime = 17,
    InvalidAddress = 18,
    StakeNotFound = 19,
    WithdrawalNotFound = 20,
    RoundNotFound = 21,
    AccountNotFound = 22,
    InvalidFee = 23,
    InvalidReferralConfig = 24,
    MathError = 25,
}

pub type HarvestResult<T = ()> = core::result::Result<T, ErrorCode>;
