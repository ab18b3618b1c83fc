pub const DAY_IN_LEDGERS: u32 = 17280;

pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Scale factor for fixed-point per-unit reward rates.
pub const PRECISION: i128 = 1_000_000_000_000_000_000;

/// Fee and split parameters are expressed in basis points of this denominator.
pub const BPS_DENOMINATOR: i64 = 10_000;

/// Depth of the referral payout cascade.
pub const MAX_REFERRAL_LEVELS: u32 = 2;
