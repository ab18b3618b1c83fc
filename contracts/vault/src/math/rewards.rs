use harvest::constants::PRECISION;
use harvest::error::HarvestResult;
use harvest::math::proportion::bps_of;
use harvest::math::safe_math::SafeMath;
use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_sdk::{Env, Vec};

use crate::storage::ReferralTier;

/// Fixed-point reward rate carried by a finalized round: reward tokens per
/// staked share, scaled by `PRECISION`. The widening multiply runs through
/// an i256 intermediate.
pub fn rate_per_unit(env: &Env, reward_amount: i128, stake_snapshot: i128) -> i128 {
    reward_amount.fixed_mul_floor(env, &PRECISION, &stake_snapshot)
}

/// Gross reward owed to `shares` under a round's fixed-point rate.
pub fn gross_reward(env: &Env, shares: i128, rate_per_unit: i128) -> i128 {
    shares.fixed_mul_floor(env, &rate_per_unit, &PRECISION)
}

/// Splits a gross reward into `(net, protocol_fee, referral_reserve)`.
/// Unlinked claimants keep the reserve share for themselves.
pub fn claim_cuts(
    env: &Env,
    gross: i128,
    farming_fee_bps: i64,
    referral_fee_bps: i64,
    has_referrer: bool,
) -> HarvestResult<(i128, i128, i128)> {
    let protocol_fee = bps_of(env, gross, farming_fee_bps)?;
    let referral_reserve = if has_referrer {
        bps_of(env, gross, referral_fee_bps)?
    } else {
        0
    };
    let net = gross
        .safe_sub(protocol_fee, env)?
        .safe_sub(referral_reserve, env)?;
    Ok((net, protocol_fee, referral_reserve))
}

/// Bonus rate (bps of the level share) for a referrer with `referred_count`
/// actively staking referees. Tiers are ascending by `min_count`; the highest
/// rung reached wins, no rung reached pays nothing.
pub fn tier_rate_bps(tiers: &Vec<ReferralTier>, referred_count: u32) -> i64 {
    let mut rate = 0;
    for tier in tiers.iter() {
        if referred_count >= tier.min_count {
            rate = tier.rate_bps;
        }
    }
    rate
}

#[cfg(test)]
mod tests {
    use soroban_sdk::{vec, Env};
    use test_case::test_case;

    use super::*;

    #[test]
    fn rate_and_gross_are_inverse_for_a_sole_staker() {
        let env = Env::default();

        // 19_000_000_000 rewards over 190_000_000 shares pay 100 per share
        let rate = rate_per_unit(&env, 19_000_000_000, 190_000_000);
        assert_eq!(rate, 100_000_000_000_000_000_000);
        assert_eq!(gross_reward(&env, 190_000_000, rate), 19_000_000_000);
    }

    #[test]
    fn gross_rewards_floor_dust_and_never_exceed_the_pot() {
        let env = Env::default();

        let rate = rate_per_unit(&env, 10_000_000_000, 95_000_000);
        assert_eq!(rate, 105_263_157_894_736_842_105);

        let gross = gross_reward(&env, 95_000_000, rate);
        assert_eq!(gross, 9_999_999_999);
        assert!(gross <= 10_000_000_000);
    }

    #[test]
    fn claim_cuts_split_exactly() {
        let env = Env::default();

        let (net, protocol_fee, reserve) =
            claim_cuts(&env, 19_000_000_000, 2_000, 1_000, true).unwrap();
        assert_eq!(net, 13_300_000_000);
        assert_eq!(protocol_fee, 3_800_000_000);
        assert_eq!(reserve, 1_900_000_000);
        assert_eq!(net + protocol_fee + reserve, 19_000_000_000);
    }

    #[test]
    fn unlinked_claimants_skip_the_referral_reserve() {
        let env = Env::default();

        let (net, protocol_fee, reserve) =
            claim_cuts(&env, 19_000_000_000, 2_000, 1_000, false).unwrap();
        assert_eq!(net, 15_200_000_000);
        assert_eq!(protocol_fee, 3_800_000_000);
        assert_eq!(reserve, 0);
    }

    #[test_case(0 => 10_000 ; "flat single tier pays from zero")]
    #[test_case(7 => 10_000 ; "flat single tier pays at any count")]
    fn default_tier_ladder(referred_count: u32) -> i64 {
        let env = Env::default();

        let tiers = vec![
            &env,
            ReferralTier {
                min_count: 0,
                rate_bps: 10_000,
            },
        ];
        tier_rate_bps(&tiers, referred_count)
    }

    #[test_case(0 => 0 ; "below the first rung pays nothing")]
    #[test_case(1 => 2_500 ; "first rung")]
    #[test_case(4 => 2_500 ; "between rungs keeps the lower rate")]
    #[test_case(5 => 10_000 ; "top rung")]
    fn climbing_tier_ladder(referred_count: u32) -> i64 {
        let env = Env::default();

        let tiers = vec![
            &env,
            ReferralTier {
                min_count: 1,
                rate_bps: 2_500,
            },
            ReferralTier {
                min_count: 5,
                rate_bps: 10_000,
            },
        ];
        tier_rate_bps(&tiers, referred_count)
    }
}
