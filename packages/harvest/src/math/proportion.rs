use soroban_sdk::Env;

use crate::constants::BPS_DENOMINATOR;
use crate::error::HarvestResult;
use crate::math::safe_math::SafeMath;

/// Returns `amount * bps / 10_000`, flooring toward zero.
pub fn bps_of(env: &Env, amount: i128, bps: i64) -> HarvestResult<i128> {
    amount
        .safe_mul(i128::from(bps), env)?
        .safe_div(i128::from(BPS_DENOMINATOR), env)
}

#[cfg(test)]
mod tests {
    use soroban_sdk::Env;
    use test_case::test_case;

    use super::bps_of;

    #[test_case(100_000_000, 500 => 5_000_000 ; "five percent entry fee")]
    #[test_case(19_000_000_000, 2_000 => 3_800_000_000 ; "twenty percent farming fee")]
    #[test_case(999_999_999, 7_000 => 699_999_999 ; "seventy percent share floors dust")]
    #[test_case(1, 9_999 => 0 ; "sub unit floors to zero")]
    #[test_case(0, 10_000 => 0 ; "zero amount")]
    #[test_case(123_456, 0 => 0 ; "zero bps")]
    #[test_case(250, 10_000 => 250 ; "full denominator is identity")]
    fn bps_of_cases(amount: i128, bps: i64) -> i128 {
        let env = Env::default();

        bps_of(&env, amount, bps).unwrap()
    }

    #[test]
    fn bps_of_overflow_is_rejected() {
        let env = Env::default();

        assert!(bps_of(&env, i128::MAX, 2).is_err());
    }
}
