use cosmwasm_std::Uint128;

use crate::error::ContractError;
use crate::state::{BetInfo, Outcome, Round, Side};

pub const FEE_PRECISION: u64 = 10_000;

/// Result of closing a round: the outcome plus the amounts the claim path
/// divides against. `treasury_cut` is zero on tie and one-sided rounds.
pub struct Settlement {
    pub outcome: Outcome,
    pub reward_base_amount: Uint128,
    pub reward_amount: Uint128,
    pub treasury_cut: Uint128,
}

/// Decides the winning side of a locked round and sizes the payable pool.
///
/// The winner is the asset that appreciated more relative to the other
/// between lock and close. Comparing `close0/lock0` against `close1/lock1`
/// is done as `close0 * lock1` vs `close1 * lock0` in 256-bit width, so the
/// outcome is exact regardless of price scale.
pub fn settle(round: &Round, treasury_fee: u64) -> Result<Settlement, ContractError> {
    let ratio0 = round.close_price0.full_mul(round.lock_price1);
    let ratio1 = round.close_price1.full_mul(round.lock_price0);

    let total = round.total_amount;

    // Neither asset outperformed the other: every bettor reclaims exactly
    // their own stake and no fee is charged.
    if ratio0 == ratio1 {
        return Ok(Settlement {
            outcome: Outcome::Tie,
            reward_base_amount: total,
            reward_amount: total,
            treasury_cut: Uint128::zero(),
        });
    }

    let price_winner = if ratio0 > ratio1 {
        Outcome::Token0Wins
    } else {
        Outcome::Token1Wins
    };

    // One-sided round: without a counterparty no genuine wager occurred.
    // The populated side is the nominal winner and reclaims stake fee-free.
    if round.token0_amount.is_zero() || round.token1_amount.is_zero() {
        let outcome = if round.token1_amount.is_zero() && !round.token0_amount.is_zero() {
            Outcome::Token0Wins
        } else if round.token0_amount.is_zero() && !round.token1_amount.is_zero() {
            Outcome::Token1Wins
        } else {
            price_winner
        };
        return Ok(Settlement {
            outcome,
            reward_base_amount: total,
            reward_amount: total,
            treasury_cut: Uint128::zero(),
        });
    }

    let reward_base_amount = match price_winner {
        Outcome::Token0Wins => round.side_amount(Side::Token0),
        _ => round.side_amount(Side::Token1),
    };
    let reward_amount = total.checked_multiply_ratio(FEE_PRECISION - treasury_fee, FEE_PRECISION)?;
    let treasury_cut = total.checked_sub(reward_amount)?;

    Ok(Settlement {
        outcome: price_winner,
        reward_base_amount,
        reward_amount,
        treasury_cut,
    })
}

pub fn winning_side(outcome: &Outcome) -> Option<Side> {
    match outcome {
        Outcome::Token0Wins => Some(Side::Token0),
        Outcome::Token1Wins => Some(Side::Token1),
        Outcome::Tie | Outcome::Unresolved => None,
    }
}

/// Amount a single bet is entitled to on a resolved round. Losing bets get
/// zero; on a tie either side reclaims its stake; winning bets share the
/// payable pool pro-rata.
pub fn payout(round: &Round, bet: &BetInfo) -> Result<Uint128, ContractError> {
    match round.outcome {
        Outcome::Unresolved => Ok(Uint128::zero()),
        Outcome::Tie => Ok(bet.amount),
        Outcome::Token0Wins | Outcome::Token1Wins => {
            let winner = match round.outcome {
                Outcome::Token0Wins => Side::Token0,
                _ => Side::Token1,
            };
            if bet.side != winner || round.reward_base_amount.is_zero() {
                return Ok(Uint128::zero());
            }
            Ok(bet
                .amount
                .checked_multiply_ratio(round.reward_amount, round.reward_base_amount)?)
        }
    }
}
