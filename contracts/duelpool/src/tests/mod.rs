//! Test modules for the duelpool prediction contract.


use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info, MockApi, MockQuerier, MockStorage};
use cosmwasm_std::{from_json, CosmosMsg, Env, OwnedDeps, Response, Timestamp, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

use crate::contract::{execute, instantiate, query};
use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, RoundResponse};
use crate::state::Side;

pub const ADMIN: &str = "admin";
pub const OPERATOR: &str = "operator";
pub const PAYMENT_TOKEN: &str = "payment_token";
pub const ORACLE: &str = "pyth_oracle";
pub const FEED0: &str = "e62df6c8b4a85fe1a67db44dc12de5db330f7ac66b72dc658afedf0f4a415b43";
pub const FEED1: &str = "ff61491a931112ddf1bd8147cd1b641375f79f5825126d665480874634fd0ace";

pub const INTERVAL: u64 = 300;
pub const MIN_BET: u128 = 100;
pub const FEE_BPS: u64 = 300;
pub const BASE_TIME: u64 = 1_600_000_000;

pub type TestDeps = OwnedDeps<MockStorage, MockApi, MockQuerier>;

pub fn env_at(seconds: u64) -> Env {
    let mut env = mock_env();
    env.block.time = Timestamp::from_seconds(seconds);
    env
}

pub fn default_instantiate_msg() -> InstantiateMsg {
    InstantiateMsg {
        admin_address: ADMIN.to_string(),
        operator_address: OPERATOR.to_string(),
        payment_token: PAYMENT_TOKEN.to_string(),
        interval_seconds: INTERVAL,
        min_bet_amount: Uint128::new(MIN_BET),
        treasury_fee: FEE_BPS,
        oracle_address: ORACLE.to_string(),
        token0_feed_id: FEED0.to_string(),
        token1_feed_id: FEED1.to_string(),
    }
}

pub fn setup() -> TestDeps {
    let mut deps = mock_dependencies();
    instantiate(
        deps.as_mut(),
        env_at(BASE_TIME),
        mock_info(ADMIN, &[]),
        default_instantiate_msg(),
    )
    .unwrap();
    deps
}

/// Runs genesis start at BASE_TIME and genesis lock one interval later.
/// Returns the lock time, i.e. the moment epoch 1 opened.
pub fn run_genesis(deps: &mut TestDeps, price0: u128, price1: u128) -> u64 {
    execute(
        deps.as_mut(),
        env_at(BASE_TIME),
        mock_info(OPERATOR, &[]),
        ExecuteMsg::GenesisStartRound {},
    )
    .unwrap();

    let lock_time = BASE_TIME + INTERVAL;
    execute(
        deps.as_mut(),
        env_at(lock_time),
        mock_info(OPERATOR, &[]),
        ExecuteMsg::GenesisLockRound {
            price0: Uint128::new(price0),
            price1: Uint128::new(price1),
        },
    )
    .unwrap();
    lock_time
}

pub fn advance(
    deps: &mut TestDeps,
    now: u64,
    price0: u128,
    price1: u128,
) -> Result<Response, ContractError> {
    execute(
        deps.as_mut(),
        env_at(now),
        mock_info(OPERATOR, &[]),
        ExecuteMsg::ExecuteRound {
            price0: Uint128::new(price0),
            price1: Uint128::new(price1),
        },
    )
}

pub fn bet(
    deps: &mut TestDeps,
    now: u64,
    user: &str,
    epoch: u64,
    side: Side,
    amount: u128,
) -> Result<Response, ContractError> {
    let msg = match side {
        Side::Token0 => ExecuteMsg::BetToken0 {
            epoch,
            amount: Uint128::new(amount),
        },
        Side::Token1 => ExecuteMsg::BetToken1 {
            epoch,
            amount: Uint128::new(amount),
        },
    };
    execute(deps.as_mut(), env_at(now), mock_info(user, &[]), msg)
}

pub fn claim(deps: &mut TestDeps, user: &str, epochs: Vec<u64>) -> Result<Response, ContractError> {
    execute(
        deps.as_mut(),
        env_at(BASE_TIME + 100 * INTERVAL),
        mock_info(user, &[]),
        ExecuteMsg::Claim { epochs },
    )
}

/// Full pipeline for epoch 1: genesis, the given bets while epoch 1 is
/// open, a transition locking it at `lock` prices, and a second transition
/// resolving it at `close` prices. Returns the resolution time.
pub fn run_round_one(
    deps: &mut TestDeps,
    bets: &[(&str, Side, u128)],
    lock: (u128, u128),
    close: (u128, u128),
) -> u64 {
    let t1 = run_genesis(deps, 100, 100);
    for (user, side, amount) in bets {
        bet(deps, t1 + 10, user, 1, *side, *amount).unwrap();
    }
    let t2 = t1 + INTERVAL;
    advance(deps, t2, lock.0, lock.1).unwrap();
    let t3 = t2 + INTERVAL;
    advance(deps, t3, close.0, close.1).unwrap();
    t3
}

pub fn get_round(deps: &TestDeps, epoch: u64) -> RoundResponse {
    let bin = query(deps.as_ref(), mock_env(), QueryMsg::GetRound { epoch }).unwrap();
    from_json(&bin).unwrap()
}

pub fn current_epoch(deps: &TestDeps) -> u64 {
    let bin = query(deps.as_ref(), mock_env(), QueryMsg::GetCurrentEpoch {}).unwrap();
    from_json(&bin).unwrap()
}

/// Pulls the cw20 Transfer amount out of a claim/treasury response.
pub fn transfer_amount(res: &Response) -> Uint128 {
    for sub in &res.messages {
        if let CosmosMsg::Wasm(WasmMsg::Execute { msg, .. }) = &sub.msg {
            if let Ok(Cw20ExecuteMsg::Transfer { amount, .. }) = from_json(msg) {
                return amount;
            }
        }
    }
    panic!("no cw20 transfer in response");
}

/// Pulls the cw20 TransferFrom amount out of a bet response.
pub fn transfer_from_amount(res: &Response) -> Uint128 {
    for sub in &res.messages {
        if let CosmosMsg::Wasm(WasmMsg::Execute { msg, .. }) = &sub.msg {
            if let Ok(Cw20ExecuteMsg::TransferFrom { amount, .. }) = from_json(msg) {
                return amount;
            }
        }
    }
    panic!("no cw20 transfer_from in response");
}
