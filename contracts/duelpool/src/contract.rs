#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, CosmosMsg, Deps, DepsMut, Env, Event, MessageInfo, Response,
    StdError, StdResult, Storage, SubMsg, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{
    BetResponse, ClaimableResponse, ConfigResponse, ExecuteMsg, InstantiateMsg,
    OraclePricesResponse, QueryMsg, RefundableResponse, RoundResponse, UserRoundsResponse,
};
use crate::oracle::{get_pair_prices, validate_feed_id};
use crate::reward::{payout, settle, winning_side};
use crate::state::{
    BetInfo, Config, Outcome, Round, RoundStatus, Side, CONFIG, CURRENT_EPOCH, GENESIS_LOCKED,
    GENESIS_STARTED, LEDGER, PAUSED, ROUNDS, TREASURY, USER_ROUNDS,
};

const CONTRACT_NAME: &str = "crates.io:duelpool";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// Treasury fee is expressed in basis points, capped at 10%.
const MAX_TREASURY_FEE: u64 = 1_000;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin_address = deps.api.addr_validate(&msg.admin_address)?;
    let operator_address = deps.api.addr_validate(&msg.operator_address)?;
    let payment_token = deps.api.addr_validate(&msg.payment_token)?;
    let oracle_address = deps.api.addr_validate(&msg.oracle_address)?;

    if msg.interval_seconds == 0 {
        return Err(ContractError::InvalidInterval {});
    }
    if msg.min_bet_amount == Uint128::zero() {
        return Err(ContractError::InvalidMinBetAmount {});
    }
    if msg.treasury_fee > MAX_TREASURY_FEE {
        return Err(ContractError::InvalidTreasuryFee {});
    }
    validate_feed_id(&msg.token0_feed_id)?;
    validate_feed_id(&msg.token1_feed_id)?;

    let config = Config {
        payment_token,
        admin_address,
        operator_address,
        interval_seconds: msg.interval_seconds,
        min_bet_amount: msg.min_bet_amount,
        treasury_fee: msg.treasury_fee,
        oracle_address,
        token0_feed_id: msg.token0_feed_id.clone(),
        token1_feed_id: msg.token1_feed_id.clone(),
    };

    CONFIG.save(deps.storage, &config)?;
    CURRENT_EPOCH.save(deps.storage, &0u64)?;
    PAUSED.save(deps.storage, &false)?;
    GENESIS_STARTED.save(deps.storage, &false)?;
    GENESIS_LOCKED.save(deps.storage, &false)?;
    TREASURY.save(deps.storage, &Uint128::zero())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", msg.admin_address)
        .add_attribute("operator", msg.operator_address)
        .add_attribute("payment_token", msg.payment_token)
        .add_attribute("oracle_address", msg.oracle_address)
        .add_attribute("token0_feed_id", msg.token0_feed_id)
        .add_attribute("token1_feed_id", msg.token1_feed_id))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::BetToken0 { epoch, amount } => {
            execute_bet(deps, env, info, epoch, amount, Side::Token0)
        }
        ExecuteMsg::BetToken1 { epoch, amount } => {
            execute_bet(deps, env, info, epoch, amount, Side::Token1)
        }
        ExecuteMsg::Claim { epochs } => execute_claim(deps, env, info, epochs),
        ExecuteMsg::GenesisStartRound {} => execute_genesis_start_round(deps, env, info),
        ExecuteMsg::GenesisLockRound { price0, price1 } => {
            execute_genesis_lock_round(deps, env, info, price0, price1)
        }
        ExecuteMsg::ExecuteRound { price0, price1 } => {
            execute_round(deps, env, info, price0, price1)
        }
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::ClaimTreasury {} => execute_claim_treasury(deps, env, info),
        ExecuteMsg::SetIntervalSeconds { interval_seconds } => {
            execute_set_interval_seconds(deps, info, interval_seconds)
        }
        ExecuteMsg::SetMinBetAmount { min_bet_amount } => {
            execute_set_min_bet_amount(deps, info, min_bet_amount)
        }
        ExecuteMsg::SetOperator { operator_address } => {
            execute_set_operator(deps, info, operator_address)
        }
        ExecuteMsg::SetTreasuryFee { treasury_fee } => {
            execute_set_treasury_fee(deps, info, treasury_fee)
        }
        ExecuteMsg::SetOracleInfo {
            oracle_address,
            token0_feed_id,
            token1_feed_id,
        } => execute_set_oracle_info(deps, info, oracle_address, token0_feed_id, token1_feed_id),
    }
}

fn ensure_not_paused(storage: &dyn Storage) -> Result<(), ContractError> {
    if PAUSED.load(storage)? {
        return Err(ContractError::Paused {});
    }
    Ok(())
}

fn ensure_operator(config: &Config, info: &MessageInfo) -> Result<(), ContractError> {
    if info.sender != config.operator_address {
        return Err(ContractError::Unauthorized {});
    }
    Ok(())
}

fn ensure_admin(config: &Config, info: &MessageInfo) -> Result<(), ContractError> {
    if info.sender != config.admin_address {
        return Err(ContractError::Unauthorized {});
    }
    Ok(())
}

fn validate_prices(price0: Uint128, price1: Uint128) -> Result<(), ContractError> {
    if price0.is_zero() || price1.is_zero() {
        return Err(ContractError::NoOracleData(
            "supplied pair prices must be positive".to_string(),
        ));
    }
    Ok(())
}

fn execute_bet(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    epoch: u64,
    amount: Uint128,
    side: Side,
) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;

    let config = CONFIG.load(deps.storage)?;

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {});
    }
    if amount < config.min_bet_amount {
        return Err(ContractError::BetTooSmall {});
    }

    let mut round = ROUNDS
        .may_load(deps.storage, epoch)?
        .ok_or(ContractError::RoundNotOpen { epoch })?;
    if round.status != RoundStatus::Open || env.block.time.seconds() >= round.lock_timestamp {
        return Err(ContractError::RoundNotOpen { epoch });
    }

    match side {
        Side::Token0 => round.token0_amount = round.token0_amount.checked_add(amount)?,
        Side::Token1 => round.token1_amount = round.token1_amount.checked_add(amount)?,
    }
    round.total_amount = round.total_amount.checked_add(amount)?;
    ROUNDS.save(deps.storage, epoch, &round)?;

    // Repeated wagers on the same side of an open round accumulate into a
    // single record; the two sides stay independent.
    let user_addr = info.sender.clone();
    let ledger_key = (epoch, user_addr.clone(), side.index());
    let bet_info = match LEDGER.may_load(deps.storage, ledger_key.clone())? {
        Some(mut existing) => {
            existing.amount = existing.amount.checked_add(amount)?;
            existing
        }
        None => BetInfo {
            side,
            amount,
            claimed: false,
        },
    };
    LEDGER.save(deps.storage, ledger_key, &bet_info)?;

    let mut user_rounds = USER_ROUNDS
        .may_load(deps.storage, user_addr.clone())?
        .unwrap_or_default();
    if !user_rounds.contains(&epoch) {
        user_rounds.push(epoch);
        USER_ROUNDS.save(deps.storage, user_addr.clone(), &user_rounds)?;
    }

    // Pull the stake from the bettor's allowance. A failed transfer aborts
    // the whole message, so no ledger change survives it.
    let transfer_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.payment_token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
            owner: user_addr.to_string(),
            recipient: env.contract.address.to_string(),
            amount,
        })?,
        funds: vec![],
    });

    let side_str = match side {
        Side::Token0 => "token0",
        Side::Token1 => "token1",
    };

    Ok(Response::new()
        .add_submessage(SubMsg::new(transfer_msg))
        .add_attribute("method", "bet")
        .add_attribute("side", side_str)
        .add_attribute("user", info.sender)
        .add_attribute("epoch", epoch.to_string())
        .add_attribute("amount", amount.to_string()))
}

fn execute_claim(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    epochs: Vec<u64>,
) -> Result<Response, ContractError> {
    if epochs.is_empty() {
        return Err(ContractError::EmptyEpochs {});
    }

    let config = CONFIG.load(deps.storage)?;
    let user_addr = info.sender.clone();
    let mut total_reward = Uint128::zero();
    let mut events = Vec::new();
    let mut to_mark: Vec<(u64, u8)> = Vec::new();

    // Validate the whole batch before touching the ledger, so a failing
    // epoch leaves every other epoch untouched.
    for epoch in epochs.iter() {
        let round = ROUNDS
            .may_load(deps.storage, *epoch)?
            .ok_or(ContractError::RoundNotEnded { epoch: *epoch })?;
        if round.status != RoundStatus::Resolved {
            return Err(ContractError::RoundNotEnded { epoch: *epoch });
        }

        let mut epoch_reward = Uint128::zero();
        let mut saw_claimed = false;

        for side in [Side::Token0, Side::Token1] {
            let key = (*epoch, user_addr.clone(), side.index());
            let Some(bet_info) = LEDGER.may_load(deps.storage, key)? else {
                continue;
            };

            let reward = payout(&round, &bet_info)?;
            if reward.is_zero() {
                continue;
            }
            if bet_info.claimed || to_mark.contains(&(*epoch, side.index())) {
                saw_claimed = true;
                continue;
            }

            to_mark.push((*epoch, side.index()));
            epoch_reward = epoch_reward.checked_add(reward)?;
        }

        if epoch_reward.is_zero() {
            if saw_claimed {
                return Err(ContractError::AlreadyClaimed { epoch: *epoch });
            }
            return Err(ContractError::NothingToClaim { epoch: *epoch });
        }

        total_reward = total_reward.checked_add(epoch_reward)?;

        events.push(
            Event::new("claim")
                .add_attribute("epoch", epoch.to_string())
                .add_attribute("user", user_addr.to_string())
                .add_attribute("reward", epoch_reward.to_string()),
        );
    }

    for (epoch, side_index) in to_mark {
        let key = (epoch, user_addr.clone(), side_index);
        let mut bet_info = LEDGER.load(deps.storage, key.clone())?;
        bet_info.claimed = true;
        LEDGER.save(deps.storage, key, &bet_info)?;
    }

    let transfer_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.payment_token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: user_addr.to_string(),
            amount: total_reward,
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_submessage(SubMsg::new(transfer_msg))
        .add_attribute("method", "claim")
        .add_attribute("user", user_addr)
        .add_attribute("total_reward", total_reward.to_string())
        .add_events(events))
}

fn execute_genesis_start_round(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_operator(&config, &info)?;
    ensure_not_paused(deps.storage)?;

    if GENESIS_STARTED.load(deps.storage)? {
        return Err(ContractError::AlreadyStarted {});
    }

    let event = start_round(deps.storage, env.block.time.seconds(), 0, &config)?;
    GENESIS_STARTED.save(deps.storage, &true)?;

    Ok(Response::new()
        .add_event(event)
        .add_attribute("method", "genesis_start_round")
        .add_attribute("epoch", "0"))
}

fn execute_genesis_lock_round(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    price0: Uint128,
    price1: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_operator(&config, &info)?;
    ensure_not_paused(deps.storage)?;

    if !GENESIS_STARTED.load(deps.storage)? {
        return Err(ContractError::GenesisNotStarted {});
    }
    if GENESIS_LOCKED.load(deps.storage)? {
        return Err(ContractError::GenesisAlreadyLocked {});
    }
    validate_prices(price0, price1)?;

    let now = env.block.time.seconds();
    let genesis = ROUNDS.load(deps.storage, 0)?;
    if now < genesis.lock_timestamp {
        return Err(ContractError::TooEarly { epoch: 0 });
    }

    let lock_event = lock_round(deps.storage, now, 0, price0, price1)?;
    let start_event = start_round(deps.storage, now, 1, &config)?;
    GENESIS_LOCKED.save(deps.storage, &true)?;

    Ok(Response::new()
        .add_event(lock_event)
        .add_event(start_event)
        .add_attribute("method", "genesis_lock_round")
        .add_attribute("epoch", "0"))
}

/// Steady-state driver, called once per interval by the operator. One
/// atomic transition: resolve the locked round N, lock the open round N+1
/// with the same pair prices (the close of N is the lock of N+1), open
/// round N+2.
fn execute_round(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    price0: Uint128,
    price1: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_operator(&config, &info)?;
    ensure_not_paused(deps.storage)?;

    if !GENESIS_LOCKED.load(deps.storage)? {
        return Err(ContractError::GenesisNotLocked {});
    }
    validate_prices(price0, price1)?;

    let current_epoch = CURRENT_EPOCH.load(deps.storage)?;
    let open_round = ROUNDS.load(deps.storage, current_epoch)?;
    let now = env.block.time.seconds();
    if now < open_round.lock_timestamp {
        return Err(ContractError::TooEarly {
            epoch: current_epoch,
        });
    }

    let end_event = end_round(deps.storage, current_epoch - 1, price0, price1, &config)?;
    let lock_event = lock_round(deps.storage, now, current_epoch, price0, price1)?;
    let start_event = start_round(deps.storage, now, current_epoch + 1, &config)?;

    Ok(Response::new()
        .add_event(end_event)
        .add_event(lock_event)
        .add_event(start_event)
        .add_attribute("method", "execute_round")
        .add_attribute("resolved_epoch", (current_epoch - 1).to_string())
        .add_attribute("current_epoch", (current_epoch + 1).to_string()))
}

fn start_round(
    storage: &mut dyn Storage,
    now: u64,
    epoch: u64,
    config: &Config,
) -> Result<Event, ContractError> {
    let lock_timestamp = now + config.interval_seconds;
    let close_timestamp = now + 2 * config.interval_seconds;

    let new_round = Round {
        epoch,
        start_timestamp: now,
        lock_timestamp,
        close_timestamp,
        lock_price0: Uint128::zero(),
        lock_price1: Uint128::zero(),
        close_price0: Uint128::zero(),
        close_price1: Uint128::zero(),
        token0_amount: Uint128::zero(),
        token1_amount: Uint128::zero(),
        total_amount: Uint128::zero(),
        reward_base_amount: Uint128::zero(),
        reward_amount: Uint128::zero(),
        status: RoundStatus::Open,
        outcome: Outcome::Unresolved,
    };

    ROUNDS.save(storage, epoch, &new_round)?;
    CURRENT_EPOCH.save(storage, &epoch)?;

    Ok(Event::new("start_round")
        .add_attribute("epoch", epoch.to_string())
        .add_attribute("start_timestamp", now.to_string())
        .add_attribute("lock_timestamp", lock_timestamp.to_string())
        .add_attribute("close_timestamp", close_timestamp.to_string()))
}

fn lock_round(
    storage: &mut dyn Storage,
    now: u64,
    epoch: u64,
    price0: Uint128,
    price1: Uint128,
) -> Result<Event, ContractError> {
    let mut round = ROUNDS.load(storage, epoch)?;
    round.lock_price0 = price0;
    round.lock_price1 = price1;
    round.status = RoundStatus::Locked;
    ROUNDS.save(storage, epoch, &round)?;

    Ok(Event::new("lock_round")
        .add_attribute("epoch", epoch.to_string())
        .add_attribute("lock_timestamp", now.to_string())
        .add_attribute("lock_price0", price0.to_string())
        .add_attribute("lock_price1", price1.to_string()))
}

fn end_round(
    storage: &mut dyn Storage,
    epoch: u64,
    price0: Uint128,
    price1: Uint128,
    config: &Config,
) -> Result<Event, ContractError> {
    let mut round = ROUNDS.load(storage, epoch)?;
    round.close_price0 = price0;
    round.close_price1 = price1;

    let settlement = settle(&round, config.treasury_fee)?;
    round.outcome = settlement.outcome;
    round.reward_base_amount = settlement.reward_base_amount;
    round.reward_amount = settlement.reward_amount;
    round.status = RoundStatus::Resolved;
    ROUNDS.save(storage, epoch, &round)?;

    if !settlement.treasury_cut.is_zero() {
        let mut treasury = TREASURY.load(storage)?;
        treasury = treasury.checked_add(settlement.treasury_cut)?;
        TREASURY.save(storage, &treasury)?;
    }

    let outcome_str = match round.outcome {
        Outcome::Token0Wins => "token0_wins",
        Outcome::Token1Wins => "token1_wins",
        Outcome::Tie => "tie",
        Outcome::Unresolved => "unresolved",
    };

    Ok(Event::new("end_round")
        .add_attribute("epoch", epoch.to_string())
        .add_attribute("close_price0", price0.to_string())
        .add_attribute("close_price1", price1.to_string())
        .add_attribute("outcome", outcome_str)
        .add_attribute("reward_amount", round.reward_amount.to_string())
        .add_attribute("treasury_cut", settlement.treasury_cut.to_string()))
}

fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info)?;

    if PAUSED.load(deps.storage)? {
        return Err(ContractError::AlreadyPaused {});
    }
    PAUSED.save(deps.storage, &true)?;

    Ok(Response::new()
        .add_attribute("method", "pause")
        .add_attribute("admin", info.sender))
}

fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info)?;

    if !PAUSED.load(deps.storage)? {
        return Err(ContractError::AlreadyUnpaused {});
    }
    PAUSED.save(deps.storage, &false)?;

    Ok(Response::new()
        .add_attribute("method", "unpause")
        .add_attribute("admin", info.sender))
}

fn execute_claim_treasury(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info)?;

    let treasury = TREASURY.load(deps.storage)?;
    if treasury.is_zero() {
        return Err(ContractError::NoTreasury {});
    }
    TREASURY.save(deps.storage, &Uint128::zero())?;

    let transfer_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.payment_token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: config.admin_address.to_string(),
            amount: treasury,
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_submessage(SubMsg::new(transfer_msg))
        .add_attribute("method", "claim_treasury")
        .add_attribute("admin", info.sender)
        .add_attribute("amount", treasury.to_string()))
}

fn execute_set_interval_seconds(
    deps: DepsMut,
    info: MessageInfo,
    interval_seconds: u64,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info)?;

    if interval_seconds == 0 {
        return Err(ContractError::InvalidInterval {});
    }

    // Applies to rounds opened after this call; live rounds keep their
    // recorded timestamps.
    config.interval_seconds = interval_seconds;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_interval_seconds")
        .add_attribute("interval_seconds", interval_seconds.to_string()))
}

fn execute_set_min_bet_amount(
    deps: DepsMut,
    info: MessageInfo,
    min_bet_amount: Uint128,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info)?;

    if min_bet_amount == Uint128::zero() {
        return Err(ContractError::InvalidMinBetAmount {});
    }

    config.min_bet_amount = min_bet_amount;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_min_bet_amount")
        .add_attribute("min_bet_amount", min_bet_amount.to_string()))
}

fn execute_set_operator(
    deps: DepsMut,
    info: MessageInfo,
    operator_address: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info)?;

    let operator_addr = deps.api.addr_validate(&operator_address)?;

    config.operator_address = operator_addr;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_operator")
        .add_attribute("operator", operator_address))
}

fn execute_set_treasury_fee(
    deps: DepsMut,
    info: MessageInfo,
    treasury_fee: u64,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info)?;

    if treasury_fee > MAX_TREASURY_FEE {
        return Err(ContractError::InvalidTreasuryFee {});
    }

    config.treasury_fee = treasury_fee;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_treasury_fee")
        .add_attribute("treasury_fee", treasury_fee.to_string()))
}

fn execute_set_oracle_info(
    deps: DepsMut,
    info: MessageInfo,
    oracle_address: String,
    token0_feed_id: String,
    token1_feed_id: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info)?;

    let oracle_addr = deps.api.addr_validate(&oracle_address)?;
    validate_feed_id(&token0_feed_id)?;
    validate_feed_id(&token1_feed_id)?;

    config.oracle_address = oracle_addr;
    config.token0_feed_id = token0_feed_id.clone();
    config.token1_feed_id = token1_feed_id.clone();
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_oracle_info")
        .add_attribute("oracle_address", oracle_address)
        .add_attribute("token0_feed_id", token0_feed_id)
        .add_attribute("token1_feed_id", token1_feed_id))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::GetRound { epoch } => to_json_binary(&query_round(deps, epoch)?),
        QueryMsg::GetCurrentEpoch {} => to_json_binary(&query_current_epoch(deps)?),
        QueryMsg::GetUserRounds { user, cursor, size } => {
            to_json_binary(&query_user_rounds(deps, user, cursor, size)?)
        }
        QueryMsg::Claimable { epoch, user } => to_json_binary(&query_claimable(deps, epoch, user)?),
        QueryMsg::Refundable { epoch, user } => {
            to_json_binary(&query_refundable(deps, epoch, user)?)
        }
        QueryMsg::OraclePrices {} => to_json_binary(&query_oracle_prices(deps, env)?),
        QueryMsg::GetConfig {} => to_json_binary(&query_config(deps)?),
    }
}

fn query_round(deps: Deps, epoch: u64) -> StdResult<RoundResponse> {
    let round = ROUNDS.load(deps.storage, epoch)?;
    Ok(RoundResponse {
        epoch: round.epoch,
        start_timestamp: round.start_timestamp,
        lock_timestamp: round.lock_timestamp,
        close_timestamp: round.close_timestamp,
        lock_price0: round.lock_price0,
        lock_price1: round.lock_price1,
        close_price0: round.close_price0,
        close_price1: round.close_price1,
        token0_amount: round.token0_amount,
        token1_amount: round.token1_amount,
        total_amount: round.total_amount,
        reward_base_amount: round.reward_base_amount,
        reward_amount: round.reward_amount,
        status: round.status,
        outcome: round.outcome,
    })
}

fn query_current_epoch(deps: Deps) -> StdResult<u64> {
    CURRENT_EPOCH.load(deps.storage)
}

fn query_user_rounds(
    deps: Deps,
    user: String,
    cursor: u64,
    size: u64,
) -> StdResult<UserRoundsResponse> {
    let user_addr = deps.api.addr_validate(&user)?;
    let user_rounds = USER_ROUNDS
        .may_load(deps.storage, user_addr)?
        .unwrap_or_default();

    let start = if cursor == 0 {
        0
    } else {
        match user_rounds.iter().position(|&x| x == cursor) {
            Some(idx) => (idx + 1).min(user_rounds.len()),
            None => 0,
        }
    };

    let end = std::cmp::min(start + size as usize, user_rounds.len());
    let result: Vec<u64> = user_rounds[start..end].to_vec();

    let next_cursor = if end < user_rounds.len() {
        Some(user_rounds[end])
    } else {
        None
    };

    Ok(UserRoundsResponse {
        epochs: result,
        next_cursor,
    })
}

fn query_claimable(deps: Deps, epoch: u64, user: String) -> StdResult<ClaimableResponse> {
    let user_addr = deps.api.addr_validate(&user)?;

    let mut bets = Vec::new();
    let mut expected_reward = Uint128::zero();

    let round = match ROUNDS.may_load(deps.storage, epoch)? {
        Some(round) => round,
        None => {
            return Ok(ClaimableResponse {
                is_claimable: false,
                bets,
                expected_reward,
            })
        }
    };

    for side in [Side::Token0, Side::Token1] {
        let Some(bet_info) = LEDGER.may_load(deps.storage, (epoch, user_addr.clone(), side.index()))?
        else {
            continue;
        };
        if round.status == RoundStatus::Resolved && !bet_info.claimed {
            let reward = payout(&round, &bet_info)
                .map_err(|e| StdError::generic_err(e.to_string()))?;
            expected_reward = expected_reward.checked_add(reward)?;
        }
        bets.push(BetResponse {
            side: bet_info.side,
            amount: bet_info.amount,
            claimed: bet_info.claimed,
        });
    }

    Ok(ClaimableResponse {
        is_claimable: !expected_reward.is_zero(),
        bets,
        expected_reward,
    })
}

fn query_refundable(deps: Deps, epoch: u64, user: String) -> StdResult<RefundableResponse> {
    let user_addr = deps.api.addr_validate(&user)?;

    let round = match ROUNDS.may_load(deps.storage, epoch)? {
        Some(round) => round,
        None => {
            return Ok(RefundableResponse {
                is_refundable: false,
                amount: None,
            })
        }
    };

    // A round refunds stakes when it resolved as a tie or with an empty side.
    let refund_round = round.status == RoundStatus::Resolved
        && (round.outcome == Outcome::Tie
            || round.token0_amount.is_zero()
            || round.token1_amount.is_zero());
    if !refund_round {
        return Ok(RefundableResponse {
            is_refundable: false,
            amount: None,
        });
    }

    let mut amount = Uint128::zero();
    for side in [Side::Token0, Side::Token1] {
        if let Some(bet_info) =
            LEDGER.may_load(deps.storage, (epoch, user_addr.clone(), side.index()))?
        {
            let refundable_side = round.outcome == Outcome::Tie
                || winning_side(&round.outcome) == Some(bet_info.side);
            if refundable_side && !bet_info.claimed {
                amount += bet_info.amount;
            }
        }
    }

    Ok(RefundableResponse {
        is_refundable: !amount.is_zero(),
        amount: if amount.is_zero() { None } else { Some(amount) },
    })
}

fn query_oracle_prices(deps: Deps, env: Env) -> StdResult<OraclePricesResponse> {
    let config = CONFIG.load(deps.storage)?;
    let (price0, price1) = get_pair_prices(deps, &env, &config)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    Ok(OraclePricesResponse { price0, price1 })
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    let paused = PAUSED.load(deps.storage)?;

    Ok(ConfigResponse {
        payment_token: config.payment_token.to_string(),
        admin_address: config.admin_address.to_string(),
        operator_address: config.operator_address.to_string(),
        interval_seconds: config.interval_seconds,
        min_bet_amount: config.min_bet_amount,
        treasury_fee: config.treasury_fee,
        oracle_address: config.oracle_address.to_string(),
        token0_feed_id: config.token0_feed_id,
        token1_feed_id: config.token1_feed_id,
        paused,
    })
}
