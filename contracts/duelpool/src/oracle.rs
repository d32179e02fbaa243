use cosmwasm_std::{Deps, Env, Uint128};
use pyth_sdk_cw::{query_price_feed, PriceIdentifier};

use crate::error::ContractError;
use crate::state::Config;

/// Feed readings older than this are treated as missing data.
pub const ORACLE_TIME_LIMIT: u64 = 60;

pub fn validate_feed_id(feed_id: &str) -> Result<PriceIdentifier, ContractError> {
    PriceIdentifier::from_hex(feed_id)
        .map_err(|err| ContractError::NoOracleData(format!("invalid price feed ID: {}", err)))
}

/// Reads one Pyth feed and rejects stale or non-positive prices. Prices are
/// returned as raw integer-scaled values; both feeds of a pair are expected
/// to share an exponent, and cross-multiplied comparison tolerates any
/// common scale anyway.
pub fn get_feed_price(
    deps: Deps,
    env: &Env,
    config: &Config,
    feed_id: &str,
    max_staleness: u64,
) -> Result<Uint128, ContractError> {
    let price_id = validate_feed_id(feed_id)?;

    let price_feed_response =
        query_price_feed(&deps.querier, config.oracle_address.clone(), price_id).map_err(
            |e| ContractError::NoOracleData(format!("error querying price feed: {}", e)),
        )?;
    let price_feed = price_feed_response.price_feed;

    let current_time = env.block.time.seconds() as i64;
    let current_price = price_feed
        .get_price_no_older_than(current_time, max_staleness)
        .ok_or_else(|| {
            ContractError::NoOracleData("current price is not available or too stale".to_string())
        })?;

    if current_price.price <= 0 {
        return Err(ContractError::NoOracleData(format!(
            "non-positive price from feed {}",
            feed_id
        )));
    }

    Ok(Uint128::new(current_price.price as u128))
}

/// Reads both configured feeds for the pair.
pub fn get_pair_prices(
    deps: Deps,
    env: &Env,
    config: &Config,
) -> Result<(Uint128, Uint128), ContractError> {
    let price0 = get_feed_price(deps, env, config, &config.token0_feed_id, ORACLE_TIME_LIMIT)?;
    let price1 = get_feed_price(deps, env, config, &config.token1_feed_id, ORACLE_TIME_LIMIT)?;
    Ok((price0, price1))
}
