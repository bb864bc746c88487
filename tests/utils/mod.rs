#![allow(dead_code)]

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use crowdsale::{
    Account, AdmissionGate, Amount, Crowdsale, Delivery, Host, MemToken, NativeFunds, Pricing,
    Runtime, SaleParams, TimeWindow, TokenLedger, Value,
};

pub const TOKEN: Account = Account::with_fill(0x70);
pub const ISSUER: Account = Account::with_fill(0x01);
pub const SALE: Account = Account::with_fill(0x5A);
pub const WALLET: Account = Account::with_fill(0x3E);
pub const TOKEN_WALLET: Account = Account::with_fill(0x7E);
pub const ALICE: Account = Account::with_fill(0x0A);
pub const BOB: Account = Account::with_fill(0x0B);
pub const CAROL: Account = Account::with_fill(0x0C);

/// Accounts funded with native value by [`host`].
pub const PURCHASERS: [Account; 3] = [ALICE, BOB, CAROL];

pub fn genesis() -> DateTime<Utc> { Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() }

pub fn coins(whole: u128) -> Value { Value::whole(whole).unwrap() }

pub fn tokens(whole: u128) -> Amount { Amount::whole(whole).unwrap() }

/// Host with the whole token supply held by the issuer and each purchaser holding 1000 coins.
pub fn host(supply: Amount) -> Host<MemToken> {
    host_with(MemToken::issue(TOKEN, ISSUER, supply))
}

pub fn host_with(token: MemToken) -> Host<MemToken> {
    let funds = NativeFunds::with(PURCHASERS.map(|account| (account, coins(1000))));
    Host::new(token, genesis()).with_funds(funds)
}

pub fn fixed(rate: u128) -> Pricing { Pricing::fixed(rate).unwrap() }

pub fn params(pricing: Pricing) -> SaleParams {
    SaleParams { address: SALE, deployer: ISSUER, wallet: WALLET, token: TOKEN, pricing }
}

/// Window opening in one day and lasting for ten days.
pub fn window(host: &Host<MemToken>) -> TimeWindow {
    let now = host.now();
    TimeWindow::new(now + TimeDelta::days(1), now + TimeDelta::days(11), now).unwrap()
}

pub fn setup<D: Delivery, G: AdmissionGate>(
    host: Host<MemToken>,
    pricing: Pricing,
    delivery: D,
    gate: G,
) -> Runtime<MemToken, D, G> {
    let sale = Crowdsale::deploy(&host, params(pricing), delivery, gate).unwrap();
    Runtime::new(host, sale)
}

/// Token balances of all holders, the supply and the native balances, for comparing states
/// before and after a failed invocation.
pub fn snapshot(host: &Host<MemToken>) -> (Vec<(Account, Amount)>, Amount, Vec<(Account, Value)>) {
    (
        host.token().holders().collect(),
        host.token().total_supply(),
        host.funds().accounts().collect(),
    )
}
