// Command-line simulator for funds-for-token crowdsales
//
// SPDX-License-Identifier: Apache-2.0
//
// Designed in 2019-2025 by Dr Maxim Orlovsky <orlovsky@lnp-bp.org>
// Written in 2024-2025 by Dr Maxim Orlovsky <orlovsky@lnp-bp.org>
//
// Copyright (C) 2019-2024 LNP/BP Standards Association, Switzerland.
// Copyright (C) 2024-2025 LNP/BP Laboratories,
//                         Institute for Distributed and Cognitive Systems (InDCS), Switzerland.
// Copyright (C) 2025 RGB Consortium, Switzerland.
// Copyright (C) 2019-2025 Dr Maxim Orlovsky.
// All rights under the above copyrights are reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not use this file except
// in compliance with the License. You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under the License
// is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express
// or implied. See the License for the specific language governing permissions and limitations under
// the License.

//! YAML scenario files.
//!
//! A scenario describes the ledger at genesis (token, native funds), the crowdsale to deploy and
//! an ordered list of calls to it. Token amounts and native values are given in whole units as
//! decimal strings or integers, e.g. `"0.42"` or `10000`.

use std::collections::BTreeMap;
use std::fmt::{self, Formatter};
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use crowdsale::{
    Account, AllowanceDelivery, Allowlist, Amount, AnyDelivery, Call, Crowdsale, DirectDelivery,
    Host, IndividualCaps, Invocation, MemToken, MintedDelivery, NativeFunds, Pricing, SaleParams,
    TimeWindow, TokenLedger, Value, UNIT_DECIMALS,
};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

/// Gate composition covering every admission rule a scenario may enable.
pub type ScenarioGate = (Option<TimeWindow>, (Option<Allowlist>, Option<IndividualCaps>));

pub type ScenarioSale = Crowdsale<AnyDelivery, ScenarioGate>;

/// Quantity in whole units with up to 18 decimal digits.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Units(u128);

impl Units {
    pub fn parse(s: &str) -> Option<Self> {
        let (whole, fract) = s.trim().split_once('.').unwrap_or((s.trim(), ""));
        let whole = whole.replace('_', "").parse::<u128>().ok()?;
        let fract_digits = u8::try_from(fract.len()).ok()?;
        let fract = if fract.is_empty() { 0 } else { fract.parse::<u128>().ok()? };
        Value::from_units(whole, fract, fract_digits).map(|value| Units(value.value()))
    }

    pub fn value(self) -> Value { Value::from(self.0) }

    pub fn amount(self) -> Amount { Amount::from(self.0) }
}

impl<'de> Deserialize<'de> for Units {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UnitsVisitor;

        impl Visitor<'_> for UnitsVisitor {
            type Value = Units;

            fn expecting(&self, f: &mut Formatter) -> fmt::Result {
                write!(f, "a number of whole units with at most {UNIT_DECIMALS} decimal digits")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Units, E> {
                Units::parse(&v.to_string())
                    .ok_or_else(|| E::custom(format!("{v} units do not fit into 128 bits")))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<Units, E> {
                Units::parse(&v.to_string())
                    .ok_or_else(|| E::custom(format!("{v} units do not fit into 128 bits")))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Units, E> {
                Err(E::custom(format!(
                    "fractional amount {v} must be quoted to be represented exactly"
                )))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Units, E> {
                Units::parse(v).ok_or_else(|| E::custom(format!("invalid amount '{v}'")))
            }
        }

        deserializer.deserialize_any(UnitsVisitor)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Scenario {
    pub genesis: DateTime<Utc>,
    pub token: TokenConfig,
    #[serde(default)]
    pub funds: BTreeMap<Account, Units>,
    pub sale: SaleConfig,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TokenConfig {
    pub address: Account,
    /// Receives the initial supply and the minter role.
    pub issuer: Account,
    pub supply: Units,
    pub cap: Option<Units>,
    /// Transfers from the issuer performed at genesis.
    #[serde(default)]
    pub balances: BTreeMap<Account, Units>,
    #[serde(default)]
    pub allowances: Vec<AllowanceConfig>,
    /// Account the issuer hands the minter role over to at genesis.
    pub minter: Option<Account>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AllowanceConfig {
    pub owner: Account,
    pub spender: Account,
    pub amount: Units,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SaleConfig {
    pub address: Account,
    pub deployer: Account,
    pub wallet: Account,
    pub pricing: PricingConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
    pub window: Option<WindowConfig>,
    pub allowlist: Option<Vec<Account>>,
    pub caps: Option<BTreeMap<Account, Units>>,
}

/// Either `rate` for a fixed price or `initialRate` with `finalRate` for a price increasing over
/// the sale window.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PricingConfig {
    pub rate: Option<u64>,
    pub initial_rate: Option<u64>,
    pub final_rate: Option<u64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", tag = "strategy")]
pub enum DeliveryConfig {
    #[default]
    Direct,
    #[serde(rename_all = "camelCase")]
    Allowance { token_wallet: Account },
    Minted,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WindowConfig {
    pub opening: DateTime<Utc>,
    pub closing: DateTime<Utc>,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Op {
    Send,
    BuyTokens,
    AddToAllowlist,
    AddManyToAllowlist,
    RemoveFromAllowlist,
    RemoveManyFromAllowlist,
    SetUserCap,
    SetGroupCap,
    TransferOwnership,
    RenounceOwnership,
}

/// Single call to the crowdsale. Fields other than `caller` and `op` are required depending on
/// the operation.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Step {
    /// Moves the clock forward before the call.
    pub at: Option<DateTime<Utc>>,
    pub caller: Account,
    #[serde(default)]
    pub value: Units,
    pub op: Op,
    pub beneficiary: Option<Account>,
    pub account: Option<Account>,
    #[serde(default)]
    pub accounts: Vec<Account>,
    pub cap: Option<Units>,
    pub new_owner: Option<Account>,
}

impl Step {
    pub fn call(&self) -> Call { Call::with_value(self.caller, self.value.value()) }

    pub fn invocation(&self) -> anyhow::Result<Invocation> {
        let missing = |field: &str| anyhow!("operation {:?} requires field '{field}'", self.op);
        let cap = || self.cap.map(Units::value).ok_or_else(|| missing("cap"));
        Ok(match self.op {
            Op::Send => Invocation::Send,
            Op::BuyTokens => Invocation::BuyTokens {
                beneficiary: self.beneficiary.ok_or_else(|| missing("beneficiary"))?,
            },
            Op::AddToAllowlist => Invocation::AddToAllowlist {
                account: self.account.ok_or_else(|| missing("account"))?,
            },
            Op::AddManyToAllowlist => {
                Invocation::AddManyToAllowlist { accounts: self.accounts.clone() }
            }
            Op::RemoveFromAllowlist => Invocation::RemoveFromAllowlist {
                account: self.account.ok_or_else(|| missing("account"))?,
            },
            Op::RemoveManyFromAllowlist => {
                Invocation::RemoveManyFromAllowlist { accounts: self.accounts.clone() }
            }
            Op::SetUserCap => Invocation::SetUserCap {
                beneficiary: self.beneficiary.ok_or_else(|| missing("beneficiary"))?,
                cap: cap()?,
            },
            Op::SetGroupCap => {
                Invocation::SetGroupCap { beneficiaries: self.accounts.clone(), cap: cap()? }
            }
            Op::TransferOwnership => Invocation::TransferOwnership {
                new_owner: self.new_owner.ok_or_else(|| missing("newOwner"))?,
            },
            Op::RenounceOwnership => Invocation::RenounceOwnership,
        })
    }
}

impl Scenario {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .map_err(|err| anyhow!("unable to read scenario '{}': {err}", path.display()))?;
        let scenario = serde_yaml::from_str(&data)
            .map_err(|err| anyhow!("invalid scenario '{}': {err}", path.display()))?;
        Ok(scenario)
    }

    /// Sets up the ledger at genesis.
    pub fn host(&self) -> anyhow::Result<Host<MemToken>> {
        let config = &self.token;
        let mut token = MemToken::issue(config.address, config.issuer, config.supply.amount());
        if let Some(cap) = config.cap {
            token = token.with_cap(cap.amount());
        }
        for (account, amount) in &config.balances {
            token.transfer(config.issuer, *account, amount.amount())?;
        }
        for allowance in &config.allowances {
            token.approve(allowance.owner, allowance.spender, allowance.amount.amount())?;
        }
        if let Some(minter) = config.minter {
            token.transfer_minter(config.issuer, minter)?;
        }

        let mut funds = NativeFunds::new();
        for (account, value) in &self.funds {
            funds.deposit(*account, value.value())?;
        }
        Ok(Host::new(token, self.genesis).with_funds(funds))
    }

    /// Deploys the crowdsale on the host.
    pub fn deploy(&self, host: &Host<MemToken>) -> anyhow::Result<ScenarioSale> {
        let config = &self.sale;
        let now = host.now();
        let window = config
            .window
            .as_ref()
            .map(|window| TimeWindow::new(window.opening, window.closing, now))
            .transpose()?;

        let pricing = match (&config.pricing, window) {
            (PricingConfig { rate: Some(rate), initial_rate: None, final_rate: None }, _) => {
                Pricing::fixed(*rate as u128)?
            }
            (
                PricingConfig { rate: None, initial_rate: Some(initial), final_rate: Some(last) },
                Some(window),
            ) => Pricing::increasing(*initial as u128, *last as u128, window)?,
            (PricingConfig { rate: None, initial_rate: Some(_), final_rate: Some(_) }, None) => {
                return Err(anyhow!("increasing price requires the sale window"))
            }
            _ => {
                return Err(anyhow!(
                    "pricing must define either 'rate' or both 'initialRate' and 'finalRate'"
                ))
            }
        };

        let delivery = match config.delivery {
            DeliveryConfig::Direct => AnyDelivery::from(DirectDelivery),
            DeliveryConfig::Allowance { token_wallet } => {
                AnyDelivery::from(AllowanceDelivery::new(token_wallet))
            }
            DeliveryConfig::Minted => AnyDelivery::from(MintedDelivery),
        };

        let allowlist = config
            .allowlist
            .as_ref()
            .map(|list| Allowlist::with(list.iter().copied()));
        let caps = config.caps.as_ref().map(|caps| {
            IndividualCaps::with(caps.iter().map(|(account, cap)| (*account, cap.value())))
        });

        let params = SaleParams {
            address: config.address,
            deployer: config.deployer,
            wallet: config.wallet,
            token: self.token.address,
            pricing,
        };
        let sale = Crowdsale::deploy(host, params, delivery, (window, (allowlist, caps)))?;
        Ok(sale)
    }
}
