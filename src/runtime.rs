// Standard Library for funds-for-token crowdsale contracts
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

//! Typed invocations of a deployed crowdsale and their serialized execution.

use std::sync::{Mutex, PoisonError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Account, AdmissionGate, AnyDelivery, Call, Crowdsale, Delivery, Host, SaleError, SaleEvent,
    TokenLedger, TokenPurchase, Unrestricted, Value,
};

/// Operation of the crowdsale interface invoked by a call.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", tag = "op")
)]
pub enum Invocation {
    /// Bare value transfer, buying tokens for the caller.
    #[display("send")]
    Send,

    #[display("buyTokens({beneficiary})")]
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    BuyTokens { beneficiary: Account },

    #[display("addToAllowlist({account})")]
    AddToAllowlist { account: Account },

    #[display("addManyToAllowlist(..)")]
    AddManyToAllowlist { accounts: Vec<Account> },

    #[display("removeFromAllowlist({account})")]
    RemoveFromAllowlist { account: Account },

    #[display("removeManyFromAllowlist(..)")]
    RemoveManyFromAllowlist { accounts: Vec<Account> },

    #[display("setUserCap({beneficiary}, {cap})")]
    SetUserCap { beneficiary: Account, cap: Value },

    #[display("setGroupCap(.., {cap})")]
    SetGroupCap { beneficiaries: Vec<Account>, cap: Value },

    #[display("transferOwnership({new_owner})")]
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    TransferOwnership { new_owner: Account },

    #[display("renounceOwnership")]
    RenounceOwnership,
}

/// Outcome of a successful invocation.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct Receipt {
    pub call: Call,
    pub invocation: Invocation,
    /// Events emitted by the invocation, in emission order.
    pub events: Vec<SaleEvent>,
}

impl Receipt {
    /// Purchase record, if the invocation was a purchase.
    pub fn purchase(&self) -> Option<&TokenPurchase> {
        self.events.iter().find_map(SaleEvent::as_purchase)
    }
}

/// Crowdsale deployed on a host, executing invocations one by one.
#[derive(Clone, Debug)]
pub struct Runtime<T: TokenLedger, D: Delivery = AnyDelivery, G: AdmissionGate = Unrestricted> {
    host: Host<T>,
    sale: Crowdsale<D, G>,
}

impl<T: TokenLedger, D: Delivery, G: AdmissionGate> Runtime<T, D, G> {
    pub fn new(host: Host<T>, sale: Crowdsale<D, G>) -> Self { Self { host, sale } }

    pub fn host(&self) -> &Host<T> { &self.host }

    /// Direct access to the host, e.g. to move the clock or to act on the token ledger outside
    /// of the crowdsale.
    pub fn host_mut(&mut self) -> &mut Host<T> { &mut self.host }

    pub fn sale(&self) -> &Crowdsale<D, G> { &self.sale }

    pub fn into_parts(self) -> (Host<T>, Crowdsale<D, G>) { (self.host, self.sale) }

    pub fn execute(&mut self, call: Call, invocation: Invocation) -> Result<Receipt, SaleError> {
        let host = &mut self.host;
        let sale = &mut self.sale;
        let start = host.events().len();
        match &invocation {
            Invocation::Send => sale.send(host, call).map(|_| ())?,
            Invocation::BuyTokens { beneficiary } => {
                sale.buy_tokens(host, call, *beneficiary).map(|_| ())?
            }
            Invocation::AddToAllowlist { account } => sale.add_to_allowlist(host, call, *account)?,
            Invocation::AddManyToAllowlist { accounts } => {
                sale.add_many_to_allowlist(host, call, accounts.iter().copied())?
            }
            Invocation::RemoveFromAllowlist { account } => {
                sale.remove_from_allowlist(host, call, *account)?
            }
            Invocation::RemoveManyFromAllowlist { accounts } => {
                sale.remove_many_from_allowlist(host, call, accounts.iter().copied())?
            }
            Invocation::SetUserCap { beneficiary, cap } => {
                sale.set_user_cap(host, call, *beneficiary, *cap)?
            }
            Invocation::SetGroupCap { beneficiaries, cap } => {
                sale.set_group_cap(host, call, beneficiaries.iter().copied(), *cap)?
            }
            Invocation::TransferOwnership { new_owner } => {
                sale.transfer_ownership(host, call, *new_owner)?
            }
            Invocation::RenounceOwnership => sale.renounce_ownership(host, call)?,
        }
        let events = host.events()[start..].to_vec();
        Ok(Receipt { call, invocation, events })
    }
}

/// Serializes invocations submitted concurrently from many threads, giving them a single total
/// order as a ledger would.
#[derive(Debug)]
pub struct Sequencer<T: TokenLedger, D: Delivery = AnyDelivery, G: AdmissionGate = Unrestricted> {
    runtime: Mutex<Runtime<T, D, G>>,
}

impl<T: TokenLedger, D: Delivery, G: AdmissionGate> Sequencer<T, D, G> {
    pub fn new(runtime: Runtime<T, D, G>) -> Self { Self { runtime: Mutex::new(runtime) } }

    /// Executes the invocation once all previously submitted ones have completed.
    pub fn submit(&self, call: Call, invocation: Invocation) -> Result<Receipt, SaleError> {
        self.runtime
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .execute(call, invocation)
    }

    /// Runs `f` over a consistent snapshot of the runtime state.
    pub fn inspect<R>(&self, f: impl FnOnce(&Runtime<T, D, G>) -> R) -> R {
        f(&self.runtime.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn into_inner(self) -> Runtime<T, D, G> {
        self.runtime
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod test {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{Allowlist, Amount, DirectDelivery, MemToken, NativeFunds, Pricing, SaleParams};

    const TOKEN: Account = Account::with_fill(0x70);
    const SALE: Account = Account::with_fill(0x5A);
    const OWNER: Account = Account::with_fill(0x0F);
    const WALLET: Account = Account::with_fill(0x3E);
    const ALICE: Account = Account::with_fill(0x0A);

    fn runtime() -> Runtime<MemToken, DirectDelivery, Allowlist> {
        let mut token = MemToken::issue(TOKEN, OWNER, Amount::from(1000u32));
        token.transfer(OWNER, SALE, Amount::from(1000u32)).unwrap();
        let host = Host::new(token, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
            .with_funds(NativeFunds::with([(ALICE, Value::from(10u32))]));
        let params = SaleParams {
            address: SALE,
            deployer: OWNER,
            wallet: WALLET,
            token: TOKEN,
            pricing: Pricing::fixed(2).unwrap(),
        };
        let sale = Crowdsale::deploy(&host, params, DirectDelivery, Allowlist::new()).unwrap();
        Runtime::new(host, sale)
    }

    #[test]
    fn receipts() {
        let mut runtime = runtime();
        let receipt = runtime
            .execute(Call::by(OWNER), Invocation::AddToAllowlist { account: ALICE })
            .unwrap();
        assert_eq!(receipt.events, vec![SaleEvent::AllowlistAdded { account: ALICE }]);
        assert!(receipt.purchase().is_none());

        let receipt = runtime
            .execute(Call::with_value(ALICE, 3u32), Invocation::Send)
            .unwrap();
        let purchase = receipt.purchase().unwrap();
        assert_eq!(purchase.amount, Amount::from(6u32));
        assert_eq!(receipt.events.len(), 1);
        assert_eq!(runtime.host().events().len(), 2);
        assert_eq!(Invocation::Send.to_string(), "send");
    }

    #[test]
    fn failed_invocation_has_no_receipt() {
        let mut runtime = runtime();
        assert!(runtime
            .execute(Call::with_value(ALICE, 3u32), Invocation::BuyTokens { beneficiary: ALICE })
            .is_err());
        assert!(runtime.host().events().is_empty());
    }
}
