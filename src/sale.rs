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

//! Purchase engine.
//!
//! A [`Crowdsale`] exchanges native value attached to a call for tokens. Its behaviour is
//! composed from a [`Delivery`] strategy, which defines where the sold tokens come from, and an
//! [`AdmissionGate`], which decides who may buy and when. Every operation runs against a
//! [`Host`] and is atomic: either all of its effects are applied, or the host and the crowdsale
//! are left exactly as they were.

#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::{debug, info};

use crate::gates::{self, Admission};
use crate::{
    Account, AdmissionGate, AllowanceDelivery, Allowlist, Amount, AnyDelivery, Call,
    ConstructionError, Delivery, DeliveryError, DirectDelivery, Host, IndividualCaps,
    MintedDelivery, Ownable, Pricing, Rate, SaleError, SaleEvent, TimeWindow, TokenLedger,
    TokenPurchase, Unrestricted, ValidationError, Value, WindowState,
};

/// Sale selling tokens from its own balance to anybody.
pub type SimpleCrowdsale = Crowdsale<DirectDelivery, Unrestricted>;
/// Sale selling tokens from a token wallet which approved an allowance to the sale.
pub type AllowanceCrowdsale = Crowdsale<AllowanceDelivery, Unrestricted>;
/// Sale minting the sold tokens.
pub type MintedCrowdsale = Crowdsale<MintedDelivery, Unrestricted>;
/// Sale accepting purchases only within a time window. Combined with [`Pricing::Increasing`]
/// this is an increasing-price sale.
pub type TimedCrowdsale = Crowdsale<DirectDelivery, TimeWindow>;
/// Sale delivering tokens only to allow-listed beneficiaries.
pub type AllowlistedCrowdsale = Crowdsale<DirectDelivery, Allowlist>;
/// Sale limiting the total contribution of each beneficiary.
pub type CappedCrowdsale = Crowdsale<DirectDelivery, IndividualCaps>;

/// Immutable parameters of a crowdsale deployment.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct SaleParams {
    /// Address the crowdsale is deployed at. Holds the direct-delivery balance and is the spender
    /// of the allowance or the token minter.
    pub address: Account,
    /// Account deploying the crowdsale, which becomes its first owner.
    pub deployer: Account,
    /// Account collecting the raised value.
    pub wallet: Account,
    /// Token being sold.
    pub token: Account,
    pub pricing: Pricing,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Crowdsale<D: Delivery = AnyDelivery, G: AdmissionGate = Unrestricted> {
    address: Account,
    wallet: Account,
    token: Account,
    pricing: Pricing,
    raised: Value,
    ownership: Ownable,
    delivery: D,
    gate: G,
}

impl<D: Delivery, G: AdmissionGate> Crowdsale<D, G> {
    /// Deploys the crowdsale on the host.
    ///
    /// Time windows used by the gate or the pricing must be constructed against the same host
    /// clock, see [`TimeWindow::new`].
    pub fn deploy<T: TokenLedger>(
        host: &Host<T>,
        params: SaleParams,
        delivery: D,
        gate: G,
    ) -> Result<Self, ConstructionError> {
        if params.deployer.is_null() {
            return Err(ConstructionError::NullDeployer);
        }
        if params.address.is_null() {
            return Err(ConstructionError::NullAddress);
        }
        if params.wallet.is_null() {
            return Err(ConstructionError::NullWallet);
        }
        if params.token.is_null() {
            return Err(ConstructionError::NullToken);
        }
        let ledger = host.token().address();
        if ledger != params.token {
            return Err(ConstructionError::TokenMismatch(params.token, ledger));
        }
        delivery.validate(params.token)?;

        info!(
            address = %params.address,
            owner = %params.deployer,
            wallet = %params.wallet,
            token = %params.token,
            "crowdsale deployed"
        );
        Ok(Self {
            address: params.address,
            wallet: params.wallet,
            token: params.token,
            pricing: params.pricing,
            raised: Value::ZERO,
            ownership: Ownable::new(params.deployer),
            delivery,
            gate,
        })
    }

    pub fn address(&self) -> Account { self.address }

    pub fn wallet(&self) -> Account { self.wallet }

    pub fn token(&self) -> Account { self.token }

    pub fn pricing(&self) -> &Pricing { &self.pricing }

    pub fn delivery(&self) -> &D { &self.delivery }

    pub fn gate(&self) -> &G { &self.gate }

    /// Total native value raised so far.
    pub fn raised(&self) -> Value { self.raised }

    pub fn owner(&self) -> Option<Account> { self.ownership.owner() }

    pub fn current_rate<T: TokenLedger>(&self, host: &Host<T>) -> Rate {
        self.pricing.rate_at(host.now())
    }

    /// Tokens which can still be sold; `None` if the supply is unbounded.
    ///
    /// For the allowance-based sale this is the allowance the token wallet has given to the sale.
    pub fn remaining_tokens<T: TokenLedger>(&self, host: &Host<T>) -> Option<Amount> {
        self.delivery.remaining(host.token(), self.address)
    }

    /// Time window limiting the sale, if any.
    pub fn window(&self) -> Option<&TimeWindow> {
        self.gate.window().or_else(|| self.pricing.window())
    }

    pub fn window_state<T: TokenLedger>(&self, host: &Host<T>) -> Option<WindowState> {
        self.window().map(|window| window.state(host.now()))
    }

    /// Whether the sale accepts purchases at the current host time. Sales without a time window
    /// are always open.
    pub fn is_open<T: TokenLedger>(&self, host: &Host<T>) -> bool {
        self.window()
            .map(|window| window.is_open(host.now()))
            .unwrap_or(true)
    }

    /// Whether the closing time has passed. Sales without a time window never close.
    pub fn has_closed<T: TokenLedger>(&self, host: &Host<T>) -> bool {
        self.window()
            .map(|window| window.has_closed(host.now()))
            .unwrap_or_default()
    }

    /// Whether the beneficiary passes the allow-list. Without an allow-list everybody does.
    pub fn is_allowed(&self, beneficiary: Account) -> bool {
        self.gate
            .allowlist()
            .map(|allowlist| allowlist.contains(beneficiary))
            .unwrap_or(true)
    }

    /// Contribution cap of the beneficiary; `None` if the sale has no individual caps.
    pub fn user_cap(&self, beneficiary: Account) -> Option<Value> {
        self.gate.caps().map(|caps| caps.cap(beneficiary))
    }

    /// Value contributed on behalf of the beneficiary; `None` if the sale has no individual caps.
    pub fn user_contribution(&self, beneficiary: Account) -> Option<Value> {
        self.gate.caps().map(|caps| caps.contribution(beneficiary))
    }

    /// Buys tokens for `beneficiary`, paying with the value attached to the call.
    ///
    /// The value moves from the caller to the sale, the tokens are delivered to the beneficiary,
    /// the value is forwarded to the wallet and a [`TokenPurchase`] record is emitted, all in a
    /// single host transaction.
    pub fn buy_tokens<T: TokenLedger>(
        &mut self,
        host: &mut Host<T>,
        call: Call,
        beneficiary: Account,
    ) -> Result<TokenPurchase, SaleError> {
        host.transact(|host| self.purchase(host, call, beneficiary))
            .inspect_err(|err| {
                debug!(
                    purchaser = %call.caller,
                    %beneficiary,
                    value = %call.value,
                    "purchase rejected: {err}"
                )
            })
    }

    /// Bare value transfer: buys tokens for the caller.
    pub fn send<T: TokenLedger>(
        &mut self,
        host: &mut Host<T>,
        call: Call,
    ) -> Result<TokenPurchase, SaleError> {
        self.buy_tokens(host, call, call.caller)
    }

    fn purchase<T: TokenLedger>(
        &mut self,
        host: &mut Host<T>,
        call: Call,
        beneficiary: Account,
    ) -> Result<TokenPurchase, SaleError> {
        let value = call.value;
        if beneficiary.is_null() {
            return Err(ValidationError::NullBeneficiary.into());
        }
        if beneficiary == self.address {
            return Err(ValidationError::SaleBeneficiary(beneficiary).into());
        }
        if value.is_zero() {
            return Err(ValidationError::ZeroValue.into());
        }
        let now = host.now();
        let admission = Admission { purchaser: call.caller, beneficiary, value, now };
        // the pricing window binds the sale even if the gate has no window of its own
        if let Some(window) = self.pricing.window() {
            window.admit(&admission)?;
        }
        self.gate.admit(&admission)?;

        let rate = self.pricing.rate_at(now);
        let amount = rate
            .token_amount(value)
            .ok_or(DeliveryError::AmountOverflow(value, rate))?;
        let raised = self
            .raised
            .checked_add(value)
            .ok_or(DeliveryError::RaisedOverflow)?;

        host.funds_mut().transfer(call.caller, self.address, value)?;
        self.delivery
            .deliver(host.token_mut(), self.address, beneficiary, amount)?;
        host.funds_mut().transfer(self.address, self.wallet, value)?;

        let purchase = TokenPurchase { purchaser: call.caller, beneficiary, value, amount };
        host.emit(purchase.into());

        // nothing can fail past this point
        self.raised = raised;
        self.gate.record(&purchase);

        info!(
            purchaser = %call.caller,
            %beneficiary,
            %value,
            %amount,
            %rate,
            "tokens purchased"
        );
        Ok(purchase)
    }

    fn authorize(&self, call: Call) -> Result<(), SaleError> {
        if call.is_payable() {
            return Err(ValidationError::NonPayable(call.value).into());
        }
        self.ownership.ensure_owner(call.caller)?;
        Ok(())
    }

    fn owner_op<T: TokenLedger, R>(
        &mut self,
        host: &mut Host<T>,
        call: Call,
        op: impl FnOnce(&mut Self, &mut Host<T>) -> Result<R, SaleError>,
    ) -> Result<R, SaleError> {
        self.authorize(call)
            .and_then(|_| op(self, host))
            .inspect_err(|err| debug!(caller = %call.caller, "owner operation rejected: {err}"))
    }

    pub fn add_to_allowlist<T: TokenLedger>(
        &mut self,
        host: &mut Host<T>,
        call: Call,
        account: Account,
    ) -> Result<(), SaleError> {
        self.add_many_to_allowlist(host, call, [account])
    }

    /// Lists up to [`gates::MAX_BATCH`] accounts at once. Either all of them get listed or none.
    pub fn add_many_to_allowlist<T: TokenLedger>(
        &mut self,
        host: &mut Host<T>,
        call: Call,
        accounts: impl IntoIterator<Item = Account>,
    ) -> Result<(), SaleError> {
        self.owner_op(host, call, |sale, host| {
            let batch = gates::batch(accounts)?;
            if batch.iter().any(Account::is_null) {
                return Err(ValidationError::NullAccount.into());
            }
            let allowlist = sale
                .gate
                .allowlist_mut()
                .ok_or(ValidationError::NoAllowlist)?;
            for account in batch.release() {
                allowlist.add(account)?;
                host.emit(SaleEvent::AllowlistAdded { account });
                info!(%account, "account added to the allow-list");
            }
            Ok(())
        })
    }

    pub fn remove_from_allowlist<T: TokenLedger>(
        &mut self,
        host: &mut Host<T>,
        call: Call,
        account: Account,
    ) -> Result<(), SaleError> {
        self.remove_many_from_allowlist(host, call, [account])
    }

    /// Unlists up to [`gates::MAX_BATCH`] accounts at once. Removal takes effect for the very
    /// next purchase.
    pub fn remove_many_from_allowlist<T: TokenLedger>(
        &mut self,
        host: &mut Host<T>,
        call: Call,
        accounts: impl IntoIterator<Item = Account>,
    ) -> Result<(), SaleError> {
        self.owner_op(host, call, |sale, host| {
            let batch = gates::batch(accounts)?;
            let allowlist = sale
                .gate
                .allowlist_mut()
                .ok_or(ValidationError::NoAllowlist)?;
            for account in batch.release() {
                allowlist.remove(account);
                host.emit(SaleEvent::AllowlistRemoved { account });
                info!(%account, "account removed from the allow-list");
            }
            Ok(())
        })
    }

    pub fn set_user_cap<T: TokenLedger>(
        &mut self,
        host: &mut Host<T>,
        call: Call,
        beneficiary: Account,
        cap: Value,
    ) -> Result<(), SaleError> {
        self.set_group_cap(host, call, [beneficiary], cap)
    }

    /// Sets the same cap for up to [`gates::MAX_BATCH`] beneficiaries.
    pub fn set_group_cap<T: TokenLedger>(
        &mut self,
        host: &mut Host<T>,
        call: Call,
        beneficiaries: impl IntoIterator<Item = Account>,
        cap: Value,
    ) -> Result<(), SaleError> {
        self.owner_op(host, call, |sale, host| {
            let batch = gates::batch(beneficiaries)?;
            if batch.iter().any(Account::is_null) {
                return Err(ValidationError::NullAccount.into());
            }
            let caps = sale.gate.caps_mut().ok_or(ValidationError::NoCaps)?;
            for beneficiary in batch.release() {
                caps.set_cap(beneficiary, cap)?;
                host.emit(SaleEvent::CapSet { beneficiary, cap });
                info!(%beneficiary, %cap, "contribution cap set");
            }
            Ok(())
        })
    }

    pub fn transfer_ownership<T: TokenLedger>(
        &mut self,
        host: &mut Host<T>,
        call: Call,
        new_owner: Account,
    ) -> Result<(), SaleError> {
        self.owner_op(host, call, |sale, host| {
            let previous = sale.ownership.transfer_ownership(call.caller, new_owner)?;
            host.emit(SaleEvent::OwnershipTransferred { previous, new: new_owner });
            info!(%previous, new = %new_owner, "crowdsale ownership transferred");
            Ok(())
        })
    }

    pub fn renounce_ownership<T: TokenLedger>(
        &mut self,
        host: &mut Host<T>,
        call: Call,
    ) -> Result<(), SaleError> {
        self.owner_op(host, call, |sale, host| {
            let previous = sale.ownership.renounce_ownership(call.caller)?;
            host.emit(SaleEvent::OwnershipRenounced { previous });
            info!(%previous, "crowdsale ownership renounced");
            Ok(())
        })
    }
}

/// Snapshot of the public crowdsale state.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct SaleSummary {
    pub address: Account,
    pub owner: Option<Account>,
    pub wallet: Account,
    pub token: Account,
    pub token_wallet: Option<Account>,
    pub pricing: Pricing,
    pub current_rate: Rate,
    pub raised: Value,
    pub remaining_tokens: Option<Amount>,
    pub window: Option<TimeWindow>,
    pub window_state: Option<WindowState>,
    pub allowlist: Option<Vec<Account>>,
}

impl<D: Delivery, G: AdmissionGate> Crowdsale<D, G> {
    pub fn summary<T: TokenLedger>(&self, host: &Host<T>) -> SaleSummary {
        SaleSummary {
            address: self.address,
            owner: self.owner(),
            wallet: self.wallet,
            token: self.token,
            token_wallet: self.delivery.token_wallet(),
            pricing: self.pricing,
            current_rate: self.current_rate(host),
            raised: self.raised,
            remaining_tokens: self.remaining_tokens(host),
            window: self.window().copied(),
            window_state: self.window_state(host),
            allowlist: self.gate.allowlist().map(|list| list.iter().collect()),
        }
    }
}
