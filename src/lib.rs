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

#![deny(
    non_upper_case_globals,
    non_camel_case_types,
    non_snake_case,
    unused_mut,
    unused_imports,
    dead_code,
    // missing_docs
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Funds-for-token crowdsales.
//!
//! A crowdsale accepts native ledger value and hands out tokens at a rate defined by its
//! [`Pricing`]. Concrete sales are assembled from a [`Delivery`] strategy (selling from own
//! balance, from a token wallet allowance, or by minting) and an [`AdmissionGate`] (time window,
//! allow-list, individual caps, or any conjunction of them). The ledger environment, i.e. the
//! clock, native funds, token ledger and event log, is represented by a [`Host`], which runs each
//! invocation as an all-or-nothing transaction.

#[macro_use]
extern crate amplify;
#[macro_use]
extern crate strict_encoding;

mod account;
mod amount;
mod token;
mod funds;
mod host;
mod event;
mod error;
mod ownable;
mod pricing;
mod delivery;
pub mod gates;
mod sale;
mod runtime;

pub use account::{Account, ParseAccountError, ACCOUNT_LEN};
pub use amount::{Amount, Rate, Value, UNIT_DECIMALS};
pub use delivery::{AllowanceDelivery, AnyDelivery, Delivery, DirectDelivery, MintedDelivery};
pub use error::{ConstructionError, DeliveryError, SaleError, ValidationError};
pub use event::{SaleEvent, TokenPurchase};
pub use funds::{FundsError, NativeFunds};
pub use gates::{
    Admission, AdmissionGate, Allowlist, IndividualCaps, TimeWindow, Unrestricted, WindowState,
    MAX_BATCH,
};
pub use host::{Call, Host, Transactional};
pub use ownable::{AuthorizationError, Ownable};
pub use pricing::Pricing;
pub use runtime::{Invocation, Receipt, Runtime, Sequencer};
pub use sale::{
    AllowanceCrowdsale, AllowlistedCrowdsale, CappedCrowdsale, Crowdsale, MintedCrowdsale,
    SaleParams, SaleSummary, SimpleCrowdsale, TimedCrowdsale,
};
pub use token::{MemToken, TokenError, TokenLedger};

/// Name of the strict type library for crowdsale data types.
pub const LIB_NAME_CROWDSALE: &str = "CrowdSale";
