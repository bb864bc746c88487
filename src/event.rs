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

//! Events a crowdsale emits into the host log.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strict_encoding::{StrictDeserialize, StrictSerialize};

use crate::{Account, Amount, Value, LIB_NAME_CROWDSALE};

/// Record of a single successful purchase, emitted exactly once per purchase.
///
/// The record is what indexers consume, so it has a stable strict encoding.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Display)]
#[display("{purchaser} paid {value} for {amount} tokens delivered to {beneficiary}")]
#[derive(StrictType, StrictEncode, StrictDecode)]
#[strict_type(lib = LIB_NAME_CROWDSALE)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub struct TokenPurchase {
    /// Account which paid for the tokens.
    pub purchaser: Account,
    /// Account which received the tokens.
    pub beneficiary: Account,
    /// Native value paid.
    pub value: Value,
    /// Tokens delivered.
    pub amount: Amount,
}

impl StrictSerialize for TokenPurchase {}
impl StrictDeserialize for TokenPurchase {}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display, From)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", tag = "type")
)]
pub enum SaleEvent {
    #[from]
    #[display(inner)]
    TokenPurchase(TokenPurchase),

    #[display("{account} added to the allow-list")]
    AllowlistAdded { account: Account },

    #[display("{account} removed from the allow-list")]
    AllowlistRemoved { account: Account },

    #[display("contribution cap of {beneficiary} set to {cap}")]
    CapSet { beneficiary: Account, cap: Value },

    #[display("ownership transferred from {previous} to {new}")]
    OwnershipTransferred { previous: Account, new: Account },

    #[display("ownership renounced by {previous}")]
    OwnershipRenounced { previous: Account },
}

impl SaleEvent {
    pub fn as_purchase(&self) -> Option<&TokenPurchase> {
        match self {
            SaleEvent::TokenPurchase(purchase) => Some(purchase),
            _ => None,
        }
    }
}
