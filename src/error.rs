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

use chrono::{DateTime, Utc};

use crate::{Account, AuthorizationError, FundsError, Rate, TokenError, Value};

/// Errors detected while deploying a crowdsale. A failed construction leaves nothing behind.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum ConstructionError {
    /// exchange rate must be positive.
    ZeroRate,

    /// initial rate {0} must not be below the final rate {1}.
    InvalidRateRange(u128, u128),

    /// sale wallet can't be the null account.
    NullWallet,

    /// token address can't be the null account.
    NullToken,

    /// crowdsale address can't be the null account.
    NullAddress,

    /// deployer can't be the null account.
    NullDeployer,

    /// crowdsale sells token {0}, but the ledger it is deployed to manages token {1}.
    TokenMismatch(Account, Account),

    /// token wallet can't be the null account.
    NullTokenWallet,

    /// token wallet can't be the token contract {0} itself.
    TokenWalletIsToken(Account),

    /// opening time {0} is in the past.
    OpeningInPast(DateTime<Utc>),

    /// closing time {1} must be after the opening time {0}.
    ClosingNotAfterOpening(DateTime<Utc>, DateTime<Utc>),
}

/// Precondition failures of a crowdsale operation. Detected before any state is touched.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum ValidationError {
    /// beneficiary can't be the null account.
    NullBeneficiary,

    /// crowdsale {0} can't buy tokens for itself.
    SaleBeneficiary(Account),

    /// purchase must carry a non-zero value.
    ZeroValue,

    /// operation does not accept payments, while {0} native units were attached.
    NonPayable(Value),

    /// sale is not open yet; it opens at {0}.
    NotOpen(DateTime<Utc>),

    /// sale has closed at {0}.
    Closed(DateTime<Utc>),

    /// beneficiary {0} is not in the allow-list.
    NotAllowed(Account),

    /// contribution of {0} would reach {1}, exceeding its cap of {2}.
    CapExceeded(Account, Value, Value),

    /// crowdsale is not access-restricted and has no allow-list.
    NoAllowlist,

    /// crowdsale has no individual contribution caps.
    NoCaps,

    /// batch of {0} accounts exceeds the limit of 50 accounts.
    BatchTooLarge(usize),

    /// null account can't be listed or capped.
    NullAccount,
}

/// Failures of converting paid value into tokens and handing them to the beneficiary.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum DeliveryError {
    /// token amount for {0} native units at rate {1} overflows.
    AmountOverflow(Value, Rate),

    /// total raised value overflows.
    RaisedOverflow,

    #[from]
    #[display(inner)]
    Token(TokenError),
}

/// Any error which may abort a crowdsale invocation.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error, From)]
#[display(inner)]
pub enum SaleError {
    #[from]
    Validation(ValidationError),

    #[from]
    #[from(TokenError)]
    Delivery(DeliveryError),

    #[from]
    Funds(FundsError),

    #[from]
    Authorization(AuthorizationError),
}

