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

//! Execution environment standing in for the ledger network.
//!
//! A [`Host`] owns everything a crowdsale invocation reads or mutates outside of the crowdsale
//! itself: the block clock, native funds, the token ledger and the event log. Each invocation
//! runs inside [`Host::transact`], which either commits all effects or none of them.

use chrono::{DateTime, TimeDelta, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{Account, NativeFunds, SaleEvent, TokenLedger, Value};

/// Storage which can group its mutations into all-or-nothing transactions.
pub trait Transactional {
    /// Starts journaling mutations. Transactions do not nest.
    fn begin_transaction(&mut self);

    /// Makes all mutations since [`Self::begin_transaction`] permanent.
    fn commit_transaction(&mut self);

    /// Discards all mutations since [`Self::begin_transaction`]. A no-op outside of a
    /// transaction.
    fn abort_transaction(&mut self);
}

/// Caller context of a single invocation: who calls and how much native value is attached.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    pub caller: Account,
    pub value: Value,
}

impl Call {
    /// A call carrying no value.
    pub fn by(caller: Account) -> Self { Self { caller, value: Value::ZERO } }

    pub fn with_value(caller: Account, value: impl Into<Value>) -> Self {
        Self { caller, value: value.into() }
    }

    pub fn is_payable(&self) -> bool { !self.value.is_zero() }
}

#[derive(Clone, Debug)]
pub struct Host<T: TokenLedger> {
    now: DateTime<Utc>,
    funds: NativeFunds,
    token: T,
    log: Vec<SaleEvent>,
    checkpoint: Option<usize>,
}

impl<T: TokenLedger> Host<T> {
    pub fn new(token: T, now: DateTime<Utc>) -> Self {
        Self { now, funds: none!(), token, log: vec![], checkpoint: None }
    }

    pub fn with_funds(mut self, funds: NativeFunds) -> Self {
        self.funds = funds;
        self
    }

    /// Timestamp of the block being executed.
    pub fn now(&self) -> DateTime<Utc> { self.now }

    /// Moves the clock forward to `time`. Ledger time never goes back, so earlier timestamps are
    /// ignored.
    pub fn advance_to(&mut self, time: DateTime<Utc>) {
        if time > self.now {
            self.now = time;
        }
    }

    /// Moves the clock forward by `delta`; negative deltas are ignored.
    pub fn advance(&mut self, delta: TimeDelta) {
        if let Some(time) = self.now.checked_add_signed(delta) {
            self.advance_to(time);
        }
    }

    pub fn token(&self) -> &T { &self.token }

    pub fn token_mut(&mut self) -> &mut T { &mut self.token }

    pub fn funds(&self) -> &NativeFunds { &self.funds }

    pub fn funds_mut(&mut self) -> &mut NativeFunds { &mut self.funds }

    /// Full event log, in emission order.
    pub fn events(&self) -> &[SaleEvent] { &self.log }

    pub fn emit(&mut self, event: SaleEvent) { self.log.push(event); }

    pub fn is_in_transaction(&self) -> bool { self.checkpoint.is_some() }

    /// Runs `f` as a single atomic transaction.
    ///
    /// If `f` fails, every change it made to the token ledger, the native funds and the event log
    /// is discarded and the error is returned unchanged.
    pub fn transact<R, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<R, E>) -> Result<R, E> {
        debug_assert!(self.checkpoint.is_none(), "nested host transaction");
        self.checkpoint = Some(self.log.len());
        self.token.begin_transaction();
        self.funds.begin_transaction();

        let res = f(self);

        let checkpoint = self.checkpoint.take().unwrap_or(self.log.len());
        match res {
            Ok(_) => {
                self.token.commit_transaction();
                self.funds.commit_transaction();
            }
            Err(_) => {
                self.token.abort_transaction();
                self.funds.abort_transaction();
                trace!("transaction aborted, discarding {} log entries", self.log.len() - checkpoint);
                self.log.truncate(checkpoint);
            }
        }
        res
    }
}
