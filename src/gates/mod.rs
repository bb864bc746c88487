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

//! Admission gates: preconditions a purchase must pass before it executes.
//!
//! Gates compose by conjunction: a pair `(A, B)` admits a purchase only if both `A` and `B` admit
//! it, and `Option<G>` admits everything when the gate is absent.

mod allowlist;
mod caps;
mod window;

use amplify::confinement::Confined;
use chrono::{DateTime, Utc};

pub use self::allowlist::Allowlist;
pub use self::caps::IndividualCaps;
pub use self::window::{TimeWindow, WindowState};
use crate::{Account, TokenPurchase, ValidationError, Value};

/// Maximal number of accounts an owner may list or cap in a single operation.
pub const MAX_BATCH: usize = 50;

/// Accounts processed by a single batch operation.
pub type Batch = Confined<Vec<Account>, 0, MAX_BATCH>;

/// Collects accounts into a batch, failing if there are more than [`MAX_BATCH`] of them.
pub fn batch(accounts: impl IntoIterator<Item = Account>) -> Result<Batch, ValidationError> {
    let accounts = accounts.into_iter().collect::<Vec<_>>();
    let len = accounts.len();
    Confined::try_from(accounts).map_err(|_| ValidationError::BatchTooLarge(len))
}

/// Purchase attempt as seen by admission gates.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Admission {
    pub purchaser: Account,
    pub beneficiary: Account,
    pub value: Value,
    pub now: DateTime<Utc>,
}

pub trait AdmissionGate {
    /// Checks whether the purchase may proceed. Must not have side effects.
    fn admit(&self, admission: &Admission) -> Result<(), ValidationError>;

    /// Accounts for a purchase which has passed all checks and can no longer fail.
    fn record(&mut self, _purchase: &TokenPurchase) {}

    fn window(&self) -> Option<&TimeWindow> { None }

    fn allowlist(&self) -> Option<&Allowlist> { None }

    fn allowlist_mut(&mut self) -> Option<&mut Allowlist> { None }

    fn caps(&self) -> Option<&IndividualCaps> { None }

    fn caps_mut(&mut self) -> Option<&mut IndividualCaps> { None }
}

/// Gate admitting every purchase.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Unrestricted;

impl AdmissionGate for Unrestricted {
    fn admit(&self, _admission: &Admission) -> Result<(), ValidationError> { Ok(()) }
}

impl<A: AdmissionGate, B: AdmissionGate> AdmissionGate for (A, B) {
    fn admit(&self, admission: &Admission) -> Result<(), ValidationError> {
        self.0.admit(admission)?;
        self.1.admit(admission)
    }

    fn record(&mut self, purchase: &TokenPurchase) {
        self.0.record(purchase);
        self.1.record(purchase);
    }

    fn window(&self) -> Option<&TimeWindow> { self.0.window().or_else(|| self.1.window()) }

    fn allowlist(&self) -> Option<&Allowlist> { self.0.allowlist().or_else(|| self.1.allowlist()) }

    fn allowlist_mut(&mut self) -> Option<&mut Allowlist> {
        match self.0.allowlist_mut() {
            Some(allowlist) => Some(allowlist),
            None => self.1.allowlist_mut(),
        }
    }

    fn caps(&self) -> Option<&IndividualCaps> { self.0.caps().or_else(|| self.1.caps()) }

    fn caps_mut(&mut self) -> Option<&mut IndividualCaps> {
        match self.0.caps_mut() {
            Some(caps) => Some(caps),
            None => self.1.caps_mut(),
        }
    }
}

impl<G: AdmissionGate> AdmissionGate for Option<G> {
    fn admit(&self, admission: &Admission) -> Result<(), ValidationError> {
        match self {
            Some(gate) => gate.admit(admission),
            None => Ok(()),
        }
    }

    fn record(&mut self, purchase: &TokenPurchase) {
        if let Some(gate) = self {
            gate.record(purchase);
        }
    }

    fn window(&self) -> Option<&TimeWindow> { self.as_ref().and_then(G::window) }

    fn allowlist(&self) -> Option<&Allowlist> { self.as_ref().and_then(G::allowlist) }

    fn allowlist_mut(&mut self) -> Option<&mut Allowlist> {
        self.as_mut().and_then(G::allowlist_mut)
    }

    fn caps(&self) -> Option<&IndividualCaps> { self.as_ref().and_then(G::caps) }

    fn caps_mut(&mut self) -> Option<&mut IndividualCaps> { self.as_mut().and_then(G::caps_mut) }
}
