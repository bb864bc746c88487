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

use indexmap::IndexSet;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Admission, AdmissionGate};
use crate::{Account, ValidationError};

/// Ordered set of accounts allowed to receive purchased tokens.
///
/// Only the beneficiary is checked: anybody may pay for a listed account.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Allowlist(IndexSet<Account>);

impl Allowlist {
    pub fn new() -> Self { none!() }

    /// Constructs the list from `accounts`, skipping the null account.
    pub fn with(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self(accounts.into_iter().filter(|a| !a.is_null()).collect())
    }

    pub fn contains(&self, account: Account) -> bool { self.0.contains(&account) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Accounts in the order they were first listed.
    pub fn iter(&self) -> impl Iterator<Item = Account> + '_ { self.0.iter().copied() }

    /// Lists the account; returns whether it was not listed before.
    pub fn add(&mut self, account: Account) -> Result<bool, ValidationError> {
        if account.is_null() {
            return Err(ValidationError::NullAccount);
        }
        Ok(self.0.insert(account))
    }

    /// Unlists the account; returns whether it was listed.
    pub fn remove(&mut self, account: Account) -> bool { self.0.shift_remove(&account) }
}

impl AdmissionGate for Allowlist {
    fn admit(&self, admission: &Admission) -> Result<(), ValidationError> {
        if !self.contains(admission.beneficiary) {
            return Err(ValidationError::NotAllowed(admission.beneficiary));
        }
        Ok(())
    }

    fn allowlist(&self) -> Option<&Allowlist> { Some(self) }

    fn allowlist_mut(&mut self) -> Option<&mut Allowlist> { Some(self) }
}
