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

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Admission, AdmissionGate};
use crate::{Account, TokenPurchase, ValidationError, Value};

/// Per-beneficiary limits on the total contributed value.
///
/// Accounts without an explicit cap have a cap of zero and thus can't buy anything.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub struct IndividualCaps {
    caps: BTreeMap<Account, Value>,
    contributions: BTreeMap<Account, Value>,
}

impl IndividualCaps {
    pub fn new() -> Self { none!() }

    pub fn with(caps: impl IntoIterator<Item = (Account, Value)>) -> Self {
        Self { caps: caps.into_iter().collect(), contributions: none!() }
    }

    pub fn cap(&self, beneficiary: Account) -> Value {
        self.caps.get(&beneficiary).copied().unwrap_or_default()
    }

    /// Value contributed on behalf of the beneficiary so far.
    pub fn contribution(&self, beneficiary: Account) -> Value {
        self.contributions
            .get(&beneficiary)
            .copied()
            .unwrap_or_default()
    }

    /// Value the beneficiary may still contribute.
    pub fn headroom(&self, beneficiary: Account) -> Value {
        self.cap(beneficiary)
            .saturating_sub(self.contribution(beneficiary))
    }

    pub fn set_cap(&mut self, beneficiary: Account, cap: Value) -> Result<(), ValidationError> {
        if beneficiary.is_null() {
            return Err(ValidationError::NullAccount);
        }
        self.caps.insert(beneficiary, cap);
        Ok(())
    }
}

impl AdmissionGate for IndividualCaps {
    fn admit(&self, admission: &Admission) -> Result<(), ValidationError> {
        let beneficiary = admission.beneficiary;
        let cap = self.cap(beneficiary);
        let total = self.contribution(beneficiary).checked_add(admission.value);
        match total {
            Some(total) if total <= cap => Ok(()),
            Some(total) => Err(ValidationError::CapExceeded(beneficiary, total, cap)),
            None => Err(ValidationError::CapExceeded(beneficiary, Value::MAX, cap)),
        }
    }

    fn record(&mut self, purchase: &TokenPurchase) {
        let total = self
            .contribution(purchase.beneficiary)
            .saturating_add(purchase.value);
        self.contributions.insert(purchase.beneficiary, total);
    }

    fn caps(&self) -> Option<&IndividualCaps> { Some(self) }

    fn caps_mut(&mut self) -> Option<&mut IndividualCaps> { Some(self) }
}

#[cfg(test)]
mod test {
    use chrono::Utc;

    use super::*;
    use crate::Amount;

    const ALICE: Account = Account::with_fill(0x0A);
    const BOB: Account = Account::with_fill(0x0B);

    fn admission(value: u32) -> Admission {
        Admission { purchaser: BOB, beneficiary: ALICE, value: Value::from(value), now: Utc::now() }
    }

    fn purchase(value: u32) -> TokenPurchase {
        TokenPurchase {
            purchaser: BOB,
            beneficiary: ALICE,
            value: Value::from(value),
            amount: Amount::from(value),
        }
    }

    #[test]
    fn zero_cap_by_default() {
        let caps = IndividualCaps::new();
        assert_eq!(caps.cap(ALICE), Value::ZERO);
        assert_eq!(
            caps.admit(&admission(1)),
            Err(ValidationError::CapExceeded(ALICE, Value::from(1u32), Value::ZERO))
        );
    }

    #[test]
    fn contributions_accumulate() {
        let mut caps = IndividualCaps::with([(ALICE, Value::from(10u32))]);
        assert_eq!(caps.admit(&admission(10)), Ok(()));
        caps.record(&purchase(6));
        assert_eq!(caps.contribution(ALICE), Value::from(6u32));
        assert_eq!(caps.headroom(ALICE), Value::from(4u32));
        assert_eq!(caps.admit(&admission(4)), Ok(()));
        assert_eq!(
            caps.admit(&admission(5)),
            Err(ValidationError::CapExceeded(ALICE, Value::from(11u32), Value::from(10u32)))
        );
        assert_eq!(caps.set_cap(Account::ZERO, Value::ZERO), Err(ValidationError::NullAccount));
    }
}
