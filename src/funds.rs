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

use crate::{Account, Transactional, Value};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum FundsError {
    /// account {0} has {1} native units, which is less than the attached {2}.
    InsufficientFunds(Account, Value, Value),

    /// native funds can't be sent to or from the null account.
    NullAccount,

    /// native balance overflow.
    Overflow,
}

/// Native-currency balances of ledger accounts.
///
/// Used to attach value to a call and to forward collected value to the sale wallet. Like the
/// token ledger, it journals changes made inside a transaction.
#[derive(Clone, Debug, Default)]
pub struct NativeFunds {
    balances: BTreeMap<Account, Value>,
    journal: Option<Vec<(Account, Value)>>,
}

impl NativeFunds {
    pub fn new() -> Self { none!() }

    pub fn with(balances: impl IntoIterator<Item = (Account, Value)>) -> Self {
        Self { balances: balances.into_iter().collect(), journal: None }
    }

    pub fn balance_of(&self, account: Account) -> Value {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    pub fn accounts(&self) -> impl Iterator<Item = (Account, Value)> + '_ {
        self.balances.iter().map(|(account, value)| (*account, *value))
    }

    /// Credits newly issued native value to an account. This is what the ledger does outside of
    /// the engine, e.g. when funding test accounts.
    pub fn deposit(&mut self, account: Account, value: Value) -> Result<(), FundsError> {
        if account.is_null() {
            return Err(FundsError::NullAccount);
        }
        let balance = self
            .balance_of(account)
            .checked_add(value)
            .ok_or(FundsError::Overflow)?;
        self.set(account, balance);
        Ok(())
    }

    pub fn transfer(&mut self, from: Account, to: Account, value: Value) -> Result<(), FundsError> {
        if from.is_null() || to.is_null() {
            return Err(FundsError::NullAccount);
        }
        let balance = self.balance_of(from);
        let remaining = balance
            .checked_sub(value)
            .ok_or(FundsError::InsufficientFunds(from, balance, value))?;
        if from == to {
            return Ok(());
        }
        let received = self
            .balance_of(to)
            .checked_add(value)
            .ok_or(FundsError::Overflow)?;
        self.set(from, remaining);
        self.set(to, received);
        Ok(())
    }

    fn set(&mut self, account: Account, value: Value) {
        let prev = self.balance_of(account);
        if let Some(journal) = &mut self.journal {
            journal.push((account, prev));
        }
        self.restore(account, value);
    }

    fn restore(&mut self, account: Account, value: Value) {
        if value.is_zero() {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, value);
        }
    }
}

impl Transactional for NativeFunds {
    fn begin_transaction(&mut self) {
        debug_assert!(self.journal.is_none(), "nested native funds transaction");
        self.journal = Some(vec![]);
    }

    fn commit_transaction(&mut self) { self.journal = None; }

    fn abort_transaction(&mut self) {
        let Some(journal) = self.journal.take() else {
            return;
        };
        for (account, value) in journal.into_iter().rev() {
            self.restore(account, value);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ALICE: Account = Account::with_fill(0x0A);
    const BOB: Account = Account::with_fill(0x0B);

    #[test]
    fn transfer() {
        let mut funds = NativeFunds::with([(ALICE, Value::from(10u32))]);
        funds.transfer(ALICE, BOB, Value::from(4u32)).unwrap();
        assert_eq!(funds.balance_of(ALICE), Value::from(6u32));
        assert_eq!(funds.balance_of(BOB), Value::from(4u32));
        assert_eq!(
            funds.transfer(BOB, ALICE, Value::from(5u32)),
            Err(FundsError::InsufficientFunds(BOB, Value::from(4u32), Value::from(5u32)))
        );
        assert_eq!(funds.deposit(Account::ZERO, Value::from(1u32)), Err(FundsError::NullAccount));
    }

    #[test]
    fn abort() {
        let mut funds = NativeFunds::with([(ALICE, Value::from(10u32))]);
        funds.begin_transaction();
        funds.transfer(ALICE, BOB, Value::from(10u32)).unwrap();
        funds.deposit(BOB, Value::from(1u32)).unwrap();
        funds.abort_transaction();
        assert_eq!(funds.balance_of(ALICE), Value::from(10u32));
        assert_eq!(funds.balance_of(BOB), Value::ZERO);
        assert_eq!(funds.accounts().count(), 1);
    }
}
