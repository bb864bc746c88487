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

//! Token balance ledger consumed by crowdsales.
//!
//! The ledger is an external collaborator: the engine only relies on the operations of the
//! [`TokenLedger`] trait and on their conservation guarantees. [`MemToken`] is an in-memory
//! implementation used by the simulator and by tests.

use std::collections::BTreeMap;

use crate::{Account, Amount, Transactional};

/// Errors reported by a token ledger. Any error leaves the ledger unchanged.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum TokenError {
    /// null account can't be used as a token holder or spender.
    NullAccount,

    /// account {0} holds {1} tokens, which is less than the requested {2}.
    InsufficientBalance(Account, Amount, Amount),

    /// account {0} allowed {1} to spend {2} tokens, which is less than the requested {3}.
    InsufficientAllowance(Account, Account, Amount, Amount),

    /// account {0} is not the token minter.
    NotMinter(Account),

    /// minting would exceed the token supply cap of {0}.
    CapExceeded(Amount),

    /// token amount overflow.
    Overflow,
}

/// Balance ledger holding per-account token balances, the allowance table and the minter role.
///
/// Implementations must guarantee conservation: transfers never change the total supply, only
/// [`TokenLedger::mint`] increases it, and a failed operation leaves the ledger unchanged.
pub trait TokenLedger: Transactional {
    /// Address of the token contract itself.
    fn address(&self) -> Account;

    fn total_supply(&self) -> Amount;

    fn balance_of(&self, account: Account) -> Amount;

    /// Remaining amount which `spender` may transfer on behalf of `owner`.
    fn allowance(&self, owner: Account, spender: Account) -> Amount;

    fn transfer(&mut self, from: Account, to: Account, amount: Amount) -> Result<(), TokenError>;

    /// Transfers tokens on behalf of `from`, consuming the allowance it gave to `spender`.
    fn transfer_from(
        &mut self,
        spender: Account,
        from: Account,
        to: Account,
        amount: Amount,
    ) -> Result<(), TokenError>;

    fn approve(&mut self, owner: Account, spender: Account, amount: Amount)
        -> Result<(), TokenError>;

    /// Upper bound on the total supply enforced by [`TokenLedger::mint`], if any.
    fn supply_cap(&self) -> Option<Amount> { None }

    /// Account allowed to mint new tokens. The null account means minting is disabled.
    fn minter(&self) -> Account;

    /// Creates new tokens, increasing the total supply. Fails unless `minter` holds the minter
    /// role.
    fn mint(&mut self, minter: Account, to: Account, amount: Amount) -> Result<(), TokenError>;

    /// Hands the minter role over to another account.
    fn transfer_minter(&mut self, current: Account, new: Account) -> Result<(), TokenError>;
}

#[derive(Copy, Clone, Debug)]
enum Undo {
    Balance(Account, Amount),
    Allowance(Account, Account, Amount),
    Supply(Amount),
    Minter(Account),
}

/// In-memory token ledger.
///
/// Mutations performed inside a transaction are journaled, so aborting the transaction restores
/// the exact state from its beginning.
#[derive(Clone, Debug)]
pub struct MemToken {
    address: Account,
    cap: Option<Amount>,
    balances: BTreeMap<Account, Amount>,
    allowances: BTreeMap<(Account, Account), Amount>,
    total_supply: Amount,
    minter: Account,
    journal: Option<Vec<Undo>>,
}

impl MemToken {
    /// Creates token at `address`, assigning the whole initial supply to `issuer`, who also becomes
    /// the token minter.
    pub fn issue(address: Account, issuer: Account, supply: Amount) -> Self {
        let mut balances = BTreeMap::new();
        if !supply.is_zero() {
            balances.insert(issuer, supply);
        }
        Self {
            address,
            cap: None,
            balances,
            allowances: BTreeMap::new(),
            total_supply: supply,
            minter: issuer,
            journal: None,
        }
    }

    /// Limits the total supply which may ever be reached by minting.
    pub fn with_cap(mut self, cap: Amount) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Iterates over all non-zero balances.
    pub fn holders(&self) -> impl Iterator<Item = (Account, Amount)> + '_ {
        self.balances.iter().map(|(account, amount)| (*account, *amount))
    }

    fn record(&mut self, undo: Undo) {
        if let Some(journal) = &mut self.journal {
            journal.push(undo);
        }
    }

    fn set_balance(&mut self, account: Account, amount: Amount) {
        let prev = self.balance_of(account);
        self.record(Undo::Balance(account, prev));
        if amount.is_zero() {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, amount);
        }
    }

    fn set_allowance(&mut self, owner: Account, spender: Account, amount: Amount) {
        let prev = self.allowance(owner, spender);
        self.record(Undo::Allowance(owner, spender, prev));
        if amount.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }

    fn set_supply(&mut self, supply: Amount) {
        let prev = self.total_supply;
        self.record(Undo::Supply(prev));
        self.total_supply = supply;
    }

    fn set_minter(&mut self, minter: Account) {
        let prev = self.minter;
        self.record(Undo::Minter(prev));
        self.minter = minter;
    }

    fn undo(&mut self, undo: Undo) {
        match undo {
            Undo::Balance(account, amount) if amount.is_zero() => {
                self.balances.remove(&account);
            }
            Undo::Balance(account, amount) => {
                self.balances.insert(account, amount);
            }
            Undo::Allowance(owner, spender, amount) if amount.is_zero() => {
                self.allowances.remove(&(owner, spender));
            }
            Undo::Allowance(owner, spender, amount) => {
                self.allowances.insert((owner, spender), amount);
            }
            Undo::Supply(supply) => self.total_supply = supply,
            Undo::Minter(minter) => self.minter = minter,
        }
    }
}

impl Transactional for MemToken {
    fn begin_transaction(&mut self) {
        debug_assert!(self.journal.is_none(), "nested token ledger transaction");
        self.journal = Some(vec![]);
    }

    fn commit_transaction(&mut self) { self.journal = None; }

    fn abort_transaction(&mut self) {
        let Some(journal) = self.journal.take() else {
            return;
        };
        for undo in journal.into_iter().rev() {
            self.undo(undo);
        }
    }
}

impl TokenLedger for MemToken {
    fn address(&self) -> Account { self.address }

    fn total_supply(&self) -> Amount { self.total_supply }

    fn balance_of(&self, account: Account) -> Amount {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: Account, spender: Account) -> Amount {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    fn transfer(&mut self, from: Account, to: Account, amount: Amount) -> Result<(), TokenError> {
        if from.is_null() || to.is_null() {
            return Err(TokenError::NullAccount);
        }
        let balance = self.balance_of(from);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientBalance(from, balance, amount))?;
        if from == to {
            return Ok(());
        }
        let received = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.set_balance(from, remaining);
        self.set_balance(to, received);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: Account,
        from: Account,
        to: Account,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let allowance = self.allowance(from, spender);
        let remaining = allowance.checked_sub(amount).ok_or(
            TokenError::InsufficientAllowance(from, spender, allowance, amount),
        )?;
        self.transfer(from, to, amount)?;
        self.set_allowance(from, spender, remaining);
        Ok(())
    }

    fn approve(
        &mut self,
        owner: Account,
        spender: Account,
        amount: Amount,
    ) -> Result<(), TokenError> {
        if owner.is_null() || spender.is_null() {
            return Err(TokenError::NullAccount);
        }
        self.set_allowance(owner, spender, amount);
        Ok(())
    }

    fn supply_cap(&self) -> Option<Amount> { self.cap }

    fn minter(&self) -> Account { self.minter }

    fn mint(&mut self, minter: Account, to: Account, amount: Amount) -> Result<(), TokenError> {
        if minter.is_null() || minter != self.minter {
            return Err(TokenError::NotMinter(minter));
        }
        if to.is_null() {
            return Err(TokenError::NullAccount);
        }
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        if let Some(cap) = self.cap {
            if supply > cap {
                return Err(TokenError::CapExceeded(cap));
            }
        }
        let balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.set_supply(supply);
        self.set_balance(to, balance);
        Ok(())
    }

    fn transfer_minter(&mut self, current: Account, new: Account) -> Result<(), TokenError> {
        if current.is_null() || current != self.minter {
            return Err(TokenError::NotMinter(current));
        }
        if new.is_null() {
            return Err(TokenError::NullAccount);
        }
        self.set_minter(new);
        Ok(())
    }
}
