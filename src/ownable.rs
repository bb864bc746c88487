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

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Account, SaleError, ValidationError};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum AuthorizationError {
    /// account {0} is not the owner of the crowdsale.
    NotOwner(Account),

    /// crowdsale has no owner since the ownership was renounced.
    Renounced,
}

/// Single-owner capability.
///
/// The owner is the only account allowed to administer the crowdsale. Once renounced, the
/// ownership can't be restored and every owner-only operation fails.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Ownable {
    owner: Option<Account>,
}

impl Ownable {
    /// Assigns ownership to `owner`; the null account produces an ownerless instance.
    pub fn new(owner: Account) -> Self { Self { owner: Some(owner).filter(|a| !a.is_null()) } }

    pub fn owner(&self) -> Option<Account> { self.owner }

    pub fn is_owner(&self, account: Account) -> bool {
        !account.is_null() && self.owner == Some(account)
    }

    pub fn ensure_owner(&self, caller: Account) -> Result<(), AuthorizationError> {
        match self.owner {
            None => Err(AuthorizationError::Renounced),
            Some(owner) if owner == caller && !caller.is_null() => Ok(()),
            Some(_) => Err(AuthorizationError::NotOwner(caller)),
        }
    }

    /// Hands the ownership over to `new_owner`, returning the previous owner.
    pub fn transfer_ownership(
        &mut self,
        caller: Account,
        new_owner: Account,
    ) -> Result<Account, SaleError> {
        self.ensure_owner(caller)?;
        if new_owner.is_null() {
            return Err(ValidationError::NullAccount.into());
        }
        self.owner = Some(new_owner);
        Ok(caller)
    }

    /// Leaves the instance without an owner, returning the previous owner.
    pub fn renounce_ownership(&mut self, caller: Account) -> Result<Account, AuthorizationError> {
        self.ensure_owner(caller)?;
        self.owner = None;
        Ok(caller)
    }
}
