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

//! Strategies producing purchased tokens and handing them to the beneficiary.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{Account, Amount, ConstructionError, TokenError, TokenLedger};

pub trait Delivery {
    /// Checks the strategy parameters against the address of the token being sold.
    fn validate(&self, _token: Account) -> Result<(), ConstructionError> { Ok(()) }

    /// Moves `amount` of freshly purchased tokens to `beneficiary` on behalf of the crowdsale
    /// deployed at `sale`. On error the ledger must stay unchanged.
    fn deliver<T: TokenLedger>(
        &self,
        ledger: &mut T,
        sale: Account,
        beneficiary: Account,
        amount: Amount,
    ) -> Result<(), TokenError>;

    /// Number of tokens which can still be delivered, or `None` if there is no bound.
    fn remaining<T: TokenLedger>(&self, ledger: &T, sale: Account) -> Option<Amount>;

    /// Account holding the tokens for sale, when it is not the crowdsale itself.
    fn token_wallet(&self) -> Option<Account> { None }
}

/// Transfers tokens from the crowdsale own balance, which the deployer must pre-fund.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DirectDelivery;

impl Delivery for DirectDelivery {
    fn deliver<T: TokenLedger>(
        &self,
        ledger: &mut T,
        sale: Account,
        beneficiary: Account,
        amount: Amount,
    ) -> Result<(), TokenError> {
        ledger.transfer(sale, beneficiary, amount)
    }

    fn remaining<T: TokenLedger>(&self, ledger: &T, sale: Account) -> Option<Amount> {
        Some(ledger.balance_of(sale))
    }
}

/// Transfers tokens from a separate token wallet, which has approved an allowance to the
/// crowdsale. Each delivery consumes exactly the delivered amount of the allowance.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct AllowanceDelivery {
    token_wallet: Account,
}

impl AllowanceDelivery {
    pub fn new(token_wallet: Account) -> Self { Self { token_wallet } }
}

impl Delivery for AllowanceDelivery {
    fn validate(&self, token: Account) -> Result<(), ConstructionError> {
        if self.token_wallet.is_null() {
            return Err(ConstructionError::NullTokenWallet);
        }
        if self.token_wallet == token {
            return Err(ConstructionError::TokenWalletIsToken(token));
        }
        Ok(())
    }

    fn deliver<T: TokenLedger>(
        &self,
        ledger: &mut T,
        sale: Account,
        beneficiary: Account,
        amount: Amount,
    ) -> Result<(), TokenError> {
        ledger.transfer_from(sale, self.token_wallet, beneficiary, amount)
    }

    fn remaining<T: TokenLedger>(&self, ledger: &T, sale: Account) -> Option<Amount> {
        Some(ledger.allowance(self.token_wallet, sale))
    }

    fn token_wallet(&self) -> Option<Account> { Some(self.token_wallet) }
}

/// Mints purchased tokens. The crowdsale must hold the minter role of the token.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MintedDelivery;

impl Delivery for MintedDelivery {
    fn deliver<T: TokenLedger>(
        &self,
        ledger: &mut T,
        sale: Account,
        beneficiary: Account,
        amount: Amount,
    ) -> Result<(), TokenError> {
        ledger.mint(sale, beneficiary, amount)
    }

    fn remaining<T: TokenLedger>(&self, ledger: &T, sale: Account) -> Option<Amount> {
        if ledger.minter() != sale {
            return Some(Amount::ZERO);
        }
        ledger
            .supply_cap()
            .map(|cap| cap.saturating_sub(ledger.total_supply()))
    }
}

/// Delivery strategy chosen at run time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, From)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize),
    serde(rename_all = "camelCase", tag = "strategy")
)]
pub enum AnyDelivery {
    #[from]
    Direct(DirectDelivery),
    #[from]
    Allowance(AllowanceDelivery),
    #[from]
    Minted(MintedDelivery),
}

impl Delivery for AnyDelivery {
    fn validate(&self, token: Account) -> Result<(), ConstructionError> {
        match self {
            AnyDelivery::Direct(d) => d.validate(token),
            AnyDelivery::Allowance(d) => d.validate(token),
            AnyDelivery::Minted(d) => d.validate(token),
        }
    }

    fn deliver<T: TokenLedger>(
        &self,
        ledger: &mut T,
        sale: Account,
        beneficiary: Account,
        amount: Amount,
    ) -> Result<(), TokenError> {
        match self {
            AnyDelivery::Direct(d) => d.deliver(ledger, sale, beneficiary, amount),
            AnyDelivery::Allowance(d) => d.deliver(ledger, sale, beneficiary, amount),
            AnyDelivery::Minted(d) => d.deliver(ledger, sale, beneficiary, amount),
        }
    }

    fn remaining<T: TokenLedger>(&self, ledger: &T, sale: Account) -> Option<Amount> {
        match self {
            AnyDelivery::Direct(d) => d.remaining(ledger, sale),
            AnyDelivery::Allowance(d) => d.remaining(ledger, sale),
            AnyDelivery::Minted(d) => d.remaining(ledger, sale),
        }
    }

    fn token_wallet(&self) -> Option<Account> {
        match self {
            AnyDelivery::Allowance(d) => d.token_wallet(),
            AnyDelivery::Direct(_) | AnyDelivery::Minted(_) => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::MemToken;

    const TOKEN: Account = Account::with_fill(0x70);
    const ISSUER: Account = Account::with_fill(0x01);
    const SALE: Account = Account::with_fill(0x5A);
    const ALICE: Account = Account::with_fill(0x0A);

    fn ledger() -> MemToken { MemToken::issue(TOKEN, ISSUER, Amount::from(1000u32)) }

    #[test]
    fn direct() {
        let mut ledger = ledger();
        ledger.transfer(ISSUER, SALE, Amount::from(100u32)).unwrap();
        let delivery = AnyDelivery::from(DirectDelivery);
        delivery
            .deliver(&mut ledger, SALE, ALICE, Amount::from(60u32))
            .unwrap();
        assert_eq!(delivery.remaining(&ledger, SALE), Some(Amount::from(40u32)));
        assert_eq!(
            delivery.deliver(&mut ledger, SALE, ALICE, Amount::from(41u32)),
            Err(TokenError::InsufficientBalance(SALE, Amount::from(40u32), Amount::from(41u32)))
        );
        assert_eq!(ledger.balance_of(ALICE), Amount::from(60u32));
    }

    #[test]
    fn allowance_validation() {
        assert_eq!(
            AllowanceDelivery::new(Account::ZERO).validate(TOKEN),
            Err(ConstructionError::NullTokenWallet)
        );
        assert_eq!(
            AllowanceDelivery::new(TOKEN).validate(TOKEN),
            Err(ConstructionError::TokenWalletIsToken(TOKEN))
        );
        assert_eq!(AllowanceDelivery::new(ISSUER).validate(TOKEN), Ok(()));
    }

    #[test]
    fn allowance() {
        let mut ledger = ledger();
        ledger.approve(ISSUER, SALE, Amount::from(500u32)).unwrap();
        let delivery = AnyDelivery::from(AllowanceDelivery::new(ISSUER));
        assert_eq!(delivery.token_wallet(), Some(ISSUER));
        delivery
            .deliver(&mut ledger, SALE, ALICE, Amount::from(200u32))
            .unwrap();
        assert_eq!(delivery.remaining(&ledger, SALE), Some(Amount::from(300u32)));
        assert_eq!(ledger.balance_of(ISSUER), Amount::from(800u32));
        assert_eq!(ledger.balance_of(SALE), Amount::ZERO);
    }

    #[test]
    fn minted() {
        let mut ledger = ledger().with_cap(Amount::from(1500u32));
        let delivery = MintedDelivery;
        assert_eq!(delivery.remaining(&ledger, SALE), Some(Amount::ZERO));
        assert_eq!(
            delivery.deliver(&mut ledger, SALE, ALICE, Amount::from(1u32)),
            Err(TokenError::NotMinter(SALE))
        );
        ledger.transfer_minter(ISSUER, SALE).unwrap();
        assert_eq!(delivery.remaining(&ledger, SALE), Some(Amount::from(500u32)));
        delivery
            .deliver(&mut ledger, SALE, ALICE, Amount::from(500u32))
            .unwrap();
        assert_eq!(ledger.total_supply(), Amount::from(1500u32));
        assert_eq!(
            delivery.deliver(&mut ledger, SALE, ALICE, Amount::from(1u32)),
            Err(TokenError::CapExceeded(Amount::from(1500u32)))
        );
        assert_eq!(MintedDelivery.remaining(&self::ledger(), ISSUER), None);
    }
}
