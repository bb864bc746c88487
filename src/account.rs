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

use core::fmt::{self, Debug, Display, Formatter};
use core::str::FromStr;

use amplify::hex::{self, FromHex, ToHex};

use crate::LIB_NAME_CROWDSALE;

/// Length of an account address, in bytes.
pub const ACCOUNT_LEN: usize = 20;

/// Ledger account address.
///
/// Accounts identify token holders, payers, beneficiaries and contracts alike. The all-zero
/// address is the null account: it can't own anything, receive tokens or be an owner.
#[derive(Wrapper, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default, From)]
#[wrapper(Deref)]
#[derive(StrictType, StrictEncode, StrictDecode)]
#[strict_type(lib = LIB_NAME_CROWDSALE)]
pub struct Account([u8; ACCOUNT_LEN]);

impl Account {
    pub const ZERO: Self = Account([0u8; ACCOUNT_LEN]);

    /// Constructs an account with all bytes set to `byte`. Mostly useful in tests and fixtures.
    pub const fn with_fill(byte: u8) -> Self { Account([byte; ACCOUNT_LEN]) }

    pub const fn from_byte_array(bytes: [u8; ACCOUNT_LEN]) -> Self { Account(bytes) }

    pub const fn to_byte_array(self) -> [u8; ACCOUNT_LEN] { self.0 }

    #[inline]
    pub fn is_null(&self) -> bool { *self == Self::ZERO }
}

impl Display for Account {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { write!(f, "0x{}", self.0.to_hex()) }
}

impl Debug for Account {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Account").field(&self.to_string()).finish()
    }
}

#[derive(Clone, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum ParseAccountError {
    /// invalid hexadecimal account representation; {0}
    #[from]
    Hex(hex::Error),

    /// account address must be 20 bytes long, while {0} bytes were given.
    Len(usize),
}

impl FromStr for Account {
    type Err = ParseAccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = Vec::<u8>::from_hex(s)?;
        let len = bytes.len();
        let bytes = <[u8; ACCOUNT_LEN]>::try_from(bytes).map_err(|_| ParseAccountError::Len(len))?;
        Ok(Account(bytes))
    }
}

#[cfg(feature = "serde")]
mod _serde {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::*;

    impl Serialize for Account {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Account {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Account::from_str(&s).map_err(D::Error::custom)
        }
    }
}
