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

use core::fmt::{self, Display, Formatter};
use core::iter::Sum;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::LIB_NAME_CROWDSALE;

/// Number of decimal digits in a whole unit of both native value and tokens.
pub const UNIT_DECIMALS: u8 = 18;

fn pow10(exp: u8) -> Option<u128> { 10u128.checked_pow(exp as u32) }

macro_rules! impl_units {
    ($ty:ident) => {
        impl $ty {
            pub const ZERO: Self = $ty(0);
            pub const MAX: Self = $ty(u128::MAX);

            /// Constructs the value from a decimal number `whole.fract`, where `fract` has
            /// `fract_digits` digits after the point, in units with [`UNIT_DECIMALS`] precision.
            ///
            /// Returns `None` if the fraction has more digits than the precision allows or if the
            /// result does not fit into 128 bits.
            pub fn from_units(whole: u128, fract: u128, fract_digits: u8) -> Option<Self> {
                if fract_digits > UNIT_DECIMALS || fract >= pow10(fract_digits)? {
                    return None;
                }
                let whole = whole.checked_mul(pow10(UNIT_DECIMALS)?)?;
                let fract = fract.checked_mul(pow10(UNIT_DECIMALS - fract_digits)?)?;
                whole.checked_add(fract).map(Self)
            }

            /// Constructs the value from a number of whole units.
            pub fn whole(units: u128) -> Option<Self> { Self::from_units(units, 0, 0) }

            pub const fn value(self) -> u128 { self.0 }

            pub const fn is_zero(self) -> bool { self.0 == 0 }

            #[must_use]
            pub fn checked_add(&self, other: impl Into<Self>) -> Option<Self> {
                self.0.checked_add(other.into().0).map(Self)
            }
            #[must_use]
            pub fn checked_sub(&self, other: impl Into<Self>) -> Option<Self> {
                self.0.checked_sub(other.into().0).map(Self)
            }

            pub fn saturating_add(&self, other: impl Into<Self>) -> Self {
                self.0.saturating_add(other.into().0).into()
            }
            pub fn saturating_sub(&self, other: impl Into<Self>) -> Self {
                self.0.saturating_sub(other.into().0).into()
            }
        }

        impl Sum for $ty {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold($ty::ZERO, |sum, value| sum.saturating_add(value))
            }
        }
    };
}

/// Amount of native ledger currency, in its smallest indivisible units.
///
/// This is what purchasers attach to a call and what gets forwarded to the sale wallet.
#[derive(Wrapper, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Default, From)]
#[wrapper(Display, FromStr)]
#[derive(StrictType, StrictEncode, StrictDecode)]
#[strict_type(lib = LIB_NAME_CROWDSALE)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Value(
    #[from]
    #[from(u64)]
    #[from(u32)]
    u128,
);

/// Amount of tokens, in the smallest indivisible token units.
#[derive(Wrapper, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Default, From)]
#[wrapper(Display, FromStr)]
#[derive(StrictType, StrictEncode, StrictDecode)]
#[strict_type(lib = LIB_NAME_CROWDSALE)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Amount(
    #[from]
    #[from(u64)]
    #[from(u32)]
    u128,
);

impl_units!(Value);
impl_units!(Amount);

/// Exchange rate: how many token units a buyer gets per unit of native value.
///
/// The rate is the conversion between the smallest native unit and the smallest token unit, so
/// with a rate of 1 and both sides having 18 decimals one whole coin buys one whole token. The rate
/// is always positive.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct Rate(u128);

impl Rate {
    /// Constructs the rate, returning `None` for zero.
    pub const fn new(rate: u128) -> Option<Self> {
        if rate == 0 {
            None
        } else {
            Some(Rate(rate))
        }
    }

    pub const fn value(self) -> u128 { self.0 }

    /// Converts paid native value into the token amount, failing on overflow.
    #[must_use]
    pub fn token_amount(self, value: Value) -> Option<Amount> {
        self.0.checked_mul(value.value()).map(Amount)
    }
}

impl Display for Rate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { Display::fmt(&self.0, f) }
}

#[cfg(feature = "serde")]
impl Serialize for Rate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u128(self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;
        let rate = u128::deserialize(deserializer)?;
        Rate::new(rate).ok_or_else(|| D::Error::custom("exchange rate must be positive"))
    }
}
