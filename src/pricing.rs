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

use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{Amount, ConstructionError, Rate, TimeWindow, Value};

/// Exchange rate policy of a sale.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize),
    serde(rename_all = "camelCase", tag = "policy")
)]
pub enum Pricing {
    /// The same rate for the whole sale.
    Fixed { rate: Rate },

    /// Rate decreasing linearly from `initial` at the opening to `final_rate` at the closing of
    /// the window; that is, the token price increases with time.
    Increasing {
        initial: Rate,
        final_rate: Rate,
        window: TimeWindow,
    },
}

impl Pricing {
    pub fn fixed(rate: u128) -> Result<Self, ConstructionError> {
        let rate = Rate::new(rate).ok_or(ConstructionError::ZeroRate)?;
        Ok(Pricing::Fixed { rate })
    }

    /// Requires `initial >= final_rate > 0`.
    pub fn increasing(
        initial: u128,
        final_rate: u128,
        window: TimeWindow,
    ) -> Result<Self, ConstructionError> {
        let final_rate = Rate::new(final_rate).ok_or(ConstructionError::ZeroRate)?;
        if initial < final_rate.value() {
            return Err(ConstructionError::InvalidRateRange(initial, final_rate.value()));
        }
        let initial = Rate::new(initial).ok_or(ConstructionError::ZeroRate)?;
        Ok(Pricing::Increasing { initial, final_rate, window })
    }

    /// Window the rate is bound to, if any.
    pub fn window(&self) -> Option<&TimeWindow> {
        match self {
            Pricing::Fixed { .. } => None,
            Pricing::Increasing { window, .. } => Some(window),
        }
    }

    /// Rate in effect at the moment `now`.
    ///
    /// For the increasing price the rate is `initial - elapsed * (initial - final) / duration`,
    /// where `elapsed` is clamped to the window and the division rounds toward zero.
    pub fn rate_at(&self, now: DateTime<Utc>) -> Rate {
        match *self {
            Pricing::Fixed { rate } => rate,
            Pricing::Increasing { initial, final_rate, window } => {
                let range = window.duration().num_seconds().max(1) as u128;
                let elapsed = window.elapsed(now).num_seconds().max(0) as u128;
                let spread = initial.value() - final_rate.value();
                // floor(elapsed * spread / range) split so that no product exceeds 128 bits
                let decrease = elapsed * (spread / range) + elapsed * (spread % range) / range;
                Rate::new(initial.value() - decrease).unwrap_or(final_rate)
            }
        }
    }

    /// Number of tokens `value` buys at the moment `now`, or `None` on overflow.
    pub fn token_amount(&self, value: Value, now: DateTime<Utc>) -> Option<Amount> {
        self.rate_at(now).token_amount(value)
    }
}
