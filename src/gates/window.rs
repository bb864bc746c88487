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

use chrono::{DateTime, TimeDelta, Utc};
#[cfg(feature = "serde")]
use serde::Serialize;

use super::{Admission, AdmissionGate};
use crate::{ConstructionError, ValidationError};

/// Phase of a timed sale. Driven by the clock only and never goes back.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display)]
#[display(lowercase)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub enum WindowState {
    Pending,
    Open,
    Closed,
}

/// Half-open time interval `[opening, closing)` during which purchases are accepted.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct TimeWindow {
    opening: DateTime<Utc>,
    closing: DateTime<Utc>,
}

impl TimeWindow {
    /// Constructs the window at the moment `now`. The window must not open in the past and must
    /// close strictly after it opens.
    pub fn new(
        opening: DateTime<Utc>,
        closing: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self, ConstructionError> {
        if opening < now {
            return Err(ConstructionError::OpeningInPast(opening));
        }
        if closing <= opening {
            return Err(ConstructionError::ClosingNotAfterOpening(opening, closing));
        }
        Ok(Self { opening, closing })
    }

    pub fn opening(&self) -> DateTime<Utc> { self.opening }

    pub fn closing(&self) -> DateTime<Utc> { self.closing }

    pub fn duration(&self) -> TimeDelta { self.closing - self.opening }

    pub fn state(&self, now: DateTime<Utc>) -> WindowState {
        if now < self.opening {
            WindowState::Pending
        } else if now < self.closing {
            WindowState::Open
        } else {
            WindowState::Closed
        }
    }

    pub fn is_open(&self, now: DateTime<Utc>) -> bool { self.state(now) == WindowState::Open }

    pub fn has_closed(&self, now: DateTime<Utc>) -> bool { now >= self.closing }

    /// Time passed since the opening, clamped to the window bounds.
    pub fn elapsed(&self, now: DateTime<Utc>) -> TimeDelta {
        now.clamp(self.opening, self.closing) - self.opening
    }
}

impl AdmissionGate for TimeWindow {
    fn admit(&self, admission: &Admission) -> Result<(), ValidationError> {
        match self.state(admission.now) {
            WindowState::Pending => Err(ValidationError::NotOpen(self.opening)),
            WindowState::Open => Ok(()),
            WindowState::Closed => Err(ValidationError::Closed(self.closing)),
        }
    }

    fn window(&self) -> Option<&TimeWindow> { Some(self) }
}
