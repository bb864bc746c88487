// Command-line simulator for funds-for-token crowdsales
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

use std::path::PathBuf;

use clap::ValueHint;

#[derive(Parser)]
#[clap(
    name = "crowdsalex",
    bin_name = "crowdsalex",
    author,
    version,
    about = "Simulates funds-for-token crowdsales described by YAML scenarios"
)]
pub struct Args {
    /// Increase verbosity of the log written to stderr (-v, -vv, -vvv)
    ///
    /// Ignored when `RUST_LOG` is set.
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Command to execute
    #[clap(subcommand)]
    pub command: Cmd,
}

#[derive(Parser)]
pub enum Cmd {
    /// Deploy the crowdsale and execute every step of the scenario
    ///
    /// Prints a YAML document per step with either the emitted events or the revert reason,
    /// followed by the final crowdsale summary.
    Run {
        /// Stop at the first reverted step
        #[clap(long)]
        fail_fast: bool,

        /// Scenario file
        #[clap(value_hint = ValueHint::FilePath)]
        scenario: PathBuf,
    },

    /// Deploy the crowdsale without executing any steps and print its summary
    Check {
        /// Scenario file
        #[clap(value_hint = ValueHint::FilePath)]
        scenario: PathBuf,
    },
}
