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

use std::io::{stdout, Write};

use chrono::{DateTime, Utc};
use crowdsale::{Account, Amount, Runtime, SaleEvent, SaleSummary, TokenLedger, Value};
use serde::Serialize;
use tracing::warn;

use crate::cmd::{Args, Cmd};
use crate::scenario::Scenario;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StepReport {
    step: usize,
    time: DateTime<Utc>,
    /// Requested step time, when it was already in the past and the clock was kept.
    #[serde(skip_serializing_if = "Option::is_none")]
    late: Option<DateTime<Utc>>,
    caller: Account,
    value: Value,
    call: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<Vec<SaleEvent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reverted: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FinalReport {
    sale: SaleSummary,
    total_supply: Amount,
    wallet_funds: Value,
}

fn print_doc(doc: &impl Serialize) -> anyhow::Result<()> {
    let mut out = stdout().lock();
    writeln!(out, "---")?;
    serde_yaml::to_writer(&mut out, doc)?;
    Ok(())
}

/// Deploys the scenario sale and executes its steps, passing each step report to `report`.
fn run(
    scenario: &Scenario,
    fail_fast: bool,
    mut report: impl FnMut(&StepReport) -> anyhow::Result<()>,
) -> anyhow::Result<FinalReport> {
    let host = scenario.host()?;
    let sale = scenario.deploy(&host)?;
    let mut runtime = Runtime::new(host, sale);

    for (no, step) in scenario.steps.iter().enumerate() {
        let invocation = step.invocation()?;
        let mut late = None;
        if let Some(at) = step.at {
            if at < runtime.host().now() {
                warn!(step = no, %at, "step time is in the past; the clock is kept");
                late = Some(at);
            }
            runtime.host_mut().advance_to(at);
        }
        let call = step.call();
        let mut step_report = StepReport {
            step: no,
            time: runtime.host().now(),
            late,
            caller: call.caller,
            value: call.value,
            call: invocation.to_string(),
            events: None,
            reverted: None,
        };
        match runtime.execute(call, invocation) {
            Ok(receipt) => step_report.events = Some(receipt.events),
            Err(err) => step_report.reverted = Some(err.to_string()),
        }
        report(&step_report)?;
        if step_report.reverted.is_some() && fail_fast {
            warn!(step = no, "stopping at the first reverted step");
            break;
        }
    }

    let host = runtime.host();
    Ok(FinalReport {
        sale: runtime.sale().summary(host),
        total_supply: host.token().total_supply(),
        wallet_funds: host.funds().balance_of(runtime.sale().wallet()),
    })
}

impl Args {
    pub fn exec(&self) -> anyhow::Result<()> {
        match &self.command {
            Cmd::Check { scenario } => {
                let scenario = Scenario::load(scenario)?;
                let host = scenario.host()?;
                let sale = scenario.deploy(&host)?;
                print_doc(&sale.summary(&host))?;
            }

            Cmd::Run { fail_fast, scenario } => {
                let scenario = Scenario::load(scenario)?;
                let report = run(&scenario, *fail_fast, |step| print_doc(step))?;
                print_doc(&report)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use chrono::TimeZone;

    use super::*;

    fn scenario(name: &str) -> Scenario {
        let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "scenarios", name].iter().collect();
        Scenario::load(path).unwrap()
    }

    fn reverted(scenario: &Scenario, fail_fast: bool) -> (Vec<(usize, bool)>, FinalReport) {
        let mut steps = vec![];
        let report = run(scenario, fail_fast, |step| {
            steps.push((step.step, step.reverted.is_some()));
            Ok(())
        })
        .unwrap();
        (steps, report)
    }

    #[test]
    fn allowance_scenario() {
        let (steps, report) = reverted(&scenario("allowance.yaml"), false);
        assert_eq!(steps, vec![(0, false), (1, false), (2, true)]);
        assert_eq!(report.wallet_funds, Value::from_units(5, 42, 2).unwrap());
        assert_eq!(report.sale.remaining_tokens, Amount::from_units(9994, 58, 2));
        assert_eq!(report.sale.owner, Some(Account::with_fill(0x01)));
    }

    #[test]
    fn timed_allowlist_scenario() {
        let scenario = scenario("timed-allowlist.yaml");
        let (steps, report) = reverted(&scenario, false);
        assert_eq!(steps, vec![
            (0, true),
            (1, false),
            (2, true),
            (3, false),
            (4, false),
            (5, true)
        ]);
        assert_eq!(report.wallet_funds, Value::from_units(3, 5, 1).unwrap());
        assert_eq!(report.sale.allowlist.map(|list| list.len()), Some(2));
    }

    #[test]
    fn fail_fast() {
        let scenario = scenario("timed-allowlist.yaml");
        let (steps, report) = reverted(&scenario, true);
        assert_eq!(steps, vec![(0, true)]);
        assert_eq!(report.wallet_funds, Value::ZERO);
        assert_eq!(report.sale.raised, Value::ZERO);
    }

    #[test]
    fn late_step_keeps_clock() {
        let mut scenario = scenario("timed-allowlist.yaml");
        let opening = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        let genesis = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        scenario.steps.truncate(3);
        scenario.steps[2].at = Some(genesis);

        let mut reports = vec![];
        run(&scenario, false, |step| {
            reports.push((step.time, step.late));
            Ok(())
        })
        .unwrap();
        assert_eq!(reports, vec![(genesis, None), (opening, None), (opening, Some(genesis))]);
    }
}
