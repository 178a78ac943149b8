use serde::Serialize;
use tracing::{debug, trace};

use super::engine::FireEngine;
use super::types::FireInputs;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeKind {
    ExtraIncome,
    ExtraSavings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBounds {
    pub lower: i64,
    pub upper: i64,
    pub max_iterations: u32,
    pub tolerance: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIteration {
    pub iteration: u32,
    pub lower_bound: i64,
    pub upper_bound: i64,
    pub candidate_value: i64,
    pub satisfied: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdSolution<T> {
    pub value: i64,
    pub outcome: T,
    pub satisfied: bool,
    pub iterations: Vec<SearchIteration>,
}

// Acceptance must be monotone in the value. If nothing inside the bracket is
// accepted the upper bound is evaluated and returned as-is.
pub fn solve_for_threshold<T, F>(bounds: SearchBounds, mut evaluate: F) -> ThresholdSolution<T>
where
    F: FnMut(i64) -> (bool, T),
{
    let mut lo = bounds.lower;
    let mut hi = bounds.upper;
    let mut best: Option<(i64, T)> = None;
    let mut iterations = Vec::with_capacity(bounds.max_iterations as usize);

    let mut it = 0;
    while it < bounds.max_iterations && hi - lo >= bounds.tolerance {
        it += 1;
        let mid = lo + (hi - lo) / 2;
        let (satisfied, outcome) = evaluate(mid);
        trace!(iteration = it, lo, hi, mid, satisfied, "bisection step");
        iterations.push(SearchIteration {
            iteration: it,
            lower_bound: lo,
            upper_bound: hi,
            candidate_value: mid,
            satisfied,
        });

        if satisfied {
            hi = mid;
            best = Some((mid, outcome));
        } else {
            lo = mid;
        }
    }

    match best {
        Some((value, outcome)) => ThresholdSolution {
            value,
            outcome,
            satisfied: true,
            iterations,
        },
        None => {
            let (satisfied, outcome) = evaluate(bounds.upper);
            ThresholdSolution {
                value: bounds.upper,
                outcome,
                satisfied,
                iterations,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredChange {
    pub kind: ChangeKind,
    pub target_age: u32,
    pub monthly_cents: i64,
    pub baseline_age: Option<u32>,
    // None: still unreachable
    pub result_age: Option<u32>,
    pub feasible: bool,
    pub search_upper_cents: i64,
    pub iterations: Vec<SearchIteration>,
    pub message: String,
}

fn meets_target(age: Option<u32>, target_age: u32) -> bool {
    age.is_some_and(|age| age <= target_age)
}

impl FireEngine {
    pub fn required_extra_income(&self, inputs: &FireInputs, target_age: u32) -> RequiredChange {
        let upper = self.config().max_extra_income_cents;
        self.solve_required(inputs, target_age, ChangeKind::ExtraIncome, upper)
    }

    // Essentials are never cut.
    pub fn required_extra_savings(&self, inputs: &FireInputs, target_age: u32) -> RequiredChange {
        let upper = inputs.spending.monthly_discretionary();
        self.solve_required(inputs, target_age, ChangeKind::ExtraSavings, upper)
    }

    fn solve_required(
        &self,
        inputs: &FireInputs,
        target_age: u32,
        kind: ChangeKind,
        upper: i64,
    ) -> RequiredChange {
        let baseline_age = self.simulate(inputs).projected_age;
        if meets_target(baseline_age, target_age) {
            return RequiredChange {
                kind,
                target_age,
                monthly_cents: 0,
                baseline_age,
                result_age: baseline_age,
                feasible: true,
                search_upper_cents: upper,
                iterations: Vec::new(),
                message: "Already on track for the target age.".to_string(),
            };
        }

        let bounds = SearchBounds {
            lower: 0,
            upper: upper.max(0),
            max_iterations: self.config().solver_max_iterations,
            tolerance: self.config().solver_tolerance_cents,
        };
        let solution = solve_for_threshold(bounds, |amount| {
            let new_age = match kind {
                ChangeKind::ExtraIncome => {
                    self.income_impact_against(inputs, baseline_age, amount)
                        .new_age
                }
                ChangeKind::ExtraSavings => {
                    self.savings_impact_against(inputs, baseline_age, amount)
                        .new_age
                }
            };
            (meets_target(new_age, target_age), new_age)
        });

        debug!(
            ?kind,
            target_age,
            amount = solution.value,
            result_age = ?solution.outcome,
            feasible = solution.satisfied,
            iterations = solution.iterations.len(),
            "solved required change"
        );

        let message = match (solution.satisfied, kind) {
            (true, ChangeKind::ExtraIncome) => "Solved required extra income.",
            (true, ChangeKind::ExtraSavings) => "Solved required spending cut.",
            (false, ChangeKind::ExtraIncome) => {
                "No extra income within the search bounds reaches the target age."
            }
            (false, ChangeKind::ExtraSavings) => {
                "Cutting all discretionary spending does not reach the target age."
            }
        };

        RequiredChange {
            kind,
            target_age,
            monthly_cents: solution.value,
            baseline_age,
            result_age: solution.outcome,
            feasible: solution.satisfied,
            search_upper_cents: bounds.upper,
            iterations: solution.iterations,
            message: message.to_string(),
        }
    }
}
