
use serde::Serialize;
use tracing::debug;

use super::engine::{FireEngine, coast_number};
use super::format::{format_age, format_cents};
use super::types::{FireInputs, FireResult, FireVariant};

const SAVINGS_RATE_STEPS: [u32; 8] = [10, 20, 30, 40, 50, 60, 70, 80];

const MILESTONE_ORDER: [FireVariant; 4] = [
    FireVariant::Coast,
    FireVariant::Lean,
    FireVariant::Regular,
    FireVariant::Fat,
];

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameplanStatus {
    OnTrack,
    Gap,
    Impossible,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    SaveInvest,
    EarnMore,
    InvestSurplus,
    CutSpending,
    SwitchLean,
    BoostContributions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameplanAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub priority: u32,
    pub title: String,
    pub description: String,
    pub monthly_cents: Option<i64>,
    pub resulting_age: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub variant: FireVariant,
    pub label: &'static str,
    pub fire_number: i64,
    pub projected_age: Option<u32>,
    pub progress_percent: f64,
    pub achieved: bool,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoastFireRecord {
    pub coast_number: i64,
    pub fire_number: i64,
    pub target_age: u32,
    pub years_to_target: i32,
    pub current_total: i64,
    pub achieved: bool,
    pub remaining_cents: i64,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsRatePoint {
    pub savings_rate: u32,
    pub monthly_spend_cents: i64,
    pub projected_age: Option<u32>,
    pub years_to_fire: Option<u32>,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRateRow {
    pub rate_percent: f64,
    pub fire_number: i64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceSuggestion {
    pub title: &'static str,
    pub detail: &'static str,
}

pub const REFERENCE_SUGGESTIONS: [ReferenceSuggestion; 5] = [
    ReferenceSuggestion {
        title: "Automate your investing",
        detail: "Schedule a transfer to your investment account on payday so the surplus is invested before it is spent.",
    },
    ReferenceSuggestion {
        title: "Keep fees low",
        detail: "Broad index funds with low management fees leave more of every return compounding for you.",
    },
    ReferenceSuggestion {
        title: "Hold an emergency fund",
        detail: "Three to six months of essential spending in cash keeps a bad month from forcing you to sell investments.",
    },
    ReferenceSuggestion {
        title: "Review big-ticket costs yearly",
        detail: "Housing, transport and insurance usually dominate spending; renegotiating them moves the date more than small cuts.",
    },
    ReferenceSuggestion {
        title: "Plan the bridge years",
        detail: "Money outside the mandatory bucket has to cover every year between retiring and the preservation age.",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gameplan {
    pub status: GameplanStatus,
    pub current_age: u32,
    pub target_age: Option<u32>,
    pub projected_age: Option<u32>,
    pub monthly_surplus_cents: i64,
    pub actions: Vec<GameplanAction>,
    pub milestones: Vec<Milestone>,
    pub coast_fire: CoastFireRecord,
    pub savings_rate_curve: Vec<SavingsRatePoint>,
    pub withdrawal_rates: Vec<WithdrawalRateRow>,
    pub suggestions: Vec<ReferenceSuggestion>,
    pub fire: FireResult,
}

pub fn gameplan_status(fire: &FireResult, explicit_target: Option<u32>) -> GameplanStatus {
    match (fire.projected_age, explicit_target) {
        (None, _) => GameplanStatus::Impossible,
        (Some(projected), Some(target)) if projected > target => GameplanStatus::Gap,
        _ => GameplanStatus::OnTrack,
    }
}

impl FireEngine {
    pub fn gameplan(&self, inputs: &FireInputs) -> Gameplan {
        let fire = self.simulate(inputs);
        let status = gameplan_status(&fire, inputs.profile.target_retirement_age);
        let monthly_surplus_cents = inputs.spending.monthly_surplus().max(0);

        let actions = self.build_actions(inputs, &fire, status, monthly_surplus_cents);
        let coast_fire = self.coast_fire_record(inputs, &fire);
        let milestones = build_milestones(&fire, inputs.profile.variant);
        let savings_rate_curve = self.savings_rate_curve(inputs, fire.current_age);
        let withdrawal_rates = self.withdrawal_rate_table(fire.annual_expenses);

        debug!(
            ?status,
            actions = actions.len(),
            projected_age = ?fire.projected_age,
            "built gameplan"
        );

        Gameplan {
            status,
            current_age: fire.current_age,
            target_age: fire.target_age,
            projected_age: fire.projected_age,
            monthly_surplus_cents,
            actions,
            milestones,
            coast_fire,
            savings_rate_curve,
            withdrawal_rates,
            suggestions: REFERENCE_SUGGESTIONS.to_vec(),
            fire,
        }
    }

    pub fn effective_target_age(&self, fire: &FireResult, explicit_target: Option<u32>) -> u32 {
        explicit_target.unwrap_or_else(|| match fire.projected_age {
            Some(projected) => projected
                .saturating_sub(self.config().gap_target_offset_years)
                .max(fire.current_age),
            None => fire.current_age + self.config().asap_fallback_years,
        })
    }

    fn build_actions(
        &self,
        inputs: &FireInputs,
        fire: &FireResult,
        status: GameplanStatus,
        monthly_surplus: i64,
    ) -> Vec<GameplanAction> {
        let mut actions = Vec::new();

        if status == GameplanStatus::OnTrack {
            actions.push(GameplanAction {
                kind: ActionKind::SaveInvest,
                priority: 1,
                title: "Keep saving and investing".to_string(),
                description: format!(
                    "Invest your {} monthly surplus to stay on track for FIRE at {}.",
                    format_cents(monthly_surplus),
                    format_age(fire.projected_age)
                ),
                monthly_cents: Some(monthly_surplus),
                resulting_age: fire.projected_age,
            });
            return actions;
        }

        let profile = &inputs.profile;
        let target_age = self.effective_target_age(fire, profile.target_retirement_age);

        let income = self.required_extra_income(inputs, target_age);
        if income.monthly_cents > 0 {
            let contribution = (income.monthly_cents as f64 * profile.contribution_rate / 100.0)
                .round() as i64;
            let description = if income.feasible {
                format!(
                    "Earning an extra {}/month brings FIRE to {}. About {} of that flows into your mandatory bucket.",
                    format_cents(income.monthly_cents),
                    format_age(income.result_age),
                    format_cents(contribution)
                )
            } else {
                format!(
                    "Even an extra {}/month leaves FIRE {}.",
                    format_cents(income.monthly_cents),
                    format_age(income.result_age)
                )
            };
            actions.push(GameplanAction {
                kind: ActionKind::EarnMore,
                priority: 0,
                title: "Increase your income".to_string(),
                description,
                monthly_cents: Some(income.monthly_cents),
                resulting_age: income.result_age,
            });
        }

        if monthly_surplus > 0 {
            actions.push(GameplanAction {
                kind: ActionKind::InvestSurplus,
                priority: 0,
                title: "Invest your current surplus".to_string(),
                description: format!(
                    "Put the {} left over each month into the outside bucket.",
                    format_cents(monthly_surplus)
                ),
                monthly_cents: Some(monthly_surplus),
                resulting_age: fire.projected_age,
            });
        }

        let discretionary = inputs.spending.monthly_discretionary();
        let savings = self.required_extra_savings(inputs, target_age);
        if savings.feasible && savings.monthly_cents > 0 && savings.monthly_cents <= discretionary
        {
            let hint = inputs
                .spending
                .top_categories
                .first()
                .map(|category| format!(" Start with {}.", category.name))
                .unwrap_or_default();
            actions.push(GameplanAction {
                kind: ActionKind::CutSpending,
                priority: 0,
                title: "Trim discretionary spending".to_string(),
                description: format!(
                    "Cutting {}/month of discretionary spending brings FIRE to {}.{hint}",
                    format_cents(savings.monthly_cents),
                    format_age(savings.result_age)
                ),
                monthly_cents: Some(savings.monthly_cents),
                resulting_age: savings.result_age,
            });
        }

        if profile.variant != FireVariant::Lean {
            if let Some(lean) = fire.variant_result(FireVariant::Lean) {
                let earlier = match (lean.projected_age, fire.projected_age) {
                    (_, None) => true,
                    (Some(lean_age), Some(active_age)) => lean_age < active_age,
                    (None, Some(_)) => false,
                };
                if earlier {
                    actions.push(GameplanAction {
                        kind: ActionKind::SwitchLean,
                        priority: 0,
                        title: "Consider Lean FIRE".to_string(),
                        description: format!(
                            "Covering essentials only needs {}, reached at {}.",
                            format_cents(lean.fire_number),
                            format_age(lean.projected_age)
                        ),
                        monthly_cents: None,
                        resulting_age: lean.projected_age,
                    });
                }
            }
        }

        let benchmark = self.config().contribution_rate_benchmark;
        if profile.contribution_rate < benchmark {
            actions.push(GameplanAction {
                kind: ActionKind::BoostContributions,
                priority: 0,
                title: "Top up mandatory contributions".to_string(),
                description: format!(
                    "Your contribution rate of {}% is below the {}% benchmark; extra contributions grow in the mandatory bucket.",
                    profile.contribution_rate, benchmark
                ),
                monthly_cents: None,
                resulting_age: None,
            });
        }

        for (idx, action) in actions.iter_mut().enumerate() {
            action.priority = idx as u32 + 1;
        }
        actions
    }

    fn coast_fire_record(&self, inputs: &FireInputs, fire: &FireResult) -> CoastFireRecord {
        let target_age = inputs
            .profile
            .target_retirement_age
            .unwrap_or(self.config().preservation_age);
        let years_to_target = target_age as i32 - fire.current_age as i32;
        let coast = coast_number(
            fire.fire_number,
            years_to_target,
            inputs.profile.expected_return,
        );
        let current_total = fire.total_portfolio;
        let achieved = current_total >= coast;
        let remaining_cents = (coast - current_total).max(0);

        let description = if achieved {
            format!(
                "Coast FIRE reached: {} left to grow reaches {} by age {} with no further contributions.",
                format_cents(current_total),
                format_cents(fire.fire_number),
                target_age
            )
        } else {
            format!(
                "{} more invested today reaches Coast FIRE for age {}.",
                format_cents(remaining_cents),
                target_age
            )
        };

        CoastFireRecord {
            coast_number: coast,
            fire_number: fire.fire_number,
            target_age,
            years_to_target,
            current_total,
            achieved,
            remaining_cents,
            description,
        }
    }

    pub fn savings_rate_curve(&self, inputs: &FireInputs, current_age: u32) -> Vec<SavingsRatePoint> {
        let income = inputs.spending.monthly_income;
        let actual_rate = inputs.spending.savings_rate;
        let current_step = if actual_rate.is_finite() {
            ((actual_rate / 10.0).round() * 10.0).clamp(10.0, 80.0) as u32
        } else {
            SAVINGS_RATE_STEPS[0]
        };

        SAVINGS_RATE_STEPS
            .iter()
            .map(|&rate| {
                let spend = (income as f64 * (1.0 - rate as f64 / 100.0)).round() as i64;
                let mut scenario = inputs.clone();
                scenario.spending.monthly_total_spend = spend;
                scenario.spending.monthly_essentials =
                    scenario.spending.monthly_essentials.min(spend);
                scenario.spending.savings_rate = rate as f64;

                let projected_age = self.simulate(&scenario).projected_age;
                SavingsRatePoint {
                    savings_rate: rate,
                    monthly_spend_cents: spend,
                    projected_age,
                    years_to_fire: projected_age.map(|age| age.saturating_sub(current_age)),
                    current: rate == current_step,
                }
            })
            .collect()
    }

    pub fn withdrawal_rate_table(&self, annual_expenses: i64) -> Vec<WithdrawalRateRow> {
        self.config()
            .withdrawal_rates
            .iter()
            .map(|&rate| WithdrawalRateRow {
                rate_percent: rate,
                fire_number: (annual_expenses as f64 / (rate / 100.0)).round() as i64,
                label: format!("{rate}% withdrawal rate"),
            })
            .collect()
    }
}

// Rungs compare against each variant's undiscounted FIRE number.
fn build_milestones(fire: &FireResult, active: FireVariant) -> Vec<Milestone> {
    MILESTONE_ORDER
        .iter()
        .filter_map(|&variant| fire.variant_result(variant))
        .map(|result| Milestone {
            variant: result.variant,
            label: result.variant.label(),
            fire_number: result.fire_number,
            projected_age: result.projected_age,
            progress_percent: result.progress_percent,
            achieved: fire.total_portfolio >= result.fire_number,
            current: result.variant == active,
        })
        .collect()
}
