use serde::Serialize;

use super::engine::FireEngine;
use super::types::FireInputs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsImpact {
    pub extra_monthly_cents: i64,
    pub baseline_age: Option<u32>,
    pub new_age: Option<u32>,
    pub years_saved: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeImpact {
    pub extra_monthly_cents: i64,
    pub baseline_age: Option<u32>,
    pub new_age: Option<u32>,
    pub years_saved: Option<i32>,
    pub extra_contribution_monthly_cents: i64,
}

// Essentials never exceed the reduced total.
pub(crate) fn with_spending_cut(inputs: &FireInputs, extra_monthly: i64) -> FireInputs {
    let mut adjusted = inputs.clone();
    let spending = &mut adjusted.spending;
    spending.monthly_total_spend = (spending.monthly_total_spend - extra_monthly).max(0);
    spending.monthly_essentials = spending.monthly_essentials.min(spending.monthly_total_spend);
    adjusted
}

pub(crate) fn with_extra_income(inputs: &FireInputs, extra_monthly: i64) -> FireInputs {
    let mut adjusted = inputs.clone();
    let income = &mut adjusted.spending.monthly_income;
    *income = income.saturating_add(extra_monthly);
    adjusted
}

fn years_saved(baseline_age: Option<u32>, new_age: Option<u32>) -> Option<i32> {
    match (baseline_age, new_age) {
        (Some(baseline), Some(new)) => Some(baseline as i32 - new as i32),
        _ => None,
    }
}

impl FireEngine {
    pub fn savings_impact(&self, inputs: &FireInputs, extra_monthly_cents: i64) -> SavingsImpact {
        let baseline_age = self.simulate(inputs).projected_age;
        self.savings_impact_against(inputs, baseline_age, extra_monthly_cents)
    }

    pub fn income_impact(&self, inputs: &FireInputs, extra_monthly_cents: i64) -> IncomeImpact {
        let baseline_age = self.simulate(inputs).projected_age;
        self.income_impact_against(inputs, baseline_age, extra_monthly_cents)
    }

    pub(crate) fn savings_impact_against(
        &self,
        inputs: &FireInputs,
        baseline_age: Option<u32>,
        extra_monthly_cents: i64,
    ) -> SavingsImpact {
        if extra_monthly_cents <= 0 {
            return SavingsImpact {
                extra_monthly_cents: 0,
                baseline_age,
                new_age: baseline_age,
                years_saved: Some(0),
            };
        }

        let adjusted = with_spending_cut(inputs, extra_monthly_cents);
        let new_age = self.simulate(&adjusted).projected_age;
        SavingsImpact {
            extra_monthly_cents,
            baseline_age,
            new_age,
            years_saved: years_saved(baseline_age, new_age),
        }
    }

    pub(crate) fn income_impact_against(
        &self,
        inputs: &FireInputs,
        baseline_age: Option<u32>,
        extra_monthly_cents: i64,
    ) -> IncomeImpact {
        if extra_monthly_cents <= 0 {
            return IncomeImpact {
                extra_monthly_cents: 0,
                baseline_age,
                new_age: baseline_age,
                years_saved: Some(0),
                extra_contribution_monthly_cents: 0,
            };
        }

        let adjusted = with_extra_income(inputs, extra_monthly_cents);
        let new_age = self.simulate(&adjusted).projected_age;
        let contribution =
            (extra_monthly_cents as f64 * inputs.profile.contribution_rate / 100.0).round() as i64;
        IncomeImpact {
            extra_monthly_cents,
            baseline_age,
            new_age,
            years_saved: years_saved(baseline_age, new_age),
            extra_contribution_monthly_cents: contribution,
        }
    }
}
