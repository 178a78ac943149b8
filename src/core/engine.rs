use chrono::{Datelike, Months, NaiveDate};
use tracing::debug;

use super::config::FireConfig;
use super::types::{
    FireInputs, FireResult, FireVariant, FireVariantResult, ProjectionPoint, SpendingSnapshot,
    TwoBucketBreakdown,
};

#[derive(Debug, Clone, Copy)]
struct ProjectionParams {
    current_age: u32,
    horizon_age: u32,
    start_year: i32,
    outside_start: i64,
    mandatory_start: i64,
    annual_income: i64,
    annual_spending: i64,
    fire_target: i64,
    // Coast variant only.
    coast_target_age: Option<u32>,
    expected_return_pct: f64,
    contribution_rate: f64,
    mandatory_return: f64,
    outside_return: f64,
    income_growth: f64,
    spending_growth: f64,
}

#[derive(Debug, Clone, Copy)]
struct Buckets {
    outside: i64,
    mandatory: i64,
}

impl Buckets {
    fn total(self) -> i64 {
        self.outside.saturating_add(self.mandatory)
    }
}

pub fn age_on(dob: NaiveDate, as_of: NaiveDate) -> u32 {
    let mut years = as_of.year() - dob.year();
    if (as_of.month(), as_of.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

pub fn coast_number(fire_number: i64, years_to_target: i32, return_rate_pct: f64) -> i64 {
    if years_to_target <= 0 {
        return fire_number;
    }
    let growth = (1.0 + return_rate_pct / 100.0).powi(years_to_target);
    if !growth.is_finite() || growth <= 0.0 {
        return fire_number;
    }
    (fire_number as f64 / growth).round() as i64
}

// A non-positive target is already satisfied.
pub fn progress_percent(balance: i64, target: i64) -> f64 {
    if target <= 0 {
        return 100.0;
    }
    (balance as f64 / target as f64 * 100.0).clamp(0.0, 100.0)
}

fn grow(value: i64, rate: f64) -> i64 {
    (value as f64 * (1.0 + rate)).round() as i64
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FireEngine {
    config: FireConfig,
}

impl FireEngine {
    pub fn new(config: FireConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FireConfig {
        &self.config
    }

    pub fn annual_expenses(
        &self,
        spending: &SpendingSnapshot,
        variant: FireVariant,
        override_cents: Option<i64>,
    ) -> i64 {
        if let Some(cents) = override_cents.filter(|c| *c > 0) {
            return cents;
        }
        match variant {
            FireVariant::Lean => spending.monthly_essentials.saturating_mul(12),
            FireVariant::Regular | FireVariant::Coast => {
                spending.monthly_total_spend.saturating_mul(12)
            }
            FireVariant::Fat => {
                (spending.monthly_total_spend as f64 * 12.0 * self.config.fat_multiplier).round()
                    as i64
            }
        }
    }

    pub fn fire_number(&self, annual_expenses: i64) -> i64 {
        annual_expenses.saturating_mul(self.config.fire_multiplier)
    }

    pub fn two_bucket(
        &self,
        annual_expenses: i64,
        target_age: u32,
        outside_balance: i64,
        mandatory_balance: i64,
    ) -> TwoBucketBreakdown {
        let years_before_preservation = self.config.preservation_age.saturating_sub(target_age);
        let outside_target = annual_expenses.saturating_mul(years_before_preservation as i64);
        let mandatory_target = self.fire_number(annual_expenses);
        TwoBucketBreakdown {
            years_before_preservation,
            outside_target,
            outside_balance,
            outside_progress_percent: progress_percent(outside_balance, outside_target),
            mandatory_target,
            mandatory_balance,
            mandatory_progress_percent: progress_percent(mandatory_balance, mandatory_target),
        }
    }

    pub fn simulate(&self, inputs: &FireInputs) -> FireResult {
        let profile = &inputs.profile;
        let current_age = age_on(profile.date_of_birth, inputs.as_of);
        let total_portfolio = inputs.total_portfolio();

        let variants = FireVariant::ALL
            .map(|variant| self.evaluate_variant(inputs, variant, current_age, total_portfolio));
        let selected = variants[profile.variant.index()].clone();

        let target_age = profile.target_retirement_age.or(selected.projected_age);
        let two_bucket = self.two_bucket(
            selected.annual_expenses,
            target_age.unwrap_or(self.config.pension_age),
            inputs.outside_balance(),
            inputs.mandatory_balance(),
        );

        let chart_params = self.projection_params(
            inputs,
            profile.variant,
            selected.annual_expenses,
            current_age,
            self.config.chart_horizon_age(current_age),
        );
        let mut projection = Vec::new();
        project(&chart_params, Some(&mut projection));

        debug!(
            current_age,
            variant = ?profile.variant,
            fire_number = selected.fire_number,
            projected_age = ?selected.projected_age,
            chart_points = projection.len(),
            "simulated fire projection"
        );

        FireResult {
            current_age,
            target_age,
            variant: profile.variant,
            annual_expenses: selected.annual_expenses,
            fire_number: selected.fire_number,
            projected_date: selected.projected_date,
            projected_age: selected.projected_age,
            progress_percent: selected.progress_percent,
            total_portfolio,
            two_bucket,
            variants: variants.to_vec(),
            projection,
        }
    }

    fn evaluate_variant(
        &self,
        inputs: &FireInputs,
        variant: FireVariant,
        current_age: u32,
        total_portfolio: i64,
    ) -> FireVariantResult {
        let override_cents = if variant == inputs.profile.variant {
            inputs.profile.annual_expense_override
        } else {
            None
        };
        let annual_expenses = self.annual_expenses(&inputs.spending, variant, override_cents);
        let fire_number = self.fire_number(annual_expenses);

        let params = self.projection_params(
            inputs,
            variant,
            annual_expenses,
            current_age,
            self.config.solver_horizon_age,
        );
        let elapsed = project(&params, None);

        FireVariantResult {
            variant,
            annual_expenses,
            fire_number,
            projected_date: elapsed
                .and_then(|years| inputs.as_of.checked_add_months(Months::new(years * 12))),
            projected_age: elapsed.map(|years| current_age + years),
            progress_percent: progress_percent(total_portfolio, fire_number),
        }
    }

    fn projection_params(
        &self,
        inputs: &FireInputs,
        variant: FireVariant,
        annual_expenses: i64,
        current_age: u32,
        horizon_age: u32,
    ) -> ProjectionParams {
        let profile = &inputs.profile;
        let coast_target_age = (variant == FireVariant::Coast).then(|| {
            profile
                .target_retirement_age
                .unwrap_or(self.config.preservation_age)
        });
        ProjectionParams {
            current_age,
            horizon_age,
            start_year: inputs.as_of.year(),
            outside_start: inputs.outside_balance(),
            mandatory_start: inputs.mandatory_balance(),
            annual_income: inputs.spending.monthly_income.saturating_mul(12),
            annual_spending: inputs.spending.monthly_total_spend.saturating_mul(12),
            fire_target: self.fire_number(annual_expenses),
            coast_target_age,
            expected_return_pct: profile.expected_return,
            contribution_rate: profile.contribution_rate / 100.0,
            mandatory_return: profile.expected_return / 100.0,
            outside_return: profile.outside_return.unwrap_or(profile.expected_return) / 100.0,
            income_growth: profile.income_growth / 100.0,
            spending_growth: profile.spending_growth / 100.0,
        }
    }
}

// Whole years until the target is met. The series includes the year it is met.
fn project(
    params: &ProjectionParams,
    mut series: Option<&mut Vec<ProjectionPoint>>,
) -> Option<u32> {
    let mut buckets = Buckets {
        outside: params.outside_start,
        mandatory: params.mandatory_start,
    };
    let mut income = params.annual_income;
    let mut spending = params.annual_spending;
    let mut fire_target = params.fire_target;

    for (elapsed, age) in (params.current_age..=params.horizon_age).enumerate() {
        let elapsed = elapsed as u32;
        let total = buckets.total();
        let threshold = match params.coast_target_age {
            // Re-discounted every year over the years still remaining.
            Some(target_age) => coast_number(
                fire_target,
                target_age as i32 - age as i32,
                params.expected_return_pct,
            ),
            None => fire_target,
        };

        if let Some(rows) = series.as_deref_mut() {
            rows.push(ProjectionPoint {
                age,
                year: params.start_year + elapsed as i32,
                outside_balance: buckets.outside,
                mandatory_balance: buckets.mandatory,
                total,
                fire_target,
            });
        }

        if total >= threshold {
            return Some(elapsed);
        }

        // Contributions sit on top of take-home pay, so they come out of the
        // outside deposit rather than being counted twice.
        let contribution = (income as f64 * params.contribution_rate).round() as i64;
        let deposit = ((income - spending).max(0) - contribution).max(0);

        buckets.outside =
            (buckets.outside as f64 * (1.0 + params.outside_return) + deposit as f64).round() as i64;
        buckets.mandatory = (buckets.mandatory as f64 * (1.0 + params.mandatory_return)
            + contribution as f64)
            .round() as i64;

        if params.income_growth > 0.0 {
            income = grow(income, params.income_growth);
        }
        if params.spending_growth > 0.0 {
            spending = grow(spending, params.spending_growth);
            if params.coast_target_age.is_none() {
                fire_target = grow(fire_target, params.spending_growth);
            }
        }
    }

    None
}
