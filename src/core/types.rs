use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FireVariant {
    Lean,
    Regular,
    Fat,
    Coast,
}

impl FireVariant {
    pub const ALL: [FireVariant; 4] = [
        FireVariant::Lean,
        FireVariant::Regular,
        FireVariant::Fat,
        FireVariant::Coast,
    ];

    pub fn index(self) -> usize {
        match self {
            FireVariant::Lean => 0,
            FireVariant::Regular => 1,
            FireVariant::Fat => 2,
            FireVariant::Coast => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FireVariant::Lean => "Lean FIRE",
            FireVariant::Regular => "FIRE",
            FireVariant::Fat => "Fat FIRE",
            FireVariant::Coast => "Coast FIRE",
        }
    }
}

// Rates are percentages, money is cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub date_of_birth: NaiveDate,
    pub target_retirement_age: Option<u32>,
    pub mandatory_balance: i64,
    pub contribution_rate: f64,
    pub expected_return: f64,
    pub outside_return: Option<f64>,
    pub income_growth: f64,
    pub spending_growth: f64,
    pub variant: FireVariant,
    // Only honoured when positive.
    pub annual_expense_override: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingCategory {
    pub name: String,
    pub monthly_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSnapshot {
    pub monthly_essentials: i64,
    pub monthly_total_spend: i64,
    pub monthly_income: i64,
    pub savings_rate: f64,
    pub top_categories: Vec<SpendingCategory>,
}

impl SpendingSnapshot {
    pub fn monthly_discretionary(&self) -> i64 {
        (self.monthly_total_spend - self.monthly_essentials).max(0)
    }

    pub fn monthly_surplus(&self) -> i64 {
        self.monthly_income - self.monthly_total_spend
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentSnapshot {
    pub outside_balance: i64,
    pub mandatory_balance: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FireInputs {
    pub profile: Profile,
    pub spending: SpendingSnapshot,
    pub investments: InvestmentSnapshot,
    pub as_of: NaiveDate,
}

impl FireInputs {
    pub fn mandatory_balance(&self) -> i64 {
        if self.investments.mandatory_balance > 0 {
            self.investments.mandatory_balance
        } else {
            self.profile.mandatory_balance.max(0)
        }
    }

    pub fn outside_balance(&self) -> i64 {
        self.investments.outside_balance.max(0)
    }

    pub fn total_portfolio(&self) -> i64 {
        self.outside_balance().saturating_add(self.mandatory_balance())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FireVariantResult {
    pub variant: FireVariant,
    pub annual_expenses: i64,
    pub fire_number: i64,
    pub projected_date: Option<NaiveDate>,
    pub projected_age: Option<u32>,
    pub progress_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoBucketBreakdown {
    pub years_before_preservation: u32,
    pub outside_target: i64,
    pub outside_balance: i64,
    pub outside_progress_percent: f64,
    pub mandatory_target: i64,
    pub mandatory_balance: i64,
    pub mandatory_progress_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub age: u32,
    pub year: i32,
    pub outside_balance: i64,
    pub mandatory_balance: i64,
    pub total: i64,
    pub fire_target: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FireResult {
    pub current_age: u32,
    pub target_age: Option<u32>,
    pub variant: FireVariant,
    pub annual_expenses: i64,
    pub fire_number: i64,
    pub projected_date: Option<NaiveDate>,
    pub projected_age: Option<u32>,
    pub progress_percent: f64,
    pub total_portfolio: i64,
    pub two_bucket: TwoBucketBreakdown,
    pub variants: Vec<FireVariantResult>,
    pub projection: Vec<ProjectionPoint>,
}

impl FireResult {
    pub fn variant_result(&self, variant: FireVariant) -> Option<&FireVariantResult> {
        self.variants.iter().find(|r| r.variant == variant)
    }
}
