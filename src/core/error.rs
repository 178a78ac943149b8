use chrono::NaiveDate;
use thiserror::Error;

use super::config::FireConfig;
use super::engine::age_on;
use super::types::FireInputs;

// $10 trillion. Keeps every annualised and multiplied amount inside i64.
const MAX_AMOUNT_CENTS: i64 = 1_000_000_000_000_000;
const MAX_RATE_PERCENT: f64 = 100.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("{field} must be >= 0")]
    NegativeAmount { field: &'static str },

    #[error("{field} must be <= {max} cents")]
    AmountTooLarge { field: &'static str, max: i64 },

    #[error("monthly essentials ({essentials}) cannot exceed monthly total spend ({total})")]
    EssentialsExceedTotal { essentials: i64, total: i64 },

    #[error("{field} must be finite, greater than -100% and at most 100%")]
    InvalidRate { field: &'static str },

    #[error("contribution rate must be between 0 and 100")]
    InvalidContributionRate,

    #[error("date of birth {dob} is after the valuation date {as_of}")]
    BirthAfterValuation { dob: NaiveDate, as_of: NaiveDate },

    #[error("target retirement age {target} must be between {min} and {max}")]
    TargetAgeOutOfRange { target: u32, min: u32, max: u32 },

    #[error("invalid API payload: {0}")]
    InvalidPayload(String),

    #[error("failed to serialize report: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for InputError {
    fn from(value: serde_json::Error) -> Self {
        InputError::Serialization(value.to_string())
    }
}

impl FireInputs {
    pub fn validate(&self, config: &FireConfig) -> Result<(), InputError> {
        let amounts = [
            ("outside balance", self.investments.outside_balance),
            ("mandatory balance", self.investments.mandatory_balance),
            ("profile mandatory balance", self.profile.mandatory_balance),
            ("monthly essentials", self.spending.monthly_essentials),
            ("monthly total spend", self.spending.monthly_total_spend),
            ("monthly income", self.spending.monthly_income),
        ];
        for (field, value) in amounts {
            if value < 0 {
                return Err(InputError::NegativeAmount { field });
            }
            if value > MAX_AMOUNT_CENTS {
                return Err(InputError::AmountTooLarge {
                    field,
                    max: MAX_AMOUNT_CENTS,
                });
            }
        }

        // Negative overrides are ignored downstream, so only the ceiling applies.
        if let Some(cents) = self.profile.annual_expense_override {
            if cents > MAX_AMOUNT_CENTS {
                return Err(InputError::AmountTooLarge {
                    field: "annual expense override",
                    max: MAX_AMOUNT_CENTS,
                });
            }
        }

        if self.spending.monthly_essentials > self.spending.monthly_total_spend {
            return Err(InputError::EssentialsExceedTotal {
                essentials: self.spending.monthly_essentials,
                total: self.spending.monthly_total_spend,
            });
        }

        let profile = &self.profile;
        let rates = [
            ("expected return", Some(profile.expected_return)),
            ("outside return", profile.outside_return),
            ("income growth", Some(profile.income_growth)),
            ("spending growth", Some(profile.spending_growth)),
        ];
        for (field, rate) in rates {
            if let Some(rate) = rate {
                if !rate.is_finite() || rate <= -100.0 || rate > MAX_RATE_PERCENT {
                    return Err(InputError::InvalidRate { field });
                }
            }
        }

        if !(0.0..=100.0).contains(&profile.contribution_rate) {
            return Err(InputError::InvalidContributionRate);
        }

        if profile.date_of_birth > self.as_of {
            return Err(InputError::BirthAfterValuation {
                dob: profile.date_of_birth,
                as_of: self.as_of,
            });
        }

        if let Some(target) = profile.target_retirement_age {
            let current_age = age_on(profile.date_of_birth, self.as_of);
            if target < current_age || target > config.solver_horizon_age {
                return Err(InputError::TargetAgeOutOfRange {
                    target,
                    min: current_age,
                    max: config.solver_horizon_age,
                });
            }
        }

        Ok(())
    }
}
