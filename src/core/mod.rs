mod config;
mod engine;
mod error;
mod format;
mod gameplan;
mod impact;
mod solver;
mod types;

pub use config::{DEFAULT_FIRE_CONFIG, FireConfig};
pub use engine::{FireEngine, age_on, coast_number, progress_percent};
pub use error::InputError;
pub use format::{format_age, format_cents};
pub use gameplan::{
    ActionKind, CoastFireRecord, Gameplan, GameplanAction, GameplanStatus, Milestone,
    REFERENCE_SUGGESTIONS, ReferenceSuggestion, SavingsRatePoint, WithdrawalRateRow,
    gameplan_status,
};
pub use impact::{IncomeImpact, SavingsImpact};
pub use solver::{
    ChangeKind, RequiredChange, SearchBounds, SearchIteration, ThresholdSolution,
    solve_for_threshold,
};
pub use types::{
    FireInputs, FireResult, FireVariant, FireVariantResult, InvestmentSnapshot, Profile,
    ProjectionPoint, SpendingCategory, SpendingSnapshot, TwoBucketBreakdown,
};
