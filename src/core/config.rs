#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireConfig {
    pub preservation_age: u32,
    pub pension_age: u32,
    // 25x = 4% withdrawal
    pub fire_multiplier: i64,
    pub fat_multiplier: f64,
    pub contribution_rate_benchmark: f64,
    pub solver_horizon_age: u32,
    pub chart_max_age: u32,
    pub chart_max_years: u32,
    pub solver_max_iterations: u32,
    pub solver_tolerance_cents: i64,
    pub max_extra_income_cents: i64,
    pub asap_fallback_years: u32,
    pub gap_target_offset_years: u32,
    pub withdrawal_rates: [f64; 3],
}

pub const DEFAULT_FIRE_CONFIG: FireConfig = FireConfig {
    preservation_age: 60,
    pension_age: 67,
    fire_multiplier: 25,
    fat_multiplier: 1.25,
    contribution_rate_benchmark: 11.5,
    solver_horizon_age: 100,
    chart_max_age: 80,
    chart_max_years: 50,
    solver_max_iterations: 20,
    solver_tolerance_cents: 5_000,
    max_extra_income_cents: 5_000_000,
    asap_fallback_years: 15,
    gap_target_offset_years: 5,
    withdrawal_rates: [4.0, 3.5, 3.0],
};

impl Default for FireConfig {
    fn default() -> Self {
        DEFAULT_FIRE_CONFIG
    }
}

impl FireConfig {
    pub fn chart_horizon_age(&self, current_age: u32) -> u32 {
        self.chart_max_age
            .min(current_age.saturating_add(self.chart_max_years))
            .max(current_age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_four_percent_rule() {
        let config = FireConfig::default();
        assert_eq!(config.fire_multiplier, 25);
        assert_eq!(config.withdrawal_rates[0], 4.0);
        assert_eq!(config.preservation_age, 60);
        assert_eq!(config.pension_age, 67);
    }

    #[test]
    fn chart_horizon_caps_at_eighty_or_fifty_years_out() {
        let config = FireConfig::default();
        assert_eq!(config.chart_horizon_age(25), 75);
        assert_eq!(config.chart_horizon_age(30), 80);
        assert_eq!(config.chart_horizon_age(45), 80);
    }

    #[test]
    fn chart_horizon_never_precedes_current_age() {
        let config = FireConfig::default();
        assert_eq!(config.chart_horizon_age(80), 80);
        assert_eq!(config.chart_horizon_age(86), 86);
        assert_eq!(config.chart_horizon_age(u32::MAX), u32::MAX);
    }
}
