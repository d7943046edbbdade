use serde::{Deserialize, Serialize};

/// Tunables for the solver driver, loadable from a TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Wall-clock budget for the full-constraint model
    #[serde(default = "default_primary_time_limit")]
    pub primary_time_limit_secs: f64,
    /// Wall-clock budget for the reduced fallback model
    #[serde(default = "default_fallback_time_limit")]
    pub fallback_time_limit_secs: f64,
    #[serde(default = "default_threads")]
    pub threads: u32,
    /// Objective weight nudging events across rooms
    #[serde(default = "default_room_preference_weight")]
    pub room_preference_weight: f64,
}

fn default_primary_time_limit() -> f64 {
    60.0
}

fn default_fallback_time_limit() -> f64 {
    10.0
}

fn default_threads() -> u32 {
    8
}

fn default_room_preference_weight() -> f64 {
    1.0
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            primary_time_limit_secs: default_primary_time_limit(),
            fallback_time_limit_secs: default_fallback_time_limit(),
            threads: default_threads(),
            room_preference_weight: default_room_preference_weight(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_solver_budgets() {
        let config = SolverConfig::default();
        assert_eq!(config.primary_time_limit_secs, 60.0);
        assert_eq!(config.fallback_time_limit_secs, 10.0);
        assert_eq!(config.threads, 8);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: SolverConfig = toml::from_str("primary_time_limit_secs = 5.0").unwrap();
        assert_eq!(config.primary_time_limit_secs, 5.0);
        assert_eq!(config.fallback_time_limit_secs, 10.0);
    }
}
