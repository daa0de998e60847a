// src/rates.rs

use std::env;

use crate::error::{AppError, Result};

const DEFAULT_DISTRIBUTOR_PCT: f64 = 0.0;
const DEFAULT_COMMISSION_PCT: f64 = 0.04;

/// Fee rates applied to every line item, as fractions in [0, 1]. Built once
/// per run and passed through the enrichment call unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateConfig {
    pub distributor_pct: f64,
    pub commission_pct: f64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            distributor_pct: DEFAULT_DISTRIBUTOR_PCT,
            commission_pct: DEFAULT_COMMISSION_PCT,
        }
    }
}

impl RateConfig {
    pub fn new(distributor_pct: f64, commission_pct: f64) -> Result<Self> {
        for (name, rate) in [
            ("distributor", distributor_pct),
            ("commission", commission_pct),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(AppError::Config(format!(
                    "{} rate {} is outside [0, 1]",
                    name, rate
                )));
            }
        }

        Ok(Self {
            distributor_pct,
            commission_pct,
        })
    }

    /// Read whole-percentage overrides from DISTRIBUTOR_PCT / COMMISSION_PCT
    /// (e.g. "4" means 4%), falling back to the defaults of 0% and 4%.
    pub fn from_env() -> Result<Self> {
        let distributor_pct = percent_var("DISTRIBUTOR_PCT", DEFAULT_DISTRIBUTOR_PCT)?;
        let commission_pct = percent_var("COMMISSION_PCT", DEFAULT_COMMISSION_PCT)?;

        Self::new(distributor_pct, commission_pct)
    }
}

fn percent_var(name: &str, default: f64) -> Result<f64> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => {
            let pct = raw.trim().parse::<f64>().map_err(|_| {
                AppError::Config(format!("{} {:?} is not numeric", name, raw))
            })?;
            Ok(pct / 100.0)
        }
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_zero_distributor_four_percent_commission() {
        let rates = RateConfig::default();
        assert_eq!(rates.distributor_pct, 0.0);
        assert_eq!(rates.commission_pct, 0.04);
    }

    #[test]
    fn new_accepts_rates_in_unit_interval() {
        let rates = RateConfig::new(0.05, 0.10).unwrap();
        assert_eq!(rates.distributor_pct, 0.05);
        assert_eq!(rates.commission_pct, 0.10);
    }

    #[test]
    fn new_rejects_rates_outside_unit_interval() {
        assert!(matches!(
            RateConfig::new(1.5, 0.04),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            RateConfig::new(0.0, -0.1),
            Err(AppError::Config(_))
        ));
    }
}
