use std::env;
use std::str::FromStr;

use crate::{
    constants::{APOGEE_TOLERANCE, TIME_STEP},
    errors::SimulationError,
};

pub const TIME_STEP_VAR: &str = "ORBIT_SIM_TIME_STEP";
pub const APOGEE_TOLERANCE_VAR: &str = "ORBIT_SIM_APOGEE_TOLERANCE";
pub const MAX_SAMPLES_VAR: &str = "ORBIT_SIM_MAX_SAMPLES";

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub time_step: f64,        // s
    pub apogee_tolerance: f64, // fraction of the apogee radius that opens the event band
    pub max_trajectory_samples: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: TIME_STEP,
            apogee_tolerance: APOGEE_TOLERANCE,
            max_trajectory_samples: None,
        }
    }
}

impl SimulationConfig {
    /// Defaults overridden by any of the `ORBIT_SIM_*` variables that are set.
    pub fn from_env() -> Result<Self, SimulationError> {
        let defaults = SimulationConfig::default();
        let config = SimulationConfig {
            time_step: read_var(TIME_STEP_VAR)?.unwrap_or(defaults.time_step),
            apogee_tolerance: read_var(APOGEE_TOLERANCE_VAR)?.unwrap_or(defaults.apogee_tolerance),
            max_trajectory_samples: read_var(MAX_SAMPLES_VAR)?.or(defaults.max_trajectory_samples),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        validate_time_step(self.time_step)?;
        if !self.apogee_tolerance.is_finite()
            || self.apogee_tolerance <= 0.0
            || self.apogee_tolerance > 1.0
        {
            return Err(SimulationError::Configuration(format!(
                "apogee tolerance {} must lie in (0, 1]",
                self.apogee_tolerance
            )));
        }
        if self.max_trajectory_samples == Some(0) {
            return Err(SimulationError::Configuration(
                "trajectory sample limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn validate_time_step(dt: f64) -> Result<(), SimulationError> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(SimulationError::Configuration(format!(
            "time step {} s must be positive and finite",
            dt
        )));
    }
    Ok(())
}

fn read_var<T: FromStr>(name: &str) -> Result<Option<T>, SimulationError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            SimulationError::Configuration(format!("{} has unparsable value {:?}", name, raw))
        }),
        Err(_) => Ok(None),
    }
}
