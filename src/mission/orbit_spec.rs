use std::fmt;

use tracing::warn;

use crate::errors::SimulationError;

use super::launch::LaunchSite;

/// Compass bearing of the ascent, in degrees from north.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LaunchAzimuth {
    /// The inclination is reachable by direct ascent from the site.
    Direct(f64),
    /// No direct ascent reaches the inclination: it is below the site's
    /// latitude, or retrograde beyond 180° minus the latitude. The bearing
    /// was clamped due east and the resulting orbit only approximates the request.
    Clamped(f64),
}

impl LaunchAzimuth {
    pub fn degrees(&self) -> f64 {
        match self {
            LaunchAzimuth::Direct(deg) | LaunchAzimuth::Clamped(deg) => *deg,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, LaunchAzimuth::Clamped(_))
    }
}

impl fmt::Display for LaunchAzimuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchAzimuth::Direct(deg) => write!(f, "{:.1}°", deg),
            LaunchAzimuth::Clamped(deg) => write!(f, "{:.1}° (clamped)", deg),
        }
    }
}

/// Launch azimuth reaching `inclination_deg` from `latitude_deg`, from
/// sin(az) = cos(i) / cos(φ). Retrograde inclinations head west of south.
pub fn launch_azimuth(inclination_deg: f64, latitude_deg: f64) -> LaunchAzimuth {
    let ratio = inclination_deg.to_radians().cos() / latitude_deg.to_radians().cos();

    if !ratio.is_finite() || ratio.abs() > 1.0 {
        warn!(
            inclination_deg,
            latitude_deg, "inclination unreachable by direct ascent, clamping azimuth due east"
        );
        return LaunchAzimuth::Clamped(90.0);
    }

    let azimuth = ratio.asin().to_degrees();
    if inclination_deg > 90.0 {
        LaunchAzimuth::Direct(180.0 - azimuth)
    } else {
        LaunchAzimuth::Direct(azimuth)
    }
}

/// Inclination flown from `latitude_deg` on bearing `azimuth_deg`: cos(i) = sin(az)⋅cos(φ).
pub fn inclination_from_azimuth(azimuth_deg: f64, latitude_deg: f64) -> f64 {
    let cos_i = azimuth_deg.to_radians().sin() * latitude_deg.to_radians().cos();
    cos_i.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Target orbit for one simulation run. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSpec {
    pub target_altitude: f64,
    pub apogee_altitude: f64,
    pub inclination_deg: f64,
    pub launch_azimuth: LaunchAzimuth,
}

impl OrbitSpec {
    /// Direct insertion: the transfer apogee is the target altitude.
    pub fn circular(
        site: &LaunchSite,
        target_altitude: f64,
        inclination_deg: f64,
    ) -> Result<Self, SimulationError> {
        OrbitSpec::transfer(site, target_altitude, target_altitude, inclination_deg)
    }

    /// Insertion through a transfer ellipse whose apogee differs from the target.
    pub fn transfer(
        site: &LaunchSite,
        target_altitude: f64,
        apogee_altitude: f64,
        inclination_deg: f64,
    ) -> Result<Self, SimulationError> {
        check_altitude("target altitude", target_altitude)?;
        check_altitude("apogee altitude", apogee_altitude)?;
        if !inclination_deg.is_finite() || !(0.0..=180.0).contains(&inclination_deg) {
            return Err(SimulationError::Configuration(format!(
                "inclination {} deg is outside [0, 180]",
                inclination_deg
            )));
        }

        Ok(OrbitSpec {
            target_altitude,
            apogee_altitude,
            inclination_deg,
            launch_azimuth: launch_azimuth(inclination_deg, site.latitude_deg),
        })
    }

    pub fn target_radius(&self, body_radius: f64) -> f64 {
        body_radius + self.target_altitude
    }

    pub fn apogee_radius(&self, body_radius: f64) -> f64 {
        body_radius + self.apogee_altitude
    }

    pub fn has_distinct_apogee(&self) -> bool {
        self.apogee_altitude != self.target_altitude
    }
}

fn check_altitude(label: &str, altitude: f64) -> Result<(), SimulationError> {
    if !altitude.is_finite() || altitude < 0.0 {
        return Err(SimulationError::Configuration(format!(
            "{} {} m must be a non-negative finite length",
            label, altitude
        )));
    }
    Ok(())
}
