use crate::{
    constants::{PhysicalConstants, INITIAL_ALTITUDE, TANEGASHIMA_LATITUDE},
    errors::SimulationError,
    trajectory_system::state::KinematicState,
    utils::vector2d::Vector2D,
};

/// Where the simulated flight begins: a latitude and a height above the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaunchSite {
    pub latitude_deg: f64,
    pub initial_altitude: f64,
}

impl LaunchSite {
    pub fn new(latitude_deg: f64, initial_altitude: f64) -> Result<Self, SimulationError> {
        if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(SimulationError::Configuration(format!(
                "launch latitude {} deg is outside [-90, 90]",
                latitude_deg
            )));
        }
        if !initial_altitude.is_finite() || initial_altitude < 0.0 {
            return Err(SimulationError::Configuration(format!(
                "initial altitude {} m must be a non-negative finite length",
                initial_altitude
            )));
        }

        Ok(LaunchSite {
            latitude_deg,
            initial_altitude,
        })
    }

    /// Tanegashima Space Center, 100 km above the surface.
    pub fn tanegashima() -> Self {
        LaunchSite {
            latitude_deg: TANEGASHIMA_LATITUDE,
            initial_altitude: INITIAL_ALTITUDE,
        }
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn initial_radius(&self, constants: &PhysicalConstants) -> f64 {
        constants.body_radius + self.initial_altitude
    }

    /// Speed the ground lends the vehicle at this latitude and radius.
    pub fn rotational_speed(&self, constants: &PhysicalConstants) -> f64 {
        constants.rotation_rate * self.initial_radius(constants) * self.latitude_rad().cos()
    }

    /// Initial state in the meridian plane through the site: position at the
    /// site's latitude, velocity tangential (prograde) from the body's spin.
    pub fn initial_state(&self, constants: &PhysicalConstants) -> KinematicState {
        let r0 = self.initial_radius(constants);
        let lat = self.latitude_rad();

        let position = Vector2D::from_polar(r0, lat);
        let velocity = Vector2D::from_polar(self.rotational_speed(constants), lat).perpendicular();

        KinematicState::new(position, velocity)
    }
}

impl Default for LaunchSite {
    fn default() -> Self {
        LaunchSite::tanegashima()
    }
}
