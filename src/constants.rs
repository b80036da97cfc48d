use std::f64::consts::PI;

// Physical Constants
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11; // m³/(kg⋅s²)
pub const EARTH_MASS: f64 = 5.972e24; // kg
pub const EARTH_RADIUS: f64 = 6.371e6; // meters
pub const EARTH_MU: f64 = GRAVITATIONAL_CONSTANT * EARTH_MASS; // m³/s²
pub const EARTH_ROTATION_RATE: f64 = 2.0 * PI / 86_400.0; // rad/s

// Launch Site (Tanegashima Space Center)
pub const TANEGASHIMA_LATITUDE: f64 = 30.4; // degrees north
pub const INITIAL_ALTITUDE: f64 = 100_000.0; // m
pub const TARGET_ALTITUDE: f64 = 400_000.0; // m

// Simulation Parameters
pub const TIME_STEP: f64 = 10.0; // s
pub const APOGEE_TOLERANCE: f64 = 0.98; // fraction of apogee radius

// Below these magnitudes a direction is undefined
pub const MIN_SPEED: f64 = 1e-9; // m/s
pub const MIN_RADIUS: f64 = 1.0; // m

/// Gravitating body the vehicle orbits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    pub gravitational_constant: f64,
    pub body_mass: f64,
    pub body_radius: f64,
    pub rotation_rate: f64,
}

impl PhysicalConstants {
    pub const EARTH: PhysicalConstants = PhysicalConstants {
        gravitational_constant: GRAVITATIONAL_CONSTANT,
        body_mass: EARTH_MASS,
        body_radius: EARTH_RADIUS,
        rotation_rate: EARTH_ROTATION_RATE,
    };

    /// Standard gravitational parameter μ = G⋅M.
    pub fn mu(&self) -> f64 {
        self.gravitational_constant * self.body_mass
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        PhysicalConstants::EARTH
    }
}
