//! Closed-form two-body relations used by the maneuver planner.

use std::f64::consts::PI;

/// Circular-orbit speed at radius `r`.
pub fn circular_speed(mu: f64, r: f64) -> f64 {
    (mu / r).sqrt()
}

/// Vis-viva: speed at radius `r` on a conic with semi-major axis `a`.
pub fn vis_viva_speed(mu: f64, r: f64, a: f64) -> f64 {
    (mu * (2.0 / r - 1.0 / a)).sqrt()
}

/// Period of an orbit with semi-major axis `a`.
pub fn orbital_period(mu: f64, a: f64) -> f64 {
    2.0 * PI * (a.powi(3) / mu).sqrt()
}

/// Coplanar ellipse joining a perigee burn point to a target apogee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferOrbit {
    pub perigee_radius: f64,
    pub apogee_radius: f64,
}

impl TransferOrbit {
    pub fn new(perigee_radius: f64, apogee_radius: f64) -> Self {
        TransferOrbit {
            perigee_radius,
            apogee_radius,
        }
    }

    pub fn semi_major_axis(&self) -> f64 {
        (self.perigee_radius + self.apogee_radius) / 2.0
    }

    pub fn eccentricity(&self) -> f64 {
        (self.apogee_radius - self.perigee_radius).abs() / (self.apogee_radius + self.perigee_radius)
    }

    /// True when the target end lies below the first-burn radius.
    pub fn is_descending(&self) -> bool {
        self.apogee_radius < self.perigee_radius
    }

    pub fn perigee_speed(&self, mu: f64) -> f64 {
        vis_viva_speed(mu, self.perigee_radius, self.semi_major_axis())
    }

    pub fn apogee_speed(&self, mu: f64) -> f64 {
        vis_viva_speed(mu, self.apogee_radius, self.semi_major_axis())
    }

    pub fn period(&self, mu: f64) -> f64 {
        orbital_period(mu, self.semi_major_axis())
    }

    /// Coast time from the perigee burn to apogee.
    pub fn half_period(&self, mu: f64) -> f64 {
        self.period(mu) / 2.0
    }
}

/// Two-impulse transfer between circular orbits of radius `r1` and `r2`.
#[derive(Debug, Clone, Copy)]
pub struct HohmannTransfer {
    pub dv1: f64,           // m/s, raise apogee
    pub dv2: f64,           // m/s, circularize
    pub total_dv: f64,      // m/s
    pub transfer_time: f64, // s, half the transfer period
}

pub fn hohmann(mu: f64, r1: f64, r2: f64) -> HohmannTransfer {
    let transfer = TransferOrbit::new(r1, r2);

    let dv1 = (transfer.perigee_speed(mu) - circular_speed(mu, r1)).abs();
    let dv2 = (circular_speed(mu, r2) - transfer.apogee_speed(mu)).abs();

    HohmannTransfer {
        dv1,
        dv2,
        total_dv: dv1 + dv2,
        transfer_time: transfer.half_period(mu),
    }
}
