use std::fmt;

use crate::{
    constants::PhysicalConstants, errors::SimulationError, mission::orbit_spec::OrbitSpec,
    trajectory_system::state::KinematicState,
};

use super::orbits::{circular_speed, orbital_period, TransferOrbit};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BurnKind {
    /// Perigee burn raising the apogee to the transfer target.
    Transfer,
    /// Apogee burn matching the target circular speed.
    Circularization,
}

impl fmt::Display for BurnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BurnKind::Transfer => f.write_str("Transfer"),
            BurnKind::Circularization => f.write_str("Circularization"),
        }
    }
}

/// Impulse to apply along the current velocity direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurnPlan {
    pub kind: BurnKind,
    /// Signed change of speed, m/s. Negative values are retrograde.
    pub delta_v: f64,
    /// Speed the burn is sized to reach, m/s.
    pub target_speed: f64,
}

/// Theoretical figures for a run, evaluated before any burn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MissionBudget {
    pub transfer: BurnPlan,
    pub circularization: BurnPlan,
    pub total_delta_v: f64,
    pub target_circular_speed: f64,
    pub target_period: f64,
    pub transfer_time: f64,
    pub transfer_eccentricity: f64,
}

/// Sizes the two impulses of an orbit insertion.
///
/// Both plans are recomputed from whatever state is passed in; nothing is
/// cached, since radius and speed change every step.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManeuverPlanner {
    constants: PhysicalConstants,
}

impl ManeuverPlanner {
    pub fn new(constants: PhysicalConstants) -> Self {
        ManeuverPlanner { constants }
    }

    /// Transfer ellipse starting at the state's current radius.
    pub fn transfer_orbit(
        &self,
        state: &KinematicState,
        spec: &OrbitSpec,
    ) -> Result<TransferOrbit, SimulationError> {
        let r_initial = state.checked_radius()?;
        Ok(TransferOrbit::new(
            r_initial,
            spec.apogee_radius(self.constants.body_radius),
        ))
    }

    pub fn plan_transfer_burn(
        &self,
        state: &KinematicState,
        spec: &OrbitSpec,
    ) -> Result<BurnPlan, SimulationError> {
        state.velocity_direction()?;
        let transfer = self.transfer_orbit(state, spec)?;
        let v_perigee = transfer.perigee_speed(self.constants.mu());

        Ok(BurnPlan {
            kind: BurnKind::Transfer,
            delta_v: v_perigee - state.speed(),
            target_speed: v_perigee,
        })
    }

    /// Uses the ellipse recorded when the transfer burn fired. Before that,
    /// the ellipse that would start from the current radius.
    pub fn plan_circularization_burn(
        &self,
        state: &KinematicState,
        spec: &OrbitSpec,
    ) -> Result<BurnPlan, SimulationError> {
        state.velocity_direction()?;
        let transfer = match state.phase.transfer_orbit() {
            Some(orbit) => orbit,
            None => self.transfer_orbit(state, spec)?,
        };

        let mu = self.constants.mu();
        let v_circular = circular_speed(mu, spec.target_radius(self.constants.body_radius));
        let v_apogee = transfer.apogee_speed(mu);

        Ok(BurnPlan {
            kind: BurnKind::Circularization,
            delta_v: v_circular - v_apogee,
            target_speed: v_circular,
        })
    }

    pub fn mission_budget(
        &self,
        state: &KinematicState,
        spec: &OrbitSpec,
    ) -> Result<MissionBudget, SimulationError> {
        let transfer = self.plan_transfer_burn(state, spec)?;
        let circularization = self.plan_circularization_burn(state, spec)?;
        let orbit = match state.phase.transfer_orbit() {
            Some(orbit) => orbit,
            None => self.transfer_orbit(state, spec)?,
        };

        let mu = self.constants.mu();
        let target_radius = spec.target_radius(self.constants.body_radius);

        Ok(MissionBudget {
            transfer,
            circularization,
            total_delta_v: transfer.delta_v.abs() + circularization.delta_v.abs(),
            target_circular_speed: circular_speed(mu, target_radius),
            target_period: orbital_period(mu, target_radius),
            transfer_time: orbit.half_period(mu),
            transfer_eccentricity: orbit.eccentricity(),
        })
    }
}
