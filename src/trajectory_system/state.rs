use std::fmt;

use crate::{
    constants::{MIN_RADIUS, MIN_SPEED},
    errors::SimulationError,
    maneuver::orbits::TransferOrbit,
    utils::vector2d::Vector2D,
};

/// Flight phase. Moves forward only: Ready -> Transfer -> Circularized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Ready,
    Transfer(TransferOrbit),
    Circularized(TransferOrbit),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Ready => "Ready",
            Phase::Transfer(_) => "Transfer",
            Phase::Circularized(_) => "Circularized",
        }
    }

    /// Position in the Ready -> Transfer -> Circularized ordering.
    pub fn rank(&self) -> u8 {
        match self {
            Phase::Ready => 0,
            Phase::Transfer(_) => 1,
            Phase::Circularized(_) => 2,
        }
    }

    /// Ellipse flown since the first burn, if it has fired.
    pub fn transfer_orbit(&self) -> Option<TransferOrbit> {
        match self {
            Phase::Ready => None,
            Phase::Transfer(orbit) | Phase::Circularized(orbit) => Some(*orbit),
        }
    }

    pub(crate) fn begin_transfer(self, orbit: TransferOrbit) -> Option<Phase> {
        match self {
            Phase::Ready => Some(Phase::Transfer(orbit)),
            _ => None,
        }
    }

    pub(crate) fn circularize(self) -> Option<Phase> {
        match self {
            Phase::Transfer(orbit) => Some(Phase::Circularized(orbit)),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub elapsed_time: f64,
    pub phase: Phase,
}

impl KinematicState {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        KinematicState {
            position,
            velocity,
            elapsed_time: 0.0,
            phase: Phase::Ready,
        }
    }

    pub fn radius(&self) -> f64 {
        self.position.magnitude()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    /// Rate of change of radius; positive while climbing.
    pub fn radial_velocity(&self) -> f64 {
        let r = self.radius();
        if r <= MIN_RADIUS {
            0.0
        } else {
            self.position.dot(&self.velocity) / r
        }
    }

    pub fn altitude(&self, body_radius: f64) -> f64 {
        self.radius() - body_radius
    }

    pub(crate) fn checked_radius(&self) -> Result<f64, SimulationError> {
        let r = self.radius();
        if !r.is_finite() || r <= MIN_RADIUS {
            return Err(SimulationError::DegenerateState(format!(
                "position magnitude {:.3e} m is too small to define a radius",
                r
            )));
        }
        Ok(r)
    }

    pub(crate) fn velocity_direction(&self) -> Result<Vector2D, SimulationError> {
        self.velocity.unit(MIN_SPEED).ok_or_else(|| {
            SimulationError::DegenerateState(format!(
                "speed {:.3e} m/s leaves the burn direction undefined",
                self.speed()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample_orbit() -> TransferOrbit {
        TransferOrbit::new(6_471_000.0, 6_771_000.0)
    }

    #[test]
    fn test_phase_transitions_only_move_forward() {
        let orbit = sample_orbit();
        let transfer = Phase::Ready.begin_transfer(orbit).unwrap();
        assert_eq!(transfer.name(), "Transfer");
        assert!(transfer.begin_transfer(orbit).is_none());

        let done = transfer.circularize().unwrap();
        assert_eq!(done, Phase::Circularized(orbit));
        assert!(done.circularize().is_none());
        assert!(done.begin_transfer(orbit).is_none());
        assert!(Phase::Ready.circularize().is_none());
        assert!(Phase::Ready.rank() < transfer.rank() && transfer.rank() < done.rank());
    }

    #[test]
    fn test_radial_velocity_sign() {
        let climbing = KinematicState::new(Vector2D::new(7.0e6, 0.0), Vector2D::new(100.0, 7500.0));
        assert_abs_diff_eq!(climbing.radial_velocity(), 100.0, epsilon = 1e-9);

        let falling = KinematicState::new(Vector2D::new(0.0, 7.0e6), Vector2D::new(7500.0, -50.0));
        assert_abs_diff_eq!(falling.radial_velocity(), -50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_velocity_has_no_direction() {
        let state = KinematicState::new(Vector2D::new(7.0e6, 0.0), Vector2D::ZERO);
        assert!(matches!(
            state.velocity_direction(),
            Err(SimulationError::DegenerateState(_))
        ));
    }

    #[test]
    fn test_zero_position_has_no_radius() {
        let state = KinematicState::new(Vector2D::ZERO, Vector2D::new(1.0, 0.0));
        assert!(matches!(
            state.checked_radius(),
            Err(SimulationError::DegenerateState(_))
        ));
    }
}
