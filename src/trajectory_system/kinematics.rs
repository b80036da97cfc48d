use crate::{errors::SimulationError, utils::vector2d::Vector2D};

use super::state::KinematicState;

/// Inverse-square pull toward the origin: a = -μ r / |r|³.
pub fn gravitational_acceleration(mu: f64, position: Vector2D) -> Vector2D {
    let r = position.magnitude();
    position * (-mu / r.powi(3))
}

/// Advances `state` by one fixed step of explicit Euler integration.
///
/// The velocity is updated first and the new velocity moves the position,
/// so a single step reads: v += a⋅dt; r += v⋅dt. Phase is carried over
/// untouched; event handling belongs to the engine.
pub fn euler_step(
    state: &KinematicState,
    mu: f64,
    dt: f64,
) -> Result<KinematicState, SimulationError> {
    state.checked_radius()?;

    let acceleration = gravitational_acceleration(mu, state.position);
    let velocity = state.velocity + acceleration * dt;
    let position = state.position + velocity * dt;

    if !position.is_finite() || !velocity.is_finite() {
        return Err(SimulationError::DegenerateState(format!(
            "integration produced a non-finite state at t = {:.1} s",
            state.elapsed_time + dt
        )));
    }

    Ok(KinematicState {
        position,
        velocity,
        elapsed_time: state.elapsed_time + dt,
        phase: state.phase,
    })
}

/// Specific orbital energy v²/2 - μ/r.
pub fn specific_energy(state: &KinematicState, mu: f64) -> f64 {
    state.speed().powi(2) / 2.0 - mu / state.radius()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EARTH_MU, EARTH_RADIUS};
    use crate::maneuver::orbits::{circular_speed, orbital_period};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn circular_state(altitude: f64) -> KinematicState {
        let r = EARTH_RADIUS + altitude;
        KinematicState::new(
            Vector2D::new(r, 0.0),
            Vector2D::new(0.0, circular_speed(EARTH_MU, r)),
        )
    }

    #[test]
    fn test_gravity_points_to_center() {
        let position = Vector2D::new(EARTH_RADIUS, 0.0);
        let a = gravitational_acceleration(EARTH_MU, position);
        assert!(a.x < 0.0);
        assert_abs_diff_eq!(a.y, 0.0);
        assert_abs_diff_eq!(a.magnitude(), 9.82, epsilon = 1e-2);
    }

    #[test]
    fn test_gravity_decreases_with_altitude() {
        let low = gravitational_acceleration(EARTH_MU, Vector2D::new(EARTH_RADIUS, 0.0));
        let high = gravitational_acceleration(EARTH_MU, Vector2D::new(0.0, EARTH_RADIUS + 400_000.0));
        assert!(high.magnitude() < low.magnitude());
    }

    #[test]
    fn test_euler_step_updates_velocity_before_position() {
        let state = KinematicState::new(Vector2D::new(EARTH_RADIUS, 0.0), Vector2D::ZERO);
        let dt = 2.0;
        let next = euler_step(&state, EARTH_MU, dt).unwrap();

        let g = EARTH_MU / EARTH_RADIUS.powi(2);
        assert_relative_eq!(next.velocity.x, -g * dt, epsilon = 1e-9);
        // Position moved with the already-updated velocity
        assert_relative_eq!(next.position.x, EARTH_RADIUS - g * dt * dt, epsilon = 1e-6);
        assert_eq!(next.elapsed_time, dt);
    }

    #[test]
    fn test_circular_orbit_stays_near_radius_over_one_period() {
        let mut state = circular_state(400_000.0);
        let r0 = state.radius();
        let energy0 = specific_energy(&state, EARTH_MU);
        let dt = 10.0;
        let steps = (orbital_period(EARTH_MU, r0) / dt) as usize;

        for _ in 0..steps {
            state = euler_step(&state, EARTH_MU, dt).unwrap();
            assert!(
                (state.radius() - r0).abs() / r0 < 0.02,
                "radius drifted to {:.0} m",
                state.radius()
            );
        }
        assert_relative_eq!(specific_energy(&state, EARTH_MU), energy0, max_relative = 2e-2);
    }

    #[test]
    fn test_euler_step_rejects_origin() {
        let state = KinematicState::new(Vector2D::ZERO, Vector2D::new(1.0, 0.0));
        assert!(matches!(
            euler_step(&state, EARTH_MU, 1.0),
            Err(SimulationError::DegenerateState(_))
        ));
    }
}
