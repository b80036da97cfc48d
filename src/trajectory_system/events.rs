use crate::maneuver::orbits::TransferOrbit;

use super::state::KinematicState;

/// True when the step from `prev` to `current` carried the vehicle over
/// the far end of its transfer ellipse, where the second burn belongs.
///
/// For a raising transfer that end is the high point: radial velocity falls
/// from positive to zero or below, with the radius above
/// `tolerance * apogee_radius`. For a lowering transfer (target below the
/// first-burn radius) it is the low point: radial velocity rises from
/// negative to zero or above, with the radius below `apogee_radius / tolerance`.
/// The band absorbs the integrator's overshoot and undershoot of the
/// geometric extremum; an equality test would slip between two steps.
pub fn apogee_crossed(
    prev: &KinematicState,
    current: &KinematicState,
    orbit: &TransferOrbit,
    tolerance: f64,
) -> bool {
    let before = prev.radial_velocity();
    let after = current.radial_velocity();

    if orbit.is_descending() {
        let in_band = current.radius() < orbit.apogee_radius / tolerance;
        in_band && before < 0.0 && after >= 0.0
    } else {
        let in_band = current.radius() > tolerance * orbit.apogee_radius;
        in_band && before > 0.0 && after <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::vector2d::Vector2D;

    const PERIGEE: f64 = 6_471_000.0;
    const APOGEE: f64 = 6_771_000.0;

    fn raising() -> TransferOrbit {
        TransferOrbit::new(PERIGEE, APOGEE)
    }

    fn lowering() -> TransferOrbit {
        TransferOrbit::new(APOGEE, 6_571_000.0)
    }

    fn state_at(radius: f64, radial_speed: f64) -> KinematicState {
        KinematicState::new(
            Vector2D::new(radius, 0.0),
            Vector2D::new(radial_speed, 7_500.0),
        )
    }

    #[test]
    fn test_fires_on_turnaround_inside_band() {
        let prev = state_at(6_770_000.0, 3.0);
        let curr = state_at(6_770_500.0, -2.0);
        assert!(apogee_crossed(&prev, &curr, &raising(), 0.98));
    }

    #[test]
    fn test_ignores_turnaround_below_band() {
        let prev = state_at(6_500_000.0, 3.0);
        let curr = state_at(6_500_100.0, -2.0);
        assert!(!apogee_crossed(&prev, &curr, &raising(), 0.98));
    }

    #[test]
    fn test_ignores_climb_inside_band() {
        let prev = state_at(6_700_000.0, 80.0);
        let curr = state_at(6_710_000.0, 60.0);
        assert!(!apogee_crossed(&prev, &curr, &raising(), 0.98));
    }

    #[test]
    fn test_ignores_perigee_side_turnaround() {
        // Radial velocity rising through zero is the low point, not the high one
        let prev = state_at(6_760_000.0, -1.0);
        let curr = state_at(6_760_000.0, 1.0);
        assert!(!apogee_crossed(&prev, &curr, &raising(), 0.98));
    }

    #[test]
    fn test_tolerance_widens_band() {
        let prev = state_at(6_500_000.0, 3.0);
        let curr = state_at(6_500_100.0, -2.0);
        assert!(apogee_crossed(&prev, &curr, &raising(), 0.95));
    }

    #[test]
    fn test_lowering_transfer_fires_at_low_point() {
        let prev = state_at(6_572_000.0, -2.0);
        let curr = state_at(6_571_500.0, 1.0);
        assert!(apogee_crossed(&prev, &curr, &lowering(), 0.98));
    }

    #[test]
    fn test_lowering_transfer_ignores_high_point() {
        // Turning over at the first-burn altitude is outside the band
        let prev = state_at(6_771_000.0, 2.0);
        let curr = state_at(6_771_000.0, -1.0);
        assert!(!apogee_crossed(&prev, &curr, &lowering(), 0.98));

        let prev = state_at(6_771_000.0, -1.0);
        let curr = state_at(6_771_000.0, 1.0);
        assert!(!apogee_crossed(&prev, &curr, &lowering(), 0.98));
    }
}
