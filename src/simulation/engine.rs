use tracing::{info, trace};

use crate::{
    config::{validate_time_step, SimulationConfig},
    constants::PhysicalConstants,
    errors::SimulationError,
    maneuver::planner::{BurnKind, BurnPlan, ManeuverPlanner, MissionBudget},
    mission::{launch::LaunchSite, orbit_spec::OrbitSpec},
    trajectory_system::{
        events::apogee_crossed,
        kinematics::euler_step,
        state::{KinematicState, Phase},
        trajectory::Trajectory,
    },
};

/// Propagates one insertion flight and fires its two burns.
///
/// The engine is the only writer of its state and trajectory. Independent
/// runs use independent engines.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    constants: PhysicalConstants,
    planner: ManeuverPlanner,
    spec: OrbitSpec,
    config: SimulationConfig,
    state: KinematicState,
    trajectory: Trajectory,
    circularization_applied: bool,
}

impl SimulationEngine {
    pub fn new(
        site: &LaunchSite,
        spec: OrbitSpec,
        config: SimulationConfig,
    ) -> Result<Self, SimulationError> {
        let constants = PhysicalConstants::EARTH;
        let state = site.initial_state(&constants);
        SimulationEngine::from_state(constants, state, spec, config)
    }

    /// Starts from an arbitrary Ready state around `constants`' body.
    pub fn from_state(
        constants: PhysicalConstants,
        state: KinematicState,
        spec: OrbitSpec,
        config: SimulationConfig,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        if state.phase != Phase::Ready {
            return Err(SimulationError::Configuration(format!(
                "engine must start in the Ready phase, not {}",
                state.phase
            )));
        }
        if !state.position.is_finite() || !state.velocity.is_finite() {
            return Err(SimulationError::Configuration(
                "initial state must be finite".to_string(),
            ));
        }

        let mut trajectory = Trajectory::new(config.max_trajectory_samples);
        trajectory.record(state.position, state.elapsed_time);

        info!(
            target_altitude = spec.target_altitude,
            apogee_altitude = spec.apogee_altitude,
            launch_azimuth = %spec.launch_azimuth,
            "simulation engine ready"
        );

        Ok(SimulationEngine {
            constants,
            planner: ManeuverPlanner::new(constants),
            spec,
            config,
            state,
            trajectory,
            circularization_applied: false,
        })
    }

    /// Perigee burn onto the transfer ellipse. Allowed once, from Ready.
    pub fn apply_first_burn(&mut self) -> Result<BurnPlan, SimulationError> {
        if self.state.phase != Phase::Ready {
            return Err(SimulationError::DoubleBurn(BurnKind::Transfer));
        }

        let plan = self.planner.plan_transfer_burn(&self.state, &self.spec)?;
        let orbit = self.planner.transfer_orbit(&self.state, &self.spec)?;
        let next_phase = self
            .state
            .phase
            .begin_transfer(orbit)
            .ok_or(SimulationError::DoubleBurn(BurnKind::Transfer))?;

        self.apply_impulse(&plan)?;
        self.state.phase = next_phase;

        info!(
            delta_v = plan.delta_v,
            elapsed_time = self.state.elapsed_time,
            apogee_radius = orbit.apogee_radius,
            "transfer burn applied"
        );
        Ok(plan)
    }

    /// Apogee burn onto the target circle. Allowed once, from Transfer.
    pub fn apply_second_burn(&mut self) -> Result<BurnPlan, SimulationError> {
        if self.circularization_applied {
            return Err(SimulationError::DoubleBurn(BurnKind::Circularization));
        }
        let next_phase = match self.state.phase {
            Phase::Ready => {
                return Err(SimulationError::BurnOutOfSequence(BurnKind::Circularization))
            }
            Phase::Circularized(_) => {
                return Err(SimulationError::DoubleBurn(BurnKind::Circularization))
            }
            transfer @ Phase::Transfer(_) => transfer
                .circularize()
                .ok_or(SimulationError::DoubleBurn(BurnKind::Circularization))?,
        };

        let plan = self
            .planner
            .plan_circularization_burn(&self.state, &self.spec)?;
        self.apply_impulse(&plan)?;
        self.state.phase = next_phase;
        self.circularization_applied = true;

        info!(
            delta_v = plan.delta_v,
            elapsed_time = self.state.elapsed_time,
            altitude = self.altitude(),
            "circularization burn applied"
        );
        Ok(plan)
    }

    fn apply_impulse(&mut self, plan: &BurnPlan) -> Result<(), SimulationError> {
        let direction = self.state.velocity_direction()?;
        self.state.velocity += direction * plan.delta_v;
        Ok(())
    }

    /// One explicit Euler step of `dt` seconds, then apogee detection.
    ///
    /// Returns the circularization burn when it fired during this step.
    pub fn step(&mut self, dt: f64) -> Result<Option<BurnPlan>, SimulationError> {
        validate_time_step(dt)?;

        let prev = self.state;
        self.state = euler_step(&prev, self.constants.mu(), dt)?;
        self.trajectory
            .record(self.state.position, self.state.elapsed_time);

        trace!(
            elapsed_time = self.state.elapsed_time,
            radius = self.state.radius(),
            radial_velocity = self.state.radial_velocity(),
            phase = self.state.phase.name(),
            "step"
        );

        if self.apogee_event(&prev) {
            return self.apply_second_burn().map(Some);
        }
        Ok(None)
    }

    /// Step with the configured time step.
    pub fn advance(&mut self) -> Result<Option<BurnPlan>, SimulationError> {
        self.step(self.config.time_step)
    }

    fn apogee_event(&self, prev: &KinematicState) -> bool {
        match self.state.phase {
            Phase::Transfer(orbit) if !self.circularization_applied => apogee_crossed(
                prev,
                &self.state,
                &orbit,
                self.config.apogee_tolerance,
            ),
            _ => false,
        }
    }

    /// Advances with the configured step until circularized or `max_steps`
    /// steps have run. Returns the number of steps taken when the burn fired.
    pub fn run_until_circularized(
        &mut self,
        max_steps: usize,
    ) -> Result<Option<usize>, SimulationError> {
        for n in 1..=max_steps {
            if self.advance()?.is_some() {
                return Ok(Some(n));
            }
        }
        Ok(None)
    }

    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn spec(&self) -> &OrbitSpec {
        &self.spec
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn phase_name(&self) -> &'static str {
        self.state.phase.name()
    }

    pub fn altitude(&self) -> f64 {
        self.state.altitude(self.constants.body_radius)
    }

    pub fn speed(&self) -> f64 {
        self.state.speed()
    }

    pub fn elapsed_time(&self) -> f64 {
        self.state.elapsed_time
    }

    /// Both burns as they would be sized against the current state.
    pub fn preview_burns(&self) -> Result<(BurnPlan, BurnPlan), SimulationError> {
        Ok((
            self.planner.plan_transfer_burn(&self.state, &self.spec)?,
            self.planner
                .plan_circularization_burn(&self.state, &self.spec)?,
        ))
    }

    pub fn mission_budget(&self) -> Result<MissionBudget, SimulationError> {
        self.planner.mission_budget(&self.state, &self.spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EARTH_MU, EARTH_RADIUS};
    use crate::maneuver::orbits::circular_speed;
    use crate::utils::vector2d::Vector2D;
    use approx::assert_abs_diff_eq;

    fn default_engine() -> SimulationEngine {
        let site = LaunchSite::tanegashima();
        let spec = OrbitSpec::circular(&site, 400_000.0, 51.6).unwrap();
        SimulationEngine::new(&site, spec, SimulationConfig::default()).unwrap()
    }

    #[test]
    fn test_engine_starts_ready_with_launch_sample() {
        let engine = default_engine();
        assert_eq!(engine.phase(), Phase::Ready);
        assert_eq!(engine.phase_name(), "Ready");
        assert_eq!(engine.trajectory().len(), 1);
        assert_abs_diff_eq!(engine.altitude(), 100_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_first_burn_accelerates_prograde() {
        let mut engine = default_engine();
        let spin_speed = engine.speed();
        let direction = engine.state().velocity.unit(0.0).unwrap();

        let plan = engine.apply_first_burn().unwrap();

        assert!(engine.speed() > spin_speed);
        assert_abs_diff_eq!(engine.speed(), spin_speed + plan.delta_v, epsilon = 1e-6);
        let new_direction = engine.state().velocity.unit(0.0).unwrap();
        assert_abs_diff_eq!(direction.dot(&new_direction), 1.0, epsilon = 1e-12);
        assert_eq!(engine.phase_name(), "Transfer");
    }

    #[test]
    fn test_first_burn_only_once() {
        let mut engine = default_engine();
        engine.apply_first_burn().unwrap();
        let velocity = engine.state().velocity;
        assert_eq!(
            engine.apply_first_burn(),
            Err(SimulationError::DoubleBurn(BurnKind::Transfer))
        );
        assert_eq!(engine.state().velocity, velocity);
    }

    #[test]
    fn test_second_burn_before_first_is_out_of_sequence() {
        let mut engine = default_engine();
        assert_eq!(
            engine.apply_second_burn(),
            Err(SimulationError::BurnOutOfSequence(BurnKind::Circularization))
        );
        assert_eq!(engine.phase(), Phase::Ready);
    }

    #[test]
    fn test_second_burn_twice_is_rejected() {
        let mut engine = default_engine();
        engine.apply_first_burn().unwrap();
        engine.apply_second_burn().unwrap();
        let velocity = engine.state().velocity;

        assert_eq!(
            engine.apply_second_burn(),
            Err(SimulationError::DoubleBurn(BurnKind::Circularization))
        );
        assert_eq!(engine.state().velocity, velocity);
        assert_eq!(engine.phase_name(), "Circularized");
    }

    #[test]
    fn test_step_appends_sample_and_advances_time() {
        let mut engine = default_engine();
        engine.step(10.0).unwrap();
        engine.step(5.0).unwrap();
        assert_eq!(engine.trajectory().len(), 3);
        assert_abs_diff_eq!(engine.elapsed_time(), 15.0);
        assert_eq!(engine.trajectory().latest().unwrap().elapsed_time, 15.0);
        assert_eq!(engine.trajectory().latest().unwrap().position, engine.state().position);
    }

    #[test]
    fn test_step_rejects_invalid_dt() {
        let mut engine = default_engine();
        assert!(matches!(engine.step(0.0), Err(SimulationError::Configuration(_))));
        assert!(matches!(engine.step(f64::NAN), Err(SimulationError::Configuration(_))));
        assert_eq!(engine.trajectory().len(), 1);
    }

    #[test]
    fn test_ready_phase_never_fires_burns() {
        let mut engine = default_engine();
        for _ in 0..50 {
            assert_eq!(engine.advance().unwrap(), None);
        }
        assert_eq!(engine.phase(), Phase::Ready);
    }

    #[test]
    fn test_pole_launch_cannot_burn() {
        let site = LaunchSite::new(90.0, 100_000.0).unwrap();
        let spec = OrbitSpec::circular(&site, 400_000.0, 90.0).unwrap();
        let mut engine = SimulationEngine::new(&site, spec, SimulationConfig::default()).unwrap();

        assert!(matches!(
            engine.apply_first_burn(),
            Err(SimulationError::DegenerateState(_))
        ));
        assert_eq!(engine.phase(), Phase::Ready);
    }

    #[test]
    fn test_preview_does_not_mutate() {
        let engine = default_engine();
        let before = *engine.state();
        let (transfer, circularization) = engine.preview_burns().unwrap();
        assert_eq!(transfer.kind, BurnKind::Transfer);
        assert_eq!(circularization.kind, BurnKind::Circularization);
        assert_eq!(*engine.state(), before);
    }

    #[test]
    fn test_from_state_requires_ready_phase() {
        let site = LaunchSite::tanegashima();
        let spec = OrbitSpec::circular(&site, 400_000.0, 51.6).unwrap();
        let r = EARTH_RADIUS + 400_000.0;
        let mut state = KinematicState::new(
            Vector2D::new(r, 0.0),
            Vector2D::new(0.0, circular_speed(EARTH_MU, r)),
        );
        assert!(SimulationEngine::from_state(
            PhysicalConstants::EARTH,
            state,
            spec,
            SimulationConfig::default()
        )
        .is_ok());

        state.phase = Phase::Circularized(crate::maneuver::orbits::TransferOrbit::new(r, r));
        assert!(matches!(
            SimulationEngine::from_state(PhysicalConstants::EARTH, state, spec, SimulationConfig::default()),
            Err(SimulationError::Configuration(_))
        ));
    }
}
