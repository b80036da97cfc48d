use orbit_insertion::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SimulationConfig::from_env()?;
    let site = LaunchSite::tanegashima();
    let spec = OrbitSpec::circular(&site, TARGET_ALTITUDE, 51.6)?;

    let mut engine = SimulationEngine::new(&site, spec, config)?;

    let budget = engine.mission_budget()?;
    info!(
        latitude = site.latitude_deg,
        initial_altitude_km = site.initial_altitude / 1000.0,
        target_altitude_km = spec.target_altitude / 1000.0,
        launch_azimuth = %spec.launch_azimuth,
        time_step = engine.config().time_step,
        "orbit insertion scenario"
    );
    info!(
        transfer_dv = budget.transfer.delta_v,
        circularization_dv = budget.circularization.delta_v,
        total_dv = budget.total_delta_v,
        circular_speed = budget.target_circular_speed,
        period_min = budget.target_period / 60.0,
        transfer_eccentricity = budget.transfer_eccentricity,
        "theoretical budget"
    );

    let mut telemetry = Telemetry::new();
    telemetry.collect_data(&engine);

    engine.apply_first_burn()?;

    let max_time = budget.target_period * 1.5;
    while engine.elapsed_time() < max_time {
        match engine.advance() {
            Ok(_) => telemetry.collect_data(&engine),
            Err(e) => {
                println!("Error during simulation step: {}", e);
                break;
            }
        }
    }

    telemetry.display_data(30);

    let body_radius = engine.constants().body_radius;
    let samples = engine.trajectory().to_vec();
    let highest = samples
        .iter()
        .map(|sample| sample.position.magnitude() - body_radius)
        .fold(f64::NEG_INFINITY, f64::max);
    info!(
        samples = samples.len(),
        dropped = engine.trajectory().dropped(),
        highest_km = highest / 1000.0,
        "trajectory recorded"
    );

    Ok(())
}
