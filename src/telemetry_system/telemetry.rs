use crate::simulation::engine::SimulationEngine;
use crate::trajectory_system::kinematics::specific_energy;

#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryRecord {
    pub elapsed_time: f64,
    pub altitude: f64,
    pub speed: f64,
    /// Specific orbital energy, J/kg. Constant between burns up to integrator drift.
    pub energy: f64,
    pub phase: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
/// Extremes are `None` until the first record is collected.
pub struct TelemetrySummary {
    pub max_altitude: Option<f64>,
    pub min_altitude: Option<f64>,
    pub max_speed: Option<f64>,
    pub phase_times: Vec<(&'static str, f64)>,
    pub circularized_at: Option<f64>,
}

pub struct Telemetry {
    pub log: Vec<TelemetryRecord>,
    max_altitude: Option<f64>,
    min_altitude: Option<f64>,
    max_speed: Option<f64>,
    phase_times: Vec<(&'static str, f64)>,
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry {
            log: Vec::new(),
            max_altitude: None,
            min_altitude: None,
            max_speed: None,
            phase_times: Vec::new(),
        }
    }

    pub fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 3600.0 {
            let hours = (elapsed_time / 3600.0).floor();
            let minutes = ((elapsed_time % 3600.0) / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}h {:.0}m {:.0}s", hours, minutes, seconds)
        } else if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.0}s", minutes, seconds)
        } else {
            format!("{:.1}s", elapsed_time)
        }
    }

    pub fn format_altitude(altitude: f64) -> String {
        if altitude.abs() >= 1000.0 {
            format!("{:.1} km", altitude / 1000.0)
        } else {
            format!("{:.1} m", altitude)
        }
    }

    pub fn collect_data(&mut self, engine: &SimulationEngine) {
        let record = TelemetryRecord {
            elapsed_time: engine.elapsed_time(),
            altitude: engine.altitude(),
            speed: engine.speed(),
            energy: specific_energy(engine.state(), engine.constants().mu()),
            phase: engine.phase_name(),
        };

        let (altitude, speed) = (record.altitude, record.speed);
        self.max_altitude = Some(self.max_altitude.map_or(altitude, |m| m.max(altitude)));
        self.min_altitude = Some(self.min_altitude.map_or(altitude, |m| m.min(altitude)));
        self.max_speed = Some(self.max_speed.map_or(speed, |m| m.max(speed)));

        // Track phase transitions
        let changed = self
            .phase_times
            .last()
            .map_or(true, |(last_phase, _)| *last_phase != record.phase);
        if changed {
            self.phase_times.push((record.phase, record.elapsed_time));
        }

        self.log.push(record);
    }

    pub fn summary(&self) -> TelemetrySummary {
        TelemetrySummary {
            max_altitude: self.max_altitude,
            min_altitude: self.min_altitude,
            max_speed: self.max_speed,
            phase_times: self.phase_times.clone(),
            circularized_at: self
                .phase_times
                .iter()
                .find(|(phase, _)| *phase == "Circularized")
                .map(|(_, time)| *time),
        }
    }

    /// Prints every `every`-th record followed by the flight summary.
    pub fn display_data(&self, every: usize) {
        println!("--- Telemetry Data ---");
        for record in self.log.iter().step_by(every.max(1)) {
            println!(
                "t = {:>10} | altitude {:>10} | speed {:>8.1} m/s | energy {:>7.2} MJ/kg | {}",
                Self::format_time(record.elapsed_time),
                Self::format_altitude(record.altitude),
                record.speed,
                record.energy / 1e6,
                record.phase
            );
        }
        println!("--- End of Telemetry ---");

        let summary = self.summary();
        println!("\n--- Flight Summary ---");
        match (summary.max_altitude, summary.min_altitude, summary.max_speed) {
            (Some(max_altitude), Some(min_altitude), Some(max_speed)) => {
                println!("Max Altitude: {}", Self::format_altitude(max_altitude));
                println!("Min Altitude: {}", Self::format_altitude(min_altitude));
                println!("Max Speed: {:.1} m/s", max_speed);
            }
            _ => println!("No records collected"),
        }

        println!("\n--- Phase Transitions ---");
        for (phase, time) in &summary.phase_times {
            println!("{} reached at: {}", phase, Self::format_time(*time));
        }
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Telemetry::new()
    }
}
