pub mod launch;
pub mod orbit_spec;
