pub mod orbits;
pub mod planner;
