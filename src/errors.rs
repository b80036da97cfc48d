use thiserror::Error;

use crate::maneuver::planner::BurnKind;

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Degenerate state: {0}")]
    DegenerateState(String),

    #[error("{0} burn has already been applied")]
    DoubleBurn(BurnKind),

    #[error("{0} burn requested out of sequence")]
    BurnOutOfSequence(BurnKind),
}
