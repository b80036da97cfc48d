pub mod events;
pub mod kinematics;
pub mod state;
pub mod trajectory;
