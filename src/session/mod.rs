pub mod controller;
pub mod state;

pub use controller::RunController;
pub use state::{RunSession, RunSnapshot, RunStatus};
