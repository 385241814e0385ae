pub mod controller;
pub mod loop_worker;

pub use controller::{SessionController, SessionStatus};
pub use loop_worker::sampling_loop;
