//! Application state module

mod app_state;
mod forms;
mod intake_session;

pub use app_state::*;
pub use forms::*;
pub use intake_session::*;
