//! Form rendering module
//!
//! - `field_renderer`: per-control rendering
//! - `intake_form`: the intake page layout

mod field_renderer;
mod intake_form;

pub use intake_form::draw_intake_form;
