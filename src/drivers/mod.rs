//! Output drivers and task placement helpers.

pub mod indicator;
pub mod task_pin;
