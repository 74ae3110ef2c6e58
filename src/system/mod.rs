//! System-level glue: logging and terminal control

pub mod logging;
pub mod terminal;

pub use logging::init_logging;
