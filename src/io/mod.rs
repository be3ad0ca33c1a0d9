// Purpose - external interfaces: control devices feeding the mapper

pub mod control;
pub mod sweep;

pub use control::{wait_for_connection, ControlFrame, ControlSource, Hand, Handedness};
pub use sweep::SweepSource;
