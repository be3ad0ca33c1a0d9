//! From spatial control data to musical targets.
//!
//! `table` builds the fixed partitions and target tables; `mapper` runs once
//! per control update and turns the selected targets into lerp requests.

/// Control-frame handling.
pub mod mapper;
/// Partitions, pitch tables and axis lookup.
pub mod table;

pub use mapper::{ParameterMapper, UpdateOutcome};
pub use table::{build_linear_table, build_pitch_table, map_axis_to_index, PartitionTable};
