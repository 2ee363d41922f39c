//! Fleet-level orchestration: aggregates, scoring and ranking in one pass.
//!
//! ```ignore
//! use vitals_fleet::{FleetSnapshot, VitalityPipeline};
//!
//! let snapshot = FleetSnapshot::load("fleet.json")?;
//! let report = VitalityPipeline::default().run(snapshot.nodes, true);
//! ```

mod aggregates;
mod pipeline;
mod snapshot;

pub use aggregates::{FleetAggregator, consensus_version, median, sorted_distinct_versions};
pub use pipeline::{FleetReport, VitalityPipeline};
pub use snapshot::{FleetSnapshot, SnapshotError};
