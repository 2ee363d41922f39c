//! Core data types shared by the vitals scoring and ranking crates.
//!
//! - [`NodeSnapshot`] - raw telemetry for one storage node, as reported upstream
//! - [`Network`] - the sub-network a node instance reports
//! - [`PenaltyAdjustment`] - optional anomaly penalties from an external detector
//! - [`ScoreBreakdown`] / [`ScoredNode`] - the output of a scoring pass
//! - [`FleetAggregates`] - fleet-wide values every per-node score reads

mod aggregates;
mod lenient;
mod network;
mod node;
mod vitality;

pub use aggregates::FleetAggregates;
pub use network::Network;
pub use node::{NodeSnapshot, PenaltyAdjustment};
pub use vitality::{ScoreBreakdown, ScoredNode, Vitality};

/// Bytes in one GiB, the unit of the storage utilization bonus.
pub const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Seconds in one day, the unit of the uptime curve.
pub const SECONDS_PER_DAY: f64 = 86_400.0;
