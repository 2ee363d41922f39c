//! Node vitality scoring.
//!
//! A vitality score folds four signals into one 0-100 number:
//!
//! - **Uptime**: sigmoid over days of uptime, capped for nodes under a day old
//! - **Storage**: logarithmic in committed capacity relative to the fleet median,
//!   plus a capped bonus for capacity that actually holds data
//! - **Version**: tiered decay by how many releases a node trails consensus
//! - **Reputation**: credits relative to the fleet median
//!
//! Nodes with no committed storage score zero across the board. When the
//! credits source is down the reputation dimension is dropped and the remaining
//! weights are re-normalized (see [`ReputationSignal`]).
//!
//! # Usage
//!
//! ```ignore
//! use vitals_score::{ScoreConfig, VitalityScorer};
//!
//! let config = ScoreConfig::default();
//! let scorer = VitalityScorer::new(&config, &aggregates);
//!
//! for node in &fleet {
//!     let vitality = scorer.score(node);
//!     println!("{:?} {}", node.pubkey, vitality.health);
//! }
//! ```

mod config;
mod curves;
mod signal;
mod version;
mod vitality;

pub use config::{
    ConfigError, PenaltyWeights, ScoreConfig, ScoreWeights, StorageCurve, UptimeCurve,
    VersionDecay, WeightSet,
};
pub use curves::{storage_score, uptime_curve, uptime_score};
pub use signal::ReputationSignal;
pub use version::{VersionRankScorer, version_score_by_rank};
pub use vitality::{VitalityScorer, score_node};
