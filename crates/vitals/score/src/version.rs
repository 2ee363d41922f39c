//! Version score by ordinal distance from the fleet consensus.

use vitals_version::{clean_version, compare_versions};

use crate::config::VersionDecay;

/// Scores node versions against a consensus version and the fleet's
/// distinct versions (newest first).
///
/// Built once per scoring pass; the consensus lookup is done up front.
#[derive(Debug, Clone)]
pub struct VersionRankScorer<'a> {
    consensus: String,
    consensus_index: Option<usize>,
    sorted_versions: &'a [String],
    decay: &'a VersionDecay,
}

impl<'a> VersionRankScorer<'a> {
    pub fn new(consensus: &str, sorted_versions: &'a [String], decay: &'a VersionDecay) -> Self {
        let consensus = clean_version(consensus);
        // A consensus absent from the list leaves no origin to measure distance
        // from, so every version behind it scores 0 rather than decaying from a
        // virtual position before the head of the list.
        let consensus_index = sorted_versions.iter().position(|v| *v == consensus);
        Self {
            consensus,
            consensus_index,
            sorted_versions,
            decay,
        }
    }

    /// The cleaned consensus version.
    pub fn consensus(&self) -> &str {
        &self.consensus
    }

    /// Score in `[0, 100]` for a raw node version.
    ///
    /// At or ahead of consensus scores 100. Behind it, the score comes from the
    /// decay table by how many distinct fleet versions separate the two. A
    /// version missing from the fleet list (or a consensus missing from it)
    /// cannot be placed and scores 0.
    pub fn score(&self, version: Option<&str>) -> u8 {
        let cleaned = clean_version(version);
        if compare_versions(cleaned.as_str(), self.consensus.as_str()).is_ge() {
            return 100;
        }

        let Some(consensus_index) = self.consensus_index else {
            return 0;
        };
        let Some(node_index) = self.sorted_versions.iter().position(|v| *v == cleaned) else {
            return 0;
        };

        match node_index.checked_sub(consensus_index) {
            Some(distance) if distance > 0 => self.decay.score_at(distance),
            // the list disagrees with the comparator
            _ => 0,
        }
    }
}

/// One-shot version score with the reference decay table.
pub fn version_score_by_rank(
    version: Option<&str>,
    consensus: &str,
    sorted_versions: &[String],
) -> u8 {
    let decay = VersionDecay::reference();
    VersionRankScorer::new(consensus, sorted_versions, &decay).score(version)
}
