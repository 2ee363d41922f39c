//! End-to-end runs of the vitality pipeline over JSON fixtures.

use std::io::Write;

use proptest::prelude::*;
use serde_json::{Value, json};
use vitals_fleet::{FleetAggregator, FleetReport, FleetSnapshot, VitalityPipeline};
use vitals_primitives::{Network, NodeSnapshot, ScoreBreakdown};
use vitals_rank::{AnnotatedNode, ClusterStats};
use vitals_score::{ScoreConfig, VersionDecay};

const DAY: u64 = 86_400;

fn fixture() -> Value {
    json!([
        {
            "pubkey": "alpha",
            "network": "MAINNET",
            "version": "1.5.0",
            "uptimeSeconds": 120 * DAY,
            "storageCommittedBytes": 5000,
            "storageUsedBytes": 2000,
            "credits": 10000,
            "isPublic": true
        },
        {
            "pubkey": "beta",
            "network": "mainnet",
            "version": "1.4.0-trynet",
            "uptimeSeconds": 120 * DAY,
            "storageCommittedBytes": "1000",
            "credits": 5000
        },
        {
            "pubkey": "gamma",
            "network": "DEVNET",
            "version": "v1.5.0",
            "uptimeSeconds": DAY / 2,
            "storageCommittedBytes": 1000,
            "storageUsedBytes": 500,
            "credits": null
        },
        {
            "pubkey": "delta",
            "network": "MAINNET",
            "version": "1.5.0",
            "uptimeSeconds": 300 * DAY,
            "storageCommittedBytes": 0,
            "credits": 20000
        },
        {
            "pubkey": "   ",
            "network": "DEVNET",
            "storageCommittedBytes": 3000,
            "credits": 1
        },
        {
            "pubkey": "alpha",
            "network": "DEVNET",
            "version": "1.5.0-beta",
            "uptimeSeconds": 10 * DAY,
            "storageCommittedBytes": 5000,
            "credits": 10000
        }
    ])
}

fn snapshots() -> Vec<NodeSnapshot> {
    serde_json::from_value(fixture()).unwrap()
}

fn find<'a>(report: &'a FleetReport, pubkey: &str, network: Network) -> &'a AnnotatedNode {
    report
        .nodes
        .iter()
        .find(|n| n.scored.identity() == Some(pubkey) && n.scored.node.network == network)
        .unwrap()
}

#[test]
fn aggregates_from_fixture() {
    let report = VitalityPipeline::default().run(snapshots(), true);
    let aggregates = &report.aggregates;

    assert_eq!(aggregates.median_storage_committed, 3000.0);
    assert_eq!(aggregates.median_credits, 10000.0);
    assert_eq!(aggregates.consensus_version, "1.5.0");
    assert_eq!(aggregates.sorted_distinct_versions, ["1.5.0", "1.4.0"]);
    assert!(aggregates.is_credits_source_online);
}

#[test]
fn scores_and_ranks_fixture() {
    let report = VitalityPipeline::default().run(snapshots(), true);
    assert_eq!(report.nodes.len(), 6);

    let delta = find(&report, "delta", Network::Mainnet);
    assert_eq!(delta.scored.vitality.health_breakdown, ScoreBreakdown::ZERO);
    assert_eq!(delta.storage_usage_percent, "0%");

    let beta = find(&report, "beta", Network::Mainnet);
    assert_eq!(beta.scored.vitality.health_breakdown.version, 90);
    assert_eq!(beta.scored.vitality.health_breakdown.reputation, Some(25));

    let gamma = find(&report, "gamma", Network::Devnet);
    assert!(gamma.scored.vitality.health_breakdown.uptime <= 20);
    assert_eq!(gamma.scored.vitality.health_breakdown.reputation, Some(0));
    assert_eq!(gamma.storage_usage_percent, "50.00%");

    // credits lead, so the zero-health whale still tops mainnet
    assert_eq!(delta.rank, 1);
    assert_eq!(find(&report, "alpha", Network::Mainnet).rank, 2);
    assert_eq!(beta.rank, 3);

    assert_eq!(find(&report, "alpha", Network::Devnet).rank, 1);
    assert_eq!(gamma.rank, 2);

    let anonymous = report.nodes.get(4).unwrap();
    assert_eq!(anonymous.scored.identity(), None);
    assert_eq!(anonymous.rank, 0);
    // no reported version: outside the fleet list, so no decay credit
    assert_eq!(anonymous.scored.vitality.health_breakdown.version, 0);
    assert_eq!(anonymous.cluster_stats, ClusterStats::default());

    let alpha = find(&report, "alpha", Network::Mainnet).cluster_stats;
    assert_eq!(
        alpha,
        ClusterStats {
            mainnet_count: 1,
            devnet_count: 1,
            total_global: 2,
        }
    );
}

#[test]
fn credits_source_offline() {
    let report = VitalityPipeline::default().run(snapshots(), false);

    let committed = report
        .nodes
        .iter()
        .filter(|n| n.scored.node.storage_committed_bytes > 0);
    for node in committed {
        let breakdown = node.scored.vitality.health_breakdown;
        assert_eq!(breakdown.reputation, None);
        assert!(breakdown.total > 0);
    }

    // the gatekeeper still reports a known zero
    let delta = find(&report, "delta", Network::Mainnet);
    assert_eq!(delta.scored.vitality.health_breakdown.reputation, Some(0));
}

#[test]
fn two_strikes_decay_table() {
    let config = ScoreConfig::default().with_version_decay(VersionDecay::two_strikes());
    let report = VitalityPipeline::new(config).run(snapshots(), true);

    let beta = find(&report, "beta", Network::Mainnet);
    assert_eq!(beta.scored.vitality.health_breakdown.version, 80);
}

#[test]
fn report_serializes_camel_case() {
    let report = VitalityPipeline::default().run(snapshots(), true);
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["aggregates"]["consensusVersion"], "1.5.0");
    assert_eq!(value["aggregates"]["isCreditsSourceOnline"], true);

    let first = &value["nodes"][0];
    assert_eq!(first["pubkey"], "alpha");
    assert_eq!(first["rank"], 2);
    assert_eq!(first["storageUsagePercent"], "40.00%");
    assert_eq!(first["clusterStats"]["totalGlobal"], 2);
    assert!(first["healthBreakdown"]["reputation"].is_number());
    assert_eq!(first["health"], first["healthBreakdown"]["total"]);
}

#[test]
fn loads_snapshot_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let wrapped = json!({ "nodes": fixture() });
    file.write_all(wrapped.to_string().as_bytes()).unwrap();

    let snapshot = FleetSnapshot::load(file.path()).unwrap();
    assert_eq!(snapshot.len(), 6);

    let from_file = VitalityPipeline::default().run(snapshot.nodes, true);
    let in_memory = VitalityPipeline::default().run(snapshots(), true);
    assert_eq!(from_file, in_memory);
}

#[test]
fn empty_fleet() {
    let report = VitalityPipeline::default().run(Vec::new(), true);
    assert!(report.nodes.is_empty());
    assert_eq!(report.aggregates.consensus_version, "0.0.0");
}

fn arb_node() -> impl Strategy<Value = NodeSnapshot> {
    (
        prop::option::of(prop::sample::select(vec!["a", "b", "c", "d"])),
        prop::sample::select(vec![Network::Mainnet, Network::Devnet, Network::Unknown]),
        prop::option::of(prop::sample::select(vec!["1.5.0", "1.4.2", "1.3.0-rc1", "junk"])),
        0u64..400 * DAY,
        0u64..10_000_000,
        0u64..10_000_000,
        prop::option::of(-10i64..100_000),
    )
        .prop_map(|(pubkey, network, version, uptime, committed, used, credits)| NodeSnapshot {
            pubkey: pubkey.map(String::from),
            network,
            version: version.map(String::from),
            uptime_seconds: uptime,
            storage_committed_bytes: committed,
            storage_used_bytes: used,
            credits,
            ..Default::default()
        })
}

fn arb_fleet() -> impl Strategy<Value = Vec<NodeSnapshot>> {
    prop::collection::vec(arb_node(), 0..60)
}

proptest! {
    #[test]
    fn parallel_equals_sequential(fleet in arb_fleet(), online in any::<bool>()) {
        let pipeline = VitalityPipeline::default();
        let aggregates = FleetAggregator::new()
            .with_credits_source_online(online)
            .aggregate(&fleet);

        prop_assert_eq!(
            pipeline.score(fleet.clone(), &aggregates),
            pipeline.score_sequential(fleet, &aggregates)
        );
    }

    #[test]
    fn runs_are_deterministic(fleet in arb_fleet()) {
        let pipeline = VitalityPipeline::default();
        prop_assert_eq!(pipeline.run(fleet.clone(), true), pipeline.run(fleet, true));
    }
}
