//! Summary rows and type legend shown beside the graph.

use super::payload::{NodeType, Stats};
use super::visual::{color_of, type_label};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatRow {
	pub label: &'static str,
	pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendEntry {
	pub node_type: NodeType,
	pub label: String,
	pub color: &'static str,
	pub count: u64,
}

/// Display-ready statistics. Optional rows are omitted rather than shown
/// as zero or empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatsSummary {
	pub rows: Vec<StatRow>,
	pub legend: Vec<LegendEntry>,
}

impl StatsSummary {
	pub fn from_stats(stats: &Stats) -> Self {
		let mut rows = vec![
			StatRow {
				label: "Total Nodes",
				value: stats.total_nodes.to_string(),
			},
			StatRow {
				label: "Total Edges",
				value: stats.total_edges.to_string(),
			},
		];

		if let Some(phases) = stats.phases.as_ref().filter(|p| !p.is_empty()) {
			let value = phases
				.iter()
				.map(ToString::to_string)
				.collect::<Vec<_>>()
				.join(", ");
			rows.push(StatRow {
				label: "Phases",
				value,
			});
		}
		if let Some(count) = stats.decision_points.filter(|&n| n > 0) {
			rows.push(StatRow {
				label: "Decision Points",
				value: count.to_string(),
			});
		}
		if let Some(count) = stats.loops.filter(|&n| n > 0) {
			rows.push(StatRow {
				label: "Loops",
				value: count.to_string(),
			});
		}

		let mut legend: Vec<LegendEntry> = stats
			.node_types
			.iter()
			.filter(|&(_, &count)| count > 0)
			.map(|(raw, &count)| {
				let node_type = NodeType::from(raw.as_str());
				LegendEntry {
					label: type_label(&node_type).to_owned(),
					color: color_of(&node_type),
					node_type,
					count,
				}
			})
			.collect();
		// node_types iterates by name, so the stable sort keeps unknowns alphabetical.
		legend.sort_by_key(|entry| entry.node_type.rank());

		Self { rows, legend }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::payload::Phase;

	fn labels(summary: &StatsSummary) -> Vec<&'static str> {
		summary.rows.iter().map(|r| r.label).collect()
	}

	#[test]
	fn test_scenario_counts_and_legend() {
		let stats: Stats = serde_json::from_str(
			r#"{"total_nodes": 2, "total_edges": 1, "node_types": {"action": 1, "success": 1}}"#,
		)
		.expect("stats should parse");
		let summary = StatsSummary::from_stats(&stats);

		assert_eq!(
			summary.rows,
			vec![
				StatRow {
					label: "Total Nodes",
					value: "2".into()
				},
				StatRow {
					label: "Total Edges",
					value: "1".into()
				},
			]
		);
		assert_eq!(summary.legend.len(), 2);
		assert_eq!(summary.legend[0].label, "Action");
		assert_eq!(summary.legend[0].color, "#06b6d4");
		assert_eq!(summary.legend[1].label, "Success");
		assert_eq!(summary.legend[1].color, "#10b981");
	}

	#[test]
	fn test_suppresses_empty_optional_rows() {
		let stats = Stats {
			total_nodes: 3,
			total_edges: 2,
			phases: Some(vec![]),
			decision_points: Some(0),
			loops: Some(0),
			..Default::default()
		};
		assert_eq!(labels(&StatsSummary::from_stats(&stats)), ["Total Nodes", "Total Edges"]);
	}

	#[test]
	fn test_shows_present_optional_rows() {
		let stats = Stats {
			phases: Some(vec![
				Phase::Number(1.into()),
				Phase::Text("deploy".into()),
			]),
			decision_points: Some(2),
			loops: Some(1),
			..Default::default()
		};
		let summary = StatsSummary::from_stats(&stats);
		assert_eq!(
			labels(&summary),
			["Total Nodes", "Total Edges", "Phases", "Decision Points", "Loops"]
		);
		assert_eq!(summary.rows[2].value, "1, deploy");
		assert_eq!(summary.rows[3].value, "2");
	}

	#[test]
	fn test_legend_skips_zero_counts_and_orders_unknowns_last() {
		let stats: Stats = serde_json::from_str(
			r#"{"node_types": {"zeta": 1, "failure": 2, "alpha": 4, "decision": 0, "action": 3}}"#,
		)
		.expect("stats should parse");
		let legend = StatsSummary::from_stats(&stats).legend;

		let shown: Vec<_> = legend.iter().map(|e| (e.label.as_str(), e.count)).collect();
		assert_eq!(shown, [("Action", 3), ("Failure", 2), ("alpha", 4), ("zeta", 1)]);
		assert_eq!(legend[2].color, crate::graph::visual::FALLBACK_COLOR);
	}
}
