//! Wire shapes returned by the graph service.
//!
//! Everything here is read-only once deserialized; the view never mutates a
//! payload, it replaces it.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Number, Value};

/// Semantic role of a node in a state/decision graph.
///
/// Values outside the known set are kept verbatim in [`NodeType::Unknown`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum NodeType {
	/// A step that performs work. The service tags untyped nodes as actions.
	#[default]
	Action,
	/// A branching point.
	Decision,
	/// A check on the outcome of previous steps.
	Verification,
	/// A step that repeats part of the graph.
	Loop,
	/// Terminal success state.
	Success,
	/// Terminal failure state.
	Failure,
	/// Any type string the view has no mapping for.
	Unknown(String),
}

impl NodeType {
	/// Every known type, in legend order.
	pub const KNOWN: [NodeType; 6] = [
		NodeType::Action,
		NodeType::Decision,
		NodeType::Verification,
		NodeType::Loop,
		NodeType::Success,
		NodeType::Failure,
	];

	/// The wire spelling of this type.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Action => "action",
			Self::Decision => "decision",
			Self::Verification => "verification",
			Self::Loop => "loop",
			Self::Success => "success",
			Self::Failure => "failure",
			Self::Unknown(raw) => raw,
		}
	}

	/// Position in legend order; unknown types sort after every known one.
	pub fn rank(&self) -> usize {
		Self::KNOWN
			.iter()
			.position(|known| known == self)
			.unwrap_or(Self::KNOWN.len())
	}
}

impl From<String> for NodeType {
	fn from(raw: String) -> Self {
		match raw.as_str() {
			"action" => Self::Action,
			"decision" => Self::Decision,
			"verification" => Self::Verification,
			"loop" => Self::Loop,
			"success" => Self::Success,
			"failure" => Self::Failure,
			_ => Self::Unknown(raw),
		}
	}
}

impl From<&str> for NodeType {
	fn from(raw: &str) -> Self {
		Self::from(raw.to_owned())
	}
}

impl fmt::Display for NodeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A phase marker; graphs use both numbered and named phases.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Phase {
	/// Numbered phase, e.g. `2`.
	Number(Number),
	/// Named phase, e.g. `"setup"`.
	Text(String),
}

impl fmt::Display for Phase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Number(n) => write!(f, "{n}"),
			Self::Text(s) => f.write_str(s),
		}
	}
}

/// One node as described by the service.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NodeSpec {
	pub id: String,
	#[serde(default)]
	pub label: Option<String>,
	#[serde(rename = "type", default)]
	pub node_type: NodeType,
	#[serde(default)]
	pub phase: Option<Phase>,
	#[serde(default)]
	pub tool: Option<String>,
	#[serde(default)]
	pub properties: Option<Map<String, Value>>,
}

/// One directed edge as described by the service.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EdgeSpec {
	pub from: String,
	pub to: String,
	#[serde(default)]
	pub condition: Option<String>,
	#[serde(default)]
	pub order: Option<i64>,
}

/// Aggregate counts computed by the service.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Stats {
	#[serde(default)]
	pub total_nodes: u64,
	#[serde(default)]
	pub total_edges: u64,
	#[serde(default)]
	pub node_types: BTreeMap<String, u64>,
	#[serde(default)]
	pub phases: Option<Vec<Phase>>,
	#[serde(default)]
	pub decision_points: Option<u64>,
	#[serde(default)]
	pub loops: Option<u64>,
}

/// A complete graph response: nodes, edges and their statistics.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphPayload {
	#[serde(default)]
	pub graph_id: Option<String>,
	/// Set when the graph came from an uploaded file.
	#[serde(default)]
	pub filename: Option<String>,
	#[serde(default)]
	pub nodes: Vec<NodeSpec>,
	#[serde(default)]
	pub edges: Vec<EdgeSpec>,
	#[serde(default)]
	pub stats: Stats,
}

impl GraphPayload {
	/// Human name for status lines: graph id, then filename, then `fallback`.
	pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
		let present = |name: &'a Option<String>| name.as_deref().filter(|n| !n.is_empty());
		present(&self.graph_id)
			.or_else(|| present(&self.filename))
			.unwrap_or(fallback)
	}
}

/// A graph file the service can serve by name.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GraphFile {
	pub name: String,
	#[serde(default)]
	pub path: String,
	#[serde(default)]
	pub format: String,
}

/// Response of the graph catalogue endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphCatalogue {
	#[serde(default)]
	pub graphs: Vec<GraphFile>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_node_type_parses_known_and_unknown() {
		assert_eq!(NodeType::from("decision"), NodeType::Decision);
		assert_eq!(
			NodeType::from("checkpoint"),
			NodeType::Unknown("checkpoint".into())
		);
		assert_eq!(NodeType::from("checkpoint").as_str(), "checkpoint");
	}

	#[test]
	fn test_rank_orders_unknown_last() {
		assert_eq!(NodeType::Action.rank(), 0);
		assert_eq!(NodeType::Failure.rank(), 5);
		assert_eq!(NodeType::Unknown("x".into()).rank(), 6);
	}

	#[test]
	fn test_payload_deserializes_service_response() {
		let payload: GraphPayload = serde_json::from_str(
			r#"{
				"graph_id": "deploy",
				"nodes": [
					{"id": "n1", "label": "Build", "type": "action", "phase": 1, "tool": "make", "properties": {"retries": 2}},
					{"id": "n2", "type": "gate", "phase": "release", "properties": null}
				],
				"edges": [{"from": "n1", "to": "n2", "order": 0, "condition": null}],
				"stats": {"total_nodes": 2, "total_edges": 1, "node_types": {"action": 1, "gate": 1}, "phases": [1, "release"], "decision_points": 0, "loops": 0}
			}"#,
		)
		.expect("payload should parse");

		assert_eq!(payload.nodes.len(), 2);
		assert_eq!(payload.nodes[0].label.as_deref(), Some("Build"));
		assert_eq!(payload.nodes[0].phase.as_ref().map(|p| p.to_string()), Some("1".into()));
		assert_eq!(payload.nodes[1].node_type, NodeType::Unknown("gate".into()));
		assert_eq!(payload.nodes[1].phase, Some(Phase::Text("release".into())));
		assert!(payload.nodes[1].properties.is_none());
		assert_eq!(payload.edges[0].order, Some(0));
		assert_eq!(payload.edges[0].condition, None);
		assert_eq!(payload.stats.node_types.get("gate"), Some(&1));
		assert_eq!(payload.display_name("fallback"), "deploy");
	}

	#[test]
	fn test_missing_type_defaults_to_action() {
		let node: NodeSpec = serde_json::from_str(r#"{"id": "bare"}"#).expect("node should parse");
		assert_eq!(node.node_type, NodeType::Action);
		assert_eq!(node.label, None);
	}

	#[test]
	fn test_display_name_falls_back() {
		let mut payload = GraphPayload {
			filename: Some("flow.yaml".into()),
			..Default::default()
		};
		assert_eq!(payload.display_name("requested"), "flow.yaml");
		payload.filename = None;
		assert_eq!(payload.display_name("requested"), "requested");
	}

	#[test]
	fn test_empty_graph_id_defers_to_filename() {
		let mut payload = GraphPayload {
			graph_id: Some(String::new()),
			filename: Some("flow.yaml".into()),
			..Default::default()
		};
		assert_eq!(payload.display_name("requested"), "flow.yaml");
		payload.filename = Some(String::new());
		assert_eq!(payload.display_name("requested"), "requested");
	}
}
