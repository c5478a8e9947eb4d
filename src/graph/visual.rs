//! Projection of a [`GraphPayload`] into what the canvas draws.

use std::collections::HashMap;

use super::payload::{EdgeSpec, GraphPayload, NodeSpec, NodeType};

/// Color for node types the view has no mapping for.
pub const FALLBACK_COLOR: &str = "#94a3b8";

/// Fixed fill color for a node type.
///
/// Pure function - always returns same color for same type.
pub fn color_of(node_type: &NodeType) -> &'static str {
	match node_type {
		NodeType::Action => "#06b6d4",
		NodeType::Decision => "#f59e0b",
		NodeType::Verification => "#8b5cf6",
		NodeType::Loop => "#ec4899",
		NodeType::Success => "#10b981",
		NodeType::Failure => "#ef4444",
		NodeType::Unknown(_) => FALLBACK_COLOR,
	}
}

/// Human readable name of a node type; unknown types show their raw string.
pub fn type_label(node_type: &NodeType) -> &str {
	match node_type {
		NodeType::Action => "Action",
		NodeType::Decision => "Decision",
		NodeType::Verification => "Verification",
		NodeType::Loop => "Loop",
		NodeType::Success => "Success",
		NodeType::Failure => "Failure",
		NodeType::Unknown(raw) => raw,
	}
}

/// Text drawn next to an edge.
///
/// A non-empty condition wins; otherwise a non-zero order is shown as
/// `order:<n>`. Order `0` is the default for unordered edges and is hidden.
pub fn edge_label(edge: &EdgeSpec) -> String {
	match (edge.condition.as_deref(), edge.order) {
		(Some(condition), _) if !condition.is_empty() => condition.to_owned(),
		(_, Some(order)) if order != 0 => format!("order:{order}"),
		_ => String::new(),
	}
}

/// Tooltip shown when hovering a node.
pub fn tooltip(node: &NodeSpec) -> String {
	format!("{}\nType: {}", node.id, node.node_type)
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisualNode {
	pub id: String,
	pub display_label: String,
	pub tooltip: String,
	pub color: &'static str,
	pub source: NodeSpec,
}

/// A drawable edge. `id` is the position in the payload's edge list and is
/// only meaningful until the next load.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualEdge {
	pub id: usize,
	pub from: String,
	pub to: String,
	pub display_label: String,
}

/// Nodes and edges ready to hand to the layout engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisualModel {
	pub nodes: Vec<VisualNode>,
	pub edges: Vec<VisualEdge>,
	by_id: HashMap<String, usize>,
}

impl VisualModel {
	/// Build the visual model for `payload`, preserving input order.
	pub fn build(payload: &GraphPayload) -> Self {
		let nodes: Vec<VisualNode> = payload
			.nodes
			.iter()
			.map(|node| VisualNode {
				id: node.id.clone(),
				display_label: node.label.clone().unwrap_or_else(|| node.id.clone()),
				tooltip: tooltip(node),
				color: color_of(&node.node_type),
				source: node.clone(),
			})
			.collect();

		let edges = payload
			.edges
			.iter()
			.enumerate()
			.map(|(id, edge)| VisualEdge {
				id,
				from: edge.from.clone(),
				to: edge.to.clone(),
				display_label: edge_label(edge),
			})
			.collect();

		// Ids are not validated upstream; the first occurrence wins lookups.
		let mut by_id = HashMap::with_capacity(nodes.len());
		for (idx, node) in nodes.iter().enumerate() {
			by_id.entry(node.id.clone()).or_insert(idx);
		}

		Self {
			nodes,
			edges,
			by_id,
		}
	}

	pub fn node(&self, id: &str) -> Option<&VisualNode> {
		self.by_id.get(id).and_then(|&idx| self.nodes.get(idx))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn edge(condition: Option<&str>, order: Option<i64>) -> EdgeSpec {
		EdgeSpec {
			from: "a".into(),
			to: "b".into(),
			condition: condition.map(Into::into),
			order,
		}
	}

	fn sample_payload() -> GraphPayload {
		serde_json::from_str(
			r#"{
				"nodes": [{"id": "n1", "type": "action"}, {"id": "n2", "label": "Done", "type": "success"}],
				"edges": [{"from": "n1", "to": "n2", "order": 1}],
				"stats": {"total_nodes": 2, "total_edges": 1, "node_types": {"action": 1, "success": 1}}
			}"#,
		)
		.expect("sample payload should parse")
	}

	#[test]
	fn test_edge_label_precedence() {
		assert_eq!(edge_label(&edge(Some("x"), Some(5))), "x");
		assert_eq!(edge_label(&edge(None, Some(5))), "order:5");
		assert_eq!(edge_label(&edge(None, Some(0))), "");
		assert_eq!(edge_label(&edge(None, None)), "");
		assert_eq!(edge_label(&edge(Some(""), Some(3))), "order:3");
		assert_eq!(edge_label(&edge(None, Some(-2))), "order:-2");
	}

	#[test]
	fn test_color_of_is_fixed_and_total() {
		assert_eq!(color_of(&NodeType::Decision), color_of(&NodeType::Decision));
		assert_eq!(color_of(&NodeType::from("unknown-type")), FALLBACK_COLOR);
		for known in NodeType::KNOWN.iter() {
			assert_ne!(color_of(known), FALLBACK_COLOR);
		}
	}

	#[test]
	fn test_type_label_falls_back_to_raw() {
		assert_eq!(type_label(&NodeType::Verification), "Verification");
		assert_eq!(type_label(&NodeType::from("gate")), "gate");
	}

	#[test]
	fn test_build_scenario() {
		let model = VisualModel::build(&sample_payload());

		assert_eq!(model.nodes.len(), 2);
		assert_eq!(model.nodes[0].color, "#06b6d4");
		assert_eq!(model.nodes[1].color, "#10b981");
		assert_eq!(model.nodes[0].display_label, "n1");
		assert_eq!(model.nodes[1].display_label, "Done");
		assert_eq!(model.nodes[0].tooltip, "n1\nType: action");

		assert_eq!(model.edges.len(), 1);
		assert_eq!(model.edges[0].id, 0);
		assert_eq!(model.edges[0].display_label, "order:1");
	}

	#[test]
	fn test_build_preserves_order_and_counts() {
		let payload: GraphPayload = serde_json::from_str(
			r#"{
				"nodes": [{"id": "c"}, {"id": "a"}, {"id": "b", "type": "mystery"}],
				"edges": [
					{"from": "c", "to": "a", "condition": "ok"},
					{"from": "a", "to": "b"},
					{"from": "a", "to": "b", "order": 2}
				]
			}"#,
		)
		.expect("payload should parse");
		let model = VisualModel::build(&payload);

		let ids: Vec<_> = model.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["c", "a", "b"]);
		let edge_ids: Vec<_> = model.edges.iter().map(|e| e.id).collect();
		assert_eq!(edge_ids, [0, 1, 2]);
		assert_eq!(model.nodes[2].color, FALLBACK_COLOR);
		assert_eq!(model.nodes[2].tooltip, "b\nType: mystery");
	}

	#[test]
	fn test_lookup_by_id() {
		let model = VisualModel::build(&sample_payload());
		assert_eq!(
			model.node("n2").map(|n| n.source.label.as_deref()),
			Some(Some("Done"))
		);
		assert!(model.node("missing").is_none());
	}

	#[test]
	fn test_empty_payload_builds_empty_model() {
		let model = VisualModel::build(&GraphPayload::default());
		assert!(model.nodes.is_empty());
		assert!(model.edges.is_empty());
	}
}
