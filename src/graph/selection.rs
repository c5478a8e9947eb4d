//! Single-node selection and the detail view derived from it.

use log::debug;

use super::payload::{EdgeSpec, NodeSpec};
use super::visual::{VisualModel, type_label};
use crate::error::LookupError;

/// What happened on the rendering surface or around it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
	/// A node was clicked.
	NodeClick(String),
	/// Empty canvas was clicked.
	BackgroundClick,
	/// The user dismissed the detail panel.
	Clear,
	/// A new graph replaced the current one.
	GraphLoaded,
}

/// The currently selected node, if any. At most one node is selected.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Selection {
	#[default]
	Empty,
	Selected(NodeSpec),
}

impl Selection {
	/// Apply `event` against the current visual model.
	///
	/// A click on an id the model does not contain leaves the selection
	/// untouched and reports a [`LookupError`].
	pub fn apply(
		&mut self,
		event: SelectionEvent,
		model: Option<&VisualModel>,
	) -> Result<(), LookupError> {
		let next = match event {
			SelectionEvent::NodeClick(id) => {
				let node = model
					.and_then(|m| m.node(&id))
					.ok_or(LookupError::UnknownNode(id))?;
				Selection::Selected(node.source.clone())
			}
			SelectionEvent::BackgroundClick
			| SelectionEvent::Clear
			| SelectionEvent::GraphLoaded => Selection::Empty,
		};
		debug!("selection: {:?} -> {:?}", self.node_id(), next.node_id());
		*self = next;
		Ok(())
	}

	pub fn node(&self) -> Option<&NodeSpec> {
		match self {
			Self::Empty => None,
			Self::Selected(node) => Some(node),
		}
	}

	pub fn node_id(&self) -> Option<&str> {
		self.node().map(|node| node.id.as_str())
	}
}

/// Field dump of a selected node plus its connectivity in the current graph.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDetail {
	/// `(label, value)` rows in display order; absent fields are skipped.
	pub fields: Vec<(&'static str, String)>,
	/// Pretty-printed properties, when the node has any.
	pub properties: Option<String>,
	pub incoming: Vec<EdgeSpec>,
	pub outgoing: Vec<EdgeSpec>,
}

impl NodeDetail {
	pub fn collect(node: &NodeSpec, edges: &[EdgeSpec]) -> Self {
		let mut fields = vec![("ID", node.id.clone())];
		if let Some(label) = &node.label {
			fields.push(("Label", label.clone()));
		}
		fields.push((
			"Type",
			format!("{} ({})", type_label(&node.node_type), node.node_type),
		));
		if let Some(phase) = &node.phase {
			fields.push(("Phase", phase.to_string()));
		}
		if let Some(tool) = &node.tool {
			fields.push(("Tool", tool.clone()));
		}

		let properties = node
			.properties
			.as_ref()
			.filter(|props| !props.is_empty())
			.and_then(|props| serde_json::to_string_pretty(props).ok());

		let incoming = edges.iter().filter(|e| e.to == node.id).cloned().collect();
		let outgoing = edges.iter().filter(|e| e.from == node.id).cloned().collect();

		Self {
			fields,
			properties,
			incoming,
			outgoing,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::payload::GraphPayload;

	fn model() -> VisualModel {
		let payload: GraphPayload = serde_json::from_str(
			r#"{"nodes": [{"id": "a", "type": "action"}, {"id": "b", "type": "decision"}]}"#,
		)
		.expect("payload should parse");
		VisualModel::build(&payload)
	}

	#[test]
	fn test_starts_empty() {
		assert_eq!(Selection::default(), Selection::Empty);
	}

	#[test]
	fn test_click_sequence_ends_on_last_click() {
		let model = model();
		let mut selection = Selection::default();

		selection
			.apply(SelectionEvent::NodeClick("a".into()), Some(&model))
			.expect("a exists");
		assert_eq!(selection.node_id(), Some("a"));

		selection
			.apply(SelectionEvent::NodeClick("b".into()), Some(&model))
			.expect("b exists");
		assert_eq!(selection.node_id(), Some("b"));

		selection
			.apply(SelectionEvent::BackgroundClick, Some(&model))
			.expect("background clicks always apply");
		assert_eq!(selection, Selection::Empty);

		selection
			.apply(SelectionEvent::NodeClick("a".into()), Some(&model))
			.expect("a exists");
		let node = selection.node().expect("a is selected");
		assert_eq!(node.id, "a");
		assert_eq!(node, &model.nodes[0].source);
	}

	#[test]
	fn test_clear_and_new_graph_empty_the_selection() {
		let model = model();
		let mut selection = Selection::default();
		for event in [SelectionEvent::Clear, SelectionEvent::GraphLoaded] {
			selection
				.apply(SelectionEvent::NodeClick("b".into()), Some(&model))
				.expect("b exists");
			selection.apply(event, None).expect("always applies");
			assert_eq!(selection, Selection::Empty);
		}
	}

	#[test]
	fn test_stale_click_is_a_noop() {
		let model = model();
		let mut selection = Selection::default();
		selection
			.apply(SelectionEvent::NodeClick("a".into()), Some(&model))
			.expect("a exists");

		let result = selection.apply(SelectionEvent::NodeClick("gone".into()), Some(&model));
		assert_eq!(result, Err(LookupError::UnknownNode("gone".into())));
		assert_eq!(selection.node_id(), Some("a"));

		let result = selection.apply(SelectionEvent::NodeClick("a".into()), None);
		assert!(result.is_err());
		assert_eq!(selection.node_id(), Some("a"));
	}

	#[test]
	fn test_detail_lists_fields_and_connectivity() {
		let payload: GraphPayload = serde_json::from_str(
			r#"{
				"nodes": [{"id": "check", "label": "Check", "type": "verification", "phase": 2, "tool": "pytest", "properties": {"strict": true}}],
				"edges": [
					{"from": "build", "to": "check", "order": 1},
					{"from": "check", "to": "ship", "condition": "passed"},
					{"from": "check", "to": "fix", "condition": "failed"},
					{"from": "build", "to": "lint"}
				]
			}"#,
		)
		.expect("payload should parse");
		let detail = NodeDetail::collect(&payload.nodes[0], &payload.edges);

		assert_eq!(
			detail.fields,
			vec![
				("ID", "check".to_string()),
				("Label", "Check".to_string()),
				("Type", "Verification (verification)".to_string()),
				("Phase", "2".to_string()),
				("Tool", "pytest".to_string()),
			]
		);
		assert!(detail.properties.as_deref().is_some_and(|p| p.contains("\"strict\": true")));
		assert_eq!(detail.incoming.len(), 1);
		assert_eq!(detail.outgoing.len(), 2);
		assert_eq!(detail.outgoing[1].to, "fix");
	}

	#[test]
	fn test_detail_skips_absent_fields() {
		let node: NodeSpec = serde_json::from_str(r#"{"id": "x", "type": "odd", "properties": {}}"#)
			.expect("node should parse");
		let detail = NodeDetail::collect(&node, &[]);
		assert_eq!(
			detail.fields,
			vec![("ID", "x".to_string()), ("Type", "odd (odd)".to_string())]
		);
		assert_eq!(detail.properties, None);
		assert!(detail.incoming.is_empty() && detail.outgoing.is_empty());
	}
}
