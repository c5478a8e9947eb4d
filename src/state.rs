//! Application state for one graph view.
//!
//! All mutable view state lives in [`GraphView`]; the page keeps it in a
//! single signal and mutates it only through these methods.

use std::sync::Arc;

use log::{info, warn};

use crate::error::LoadError;
use crate::graph::{GraphPayload, NodeDetail, Selection, SelectionEvent, StatsSummary, VisualModel};
use crate::loader::LoadStatus;

/// A successfully loaded graph and everything derived from it.
#[derive(Debug)]
pub struct LoadedGraph {
	/// Increases with every successful load; identifies the graph instance.
	pub generation: u64,
	pub payload: GraphPayload,
	pub model: Arc<VisualModel>,
	pub summary: StatsSummary,
}

impl PartialEq for LoadedGraph {
	fn eq(&self, other: &Self) -> bool {
		self.generation == other.generation
	}
}

#[derive(Clone, Debug, Default)]
pub struct GraphView {
	graph: Option<Arc<LoadedGraph>>,
	selection: Selection,
	status: LoadStatus,
	generation: u64,
}

impl GraphView {
	pub fn graph(&self) -> Option<&Arc<LoadedGraph>> {
		self.graph.as_ref()
	}

	pub fn selection(&self) -> &Selection {
		&self.selection
	}

	pub fn status(&self) -> &LoadStatus {
		&self.status
	}

	/// Detail of the selected node within the current graph.
	pub fn detail(&self) -> Option<NodeDetail> {
		let node = self.selection.node()?;
		let edges = self.graph.as_ref().map_or(&[][..], |g| &g.payload.edges[..]);
		Some(NodeDetail::collect(node, edges))
	}

	/// Mark a load of `source` as in flight.
	pub fn begin_load(&mut self, source: &str) {
		self.status = LoadStatus::Loading(source.to_owned());
	}

	/// Apply the outcome of a load.
	///
	/// Loads are not sequenced: whichever response completes last replaces
	/// the graph. A failure only updates the status line.
	pub fn complete_load(&mut self, source: &str, result: Result<GraphPayload, LoadError>) {
		match result {
			Ok(payload) => {
				self.generation += 1;
				let model = Arc::new(VisualModel::build(&payload));
				let summary = StatsSummary::from_stats(&payload.stats);
				self.status = LoadStatus::Loaded {
					name: payload.display_name(source).to_owned(),
					nodes: model.nodes.len(),
					edges: model.edges.len(),
				};
				info!("showing {} (generation {})", source, self.generation);
				self.graph = Some(Arc::new(LoadedGraph {
					generation: self.generation,
					payload,
					model,
					summary,
				}));
				self.select(SelectionEvent::GraphLoaded);
			}
			Err(err) => {
				self.status = LoadStatus::Failed(err.to_string());
			}
		}
	}

	/// Feed a selection event through the selection state machine.
	pub fn select(&mut self, event: SelectionEvent) {
		let model = self.graph.as_ref().map(|g| g.model.as_ref());
		if let Err(err) = self.selection.apply(event, model) {
			warn!("ignoring click: {}", err);
		}
	}
}
