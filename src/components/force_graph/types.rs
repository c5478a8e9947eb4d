/// Per-node data carried through the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub tooltip: String,
	pub color: &'static str,
}

/// Per-edge data carried through the simulation.
#[derive(Clone, Debug, Default)]
pub struct EdgeInfo {
	pub label: String,
}

/// Domain events translated from raw pointer input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineEvent {
	NodeClick(String),
	BackgroundClick,
}
