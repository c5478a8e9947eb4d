//! UI components: the graph canvas and the panels around it.

mod detail_panel;
mod force_graph;
mod graph_picker;
mod stats_panel;

pub use detail_panel::DetailPanel;
pub use force_graph::ForceGraphCanvas;
pub use graph_picker::GraphPicker;
pub use stats_panel::StatsPanel;
