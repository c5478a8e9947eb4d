//! Graph data as received from the service and the views derived from it.

mod payload;
mod selection;
mod stats;
mod visual;

pub use payload::{EdgeSpec, GraphCatalogue, GraphFile, GraphPayload};
pub use selection::{NodeDetail, Selection, SelectionEvent};
pub use stats::StatsSummary;
pub use visual::{VisualModel, edge_label};
