//! Simulation and interaction state behind one canvas.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};

use super::options::LayoutOptions;
use super::types::{EdgeInfo, EngineEvent, NodeInfo};
use super::viewport::{Bounds, FIT_DURATION_SECS, FitAnimation, ViewTransform, fit_transform};
use crate::graph::VisualModel;

pub const NODE_RADIUS: f64 = 10.0;
pub const HIT_RADIUS: f64 = 16.0;
/// Pointer travel (screen px) below which a press/release counts as a click.
pub const CLICK_TOLERANCE: f64 = 4.0;
/// Simulation step used for stabilization and animation frames.
pub const FRAME_DT: f32 = 0.016;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

/// Where the pointer went down, to tell clicks from drags on release.
#[derive(Clone, Debug)]
struct Press {
	x: f64,
	y: f64,
	node: Option<DefaultNodeIdx>,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub selected: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	options: LayoutOptions,
	fit: Option<FitAnimation>,
	press: Option<Press>,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	pub fn new(model: &VisualModel, options: &LayoutOptions, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(options.physics.simulation_parameters());
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();
		let radius = options.physics.spring_length;

		for (i, node) in model.nodes.iter().enumerate() {
			if id_to_idx.contains_key(&node.id) {
				continue;
			}
			let angle = (i as f64) * 2.0 * PI / model.nodes.len() as f64;
			let idx = graph.add_node(NodeData {
				x: (radius * angle.cos()) as f32,
				y: (radius * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.display_label.clone(),
					tooltip: node.tooltip.clone(),
					color: node.color,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for edge in &model.edges {
			if let (Some(&src), Some(&tgt)) = (id_to_idx.get(&edge.from), id_to_idx.get(&edge.to)) {
				graph.add_edge(
					src,
					tgt,
					EdgeData {
						user_data: EdgeInfo {
							label: edge.display_label.clone(),
						},
					},
				);
				edges.push((src, tgt));
			}
		}

		let mut state = Self {
			graph,
			edges,
			id_to_idx,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			selected: None,
			width,
			height,
			flow_time: 0.0,
			options: options.clone(),
			fit: None,
			press: None,
		};
		state.stabilize();
		state
	}

	pub fn node_count(&self) -> usize {
		self.id_to_idx.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Run the stabilization budget so the first frame is already laid out.
	fn stabilize(&mut self) {
		if !self.options.physics.enabled {
			return;
		}
		for _ in 0..self.options.physics.stabilization_iterations {
			self.step_physics(FRAME_DT);
		}
	}

	fn step_physics(&mut self, dt: f32) {
		self.graph.update(dt);
		let pull = (self.options.physics.central_gravity as f32 * dt).min(1.0);
		self.graph.visit_nodes_mut(|node| {
			if !node.data.is_anchor {
				node.data.x -= node.data.x * pull;
				node.data.y -= node.data.y * pull;
			}
		});
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	#[cfg(test)]
	pub fn node_position(&self, id: &str) -> Option<(f64, f64)> {
		let idx = *self.id_to_idx.get(id)?;
		let mut pos = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pos = Some((node.x() as f64, node.y() as f64));
			}
		});
		pos
	}

	/// Pointer went down at screen `(x, y)`: start a node drag or a pan.
	pub fn press(&mut self, x: f64, y: f64) {
		let node = self.node_at_position(x, y);
		self.press = Some(Press { x, y, node });
		if let Some(idx) = node {
			self.drag.active = true;
			self.drag.node_idx = Some(idx);
			self.drag.start_x = x;
			self.drag.start_y = y;
			let (mut nx, mut ny) = (0.0, 0.0);
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					(nx, ny) = (node.x(), node.y());
				}
			});
			self.drag.node_start_x = nx;
			self.drag.node_start_y = ny;
		} else if self.options.interaction.pan {
			self.pan.active = true;
			self.pan.start_x = x;
			self.pan.start_y = y;
			self.pan.transform_start_x = self.transform.x;
			self.pan.transform_start_y = self.transform.y;
		}
	}

	/// Pointer moved to screen `(x, y)`.
	pub fn motion(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			if let Some(idx) = self.drag.node_idx {
				let (dx, dy) = (
					(x - self.drag.start_x) / self.transform.k,
					(y - self.drag.start_y) / self.transform.k,
				);
				let (nx, ny) = (
					self.drag.node_start_x + dx as f32,
					self.drag.node_start_y + dy as f32,
				);
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			}
		} else if self.pan.active {
			self.fit = None;
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Pointer released at screen `(x, y)`. Returns a click event when the
	/// pointer barely moved since it went down.
	pub fn release(&mut self, x: f64, y: f64) -> Option<EngineEvent> {
		let event = self.press.take().and_then(|press| {
			let moved = ((x - press.x).powi(2) + (y - press.y).powi(2)).sqrt();
			if moved >= CLICK_TOLERANCE {
				return None;
			}
			match press.node {
				Some(idx) => self.node_id(idx).map(EngineEvent::NodeClick),
				None => Some(EngineEvent::BackgroundClick),
			}
		});
		self.drag.active = false;
		self.drag.node_idx = None;
		self.pan.active = false;
		event
	}

	/// Pointer left the canvas.
	pub fn leave(&mut self) {
		self.press = None;
		self.drag.active = false;
		self.drag.node_idx = None;
		self.pan.active = false;
		self.set_hover(None);
	}

	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		if !self.options.interaction.zoom {
			return;
		}
		self.fit = None;
		self.transform = self.transform.zoom_at(sx, sy, factor);
	}

	/// Zoom around the canvas center.
	pub fn zoom_by(&mut self, factor: f64) {
		self.zoom_at(self.width / 2.0, self.height / 2.0, factor);
	}

	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		if !self.options.interaction.pan {
			return;
		}
		self.fit = None;
		self.transform.x += dx;
		self.transform.y += dy;
	}

	/// Highlight the node with `id`; ids not in this graph select nothing.
	pub fn select(&mut self, id: Option<&str>) {
		self.selected = id.and_then(|id| self.id_to_idx.get(id).copied());
	}

	pub fn unselect_all(&mut self) {
		self.selected = None;
	}

	pub fn is_selected(&self, idx: DefaultNodeIdx) -> bool {
		self.selected == Some(idx)
	}

	/// World-space box around all nodes.
	pub fn bounds(&self) -> Option<Bounds> {
		let mut points = Vec::with_capacity(self.node_count());
		self.graph
			.visit_nodes(|node| points.push((node.x() as f64, node.y() as f64)));
		Bounds::around(points, NODE_RADIUS * 2.0)
	}

	/// Start animating the camera to frame every node.
	pub fn start_fit(&mut self) {
		if let Some(bounds) = self.bounds() {
			let target = fit_transform(&bounds, self.width, self.height);
			self.fit = Some(FitAnimation::new(self.transform, target, FIT_DURATION_SECS));
		}
	}

	#[cfg(test)]
	pub fn is_fitting(&self) -> bool {
		self.fit.is_some()
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		if self.options.physics.enabled {
			self.step_physics(dt);
		}
		self.flow_time += dt as f64;

		if let Some(anim) = self.fit.as_mut() {
			let (transform, done) = anim.step(dt as f64);
			self.transform = transform;
			if done {
				self.fit = None;
			}
		}

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	/// The canvas changed size: keep the view centred on the same point.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}
