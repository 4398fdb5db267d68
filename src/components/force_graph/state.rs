//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation. Once a projection is handed
//! over, this state is the only thing that moves nodes: the simulation itself,
//! plus drag overrides applied through [`ForceGraphState::pin`] and
//! [`ForceGraphState::release`]. Positions survive [`ForceGraphState::reload`]
//! for every node id that is still present, so a filter change does not make
//! settled nodes jump.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::scale::{ScaleConfig, ScaledValues};
use super::theme::{Color, Theme};
use super::types::GraphData;
use crate::network::{NodeId, Role};

/// Physics and settling parameters.
#[derive(Clone, Debug)]
pub struct LayoutConfig {
	/// Repulsion between every pair of nodes.
	pub force_charge: f32,
	/// Spring pull along edges.
	pub force_spring: f32,
	/// Cap on the force applied to a node in one tick.
	pub force_max: f32,
	/// Velocity scale.
	pub node_speed: f32,
	/// Velocity kept per tick.
	pub damping_factor: f32,
	/// Same for every node.
	pub node_mass: f32,
	/// Radius of the circle new nodes start on, in world units.
	pub initial_radius: f64,
	/// Mean squared displacement per tick below which the layout counts as calm.
	pub energy_threshold: f64,
	/// Consecutive calm ticks before the simulation stops.
	pub settle_ticks: u32,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			force_charge: 250.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			node_mass: 10.0,
			initial_radius: 150.0,
			energy_threshold: 1e-4,
			settle_ticks: 30,
		}
	}
}

impl LayoutConfig {
	fn simulation_parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}
}

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	/// Source node id.
	pub id: NodeId,
	/// Drawn while highlighted.
	pub name: String,
	/// Drawn at all times.
	pub label: Option<String>,
	/// Fill.
	pub color: Color,
	/// Size multiplier (1.0 = normal, >1.0 = larger/more important)
	pub size: f64,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	/// Horizontal offset in screen pixels.
	pub x: f64,
	/// Vertical offset in screen pixels.
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Held node, if any.
	pub node: Option<DefaultNodeIdx>,
	/// Pointer x at press, screen pixels.
	pub start_x: f64,
	/// Pointer y at press, screen pixels.
	pub start_y: f64,
	/// Node x at press, world units.
	pub node_start_x: f32,
	/// Node y at press, world units.
	pub node_start_y: f32,
	/// Set once the pointer travels far enough to count as a drag, not a click.
	pub moved: bool,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// Button held on empty canvas.
	pub active: bool,
	/// Pointer x at press.
	pub start_x: f64,
	/// Pointer y at press.
	pub start_y: f64,
	/// [`ViewTransform::x`] at press.
	pub transform_start_x: f64,
	/// [`ViewTransform::y`] at press.
	pub transform_start_y: f64,
}

/// Pointer travel (screen pixels) below which a press-release is a click.
const CLICK_SLOP: f64 = 3.0;

/// Smoothed hover highlighting.
///
/// The hovered node and its neighbours ease towards full intensity; everything
/// else eases back to zero.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	/// Node under the pointer.
	pub hovered: Option<DefaultNodeIdx>,
	targets: HashSet<DefaultNodeIdx>,
	intensity: HashMap<DefaultNodeIdx, f64>,
	peak: f64,
}

impl HighlightState {
	/// Retarget the highlight to `node` and its neighbours along `edges`.
	pub fn set_hover(
		&mut self,
		node: Option<DefaultNodeIdx>,
		edges: &[(DefaultNodeIdx, DefaultNodeIdx)],
	) {
		if self.hovered == node {
			return;
		}
		self.hovered = node;
		self.targets.clear();
		let Some(idx) = node else {
			return;
		};
		self.targets.insert(idx);
		for &(a, b) in edges {
			if a == idx {
				self.targets.insert(b);
			} else if b == idx {
				self.targets.insert(a);
			}
		}
	}

	/// Exponential smoothing: value += (target - value) * (1 - e^(-speed * dt))
	pub fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 6.0;
		const FADE_OUT_SPEED: f64 = 4.0;

		let fade_in = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out = (-FADE_OUT_SPEED * dt).exp();

		for &idx in &self.targets {
			let v = self.intensity.entry(idx).or_insert(0.0);
			*v += (1.0 - *v) * fade_in;
		}

		let targets = &self.targets;
		let mut peak: f64 = 0.0;
		self.intensity.retain(|idx, v| {
			if !targets.contains(idx) {
				*v *= fade_out;
			}
			peak = peak.max(*v);
			*v > 0.005
		});
		self.peak = peak;
	}

	/// Current intensity of one node, 0.0 to 1.0.
	pub fn node_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.intensity.get(&idx).copied().unwrap_or(0.0)
	}

	/// Geometric mean so an edge lights up only when both ends do.
	pub fn edge_intensity(&self, a: DefaultNodeIdx, b: DefaultNodeIdx) -> f64 {
		(self.node_intensity(a) * self.node_intensity(b)).sqrt()
	}

	/// Highest intensity of any node, used to dim everything else.
	pub fn max_intensity(&self) -> f64 {
		self.peak
	}
}

/// Everything derived from one [`GraphData`].
struct Built {
	graph: ForceGraph<NodeInfo, ()>,
	index: HashMap<NodeId, DefaultNodeIdx>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	self_loops: HashSet<DefaultNodeIdx>,
}

fn role_size(role: &Role) -> f64 {
	match role {
		Role::Entity => 1.6,
		Role::Professional => 1.25,
		Role::Patient | Role::Other(_) => 0.9,
	}
}

fn build(
	data: &GraphData,
	width: f64,
	height: f64,
	theme: &Theme,
	config: &LayoutConfig,
	carried: &HashMap<NodeId, (f32, f32)>,
) -> Built {
	let mut graph = ForceGraph::new(config.simulation_parameters());
	let mut index = HashMap::new();
	let mut edges = Vec::new();
	let mut self_loops = HashSet::new();

	let mut degree: HashMap<&NodeId, usize> = HashMap::new();
	for link in &data.links {
		*degree.entry(&link.source).or_insert(0) += 1;
		*degree.entry(&link.target).or_insert(0) += 1;
	}
	let max_degree = degree.values().copied().max().unwrap_or(1).max(1);

	let count = data.nodes.len().max(1) as f64;
	for (i, node) in data.nodes.iter().enumerate() {
		if index.contains_key(&node.id) {
			continue;
		}

		// carried position > source hint > circle around the origin
		let (x, y) = carried.get(&node.id).copied().unwrap_or_else(|| match node.hint {
			Some((hx, hy)) => ((hx - width / 2.0) as f32, (hy - height / 2.0) as f32),
			None => {
				let angle = (i as f64) * 2.0 * PI / count;
				(
					(config.initial_radius * angle.cos()) as f32,
					(config.initial_radius * angle.sin()) as f32,
				)
			}
		});

		let color = theme.roles.color_for(&node.role);
		let edge_factor = (degree.get(&node.id).copied().unwrap_or(0) as f64 / max_degree as f64).sqrt();

		let idx = graph.add_node(NodeData {
			x,
			y,
			mass: config.node_mass,
			is_anchor: false,
			user_data: NodeInfo {
				id: node.id.clone(),
				name: node.name.clone(),
				label: node.label.clone(),
				color,
				size: role_size(&node.role) * (0.85 + 0.3 * edge_factor),
			},
		});
		index.insert(node.id.clone(), idx);
	}

	for link in &data.links {
		let (Some(&src), Some(&tgt)) = (index.get(&link.source), index.get(&link.target)) else {
			continue;
		};
		if src == tgt {
			// zero-length springs never reach the physics
			self_loops.insert(src);
			continue;
		}
		graph.add_edge(src, tgt, EdgeData::default());
		edges.push((src, tgt));
	}

	Built {
		graph,
		index,
		edges,
		self_loops,
	}
}

/// Core graph state combining physics simulation with interaction and highlight tracking.
///
/// Created once when the component mounts and reloaded whenever the projection
/// changes. The `tick` method advances the physics until the layout settles and
/// animates highlight intensities.
pub struct ForceGraphState {
	/// The physics simulation.
	pub graph: ForceGraph<NodeInfo, ()>,
	/// Parameters it was built with.
	pub config: LayoutConfig,
	/// Pan and zoom.
	pub transform: ViewTransform,
	/// Node drag in progress.
	pub drag: DragState,
	/// Canvas pan in progress.
	pub pan: PanState,
	/// Hover highlight.
	pub highlight: HighlightState,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	/// False once the layout has settled. Drags and reloads set it again.
	pub animation_running: bool,
	/// Seconds of ticks so far.
	pub elapsed: f64,
	index: HashMap<NodeId, DefaultNodeIdx>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	self_loops: HashSet<DefaultNodeIdx>,
	last_positions: HashMap<DefaultNodeIdx, (f32, f32)>,
	calm_ticks: u32,
}

impl ForceGraphState {
	/// Lay out `data` on a canvas of the given size with default physics.
	pub fn new(data: &GraphData, width: f64, height: f64, theme: &Theme) -> Self {
		Self::with_config(data, width, height, theme, LayoutConfig::default())
	}

	/// Like [`Self::new`] with explicit physics.
	pub fn with_config(
		data: &GraphData,
		width: f64,
		height: f64,
		theme: &Theme,
		config: LayoutConfig,
	) -> Self {
		let built = build(data, width, height, theme, &config, &HashMap::new());
		let mut state = Self {
			graph: built.graph,
			config,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			width,
			height,
			animation_running: true,
			elapsed: 0.0,
			index: built.index,
			edges: built.edges,
			self_loops: built.self_loops,
			last_positions: HashMap::new(),
			calm_ticks: 0,
		};
		state.last_positions = state.snapshot();
		state
	}

	/// Swap in a new projection, keeping positions of nodes that survive it.
	pub fn reload(&mut self, data: &GraphData, theme: &Theme) {
		let carried = self.positions();
		let built = build(data, self.width, self.height, theme, &self.config, &carried);
		self.graph = built.graph;
		self.index = built.index;
		self.edges = built.edges;
		self.self_loops = built.self_loops;
		// node indices are not stable across rebuilds
		self.highlight = HighlightState::default();
		self.drag = DragState::default();
		self.last_positions = self.snapshot();
		self.wake();
		debug!(
			"care-graph: layout reloaded with {} nodes, {} edges, {} self-loops",
			self.index.len(),
			self.edges.len(),
			self.self_loops.len()
		);
	}

	/// Current world-space position of every node.
	pub fn positions(&self) -> HashMap<NodeId, (f32, f32)> {
		let mut out = HashMap::with_capacity(self.index.len());
		self.graph.visit_nodes(|node| {
			out.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});
		out
	}

	fn snapshot(&self) -> HashMap<DefaultNodeIdx, (f32, f32)> {
		let mut out = HashMap::with_capacity(self.index.len());
		self.graph.visit_nodes(|node| {
			out.insert(node.index(), (node.x(), node.y()));
		});
		out
	}

	/// Nodes in the layout.
	pub fn node_count(&self) -> usize {
		self.index.len()
	}

	/// Edges in the physics. Self-loops are not counted.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Whether the node links to itself.
	pub fn has_self_loop(&self, idx: DefaultNodeIdx) -> bool {
		self.self_loops.contains(&idx)
	}

	/// Simulation index of a node.
	pub fn index_of(&self, id: &NodeId) -> Option<DefaultNodeIdx> {
		self.index.get(id).copied()
	}

	/// Node id at a simulation index.
	pub fn id_of(&self, idx: DefaultNodeIdx) -> Option<NodeId> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	/// Hold a node at a world-space position until [`Self::release`].
	pub fn pin(&mut self, id: &NodeId, x: f32, y: f32) -> bool {
		let Some(idx) = self.index_of(id) else {
			return false;
		};
		self.pin_index(idx, x, y);
		true
	}

	fn pin_index(&mut self, idx: DefaultNodeIdx, x: f32, y: f32) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = x;
				node.data.y = y;
				node.data.is_anchor = true;
			}
		});
		self.wake();
	}

	/// Hand a pinned node back to the simulation.
	pub fn release(&mut self, id: &NodeId) {
		if let Some(idx) = self.index_of(id) {
			self.release_index(idx);
		}
	}

	fn release_index(&mut self, idx: DefaultNodeIdx) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.is_anchor = false;
			}
		});
		self.wake();
	}

	/// Restart the simulation after it settled.
	pub fn wake(&mut self) {
		self.animation_running = true;
		self.calm_ticks = 0;
	}

	/// Screen pixels to world units.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node within hit distance of a screen point.
	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let hit_radius = scale.hit_radius * node.data.user_data.size;
			if (dx * dx + dy * dy).sqrt() < hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Press on a node at screen position `(sx, sy)`.
	pub fn start_drag(&mut self, idx: DefaultNodeIdx, sx: f64, sy: f64) {
		let mut start = (0.0, 0.0);
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				start = (node.x(), node.y());
			}
		});
		self.drag = DragState {
			node: Some(idx),
			start_x: sx,
			start_y: sy,
			node_start_x: start.0,
			node_start_y: start.1,
			moved: false,
		};
	}

	/// Pointer moved to `(sx, sy)` while a node is held.
	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.drag.node else {
			return;
		};
		let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
		if !self.drag.moved && (dx * dx + dy * dy).sqrt() < CLICK_SLOP {
			return;
		}
		self.drag.moved = true;
		let k = self.transform.k;
		let x = self.drag.node_start_x + (dx / k) as f32;
		let y = self.drag.node_start_y + (dy / k) as f32;
		self.pin_index(idx, x, y);
	}

	/// Pointer released. Returns the node id when the gesture was a click.
	pub fn end_drag(&mut self) -> Option<NodeId> {
		let drag = std::mem::take(&mut self.drag);
		let idx = drag.node?;
		if drag.moved {
			self.release_index(idx);
			None
		} else {
			self.id_of(idx)
		}
	}

	/// Highlight `node` and its neighbours, or clear the highlight.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.highlight.set_hover(node, &self.edges);
	}

	/// Id of the node under the pointer.
	pub fn hovered_id(&self) -> Option<NodeId> {
		self.highlight.hovered.and_then(|idx| self.id_of(idx))
	}

	/// Advance physics and highlight fades by `dt` seconds.
	pub fn tick(&mut self, dt: f32) {
		self.elapsed += dt as f64;
		self.highlight.tick(dt as f64);
		if !self.animation_running {
			return;
		}

		self.graph.update(dt);
		let energy = self.measure_energy();
		if energy < self.config.energy_threshold && self.drag.node.is_none() {
			self.calm_ticks += 1;
			if self.calm_ticks >= self.config.settle_ticks {
				self.animation_running = false;
				debug!("care-graph: layout settled after {:.1}s", self.elapsed);
			}
		} else {
			self.calm_ticks = 0;
		}
	}

	/// Mean squared displacement since the previous tick.
	fn measure_energy(&mut self) -> f64 {
		let last = &mut self.last_positions;
		let (mut total, mut count) = (0.0, 0usize);
		self.graph.visit_nodes(|node| {
			let now = (node.x(), node.y());
			if let Some((px, py)) = last.insert(node.index(), now) {
				let (dx, dy) = ((now.0 - px) as f64, (now.1 - py) as f64);
				total += dx * dx + dy * dy;
			}
			count += 1;
		});
		if count == 0 { 0.0 } else { total / count as f64 }
	}

	/// Record a new canvas size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	fn node(id: &str, role: Role) -> GraphNode {
		GraphNode {
			id: NodeId::from(id),
			name: format!("Node {id}"),
			label: None,
			role,
			hint: None,
		}
	}

	fn link(a: &str, b: &str) -> GraphLink {
		GraphLink {
			source: NodeId::from(a),
			target: NodeId::from(b),
		}
	}

	fn data(nodes: Vec<GraphNode>, links: Vec<GraphLink>) -> GraphData {
		GraphData { nodes, links }
	}

	#[test]
	fn every_node_gets_a_position() {
		let d = data(
			vec![node("1", Role::Entity), node("2", Role::Patient)],
			vec![link("1", "2")],
		);
		let state = ForceGraphState::new(&d, 800.0, 600.0, &Theme::default());
		let positions = state.positions();
		assert_eq!(positions.len(), 2);
		assert_ne!(positions[&NodeId::from("1")], positions[&NodeId::from("2")]);
		assert_eq!(state.edge_count(), 1);
	}

	#[test]
	fn reload_carries_positions_by_id() {
		let theme = Theme::default();
		let first = data(
			vec![node("1", Role::Entity), node("2", Role::Patient)],
			vec![link("1", "2")],
		);
		let mut state = ForceGraphState::new(&first, 800.0, 600.0, &theme);
		assert!(state.pin(&NodeId::from("1"), 42.0, -7.0));

		let second = data(
			vec![node("1", Role::Entity), node("3", Role::Patient)],
			vec![link("1", "3")],
		);
		state.reload(&second, &theme);
		let positions = state.positions();
		assert_eq!(positions[&NodeId::from("1")], (42.0, -7.0));
		assert!(positions.contains_key(&NodeId::from("3")));
		assert!(!positions.contains_key(&NodeId::from("2")));
		assert!(state.animation_running);
	}

	#[test]
	fn source_hints_place_new_nodes() {
		let mut hinted = node("1", Role::Entity);
		hinted.hint = Some((500.0, 400.0));
		let state = ForceGraphState::new(&data(vec![hinted], vec![]), 800.0, 600.0, &Theme::default());
		assert_eq!(state.positions()[&NodeId::from("1")], (100.0, 100.0));
	}

	#[test]
	fn self_loops_stay_out_of_the_physics() {
		let d = data(
			vec![node("1", Role::Professional)],
			vec![link("1", "1"), link("1", "missing")],
		);
		let mut state = ForceGraphState::new(&d, 800.0, 600.0, &Theme::default());
		assert_eq!(state.edge_count(), 0);
		let idx = state.index_of(&NodeId::from("1")).unwrap();
		assert!(state.has_self_loop(idx));

		for _ in 0..10 {
			state.tick(0.016);
		}
		let (x, y) = state.positions()[&NodeId::from("1")];
		assert!(x.is_finite() && y.is_finite());
	}

	#[test]
	fn still_layout_settles_and_drag_wakes_it() {
		let config = LayoutConfig {
			settle_ticks: 5,
			..LayoutConfig::default()
		};
		let d = data(vec![node("1", Role::Entity)], vec![]);
		let mut state = ForceGraphState::with_config(&d, 800.0, 600.0, &Theme::default(), config);
		for _ in 0..5 {
			state.tick(0.016);
		}
		assert!(!state.animation_running);

		state.pin(&NodeId::from("1"), 10.0, 10.0);
		assert!(state.animation_running);
		state.release(&NodeId::from("1"));
		assert_eq!(state.positions()[&NodeId::from("1")], (10.0, 10.0));
	}

	#[test]
	fn press_without_travel_is_a_click() {
		let d = data(vec![node("7", Role::Patient)], vec![]);
		let mut state = ForceGraphState::new(&d, 800.0, 600.0, &Theme::default());
		let idx = state.index_of(&NodeId::from("7")).unwrap();

		state.start_drag(idx, 100.0, 100.0);
		state.drag_to(101.0, 101.0);
		assert_eq!(state.end_drag(), Some(NodeId::from("7")));

		state.start_drag(idx, 100.0, 100.0);
		state.drag_to(140.0, 100.0);
		assert_eq!(state.end_drag(), None);
		assert!(state.drag.node.is_none());
	}

	#[test]
	fn hover_highlights_neighbours() {
		let d = data(
			vec![
				node("1", Role::Entity),
				node("2", Role::Patient),
				node("3", Role::Patient),
			],
			vec![link("1", "2")],
		);
		let mut state = ForceGraphState::new(&d, 800.0, 600.0, &Theme::default());
		let one = state.index_of(&NodeId::from("1")).unwrap();
		let two = state.index_of(&NodeId::from("2")).unwrap();
		let three = state.index_of(&NodeId::from("3")).unwrap();

		state.set_hover(Some(one));
		state.tick(0.1);
		assert!(state.highlight.node_intensity(two) > 0.0);
		assert_eq!(state.highlight.node_intensity(three), 0.0);
		assert!(state.highlight.edge_intensity(one, two) > 0.0);
	}

	#[test]
	fn pointer_over_node_reports_its_id() {
		let mut hinted = node("10", Role::Professional);
		hinted.hint = Some((400.0, 300.0));
		let d = data(vec![hinted, node("11", Role::Patient)], vec![link("10", "11")]);
		let mut state = ForceGraphState::new(&d, 800.0, 600.0, &Theme::default());
		assert_eq!(state.hovered_id(), None);

		// the hint lands on the canvas centre
		let hit = state.node_at_position(401.0, 299.0, &ScaleConfig::default());
		assert_eq!(hit, state.index_of(&NodeId::from("10")));
		state.set_hover(hit);
		assert_eq!(state.hovered_id(), Some(NodeId::from("10")));

		state.reload(&d, &Theme::default());
		assert_eq!(state.hovered_id(), None);
	}
}
