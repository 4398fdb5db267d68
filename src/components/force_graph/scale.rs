//! Sizes that react to the zoom factor `k`.
//!
//! Graph geometry lives in world units and the canvas transform multiplies it
//! by `k`. Some things (node discs) should grow with zoom, others (line widths,
//! label text, the hover ring) should look the same at every zoom. Each size is
//! configured once here and turned into a world-unit value per frame by
//! [`ScaledValues::new`].

/// How a configured size responds to zoom.
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleBehavior {
	/// Fixed in world units, so it grows on screen as you zoom in.
	World,
	/// Fixed in screen pixels.
	Screen,
	/// World units, but never smaller or larger than the given pixel bounds.
	Clamped {
		/// Smallest on-screen size in pixels.
		min_screen: f64,
		/// Largest on-screen size in pixels.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// World-unit size for `base` at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Node disc, hit area and label sizing.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Disc radius before role and degree multipliers.
	pub radius: f64,
	/// Zoom response of [`Self::radius`].
	pub radius_behavior: ScaleBehavior,
	/// Pointer tolerance around a node.
	pub hit_radius: f64,
	/// Zoom response of [`Self::hit_radius`].
	pub hit_behavior: ScaleBehavior,
	/// Label text height in pixels.
	pub label_size: f64,
	/// Below this zoom, labels stop shrinking.
	pub label_min_k: f64,
}

/// Edge stroke sizing.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Stroke in pixels.
	pub line_width: f64,
	/// Self-loop circle radius relative to its node.
	pub loop_radius: f64,
}

/// Hover ring sizing.
#[derive(Clone, Debug)]
pub struct RingScaleConfig {
	/// Stroke in pixels.
	pub width: f64,
	/// Gap between the node and its ring, in pixels.
	pub offset: f64,
}

/// Sizing for nodes, edges and the hover ring.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Nodes.
	pub node: NodeScaleConfig,
	/// Edges and self-loops.
	pub edge: EdgeScaleConfig,
	/// Hover ring.
	pub ring: RingScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius: 8.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 4.0,
					max_screen: f64::INFINITY,
				},
				hit_radius: 12.0,
				hit_behavior: ScaleBehavior::Clamped {
					min_screen: 6.0,
					max_screen: f64::INFINITY,
				},
				label_size: 11.0,
				label_min_k: 0.5,
			},
			edge: EdgeScaleConfig {
				line_width: 2.0,
				loop_radius: 0.9,
			},
			ring: RingScaleConfig {
				width: 1.5,
				offset: 2.0,
			},
		}
	}
}

/// One frame's worth of sizes, all in world units.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Zoom these were computed for.
	pub k: f64,
	/// Base disc radius.
	pub node_radius: f64,
	/// Base pointer tolerance.
	pub hit_radius: f64,
	/// CSS font shorthand for labels.
	pub label_font: String,
	/// Edge stroke.
	pub edge_line_width: f64,
	/// Self-loop radius as a multiple of the node radius.
	pub loop_radius: f64,
	/// Hover ring stroke.
	pub ring_width: f64,
	/// Gap between node and hover ring.
	pub ring_offset: f64,
}

impl ScaledValues {
	/// Resolve `config` at zoom `k`.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_px = config.node.label_size / k.max(config.node.label_min_k);
		Self {
			k,
			node_radius: config.node.radius_behavior.apply(config.node.radius, k),
			hit_radius: config.node.hit_behavior.apply(config.node.hit_radius, k),
			label_font: format!("{label_px}px sans-serif"),
			edge_line_width: config.edge.line_width / k,
			loop_radius: config.edge.loop_radius,
			ring_width: config.ring.width / k,
			ring_offset: config.ring.offset / k,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamped_radius_keeps_minimum_screen_size() {
		let b = ScaleBehavior::Clamped {
			min_screen: 4.0,
			max_screen: f64::INFINITY,
		};
		// At k=0.5 a 2-unit radius is 1px on screen, clamp to 4px.
		assert_eq!(b.apply(2.0, 0.5), 8.0);
		assert_eq!(b.apply(8.0, 2.0), 8.0);
		assert_eq!(ScaleBehavior::Screen.apply(2.0, 4.0), 0.5);
		assert_eq!(ScaleBehavior::World.apply(2.0, 4.0), 2.0);
	}

	#[test]
	fn line_width_is_screen_constant() {
		let values = ScaledValues::new(&ScaleConfig::default(), 2.0);
		assert_eq!(values.edge_line_width, 1.0);
		assert_eq!(values.k, 2.0);
		assert_eq!(values.label_font, "5.5px sans-serif");
	}
}
