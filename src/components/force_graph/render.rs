//! Canvas rendering for the force graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edges and self-loops (world space)
//! 3. Non-highlighted nodes, then highlighted nodes and labels on top

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{ForceGraphState, NodeInfo};
use super::theme::{Color, Theme};

/// Attempt to smooth values that would otherwise cause abrupt visual changes.
fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &scale, theme);
	draw_self_loops(state, ctx, &scale, theme);
	draw_nodes(state, ctx, &scale, theme);

	ctx.restore();
}

fn draw_background(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let bg = &theme.background;
	let gradient = bg
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				state.width.max(state.height) * 0.8,
			)
			.ok()
		})
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &bg.color.to_css());
			let _ = gradient.add_color_stop(1.0, &bg.color_secondary.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&bg.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn edge_color(theme: &Theme, edge_t: f64, max_t: f64) -> Color {
	let base = theme.edge.color;
	if edge_t > 0.01 {
		let hi = theme.edge.highlight_color;
		let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * edge_t) as u8;
		Color::rgba(
			mix(base.r, hi.r),
			mix(base.g, hi.g),
			mix(base.b, hi.b),
			base.a + (hi.a - base.a) * edge_t,
		)
	} else if max_t > 0.01 {
		base.with_alpha(base.a * (1.0 - 0.6 * max_t))
	} else {
		base
	}
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = smooth_step(state.highlight.max_intensity());

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		if (dx * dx + dy * dy).sqrt() < 0.001 {
			return;
		}

		let edge_t = smooth_step(state.highlight.edge_intensity(n1.index(), n2.index()));
		ctx.set_stroke_style_str(&edge_color(theme, edge_t, max_t).to_css());
		ctx.set_line_width(scale.edge_line_width * (1.0 + 0.5 * edge_t));

		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	});
}

fn draw_self_loops(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = smooth_step(state.highlight.max_intensity());

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.has_self_loop(idx) {
			return;
		}
		let radius = scale.node_radius * node.data.user_data.size;
		let loop_r = radius * scale.loop_radius;
		let (cx, cy) = (node.x() as f64 + radius * 0.7, node.y() as f64 - radius * 0.7);

		let edge_t = smooth_step(state.highlight.node_intensity(idx));
		ctx.set_stroke_style_str(&edge_color(theme, edge_t, max_t).to_css());
		ctx.set_line_width(scale.edge_line_width);
		ctx.begin_path();
		let _ = ctx.arc(cx, cy, loop_r, 0.0, 2.0 * PI);
		ctx.stroke();
	});
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = smooth_step(state.highlight.max_intensity());
	let has_highlight = max_t > 0.01;
	let (dim_alpha, dim_radius) = if has_highlight {
		(1.0 - 0.6 * max_t, 1.0 - 0.1 * max_t)
	} else {
		(1.0, 1.0)
	};

	// Pass 1: nodes outside the highlight
	state.graph.visit_nodes(|node| {
		if state.highlight.node_intensity(node.index()) > 0.001 {
			return;
		}
		draw_node(ctx, node, scale, theme, dim_alpha, dim_radius);
	});

	// Pass 2: highlighted/transitioning nodes on top
	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let node_t = state.highlight.node_intensity(idx);
		if node_t <= 0.001 {
			return;
		}

		let eased_t = smooth_step(node_t);
		let is_hovered = state.highlight.hovered == Some(idx);
		let grow = if is_hovered { 0.4 } else { 0.2 };
		let alpha = dim_alpha + (1.0 - dim_alpha) * eased_t;
		let radius_mult = dim_radius + (1.0 + grow - dim_radius) * eased_t;

		draw_node(ctx, node, scale, theme, alpha, radius_mult);

		let radius = scale.node_radius * radius_mult * node.data.user_data.size;
		if is_hovered {
			let (x, y) = (node.x() as f64, node.y() as f64);
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + scale.ring_offset, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&theme.node.ring_color.with_alpha(0.8 * eased_t).to_css());
			ctx.set_line_width(scale.ring_width);
			ctx.stroke();
		}

		// Patients have no permanent label; show theirs while highlighted.
		if node.data.user_data.label.is_none() {
			draw_label(ctx, &node.data.user_data.name, node, radius, scale, theme, alpha);
		}
	});
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &force_graph::Node<NodeInfo>,
	scale: &ScaledValues,
	theme: &Theme,
	alpha: f64,
	radius_mult: f64,
) {
	let (x, y) = (node.x() as f64, node.y() as f64);
	let radius = scale.node_radius * radius_mult * node.data.user_data.size;
	let color = node.data.user_data.color;

	ctx.set_global_alpha(alpha);

	let gradient = theme
		.node
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
				.ok()
		})
		.flatten();

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &color.lighten(0.35).to_css());
			let _ = gradient.add_color_stop(0.7, &color.to_css());
			let _ = gradient.add_color_stop(1.0, &color.darken(0.15).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&color.to_css()),
	}
	ctx.fill();

	if theme.node.border_width > 0.0 {
		ctx.set_stroke_style_str(&theme.node.border_color.to_css());
		ctx.set_line_width(theme.node.border_width / scale.k);
		ctx.stroke();
	}

	ctx.set_global_alpha(1.0);

	if let Some(label) = &node.data.user_data.label {
		if alpha > 0.5 {
			draw_label(ctx, label, node, radius, scale, theme, alpha);
		}
	}
}

fn draw_label(
	ctx: &CanvasRenderingContext2d,
	text: &str,
	node: &force_graph::Node<NodeInfo>,
	radius: f64,
	scale: &ScaledValues,
	theme: &Theme,
	alpha: f64,
) {
	let (x, y) = (node.x() as f64, node.y() as f64);
	ctx.set_global_alpha(alpha);
	ctx.set_fill_style_str(&theme.node.label_color.to_css());
	ctx.set_font(&scale.label_font);
	let _ = ctx.fill_text(text, x + radius + 4.0, y + 3.0);
	ctx.set_global_alpha(1.0);
}
