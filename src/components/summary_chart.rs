//! SVG bar chart of node counts per role.

use leptos::prelude::*;

use crate::network::RoleSummary;

const WIDTH: f64 = 480.0;
const HEIGHT: f64 = 280.0;
const MARGIN: f64 = 32.0;
const GAP: f64 = 0.25;

/// One bar in chart coordinates.
#[derive(Clone, Debug, PartialEq)]
struct Bar {
	label: &'static str,
	count: usize,
	x: f64,
	y: f64,
	width: f64,
	height: f64,
}

fn layout(summary: &RoleSummary) -> Vec<Bar> {
	let bars = summary.bars();
	let max = summary.max().max(1) as f64;
	let plot_w = WIDTH - 2.0 * MARGIN;
	let plot_h = HEIGHT - 2.0 * MARGIN;
	let slot = plot_w / bars.len() as f64;

	bars.iter()
		.enumerate()
		.map(|(i, &(label, count))| {
			let height = plot_h * count as f64 / max;
			Bar {
				label,
				count,
				x: MARGIN + slot * i as f64 + slot * GAP / 2.0,
				y: HEIGHT - MARGIN - height,
				width: slot * (1.0 - GAP),
				height,
			}
		})
		.collect()
}

/// Hospitals, doctors and patients in the raw dataset.
#[component]
pub fn SummaryChart(
	/// Counts to chart.
	summary: RoleSummary,
) -> impl IntoView {
	let hovered = RwSignal::new(None::<(&'static str, usize)>);
	let bars = layout(&summary);

	view! {
		<figure class="summary-chart">
			<svg
				viewBox=format!("0 0 {WIDTH} {HEIGHT}")
				role="img"
				aria-label="Nodes per role"
			>
				<line
					x1=MARGIN
					y1=HEIGHT - MARGIN
					x2=WIDTH - MARGIN
					y2=HEIGHT - MARGIN
					class="summary-axis"
				/>
				{bars
					.into_iter()
					.map(|bar| {
						let Bar { label, count, x, y, width, height } = bar;
						view! {
							<g
								class="summary-bar"
								on:mouseenter=move |_| hovered.set(Some((label, count)))
								on:mouseleave=move |_| hovered.set(None)
							>
								<rect x=x y=y width=width height=height rx="3" />
								<text x=x + width / 2.0 y=HEIGHT - MARGIN / 2.0 text-anchor="middle">
									{label}
								</text>
							</g>
						}
					})
					.collect_view()}
			</svg>
			<figcaption class="summary-readout">
				{move || match hovered.get() {
					Some((label, count)) => format!("{label}: {count}"),
					None => format!("{} nodes in total", summary.total()),
				}}
			</figcaption>
		</figure>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tallest_bar_fills_the_plot() {
		let summary = RoleSummary {
			entities: 2,
			professionals: 4,
			patients: 8,
			other: 1,
		};
		let bars = layout(&summary);
		assert_eq!(bars.len(), 3);
		assert_eq!(bars[2].label, "Patients");
		assert_eq!(bars[2].height, HEIGHT - 2.0 * MARGIN);
		assert_eq!(bars[0].height * 4.0, bars[2].height);
		assert!(bars[0].x < bars[1].x && bars[1].x < bars[2].x);
	}

	#[test]
	fn empty_dataset_draws_flat_bars() {
		let bars = layout(&RoleSummary::default());
		assert!(bars.iter().all(|b| b.height == 0.0 && b.y == HEIGHT - MARGIN));
	}
}
