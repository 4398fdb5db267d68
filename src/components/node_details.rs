//! Node read-outs: the side panel for a clicked node and the card that follows
//! the pointer over a hovered one.

use leptos::prelude::*;

use crate::network::{AttributeRecord, Node};

/// Pointer offset so the card does not sit under the cursor.
const TOOLTIP_OFFSET: f64 = 14.0;

/// Name, role, specialty and patient count, plus any attribute columns.
#[component]
pub fn NodeDetails(
	/// Node to describe.
	node: Node,
	/// Its attribute row, if the table has one.
	#[prop(default = None)]
	attributes: Option<AttributeRecord>,
	/// Called by the close button.
	on_close: Callback<()>,
) -> impl IntoView {
	let extra = attributes
		.map(|record| record.fields.into_iter().collect::<Vec<_>>())
		.unwrap_or_default();

	view! {
		<aside class="node-details">
			<button class="node-details-close" on:click=move |_| on_close.run(())>
				"×"
			</button>
			<h2>{node.name.clone()}</h2>
			<dl>
				{node
					.detail_rows()
					.into_iter()
					.map(|(key, value)| (key.to_string(), value))
					.chain(extra)
					.map(|(key, value)| view! {
						<dt>{key}</dt>
						<dd>{value}</dd>
					})
					.collect_view()}
			</dl>
		</aside>
	}
}

/// Compact read-out drawn next to the pointer at canvas position `(x, y)`.
#[component]
pub fn NodeTooltip(
	/// Hovered node.
	node: Node,
	/// Pointer x in canvas pixels.
	x: f64,
	/// Pointer y in canvas pixels.
	y: f64,
) -> impl IntoView {
	let style = format!(
		"left: {}px; top: {}px;",
		x + TOOLTIP_OFFSET,
		y + TOOLTIP_OFFSET
	);
	view! {
		<div class="node-tooltip" style=style>
			<strong>{node.name.clone()}</strong>
			{node
				.detail_rows()
				.into_iter()
				.map(|(key, value)| view! {
					<div>
						<span class="node-tooltip-key">{key}": "</span>
						{value}
					</div>
				})
				.collect_view()}
		</div>
	}
}
