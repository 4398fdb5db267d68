use std::sync::Arc;

use leptos::prelude::*;

use crate::components::force_graph::{ForceGraphCanvas, GraphData, HoveredNode};
use crate::components::{FilterBar, NodeDetails, NodeTooltip};
use crate::network::{Dataset, FilterSelection, NodeId};

/// Network view: filter bar, canvas, a hover card and the details panel for a
/// clicked node.
#[component]
pub fn GraphPage() -> impl IntoView {
	let dataset = use_context::<Arc<Dataset>>().unwrap_or_default();
	let selection = RwSignal::new(FilterSelection::default());
	let selected = RwSignal::new(None::<NodeId>);
	let hovered = RwSignal::new(None::<HoveredNode>);

	// recomputed from scratch on every selection change
	let projection = {
		let dataset = dataset.clone();
		Memo::new(move |_| selection.with(|s| dataset.project(s)))
	};
	let graph_data = Signal::derive(move || projection.with(|p| GraphData::from(p)));
	let options = projection.with_untracked(|p| p.options.clone());
	let empty = move || projection.with(|p| p.is_empty());

	let on_select = Callback::new(move |id: NodeId| selected.set(Some(id)));
	let on_close = Callback::new(move |_: ()| selected.set(None));
	let on_hover = Callback::new(move |target: Option<HoveredNode>| {
		if hovered.with_untracked(|current| *current != target) {
			hovered.set(target);
		}
	});

	let tooltip = move || {
		let HoveredNode { id, x, y } = hovered.get()?;
		let node = projection.with(|p| p.node(&id).cloned())?;
		Some(view! { <NodeTooltip node=node x=x y=y /> })
	};

	// a node filtered out of the projection closes its panel
	let details = move || {
		let id = selected.get()?;
		let node = projection.with(|p| p.node(&id).cloned())?;
		let attributes = dataset.attributes.for_node(&id).cloned();
		Some(view! { <NodeDetails node=node attributes=attributes on_close=on_close /> })
	};

	view! {
		<div class="fullscreen-graph">
			<ForceGraphCanvas
				data=graph_data
				fullscreen=true
				on_select=on_select
				on_hover=on_hover
			/>
			<div class="graph-overlay">
				<h1>"Healthcare Network"</h1>
				<p class="subtitle">
					"Hover a node for a summary, click it for details. Drag nodes to reposition. Scroll to zoom."
				</p>
				<FilterBar selection=selection options=options />
				<Show when=empty>
					<p class="graph-empty">"No interactions match the current filters."</p>
				</Show>
			</div>
			{tooltip}
			{details}
		</div>
	}
}
