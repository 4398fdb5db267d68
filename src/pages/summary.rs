use std::sync::Arc;

use leptos::prelude::*;

use crate::components::SummaryChart;
use crate::network::Dataset;

/// Role counts over the whole dataset, independent of any filter.
#[component]
pub fn SummaryPage() -> impl IntoView {
	let summary = use_context::<Arc<Dataset>>().unwrap_or_default().summary();

	view! {
		<section class="summary-page">
			<h1>"Network Summary"</h1>
			<SummaryChart summary=summary />
		</section>
	}
}
