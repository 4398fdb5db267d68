//! care-graph: interactive view of a healthcare interaction network.
//!
//! Hospitals, doctors and patients are drawn as a force-directed graph. Three
//! display filters narrow the links shown; the projection that applies them
//! lives in [`network`] and never touches the DOM.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlScriptElement};

pub mod components;
pub mod network;
mod pages;

pub use components::force_graph::{ForceGraphCanvas, GraphData, GraphLink, GraphNode};
use network::{DataError, Dataset};
use pages::graph::GraphPage;
use pages::summary::SummaryPage;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("care-graph: logging initialized");
}

fn script_text(document: &Document, id: &'static str) -> Option<String> {
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Read the dataset embedded in the host page.
///
/// `#nodes-data` and `#links-data` hold JSON arrays; `#attributes-data` is an
/// optional CSV table keyed by an `id` column.
pub fn load_dataset() -> Result<Dataset, DataError> {
	let started = js_sys::Date::now();
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or(DataError::NoDocument)?;

	let nodes = script_text(&document, "nodes-data").ok_or(DataError::MissingElement("nodes-data"))?;
	let links = script_text(&document, "links-data").ok_or(DataError::MissingElement("links-data"))?;
	let attributes = script_text(&document, "attributes-data");

	let dataset = Dataset::from_documents(&nodes, &links, attributes.as_deref())?;
	info!(
		"care-graph: dataset ready in {:.1}ms",
		js_sys::Date::now() - started
	);
	Ok(dataset)
}

/// Main application component.
///
/// Loads the dataset once and shares it with the graph and summary pages.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let dataset = load_dataset().unwrap_or_else(|e| {
		warn!("care-graph: {e}, showing an empty network");
		Dataset::default()
	});
	provide_context(Arc::new(dataset));

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Healthcare Network" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<nav class="app-nav">
				<A href="/">"Network"</A>
				<A href="/summary">"Summary"</A>
			</nav>
			<Routes fallback=|| view! { <Redirect path="/" /> }>
				<Route path=path!("/") view=GraphPage />
				<Route path=path!("/summary") view=SummaryPage />
			</Routes>
		</Router>
	}
}
