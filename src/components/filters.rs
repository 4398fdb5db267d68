//! Filter bar with one `<select>` per display filter.

use leptos::prelude::*;

use crate::network::{ALL, Filter, FilterOptions, FilterSelection};

/// A labelled `<select>` whose first choice is the unconstrained [`ALL`].
#[component]
fn FilterSelect(
	label: &'static str,
	/// `(value, text)` pairs after the "All" choice.
	choices: Vec<(String, String)>,
	#[prop(into)] value: Signal<String>,
	on_change: Callback<String>,
) -> impl IntoView {
	view! {
		<label class="filter">
			<span class="filter-label">{label}</span>
			<select
				prop:value=move || value.get()
				on:change=move |ev| on_change.run(event_target_value(&ev))
			>
				<option value=ALL>"All"</option>
				{choices
					.into_iter()
					.map(|(v, text)| view! { <option value=v>{text}</option> })
					.collect_view()}
			</select>
		</label>
	}
}

/// Interaction type, hospital and doctor filters.
///
/// Options come from the raw dataset, so picking one filter never hides the
/// choices of another.
#[component]
pub fn FilterBar(
	/// Written on every change.
	selection: RwSignal<FilterSelection>,
	/// Choices for the three controls.
	options: FilterOptions,
) -> impl IntoView {
	let interaction_choices = options
		.interaction_types
		.iter()
		.map(|t| (t.clone(), t.clone()))
		.collect();
	let hospital_choices = options
		.hospitals
		.iter()
		.map(|o| (o.id.to_string(), o.name.clone()))
		.collect();
	let doctor_choices = options
		.doctors
		.iter()
		.map(|o| (o.id.to_string(), o.name.clone()))
		.collect();

	view! {
		<div class="filter-bar">
			<FilterSelect
				label="Interaction type"
				choices=interaction_choices
				value=Signal::derive(move || selection.with(|s| s.interaction_type.to_select_value()))
				on_change=Callback::new(move |v: String| {
					selection.update(|s| s.interaction_type = Filter::from_select(&v))
				})
			/>
			<FilterSelect
				label="Hospital"
				choices=hospital_choices
				value=Signal::derive(move || selection.with(|s| s.hospital.to_select_value()))
				on_change=Callback::new(move |v: String| {
					selection.update(|s| s.hospital = Filter::from_select(&v))
				})
			/>
			<FilterSelect
				label="Doctor"
				choices=doctor_choices
				value=Signal::derive(move || selection.with(|s| s.doctor.to_select_value()))
				on_change=Callback::new(move |v: String| {
					selection.update(|s| s.doctor = Filter::from_select(&v))
				})
			/>
			<button
				class="filter-reset"
				disabled=move || selection.with(|s| *s == FilterSelection::default())
				on:click=move |_| selection.set(FilterSelection::default())
			>
				"Reset"
			</button>
		</div>
	}
}
