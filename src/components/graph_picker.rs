use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, File, HtmlInputElement, HtmlSelectElement, SubmitEvent};

use crate::graph::GraphFile;

fn target<T: JsCast>(ev: &Event) -> Option<T> {
	ev.target().and_then(|t| t.dyn_into::<T>().ok())
}

/// Controls for choosing a graph: upload a file, pick from the service's
/// catalogue, or type a name.
#[component]
pub fn GraphPicker(
	#[prop(into)] graphs: Signal<Vec<GraphFile>>,
	#[prop(into)] on_file: Callback<File>,
	#[prop(into)] on_name: Callback<String>,
) -> impl IntoView {
	let name_ref = NodeRef::<leptos::html::Input>::new();

	let on_file_change = move |ev: Event| {
		let Some(input) = target::<HtmlInputElement>(&ev) else {
			return;
		};
		if let Some(file) = input.files().and_then(|files| files.get(0)) {
			on_file.run(file);
		}
		// Lets the same file be chosen again.
		input.set_value("");
	};

	let on_select = move |ev: Event| {
		let Some(select) = target::<HtmlSelectElement>(&ev) else {
			return;
		};
		let name = select.value();
		if !name.is_empty() {
			on_name.run(name);
		}
	};

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let Some(input) = name_ref.get() else {
			return;
		};
		let name = input.value().trim().to_owned();
		if !name.is_empty() {
			on_name.run(name);
		}
	};

	view! {
		<div class="graph-picker">
			<label class="file-upload">
				"Upload graph "
				<input type="file" accept=".yaml,.yml,.json" on:change=on_file_change />
			</label>
			<select class="graph-select" on:change=on_select>
				<option value="">"Available graphs…"</option>
				{move || {
					graphs
						.get()
						.into_iter()
						.map(|graph| {
							let title = format!("{} ({})", graph.path, graph.format);
							let name = graph.name.clone();
							view! {
								<option value=name title=title>
									{graph.name}
								</option>
							}
						})
						.collect_view()
				}}
			</select>
			<form class="graph-name" on:submit=on_submit>
				<input type="text" placeholder="Graph name" node_ref=name_ref />
				<button type="submit">"Load"</button>
			</form>
		</div>
	}
}
