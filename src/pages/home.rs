use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use log::warn;
use web_sys::File;

use crate::components::{DetailPanel, ForceGraphCanvas, GraphPicker, StatsPanel};
use crate::graph::SelectionEvent;
use crate::loader::{self, ApiConfig};
use crate::state::GraphView;

/// Graph viewer: loader controls, canvas, statistics and node details.
///
/// Opened as `/graph/:name`, the named graph is loaded on mount.
#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<ApiConfig>().unwrap_or_default();
	let view_state = RwSignal::new(GraphView::default());
	let catalogue = RwSignal::new(Vec::new());
	let fit_request = RwSignal::new(0u32);

	let graph = Memo::new(move |_| view_state.with(|v| v.graph().cloned()));
	let model = Signal::derive(move || graph.get().map(|g| Arc::clone(&g.model)));
	let summary = Signal::derive(move || graph.get().map(|g| g.summary.clone()));
	let selected = Memo::new(move |_| view_state.with(|v| v.selection().node_id().map(str::to_owned)));
	let detail = Signal::derive(move || view_state.with(|v| v.detail()));
	let status = Signal::derive(move || view_state.with(|v| v.status().to_string()));
	let status_is_error = Signal::derive(move || view_state.with(|v| v.status().is_error()));

	let load_name = {
		let config = config.clone();
		move |name: String| {
			let config = config.clone();
			// Status is set before the request goes out.
			view_state.update(|v| v.begin_load(&name));
			spawn_local(async move {
				let result = loader::load_by_name(&config, &name).await;
				view_state.update(|v| v.complete_load(&name, result));
			});
		}
	};

	let load_file = {
		let config = config.clone();
		move |file: File| {
			let config = config.clone();
			let name = file.name();
			view_state.update(|v| v.begin_load(&name));
			spawn_local(async move {
				let result = loader::load_from_file(&config, file).await;
				view_state.update(|v| v.complete_load(&name, result));
			});
		}
	};

	{
		let config = config.clone();
		spawn_local(async move {
			match loader::list_graphs(&config).await {
				Ok(graphs) => catalogue.set(graphs),
				Err(err) => warn!("graph catalogue unavailable: {}", err),
			}
		});
	}

	let params = use_params_map();
	{
		let load_name = load_name.clone();
		Effect::new(move |_| {
			if let Some(name) = params.read().get("name").filter(|n| !n.is_empty()) {
				load_name(name);
			}
		});
	}

	view! {
		<div class="app-layout">
			<header class="toolbar">
				<h1>"State Graph Viewer"</h1>
				<GraphPicker graphs=catalogue on_file=load_file on_name=load_name />
				<span class="status" class:error=status_is_error>
					{status}
				</span>
				<button class="fit-button" on:click=move |_| fit_request.update(|n| *n += 1)>
					"Fit to view"
				</button>
			</header>
			<main class="graph-area">
				<ForceGraphCanvas
					model=model
					selected=selected
					fit_request=fit_request
					on_node_click=move |id: String| {
						view_state.update(|v| v.select(SelectionEvent::NodeClick(id)))
					}
					on_background_click=move |_: ()| {
						view_state.update(|v| v.select(SelectionEvent::BackgroundClick))
					}
				/>
			</main>
			<aside class="sidebar">
				<StatsPanel summary=summary />
				<DetailPanel
					detail=detail
					on_clear=move |_: ()| view_state.update(|v| v.select(SelectionEvent::Clear))
				/>
			</aside>
		</div>
	}
}
