use leptos::prelude::*;

use crate::graph::{EdgeSpec, NodeDetail, edge_label};

fn edge_rows(edges: Vec<EdgeSpec>, outgoing: bool) -> impl IntoView {
	edges
		.into_iter()
		.map(|edge| {
			let peer = if outgoing { edge.to.clone() } else { edge.from.clone() };
			let arrow = if outgoing { "→ " } else { "← " };
			let label = edge_label(&edge);
			view! {
				<li>
					{arrow}
					<code>{peer}</code>
					{(!label.is_empty()).then(|| view! { <span class="edge-label">" [" {label} "]"</span> })}
				</li>
			}
		})
		.collect_view()
}

/// Field dump of the selected node, or a placeholder when nothing is selected.
#[component]
pub fn DetailPanel(
	#[prop(into)] detail: Signal<Option<NodeDetail>>,
	#[prop(into)] on_clear: Callback<()>,
) -> impl IntoView {
	view! {
		<section class="detail-panel">
			<h3>"Node Details"</h3>
			{move || match detail.get() {
				None => view! { <p class="placeholder">"Click a node to view details"</p> }.into_any(),
				Some(detail) => {
					let NodeDetail { fields, properties, incoming, outgoing } = detail;
					view! {
						<button class="detail-close" title="Clear selection" on:click=move |_| on_clear.run(())>
							"×"
						</button>
						<dl class="detail-fields">
							{fields
								.into_iter()
								.map(|(label, value)| {
									view! {
										<div class="detail-row">
											<dt>{label}</dt>
											<dd>{value}</dd>
										</div>
									}
								})
								.collect_view()}
						</dl>
						{properties
							.map(|props| {
								view! {
									<h4>"Properties"</h4>
									<pre class="detail-properties">{props}</pre>
								}
							})}
						<h4>{format!("Incoming ({})", incoming.len())}</h4>
						<ul class="detail-edges">{edge_rows(incoming, false)}</ul>
						<h4>{format!("Outgoing ({})", outgoing.len())}</h4>
						<ul class="detail-edges">{edge_rows(outgoing, true)}</ul>
					}
						.into_any()
				}
			}}
		</section>
	}
}
