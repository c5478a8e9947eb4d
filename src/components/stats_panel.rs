use leptos::prelude::*;

use crate::graph::StatsSummary;

/// Totals, optional counts and the node type legend.
#[component]
pub fn StatsPanel(#[prop(into)] summary: Signal<Option<StatsSummary>>) -> impl IntoView {
	view! {
		<section class="stats-panel">
			<h3>"Statistics"</h3>
			{move || match summary.get() {
				None => view! { <p class="placeholder">"No graph loaded"</p> }.into_any(),
				Some(summary) => {
					view! {
						<dl class="stats-rows">
							{summary
								.rows
								.into_iter()
								.map(|row| {
									view! {
										<div class="stat-row">
											<dt>{row.label}</dt>
											<dd>{row.value}</dd>
										</div>
									}
								})
								.collect_view()}
						</dl>
						<ul class="legend">
							{summary
								.legend
								.into_iter()
								.map(|entry| {
									view! {
										<li class="legend-entry">
											<span
												class="legend-swatch"
												style=format!("background-color: {};", entry.color)
											></span>
											<span class="legend-label">{entry.label}</span>
											<span class="legend-count">{entry.count}</span>
										</li>
									}
								})
								.collect_view()}
						</ul>
					}
						.into_any()
				}
			}}
		</section>
	}
}
