use leptos::prelude::*;

use crate::components::diagram::{DiagramCanvas, samples::sample_diagram};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let diagram = Signal::derive(sample_diagram);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-diagram">
				<DiagramCanvas diagram=diagram fullscreen=true />
				<div class="diagram-overlay">
					<h1>"Diagram Editor"</h1>
					<p class="subtitle">
						"Drag nodes to move them. Drag from a side dot onto another node to connect. Delete removes the selected node."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
