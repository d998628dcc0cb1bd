use leptos::prelude::*;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<main class="page">
			<h1>"Not Found"</h1>
			<p>
				"Nothing to sketch here. " <a href="/">"Back to the canvas"</a>
			</p>
		</main>
	}
}
