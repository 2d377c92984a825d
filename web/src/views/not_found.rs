use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::*;

/// 404 fallback page.
#[component]
pub fn NotFoundPage() -> impl IntoView {
    let navigate = use_navigate();

    view! {
        <div class="not-found-container">
            <h1 class="not-found-code">"404"</h1>
            <p class="not-found-text">
                "The page you're looking for doesn't exist or may have been moved."
            </p>
            <Button
                appearance=ButtonAppearance::Primary
                on_click={
                    let navigate = navigate.clone();
                    move |_| {
                        navigate("/", Default::default());
                    }
                }
            >
                "Back to Booking"
            </Button>
        </div>
    }
}
