use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, MessageBar, MessageBarIntent};

/// Blocking notification for guard failures and remote errors. Stays on
/// screen until dismissed.
#[component]
pub fn ErrorNotice(
    message: String,
    on_dismiss: impl Fn() + 'static + Copy + Send + Sync,
) -> impl IntoView {
    view! {
        <div class="error-notice">
            <MessageBar intent=MessageBarIntent::Error>
                {message}
            </MessageBar>
            <Button
                appearance=ButtonAppearance::Subtle
                on_click=move |_| on_dismiss()
            >
                "Dismiss"
            </Button>
        </div>
    }
}
