use leptos::prelude::*;
use thaw::*;

use crate::wizard::DURATION_CHOICES;

fn duration_label(minutes: u32) -> &'static str {
    match minutes {
        30 => "30 minutes",
        60 => "1 hour",
        90 => "1.5 hours",
        120 => "2 hours",
        _ => "",
    }
}

fn duration_description(minutes: u32) -> &'static str {
    match minutes {
        30 => "Quick session",
        60 => "Standard lesson",
        90 => "Extended session",
        120 => "Intensive lesson",
        _ => "",
    }
}

/// The four lesson lengths, rendered as labeled options.
#[component]
pub fn DurationPicker(
    selected: Signal<u32>,
    on_select: impl Fn(u32) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    view! {
        <div class="duration-picker">
            {move || {
                let current = selected.get();

                DURATION_CHOICES
                    .into_iter()
                    .map(|minutes| {
                        view! {
                            <div class="duration-option">
                                <Button
                                    class="duration-option-button"
                                    appearance=if current == minutes {
                                        ButtonAppearance::Primary
                                    } else {
                                        ButtonAppearance::Secondary
                                    }
                                    on_click=move |_| on_select(minutes)
                                >
                                    <div class="duration-option-content">
                                        <strong>{duration_label(minutes)}</strong>
                                        <div class="duration-option-description">
                                            {duration_description(minutes)}
                                        </div>
                                    </div>
                                </Button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_offered_duration_has_a_label_and_description() {
        for minutes in DURATION_CHOICES {
            assert!(!duration_label(minutes).is_empty());
            assert!(!duration_description(minutes).is_empty());
        }
    }
}
