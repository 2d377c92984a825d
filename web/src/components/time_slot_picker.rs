use leptos::prelude::*;
use thaw::*;

/// Grid of the time labels the booking service reported for the selected
/// date, in the order they were reported. Selection only ever offers
/// fetched values, which is what keeps the draft's time honest.
#[component]
pub fn TimeSlotPicker(
    slots: Signal<Vec<String>>,
    selected: Signal<String>,
    on_select: impl Fn(String) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    view! {
        <div class="time-slot-picker">
            <div class="time-slot-picker-header">
                <h4>"Available Time Slots"</h4>
            </div>

            <div class="time-slot-picker-content">
                {move || {
                    let available = slots.get();
                    let current = selected.get();

                    if available.is_empty() {
                        view! {
                            <div class="time-slot-picker-empty">
                                <p>"No available time slots for this date."</p>
                                <p class="time-slot-picker-suggestion">
                                    "Please go back and try a different date."
                                </p>
                            </div>
                        }
                        .into_any()
                    } else {
                        view! {
                            <div class="time-slot-picker-grid">
                                {available
                                    .into_iter()
                                    .map(|slot| {
                                        let is_selected = slot == current;
                                        let slot_clone = slot.clone();

                                        view! {
                                            <Button
                                                class="time-slot-button"
                                                appearance=if is_selected {
                                                    ButtonAppearance::Primary
                                                } else {
                                                    ButtonAppearance::Secondary
                                                }
                                                on_click=move |_| {
                                                    on_select(slot_clone.clone());
                                                }
                                            >
                                                {slot}
                                            </Button>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </div>
                        }
                        .into_any()
                    }
                }}
            </div>
        </div>
    }
}
