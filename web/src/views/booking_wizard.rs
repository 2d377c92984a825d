use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::components::{DurationPicker, ErrorNotice, LoadingView, TimeSlotPicker};
use crate::server::{book_lesson, get_available_slots, BookingSubmitResult};
use crate::wizard::{BookingWizard, SubmitOutcome, WizardStep};

/// The booking wizard page. All session state lives in one
/// [`BookingWizard`] behind a signal; the markup below is a pure rendering
/// of whatever step the machine reports, and every user action funnels back
/// through the machine's transition methods.
#[component]
pub fn BookingWizardPage() -> impl IntoView {
    let wizard = RwSignal::new(BookingWizard::new());

    // Slot-fetch driver: whenever the machine reports that the visible slot
    // list no longer belongs to the selected date, start a fetch and feed
    // the outcome back under its ticket. Stale responses are discarded by
    // the machine, so rapid date changes cannot interleave.
    Effect::new(move |_| {
        if !wizard.with(|w| w.needs_slot_fetch()) {
            return;
        }
        let mut ticket = None;
        wizard.update(|w| ticket = w.begin_slot_fetch());
        let Some(ticket) = ticket else {
            return;
        };
        let date = wizard.with_untracked(|w| w.draft().date.clone());
        spawn_local(async move {
            let result = get_available_slots(date).await.map_err(|_| ());
            wizard.update(|w| w.apply_slot_fetch(ticket, result));
        });
    });

    let handle_submit = move || {
        let mut ticket = None;
        wizard.update(|w| ticket = w.begin_submit());
        let Some(ticket) = ticket else {
            // Guard failed; the machine already recorded the notice.
            return;
        };
        let request = wizard.with_untracked(|w| w.draft().to_request());
        spawn_local(async move {
            let outcome = match book_lesson(request).await {
                Ok(BookingSubmitResult::Accepted) => SubmitOutcome::Accepted,
                Ok(BookingSubmitResult::Rejected { error }) => SubmitOutcome::Rejected(error),
                Err(_) => SubmitOutcome::Failed,
            };
            wizard.update(|w| w.apply_submit(ticket, outcome));
        });
    };

    // Memos so keystrokes into the draft don't remount the current step.
    let step = Memo::new(move |_| wizard.with(|w| w.step()));
    let progress = Memo::new(move |_| wizard.with(|w| w.progress()));
    let notice = Memo::new(move |_| wizard.with(|w| w.notice().map(|n| n.to_string())));

    view! {
        <div class="booking-wizard">
            <div class="booking-wizard-header">
                <h1>"Book Your Private Lesson"</h1>
                <p>"Select your preferred date, time, and duration"</p>
            </div>

            <div class="booking-wizard-body">
                <div class="progress-container">
                    <div class="progress-bar">
                        <div
                            class="progress-fill"
                            style:width=move || format!("{}%", progress.get())
                        ></div>
                    </div>
                    <p class="progress-text">
                        {move || format!("Step {} of 4", progress.get() / 25)}
                    </p>
                </div>

                {move || {
                    notice
                        .get()
                        .map(|message| {
                            view! {
                                <ErrorNotice
                                    message=message
                                    on_dismiss=move || wizard.update(|w| w.dismiss_notice())
                                />
                            }
                        })
                }}

                {move || match step.get() {
                    WizardStep::SelectDate => view! { <SelectDateStep wizard=wizard/> }.into_any(),
                    WizardStep::SelectTime => view! { <SelectTimeStep wizard=wizard/> }.into_any(),
                    WizardStep::SelectDuration => {
                        view! { <SelectDurationStep wizard=wizard/> }.into_any()
                    }
                    WizardStep::ContactInfo => {
                        view! { <ContactInfoStep wizard=wizard on_submit=handle_submit/> }.into_any()
                    }
                    WizardStep::Submitting => {
                        view! { <LoadingView message="Creating your booking..."/> }.into_any()
                    }
                    WizardStep::Confirmed => view! { <ConfirmedStep wizard=wizard/> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn SelectDateStep(wizard: RwSignal<BookingWizard>) -> impl IntoView {
    let date = RwSignal::new(wizard.with_untracked(|w| w.draft().date.clone()));

    view! {
        <div class="step">
            <h2 class="step-title">"Select Date"</h2>
            <div class="form-group">
                <label for="booking-date">"Choose your preferred date:"</label>
                <Input
                    id="booking-date"
                    input_type=InputType::Date
                    value=date
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        wizard.update(|w| w.set_date(value));
                    }
                />
            </div>
            <div class="navigation">
                <div></div>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| {
                        wizard.update(|w| {
                            w.next();
                        })
                    }
                >
                    "Next"
                </Button>
            </div>
        </div>
    }
}

#[component]
fn SelectTimeStep(wizard: RwSignal<BookingWizard>) -> impl IntoView {
    let loading = Memo::new(move |_| wizard.with(|w| w.is_loading_slots()));
    let slots = Signal::derive(move || wizard.with(|w| w.slots().to_vec()));
    let selected = Signal::derive(move || wizard.with(|w| w.draft().time.clone()));

    view! {
        <div class="step">
            <h2 class="step-title">"Select Time"</h2>
            {move || {
                if loading.get() {
                    view! {
                        <LoadingView message="Loading available time slots..."/>
                    }
                    .into_any()
                } else {
                    view! {
                        <TimeSlotPicker
                            slots=slots
                            selected=selected
                            on_select=move |slot: String| {
                                wizard.update(|w| w.select_time(&slot))
                            }
                        />
                    }
                    .into_any()
                }
            }}
            <div class="navigation">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| {
                        wizard.update(|w| {
                            w.previous();
                        })
                    }
                >
                    "Previous"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| {
                        wizard.update(|w| {
                            w.next();
                        })
                    }
                >
                    "Next"
                </Button>
            </div>
        </div>
    }
}

#[component]
fn SelectDurationStep(wizard: RwSignal<BookingWizard>) -> impl IntoView {
    let selected = Signal::derive(move || wizard.with(|w| w.draft().duration_minutes));

    view! {
        <div class="step">
            <h2 class="step-title">"Select Duration"</h2>
            <DurationPicker
                selected=selected
                on_select=move |minutes| wizard.update(|w| w.set_duration(minutes))
            />
            <div class="navigation">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| {
                        wizard.update(|w| {
                            w.previous();
                        })
                    }
                >
                    "Previous"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| {
                        wizard.update(|w| {
                            w.next();
                        })
                    }
                >
                    "Next"
                </Button>
            </div>
        </div>
    }
}

#[component]
fn ContactInfoStep(
    wizard: RwSignal<BookingWizard>,
    on_submit: impl Fn() + 'static + Copy + Send + Sync,
) -> impl IntoView {
    // Field signals seed from the draft so entered data survives a failed
    // submission; every edit is pushed straight back into the machine.
    let name = RwSignal::new(wizard.with_untracked(|w| w.draft().name.clone()));
    let email = RwSignal::new(wizard.with_untracked(|w| w.draft().email.clone()));
    let phone = RwSignal::new(wizard.with_untracked(|w| w.draft().phone.clone()));
    let notes = RwSignal::new(wizard.with_untracked(|w| w.draft().notes.clone()));

    let summary = wizard.with_untracked(|w| {
        (
            w.draft().date.clone(),
            w.draft().time.clone(),
            w.draft().duration_minutes,
        )
    });
    let (summary_date, summary_time, summary_duration) = summary;

    view! {
        <div class="step">
            <h2 class="step-title">"Your Information"</h2>

            <div class="booking-summary">
                <h3>"Booking Summary"</h3>
                <div class="summary-item">
                    <span>"Date:"</span>
                    <strong>{summary_date}</strong>
                </div>
                <div class="summary-item">
                    <span>"Time:"</span>
                    <strong>{summary_time}</strong>
                </div>
                <div class="summary-item">
                    <span>"Duration:"</span>
                    <strong>{format!("{} min", summary_duration)}</strong>
                </div>
            </div>

            <form
                class="contact-form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    on_submit();
                }
            >
                <div class="form-group">
                    <label for="contact-name">"Full Name *"</label>
                    <Input
                        id="contact-name"
                        placeholder="Your full name"
                        value=name
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            wizard.update(|w| w.set_name(value));
                        }
                    />
                </div>
                <div class="form-group">
                    <label for="contact-email">"Email Address *"</label>
                    <Input
                        id="contact-email"
                        input_type=InputType::Email
                        placeholder="your@email.com"
                        value=email
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            wizard.update(|w| w.set_email(value));
                        }
                    />
                </div>
                <div class="form-group">
                    <label for="contact-phone">"Phone Number *"</label>
                    <Input
                        id="contact-phone"
                        input_type=InputType::Tel
                        placeholder="(555) 123-4567"
                        value=phone
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            wizard.update(|w| w.set_phone(value));
                        }
                    />
                </div>
                <div class="form-group">
                    <label for="contact-notes">"Additional Notes"</label>
                    <Textarea
                        id="contact-notes"
                        placeholder="Anything the instructor should know..."
                        value=notes
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            wizard.update(|w| w.set_notes(value));
                        }
                    />
                </div>

                <div class="navigation">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| {
                            wizard.update(|w| {
                                w.previous();
                            })
                        }
                    >
                        "Previous"
                    </Button>
                    <Button
                        button_type=ButtonType::Submit
                        appearance=ButtonAppearance::Primary
                    >
                        "Book Lesson"
                    </Button>
                </div>
            </form>
        </div>
    }
}

#[component]
fn ConfirmedStep(wizard: RwSignal<BookingWizard>) -> impl IntoView {
    view! {
        <div class="confirmation-step">
            <div class="success-icon">"✓"</div>
            <h2>"Booking Confirmed!"</h2>
            <p class="confirmation-text">
                "Your private lesson has been successfully booked. \
                 You will receive a confirmation email shortly."
            </p>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| {
                    wizard.update(|w| {
                        w.restart();
                    })
                }
            >
                "Book Another Lesson"
            </Button>
        </div>
    }
}
