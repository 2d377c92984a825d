use shared_types::BookingRequest;

/// Lesson lengths the booking form offers, in minutes.
pub const DURATION_CHOICES: [u32; 4] = [30, 60, 90, 120];

pub const DEFAULT_DURATION_MINUTES: u32 = 60;

pub const MSG_SELECT_TIME: &str = "Please select a time slot before continuing.";
pub const MSG_SELECT_DURATION: &str = "Please select a lesson duration before continuing.";
pub const MSG_REQUIRED_FIELDS: &str = "Please fill in your name, email, and phone number.";
pub const MSG_SLOTS_FAILED: &str = "Could not load available time slots. Please try again.";
pub const MSG_BOOKING_FAILED: &str = "Something went wrong while submitting your booking.";

/// The position of the wizard within the booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    SelectDate,
    SelectTime,
    SelectDuration,
    ContactInfo,
    Submitting,
    Confirmed,
}

/// The in-progress booking form data before successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub date: String,
    pub time: String,
    pub duration_minutes: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            date: String::new(),
            time: String::new(),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            notes: String::new(),
        }
    }
}

impl BookingDraft {
    pub fn to_request(&self) -> BookingRequest {
        BookingRequest {
            date: self.date.clone(),
            time: self.time.clone(),
            duration: self.duration_minutes,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Stamp handed out for each remote call the wizard starts. Only the most
/// recently issued ticket is live; outcomes arriving under an older ticket
/// are discarded, so a slow response for a superseded date (or a submit from
/// a restarted session) can never overwrite current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Result of a `book-lesson` call, as seen by the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Accepted,
    /// The service refused the booking and said why.
    Rejected(String),
    /// The service could not be reached or its response was unreadable.
    Failed,
}

/// The booking wizard state machine.
///
/// Owns every piece of per-session state: the current step, the draft, the
/// fetched slot list, and the pending user notice. All mutation goes through
/// the transition methods; the view layer renders whatever step this reports
/// and feeds remote-call outcomes back in with the ticket it was handed.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    step: WizardStep,
    draft: BookingDraft,
    slots: Vec<String>,
    /// Date the current `slots` list was fetched for.
    slots_for: Option<String>,
    /// A fetch for the current date failed; suppresses refetching until the
    /// user leaves the SelectTime step or changes the date.
    fetch_failed: bool,
    loading_slots: bool,
    notice: Option<String>,
    next_ticket: u64,
    live_fetch: Option<FetchTicket>,
    live_submit: Option<FetchTicket>,
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::SelectDate,
            draft: BookingDraft::default(),
            slots: Vec::new(),
            slots_for: None,
            fetch_failed: false,
            loading_slots: false,
            notice: None,
            next_ticket: 0,
            live_fetch: None,
            live_submit: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn is_loading_slots(&self) -> bool {
        self.loading_slots
    }

    /// Pending blocking notification (guard failure or remote error), if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Progress percentage for the progress bar: 25 per data-collection
    /// step; Submitting and Confirmed hold at 100.
    pub fn progress(&self) -> u32 {
        match self.step {
            WizardStep::SelectDate => 25,
            WizardStep::SelectTime => 50,
            WizardStep::SelectDuration => 75,
            WizardStep::ContactInfo | WizardStep::Submitting | WizardStep::Confirmed => 100,
        }
    }

    /// True when the SelectTime step is showing but the slot list does not
    /// belong to the currently selected date. The view reacts by calling
    /// [`begin_slot_fetch`](Self::begin_slot_fetch).
    pub fn needs_slot_fetch(&self) -> bool {
        self.step == WizardStep::SelectTime
            && !self.draft.date.trim().is_empty()
            && !self.loading_slots
            && !self.fetch_failed
            && self.slots_for.as_deref() != Some(self.draft.date.as_str())
    }

    /// Record the selected date. Changing it invalidates the fetched slot
    /// list and any previously chosen time, and orphans an in-flight fetch.
    pub fn set_date(&mut self, date: String) {
        if self.draft.date == date {
            return;
        }
        self.draft.date = date;
        self.draft.time.clear();
        self.slots.clear();
        self.slots_for = None;
        self.fetch_failed = false;
        self.live_fetch = None;
        self.loading_slots = false;
    }

    /// Record a time chosen from the fetched slot list. Values the service
    /// did not offer for this date are ignored.
    pub fn select_time(&mut self, slot: &str) {
        if self.slots.iter().any(|s| s == slot) {
            self.draft.time = slot.to_string();
        }
    }

    pub fn set_duration(&mut self, minutes: u32) {
        if DURATION_CHOICES.contains(&minutes) {
            self.draft.duration_minutes = minutes;
        }
    }

    pub fn set_name(&mut self, value: String) {
        self.draft.name = value;
    }

    pub fn set_email(&mut self, value: String) {
        self.draft.email = value;
    }

    pub fn set_phone(&mut self, value: String) {
        self.draft.phone = value;
    }

    pub fn set_notes(&mut self, value: String) {
        self.draft.notes = value;
    }

    /// Advance one step. Returns false (and records a notice) when the
    /// current step's guard rejects the move; state is otherwise unchanged.
    /// ContactInfo advances through [`begin_submit`](Self::begin_submit),
    /// never through here.
    pub fn next(&mut self) -> bool {
        match self.step {
            WizardStep::SelectDate => {
                self.step = WizardStep::SelectTime;
                true
            }
            WizardStep::SelectTime => {
                if self.draft.time.trim().is_empty() {
                    self.notice = Some(MSG_SELECT_TIME.to_string());
                    return false;
                }
                self.step = WizardStep::SelectDuration;
                true
            }
            WizardStep::SelectDuration => {
                // Unreachable in practice: the duration defaults to 60 and
                // set_duration refuses values outside DURATION_CHOICES.
                if !DURATION_CHOICES.contains(&self.draft.duration_minutes) {
                    self.notice = Some(MSG_SELECT_DURATION.to_string());
                    return false;
                }
                self.step = WizardStep::ContactInfo;
                true
            }
            WizardStep::ContactInfo | WizardStep::Submitting | WizardStep::Confirmed => false,
        }
    }

    /// Move strictly one step backward. Legal from any non-terminal,
    /// non-Submitting state except the first.
    pub fn previous(&mut self) -> bool {
        let target = match self.step {
            WizardStep::SelectTime => WizardStep::SelectDate,
            WizardStep::SelectDuration => WizardStep::SelectTime,
            WizardStep::ContactInfo => WizardStep::SelectDuration,
            WizardStep::SelectDate | WizardStep::Submitting | WizardStep::Confirmed => {
                return false;
            }
        };
        if self.step == WizardStep::SelectTime {
            // Leaving the step forgives a failed fetch, so coming back to it
            // retries for the same date instead of showing a dead end.
            self.fetch_failed = false;
        }
        self.step = target;
        true
    }

    /// Mark the slot list as loading and hand out the ticket the eventual
    /// response must present. Only meaningful on the SelectTime step with a
    /// date chosen.
    pub fn begin_slot_fetch(&mut self) -> Option<FetchTicket> {
        if self.step != WizardStep::SelectTime || self.draft.date.trim().is_empty() {
            return None;
        }
        let ticket = self.issue_ticket();
        self.live_fetch = Some(ticket);
        self.loading_slots = true;
        self.fetch_failed = false;
        Some(ticket)
    }

    /// Apply a slot-fetch outcome. Outcomes for superseded tickets are
    /// dropped. Success replaces the list verbatim, in the order the service
    /// reported; failure leaves it empty and surfaces a generic notice.
    pub fn apply_slot_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<String>, ()>) {
        if self.live_fetch != Some(ticket) {
            return;
        }
        self.live_fetch = None;
        self.loading_slots = false;
        match result {
            Ok(slots) => {
                self.slots = slots;
                self.slots_for = Some(self.draft.date.clone());
            }
            Err(()) => {
                self.slots.clear();
                // The date is deliberately not marked as fetched: there is
                // no automatic retry while the step is showing, but leaving
                // and re-entering it tries again.
                self.fetch_failed = true;
                self.notice = Some(MSG_SLOTS_FAILED.to_string());
            }
        }
    }

    /// Enter Submitting, guarding the required contact fields. On guard
    /// failure a notice is recorded and the step stays at ContactInfo.
    pub fn begin_submit(&mut self) -> Option<FetchTicket> {
        if self.step != WizardStep::ContactInfo {
            return None;
        }
        if self.draft.name.trim().is_empty()
            || self.draft.email.trim().is_empty()
            || self.draft.phone.trim().is_empty()
        {
            self.notice = Some(MSG_REQUIRED_FIELDS.to_string());
            return None;
        }
        let ticket = self.issue_ticket();
        self.live_submit = Some(ticket);
        self.step = WizardStep::Submitting;
        Some(ticket)
    }

    /// Apply a submission outcome. Acceptance confirms the booking; a
    /// rejection or transport failure returns to ContactInfo with the draft
    /// intact and the reason surfaced.
    pub fn apply_submit(&mut self, ticket: FetchTicket, outcome: SubmitOutcome) {
        if self.live_submit != Some(ticket) {
            return;
        }
        self.live_submit = None;
        match outcome {
            SubmitOutcome::Accepted => {
                self.step = WizardStep::Confirmed;
            }
            SubmitOutcome::Rejected(error) => {
                self.notice = Some(error);
                self.step = WizardStep::ContactInfo;
            }
            SubmitOutcome::Failed => {
                self.notice = Some(MSG_BOOKING_FAILED.to_string());
                self.step = WizardStep::ContactInfo;
            }
        }
    }

    /// From Confirmed, clear everything and return to the first step.
    pub fn restart(&mut self) -> bool {
        if self.step != WizardStep::Confirmed {
            return false;
        }
        let next_ticket = self.next_ticket;
        *self = Self::new();
        // Keep the counter monotonic so a straggler from the previous
        // session can never match a freshly issued ticket.
        self.next_ticket = next_ticket;
        true
    }

    fn issue_ticket(&mut self) -> FetchTicket {
        self.next_ticket += 1;
        FetchTicket(self.next_ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wizard_at_time_step(date: &str, slots: &[&str]) -> BookingWizard {
        let mut wizard = BookingWizard::new();
        wizard.set_date(date.to_string());
        assert!(wizard.next());
        let ticket = wizard.begin_slot_fetch().expect("fetch should start");
        wizard.apply_slot_fetch(ticket, Ok(slots.iter().map(|s| s.to_string()).collect()));
        wizard
    }

    fn wizard_at_contact_step() -> BookingWizard {
        let mut wizard = wizard_at_time_step("2024-06-01", &["10:00", "11:00"]);
        wizard.select_time("10:00");
        assert!(wizard.next());
        wizard.set_duration(60);
        assert!(wizard.next());
        wizard
    }

    #[test]
    fn progress_tracks_step_through_the_happy_path() {
        let mut wizard = BookingWizard::new();
        assert_eq!(wizard.step(), WizardStep::SelectDate);
        assert_eq!(wizard.progress(), 25);

        wizard.set_date("2024-06-01".to_string());
        assert!(wizard.next());
        assert_eq!(wizard.progress(), 50);

        let ticket = wizard.begin_slot_fetch().unwrap();
        wizard.apply_slot_fetch(ticket, Ok(vec!["10:00".to_string()]));
        wizard.select_time("10:00");
        assert!(wizard.next());
        assert_eq!(wizard.progress(), 75);

        assert!(wizard.next());
        assert_eq!(wizard.step(), WizardStep::ContactInfo);
        assert_eq!(wizard.progress(), 100);
    }

    #[test]
    fn backward_moves_one_step_and_stops_at_the_first() {
        let mut wizard = wizard_at_contact_step();
        assert!(wizard.previous());
        assert_eq!(wizard.step(), WizardStep::SelectDuration);
        assert!(wizard.previous());
        assert_eq!(wizard.step(), WizardStep::SelectTime);
        assert!(wizard.previous());
        assert_eq!(wizard.step(), WizardStep::SelectDate);
        assert!(!wizard.previous());
        assert_eq!(wizard.step(), WizardStep::SelectDate);
        assert_eq!(wizard.progress(), 25);
    }

    #[test]
    fn forward_from_select_time_requires_a_chosen_slot() {
        let mut wizard = wizard_at_time_step("2024-06-01", &["10:00"]);
        assert!(!wizard.next());
        assert_eq!(wizard.step(), WizardStep::SelectTime);
        assert_eq!(wizard.notice(), Some(MSG_SELECT_TIME));

        wizard.dismiss_notice();
        wizard.select_time("10:00");
        assert!(wizard.next());
        assert_eq!(wizard.step(), WizardStep::SelectDuration);
        assert_eq!(wizard.notice(), None);
    }

    #[test]
    fn only_fetched_slots_are_selectable() {
        let mut wizard = wizard_at_time_step("2024-06-01", &["10:00", "11:00"]);
        wizard.select_time("23:45");
        assert_eq!(wizard.draft().time, "");
        wizard.select_time("11:00");
        assert_eq!(wizard.draft().time, "11:00");
    }

    #[test]
    fn submit_guard_requires_all_contact_fields() {
        let mut wizard = wizard_at_contact_step();
        wizard.set_name("A".to_string());
        wizard.set_email(String::new());
        wizard.set_phone("123".to_string());

        assert!(wizard.begin_submit().is_none());
        assert_eq!(wizard.step(), WizardStep::ContactInfo);
        assert_eq!(wizard.notice(), Some(MSG_REQUIRED_FIELDS));
        assert_eq!(wizard.draft().name, "A");

        // Whitespace-only values do not count as filled in.
        wizard.set_email("   ".to_string());
        assert!(wizard.begin_submit().is_none());
        assert_eq!(wizard.step(), WizardStep::ContactInfo);
    }

    #[test]
    fn slot_fetch_success_replaces_the_list_in_server_order() {
        let wizard = wizard_at_time_step("2024-06-01", &["14:00", "09:30", "14:00"]);
        assert_eq!(wizard.slots(), ["14:00", "09:30", "14:00"]);
        assert!(!wizard.is_loading_slots());
        assert!(!wizard.needs_slot_fetch());
    }

    #[test]
    fn slot_fetch_failure_leaves_the_list_empty_and_notifies() {
        let mut wizard = BookingWizard::new();
        wizard.set_date("2024-06-01".to_string());
        wizard.next();
        let ticket = wizard.begin_slot_fetch().unwrap();
        wizard.apply_slot_fetch(ticket, Err(()));

        assert!(wizard.slots().is_empty());
        assert_eq!(wizard.notice(), Some(MSG_SLOTS_FAILED));
        // No automatic retry while the step is still showing.
        assert!(!wizard.needs_slot_fetch());
    }

    #[test]
    fn reentering_select_time_after_a_failed_fetch_retries() {
        let mut wizard = BookingWizard::new();
        wizard.set_date("2024-06-01".to_string());
        wizard.next();
        let ticket = wizard.begin_slot_fetch().unwrap();
        wizard.apply_slot_fetch(ticket, Err(()));
        assert!(!wizard.needs_slot_fetch());

        // Stepping back and forward with the same date gives the user a
        // retry path.
        wizard.previous();
        wizard.next();
        assert!(wizard.needs_slot_fetch());

        let retry = wizard.begin_slot_fetch().expect("retry should start");
        wizard.apply_slot_fetch(retry, Ok(vec!["10:00".to_string()]));
        assert_eq!(wizard.slots(), ["10:00"]);
        assert!(!wizard.needs_slot_fetch());
    }

    #[test]
    fn stale_slot_response_is_discarded() {
        let mut wizard = BookingWizard::new();
        wizard.set_date("2024-06-01".to_string());
        wizard.next();
        let first = wizard.begin_slot_fetch().unwrap();

        // User backs out, picks another date, and returns before the first
        // response lands.
        wizard.previous();
        wizard.set_date("2024-06-02".to_string());
        wizard.next();
        let second = wizard.begin_slot_fetch().unwrap();

        wizard.apply_slot_fetch(first, Ok(vec!["10:00".to_string()]));
        assert!(wizard.slots().is_empty());
        assert!(wizard.is_loading_slots());

        wizard.apply_slot_fetch(second, Ok(vec!["16:00".to_string()]));
        assert_eq!(wizard.slots(), ["16:00"]);
        assert!(!wizard.is_loading_slots());
    }

    #[test]
    fn changing_the_date_invalidates_slots_and_chosen_time() {
        let mut wizard = wizard_at_time_step("2024-06-01", &["10:00"]);
        wizard.select_time("10:00");

        wizard.previous();
        wizard.set_date("2024-06-02".to_string());
        assert_eq!(wizard.draft().time, "");
        assert!(wizard.slots().is_empty());
        wizard.next();
        assert!(wizard.needs_slot_fetch());
    }

    #[test]
    fn reentering_select_time_with_the_same_date_does_not_refetch() {
        let mut wizard = wizard_at_time_step("2024-06-01", &["10:00"]);
        wizard.select_time("10:00");
        wizard.next();
        wizard.previous();
        assert_eq!(wizard.step(), WizardStep::SelectTime);
        assert!(!wizard.needs_slot_fetch());
        assert_eq!(wizard.slots(), ["10:00"]);
    }

    #[test]
    fn empty_date_never_requests_a_fetch() {
        let mut wizard = BookingWizard::new();
        wizard.next();
        assert_eq!(wizard.step(), WizardStep::SelectTime);
        assert!(!wizard.needs_slot_fetch());
        assert!(wizard.begin_slot_fetch().is_none());
    }

    #[test]
    fn successful_booking_confirms_and_restart_clears_the_draft() {
        let mut wizard = wizard_at_contact_step();
        wizard.set_name("A".to_string());
        wizard.set_email("a@a.com".to_string());
        wizard.set_phone("123".to_string());

        let ticket = wizard.begin_submit().expect("guard should pass");
        assert_eq!(wizard.step(), WizardStep::Submitting);
        assert_eq!(wizard.progress(), 100);

        let request = wizard.draft().to_request();
        assert_eq!(request.date, "2024-06-01");
        assert_eq!(request.time, "10:00");
        assert_eq!(request.duration, 60);

        wizard.apply_submit(ticket, SubmitOutcome::Accepted);
        assert_eq!(wizard.step(), WizardStep::Confirmed);

        assert!(wizard.restart());
        assert_eq!(wizard.step(), WizardStep::SelectDate);
        assert_eq!(wizard.draft(), &BookingDraft::default());
        assert!(wizard.slots().is_empty());
        assert_eq!(wizard.notice(), None);
    }

    #[test]
    fn rejected_booking_returns_to_contact_info_with_reason_and_draft() {
        let mut wizard = wizard_at_contact_step();
        wizard.set_name("A".to_string());
        wizard.set_email("a@a.com".to_string());
        wizard.set_phone("123".to_string());
        wizard.set_notes("first lesson".to_string());

        let ticket = wizard.begin_submit().unwrap();
        wizard.apply_submit(ticket, SubmitOutcome::Rejected("slot taken".to_string()));

        assert_eq!(wizard.step(), WizardStep::ContactInfo);
        assert_eq!(wizard.notice(), Some("slot taken"));
        assert_eq!(wizard.draft().name, "A");
        assert_eq!(wizard.draft().email, "a@a.com");
        assert_eq!(wizard.draft().phone, "123");
        assert_eq!(wizard.draft().notes, "first lesson");
        assert_eq!(wizard.draft().time, "10:00");
    }

    #[test]
    fn transport_failure_surfaces_a_generic_message() {
        let mut wizard = wizard_at_contact_step();
        wizard.set_name("A".to_string());
        wizard.set_email("a@a.com".to_string());
        wizard.set_phone("123".to_string());

        let ticket = wizard.begin_submit().unwrap();
        wizard.apply_submit(ticket, SubmitOutcome::Failed);

        assert_eq!(wizard.step(), WizardStep::ContactInfo);
        assert_eq!(wizard.notice(), Some(MSG_BOOKING_FAILED));
    }

    #[test]
    fn submit_outcome_from_a_previous_session_is_ignored() {
        let mut wizard = wizard_at_contact_step();
        wizard.set_name("A".to_string());
        wizard.set_email("a@a.com".to_string());
        wizard.set_phone("123".to_string());

        let ticket = wizard.begin_submit().unwrap();
        wizard.apply_submit(ticket, SubmitOutcome::Accepted);
        assert!(wizard.restart());

        // The straggler arrives after the restart.
        wizard.apply_submit(ticket, SubmitOutcome::Rejected("slot taken".to_string()));
        assert_eq!(wizard.step(), WizardStep::SelectDate);
        assert_eq!(wizard.notice(), None);
    }

    #[test]
    fn duration_outside_the_offered_choices_is_ignored() {
        let mut wizard = BookingWizard::new();
        wizard.set_duration(45);
        assert_eq!(wizard.draft().duration_minutes, DEFAULT_DURATION_MINUTES);
        wizard.set_duration(90);
        assert_eq!(wizard.draft().duration_minutes, 90);
    }

    #[test]
    fn previous_is_illegal_while_submitting() {
        let mut wizard = wizard_at_contact_step();
        wizard.set_name("A".to_string());
        wizard.set_email("a@a.com".to_string());
        wizard.set_phone("123".to_string());
        wizard.begin_submit().unwrap();

        assert!(!wizard.previous());
        assert!(!wizard.next());
        assert_eq!(wizard.step(), WizardStep::Submitting);
    }
}
