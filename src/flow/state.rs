//! Screen flow as a reducer.
//!
//! [`FlowState::reduce`] takes the current state and one event and returns the
//! next state plus the effects the caller must run (timers, store calls, sounds).
//! It never performs I/O itself, so the whole flow is testable without a UI.

use crate::calendar::MonthCursor;
use crate::models::{find_participant, toggled, AvailabilityRecord, AvailabilityRequest, AvailabilityResponse};
use crate::utils::logging::log_flow_transition;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::sync::Arc;

pub const MSG_NAME_REQUIRED: &str = "Bitte wähle deinen Namen aus";
pub const MSG_UNKNOWN_NAME: &str = "Diesen Namen kennen wir leider nicht";
pub const MSG_TOGGLE_FAILED: &str = "Fehler beim Speichern der Verfügbarkeit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Intro,
    Title,
    NameEntry,
    Calendar,
    Celebration,
    Summary,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Intro => "intro",
            Screen::Title => "title",
            Screen::NameEntry => "name-entry",
            Screen::Calendar => "calendar",
            Screen::Celebration => "celebration",
            Screen::Summary => "summary",
        }
    }
}

/// One-shot timers gating automatic transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    IntroFailsafe,
    TitleDisplay,
    CelebrationDisplay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPurpose {
    /// First load after entering the calendar
    Enter,
    Poll,
    /// Follow-up to a toggle, successful or not
    Reconcile,
    /// Last load before the celebration
    Save,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    Start,
    IntroCompleted,
    TimerElapsed(TimerKind),
    NameSelected(String),
    NameConfirmed,
    ToggleDay(NaiveDate),
    ToggleCompleted {
        date: NaiveDate,
        result: Result<AvailabilityResponse, String>,
    },
    PollTick,
    FetchCompleted {
        seq: u64,
        purpose: FetchPurpose,
        result: Result<Vec<AvailabilityRecord>, String>,
    },
    NextMonth,
    PrevMonth,
    SaveRequested,
    DismissNotification,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Schedule(TimerKind),
    Cancel(TimerKind),
    StartPolling,
    StopPolling,
    Fetch { seq: u64, purpose: FetchPurpose },
    SendToggle(AvailabilityRequest),
    PlayIntro,
    PlayCelebration,
}

/// Dismissible banner on the calendar screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Cleared by the next successful fetch
    LoadFailed(String),
    /// Stays until dismissed
    ToggleFailed,
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::LoadFailed(message) => message,
            Notice::ToggleFailed => MSG_TOGGLE_FAILED,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: FlowState,
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowState {
    screen: Screen,
    started: bool,
    selected_name: Option<&'static str>,
    validation_message: Option<String>,
    current_user: Option<String>,
    records: Arc<Vec<AvailabilityRecord>>,
    displayed_month: MonthCursor,
    notification: Option<Notice>,
    pending_fetches: usize,
    pending_toggles: usize,
    saving: bool,
    next_fetch_seq: u64,
    // Fetch results with a lower sequence number are stale.
    accept_from_seq: u64,
    next_provisional_id: i64,
}

impl FlowState {
    /// Fresh session on the intro screen, showing the month of `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            screen: Screen::Intro,
            started: false,
            selected_name: None,
            validation_message: None,
            current_user: None,
            records: Arc::new(Vec::new()),
            displayed_month: MonthCursor::containing(today),
            notification: None,
            pending_fetches: 0,
            pending_toggles: 0,
            saving: false,
            next_fetch_seq: 0,
            accept_from_seq: 0,
            next_provisional_id: -1,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected_name(&self) -> Option<&'static str> {
        self.selected_name
    }

    pub fn validation_message(&self) -> Option<&str> {
        self.validation_message.as_deref()
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    pub fn records(&self) -> &[AvailabilityRecord] {
        &self.records
    }

    /// Shared handle to the current record list. Later transitions replace the
    /// list instead of editing it, so the snapshot never changes underneath.
    pub fn snapshot(&self) -> Arc<Vec<AvailabilityRecord>> {
        Arc::clone(&self.records)
    }

    pub fn displayed_month(&self) -> MonthCursor {
        self.displayed_month
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_ref().map(Notice::message)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notification.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending_fetches > 0
    }

    pub fn pending_toggles(&self) -> usize {
        self.pending_toggles
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// True once nothing the flow started is still waiting on the store.
    pub fn is_settled(&self) -> bool {
        self.pending_fetches == 0 && self.pending_toggles == 0
    }

    pub fn reduce(&self, event: FlowEvent) -> Transition {
        let mut next = self.clone();
        let effects = next.apply(event);
        Transition { state: next, effects }
    }

    fn apply(&mut self, event: FlowEvent) -> Vec<Effect> {
        match event {
            FlowEvent::Start => self.on_start(),
            FlowEvent::IntroCompleted => self.leave_intro(true),
            FlowEvent::TimerElapsed(TimerKind::IntroFailsafe) => {
                if self.screen == Screen::Intro {
                    warn!("Intro did not report completion in time, moving on");
                }
                self.leave_intro(false)
            }
            FlowEvent::TimerElapsed(TimerKind::TitleDisplay) => {
                if self.screen == Screen::Title {
                    self.enter(Screen::NameEntry);
                }
                Vec::new()
            }
            FlowEvent::TimerElapsed(TimerKind::CelebrationDisplay) => {
                if self.screen == Screen::Celebration {
                    self.enter(Screen::Summary);
                }
                Vec::new()
            }
            FlowEvent::NameSelected(name) => self.on_name_selected(&name),
            FlowEvent::NameConfirmed => self.on_name_confirmed(),
            FlowEvent::ToggleDay(date) => self.on_toggle(date),
            FlowEvent::ToggleCompleted { date, result } => self.on_toggle_completed(date, result),
            FlowEvent::PollTick => {
                if self.screen == Screen::Calendar && !self.saving {
                    vec![self.issue_fetch(FetchPurpose::Poll)]
                } else {
                    Vec::new()
                }
            }
            FlowEvent::FetchCompleted { seq, purpose, result } => {
                self.on_fetch_completed(seq, purpose, result)
            }
            FlowEvent::NextMonth => {
                if self.screen == Screen::Calendar {
                    self.displayed_month = self.displayed_month.next();
                }
                Vec::new()
            }
            FlowEvent::PrevMonth => {
                if self.screen == Screen::Calendar {
                    self.displayed_month = self.displayed_month.prev();
                }
                Vec::new()
            }
            FlowEvent::SaveRequested => {
                if self.screen != Screen::Calendar || self.saving {
                    return Vec::new();
                }
                self.saving = true;
                if self.pending_toggles > 0 {
                    info!("Save requested, waiting for {} toggle(s) to finish", self.pending_toggles);
                    return Vec::new();
                }
                info!("Save requested, loading latest availability before celebrating");
                vec![self.issue_fetch(FetchPurpose::Save)]
            }
            FlowEvent::DismissNotification => {
                self.notification = None;
                Vec::new()
            }
        }
    }

    fn enter(&mut self, screen: Screen) {
        log_flow_transition(self.screen.as_str(), screen.as_str());
        self.screen = screen;
    }

    fn issue_fetch(&mut self, purpose: FetchPurpose) -> Effect {
        let seq = self.next_fetch_seq;
        self.next_fetch_seq += 1;
        self.pending_fetches += 1;
        Effect::Fetch { seq, purpose }
    }

    fn on_start(&mut self) -> Vec<Effect> {
        if self.started || self.screen != Screen::Intro {
            return Vec::new();
        }
        self.started = true;
        vec![Effect::Schedule(TimerKind::IntroFailsafe), Effect::PlayIntro]
    }

    fn leave_intro(&mut self, completed: bool) -> Vec<Effect> {
        if self.screen != Screen::Intro {
            debug!("Ignoring late intro signal on {}", self.screen.as_str());
            return Vec::new();
        }
        self.enter(Screen::Title);
        let mut effects = Vec::new();
        if completed {
            effects.push(Effect::Cancel(TimerKind::IntroFailsafe));
        }
        effects.push(Effect::Schedule(TimerKind::TitleDisplay));
        effects
    }

    fn on_name_selected(&mut self, name: &str) -> Vec<Effect> {
        if self.screen != Screen::NameEntry {
            return Vec::new();
        }
        match find_participant(name) {
            Some(participant) => {
                self.selected_name = Some(participant);
                self.validation_message = None;
            }
            None => {
                self.selected_name = None;
                self.validation_message = Some(MSG_UNKNOWN_NAME.to_string());
            }
        }
        Vec::new()
    }

    fn on_name_confirmed(&mut self) -> Vec<Effect> {
        if self.screen != Screen::NameEntry {
            return Vec::new();
        }
        let Some(name) = self.selected_name else {
            self.validation_message = Some(MSG_NAME_REQUIRED.to_string());
            return Vec::new();
        };

        info!("{} opened the calendar", name);
        self.current_user = Some(name.to_string());
        self.validation_message = None;
        self.enter(Screen::Calendar);
        vec![self.issue_fetch(FetchPurpose::Enter), Effect::StartPolling]
    }

    fn on_toggle(&mut self, date: NaiveDate) -> Vec<Effect> {
        if self.screen != Screen::Calendar || self.saving {
            return Vec::new();
        }
        let Some(user) = self.current_user.clone() else {
            return Vec::new();
        };

        self.records = Arc::new(toggled(&self.records, &user, date, self.next_provisional_id));
        self.next_provisional_id -= 1;
        // Anything fetched before this toggle would undo the optimistic change.
        self.accept_from_seq = self.next_fetch_seq;
        self.pending_toggles += 1;

        vec![Effect::SendToggle(AvailabilityRequest::toggle(&user, date))]
    }

    fn on_toggle_completed(
        &mut self,
        date: NaiveDate,
        result: Result<AvailabilityResponse, String>,
    ) -> Vec<Effect> {
        self.pending_toggles = self.pending_toggles.saturating_sub(1);
        match result {
            Ok(response) => debug!("Store confirmed toggle on {}: {}", date, response.message),
            Err(e) => {
                warn!("Toggle on {} failed, discarding optimistic change: {}", date, e);
                self.notification = Some(Notice::ToggleFailed);
            }
        }

        if self.screen != Screen::Calendar {
            return Vec::new();
        }
        if self.saving {
            // The save fetch doubles as the reconcile once the last toggle is in
            if self.pending_toggles == 0 {
                return vec![self.issue_fetch(FetchPurpose::Save)];
            }
            return Vec::new();
        }
        vec![self.issue_fetch(FetchPurpose::Reconcile)]
    }

    fn on_fetch_completed(
        &mut self,
        seq: u64,
        purpose: FetchPurpose,
        result: Result<Vec<AvailabilityRecord>, String>,
    ) -> Vec<Effect> {
        self.pending_fetches = self.pending_fetches.saturating_sub(1);

        match result {
            Ok(records) if seq >= self.accept_from_seq => {
                debug!("Accepted fetch #{} with {} records", seq, records.len());
                self.records = Arc::new(records);
                self.accept_from_seq = seq + 1;
                if matches!(self.notification, Some(Notice::LoadFailed(_))) {
                    self.notification = None;
                }
            }
            Ok(_) => debug!("Discarding stale fetch #{} ({:?})", seq, purpose),
            Err(e) => {
                warn!("Fetch #{} failed: {}", seq, e);
                // Toggle failures keep their own message
                if self.notification != Some(Notice::ToggleFailed) {
                    self.notification = Some(Notice::LoadFailed(e));
                }
            }
        }

        if purpose == FetchPurpose::Save && self.saving && self.screen == Screen::Calendar {
            self.saving = false;
            self.enter(Screen::Celebration);
            return vec![
                Effect::StopPolling,
                Effect::PlayCelebration,
                Effect::Schedule(TimerKind::CelebrationDisplay),
            ];
        }
        Vec::new()
    }
}
