use super::state::{Effect, FlowEvent, FlowState, TimerKind};
use super::timers::TimerRegistry;
use crate::audio::AudioManager;
use crate::models::{AvailabilityRequest, Settings};
use crate::store::AvailabilityStore;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

/// Runs the effects the reducer asks for and feeds their outcomes back as
/// events.
///
/// Every spawned task reports through one unbounded channel. Whoever owns the
/// receiver (a test loop or the UI subscription) hands events back to
/// [`FlowController::dispatch`].
pub struct FlowController {
    state: FlowState,
    store: Arc<dyn AvailabilityStore>,
    audio: Arc<AudioManager>,
    settings: Settings,
    timers: TimerRegistry,
    shutdown: CancellationToken,
    events_tx: UnboundedSender<FlowEvent>,
    events_rx: Option<UnboundedReceiver<FlowEvent>>,
}

impl FlowController {
    pub fn new(
        store: Arc<dyn AvailabilityStore>,
        audio: Arc<AudioManager>,
        settings: Settings,
        today: NaiveDate,
    ) -> Self {
        let shutdown = CancellationToken::new();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: FlowState::new(today),
            store,
            audio,
            settings,
            timers: TimerRegistry::new(shutdown.clone()),
            shutdown,
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn active_timers(&self) -> usize {
        self.timers.active_count()
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.timers.is_armed(kind)
    }

    pub fn is_polling(&self) -> bool {
        self.timers.is_polling()
    }

    /// Hands the event stream to an external driver. Only the first call
    /// returns `Some`; afterwards [`next_event`](Self::next_event) yields nothing.
    pub fn take_events(&mut self) -> Option<UnboundedReceiver<FlowEvent>> {
        self.events_rx.take()
    }

    pub async fn next_event(&mut self) -> Option<FlowEvent> {
        match self.events_rx.as_mut() {
            Some(rx) => rx.recv().await,
            None => None,
        }
    }

    pub fn dispatch(&mut self, event: FlowEvent) {
        if let FlowEvent::TimerElapsed(kind) = &event {
            self.timers.settle(*kind);
        }
        let transition = self.state.reduce(event);
        self.state = transition.state;
        for effect in transition.effects {
            self.run_effect(effect);
        }
    }

    /// Waits for one event and dispatches it. Returns false once the channel
    /// is gone.
    pub async fn pump(&mut self) -> bool {
        match self.next_event().await {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Pumps events until `done` holds for the current state.
    pub async fn run_until<F>(&mut self, done: F) -> bool
    where
        F: Fn(&FlowState) -> bool,
    {
        while !done(&self.state) {
            if !self.pump().await {
                return false;
            }
        }
        true
    }

    /// Cancels every timer, the polling loop and the intro task.
    pub fn shutdown(&mut self) {
        info!("Shutting down screen flow");
        self.timers.cancel_all();
        self.shutdown.cancel();
    }

    fn run_effect(&mut self, effect: Effect) {
        debug!("Running effect {:?}", effect);
        match effect {
            Effect::Schedule(kind) => self.schedule(kind),
            Effect::Cancel(kind) => {
                self.timers.cancel(kind);
            }
            Effect::StartPolling => self.start_polling(),
            Effect::StopPolling => {
                self.timers.stop_polling();
            }
            Effect::Fetch { seq, purpose } => {
                let store = Arc::clone(&self.store);
                let tx = self.events_tx.clone();
                let api_base = self.settings.api_base().to_string();
                tokio::spawn(async move {
                    let result = store.list_all().await.map_err(|e| {
                        warn!("Fetch #{} failed: {}", seq, e.to_safe_string());
                        e.user_message(&api_base)
                    });
                    let _ = tx.send(FlowEvent::FetchCompleted { seq, purpose, result });
                });
            }
            Effect::SendToggle(request) => self.send_toggle(request),
            Effect::PlayIntro => self.play_intro(),
            Effect::PlayCelebration => {
                if let Err(e) = self.audio.play_celebration() {
                    warn!("Celebration sound unavailable: {}", e);
                }
            }
        }
    }

    fn timer_duration(&self, kind: TimerKind) -> Duration {
        match kind {
            TimerKind::IntroFailsafe => self.settings.intro_failsafe(),
            TimerKind::TitleDisplay => self.settings.title_display(),
            TimerKind::CelebrationDisplay => self.settings.celebration_display(),
        }
    }

    fn schedule(&mut self, kind: TimerKind) {
        let delay = self.timer_duration(kind);
        let token = self.timers.arm(kind);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(FlowEvent::TimerElapsed(kind));
                }
                _ = token.cancelled() => {
                    debug!("{:?} cancelled before firing", kind);
                }
            }
        });
    }

    fn start_polling(&mut self) {
        let interval = self.settings.poll_interval();
        let token = self.timers.start_polling();
        let tx = self.events_tx.clone();
        info!("Polling availability every {:?}", interval);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {
                        if tx.send(FlowEvent::PollTick).is_err() {
                            break;
                        }
                    }
                    _ = token.cancelled() => {
                        info!("Polling stopped");
                        break;
                    }
                }
            }
        });
    }

    fn send_toggle(&mut self, request: AvailabilityRequest) {
        let store = Arc::clone(&self.store);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let date = request.date;
            let result = store.toggle(&request).await.map_err(|e| e.to_safe_string());
            let _ = tx.send(FlowEvent::ToggleCompleted { date, result });
        });
    }

    fn play_intro(&mut self) {
        if let Err(e) = self.audio.play_intro() {
            warn!("Intro sound unavailable: {}", e);
        }
        let duration = self.settings.intro_duration();
        let token = self.shutdown.child_token();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(duration) => {
                    let _ = tx.send(FlowEvent::IntroCompleted);
                }
                _ = token.cancelled() => {}
            }
        });
    }
}

impl Drop for FlowController {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::flow::state::{Screen, MSG_TOGGLE_FAILED};
    use crate::models::AvailabilityRecord;
    use crate::store::{InMemoryStore, MockAvailabilityStore};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
    }

    fn controller(store: Arc<dyn AvailabilityStore>) -> FlowController {
        FlowController::new(store, Arc::new(AudioManager::new_dummy()), Settings::default(), today())
    }

    async fn enter_calendar(flow: &mut FlowController, name: &str) {
        flow.dispatch(FlowEvent::Start);
        assert!(flow.run_until(|s| s.screen() == Screen::NameEntry).await);
        flow.dispatch(FlowEvent::NameSelected(name.to_string()));
        flow.dispatch(FlowEvent::NameConfirmed);
        assert!(flow.run_until(|s| s.screen() == Screen::Calendar && s.is_settled()).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_session_leaves_no_timers_behind() {
        let store = Arc::new(InMemoryStore::new());
        let mut flow = controller(store.clone());

        flow.dispatch(FlowEvent::Start);
        assert_eq!(flow.state().screen(), Screen::Intro);
        assert!(flow.is_armed(TimerKind::IntroFailsafe));

        assert!(flow.run_until(|s| s.screen() == Screen::Title).await);
        assert!(!flow.is_armed(TimerKind::IntroFailsafe));

        assert!(flow.run_until(|s| s.screen() == Screen::NameEntry).await);
        flow.dispatch(FlowEvent::NameSelected("Tobias".to_string()));
        flow.dispatch(FlowEvent::NameConfirmed);
        assert!(flow.is_polling());
        assert!(flow.run_until(|s| s.is_settled()).await);

        let date = NaiveDate::from_ymd_opt(2025, 11, 22).unwrap();
        flow.dispatch(FlowEvent::ToggleDay(date));
        assert!(flow.run_until(|s| s.is_settled()).await);
        assert_eq!(store.len().await, 1);
        assert!(flow.state().records().iter().all(|r| !r.is_provisional()));

        flow.dispatch(FlowEvent::SaveRequested);
        assert!(flow.run_until(|s| s.screen() == Screen::Celebration).await);
        assert!(!flow.is_polling());

        assert!(flow.run_until(|s| s.screen() == Screen::Summary).await);
        assert_eq!(flow.active_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_twice_returns_to_original_records() {
        let existing = AvailabilityRecord {
            id: 1,
            user_name: "Peter".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 11, 8).unwrap(),
            available: true,
            created_at: None,
        };
        let store = Arc::new(InMemoryStore::with_records(vec![existing.clone()]));
        let mut flow = controller(store);
        enter_calendar(&mut flow, "Wolfi").await;
        let before = flow.state().records().to_vec();
        assert_eq!(before, vec![existing]);

        let date = NaiveDate::from_ymd_opt(2025, 11, 8).unwrap();
        flow.dispatch(FlowEvent::ToggleDay(date));
        assert!(flow.run_until(|s| s.is_settled()).await);
        assert_eq!(flow.state().records().len(), 2);

        flow.dispatch(FlowEvent::ToggleDay(date));
        assert!(flow.run_until(|s| s.is_settled()).await);
        assert_eq!(flow.state().records(), before.as_slice());
        flow.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_toggle_rolls_back_and_notifies() {
        let mut store = MockAvailabilityStore::new();
        store.expect_list_all().returning(|| Ok(Vec::new()));
        store
            .expect_toggle()
            .times(1)
            .returning(|_| Err(AppError::store("HTTP 500")));
        let mut flow = controller(Arc::new(store));
        enter_calendar(&mut flow, "Robert").await;

        let date = NaiveDate::from_ymd_opt(2025, 11, 14).unwrap();
        flow.dispatch(FlowEvent::ToggleDay(date));
        assert_eq!(flow.state().records().len(), 1);

        assert!(flow.run_until(|s| s.is_settled()).await);
        assert!(flow.state().records().is_empty());
        assert_eq!(flow.state().notification(), Some(MSG_TOGGLE_FAILED));
        assert_eq!(flow.state().screen(), Screen::Calendar);
        flow.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_keeps_calendar_usable() {
        let mut store = MockAvailabilityStore::new();
        store
            .expect_list_all()
            .returning(|| Err(AppError::store("HTTP 503")));
        let mut flow = controller(Arc::new(store));
        enter_calendar(&mut flow, "Andreas").await;

        let message = flow.state().notification().unwrap_or_default().to_string();
        assert!(message.starts_with("Fehler beim Laden der Verfügbarkeiten"), "{}", message);
        assert!(message.contains("HTTP 503"));
        assert_eq!(flow.state().screen(), Screen::Calendar);
        flow.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_polling_refreshes_records() {
        let store = Arc::new(InMemoryStore::new());
        let mut flow = controller(store.clone());
        enter_calendar(&mut flow, "Wolfi").await;
        assert!(flow.state().records().is_empty());

        // Another participant adds a day behind our back
        store
            .toggle(&AvailabilityRequest::toggle("Peter", NaiveDate::from_ymd_opt(2025, 11, 29).unwrap()))
            .await
            .unwrap();

        assert!(flow.run_until(|s| s.records().len() == 1).await);
        assert_eq!(flow.state().records()[0].user_name, "Peter");
        flow.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_fetch_after_leaving_calendar() {
        let mut store = MockAvailabilityStore::new();
        // enter + save, nothing from polling afterwards
        store.expect_list_all().times(2).returning(|| Ok(Vec::new()));
        let mut flow = controller(Arc::new(store));
        enter_calendar(&mut flow, "Peter").await;

        flow.dispatch(FlowEvent::SaveRequested);
        assert!(flow.run_until(|s| s.screen() == Screen::Summary).await);

        tokio::time::sleep(Settings::default().poll_interval() * 3).await;
        assert_eq!(flow.active_timers(), 0);
        flow.dispatch(FlowEvent::PollTick);
        assert!(!flow.state().is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_everything() {
        let store = Arc::new(InMemoryStore::new());
        let mut flow = controller(store);
        enter_calendar(&mut flow, "Wolfi").await;
        assert!(flow.active_timers() > 0);

        flow.shutdown();
        assert_eq!(flow.active_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_take_events_hands_over_the_stream() {
        let mut flow = controller(Arc::new(InMemoryStore::new()));
        let mut rx = flow.take_events().unwrap();
        assert!(flow.take_events().is_none());

        flow.dispatch(FlowEvent::Start);
        assert_eq!(rx.recv().await, Some(FlowEvent::IntroCompleted));
        assert!(flow.next_event().await.is_none());
    }
}
