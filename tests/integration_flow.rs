use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use cousinentreffen::aggregation::{index_by_date, DateWindow, SummaryView};
use cousinentreffen::flow::{FlowController, FlowEvent, Screen};
use cousinentreffen::{AudioManager, AvailabilityRequest, AvailabilityStore, HttpAvailabilityStore, InMemoryStore, Settings};
use cousinentreffen::http_config::HttpConfig;

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, d).unwrap()
}

/// Real-time settings short enough for a test run.
fn quick_settings() -> Settings {
    Settings {
        intro_duration_ms: 30,
        intro_failsafe_grace_ms: 20,
        title_display_ms: 10,
        celebration_display_ms: 10,
        poll_interval_secs: 3600,
        sound_enabled: false,
        ..Settings::default()
    }
}

async fn session(store: Arc<dyn AvailabilityStore>, name: &str) -> FlowController {
    let mut flow = FlowController::new(store, Arc::new(AudioManager::new_dummy()), quick_settings(), day(11, 3));
    flow.dispatch(FlowEvent::Start);
    assert!(flow.run_until(|s| s.screen() == Screen::NameEntry).await);
    flow.dispatch(FlowEvent::NameSelected(name.to_string()));
    flow.dispatch(FlowEvent::NameConfirmed);
    assert!(flow.run_until(|s| s.screen() == Screen::Calendar && s.is_settled()).await);
    flow
}

#[tokio::test]
async fn test_two_cousins_find_a_common_date() {
    let store = Arc::new(InMemoryStore::new());

    let mut wolfi = session(store.clone(), "Wolfi").await;
    for date in [day(11, 21), day(11, 22), day(12, 27)] {
        wolfi.dispatch(FlowEvent::ToggleDay(date));
        assert!(wolfi.run_until(|s| s.is_settled()).await);
    }
    wolfi.dispatch(FlowEvent::SaveRequested);
    assert!(wolfi.run_until(|s| s.screen() == Screen::Summary).await);
    assert_eq!(wolfi.active_timers(), 0);

    let mut peter = session(store.clone(), "Peter").await;
    assert_eq!(peter.state().records().len(), 3);
    for date in [day(11, 22), day(12, 27), day(12, 28)] {
        peter.dispatch(FlowEvent::ToggleDay(date));
        assert!(peter.run_until(|s| s.is_settled()).await);
    }
    peter.dispatch(FlowEvent::SaveRequested);
    assert!(peter.run_until(|s| s.screen() == Screen::Summary).await);

    let summary = SummaryView::build(peter.state().records(), DateWindow::year_end(2025));
    assert_eq!(summary.common_dates, vec![day(11, 22), day(12, 27)]);
    assert_eq!(summary.months.len(), 2);
    assert_eq!(summary.participants.len(), 2);
    assert!(summary.participants.iter().all(|p| p.days_available == 3));
}

#[tokio::test]
async fn test_toggle_off_removes_user_from_date() {
    let store = Arc::new(InMemoryStore::new());
    store.toggle(&AvailabilityRequest::toggle("Andreas", day(11, 3))).await.unwrap();
    store.toggle(&AvailabilityRequest::toggle("Robert", day(11, 3))).await.unwrap();

    let mut flow = session(store.clone(), "Andreas").await;
    flow.dispatch(FlowEvent::ToggleDay(day(11, 3)));
    assert!(flow.run_until(|s| s.is_settled()).await);

    let index = index_by_date(flow.state().records());
    assert_eq!(index.get(&day(11, 3)), Some(&vec!["Robert".to_string()]));
    assert_eq!(store.len().await, 1);
    flow.shutdown();
}

#[tokio::test]
async fn test_month_navigation_in_session() {
    let mut flow = session(Arc::new(InMemoryStore::new()), "Tobias").await;
    let november = flow.state().displayed_month();

    flow.dispatch(FlowEvent::NextMonth);
    flow.dispatch(FlowEvent::NextMonth);
    let january = flow.state().displayed_month();
    assert_eq!((january.year(), january.month()), (2026, 1));

    flow.dispatch(FlowEvent::PrevMonth);
    flow.dispatch(FlowEvent::PrevMonth);
    assert_eq!(flow.state().displayed_month(), november);
    flow.shutdown();
}

#[tokio::test]
async fn test_unreachable_backend_still_reaches_summary() {
    let config = HttpConfig {
        connect_timeout: Duration::from_millis(500),
        timeout: Duration::from_secs(2),
        ..HttpConfig::default()
    };
    let store = Arc::new(HttpAvailabilityStore::new("http://127.0.0.1:9/api", &config).unwrap());

    let mut flow = session(store, "Special guest").await;
    let notice = flow.state().notification().unwrap_or_default().to_string();
    assert!(notice.contains("Backend-Verbindung fehlgeschlagen"), "{}", notice);
    assert!(flow.state().records().is_empty());

    flow.dispatch(FlowEvent::SaveRequested);
    assert!(flow.run_until(|s| s.screen() == Screen::Summary).await);
    assert_eq!(flow.active_timers(), 0);
}
