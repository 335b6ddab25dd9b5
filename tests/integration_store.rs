use chrono::NaiveDate;
use cousinentreffen::aggregation::{common_dates, count_by_user, index_by_date, DateWindow};
use cousinentreffen::calendar::{MonthCursor, MonthView};
use cousinentreffen::{AppError, AvailabilityRecord, AvailabilityRequest, AvailabilityStore, InMemoryStore};

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, d).unwrap()
}

async fn store_with(entries: &[(&str, NaiveDate)]) -> InMemoryStore {
    let store = InMemoryStore::new();
    for (user, date) in entries {
        store.toggle(&AvailabilityRequest::toggle(user, *date)).await.unwrap();
    }
    store
}

#[tokio::test]
async fn test_common_dates_need_every_participant() {
    let store = store_with(&[("alice", day(11, 3)), ("bob", day(11, 3)), ("alice", day(11, 4))]).await;
    let records = store.list_all().await.unwrap();

    assert_eq!(common_dates(&records, day(11, 1), day(11, 30)), vec![day(11, 3)]);

    let counts = count_by_user(&records);
    assert_eq!(counts.get("alice"), Some(&2));
    assert_eq!(counts.get("bob"), Some(&1));
}

#[tokio::test]
async fn test_common_dates_ignore_input_order() {
    let store = store_with(&[("bob", day(12, 24)), ("alice", day(12, 24)), ("alice", day(11, 30))]).await;
    let mut records = store.list_all().await.unwrap();
    let forward = common_dates(&records, day(11, 1), day(12, 31));
    records.reverse();
    assert_eq!(common_dates(&records, day(11, 1), day(12, 31)), forward);
    assert_eq!(forward, vec![day(12, 24)]);
}

#[tokio::test]
async fn test_empty_store_renders_empty_month() {
    let store = InMemoryStore::new();
    let records = store.list_all().await.unwrap();

    assert!(index_by_date(&records).is_empty());
    assert!(count_by_user(&records).is_empty());
    assert!(common_dates(&records, day(11, 1), day(12, 31)).is_empty());

    let view = MonthView::build(&records, MonthCursor::new(2025, 11).unwrap(), day(11, 3), "Wolfi");
    assert!(!view.cells.is_empty());
    assert!(view.cells.iter().all(|c| c.available_users.is_empty()));
}

#[tokio::test]
async fn test_toggle_round_trip_through_store() {
    let store = store_with(&[("alice", day(11, 3))]).await;
    let response = store.toggle(&AvailabilityRequest::toggle("alice", day(11, 3))).await.unwrap();
    assert!(!response.available);

    let records = store.list_all().await.unwrap();
    let index = index_by_date(&records);
    assert!(index.get(&day(11, 3)).map_or(true, |users| !users.iter().any(|u| u == "alice")));
}

#[tokio::test]
async fn test_users_and_delete() {
    let store = store_with(&[("Robert", day(11, 5)), ("Peter", day(11, 6)), ("Robert", day(11, 7))]).await;
    assert_eq!(store.list_users().await.unwrap(), vec!["Robert", "Peter"]);

    let id = store.list_all().await.unwrap()[0].id;
    store.delete(id).await.unwrap();
    assert_eq!(store.len().await, 2);
    assert!(matches!(store.delete(id).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_window_bounds_are_inclusive() {
    let records = vec![
        AvailabilityRecord::provisional(1, "alice", day(11, 1)),
        AvailabilityRecord::provisional(2, "alice", day(12, 31)),
        AvailabilityRecord::provisional(3, "alice", NaiveDate::from_ymd_opt(2025, 10, 31).unwrap()),
    ];
    let window = DateWindow::year_end(2025);
    assert_eq!(
        common_dates(&records, window.start, window.end),
        vec![day(11, 1), day(12, 31)]
    );
}
