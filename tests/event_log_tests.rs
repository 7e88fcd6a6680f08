use rstoplogger::core::event_log::{EventLog, validate};
use rstoplogger::core::pending::PendingDelete;
use rstoplogger::db::log::load_log;
use rstoplogger::db::store::DayStore;
use rstoplogger::errors::AppError;
use rstoplogger::models::collection::EventCollection;
use rstoplogger::models::event::{EventId, EventRecord};
use rstoplogger::ui::view::NoView;
use rstoplogger::utils::time::parse_time;

mod common;
use common::{RecordingView, d, new_event, png_blob, setup_test_db};

fn seeded_store(date: &str, ids: &[i64]) -> DayStore {
    let mut store = DayStore::in_memory().unwrap();
    let mut c = EventCollection::empty(d(date));
    for id in ids {
        c.push(EventRecord {
            id: EventId(*id),
            number: format!("{id}"),
            date: d(date),
            start: parse_time("08:00").unwrap(),
            end: parse_time("09:00").unwrap(),
            duration: "01:00".into(),
            reason: "seed".into(),
            photo: String::new(),
        })
        .unwrap();
    }
    store.save(d(date), &c).unwrap();
    store
}

fn row_count(store: &DayStore) -> i64 {
    store
        .conn()
        .query_row("SELECT COUNT(*) FROM day_events", [], |r| r.get(0))
        .unwrap()
}

#[test]
fn test_create_on_active_date_refreshes_view() {
    let store = DayStore::in_memory().unwrap();
    let mut log = EventLog::open_at(store, RecordingView::default(), d("2024-03-01"));

    let rec = log
        .create(new_event("42", "2024-03-01", "09:00", "10:15", "power outage"), None)
        .unwrap();

    assert_eq!(rec.duration, "01:15");
    assert_eq!(rec.date, d("2024-03-01"));
    assert_eq!(log.events().events(), &[rec.clone()]);
    assert_eq!(log.store().load(d("2024-03-01")).events(), &[rec.clone()]);

    let (date, rows) = log.view().last().unwrap();
    assert_eq!(*date, d("2024-03-01"));
    assert_eq!(rows, &vec![rec]);
}

#[test]
fn test_create_on_other_date_leaves_view_alone() {
    let store = DayStore::in_memory().unwrap();
    let mut log = EventLog::open_at(store, RecordingView::default(), d("2024-03-05"));

    let rec = log
        .create(new_event("42", "2024-03-01", "09:00", "10:15", "power outage"), None)
        .unwrap();

    assert!(log.events().is_empty());
    assert!(log.view().renders.is_empty());
    assert_eq!(log.store().load(d("2024-03-01")).events(), &[rec]);
}

#[test]
fn test_create_with_blank_date_uses_active_date() {
    let store = DayStore::in_memory().unwrap();
    let mut log = EventLog::open_at(store, NoView, d("2024-06-10"));

    let rec = log
        .create(new_event("1", "  ", "07:00", "07:30", "jam"), None)
        .unwrap();

    assert_eq!(rec.date, d("2024-06-10"));
    assert_eq!(log.events().len(), 1);
}

#[test]
fn test_create_rejects_inverted_times_without_writing() {
    let store = DayStore::in_memory().unwrap();
    let mut log = EventLog::open_at(store, RecordingView::default(), d("2024-03-01"));

    let err = log
        .create(new_event("42", "2024-03-01", "10:00", "09:00", "x"), None)
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidTimeOrder { .. }));
    assert_eq!(row_count(log.store()), 0);
    assert!(log.events().is_empty());
    assert!(log.view().renders.is_empty());
}

#[test]
fn test_equal_start_and_end_is_rejected() {
    let err = validate(&new_event("1", "2024-03-01", "09:00", "09:00", "x"), d("2024-03-01"))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTimeOrder { .. }));
}

#[test]
fn test_missing_fields_are_reported_before_anything_else() {
    let store = DayStore::in_memory().unwrap();
    let mut log = EventLog::open_at(store, NoView, d("2024-03-01"));

    // also has a bad date and inverted times: presence wins
    let err = log
        .create(new_event("", "not-a-date", "10:00", "09:00", " "), None)
        .unwrap_err();

    match err {
        AppError::MissingFields(fields) => {
            assert!(fields.contains("number"));
            assert!(fields.contains("reason"));
            assert!(!fields.contains("start"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(row_count(log.store()), 0);
}

#[test]
fn test_malformed_date_and_time_are_rejected() {
    let today = d("2024-03-01");
    assert!(matches!(
        validate(&new_event("1", "01/03/2024", "09:00", "10:00", "x"), today),
        Err(AppError::InvalidDate(_))
    ));
    assert!(matches!(
        validate(&new_event("1", "2024-03-01", "9h", "10:00", "x"), today),
        Err(AppError::InvalidTime(_))
    ));
}

#[test]
fn test_switch_to_empty_date_shows_no_rows() {
    let store = seeded_store("2024-03-01", &[1, 2]);
    let mut log = EventLog::open_at(store, RecordingView::default(), d("2024-03-01"));
    assert_eq!(log.events().len(), 2);

    log.switch_query_date(d("2024-03-02"));

    assert_eq!(log.active_date(), d("2024-03-02"));
    assert!(log.events().is_empty());
    let (date, rows) = log.view().last().unwrap();
    assert_eq!(*date, d("2024-03-02"));
    assert!(rows.is_empty());
}

#[test]
fn test_delete_confirmation_flow() {
    let store = seeded_store("2024-03-01", &[5, 7]);
    let mut log = EventLog::open_at(store, RecordingView::default(), d("2024-03-01"));

    log.request_delete(EventId(7));
    assert_eq!(log.pending(), PendingDelete::ConfirmPending(EventId(7)));

    log.cancel_delete();
    assert_eq!(log.pending(), PendingDelete::Idle);
    assert_eq!(log.events().len(), 2);
    assert!(log.view().renders.is_empty());

    log.request_delete(EventId(7));
    assert!(log.confirm_delete().unwrap());

    assert_eq!(log.pending(), PendingDelete::Idle);
    assert!(!log.events().contains(EventId(7)));
    let stored = log.store().load(d("2024-03-01"));
    let ids: Vec<EventId> = stored.events().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![EventId(5)]);
    assert_eq!(log.view().last().unwrap().1.len(), 1);
}

#[test]
fn test_latest_delete_request_wins() {
    let store = seeded_store("2024-03-01", &[5, 7]);
    let mut log = EventLog::open_at(store, NoView, d("2024-03-01"));

    log.request_delete(EventId(5));
    log.request_delete(EventId(7));
    assert!(log.confirm_delete().unwrap());

    assert!(log.events().contains(EventId(5)));
    assert!(!log.events().contains(EventId(7)));
}

#[test]
fn test_confirm_while_idle_does_nothing() {
    let store = seeded_store("2024-03-01", &[5]);
    let mut log = EventLog::open_at(store, RecordingView::default(), d("2024-03-01"));

    assert!(!log.confirm_delete().unwrap());
    assert_eq!(log.events().len(), 1);
    assert!(log.view().renders.is_empty());
}

#[test]
fn test_switching_date_drops_pending_delete() {
    let store = seeded_store("2024-03-01", &[5]);
    let mut log = EventLog::open_at(store, NoView, d("2024-03-01"));

    log.request_delete(EventId(5));
    log.switch_query_date(d("2024-03-01"));

    assert_eq!(log.pending(), PendingDelete::Idle);
    assert!(!log.confirm_delete().unwrap());
    assert_eq!(log.events().len(), 1);
}

#[test]
fn test_delete_is_idempotent_and_unknown_ids_are_ignored() {
    let store = seeded_store("2024-03-01", &[5, 7]);
    let mut log = EventLog::open_at(store, RecordingView::default(), d("2024-03-01"));

    assert!(log.delete(EventId(7)).unwrap());
    let renders = log.view().renders.len();
    assert!(!log.delete(EventId(7)).unwrap());
    assert!(!log.delete(EventId(999)).unwrap());

    assert_eq!(log.view().renders.len(), renders);
    assert_eq!(log.store().load(d("2024-03-01")).len(), 1);
}

#[test]
fn test_delete_only_touches_active_date() {
    let mut store = seeded_store("2024-03-01", &[5]);
    let mut other = EventCollection::empty(d("2024-03-02"));
    other
        .push(EventRecord {
            id: EventId(5),
            number: "5".into(),
            date: d("2024-03-02"),
            start: parse_time("08:00").unwrap(),
            end: parse_time("09:00").unwrap(),
            duration: "01:00".into(),
            reason: "same id, other day".into(),
            photo: String::new(),
        })
        .unwrap();
    store.save(d("2024-03-02"), &other).unwrap();

    let mut log = EventLog::open_at(store, NoView, d("2024-03-01"));
    assert!(log.delete(EventId(5)).unwrap());

    assert!(log.store().load(d("2024-03-01")).is_empty());
    assert_eq!(log.store().load(d("2024-03-02")), other);
}

#[test]
fn test_rapid_creates_get_distinct_ids() {
    let store = DayStore::in_memory().unwrap();
    let mut log = EventLog::open_at(store, NoView, d("2024-03-01"));

    let mut ids = Vec::new();
    for i in 0..20 {
        let rec = log
            .create(new_event(&i.to_string(), "", "08:00", "08:01", "burst"), None)
            .unwrap();
        ids.push(rec.id);
    }

    let mut sorted = ids.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), 20);
    assert_eq!(log.events().len(), 20);
}

#[test]
fn test_create_keeps_entries_saved_by_another_context() {
    let db_path = setup_test_db("event_log_two_contexts");
    let day = d("2024-03-01");

    let mut first = EventLog::open_at(DayStore::open(&db_path).unwrap(), NoView, day);
    let mut second = EventLog::open_at(DayStore::open(&db_path).unwrap(), NoView, day);

    first
        .create(new_event("1", "2024-03-01", "08:00", "09:00", "first"), None)
        .unwrap();
    // `second` loaded the day before `first` wrote to it
    second
        .create(new_event("2", "2024-03-01", "10:00", "11:00", "second"), None)
        .unwrap();

    let stored = DayStore::open(&db_path).unwrap().load(day);
    let numbers: Vec<&str> = stored.events().iter().map(|e| e.number.as_str()).collect();
    assert_eq!(numbers, vec!["1", "2"]);
}

#[test]
fn test_photo_is_stored_with_the_record() {
    let store = DayStore::in_memory().unwrap();
    let mut log = EventLog::open_at(store, NoView, d("2024-03-01"));

    let rec = log
        .create(new_event("9", "", "11:00", "11:20", "camera"), Some(png_blob()))
        .unwrap();

    assert!(rec.has_photo());
    let stored = log.store().load(d("2024-03-01"));
    assert_eq!(stored.events()[0].photo, rec.photo);
}

#[test]
fn test_create_and_delete_are_audited() {
    let store = DayStore::in_memory().unwrap();
    let mut log = EventLog::open_at(store, NoView, d("2024-03-01"));

    let rec = log
        .create(new_event("42", "", "09:00", "10:15", "power outage"), None)
        .unwrap();
    log.delete(rec.id).unwrap();

    let entries = load_log(log.store().conn()).unwrap();
    let ops: Vec<&str> = entries.iter().map(|e| e.operation.as_str()).collect();
    assert!(ops.contains(&"add"));
    assert!(ops.contains(&"del"));
}

#[test]
fn test_create_fails_cleanly_when_stored_id_is_at_the_limit() {
    let store = seeded_store("2024-03-01", &[i64::MAX]);
    let mut log = EventLog::open_at(store, NoView, d("2024-03-01"));

    let err = log
        .create(new_event("1", "", "08:00", "09:00", "late"), None)
        .unwrap_err();

    assert!(matches!(err, AppError::IdExhausted(_)));
    assert_eq!(log.store().load(d("2024-03-01")).len(), 1);
}
