//! Integration tests for the history store over in-memory storage.

mod common;

use common::{
    contact_record, empty_store, ids, reload, styled_url_record, text_record, url_record,
    wifi_record,
};
use chrono::{TimeZone, Utc};
use qr_history::history::view::{self, DEFAULT_PAGE_SIZE};
use qr_history::{
    HistoryError, HistoryStore, Kind, KindFilter, MAX_STORAGE_SIZE, MemoryStorage, Payload,
    QrRecord, RecordId, STORAGE_KEY, Security, Storage, StorageError, Style, WifiCredentials,
};

// =============================================================================
// Scenario Tests
// =============================================================================

#[test]
fn test_url_wifi_remove_clear_scenario() -> anyhow::Result<()> {
    let mut store = empty_store();

    let url = styled_url_record("url-1", "https://a.example", "#ff0000");
    store.add(url.clone())?;

    let listed = store.list();
    assert_eq!(listed.len(), 1);
    let first = listed.first().ok_or_else(|| anyhow::anyhow!("empty list"))?;
    assert_eq!(first.payload(), &Payload::Url("https://a.example".to_string()));
    assert_eq!(
        first.style().and_then(|s| s.dot_color.as_deref()),
        Some("#ff0000")
    );

    let wifi = wifi_record("wifi-1", "Home", "secret1", Security::Wpa);
    store.add(wifi.clone())?;
    assert_eq!(ids(&store), vec!["wifi-1", "url-1"]);
    assert_eq!(store.list().first().map(QrRecord::kind), Some(Kind::Wifi));

    let removed = store.remove(url.id())?;
    assert_eq!(removed, Some(url));
    assert_eq!(store.list(), &[wifi][..]);

    store.clear()?;
    assert!(store.list().is_empty());

    Ok(())
}

// =============================================================================
// Ordering and Round-trip Tests
// =============================================================================

#[test]
fn test_list_is_reverse_insertion_order() -> anyhow::Result<()> {
    let mut store = empty_store();
    let records = vec![
        url_record("a", "https://a.example"),
        wifi_record("b", "Office", "hunter22", Security::Wep),
        contact_record("c", "Ada"),
        text_record("d", "hello world"),
    ];

    for record in &records {
        store.add(record.clone())?;
    }

    let expected: Vec<QrRecord> = records.into_iter().rev().collect();
    assert_eq!(store.list(), &expected[..]);

    Ok(())
}

#[test]
fn test_reload_round_trip() -> anyhow::Result<()> {
    let mut store = empty_store();
    store.add(styled_url_record("a", "https://a.example", "#123456"))?;
    store.add(wifi_record("b", "Cafe", "", Security::NoPass))?;
    store.add(contact_record("c", "Grace"))?;
    store.add(text_record("d", "ünïcødé text ✓"))?;
    store.add(QrRecord::new(
        Payload::Text("generated".into()),
        Some(Style {
            logo: Some("data:image/png;base64,iVBORw0KGgo=".into()),
            corner_square_color: Some("#00ff00".into()),
            corner_dot_color: Some("#0000ff".into()),
            ..Style::default()
        }),
    ))?;

    let before = store.list().to_vec();
    let reloaded = reload(store);

    assert!(reloaded.load_error().is_none());
    assert_eq!(reloaded.list(), &before[..]);

    Ok(())
}

#[test]
fn test_add_then_remove_restores_prior_state() -> anyhow::Result<()> {
    let mut store = empty_store();
    store.add(url_record("a", "https://a.example"))?;
    store.add(text_record("b", "note"))?;

    let before = store.list().to_vec();
    let persisted_before = store.storage().raw(STORAGE_KEY).map(<[u8]>::to_vec);

    let extra = wifi_record("c", "Guest", "guestpass", Security::Wpa);
    store.add(extra.clone())?;
    store.remove(extra.id())?;

    assert_eq!(store.list(), &before[..]);
    assert_eq!(
        store.storage().raw(STORAGE_KEY).map(<[u8]>::to_vec),
        persisted_before
    );

    Ok(())
}

#[test]
fn test_remove_from_middle_persists() -> anyhow::Result<()> {
    let mut store = empty_store();
    store.add(url_record("a", "https://a.example"))?;
    store.add(url_record("b", "https://b.example"))?;
    store.add(url_record("c", "https://c.example"))?;

    store.remove(&RecordId::from("b"))?;
    let store = reload(store);
    assert_eq!(ids(&store), vec!["c", "a"]);

    Ok(())
}

// =============================================================================
// Budget Tests
// =============================================================================

#[test]
fn test_over_budget_add_is_rejected() -> anyhow::Result<()> {
    let mut store = empty_store();
    store.add(url_record("a", "https://a.example"))?;
    let before = store.list().to_vec();

    let huge = QrRecord::new(Payload::Text("x".repeat(MAX_STORAGE_SIZE)), None);
    let err = store.add(huge).unwrap_err();

    match err {
        HistoryError::StorageBudgetExceeded { size, budget } => {
            assert_eq!(budget, MAX_STORAGE_SIZE);
            assert!(size > MAX_STORAGE_SIZE);
        }
        other => panic!("expected budget error, got {:?}", other),
    }
    assert_eq!(store.list(), &before[..]);

    // The persisted copy is unchanged as well
    let store = reload(store);
    assert_eq!(store.list(), &before[..]);

    Ok(())
}

#[test]
fn test_budget_boundary_is_inclusive() -> anyhow::Result<()> {
    let mut store = empty_store();

    // Measure the overhead of a single text record, then fill to exactly the budget
    let sample = text_record("fill", "");
    store.add(sample.clone())?;
    let overhead = store.serialized_size()?;
    store.remove(sample.id())?;

    let exact = text_record("fill", &"x".repeat(MAX_STORAGE_SIZE - overhead));
    store.add(exact)?;
    assert_eq!(store.serialized_size()?, MAX_STORAGE_SIZE);

    // Nothing else fits
    let err = store.add(text_record("one-more", "")).unwrap_err();
    assert!(err.is_budget_exceeded());
    assert_eq!(ids(&store), vec!["fill"]);

    Ok(())
}

// =============================================================================
// Persistence Failure Tests
// =============================================================================

/// Storage whose writes always fail, as when the platform denies access.
struct DeniedStorage(MemoryStorage);

impl Storage for DeniedStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.0.get(key)
    }

    fn set(&mut self, _key: &str, _value: &[u8]) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage access denied".into()))
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage access denied".into()))
    }
}

#[test]
fn test_write_failures_roll_back() -> anyhow::Result<()> {
    let mut seeded = empty_store();
    seeded.add(url_record("a", "https://a.example"))?;
    seeded.add(url_record("b", "https://b.example"))?;

    let mut store = HistoryStore::load(DeniedStorage(seeded.into_storage()));
    let before = store.list().to_vec();

    let err = store.add(text_record("c", "nope")).unwrap_err();
    assert!(err.is_persistence_failure());
    assert_eq!(store.list(), &before[..]);

    let err = store.remove(&RecordId::from("a")).unwrap_err();
    assert!(err.is_persistence_failure());
    assert_eq!(store.list(), &before[..]);

    let err = store.clear().unwrap_err();
    assert!(err.is_persistence_failure());
    assert_eq!(store.list(), &before[..]);

    Ok(())
}

#[test]
fn test_five_digit_year_is_rejected_before_write() -> anyhow::Result<()> {
    let mut store = empty_store();
    store.add(text_record("keep", "keep me"))?;

    let far = Utc
        .with_ymd_and_hms(10000, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| anyhow::anyhow!("invalid date"))?;
    let record = QrRecord::from_parts(
        RecordId::from("far"),
        Payload::Text("later".into()),
        None,
        far,
    );
    let err = store.add(record).unwrap_err();
    assert!(matches!(err, HistoryError::TimestampOutOfRange { .. }));

    // The history written before the rejection still loads in full
    let store = reload(store);
    assert!(store.load_error().is_none());
    assert_eq!(ids(&store), vec!["keep"]);

    Ok(())
}

#[test]
fn test_quota_denial_is_persistence_failure() -> anyhow::Result<()> {
    let mut store = HistoryStore::load(MemoryStorage::with_quota(256));
    store.add(url_record("a", "https://a.example"))?;

    let err = store
        .add(text_record("b", &"y".repeat(512)))
        .unwrap_err();
    assert!(matches!(
        err,
        HistoryError::PersistenceFailure(StorageError::QuotaExceeded { .. })
    ));
    assert_eq!(ids(&store), vec!["a"]);

    Ok(())
}

// =============================================================================
// Load Recovery Tests
// =============================================================================

#[test]
fn test_load_invalid_data_yields_empty_store() {
    let cases: &[&[u8]] = &[
        b"",
        b"not json at all",
        b"{\"id\": \"a\"}",
        b"[{\"id\":\"a\",\"type\":\"fax\",\"data\":\"x\",\"createdAt\":\"2024-05-01T10:00:00.000Z\"}]",
        b"[{\"id\":\"a\",\"type\":\"url\",\"data\":\"x\",\"createdAt\":\"yesterday\"}]",
        &[0xff, 0xfe, 0x00],
    ];

    for raw in cases {
        let store = HistoryStore::load(MemoryStorage::with_entry(STORAGE_KEY, raw.to_vec()));
        assert!(store.is_empty(), "expected empty store for {:?}", raw);
        assert!(matches!(
            store.load_error(),
            Some(HistoryError::CorruptPersistedState(_))
        ));
        // Left untouched for inspection
        assert_eq!(store.storage().raw(STORAGE_KEY), Some(*raw));
    }
}

/// Storage whose reads always fail.
struct UnreadableStorage;

impl Storage for UnreadableStorage {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Err(StorageError::Unavailable("storage read denied".into()))
    }

    fn set(&mut self, _key: &str, _value: &[u8]) -> Result<(), StorageError> {
        Ok(())
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

#[test]
fn test_load_read_failure_yields_empty_store() {
    let store = HistoryStore::load(UnreadableStorage);
    assert!(store.is_empty());
    assert!(matches!(
        store.load_error(),
        Some(HistoryError::PersistenceFailure(StorageError::Unavailable(_)))
    ));
}

#[test]
fn test_missing_data_yields_empty_store() {
    let store = HistoryStore::load(MemoryStorage::new());
    assert!(store.is_empty());
    assert!(store.load_error().is_none());
}

#[test]
fn test_clear_then_reload_is_empty() -> anyhow::Result<()> {
    let mut store = empty_store();
    for i in 0..20 {
        store.add(text_record(&format!("t{}", i), "note"))?;
    }
    store.clear()?;
    assert!(store.list().is_empty());

    let store = reload(store);
    assert!(store.list().is_empty());
    assert!(store.load_error().is_none());

    Ok(())
}

// =============================================================================
// View Tests
// =============================================================================

#[test]
fn test_filtered_pagination_over_store() -> anyhow::Result<()> {
    let mut store = empty_store();
    for i in 0..7 {
        store.add(url_record(&format!("u{}", i), "https://a.example"))?;
        store.add(wifi_record(&format!("w{}", i), "Net", "password", Security::Wpa))?;
    }

    let page = view::paginate(
        store.list(),
        KindFilter::Only(Kind::Wifi),
        2,
        DEFAULT_PAGE_SIZE,
    );
    assert_eq!(page.total_items, 7);
    assert_eq!(page.total_pages, 2);
    let page_ids: Vec<&str> = page.items.iter().map(|r| r.id().as_str()).collect();
    assert_eq!(page_ids, vec!["w1", "w0"]);

    let counts = view::KindCounts::of(store.list());
    assert_eq!(counts.get(KindFilter::All), 14);
    assert_eq!(counts.get(KindFilter::Only(Kind::Url)), 7);

    Ok(())
}

#[test]
fn test_wifi_record_content() {
    let record = QrRecord::new(
        Payload::Wifi(WifiCredentials {
            ssid: "Home".into(),
            password: "secret1".into(),
            security: Security::Wpa,
        }),
        None,
    );
    assert_eq!(record.content(), "WIFI:T:WPA;S:Home;P:secret1;;");
    assert!(record.validate().is_ok());
}
