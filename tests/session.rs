use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use waypoint_tracker::gps::Sample;
use waypoint_tracker::services::geolocation::FixedLocation;
use waypoint_tracker::services::{GeoSource, NullSurface, PositionOptions, TrackSurface};
use waypoint_tracker::{
    Coordinate, Error, ExportKind, PersistenceAdapter, Reverted, Session, SlotStore,
    SqliteSlotStore, WaypointId,
};

/// Slot store whose contents outlive the session using it
#[derive(Clone, Default)]
struct SharedSlots(Rc<RefCell<HashMap<String, String>>>);

impl SlotStore for SharedSlots {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.0.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Error> {
        self.0.borrow_mut().remove(key);
        Ok(())
    }
}

/// Slot store that can be read but refuses every write
struct ReadOnlySlots(SharedSlots);

impl SlotStore for ReadOnlySlots {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.0.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), Error> {
        Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "slots are read only",
        )))
    }

    fn remove(&mut self, key: &str) -> Result<(), Error> {
        self.set(key, "")
    }
}

#[derive(Debug, PartialEq)]
enum SurfaceEvent {
    Place(WaypointId),
    Move(WaypointId),
    Remove(WaypointId),
    Path(usize),
}

#[derive(Default)]
struct RecordingSurface {
    events: Vec<SurfaceEvent>,
}

impl TrackSurface for RecordingSurface {
    fn place_marker(&mut self, id: WaypointId, _position: Coordinate) {
        self.events.push(SurfaceEvent::Place(id));
    }

    fn move_marker(&mut self, id: WaypointId, _position: Coordinate) {
        self.events.push(SurfaceEvent::Move(id));
    }

    fn remove_marker(&mut self, id: WaypointId) {
        self.events.push(SurfaceEvent::Remove(id));
    }

    fn draw_path(&mut self, path: &[Coordinate]) {
        self.events.push(SurfaceEvent::Path(path.len()));
    }
}

struct FailingSource;

#[async_trait]
impl GeoSource for FailingSource {
    async fn request_position(&self, _options: &PositionOptions) -> Result<Sample, Error> {
        Err(Error::PositionUnavailable("user denied geolocation".to_string()))
    }
}

fn millis(ms: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_millis(ms)
}

fn open(slots: &SharedSlots) -> Session<SharedSlots, RecordingSurface> {
    Session::open(
        PersistenceAdapter::new(slots.clone()),
        RecordingSurface::default(),
    )
    .unwrap()
}

#[test]
fn test_every_mutation_is_persisted() {
    let slots = SharedSlots::default();
    {
        let mut session = open(&slots);
        session.record_at(Coordinate::new(10.0, 20.0), millis(1_000)).unwrap();
        session.record_at(Coordinate::new(10.0, 21.0), millis(2_000)).unwrap();
        session.move_waypoint(0, Coordinate::new(10.5, 20.0)).unwrap();
        session.describe(1, "stream crossing".to_string()).unwrap();
    }

    let mut session = open(&slots);
    assert_eq!(session.store().len(), 2);
    assert_eq!(
        session.store().get(1).unwrap().description(),
        Some("stream crossing")
    );
    // undo history survives the reload
    assert_eq!(
        session.undo().unwrap(),
        Some(Reverted::Moved {
            id: 0,
            position: Coordinate::new(10.0, 20.0)
        })
    );

    let session = open(&slots);
    assert_eq!(
        session.store().get(0).unwrap().position(),
        Some(Coordinate::new(10.0, 20.0))
    );
}

#[test]
fn test_reload_keeps_tombstones_without_markers() {
    let slots = SharedSlots::default();
    {
        let mut session = open(&slots);
        session.record_at(Coordinate::new(1.0, 1.0), millis(0)).unwrap();
        session.record_at(Coordinate::new(2.0, 2.0), millis(0)).unwrap();
        session.undo().unwrap();
    }

    let session = open(&slots);
    assert_eq!(session.store().len(), 2);
    assert!(!session.store().get(1).unwrap().is_active());
    assert_eq!(
        session.surface().events,
        vec![SurfaceEvent::Place(0), SurfaceEvent::Path(1)]
    );
}

#[test]
fn test_surface_follows_undo() {
    let slots = SharedSlots::default();
    let mut session = open(&slots);
    session.record_at(Coordinate::new(0.0, 0.0), millis(0)).unwrap();
    session.move_waypoint(0, Coordinate::new(0.0, 1.0)).unwrap();
    session.undo().unwrap();
    session.undo().unwrap();
    // nothing left to undo
    assert_eq!(session.undo().unwrap(), None);
    session.move_waypoint(0, Coordinate::new(0.0, 2.0)).unwrap();

    assert_eq!(
        session.surface().events,
        vec![
            SurfaceEvent::Path(0),
            SurfaceEvent::Place(0),
            SurfaceEvent::Path(1),
            SurfaceEvent::Move(0),
            SurfaceEvent::Path(1),
            SurfaceEvent::Move(0),
            SurfaceEvent::Path(1),
            SurfaceEvent::Remove(0),
            SurfaceEvent::Path(0),
            SurfaceEvent::Place(0),
            SurfaceEvent::Path(1),
        ]
    );
}

#[test]
fn test_unknown_waypoint_leaves_track_untouched() {
    let slots = SharedSlots::default();
    let mut session = open(&slots);
    session.record_at(Coordinate::new(0.0, 0.0), millis(0)).unwrap();
    assert!(matches!(
        session.move_waypoint(3, Coordinate::new(1.0, 1.0)),
        Err(Error::UnknownWaypointId(3))
    ));
    assert!(matches!(
        session.describe(9, "nowhere".to_string()),
        Err(Error::UnknownWaypointId(9))
    ));
    assert_eq!(session.store().history().len(), 1);
}

#[test]
fn test_clear_erases_persisted_track() {
    let slots = SharedSlots::default();
    let mut session = open(&slots);
    session.record_at(Coordinate::new(0.0, 0.0), millis(0)).unwrap();
    session.record_at(Coordinate::new(0.0, 1.0), millis(0)).unwrap();
    session.clear().unwrap();

    assert!(session.store().is_empty());
    assert!(slots.0.borrow().is_empty());
    assert!(matches!(
        session.export_geojson(ExportKind::Line, None),
        Err(Error::EmptyTrack)
    ));
}

#[test]
fn test_exports_from_session() {
    let slots = SharedSlots::default();
    let mut session = open(&slots);
    session.record_at(Coordinate::new(0.0, 0.0), millis(0)).unwrap();
    session.record_at(Coordinate::new(0.0, 1.0), millis(0)).unwrap();
    session.record_at(Coordinate::new(1.0, 1.0), millis(0)).unwrap();

    let polygon: Value = serde_json::from_str(
        &session
            .export_geojson(ExportKind::Polygon, Some("plot A"))
            .unwrap()
            .to_json()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(
        polygon["geometry"]["coordinates"],
        json!([[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]])
    );

    let points: Value = serde_json::from_str(
        &session
            .export_geojson(ExportKind::Points, None)
            .unwrap()
            .to_json()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(points["features"][0]["properties"]["desc"], "Undescripted");

    let rows = session.table_rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].distance, "0.0000 meters");
}

#[tokio::test]
async fn test_record_from_source() {
    let slots = SharedSlots::default();
    let mut session = open(&slots);
    let source = FixedLocation::new(Coordinate::new(44.5, -68.25));
    let id = session
        .record(&source, &PositionOptions::default())
        .await
        .unwrap();
    assert_eq!(id, 0);
    assert_eq!(
        session.store().get(0).unwrap().position(),
        Some(Coordinate::new(44.5, -68.25))
    );
}

#[tokio::test]
async fn test_failed_position_request_records_nothing() {
    let slots = SharedSlots::default();
    let mut session = open(&slots);
    let result = session
        .record(&FailingSource, &PositionOptions::default())
        .await;
    assert!(matches!(result, Err(Error::PositionUnavailable(_))));
    assert!(session.store().is_empty());
    assert!(slots.0.borrow().is_empty());
}

#[test]
fn test_failed_save_leaves_track_untouched() {
    let slots = SharedSlots::default();
    {
        let mut session = open(&slots);
        session.record_at(Coordinate::new(10.0, 20.0), millis(1_000)).unwrap();
        session.record_at(Coordinate::new(10.0, 21.0), millis(2_000)).unwrap();
    }
    let saved = slots.0.borrow().clone();

    let mut session = Session::open(
        PersistenceAdapter::new(ReadOnlySlots(slots.clone())),
        RecordingSurface::default(),
    )
    .unwrap();
    let before = session.store().clone();

    assert!(matches!(
        session.record_at(Coordinate::new(11.0, 22.0), millis(3_000)),
        Err(Error::Io(_))
    ));
    assert!(session.move_waypoint(0, Coordinate::new(9.0, 19.0)).is_err());
    assert!(session.describe(1, "summit".to_string()).is_err());
    assert!(session.undo().is_err());
    assert!(session.clear().is_err());

    assert_eq!(session.store(), &before);
    assert_eq!(session.store().history().len(), 2);
    // only the markers drawn while opening
    assert_eq!(
        session.surface().events,
        vec![
            SurfaceEvent::Place(0),
            SurfaceEvent::Place(1),
            SurfaceEvent::Path(2)
        ]
    );
    assert_eq!(*slots.0.borrow(), saved);
}

#[test]
fn test_sqlite_database_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("track.db");
    {
        let slots = SqliteSlotStore::open(&path).unwrap();
        let mut session = Session::open(PersistenceAdapter::new(slots), NullSurface).unwrap();
        session.record_at(Coordinate::new(5.0, 6.0), millis(0)).unwrap();
    }

    let slots = SqliteSlotStore::open(&path).unwrap();
    let session = Session::open(PersistenceAdapter::new(slots), NullSurface).unwrap();
    assert_eq!(
        session.store().get(0).unwrap().position(),
        Some(Coordinate::new(5.0, 6.0))
    );
}
