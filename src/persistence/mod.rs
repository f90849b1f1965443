//! Save and restore a waypoint store through named durable slots
use crate::track::{HistoryStack, Waypoint, WaypointId, WaypointStore};
use crate::Error;
use log::{debug, warn};
use serde::de::Error as _;

mod sqlite;
pub use sqlite::{default_db_path, SqliteSlotStore};

/// Slot holding the JSON array of waypoints
pub static WAYPOINTS_SLOT: &str = "waypoints";
/// Slot holding the JSON array of waypoint ids in undo order
pub static HISTORY_SLOT: &str = "history";

/// A durable string key value store
pub trait SlotStore {
    /// Return the value in the slot, `None` if it was never written
    fn get(&self, key: &str) -> Result<Option<String>, Error>;
    /// Overwrite the value in the slot
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
    /// Erase the slot
    fn remove(&mut self, key: &str) -> Result<(), Error>;

    /// Overwrite several slots together. Backends that can should write all of them or none,
    /// the default writes them one at a time.
    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), Error> {
        for &(key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// Reads and writes a waypoint store to a slot store
pub struct PersistenceAdapter<S: SlotStore> {
    slots: S,
}

impl<S: SlotStore> PersistenceAdapter<S> {
    pub fn new(slots: S) -> Self {
        PersistenceAdapter { slots }
    }

    /// Overwrite the stored track with the contents of the store
    pub fn save(&mut self, store: &WaypointStore) -> Result<(), Error> {
        let waypoints = serde_json::to_string(store.waypoints())?;
        let history = serde_json::to_string(store.history().entries())?;
        self.slots.set_many(&[
            (WAYPOINTS_SLOT, waypoints.as_str()),
            (HISTORY_SLOT, history.as_str()),
        ])?;
        debug!(
            "Saved {} waypoints and {} history entries",
            store.len(),
            store.history().len()
        );
        Ok(())
    }

    /// Restore the stored track, returns `None` if nothing was ever saved
    pub fn load(&self) -> Result<Option<WaypointStore>, Error> {
        let waypoints = match self.slots.get(WAYPOINTS_SLOT)? {
            Some(value) => value,
            None => return Ok(None),
        };
        let waypoints: Vec<Waypoint> = serde_json::from_str(&waypoints)?;
        for (idx, waypoint) in waypoints.iter().enumerate() {
            if waypoint.id() != idx {
                return Err(Error::Serialization(serde_json::Error::custom(format!(
                    "stored waypoint at index {} has ID={}",
                    idx,
                    waypoint.id()
                ))));
            }
        }

        let history: Vec<WaypointId> = match self.slots.get(HISTORY_SLOT)? {
            Some(value) => serde_json::from_str(&value)?,
            None => Vec::new(),
        };
        let history: Vec<WaypointId> = history
            .into_iter()
            .filter(|id| {
                if *id < waypoints.len() {
                    true
                } else {
                    warn!("Dropping history entry for unknown waypoint ID={}", id);
                    false
                }
            })
            .collect();

        debug!(
            "Loaded {} waypoints and {} history entries",
            waypoints.len(),
            history.len()
        );
        Ok(Some(WaypointStore::from_parts(
            waypoints,
            HistoryStack::from_entries(history),
        )))
    }

    /// Erase every stored slot
    pub fn clear(&mut self) -> Result<(), Error> {
        self.slots.remove(WAYPOINTS_SLOT)?;
        self.slots.remove(HISTORY_SLOT)?;
        Ok(())
    }

    pub fn slots(&self) -> &S {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::Coordinate;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    fn adapter() -> PersistenceAdapter<SqliteSlotStore> {
        PersistenceAdapter::new(SqliteSlotStore::open_in_memory().unwrap())
    }

    #[test]
    fn test_load_without_save() {
        assert_eq!(adapter().load().unwrap(), None);
    }

    #[test]
    fn test_round_trip_keeps_tombstones_and_history() {
        // persisted timestamps only carry millisecond precision
        let created = Utc.timestamp_millis(1_616_000_000_000);
        let mut store = WaypointStore::new();
        store.create_at(Coordinate::new(1.0, 2.0), created);
        store.create_at(Coordinate::new(3.0, 4.0), created);
        store.create_at(Coordinate::new(5.0, 6.0), created);
        store.move_waypoint(0, Coordinate::new(1.5, 2.5)).unwrap();
        store.set_description(2, "bridge".to_string()).unwrap();
        store.revert();
        store.revert();
        store.revert();

        let mut persist = adapter();
        persist.save(&store).unwrap();
        let restored = persist.load().unwrap().unwrap();

        assert_eq!(restored, store);
        assert!(!restored.get(1).unwrap().is_active());
        assert_eq!(restored.get(2).unwrap().description(), Some("bridge"));
    }

    #[test]
    fn test_slot_format() {
        let mut store = WaypointStore::new();
        store.create_at(
            Coordinate::new(10.0, 20.0),
            Utc.timestamp_millis(1_600_000_000_123),
        );

        let mut persist = adapter();
        persist.save(&store).unwrap();
        let raw = persist.slots().get(WAYPOINTS_SLOT).unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            json!([{
                "id": 0,
                "positionHistory": [[10.0, 20.0]],
                "createdAt": 1_600_000_000_123_i64
            }])
        );
    }

    #[test]
    fn test_missing_history_slot_loads_empty_history() {
        let mut slots = SqliteSlotStore::open_in_memory().unwrap();
        slots
            .set(
                WAYPOINTS_SLOT,
                r#"[{"id":0,"positionHistory":[[1.0,2.0]],"createdAt":0,"description":"gate"}]"#,
            )
            .unwrap();
        let store = PersistenceAdapter::new(slots).load().unwrap().unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.history().is_empty());
        assert_eq!(store.get(0).unwrap().description(), Some("gate"));
    }

    #[test]
    fn test_load_rejects_misnumbered_waypoints() {
        let mut slots = SqliteSlotStore::open_in_memory().unwrap();
        slots
            .set(
                WAYPOINTS_SLOT,
                r#"[{"id":3,"positionHistory":[[1.0,2.0]],"createdAt":0}]"#,
            )
            .unwrap();
        assert!(matches!(
            PersistenceAdapter::new(slots).load(),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_clear_erases_slots() {
        let mut store = WaypointStore::new();
        store.create(Coordinate::new(1.0, 2.0));
        let mut persist = adapter();
        persist.save(&store).unwrap();
        persist.clear().unwrap();
        assert_eq!(persist.load().unwrap(), None);
        assert_eq!(persist.slots().get(HISTORY_SLOT).unwrap(), None);
    }
}
