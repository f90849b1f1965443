//! A recording session ties a waypoint store to its persistence slots and a display surface
use crate::export::{export_geojson, table_rows, ExportKind, GeoJson, TableRow};
use crate::gps::Coordinate;
use crate::persistence::{PersistenceAdapter, SlotStore};
use crate::services::{GeoSource, PositionOptions, TrackSurface};
use crate::track::path::current_path;
use crate::track::{Reverted, WaypointId, WaypointStore};
use crate::Error;
use chrono::{DateTime, Utc};
use log::{info, warn};

/// Owns the track for the lifetime of one session. Every mutation is saved before it returns
/// and the surface is refreshed afterwards. A mutation whose save fails leaves the track as it was.
pub struct Session<S: SlotStore, V: TrackSurface> {
    store: WaypointStore,
    persistence: PersistenceAdapter<S>,
    surface: V,
}

impl<S: SlotStore, V: TrackSurface> Session<S, V> {
    /// Restore any saved track and draw it on the surface
    pub fn open(persistence: PersistenceAdapter<S>, mut surface: V) -> Result<Self, Error> {
        let store = match persistence.load()? {
            Some(store) => {
                info!("Restored track with {} waypoints", store.len());
                store
            }
            None => WaypointStore::new(),
        };
        for waypoint in store.active_waypoints() {
            if let Some(pos) = waypoint.position() {
                surface.place_marker(waypoint.id(), pos);
            }
        }
        surface.draw_path(&current_path(&store));

        Ok(Session {
            store,
            persistence,
            surface,
        })
    }

    pub fn store(&self) -> &WaypointStore {
        &self.store
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    /// Request a position from the source and record it as a new waypoint
    pub async fn record(
        &mut self,
        source: &dyn GeoSource,
        options: &PositionOptions,
    ) -> Result<WaypointId, Error> {
        let sample = match source.request_position(options).await {
            Ok(sample) => sample,
            Err(e) => {
                warn!("Could not record a waypoint: {}", e);
                return Err(e);
            }
        };
        self.record_at(sample.coordinate(), sample.timestamp())
    }

    /// Record a new waypoint at a known position
    pub fn record_at(
        &mut self,
        position: Coordinate,
        timestamp: DateTime<Utc>,
    ) -> Result<WaypointId, Error> {
        let mut candidate = self.store.clone();
        let id = candidate.create_at(position, timestamp);
        self.commit(candidate)?;
        self.surface.place_marker(id, position);
        self.redraw();
        Ok(id)
    }

    /// Move a waypoint, bringing back its marker if it had been undone away
    pub fn move_waypoint(&mut self, id: WaypointId, position: Coordinate) -> Result<(), Error> {
        let was_active = self.store.get(id).map(|w| w.is_active()).unwrap_or(false);
        let mut candidate = self.store.clone();
        candidate.move_waypoint(id, position)?;
        self.commit(candidate)?;
        if was_active {
            self.surface.move_marker(id, position);
        } else {
            self.surface.place_marker(id, position);
        }
        self.redraw();
        Ok(())
    }

    /// Undo the most recent create or move, a no-op when there is nothing to undo
    pub fn undo(&mut self) -> Result<Option<Reverted>, Error> {
        let mut candidate = self.store.clone();
        let reverted = match candidate.revert() {
            Some(reverted) => reverted,
            None => return Ok(None),
        };
        self.commit(candidate)?;
        match reverted {
            Reverted::Moved { id, position } => self.surface.move_marker(id, position),
            Reverted::Tombstoned { id } => self.surface.remove_marker(id),
        }
        self.redraw();
        Ok(Some(reverted))
    }

    pub fn describe(&mut self, id: WaypointId, text: String) -> Result<(), Error> {
        let mut candidate = self.store.clone();
        candidate.set_description(id, text)?;
        self.commit(candidate)
    }

    /// Delete the whole track along with its saved copy
    pub fn clear(&mut self) -> Result<(), Error> {
        let active: Vec<WaypointId> = self.store.active_waypoints().map(|w| w.id()).collect();
        self.persistence.clear()?;
        self.store.clear();
        for id in active {
            self.surface.remove_marker(id);
        }
        self.redraw();
        info!("Cleared all waypoint data");
        Ok(())
    }

    pub fn export_geojson(
        &self,
        kind: ExportKind,
        shape_desc: Option<&str>,
    ) -> Result<GeoJson, Error> {
        export_geojson(&self.store, kind, shape_desc)
    }

    pub fn table_rows(&self) -> Vec<TableRow> {
        table_rows(&self.store)
    }

    /// Save the edited copy of the track and only then replace the live one
    fn commit(&mut self, candidate: WaypointStore) -> Result<(), Error> {
        self.persistence.save(&candidate)?;
        self.store = candidate;
        Ok(())
    }

    fn redraw(&mut self) {
        self.surface.draw_path(&current_path(&self.store));
    }
}
