//! GeoJSON output, coordinates are written in `[longitude, latitude]` order
use super::{ExportKind, UNDESCRIPTED};
use crate::track::path::{closed_path, current_path};
use crate::track::WaypointStore;
use crate::Error;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
    LineString { coordinates: Vec<[f64; 2]> },
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Properties {
    pub desc: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    type_field: &'static str,
    pub geometry: Geometry,
    pub properties: Properties,
}

impl Feature {
    pub fn new(geometry: Geometry, desc: String) -> Self {
        Feature {
            type_field: "Feature",
            geometry,
            properties: Properties { desc },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    type_field: &'static str,
    pub features: Vec<Feature>,
}

/// Top level GeoJSON document
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GeoJson {
    Feature(Feature),
    FeatureCollection(FeatureCollection),
}

impl GeoJson {
    /// Serialize the document into a compact JSON string
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Export the track in the requested shape, `shape_desc` is ignored for point exports since
/// every point carries its own description.
pub fn export_geojson(
    store: &WaypointStore,
    kind: ExportKind,
    shape_desc: Option<&str>,
) -> Result<GeoJson, Error> {
    match kind {
        ExportKind::Points => points(store),
        ExportKind::Line => line(store, shape_desc),
        ExportKind::Polygon => polygon(store, shape_desc),
    }
}

/// One point feature per active waypoint, tombstones have no position and are left out
pub fn points(store: &WaypointStore) -> Result<GeoJson, Error> {
    let features: Vec<Feature> = store
        .active_waypoints()
        .filter_map(|w| {
            let desc = w.description().unwrap_or(UNDESCRIPTED).to_string();
            w.position().map(|pos| {
                Feature::new(
                    Geometry::Point {
                        coordinates: pos.to_lng_lat(),
                    },
                    desc,
                )
            })
        })
        .collect();
    if features.is_empty() {
        return Err(Error::EmptyTrack);
    }

    Ok(GeoJson::FeatureCollection(FeatureCollection {
        type_field: "FeatureCollection",
        features,
    }))
}

pub fn line(store: &WaypointStore, shape_desc: Option<&str>) -> Result<GeoJson, Error> {
    let path = current_path(store);
    if path.is_empty() {
        return Err(Error::EmptyTrack);
    }
    let coordinates = path.iter().map(|c| c.to_lng_lat()).collect();

    Ok(GeoJson::Feature(Feature::new(
        Geometry::LineString { coordinates },
        shape_desc.unwrap_or(UNDESCRIPTED).to_string(),
    )))
}

pub fn polygon(store: &WaypointStore, shape_desc: Option<&str>) -> Result<GeoJson, Error> {
    let ring = closed_path(store)?.iter().map(|c| c.to_lng_lat()).collect();

    Ok(GeoJson::Feature(Feature::new(
        Geometry::Polygon {
            coordinates: vec![ring],
        },
        shape_desc.unwrap_or(UNDESCRIPTED).to_string(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::Coordinate;
    use serde_json::{json, Value};

    fn to_value(doc: &GeoJson) -> Value {
        serde_json::from_str(&doc.to_json().unwrap()).unwrap()
    }

    #[test]
    fn test_line_export() {
        let mut store = WaypointStore::new();
        store.create(Coordinate::new(10.0, 20.0));
        store.create(Coordinate::new(10.0, 21.0));

        let value = to_value(&line(&store, None).unwrap());
        assert_eq!(
            value["geometry"],
            json!({"type": "LineString", "coordinates": [[20.0, 10.0], [21.0, 10.0]]})
        );
        assert_eq!(value["type"], "Feature");
        assert_eq!(value["properties"]["desc"], "Undescripted");
    }

    #[test]
    fn test_polygon_export_closes_ring() {
        let mut store = WaypointStore::new();
        store.create(Coordinate::new(0.0, 0.0));
        store.create(Coordinate::new(0.0, 1.0));
        store.create(Coordinate::new(1.0, 1.0));

        let value = to_value(&polygon(&store, Some("field")).unwrap());
        assert_eq!(value["geometry"]["type"], "Polygon");
        assert_eq!(
            value["geometry"]["coordinates"][0],
            json!([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]])
        );
        assert_eq!(value["properties"]["desc"], "field");
    }

    #[test]
    fn test_points_export_uses_descriptions() {
        let mut store = WaypointStore::new();
        store.create(Coordinate::new(1.0, 2.0));
        store.create(Coordinate::new(3.0, 4.0));
        store.set_description(1, "oak tree".to_string()).unwrap();

        let value = to_value(&points(&store).unwrap());
        assert_eq!(value["type"], "FeatureCollection");
        let features = value["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0]["properties"]["desc"], "Undescripted");
        assert_eq!(features[0]["geometry"]["coordinates"], json!([2.0, 1.0]));
        assert_eq!(features[1]["properties"]["desc"], "oak tree");
    }

    #[test]
    fn test_points_export_excludes_tombstones() {
        let mut store = WaypointStore::new();
        store.create(Coordinate::new(1.0, 2.0));
        store.create(Coordinate::new(3.0, 4.0));
        store.revert();

        match points(&store).unwrap() {
            GeoJson::FeatureCollection(fc) => assert_eq!(fc.features.len(), 1),
            other => panic!("unexpected document: {:?}", other),
        }
    }

    #[test]
    fn test_empty_track_fails_for_every_kind() {
        let mut store = WaypointStore::new();
        store.create(Coordinate::new(1.0, 2.0));
        store.revert();
        for kind in &[ExportKind::Points, ExportKind::Line, ExportKind::Polygon] {
            assert!(matches!(
                export_geojson(&store, *kind, None),
                Err(Error::EmptyTrack)
            ));
        }
    }
}
