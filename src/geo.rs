use std::path::Path;

use geojson::{GeoJson, Geometry, Value};
use thiserror::Error;

/// A country that can be placed on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Place {
    /// Name as it appears in the source data.
    pub name: &'static str,
    /// Name shown on the map.
    pub display: &'static str,
    pub lat: f64,
    pub lon: f64,
}

const PLACES: [Place; 10] = [
    Place { name: "China", display: "China", lat: 35.86, lon: 104.20 },
    Place { name: "India", display: "Índia", lat: 20.59, lon: 78.96 },
    Place { name: "Pakistan", display: "Paquistão", lat: 30.38, lon: 69.35 },
    Place { name: "Indonesia", display: "Indonésia", lat: -0.79, lon: 113.92 },
    Place { name: "Nigeria", display: "Nigéria", lat: 9.08, lon: 8.68 },
    Place { name: "Bangladesh", display: "Bangladesh", lat: 23.68, lon: 90.36 },
    Place { name: "Russian Federation", display: "Rússia", lat: 61.52, lon: 105.32 },
    Place { name: "Egypt", display: "Egito", lat: 26.82, lon: 30.80 },
    Place { name: "United States of America", display: "Estados Unidos", lat: 37.09, lon: -95.71 },
    Place { name: "Viet Nam", display: "Vietnã", lat: 14.06, lon: 108.28 },
];

/// Coordinates and display name of a country, if it is one of the mapped ten.
pub fn place(country: &str) -> Option<&'static Place> {
    PLACES.iter().find(|p| p.name == country)
}

/// Display name for a country; unmapped names are returned unchanged.
pub fn display_name(country: &str) -> &str {
    place(country).map_or(country, |p| p.display)
}

// ---------------------------------------------------------------------------
// Outline loading
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("reading outline file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing GeoJSON: {0}")]
    Parse(#[from] geojson::Error),
}

/// Polylines in (lon, lat) degrees.
pub type Outline = Vec<Vec<[f64; 2]>>;

/// Read every line and polygon exterior of a GeoJSON file.
pub fn load_outline(path: &Path) -> Result<Outline, GeoError> {
    let content = std::fs::read_to_string(path)?;
    parse_outline(&content)
}

pub fn parse_outline(content: &str) -> Result<Outline, GeoError> {
    let geojson: GeoJson = content.parse()?;
    let mut lines = Vec::new();
    match &geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                if let Some(geometry) = &feature.geometry {
                    collect_lines(geometry, &mut lines);
                }
            }
        }
        GeoJson::Feature(f) => {
            if let Some(geometry) = &f.geometry {
                collect_lines(geometry, &mut lines);
            }
        }
        GeoJson::Geometry(geometry) => collect_lines(geometry, &mut lines),
    }
    Ok(lines)
}

fn collect_lines(geometry: &Geometry, out: &mut Outline) {
    let to_line = |coords: &Vec<Vec<f64>>| -> Vec<[f64; 2]> {
        coords
            .iter()
            .filter(|c| c.len() >= 2)
            .map(|c| [c[0], c[1]])
            .collect()
    };
    match &geometry.value {
        Value::LineString(coords) => out.push(to_line(coords)),
        Value::MultiLineString(lines) => out.extend(lines.iter().map(to_line)),
        Value::Polygon(rings) => out.extend(rings.first().map(to_line)),
        Value::MultiPolygon(polygons) => {
            out.extend(polygons.iter().filter_map(|rings| rings.first()).map(to_line))
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                collect_lines(g, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_places_with_valid_coordinates() {
        assert_eq!(PLACES.len(), 10);
        for p in &PLACES {
            assert!((-90.0..=90.0).contains(&p.lat), "{}", p.name);
            assert!((-180.0..=180.0).contains(&p.lon), "{}", p.name);
        }
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(display_name("India"), "Índia");
        assert_eq!(display_name("Japan"), "Japan");
        assert!(place("Japan").is_none());
    }

    #[test]
    fn test_parse_outline_collects_polygons_and_lines() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {},
                 "geometry": {"type": "Polygon",
                              "coordinates": [[[0,0],[1,0],[1,1],[0,0]], [[0.2,0.2],[0.3,0.2],[0.2,0.2]]]}},
                {"type": "Feature", "properties": {},
                 "geometry": {"type": "LineString", "coordinates": [[10,10],[20,20]]}}
            ]
        }"#;
        let outline = parse_outline(text).unwrap();
        assert_eq!(outline.len(), 2);
        assert_eq!(outline[0].len(), 4);
        assert_eq!(outline[1], vec![[10.0, 10.0], [20.0, 20.0]]);
    }

    #[test]
    fn test_parse_outline_rejects_garbage() {
        assert!(matches!(parse_outline("not json"), Err(GeoError::Parse(_))));
    }
}
