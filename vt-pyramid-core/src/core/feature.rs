//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! GeoJSON features

use crate::core::error::InputError;
use crate::core::geom::{
    GeometryCollection, GeometryType, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use tile_grid::Extent;

/// Feature properties, kept as read from the input
pub type Properties = Map<String, Value>;

/// Supported feature attribute value types
#[derive(Clone, PartialEq, Debug)]
pub enum FeatureAttrValType {
    String(String),
    Double(f64),
    UInt(u64),
    SInt(i64),
    Bool(bool),
}

impl FeatureAttrValType {
    /// Attribute value of a JSON property. Nested values are serialized to JSON text, null has no value.
    pub fn from_json(value: &Value) -> Option<FeatureAttrValType> {
        match value {
            Value::Null => None,
            Value::Bool(v) => Some(FeatureAttrValType::Bool(*v)),
            Value::Number(n) => {
                if let Some(v) = n.as_u64() {
                    Some(FeatureAttrValType::UInt(v))
                } else if let Some(v) = n.as_i64() {
                    Some(FeatureAttrValType::SInt(v))
                } else {
                    n.as_f64().map(FeatureAttrValType::Double)
                }
            }
            Value::String(v) => Some(FeatureAttrValType::String(v.clone())),
            Value::Array(_) | Value::Object(_) => Some(FeatureAttrValType::String(value.to_string())),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Feature {
    pub id: Option<u64>,
    /// `None` is valid GeoJSON (unlocated feature)
    pub geometry: Option<GeometryType>,
    pub properties: Properties,
}

impl Feature {
    pub fn new(geometry: GeometryType, properties: Properties) -> Feature {
        Feature {
            id: None,
            geometry: Some(geometry),
            properties,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> FeatureCollection {
        FeatureCollection { features }
    }

    /// Read GeoJSON file
    pub fn read(path: &str) -> Result<FeatureCollection, InputError> {
        let file = File::open(path).map_err(|e| InputError::Io {
            path: path.to_string(),
            source: e,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<FeatureCollection, InputError> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    pub fn parse(json: &str) -> Result<FeatureCollection, InputError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Accepts a FeatureCollection, a single Feature or a bare Geometry
    pub fn from_value(value: Value) -> Result<FeatureCollection, InputError> {
        let geojson_type = value
            .get("type")
            .and_then(Value::as_str)
            .map(|t| t.to_string())
            .ok_or_else(|| InputError::Geometry("missing `type` member".to_string()))?;
        match geojson_type.as_str() {
            "FeatureCollection" => {
                let raw: RawFeatureCollection = serde_json::from_value(value)?;
                let features = raw
                    .features
                    .into_iter()
                    .map(RawFeature::into_feature)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(FeatureCollection { features })
            }
            "Feature" => {
                let raw: RawFeature = serde_json::from_value(value)?;
                Ok(FeatureCollection {
                    features: vec![raw.into_feature()?],
                })
            }
            _ => {
                let raw: RawGeometry = serde_json::from_value(value)?;
                Ok(FeatureCollection {
                    features: vec![Feature::new(raw.into_geometry()?, Properties::new())],
                })
            }
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Geographic bounding box of all positions, `None` without any position
    pub fn extent(&self) -> Option<Extent> {
        self.features
            .iter()
            .filter_map(|f| f.geometry.as_ref().and_then(|g| g.extent()))
            .fold(None, |acc: Option<Extent>, ext| match acc {
                Some(mut merged) => {
                    merged.merge(&ext);
                    Some(merged)
                }
                None => Some(ext),
            })
    }
}

// --- GeoJSON deserialization

#[derive(Deserialize)]
struct RawFeatureCollection {
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    geometry: Option<RawGeometry>,
    #[serde(default)]
    properties: Option<Properties>,
}

impl RawFeature {
    fn into_feature(self) -> Result<Feature, InputError> {
        let geometry = match self.geometry {
            Some(raw) => Some(raw.into_geometry()?),
            None => None,
        };
        Ok(Feature {
            id: self.id.as_ref().and_then(Value::as_u64),
            geometry,
            properties: self.properties.unwrap_or_default(),
        })
    }
}

type Position = Vec<f64>;

#[derive(Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<RawGeometry> },
}

fn point(position: &[f64]) -> Result<Point, InputError> {
    match position {
        [x, y, ..] => Ok(Point::new(*x, *y)),
        _ => Err(InputError::Geometry(format!(
            "position {:?} needs at least two coordinates",
            position
        ))),
    }
}

fn points(positions: &[Position]) -> Result<Vec<Point>, InputError> {
    positions.iter().map(|p| point(p)).collect()
}

fn line(positions: &[Position]) -> Result<LineString, InputError> {
    Ok(LineString {
        points: points(positions)?,
    })
}

fn polygon(rings: &[Vec<Position>]) -> Result<Polygon, InputError> {
    Ok(Polygon {
        rings: rings.iter().map(|r| line(r)).collect::<Result<_, _>>()?,
    })
}

impl RawGeometry {
    fn into_geometry(self) -> Result<GeometryType, InputError> {
        let geom = match self {
            RawGeometry::Point { coordinates } => GeometryType::Point(point(&coordinates)?),
            RawGeometry::MultiPoint { coordinates } => GeometryType::MultiPoint(MultiPoint {
                points: points(&coordinates)?,
            }),
            RawGeometry::LineString { coordinates } => {
                GeometryType::LineString(line(&coordinates)?)
            }
            RawGeometry::MultiLineString { coordinates } => {
                GeometryType::MultiLineString(MultiLineString {
                    lines: coordinates
                        .iter()
                        .map(|l| line(l))
                        .collect::<Result<_, _>>()?,
                })
            }
            RawGeometry::Polygon { coordinates } => GeometryType::Polygon(polygon(&coordinates)?),
            RawGeometry::MultiPolygon { coordinates } => {
                GeometryType::MultiPolygon(MultiPolygon {
                    polygons: coordinates
                        .iter()
                        .map(|p| polygon(p))
                        .collect::<Result<_, _>>()?,
                })
            }
            RawGeometry::GeometryCollection { geometries } => {
                GeometryType::GeometryCollection(GeometryCollection {
                    geometries: geometries
                        .into_iter()
                        .map(RawGeometry::into_geometry)
                        .collect::<Result<_, _>>()?,
                })
            }
        };
        Ok(geom)
    }
}
