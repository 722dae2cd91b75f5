//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::feature::FeatureAttrValType;
use crate::index::{TileFeature, TileFeatures};
use crate::mvt::geom_encoder::EncodableGeom;
use crate::mvt::vector_tile;
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use prost::Message;
use std::collections::HashMap;
use std::io::{self, Read, Write};

/// Hashable attribute value for value table lookups
#[derive(PartialEq, Eq, Hash)]
enum ValueKey {
    String(String),
    Double(u64),
    UInt(u64),
    SInt(i64),
    Bool(bool),
}

impl FeatureAttrValType {
    fn mvt_value(&self) -> vector_tile::Value {
        let mut value = vector_tile::Value::default();
        match self {
            FeatureAttrValType::String(v) => value.string_value = Some(v.clone()),
            FeatureAttrValType::Double(v) => value.double_value = Some(*v),
            FeatureAttrValType::UInt(v) => value.uint_value = Some(*v),
            FeatureAttrValType::SInt(v) => value.sint_value = Some(*v),
            FeatureAttrValType::Bool(v) => value.bool_value = Some(*v),
        }
        value
    }
    fn key(&self) -> ValueKey {
        match self {
            FeatureAttrValType::String(v) => ValueKey::String(v.clone()),
            FeatureAttrValType::Double(v) => ValueKey::Double(v.to_bits()),
            FeatureAttrValType::UInt(v) => ValueKey::UInt(*v),
            FeatureAttrValType::SInt(v) => ValueKey::SInt(*v),
            FeatureAttrValType::Bool(v) => ValueKey::Bool(*v),
        }
    }
}

/// MVT layer with key and value tables
pub struct LayerBuilder {
    layer: vector_tile::Layer,
    keys: HashMap<String, u32>,
    values: HashMap<ValueKey, u32>,
}

impl LayerBuilder {
    pub fn new(name: &str, extent: u32) -> LayerBuilder {
        LayerBuilder {
            layer: vector_tile::Layer {
                version: 2,
                name: name.to_string(),
                extent: Some(extent),
                ..Default::default()
            },
            keys: HashMap::new(),
            values: HashMap::new(),
        }
    }

    fn add_feature_attribute(&mut self, tags: &mut Vec<u32>, key: &str, value: &FeatureAttrValType) {
        let keyidx = match self.keys.get(key) {
            Some(idx) => *idx,
            None => {
                let idx = self.layer.keys.len() as u32;
                self.layer.keys.push(key.to_string());
                self.keys.insert(key.to_string(), idx);
                idx
            }
        };
        let layer = &mut self.layer;
        let validx = *self.values.entry(value.key()).or_insert_with(|| {
            layer.values.push(value.mvt_value());
            (layer.values.len() - 1) as u32
        });
        tags.push(keyidx);
        tags.push(validx);
    }

    /// Add feature, returns false if its geometry encodes to nothing
    pub fn add_feature(&mut self, feature: &TileFeature) -> bool {
        let geometry = feature.geometry.encode();
        if geometry.is_empty() {
            return false;
        }
        let mut tags = Vec::with_capacity(feature.properties.len() * 2);
        for (key, value) in feature.properties.iter() {
            if let Some(attr) = FeatureAttrValType::from_json(value) {
                self.add_feature_attribute(&mut tags, key, &attr);
            }
        }
        self.layer.features.push(vector_tile::Feature {
            id: feature.id,
            tags,
            r#type: Some(feature.geometry.mvt_geom_type() as i32),
            geometry: geometry.into_vec(),
        });
        true
    }

    pub fn is_empty(&self) -> bool {
        self.layer.features.is_empty()
    }

    pub fn into_layer(self) -> vector_tile::Layer {
        self.layer
    }
}

pub struct Tile {
    pub mvt_tile: vector_tile::Tile,
}

impl Tile {
    pub fn new() -> Tile {
        Tile {
            mvt_tile: vector_tile::Tile::default(),
        }
    }

    /// Add a layer with all encodable features. Layers without features are omitted.
    pub fn add_layer(&mut self, name: &str, features: &TileFeatures) -> usize {
        let mut builder = LayerBuilder::new(name, features.extent);
        let count = features
            .features
            .iter()
            .filter(|feature| builder.add_feature(feature))
            .count();
        if !builder.is_empty() {
            self.mvt_tile.layers.push(builder.into_layer());
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.mvt_tile.layers.is_empty()
    }

    pub fn tile_bytevec(&self) -> Vec<u8> {
        self.mvt_tile.encode_to_vec()
    }

    pub fn tile_bytevec_gz(&self) -> Result<Vec<u8>, io::Error> {
        let mut gz = GzEncoder::new(Vec::new(), Compression::default());
        gz.write_all(&self.mvt_tile.encode_to_vec())?;
        gz.finish()
    }

    pub fn read_from(data: &[u8]) -> Result<vector_tile::Tile, io::Error> {
        vector_tile::Tile::decode(data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn read_gz_from(data: &[u8]) -> Result<vector_tile::Tile, io::Error> {
        let mut gz = GzDecoder::new(data);
        let mut unc_tile = Vec::with_capacity(data.len() * 2);
        gz.read_to_end(&mut unc_tile)?;
        Self::read_from(&unc_tile)
    }
}

/// Encode named layers into a MVT payload.
///
/// Returns `None` if no layer contains an encodable feature.
pub fn encode_layers(
    layers: &[(&str, &TileFeatures)],
    gzip: bool,
) -> Result<Option<Vec<u8>>, io::Error> {
    let mut tile = Tile::new();
    for (name, features) in layers {
        tile.add_layer(name, features);
    }
    if tile.is_empty() {
        return Ok(None);
    }
    let data = if gzip {
        tile.tile_bytevec_gz()?
    } else {
        tile.tile_bytevec()
    };
    Ok(Some(data))
}
