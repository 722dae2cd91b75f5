//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use std::io;
use vt_pyramid_core::index::TileFeatures;
use vt_pyramid_core::mvt::tile::encode_layers;

/// Named layers of one tile. Layers without geometry are kept as `None`
/// and filtered out before encoding.
#[derive(Default, Debug)]
pub struct LayerSet {
    entries: Vec<(String, Option<TileFeatures>)>,
}

impl LayerSet {
    pub fn new() -> LayerSet {
        LayerSet {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, name: &str, features: Option<TileFeatures>) {
        self.entries.push((name.to_string(), features));
    }

    /// Layers with geometry
    pub fn layers(&self) -> impl Iterator<Item = (&str, &TileFeatures)> {
        self.entries
            .iter()
            .filter_map(|(name, features)| features.as_ref().map(|f| (name.as_str(), f)))
    }

    pub fn names(&self) -> Vec<&str> {
        self.layers().map(|(name, _)| name).collect()
    }

    /// True if no layer has geometry
    pub fn is_empty(&self) -> bool {
        self.layers().next().is_none()
    }

    /// Encoded tile, `None` if no feature could be encoded
    pub fn encode(&self, gzip: bool) -> Result<Option<Vec<u8>>, io::Error> {
        let layers: Vec<(&str, &TileFeatures)> = self.layers().collect();
        encode_layers(&layers, gzip)
    }
}
