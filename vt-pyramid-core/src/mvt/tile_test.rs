//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::feature::Properties;
use crate::core::screen;
use crate::index::{TileFeature, TileFeatures};
use crate::mvt::tile::{encode_layers, Tile};
use crate::mvt::vector_tile::{self, GeomType};
use prost::Message;
use serde_json::json;
use std::sync::Arc;

fn point_feature(id: Option<u64>, x: i32, y: i32, properties: Properties) -> TileFeature {
    TileFeature {
        id,
        geometry: screen::Geometry::Point(screen::Point::new(x, y)),
        properties: Arc::new(properties),
    }
}

fn props(value: serde_json::Value) -> Properties {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_point_round_trip() {
    let features = TileFeatures {
        extent: 4096,
        features: vec![point_feature(
            Some(1),
            245,
            3131,
            props(json!({"hello": "world", "count": 3, "ratio": 0.5, "neg": -7, "ok": true, "empty": null})),
        )],
    };
    let data = encode_layers(&[("points", &features)], false)
        .unwrap()
        .unwrap();
    let tile = vector_tile::Tile::decode(&data[..]).unwrap();
    assert_eq!(tile.layers.len(), 1);
    let layer = &tile.layers[0];
    assert_eq!(layer.name, "points");
    assert_eq!(layer.version, 2);
    assert_eq!(layer.extent, Some(4096));
    assert_eq!(layer.features.len(), 1);

    let feature = &layer.features[0];
    assert_eq!(feature.id, Some(1));
    assert_eq!(feature.r#type, Some(GeomType::Point as i32));
    // MoveTo(245, 3131)
    assert_eq!(feature.geometry, vec![9, 490, 6262]);

    // null is skipped, keys sorted
    assert_eq!(layer.keys, vec!["count", "hello", "neg", "ok", "ratio"]);
    let decoded: Vec<(String, vector_tile::Value)> = feature
        .tags
        .chunks(2)
        .map(|kv| {
            (
                layer.keys[kv[0] as usize].clone(),
                layer.values[kv[1] as usize].clone(),
            )
        })
        .collect();
    assert_eq!(decoded.len(), 5);
    assert_eq!(decoded[0].1.uint_value, Some(3));
    assert_eq!(decoded[1].1.string_value, Some("world".to_string()));
    assert_eq!(decoded[2].1.sint_value, Some(-7));
    assert_eq!(decoded[3].1.bool_value, Some(true));
    assert_eq!(decoded[4].1.double_value, Some(0.5));
}

#[test]
fn test_shared_keys_and_values() {
    let features = TileFeatures {
        extent: 512,
        features: vec![
            point_feature(None, 1, 1, props(json!({"kind": "a", "n": 1}))),
            point_feature(None, 2, 2, props(json!({"kind": "a", "n": 2}))),
            point_feature(None, 3, 3, props(json!({"kind": "b", "n": 1.0}))),
        ],
    };
    let mut tile = Tile::new();
    assert_eq!(tile.add_layer("things", &features), 3);
    let layer = &tile.mvt_tile.layers[0];
    assert_eq!(layer.extent, Some(512));
    assert_eq!(layer.keys, vec!["kind", "n"]);
    // "a", 1, 2, "b", 1.0
    assert_eq!(layer.values.len(), 5);
    assert_eq!(layer.features[0].tags, vec![0, 0, 1, 1]);
    assert_eq!(layer.features[1].tags, vec![0, 0, 1, 2]);
    assert_eq!(layer.features[2].tags, vec![0, 3, 1, 4]);
    assert_eq!(layer.features[0].id, None);
}

#[test]
fn test_empty_layers() {
    let empty = TileFeatures {
        extent: 4096,
        features: vec![],
    };
    assert_eq!(encode_layers(&[("a", &empty)], false).unwrap(), None);
    assert_eq!(encode_layers(&[], true).unwrap(), None);

    // degenerate geometry encodes to nothing
    let degenerate = TileFeatures {
        extent: 4096,
        features: vec![TileFeature {
            id: None,
            geometry: screen::Geometry::LineString(screen::LineString {
                points: vec![screen::Point::new(1, 1)],
            }),
            properties: Arc::new(Properties::new()),
        }],
    };
    assert_eq!(encode_layers(&[("a", &degenerate)], false).unwrap(), None);

    // only non-empty layers are written
    let centroids = TileFeatures {
        extent: 4096,
        features: vec![point_feature(None, 10, 10, Properties::new())],
    };
    let data = encode_layers(&[("a", &degenerate), ("centroids", &centroids)], false)
        .unwrap()
        .unwrap();
    let tile = Tile::read_from(&data).unwrap();
    assert_eq!(tile.layers.len(), 1);
    assert_eq!(tile.layers[0].name, "centroids");
}

#[test]
fn test_gzip() {
    let features = TileFeatures {
        extent: 4096,
        features: vec![point_feature(Some(5), 100, 200, props(json!({"a": "b"})))],
    };
    let data = encode_layers(&[("layer", &features)], true)
        .unwrap()
        .unwrap();
    assert_eq!(&data[0..2], &[0x1f, 0x8b]);
    let tile = Tile::read_gz_from(&data).unwrap();
    assert_eq!(tile.layers[0].features[0].id, Some(5));
    assert_eq!(tile.layers[0].features[0].geometry, vec![9, 200, 400]);

    assert!(Tile::read_from(&[0xff, 0xff, 0xff]).is_err());
}
