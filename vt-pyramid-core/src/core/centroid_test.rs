//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::centroid::{centroid_features, polygon_centroid};
use crate::core::feature::{Feature, FeatureCollection, Properties};
use crate::core::geom::{GeometryType, LineString, MultiPolygon, Point, Polygon};
use serde_json::json;

fn ring(coords: &[(f64, f64)]) -> LineString {
    LineString {
        points: coords.iter().map(|&(x, y)| Point::new(x, y)).collect(),
    }
}

fn polygon(coords: &[(f64, f64)]) -> Polygon {
    Polygon {
        rings: vec![ring(coords)],
    }
}

fn props(name: &str) -> Properties {
    let mut properties = Properties::new();
    properties.insert("name".to_string(), json!(name));
    properties.insert("pop".to_string(), json!(42));
    properties
}

#[test]
fn test_square_centroid() {
    let square = polygon(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
    let c = polygon_centroid(&square).unwrap();
    assert!((c.x - 1.0).abs() < 1e-9);
    assert!((c.y - 1.0).abs() < 1e-9);
}

#[test]
fn test_distant_small_polygon() {
    // relative computation keeps precision far from the origin
    let (ox, oy) = (8.5401, 47.3782);
    let d = 0.00001;
    let square = polygon(&[
        (ox, oy),
        (ox + d, oy),
        (ox + d, oy + d),
        (ox, oy + d),
        (ox, oy),
    ]);
    let c = polygon_centroid(&square).unwrap();
    assert!((c.x - (ox + d / 2.0)).abs() < 1e-12);
    assert!((c.y - (oy + d / 2.0)).abs() < 1e-12);
}

#[test]
fn test_convex_centroid_inside() {
    let triangle = polygon(&[(0.0, 0.0), (6.0, 0.0), (0.0, 3.0), (0.0, 0.0)]);
    let c = polygon_centroid(&triangle).unwrap();
    assert!((c.x - 2.0).abs() < 1e-9);
    assert!((c.y - 1.0).abs() < 1e-9);
    // strictly inside: x > 0, y > 0, x/6 + y/3 < 1
    assert!(c.x > 0.0 && c.y > 0.0 && c.x / 6.0 + c.y / 3.0 < 1.0);

    let hexagon = polygon(&[
        (2.0, 0.0),
        (4.0, 1.0),
        (4.0, 3.0),
        (2.0, 4.0),
        (0.0, 3.0),
        (0.0, 1.0),
        (2.0, 0.0),
    ]);
    let c = polygon_centroid(&hexagon).unwrap();
    assert!(c.x > 0.0 && c.x < 4.0 && c.y > 0.0 && c.y < 4.0);
    assert!((c.x - 2.0).abs() < 1e-9);
    assert!((c.y - 2.0).abs() < 1e-9);
}

#[test]
fn test_holes_are_ignored() {
    let mut with_hole = polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]);
    with_hole
        .rings
        .push(ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]));
    let c = polygon_centroid(&with_hole).unwrap();
    assert!((c.x - 2.0).abs() < 1e-9);
    assert!((c.y - 2.0).abs() < 1e-9);
}

#[test]
fn test_degenerate_rings() {
    assert_eq!(polygon_centroid(&Polygon { rings: vec![] }), None);
    assert_eq!(polygon_centroid(&polygon(&[])), None);
    assert_eq!(polygon_centroid(&polygon(&[(1.0, 1.0)])), None);
    assert_eq!(polygon_centroid(&polygon(&[(1.0, 1.0), (2.0, 2.0)])), None);
    // collinear
    assert_eq!(
        polygon_centroid(&polygon(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.0, 0.0)])),
        None
    );
    // non-finite input
    assert_eq!(
        polygon_centroid(&polygon(&[
            (0.0, 0.0),
            (std::f64::INFINITY, 0.0),
            (1.0, 1.0),
            (0.0, 0.0)
        ])),
        None
    );
}

#[test]
fn test_centroid_features() {
    let square = polygon(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
    let other = polygon(&[(10.0, 10.0), (10.0, 12.0), (12.0, 12.0), (12.0, 10.0), (10.0, 10.0)]);
    let degenerate = polygon(&[(5.0, 5.0), (6.0, 6.0)]);
    let collection = FeatureCollection::new(vec![
        Feature::new(GeometryType::Polygon(square.clone()), props("square")),
        Feature {
            id: Some(7),
            geometry: None,
            properties: props("nowhere"),
        },
        Feature::new(GeometryType::Point(Point::new(3.0, 3.0)), props("point")),
        Feature::new(
            GeometryType::MultiPolygon(MultiPolygon {
                polygons: vec![square, degenerate, other],
            }),
            props("multi"),
        ),
    ]);
    let centroids = centroid_features(&collection);
    assert_eq!(centroids.len(), 3);
    // input is left untouched
    assert_eq!(collection.len(), 4);

    let expected = [("square", 1.0), ("multi", 1.0), ("multi", 11.0)];
    for (feature, (name, xy)) in centroids.features.iter().zip(expected.iter()) {
        assert_eq!(feature.properties, props(name));
        assert_eq!(feature.id, None);
        match feature.geometry {
            Some(GeometryType::Point(ref p)) => {
                assert!((p.x - xy).abs() < 1e-9);
                assert!((p.y - xy).abs() < 1e-9);
            }
            ref g => panic!("unexpected geometry {:?}", g),
        }
    }
}

#[test]
fn test_multipolygon_parts_carry_properties_by_value() {
    let part = polygon(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
    let mut collection = FeatureCollection::new(vec![Feature::new(
        GeometryType::MultiPolygon(MultiPolygon {
            polygons: vec![part.clone(), part.clone(), part],
        }),
        props("multi"),
    )]);
    let centroids = centroid_features(&collection);
    assert_eq!(centroids.len(), 3);

    collection.features[0]
        .properties
        .insert("name".to_string(), json!("changed"));
    for feature in &centroids.features {
        assert_eq!(feature.properties["name"], json!("multi"));
        assert_eq!(feature.properties.len(), 2);
    }
}

#[test]
fn test_empty_collection() {
    let centroids = centroid_features(&FeatureCollection::default());
    assert!(centroids.is_empty());
}
