//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Representative points of polygon features

use crate::core::feature::{Feature, FeatureCollection, Properties};
use crate::core::geom::{GeometryType, Point, Polygon};

/// Centroid point features of all polygons in `collection`.
///
/// Every Polygon yields one feature, every MultiPolygon one feature per part,
/// each carrying a copy of the source properties. Other geometries and
/// polygons without a defined centroid are skipped.
pub fn centroid_features(collection: &FeatureCollection) -> FeatureCollection {
    let mut centroids = Vec::new();
    for feature in &collection.features {
        match feature.geometry {
            Some(GeometryType::Polygon(ref polygon)) => {
                centroids.extend(centroid_feature(polygon, &feature.properties));
            }
            Some(GeometryType::MultiPolygon(ref multipolygon)) => {
                for polygon in &multipolygon.polygons {
                    centroids.extend(centroid_feature(polygon, &feature.properties));
                }
            }
            _ => {}
        }
    }
    FeatureCollection::new(centroids)
}

fn centroid_feature(polygon: &Polygon, properties: &Properties) -> Option<Feature> {
    polygon_centroid(polygon)
        .map(|centroid| Feature::new(GeometryType::Point(centroid), properties.clone()))
}

/// Area weighted centroid of the outer ring. Holes are not taken into account.
///
/// Returns `None` for empty or degenerate (zero area) rings.
pub fn polygon_centroid(polygon: &Polygon) -> Option<Point> {
    let ring = &polygon.rings.first()?.points;
    let origin = *ring.first()?;
    // relative to the first position to keep precision for small or distant rings
    let rel: Vec<Point> = ring
        .iter()
        .map(|p| Point::new(p.x - origin.x, p.y - origin.y))
        .collect();

    let (mut x, mut y, mut area) = (0.0, 0.0, 0.0);
    let mut j = rel.len() - 1;
    for i in 0..rel.len() {
        let p0 = &rel[i];
        let p1 = &rel[j];
        let f = p0.y * p1.x - p1.y * p0.x;
        x += (p0.x + p1.x) * f;
        y += (p0.y + p1.y) * f;
        area += f * 3.0;
        j = i;
    }

    if area == 0.0 {
        return None;
    }
    let centroid = Point::new(x / area + origin.x, y / area + origin.y);
    if centroid.x.is_finite() && centroid.y.is_finite() {
        Some(centroid)
    } else {
        None
    }
}
