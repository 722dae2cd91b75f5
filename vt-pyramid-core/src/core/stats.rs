//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Statistics collector

use stats::{MinMax, OnlineStats};
use std::collections::BTreeMap;
use std::fmt;

type MeasurementType = u64;

struct StatCollector {
    online: OnlineStats,
    minmax: MinMax<MeasurementType>,
}

pub struct StatResults {
    pub len: usize,
    pub min: MeasurementType,
    pub max: MeasurementType,
    pub mean: f64,
    pub stddev: f64,
}

/// Measurements grouped by key, e.g. tile sizes per zoom level
#[derive(Default)]
pub struct Statistics(BTreeMap<String, StatCollector>);

impl Statistics {
    pub fn new() -> Statistics {
        Statistics(BTreeMap::new())
    }
    fn collector(&mut self, key: &str) -> &mut StatCollector {
        self.0
            .entry(key.to_string())
            .or_insert_with(|| StatCollector {
                online: OnlineStats::new(),
                minmax: MinMax::new(),
            })
    }
    pub fn add(&mut self, key: &str, value: MeasurementType) {
        let collector = self.collector(key);
        collector.online.add(value);
        collector.minmax.add(value);
    }
    /// Return the current results.
    pub fn results(&self, key: &str) -> StatResults {
        if let Some(collector) = self.0.get(key) {
            StatResults {
                len: collector.minmax.len(),
                min: *collector.minmax.min().unwrap_or(&0),
                max: *collector.minmax.max().unwrap_or(&0),
                mean: collector.online.mean(),
                stddev: collector.online.stddev(),
            }
        } else {
            StatResults {
                len: 0,
                min: 0,
                max: 0,
                mean: 0.0,
                stddev: 0.0,
            }
        }
    }
}

impl fmt::Display for StatResults {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "min: {} bytes, max: {} bytes, mean: {:.1} bytes",
            self.min, self.max, self.mean
        )
    }
}

impl fmt::Debug for StatResults {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "#measurements: {}, min: {}, max: {}, mean: {:.10} +/- {:.10}",
            self.len, self.min, self.max, self.mean, self.stddev
        )
    }
}

impl fmt::Debug for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for key in self.0.keys() {
            let res = self.results(&key);
            writeln!(f, "{}: {:?}", key, res)?;
        }
        Ok(())
    }
}

#[test]
fn usage() {
    let mut stats = Statistics::new();
    stats.add("tilesize.z1", 1);
    assert_eq!(stats.results("tilesize.z1").mean, 1.0);
    stats.add("tilesize.z1", 2);
    assert_eq!(stats.results("tilesize.z1").mean, 1.5);
    stats.add("tilesize.z2", 2);
    assert_eq!(stats.results("tilesize.z2").mean, 2.0);
    stats.add("tilesize.z1", 3);
    assert_eq!(stats.results("tilesize.z1").mean, 2.0);
    assert!((stats.results("tilesize.z1").stddev - 0.816496580927726).abs() < 1e-12);
    assert_eq!(stats.results("tilesize.z1").len, 3);
    assert_eq!(stats.results("tilesize.z1").min, 1);
    assert_eq!(stats.results("tilesize.z1").max, 3);
    assert_eq!(format!("{:?}", stats).lines().count(), 2);

    assert_eq!(stats.results("tilesize.zx").mean, 0.0);
    assert_eq!(
        format!("{}", stats.results("tilesize.z2")),
        "min: 2 bytes, max: 2 bytes, mean: 2.0 bytes"
    );
}
