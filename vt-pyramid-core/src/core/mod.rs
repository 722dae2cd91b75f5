//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod centroid;
pub mod config;
pub mod error;
pub mod feature;
pub mod geom;
pub mod screen;
pub mod stats;

pub use self::config::{parse_config, read_config, ApplicationCfg, Config, PyramidConfig};
pub use self::error::InputError;

#[cfg(test)]
mod centroid_test;
#[cfg(test)]
mod geom_test;
