//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod filesink;
pub mod s3sink;

#[cfg(test)]
mod filesink_test;

pub use self::filesink::Filesink;
pub use self::s3sink::S3Sink;
use crate::core::config::{Backend, PyramidConfig};
use std::io;

/// File extension of written tiles
pub const TILE_EXTENSION: &str = "mvt";

/// Relative tile path `z/x/y.mvt`
pub fn tile_path(zoom: u8, xtile: u32, ytile: u32) -> String {
    format!("{}/{}/{}.{}", zoom, xtile, ytile, TILE_EXTENSION)
}

/// Tile storage
pub trait TileSink {
    fn info(&self) -> String;
    /// Store tile. Asynchronous sinks return after dispatching the write.
    fn write(&self, zoom: u8, xtile: u32, ytile: u32, data: &[u8]) -> Result<(), io::Error>;
    /// Wait for all dispatched writes. Returns the number of failed writes.
    fn drain(&self) -> usize {
        0
    }
}

pub enum Tilesink {
    Filesink(Filesink),
    S3Sink(S3Sink),
}

impl Tilesink {
    pub fn from_config(config: &PyramidConfig) -> Result<Tilesink, String> {
        match config.output.backend {
            Backend::Local { ref root } => Ok(Tilesink::Filesink(Filesink::new(root))),
            Backend::Remote {
                ref bucket,
                ref prefix,
                public,
            } => {
                let sink = S3Sink::new(bucket, prefix, public, config.output.gzip, &config.s3)?;
                Ok(Tilesink::S3Sink(sink))
            }
        }
    }
}

impl TileSink for Tilesink {
    fn info(&self) -> String {
        match self {
            &Tilesink::Filesink(ref sink) => sink.info(),
            &Tilesink::S3Sink(ref sink) => sink.info(),
        }
    }
    fn write(&self, zoom: u8, xtile: u32, ytile: u32, data: &[u8]) -> Result<(), io::Error> {
        match self {
            &Tilesink::Filesink(ref sink) => sink.write(zoom, xtile, ytile, data),
            &Tilesink::S3Sink(ref sink) => sink.write(zoom, xtile, ytile, data),
        }
    }
    fn drain(&self) -> usize {
        match self {
            &Tilesink::Filesink(ref sink) => sink.drain(),
            &Tilesink::S3Sink(ref sink) => sink.drain(),
        }
    }
}
