//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::index::IndexOptions;
use regex::Regex;
use serde::Deserialize;
use std;
use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use std::str::FromStr;
use std::time::Duration;
use tera::{Context, Tera};
use tile_grid::MAX_ZOOM;
use toml::Value;

pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self, String>;
    /// Generate configuration template
    fn gen_config() -> String;
}

/// Configuration file contents. Every value is optional, command line options override them.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ApplicationCfg {
    #[serde(default)]
    pub generate: GenerateCfg,
    #[serde(default)]
    pub index: IndexCfg,
    #[serde(default)]
    pub s3: S3Cfg,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct GenerateCfg {
    /// Input GeoJSON file
    pub data: Option<String>,
    /// Output directory or `s3://bucket/prefix`
    pub out: Option<String>,
    /// Maximal zoom level
    pub zoom: Option<u8>,
    /// Primary layer name
    pub layer: Option<String>,
    /// Add a layer with polygon centroids
    pub centroids: Option<bool>,
    pub centroids_layer: Option<String>,
    /// Gzip compress tiles
    pub gzip: Option<bool>,
    /// Show progress bar
    pub progress: Option<bool>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct IndexCfg {
    /// Douglas-Peucker simplification tolerance in tile coordinate units
    pub tolerance: Option<f64>,
    /// Tile coordinate extent
    pub extent: Option<u32>,
    /// Tile buffer in tile coordinate units
    pub buffer: Option<u32>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct S3Cfg {
    /// Apply `public-read` ACL
    pub public: Option<bool>,
    pub region: Option<String>,
    /// Custom endpoint, e.g. MinIO
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// Timeout of a single upload in seconds
    pub timeout: Option<u64>,
    /// Maximal number of uploads in flight
    pub max_pending: Option<usize>,
    /// `before-summary` or `after-summary`
    pub drain: Option<String>,
}

pub const DEFAULT_CONFIG: &'static str = r#"
[generate]
data = "input.geojson"
# Local directory or s3://bucket/prefix
out = "tiles"
zoom = 15
layer = "features"
centroids = false
centroids_layer = "centroids"
gzip = false
progress = false

[index]
tolerance = 1.5
extent = 4096
buffer = 0

[s3]
public = false
#region = "eu-central-1"
#endpoint = "http://localhost:9000"
#access_key = "..."
#secret_key = "..."
timeout = 60
#max_pending = 16
drain = "before-summary"
"#;

pub const DEFAULT_OUTPUT: &str = "tiles";
pub const DEFAULT_MAXZOOM: u8 = 15;
pub const DEFAULT_LAYER: &str = "features";
pub const DEFAULT_CENTROIDS_LAYER: &str = "centroids";
pub const DEFAULT_S3_TIMEOUT: u64 = 60;

/// Maximal number of pending uploads: `min(2 * CPUs, 64)`
pub fn default_max_pending() -> usize {
    std::cmp::min(num_cpus::get() * 2, 64)
}

/// Tile storage location
#[derive(Clone, PartialEq, Debug)]
pub enum Backend {
    /// Directory tree `root/z/x/y.mvt`
    Local { root: String },
    /// Objects `prefix/z/x/y.mvt` in an S3 bucket
    Remote {
        bucket: String,
        prefix: String,
        public: bool,
    },
}

/// Parse the output root. `s3://bucket/prefix` (scheme case insensitive) selects S3,
/// anything else is a local directory. Trailing slashes are removed.
pub fn parse_output_root(out: &str, public: bool) -> Result<Backend, String> {
    let trimmed = out.trim_end_matches('/');
    let is_s3 = trimmed
        .get(..5)
        .map_or(false, |scheme| scheme.eq_ignore_ascii_case("s3://"));
    if !is_s3 {
        let root = if trimmed.is_empty() && out.starts_with('/') {
            "/"
        } else {
            trimmed
        };
        if root.is_empty() {
            return Err("Empty output path".to_string());
        }
        return Ok(Backend::Local {
            root: root.to_string(),
        });
    }
    let path = &trimmed[5..];
    let (bucket, prefix) = match path.find('/') {
        Some(pos) => (&path[..pos], &path[pos + 1..]),
        None => (path, ""),
    };
    if bucket.is_empty() {
        return Err(format!("Missing bucket name in `{}`", out));
    }
    Ok(Backend::Remote {
        bucket: bucket.to_string(),
        prefix: prefix.trim_end_matches('/').to_string(),
        public,
    })
}

/// Order of the remote write barrier relative to the final report
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum DrainMode {
    /// Wait for uploads before reporting totals
    BeforeSummary,
    /// Report totals first, then wait for uploads
    AfterSummary,
}

impl Default for DrainMode {
    fn default() -> DrainMode {
        DrainMode::BeforeSummary
    }
}

impl FromStr for DrainMode {
    type Err = String;

    fn from_str(s: &str) -> Result<DrainMode, String> {
        match s {
            "before-summary" => Ok(DrainMode::BeforeSummary),
            "after-summary" => Ok(DrainMode::AfterSummary),
            _ => Err(format!(
                "Invalid drain mode `{}` (expected before-summary or after-summary)",
                s
            )),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct OutputCfg {
    pub backend: Backend,
    pub gzip: bool,
}

/// Connection and queue settings of the S3 backend
#[derive(Clone, PartialEq, Debug)]
pub struct S3Options {
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub timeout: Duration,
    pub max_pending: usize,
}

impl Default for S3Options {
    fn default() -> S3Options {
        S3Options {
            region: None,
            endpoint: None,
            access_key: None,
            secret_key: None,
            timeout: Duration::from_secs(DEFAULT_S3_TIMEOUT),
            max_pending: default_max_pending(),
        }
    }
}

/// Resolved run configuration
#[derive(Clone, PartialEq, Debug)]
pub struct PyramidConfig {
    pub input: String,
    pub maxzoom: u8,
    pub layer: String,
    /// Centroid layer name, `None` if disabled
    pub centroids_layer: Option<String>,
    pub index: IndexOptions,
    pub output: OutputCfg,
    pub s3: S3Options,
    pub drain: DrainMode,
    pub progress: bool,
}

impl<'a> Config<'a, ApplicationCfg> for PyramidConfig {
    fn from_config(config: &ApplicationCfg) -> Result<Self, String> {
        let gen = &config.generate;
        let input = gen
            .data
            .clone()
            .filter(|data| !data.is_empty())
            .ok_or("Missing input data path".to_string())?;
        let maxzoom = gen.zoom.unwrap_or(DEFAULT_MAXZOOM);
        if maxzoom > MAX_ZOOM {
            return Err(format!(
                "Invalid zoom level {} (maximum is {})",
                maxzoom, MAX_ZOOM
            ));
        }
        let layer = gen.layer.clone().unwrap_or(DEFAULT_LAYER.to_string());
        let centroids_layer = if gen.centroids.unwrap_or(false) {
            Some(
                gen.centroids_layer
                    .clone()
                    .unwrap_or(DEFAULT_CENTROIDS_LAYER.to_string()),
            )
        } else {
            None
        };
        if centroids_layer.as_ref() == Some(&layer) {
            return Err(format!("Duplicate layer name `{}`", layer));
        }

        let defaults = IndexOptions::default();
        let index = IndexOptions {
            maxzoom,
            tolerance: config.index.tolerance.unwrap_or(defaults.tolerance),
            extent: config.index.extent.unwrap_or(defaults.extent),
            buffer: config.index.buffer.unwrap_or(defaults.buffer),
        };
        if index.extent == 0 {
            return Err("Tile extent must be greater than 0".to_string());
        }
        if !(index.tolerance >= 0.0) {
            return Err(format!("Invalid tolerance {}", index.tolerance));
        }

        let out = gen.out.clone().unwrap_or(DEFAULT_OUTPUT.to_string());
        let backend = parse_output_root(&out, config.s3.public.unwrap_or(false))?;

        let s3 = S3Options {
            region: config.s3.region.clone(),
            endpoint: config.s3.endpoint.clone(),
            access_key: config.s3.access_key.clone(),
            secret_key: config.s3.secret_key.clone(),
            timeout: Duration::from_secs(config.s3.timeout.unwrap_or(DEFAULT_S3_TIMEOUT)),
            max_pending: config.s3.max_pending.unwrap_or_else(default_max_pending),
        };
        if s3.timeout.as_secs() == 0 {
            return Err("S3 timeout must be greater than 0".to_string());
        }
        if s3.max_pending == 0 {
            return Err("S3 max_pending must be greater than 0".to_string());
        }
        let drain = match config.s3.drain {
            Some(ref mode) => mode.parse::<DrainMode>()?,
            None => DrainMode::default(),
        };

        Ok(PyramidConfig {
            input,
            maxzoom,
            layer,
            centroids_layer,
            index,
            output: OutputCfg {
                backend,
                gzip: gen.gzip.unwrap_or(false),
            },
            s3,
            drain,
            progress: gen.progress.unwrap_or(false),
        })
    }
    fn gen_config() -> String {
        DEFAULT_CONFIG.to_string()
    }
}

/// Load and parse the config file into an config struct.
pub fn read_config<'a, T: Deserialize<'a>>(path: &str) -> Result<T, String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            return Err("Could not find config file!".to_string());
        }
    };
    let mut config_toml = String::new();
    if let Err(err) = file.read_to_string(&mut config_toml) {
        return Err(format!("Error while reading config: [{}]", err));
    };

    parse_config(config_toml, path)
}

/// Parse the configuration into an config struct.
pub fn parse_config<'a, T: Deserialize<'a>>(config_toml: String, path: &str) -> Result<T, String> {
    // Check for old ${var} expressions
    let re = Regex::new(r"\$\{([[:alnum:]_]+)\}").map_err(|e| e.to_string())?;
    if re.is_match(&config_toml) {
        return Err(
            "Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`".to_string(),
        );
    }

    // Parse template
    let mut tera = Tera::default();
    tera.add_raw_template(path, &config_toml)
        .map_err(|e| format!("Template error: {}", e))?;
    let mut context = Context::new();
    let mut env = HashMap::new();
    for (key, value) in env::vars() {
        env.insert(key, value);
    }
    context.insert("env", &env);
    let toml = tera.render(path, &context).map_err(|e| match e.source() {
        Some(source) => format!("Template error: {}", source),
        None => format!("Template error: {}", e),
    })?;

    toml.parse::<Value>()
        .and_then(|cfg| cfg.try_into::<T>())
        .map_err(|err| format!("{} - {}", path, err))
}
