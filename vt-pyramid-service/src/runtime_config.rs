//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use clap::{App, ArgMatches};
use std::str::FromStr;
use vt_pyramid_core::core::{read_config, ApplicationCfg};

/// Command line interface
pub fn cli_app<'a, 'b>(version: &'b str) -> App<'a, 'b> {
    App::new("vt_pyramid")
        .version(version)
        .author("Pirmin Kalberer <pka@sourcepole.ch>")
        .about("Generate a Mapbox Vector Tile pyramid from a GeoJSON file")
        .args_from_usage(
            "-d, --data=[FILE] 'Input GeoJSON file'
             -o, --out=[ROOT] 'Output directory or s3://bucket/prefix (Default: tiles)'
             -z, --zoom=[LEVEL] 'Maximum zoom level (Default: 15)'
             --layer=[NAME] 'Layer name (Default: features)'
             --centroids 'Add a layer with polygon centroids'
             --centroids-layer=[NAME] 'Centroid layer name (Default: centroids)'
             --s3public 'Make uploaded tiles public readable'
             --gzip 'Gzip compress tiles'
             --drain=[before-summary|after-summary] 'Wait for S3 uploads before or after reporting totals (Default: before-summary)'
             -c, --config=[FILE] 'Load from custom config file'
             --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
             --progress 'Show progress bar'
             --genconfig 'Print configuration template'",
        )
}

fn parse_arg<T: FromStr>(args: &ArgMatches, name: &str) -> Result<Option<T>, String> {
    match args.value_of(name) {
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| format!("Invalid value `{}` for '{}'", value, name)),
        None => Ok(None),
    }
}

/// Configuration file (if any) with command line options applied
pub fn config_from_args(args: &ArgMatches) -> Result<ApplicationCfg, String> {
    let mut config = match args.value_of("config") {
        Some(cfgpath) => {
            info!("Reading configuration from '{}'", cfgpath);
            read_config(cfgpath)?
        }
        None => ApplicationCfg::default(),
    };
    let gen = &mut config.generate;
    if let Some(data) = args.value_of("data") {
        gen.data = Some(data.to_string());
    }
    if let Some(out) = args.value_of("out") {
        gen.out = Some(out.to_string());
    }
    if let Some(zoom) = parse_arg::<u8>(args, "zoom")? {
        gen.zoom = Some(zoom);
    }
    if let Some(layer) = args.value_of("layer") {
        gen.layer = Some(layer.to_string());
    }
    if args.is_present("centroids") {
        gen.centroids = Some(true);
    }
    if let Some(layer) = args.value_of("centroids-layer") {
        gen.centroids_layer = Some(layer.to_string());
    }
    if args.is_present("gzip") {
        gen.gzip = Some(true);
    }
    if args.is_present("progress") {
        gen.progress = Some(true);
    }
    if args.is_present("s3public") {
        config.s3.public = Some(true);
    }
    if let Some(drain) = args.value_of("drain") {
        config.s3.drain = Some(drain.to_string());
    }
    Ok(config)
}
