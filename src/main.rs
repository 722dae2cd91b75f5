//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::ArgMatches;
use dotenv::dotenv;
use env_logger::Builder;
use log::Record;
use std::env;
use std::io::Write;
use std::process;
use time;
use vt_pyramid_core::core::config::DrainMode;
use vt_pyramid_core::core::feature::FeatureCollection;
use vt_pyramid_core::core::{Config, InputError, PyramidConfig};
use vt_pyramid_core::storage::{TileSink, Tilesink};
use vt_pyramid_service::runtime_config::{cli_app, config_from_args};
use vt_pyramid_service::PyramidService;

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        let ts = time::strftime("%Y-%m-%d %H:%M:%S", &t)
            .map(|ts| ts.to_string())
            .unwrap_or_default();
        writeln!(
            buf,
            "{}.{:03} {} {}",
            ts,
            t.tm_nsec / 1000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log = match (args.value_of("loglevel"), env::var("RUST_LOG")) {
        (None, Ok(rust_log_env)) => rust_log_env,
        (loglevel, _) => match loglevel.unwrap_or("info") {
            "debug" => "debug,hyper=info,rusoto_core=info".to_string(),
            loglevel => loglevel.to_string(),
        },
    };
    builder.parse_filters(&rust_log);

    builder.init();
}

fn generate(config: &PyramidConfig) {
    info!("Reading {}", config.input);
    let collection = FeatureCollection::read(&config.input).unwrap_or_else(|err| {
        match err {
            InputError::Io { .. } => println!("Error reading input - {}", err),
            _ => println!("Error reading input - {}: {}", config.input, err),
        }
        process::exit(1)
    });
    let bbox = match collection.extent() {
        Some(bbox) => bbox,
        None => {
            warn!("No geometries found in {}", config.input);
            println!("Total tiles generated: 0");
            return;
        }
    };
    info!(
        "{} features, extent: {:.5}, {:.5}, {:.5}, {:.5}",
        collection.len(),
        bbox.minx,
        bbox.miny,
        bbox.maxx,
        bbox.maxy
    );

    let sink = Tilesink::from_config(config).unwrap_or_else(|err| {
        println!("Error initializing tile output - {}", err);
        process::exit(1)
    });
    let service = PyramidService::from_config(config, &collection);
    let mut summary = service.generate(&bbox, config.maxzoom, &sink);
    match config.drain {
        DrainMode::BeforeSummary => {
            summary.remote_failures = sink.drain();
            println!("{}", summary);
        }
        DrainMode::AfterSummary => {
            println!("{}", summary);
            let failed = sink.drain();
            if failed > 0 {
                println!("Failed tile writes: {}", failed);
            }
        }
    }
}

fn main() {
    dotenv().ok();
    let mut app = cli_app(crate_version!());
    let matches = match app.get_matches_from_safe_borrow(env::args()) {
        Ok(matches) => matches,
        Err(e) => e.exit(),
    };
    init_logger(&matches);

    if matches.is_present("genconfig") {
        println!("{}", PyramidConfig::gen_config());
        return;
    }
    let appcfg = config_from_args(&matches).unwrap_or_else(|err| {
        println!("Error reading configuration - {}", err);
        process::exit(1)
    });
    if appcfg.generate.data.is_none() {
        app.print_help().ok();
        println!();
        process::exit(1);
    }
    let config = PyramidConfig::from_config(&appcfg).unwrap_or_else(|err| {
        println!("Error reading configuration - {}", err);
        process::exit(1)
    });
    generate(&config);
}
