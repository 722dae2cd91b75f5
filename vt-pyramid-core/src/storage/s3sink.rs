//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::S3Options;
use crate::storage::{tile_path, TileSink};
use futures_util::future::{join_all, select_all};
use rusoto_core::{HttpClient, Region};
use rusoto_credential::{DefaultCredentialsProvider, StaticProvider};
use rusoto_s3::{PutObjectRequest, S3Client, S3};
use std::io;
use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::task::{JoinError, JoinHandle};

pub const CONTENT_TYPE: &str = "application/x-protobuf";

/// Object key `prefix/z/x/y.mvt`, without leading slash for an empty prefix
pub fn object_key(prefix: &str, zoom: u8, xtile: u32, ytile: u32) -> String {
    if prefix.is_empty() {
        tile_path(zoom, xtile, ytile)
    } else {
        format!("{}/{}", prefix, tile_path(zoom, xtile, ytile))
    }
}

/// Tiles as objects in a S3 bucket.
///
/// Uploads run as tasks on an own runtime. At most `max_pending` uploads are in flight,
/// `drain` waits for the remaining ones.
pub struct S3Sink {
    runtime: Runtime,
    client: S3Client,
    bucket: String,
    prefix: String,
    public: bool,
    gzip: bool,
    timeout: Duration,
    max_pending: usize,
    pending: Mutex<Vec<JoinHandle<bool>>>,
    written: AtomicUsize,
    failed: AtomicUsize,
}

impl S3Sink {
    pub fn new(
        bucket: &str,
        prefix: &str,
        public: bool,
        gzip: bool,
        options: &S3Options,
    ) -> Result<S3Sink, String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| format!("Couldn't initialize tokio runtime: {}", e))?;
        let region = match (&options.region, &options.endpoint) {
            (region, Some(endpoint)) => Region::Custom {
                name: region.clone().unwrap_or("us-east-1".to_string()),
                endpoint: endpoint.clone(),
            },
            (Some(region), None) => region
                .parse::<Region>()
                .map_err(|e| format!("Invalid S3 region `{}`: {}", region, e))?,
            (None, None) => Region::default(),
        };
        let client = {
            let _guard = runtime.enter();
            let http_client =
                HttpClient::new().map_err(|e| format!("Couldn't create HTTP client: {}", e))?;
            match (&options.access_key, &options.secret_key) {
                (Some(access_key), Some(secret_key)) => S3Client::new_with(
                    http_client,
                    StaticProvider::new_minimal(access_key.clone(), secret_key.clone()),
                    region,
                ),
                _ => S3Client::new_with(
                    http_client,
                    DefaultCredentialsProvider::new()
                        .map_err(|e| format!("S3 credentials: {}", e))?,
                    region,
                ),
            }
        };
        Ok(S3Sink {
            runtime,
            client,
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
            public,
            gzip,
            timeout: options.timeout,
            max_pending: options.max_pending,
            pending: Mutex::new(Vec::with_capacity(options.max_pending)),
            written: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self, zoom: u8, xtile: u32, ytile: u32) -> String {
        object_key(&self.prefix, zoom, xtile, ytile)
    }

    /// Number of completed uploads
    pub fn written(&self) -> usize {
        self.written.load(Ordering::SeqCst)
    }

    /// Number of failed uploads collected so far
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    fn request(&self, key: String, data: &[u8]) -> PutObjectRequest {
        PutObjectRequest {
            bucket: self.bucket.clone(),
            key,
            body: Some(data.to_vec().into()),
            content_type: Some(CONTENT_TYPE.to_string()),
            content_encoding: if self.gzip {
                Some("gzip".to_string())
            } else {
                None
            },
            acl: if self.public {
                Some("public-read".to_string())
            } else {
                None
            },
            ..Default::default()
        }
    }

    fn record(&self, result: Result<bool, JoinError>) {
        match result {
            Ok(true) => {
                self.written.fetch_add(1, Ordering::SeqCst);
            }
            Ok(false) => {
                self.failed.fetch_add(1, Ordering::SeqCst);
            }
            Err(e) => {
                error!("Upload task failed: {}", e);
                self.failed.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn await_one_task(&self, pending: &mut Vec<JoinHandle<bool>>) {
        let tasks = mem::take(pending);
        let (result, _index, remaining) = self.runtime.block_on(select_all(tasks));
        *pending = remaining;
        self.record(result);
    }
}

impl TileSink for S3Sink {
    fn info(&self) -> String {
        format!("S3 bucket: s3://{}/{}", self.bucket, self.prefix)
    }
    fn write(&self, zoom: u8, xtile: u32, ytile: u32, data: &[u8]) -> Result<(), io::Error> {
        let key = self.key(zoom, xtile, ytile);
        let location = format!("s3://{}/{}", self.bucket, key);
        let request = self.request(key, data);
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        while pending.len() >= self.max_pending {
            self.await_one_task(&mut pending);
        }
        let client = self.client.clone();
        let timeout = self.timeout;
        debug!("S3Sink.write {}", location);
        pending.push(self.runtime.spawn(async move {
            match tokio::time::timeout(timeout, client.put_object(request)).await {
                Ok(Ok(_)) => true,
                Ok(Err(e)) => {
                    error!("Error writing {}: {}", location, e);
                    false
                }
                Err(_) => {
                    error!("Error writing {}: timeout after {:?}", location, timeout);
                    false
                }
            }
        }));
        Ok(())
    }
    fn drain(&self) -> usize {
        let tasks = {
            let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            mem::take(&mut *pending)
        };
        if !tasks.is_empty() {
            info!("Waiting for {} pending uploads", tasks.len());
        }
        for result in self.runtime.block_on(join_all(tasks)) {
            self.record(result);
        }
        self.failed()
    }
}
