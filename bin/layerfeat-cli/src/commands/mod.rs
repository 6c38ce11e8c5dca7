// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared CLI plumbing.

pub mod inspect;
pub mod sample;
pub mod transform;

use anyhow::Context;
use layer_filter::FilterConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` selects info, `-vv` debug and
/// `-vvv` trace. Without either only warnings are shown.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose > 1)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the filter configuration: defaults, then the TOML file (if any),
/// then explicit command-line options.
pub fn resolve_config(
    file: Option<&Path>,
    model: Option<PathBuf>,
    layer: Option<String>,
    batch_size: Option<usize>,
) -> anyhow::Result<FilterConfig> {
    let mut config = match file {
        Some(path) => FilterConfig::from_file(path)
            .with_context(|| format!("loading configuration from '{}'", path.display()))?,
        None => FilterConfig::default(),
    };

    if let Some(model) = model {
        config.model_path = model;
    }
    if let Some(layer) = layer {
        config.layer_name = layer;
    }
    if let Some(batch_size) = batch_size {
        config.batch_size = batch_size;
    }

    config.validate()?;
    tracing::debug!("resolved configuration: {config:?}");
    Ok(config)
}
