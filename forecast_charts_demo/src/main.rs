// Copyright 2025 the Forecast Charts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a forecast chart to SVG.
//!
//! Usage: `forecast_charts_demo [data.json] [out.svg]`
//!
//! Without arguments the bundled sample data is rendered to `forecast_chart.svg`.

mod svg;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use forecast_charts::{ChartData, ForecastChartSpec};
use serde::Deserialize;

const DEFAULT_DATA: &str = include_str!("../data/forecast.json");
const DEFAULT_OUTPUT: &str = "forecast_chart.svg";

/// Layout options plus chart data, as read from a JSON file.
#[derive(Debug, Deserialize)]
struct DemoConfig {
    #[serde(default)]
    options: ForecastChartSpec,
    data: ChartData,
}

impl DemoConfig {
    fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid chart configuration")
    }

    fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                Self::from_json(&json).with_context(|| format!("in {}", path.display()))
            }
            None => {
                log::info!("no data file given, rendering the bundled sample");
                Self::from_json(DEFAULT_DATA)
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args_os().skip(1);
    let input = args.next().map(PathBuf::from);
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let config = DemoConfig::load(input.as_deref())?;
    let scene = config.options.build(&config.data);
    log::info!(
        "built {} marks for {} series",
        scene.marks.len(),
        config.data.series.len()
    );

    let svg = svg::to_svg_string(&scene);
    std::fs::write(&output, svg).with_context(|| format!("failed to write {}", output.display()))?;
    println!("wrote {}", output.display());
    Ok(())
}
