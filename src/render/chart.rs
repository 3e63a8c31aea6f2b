//! Line chart configuration, shaped for a JS chart library.

use crate::domain::quote::DisplaySeries;
use crate::domain::theme::{Palette, Theme};
use crate::shared::Ticker;

use serde::Serialize;

const LINE_WIDTH: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

/// One line. Closes are decimal strings; a missing close is `null` (a gap).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<Option<String>>,
    pub border_color: String,
    pub background_color: String,
    pub border_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub plugins: ChartPlugins,
    pub scales: ChartScales,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPlugins {
    pub legend: ChartLegend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLegend {
    pub labels: ColorOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartScales {
    pub x: ChartAxis,
    pub y: ChartAxis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartAxis {
    pub ticks: ColorOnly,
    pub grid: ColorOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorOnly {
    pub color: String,
}

impl ChartOptions {
    pub fn themed(palette: &Palette) -> Self {
        let axis = || ChartAxis {
            ticks: ColorOnly {
                color: palette.text.to_string(),
            },
            grid: ColorOnly {
                color: palette.grid.to_string(),
            },
        };
        Self {
            responsive: true,
            plugins: ChartPlugins {
                legend: ChartLegend {
                    labels: ColorOnly {
                        color: palette.text.to_string(),
                    },
                },
            },
            scales: ChartScales { x: axis(), y: axis() },
        }
    }
}

impl ChartConfig {
    /// Build the closing-price line for `ticker`, coloured for `theme`.
    pub fn line(ticker: Option<&Ticker>, series: &DisplaySeries, theme: Theme) -> Self {
        let palette = theme.palette();
        let label = match ticker {
            Some(t) => format!("{} Stock Price", t),
            None => "Stock Price".to_string(),
        };

        Self {
            data: ChartData {
                labels: series.labels(),
                datasets: vec![ChartDataset {
                    label,
                    data: series
                        .closes()
                        .into_iter()
                        .map(|close| close.map(|c| c.to_string()))
                        .collect(),
                    border_color: palette.line_border.to_string(),
                    background_color: palette.line_fill.to_string(),
                    border_width: LINE_WIDTH,
                }],
            },
            options: ChartOptions::themed(&palette),
        }
    }
}
