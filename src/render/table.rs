//! Quote table: raw OHLCV rows plus a plain-text rendering.

use crate::domain::quote::QuoteRow;
use crate::shared::fmt::{display_price, display_volume};

use serde::Serialize;

pub const HEADERS: [&str; 6] = ["Timestamp", "Open", "High", "Low", "Close", "Volume"];

const PRICE_DECIMALS: u32 = 2;
const EMPTY_CELL: &str = "-";

/// Rows in document order (newest first), values as the provider sent them.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QuoteTable {
    pub rows: Vec<QuoteRow>,
}

impl QuoteTable {
    pub fn new(rows: Vec<QuoteRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Display cells for each row. Unparseable values are shown verbatim.
    pub fn cells(&self) -> Vec<[String; 6]> {
        self.rows.iter().map(row_cells).collect()
    }

    /// Fixed-width text table with a header line.
    pub fn to_text(&self) -> String {
        let cells = self.cells();
        let mut widths = HEADERS.map(str::len);
        for row in &cells {
            for (w, cell) in widths.iter_mut().zip(row.iter()) {
                *w = (*w).max(cell.len());
            }
        }

        let mut out = String::new();
        push_line(&mut out, &HEADERS.map(str::to_string), &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(rule.join("  ").as_str());
        out.push('\n');
        for row in &cells {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn row_cells(row: &QuoteRow) -> [String; 6] {
    let price = |raw: &Option<String>| match raw {
        Some(raw) => display_price(raw, PRICE_DECIMALS).unwrap_or_else(|| raw.clone()),
        None => EMPTY_CELL.to_string(),
    };
    let volume = match &row.volume {
        Some(raw) => display_volume(raw).unwrap_or_else(|| raw.clone()),
        None => EMPTY_CELL.to_string(),
    };
    [
        row.timestamp.clone(),
        price(&row.open),
        price(&row.high),
        price(&row.low),
        price(&row.close),
        volume,
    ]
}

fn push_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(idx, (cell, w))| {
            if idx == 0 {
                format!("{:<w$}", cell, w = *w)
            } else {
                format!("{:>w$}", cell, w = *w)
            }
        })
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}
