//! HTML table extraction.
//!
//! The bonbast pages render their data as plain `<table>` elements. This
//! module turns a fetched page into rows of trimmed cell text, skipping
//! the header `<tr>` of each table.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

lazy_static! {
    static ref TABLE: Selector = Selector::parse("table").expect("static selector");
    static ref TR: Selector = Selector::parse("tr").expect("static selector");
    static ref TD: Selector = Selector::parse("td").expect("static selector");
}

/// Parses every `<table>` in the document into its data rows.
///
/// Each table's first `<tr>` is treated as a header and skipped. Each
/// remaining row becomes the ordered list of its `<td>` texts, trimmed.
pub fn parse_tables(html: &str) -> Vec<Vec<Vec<String>>> {
    let document = Html::parse_document(html);
    document
        .select(&TABLE)
        .map(|table| {
            table
                .select(&TR)
                .skip(1)
                .map(row_cells)
                .collect::<Vec<_>>()
        })
        .collect()
}

fn row_cells(row: ElementRef) -> Vec<String> {
    row.select(&TD)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect()
}
