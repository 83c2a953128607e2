//! Plain-text tables for the terminal.

use super::list::{ListView, PageSource};
use crate::models::{Column, Entity};

pub const LOADING_FAILED: &str = "Could not load data.";
pub const NO_RECORDS: &str = "No records found.";

/// Left-aligned table with a dashed rule under the header
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(headers.to_vec()));
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

pub fn entity_rows(columns: &[Column], entities: &[&Entity]) -> Vec<Vec<String>> {
    entities
        .iter()
        .map(|e| columns.iter().map(|c| e.display(c.key)).collect())
        .collect()
}

pub fn page_footer(current: u32, total: u32) -> String {
    format!("Page {} of {}", current, total)
}

/// The visible state of a list view: rows after search, then the pager
pub fn list_view<S: PageSource>(view: &ListView<S>) -> String {
    let columns = view.kind().columns();
    let rows = view.rows();

    let mut out = String::new();
    if let Some(err) = view.last_error() {
        out.push_str(&format!("{} {}\n", LOADING_FAILED, err));
    }
    if rows.is_empty() {
        out.push_str(NO_RECORDS);
        out.push('\n');
    } else {
        let headers: Vec<&str> = columns.iter().map(|c| c.header).collect();
        out.push_str(&table(&headers, &entity_rows(columns, &rows)));
    }
    out.push_str(&page_footer(view.current_page(), view.total_pages()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityKind;
    use crate::views::list::tests::FakeSource;

    #[test]
    fn table_aligns_columns() {
        let out = table(&["Name", "Email"], &[vec!["Al".into(), "al@x.io".into()], vec!["Beatrice".into(), "b@x.io".into()]]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Name      Email");
        assert_eq!(lines[1], "-".repeat(8 + 2 + 7));
        assert_eq!(lines[2], "Al        al@x.io");
        assert_eq!(lines[3], "Beatrice  b@x.io");
    }

    #[tokio::test]
    async fn view_shows_rows_and_pager() {
        let mut view = ListView::new(FakeSource::with_tenants(25), EntityKind::Tenant, 10);
        view.load(1).await;
        let out = list_view(&view);
        assert!(out.ends_with("Page 1 of 3"));
        // header, rule, ten rows, footer
        assert_eq!(out.lines().count(), 13);
        assert!(out.contains("Tenant 10"));

        view.search("zzz");
        assert!(list_view(&view).starts_with(NO_RECORDS));
    }
}
