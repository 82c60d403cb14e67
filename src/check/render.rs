//! Text rendering of per-file reports

use crate::version::checker::{FileReport, OutdatedDependency, ReportEntry};

pub const NO_DEPENDENCIES: &str = " No dependencies found";
pub const NOTHING_TO_UPDATE: &str = " No dependencies to update";
const ARROW: &str = "→";
const CATALOG_MARKER: &str = "(catalog)";

/// Column widths of the outdated rows
#[derive(Debug, Default, PartialEq, Eq)]
struct Widths {
    name: usize,
    current: usize,
    latest: usize,
}

impl Widths {
    fn measure<'a>(rows: impl Iterator<Item = &'a OutdatedDependency>) -> Self {
        rows.fold(Self::default(), |widths, row| Self {
            name: widths.name.max(row.name.chars().count()),
            current: widths.current.max(row.current_version.chars().count()),
            latest: widths.latest.max(row.latest_version.chars().count()),
        })
    }
}

fn render_row(row: &OutdatedDependency, widths: &Widths) -> String {
    let marker = if row.from_catalog {
        format!(" {CATALOG_MARKER}")
    } else {
        String::new()
    };

    format!(
        " {:<name_w$}  {:>current_w$}  {ARROW}  {:>latest_w$}{marker}",
        row.name,
        row.current_version,
        row.latest_version,
        name_w = widths.name,
        current_w = widths.current,
        latest_w = widths.latest,
    )
}

/// Render one file's report as output lines.
///
/// Rows keep the report's name order. Names and versions are aligned across the
/// outdated rows only.
pub fn render_file_report(report: &FileReport) -> Vec<String> {
    if report.declared == 0 {
        return vec![NO_DEPENDENCIES.to_string()];
    }

    let widths = Widths::measure(report.outdated());
    let mut lines: Vec<String> = report
        .entries
        .iter()
        .map(|entry| match entry {
            ReportEntry::Outdated(row) => render_row(row, &widths),
            ReportEntry::NotFound(name) => format!("Package not found: {name}"),
            ReportEntry::NotInCatalog(name) => format!("Catalog entry not found: {name}"),
        })
        .collect();

    if report.outdated().next().is_none() {
        lines.push(NOTHING_TO_UPDATE.to_string());
    }

    lines
}
