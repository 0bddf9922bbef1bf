//! Plain-text table rendering for size reports.

use crossterm::style::Stylize;
use unicode_width::UnicodeWidthStr;

use filesize_analyze::SizeReport;

const HEADERS: [&str; 3] = ["File", "Size", "Size (gzipped)"];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

const ALIGN: [Align; 3] = [Align::Left, Align::Right, Align::Right];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tone {
    Plain,
    Header,
    Alert,
}

/// A cell's text plus how it should be highlighted.
struct Cell {
    text: String,
    tone: Tone,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Plain,
        }
    }

    fn header(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tone: Tone::Header,
        }
    }

    fn size(bytes: u64, alert: bool) -> Self {
        Self {
            text: format_size(bytes),
            tone: if alert { Tone::Alert } else { Tone::Plain },
        }
    }
}

/// Render a report as a boxed three-column table with a totals row.
pub fn render(report: &SizeReport, color: bool) -> String {
    let header = HEADERS.map(Cell::header);
    let body: Vec<[Cell; 3]> = report
        .rows
        .iter()
        .map(|row| {
            [
                Cell::plain(row.name.as_str()),
                Cell::size(row.size, row.size_oversized),
                Cell::size(row.gzip_size, row.gzip_oversized),
            ]
        })
        .collect();
    let spacer = ["", "", ""].map(Cell::plain);
    let totals = [
        Cell::plain(format!("Total files: {}", report.totals.files)),
        Cell::size(report.totals.size, false),
        Cell::size(report.totals.gzip_size, false),
    ];

    let mut widths = [0; 3];
    for row in std::iter::once(&header)
        .chain(&body)
        .chain(std::iter::once(&totals))
    {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.text.width());
        }
    }

    let mut out = String::new();
    out.push_str(&border(&widths, '┌', '┬', '┐'));
    out.push_str(&line(&widths, &header, &[Align::Left; 3], color));
    out.push_str(&border(&widths, '├', '┼', '┤'));
    for row in &body {
        out.push_str(&line(&widths, row, &ALIGN, color));
    }
    out.push_str(&line(&widths, &spacer, &ALIGN, color));
    out.push_str(&line(&widths, &totals, &ALIGN, color));
    out.push_str(&border(&widths, '└', '┴', '┘'));

    out
}

fn border(widths: &[usize; 3], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}\n", segments.join(&mid.to_string()))
}

/// One table line. Cells are padded by display width before styling.
fn line(widths: &[usize; 3], cells: &[Cell; 3], align: &[Align; 3], color: bool) -> String {
    let mut out = String::from("│");
    for ((cell, width), align) in cells.iter().zip(widths).zip(align) {
        let pad = " ".repeat(width.saturating_sub(cell.text.width()));
        let padded = match align {
            Align::Left => format!("{}{pad}", cell.text),
            Align::Right => format!("{pad}{}", cell.text),
        };
        let painted = match (color, cell.tone) {
            (true, Tone::Header) => padded.cyan().to_string(),
            (true, Tone::Alert) => padded.red().to_string(),
            _ => padded,
        };
        out.push_str(&format!(" {painted} │"));
    }
    out.push('\n');
    out
}

/// Format size in human-readable decimal units.
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::DECIMAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filesize_analyze::{ReportTotals, SizeRow};

    fn row(name: &str, size: u64, gzip_size: u64, gzip_oversized: bool) -> SizeRow {
        SizeRow {
            name: name.into(),
            size,
            gzip_size,
            size_oversized: false,
            gzip_oversized,
        }
    }

    fn sample_report() -> SizeReport {
        SizeReport {
            rows: vec![
                row("keep.txt", 10, 30, true),
                row("src/util.js", 50, 45, true),
            ],
            totals: ReportTotals {
                files: 2,
                size: 60,
                gzip_size: 75,
            },
            large_file: Some(20),
        }
    }

    #[test]
    fn test_render_plain_layout() {
        let table = render(&sample_report(), false);
        let lines: Vec<&str> = table.lines().collect();

        // top, header, separator, 2 rows, spacer, totals, bottom
        assert_eq!(lines.len(), 8);
        assert!(lines[1].contains("File"));
        assert!(lines[1].contains("Size (gzipped)"));
        assert!(lines[3].starts_with("│ keep.txt"));
        assert!(lines[4].contains("src/util.js"));
        assert!(lines[6].contains("Total files: 2"));
        assert!(!table.contains('\u{1b}'));

        let width = lines[0].width();
        assert!(lines.iter().all(|l| l.width() == width));
    }

    #[test]
    fn test_wide_names_keep_borders_aligned() {
        let report = SizeReport {
            rows: vec![row("日本語ファイル.txt", 1, 1, false), row("a.txt", 2, 2, false)],
            totals: ReportTotals {
                files: 2,
                size: 3,
                gzip_size: 3,
            },
            large_file: None,
        };

        let table = render(&report, false);
        let lines: Vec<&str> = table.lines().collect();

        let width = lines[0].width();
        assert!(lines.iter().all(|l| l.width() == width), "{table}");
        // 7 wide glyphs plus ".txt" fill the first column exactly.
        assert!(lines[3].starts_with("│ 日本語ファイル.txt │"));
    }

    #[test]
    fn test_render_color_keeps_borders() {
        let plain = render(&sample_report(), false);
        let colored = render(&sample_report(), true);
        let plain: Vec<&str> = plain.lines().collect();
        let colored: Vec<&str> = colored.lines().collect();

        assert_eq!(plain.len(), colored.len());
        for i in [0, 2, 7] {
            assert_eq!(plain[i], colored[i]);
        }
        // Unhighlighted cells are identical, padding included.
        assert!(colored[3].starts_with(&format!("│ {:<14} │", "keep.txt")));
    }

    #[test]
    fn test_sizes_right_aligned() {
        let table = render(&sample_report(), false);
        let row = table.lines().nth(3).unwrap();
        assert!(row.ends_with(&format!("{} │", format_size(30))));
    }

    #[test]
    fn test_format_size_decimal() {
        assert_eq!(format_size(10), "10 B");
        assert_eq!(format_size(1000), "1 kB");
    }
}
