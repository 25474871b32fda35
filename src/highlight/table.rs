//! Markdown tables: boxed grid when the columns fit, `Header: value` records
//! when they don't.

use crate::terminal::{StyledLine, StyledSpan};
use crate::text::display_width;
use pulldown_cmark::Alignment;

/// Narrowest column before the grid gives way to records.
const MIN_COLUMN_WIDTH: usize = 8;

#[derive(Debug, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub alignments: Vec<Alignment>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self, width: usize) -> Vec<StyledLine> {
        let cols = self.num_columns();
        if cols == 0 {
            return Vec::new();
        }
        // │ cell │ cell │ = cols + 1 borders, 2 padding per column
        let overhead = cols + 1 + cols * 2;
        if width >= cols * MIN_COLUMN_WIDTH + overhead {
            self.render_grid(width - overhead)
        } else {
            self.render_records(width)
        }
    }

    fn num_columns(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    fn column_widths(&self, content_width: usize) -> Vec<usize> {
        let cols = self.num_columns();
        let mut natural = vec![1; cols];
        for row in std::iter::once(&self.headers).chain(&self.rows) {
            for (i, cell) in row.iter().enumerate() {
                natural[i] = natural[i].max(display_width(cell));
            }
        }
        let total: usize = natural.iter().sum();
        if total <= content_width {
            return natural;
        }
        // Shrink the widest column one cell at a time.
        let mut widths = natural;
        let mut excess = total - content_width;
        while excess > 0 {
            let Some((idx, _)) = widths
                .iter()
                .enumerate()
                .filter(|&(_, w)| *w > MIN_COLUMN_WIDTH)
                .max_by_key(|&(_, w)| *w)
            else {
                break;
            };
            widths[idx] -= 1;
            excess -= 1;
        }
        widths
    }

    fn render_grid(&self, content_width: usize) -> Vec<StyledLine> {
        let widths = self.column_widths(content_width);
        let mut lines = vec![border(&widths, ("┌", "┬", "┐"))];
        if !self.headers.is_empty() {
            lines.extend(self.render_row(&self.headers, &widths, true));
            lines.push(border(&widths, ("├", "┼", "┤")));
        }
        for row in &self.rows {
            lines.extend(self.render_row(row, &widths, false));
        }
        lines.push(border(&widths, ("└", "┴", "┘")));
        lines
    }

    fn render_row(&self, cells: &[String], widths: &[usize], header: bool) -> Vec<StyledLine> {
        let wrapped: Vec<Vec<String>> = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| wrap_cell(cells.get(i).map_or("", String::as_str), w))
            .collect();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);

        (0..height)
            .map(|row| {
                let mut line = StyledLine::new(vec![StyledSpan::dim("│")]);
                for (col, lines) in wrapped.iter().enumerate() {
                    let text = lines.get(row).map_or("", String::as_str);
                    let align = self.alignments.get(col).copied().unwrap_or(Alignment::None);
                    let padded = format!(" {} ", pad_cell(text, widths[col], align));
                    line.push(if header {
                        StyledSpan::bold(padded)
                    } else {
                        StyledSpan::raw(padded)
                    });
                    line.push(StyledSpan::dim("│"));
                }
                line
            })
            .collect()
    }

    fn render_records(&self, width: usize) -> Vec<StyledLine> {
        let mut lines = Vec::new();
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                lines.push(StyledLine::dim("─".repeat(width.min(40))));
            }
            for (col, cell) in row.iter().enumerate() {
                let header = self.headers.get(col).map_or("?", String::as_str);
                let label = StyledLine::new(vec![
                    StyledSpan::bold(header),
                    StyledSpan::dim(": "),
                    StyledSpan::raw(cell.as_str()),
                ]);
                lines.extend(label.wrap(width));
            }
        }
        lines
    }
}

fn border(widths: &[usize], (left, mid, right): (&str, &str, &str)) -> StyledLine {
    let inner = widths
        .iter()
        .map(|w| "─".repeat(w + 2))
        .collect::<Vec<_>>()
        .join(mid);
    StyledLine::dim(format!("{left}{inner}{right}"))
}

fn wrap_cell(text: &str, width: usize) -> Vec<String> {
    StyledLine::raw(text)
        .wrap(width)
        .iter()
        .map(StyledLine::plain)
        .collect()
}

fn pad_cell(content: &str, width: usize, alignment: Alignment) -> String {
    let pad = width.saturating_sub(display_width(content));
    match alignment {
        Alignment::Right => format!("{}{content}", " ".repeat(pad)),
        Alignment::Center => {
            let left = pad / 2;
            format!("{}{content}{}", " ".repeat(left), " ".repeat(pad - left))
        }
        Alignment::Left | Alignment::None => format!("{content}{}", " ".repeat(pad)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table {
            headers: vec!["Name".into(), "Value".into()],
            alignments: vec![Alignment::Left, Alignment::Right],
            rows: vec![
                vec!["foo".into(), "123".into()],
                vec!["bar".into(), "456".into()],
            ],
        }
    }

    #[test]
    fn test_pad_cell() {
        assert_eq!(pad_cell("hi", 5, Alignment::Left), "hi   ");
        assert_eq!(pad_cell("hi", 5, Alignment::Right), "   hi");
        assert_eq!(pad_cell("hi", 5, Alignment::Center), " hi  ");
    }

    #[test]
    fn test_grid_when_wide() {
        let lines = table().render(60);
        assert!(lines[0].plain().starts_with('┌'));
        assert!(lines.iter().all(|l| l.width() <= 60));
        assert!(lines.iter().any(|l| l.plain().contains("   123")));
    }

    #[test]
    fn test_records_when_narrow() {
        let lines = table().render(15);
        assert_eq!(lines[0].plain(), "Name: foo");
        assert!(lines.iter().all(|l| l.width() <= 15));
    }
}
