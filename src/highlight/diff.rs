//! Line diffs using `similar`, in unified or side-by-side layout.

use super::{DiffFormatter, DiffLayout, DiffRequest};
use crate::style::Styles;
use crate::terminal::{StyledLine, StyledSpan};
use crate::text::{ELLIPSIS, digits};
use crossterm::style::ContentStyle;
use similar::{ChangeTag, TextDiff};

/// Context lines kept around each hunk.
const CONTEXT: usize = 3;

/// One side of a diff row.
#[derive(Debug, Clone)]
struct Cell {
    line_no: usize,
    text: String,
    tag: ChangeTag,
}

#[derive(Debug, Clone, Default)]
struct Row {
    old: Option<Cell>,
    new: Option<Cell>,
}

enum Item {
    Hunk(String),
    Row(Row),
}

/// Walk the diff hunk by hunk. Deletions and insertions in a run are paired
/// so the split layout can show them side by side.
fn collect(before: &str, after: &str) -> Vec<Item> {
    let diff = TextDiff::from_lines(before, after);
    let mut items = Vec::new();
    for group in diff.grouped_ops(CONTEXT) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old = first.old_range().start..last.old_range().end;
        let new = first.new_range().start..last.new_range().end;
        items.push(Item::Hunk(format!(
            "@@ -{},{} +{},{} @@",
            old.start + 1,
            old.len(),
            new.start + 1,
            new.len()
        )));

        let mut dels: Vec<Cell> = Vec::new();
        let mut ins: Vec<Cell> = Vec::new();
        for op in &group {
            for change in diff.iter_changes(op) {
                let text = change.value().trim_end_matches(['\n', '\r']).to_string();
                match change.tag() {
                    ChangeTag::Equal => {
                        flush(&mut items, &mut dels, &mut ins);
                        let old_no = change.old_index().map_or(0, |i| i + 1);
                        let new_no = change.new_index().map_or(0, |i| i + 1);
                        items.push(Item::Row(Row {
                            old: Some(Cell {
                                line_no: old_no,
                                text: text.clone(),
                                tag: ChangeTag::Equal,
                            }),
                            new: Some(Cell {
                                line_no: new_no,
                                text,
                                tag: ChangeTag::Equal,
                            }),
                        }));
                    }
                    ChangeTag::Delete => dels.push(Cell {
                        line_no: change.old_index().map_or(0, |i| i + 1),
                        text,
                        tag: ChangeTag::Delete,
                    }),
                    ChangeTag::Insert => ins.push(Cell {
                        line_no: change.new_index().map_or(0, |i| i + 1),
                        text,
                        tag: ChangeTag::Insert,
                    }),
                }
            }
        }
        flush(&mut items, &mut dels, &mut ins);
    }
    items
}

fn flush(items: &mut Vec<Item>, dels: &mut Vec<Cell>, ins: &mut Vec<Cell>) {
    let n = dels.len().max(ins.len());
    let mut dels = dels.drain(..);
    let mut ins = ins.drain(..);
    for _ in 0..n {
        items.push(Item::Row(Row {
            old: dels.next(),
            new: ins.next(),
        }));
    }
}

fn tag_style(styles: &Styles, tag: ChangeTag) -> (ContentStyle, &'static str) {
    match tag {
        ChangeTag::Insert => (styles.diff_added, "+"),
        ChangeTag::Delete => (styles.diff_removed, "-"),
        ChangeTag::Equal => (styles.diff_context, " "),
    }
}

/// `NNN s text` cut to `width`.
fn cell_line(styles: &Styles, cell: Option<&Cell>, gutter: usize, width: usize) -> StyledLine {
    let mut line = StyledLine::empty();
    match cell {
        Some(cell) => {
            let (style, sign) = tag_style(styles, cell.tag);
            line.push(StyledSpan::new(
                format!("{:>gutter$} ", cell.line_no),
                styles.diff_line_number,
            ));
            line.push(StyledSpan::new(format!("{sign} {}", cell.text), style));
        }
        None => line.push(StyledSpan::new(" ".repeat(gutter + 1), styles.diff_line_number)),
    }
    line.truncate(width, ELLIPSIS)
        .pad_to(width, ContentStyle::new())
}

/// Default diff engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimilarDiff;

impl DiffFormatter for SimilarDiff {
    fn format(&self, req: DiffRequest<'_>) -> Vec<StyledLine> {
        let styles = req.styles;
        let items = collect(req.before, req.after);
        let max_line = req.before.lines().count().max(req.after.lines().count());
        let gutter = digits(max_line);

        let mut out = Vec::with_capacity(items.len());
        // Insertions wait until the run of changes ends so removals come first.
        let mut pending: Vec<StyledLine> = Vec::new();
        for item in &items {
            match item {
                Item::Hunk(header) => {
                    out.append(&mut pending);
                    out.push(
                        StyledLine::styled(header.clone(), styles.diff_hunk)
                            .truncate(req.width, ELLIPSIS),
                    );
                }
                Item::Row(row) if req.layout == DiffLayout::Split => {
                    let half = req.width.saturating_sub(1) / 2;
                    let mut line = cell_line(styles, row.old.as_ref(), gutter, half);
                    line.push(StyledSpan::new(styles.glyphs.tree_pipe, styles.diff_divider));
                    line.extend(cell_line(styles, row.new.as_ref(), gutter, half));
                    out.push(line);
                }
                Item::Row(row) => {
                    if matches!(&row.old, Some(c) if c.tag == ChangeTag::Equal) {
                        out.append(&mut pending);
                        out.push(cell_line(styles, row.new.as_ref(), gutter, req.width));
                        continue;
                    }
                    if row.old.is_some() {
                        out.push(cell_line(styles, row.old.as_ref(), gutter, req.width));
                    }
                    if row.new.is_some() {
                        pending.push(cell_line(styles, row.new.as_ref(), gutter, req.width));
                    }
                }
            }
        }
        out.append(&mut pending);
        out
    }
}

/// Plain unified diff text plus addition and removal counts.
pub fn unified_text(file: &str, before: &str, after: &str) -> (String, usize, usize) {
    let diff = TextDiff::from_lines(before, after);
    let (mut additions, mut removals) = (0, 0);
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => additions += 1,
            ChangeTag::Delete => removals += 1,
            ChangeTag::Equal => {}
        }
    }
    let text = diff
        .unified_diff()
        .context_radius(CONTEXT)
        .header(&format!("a/{file}"), &format!("b/{file}"))
        .to_string();
    (text.trim_end().to_string(), additions, removals)
}
