//! Terminal tree rendering of grouped migrations
//!
//! Output shape, one header per batch and one dash item per migration:
//!
//! ```text
//!  ✓ Batch 2
//!      - 20200101120000_migration_3 (2020-01-02T13:00:00Z)
//!  No group
//!      - 20200101120000_migration_2
//! ```

use crate::migration::style::{Line, Span, Style, Styling, Tone};
use crate::migration::MigrationGroup;
use crate::migration::MigrationRecord;

const HEADER_PREFIX: &str = " ";
const ITEM_INDENT: &str = "     ";
const ITEM_BULLET: &str = "-";

/// Build the styled rows for `groups`
///
/// Every group other than `highlight_batch_id` is rendered faint. Pending
/// batches and the "No group" bucket are faint in any case.
pub fn terminal_lines(groups: &[MigrationGroup<'_>], highlight_batch_id: i64) -> Vec<Line> {
    let mut lines = Vec::new();

    for group in groups {
        let highlighted = group.batch_id == highlight_batch_id;

        lines.push(
            Line::new()
                .push(Span::plain(HEADER_PREFIX))
                .push(group_title(group, highlighted)),
        );

        for record in &group.records {
            lines.push(record_line(record, highlighted));
        }
    }

    lines
}

/// Render `groups` as a text tree
///
/// Returns an empty string when there are no groups; otherwise the output ends
/// with a newline.
pub fn render_terminal(
    groups: &[MigrationGroup<'_>],
    highlight_batch_id: i64,
    styling: Styling,
) -> String {
    let lines = terminal_lines(groups, highlight_batch_id);
    if lines.is_empty() {
        return String::new();
    }

    let mut output = String::new();
    for line in &lines {
        output.push_str(&line.render(styling));
        output.push('\n');
    }
    output
}

fn group_title(group: &MigrationGroup<'_>, highlighted: bool) -> Span {
    if group.is_unbatched() {
        return Span::new("No group", Style::plain().faint(true));
    }

    if !group.is_applied() {
        return Span::new(
            format!("✗ Batch {}", group.batch_id),
            Style::plain().bold().faint(true),
        );
    }

    Span::new(
        format!("✓ Batch {}", group.batch_id),
        Style::plain().bold().tone(Tone::Success).faint(!highlighted),
    )
}

fn record_line(record: &MigrationRecord, highlighted: bool) -> Line {
    let line = Line::new()
        .push(Span::plain(ITEM_INDENT))
        .push(Span::new(ITEM_BULLET, Style::plain().faint(!highlighted)))
        .push(Span::plain(" "));

    match record.applied_at_rfc3339() {
        Some(applied_at) => {
            let style = Style::plain().tone(Tone::Accent).faint(!highlighted);
            line.push(Span::new(record.display_name(), style))
                .push(Span::plain(" "))
                .push(Span::new(format!("({applied_at})"), style))
        }
        None => line.push(Span::new(record.display_name(), Style::plain().faint(true))),
    }
}
