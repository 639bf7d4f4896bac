//! Recent rows: the formatted tail of the series.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use stockview_core::PreviewTable;

use crate::theme;
use crate::ui::truncate;

const DATE_WIDTH: usize = 10;
const CELL_WIDTH: usize = 11;

pub fn render(f: &mut Frame, area: Rect, symbol: &str, table: &PreviewTable) {
    let mut lines: Vec<Line> = Vec::new();

    if table.is_empty() {
        lines.push(Line::from(Span::styled(
            "No trading days in the selected range.",
            theme::muted(),
        )));
    } else {
        lines.push(row_line(&table.headers, theme::accent_bold()));
        for row in &table.rows {
            lines.push(row_line(row, theme::text()));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(format!(" Recent Stock Data for {symbol} "))
        .title_style(theme::panel_title(false));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Date column left-aligned, every other column right-aligned.
fn row_line(cells: &[String], style: ratatui::style::Style) -> Line<'static> {
    let spans = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let text = if i == 0 {
                format!("{:<DATE_WIDTH$}", truncate(cell, DATE_WIDTH))
            } else {
                format!(" {:>CELL_WIDTH$}", truncate(cell, CELL_WIDTH))
            };
            Span::styled(text, style)
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}
