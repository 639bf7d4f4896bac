//! Key information table: the eight labelled company metrics.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use stockview_core::MetricRow;

use crate::theme;
use crate::ui::truncate;

const LABEL_WIDTH: usize = 15;

pub fn render(f: &mut Frame, area: Rect, symbol: &str, rows: &[MetricRow]) {
    let value_width = (area.width as usize).saturating_sub(LABEL_WIDTH + 4);

    let lines: Vec<Line> = rows
        .iter()
        .map(|row| {
            Line::from(vec![
                Span::styled(format!(" {:<LABEL_WIDTH$}", row.label), theme::neutral()),
                Span::styled(truncate(&row.value, value_width), theme::text()),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(format!(" Key Information for {symbol} "))
        .title_style(theme::panel_title(false));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
