//! Top-level UI layout: title, input form, dashboard body, download line, status bar.

pub mod form;
pub mod metrics_panel;
pub mod preview_panel;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::panels::CandleChartPanel;
use crate::theme::{self, Theme};

pub const APP_TITLE: &str = "Stock Data Visualization App";

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    f.render_widget(Block::default().style(theme::background()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_title(f, chunks[0]);
    form::render(f, chunks[1], app);
    draw_body(f, chunks[2], app);
    draw_download_line(f, chunks[3], app);
    status_bar::render(f, chunks[4], app);
}

fn draw_title(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(format!(" {APP_TITLE} "), theme::accent_bold()),
        Span::styled(
            " Tab:focus  Up/Down PgUp/PgDn:dates  Enter/F5:fetch  Ctrl-S:save CSV  Esc:quit",
            theme::muted(),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_body(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(view) = &app.view else {
        let msg = if app.fetch_in_progress {
            "Fetching data..."
        } else {
            "No data loaded. Enter a stock symbol and date range, then press Enter."
        };
        let para = Paragraph::new(Line::from(Span::styled(msg, theme::muted())))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::panel_border(false)),
            );
        f.render_widget(para, area);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(4)])
        .split(columns[0]);

    let symbol = view.request.symbol.as_str();
    metrics_panel::render(f, left[0], symbol, &view.metrics);
    preview_panel::render(f, left[1], symbol, &view.preview);

    let theme = Theme::default();
    f.render_widget(
        CandleChartPanel::new(&view.chart, symbol, &theme),
        columns[1],
    );
}

fn draw_download_line(f: &mut Frame, area: Rect, app: &AppState) {
    let line = match &app.view {
        Some(view) => Line::from(vec![
            Span::styled(" Download CSV File: ", theme::neutral()),
            Span::styled(view.csv.filename.as_str(), theme::accent()),
            Span::styled(
                format!(" ({} rows)  Ctrl-S saves to {}", view.row_count, app.export_dir.display()),
                theme::muted(),
            ),
        ]),
        None => Line::from(Span::styled(" Download CSV File: -", theme::muted())),
    };
    f.render_widget(Paragraph::new(line), area);
}

/// Cut `s` to at most `max` characters, marking the cut with a trailing '.'.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max == 0 {
        String::new()
    } else {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('.');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Apple Inc.", 20), "Apple Inc.");
        assert_eq!(truncate("Consumer Electronics", 10), "Consumer .");
        assert_eq!(truncate("Société", 4), "Soc.");
        assert_eq!(truncate("abc", 0), "");
    }
}
