//! Input form: Symbol, Start Date, End Date and the Fetch Data button.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Field};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let form = &app.form;
    let mut spans: Vec<Span> = Vec::new();

    for (field, text) in [
        (Field::Symbol, form.symbol.as_str()),
        (Field::Start, form.start.as_str()),
        (Field::End, form.end.as_str()),
    ] {
        let focused = form.focus == field;
        spans.push(Span::styled(format!(" {}: ", field.label()), theme::neutral()));
        let value_style = if focused {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else {
            theme::text()
        };
        let cursor = if focused { "_" } else { "" };
        spans.push(Span::styled(format!("{text}{cursor}"), value_style));
        spans.push(Span::raw("  "));
    }

    let button_style = if form.focus == Field::Fetch {
        theme::accent_bold().add_modifier(Modifier::REVERSED)
    } else if app.fetch_in_progress {
        theme::muted()
    } else {
        theme::accent_bold()
    };
    let button = if app.fetch_in_progress {
        "[ Fetching... ]"
    } else {
        "[ Fetch Data ]"
    };
    spans.push(Span::styled(button, button_style));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" Stock Symbol and Date Range ")
        .title_style(theme::panel_title(true));

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
