//! Candle chart panel - OHLC candle rendering for a [`ChartSpec`]
//!
//! Renders the candlestick chart using direct buffer writes:
//! - Each candle = 1 terminal column (most recent candles win when narrow)
//! - Body: block char, positive color if close >= open, negative otherwise
//! - Wicks: vertical line chars to high/low
//! - Y axis: price labels on the left, X axis: first/last visible date

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Widget},
};
use stockview_core::{Candle, ChartSpec};

use crate::theme::Theme;

/// Candle chart panel widget
pub struct CandleChartPanel<'a> {
    chart: &'a ChartSpec,
    symbol: &'a str,
    theme: &'a Theme,
}

impl<'a> CandleChartPanel<'a> {
    pub fn new(chart: &'a ChartSpec, symbol: &'a str, theme: &'a Theme) -> Self {
        Self {
            chart,
            symbol,
            theme,
        }
    }

    fn title(&self) -> String {
        format!("{} for {}", self.chart.title, self.symbol)
    }

    /// Map a price to a Y position in the plot area (0 = top)
    fn price_to_y(&self, price: f64, y_min: f64, y_max: f64, plot_height: u16) -> u16 {
        if (y_max - y_min).abs() < 1e-9 || plot_height == 0 || price.is_nan() {
            return 0;
        }
        let frac = (price - y_min) / (y_max - y_min);
        let y = plot_height.saturating_sub(1) as f64 * (1.0 - frac);
        y.round().max(0.0).min(plot_height.saturating_sub(1) as f64) as u16
    }

    fn draw_candle(
        &self,
        buf: &mut Buffer,
        x: u16,
        plot_top: u16,
        bottom: u16,
        candle: &Candle,
        bounds: (f64, f64, u16),
    ) {
        let (y_lower, y_upper, plot_height) = bounds;
        let is_up = candle.is_up();
        let style = Style::default().fg(self.theme.candle_color(is_up));

        // Missing prices collapse onto whatever is present.
        let open = if candle.open.is_nan() { candle.close } else { candle.open };
        let close = if candle.close.is_nan() { open } else { candle.close };
        if open.is_nan() {
            return;
        }
        let high = if candle.high.is_nan() { open.max(close) } else { candle.high };
        let low = if candle.low.is_nan() { open.min(close) } else { candle.low };

        let high_y = self.price_to_y(high, y_lower, y_upper, plot_height);
        let low_y = self.price_to_y(low, y_lower, y_upper, plot_height);
        let body_top_y = self.price_to_y(open.max(close), y_lower, y_upper, plot_height);
        let body_bot_y = self.price_to_y(open.min(close), y_lower, y_upper, plot_height);

        for y in high_y..body_top_y {
            let py = plot_top + y;
            if py < bottom {
                buf.set_string(x, py, "|", style);
            }
        }

        let body_char = if is_up { "\u{2588}" } else { "\u{2593}" };
        for y in body_top_y..=body_bot_y {
            let py = plot_top + y;
            if py < bottom {
                buf.set_string(x, py, body_char, style);
            }
        }

        for y in (body_bot_y + 1)..=low_y {
            let py = plot_top + y;
            if py < bottom {
                buf.set_string(x, py, "|", style);
            }
        }
    }
}

impl<'a> Widget for CandleChartPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some((y_min, y_max)) = self.chart.price_bounds() else {
            let block = Block::default()
                .title(format!(" {} [No Data] ", self.title()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.muted))
                .style(Style::default().bg(self.theme.background));
            block.render(area, buf);
            return;
        };

        let range = y_max - y_min;
        let pad = if range > 0.0 { range * 0.05 } else { 1.0 };
        let y_lower = y_min - pad;
        let y_upper = y_max + pad;

        let candles = &self.chart.candles;
        let up_count = candles.iter().filter(|c| c.is_up()).count();
        let down_count = candles.len() - up_count;

        let title = format!(
            " {} | {} bars | {} up {} down ",
            self.title(),
            candles.len(),
            up_count,
            down_count,
        );

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));

        let inner = block.inner(area);
        block.render(area, buf);

        // Left margin for Y labels, bottom row for the date axis.
        let label_width: u16 = 10;
        let plot_left = inner.x + label_width;
        let plot_top = inner.y;
        let plot_width = inner.width.saturating_sub(label_width);
        let plot_height = inner.height.saturating_sub(1);

        if plot_width == 0 || plot_height == 0 {
            return;
        }

        let muted = Style::default().fg(self.theme.muted);

        let y_labels = [y_upper, (y_upper + y_lower) / 2.0, y_lower];
        let y_positions = [0u16, plot_height / 2, plot_height.saturating_sub(1)];
        for (label_val, y_pos) in y_labels.iter().zip(y_positions.iter()) {
            let label = format!("{:>9.2}", label_val);
            buf.set_string(inner.x, plot_top + y_pos, &label, muted);
        }

        let visible = candles.len().min(plot_width as usize);
        let start = candles.len() - visible;
        let shown = &candles[start..];

        for (i, candle) in shown.iter().enumerate() {
            let x = plot_left + i as u16;
            if x >= inner.right() {
                break;
            }
            self.draw_candle(
                buf,
                x,
                plot_top,
                plot_top + plot_height,
                candle,
                (y_lower, y_upper, plot_height),
            );
        }

        // Date axis: axis title, then first and last visible dates.
        let axis_y = plot_top + plot_height;
        if axis_y < inner.bottom() {
            buf.set_string(inner.x, axis_y, &self.chart.x_axis_title, muted);
            if let (Some(first), Some(last)) = (shown.first(), shown.last()) {
                let first_label = first.date.format("%Y-%m-%d").to_string();
                buf.set_string(plot_left, axis_y, &first_label, muted);

                let last_label = last.date.format("%Y-%m-%d").to_string();
                let last_x = plot_left + (shown.len() as u16).saturating_sub(1);
                let last_x = last_x
                    .saturating_sub(last_label.len() as u16 - 1)
                    .max(plot_left + first_label.len() as u16 + 1);
                if shown.len() > 1 && last_x + last_label.len() as u16 <= inner.right() {
                    buf.set_string(last_x, axis_y, &last_label, muted);
                }
            }
        }
    }
}
