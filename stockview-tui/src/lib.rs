//! StockView TUI: single-screen terminal dashboard for one ticker.
//!
//! Layout:
//! - Input form: symbol, start/end dates, fetch button
//! - Key information table and recent-rows preview
//! - Candlestick price history chart
//! - CSV download line and status bar
//!
//! Fetches run on a background worker; the UI thread owns all state.

pub mod app;
pub mod input;
pub mod panels;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use theme::Theme;
