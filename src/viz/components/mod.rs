pub mod help;
pub mod log;
pub mod plot;
pub mod value_grid;

use crossterm::event::Event;
use ratatui::widgets::WidgetRef;

pub use log::Logs;
pub use plot::Plots;
pub use value_grid::ValueGrid;

/// A widget that can react to terminal events
pub trait Component: WidgetRef {
    /// **Returns** whether the event was consumed
    fn handle_ui_event(&mut self, event: &Event) -> bool;
}
