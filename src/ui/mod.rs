//! UI module for the egui-based interface.

pub mod map_view;
pub mod sidebar;
pub mod theme;
pub mod widgets;

pub use map_view::MapView;
pub use theme::Theme;
