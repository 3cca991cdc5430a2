pub mod app;
pub mod control_panel;


pub use app::*;
pub use control_panel::{ControlPanel, ControlPanelBuilder, PanelEvent};
