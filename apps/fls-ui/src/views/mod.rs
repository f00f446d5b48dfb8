pub mod config_view;
pub mod control_view;
pub mod results_view;

pub use config_view::ConfigView;
pub use control_view::{ControlAction, ControlView};
pub use results_view::ResultsView;
