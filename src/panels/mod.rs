//! Window contents. Each window identifier has exactly one panel.

pub mod about;
pub mod contact;
pub mod projects;

pub use about::AboutPanel;
pub use contact::ContactPanel;
pub use projects::ProjectsPanel;

use crate::components::Component;

/// Side effects a panel asks the desktop to perform on its behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelRequest {
    OpenUrl(String),
    CopyText(String),
}

pub trait Panel: Component {
    /// Called once per frame tick. Returns true when the panel changed.
    fn tick(&mut self) -> bool {
        false
    }

    fn take_requests(&mut self) -> Vec<PanelRequest> {
        Vec::new()
    }
}
