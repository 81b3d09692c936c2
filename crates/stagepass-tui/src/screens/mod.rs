//! Screen components.

pub mod all;
pub mod login;
pub mod pending;

use crate::component::Component;
use crate::screen::ScreenId;

/// Per-list load state.
///
/// Replaces a shared boolean loading flag: a list is exactly one of
/// these, and mutating actions are offered only from `Loaded`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

/// Create all screens, keyed for the app's screen map.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Pending,
            Box::new(pending::PendingScreen::new()) as Box<dyn Component>,
        ),
        (ScreenId::All, Box::new(all::AllScreen::new())),
        (ScreenId::Login, Box::new(login::LoginScreen::new())),
    ]
}
