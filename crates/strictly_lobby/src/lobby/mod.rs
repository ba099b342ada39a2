//! Lobby system - polling controller, navigation, and the calls it makes.

mod controller;
mod navigation;

pub use controller::{CallPolicy, LobbyController, LobbyEvent, LobbyTask};
pub use navigation::Navigation;
