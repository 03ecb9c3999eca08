//! Terminal front-end for Nimbus.
//!
//! One screen: a search field, a theme switch, and the current conditions
//! for the last searched city. State lives in [`app::App`]; rendering is a
//! pure function of it in [`ui`].

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::Palette;
