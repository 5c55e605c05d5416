//! A desktop-style personal portfolio for the terminal: floating windows
//! for an About page, a project list and a contact form, with a menu bar,
//! a dock and a persisted window layout.

pub mod assets;
pub mod cli;
pub mod clipboard;
pub mod component_context;
pub mod components;
pub mod constants;
pub mod desktop;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod icons;
pub mod keybindings;
pub mod layout;
pub mod panels;
pub mod remote;
pub mod runner;
pub mod state;
pub mod storage;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;
