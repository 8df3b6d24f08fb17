//! Headless host surfaces: a simulated media surface and a log-backed view

pub mod console;
pub mod simulated;

pub use console::ConsoleView;
pub use simulated::{Catalog, SimulatedMedia};
