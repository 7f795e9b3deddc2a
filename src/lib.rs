pub mod capture;
pub mod gui;
pub mod logging;
pub mod settings;
