pub mod audio;
pub mod config;
pub mod energy;
pub mod headless;
pub mod monitor;
pub mod terminal_restore;
pub mod ui;

mod app;

pub use app::{init_logging, init_tracing, log_debug, log_file_path, App};
pub use monitor::{MonitorHandle, MonitorSnapshot};
