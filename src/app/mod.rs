mod logging;
mod state;

pub use logging::{init_logging, init_tracing, log_debug, log_file_path, trace_log_path};
pub use state::App;
