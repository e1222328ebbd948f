//! CLI library components: settings, logging, the dashboard session and
//! the shared pipeline stages.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod session;
