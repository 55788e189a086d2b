//! School Management System admin client
//!
//! Screen controllers for the SMS REST API: student registration, teacher
//! roster, subject and classroom catalogs, subject and classroom allocations,
//! and the student detail report.

pub mod allocation;
pub mod api;
pub mod config;
pub mod controller;
pub mod errors;
pub mod models;
pub mod notify;
pub mod screens;
pub mod validation;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;

/// Initialize logging. `RUST_LOG` wins over the configured level.
pub fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests;
