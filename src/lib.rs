pub use npscore::{confirm, layout, net, state, types};

pub mod client;
pub mod config;
pub mod confirm_modal;
pub mod confirmation;
pub mod hooks;
pub mod host;
pub mod plugin;
pub mod routing;
pub mod store;
pub mod survey_post;

pub use config::PluginConfig;
pub use plugin::{Plugin, PluginBuilder};

use chrono::Local;

/// Installs `env_logger` with the `HH:MM:SS [LEVEL] [target] - message` format.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "{} [{:<5}] [{}] - {}",
                Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();
}
