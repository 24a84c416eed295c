//! Logger setup
//!
//! `env_logger` behind the `log` facade. Defaults to `info`; `RUST_LOG`
//! overrides it as usual.

use std::io::Write;

use chrono::{DateTime, Local};
use env_logger::Env;
use log::Level;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}",
                format_line(
                    Local::now(),
                    record.level(),
                    record.target(),
                    &record.args().to_string()
                )
            )
        })
        .init();
}

/// `2024-01-31 12:00:00 - INFO - sheets_api::server - message`
fn format_line(time: DateTime<Local>, level: Level, target: &str, message: &str) -> String {
    format!(
        "{} - {} - {} - {}",
        time.format(TIMESTAMP_FORMAT),
        level,
        target,
        message
    )
}
