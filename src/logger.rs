use std::io::Write;

use chrono::Local;
use colored::*;
use env_logger::{Builder, Env};
use log::info;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

pub fn setup_logger() {
    let tag = format!("{}_{}", NAME, VERSION).dimmed();
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(move |buf, record| {
            let level = match record.level() {
                log::Level::Error => format!("{}", record.level()).red(),
                log::Level::Warn => format!(" {}", record.level()).yellow(),
                log::Level::Info => format!(" {}", record.level()).green(),
                log::Level::Debug => format!("{}", record.level()).blue(),
                log::Level::Trace => format!("{}", record.level()).purple(),
            };
            writeln!(
                buf,
                "[{} {}]{}: {}",
                format!("{}", tag).purple(),
                format!("{}", Local::now().format("%Y%m%d %H:%M:%S")).purple(),
                level,
                record.args()
            )
        })
        .init();
    info!("Logger initialized");
}
