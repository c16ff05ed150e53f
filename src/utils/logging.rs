//! Logger setup.
//!
//! Lines look like `2024-01-02T03:04:05Z INFO: Screenshot saved: ...`.
//! The level defaults to `info`; `RUST_LOG` overrides it, e.g.
//! `RUST_LOG=contextshot_lib=debug` to see context resolution.

use std::io::Write;

pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {}: {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        })
        .init();
}
