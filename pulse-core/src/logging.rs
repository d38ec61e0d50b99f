use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::io::Write;

/// Crates that log every connection or request at `debug`/`trace`.
const CHATTY_TARGETS: &[&str] = &["hyper", "hyper_util", "h2", "tower_http", "r2d2"];

/// Level for [`CHATTY_TARGETS`]: capped at `info` unless everything is
/// being traced.
fn dependency_level(level: LevelFilter) -> LevelFilter {
    if level == LevelFilter::Trace {
        level
    } else {
        level.min(LevelFilter::Info)
    }
}

/// Installs the process-wide logger. `RUST_LOG` directives, when set, are
/// applied on top of `level`. Later calls only adjust the max level.
pub fn init_logger(level: LevelFilter) {
    let mut builder = Builder::new();
    builder.filter_level(level);
    for target in CHATTY_TARGETS {
        builder.filter_module(target, dependency_level(level));
    }
    builder
        .parse_env(Env::new().filter("RUST_LOG"))
        .target(Target::Stdout)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {}: {} - {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        });

    if builder.try_init().is_err() {
        log::set_max_level(level);
    }
}

pub fn parse_level(level: &str) -> Option<LevelFilter> {
    let lvl = match level.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => return None,
    };
    Some(lvl)
}
