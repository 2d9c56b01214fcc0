use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use std::env;
use std::io::Write;
use std::str::FromStr;

/// Parse a configured level name, falling back to `info`.
pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::Info)
}

/// Logs go to stderr so stdout only carries command output.
pub fn setup_logger(level: LevelFilter) {
    let mut builder = Builder::new();
    builder.filter(None, level);
    builder.target(Target::Stderr);

    builder.format(|buf, record| {
        let prefix = match record.level() {
            Level::Error => "❌ ",
            Level::Warn => "⚠️  ",
            Level::Info => "",
            Level::Debug => "",
            Level::Trace => "",
        };
        writeln!(buf, "{}{}", prefix, record.args())
    });

    if env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    }

    // A logger may already be installed (tests, embedding hosts)
    let _ = builder.try_init();
}
