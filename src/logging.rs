use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// 根据 `-v` 的次数选择日志级别。
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// 初始化日志输出 (stderr)。设置了 `RUST_LOG` 时以其为准。
pub fn init_logger(verbosity: u8) {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] [{}] {}",
                buf.timestamp_seconds(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .filter_level(level_for(verbosity))
        .parse_default_env()
        .init();
}
