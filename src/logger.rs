use log::LevelFilter;

/// Level used when `RUST_LOG` is not set.
fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes env_logger. `--verbose` adds the per-file debug output;
/// `RUST_LOG` still overrides the level when set.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new().filter_level(default_level(verbose)).parse_default_env().init();
}
