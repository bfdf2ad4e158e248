use env_logger::{Builder, Env};

/// Filter used when `RUST_LOG` is unset: `level` for this crate, with the
/// HTTP stack held at warnings.
fn default_filter(level: &str) -> String {
    format!("{},hyper=warn,reqwest=warn", level)
}

/// `RUST_LOG` wins over `default_level` when set.
pub fn init_logging(default_level: &str) {
    Builder::from_env(Env::default().default_filter_or(default_filter(default_level)))
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_quiets_the_http_stack() {
        assert_eq!(default_filter("debug"), "debug,hyper=warn,reqwest=warn");
        assert!(default_filter("info").starts_with("info,"));
    }
}
