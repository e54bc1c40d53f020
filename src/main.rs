// SPDX-License-Identifier: MPL-2.0
use image_attach::app::{self, Flags};
use image_attach::config::paths;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "image_attach=info";

fn main() -> iced::Result {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = pico_args::Arguments::from_env();

    let lang: Option<String> = args.opt_value_from_str("--lang").unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring invalid --lang");
        None
    });
    let config_dir: Option<String> = args.opt_value_from_str("--config-dir").unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring invalid --config-dir");
        None
    });
    paths::init_cli_override(config_dir);
    let stdin_bridge = args.contains("--stdin-bridge");

    let flags = Flags {
        lang,
        stdin_bridge,
        file_path: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
    };

    app::run(flags)
}
