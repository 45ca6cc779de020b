// SPDX-License-Identifier: MPL-2.0
use iced_gallery::app::{self, Flags};
use std::path::PathBuf;

fn main() -> iced::Result {
    env_logger::init();

    let mut args = pico_args::Arguments::from_env();
    let flags = Flags {
        config_path: args
            .opt_value_from_str::<_, PathBuf>("--config")
            .unwrap_or(None),
        include_gif: args.contains("--gif"),
    };

    app::run(flags)
}
