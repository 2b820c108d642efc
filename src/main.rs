//! Hueflow launcher.
//!
//! ```text
//! hueflow [PRESET NAME] [#RRGGBB x5]
//! hueflow --list
//! ```
//!
//! Arguments starting with `#` are colors; everything else is joined into the
//! preset name, so `hueflow Energy Burst` and `hueflow "Energy Burst"` agree.

use hueflow::{Playground, PresetId};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--list") {
        for preset in PresetId::CATALOG {
            println!("{}", preset);
        }
        return;
    }

    let (colors, words): (Vec<&str>, Vec<&str>) = args
        .iter()
        .map(String::as_str)
        .partition(|a| a.starts_with('#'));

    let mut playground = Playground::new();
    if !words.is_empty() {
        playground = playground.with_preset_name(&words.join(" "));
    }
    if !colors.is_empty() {
        playground = playground.with_hex_colors(&colors);
    }

    if let Err(e) = playground.run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
