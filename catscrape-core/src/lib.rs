pub mod data;
pub mod pipeline;
pub mod snapshot;

use colored::Colorize;

pub fn print_banner() {
    let banner = r#"
             _
   ___  __ _| |_ ___  ___ _ __ __ _ _ __   ___
  / __|/ _` | __/ __|/ __| '__/ _` | '_ \ / _ \
 | (__| (_| | |_\__ \ (__| | | (_| | |_) |  __/
  \___|\__,_|\__|___/\___|_|  \__,_| .__/ \___|
                                   |_|
"#;
    println!("{}", banner.cyan());
    println!(
        "  {} v{}\n",
        "product catalogue scraper".dimmed(),
        env!("CARGO_PKG_VERSION")
    );
}
