use crate::CLAP_STYLING;
use clap::{arg, command};
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("catscrape")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("catscrape")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and progress output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("init")
                .about("Initializes the catscrape database on your filesystem")
                .arg(
                    arg!([PATH])
                        .required(false)
                        .help("Location to store the catscrape database")
                        .default_value("~/.config/catscrape/"),
                )
                .arg(
                    arg!(-f - -"force")
                        .help(
                            "Forces the overwriting of any existing database at the specified \
                        location.",
                        )
                        .required(false),
                ),
        )
        .subcommand(
            command!("scrape")
                .about(
                    "Walk the paginated product catalogue, scrape every product page and \
                persist the records.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(false)
                        .help("Base origin of the catalogue site")
                        .value_parser(clap::value_parser!(Url))
                        .default_value("https://penetron.gr"),
                )
                .arg(
                    arg!(--"page-size" <STEP>)
                        .required(false)
                        .help("Offset increment between catalogue pages")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("10"),
                )
                .arg(
                    arg!(-d --"database" <PATH>)
                        .required(false)
                        .help("Path of the SQLite database to write")
                        .default_value("~/.config/catscrape/catscrape.db"),
                )
                .arg(
                    arg!(-o --"output-dir" <PATH>)
                        .required(false)
                        .help(
                            "Directory for the product_links.json / products.json snapshots \
                        (default: current directory)",
                        )
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(--"no-snapshots")
                        .required(false)
                        .help("Skip writing the JSON snapshot files")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}
