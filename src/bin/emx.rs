//! Command-line interface for emx
//!
//! Expands an Emmet-style abbreviation given as the first argument and
//! prints the generated markup (or the built element tree as JSON).
//!
//! Usage:
//!   emx `<abbreviation>` [--mode `<mode>`] [--indentation `<str>`]
//!       [--depth `<n>`] [--inline] [--tab-stop `<wrapper>`]
//!       [--format `<format>`]

use clap::{Arg, ArgAction, Command};

use emx::emx::{expand, expand_to_elements, Mode};

const DEFAULT_INDENTATION: &str = "    ";

fn main() {
    let matches = Command::new("emx")
        .version(env!("CARGO_PKG_VERSION"))
        .about("An Emmet-style abbreviation expander for HTML and XML")
        .arg(
            Arg::new("abbreviation")
                .help("The abbreviation to expand")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .short('m')
                .help("Output mode (html, xml, htmx)")
                .default_value("html"),
        )
        .arg(
            Arg::new("indentation")
                .long("indentation")
                .help("Indentation to apply (no indentation if empty)")
                .default_value(DEFAULT_INDENTATION),
        )
        .arg(
            Arg::new("depth")
                .long("depth")
                .help("Initial indentation level to use")
                .value_parser(clap::value_parser!(usize))
                .default_value("0"),
        )
        .arg(
            Arg::new("inline")
                .long("inline")
                .help("Render everything on a single line")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tab-stop")
                .long("tab-stop")
                .help("Characters to wrap tab-stop names in (no tab stops if empty)")
                .default_value(""),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format ('text' or 'json')")
                .default_value("text"),
        )
        .get_matches();

    let abbreviation = matches.get_one::<String>("abbreviation").unwrap();
    let mode = matches.get_one::<String>("mode").unwrap();
    let indentation = matches.get_one::<String>("indentation").unwrap();
    let depth = *matches.get_one::<usize>("depth").unwrap();
    let multiline = !matches.get_flag("inline");
    let tab_stop = matches.get_one::<String>("tab-stop").unwrap();
    let format = matches.get_one::<String>("format").unwrap();

    let mode: Mode = mode.parse().unwrap_or_else(|e: String| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    match format.as_str() {
        "text" => handle_text(mode, abbreviation, indentation, depth, multiline, tab_stop),
        "json" => handle_json(mode, abbreviation),
        other => {
            eprintln!("Error: unknown format '{}'", other);
            std::process::exit(1);
        }
    }
}

/// Expand and print the rendered markup.
fn handle_text(
    mode: Mode,
    abbreviation: &str,
    indentation: &str,
    depth: usize,
    multiline: bool,
    tab_stop: &str,
) {
    match expand(mode, abbreviation, indentation, depth, multiline, tab_stop) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Expand and print the built element tree as JSON.
fn handle_json(mode: Mode, abbreviation: &str) {
    let elems = expand_to_elements(mode, abbreviation).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    match serde_json::to_string_pretty(&elems) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
