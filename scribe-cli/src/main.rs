// Command-line interface for scribe
//
// This binary fronts the scribe-convert library for batch work outside the
// editor: converting stored markdown, importing HTML captures, and
// inspecting how a document parses into the tree.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected
// from the file extension, while being overwrittable by an explicit --from
// flag.
// Usage:
//  scribe <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  scribe convert <input> --to <format> [...]                        - Same as above (explicit)
//  scribe inspect <path> [<view>]                                    - Show the parsed tree (defaults to "tree")
//  scribe --list-formats                                             - List available formats

use clap::{Arg, ArgAction, Command, ValueHint};
use scribe_convert::{dom, Context, Format, FormatRegistry, MarkdownRules};
use scribe_config::{Loader, ScribeConfig};
use std::fs;
use std::sync::Arc;

const INSPECT_VIEWS: [&str; 2] = ["tree", "json"];

fn build_cli() -> Command {
    Command::new("scribe")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting scribe documents")
        .long_about(
            "scribe is a command-line tool for working with markdown-backed documents.\n\n\
            Commands:\n  \
            - convert: Transform between formats (markdown, HTML import)\n  \
            - inspect: View the parsed Document Tree\n\n\
            Examples:\n  \
            scribe notes.md --to markdown           # Normalize markdown (outputs to stdout)\n  \
            scribe page.html --to markdown          # Import pasted HTML as markdown\n  \
            scribe inspect notes.md                 # Show the tree outline\n  \
            scribe inspect notes.md json            # Show the tree as JSON",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a scribe.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - markdown: CommonMark markdown (.md), parse and serialize\n  \
                    - html:     HTML fragments (.html), import only\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    scribe convert notes.md --to markdown        # Normalize (stdout)\n  \
                    scribe convert page.html --to markdown -o notes.md\n  \
                    scribe page.html --to markdown               # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (defaults to the configured default)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the parsed Document Tree")
                .long_about(
                    "Parse a file and show the resulting Document Tree.\n\n\
                    Views:\n  \
                    - tree:  Indented outline (default)\n  \
                    - json:  The tree as JSON\n\n\
                    Examples:\n  \
                    scribe inspect notes.md           # Tree outline\n  \
                    scribe inspect page.html json     # Imported tree as JSON",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the input file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("view")
                        .help("View to render (defaults to 'tree')")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(INSPECT_VIEWS))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if args.len() > 1
                && !args[1].starts_with('-')
                && args[1] != "convert"
                && args[1] != "inspect"
                && args[1] != "help"
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let from_arg = sub_matches.get_one::<String>("from");
            let to = sub_matches
                .get_one::<String>("to")
                .cloned()
                .unwrap_or_else(|| config.convert.default_format.clone());

            let from = if let Some(f) = from_arg {
                f.to_string()
            } else {
                let registry = FormatRegistry::default();
                match registry.detect_format_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        eprintln!("Please specify --from explicitly");
                        std::process::exit(1);
                    }
                }
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, &to, output, &config);
        }
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let view = sub_matches
                .get_one::<String>("view")
                .map(|s| s.as_str())
                .unwrap_or("tree");
            handle_inspect_command(path, view);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    config: &ScribeConfig,
) {
    let registry = FormatRegistry::default();

    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    // Surface schema problems without blocking the conversion.
    if let Err(e) = scribe_convert::validate(&Context::new(), &doc) {
        eprintln!("Warning: {e}");
    }

    // Markdown output honors the configured rules.
    let result = if to == "markdown" {
        let rules: MarkdownRules = (&config.markdown.rules).into();
        let format = scribe_convert::formats::markdown::MarkdownFormat::with_rules(
            Arc::new(Context::new()),
            rules,
        );
        format.serialize(&doc).unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        })
    } else {
        registry.serialize(&doc, to).unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        })
    };

    match output {
        Some(path) => {
            fs::write(path, format!("{result}\n")).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => {
            println!("{result}");
        }
    }
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, view: &str) {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let registry = FormatRegistry::default();
    let from = registry
        .detect_format_from_filename(path)
        .unwrap_or_else(|| "markdown".to_string());

    let doc = registry.parse(&source, &from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    match view {
        "json" => {
            let json = serde_json::to_string_pretty(&doc).unwrap_or_else(|e| {
                eprintln!("Error rendering JSON: {e}");
                std::process::exit(1);
            });
            println!("{json}");
        }
        _ => {
            print!("{}", dom::outline::outline(&doc));
        }
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        let format = match registry.get(&format_name) {
            Ok(f) => f,
            Err(_) => continue,
        };
        let mut capabilities = Vec::new();
        if format.supports_parsing() {
            capabilities.push("parse");
        }
        if format.supports_serialization() {
            capabilities.push("serialize");
        }
        println!(
            "  {format_name:<10} {} ({})",
            format.description(),
            capabilities.join(", ")
        );
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> ScribeConfig {
    let loader = Loader::new().with_optional_file("scribe.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
