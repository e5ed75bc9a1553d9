use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the inspect views from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
const INSPECT_VIEWS: &[&str] = &["tree", "json"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("scribe")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting scribe documents")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Input file path")
                .required_unless_present("list-formats")
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .help("Target format")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("view")
                .help("Inspect view to render")
                .required(false)
                .value_parser(clap::builder::PossibleValuesParser::new(INSPECT_VIEWS))
                .index(2)
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "scribe", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "scribe", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "scribe", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
