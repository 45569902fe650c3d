use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of AVAILABLE_TRANSFORMS in src/transforms.rs
// Build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] = &["shorten", "preview", "reply", "forward"];

const FORMATS: &[&str] = &["json", "markdown", "markup", "plain"];

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path, or - for stdin")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn format_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS))
        .value_hint(ValueHint::Other)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("drafty")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and previewing drafty rich-text messages")
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and transforms")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("convert")
                .arg(input_arg())
                .arg(format_arg("from"))
                .arg(format_arg("to"))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        );

    for name in AVAILABLE_TRANSFORMS {
        cmd = cmd.subcommand(
            Command::new(*name)
                .arg(input_arg())
                .arg(format_arg("from"))
                .arg(Arg::new("length").long("length").short('n'))
                .arg(Arg::new("max-attachments").long("max-attachments"))
                .arg(Arg::new("strip-heavy").long("strip-heavy")),
        );
    }

    generate_to(Bash, &mut cmd, "drafty", &outdir)?;
    generate_to(Zsh, &mut cmd, "drafty", &outdir)?;
    generate_to(Fish, &mut cmd, "drafty", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
