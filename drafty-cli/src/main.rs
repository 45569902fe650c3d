// Command-line interface for drafty
//
// This binary converts rich-text message documents between formats and applies the
// derived content transforms (shorten, preview, reply, forward) to them.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension
// (.txt markup, .json wire JSON), while being overwrittable by an explicit --from flag.
// An input of "-" reads stdin and defaults to markup.
// Usage:
//  drafty <input> --to <format> [--from <format>] [--output <file>]          - Convert between formats (default)
//  drafty convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  drafty shorten <input> [--length N] [--strip-heavy <bool>]                - Truncate, write wire JSON
//  drafty preview|reply <input> [--length N] [--max-attachments N]           - Preview or reply snippet
//  drafty forward <input>                                                    - Drop the forward header
//  drafty --list-formats                                                     - List formats and transforms
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  drafty note.txt --to markdown --extra-plain-links

mod transforms;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use drafty::{Document, FormatRegistry};
use drafty_config::{DraftyConfig, Loader};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use transforms::TransformParams;

const SUBCOMMANDS: &[&str] = &["convert", "shorten", "preview", "reply", "forward", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            // A following argument that is not a flag is the value
            let has_value = i + 1 < args.len() && !args[i + 1].starts_with('-');

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path, or - for stdin")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn from_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .help("Source format (auto-detected from file extension if not specified)")
        .value_hint(ValueHint::Other)
}

fn transform_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(input_arg())
        .arg(from_arg())
        .arg(
            Arg::new("length")
                .long("length")
                .short('n')
                .help("Maximum length in graphemes, ellipsis included")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("max-attachments")
                .long("max-attachments")
                .help("Media and file entities to keep (preview and reply)")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("strip-heavy")
                .long("strip-heavy")
                .help("Reduce entity data to small metadata fields (shorten)")
                .value_parser(clap::value_parser!(bool)),
        )
}

fn build_cli() -> Command {
    Command::new("drafty")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and previewing drafty rich-text messages")
        .long_about(
            "drafty is a command-line tool for working with rich-text message documents.\n\n\
            Commands:\n  \
            - convert: Transform between document formats (markup, json, markdown, plain)\n  \
            - shorten, preview, reply, forward: Derive content, written as wire JSON\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Logging:\n  \
            Set DRAFTY_LOG (e.g. DRAFTY_LOG=debug) to see diagnostics on stderr.\n\n\
            Examples:\n  \
            drafty note.txt --to markdown                  # Markup to markdown (stdout)\n  \
            drafty note.txt --to json -o note.json         # Markup to wire JSON file\n  \
            drafty preview note.json --length 20           # One-line preview\n  \
            echo '*hi*' | drafty - --to json               # Read stdin",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a drafty.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - markup:   Typed markup such as *bold* and @mentions (.txt, parse only)\n  \
                    - json:     Wire JSON (.json)\n  \
                    - markdown: Markdown-like text (.md, serialize only)\n  \
                    - plain:    Text without formatting (serialize only)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(input_arg())
                .arg(from_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
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
        .subcommand(transform_command(
            "shorten",
            "Truncate a document to a length, ending in an ellipsis",
        ))
        .subcommand(transform_command(
            "preview",
            "One-line preview for chat lists and notifications",
        ))
        .subcommand(transform_command("reply", "The snippet quoted by a reply"))
        .subcommand(transform_command(
            "forward",
            "A forwarded message without its \"forwarded from\" header",
        ))
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("DRAFTY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A first argument that is not a flag or subcommand is an input: inject "convert"
            if cleaned_args.len() > 1
                && (!cleaned_args[1].starts_with('-') || cleaned_args[1] == "-")
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

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

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = required(sub_matches, "input");
            let from = resolve_from(input, sub_matches.get_one::<String>("from"));
            let to = required(sub_matches, "to");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some((name, sub_matches)) if transforms::AVAILABLE_TRANSFORMS.contains(&name) => {
            let input = required(sub_matches, "input");
            let from = resolve_from(input, sub_matches.get_one::<String>("from"));
            let params = TransformParams {
                length: sub_matches.get_one::<usize>("length").copied(),
                max_attachments: sub_matches.get_one::<usize>("max-attachments").copied(),
                strip_heavy: sub_matches.get_one::<bool>("strip-heavy").copied(),
            };
            handle_transform_command(input, &from, name, &params, &extra_params, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    match matches.get_one::<String>(id) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Error: missing required argument '{id}'");
            std::process::exit(1);
        }
    }
}

/// Pick the source format: explicit flag, then file extension, then markup for stdin
fn resolve_from(input: &str, from_arg: Option<&String>) -> String {
    if let Some(f) = from_arg {
        return f.to_string();
    }
    if input == "-" {
        return "markup".to_string();
    }
    let registry = FormatRegistry::default();
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

fn read_input(input: &str) -> String {
    let result = if input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).map(|_| buffer)
    } else {
        fs::read_to_string(input)
    };
    result.unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    })
}

fn load_document(registry: &FormatRegistry, input: &str, from: &str) -> Document {
    let source = read_input(input);
    debug!(input, from, bytes = source.len(), "parsing input");
    registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    })
}

fn write_output(output: Option<&str>, data: &str) {
    match output {
        Some(path) => {
            fs::write(path, data).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{data}"),
    }
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &DraftyConfig,
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

    let doc = load_document(&registry, input, from);

    let mut format_options = if to == "markdown" {
        config.markdown.format_options()
    } else {
        HashMap::new()
    };
    for (key, value) in extra_params {
        format_options.insert(key.clone(), value.clone());
    }

    let result = registry
        .serialize_with_options(&doc, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    write_output(output, &result);
}

/// Handle shorten, preview, reply and forward
fn handle_transform_command(
    input: &str,
    from: &str,
    transform: &str,
    params: &TransformParams,
    extra_params: &HashMap<String, String>,
    config: &DraftyConfig,
) {
    let registry = FormatRegistry::default();
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let doc = load_document(&registry, input, from);
    let result = transforms::execute_transform(&doc, transform, params, config)
        .and_then(|out| transforms::render_wire(&out, extra_params))
        .unwrap_or_else(|e| {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        });

    println!("{result}");
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Conversion formats:");
    for format_name in registry.list_formats() {
        let mut modes = Vec::new();
        if let Ok(format) = registry.get(&format_name) {
            if format.supports_parsing() {
                modes.push("parse");
            }
            if format.supports_serialization() {
                modes.push("serialize");
            }
        }
        println!("  {format_name:<10} {}", modes.join(", "));
    }

    println!("\nTransforms:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> DraftyConfig {
    let loader = Loader::new().with_optional_file("drafty.toml");
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

fn apply_config_overrides(config: &mut DraftyConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["plain-links", "plainlinks"]) {
        config.markdown.plain_links = parse_bool_arg("plain-links", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["strip-heavy"]) {
        config.shorten.strip_heavy = parse_bool_arg("strip-heavy", &raw);
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
