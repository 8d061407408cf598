//! Command-line interface for ftl
//!
//! Parses a Fluent file and prints what the parser made of it.
//!
//! Usage:
//!   ftl `<path>` [--format treeviz|json|yaml|tokens] [--config `<file>`] [--set key=value]...
//!       [--show-linum] [--strict]
//!
//! Settings come from the built-in defaults, then `--config`, then `--set` overrides.
//! `--format` and `--show-linum` win over the `output` settings. With `--strict` every
//! parse error is printed with its source context, followed by duplicate id warnings, and
//! the exit code is 1 when there is any error.
//! Set `RUST_LOG=ftl=debug` to trace the lexer and parser.

use clap::{Arg, ArgAction, Command};
use ftl::ftl::ast::{format_source_context, DiagnosticSeverity, SourceLocation};
use ftl::ftl::config::{FtlConfig, Loader};
use ftl::ftl::formats::{self, Format};
use ftl::ftl::lexing;
use ftl::{parse_resource_with_options, ParserOptions};
use std::collections::HashMap;
use std::process;

fn main() {
    env_logger::init();

    let matches = Command::new("ftl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse Fluent (.ftl) localization files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the .ftl file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["treeviz", "json", "yaml", "tokens"]),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .help("Override a setting, e.g. parser.duplicates=reject")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("show-linum")
                .long("show-linum")
                .help("Prefix treeviz lines with source line numbers")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Report parse errors and exit with status 1 if there are any")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    let overrides: Vec<&String> = matches
        .get_many::<String>("set")
        .map(|values| values.collect())
        .unwrap_or_default();
    let config = load_config(matches.get_one::<String>("config"), &overrides);

    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        process::exit(1);
    });

    let options = ParserOptions::from(&config.parser);
    let format = matches.get_one::<String>("format").map(String::as_str);
    if format == Some("tokens") {
        let tokens = lexing::tokenize_with_max_nesting(&source, options.max_nesting);
        print!("{}", ftl::ftl::token::format_tokens(&tokens));
        return;
    }

    let resource = parse_resource_with_options(&source, &options);
    let locator = SourceLocation::new(&source);
    log::info!(
        "{}: {} lines, {} entries",
        path,
        locator.line_count(),
        resource.body.len()
    );

    let format = match format {
        Some(name) => name.parse::<Format>().unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        }),
        None => config.output.format,
    };
    let show_linum = matches.get_flag("show-linum") || config.output.show_line_numbers;
    let mut params = HashMap::new();
    params.insert("show-linum".to_string(), show_linum.to_string());

    let output = formats::serialize_with_params(&resource, format, &params).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    print!("{}", output);
    if format != Format::Treeviz {
        println!();
    }

    if matches.get_flag("strict") {
        for junk in resource.junk() {
            let range = locator.byte_range_to_ast_range(&junk.error.span());
            eprintln!("error[{}]: {} at {}", junk.error.code(), junk.error, range.start);
            eprintln!("{}", format_source_context(&source, &range));
        }
        for warning in resource
            .diagnostics()
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
        {
            eprintln!("{}", warning);
        }
        if resource.has_errors() {
            process::exit(1);
        }
    }
}

fn load_config(path: Option<&String>, overrides: &[&String]) -> FtlConfig {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    for entry in overrides {
        let Some((key, value)) = entry.split_once('=') else {
            eprintln!("Error: --set expects key=value, got {}", entry);
            process::exit(1);
        };
        loader = loader
            .set_override(key.trim(), value.trim())
            .unwrap_or_else(|e| {
                eprintln!("Error: invalid override {}: {}", entry, e);
                process::exit(1);
            });
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        process::exit(1);
    })
}
