/*
** This file is a part of Xmlvet (XML document and schema library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlvet is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::io::Write;
use std::io::stdin;
use std::io::stdout;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use xmlvet::DEFAULT_BUFFER_SIZE;
use xmlvet::Document;
use xmlvet::DocumentParser;
use xmlvet::GenerateOptions;
use xmlvet::ParseError;

/// Parses XML documents and writes them back in the normalized form.
#[derive(Parser, Debug)]
#[command(name = "xmlvet", version, about)]
struct Args {
    /// Input files, standard input is read if none given or for "-"
    files: Vec<String>,

    /// Prepend the XML declaration to the output
    #[arg(long)]
    header: bool,

    /// Only check the documents, do not print them
    #[arg(short, long)]
    quiet: bool,

    /// Print document statistics
    #[arg(short, long)]
    stat: bool,

    /// File read buffer size in bytes
    #[arg(short, long, value_name = "SIZE", default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer: usize,
}

fn error_kind(err: &ParseError) -> &'static str {
    match err {
        ParseError::Parser(_) => "Syntax error",
        ParseError::Resource => "Memory allocation failed",
        ParseError::External(_) => "Read error",
        ParseError::Overflow => "Character data overflow",
        ParseError::Integrity(_) => "Structure error",
    }
}

fn print_stats(doc: &Document, nr_bytes: u64) {
    let mut nr_elements = 0;
    let mut max_depth = 0;
    let mut nr_attributes = 0;
    for element in doc.root().descendant_or_self() {
        nr_elements += 1;
        max_depth = max_depth.max(element.depth());
        nr_attributes += element.attributes().count();
    }
    println!(
        "Elements: {}, attributes: {}, max depth: {}, input: {} bytes",
        nr_elements, nr_attributes, max_depth, nr_bytes
    );
    println!("Arena: {}", doc.arena_stats());
}

struct Tool {
    parser: DocumentParser,
    options: GenerateOptions,
    quiet: bool,
    stat: bool,
}

impl Tool {
    fn process(&mut self, file: &str) -> bool {
        let result = if file == "-" {
            self.parser.parse_reader(stdin().lock())
        } else {
            self.parser.parse_file(file)
        };
        let doc = match result {
            Ok(doc) => doc,
            Err(err) => {
                eprintln!(
                    "{} in '{}' near byte {}: {}",
                    error_kind(&err),
                    file,
                    self.parser.nr_bytes(),
                    err
                );
                return false;
            }
        };

        if self.stat {
            print_stats(&doc, self.parser.nr_bytes());
        }
        if !self.quiet {
            let xml = match doc.generate(&self.options) {
                Ok(xml) => xml,
                Err(err) => {
                    eprintln!("Cannot generate '{}': {}", file, err);
                    return false;
                }
            };
            let mut out = stdout().lock();
            if let Err(err) = out.write_all(xml.as_bytes()).and_then(|()| out.flush()) {
                eprintln!("Cannot write output: {}", err);
                return false;
            }
        }
        true
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut tool = Tool {
        parser: DocumentParser::new().with_buffer_size(args.buffer),
        options: GenerateOptions {
            header: args.header,
        },
        quiet: args.quiet,
        stat: args.stat,
    };

    let mut files = args.files;
    if files.is_empty() {
        files.push("-".to_string());
    }

    let mut exit_code = ExitCode::SUCCESS;
    for file in &files {
        if !tool.process(file) {
            exit_code = ExitCode::FAILURE;
        }
    }
    exit_code
}
