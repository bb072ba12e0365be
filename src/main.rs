// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs::File;
use std::io::{self, Read, Write};
use std::process;

use pico_args::Arguments;
use svgbake::rwsvgtree::{self, Indent};

const HELP: &str = "\
svgbake bakes SVG transforms into the shapes geometry.

USAGE:
  svgbake [OPTIONS] <in-svg> <out-svg>  # from file to file
  svgbake [OPTIONS] <in-svg> -c         # from file to stdout
  svgbake [OPTIONS] - <out-svg>         # from stdin to file
  svgbake [OPTIONS] - -c                # from stdin to stdout

OPTIONS:
  -h, --help                        Prints help information
  -V, --version                     Prints version information
  -c                                Prints the output SVG to the stdout

  --id ID                           Processes only the element with the specified ID
                                    and its descendants.
                                    This option can be set multiple times
                                    [default: the whole document]
  --tolerance NUM                   Sets the tolerance used to compare numbers
                                    [default: 0.00001]
  --min-length NUM                  Sets the smallest stroke width
                                    produced by scaling
                                    [default: 0.1]
  --precision NUM                   Set the coordinates numeric precision.
                                    Smaller precision can lead to a malformed output in some cases
                                    [values: 2..8 (inclusive)] [default: 8]
  --keep-editor-data                Do not remove Inkscape and Sodipodi attributes from paths
  --indent INDENT                   Sets the XML nodes indent
                                    [values: none, 0, 1, 2, 3, 4, tabs] [default: 4]
  --attrs-indent INDENT             Sets the XML attributes indent
                                    [values: none, 0, 1, 2, 3, 4, tabs] [default: none]
  --quiet                           Disables warnings

ARGS:
  <in-svg>                          Input file
  <out-svg>                         Output file
";

#[derive(Debug)]
struct Args {
    selection: Vec<String>,
    tolerance: f64,
    min_length: f64,
    precision: u8,
    keep_editor_data: bool,
    indent: Indent,
    attrs_indent: Indent,

    quiet: bool,

    input: String,
    output: String,
}

fn collect_args() -> Result<Args, pico_args::Error> {
    let mut input = Arguments::from_env();

    if input.contains(["-h", "--help"]) {
        print!("{}", HELP);
        process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }

    Ok(Args {
        selection: input.values_from_str("--id")?,
        tolerance: input
            .opt_value_from_fn("--tolerance", parse_positive_number)?
            .unwrap_or(1e-5),
        min_length: input
            .opt_value_from_fn("--min-length", parse_positive_number)?
            .unwrap_or(0.1),
        precision: input
            .opt_value_from_fn("--precision", parse_precision)?
            .unwrap_or(8),
        keep_editor_data: input.contains("--keep-editor-data"),
        indent: input
            .opt_value_from_fn("--indent", parse_indent)?
            .unwrap_or(Indent::Spaces(4)),
        attrs_indent: input
            .opt_value_from_fn("--attrs-indent", parse_indent)?
            .unwrap_or(Indent::None),

        quiet: input.contains("--quiet"),

        input: input.free_from_str()?,
        output: input.free_from_str()?,
    })
}

fn parse_positive_number(s: &str) -> Result<f64, String> {
    let n: f64 = s.parse().map_err(|_| "invalid number")?;

    if n.is_finite() && n >= 0.0 {
        Ok(n)
    } else {
        Err("NUM must be a positive number".to_string())
    }
}

fn parse_indent(s: &str) -> Result<Indent, String> {
    let indent = match s {
        "none" => Indent::None,
        "0" => Indent::Spaces(0),
        "1" => Indent::Spaces(1),
        "2" => Indent::Spaces(2),
        "3" => Indent::Spaces(3),
        "4" => Indent::Spaces(4),
        "tabs" => Indent::Tabs,
        _ => return Err("invalid INDENT value".to_string()),
    };

    Ok(indent)
}

fn parse_precision(s: &str) -> Result<u8, String> {
    let n: u8 = s.parse().map_err(|_| "invalid precision NUM value")?;

    if (2..=8).contains(&n) {
        Ok(n)
    } else {
        Err("precision NUM cannot be smaller than 2 or larger than 8".to_string())
    }
}

#[derive(Clone, PartialEq, Debug)]
enum InputFrom<'a> {
    Stdin,
    File(&'a str),
}

#[derive(Clone, PartialEq, Debug)]
enum OutputTo<'a> {
    Stdout,
    File(&'a str),
}

fn main() {
    let args = match collect_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            process::exit(1);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    if let Err(e) = process(args) {
        eprintln!("Error: {}.", e);
        process::exit(1);
    }
}

fn process(args: Args) -> Result<(), String> {
    let (in_svg, out_svg) = {
        let in_svg = args.input.as_str();
        let out_svg = args.output.as_str();

        let svg_from = if in_svg == "-" {
            InputFrom::Stdin
        } else if in_svg == "-c" {
            return Err("-c should be set after input".to_string());
        } else {
            InputFrom::File(in_svg)
        };

        let svg_to = if out_svg == "-c" {
            OutputTo::Stdout
        } else {
            OutputTo::File(out_svg)
        };

        (svg_from, svg_to)
    };

    let input_svg = match in_svg {
        InputFrom::Stdin => load_stdin(),
        InputFrom::File(path) => std::fs::read(path).map_err(|e| e.to_string()),
    }?;

    let mut doc = rwsvgtree::Document::parse_data(&input_svg).map_err(|e| e.to_string())?;

    let opt = svgbake::Options {
        selection: args.selection,
        tolerance: args.tolerance,
        min_length: args.min_length,
        coordinates_precision: args.precision,
        strip_editor_data: !args.keep_editor_data,
    };

    // Shape warnings are printed the same way as parsing ones.
    svgbake::fuse_document(&mut doc, &opt, &mut svgbake::LogSink);

    let xml_opt = rwsvgtree::WriteOptions {
        use_single_quote: false,
        indent: args.indent,
        attributes_indent: args.attrs_indent,
    };

    let s = doc.to_string(&xml_opt);
    match out_svg {
        OutputTo::Stdout => {
            io::stdout()
                .write_all(s.as_bytes())
                .map_err(|_| "failed to write to the stdout".to_string())?;
        }
        OutputTo::File(path) => {
            let mut f =
                File::create(path).map_err(|_| "failed to create the output file".to_string())?;
            f.write_all(s.as_bytes())
                .map_err(|_| "failed to write to the output file".to_string())?;
        }
    }

    Ok(())
}

fn load_stdin() -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    let stdin = io::stdin();
    let mut handle = stdin.lock();

    handle
        .read_to_end(&mut buf)
        .map_err(|_| "failed to read from stdin".to_string())?;

    Ok(buf)
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
