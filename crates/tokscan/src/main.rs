//! tokscan CLI
//!
//! Tokenize text from a file or standard input.

use std::io::{self, BufWriter, Write};

use tokscan::commands::{
    dump_lines, dump_numbers, dump_split, dump_tokens, open_input, parse_scan_options,
    CommandError, ScanOptions,
};

fn main() {
    tokscan::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "tokens" => {
            let options = options_or_exit(&args[2..], "tokscan tokens [file]");
            finish(run_with_input(&options, |source, out| dump_tokens(source, out)));
        }
        "lines" => {
            let options = options_or_exit(&args[2..], "tokscan lines [file]");
            finish(run_with_input(&options, |source, out| dump_lines(source, out)));
        }
        "numbers" => {
            let options = options_or_exit(&args[2..], "tokscan numbers [--type=<kind>] [file]");
            let kind = options.number_kind;
            finish(run_with_input(&options, |source, out| {
                dump_numbers(source, kind, out)
            }));
        }
        "split" => {
            if args.len() < 3 {
                eprintln!("Usage: tokscan split <delimiter> [file]");
                std::process::exit(1);
            }
            let delimiter = &args[2];
            let options = options_or_exit(&args[3..], "tokscan split <delimiter> [file]");
            finish(run_with_input(&options, |source, out| {
                dump_split(source, delimiter, out)
            }));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("tokscan {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn options_or_exit(args: &[String], usage: &str) -> ScanOptions {
    match parse_scan_options(args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("Usage: {usage}");
            std::process::exit(1);
        }
    }
}

type Input = tokscan_core::ReaderSource<Box<dyn io::Read>>;

/// Open the input, run `command` against buffered stdout, and flush.
fn run_with_input<F>(options: &ScanOptions, command: F) -> Result<usize, CommandError>
where
    F: FnOnce(&mut Input, &mut BufWriter<io::StdoutLock<'static>>) -> Result<usize, CommandError>,
{
    let mut source = open_input(options)?;
    let mut out = BufWriter::new(io::stdout().lock());
    let result = command(&mut source, &mut out);
    out.flush()?;
    result
}

fn finish(result: Result<usize, CommandError>) {
    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("tokscan: tokenize text with unlimited lookahead");
    println!();
    println!("Usage: tokscan <command> [options] [file]");
    println!();
    println!("Reads standard input when no file (or `-`) is given.");
    println!();
    println!("Commands:");
    println!("  tokens [file]              Print each whitespace-delimited token");
    println!("  lines [file]               Print each line with its number");
    println!("  numbers [file]             Read numbers until end of input");
    println!("  split <delimiter> [file]   Print the spans between delimiters");
    println!("  help                       Show this help message");
    println!("  version                    Show version information");
    println!();
    println!("Number options:");
    println!("  --type=<kind>      i8, u8, i16, u16, i32, u32, i64 (default), u64,");
    println!("                     f32, f64, decimal");
    println!();
    println!("Logging:");
    println!("  RUST_LOG=tokscan_core=trace   Trace scanner reads and rollbacks");
    println!();
    println!("Examples:");
    println!("  tokscan tokens notes.txt");
    println!("  tokscan numbers --type=decimal prices.txt");
    println!("  printf 'a,b,c' | tokscan split ,");
}
