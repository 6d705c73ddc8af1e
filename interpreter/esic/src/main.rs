//! esi interpreter CLI.

use esic::{run_file, RunOptions};
use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG=esi_eval=trace follows every node evaluation.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let mut options = RunOptions::default();
            let mut file_path = None;

            for arg in args.iter().skip(2) {
                if arg == "--print-result" || arg == "-p" {
                    options.print_result = true;
                } else if !arg.starts_with('-') && file_path.is_none() {
                    file_path = Some(arg.as_str());
                }
            }

            let Some(path) = file_path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: esi run <program.json> [--print-result]");
                std::process::exit(1);
            };

            std::process::exit(run_file(path, &options));
        }
        "version" | "--version" | "-V" => {
            println!("esi {}", env!("CARGO_PKG_VERSION"));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("esi - ES5 subset interpreter over ESTree JSON");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  esi run <program.json> [--print-result]");
    eprintln!("  esi version");
    eprintln!();
    eprintln!("Programs are parser output, e.g. acorn with ecmaVersion 5:");
    eprintln!("  npx acorn --ecma5 program.js > program.json");
}
