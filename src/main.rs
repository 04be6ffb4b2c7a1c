// minic: scan and parse C-simple source files

mod parser;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use parser::lexer::Scanner;
use parser::parser::Parser;

fn usage(program_name: &str) {
    eprintln!("Usage: {} <file> [--scan-only] [--symbol-table]", program_name);
    eprintln!();
    eprintln!("  --scan-only        print the lexeme stream instead of parsing");
    eprintln!("  --symbol-table, -s check declarations and uses while parsing");
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("minic");

    let mut file_name = None;
    let mut scan_only = false;
    let mut symbol_table = false;

    for arg in &args[1..] {
        match arg.as_str() {
            "--scan-only" => scan_only = true,
            "--symbol-table" | "-s" => symbol_table = true,
            flag if flag.starts_with('-') => {
                eprintln!("Error: Unknown option '{}'", flag);
                usage(program_name);
                return ExitCode::FAILURE;
            }
            name => {
                if file_name.replace(name).is_some() {
                    eprintln!("Error: More than one input file given");
                    usage(program_name);
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    let Some(file_name) = file_name else {
        eprintln!("Error: No input file provided");
        usage(program_name);
        return ExitCode::FAILURE;
    };

    if !Path::new(file_name).exists() {
        eprintln!("Error: File '{}' not found", file_name);
        return ExitCode::FAILURE;
    }

    let source = match fs::read_to_string(file_name) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: Could not read '{}': {}", file_name, e);
            return ExitCode::FAILURE;
        }
    };

    if scan_only {
        let mut scanner = Scanner::new(&source);
        loop {
            match scanner.next_lexeme() {
                Ok(Some(lexeme)) => println!("{}", lexeme),
                Ok(None) => break,
                Err(e) => {
                    eprintln!("{}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        return ExitCode::SUCCESS;
    }

    let result = Parser::new(&source, symbol_table).and_then(|mut parser| parser.parse());
    match result {
        Ok(()) => {
            eprintln!("Parsed '{}' successfully.", file_name);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
