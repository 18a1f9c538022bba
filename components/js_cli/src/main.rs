//! JS Runtime CLI
//!
//! Entry point for the JavaScript runtime. Parses CLI arguments and
//! delegates to the Runtime for execution.

use clap::Parser as ClapParser;
use js_cli::{Cli, CliError, Runtime};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut runtime = Runtime::new(cli.jit)
        .with_print_bytecode(cli.print_bytecode)
        .with_print_ast(cli.print_ast);

    // Execute based on CLI arguments
    if let Some(file) = cli.file {
        match runtime.execute_file(&file) {
            Ok(result) => {
                // Print result if not undefined
                if !matches!(result, core_types::Value::Undefined) {
                    println!("{:?}", result);
                }
            }
            Err(CliError::IoError(e)) => {
                eprintln!("Error: Could not read file '{}': {}", file, e);
                std::process::exit(1);
            }
            Err(CliError::ParseError(e)) => {
                eprintln!("Syntax Error: {}", e);
                std::process::exit(1);
            }
            Err(CliError::JsError(e)) => {
                eprintln!("JavaScript Error: {:?}", e);
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else if let Some(code) = cli.eval {
        match runtime.execute_string(&code) {
            Ok(result) => {
                // Print result if not undefined
                if !matches!(result, core_types::Value::Undefined) {
                    println!("{:?}", result);
                }
            }
            Err(CliError::ParseError(e)) => {
                eprintln!("Syntax Error: {}", e);
                std::process::exit(1);
            }
            Err(CliError::JsError(e)) => {
                eprintln!("JavaScript Error: {:?}", e);
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else if cli.repl {
        runtime.repl()?;
    } else {
        // Default: show usage
        println!("JS Runtime v0.1.0");
        println!();
        println!("Usage:");
        println!("  jsrt --file <FILE>     Execute a JavaScript file");
        println!("  jsrt --eval <CODE>     Evaluate inline JavaScript code");
        println!("  jsrt --repl            Start interactive REPL");
        println!();
        println!("Run 'jsrt --help' for more options.");
    }

    Ok(())
}
