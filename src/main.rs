use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::{debug, error};

/// Compiler and interpreter for the defun language.
#[derive(Parser, Debug)]
#[command(name = "defunc", version, disable_version_flag = true)]
struct Args {
    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    /// Execute the program instead of generating a compiled output
    #[arg(short = 'x', long = "execute")]
    execute: bool,

    /// Path of the compiled WASM module
    #[arg(short = 'o', long = "output", default_value = "a.wasm")]
    output: PathBuf,

    /// Input files
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let input = match args.files.as_slice() {
        [] => return Err("Missing input files".into()),
        [file] => file,
        _ => return Err("Multiple input files not implemented".into()),
    };

    let source = fs::read_to_string(input)?;
    let source_name = input.display().to_string();
    let program = parser::parse(&source, &source_name)?;

    print_program(&program, &source);

    if args.execute {
        let result = interpreter::execute(&program)?;
        println!();
        println!("Result from execution: {}", result);
    } else {
        debug!("Writing compiled module to {}", args.output.display());
        let mut output = fs::File::create(&args.output)?;
        wasm::compile(&program, &mut output)?;
    }

    Ok(())
}

fn print_program(program: &ast::Program, source: &str) {
    println!("Types:");
    for id in program.type_ids() {
        println!("  {}", program.type_rep(id));
    }

    println!("Functions:");
    for function in &program.functions {
        println!(
            "  {}: {} {}",
            function.name,
            program.type_rep(function.type_id),
            &source[function.body.span.clone()]
        );
    }

    if let Some(main) = program.main() {
        println!("Main function: {}", main.name);
    }
}
