/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * Command-Line Driver
 * -------------------
 *   lox [--ast] [script]
 *
 * With a script the file is run once; without one an interactive prompt
 * reads and runs a line at a time against the same globals.
 *
 * --------------------------------------------------------------------------
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the LOX interpreter project.
 *
 * LOX is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::fs;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};

use lox::diagnostics::DiagnosticPrinter;
use lox::{parse_source, run_source, Interpreter, LoxError, Mode};

const USAGE: &str = "Usage: lox [--ast] [script]";

const EXIT_USAGE: u8 = 64;
const EXIT_DATA_ERR: u8 = 65;
const EXIT_NO_INPUT: u8 = 66;
const EXIT_SOFTWARE: u8 = 70;
const EXIT_IO_ERR: u8 = 74;

struct Options {
    ast: bool,
    script: Option<String>,
}

/// A driver error paired with the exit status it maps to.
struct Failure {
    error: anyhow::Error,
    code: u8,
}

impl Failure {
    fn with_code(code: u8) -> impl FnOnce(anyhow::Error) -> Failure {
        move |error| Failure { error, code }
    }

    fn report(self) -> ExitCode {
        eprintln!("error: {:#}", self.error);
        ExitCode::from(self.code)
    }
}

fn main() -> ExitCode {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(Some(options)) => options,
        Ok(None) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(err) => return Failure::with_code(EXIT_USAGE)(err).report(),
    };

    let outcome = match options.script {
        Some(path) => read_script(&path).map(|source| run_file(&path, &source, options.ast)),
        None => run_prompt(io::stdin().lock(), io::stdout(), options.ast).map(|()| ExitCode::SUCCESS),
    };

    match outcome {
        Ok(code) => code,
        Err(failure) => failure.report(),
    }
}

fn read_script(path: &str) -> Result<String, Failure> {
    fs::read_to_string(path)
        .with_context(|| format!("Reading {path}"))
        .map_err(Failure::with_code(EXIT_NO_INPUT))
}

/// `None` means help was requested.
fn parse_args(args: impl Iterator<Item = String>) -> Result<Option<Options>> {
    let mut options = Options {
        ast: false,
        script: None,
    };

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--ast" => options.ast = true,
            flag if flag.starts_with('-') => bail!("Unknown option '{flag}'\n{USAGE}"),
            _ => {
                if options.script.is_some() {
                    bail!("Only one script is supported\n{USAGE}");
                }
                options.script = Some(arg);
            }
        }
    }

    Ok(Some(options))
}

fn run_file(path: &str, source: &str, ast: bool) -> ExitCode {
    let printer = DiagnosticPrinter::new(path, source);

    if ast {
        return match dump_ast(source) {
            Ok(()) => ExitCode::SUCCESS,
            Err(errors) => report(&printer, &errors),
        };
    }

    let mut interpreter = Interpreter::new(io::stdout().lock(), Mode::Script);
    match run_source(&mut interpreter, source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(errors) => report(&printer, &errors),
    }
}

/// Reads and runs one line at a time from `input`, writing prompts to
/// `prompt`. Failing to read a line or write a prompt ends the session.
fn run_prompt(input: impl BufRead, mut prompt: impl Write, ast: bool) -> Result<(), Failure> {
    let io_failure = || Failure::with_code(EXIT_IO_ERR);
    let mut interpreter = Interpreter::new(io::stdout(), Mode::Interactive);
    let mut lines = input.lines();

    loop {
        write!(prompt, "> ")
            .and_then(|()| prompt.flush())
            .context("Writing prompt")
            .map_err(io_failure())?;

        let line = match lines.next() {
            Some(line) => line.context("Reading stdin").map_err(io_failure())?,
            None => break,
        };

        let printer = DiagnosticPrinter::new("<stdin>", &line);
        let result = if ast {
            dump_ast(&line)
        } else {
            run_source(&mut interpreter, &line)
        };

        if let Err(errors) = result {
            printer.print_all(&errors);
        }
    }

    writeln!(prompt)
        .context("Writing prompt")
        .map_err(io_failure())
}

fn dump_ast(source: &str) -> Result<(), Vec<LoxError>> {
    let program = parse_source(source)?;
    match serde_json::to_string_pretty(&program) {
        Ok(json) => {
            println!("{}", json);
            Ok(())
        }
        Err(err) => Err(vec![LoxError::io(err.into())]),
    }
}

/// Prints every error and picks the exit status for the worst of them.
fn report(printer: &DiagnosticPrinter, errors: &[LoxError]) -> ExitCode {
    printer.print_all(errors);

    if errors.iter().any(|err| err.kind.is_syntax()) {
        ExitCode::from(EXIT_DATA_ERR)
    } else {
        ExitCode::from(EXIT_SOFTWARE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_flags_and_script() {
        let options = parse_args(args(&["--ast", "demo.lox"])).unwrap().unwrap();
        assert!(options.ast);
        assert_eq!(options.script.as_deref(), Some("demo.lox"));

        assert!(parse_args(args(&["-h"])).unwrap().is_none());
        assert!(parse_args(args(&["--bogus"])).is_err());
        assert!(parse_args(args(&["a.lox", "b.lox"])).is_err());
    }

    #[test]
    fn unreadable_script_exits_with_no_input() {
        let failure = read_script("definitely/not/here.lox").unwrap_err();
        assert_eq!(failure.code, EXIT_NO_INPUT);
        assert!(format!("{:#}", failure.error).starts_with("Reading definitely/not/here.lox"));
    }

    #[test]
    fn repl_read_failure_exits_with_io_error() {
        let mut prompt = Vec::new();
        let failure = run_prompt(&b"\xff\n"[..], &mut prompt, false).unwrap_err();

        assert_eq!(failure.code, EXIT_IO_ERR);
        assert_eq!(prompt, b"> ");
    }

    #[test]
    fn repl_ends_cleanly_at_end_of_input() {
        let mut prompt = Vec::new();
        assert!(run_prompt(&b""[..], &mut prompt, false).is_ok());
        assert_eq!(prompt, b"> \n");
    }
}
