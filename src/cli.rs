// Command-line front end for Glyphcrack.
//
// Explicit subcommands over the library pipeline: decode glyph symbols,
// crack the Caesar shift against a word list, encode plaintext into
// symbols, and dump the symbol table.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::cipher::{ALPHABET_LEN, CipherCracker, CrackOutcome};
use crate::io::{DEFAULT_TERMINATOR, Puzzle, encode_lines, read_ciphertext, read_puzzle};
use crate::symbol::{self, BUCKETS, HASH_BASE, SYMBOL_LEN, SymbolTable};

const BUF_SIZE: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Glyph-symbol decoder and Caesar shift cracker.
#[derive(Parser, Debug)]
#[command(
    name = "glyphcrack",
    version,
    about = "Glyph-symbol decoder and Caesar shift cracker",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Print results as JSON.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Decode symbols, then find the Caesar shift revealing a target word.
    Crack(CrackArgs),
    /// Decode symbols into ciphertext only.
    Decode(InputArgs),
    /// Encrypt plaintext lines and write them as symbols.
    Encode(EncodeArgs),
    /// Print the symbol table bucket layout.
    Table,
    /// Print build/configuration details.
    Config,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input file (default: stdin).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "input_pos")]
    input: Option<PathBuf>,

    /// Input file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    input_pos: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CrackArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Word that ends the target word list (case-insensitive).
    #[arg(long, short = 't', default_value = DEFAULT_TERMINATOR)]
    terminator: String,

    /// Also list every shift under which some target word appears.
    #[arg(long = "all-shifts")]
    all_shifts: bool,

    /// Echo the decoded ciphertext and target words before the result.
    #[arg(long)]
    echo: bool,
}

#[derive(Args, Debug)]
struct EncodeArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Right rotation applied before symbol encoding (0-25).
    #[arg(long, short = 's', value_parser = clap::value_parser!(u8).range(0..ALPHABET_LEN as i64))]
    shift: u8,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Crack,
    Decode,
    Encode,
    Table,
    Config,
}

struct Options {
    command: Command,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    input_file: Option<PathBuf>,
    terminator: String,
    all_shifts: bool,
    echo: bool,
    shift: u8,
}

impl Options {
    fn base(command: Command, quiet: bool, verbose: u8, json_output: bool) -> Self {
        Self {
            command,
            quiet,
            verbose,
            json_output,
            input_file: None,
            terminator: DEFAULT_TERMINATOR.to_string(),
            all_shifts: false,
            echo: false,
            shift: 0,
        }
    }
}

fn resolve_options(cli: Cli) -> Options {
    let quiet = cli.quiet;
    let verbose = cli.verbose.min(2);
    let json_output = cli.json_output;

    match cli.command {
        Cmd::Crack(args) => Options {
            input_file: args.input.input.or(args.input.input_pos),
            terminator: args.terminator,
            all_shifts: args.all_shifts,
            echo: args.echo,
            ..Options::base(Command::Crack, quiet, verbose, json_output)
        },
        Cmd::Decode(args) => Options {
            input_file: args.input.or(args.input_pos),
            ..Options::base(Command::Decode, quiet, verbose, json_output)
        },
        Cmd::Encode(args) => Options {
            input_file: args.input.input.or(args.input.input_pos),
            shift: args.shift,
            ..Options::base(Command::Encode, quiet, verbose, json_output)
        },
        Cmd::Table => Options::base(Command::Table, quiet, verbose, json_output),
        Cmd::Config => Options::base(Command::Config, quiet, verbose, json_output),
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("glyphcrack".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

fn log_filter(opts: &Options) -> &'static str {
    if opts.quiet {
        return "error";
    }
    match opts.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

// ---------------------------------------------------------------------------
// Shared I/O helpers
// ---------------------------------------------------------------------------

fn open_input(opts: &Options) -> Result<Box<dyn BufRead>, i32> {
    match &opts.input_file {
        Some(path) => match File::open(path) {
            Ok(f) => Ok(Box::new(BufReader::with_capacity(BUF_SIZE, f))),
            Err(e) => {
                eprintln!("glyphcrack: input file: {}: {e}", path.display());
                Err(1)
            }
        },
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn print_json(value: &serde_json::Value) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{s}");
            0
        }
        Err(e) => {
            eprintln!("glyphcrack: json error: {e}");
            1
        }
    }
}

// ---------------------------------------------------------------------------
// Config / table commands
// ---------------------------------------------------------------------------

fn cmd_config() -> i32 {
    let version = env!("CARGO_PKG_VERSION");
    println!("glyphcrack version {version}");
    println!("BUCKETS={BUCKETS}");
    println!("HASH_BASE={HASH_BASE}");
    println!("SYMBOL_LEN={SYMBOL_LEN}");
    println!("ALPHABET_LEN={ALPHABET_LEN}");
    println!("DICTIONARY_ENTRIES={}", symbol::DICTIONARY.len());
    println!("END_MARKER={:?}", symbol::END_MARKER);
    println!("DEFAULT_TERMINATOR={DEFAULT_TERMINATOR}");
    0
}

fn cmd_table(table: &SymbolTable) -> i32 {
    print!("{table}");
    0
}

// ---------------------------------------------------------------------------
// Decode command
// ---------------------------------------------------------------------------

fn cmd_decode(opts: &Options, table: &SymbolTable) -> i32 {
    let mut reader = match open_input(opts) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let ciphertext = match read_ciphertext(&mut reader, table) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("glyphcrack: decode error: {e}");
            return 1;
        }
    };

    if opts.json_output {
        return print_json(&serde_json::json!({
            "command": "decode",
            "ciphertext": ciphertext,
            "complete": ciphertext.ends_with(symbol::END_MARKER),
        }));
    }
    println!("{ciphertext}");
    0
}

// ---------------------------------------------------------------------------
// Crack command
// ---------------------------------------------------------------------------

fn cmd_crack(opts: &Options, table: &SymbolTable) -> i32 {
    let mut reader = match open_input(opts) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let puzzle = match read_puzzle(&mut reader, table, &opts.terminator) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("glyphcrack: input error: {e}");
            return 1;
        }
    };
    if puzzle.words.is_empty() && !opts.quiet {
        eprintln!("glyphcrack: warning: no target words given");
    }

    let cracker = CipherCracker::new(puzzle.words.iter().cloned());
    let outcome = cracker.crack(&puzzle.ciphertext);
    let qualifying = opts
        .all_shifts
        .then(|| cracker.qualifying_shifts(&puzzle.ciphertext));

    if opts.json_output {
        let words: Vec<serde_json::Value> = match &outcome {
            CrackOutcome::Cracked { reports, .. } => reports
                .iter()
                .map(|r| {
                    let offsets: Vec<usize> = r.trace.offsets().collect();
                    serde_json::json!({
                        "word": r.word,
                        "matched": r.matched(),
                        "offsets": offsets,
                        "trace": r.trace.to_string(),
                    })
                })
                .collect(),
            CrackOutcome::NotCracked => puzzle
                .words
                .iter()
                .map(|w| serde_json::json!({ "word": w }))
                .collect(),
        };
        let plaintext = match &outcome {
            CrackOutcome::Cracked { plaintext, .. } => Some(plaintext.as_str()),
            CrackOutcome::NotCracked => None,
        };
        return print_json(&serde_json::json!({
            "command": "crack",
            "ciphertext": puzzle.ciphertext,
            "cracked": outcome.is_cracked(),
            "shift": outcome.shift_code(),
            "plaintext": plaintext,
            "words": words,
            "qualifying_shifts": qualifying,
        }));
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let written = write_crack_report(&mut out, opts, &puzzle, &outcome, qualifying.as_deref());
    if let Err(e) = written {
        eprintln!("glyphcrack: write error: {e}");
        return 1;
    }
    0
}

fn write_crack_report<W: Write>(
    out: &mut W,
    opts: &Options,
    puzzle: &Puzzle,
    outcome: &CrackOutcome,
    qualifying: Option<&[u8]>,
) -> io::Result<()> {
    if opts.echo {
        writeln!(out, "{}", puzzle.ciphertext)?;
        for word in &puzzle.words {
            writeln!(out, "{word}")?;
        }
    }
    writeln!(out, "shift: {}", outcome.shift_code())?;
    if let CrackOutcome::Cracked {
        plaintext, reports, ..
    } = outcome
    {
        writeln!(out, "plaintext: {plaintext}")?;
        for report in reports {
            writeln!(out, "{}: {}", report.word, report.trace)?;
        }
    }
    if let Some(shifts) = qualifying {
        let list: Vec<String> = shifts.iter().map(u8::to_string).collect();
        writeln!(out, "qualifying shifts: {}", list.join(" "))?;
    }
    out.flush()
}

// ---------------------------------------------------------------------------
// Encode command
// ---------------------------------------------------------------------------

fn cmd_encode(opts: &Options) -> i32 {
    let mut reader = match open_input(opts) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let stdout = io::stdout();
    let mut out = BufWriter::with_capacity(BUF_SIZE, stdout.lock());

    match encode_lines(&mut reader, &mut out, opts.shift) {
        Ok(lines) => {
            if let Err(e) = out.flush() {
                eprintln!("glyphcrack: write flush error: {e}");
                return 1;
            }
            if opts.verbose > 0 && !opts.quiet {
                eprintln!("glyphcrack: encoded {lines} lines with shift {}", opts.shift);
            }
            0
        }
        Err(e) => {
            eprintln!("glyphcrack: encode error: {e}");
            1
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();
    let opts = resolve_options(cli);

    let env = env_logger::Env::default().default_filter_or(log_filter(&opts));
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .init();

    let table = symbol::standard_table();
    let exit_code = match opts.command {
        Command::Crack => cmd_crack(&opts, &table),
        Command::Decode => cmd_decode(&opts, &table),
        Command::Encode => cmd_encode(&opts),
        Command::Table => cmd_table(&table),
        Command::Config => cmd_config(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_opts(args: &[&str]) -> Options {
        let argv: Vec<String> = std::iter::once("glyphcrack".to_string())
            .chain(args.iter().map(|s| s.to_string()))
            .collect();
        let cli = Cli::try_parse_from(argv).expect("cli parse failed");
        resolve_options(cli)
    }

    fn try_parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("glyphcrack").chain(args.iter().copied()))
    }

    #[test]
    fn crack_subcommand_maps_correctly() {
        let opts = parse_opts(&[
            "crack",
            "--terminator",
            "end",
            "--all-shifts",
            "--echo",
            "puzzle.txt",
        ]);
        assert_eq!(opts.command, Command::Crack);
        assert_eq!(opts.terminator, "end");
        assert!(opts.all_shifts);
        assert!(opts.echo);
        assert_eq!(opts.input_file, Some(PathBuf::from("puzzle.txt")));
    }

    #[test]
    fn crack_defaults() {
        let opts = parse_opts(&["crack"]);
        assert_eq!(opts.terminator, DEFAULT_TERMINATOR);
        assert!(!opts.all_shifts);
        assert!(opts.input_file.is_none());
    }

    #[test]
    fn input_flag_and_positional_conflict() {
        assert!(try_parse(&["decode", "--input", "a", "b"]).is_err());
        let opts = parse_opts(&["decode", "--input", "a"]);
        assert_eq!(opts.input_file, Some(PathBuf::from("a")));
    }

    #[test]
    fn encode_shift_range() {
        assert_eq!(parse_opts(&["encode", "--shift", "25"]).shift, 25);
        assert!(try_parse(&["encode", "--shift", "26"]).is_err());
        assert!(try_parse(&["encode"]).is_err());
    }

    #[test]
    fn verbose_is_capped() {
        let opts = parse_opts(&["-v", "-v", "-v", "table"]);
        assert_eq!(opts.verbose, 2);
        assert_eq!(log_filter(&opts), "debug");
    }

    #[test]
    fn quiet_lowers_log_filter() {
        let opts = parse_opts(&["--quiet", "config"]);
        assert_eq!(opts.command, Command::Config);
        assert_eq!(log_filter(&opts), "error");
        assert!(try_parse(&["-q", "-v", "config"]).is_err());
    }

    #[test]
    fn json_flag_is_global() {
        assert!(parse_opts(&["crack", "--json"]).json_output);
        assert!(parse_opts(&["--json", "decode"]).json_output);
    }

    #[test]
    fn crack_report_text() {
        let puzzle = Puzzle {
            ciphertext: "KHOOR ZRUOG.".into(),
            words: vec!["HELLO".into(), "WORLD".into()],
        };
        let cracker = CipherCracker::new(puzzle.words.iter().cloned());
        let outcome = cracker.crack(&puzzle.ciphertext);
        let opts = parse_opts(&["crack", "--echo"]);
        let mut out = Vec::new();
        write_crack_report(&mut out, &opts, &puzzle, &outcome, Some(&[3u8][..])).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "KHOOR ZRUOG.\nHELLO\nWORLD\nshift: 3\nplaintext: HELLO WORLD.\n\
             HELLO: (0) 5 5\nWORLD: 3 3 (6) 5\nqualifying shifts: 3\n"
        );
    }

    #[test]
    fn crack_report_not_cracked() {
        let puzzle = Puzzle {
            ciphertext: "KHOOR ZRUOG.".into(),
            words: vec!["APPLE".into()],
        };
        let opts = parse_opts(&["crack"]);
        let mut out = Vec::new();
        write_crack_report(&mut out, &opts, &puzzle, &CrackOutcome::NotCracked, None).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "shift: -1\n");
    }

    #[test]
    fn fuzz_parse_does_not_panic() {
        fuzz_try_parse_args(&["crack".into(), "--bogus".into()]);
        fuzz_try_parse_args(&[]);
    }
}
