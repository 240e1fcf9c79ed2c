//! HandMorse CLI
//!
//! Usage:
//!   handmorse --samples frames.txt           # Debounce + decode a sensor stream
//!   handmorse --samples -                    # ... read from stdin
//!   handmorse --bits 0000001000100111        # Decode a debounced sequence
//!   handmorse --interactive                  # One bit string per line
//!   handmorse --serve                        # HTTP API server
//!   handmorse --bits 0101 --json             # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Read, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use handmorse::core::{parse_bits, parse_samples, run_server, CodeTable, Pipeline};
use handmorse::types::{
    decode_parseable_string, decode_terminal_string, Candidate, DecodeResult,
    EncodePolicy, PipelineConfig, PipelineOutput, ReasonCode,
};
use handmorse::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "handmorse",
    version = VERSION,
    about = "HandMorse - decode open/closed hand signals into words",
    long_about = "HandMorse turns a per-frame hand observation stream\n\
                  (1 = open, 0 = closed, -1 = no hand) into stable bits and\n\
                  decodes them against a Morse-style phrase lexicon.\n\n\
                  Modes:\n  \
                  --samples      Debounce and decode a recorded stream\n  \
                  --bits         Decode an already debounced sequence\n  \
                  --interactive  Decode one bit string per line\n  \
                  --serve        HTTP API server mode"
)]
struct Args {
    /// Observation stream file ("-" for stdin)
    #[arg(short, long)]
    samples: Option<String>,

    /// Debounced bit sequence, e.g. 0000001000100111
    #[arg(short, long)]
    bits: Option<String>,

    /// Interactive mode - read bit strings from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Custom code table file ("LETTER CODEWORD" per line)
    #[arg(long)]
    table: Option<String>,

    /// Frames a run needs before its symbol counts
    #[arg(long)]
    stable_min: Option<usize>,

    /// No-signal frames bridged inside a run
    #[arg(long)]
    gap_tolerance: Option<usize>,

    /// Maximum words per phrase
    #[arg(long)]
    max_phrase_len: Option<usize>,

    /// Candidates kept by the fallback beam
    #[arg(long)]
    beam_size: Option<usize>,

    /// Largest distance accepted without fallback
    #[arg(long)]
    max_exact_distance: Option<usize>,

    /// Frames per second of the observation stream
    #[arg(long)]
    sample_rate: Option<f64>,

    /// Reject phrases with letters outside the code table
    #[arg(long)]
    strict: bool,

    /// Also list the N closest phrases
    #[arg(long)]
    top: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show run breakdown and debug logs
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    let pipeline = match build_pipeline(&args) {
        Ok(pipeline) => pipeline,
        Err(reason) => {
            eprintln!("{} {}", "Configuration error:".red(), reason);
            std::process::exit(1);
        }
    };

    if args.serve {
        run_serve(&args, Arc::new(pipeline)).await;
    } else if args.interactive {
        run_interactive(&pipeline, &args);
    } else if let Some(ref source) = args.samples {
        run_samples(source, &pipeline, &args);
    } else if let Some(ref bits) = args.bits {
        run_bits(bits, &pipeline, &args);
    } else {
        // Default to interactive if no mode specified
        run_interactive(&pipeline, &args);
    }
}

/// Logs go to stderr; RUST_LOG overrides the level
fn init_logging(verbose: bool) {
    let default = if verbose { "handmorse=debug" } else { "handmorse=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Config file, then flags on top
fn build_pipeline(args: &Args) -> Result<Pipeline, ReasonCode> {
    let mut config = match args.config {
        Some(ref path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(v) = args.stable_min {
        config.debounce.stable_min = v;
    }
    if let Some(v) = args.gap_tolerance {
        config.debounce.gap_tolerance = v;
    }
    if let Some(v) = args.max_phrase_len {
        config.lexicon.max_phrase_len = v;
    }
    if let Some(v) = args.beam_size {
        config.decoder.beam_size = v;
    }
    if let Some(v) = args.max_exact_distance {
        config.decoder.max_exact_distance = v;
    }
    if let Some(v) = args.sample_rate {
        config.sample_rate = v;
    }
    if args.strict {
        config.decoder.encode_policy = EncodePolicy::Reject;
    }

    let table = match args.table {
        Some(ref path) => CodeTable::load(path)?,
        None => CodeTable::reference(),
    };
    Pipeline::with_table(config, table)
}

/// Debounce and decode a recorded stream
fn run_samples(source: &str, pipeline: &Pipeline, args: &Args) {
    let text = match read_source(source) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{} {}: {}", "Cannot read".red(), source, e);
            std::process::exit(1);
        }
    };

    let samples = match parse_samples(&text) {
        Ok(samples) => samples,
        Err(reason) => fail(reason),
    };

    match pipeline.run(&samples) {
        Ok(output) => {
            let top = match top_candidates(pipeline, &output.debounce.bits, args) {
                Ok(top) => top,
                Err(reason) => fail(reason),
            };
            print_pipeline(&output, &top, args);
        }
        Err(ReasonCode::R201_NO_SIGNAL) => {
            let debounce = pipeline.debounce(&samples);
            println!(
                "{} ({} frames, {} short runs discarded)",
                "No signal detected".yellow(),
                debounce.frames_processed,
                debounce.discarded_runs
            );
        }
        Err(reason) => fail(reason),
    }
}

/// Decode a single debounced sequence
fn run_bits(text: &str, pipeline: &Pipeline, args: &Args) {
    let bits = match parse_bits(text) {
        Ok(bits) => bits,
        Err(reason) => fail(reason),
    };
    let decoded = pipeline
        .decode_bits(&bits)
        .and_then(|result| Ok((top_candidates(pipeline, &bits, args)?, result)));
    match decoded {
        Ok((top, result)) => print_decode(&result, &top, args),
        Err(reason) => fail(reason),
    }
}

/// Run interactive mode
fn run_interactive(pipeline: &Pipeline, args: &Args) {
    print_header(pipeline);
    println!("Type a bit sequence (e.g. 0000001000100111) and press Enter. Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut decoded = 0usize;

    loop {
        print!("{} ", ">".bold());
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Decoded: {}", decoded);
            break;
        }
        if line.is_empty() {
            continue;
        }

        let result = parse_bits(line).and_then(|bits| {
            let result = pipeline.decode_bits(&bits)?;
            Ok((top_candidates(pipeline, &bits, args)?, result))
        });
        match result {
            Ok((top, result)) => {
                decoded += 1;
                print_decode(&result, &top, args);
            }
            Err(reason) => println!("{} {}", "⚠".yellow(), reason),
        }
    }
}

/// Run HTTP API server
async fn run_serve(args: &Args, pipeline: Arc<Pipeline>) {
    print_header(&pipeline);
    if let Err(e) = run_server(&args.addr, pipeline).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

fn read_source(source: &str) -> io::Result<String> {
    if source == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(source)
    }
}

/// Closest phrases for --top, empty without the flag
fn top_candidates(
    pipeline: &Pipeline,
    bits: &[u8],
    args: &Args,
) -> Result<Vec<Candidate>, ReasonCode> {
    match args.top {
        Some(n) => pipeline.top_candidates(bits, n),
        None => Ok(Vec::new()),
    }
}

fn fail(reason: ReasonCode) -> ! {
    eprintln!("{} {}", "Error:".red(), reason);
    std::process::exit(1);
}

/// Print header
fn print_header(pipeline: &Pipeline) {
    let lexicon = pipeline.lexicon();
    println!("{}", format!("HandMorse v{}", VERSION).bold());
    println!(
        "Lexicon: {} phrases from {} words (max {} per phrase) | {}",
        lexicon.len(),
        lexicon.base_words().len(),
        lexicon.max_phrase_len(),
        &lexicon.fingerprint()[..12]
    );
    println!();
}

/// Print pipeline output
fn print_pipeline(output: &PipelineOutput, top: &[Candidate], args: &Args) {
    if args.json {
        print_json(&serde_json::json!({ "output": output, "top": top }));
        return;
    }

    if args.verbose {
        println!(
            "{} frames ({:.1}s at {} fps), {} runs committed, {} discarded",
            output.debounce.frames_processed,
            output.duration_secs,
            output.sample_rate,
            output.debounce.runs.len(),
            output.debounce.discarded_runs
        );
        for run in &output.debounce.runs {
            println!(
                "  {} frames {:>6}..{:<6} ({} gap, {:.2}s)",
                run.symbol,
                run.start_frame,
                run.start_frame + run.frames + run.gap_frames,
                run.gap_frames,
                run.duration_secs(output.sample_rate)
            );
        }
    }

    if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }
    print_top(top);
}

/// Print a decode result
fn print_decode(result: &DecodeResult, top: &[Candidate], args: &Args) {
    if args.json {
        print_json(&serde_json::json!({ "result": result, "top": top }));
        return;
    }
    if args.no_color {
        println!("{}", decode_parseable_string(result));
    } else {
        println!("{}", decode_terminal_string(result));
    }
    if args.verbose && !result.candidates.is_empty() {
        println!("  beam: {}", format_candidates(&result.candidates));
    }
    print_top(top);
}

fn print_top(top: &[Candidate]) {
    for (rank, candidate) in top.iter().enumerate() {
        println!("  #{:<2} {:<28} d={}", rank + 1, candidate.phrase, candidate.distance);
    }
}

fn format_candidates(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .map(|c| format!("{}({})", c.phrase, c.distance))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Serialization error: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handmorse::types::LexiconConfig;

    fn small_pipeline() -> Pipeline {
        let config = PipelineConfig {
            lexicon: LexiconConfig {
                base_words: vec!["LOVE".to_string(), "MOVE".to_string(), "HELP".to_string()],
                max_phrase_len: 1,
            },
            ..PipelineConfig::default()
        };
        Pipeline::new(config).unwrap()
    }

    #[test]
    fn test_top_candidates_listed() {
        let args = Args::parse_from(["handmorse", "--top", "2"]);
        let top = top_candidates(&small_pipeline(), &[0, 1, 0, 0, 1, 1, 1, 0, 0, 0, 1, 0], &args).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].phrase, "LOVE");
    }

    #[test]
    fn test_top_candidates_propagates_reason() {
        let args = Args::parse_from(["handmorse", "--top", "3"]);
        assert_eq!(
            top_candidates(&small_pipeline(), &[], &args).unwrap_err(),
            ReasonCode::R201_NO_SIGNAL
        );
        assert_eq!(
            top_candidates(&small_pipeline(), &[0, 2], &args).unwrap_err(),
            ReasonCode::R204_INVALID_BIT
        );
    }

    #[test]
    fn test_top_candidates_without_flag() {
        let args = Args::parse_from(["handmorse"]);
        assert!(top_candidates(&small_pipeline(), &[], &args).unwrap().is_empty());
    }

    #[test]
    fn test_huge_top_is_bounded() {
        let args = Args::parse_from(["handmorse", "--top", "18446744073709551615"]);
        let top = top_candidates(&small_pipeline(), &[1], &args).unwrap();
        assert_eq!(top.len(), 3);
    }
}
