//! Command-line entry point for the voice practice grader.
//!
//! # Startup sequence
//!
//! 1. Initialise logging (`RUST_LOG`, default `info`).
//! 2. Parse the command line.
//! 3. Load [`AppConfig`] from disk (defaults on first run or parse failure).
//! 4. Dispatch:
//!    * `compare`: grade a transcript against a reference, no audio.
//!    * `practice`: transcribe a clip with the configured command, grade it
//!      against one page of a lesson, record history.  Runs on a small
//!      [`tokio`] runtime.
//!    * `transcribe`: dictation; transcribe a clip and record the plain
//!      transcript.
//!    * `history`: list, summarise or clear stored attempts.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::style::{StyledContent, Stylize};

use voice_practice::{
    compare::{
        accuracy_line, error_summary, highlight_segments, AccuracyGrade, ComparisonResult,
        ComparisonSummary, SegmentStyle, TextComparator,
    },
    config::{language_label, AppConfig, AppPaths, DisplayConfig},
    history::HistoryManager,
    practice::{group_pages, split_into_paragraphs, PracticeSession, PARAGRAPHS_PER_PAGE},
    stt::CommandTranscriber,
};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare a transcript with a reference text
    Compare {
        /// Reference text, or @path to read it from a file
        reference: String,

        /// Transcribed text, or @path to read it from a file
        transcript: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Transcribe a recording and grade it against a lesson page
    Practice {
        /// Lesson text, or @path to read it from a file
        #[arg(short, long)]
        reference: String,

        /// Recorded clip passed to the transcriber
        #[arg(short, long)]
        audio: PathBuf,

        /// Lesson title used in history
        #[arg(short, long, default_value = "Lesson")]
        title: String,

        /// Page to grade (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Recording length in seconds stored with the attempt
        #[arg(short, long)]
        duration: Option<String>,
    },

    /// Transcribe a recording and save the text to history
    Transcribe {
        /// Recorded clip passed to the transcriber
        #[arg(short, long)]
        audio: PathBuf,

        /// Recording length in seconds stored with the entry
        #[arg(short, long)]
        duration: Option<String>,
    },

    /// Show or clear practice history
    History {
        /// Print totals instead of entries
        #[arg(long)]
        stats: bool,

        /// Delete all stored history
        #[arg(long)]
        clear: bool,
    },
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let paths = AppPaths::new();

    let config = AppConfig::load_from(&paths.settings_file).unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e:#}); using defaults");
        AppConfig::default()
    });

    match cli.command {
        Command::Compare {
            reference,
            transcript,
            json,
        } => {
            let reference = read_text_arg(&reference)?;
            let transcript = read_text_arg(&transcript)?;
            let result = TextComparator::new().compare(&reference, &transcript);

            if json {
                let summary = ComparisonSummary::from(&result);
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_report(&result, &config.display);
            }
        }

        Command::Practice {
            reference,
            audio,
            title,
            page,
            duration,
        } => {
            let reference = read_text_arg(&reference)?;
            run_practice(&config, &paths, &reference, audio, &title, page, duration)?;
        }

        Command::Transcribe { audio, duration } => {
            run_transcribe(&config, &paths, audio, duration)?;
        }

        Command::History { stats, clear } => {
            let mut history = HistoryManager::with_path(paths.history_file.clone());
            if clear {
                history.clear_all()?;
                println!("History cleared.");
            } else if stats {
                print_stats(&history);
            } else {
                print_history(&history);
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

fn run_practice(
    config: &AppConfig,
    paths: &AppPaths,
    reference: &str,
    audio: PathBuf,
    title: &str,
    page: usize,
    duration: Option<String>,
) -> Result<()> {
    let pages = group_pages(&split_into_paragraphs(reference), PARAGRAPHS_PER_PAGE);
    let Some(page) = page.checked_sub(1).and_then(|i| pages.get(i)) else {
        bail!("page {page} out of range (lesson has {} pages)", pages.len());
    };

    println!(
        "{} {} · {} words · ~{}s · {}",
        title.bold(),
        page.range_label(),
        page.word_count,
        page.reading_time_secs(),
        config.practice.language_label()
    );

    let mut session = build_session(config, paths, duration);
    let attempt = runtime()?.block_on(session.attempt(title, page, audio))?;
    session.save_history()?;

    println!("Heard: {}", attempt.transcript.as_str().italic());
    print_report(&attempt.result, &config.display);
    Ok(())
}

fn run_transcribe(
    config: &AppConfig,
    paths: &AppPaths,
    audio: PathBuf,
    duration: Option<String>,
) -> Result<()> {
    let mut session = build_session(config, paths, duration);
    let transcript = runtime()?.block_on(session.dictate(audio))?;
    session.save_history()?;

    println!("{transcript}");
    Ok(())
}

/// Session on the configured transcriber, recording history when enabled.
fn build_session(
    config: &AppConfig,
    paths: &AppPaths,
    duration: Option<String>,
) -> PracticeSession {
    let transcriber = Arc::new(CommandTranscriber::from_config(&config.stt));
    let mut session = PracticeSession::new(transcriber, &config.practice);
    if let Some(value) = duration {
        session.set_duration(config.practice.validate_duration(&value));
    }
    if config.history.enabled {
        session = session.with_history(HistoryManager::with_path(paths.history_file.clone()));
    }
    session
}

// Transcription is the only slow step; two workers are plenty.
fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")
}

fn print_history(history: &HistoryManager) {
    let entries = history.load_all();
    if entries.is_empty() {
        println!("No history yet.");
        return;
    }
    for entry in entries {
        println!(
            "{}  {}  {:>3}s  {}",
            entry.timestamp.format("%Y-%m-%d %H:%M").to_string().dark_grey(),
            entry.language,
            entry.duration_secs,
            entry.text
        );
    }
}

fn print_stats(history: &HistoryManager) {
    let stats = history.stats();
    println!("Entries:  {}", stats.total);
    println!("Duration: {}s", stats.total_duration_secs);
    for (code, count) in &stats.languages {
        println!("  {:<10} {}", language_label(code), count);
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Highlighted reference, graded accuracy line, then the error list.
fn print_report(result: &ComparisonResult, display: &DisplayConfig) {
    println!();
    println!("{}", highlighted_reference(result, display.max_display_words));
    println!();

    let grade = AccuracyGrade::with_thresholds(
        result.accuracy,
        display.success_threshold,
        display.warning_threshold,
    );
    println!("{}", grade_style(accuracy_line(result), grade).bold());

    let summary = error_summary(result, display.max_listed_errors);
    if !summary.is_empty() {
        println!("{summary}");
    }
}

/// Reference words coloured by verdict, cut after `max_words` words.
fn highlighted_reference(result: &ComparisonResult, max_words: usize) -> String {
    let mut out = String::new();
    let mut words = 0;

    for segment in highlight_segments(result) {
        match segment.style {
            SegmentStyle::Plain => out.push_str(&segment.text),
            SegmentStyle::Correct | SegmentStyle::Error if words == max_words => {
                out.push_str("...");
                break;
            }
            SegmentStyle::Correct => {
                words += 1;
                out.push_str(&segment.text.green().to_string());
            }
            SegmentStyle::Error => {
                words += 1;
                out.push_str(&segment.text.red().bold().to_string());
            }
        }
    }
    out
}

fn grade_style(text: String, grade: AccuracyGrade) -> StyledContent<String> {
    match grade {
        AccuracyGrade::Good => text.green(),
        AccuracyGrade::Fair => text.yellow(),
        AccuracyGrade::Poor => text.red(),
    }
}

/// `@path` reads the file, anything else is taken literally.
fn read_text_arg(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("reading {path}"))
        }
        None => Ok(arg.to_string()),
    }
}
