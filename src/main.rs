use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use marknote::{
    add_note,
    util::{expand_home, parse_path},
    ConceptOutcome, Request,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, about, version)]
struct Cli {
    /// Path to the note file, copied as-is
    #[arg(long)]
    src: PathBuf,

    /// Destination inside the site, e.g. notes/my-note.html
    #[arg(long)]
    dest: PathBuf,

    /// Title shown in the readme notes list
    #[arg(long)]
    title: String,

    /// Text file whose contents are added to the readme under Concepts
    #[arg(long)]
    concept_file: Option<PathBuf>,

    /// The root of the site the note is added to
    #[arg(short, long, env = "MARKNOTE_ROOT", default_value = ".")]
    #[clap(value_parser = parse_path)]
    root: PathBuf,

    /// Readme to update, relative to the site root
    #[arg(long, env = "MARKNOTE_README", default_value = "README.md")]
    readme: PathBuf,

    /// Date recorded with the entry (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Show the readme changes without copying or writing anything
    #[arg(long)]
    dry_run: bool,

    /// More log output, repeatable
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn run(args: Cli) -> anyhow::Result<()> {
    let request = Request {
        src: expand_home(&args.src),
        dest: args.dest,
        title: args.title,
        concept_file: args.concept_file.as_deref().map(expand_home),
        root: args.root,
        readme: args.readme,
        date: args.date.unwrap_or_else(|| Local::now().date_naive()),
        dry_run: args.dry_run,
    };

    let outcome = add_note(&request).with_context(|| {
        format!("could not add {} to the site", request.src.display())
    })?;

    if let Some(preview) = outcome.preview {
        println!("Dry run, nothing copied or written. Changes to {}:", outcome.readme.display());
        print!("{preview}");
        return Ok(());
    }

    println!("Copied {} -> {}", request.src.display(), outcome.copied_to.display());
    println!("Appended entry to README under Notes");
    if outcome.concept == ConceptOutcome::Appended {
        println!("Appended concept to README under Concepts");
    }
    println!("\nDone. To publish, commit the new file and push.");
    Ok(())
}

fn main() -> ExitCode {
    let args = Cli::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
