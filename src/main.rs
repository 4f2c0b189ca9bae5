//! spanstep CLI - step through a file's text interactively.
//!
//! Loads the file into a rope-backed host buffer, anchors the whole buffer
//! as the steppable span, and maps stdin commands to step operations.

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use spanstep::{DocumentId, EditHost, RopeHost, SessionRegistry, StepConfig, StepMsg};

/// Step through a file's text word-by-word or line-by-line
#[derive(Parser, Debug)]
#[command(name = "spanstep", version, about)]
struct CliArgs {
    /// File to step through
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Config file (YAML); defaults apply when omitted
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    spanstep::trace::init();
    let args = CliArgs::parse();

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let config = args
        .config
        .as_deref()
        .map(StepConfig::load)
        .unwrap_or_default();

    let mut host = RopeHost::from_text(&text);
    host.set_selection(0..host.len_chars());
    let mut registry = SessionRegistry::with_config(config);
    let doc = DocumentId::from(args.file.to_string_lossy().as_ref());

    println!("w: next word  b: previous word  l: next line  k: previous line  p: print  q: quit");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let msg = match line.trim() {
            "w" => StepMsg::NextWord,
            "b" => StepMsg::PrevWord,
            "l" => StepMsg::NextLine,
            "k" => StepMsg::PrevLine,
            "p" => {
                print_visible(&host);
                continue;
            }
            "q" => break,
            "" => continue,
            other => {
                eprintln!("unknown command: {other}");
                continue;
            }
        };
        match registry.step(&doc, &mut host, msg) {
            Ok(()) => {}
            Err(e) if e.is_precondition() => {
                eprintln!("{e}");
                continue;
            }
            Err(e) => return Err(e.into()),
        }
        // A clamped step issues no edit; only forward real mutations.
        let events = host.take_changes();
        if !events.is_empty() {
            registry.handle_change(&doc, &events);
        }
        print_visible(&host);
    }
    Ok(())
}

fn print_visible(host: &RopeHost) {
    let end = host.offset_to_position(host.len_chars());
    println!("{}", host.content());
    println!("-- visible through {}:{} --", end.line + 1, end.column);
}
