//! sectcopy: list, show and copy heading-delimited markdown sections.
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use sectcopy::copy::{ManualHandoff, SystemCopyProtocol};
use sectcopy::highlight::{self, Highlighter, PlainHighlighter, SyntectHighlighter};
use sectcopy::input;
use sectcopy::{config, logging, serialize, Depth, Section};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

/// Horizontal rule framing text handed over for manual copying.
const RULE: &str = "────────────────────────────────────────";

#[derive(Parser)]
#[command(name = "sectcopy")]
#[command(about = "Split markdown into sections and copy them out", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Heading depth that starts a new section (1-3), overriding sectcopy.toml
    #[arg(long, short = 'd', global = true, value_name = "N")]
    depth: Option<Depth>,

    /// Log parsing and copy-tier decisions to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List the sections of a document
    List {
        /// Markdown file, or `-` for standard input
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        /// Emit section summaries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one section as markdown
    Show {
        /// Zero-based section index, as shown by `list`
        index: usize,

        /// Markdown file, or `-` for standard input
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        /// Do not syntax highlight code blocks
        #[arg(long)]
        plain: bool,
    },
    /// Copy one section, or one of its code blocks, to the clipboard
    Copy {
        /// Zero-based section index, as shown by `list`
        index: usize,

        /// Markdown file, or `-` for standard input
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        /// Copy the section's Nth code block (zero-based) instead of the whole section
        #[arg(long, short = 'c', value_name = "N")]
        code: Option<usize>,

        /// With --code, copy the bare body without fences
        #[arg(long, requires = "code")]
        body: bool,
    },
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);
    let cfg = config::Config::load();

    let depth = match args.depth {
        Some(depth) => depth,
        None => cfg
            .depth()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?,
    };

    match args.command {
        Command::List { path, json } => {
            let sections = input::extract_sections(path.as_deref(), depth)?;
            if json {
                print_json(&sections)
            } else {
                print_list(&sections)
            }
        }
        Command::Show { index, path, plain } => {
            let sections = input::extract_sections(path.as_deref(), depth)?;
            let section = select_section(&sections, index)?;
            let highlighter = pick_highlighter(&cfg, plain);
            println!("{}", highlight::render_section(section, highlighter.as_ref()));
            Ok(())
        }
        Command::Copy {
            index,
            path,
            code,
            body,
        } => {
            let sections = input::extract_sections(path.as_deref(), depth)?;
            let section = select_section(&sections, index)?;
            let text = copy_text(section, code, body)?;

            let mut protocol = SystemCopyProtocol::from_config(&cfg);
            let outcome = protocol.copy_then(&text, present_manual_copy, || {
                eprintln!("Marked as copied.");
            });
            eprintln!("{}: {outcome}", section.title());
            Ok(())
        }
    }
}

fn select_section(sections: &[Section], index: usize) -> io::Result<&Section> {
    sections.get(index).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "section {index} does not exist ({} sections found)",
                sections.len()
            ),
        )
    })
}

fn copy_text(section: &Section, code: Option<usize>, body: bool) -> io::Result<String> {
    let Some(code_index) = code else {
        return Ok(serialize::to_markdown(section));
    };
    let block = section.code_blocks().nth(code_index).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "section {} has no code block {code_index} ({} found)",
                section.index,
                section.code_blocks().count()
            ),
        )
    })?;
    Ok(if body {
        block.body.clone()
    } else {
        block.to_markdown()
    })
}

fn pick_highlighter(cfg: &config::Config, plain: bool) -> Box<dyn Highlighter> {
    if plain || !cfg.highlight || !io::stdout().is_terminal() {
        return Box::new(PlainHighlighter);
    }
    match SyntectHighlighter::new(&cfg.theme) {
        Some(highlighter) => Box::new(highlighter),
        None => Box::new(PlainHighlighter),
    }
}

fn print_list(sections: &[Section]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for section in sections {
        let heading = match section.heading_descriptor() {
            Some((level, text)) => format!("{} {text}", "#".repeat(level)),
            None => section.title().to_string(),
        };
        writeln!(stdout, "{:>3}  {:<24}  {heading}", section.index, section.id)?;
    }
    Ok(())
}

fn print_json(sections: &[Section]) -> io::Result<()> {
    let summaries: Vec<_> = sections.iter().map(Section::summary).collect();
    let json = serde_json::to_string_pretty(&summaries).map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}

/// Shows the text for the user to copy by hand and waits for them to confirm.
fn present_manual_copy(handoff: ManualHandoff) {
    println!("{RULE}\n{}\n{RULE}", handoff.text());
    eprint!("Clipboard unavailable. Copy the text above, then press Enter. ");
    let _ = io::stderr().flush();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(n) if n > 0 => handoff.acknowledge(),
        Ok(_) => tracing::debug!("no acknowledgement, input closed"),
        Err(e) => tracing::debug!("no acknowledgement: {e}"),
    }
}
