// Tabula: step-through LL(1) parser for a parenthesized lambda language

use std::fs;
use std::io;
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use tabula::constants::SNAPSHOT_MEMORY_LIMIT;
use tabula::parser::parse_source;
use tabula::samples::run_samples;
use tabula::session::ParseSession;
use tabula::ui::App;

/// What the command line asked for
enum Command {
    File { path: String, print: bool },
    Inline { source: String, print: bool },
    Samples,
}

fn parse_args(args: &[String]) -> Option<Command> {
    let mut print = false;
    let mut samples = false;
    let mut inline = None;
    let mut path = None;

    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--print" => print = true,
            "--samples" => samples = true,
            "-e" => inline = Some(rest.next()?.clone()),
            flag if flag.starts_with('-') => return None,
            file => {
                if path.replace(file.to_string()).is_some() {
                    return None;
                }
            }
        }
    }

    match (samples, inline, path) {
        (true, None, None) if !print => Some(Command::Samples),
        (false, Some(source), None) => Some(Command::Inline { source, print }),
        (false, None, Some(path)) => Some(Command::File { path, print }),
        _ => None,
    }
}

fn usage(program_name: &str) -> ! {
    eprintln!("Usage: {} [--print] <file>", program_name);
    eprintln!("       {} [--print] -e <expr>", program_name);
    eprintln!("       {} --samples", program_name);
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} -e '(≜ f (λ x (+ x 1)) (f 41))'", program_name);
    eprintln!("  {} --print program.lam     # print the AST, no TUI", program_name);
    eprintln!("  {} --samples               # run the built-in samples", program_name);
    std::process::exit(1);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("tabula");

    let command = match parse_args(&args) {
        Some(command) => command,
        None => usage(program_name),
    };

    let (source, print) = match command {
        Command::Samples => {
            let reports = run_samples();
            let failed = reports.iter().filter(|r| !r.passed()).count();
            for report in &reports {
                println!("{}", report);
            }
            eprintln!("{} samples, {} failed", reports.len(), failed);
            if failed > 0 {
                std::process::exit(1);
            }
            return Ok(());
        }
        Command::Inline { source, print } => (source, print),
        Command::File { path, print } => {
            if !Path::new(&path).exists() {
                eprintln!("Error: File '{}' not found", path);
                usage(program_name);
            }
            eprintln!("Reading {}...", path);
            (fs::read_to_string(&path)?, print)
        }
    };

    if print {
        match parse_source(&source) {
            Ok(node) => {
                println!("{}", node);
                for line in node.tree_lines() {
                    println!("{}", line);
                }
                return Ok(());
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    eprintln!("Parsing...");
    let session = ParseSession::trace(&source, SNAPSHOT_MEMORY_LIMIT);
    match session.outcome() {
        Ok(node) => eprintln!("Parsed successfully: {}", node),
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Entering TUI with partial parse history...");
        }
    }
    eprintln!("Total snapshots: {}", session.total_snapshots());
    if session.is_truncated() {
        eprintln!("Warning: snapshot memory limit reached, history is incomplete");
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
