use clap::Parser;
use dfa_complement::{canvas::Svg, run::Outcome, Directory, Loader, Renderer, Session, ToDot};
use owo_colors::OwoColorize;
use tracing::{debug, Level};

mod cli;
mod io;

use cli::{Commands, Dfac};

fn main() -> anyhow::Result<()> {
    let args = Dfac::parse();

    let level = if args.verbose {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let style = io::read_style(args.style.as_deref())?;
    debug!("looking for automata in {}", args.dir.display());
    let loader = Loader::new(Directory::new(&args.dir));
    let mut session = Session::new(
        loader,
        Renderer::new(style.clone()),
        Svg::new(style.width, style.height),
        Svg::new(style.width, style.height),
    );

    match args.command {
        Commands::Render { name, out } => {
            session.select(&name)?;
            std::fs::create_dir_all(&out)?;
            let original = out.join(format!("{name}.svg"));
            let complement = out.join(format!("{name}-complement.svg"));
            let documents = [
                (&original, session.original_canvas().document()),
                (&complement, session.complement_canvas().document()),
            ];
            for (path, svg) in &documents {
                io::to_file_or_stdout(Some(path.as_path()), svg)?;
            }
            println!("{}\n{}", original.display(), complement.display());
        }
        Commands::Test { name, inputs } => {
            session.select(&name)?;
            for input in inputs {
                let report = session.test(&input)?;
                let (original, complement) = report.statuses(&style);
                println!(
                    "{:<12}{}",
                    "original",
                    paint(&report.original, &original.message)
                );
                println!(
                    "{:<12}{}",
                    "complement",
                    paint(&report.complement, &complement.message)
                );
                debug!("{report}");
            }
        }
        Commands::Show { name } => {
            let loaded = session.select(&name)?;
            println!("{}\n{}", name.bold(), loaded.dfa);
            println!("{}\n{}", format!("{name} (complement)").bold(), loaded.complement);
        }
        Commands::Dot {
            name,
            complement,
            output,
            png,
        } => {
            let loaded = session.select(&name)?;
            let automaton = if complement {
                &loaded.complement
            } else {
                &loaded.dfa
            };
            io::to_file_or_stdout(output.as_deref(), &automaton.dot_representation())?;
            if let Some(png) = png {
                io::write_png(automaton, &png)?;
            }
        }
    }
    Ok(())
}

fn paint(outcome: &Outcome, message: &str) -> String {
    match outcome {
        Outcome::Accepted { .. } => message.bright_green().to_string(),
        Outcome::Rejected(_) | Outcome::AlphabetError(_) => message.red().to_string(),
    }
}
