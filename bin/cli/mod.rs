use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Dfac {
    /// Enable verbose logging
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub verbose: bool,
    /// Turn on debugging information
    #[arg(short, long, global = true)]
    pub debug: bool,
    /// Directory containing the `<name>.json` automaton descriptions
    #[arg(long, global = true, default_value = ".")]
    pub dir: PathBuf,
    /// JSON file overriding parts of the drawing style
    #[arg(long, global = true)]
    pub style: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Draws an automaton and its complement as SVG files")]
    Render {
        name: String,
        /// Directory to write `<name>.svg` and `<name>-complement.svg` to
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    #[command(about = "Tests strings on an automaton and its complement")]
    Test { name: String, inputs: Vec<String> },
    #[command(about = "Prints the transition tables of an automaton and its complement")]
    Show { name: String },
    #[command(about = "Prints an automaton (or its complement) in graphviz DOT format")]
    Dot {
        name: String,
        #[arg(short, long)]
        complement: bool,
        /// File to write to, stdout if absent
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also render a PNG through graphviz (needs the `graphviz` feature)
        #[arg(long)]
        png: Option<PathBuf>,
    },
}
