use std::path::Path;

use anyhow::Context;
use dfa_complement::{Dfa, Style};

pub fn to_file_or_stdout(maybe_file_name: Option<&Path>, output: &str) -> anyhow::Result<()> {
    if let Some(file_name) = maybe_file_name {
        tracing::debug!("writing output to {}", file_name.display());
        std::fs::write(file_name, output)
            .with_context(|| format!("could not write {}", file_name.display()))
    } else {
        println!("{output}");
        Ok(())
    }
}

pub fn read_style(maybe_file_name: Option<&Path>) -> anyhow::Result<Style> {
    match maybe_file_name {
        Some(f) => {
            let json = std::fs::read_to_string(f)
                .with_context(|| format!("could not read style file {}", f.display()))?;
            Style::from_json(&json).with_context(|| format!("invalid style in {}", f.display()))
        }
        None => {
            tracing::debug!("no style file given, using the default style");
            Ok(Style::default())
        }
    }
}

#[cfg(feature = "graphviz")]
pub fn write_png(dfa: &Dfa, file_name: &Path) -> anyhow::Result<()> {
    use dfa_complement::ToDot;

    let png = dfa.render_png().context("could not run graphviz")?;
    tracing::debug!("writing png to {}", file_name.display());
    std::fs::write(file_name, png).with_context(|| format!("could not write {}", file_name.display()))
}

#[cfg(not(feature = "graphviz"))]
pub fn write_png(_dfa: &Dfa, file_name: &Path) -> anyhow::Result<()> {
    anyhow::bail!(
        "cannot write {}, dfac was built without the `graphviz` feature",
        file_name.display()
    )
}
