//! One-shot exporter for pretrained face recognition networks.
//!
//! Running with no arguments fetches the "vggface2" network and writes its
//! traced inference graph to `vggface2.pt` in the current directory.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "facegraph",
    version,
    about = "Export pretrained face recognition networks as portable typed graph artifacts"
)]
struct Cli {
    /// Raise log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Pretrained-weights identifier
    #[arg(long, default_value = facegraph_zoo::VGGFACE2.id, global = true)]
    model: String,

    /// Artifact path (defaults to <model>.pt in the current directory)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Where downloaded networks are cached
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Reload an exported artifact and replay a synthetic input through it
    Check,
}

fn main() {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&cli) {
        log::error!("{e:?}");
        std::process::exit(1)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let spec = facegraph_zoo::lookup(&cli.model)?;
    let output = cli.output.clone().unwrap_or_else(|| PathBuf::from(spec.artifact_name()));
    match cli.command {
        Some(Cmd::Check) => {
            let shape = facegraph_export::verify_artifact(&output, spec)?;
            log::info!("{output:?} maps {:?} to {shape:?}", spec.input_shape);
        }
        None => {
            let cache_dir = match &cli.cache_dir {
                Some(dir) => dir.clone(),
                None => facegraph_zoo::default_cache_dir()?,
            };
            let network = facegraph_zoo::fetch(spec, &cache_dir)?;
            facegraph_export::export(spec, &network, &output)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }
}
