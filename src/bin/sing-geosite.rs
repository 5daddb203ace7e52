//! sing-geosite: generate sing-box rule-sets from the latest V2Ray geosite.dat release.

use std::path::PathBuf;

use clap::Parser;
use log::info;
use sing_geosite::{generate_from_file, release, Config, RunOutcome};

#[derive(Parser)]
#[command(name = "sing-geosite")]
#[command(version)]
#[command(about = "Convert V2Ray geosite.dat into sing-box source rule-sets", long_about = None)]
struct Cli {
    /// Upstream repository publishing geosite.dat (owner/name)
    #[arg(long)]
    source: Option<String>,

    /// Repository publishing the generated rule-sets (owner/name)
    #[arg(long)]
    destination: Option<String>,

    /// Output directory, replaced on every run
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Regenerate even if the destination release is up to date
    #[arg(long)]
    no_skip: bool,

    /// Number of writer threads
    #[arg(short, long)]
    workers: Option<usize>,

    /// Convert a local geosite.dat instead of fetching a release
    #[arg(short, long)]
    input: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = build_config(&cli);

    if let Err(e) = run(&cli, &config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_config(cli: &Cli) -> Config {
    let mut config = Config::from_env();
    if let Some(ref source) = cli.source {
        config = config.with_source(source.as_str());
    }
    if let Some(ref destination) = cli.destination {
        config = config.with_destination(destination.as_str());
    }
    if let Some(ref output) = cli.output {
        config = config.with_output_dir(output);
    }
    if let Some(workers) = cli.workers {
        config = config.with_workers(workers);
    }
    if cli.no_skip {
        config = config.with_no_skip(true);
    }
    config
}

fn run(cli: &Cli, config: &Config) -> sing_geosite::Result<()> {
    if let Some(ref input) = cli.input {
        generate_from_file(input, &config.output_dir, config.workers)?;
        return Ok(());
    }

    match release(config)? {
        RunOutcome::Generated(count) => info!("Generated {} rule-sets", count),
        RunOutcome::AlreadyLatest => {}
    }
    Ok(())
}
