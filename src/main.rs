use blockplan::{init_logging, parse_script, Config, Session, BUILD_DATE, VERSION};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blockplan", about = "Replay a floorplan editing script and export the result")]
pub struct Cli {
    #[arg(help = "Script with one editor command per line.", required = true)]
    script: PathBuf,

    #[arg(help = "Configuration file (.toml or .json).", long)]
    config: Option<PathBuf>,

    #[arg(help = "Directory for exported images.", long)]
    out: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load_or_default(&Config::default_path()?)?,
    };
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    tracing::info!("BlockPlan {} ({})", VERSION, BUILD_DATE);

    let config = load_config(cli.config.as_ref())?;
    let text = std::fs::read_to_string(&cli.script)?;
    let commands = parse_script(&text)?;

    let mut session = Session::from_config(&config)?;
    if let Some(out) = cli.out {
        session = session.with_output_dir(out);
    }
    for line in session.run(&commands)? {
        println!("{line}");
    }

    Ok(())
}
