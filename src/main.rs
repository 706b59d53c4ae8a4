mod cli;

use env_logger::Env;
use rusty_varconsensus as lib;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli_options = cli::Command::parse();
    rayon::ThreadPoolBuilder::new()
        .num_threads(cli_options.cores())
        .build_global()?;
    lib::run(&cli_options.config())?;
    Ok(())
}
