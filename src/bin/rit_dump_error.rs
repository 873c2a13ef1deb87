use log::{error, info};
use rit_utils::{hexdump, DumpOutcome, RitConfig, SectionCatalog};

fn run(config: &RitConfig) -> rit_utils::Result<()> {
    let catalog = SectionCatalog::from_config(config)?;
    match hexdump::format_dumps(config, &catalog)? {
        DumpOutcome::Written { path, blocks } => {
            info!("{} regions dumped to {}", blocks, path.display())
        }
        DumpOutcome::NamesExhausted { tried } => {
            println!("no free output name among {} candidates", tried.len())
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("start......");
    if let Err(e) = run(&RitConfig::default()) {
        error!("{}", e);
        println!("Unexpected error");
    }
}
