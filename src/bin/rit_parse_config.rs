use log::error;
use rit_utils::{record, RitConfig, SectionCatalog};

fn run(config: &RitConfig) -> rit_utils::Result<()> {
    let catalog = SectionCatalog::from_config(config)?;
    record::write_record_file(config, &catalog)?;
    for region in &catalog {
        println!("{} {} {}", region.name, region.address_digits(), region.length);
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
