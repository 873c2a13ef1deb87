use log::{error, info};
use rit_utils::{capture, RitConfig};
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Get path to the memory image
    let image = match std::env::args().nth(1) {
        Some(a) => a,
        None => {
            println!("usage: rit_capture <memory image>");
            return;
        }
    };

    match capture::capture_regions(&RitConfig::default(), Path::new(&image)) {
        Ok(dumps) => info!("error dump done, {} regions", dumps.len()),
        Err(e) => {
            error!("{}", e);
            println!("Unexpected error");
        }
    }
}
