use std::error::Error;

use wirecube::terminal::run_terminal;
use wirecube::SceneConfig;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {path}");
            SceneConfig::load_from_file(&path)?
        }
        None => SceneConfig::default(),
    };

    run_terminal(config)?;
    Ok(())
}
