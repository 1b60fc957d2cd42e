use clap::Subcommand;
use focusloop_core::storage::{Config, Database};
use focusloop_core::{ConfigPatch, EngineConfig, FocusEngine};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "timer.work_minutes", "auto_start.breaks")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

/// Everything the file can express, as a full patch for the engine.
fn patch_from(config: &EngineConfig) -> ConfigPatch {
    ConfigPatch {
        work_secs: Some(config.work_secs),
        short_break_secs: Some(config.short_break_secs),
        long_break_secs: Some(config.long_break_secs),
        long_break_interval: Some(config.long_break_interval),
        auto_start_breaks: Some(config.auto_start_breaks),
        auto_start_work: Some(config.auto_start_work),
        auto_start_delay_ms: Some(config.auto_start_delay_ms),
        notifications_enabled: Some(config.notifications_enabled),
    }
}

/// Push the file's settings into the persisted engine snapshot so the
/// next `timer` invocation starts from them.
fn apply_to_engine(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let engine_config = config.engine_config();
    let db = Database::open()?;
    let mut engine = FocusEngine::restore(Box::new(db), engine_config.clone());
    engine.update_settings(&patch_from(&engine_config));
    Ok(())
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_or_default();
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            apply_to_engine(&config)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = Config::load_or_default();
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            apply_to_engine(&config)?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
