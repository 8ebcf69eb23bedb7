//! `config show|get|set`.

use owo_colors::OwoColorize;

use crate::config::{CONFIG_KEYS, Config};
use crate::error::{Result, TriageError};

pub fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;

    let mut text_output = String::new();
    text_output.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));

    for key in CONFIG_KEYS {
        let value = config
            .get_value(key)?
            .unwrap_or_else(|| "not configured".dimmed().to_string());
        text_output.push_str(&format!("  {}: {}\n", key.cyan(), value));
    }

    text_output.push_str(&format!(
        "\n{}: {}\n",
        "config_file".cyan(),
        Config::config_path()?.display()
    ));

    print!("{text_output}");
    Ok(())
}

pub fn cmd_config_get(key: &str) -> Result<()> {
    let config = Config::load()?;
    match config.get_value(key)? {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => Err(TriageError::Config(format!("{key} is not set"))),
    }
}

pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set_value(key, value)?;
    config.save()?;

    let shown = config.get_value(key)?.unwrap_or_default();
    println!("Set {} = {}", key.cyan(), shown);
    Ok(())
}
