use crate::config::Config;
use crate::display::{print_info, print_success, print_warning};
use crate::storage::FileCredentialStore;
use crate::{ConfigCommands, Result};
use flowmart_api::CredentialStore;

/// Handles the `config` command. Never touches the network.
pub fn handle(action: ConfigCommands, config: &mut Config) -> Result<()> {
    match action {
        ConfigCommands::Show => handle_show(config),
        ConfigCommands::Get { key } => handle_get(&key, config),
        ConfigCommands::Set { key, value } => handle_set(&key, &value, config),
        ConfigCommands::Unset { key } => handle_unset(&key, config),
        ConfigCommands::Path => {
            println!("{}", config.config_path.display());
            Ok(())
        }
    }
}

fn handle_show(config: &Config) -> Result<()> {
    println!("Configuration file: {}", config.config_path.display());
    let content = config.show_config();
    if content.trim().is_empty() {
        print_info("No settings stored; built-in defaults apply.");
    } else {
        println!("\n{}", content);
    }

    let logged_in = FileCredentialStore::new(config.credentials_path())
        .get()
        .is_some();
    println!("Session: {}", if logged_in { "logged in" } else { "logged out" });
    Ok(())
}

fn handle_get(key: &str, config: &Config) -> Result<()> {
    match config.get_value(key)? {
        Some(value) => println!("{}", value),
        None => print_warning(&format!("{} is not set", key)),
    }
    Ok(())
}

fn handle_set(key: &str, value: &str, config: &mut Config) -> Result<()> {
    config.set_value(key, value)?;
    config.save()?;
    print_success(&format!("Set {}", key));
    Ok(())
}

fn handle_unset(key: &str, config: &mut Config) -> Result<()> {
    config.unset_value(key)?;
    config.save()?;
    print_success(&format!("Unset {}", key));
    Ok(())
}
