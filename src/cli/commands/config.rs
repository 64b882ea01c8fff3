use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Inspect the configuration file.
pub fn handle(cmd: &Commands, _cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            let path = Config::config_file();
            match std::fs::read_to_string(&path) {
                Ok(content) => print!("{}", content),
                Err(_) => info(format!("No config file at {:?} (defaults in use).", path)),
            }
        }

        if *check {
            let problems = Config::check();
            if problems.is_empty() {
                success("Configuration looks good.");
            } else {
                for p in problems {
                    warning(p);
                }
            }
        }
    }

    Ok(())
}
