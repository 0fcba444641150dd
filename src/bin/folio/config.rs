use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use folio::config::{read_config, Config};

use crate::config_data::SAMPLE_CFG;
use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    if let Some(exe_dir) = env::current_exe().ok().and_then(|p| p.parent().map(PathBuf::from)) {
        if exe_dir.join(CFG_FILE_NAME).exists() {
            return Some(exe_dir.join(CFG_FILE_NAME));
        }
    }

    if let Ok(cur_dir) = env::current_dir() {
        if cur_dir.join(CFG_FILE_NAME).exists() {
            return Some(cur_dir.join(CFG_FILE_NAME));
        }
    }

    let cfg_dir = dirs::config_dir()?;
    if cfg_dir.join(CFG_FILE_NAME).exists() {
        return Some(cfg_dir.join(CFG_FILE_NAME));
    }

    None
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = match cfg_path.or_else(get_config_path) {
        None => return Err(anyhow!("Could not find Folio configuration")),
        Some(x) => x,
    };

    println!("Reading config from {}", config_path.display());
    let mut config = read_config(&config_path)?;

    if let Some(mut log) = config.log {
        if log.location.is_none() {
            log.location = dirs::cache_dir().map(|d| d.join("Folio").join("log").join("server.log"));
        }
        match log.location {
            Some(ref location) => println!("Log enabled. Files will be written in {}", location.display()),
            None => println!("Log enabled. No cache dir found, using the console"),
        }
        config.log = Some(log);
    } else {
        println!("Log disabled. Using stdout");
    }

    Ok(config)
}

pub(crate) fn write_sample_cfg(config_path: Option<PathBuf>) -> Result<PathBuf> {
    let path = match config_path {
        Some(path) => path,
        None => dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not find user config dir"))?
            .join(CFG_FILE_NAME),
    };

    std::fs::write(&path, SAMPLE_CFG)
        .with_context(|| format!("Error writing sample configuration to {}", path.display()))?;
    Ok(path)
}
