use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::auth::Session;

pub const SESSION_FILE: &str = "session.json";
pub const SCRAPE_FILE: &str = "scrape.json";

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("LIVEASE_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("livease").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_session() -> anyhow::Result<Session> {
    Ok(Session::load(&get_config_dir()?.join(SESSION_FILE))?)
}

pub fn save_session(session: &Session) -> anyhow::Result<()> {
    Ok(session.save(&get_config_dir()?.join(SESSION_FILE))?)
}

pub fn clear_session() -> anyhow::Result<()> {
    Ok(Session::clear(&get_config_dir()?.join(SESSION_FILE))?)
}

/// Raw rows from the last `scrape run`, kept for `scrape upload`
pub fn load_scrape_results() -> anyhow::Result<Vec<Value>> {
    let file = get_config_dir()?.join(SCRAPE_FILE);
    if !file.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(file)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_scrape_results(rows: &[Value]) -> anyhow::Result<()> {
    let file = get_config_dir()?.join(SCRAPE_FILE);
    fs::write(file, serde_json::to_string_pretty(rows)?)?;
    Ok(())
}
