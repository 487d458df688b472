use anyhow::Result;
use cap_std::fs::Dir;
use serde::Deserialize;
use toml::from_str;
use url::Url;

/// Deployment settings read from `config.toml` in the data directory.
///
/// Every section has defaults matching the bundled directory, so the file is
/// optional and may also be partial.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub remote: Remote,
    pub dial: Dial,
    pub supervisor: Supervisor,
}

impl Config {
    pub fn read(dir: &Dir) -> Result<Self> {
        let val = match dir.read_to_string("config.toml") {
            Ok(text) => from_str(&text)?,
            Err(_) => Default::default(),
        };

        Ok(val)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Remote {
    /// Base URL the candidate paths are joined against. Without it, the
    /// remote refresh is skipped entirely.
    pub base_url: Option<Url>,
    /// Tried in sequence until one returns a successful response. Paths
    /// ending in `.html` are treated as the HTML fallback document.
    pub paths: Vec<String>,
}

impl Default for Remote {
    fn default() -> Self {
        Self {
            base_url: None,
            paths: vec!["csv-data.html".to_owned(), "list.csv".to_owned()],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Dial {
    /// Outside line, pause and PBX access code dialled before internal
    /// extensions.
    pub pbx_prefix: String,
}

impl Default for Dial {
    fn default() -> Self {
        Self {
            pbx_prefix: "+3251610764,99,".to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Supervisor {
    /// Gates the mutating UI only. This is not access control: the code is
    /// distributed with the application and anyone can read it here.
    pub passcode: String,
}

impl Default for Supervisor {
    fn default() -> Self {
        Self {
            passcode: "1302".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = from_str::<Config>("[supervisor]\npasscode = \"4711\"\n").unwrap();

        assert_eq!(config.supervisor.passcode, "4711");
        assert_eq!(config.dial.pbx_prefix, "+3251610764,99,");
        assert_eq!(config.remote.paths, ["csv-data.html", "list.csv"]);
        assert!(config.remote.base_url.is_none());
    }
}
