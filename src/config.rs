use crate::storage::Persistence;
use std::{env, net::SocketAddr, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/students.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub ephemeral: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            ephemeral: false,
        }
    }
}

impl Config {
    /// Reads `PORT`, `APP_DATA_PATH` and `APP_EPHEMERAL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(defaults.port);
        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);
        let ephemeral = lookup("APP_EPHEMERAL")
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false);

        Self {
            port,
            data_path,
            ephemeral,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn persistence(&self) -> Persistence {
        if self.ephemeral {
            Persistence::Ephemeral
        } else {
            Persistence::JsonFile(self.data_path.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("data/students.json"));
        assert!(matches!(config.persistence(), Persistence::JsonFile(_)));
    }

    #[test]
    fn bad_port_falls_back_to_default() {
        assert_eq!(config_from(&[("PORT", "not-a-port")]).port, 8080);
        assert_eq!(config_from(&[("PORT", "9001")]).port, 9001);
    }

    #[test]
    fn ephemeral_flag_selects_memory_store() {
        let config = config_from(&[("APP_EPHEMERAL", "TRUE"), ("APP_DATA_PATH", "/tmp/x.json")]);
        assert!(matches!(config.persistence(), Persistence::Ephemeral));
    }
}
