//! Startup configuration loaded from `config.yaml`.
//! Every key is required; a missing key aborts startup.

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSection,
    pub data: DataSection,
    pub map: MapSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataSection {
    pub url: String,
    pub max_rows: usize,
    pub cache_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapSection {
    pub default_location: MapLocation,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MapLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u32,
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_YAML: &str = r#"
app:
  title: "Test Dashboard"
data:
  url: "http://example.com/data.csv"
  max_rows: 100
  cache_capacity: 2
map:
  default_location:
    latitude: 40.7
    longitude: -74.0
    zoom: 11
"#;

    #[test]
    fn parses_complete_config() {
        let config: AppConfig = serde_yaml::from_str(SAMPLE_YAML).unwrap();
        assert_eq!(config.app.title, "Test Dashboard");
        assert_eq!(config.data.max_rows, 100);
        assert_eq!(config.data.cache_capacity, 2);
        assert_eq!(config.map.default_location.zoom, 11);
    }

    #[test]
    fn missing_key_is_rejected() {
        let yaml = "app:\n  title: \"Test\"\n";
        assert!(serde_yaml::from_str::<AppConfig>(yaml).is_err());
    }

    #[test]
    fn shipped_config_parses() {
        let config = AppConfig::load(Path::new("config.yaml")).unwrap();
        assert!(config.data.max_rows > 0);
    }
}
