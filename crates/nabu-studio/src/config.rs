use std::path::PathBuf;

use nabu_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

/// Overrides the resource directory (shaders, textures).
pub const ASSETS_ENV: &str = "NABU_ASSETS";

/// Studio settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub title: String,
    pub size: (f64, f64),
    pub assets_dir: PathBuf,
    /// `env_logger` filter; `None` defers to `RUST_LOG`.
    pub log_filter: Option<String>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            title: "Nabu Studio".to_string(),
            size: (960.0, 540.0),
            assets_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/res")),
            log_filter: None,
        }
    }
}

impl StudioConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an environment lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup(ASSETS_ENV).filter(|d| !d.is_empty()) {
            config.assets_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.size.0, self.size.1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_bundled_resources() {
        let config = StudioConfig::from_lookup(|_| None);

        assert!(config.assets_dir.ends_with("res"));
        assert_eq!(config.size, (960.0, 540.0));
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn assets_dir_can_be_overridden() {
        let config = StudioConfig::from_lookup(|key| {
            (key == ASSETS_ENV).then(|| "/opt/nabu/res".to_string())
        });

        assert_eq!(config.assets_dir, PathBuf::from("/opt/nabu/res"));
    }

    #[test]
    fn empty_override_is_ignored() {
        let config = StudioConfig::from_lookup(|_| Some(String::new()));

        assert!(config.assets_dir.ends_with("res"));
    }

    #[test]
    fn runtime_config_carries_title_and_size() {
        let runtime = StudioConfig::default().runtime();

        assert_eq!(runtime.title, "Nabu Studio");
        assert_eq!(runtime.initial_size, LogicalSize::new(960.0, 540.0));
    }
}
