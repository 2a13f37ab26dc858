//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Directory name under the platform config directory.
const APP_DIR: &str = "ev-concierge";

/// Project-level config file names, checked in order.
const PROJECT_FILES: [&str; 2] = ["concierge.toml", ".concierge.toml"];

/// Prefix for environment overrides, e.g. `CONCIERGE_BEHAVIOR__TIMEOUT_SECONDS=30`.
const ENV_PREFIX: &str = "CONCIERGE_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `CONCIERGE_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./concierge.toml` or `./.concierge.toml`
    /// 4. Global: `<config dir>/ev-concierge/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(
            Self::global_config_path().filter(|p| p.exists()),
            Self::project_config_path(),
            config_path,
        )
        .extract()
        .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(global: Option<PathBuf>, project: Option<PathBuf>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(path) = global {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = project {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = explicit {
            // Toml::file silently skips missing files; an explicit path must exist.
            figment = figment.merge(Toml::file_exact(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{mark:^7}] Explicit: {}", path.display());
        }

        match Self::project_config_path() {
            Some(path) => println!("  [ FOUND ] Project:  {}", path.display()),
            None => println!("  [       ] Project:  ./{} or ./{}", PROJECT_FILES[0], PROJECT_FILES[1]),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "" };
            println!("  [{mark:^7}] Global:   {}", path.display());
        }

        println!("  [       ] Env:      {ENV_PREFIX}<SECTION>__<KEY>");
        println!("  [       ] Default:  built-in defaults");
    }

    /// Render the merged configuration as TOML.
    pub fn render(config: &FileConfig) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.behavior.timeout_seconds, Some(60));
        assert!(config.logging.diagnostics.is_none());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains(APP_DIR));
    }

    #[test]
    fn test_later_files_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("project.toml");
        fs::write(
            &global,
            "[behavior]\ntimeout_seconds = 10\nhistory_window = 4\n",
        )
        .unwrap();
        fs::write(&project, "[behavior]\ntimeout_seconds = 20\n").unwrap();

        let config: FileConfig = ConfigLoader::figment(Some(global), Some(project), None)
            .extract()
            .unwrap();
        assert_eq!(config.behavior.timeout_seconds, Some(20));
        assert_eq!(config.behavior.history_window, Some(4));
        assert_eq!(config.contract.max_key_words, 4);
    }

    #[test]
    fn test_explicit_path_wins_over_project() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("project.toml");
        let explicit = dir.path().join("explicit.toml");
        fs::write(&project, "[models]\ngeneral = \"claude-3.5-haiku\"\n").unwrap();
        fs::write(&explicit, "[models]\ngeneral = \"claude-sonnet-4.5\"\n").unwrap();

        let config: FileConfig = ConfigLoader::figment(None, Some(project), Some(&explicit))
            .extract()
            .unwrap();
        assert_eq!(config.models.general.as_deref(), Some("claude-sonnet-4.5"));
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let result: Result<FileConfig, _> = ConfigLoader::figment(None, None, Some(&missing)).extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[behavior\ntimeout_seconds = ").unwrap();
        let result: Result<FileConfig, _> = ConfigLoader::figment(None, None, Some(&path)).extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_render_round_trips_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rendered.toml");
        let mut config = FileConfig::default();
        config.behavior.history_window = Some(8);
        fs::write(&path, ConfigLoader::render(&config).unwrap()).unwrap();

        let loaded: FileConfig = ConfigLoader::figment(None, None, Some(&path)).extract().unwrap();
        assert_eq!(loaded.behavior.history_window, Some(8));
    }
}
