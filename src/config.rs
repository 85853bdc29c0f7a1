//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--config`, `--no-hidden`, `--relative`, `--theme`)
//! 2. `$PATHPICK_CONFIG` environment variable (path to config file)
//! 3. Project-local `.pathpick.toml` in the current working directory
//! 4. Global `~/.config/pathpick/config.toml`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Show dot-prefixed entries (overridden by `--no-hidden`).
    pub show_hidden: Option<bool>,
    /// Emit picked paths relative to the root.
    pub relative: Option<bool>,
}

/// Color settings for a custom theme palette.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub tree_fg: Option<String>,
    pub tree_selected_bg: Option<String>,
    pub tree_selected_fg: Option<String>,
    pub tree_dir_fg: Option<String>,
    pub tree_file_fg: Option<String>,
    pub picked_fg: Option<String>,
    pub size_fg: Option<String>,
    pub overlay_bg: Option<String>,
    pub overlay_border_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub theme: ThemeConfig,
}

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path — that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. $PATHPICK_CONFIG environment variable
    if let Ok(env_path) = std::env::var("PATHPICK_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    // 2. Project-local `.pathpick.toml` in CWD
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".pathpick.toml"));
    }

    // 3. Global `~/.config/pathpick/config.toml`
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("pathpick").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return None,
    };
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self` — `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                show_hidden: other.general.show_hidden.or(self.general.show_hidden),
                relative: other.general.relative.or(self.general.relative),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: match (&self.theme.custom, &other.theme.custom) {
                    (_, Some(over)) => Some(over.clone()),
                    (Some(base), None) => Some(base.clone()),
                    (None, None) => None,
                },
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        // Start with built-in defaults (all None — the struct Default).
        let mut config = AppConfig::default();

        // Load from candidate files (lowest priority first so higher overwrites).
        let paths = candidate_paths();
        for path in paths.iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        // Explicit --config file has higher priority than candidates.
        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        // CLI flag overrides are highest priority.
        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Whether dot-prefixed entries are shown at startup.
    pub fn show_hidden(&self) -> bool {
        self.general.show_hidden.unwrap_or(true)
    }

    /// Whether picked paths are emitted relative to the root.
    pub fn relative(&self) -> bool {
        self.general.relative.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_show_hidden_and_absolute_output() {
        let config = AppConfig::default();
        assert!(config.show_hidden());
        assert!(!config.relative());
    }

    #[test]
    fn merge_prefers_override_values() {
        let base = AppConfig {
            general: GeneralConfig {
                show_hidden: Some(true),
                relative: Some(false),
            },
            theme: ThemeConfig {
                scheme: Some("dark".into()),
                custom: None,
            },
        };
        let over = AppConfig {
            general: GeneralConfig {
                show_hidden: Some(false),
                relative: None,
            },
            theme: ThemeConfig {
                scheme: None,
                custom: None,
            },
        };
        let merged = base.merge(&over);
        assert_eq!(merged.general.show_hidden, Some(false));
        assert_eq!(merged.general.relative, Some(false));
        assert_eq!(merged.theme.scheme.as_deref(), Some("dark"));
    }

    #[test]
    fn merge_keeps_base_custom_colors_when_override_has_none() {
        let base = AppConfig {
            theme: ThemeConfig {
                scheme: Some("custom".into()),
                custom: Some(ThemeColorsConfig {
                    tree_fg: Some("#ffffff".into()),
                    ..Default::default()
                }),
            },
            ..Default::default()
        };
        let merged = base.merge(&AppConfig::default());
        let custom = merged.theme.custom.expect("custom colors preserved");
        assert_eq!(custom.tree_fg.as_deref(), Some("#ffffff"));
    }

    #[test]
    fn parses_partial_toml() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [general]
            show_hidden = false

            [theme]
            scheme = "light"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.general.show_hidden, Some(false));
        assert!(!cfg.show_hidden());
        assert_eq!(cfg.theme.scheme.as_deref(), Some("light"));
        assert_eq!(cfg.general.relative, None);
    }

    #[test]
    fn parses_custom_theme_colors() {
        let cfg: AppConfig = toml::from_str(
            r##"
            [theme]
            scheme = "custom"

            [theme.custom]
            tree_dir_fg = "#89b4fa"
            picked_fg = "#a6e3a1"
            "##,
        )
        .unwrap();
        let custom = cfg.theme.custom.expect("custom section parsed");
        assert_eq!(custom.tree_dir_fg.as_deref(), Some("#89b4fa"));
        assert_eq!(custom.picked_fg.as_deref(), Some("#a6e3a1"));
    }

    #[test]
    fn unknown_toml_is_rejected_gracefully() {
        // load_file prints a warning and returns None on bad TOML
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not toml [").unwrap();
        assert!(load_file(&path).is_none());
    }

    #[test]
    fn missing_file_is_none() {
        assert!(load_file(Path::new("/nonexistent/pathpick.toml")).is_none());
    }
}
