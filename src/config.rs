use std::{
    env, fs,
    path::{Path, PathBuf},
};

use config::FileFormat;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ColumnConfigs, GridResult};
use crate::grid::GridSettings;
use crate::render::RenderSettings;
use crate::tui::KeyBinding;

const CONFIG: &str = include_str!("../.config/config.json5");
const CONFIG_FILE_NAME: &str = "config.json5";

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

/// Application configuration: embedded defaults with an optional user file on top
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridSettings,
    pub render: RenderSettings,
    pub columns: ColumnConfigs,
    /// Additional TUI key bindings; these win over the defaults
    pub keybindings: Vec<KeyBinding>,
}

/// Scalar settings read through `config::Config`. That crate lowercases keys,
/// so column directives and key bindings are parsed separately.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
struct Settings {
    grid: GridSettings,
    render: RenderSettings,
}

/// Sections whose keys are case-sensitive (column names, camelCase fields)
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
struct Directives {
    columns: ColumnConfigs,
    keybindings: Vec<KeyBinding>,
}

fn parse_json5<T: serde::de::DeserializeOwned>(text: &str) -> GridResult<T> {
    json5::from_str(text).map_err(|e| config::ConfigError::Foreign(Box::new(e)).into())
}

impl Config {
    /// The embedded defaults only
    pub fn embedded() -> GridResult<Self> {
        parse_json5(CONFIG)
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, `$DATAGRID_CONFIG/config.json5`
    /// or the platform config directory is used when such a file is present.
    pub fn from_path(config_path: Option<&Path>) -> GridResult<Self> {
        let defaults: Directives = parse_json5(CONFIG)?;
        let mut builder =
            config::Config::builder().add_source(config::File::from_str(CONFIG, FileFormat::Json5));

        let user_file = match config_path {
            Some(path) => Some((path.to_path_buf(), true)),
            None => default_config_path()
                .filter(|path| path.exists())
                .map(|path| (path, false)),
        };

        if let Some((path, required)) = &user_file {
            debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(
                config::File::from(path.clone())
                    .format(FileFormat::Json5)
                    .required(*required),
            );
        }

        let settings: Settings = builder.build()?.try_deserialize()?;

        let user: Directives = match &user_file {
            Some((path, _)) => parse_json5(&fs::read_to_string(path)?)?,
            None => Directives::default(),
        };
        let mut keybindings = defaults.keybindings;
        keybindings.extend(user.keybindings);

        Ok(Self {
            grid: settings.grid,
            render: settings.render,
            columns: defaults.columns.merged(&user.columns),
            keybindings,
        })
    }
}

/// Location of the user configuration file when no path is given
pub fn default_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

pub fn get_config_dir() -> Option<PathBuf> {
    if let Some(dir) = CONFIG_FOLDER.clone() {
        Some(dir)
    } else {
        ProjectDirs::from("", "", env!("CARGO_PKG_NAME")).map(|dirs| dirs.config_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ColumnConfig, GridError, NumberFormat, PageSize, VisualType};
    use crate::render::Rgb;
    use crate::tui::Action;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json5").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_embedded_defaults_match_code_defaults() {
        let cfg = Config::embedded().unwrap();
        assert_eq!(cfg.grid, GridSettings::default());
        assert_eq!(cfg.render, RenderSettings::default());
        assert!(cfg.columns.is_empty());
        assert!(cfg.keybindings.is_empty());
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let file = write_config(
            r##"{
                // comments are allowed
                grid: { default_page_size: 50 },
                render: { bar_color: "#000000" },
                columns: { revenue: { visualType: "bar" } },
                keybindings: [{ key: "Ctrl+n", action: "NextPage" }],
            }"##,
        );

        let cfg = Config::from_path(Some(file.path())).unwrap();
        assert_eq!(cfg.grid.default_page_size, PageSize::try_from(50).unwrap());
        assert_eq!(cfg.grid.pagination_threshold, 10);
        assert_eq!(cfg.render.bar_color, Rgb::new(0, 0, 0));
        assert_eq!(cfg.render.heatmap_low, RenderSettings::default().heatmap_low);
        assert_eq!(cfg.columns.for_column("revenue").visual_type(), VisualType::Bar);
        assert_eq!(cfg.keybindings[0].action, Action::NextPage);
    }

    #[test]
    fn test_column_directives_keep_case() {
        let file = write_config(
            r##"{
                columns: {
                    Revenue: {
                        visualType: "heatmap",
                        numberFormat: "currency",
                        heatmapColorRange: ["#ffffff", "#000000"],
                    },
                    deltaPct: { conditionalColor: true, barColor: "#ff0000" },
                },
            }"##,
        );

        let cfg = Config::from_path(Some(file.path())).unwrap();
        let revenue = cfg.columns.for_column("Revenue");
        assert_eq!(revenue.visual_type(), VisualType::Heatmap);
        assert_eq!(revenue.number_format, Some(NumberFormat::Currency));
        assert!(revenue.heatmap_color_range.is_some());
        assert_eq!(cfg.columns.for_column("revenue"), ColumnConfig::default());

        let delta = cfg.columns.for_column("deltaPct");
        assert!(delta.conditional_color);
        assert!(delta.bar_color.is_some());
    }

    #[test]
    fn test_invalid_page_size_is_rejected() {
        let file = write_config(r#"{ grid: { default_page_size: 7 } }"#);
        assert!(matches!(
            Config::from_path(Some(file.path())),
            Err(GridError::Config(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json5");
        assert!(Config::from_path(Some(&missing)).is_err());
    }
}
