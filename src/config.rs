use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/music_sheet/search";

/// Application settings, read once at startup and never mutated after that.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Search service URL the query is POSTed to.
    pub endpoint: String,
    /// Answer searches from a canned response instead of the network.
    pub offline: bool,
    /// JSON file holding the canned response; the built-in sample otherwise.
    pub canned: Option<PathBuf>,
    pub template: TemplateConfig,
}

/// Where the list-item template comes from. `inline` and `file` are
/// mutually exclusive; with neither, the built-in template is used.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateConfig {
    pub inline: Option<String>,
    pub file: Option<PathBuf>,
    /// `data-template` name to extract when `file` is an HTML page.
    pub name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            offline: false,
            canned: None,
            template: TemplateConfig::default(),
        }
    }
}

impl Config {
    /// Load settings from `path`. A missing file yields the defaults.
    ///
    /// Relative paths inside the file resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let src = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
        };

        let mut cfg: Config =
            toml::from_str(&src).with_context(|| format!("parse {}", path.display()))?;

        ensure!(
            cfg.template.inline.is_none() || cfg.template.file.is_none(),
            "{}: template.inline and template.file are mutually exclusive",
            path.display()
        );

        if let Some(base) = path.parent() {
            cfg.canned = cfg.canned.map(|p| base.join(p));
            cfg.template.file = cfg.template.file.map(|p| base.join(p));
        }

        Ok(cfg)
    }
}

/// Resolve the config file location from the environment.
///
/// `$SHEETSEARCH_CONFIG` wins; otherwise
/// `$XDG_CONFIG_HOME/sheetsearch/config.toml`, with `$HOME/.config` as the
/// XDG fallback.
pub fn default_path() -> Result<PathBuf> {
    if let Some(explicit) = std::env::var_os("SHEETSEARCH_CONFIG").filter(|s| !s.is_empty()) {
        return Ok(PathBuf::from(explicit));
    }

    let xdg = match std::env::var("XDG_CONFIG_HOME").ok().filter(|s| !s.is_empty()) {
        Some(xdg) => xdg,
        None => {
            let home = std::env::var("HOME").context("$HOME is not set")?;
            format!("{home}/.config")
        }
    };

    Ok(PathBuf::from(xdg).join("sheetsearch").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("config.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn parses_all_fields_and_resolves_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
endpoint = "http://sheets.local/api/music_sheet/search"
offline = true
canned = "response.json"

[template]
file = "index.html"
name = "listitem"
"#,
        );

        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.endpoint, "http://sheets.local/api/music_sheet/search");
        assert!(cfg.offline);
        assert_eq!(cfg.canned, Some(dir.path().join("response.json")));
        assert_eq!(cfg.template.file, Some(dir.path().join("index.html")));
        assert_eq!(cfg.template.name.as_deref(), Some("listitem"));
    }

    #[test]
    fn inline_and_file_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[template]\ninline = \"${title}\"\nfile = \"t.html\"\n",
        );
        let err = Config::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("mutually exclusive"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "endpiont = \"typo\"\n");
        assert!(Config::load(&path).is_err());
    }
}
