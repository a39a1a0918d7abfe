//! Server configuration
//!
//! Settings come from an optional settings file next to the executable,
//! then command-line overrides are applied on top. The mime-type table is
//! loaded from its own optional file. Both files are parsed as YAML, which
//! also accepts the legacy JSON files.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::Level;

use crate::http::mime::MimeTable;

/// Environment variable pointing at the directory holding the config files.
pub const CONFIG_DIR_VAR: &str = "STATIK_CONFIG_DIR";

const SETTINGS_FILES: &[&str] = &["settings.yaml", "settings.yml", "settings.json"];
const MIME_FILES: &[&str] = &[
    "mime_types.yaml",
    "mime_types.yml",
    "mime_types.json",
    "mimeTypes.json",
];

/// Server settings, immutable once the listener starts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Settings {
    /// Document served when `/` is requested
    #[serde(alias = "default_document")]
    pub default_document: String,

    /// Content-Type used when no mime type matches
    #[serde(alias = "default_mime_type")]
    pub default_mime_type: String,

    /// Directory files are served from
    #[serde(rename = "Path", alias = "path", alias = "root_path")]
    pub root_path: PathBuf,

    /// Port to bind on all interfaces
    #[serde(alias = "port")]
    pub port: u16,

    /// Value of the `Server` response header
    #[serde(alias = "server_name")]
    pub server_name: String,

    /// Log requests and responses
    #[serde(alias = "verbose")]
    pub verbose: bool,

    /// Read deadline per connection, 0 disables it
    #[serde(alias = "read_timeout_secs")]
    pub read_timeout_secs: u64,

    /// Write deadline per connection, 0 disables it
    #[serde(alias = "write_timeout_secs")]
    pub write_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_document: "index.html".to_string(),
            default_mime_type: "text/html".to_string(),
            root_path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            port: 80,
            server_name: host_name(),
            verbose: false,
            read_timeout_secs: 30,
            write_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Load settings from a YAML (or JSON) file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read settings file {}", path.display()))?;

        serde_yaml::from_str(&text)
            .with_context(|| format!("unable to parse settings file {}", path.display()))
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_secs > 0).then(|| Duration::from_secs(self.read_timeout_secs))
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        (self.write_timeout_secs > 0).then(|| Duration::from_secs(self.write_timeout_secs))
    }

    /// Subscriber level: everything when verbose, only fatal diagnostics otherwise.
    pub fn log_level(&self) -> Level {
        if self.verbose { Level::DEBUG } else { Level::ERROR }
    }

    /// Log the effective settings.
    pub fn log_summary(&self) {
        tracing::info!(
            default_document = %self.default_document,
            default_mime_type = %self.default_mime_type,
            path = %self.root_path.display(),
            port = self.port,
            server_name = %self.server_name,
            "Effective settings"
        );
    }
}

/// Command-line overrides, applied after the settings file.
///
/// Arguments use the `--key value` form. Keys are case-insensitive and a
/// value runs until the next `--`, so it may contain spaces. Unknown keys
/// are ignored.
///
/// ```
/// # use statik::config::Overrides;
/// let overrides = Overrides::parse(["--Port", "8080", "--verbose"]);
/// assert_eq!(overrides.port, Some(8080));
/// assert!(overrides.verbose);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub default_document: Option<String>,
    pub default_mime_type: Option<String>,
    pub root_path: Option<PathBuf>,
    pub port: Option<u16>,
    pub server_name: Option<String>,
    pub verbose: bool,
}

impl Overrides {
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = args
            .into_iter()
            .map(|arg| arg.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");

        let mut overrides = Self::default();

        for switch in joined.trim().split("--").filter(|s| !s.is_empty()) {
            let (key, value) = switch.split_once(' ').unwrap_or((switch, ""));
            let value = value.trim();

            match key.to_ascii_lowercase().as_str() {
                "defaultdocument" => set_text(&mut overrides.default_document, value),
                "defaultmimetype" => set_text(&mut overrides.default_mime_type, value),
                "path" => {
                    if !value.is_empty() {
                        overrides.root_path = Some(PathBuf::from(value));
                    }
                }
                "port" => {
                    if let Ok(port) = value.parse() {
                        overrides.port = Some(port);
                    }
                }
                "servername" => set_text(&mut overrides.server_name, value),
                "verbose" => overrides.verbose = true,
                _ => {}
            }
        }

        overrides
    }

    pub fn apply(&self, settings: &mut Settings) {
        if let Some(document) = &self.default_document {
            settings.default_document = document.clone();
        }
        if let Some(mime_type) = &self.default_mime_type {
            settings.default_mime_type = mime_type.clone();
        }
        if let Some(path) = &self.root_path {
            settings.root_path = path.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(name) = &self.server_name {
            settings.server_name = name.clone();
        }
        if self.verbose {
            settings.verbose = true;
        }
    }
}

fn set_text(slot: &mut Option<String>, value: &str) {
    if !value.is_empty() {
        *slot = Some(value.to_string());
    }
}

/// Everything a connection handler needs, shared read-only.
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub mime_types: MimeTable,
}

impl Config {
    pub fn new(settings: Settings, mime_types: MimeTable) -> Self {
        Self {
            settings,
            mime_types,
        }
    }

    /// Load the configuration for this process from its config directory
    /// and the given command-line arguments.
    pub fn load<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dir = config_dir()?;
        Self::load_from(&dir, &Overrides::parse(args))
    }

    pub fn load_from(dir: &Path, overrides: &Overrides) -> Result<Self> {
        let mut settings = match find_file(dir, SETTINGS_FILES) {
            Some(path) => Settings::from_file(&path)?,
            None => Settings::default(),
        };

        let mime_types = match find_file(dir, MIME_FILES) {
            Some(path) => MimeTable::from_file(&path)?,
            None => MimeTable::default(),
        };

        overrides.apply(&mut settings);

        settings.root_path = std::path::absolute(&settings.root_path).with_context(|| {
            format!("invalid root path {}", settings.root_path.display())
        })?;

        Ok(Self::new(settings, mime_types))
    }
}

fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_VAR) {
        return Ok(PathBuf::from(dir));
    }

    let exe = std::env::current_exe().context("unable to locate the executable")?;
    Ok(exe.parent().map(Path::to_path_buf).unwrap_or_default())
}

fn find_file(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

fn host_name() -> String {
    nix::unistd::gethostname()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "localhost".to_string())
}
