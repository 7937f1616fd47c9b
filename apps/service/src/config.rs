use std::sync::Arc;
use std::time::Duration;
use std::{env, fmt, fs, io, path};

use liveness::probe::DEFAULT_PROBE_TIMEOUT;
use liveness::registry::default_projects;
use liveness::{HttpProbe, Probe, ProjectRef, ProjectRegistry, RelayProbe};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::{validate_check_interval, validate_relay_url, validate_timeout};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read config {}: {}", .0.display(), .1)]
    ReadFailed(path::PathBuf, #[source] io::Error),
    #[error("Failed to write config {}: {}", .0.display(), .1)]
    WriteFailed(path::PathBuf, #[source] io::Error),
    #[error("Failed to parse config {}: {}", .0.display(), .1)]
    ParseFailed(path::PathBuf, String),
    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[from] toml::ser::Error),
    #[error("Invalid config: {0:#}")]
    Invalid(anyhow::Error),
    #[error("No config directory available (set XDG_CONFIG_HOME or HOME)")]
    ConfigPathUnavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub probe: ProbeSettings,
    #[serde(default)]
    pub watch: WatchSettings,
    #[serde(default = "default_projects")]
    pub projects: Vec<ProjectRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeSettings {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Mission Control server root; probes go through its
    /// `/api/check-status` endpoint when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relay_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchSettings {
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_PROBE_TIMEOUT.as_millis() as u64
}

fn default_interval_seconds() -> u64 {
    60
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self { timeout_ms: default_timeout_ms(), relay_url: None }
    }
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self { interval_seconds: default_interval_seconds() }
    }
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Get default config path ($XDG_CONFIG_HOME/mission-control/config.toml or
/// $HOME/.config/...)
fn default_config_path() -> Result<path::PathBuf, Error> {
    let path = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        path::PathBuf::from(config_home)
    } else if let Some(home_dir) = env::home_dir() {
        home_dir.join(".config")
    } else {
        return Err(Error::ConfigPathUnavailable);
    };

    Ok(path.join("mission-control/config.toml"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe: ProbeSettings::default(),
            watch: WatchSettings::default(),
            projects: default_projects(),
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);
        let write_2 = write_indented(2);

        writeln!(f, "Current Mission Control Configuration:")?;
        write_title_1(f, "Probe")?;
        write_1(f, "Timeout", &format!("{}ms", self.probe.timeout_ms))?;
        write_1(f, "Relay", &self.probe.relay_url.as_deref().unwrap_or("direct"))?;
        write_title_1(f, "Watch")?;
        write_1(f, "Interval", &format!("{}s", self.watch.interval_seconds))?;
        write_title_1(f, "Projects")?;
        for project in &self.projects {
            write_1(f, &project.id, &project.url)?;
            write_2(f, "Status", &project.status)?;
        }

        Ok(())
    }
}

impl Config {
    /// Generate Config structure from file
    ///
    /// Creates a default config in ~/.config/mission-control/config.toml
    ///  or the specified path, with the name config.toml if one does not exist
    ///
    /// ```rust,ignore
    /// let cfg = config::Config::from_config(None::<&path::Path>)?;
    /// println!("{}", cfg);
    /// ```
    pub fn from_config(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, Error> {
        let config_path: path::PathBuf = if let Some(path) = optional_path {
            normalize_toml_path(path.as_ref())
        } else {
            default_config_path()?
        };

        let config = if config_path.exists() {
            let raw_string = fs::read_to_string(&config_path)
                .map_err(|err| Error::ReadFailed(config_path.clone(), err))?;
            toml::from_str(raw_string.as_str())
                .map_err(|err| Error::ParseFailed(config_path.clone(), err.to_string()))?
        } else {
            let config = Self::default();
            config.write_config(&config_path)?;
            config
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize and write a config to a file
    pub fn write_config(&self, path: &path::Path) -> Result<(), Error> {
        let config_str: String = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| Error::WriteFailed(path.to_path_buf(), err))?;
        }

        fs::write(path, config_str).map_err(|err| Error::WriteFailed(path.to_path_buf(), err))
    }

    pub fn validate(&self) -> Result<(), Error> {
        validate_timeout(self.probe.timeout_ms).map_err(Error::Invalid)?;
        validate_check_interval(self.watch.interval_seconds).map_err(Error::Invalid)?;
        if let Some(relay) = &self.probe.relay_url {
            validate_relay_url(relay).map_err(Error::Invalid)?;
        }
        self.registry().map_err(|err| Error::Invalid(err.into()))?;

        Ok(())
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe.timeout_ms)
    }

    pub fn registry(&self) -> liveness::Result<ProjectRegistry> {
        ProjectRegistry::new(self.projects.clone())
    }

    /// Direct probe, or relayed through the configured server
    pub fn build_probe(&self) -> liveness::Result<Arc<dyn Probe>> {
        let probe: Arc<dyn Probe> = match &self.probe.relay_url {
            Some(relay) => Arc::new(RelayProbe::new(relay, self.probe_timeout())?),
            None => Arc::new(HttpProbe::new(self.probe_timeout())?),
        };
        Ok(probe)
    }
}
