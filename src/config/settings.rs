// src/config/settings.rs
//! Run settings: dealer metadata, upload destination, artifact directory.
//!
//! Stored as `key=value` lines. `#` starts a comment line, blank lines are
//! ignored, unknown keys are logged and skipped. `VEHICLE_FEED_<KEY>` environment
//! variables override whatever the file says.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use super::consts::{DEFAULT_OUT_DIR, DEFAULT_REMOTE_PATH, ENV_PREFIX, FTP_PORT};
use crate::error::SettingsError;

/// Dealer metadata copied into every record of a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DealerProfile {
    pub id: String,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub crm_email: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferDestination {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub remote_path: String,
}

impl Default for TransferDestination {
    fn default() -> Self {
        Self {
            host: s!(),
            port: FTP_PORT,
            user: s!(),
            password: s!(),
            remote_path: s!(DEFAULT_REMOTE_PATH),
        }
    }
}

impl TransferDestination {
    /// Host and user are the minimum needed to attempt an upload.
    pub fn is_configured(&self) -> bool {
        !self.host.trim().is_empty() && !self.user.trim().is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub dealer: DealerProfile,
    pub destination: TransferDestination,
    pub out_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dealer: DealerProfile::default(),
            destination: TransferDestination::default(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

/// Every key the settings file understands, in the order `save` writes them.
pub const KEYS: &[&str] = &[
    "dealer_id", "dealer_name", "dealer_street", "dealer_city", "dealer_state",
    "dealer_zip", "dealer_crm_email", "ftp_host", "ftp_port", "ftp_user",
    "ftp_pass", "ftp_path", "out_dir",
];

impl Settings {
    /// Read `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            debug!(path = %path.display(), "settings file not found, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .map_err(|source| SettingsError::Io { path: path.to_path_buf(), source })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        let mut cfg = Self::default();
        for (n, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                warn!(line = n + 1, "settings line without '=' ignored");
                continue;
            };
            let key = key.trim();
            if !cfg.set(key, val.trim())? {
                warn!(key, "unknown settings key ignored");
            }
        }
        Ok(cfg)
    }

    /// Apply `VEHICLE_FEED_<KEY>` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), SettingsError> {
        self.apply_env_from(std::env::vars())
    }

    /// Apply overrides from any `(name, value)` list. Names outside the prefix are ignored.
    pub fn apply_env_from<I, K, V>(&mut self, vars: I) -> Result<(), SettingsError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, val) in vars {
            let Some(key) = name.as_ref().strip_prefix(ENV_PREFIX) else { continue };
            let key = key.to_ascii_lowercase();
            if self.set(&key, val.as_ref().trim())? {
                debug!(key, "setting overridden from environment");
            }
        }
        Ok(())
    }

    /// Set one key. Returns `false` for keys this crate does not know.
    pub fn set(&mut self, key: &str, val: &str) -> Result<bool, SettingsError> {
        let d = &mut self.dealer;
        let t = &mut self.destination;
        match key {
            "dealer_id" => d.id = s!(val),
            "dealer_name" => d.name = s!(val),
            "dealer_street" => d.street = s!(val),
            "dealer_city" => d.city = s!(val),
            "dealer_state" => d.state = s!(val),
            "dealer_zip" => d.zip = s!(val),
            "dealer_crm_email" => d.crm_email = s!(val),
            "ftp_host" => t.host = s!(val),
            "ftp_port" => {
                t.port = if val.is_empty() {
                    FTP_PORT
                } else {
                    val.parse().map_err(|_| SettingsError::InvalidValue {
                        key: s!(key),
                        value: s!(val),
                    })?
                }
            }
            "ftp_user" => t.user = s!(val),
            "ftp_pass" => t.password = s!(val),
            "ftp_path" => {
                t.remote_path = if val.is_empty() { s!(DEFAULT_REMOTE_PATH) } else { s!(val) }
            }
            "out_dir" => {
                self.out_dir = if val.is_empty() { PathBuf::from(DEFAULT_OUT_DIR) } else { PathBuf::from(val) }
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn to_text(&self) -> String {
        let d = &self.dealer;
        let t = &self.destination;
        let port = t.port.to_string();
        let out_dir = self.out_dir.display().to_string();
        let values: [&str; 13] = [
            &d.id, &d.name, &d.street, &d.city, &d.state, &d.zip, &d.crm_email,
            &t.host, &port, &t.user, &t.password, &t.remote_path, &out_dir,
        ];

        let mut s = String::new();
        for (key, val) in KEYS.iter().zip(values) {
            s.push_str(&format!("{key}={val}\n"));
        }
        s
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        fs::write(path, self.to_text())
            .map_err(|source| SettingsError::Io { path: path.to_path_buf(), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
# dealer
dealer_id = D-42
dealer_name=Lakeside Motors

ftp_host=ftp.example.com
ftp_user=feeds
ftp_port=2121
colour=blue
";

    #[test]
    fn parse_skips_comments_blanks_and_unknown_keys() {
        let cfg = Settings::parse(SAMPLE).unwrap();
        assert_eq!(cfg.dealer.id, "D-42");
        assert_eq!(cfg.dealer.name, "Lakeside Motors");
        assert_eq!(cfg.destination.port, 2121);
        assert_eq!(cfg.destination.remote_path, "/");
        assert_eq!(cfg.out_dir, PathBuf::from("out"));
        assert!(cfg.destination.is_configured());
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = Settings::parse("ftp_port=twenty-one").unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { ref key, .. } if key == "ftp_port"));
    }

    #[test]
    fn blank_host_is_unconfigured() {
        let cfg = Settings::parse("ftp_host=  \nftp_user=feeds").unwrap();
        assert!(!cfg.destination.is_configured());
        assert!(!Settings::default().destination.is_configured());
    }

    #[test]
    fn env_overrides_win() {
        let mut cfg = Settings::parse(SAMPLE).unwrap();
        cfg.apply_env_from([
            ("VEHICLE_FEED_DEALER_NAME", "Hilltop Auto"),
            ("VEHICLE_FEED_FTP_PATH", "/incoming/feeds"),
            ("PATH", "/usr/bin"),
        ])
        .unwrap();
        assert_eq!(cfg.dealer.name, "Hilltop Auto");
        assert_eq!(cfg.destination.remote_path, "/incoming/feeds");
        assert_eq!(cfg.dealer.id, "D-42");
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.conf");
        let mut cfg = Settings::parse(SAMPLE).unwrap();
        cfg.destination.password = s!("p@ss=word");
        cfg.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), cfg);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(&dir.path().join("nope.conf")).unwrap(), Settings::default());
    }
}
