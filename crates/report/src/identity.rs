//! Persistent player identity.
//!
//! The id is created once, on first use, and then read back on every run.
//! Format: `player-<unix millis in base36>-<8 random base36 chars>`.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info};
use serde::{Deserialize, Serialize};

const IDENTITY_FILE: &str = "identity.toml";
const APP_DIR: &str = "dropstack";
const SUFFIX_LEN: usize = 8;

#[derive(Debug)]
pub enum IdentityError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    /// The platform exposes no per-user data directory.
    NoDataDir,
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityError::Io(e) => write!(f, "identity file I/O failed: {e}"),
            IdentityError::Parse(e) => write!(f, "identity file is malformed: {e}"),
            IdentityError::Serialize(e) => write!(f, "could not encode identity: {e}"),
            IdentityError::NoDataDir => write!(f, "no user data directory available"),
        }
    }
}

impl std::error::Error for IdentityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IdentityError::Io(e) => Some(e),
            IdentityError::Parse(e) => Some(e),
            IdentityError::Serialize(e) => Some(e),
            IdentityError::NoDataDir => None,
        }
    }
}

impl From<io::Error> for IdentityError {
    fn from(err: io::Error) -> Self {
        IdentityError::Io(err)
    }
}

impl From<toml::de::Error> for IdentityError {
    fn from(err: toml::de::Error) -> Self {
        IdentityError::Parse(err)
    }
}

impl From<toml::ser::Error> for IdentityError {
    fn from(err: toml::ser::Error) -> Self {
        IdentityError::Serialize(err)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct IdentityFile {
    player_id: String,
}

/// Reads and lazily creates the player id file.
#[derive(Debug, Clone)]
pub struct PlayerIdStore {
    path: PathBuf,
}

impl PlayerIdStore {
    /// Store the identity file directly inside `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(IDENTITY_FILE),
        }
    }

    /// `<data dir>/dropstack/identity.toml`.
    pub fn from_default_dir() -> Result<Self, IdentityError> {
        let base = dirs::data_dir().ok_or(IdentityError::NoDataDir)?;
        Ok(Self::new(base.join(APP_DIR)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the stored id, creating and persisting one if none exists.
    ///
    /// A file holding a blank id is treated as missing.
    pub fn get_or_create(&self) -> Result<String, IdentityError> {
        if let Some(id) = self.load()? {
            debug!("Loaded player id from {}", self.path.display());
            return Ok(id);
        }

        let id = generate_player_id();
        self.save(&id)?;
        info!("Created player id {id}");
        Ok(id)
    }

    fn load(&self) -> Result<Option<String>, IdentityError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file: IdentityFile = toml::from_str(&contents)?;
        let id = file.player_id.trim();
        Ok((!id.is_empty()).then(|| id.to_string()))
    }

    fn save(&self, id: &str) -> Result<(), IdentityError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(&IdentityFile {
            player_id: id.to_string(),
        })?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// A fresh id from the current time and `fastrand`.
pub fn generate_player_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let suffix: String = (0..SUFFIX_LEN).map(|_| base36_digit(fastrand::u32(0..36))).collect();
    format!("player-{}-{}", to_base36(millis), suffix)
}

fn base36_digit(d: u32) -> char {
    std::char::from_digit(d, 36).unwrap_or('0')
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(base36_digit((n % 36) as u32));
        n /= 36;
    }
    digits.iter().rev().collect()
}
