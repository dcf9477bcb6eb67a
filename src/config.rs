//! Centralized configuration and builder for the snapshot store and session.
//!
//! Goals:
//! - Single place to collect tunables instead of scattering env lookups.
//! - RmsConfig::from_env() reads the RMS_* variables; builder setters override.
//!
//! Env:
//! - RMS_DATA_FILE — snapshot file path (default "rms_data.snap")
//! - RMS_CODEC     — payload codec: none|zstd (default none)
//! - RMS_FSYNC     — fsync tmp file before rename (default true)
//! - RMS_LOCK      — hold an advisory lock beside the file while a session is open (default true)

use std::fmt;
use std::path::PathBuf;

use crate::consts::{CODEC_NONE, CODEC_ZSTD, DEFAULT_DATA_FILE};

/// Top-level configuration (store + session).
#[derive(Clone, Debug)]
pub struct RmsConfig {
    /// Snapshot file.
    /// Env: RMS_DATA_FILE (default "rms_data.snap")
    pub data_file: PathBuf,

    /// Payload codec for writes (reads accept any known codec).
    /// Env: RMS_CODEC = none|zstd (default none)
    pub codec: u16,

    /// fsync the tmp file before rename and the parent dir after.
    /// Env: RMS_FSYNC (default true; "0|false|off|no" => false)
    pub fsync: bool,

    /// Take `<data_file>.lock` for the lifetime of a Session.
    /// Env: RMS_LOCK (default true)
    pub lock: bool,
}

impl Default for RmsConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            codec: CODEC_NONE,
            fsync: true,
            lock: true,
        }
    }
}

impl RmsConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("RMS_DATA_FILE") {
            let s = v.trim();
            if !s.is_empty() {
                cfg.data_file = PathBuf::from(s);
            }
        }

        if let Ok(v) = std::env::var("RMS_CODEC") {
            match parse_codec(&v) {
                Some(c) => cfg.codec = c,
                None => log::warn!("RMS_CODEC='{}' not recognized, keeping 'none'", v.trim()),
            }
        }

        if let Ok(v) = std::env::var("RMS_FSYNC") {
            cfg.fsync = parse_flag(&v);
        }

        if let Ok(v) = std::env::var("RMS_LOCK") {
            cfg.lock = parse_flag(&v);
        }

        cfg
    }

    pub fn with_data_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.data_file = path.into();
        self
    }

    pub fn with_codec(mut self, codec: u16) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_fsync(mut self, on: bool) -> Self {
        self.fsync = on;
        self
    }

    pub fn with_lock(mut self, on: bool) -> Self {
        self.lock = on;
        self
    }

    /// Finish the builder and obtain the configuration.
    pub fn build(self) -> Self {
        self
    }
}

impl fmt::Display for RmsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RmsConfig {{ data_file: {}, codec: {}, fsync: {}, lock: {} }}",
            self.data_file.display(),
            codec_name(self.codec),
            self.fsync,
            self.lock,
        )
    }
}

/// "none" | "zstd" (case-insensitive) -> codec id.
pub fn parse_codec(s: &str) -> Option<u16> {
    match s.trim().to_ascii_lowercase().as_str() {
        "none" | "0" => Some(CODEC_NONE),
        "zstd" | "1" => Some(CODEC_ZSTD),
        _ => None,
    }
}

pub fn codec_name(codec: u16) -> &'static str {
    match codec {
        CODEC_NONE => "none",
        CODEC_ZSTD => "zstd",
        _ => "unknown",
    }
}

fn parse_flag(v: &str) -> bool {
    let s = v.trim().to_ascii_lowercase();
    s == "1" || s == "true" || s == "on" || s == "yes"
}

/// Lightweight builder that produces an RmsConfig.
#[derive(Clone, Debug)]
pub struct StoreBuilder {
    cfg: RmsConfig,
}

impl Default for StoreBuilder {
    fn default() -> Self {
        // Start from env, then allow overrides.
        Self {
            cfg: RmsConfig::from_env(),
        }
    }
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a clean default (without reading env).
    pub fn from_default() -> Self {
        Self {
            cfg: RmsConfig::default(),
        }
    }

    pub fn data_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.cfg.data_file = path.into();
        self
    }

    pub fn codec(mut self, codec: u16) -> Self {
        self.cfg.codec = codec;
        self
    }

    pub fn fsync(mut self, on: bool) -> Self {
        self.cfg.fsync = on;
        self
    }

    pub fn lock(mut self, on: bool) -> Self {
        self.cfg.lock = on;
        self
    }

    pub fn build(self) -> RmsConfig {
        self.cfg
    }
}
