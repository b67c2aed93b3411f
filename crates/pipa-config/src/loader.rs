// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Merge order (later overrides earlier): compiled defaults,
//! `/etc/pipa/pipa.toml`, `$XDG_CONFIG_HOME/pipa/pipa.toml`, `./pipa.toml`,
//! then `PIPA_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PipaConfig;

/// Top-level sections that environment variables may address.
const SECTIONS: &[&str] = &["bot", "pricing", "storage", "whatsapp", "gateway", "logging"];

pub(crate) const LOCAL_CONFIG: &str = "pipa.toml";
pub(crate) const SYSTEM_CONFIG: &str = "/etc/pipa/pipa.toml";

pub(crate) fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("pipa").join(LOCAL_CONFIG))
        .unwrap_or_default()
}

/// Load configuration from the standard file hierarchy with env var overrides.
pub fn load_config() -> Result<PipaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no environment).
pub fn load_config_from_str(toml_content: &str) -> Result<PipaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PipaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PipaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PipaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the full Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PipaConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Environment provider mapping `PIPA_<SECTION>_<KEY>` to `section.key`.
///
/// Only the first underscore after a known section name is a separator, so
/// `PIPA_WHATSAPP_APP_SECRET` becomes `whatsapp.app_secret`.
fn env_provider() -> Env {
    Env::prefixed("PIPA_").map(|key| env_key_to_path(key.as_str()).into())
}

pub(crate) fn env_key_to_path(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}
