// Copyright 2022 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.

// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional defaults read from a TOML file passed with `--settings`.
///
/// Flags always win over these values, and these values win over the
/// built-in defaults.
///
/// ```toml
/// [subject]
/// country = "NL"
/// organization = "My Company"
///
/// [credential]
/// company = "My Company"
///
/// [server]
/// port = 8080
/// root = "public"
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub subject: SubjectDefaults,
    pub credential: CredentialDefaults,
    pub server: ServerSettings,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubjectDefaults {
    pub country: Option<String>,
    pub state: Option<String>,
    pub organization: Option<String>,
    pub organizational_unit: Option<String>,
    pub common_name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CredentialDefaults {
    pub name: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub employee_id: Option<String>,
    pub company: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSettings {
    pub port: Option<u16>,
    pub root: Option<PathBuf>,
}

impl Settings {
    /// Load settings from `path`, or return the empty defaults when no
    /// path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let settings = Self::from_toml(&text)
            .with_context(|| format!("Invalid settings file {}", path.display()))?;

        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
