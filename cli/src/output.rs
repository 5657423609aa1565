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
use chrono::{DateTime, Utc};

// Folder names under `./output/`.
pub const CERT_GENERATOR: &str = "cert-generator";
pub const DID_GENERATOR: &str = "did-generator";

/// Resolve and create the directory generated files are written to.
///
/// An explicit `custom` path is used as is. Otherwise a fresh
/// `./output/<tool>/<timestamp>` directory is created.
pub fn output_directory(tool: &str, custom: Option<&Path>) -> Result<PathBuf> {
    let dir = match custom {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from("output")
            .join(tool)
            .join(timestamp_dir_name(Utc::now())),
    };

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    Ok(dir)
}

/// `2024-01-02T03:04:05.678Z` becomes `2024-01-02T03-04-05`.
pub fn timestamp_dir_name(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H-%M-%S").to_string()
}

/// Write `contents` to `dir/name` and report it on stdout.
pub fn save(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Saved {name}");
    Ok(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::TimeZone;

    use super::*;

    #[test]
    fn timestamp_has_no_separators_that_need_escaping() {
        let now = Utc
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .unwrap()
            .checked_add_signed(chrono::Duration::milliseconds(678))
            .unwrap();

        assert_eq!(timestamp_dir_name(now), "2024-01-02T03-04-05");
    }

    #[test]
    fn custom_directory_is_created() {
        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().join("a").join("b");

        let dir = output_directory(CERT_GENERATOR, Some(&target)).unwrap();
        assert_eq!(dir, target);
        assert!(target.is_dir());
    }

    #[test]
    fn save_writes_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = save(temp.path(), "chain.pem", "pem").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "pem");
    }
}
