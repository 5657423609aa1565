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

// When at least one integration test doesn't use all of the exported methods, there are
// dead code warnings causing clippy CI to fail.
#![allow(dead_code)]

use std::{fs, path::Path, process::Command};

use assert_cmd::prelude::*;

pub fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("mcnltool").unwrap();
    cmd.env_remove("MCNLTOOL_SETTINGS")
        .env_remove("MCNLTOOL_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

pub fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

/// Run `cert chain` non-interactively into `dir`.
pub fn generate_chain(dir: &Path, common_name: &str) {
    cmd()
        .args(["cert", "chain", "--no-interactive", "--common-name", common_name])
        .arg("--output")
        .arg(dir)
        .assert()
        .success();
}
