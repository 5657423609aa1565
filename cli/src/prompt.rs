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

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Asks for values on stdin when running interactively.
///
/// In non-interactive mode nothing is read; supplied values and defaults
/// are passed through unchanged.
#[derive(Clone, Copy, Debug)]
pub struct Prompter {
    interactive: bool,
}

impl Prompter {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Return `supplied` when it is non-empty. Otherwise ask `question`
    /// (interactive) or fall back to `default` (non-interactive).
    pub fn value(
        &self,
        supplied: Option<String>,
        question: &str,
        default: Option<&str>,
    ) -> Result<Option<String>> {
        if let Some(value) = supplied.filter(|v| !v.trim().is_empty()) {
            return Ok(Some(value));
        }

        if !self.interactive {
            return Ok(default.map(str::to_owned));
        }

        let stdin = io::stdin();
        let answer = ask(&mut stdin.lock(), &mut io::stdout(), question, default)?;
        Ok(Some(answer).filter(|a| !a.is_empty()))
    }

    /// Ask a yes/no question; anything but `y` is no. Always no when not
    /// interactive.
    pub fn confirm(&self, question: &str) -> Result<bool> {
        if !self.interactive {
            return Ok(false);
        }

        let stdin = io::stdin();
        let answer = ask(&mut stdin.lock(), &mut io::stdout(), question, None)?;
        Ok(answer.eq_ignore_ascii_case("y"))
    }
}

/// Write `question` (with `[default]` when there is one), read one line and
/// return it trimmed, or the default when the line is empty.
pub fn ask<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
    default: Option<&str>,
) -> Result<String> {
    match default {
        Some(default) => write!(writer, "{question}[{default}]: ")?,
        None => write!(writer, "{question}")?,
    }
    writer.flush()?;

    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("Failed to read from stdin")?;

    let answer = line.trim();
    if answer.is_empty() {
        Ok(default.unwrap_or_default().to_owned())
    } else {
        Ok(answer.to_owned())
    }
}
