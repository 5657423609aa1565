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

mod cert;
mod did;
mod serve;
mod validate;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};

pub use self::{cert::Cert, did::Did, serve::Serve, validate::Validate};
use crate::{output::output_directory, prompt::Prompter, settings::Settings};

/// Tool for generating signing certificates, did:web documents and
/// employment credentials.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML file with default subject, credential and server values.
    #[arg(long, global = true, env = "MCNLTOOL_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Use verbose output (-vv very verbose output).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CliArgs {
    pub fn execute(&self) -> Result<()> {
        let settings = Settings::load(self.settings.as_deref())?;

        match &self.command {
            Commands::Cert(cert) => cert.execute(&settings),
            Commands::Did(did) => did.execute(&settings),
            Commands::Validate(validate) => validate.execute(),
            Commands::Serve(serve) => serve.execute(&settings),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a C2PA signing certificate chain or a single tier of it.
    #[clap(subcommand)]
    Cert(Cert),
    /// Generate ES256 keys, a did:web document and employment credentials.
    #[clap(subcommand)]
    Did(Did),
    /// Check the files for a signing request before uploading them.
    Validate(Validate),
    /// Serve a DID document at /.well-known/did.json for local testing.
    Serve(Serve),
}

/// Where generated files go and whether missing values are prompted for.
#[derive(Clone, Debug, Default, Args)]
pub struct OutputArgs {
    /// Output directory, created if missing. Defaults to ./output/<tool>/<timestamp>.
    #[clap(short, long, env = "MCNLTOOL_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Do not prompt; every required value must come from flags or settings.
    #[clap(long)]
    pub no_interactive: bool,
}

impl OutputArgs {
    pub fn prompter(&self) -> Prompter {
        Prompter::new(!self.no_interactive)
    }

    /// Create the output directory for `tool`.
    pub fn directory(&self, tool: &str) -> Result<PathBuf> {
        let dir = output_directory(tool, self.output.as_deref())?;
        println!("Output directory: {}", dir.display());
        Ok(dir)
    }

    /// Like [`OutputArgs::directory`], but offers to pick a custom
    /// directory first when none was given and prompting is allowed.
    pub fn directory_or_ask(&self, tool: &str) -> Result<PathBuf> {
        let prompter = self.prompter();
        if self.output.is_none() && prompter.confirm("Use custom output directory? (y/N): ")? {
            if let Some(custom) = prompter.value(None, "Enter output directory path: ", None)? {
                return Self {
                    output: Some(PathBuf::from(custom)),
                    ..self.clone()
                }
                .directory(tool);
            }
        }

        self.directory(tool)
    }
}
