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

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use mcnl_form_validators::{
    format_file_size, CandidateFile, FormReport, FormSlot, SigningForm, SigningFormState,
};
use mcnl_status_tracker::ErrorBehavior;
use serde_json::{json, Map, Value};

/// Validates the files of a signing request the same way the upload form
/// does. MIME types are guessed from file extensions.
#[derive(Debug, Parser)]
pub struct Validate {
    /// Leaf (signing) certificate PEM.
    #[clap(long)]
    pub leaf_certificate: Option<PathBuf>,

    /// Private key of the leaf certificate.
    #[clap(long)]
    pub leaf_private_key: Option<PathBuf>,

    /// Intermediate certificate PEM.
    #[clap(long)]
    pub intermediate_certificate: Option<PathBuf>,

    /// DID document (did.json).
    #[clap(long)]
    pub did_file: Option<PathBuf>,

    /// Asset to be signed.
    #[clap(long)]
    pub asset_file: Option<PathBuf>,

    /// Report every failing check per file instead of only the first.
    #[clap(long)]
    pub all_errors: bool,

    /// Print the report as JSON.
    #[clap(long)]
    pub json: bool,
}

impl Validate {
    pub fn execute(&self) -> Result<()> {
        let state = self.load_state()?;

        let mode = if self.all_errors {
            ErrorBehavior::ContinueWhenPossible
        } else {
            ErrorBehavior::StopOnFirstError
        };
        let report = SigningForm::default().validate(&state, mode);
        log::debug!("validation log: {}", report.log());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report_json(&report)?)?);
        } else {
            print_report(&state, &report);
        }

        let failed = report.errors().count();
        if failed > 0 {
            bail!("{failed} of {} fields failed validation", FormSlot::ALL.len());
        }

        Ok(())
    }

    fn load_state(&self) -> Result<SigningFormState> {
        let mut state = SigningFormState::default();

        for (slot, path) in [
            (FormSlot::LeafCertificate, &self.leaf_certificate),
            (FormSlot::LeafPrivateKey, &self.leaf_private_key),
            (FormSlot::IntermediateCertificate, &self.intermediate_certificate),
            (FormSlot::DidFile, &self.did_file),
            (FormSlot::AssetFile, &self.asset_file),
        ] {
            if let Some(path) = path {
                let file = CandidateFile::from_path(path)
                    .with_context(|| format!("Failed to open {} for {slot}", path.display()))?;
                state.set(slot, Some(file));
            }
        }

        Ok(state)
    }
}

fn print_report(state: &SigningFormState, report: &FormReport) {
    for slot in FormSlot::ALL {
        let file = match state.get(slot) {
            Some(file) => format!(
                "{} ({}, {})",
                file.name(),
                file.mime_type(),
                format_file_size(file.size())
            ),
            None => "no file".to_owned(),
        };

        let errors = report.errors_for(slot);
        if errors.is_empty() {
            println!("{slot}: {file}: valid");
        } else {
            println!("{slot}: {file}");
            for error in errors {
                println!("    {}: {error}", error.kind);
            }
        }
    }
}

fn report_json(report: &FormReport) -> Result<Value> {
    let mut errors = Map::new();
    for (slot, slot_errors) in report.errors() {
        errors.insert(slot.to_string(), serde_json::to_value(slot_errors)?);
    }

    Ok(json!({
        "valid": report.is_valid(),
        "errors": errors,
    }))
}
