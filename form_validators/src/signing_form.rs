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

use std::{collections::BTreeMap, fmt, str::FromStr};

use mcnl_status_tracker::{ErrorBehavior, StatusTracker};

use crate::{mime, CandidateFile, FieldSchema, ValidationError};

/// The file slots of the signing form.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum FormSlot {
    /// Leaf (signing) certificate PEM.
    LeafCertificate,

    /// Private key of the leaf certificate.
    LeafPrivateKey,

    /// Intermediate certificate PEM.
    IntermediateCertificate,

    /// Signer's DID document.
    DidFile,

    /// The asset to sign.
    AssetFile,
}

impl FormSlot {
    /// Every slot, in form order.
    pub const ALL: [FormSlot; 5] = [
        Self::LeafCertificate,
        Self::LeafPrivateKey,
        Self::IntermediateCertificate,
        Self::DidFile,
        Self::AssetFile,
    ];

    /// Field name as used in the form model.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LeafCertificate => "leafCertificate",
            Self::LeafPrivateKey => "leafPrivateKey",
            Self::IntermediateCertificate => "intermediateCertificate",
            Self::DidFile => "didFile",
            Self::AssetFile => "assetFile",
        }
    }
}

impl fmt::Display for FormSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| format!("unknown form field `{s}`"))
    }
}

/// Files currently held by the signing form.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SigningFormState {
    /// Leaf certificate.
    pub leaf_certificate: Option<CandidateFile>,

    /// Leaf private key.
    pub leaf_private_key: Option<CandidateFile>,

    /// Intermediate certificate.
    pub intermediate_certificate: Option<CandidateFile>,

    /// DID document.
    pub did_file: Option<CandidateFile>,

    /// Asset.
    pub asset_file: Option<CandidateFile>,
}

impl SigningFormState {
    /// The file in `slot`, if any.
    pub fn get(&self, slot: FormSlot) -> Option<&CandidateFile> {
        match slot {
            FormSlot::LeafCertificate => self.leaf_certificate.as_ref(),
            FormSlot::LeafPrivateKey => self.leaf_private_key.as_ref(),
            FormSlot::IntermediateCertificate => self.intermediate_certificate.as_ref(),
            FormSlot::DidFile => self.did_file.as_ref(),
            FormSlot::AssetFile => self.asset_file.as_ref(),
        }
    }

    /// Put `file` in `slot`, returning the previous file.
    pub fn set(&mut self, slot: FormSlot, file: Option<CandidateFile>) -> Option<CandidateFile> {
        let target = match slot {
            FormSlot::LeafCertificate => &mut self.leaf_certificate,
            FormSlot::LeafPrivateKey => &mut self.leaf_private_key,
            FormSlot::IntermediateCertificate => &mut self.intermediate_certificate,
            FormSlot::DidFile => &mut self.did_file,
            FormSlot::AssetFile => &mut self.asset_file,
        };

        std::mem::replace(target, file)
    }
}

/// Validation schema of the signing form.
#[derive(Debug)]
pub struct SigningForm {
    fields: Vec<(FormSlot, FieldSchema)>,
}

impl Default for SigningForm {
    fn default() -> Self {
        let certificate = |slot: FormSlot| {
            FieldSchema::new(slot.as_str())
                .required()
                .pem_certificate()
                .max_size(mime::CERTIFICATE_MAX_SIZE)
                .mime_types(mime::CERTIFICATE_MIME_TYPES)
        };

        Self {
            fields: vec![
                (FormSlot::LeafCertificate, certificate(FormSlot::LeafCertificate)),
                (
                    FormSlot::LeafPrivateKey,
                    FieldSchema::new(FormSlot::LeafPrivateKey.as_str())
                        .required()
                        .max_size(mime::CERTIFICATE_MAX_SIZE)
                        .mime_types(mime::CERTIFICATE_MIME_TYPES),
                ),
                (
                    FormSlot::IntermediateCertificate,
                    certificate(FormSlot::IntermediateCertificate),
                ),
                (
                    FormSlot::DidFile,
                    FieldSchema::new(FormSlot::DidFile.as_str())
                        .required()
                        .did_document()
                        .max_size(mime::DID_MAX_SIZE)
                        .mime_types(mime::DID_MIME_TYPES),
                ),
                (
                    FormSlot::AssetFile,
                    FieldSchema::new(FormSlot::AssetFile.as_str())
                        .required()
                        .max_size(mime::ASSET_MAX_SIZE)
                        .mime_types(mime::ASSET_MIME_TYPES),
                ),
            ],
        }
    }
}

impl SigningForm {
    /// The standard signing form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema of one slot.
    pub fn schema(&self, slot: FormSlot) -> Option<&FieldSchema> {
        self.fields
            .iter()
            .find_map(|(s, schema)| (*s == slot).then_some(schema))
    }

    /// Validate every slot of `state`.
    ///
    /// With [`ErrorBehavior::StopOnFirstError`] each slot reports at most
    /// its first failure; with [`ErrorBehavior::ContinueWhenPossible`] every
    /// failure is reported. All slots are always validated.
    pub fn validate(&self, state: &SigningFormState, mode: ErrorBehavior) -> FormReport {
        let mut tracker = StatusTracker::with_error_behavior(mode);
        let mut errors = BTreeMap::new();

        for (slot, schema) in &self.fields {
            let slot_errors = schema.validate(state.get(*slot), &mut tracker);
            if !slot_errors.is_empty() {
                errors.insert(*slot, slot_errors);
            }
        }

        log::debug!(
            "signing form validated: {} of {} fields with errors",
            errors.len(),
            self.fields.len()
        );

        FormReport { errors, tracker }
    }
}

/// Outcome of [`SigningForm::validate`].
#[derive(Debug)]
pub struct FormReport {
    errors: BTreeMap<FormSlot, Vec<ValidationError>>,
    tracker: StatusTracker,
}

impl FormReport {
    /// Returns `true` if no slot has errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors of one slot, in validator order.
    pub fn errors_for(&self, slot: FormSlot) -> &[ValidationError] {
        self.errors.get(&slot).map(Vec::as_slice).unwrap_or_default()
    }

    /// Slots with errors, in form order.
    pub fn errors(&self) -> impl Iterator<Item = (FormSlot, &[ValidationError])> {
        self.errors.iter().map(|(slot, errs)| (*slot, errs.as_slice()))
    }

    /// The full validation log, including `field.valid` entries.
    pub fn log(&self) -> &StatusTracker {
        &self.tracker
    }
}
