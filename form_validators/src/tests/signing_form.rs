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

use mcnl_status_tracker::{validation_codes, ErrorBehavior};

use super::{asset_file, certificate_file, did_file, private_key_file};
use crate::{mime, CandidateFile, FormSlot, SigningForm, SigningFormState, ValidationKind};

fn complete_state() -> SigningFormState {
    SigningFormState {
        leaf_certificate: Some(certificate_file("leaf-cert.pem")),
        leaf_private_key: Some(private_key_file()),
        intermediate_certificate: Some(certificate_file("intermediate-cert.pem")),
        did_file: Some(did_file()),
        asset_file: Some(asset_file()),
    }
}

#[test]
fn complete_form_is_valid() {
    let report = SigningForm::new().validate(&complete_state(), ErrorBehavior::StopOnFirstError);

    assert!(report.is_valid());
    assert_eq!(report.errors().count(), 0);
    assert_eq!(
        report
            .log()
            .logged_items()
            .iter()
            .filter(|item| item.validation_status.as_deref() == Some(validation_codes::FIELD_VALID))
            .count(),
        5
    );
}

#[test]
fn empty_form_requires_every_slot() {
    let report = SigningForm::new().validate(&SigningFormState::default(), ErrorBehavior::ContinueWhenPossible);

    assert!(!report.is_valid());
    for slot in FormSlot::ALL {
        let errors = report.errors_for(slot);
        assert_eq!(errors.len(), 1, "{slot}");
        assert_eq!(errors[0].kind, ValidationKind::Required);
    }
}

#[test]
fn slots_are_reported_in_form_order() {
    let report = SigningForm::new().validate(&SigningFormState::default(), ErrorBehavior::StopOnFirstError);
    let slots: Vec<FormSlot> = report.errors().map(|(slot, _)| slot).collect();

    assert_eq!(slots, FormSlot::ALL.to_vec());
}

#[test]
fn did_slot_checks_document_not_pem() {
    let mut state = complete_state();
    state.set(
        FormSlot::DidFile,
        Some(certificate_file("did.json").with_mime_type(mime::APPLICATION_JSON)),
    );

    let report = SigningForm::new().validate(&state, ErrorBehavior::ContinueWhenPossible);

    let errors = report.errors_for(FormSlot::DidFile);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ValidationKind::DidDocument);
    assert!(report.errors_for(FormSlot::LeafCertificate).is_empty());
}

#[test]
fn private_key_slot_is_not_parsed_as_certificate() {
    let report = SigningForm::new().validate(&complete_state(), ErrorBehavior::ContinueWhenPossible);
    assert!(report.errors_for(FormSlot::LeafPrivateKey).is_empty());
}

#[test]
fn first_versus_all_errors() {
    let mut state = complete_state();
    state.asset_file = Some(
        CandidateFile::from_bytes("movie.mov", "video/quicktime", vec![0])
            .with_size(mime::ASSET_MAX_SIZE + 1),
    );

    let form = SigningForm::new();
    let first = form.validate(&state, ErrorBehavior::StopOnFirstError);
    let all = form.validate(&state, ErrorBehavior::ContinueWhenPossible);

    assert_eq!(first.errors_for(FormSlot::AssetFile).len(), 1);
    assert_eq!(first.errors_for(FormSlot::AssetFile)[0].message, "File size must be less than 1 GB");

    let messages: Vec<&str> = all
        .errors_for(FormSlot::AssetFile)
        .iter()
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(
        messages,
        vec![
            "File size must be less than 1 GB",
            "File type must be one of: image/jpeg, image/png, image/heic, image/heif, video/mp4, audio/mpeg",
        ]
    );
}

#[test]
fn certificate_slot_limits() {
    let form = SigningForm::new();
    let schema = form.schema(FormSlot::IntermediateCertificate).unwrap();

    assert_eq!(schema.field(), "intermediateCertificate");
    assert_eq!(schema.len(), 4);
    assert_eq!(form.schema(FormSlot::LeafPrivateKey).unwrap().len(), 3);
}

#[test]
fn state_set_returns_previous() {
    let mut state = SigningFormState::default();
    assert!(state.set(FormSlot::AssetFile, Some(asset_file())).is_none());

    let previous = state.set(FormSlot::AssetFile, None).unwrap();
    assert_eq!(previous.name(), "photo.jpg");
    assert!(state.get(FormSlot::AssetFile).is_none());
}

#[test]
fn slot_names_round_trip() {
    for slot in FormSlot::ALL {
        assert_eq!(slot.as_str().parse::<FormSlot>().unwrap(), slot);
    }
    assert!("signature".parse::<FormSlot>().is_err());
}
