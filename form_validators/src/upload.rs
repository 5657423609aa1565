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

//! State of a single file-upload control.
//!
//! A control accepts one file at a time, offered either by dropping it on
//! the control or by picking it from a file dialog. Both paths end in
//! [`UploadControl::handle_candidate_file`], which runs the MIME-type and
//! size checks in the configured [`CheckOrder`].

use crate::{
    format_file_size,
    validators::{FileMimeTypeValidator, FileSizeValidator, FileValidator},
    CandidateFile, ValidationError,
};

/// Which check runs first when a file fails both.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CheckOrder {
    /// Check the MIME type, then the size.
    #[default]
    MimeTypeFirst,

    /// Check the size, then the MIME type.
    SizeFirst,
}

/// What the control currently holds.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum UploadState {
    /// No file.
    #[default]
    Empty,

    /// A file that passed both checks.
    Accepted(CandidateFile),

    /// The last offered file was rejected; it is not retained.
    Rejected(String),
}

/// A drag-and-drop / pick-a-file upload control.
#[derive(Clone, Debug)]
pub struct UploadControl {
    field_id: String,
    mime_validator: FileMimeTypeValidator,
    size_validator: FileSizeValidator,
    max_file_size_bytes: u64,
    check_order: CheckOrder,
    state: UploadState,
    is_dragging: bool,
    external_errors: Vec<ValidationError>,
}

impl UploadControl {
    /// Create a control accepting `accepted_mime_types` up to
    /// `max_file_size_bytes`, with a random field id.
    pub fn new<I, S>(accepted_mime_types: I, max_file_size_bytes: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field_id: format!("file-upload-{:012x}", rand::random::<u64>() & 0xffff_ffff_ffff),
            mime_validator: FileMimeTypeValidator::new(accepted_mime_types),
            size_validator: FileSizeValidator::max(max_file_size_bytes),
            max_file_size_bytes,
            check_order: CheckOrder::default(),
            state: UploadState::Empty,
            is_dragging: false,
            external_errors: Vec::new(),
        }
    }

    /// Use a fixed field id.
    pub fn with_field_id<S: Into<String>>(mut self, field_id: S) -> Self {
        self.field_id = field_id.into();
        self
    }

    /// Choose which check runs first.
    pub fn with_check_order(mut self, check_order: CheckOrder) -> Self {
        self.check_order = check_order;
        self
    }

    /// Field id, used to tie a label to the control.
    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    /// Accepted MIME types joined with `,`, as for an `accept` attribute.
    pub fn accept_attribute(&self) -> String {
        self.mime_validator.accepted().join(",")
    }

    /// Human-readable size limit.
    pub fn max_file_size_label(&self) -> String {
        format_file_size(self.max_file_size_bytes)
    }

    /// Current state.
    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// The accepted file, if any.
    pub fn file(&self) -> Option<&CandidateFile> {
        match &self.state {
            UploadState::Accepted(file) => Some(file),
            _ => None,
        }
    }

    /// Whether a drag is hovering over the control.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// A drag entered or moved over the control.
    pub fn drag_over(&mut self) {
        self.is_dragging = true;
    }

    /// A drag left the control.
    pub fn drag_leave(&mut self) {
        self.is_dragging = false;
    }

    /// Files dropped on the control. Only the first is considered; an empty
    /// drop is ignored.
    pub fn offer_dropped(
        &mut self,
        files: Vec<CandidateFile>,
    ) -> Option<Result<(), ValidationError>> {
        self.is_dragging = false;
        self.offer_first(files)
    }

    /// Files picked from a dialog. Only the first is considered; an empty
    /// selection is ignored.
    pub fn offer_picked(
        &mut self,
        files: Vec<CandidateFile>,
    ) -> Option<Result<(), ValidationError>> {
        self.offer_first(files)
    }

    fn offer_first(&mut self, files: Vec<CandidateFile>) -> Option<Result<(), ValidationError>> {
        let file = files.into_iter().next()?;
        Some(self.handle_candidate_file(file))
    }

    /// Check `file` and either accept it or record the first failure.
    pub fn handle_candidate_file(&mut self, file: CandidateFile) -> Result<(), ValidationError> {
        let checks: [&dyn FileValidator; 2] = match self.check_order {
            CheckOrder::MimeTypeFirst => [&self.mime_validator, &self.size_validator],
            CheckOrder::SizeFirst => [&self.size_validator, &self.mime_validator],
        };

        let result = checks.iter().try_for_each(|check| check.validate(Some(&file)));

        match result {
            Ok(()) => {
                log::debug!("{}: accepted {}", self.field_id, file.name());
                self.state = UploadState::Accepted(file);
                Ok(())
            }
            Err(err) => {
                log::debug!("{}: rejected {}: {err}", self.field_id, file.name());
                self.state = UploadState::Rejected(err.message.clone());
                Err(err)
            }
        }
    }

    /// Clear the file and any rejection.
    pub fn remove_file(&mut self) {
        self.state = UploadState::Empty;
    }

    /// Replace the errors supplied by the surrounding form.
    pub fn set_errors(&mut self, errors: Vec<ValidationError>) {
        self.external_errors = errors;
    }

    /// Messages of the form's errors followed by the control's own
    /// rejection.
    pub fn error_messages(&self) -> Vec<String> {
        let mut messages: Vec<String> = self
            .external_errors
            .iter()
            .filter(|e| !e.message.is_empty())
            .map(|e| e.message.clone())
            .collect();

        if let UploadState::Rejected(message) = &self.state {
            messages.push(message.clone());
        }

        messages
    }

    /// Returns `true` if [`error_messages`](Self::error_messages) is not
    /// empty.
    pub fn has_errors(&self) -> bool {
        !self.error_messages().is_empty()
    }
}
