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

#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![deny(warnings)]
#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod candidate;
pub use candidate::{CandidateFile, FileContent};

mod error;
pub use error::{ValidationError, ValidationKind};

mod format;
pub use format::format_file_size;

pub mod mime;

mod schema;
pub use schema::FieldSchema;

mod signing_form;
pub use signing_form::{FormReport, FormSlot, SigningForm, SigningFormState};

mod upload;
pub use upload::{CheckOrder, UploadControl, UploadState};

pub mod validators;
pub use validators::FileValidator;

#[cfg(test)]
pub(crate) mod tests;
