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

//! Codes recorded in [`LogItem::validation_status`] by the file validators.
//!
//! [`LogItem::validation_status`]: crate::LogItem::validation_status

/// The file was smaller than the minimum or larger than the maximum size.
pub const FILE_SIZE: &str = "fileSize";

/// The file's declared MIME type is not one of the accepted types.
pub const FILE_MIME_TYPE: &str = "fileMimeType";

/// The file could not be parsed as a PEM-encoded X.509 certificate.
pub const PEM_CERTIFICATE: &str = "pemCertificate";

/// No file was supplied for a mandatory field.
pub const REQUIRED: &str = "required";

/// The file could not be parsed as a DID document.
pub const DID_DOCUMENT: &str = "didDocument";

/// The file passed every validator attached to its field.
pub const FIELD_VALID: &str = "field.valid";
