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

//! MIME types accepted by the signing form, grouped per upload slot, and
//! the size limits that go with them.

use std::path::Path;

#[allow(missing_docs)]
pub const IMAGE_JPEG: &str = "image/jpeg";
#[allow(missing_docs)]
pub const IMAGE_PNG: &str = "image/png";
#[allow(missing_docs)]
pub const IMAGE_HEIC: &str = "image/heic";
#[allow(missing_docs)]
pub const IMAGE_HEIF: &str = "image/heif";
#[allow(missing_docs)]
pub const VIDEO_MP4: &str = "video/mp4";
#[allow(missing_docs)]
pub const AUDIO_MPEG: &str = "audio/mpeg";
#[allow(missing_docs)]
pub const APPLICATION_JSON: &str = "application/json";
#[allow(missing_docs)]
pub const APPLICATION_LD_JSON: &str = "application/ld+json";
#[allow(missing_docs)]
pub const APPLICATION_X_X509_CA_CERT: &str = "application/x-x509-ca-cert";
#[allow(missing_docs)]
pub const APPLICATION_X_PEM_FILE: &str = "application/x-pem-file";

/// Types accepted for certificates and private keys.
pub const CERTIFICATE_MIME_TYPES: &[&str] = &[APPLICATION_X_X509_CA_CERT, APPLICATION_X_PEM_FILE];

/// Types accepted for DID documents.
pub const DID_MIME_TYPES: &[&str] = &[APPLICATION_JSON, APPLICATION_LD_JSON];

/// Types accepted for the asset to sign.
pub const ASSET_MIME_TYPES: &[&str] = &[
    IMAGE_JPEG, IMAGE_PNG, IMAGE_HEIC, IMAGE_HEIF, VIDEO_MP4, AUDIO_MPEG,
];

/// Largest accepted certificate or key file (5 MiB).
pub const CERTIFICATE_MAX_SIZE: u64 = 5 * 1024 * 1024;

/// Largest accepted DID document (2 MiB).
pub const DID_MAX_SIZE: u64 = 2 * 1024 * 1024;

/// Largest accepted asset (1 GiB).
pub const ASSET_MAX_SIZE: u64 = 1024 * 1024 * 1024;

/// Guess a MIME type from a file extension, for files read from disk.
pub fn guess_from_path<P: AsRef<Path>>(path: P) -> Option<&'static str> {
    let ext = path.as_ref().extension()?.to_str()?.to_lowercase();

    Some(match ext.as_str() {
        "jpg" | "jpeg" => IMAGE_JPEG,
        "png" => IMAGE_PNG,
        "heic" => IMAGE_HEIC,
        "heif" => IMAGE_HEIF,
        "mp4" | "m4v" => VIDEO_MP4,
        "mp3" => AUDIO_MPEG,
        "json" => APPLICATION_JSON,
        "jsonld" => APPLICATION_LD_JSON,
        "crt" | "cer" | "der" => APPLICATION_X_X509_CA_CERT,
        "pem" | "key" => APPLICATION_X_PEM_FILE,
        _ => return None,
    })
}

/// Returns `true` if `mime_type` matches `pattern`, which is either an
/// exact `type/subtype` or a `type/*` wildcard. Comparison ignores case.
pub fn matches(pattern: &str, mime_type: &str) -> bool {
    let pattern = pattern.trim();
    let mime_type = mime_type.trim();

    match pattern.strip_suffix("/*") {
        Some(top_level) => mime_type
            .split_once('/')
            .is_some_and(|(t, subtype)| !subtype.is_empty() && t.eq_ignore_ascii_case(top_level)),
        None => pattern.eq_ignore_ascii_case(mime_type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_known_extensions() {
        assert_eq!(guess_from_path("cert.pem"), Some(APPLICATION_X_PEM_FILE));
        assert_eq!(guess_from_path("dir/root.CRT"), Some(APPLICATION_X_X509_CA_CERT));
        assert_eq!(guess_from_path("did.json"), Some(APPLICATION_JSON));
        assert_eq!(guess_from_path("photo.JPG"), Some(IMAGE_JPEG));
        assert_eq!(guess_from_path("clip.mp4"), Some(VIDEO_MP4));
    }

    #[test]
    fn unknown_extensions() {
        assert_eq!(guess_from_path("notes.txt"), None);
        assert_eq!(guess_from_path("Makefile"), None);
    }

    #[test]
    fn exact_and_wildcard_matches() {
        assert!(matches("image/png", "image/png"));
        assert!(matches("image/png", "IMAGE/PNG"));
        assert!(matches("image/*", "image/heic"));
        assert!(matches("IMAGE/*", "image/jpeg"));
        assert!(!matches("image/*", "video/mp4"));
        assert!(!matches("image/*", "image/"));
        assert!(!matches("image/png", "image/jpeg"));
        assert!(!matches("application/json", ""));
    }

    #[test]
    fn groups_and_limits() {
        assert_eq!(CERTIFICATE_MIME_TYPES.len(), 2);
        assert_eq!(DID_MIME_TYPES.len(), 2);
        assert_eq!(ASSET_MIME_TYPES.len(), 6);
        assert_eq!(CERTIFICATE_MAX_SIZE, 5_242_880);
        assert_eq!(DID_MAX_SIZE, 2_097_152);
        assert_eq!(ASSET_MAX_SIZE, 1_073_741_824);
    }
}
