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

//! Tools for working with raw signature algorithms.

mod es256_signer;
pub use es256_signer::Es256Signer;

mod ecdsa_validator;
pub use ecdsa_validator::EcdsaValidator;

mod signer;
pub use signer::{RawSigner, RawSignerError, SignatureFormat};

mod validator;
pub use validator::{RawSignatureValidationError, RawSignatureValidator};
