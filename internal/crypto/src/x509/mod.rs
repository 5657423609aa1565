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

//! X.509 certificate handling: subject names, parsed certificate handles and
//! the root / intermediate / leaf chain generator.

mod certificate;
pub use certificate::{BasicConstraintsInfo, Certificate, KeyUsageInfo};

mod error;
pub use error::X509Error;

mod generator;
pub use generator::{
    generate_certificate_chain, generate_intermediate_certificate, generate_leaf_certificate,
    generate_root_certificate, load_issuer, CaSigningContext, CertificateChain, CertificateTier,
    ChainRequest, DEFAULT_INTERMEDIATE_SERIAL, DEFAULT_LEAF_SERIAL, DEFAULT_ROOT_SERIAL,
};

pub mod oids;

mod subject;
pub use subject::CertificateSubject;
