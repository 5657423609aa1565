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

mod certificate;
mod generator;
mod subject;

use crate::x509::CertificateSubject;

fn sample_subject(cn: &str) -> CertificateSubject {
    CertificateSubject::new(cn)
        .with_country("NL")
        .with_state("Zuid-Holland")
        .with_organization("My Company")
        .with_organizational_unit("IT Department")
}
