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

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use mcnl_crypto::{
    x509::{
        generate_certificate_chain, generate_intermediate_certificate, generate_leaf_certificate,
        generate_root_certificate, load_issuer, CaSigningContext, Certificate, CertificateSubject,
        CertificateTier, ChainRequest,
    },
    EcKeyPair,
};

use crate::{
    commands::OutputArgs,
    output::{save, CERT_GENERATOR},
    prompt::Prompter,
    settings::{Settings, SubjectDefaults},
};

/// Distinguished name fields shared by every `cert` command.
#[derive(Clone, Debug, Default, Args)]
pub struct SubjectArgs {
    /// Country code (e.g. NL).
    #[clap(long)]
    pub country: Option<String>,

    /// State or province.
    #[clap(long)]
    pub state: Option<String>,

    /// Organization name.
    #[clap(long)]
    pub organization: Option<String>,

    /// Organizational unit.
    #[clap(long)]
    pub organizational_unit: Option<String>,

    /// Common name. In `chain` the intermediate and leaf get " - Intermediate"
    /// and " - Leaf" appended.
    #[clap(long)]
    pub common_name: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Cert {
    /// Generate a root, an intermediate and (unless disabled) a leaf certificate.
    Chain {
        #[clap(flatten)]
        subject: SubjectArgs,

        /// Do not generate the leaf certificate.
        #[clap(long)]
        no_include_leaf: bool,

        #[clap(flatten)]
        output: OutputArgs,
    },
    /// Generate only a self-signed root certificate.
    Root {
        #[clap(flatten)]
        subject: SubjectArgs,

        /// Certificate serial number as hex.
        #[clap(long, default_value = "01")]
        serial_number: String,

        #[clap(flatten)]
        output: OutputArgs,
    },
    /// Generate an intermediate certificate signed by an existing root.
    Intermediate {
        /// Path to the root certificate PEM file.
        #[clap(long)]
        root_cert: Option<PathBuf>,

        /// Path to the root private key PEM file.
        #[clap(long)]
        root_key: Option<PathBuf>,

        #[clap(flatten)]
        subject: SubjectArgs,

        /// Certificate serial number as hex.
        #[clap(long, default_value = "02")]
        serial_number: String,

        #[clap(flatten)]
        output: OutputArgs,
    },
    /// Generate a leaf certificate signed by an existing intermediate.
    Leaf {
        /// Path to the intermediate certificate PEM file.
        #[clap(long)]
        intermediate_cert: Option<PathBuf>,

        /// Path to the intermediate private key PEM file.
        #[clap(long)]
        intermediate_key: Option<PathBuf>,

        #[clap(flatten)]
        subject: SubjectArgs,

        /// Certificate serial number as hex.
        #[clap(long, default_value = "03")]
        serial_number: String,

        #[clap(flatten)]
        output: OutputArgs,
    },
}

#[derive(Clone, Copy, Debug)]
enum Tier {
    Root,
    Intermediate,
    Leaf,
}

impl Tier {
    fn label(self) -> &'static str {
        match self {
            Tier::Root => "Root",
            Tier::Intermediate => "Intermediate",
            Tier::Leaf => "Leaf",
        }
    }

    fn file_prefix(self) -> &'static str {
        match self {
            Tier::Root => "root",
            Tier::Intermediate => "intermediate",
            Tier::Leaf => "leaf",
        }
    }
}

impl Cert {
    pub fn execute(&self, settings: &Settings) -> Result<()> {
        match self {
            Cert::Chain {
                subject,
                no_include_leaf,
                output,
            } => {
                let prompter = output.prompter();
                let base = subject.with_defaults(&settings.subject);
                let derived = |suffix: &str| SubjectArgs {
                    common_name: base
                        .common_name
                        .as_ref()
                        .map(|cn| format!("{cn} - {suffix}")),
                    ..base.clone()
                };

                let root = collect_subject(&prompter, &base, Tier::Root)?;
                let intermediate =
                    collect_subject(&prompter, &derived("Intermediate"), Tier::Intermediate)?;
                let leaf = if *no_include_leaf {
                    None
                } else {
                    Some(collect_subject(&prompter, &derived("Leaf"), Tier::Leaf)?)
                };

                println!("Generating certificate chain...");
                let chain = generate_certificate_chain(&ChainRequest {
                    root,
                    intermediate,
                    leaf,
                    ..Default::default()
                })?;

                let dir = output.directory(CERT_GENERATOR)?;
                save_tier(&dir, Tier::Root, &chain.root)?;
                save_tier(&dir, Tier::Intermediate, &chain.intermediate)?;
                if let Some(leaf) = &chain.leaf {
                    save_tier(&dir, Tier::Leaf, leaf)?;
                }
                save(&dir, "chain.pem", &chain.chain_pem)?;

                println!("Certificate chain written to {}", dir.display());
            }

            Cert::Root {
                subject,
                serial_number,
                output,
            } => {
                let prompter = output.prompter();
                let subject = collect_subject(
                    &prompter,
                    &subject.with_defaults(&settings.subject),
                    Tier::Root,
                )?;

                println!("Generating root certificate...");
                let root = generate_root_certificate(&subject, Some(serial_number.as_str()))?;
                let dir = output.directory(CERT_GENERATOR)?;
                save_tier(&dir, Tier::Root, &root)?;
            }

            Cert::Intermediate {
                root_cert,
                root_key,
                subject,
                serial_number,
                output,
            } => {
                let prompter = output.prompter();
                let root_cert = prompter.value(
                    path_string(root_cert),
                    "Path to root certificate (root-cert.pem): ",
                    None,
                )?;
                let root_key = prompter.value(
                    path_string(root_key),
                    "Path to root private key (root-private-key.pem): ",
                    None,
                )?;
                let (Some(root_cert), Some(root_key)) = (root_cert, root_key) else {
                    bail!(
                        "Root certificate and private key are required! Use --root-cert and \
                         --root-key flags or run in interactive mode."
                    );
                };

                let subject = collect_subject(
                    &prompter,
                    &subject.with_defaults(&settings.subject),
                    Tier::Intermediate,
                )?;

                println!("Loading root certificate...");
                let (certificate, key_pair) = read_issuer(&root_cert, &root_key)?;

                println!("Generating intermediate certificate...");
                let intermediate = generate_intermediate_certificate(
                    &subject,
                    Some(serial_number.as_str()),
                    CaSigningContext {
                        certificate: &certificate,
                        key_pair: &key_pair,
                    },
                )?;

                let dir = output.directory(CERT_GENERATOR)?;
                save_tier(&dir, Tier::Intermediate, &intermediate)?;
            }

            Cert::Leaf {
                intermediate_cert,
                intermediate_key,
                subject,
                serial_number,
                output,
            } => {
                let prompter = output.prompter();
                let intermediate_cert = prompter.value(
                    path_string(intermediate_cert),
                    "Path to intermediate certificate (intermediate-cert.pem): ",
                    None,
                )?;
                let intermediate_key = prompter.value(
                    path_string(intermediate_key),
                    "Path to intermediate private key (intermediate-private-key.pem): ",
                    None,
                )?;
                let (Some(intermediate_cert), Some(intermediate_key)) =
                    (intermediate_cert, intermediate_key)
                else {
                    bail!(
                        "Intermediate certificate and private key are required! Use \
                         --intermediate-cert and --intermediate-key flags or run in \
                         interactive mode."
                    );
                };

                let subject = collect_subject(
                    &prompter,
                    &subject.with_defaults(&settings.subject),
                    Tier::Leaf,
                )?;

                println!("Loading intermediate certificate...");
                let (certificate, key_pair) = read_issuer(&intermediate_cert, &intermediate_key)?;

                println!("Generating leaf certificate...");
                let leaf = generate_leaf_certificate(
                    &subject,
                    Some(serial_number.as_str()),
                    CaSigningContext {
                        certificate: &certificate,
                        key_pair: &key_pair,
                    },
                )?;

                let dir = output.directory(CERT_GENERATOR)?;
                save_tier(&dir, Tier::Leaf, &leaf)?;
            }
        }

        Ok(())
    }
}

impl SubjectArgs {
    /// Fill fields not given on the command line from the settings file.
    fn with_defaults(&self, defaults: &SubjectDefaults) -> Self {
        Self {
            country: self.country.clone().or_else(|| defaults.country.clone()),
            state: self.state.clone().or_else(|| defaults.state.clone()),
            organization: self
                .organization
                .clone()
                .or_else(|| defaults.organization.clone()),
            organizational_unit: self
                .organizational_unit
                .clone()
                .or_else(|| defaults.organizational_unit.clone()),
            common_name: self
                .common_name
                .clone()
                .or_else(|| defaults.common_name.clone()),
        }
    }
}

/// Prompt for any subject field that is still missing. Built-in defaults
/// are only offered when prompting; non-interactive runs require a common
/// name.
fn collect_subject(
    prompter: &Prompter,
    args: &SubjectArgs,
    tier: Tier,
) -> Result<CertificateSubject> {
    if prompter.is_interactive() {
        println!("\n{} Certificate Details", tier.label());
    }

    let offer = |default: &'static str| prompter.is_interactive().then_some(default);
    let ca_name = format!("{} CA", tier.label());

    let country = prompter.value(args.country.clone(), "Country (C): ", offer("NL"))?;
    let state = prompter.value(
        args.state.clone(),
        "State/Province (ST): ",
        offer("Zuid-Holland"),
    )?;
    let organization = prompter.value(
        args.organization.clone(),
        "Organization (O): ",
        offer("My Company"),
    )?;
    let organizational_unit = prompter.value(
        args.organizational_unit.clone(),
        "Organizational Unit (OU): ",
        offer("IT Department"),
    )?;
    let common_name = prompter.value(
        args.common_name.clone(),
        "Common Name (CN): ",
        prompter.is_interactive().then_some(ca_name.as_str()),
    )?;

    let Some(common_name) = common_name else {
        bail!("Common Name (CN) is required");
    };

    let mut subject = CertificateSubject::new(common_name);
    subject.country = country;
    subject.state = state;
    subject.organization = organization;
    subject.organizational_unit = organizational_unit;
    Ok(subject)
}

fn read_issuer(cert_path: &str, key_path: &str) -> Result<(Certificate, EcKeyPair)> {
    let cert_pem = fs::read_to_string(cert_path)
        .with_context(|| format!("Failed to read certificate {cert_path}"))?;
    let key_pem = fs::read_to_string(key_path)
        .with_context(|| format!("Failed to read private key {key_path}"))?;

    load_issuer(&cert_pem, &key_pem)
        .with_context(|| format!("Failed to load issuer from {cert_path} and {key_path}"))
}

fn save_tier(dir: &Path, tier: Tier, generated: &CertificateTier) -> Result<()> {
    let prefix = tier.file_prefix();
    save(dir, &format!("{prefix}-cert.pem"), &generated.certificate_pem)?;
    save(dir, &format!("{prefix}-private-key.pem"), &generated.private_key_pem)?;

    let subject = generated.certificate.subject()?;
    let issuer = generated.certificate.issuer()?;
    println!(
        "{} certificate: {} (issued by {})",
        tier.label(),
        subject.common_name,
        issuer.common_name
    );
    Ok(())
}

fn path_string(path: &Option<PathBuf>) -> Option<String> {
    path.as_ref().map(|p| p.display().to_string())
}
