//! tokenlock command-line tool
//!
//! Issues, signs and validates machine-bound licenses.
//!
//! Usage:
//!   tokenlock pk
//!   tokenlock generate <MACHINE_ID> --issuer-id alex --valid-until 2025-09-01 --private-key <KEY>
//!   tokenlock sign <RAW_LICENSE> --private-key <KEY>
//!   tokenlock validate <LICENSE> [--public-key <KEY>] [--skip-datecheck]
//!   tokenlock check --issuer alex=<PUBLIC_KEY>

use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use tokenlock_cli::{describe, parse_expiry, parse_issuers, parse_signing_key, parse_verifying_key};
use tokenlock_drm::{Drm, EnvStorage, FileStorage, StorageConfig};
use tokenlock_license::License;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "tokenlock")]
#[command(about = "Issue and validate machine-bound licenses")]
struct Args {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate an Ed25519 operator key pair
    Pk,

    /// Generate a license for a machine id (signed if a private key is given)
    Generate {
        /// Machine id, e.g. l852qb
        machine_id: String,

        /// Issuer id (name)
        #[arg(short, long)]
        issuer_id: String,

        /// Valid until date unless lifelong (e.g. 2025-09-01)
        #[arg(short, long)]
        valid_until: Option<String>,

        /// Operator PRIVATE key for signing (never stored)
        #[arg(short = 'k', long)]
        private_key: Option<String>,
    },

    /// Sign a raw license with the operator private key
    Sign {
        /// Raw (unsigned) license
        license: String,

        /// Operator PRIVATE key (never stored)
        #[arg(short = 'k', long)]
        private_key: String,
    },

    /// Validate a raw or signed license
    Validate {
        /// License text; signed when a public key is given, raw otherwise
        license: String,

        /// Operator PUBLIC key (signed licenses only)
        #[arg(short, long)]
        public_key: Option<String>,

        /// Skip the expiry check (signature only)
        #[arg(short, long)]
        skip_datecheck: bool,
    },

    /// Load the stored license and validate it against trusted issuers
    Check {
        /// Trusted issuer as ID=PUBLIC_KEY (repeatable)
        #[arg(long = "issuer", required = true)]
        issuers: Vec<String>,

        /// Environment variable holding the license
        #[arg(long)]
        env_var: Option<String>,

        /// License file name in the working directory
        #[arg(long)]
        license_file: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    match args.command {
        Command::Pk => generate_pk(),
        Command::Generate {
            machine_id,
            issuer_id,
            valid_until,
            private_key,
        } => generate(machine_id, issuer_id, valid_until, private_key),
        Command::Sign {
            license,
            private_key,
        } => sign(&license, &private_key),
        Command::Validate {
            license,
            public_key,
            skip_datecheck,
        } => validate(&license, public_key.as_deref(), skip_datecheck),
        Command::Check {
            issuers,
            env_var,
            license_file,
        } => check(&issuers, env_var, license_file).await,
    }
}

fn generate_pk() -> Result<()> {
    let signing_key = SigningKey::generate(&mut OsRng);
    println!(
        "Public key HEX: {}\n",
        hex::encode(signing_key.verifying_key().to_bytes())
    );
    println!("Please save the operator key below to a secure place and NEVER SHARE IT!");
    println!("{}", hex::encode(signing_key.to_bytes()));
    Ok(())
}

fn generate(
    machine_id: String,
    issuer_id: String,
    valid_until: Option<String>,
    private_key: Option<String>,
) -> Result<()> {
    let expiry = valid_until.as_deref().map(parse_expiry).transpose()?;
    let signing_key = private_key.as_deref().map(parse_signing_key).transpose()?;
    let license = License::create(issuer_id, Some(machine_id), expiry, None)?;

    if let Some(key) = &signing_key {
        println!(
            "Operator public key HEX: {}\n",
            hex::encode(key.verifying_key().to_bytes())
        );
    }
    println!("{}\n", describe(&license, Utc::now()));

    match signing_key {
        Some(key) => {
            let license = license.sign(&key);
            println!("Signed license key:");
            println!("{}", license.signed_license()?);
        }
        None => {
            println!("Non-signed (RAW) license key:");
            println!("{}", license.raw_license());
        }
    }
    Ok(())
}

fn sign(raw: &str, private_key: &str) -> Result<()> {
    let key = parse_signing_key(private_key)?;
    let license = License::from_raw_license(raw)?;

    println!(
        "Operator public key HEX: {}\n",
        hex::encode(key.verifying_key().to_bytes())
    );
    println!("{}\n", describe(&license, Utc::now()));

    let license = license.sign(&key);
    println!("Signed license key:");
    println!("{}", license.signed_license()?);
    Ok(())
}

fn validate(text: &str, public_key: Option<&str>, skip_datecheck: bool) -> Result<()> {
    let public_key = public_key.map(parse_verifying_key).transpose()?;
    if public_key.is_none() && skip_datecheck {
        bail!("only the date can be validated for a NON signed license key, nothing to check");
    }

    let license = match public_key {
        Some(_) => License::from_signed_license(text)?,
        None => License::from_raw_license(text)?,
    };
    println!("{}\n", describe(&license, Utc::now()));

    let is_valid = match (&public_key, skip_datecheck) {
        (Some(key), true) => license.validate_signature(key)?,
        (key, _) => license.validate(key.as_ref())?,
    };

    if skip_datecheck {
        eprintln!("DATE VALIDATION SKIPPED!");
    }
    println!("{}", if is_valid { "LICENSE VALID" } else { "LICENSE INVALID" });
    Ok(())
}

async fn check(
    issuers: &[String],
    env_var: Option<String>,
    license_file: Option<String>,
) -> Result<()> {
    let mut config = StorageConfig::default();
    if let Some(var) = env_var {
        config.env_var = var;
    }
    if let Some(file) = license_file {
        config.file_name = file;
    }
    debug!(?config, "checking stored license");

    let mut drm = Drm::create(
        parse_issuers(issuers)?,
        vec![
            Box::new(EnvStorage::from_config(&config)),
            Box::new(FileStorage::from_config(&config)),
        ],
        None,
    )?;

    drm.load_license(&[]).await?;
    if let Some(license) = drm.license() {
        println!("{}\n", describe(license, Utc::now()));
    }
    let is_valid = drm.validate_license()?;
    println!("{}", if is_valid { "LICENSE VALID" } else { "LICENSE INVALID" });
    Ok(())
}
