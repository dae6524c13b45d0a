use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
mod auth;
mod logging;
use credcheck::{KdfParams, Scheme, policy};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, clap::Args)]
struct Argon2Args {
    /// Target Argon2 memory cost in KiB (default: 65536)
    #[arg(long = "argon-mem")]
    mem_cost_kib: Option<u32>,

    /// Target Argon2 time cost / iterations (default: 4)
    #[arg(long = "argon-time")]
    time_cost: Option<u32>,

    /// Target Argon2 parallelism (default: 1)
    #[arg(long = "argon-parallelism")]
    parallelism: Option<u32>,
}

impl Argon2Args {
    fn to_kdf_params(&self) -> Result<KdfParams> {
        let default = KdfParams::default();

        Ok(KdfParams::new(
            self.mem_cost_kib.unwrap_or(default.mem_cost_kib()),
            self.time_cost.unwrap_or(default.time_cost()),
            self.parallelism.unwrap_or(default.parallelism()),
        )?)
    }
}

#[derive(Debug, clap::Args)]
struct StoredArgs {
    /// Stored credential string, as kept in the user table
    #[arg(long, value_name = "HASH", env = "CREDCHECK_STORED")]
    stored: Option<String>,

    /// Read the stored credential from a file (takes precedence over --stored)
    #[arg(long, value_name = "PATH")]
    stored_file: Option<PathBuf>,
}

impl StoredArgs {
    fn resolve(&self) -> Result<String> {
        if let Some(path) = &self.stored_file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read stored credential from {}", path.display()));
        }
        match &self.stored {
            Some(s) => Ok(s.clone()),
            None => bail!("no stored credential given; use --stored, --stored-file or CREDCHECK_STORED"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "credcheck")]
#[command(
    version,
    about = "Verify passwords against stored bcrypt, Argon2 and legacy digest credentials."
)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Checks a password against a stored credential
    Verify {
        #[command(flatten)]
        stored: StoredArgs,
    },

    /// Shows which scheme produced a stored credential
    Classify {
        #[command(flatten)]
        stored: StoredArgs,

        /// Print a JSON report
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Tells whether a stored credential should be replaced by a fresh Argon2id hash
    NeedsRehash {
        #[command(flatten)]
        stored: StoredArgs,

        #[command(flatten)]
        argon2: Argon2Args,

        /// Print a JSON report
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Checks a password against the strength policy
    Strength {
        /// Minimum number of characters
        #[arg(long, default_value_t = policy::DEFAULT_MIN_LENGTH)]
        min_length: usize,
    },
}

#[derive(Serialize)]
struct ClassifyReport<'a> {
    scheme: Option<Scheme>,
    name: &'a str,
    usable: bool,
    problem: Option<String>,
}

#[derive(Serialize)]
struct RehashReport<'a> {
    name: &'a str,
    needs_rehash: bool,
    target: KdfParams,
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    logging::init(args.log_json);

    match args.command {
        Commands::Verify { stored } => {
            let stored = stored.resolve()?;
            let password = auth::read_password()?;

            if credcheck::verify(&password, stored.as_str()) {
                println!("password matches");
            } else {
                println!("password does not match");
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Classify { stored, json } => {
            let stored = stored.resolve()?;
            let name = credcheck::classify(stored.as_str());
            let inspection = credcheck::inspect(&stored);

            let report = ClassifyReport {
                scheme: inspection.as_ref().ok().copied(),
                name,
                usable: inspection.is_ok(),
                problem: inspection.as_ref().err().map(ToString::to_string),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                match &report.problem {
                    None => println!("{name}"),
                    Some(problem) => println!("{name} (unusable: {problem})"),
                }
            }
        }
        Commands::NeedsRehash {
            stored,
            argon2,
            json,
        } => {
            let stored = stored.resolve()?;
            let target = argon2.to_kdf_params()?;

            let report = RehashReport {
                name: credcheck::classify(stored.as_str()),
                needs_rehash: credcheck::needs_rehash(&stored, &target),
                target,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.needs_rehash {
                println!("rehash needed ({})", report.name);
            } else {
                println!("up to date");
            }
        }
        Commands::Strength { min_length } => {
            let password = auth::read_password()?;
            let report = policy::check_strength(&password, min_length);
            println!("{report}");
            if !report.is_valid() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
