/// Configuration module for managing environment variables and run settings
///
/// This module loads and validates all configuration values from
/// environment variables (typically from a .env file), including the
/// conversion profile and scan policy that parameterize a run.

use anyhow::{bail, Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;

/// A single unit-to-unit text conversion: multiply by `factor`, render with
/// `decimals` fixed-point places, append `suffix`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionProfile {
    pub factor: f64,
    pub suffix: &'static str,
    pub decimals: usize,
}

impl ConversionProfile {
    /// Inches to millimeters, one decimal place ("25.4 mm").
    pub fn millimeters() -> Self {
        ConversionProfile {
            factor: 25.4,
            suffix: "mm",
            decimals: 1,
        }
    }

    /// Inches to centimeters, two decimal places ("2.54 cm").
    pub fn centimeters() -> Self {
        ConversionProfile {
            factor: 2.54,
            suffix: "cm",
            decimals: 2,
        }
    }
}

impl FromStr for ConversionProfile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mm" => Ok(ConversionProfile::millimeters()),
            "cm" => Ok(ConversionProfile::centimeters()),
            other => bail!("unknown conversion unit {:?} (expected \"mm\" or \"cm\")", other),
        }
    }
}

/// How the target timeline is walked during a run.
///
/// The two policies are deliberately kept distinct: they disagree on whether
/// an already-answered post stops the scan or is merely skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPolicy {
    /// Walk oldest to newest within the fetched page and reply to every
    /// eligible post; already-answered posts are skipped, not a stop signal.
    ExhaustiveOldestFirst,
    /// Walk newest to oldest and stop at the first already-answered post,
    /// assuming everything older was handled on earlier runs. Posts at most
    /// one reply per run.
    FrontierNewestFirst,
}

impl FromStr for ScanPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "exhaustive-oldest-first" => Ok(ScanPolicy::ExhaustiveOldestFirst),
            "frontier-newest-first" => Ok(ScanPolicy::FrontierNewestFirst),
            other => bail!(
                "unknown scan policy {:?} (expected \"exhaustive-oldest-first\" or \"frontier-newest-first\")",
                other
            ),
        }
    }
}

impl fmt::Display for ScanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanPolicy::ExhaustiveOldestFirst => write!(f, "exhaustive-oldest-first"),
            ScanPolicy::FrontierNewestFirst => write!(f, "frontier-newest-first"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for Twitter API v2 reads
    pub twitter_bearer_token: String,

    /// Token used for posting replies (falls back to the bearer token)
    pub twitter_access_token: String,

    /// Account whose posts are scanned for rainfall measurements
    pub target_handle: String,

    /// Account the replies are posted from
    pub bot_handle: String,

    /// Maximum posts fetched per timeline (single page, no pagination)
    pub fetch_limit: u32,

    /// Active unit conversion profile
    pub profile: ConversionProfile,

    /// Active timeline scan policy
    pub scan_policy: ScanPolicy,

    /// Log replies instead of sending them
    pub dry_run: bool,

    /// Hours between automatic runs (0 disables the scheduler)
    pub run_interval_hours: u64,

    /// Port for the trigger HTTP server
    pub webhook_port: u16,

    /// Bearer secret required on the trigger endpoint (optional)
    pub webhook_secret: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a required environment variable is missing or a
    /// value fails to parse.
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let twitter_bearer_token = env::var("TWITTER_BEARER_TOKEN")
            .context("TWITTER_BEARER_TOKEN must be set")?;

        let twitter_access_token = env::var("TWITTER_ACCESS_TOKEN")
            .unwrap_or_else(|_| twitter_bearer_token.clone());

        Ok(Config {
            twitter_bearer_token,
            twitter_access_token,

            target_handle: env::var("TARGET_HANDLE")
                .unwrap_or_else(|_| "SummerhillRain".to_string()),

            bot_handle: env::var("BOT_HANDLE")
                .unwrap_or_else(|_| "MetricMartin".to_string()),

            fetch_limit: env::var("FETCH_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),

            profile: match env::var("CONVERSION_UNIT") {
                Ok(unit) => unit.parse().context("CONVERSION_UNIT is invalid")?,
                Err(_) => ConversionProfile::millimeters(),
            },

            scan_policy: match env::var("SCAN_POLICY") {
                Ok(policy) => policy.parse().context("SCAN_POLICY is invalid")?,
                Err(_) => ScanPolicy::ExhaustiveOldestFirst,
            },

            dry_run: env::var("DRY_RUN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),

            run_interval_hours: env::var("RUN_INTERVAL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(6),

            webhook_port: env::var("WEBHOOK_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(|| {
                    // Default to PORT env var (Railway/Fly.io) or 8080
                    env::var("PORT")
                        .ok()
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(8080)
                }),

            webhook_secret: env::var("WEBHOOK_SECRET").ok(),
        })
    }
}
