//! Common types used across CLI modules

use std::time::Duration;

use clap::Args;
use labellerr_client::PollConfig;

/// Polling flags shared by commands that wait on a platform job
#[derive(Debug, Clone, Args)]
pub struct PollArgs {
    /// Seconds between status checks [default: 2]
    #[arg(long, value_parser = parse_seconds)]
    pub interval: Option<Duration>,

    /// Give up after this many seconds
    #[arg(long, value_parser = parse_seconds)]
    pub timeout: Option<Duration>,

    /// Give up after this many status checks
    #[arg(long)]
    pub max_retries: Option<u32>,
}

impl PollArgs {
    pub fn config(&self) -> PollConfig {
        self.config_or(PollConfig::default())
    }

    /// Apply the flags that were given on top of `base`
    pub fn config_or(&self, base: PollConfig) -> PollConfig {
        PollConfig {
            interval: self.interval.unwrap_or(base.interval),
            timeout: self.timeout.or(base.timeout),
            max_retries: self.max_retries.or(base.max_retries),
        }
    }
}

/// Parse a non-negative number of seconds, fractions allowed
pub fn parse_seconds(input: &str) -> Result<Duration, String> {
    let seconds: f64 = input
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", input))?;
    Duration::try_from_secs_f64(seconds)
        .map_err(|_| format!("'{}' is not a valid duration", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("5").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_seconds("0.25").unwrap(), Duration::from_millis(250));
        assert!(parse_seconds("-1").is_err());
        assert!(parse_seconds("soon").is_err());
    }

    #[test]
    fn test_flags_override_base() {
        let args = PollArgs {
            interval: None,
            timeout: Some(Duration::from_secs(300)),
            max_retries: None,
        };
        let base = PollConfig::new(Duration::from_secs(5)).with_max_retries(10);

        let config = args.config_or(base);
        assert_eq!(config.interval, Duration::from_secs(5));
        assert_eq!(config.timeout, Some(Duration::from_secs(300)));
        assert_eq!(config.max_retries, Some(10));

        assert_eq!(args.config().interval, Duration::from_secs(2));
    }
}
