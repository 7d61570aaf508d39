//! Command-line surface and flag validation.
//!
//! Flag parsing is clap's job; everything that can be wrong *across* flags is
//! collected into a [`ValidationErrors`] value so the user sees every problem
//! at once instead of fixing them one invocation at a time.

use chrono::{DateTime, FixedOffset};
use clap::Parser;
use thiserror::Error;

use crate::client::LogQuery;
use crate::time_range::{parse_duration, parse_rfc3339, TimeSpec, TimeWindow};

const AFTER_HELP: &str = "\
cwfetch uses the credentials and configuration already provided in
~/.aws/credentials and ~/.aws/config (profiles, region, retries). Filter
pattern syntax is documented at
https://docs.aws.amazon.com/AmazonCloudWatch/latest/logs/FilterAndPatternSyntax.html

Examples:
  cwfetch -g /aws/containerinsights/eks-prod/application -d 1h
  cwfetch -g /aws/containerinsights/eks-prod/application -d 1h -p gw-eks-int
  cwfetch -g /aws/containerinsights/eks-prod/application -s 2024-03-01T00:00:00Z -d 1d -o
  cwfetch -g /aws/containerinsights/eks-prod/application -d 1h -f '{ $.log = \"*timeout*\" }'
  cwfetch -g /aws/containerinsights/eks-test/application -d 1h -t yaml \\
      -i log -i kubernetes.pod_name -i metadata.timestamp";

/// Fetch and filter AWS CloudWatch log events.
#[derive(Parser, Debug)]
#[command(name = "cwfetch", version, about, after_help = AFTER_HELP)]
pub struct Args {
    /// The log group name to get logs from
    #[arg(short = 'g', long)]
    pub log_group: Option<String>,

    /// Start of the time window, e.g. 2006-01-02T15:04:05Z or 2006-01-02T15:04:05+07:00
    #[arg(short = 's', long, value_parser = parse_rfc3339)]
    pub start_time: Option<DateTime<FixedOffset>>,

    /// End of the time window; defaults to now
    #[arg(short = 'e', long, value_parser = parse_rfc3339)]
    pub end_time: Option<DateTime<FixedOffset>>,

    /// Relative duration (1w, 1d, 12h, ...); measured backwards from now,
    /// or forwards from --start-time when that is given
    #[arg(short = 'd', long, value_parser = parse_duration)]
    pub duration: Option<chrono::Duration>,

    /// CloudWatch filter pattern applied server-side
    #[arg(short = 'f', long)]
    pub filter_pattern: Option<String>,

    /// Dotted field selector to keep in the output (repeatable; yaml format only)
    #[arg(short = 'i', long = "field")]
    pub fields: Vec<String>,

    /// Only include events from log streams with this name prefix
    #[arg(short = 'p', long)]
    pub logstream_prefix: Option<String>,

    /// Only include events from these exact log streams (repeatable or comma-separated)
    #[arg(short = 'n', long = "logstream-names", value_delimiter = ',')]
    pub logstream_names: Vec<String>,

    /// Append output to a file instead of printing to stdout
    #[arg(short = 'o', long)]
    pub output: bool,

    /// Output format: txt or yaml
    #[arg(short = 't', long, default_value = "txt")]
    pub output_format: String,

    /// Maximum number of events to return per page
    #[arg(short = 'l', long, default_value_t = 10_000)]
    pub limit: i32,
}

/// Rendering mode for retrieved records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Yaml,
}

impl OutputFormat {
    fn parse(input: &str) -> Option<Self> {
        match input.to_lowercase().as_str() {
            "txt" | "text" => Some(Self::Text),
            "yml" | "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Cross-flag validation failures, one named reason per offending flag.
#[derive(Error, Debug, Default)]
#[error("{}", format_reasons(.reasons))]
pub struct ValidationErrors {
    reasons: Vec<(&'static str, String)>,
}

fn format_reasons(reasons: &[(&'static str, String)]) -> String {
    reasons
        .iter()
        .map(|(flag, why)| format!("{flag}: {why}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ValidationErrors {
    fn push(&mut self, flag: &'static str, why: impl Into<String>) {
        self.reasons.push((flag, why.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }

    pub fn reasons(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.reasons.iter().map(|(flag, _)| *flag)
    }
}

impl Args {
    /// Check everything clap alone cannot, reporting all problems at once.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.log_group.as_deref().unwrap_or("").is_empty() {
            errors.push("log-group", "is a required flag");
        }
        // Duration pairs with an explicit start or with "now", never with an
        // explicit end; end = start + duration covers the remaining case.
        if self.end_time.is_some() && self.duration.is_some() {
            errors.push(
                "duration",
                "end-time and duration must not be provided together",
            );
        }
        if OutputFormat::parse(&self.output_format).is_none() {
            errors.push(
                "output-format",
                format!("{:?} given but expected one of [txt, yaml]", self.output_format),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Output format; call only after [`Args::validate`] has passed.
    pub fn format(&self) -> OutputFormat {
        OutputFormat::parse(&self.output_format).unwrap_or(OutputFormat::Text)
    }

    pub fn time_spec(&self) -> TimeSpec {
        TimeSpec {
            start: self.start_time,
            end: self.end_time,
            duration: self.duration,
        }
    }

    /// Assemble the query the fetch loop runs, from validated flags plus the
    /// already-resolved time window.
    pub fn to_query(&self, window: TimeWindow) -> LogQuery {
        LogQuery {
            log_group: self.log_group.clone().unwrap_or_default(),
            window,
            filter_pattern: self.filter_pattern.clone(),
            log_stream_names: self.logstream_names.clone(),
            log_stream_prefix: self.logstream_prefix.clone(),
            limit: self.limit,
        }
    }
}
