//! CloudWatch Logs client wrapper and paginated fetch loop.
//!
//! Credentials and region come from the default AWS config chain
//! (environment, `~/.aws/config`, `~/.aws/credentials`, SSO). The core of
//! this crate never talks to the network itself; this module is the one
//! place that does.

use anyhow::Result;
use aws_config::BehaviorVersion;
use aws_sdk_cloudwatchlogs as cloudwatchlogs;
use aws_sdk_cloudwatchlogs::error::ProvideErrorMetadata;
use tracing::{debug, error};

use crate::record::LogRecord;
use crate::time_range::TimeWindow;

/// Parameters for one FilterLogEvents invocation, fully resolved: the time
/// window is already absolute and the flag surface has been validated.
#[derive(Debug, Clone)]
pub struct LogQuery {
    pub log_group: String,
    pub window: TimeWindow,
    pub filter_pattern: Option<String>,
    pub log_stream_names: Vec<String>,
    pub log_stream_prefix: Option<String>,
    pub limit: i32,
}

/// CloudWatch Logs client wrapper.
#[derive(Clone)]
pub struct LogsClient {
    client: cloudwatchlogs::Client,
}

impl LogsClient {
    /// Build a client from the default credential/region chain.
    pub async fn new() -> Self {
        let aws_config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self {
            client: cloudwatchlogs::Client::new(&aws_config),
        }
    }

    /// Fetch every event matching `query`, page by page, feeding each decoded
    /// record to `handle`.
    ///
    /// A failed page or a `handle` error is logged and the loop moves on;
    /// one bad record should not abort a long retrieval.
    pub async fn fetch(
        &self,
        query: &LogQuery,
        mut handle: impl FnMut(LogRecord) -> Result<()>,
    ) -> Result<()> {
        let mut request = self
            .client
            .filter_log_events()
            .log_group_name(&query.log_group)
            .start_time(query.window.start_ms)
            .end_time(query.window.end_ms)
            .limit(query.limit);

        if let Some(pattern) = &query.filter_pattern {
            request = request.filter_pattern(pattern);
        }
        if let Some(prefix) = &query.log_stream_prefix {
            request = request.log_stream_name_prefix(prefix);
        }
        for name in &query.log_stream_names {
            request = request.log_stream_names(name.clone());
        }

        debug!(
            log_group = %query.log_group,
            start_ms = query.window.start_ms,
            end_ms = query.window.end_ms,
            "fetching log events"
        );

        let mut paginator = request.into_paginator().send();
        while let Some(page) = paginator.next().await {
            let page = match page {
                Ok(page) => page,
                Err(err) => {
                    let code = err.code().unwrap_or("unknown");
                    error!(code, "failed to fetch log events page: {err}");
                    // The paginator terminates after yielding an error, so
                    // records already handled are kept and the fetch ends.
                    break;
                }
            };
            for event in page.events.unwrap_or_default() {
                if let Err(err) = handle(LogRecord::from(event)) {
                    error!("failed to process log event: {err:#}");
                }
            }
        }

        Ok(())
    }
}
