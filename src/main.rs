#![warn(clippy::all, rust_2018_idioms)]

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cwfetch::cli::{Args, OutputFormat};
use cwfetch::client::LogsClient;
use cwfetch::output::{self, Sink};

fn init_logging() {
    // Diagnostics go to stderr so stdout stays clean for record output.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            "cwfetch=info,aws_config=warn,aws_sigv4=warn,aws_smithy_runtime=warn,hyper=warn",
        )
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    args.validate()?;

    let now = Utc::now();
    let window = args.time_spec().resolve(now);
    let query = args.to_query(window);
    let format = args.format();
    let selectors = args.fields.clone();

    let mut sink = if args.output {
        let path = output::default_output_file(&query.log_group, now.timestamp());
        tracing::info!("writing log events to {}", path.display());
        Sink::file(&path)?
    } else {
        Sink::stdout()
    };

    let client = LogsClient::new().await;
    client
        .fetch(&query, |record| {
            let rendered = match format {
                OutputFormat::Text => record.text_line(),
                OutputFormat::Yaml => record.to_yaml(&selectors)?,
            };
            sink.write_record(&rendered)
        })
        .await
}
