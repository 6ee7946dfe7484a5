use clap::{Parser, Subcommand};
use lambda_runtime::{service_fn, LambdaEvent};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use user_stream_relay::sns::{Publisher, SnsPublisher, StdoutPublisher};
use user_stream_relay::stream::StreamEvent;
use user_stream_relay::{Config, Relay, Result};

#[derive(Parser, Debug)]
#[command(name = "user-stream-relay")]
#[command(about = "DynamoDB stream to SNS user relay", long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", help = "Optional TOML config, overridden by USER_RELAY_* variables")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Enable JSON output for logs")]
    json_logs: bool,

    #[arg(short, long, help = "Verbose logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the relay once against a captured stream event
    Replay {
        #[arg(short, long, value_name = "FILE")]
        event: PathBuf,

        #[arg(long, help = "Print the batch instead of publishing it")]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> std::result::Result<(), lambda_runtime::Error> {
    let args = Args::parse();

    let in_lambda = env::var("AWS_LAMBDA_FUNCTION_NAME").is_ok();
    init_logging(args.json_logs || in_lambda, args.verbose, in_lambda);

    info!("Starting user-stream-relay");

    let config = match Config::load(args.config.as_deref()) {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        topic_arn = %config.topic_arn,
        filter = ?config.filter,
        publish_empty = config.publishes_empty(),
        region = ?config.region,
        "Configuration summary"
    );

    match args.command {
        None => run_lambda(config).await,
        Some(Command::Replay { event, dry_run }) => {
            let outcome = if dry_run {
                replay(Relay::new(config, StdoutPublisher), &event).await?
            } else {
                let publisher = SnsPublisher::from_env(config.region.as_deref()).await;
                replay(Relay::new(config, publisher), &event).await?
            };
            info!(?outcome, "Replay finished");
            Ok(())
        }
    }
}

async fn run_lambda(config: Config) -> std::result::Result<(), lambda_runtime::Error> {
    let publisher = SnsPublisher::from_env(config.region.as_deref()).await;
    let relay = Relay::new(config, publisher);
    let relay = &relay;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<StreamEvent>| async move {
        relay
            .handle(&event.payload)
            .await
            .map_err(lambda_runtime::Error::from)
    }))
    .await
}

async fn replay<P: Publisher>(relay: Relay<P>, path: &Path) -> Result<user_stream_relay::Outcome> {
    info!("Replaying event from {:?}", path);

    let event = StreamEvent::from_path(path).await?;
    relay.handle(&event).await
}

/// Lambda adds its own timestamps and does not render ANSI, so both are
/// dropped there and the runtime's own events are kept at info.
fn init_logging(json: bool, verbose: bool, in_lambda: bool) {
    let default_filter = if in_lambda {
        "user_stream_relay=info,lambda_runtime=info,warn"
    } else {
        "user_stream_relay=info,warn"
    };

    let env_filter = if verbose {
        EnvFilter::new("user_stream_relay=debug,lambda_runtime=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
    };

    let fmt_layer = if json && in_lambda {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .with_ansi(false)
            .without_time()
            .boxed()
    } else if json {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
