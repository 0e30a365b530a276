use std::fs::File;
use std::process::ExitCode;

use actix_web::{App, HttpServer, web};
use clap::{Parser, Subcommand};
use dialectic::Provider;
use dialectic::core::config::{self, ResolvedConfig};
use dialectic::core::{AnalysisRequest, Analyzer};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};

#[derive(Parser)]
#[command(name = "dialectic", about = "Break arguments into claim, premises and emotional tone")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve {
        /// Address to bind, e.g. 127.0.0.1:8080
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Analyze one piece of text and print the result as JSON
    Analyze {
        /// LLM provider to use
        #[arg(short, long, default_value_t, value_enum)]
        provider: Provider,
        /// OpenRouter model, required with `--provider openrouter`
        #[arg(short, long)]
        variant: Option<String>,
        /// The argument to analyze
        text: String,
    },
}

fn init_logging() {
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    // Terminal gets the summary on stderr (stdout is reserved for results);
    // dialectic.log in the current directory gets everything.
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Info,
        log_config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Ok(log_file) = File::create("dialectic.log") {
        loggers.push(WriteLogger::new(LevelFilter::Debug, log_config, log_file));
    }
    let _ = CombinedLogger::init(loggers);
}

fn resolve_config(cli_bind: Option<&str>) -> Result<ResolvedConfig, config::ConfigError> {
    let file_config = config::load_config()?;
    Ok(config::resolve(&file_config, cli_bind))
}

async fn serve(config: ResolvedConfig) -> std::io::Result<()> {
    let analyzer = web::Data::new(Analyzer::from_config(&config));

    log::info!("Starting Dialectic server on {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(analyzer.clone())
            .configure(dialectic::api::configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}

async fn analyze_once(
    config: ResolvedConfig,
    provider: Provider,
    variant: Option<String>,
    text: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = AnalysisRequest::new(text, provider, variant)?;
    let result = Analyzer::from_config(&config).analyze(&request).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();
    init_logging();

    let cli_bind = match &args.command {
        Command::Serve { bind } => bind.as_deref(),
        Command::Analyze { .. } => None,
    };
    let config = match resolve_config(cli_bind) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            eprintln!("dialectic: {e}");
            return ExitCode::FAILURE;
        }
    };

    let outcome: Result<(), Box<dyn std::error::Error>> = match args.command {
        Command::Serve { .. } => serve(config).await.map_err(Into::into),
        Command::Analyze {
            provider,
            variant,
            text,
        } => analyze_once(config, provider, variant, text).await,
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dialectic: {e}");
            ExitCode::FAILURE
        }
    }
}
