use clap::Parser;
use venue_client::app::{render, run_command};
use venue_client::utils::error::VenueError;
use venue_client::utils::{logger, validation::Validate};
use venue_client::{CliConfig, VenueService};

fn report_failure(e: &VenueError) -> ! {
    tracing::error!(
        "❌ venue-client failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli.command);

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => report_failure(&e),
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        report_failure(&e);
    }

    let service = match VenueService::from_config(&config) {
        Ok(service) => service,
        Err(e) => report_failure(&e),
    };
    tracing::debug!("Using venue API at {}", service.base_url());

    let output = match run_command(&service, &cli.command).await {
        Ok(output) => output,
        Err(e) => report_failure(&e),
    };

    match render(&output, config.format) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => report_failure(&e),
    }
}
