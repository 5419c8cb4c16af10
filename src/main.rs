//! BarAdventures voice skill
//!
//! Main application entry point: reads webhook events as JSON lines from
//! stdin and writes one reply per line to stdout.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use BarAdventures::{
    config::Settings,
    handlers::Dispatcher,
    protocol::WebhookEvent,
    services::SkillServices,
    utils::logging,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", BarAdventures::info());

    // Initialize services
    info!(backend = ?settings.storage.backend, "Initializing services...");
    let services = SkillServices::from_settings(settings).await?;
    let dispatcher = Dispatcher::from_services(services)?;

    info!(scenes = dispatcher.registry().len(), "Dispatcher is ready, reading events from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut handled: u64 = 0;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let event: WebhookEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "Skipping malformed event");
                continue;
            }
        };

        let response = dispatcher.handle_event(event).await?;
        let mut output = serde_json::to_string(&response)?;
        output.push('\n');
        stdout.write_all(output.as_bytes()).await?;
        stdout.flush().await?;
        handled += 1;
    }

    info!(events = handled, "Input closed, shutting down");

    Ok(())
}
