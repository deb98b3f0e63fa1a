use clap::Parser;
use docs_corpus::Pipeline;

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match args.pipeline_config() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if !matches!(args.command, Command::Merge { .. }) {
        println!("Note: discovery and scraping require a WebDriver server (e.g., ChromeDriver).");
        println!(
            "Set WEBDRIVER_URL environment variable if not using {}",
            config.webdriver_url
        );
    }

    let pipeline = Pipeline::new(config);
    let start_time = std::time::Instant::now();

    let outcome = match args.command {
        Command::Discover => pipeline
            .discover()
            .await
            .map(|links| ::log::info!("Discovered {} links", links.len())),
        Command::Scrape => pipeline.scrape().await.map(|report| {
            ::log::info!(
                "Scraped {} pages, {} failed",
                report.pages_scraped,
                report.error_links.len()
            )
        }),
        Command::Merge { .. } => pipeline
            .merge()
            .map(|report| ::log::info!("Merged {} files", report.files.len())),
        Command::All => pipeline.run_all().await.map(|report| {
            ::log::info!("Corpus written to {}", report.output.display())
        }),
    };

    if let Err(e) = outcome {
        ::log::error!("Run failed: {}", e);
        std::process::exit(1);
    }

    ::log::info!(
        "Finished in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );
}
