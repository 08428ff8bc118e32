use brawl_stapler::core::snapshot;
use brawl_stapler::utils::error::{ErrorSeverity, StaplerError};
use brawl_stapler::utils::{logger, validation::Validate};
use brawl_stapler::{parse_identity, CliConfig, Settings, StaplerEngine};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let settings = match Settings::load(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    match (&settings.log_level, cli.verbose) {
        (Some(level), false) => logger::init_with_level(level),
        _ => logger::init_cli_logger(cli.verbose),
    }

    tracing::info!("Starting brawl-stapler");
    tracing::debug!("Settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if let Err(e) = run(&cli, settings).await {
        tracing::error!(
            "❌ Stapler failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium | ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(cli: &CliConfig, settings: Settings) -> Result<(), StaplerError> {
    let identity = parse_identity(&cli.colours)?;
    let snapshot_in = settings.snapshot_in.clone();
    let engine = StaplerEngine::new(settings).with_snapshot(snapshot_in);
    let export_options = engine.export_options();
    let (stapler, report) = engine.load().await?;

    for (file_name, error) in &report.failures {
        eprintln!("⚠️  Skipped {}: {}", file_name, error);
    }

    if let Some(path) = &cli.snapshot_out {
        snapshot::write_file(path, &stapler.snapshot()).await?;
        tracing::info!("📁 Cache snapshot saved to: {}", path);
    }

    if cli.list_packages {
        for name in stapler.packages().names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let text = stapler.export(&identity, &cli.packages, &export_options)?;

    match &cli.output {
        Some(path) => {
            tokio::fs::write(path, &text).await?;
            tracing::info!("📁 Export saved to: {}", path);
            println!("✅ Deck export written to {}", path);
        }
        None => print!("{}", text),
    }

    Ok(())
}

