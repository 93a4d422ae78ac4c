use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use zone_pivot::config::settings::require_path;
use zone_pivot::utils::error::{ErrorSeverity, EtlError};
use zone_pivot::utils::{logger, validation::Validate};
use zone_pivot::{CliConfig, EtlEngine, InputSource, Settings, TomlConfig, XlsxSheetSink, ZonePipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting zone-pivot");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let file_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => {
                tracing::info!("📁 Loaded configuration from: {}", path);
                Some(config)
            }
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => None,
    };

    // 命令列 > 設定檔 > 互動輸入
    let input = match cli
        .input
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.input.path.clone()))
    {
        Some(path) => path,
        None => require_path("input", &prompt("Input file:")?).unwrap_or_else(|e| exit_on_config_error(&e)),
    };
    let output = match cli
        .output
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.output.path.clone()))
    {
        Some(path) => path,
        None => require_path("output", &prompt("Output file:")?).unwrap_or_else(|e| exit_on_config_error(&e)),
    };

    let settings = cli.apply_overrides(Settings::new(input, output).with_file_config(file_config.as_ref()));

    if let Err(e) = settings.validate() {
        exit_on_config_error(&e);
    }

    let source = InputSource::for_path(&settings.input_path, settings.sheet.clone());
    let sink = XlsxSheetSink::new(&settings.output_path).with_bold_header(settings.bold_header);
    let monitor_enabled = settings.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = ZonePipeline::new(source, sink, settings);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(summary) => {
            tracing::info!("✅ Zone pivot completed successfully!");
            println!("✅ Pivoted {} countries", summary.record_count);
            for (category, zones) in &summary.zone_counts {
                println!("   {}: {} zones", category, zones);
            }
            println!("📁 Output saved to: {}", summary.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Zone pivot failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn exit_on_config_error(e: &EtlError) -> ! {
    tracing::error!("❌ Configuration validation failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

/// Asks for a path on stdin when none was given.
fn prompt(label: &str) -> anyhow::Result<String> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", label)?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .with_context(|| format!("failed to read '{}' from stdin", label))?;

    Ok(line.trim().to_string())
}
