use std::path::PathBuf;

use pdf_imposer::{
    CancelToken, ConversionOptions, ImposeError, calculate_statistics, convert_file,
    default_output_path, load_pdf,
};
use tokio::sync::mpsc;

use crate::{ConvertCommand, ConvertUpdate};

/// Async worker task that processes conversion commands and sends updates
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<ConvertCommand>,
    update_tx: mpsc::UnboundedSender<ConvertUpdate>,
    cancel: CancelToken,
) {
    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &update_tx, &cancel).await;
    }
    log::debug!("Command channel closed, worker exiting");
}

async fn process_command(
    cmd: ConvertCommand,
    update_tx: &mpsc::UnboundedSender<ConvertUpdate>,
    cancel: &CancelToken,
) {
    match cmd {
        ConvertCommand::Convert { options } => {
            handle_convert(options, update_tx, cancel).await;
        }
        ConvertCommand::LoadConfig { path } => {
            handle_load_config(path, update_tx).await;
        }
        ConvertCommand::CalculateStats { options } => {
            handle_calculate_stats(options, update_tx).await;
        }
    }
}

async fn handle_convert(
    options: ConversionOptions,
    update_tx: &mpsc::UnboundedSender<ConvertUpdate>,
    cancel: &CancelToken,
) {
    let output_path = options
        .output_file
        .clone()
        .or_else(|| options.input_file.as_ref().map(default_output_path));

    let progress_tx = update_tx.clone();
    let progress = move |message: &str, fraction: f32| {
        let _ = progress_tx.send(ConvertUpdate::Progress {
            message: message.to_string(),
            fraction,
        });
    };

    let update = match convert_file(&options, progress, cancel.clone()).await {
        Ok(summary) => ConvertUpdate::Completed {
            path: output_path.unwrap_or_default(),
            summary,
        },
        Err(ImposeError::Cancelled) => ConvertUpdate::Cancelled,
        Err(e) => {
            log::error!("Conversion failed: {}", e);
            ConvertUpdate::Error {
                message: format!("Conversion failed: {}", e),
            }
        }
    };
    // Cleared only once the conversion is over, so a cancel queued behind
    // the command still applies to it
    cancel.reset();
    let _ = update_tx.send(update);
}

async fn handle_load_config(path: PathBuf, update_tx: &mpsc::UnboundedSender<ConvertUpdate>) {
    let update = match ConversionOptions::load(&path).await {
        Ok(options) => {
            log::info!("Loaded config from {}", path.display());
            ConvertUpdate::ConfigLoaded { options }
        }
        Err(e) => ConvertUpdate::Error {
            message: format!("Failed to load config: {}", e),
        },
    };
    let _ = update_tx.send(update);
}

async fn handle_calculate_stats(
    options: ConversionOptions,
    update_tx: &mpsc::UnboundedSender<ConvertUpdate>,
) {
    let result = async {
        let config = options.validate()?;
        let input = options
            .input_file
            .as_ref()
            .ok_or_else(|| ImposeError::Config("No input file specified".to_string()))?;
        let page_count = load_pdf(input).await?.get_pages().len();
        Ok::<_, ImposeError>(calculate_statistics(page_count, &config))
    }
    .await;

    let update = match result {
        Ok(stats) => ConvertUpdate::StatsCalculated { stats },
        Err(e) => ConvertUpdate::Error {
            message: format!("Failed to calculate statistics: {}", e),
        },
    };
    let _ = update_tx.send(update);
}
