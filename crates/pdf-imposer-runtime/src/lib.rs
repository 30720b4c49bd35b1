use std::path::PathBuf;

use tokio::sync::mpsc;

mod worker;

// Re-export types from the library crate
pub use pdf_imposer::{CancelToken, ConversionOptions, ConversionStatistics, ConversionSummary};
pub use worker::worker_task;

/// Commands sent from the front-end to the worker
#[derive(Debug)]
pub enum ConvertCommand {
    Convert {
        options: ConversionOptions,
    },
    LoadConfig {
        path: PathBuf,
    },
    /// Statistics for the current options, read from the input's page count
    CalculateStats {
        options: ConversionOptions,
    },
}

/// Updates sent from the worker to the front-end
#[derive(Debug, Clone)]
pub enum ConvertUpdate {
    Progress {
        message: String,
        fraction: f32,
    },
    Completed {
        path: PathBuf,
        summary: ConversionSummary,
    },
    Cancelled,
    ConfigLoaded {
        options: ConversionOptions,
    },
    StatsCalculated {
        stats: ConversionStatistics,
    },
    Error {
        message: String,
    },
}

/// Channels and cancellation flag of a running worker
pub struct WorkerHandle {
    pub command_tx: mpsc::UnboundedSender<ConvertCommand>,
    pub update_rx: mpsc::UnboundedReceiver<ConvertUpdate>,
    pub cancel: CancelToken,
}

impl WorkerHandle {
    pub fn send(&self, command: ConvertCommand) -> bool {
        self.command_tx.send(command).is_ok()
    }

    /// Stop the running or next queued conversion
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

/// Spawn the worker on the current tokio runtime.
///
/// The worker stops once every command sender has been dropped.
pub fn spawn_worker() -> WorkerHandle {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    let cancel = CancelToken::new();

    tokio::spawn(worker_task(command_rx, update_tx, cancel.clone()));

    WorkerHandle {
        command_tx,
        update_rx,
        cancel,
    }
}
