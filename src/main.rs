use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use timegate::application::gate::PaymentGate;
use timegate::domain::config::GateConfig;
use timegate::domain::event::AccountId;
use timegate::domain::ports::GateStateStoreBox;
use timegate::infrastructure::in_memory::{InMemoryGateStore, RecordingEmitter};
use timegate::interfaces::csv::event_reader::EventReader;
use timegate::interfaces::csv::state_writer::StateWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input trigger-events CSV file
    input: PathBuf,

    /// Hosting account identity (40 hex characters)
    #[arg(long)]
    account: AccountId,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Trace lines go to stderr so stdout carries only the state report.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(false),
        )
        .init();

    let store: GateStateStoreBox = if let Some(db_path) = cli.db_path {
        #[cfg(feature = "storage-rocksdb")]
        {
            use timegate::infrastructure::rocksdb::RocksDbGateStore;
            Box::new(RocksDbGateStore::open(db_path).into_diagnostic()?)
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        {
            let _ = db_path;
            return Err(miette::miette!(
                "--db-path requires a build with the storage-rocksdb feature"
            ));
        }
    } else {
        Box::new(InMemoryGateStore::new())
    };

    let gate = PaymentGate::new(cli.account, store, Box::new(RecordingEmitter::new()));

    // Replay events strictly in file order, one invocation at a time.
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = EventReader::new(file);
    for event_result in reader.events() {
        match event_result {
            Ok((ledger_time, event)) => {
                if let Err(e) = gate.process(&event, ledger_time).await {
                    eprintln!("Invocation aborted: {e}");
                }
            }
            Err(e) => {
                eprintln!("Error reading event: {e}");
            }
        }
    }

    // Collect final state from the store.
    let store = gate.into_store();
    let config = GateConfig::from_stored(
        store.payment_amount().await.into_diagnostic()?,
        store.cooldown_seconds().await.into_diagnostic()?,
    );
    let recipients = store.recipients().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = StateWriter::new(stdout.lock());
    writer.write_state(&config, &recipients).into_diagnostic()?;

    Ok(())
}
