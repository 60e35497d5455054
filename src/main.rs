use clap::Parser;
use miette::{IntoDiagnostic, Result};
use pricebook::application::service::PriceService;
use pricebook::domain::ports::{BasePriceStoreBox, ChannelPriceStoreBox};
use pricebook::infrastructure::in_memory::{InMemoryBaseStore, InMemoryChannelStore};
use pricebook::interfaces::csv::command_reader::{CommandOp, CommandReader};
use pricebook::interfaces::csv::detail_writer::DetailWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input price commands CSV file
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn build_service(db_path: Option<PathBuf>) -> Result<PriceService> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            use pricebook::infrastructure::rocksdb::RocksDbStore;

            let store = RocksDbStore::open(path).into_diagnostic()?;
            let base: BasePriceStoreBox = Box::new(store.clone());
            let channel: ChannelPriceStoreBox = Box::new(store);
            Ok(PriceService::new(base, channel))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => miette::bail!(
            "this build has no persistent storage; rebuild with --features storage-rocksdb"
        ),
        None => {
            let base: BasePriceStoreBox = Box::new(InMemoryBaseStore::new());
            let channel: ChannelPriceStoreBox = Box::new(InMemoryChannelStore::new());
            Ok(PriceService::new(base, channel))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let service = build_service(cli.db_path)?;

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = CommandReader::new(file);

    let stdout = io::stdout();
    let mut writer = DetailWriter::new(stdout.lock());

    for result in reader.commands() {
        match result {
            Ok(command) => match command.op {
                CommandOp::Update => match command.into_update() {
                    Ok(update) => {
                        if let Err(e) = service.update(update).await {
                            eprintln!("Error processing update: {}", e);
                        }
                    }
                    Err(e) => eprintln!("Error processing update: {}", e),
                },
                CommandOp::Get => {
                    match service
                        .get(command.channel.as_deref(), &command.store, &command.sku)
                        .await
                    {
                        Ok(Some(detail)) => writer
                            .write_detail(
                                command.channel.as_deref(),
                                &command.store,
                                &command.sku,
                                &detail,
                            )
                            .into_diagnostic()?,
                        Ok(None) => {}
                        Err(e) => eprintln!("Error processing lookup: {}", e),
                    }
                }
            },
            Err(e) => eprintln!("Error reading command: {}", e),
        }
    }

    writer.flush().into_diagnostic()?;

    Ok(())
}
