mod devices;
mod flow;

use crate::flow::CaptureArgs;
use app_state::load_app_settings;
use capture_services::storage::{HttpObjectStore, PgPhotoStore, get_db_pool};
use clap::{Parser, Subcommand};
use color_eyre::Result;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(version, about = "Field uploader for geotagged photos", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Capture one photo, tag it with a position and publish it.
    Capture {
        /// Photo file standing in for the device camera.
        #[arg(long)]
        photo: PathBuf,
        #[arg(long)]
        latitude: f64,
        #[arg(long)]
        longitude: f64,
        /// Horizontal accuracy of the fix, in meters.
        #[arg(long)]
        accuracy: Option<f64>,
    },
    /// Print the shared photo feed, newest first.
    Feed,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let settings = load_app_settings()?;

    let level = Level::from_str(&settings.logging.level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let pool = get_db_pool(&settings.secrets.database_url).await?;
    let photos = PgPhotoStore::new(pool, settings.sync.collection.clone());
    photos.ensure_schema().await?;
    let photos = Arc::new(photos);
    let objects = Arc::new(HttpObjectStore::new(&settings.storage.base_url)?);

    match Args::parse().command {
        Command::Capture {
            photo,
            latitude,
            longitude,
            accuracy,
        } => {
            flow::run_capture(
                &settings,
                objects,
                photos,
                CaptureArgs {
                    photo,
                    latitude,
                    longitude,
                    accuracy,
                },
            )
            .await
        }
        Command::Feed => flow::run_feed(photos).await,
    }
}
