use std::path::PathBuf;

use clap::Args;
use fernwood_app::persistence::{JsonFileStore, SNAPSHOT_VERSION, StateStore};

#[derive(Debug, Args)]
pub(crate) struct MigrateStoreArgs {
    /// Path of the JSON state file
    #[arg(long, env = "FERNWOOD_STORE_PATH")]
    store_path: PathBuf,
}

pub(crate) async fn run(args: MigrateStoreArgs) -> Result<(), String> {
    let store = JsonFileStore::new(&args.store_path);

    let snapshot = store
        .load()
        .await
        .map_err(|error| format!("failed to read {}: {error}", args.store_path.display()))?
        .ok_or_else(|| format!("{} does not exist", args.store_path.display()))?;

    store
        .save(&snapshot)
        .await
        .map_err(|error| format!("failed to write {}: {error}", args.store_path.display()))?;

    println!("store_path: {}", args.store_path.display());
    println!("version: {SNAPSHOT_VERSION}");
    println!("products: {}", snapshot.products.len());

    Ok(())
}
