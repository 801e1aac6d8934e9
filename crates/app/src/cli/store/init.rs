use std::path::PathBuf;

use clap::Args;
use fernwood_app::{
    persistence::{JsonFileStore, Snapshot, StateStore},
    seed::Seed,
};

#[derive(Debug, Args)]
pub(crate) struct InitStoreArgs {
    /// Path of the JSON state file
    #[arg(long, env = "FERNWOOD_STORE_PATH")]
    store_path: PathBuf,

    /// Overwrite an existing state file
    #[arg(long)]
    force: bool,
}

pub(crate) async fn run(args: InitStoreArgs) -> Result<(), String> {
    let store = JsonFileStore::new(&args.store_path);

    let existing = store
        .load()
        .await
        .map_err(|error| format!("failed to read {}: {error}", args.store_path.display()))?;

    if existing.is_some() && !args.force {
        return Err(format!(
            "{} already exists; pass --force to overwrite it",
            args.store_path.display()
        ));
    }

    let seed = Seed::bundled().map_err(|error| format!("failed to load seed data: {error}"))?;
    let products = seed.products.len();

    store
        .save(&Snapshot::new(seed.products))
        .await
        .map_err(|error| format!("failed to write {}: {error}", args.store_path.display()))?;

    println!("store_path: {}", args.store_path.display());
    println!("products: {products}");

    Ok(())
}
