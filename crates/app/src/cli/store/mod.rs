use clap::{Args, Subcommand};

mod init;
mod migrate;

#[derive(Debug, Args)]
pub(crate) struct StoreCommand {
    #[command(subcommand)]
    command: StoreSubcommand,
}

#[derive(Debug, Subcommand)]
enum StoreSubcommand {
    Init(init::InitStoreArgs),
    Migrate(migrate::MigrateStoreArgs),
}

pub(crate) async fn run(command: StoreCommand) -> Result<(), String> {
    match command.command {
        StoreSubcommand::Init(args) => init::run(args).await,
        StoreSubcommand::Migrate(args) => migrate::run(args).await,
    }
}
