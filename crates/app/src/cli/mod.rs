use clap::{Parser, Subcommand};

mod password;
mod store;

#[derive(Debug, Parser)]
#[command(name = "fernwood-app", about = "Fernwood store CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Store(store::StoreCommand),
    Password(password::PasswordCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Store(command) => store::run(command).await,
            Commands::Password(command) => password::run(command),
        }
    }
}
