use clap::Args;
use fernwood_app::auth::{MIN_PASSWORD_LENGTH, password_digest};

#[derive(Debug, Args)]
pub(crate) struct HashPasswordArgs {
    /// Password to digest, for seeding a credential
    #[arg(long, env = "FERNWOOD_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) fn run(args: &HashPasswordArgs) -> Result<(), String> {
    if args.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        ));
    }

    println!("password_digest: {}", password_digest(&args.password));

    Ok(())
}
