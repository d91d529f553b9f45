//! Account administration for the book review API.
//!
//! # Usage
//!
//! ```bash
//! DATABASE_URL=postgres://... bookreview-admin create-superuser --email root@example.com --password s3cret
//! DATABASE_URL=postgres://... bookreview-admin delete-user --email spam@example.com
//! ```

use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand};
use sea_orm::Database;

use bookreview_api::error::ApiError;
use bookreview_api::infra::db::DbUserRepository;
use bookreview_api::infra::password::Argon2PasswordHasher;
use bookreview_api::usecase::user::{DeleteUserUseCase, RegisterUserInput, RegisterUserUseCase};
use bookreview_core::tracing::{CLI_DIRECTIVES, init_tracing};

#[derive(Parser)]
#[command(about = "Manage book review accounts")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account with staff and superuser flags set
    CreateSuperuser {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Delete an account with its profile, reviews, comments and likes
    DeleteUser {
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(CLI_DIRECTIVES);
    let args = Args::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
    let db = Database::connect(&database_url)
        .await
        .context("connect to database")?;
    let repo = DbUserRepository { db };

    match args.command {
        Command::CreateSuperuser { email, password } => {
            let usecase = RegisterUserUseCase {
                repo,
                hasher: Argon2PasswordHasher,
                superuser: true,
            };
            let result = usecase
                .execute(RegisterUserInput {
                    email: Some(email),
                    password: Some(password),
                })
                .await;
            match result {
                Ok(user) => println!("Superuser {} created (id {}).", user.email, user.id),
                Err(ApiError::Validation(errors)) => {
                    bail!("invalid input: {}", serde_json::to_string(&errors)?)
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::DeleteUser { email } => {
            let usecase = DeleteUserUseCase { repo };
            if !usecase.execute(&email).await? {
                bail!("no user with email {email}");
            }
            println!("User {email} deleted.");
        }
    }
    Ok(())
}
