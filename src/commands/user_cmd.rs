//! Panel user account commands.

use clap::{Args, Subcommand};
use std::io::{self, Write};

use igreja_admin::api::{ApiClient, UserRole, UserUpsert};

/// Manage panel user accounts
#[derive(Args)]
pub struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Subcommand)]
enum UserSubcommand {
    /// List user accounts
    List,

    /// Create a user account, or overwrite an existing one
    Add {
        /// Login name
        username: String,

        /// Display name, the login name when omitted
        #[arg(long)]
        name: Option<String>,

        /// Role: admin, editor or viewer
        #[arg(long, default_value = "editor")]
        role: String,

        /// Password, kept unchanged when omitted on an existing account
        #[arg(long)]
        password: Option<String>,
    },

    /// Delete a user account
    Remove {
        /// Login name
        username: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl UserCommand {
    pub async fn run(&self, api: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            UserSubcommand::List => {
                let users = api.list_users().await?;

                if users.is_empty() {
                    println!("Nenhum usuário encontrado");
                    return Ok(());
                }

                println!("{:<20}  {:<30}  FUNÇÃO", "USUÁRIO", "NOME");
                println!("{}", "-".repeat(70));
                for user in &users {
                    println!(
                        "{:<20}  {:<30}  {}",
                        user.username,
                        user.name,
                        user.role_label()
                    );
                }
                println!("\nTotal: {} usuário(s)", users.len());
                Ok(())
            }

            UserSubcommand::Add {
                username,
                name,
                role,
                password,
            } => {
                if username.trim().is_empty() {
                    return Err("Username cannot be empty".into());
                }
                let role = match UserRole::parse(role) {
                    Some(role) => role,
                    None => {
                        return Err(
                            format!("Invalid role '{}', expected admin, editor or viewer", role)
                                .into(),
                        )
                    }
                };

                let user = UserUpsert {
                    username: username.trim().to_string(),
                    name: name.clone().unwrap_or_else(|| username.trim().to_string()),
                    role,
                    password: password.clone(),
                };

                match api.save_user(&user).await? {
                    Some(message) => println!("{}", message),
                    None => {
                        println!("Usuário salvo: {} ({})", user.username, user.role.label())
                    }
                }
                Ok(())
            }

            UserSubcommand::Remove { username, force } => {
                // Confirm unless --force is used
                if !force {
                    print!(
                        "Tem certeza que deseja excluir o usuário \"{}\"? Esta ação não pode ser desfeita. [y/N] ",
                        username
                    );
                    io::stdout().flush()?;

                    let mut input = String::new();
                    io::stdin().read_line(&mut input)?;

                    if !input.trim().eq_ignore_ascii_case("y") {
                        println!("Exclusão cancelada.");
                        return Ok(());
                    }
                }

                match api.delete_user(username).await? {
                    Some(message) => println!("{}", message),
                    None => println!("Usuário excluído: {}", username),
                }
                Ok(())
            }
        }
    }
}
