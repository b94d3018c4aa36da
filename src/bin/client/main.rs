mod cli;
mod network;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use contact_desk::config::Config;
use contact_desk::dashboard::Dashboard;
use contact_desk::datatypes::NewMessage;
use contact_desk::error::DeskError;
use contact_desk::filter::{FilterSpec, SortKey, SortOrder, StatusFilter};
use contact_desk::protocol::{Request, Response};
use contact_desk::session::SessionGuard;

use network::RemoteStore;

#[derive(Parser, Debug)]
#[command(name = "desk", about = "Contact desk client: public form submission and the admin dashboard")]
struct CliArgs {
    /// Path to the desk.toml config file
    #[arg(short, long, default_value = "./desk.toml")]
    config: PathBuf,

    /// Server address, overriding the config file
    #[arg(short, long)]
    addr: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a contact message (the public form path, no login needed)
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        service: Option<String>,
        #[arg(long)]
        message: String,
    },

    /// Log in to the admin dashboard
    Login {
        /// Admin password; prompted for when omitted
        password: Option<String>,
    },

    /// End the admin session
    Logout,

    /// List messages matching the filters
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show the full details of one message
    Show { id: Uuid },

    /// Mark a message as read
    MarkRead { id: Uuid },

    /// Delete a message
    Delete { id: Uuid },

    /// Export the filtered messages as CSV
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output file; defaults to contact-messages-<date>.csv
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Read or change admin settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Show the notification recipient address
    Show,
    /// Change the notification recipient address
    SetEmail { email: String },
    /// Change the admin password stored on the server
    SetPassword { new_password: String, confirm: String },
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Substring search over name, email, message and service
    #[arg(long, default_value = "")]
    search: String,

    #[arg(long, value_enum, default_value_t)]
    status: StatusFilter,

    /// Exact service category; omit for all services
    #[arg(long)]
    service: Option<String>,

    #[arg(long, value_enum, default_value_t)]
    sort_by: SortKey,

    #[arg(long, value_enum, default_value_t)]
    order: SortOrder,
}

impl FilterArgs {
    fn into_spec(self) -> FilterSpec {
        FilterSpec {
            search: self.search,
            status: self.status,
            service: self.service.filter(|s| s != "all"),
            sort_by: self.sort_by,
            sort_order: self.order,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(&args.config)?;
    let addr = args.addr.unwrap_or_else(|| config.client.server_addr.clone());
    let guard = SessionGuard::new(
        config.client.admin_secret.clone(),
        config.client.session_file.clone(),
    );

    match args.command {
        Command::Submit {
            name,
            email,
            phone,
            service,
            message,
        } => {
            let new = NewMessage {
                name,
                email,
                phone,
                service,
                message,
            };
            let mut remote = RemoteStore::connect(&addr).await?;
            match remote.request(Request::SubmitMessage(new)).await? {
                Response::Accepted(stored) => {
                    println!("Thank you, your message has been received (ref {}).", stored.id);
                }
                Response::Error(e) => return Err(DeskError::Remote(e).into()),
                _ => return Err(DeskError::UnexpectedResponse("SubmitMessage").into()),
            }
        }

        Command::Login { password } => {
            let candidate = match password {
                Some(p) => p,
                None => cli::prompt_password()?,
            };
            if guard.check_credential(&candidate) {
                guard.start_session()?;
                println!("Logged in. The session is valid for 8 hours.");
            } else {
                return Err(Box::from("invalid admin password"));
            }
        }

        Command::Logout => {
            guard.end_session()?;
            println!("Admin session ended.");
        }

        Command::List { filters } => {
            require_session(&guard)?;
            let mut dash = open_dashboard(&addr).await?;
            dash.spec = filters.into_spec();

            let view = dash.view();
            for message in &view {
                cli::print_message_row(message);
            }
            println!("{} of {} messages shown, {} unread", view.len(), dash.total(), dash.unread_count());
        }

        Command::Show { id } => {
            require_session(&guard)?;
            let dash = open_dashboard(&addr).await?;
            match dash.find(id) {
                Some(message) => cli::print_message_detail(message),
                None => return Err(DeskError::Remote(format!("no message with id {id}")).into()),
            }
        }

        Command::MarkRead { id } => {
            require_session(&guard)?;
            let mut dash = open_dashboard(&addr).await?;
            dash.mark_read(id).await?;
            println!("Marked {id} as read.");
        }

        Command::Delete { id } => {
            require_session(&guard)?;
            let mut dash = open_dashboard(&addr).await?;
            dash.delete(id).await?;
            println!("Deleted {id}.");
        }

        Command::Export { filters, output } => {
            require_session(&guard)?;
            let mut dash = open_dashboard(&addr).await?;
            dash.spec = filters.into_spec();

            let csv = dash.export_csv();
            let rows = dash.view().len();
            let path = output.unwrap_or_else(|| {
                PathBuf::from(format!(
                    "contact-messages-{}.csv",
                    chrono::Utc::now().format("%Y-%m-%d")
                ))
            });
            fs::write(&path, csv)?;
            println!("Exported {rows} messages to {}.", path.display());
        }

        Command::Settings { action } => {
            require_session(&guard)?;
            let mut remote = RemoteStore::connect(&addr).await?;
            run_settings(&mut remote, action).await?;
        }
    }

    Ok(())
}

async fn run_settings(remote: &mut RemoteStore, action: SettingsCommand) -> Result<(), DeskError> {
    match action {
        SettingsCommand::Show => {
            let email = remote.get_setting("admin_email").await?;
            match email {
                Some(email) => println!("Notification recipient: {email}"),
                None => println!("No notification recipient configured."),
            }
        }

        SettingsCommand::SetEmail { email } => {
            remote.put_setting("admin_email", &email).await?;
            println!("Notification recipient set to {email}.");
        }

        SettingsCommand::SetPassword {
            new_password,
            confirm,
        } => {
            if new_password != confirm {
                return Err(DeskError::Remote("passwords do not match".to_owned()));
            }
            if new_password.len() < 8 {
                return Err(DeskError::Remote(
                    "password must be at least 8 characters long".to_owned(),
                ));
            }
            remote.put_setting("admin_password", &new_password).await?;
            println!("Admin password updated on the server.");
            println!("Remember to update admin_secret in desk.toml to match.");
        }
    }
    Ok(())
}

/// All admin commands go through here first.
fn require_session(guard: &SessionGuard) -> Result<(), DeskError> {
    if guard.is_session_valid() {
        Ok(())
    } else {
        Err(DeskError::NotAuthenticated)
    }
}

async fn open_dashboard(addr: &str) -> Result<Dashboard<RemoteStore>, DeskError> {
    let remote = RemoteStore::connect(addr).await?;
    let mut dash = Dashboard::new(remote);
    dash.refresh().await?;
    Ok(dash)
}
