//! # PawMinder CLI
//!
//! Command-line front end over a PawMinder server's `/rest/v1` surface.
//!
//! ## Usage
//!
//! ```bash
//! export PAWMINDER_URL=http://localhost:5000
//! export PAWMINDER_PUBLIC_KEY=dev-public-key
//!
//! pawminder pets add --name Rex --type Dog --age 3
//! pawminder reminders add --pet <PET_ID> --title "Heartworm pill" \
//!     --type medication --date 2024-07-01 --time 09:00 --recurring monthly
//! pawminder reminders list --filter overdue
//! pawminder reminders toggle <REMINDER_ID>
//! ```

use anyhow::bail;
use clap::{Parser, Subcommand};
use pawminder_client::{
    config::ClientConfig,
    forms::{PetForm, ReminderForm},
    render,
    runtime::Runtime,
    state::{Event, Tab},
    store::HostedStore,
};
use pawminder_shared::classify::ReminderFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "pawminder")]
#[command(about = "Keep track of pet care reminders", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Log in and print a bearer token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Manage pets
    Pets {
        #[command(subcommand)]
        command: PetCommands,
    },

    /// Manage reminders
    Reminders {
        #[command(subcommand)]
        command: ReminderCommands,
    },
}

#[derive(Subcommand)]
enum PetCommands {
    /// List pets, newest first
    List,

    /// Add a pet
    Add {
        #[arg(long)]
        name: String,

        /// Species, e.g. Dog or Cat
        #[arg(long = "type", value_name = "TYPE")]
        pet_type: String,

        #[arg(long, default_value = "")]
        breed: String,

        /// Age in years (blank for unknown)
        #[arg(long, default_value = "")]
        age: String,

        /// Weight in lbs (blank for unknown)
        #[arg(long, default_value = "")]
        weight: String,

        #[arg(long, default_value = "")]
        notes: String,

        #[arg(long, default_value = "")]
        image_url: String,
    },

    /// Delete a pet and all of its reminders
    Delete {
        #[arg(value_name = "PET_ID")]
        id: Uuid,
    },
}

#[derive(Subcommand)]
enum ReminderCommands {
    /// List reminders, soonest due first
    List {
        /// all, upcoming, overdue or completed
        #[arg(long, default_value = "all")]
        filter: ReminderFilter,
    },

    /// Add a reminder
    Add {
        #[arg(long = "pet", value_name = "PET_ID")]
        pet_id: Uuid,

        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// feeding, vet, grooming, medication, exercise or other
        #[arg(long = "type", value_name = "TYPE")]
        reminder_type: String,

        /// Due date as YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// Due time as HH:MM
        #[arg(long)]
        time: String,

        /// low, medium or high
        #[arg(long, default_value = "")]
        priority: String,

        /// daily, weekly, monthly or yearly; marks the reminder recurring
        #[arg(long, value_name = "INTERVAL")]
        recurring: Option<String>,
    },

    /// Flip a reminder between complete and incomplete
    Toggle {
        #[arg(value_name = "REMINDER_ID")]
        id: Uuid,
    },

    /// Delete a reminder
    Delete {
        #[arg(value_name = "REMINDER_ID")]
        id: Uuid,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pawminder_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;
    let store = HostedStore::new(&config)?;

    let (tab, event) = match cli.command {
        Commands::Register { email, password } => {
            let account = store.register(&email, &password).await?;
            println!("Registered {} ({})", account.email, account.id);
            return Ok(());
        }
        Commands::Login { email, password } => {
            println!("{}", store.login(&email, &password).await?);
            return Ok(());
        }
        Commands::Pets { command } => match command {
            PetCommands::List => (Tab::Pets, None),
            PetCommands::Add {
                name,
                pet_type,
                breed,
                age,
                weight,
                notes,
                image_url,
            } => (
                Tab::Pets,
                Some(Event::SubmitPet(PetForm {
                    name,
                    pet_type,
                    breed,
                    age,
                    weight,
                    notes,
                    image_url,
                })),
            ),
            PetCommands::Delete { id } => (Tab::Pets, Some(Event::DeletePet(id))),
        },
        Commands::Reminders { command } => match command {
            ReminderCommands::List { filter } => {
                (Tab::Reminders, Some(Event::SelectFilter(filter)))
            }
            ReminderCommands::Add {
                pet_id,
                title,
                description,
                reminder_type,
                date,
                time,
                priority,
                recurring,
            } => (
                Tab::Reminders,
                Some(Event::SubmitReminder(ReminderForm {
                    pet_id: Some(pet_id),
                    title,
                    description,
                    reminder_type,
                    due_date: date,
                    due_time: time,
                    is_recurring: recurring.is_some(),
                    recurring_interval: recurring.unwrap_or_default(),
                    priority,
                })),
            ),
            ReminderCommands::Toggle { id } => (Tab::Reminders, Some(Event::ToggleReminder(id))),
            ReminderCommands::Delete { id } => (Tab::Reminders, Some(Event::DeleteReminder(id))),
        },
    };

    let mut runtime = Runtime::new(store);
    runtime.dispatch(Event::Refresh).await;
    if let Some(event) = event {
        runtime.dispatch(event).await;
    }
    runtime.dispatch(Event::SelectTab(tab)).await;

    let state = runtime.state();
    eprint!("{}", render::notices(state));
    print!("{}", render::view(state, chrono::Local::now().naive_local()));

    if state.has_errors() {
        bail!("one or more operations failed");
    }

    Ok(())
}
