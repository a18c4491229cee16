/// View state and the update function
///
/// All state the presentation layer shows lives in [`ViewState`]. It changes
/// only through [`update`], which takes the current state and one [`Event`]
/// and returns the next state plus the [`Command`]s to run. `update` never
/// touches a store or the clock; the runtime executes commands and feeds
/// their outcomes back in as events.
///
/// # Flow
///
/// ```text
/// Event ──► update ──► (ViewState, [Command]) ──► Runtime ──► Store
///   ▲                                                           │
///   └──────────────── outcome events ◄──────────────────────────┘
/// ```
///
/// Every successful write is followed by a refresh of both lists, so the
/// view always shows what the store holds after the write.

use crate::forms::{FieldError, PetForm, ReminderForm};
use crate::store::StoreError;
use pawminder_shared::classify::ReminderFilter;
use pawminder_shared::models::{
    pet::{CreatePet, Pet},
    reminder::{CreateReminder, Reminder, SetCompletion},
};
use uuid::Uuid;

/// Top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Pets,
    Reminders,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Pets => "My Pets",
            Tab::Reminders => "Reminders",
        }
    }
}

/// Messages shown above the current view
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
    /// A form failed to parse
    Invalid(Vec<FieldError>),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Info(_))
    }
}

/// Everything the views render from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub tab: Tab,

    /// Newest first, as listed by the store
    pub pets: Vec<Pet>,

    /// Soonest due first, as listed by the store
    pub reminders: Vec<Reminder>,

    pub filter: ReminderFilter,

    /// True while any list load is outstanding
    pub loading: bool,

    /// Loads issued and not yet answered
    pub pending_loads: usize,

    pub notices: Vec<Notice>,
}

impl ViewState {
    /// Display name for a pet, "Unknown Pet" if it isn't loaded
    pub fn pet_name(&self, pet_id: Uuid) -> &str {
        self.pets
            .iter()
            .find(|pet| pet.id == pet_id)
            .map(|pet| pet.name.as_str())
            .unwrap_or("Unknown Pet")
    }

    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(Notice::is_error)
    }

    fn start_loads(mut self, commands: &mut Vec<Command>) -> Self {
        commands.push(Command::LoadPets);
        commands.push(Command::LoadReminders);
        self.pending_loads += 2;
        self.loading = true;
        self
    }

    fn finish_load(mut self) -> Self {
        self.pending_loads = self.pending_loads.saturating_sub(1);
        self.loading = self.pending_loads > 0;
        self
    }
}

/// Work for the runtime
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadPets,
    LoadReminders,
    CreatePet(CreatePet),
    DeletePet(Uuid),
    CreateReminder(CreateReminder),
    SetCompletion { id: Uuid, update: SetCompletion },
    DeleteReminder(Uuid),
}

/// A write the store accepted
#[derive(Debug, Clone, PartialEq)]
pub enum Written {
    PetCreated(Pet),
    PetDeleted(Uuid),
    ReminderCreated(Reminder),
    ReminderUpdated(Reminder),
    ReminderDeleted(Uuid),
}

impl Written {
    fn describe(&self) -> String {
        match self {
            Written::PetCreated(pet) => format!("Added {}", pet.name),
            Written::PetDeleted(_) => "Pet deleted".to_string(),
            Written::ReminderCreated(reminder) => format!("Created reminder \"{}\"", reminder.title),
            Written::ReminderUpdated(reminder) if reminder.is_completed => {
                format!("Completed \"{}\"", reminder.title)
            }
            Written::ReminderUpdated(reminder) => format!("Reopened \"{}\"", reminder.title),
            Written::ReminderDeleted(_) => "Reminder deleted".to_string(),
        }
    }
}

/// User intents and command outcomes
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Initial load, or an explicit refresh
    Refresh,
    SelectTab(Tab),
    SelectFilter(ReminderFilter),
    SubmitPet(PetForm),
    DeletePet(Uuid),
    SubmitReminder(ReminderForm),
    ToggleReminder(Uuid),
    DeleteReminder(Uuid),
    DismissNotices,

    PetsLoaded(Result<Vec<Pet>, StoreError>),
    RemindersLoaded(Result<Vec<Reminder>, StoreError>),
    Written(Result<Written, StoreError>),
}

/// Applies one event
pub fn update(state: ViewState, event: Event) -> (ViewState, Vec<Command>) {
    let mut commands = Vec::new();
    let mut state = state;

    match event {
        Event::Refresh => {
            state = state.start_loads(&mut commands);
        }
        Event::SelectTab(tab) => state.tab = tab,
        Event::SelectFilter(filter) => state.filter = filter,
        Event::SubmitPet(form) => match form.parse() {
            Ok(data) => commands.push(Command::CreatePet(data)),
            Err(errors) => state.notices.push(Notice::Invalid(errors)),
        },
        Event::DeletePet(id) => commands.push(Command::DeletePet(id)),
        Event::SubmitReminder(form) => {
            if state.pets.is_empty() {
                state
                    .notices
                    .push(Notice::Error("Add a pet before creating reminders".to_string()));
            } else {
                match form.parse() {
                    Ok(data) if !state.pets.iter().any(|pet| pet.id == data.pet_id) => {
                        state.notices.push(Notice::Invalid(vec![FieldError::new(
                            "pet_id",
                            "Select one of your pets",
                        )]));
                    }
                    Ok(data) => commands.push(Command::CreateReminder(data)),
                    Err(errors) => state.notices.push(Notice::Invalid(errors)),
                }
            }
        }
        Event::ToggleReminder(id) => match state.reminders.iter().find(|r| r.id == id) {
            Some(reminder) => commands.push(Command::SetCompletion {
                id,
                update: reminder.toggle_request(),
            }),
            None => state
                .notices
                .push(Notice::Error(format!("Reminder {} not found", id))),
        },
        Event::DeleteReminder(id) => commands.push(Command::DeleteReminder(id)),
        Event::DismissNotices => state.notices.clear(),

        Event::PetsLoaded(result) => {
            state = state.finish_load();
            match result {
                Ok(pets) => state.pets = pets,
                Err(e) => state
                    .notices
                    .push(Notice::Error(format!("Failed to load pets: {}", e))),
            }
        }
        Event::RemindersLoaded(result) => {
            state = state.finish_load();
            match result {
                Ok(reminders) => state.reminders = reminders,
                Err(e) => state
                    .notices
                    .push(Notice::Error(format!("Failed to load reminders: {}", e))),
            }
        }
        Event::Written(Ok(written)) => {
            state.notices.push(Notice::Info(written.describe()));
            state = state.start_loads(&mut commands);
        }
        Event::Written(Err(e)) => {
            state.notices.push(Notice::Error(e.to_string()));
        }
    }

    (state, commands)
}
