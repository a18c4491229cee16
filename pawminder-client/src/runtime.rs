/// Command runtime
///
/// Owns the [`ViewState`] and a [`Store`]. [`Runtime::dispatch`] feeds an
/// event through [`update`], runs the resulting commands one at a time and
/// feeds each outcome back in, until no commands remain.

use crate::state::{update, Command, Event, ViewState, Written};
use crate::store::Store;
use std::collections::VecDeque;

/// Drives [`update`] against a store
pub struct Runtime<S: Store> {
    store: S,
    state: ViewState,
}

impl<S: Store> Runtime<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Processes an event and everything it triggers
    pub async fn dispatch(&mut self, event: Event) {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            let (next, commands) = update(std::mem::take(&mut self.state), event);
            self.state = next;

            for command in commands {
                queue.push_back(self.execute(command).await);
            }
        }
    }

    async fn execute(&self, command: Command) -> Event {
        tracing::debug!(?command, "Executing command");

        match command {
            Command::LoadPets => Event::PetsLoaded(self.store.list_pets().await),
            Command::LoadReminders => Event::RemindersLoaded(self.store.list_reminders().await),
            Command::CreatePet(data) => {
                Event::Written(self.store.create_pet(data).await.map(Written::PetCreated))
            }
            Command::DeletePet(id) => Event::Written(
                self.store
                    .delete_pet(id)
                    .await
                    .map(|()| Written::PetDeleted(id)),
            ),
            Command::CreateReminder(data) => Event::Written(
                self.store
                    .create_reminder(data)
                    .await
                    .map(Written::ReminderCreated),
            ),
            Command::SetCompletion { id, update } => Event::Written(
                self.store
                    .set_completion(id, update)
                    .await
                    .map(Written::ReminderUpdated),
            ),
            Command::DeleteReminder(id) => Event::Written(
                self.store
                    .delete_reminder(id)
                    .await
                    .map(|()| Written::ReminderDeleted(id)),
            ),
        }
    }
}
