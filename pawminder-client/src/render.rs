/// Plain-text rendering of the view state
///
/// Every function here is pure: it takes the state and, where
/// classification matters, the current wall-clock time, and returns text.
/// Rendering twice with different `now` values can move a reminder from
/// upcoming to overdue.

use crate::state::{Notice, Tab, ViewState};
use chrono::NaiveDateTime;
use pawminder_shared::classify::{self, Bucket, ReminderFilter};
use pawminder_shared::models::{pet::Pet, reminder::Reminder};

pub const NO_PETS_TITLE: &str = "No pets yet";
pub const NO_PETS_HINT: &str = "Add your first pet to start tracking their care";
pub const REMINDERS_NEED_PET: &str = "Add a pet first before creating reminders";
pub const NO_REMINDERS_HINT: &str = "Create your first reminder to keep track of pet care tasks";

/// Message shown when a filter matches nothing
pub fn empty_reminders_message(filter: ReminderFilter) -> String {
    match filter {
        ReminderFilter::All => NO_REMINDERS_HINT.to_string(),
        filter => format!("No {} reminders at the moment", filter),
    }
}

fn filter_label(filter: ReminderFilter) -> &'static str {
    match filter {
        ReminderFilter::All => "All",
        ReminderFilter::Upcoming => "Upcoming",
        ReminderFilter::Overdue => "Overdue",
        ReminderFilter::Completed => "Completed",
    }
}

/// One pet card
///
/// Breed and notes appear only when present; age and weight read
/// "unknown" when recorded as 0.
pub fn pet_card(pet: &Pet) -> String {
    let mut out = format!("{} ({})\n", pet.name, pet.pet_type);

    if !pet.breed.is_empty() {
        out.push_str(&format!("  Breed: {}\n", pet.breed));
    }

    match pet.known_age() {
        Some(1) => out.push_str("  Age: 1 year\n"),
        Some(age) => out.push_str(&format!("  Age: {} years\n", age)),
        None => out.push_str("  Age: unknown\n"),
    }

    match pet.known_weight() {
        Some(weight) => out.push_str(&format!("  Weight: {} lbs\n", weight)),
        None => out.push_str("  Weight: unknown\n"),
    }

    if !pet.notes.is_empty() {
        out.push_str(&format!("  Notes: {}\n", pet.notes));
    }

    out.push_str(&format!("  id: {}\n", pet.id));
    out
}

/// The "My Pets" view
pub fn pet_list(state: &ViewState) -> String {
    if state.loading && state.pets.is_empty() {
        return "Loading pets...\n".to_string();
    }

    if state.pets.is_empty() {
        return format!("{}\n{}\n", NO_PETS_TITLE, NO_PETS_HINT);
    }

    let mut out = format!("My Pets ({})\n\n", state.pets.len());
    for pet in &state.pets {
        out.push_str(&pet_card(pet));
        out.push('\n');
    }
    out
}

/// One reminder row
pub fn reminder_row(reminder: &Reminder, pet_name: &str, now: NaiveDateTime) -> String {
    let bucket = classify::bucket(reminder, now);
    let marker = if bucket == Bucket::Completed { "[x]" } else { "[ ]" };

    let mut out = format!(
        "{} {} ({}) - {} [{}]\n",
        marker, reminder.title, reminder.reminder_type, pet_name, reminder.priority
    );

    if !reminder.description.is_empty() {
        out.push_str(&format!("    {}\n", reminder.description));
    }

    out.push_str(&format!(
        "    {}  {}",
        reminder.due_date.format("%Y-%m-%d"),
        reminder.due_date.format("%H:%M")
    ));

    if let Some(interval) = reminder.recurrence() {
        out.push_str(&format!("  Recurring: {}", interval));
    }

    if bucket == Bucket::Overdue {
        out.push_str("  Overdue");
    }

    out.push_str(&format!("\n    id: {}\n", reminder.id));
    out
}

/// Filter buttons with per-filter counts, the active one bracketed
pub fn filter_bar(state: &ViewState, now: NaiveDateTime) -> String {
    let counts = classify::counts(&state.reminders, now);

    ReminderFilter::ALL
        .iter()
        .map(|&filter| {
            let label = format!("{} ({})", filter_label(filter), counts.get(filter));
            if filter == state.filter {
                format!("[{}]", label)
            } else {
                label
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// The "Reminders" view under the active filter
pub fn reminder_list(state: &ViewState, now: NaiveDateTime) -> String {
    if state.loading && state.reminders.is_empty() {
        return "Loading reminders...\n".to_string();
    }

    if state.pets.is_empty() {
        return format!("No pets added\n{}\n", REMINDERS_NEED_PET);
    }

    let visible = classify::filter_reminders(&state.reminders, state.filter, now);

    let mut out = format!(
        "Reminders ({})\n{}\n\n",
        visible.len(),
        filter_bar(state, now)
    );

    if visible.is_empty() {
        out.push_str(&format!(
            "No reminders found\n{}\n",
            empty_reminders_message(state.filter)
        ));
        return out;
    }

    for reminder in visible {
        out.push_str(&reminder_row(reminder, state.pet_name(reminder.pet_id), now));
        out.push('\n');
    }
    out
}

/// Notices, one per line; invalid forms list each field
pub fn notices(state: &ViewState) -> String {
    state
        .notices
        .iter()
        .flat_map(|notice| match notice {
            Notice::Info(message) => vec![format!("{}\n", message)],
            Notice::Error(message) => vec![format!("error: {}\n", message)],
            Notice::Invalid(errors) => errors
                .iter()
                .map(|error| format!("invalid {}: {}\n", error.field, error.message))
                .collect(),
        })
        .collect()
}

/// The current tab with its title line
pub fn view(state: &ViewState, now: NaiveDateTime) -> String {
    let tabs = [Tab::Pets, Tab::Reminders]
        .iter()
        .map(|&tab| {
            if tab == state.tab {
                format!("[{}]", tab.label())
            } else {
                tab.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");

    let body = match state.tab {
        Tab::Pets => pet_list(state),
        Tab::Reminders => reminder_list(state, now),
    };

    format!("PawMinder  {}\n\n{}", tabs, body)
}
