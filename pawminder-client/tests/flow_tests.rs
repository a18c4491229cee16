/// End-to-end view flows over the in-memory store
///
/// Each test drives the runtime with user events exactly as the CLI does and
/// checks both the resulting state and the rendered text.

use chrono::{Duration, NaiveDateTime};
use pawminder_client::{
    forms::{PetForm, ReminderForm},
    render,
    runtime::Runtime,
    state::{Event, Notice, Tab},
    store::MemoryStore,
};
use pawminder_shared::classify::ReminderFilter;
use uuid::Uuid;

fn pet_form(name: &str) -> PetForm {
    PetForm {
        name: name.to_string(),
        pet_type: "Dog".to_string(),
        ..Default::default()
    }
}

fn reminder_form(pet_id: Uuid, title: &str, due: NaiveDateTime) -> ReminderForm {
    ReminderForm {
        pet_id: Some(pet_id),
        title: title.to_string(),
        reminder_type: "feeding".to_string(),
        due_date: due.format("%Y-%m-%d").to_string(),
        due_time: due.format("%H:%M").to_string(),
        ..Default::default()
    }
}

/// A minute-aligned "now" so form round trips keep exact timestamps
fn now() -> NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

async fn runtime_with_pet(name: &str) -> (Runtime<MemoryStore>, Uuid) {
    let mut runtime = Runtime::new(MemoryStore::new());
    runtime.dispatch(Event::Refresh).await;
    runtime.dispatch(Event::SubmitPet(pet_form(name))).await;

    let pet_id = runtime.state().pets[0].id;
    runtime.dispatch(Event::DismissNotices).await;
    (runtime, pet_id)
}

#[tokio::test]
async fn test_empty_views() {
    let mut runtime = Runtime::new(MemoryStore::new());
    runtime.dispatch(Event::Refresh).await;

    let state = runtime.state();
    assert!(!state.loading);
    assert!(render::pet_list(state).contains(render::NO_PETS_HINT));
    assert!(render::reminder_list(state, now()).contains(render::REMINDERS_NEED_PET));
}

#[tokio::test]
async fn test_adding_a_pet_refreshes_the_list() {
    let (runtime, _) = runtime_with_pet("Rex").await;

    let text = render::pet_list(runtime.state());
    assert!(text.contains("My Pets (1)"));
    assert!(text.contains("Rex (Dog)"));
    assert!(text.contains("Age: unknown"));
    assert!(text.contains("Weight: unknown"));
    assert!(!text.contains("Breed:"));
}

#[tokio::test]
async fn test_reminder_lifecycle() {
    let (mut runtime, pet_id) = runtime_with_pet("Rex").await;

    runtime
        .dispatch(Event::SubmitReminder(reminder_form(
            pet_id,
            "Dinner",
            now() + Duration::hours(6),
        )))
        .await;
    runtime
        .dispatch(Event::SubmitReminder(reminder_form(
            pet_id,
            "Breakfast",
            now() - Duration::hours(4),
        )))
        .await;

    let state = runtime.state();
    assert!(!state.has_errors(), "{:?}", state.notices);
    let titles: Vec<&str> = state.reminders.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Breakfast", "Dinner"]);

    let bar = render::filter_bar(state, now());
    assert_eq!(bar, "[All (2)]  Upcoming (1)  Overdue (1)  Completed (0)");

    let breakfast = state.reminders[0].id;
    runtime.dispatch(Event::ToggleReminder(breakfast)).await;

    let done = runtime
        .state()
        .reminders
        .iter()
        .find(|r| r.id == breakfast)
        .unwrap();
    assert!(done.is_completed);
    assert!(done.completed_at.is_some());

    runtime
        .dispatch(Event::SelectFilter(ReminderFilter::Overdue))
        .await;
    let text = render::reminder_list(runtime.state(), now());
    assert!(text.contains("Reminders (0)"));
    assert!(text.contains("No overdue reminders at the moment"));

    runtime.dispatch(Event::ToggleReminder(breakfast)).await;
    let reopened = runtime
        .state()
        .reminders
        .iter()
        .find(|r| r.id == breakfast)
        .unwrap();
    assert!(!reopened.is_completed);
    assert!(reopened.completed_at.is_none());
}

#[tokio::test]
async fn test_reminder_row_details() {
    let (mut runtime, pet_id) = runtime_with_pet("Rex").await;

    let form = ReminderForm {
        description: "Half a tablet".to_string(),
        is_recurring: true,
        recurring_interval: "weekly".to_string(),
        priority: "high".to_string(),
        ..reminder_form(pet_id, "Pill", now() - Duration::minutes(30))
    };
    runtime.dispatch(Event::SubmitReminder(form)).await;
    runtime.dispatch(Event::SelectTab(Tab::Reminders)).await;

    let text = render::view(runtime.state(), now());
    assert!(text.contains("[Reminders]"));
    assert!(text.contains("[ ] Pill (feeding) - Rex [high]"));
    assert!(text.contains("Half a tablet"));
    assert!(text.contains("2024-06-15  11:30  Recurring: weekly  Overdue"));
}

#[tokio::test]
async fn test_due_now_is_upcoming_until_it_passes() {
    let (mut runtime, pet_id) = runtime_with_pet("Rex").await;
    runtime
        .dispatch(Event::SubmitReminder(reminder_form(pet_id, "Walk", now())))
        .await;

    let state = runtime.state();
    assert_eq!(
        render::filter_bar(state, now()),
        "[All (1)]  Upcoming (1)  Overdue (0)  Completed (0)"
    );
    assert_eq!(
        render::filter_bar(state, now() + Duration::seconds(1)),
        "[All (1)]  Upcoming (0)  Overdue (1)  Completed (0)"
    );
}

#[tokio::test]
async fn test_deleting_a_pet_removes_its_reminders() {
    let (mut runtime, rex) = runtime_with_pet("Rex").await;
    runtime.dispatch(Event::SubmitPet(pet_form("Tom"))).await;
    let tom = runtime
        .state()
        .pets
        .iter()
        .find(|pet| pet.name == "Tom")
        .unwrap()
        .id;

    runtime
        .dispatch(Event::SubmitReminder(reminder_form(rex, "Walk", now())))
        .await;
    runtime
        .dispatch(Event::SubmitReminder(reminder_form(tom, "Brush", now())))
        .await;
    assert_eq!(runtime.state().reminders.len(), 2);

    runtime.dispatch(Event::DeletePet(rex)).await;

    let state = runtime.state();
    assert_eq!(state.pets.len(), 1);
    assert_eq!(state.reminders.len(), 1);
    assert_eq!(state.reminders[0].pet_id, tom);
}

#[tokio::test]
async fn test_reminder_for_unloaded_pet_shows_unknown_pet() {
    let (mut runtime, pet_id) = runtime_with_pet("Rex").await;
    runtime
        .dispatch(Event::SubmitReminder(reminder_form(pet_id, "Walk", now())))
        .await;

    let mut state = runtime.state().clone();
    state.pets[0].id = Uuid::new_v4();

    let text = render::reminder_list(&state, now());
    assert!(text.contains("Walk (feeding) - Unknown Pet"));
}

#[tokio::test]
async fn test_store_errors_become_notices() {
    let (mut runtime, _) = runtime_with_pet("Rex").await;

    runtime.dispatch(Event::DeleteReminder(Uuid::new_v4())).await;

    let state = runtime.state();
    assert!(state.has_errors());
    assert!(matches!(state.notices.as_slice(), [Notice::Error(message)] if message.contains("not found")));
    assert!(render::notices(state).starts_with("error: "));
}

#[tokio::test]
async fn test_invalid_form_is_reported_per_field() {
    let (mut runtime, pet_id) = runtime_with_pet("Rex").await;

    let form = ReminderForm {
        due_time: "9am".to_string(),
        title: " ".to_string(),
        ..reminder_form(pet_id, "x", now())
    };
    runtime.dispatch(Event::SubmitReminder(form)).await;

    let text = render::notices(runtime.state());
    assert!(text.contains("invalid due_time: Time must be HH:MM"));
    assert!(text.contains("invalid title:"));
    assert!(runtime.state().reminders.is_empty());
}
