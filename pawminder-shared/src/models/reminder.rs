/// Reminder model and database operations
///
/// A reminder is a pet-care task with a due timestamp, a priority, an
/// optional recurrence label and a completion state.
///
/// # State Machine
///
/// ```text
/// incomplete ⇄ complete
/// ```
///
/// Both directions are user-triggered through [`Reminder::set_completion`],
/// which writes `is_completed` and `completed_at` together. "Overdue" is
/// never stored; see [`crate::classify`].
///
/// # Recurrence
///
/// `is_recurring` / `recurring_interval` are labels only. Nothing generates
/// follow-up reminders. When `is_recurring` is false the interval is always
/// `none` ([`CreateReminder::normalized`] and a table CHECK enforce it).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE reminders (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     pet_id UUID NOT NULL REFERENCES pets(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     reminder_type reminder_type NOT NULL DEFAULT 'other',
///     due_date TIMESTAMP NOT NULL,
///     is_recurring BOOLEAN NOT NULL DEFAULT FALSE,
///     recurring_interval recurring_interval NOT NULL DEFAULT 'none',
///     priority reminder_priority NOT NULL DEFAULT 'medium',
///     is_completed BOOLEAN NOT NULL DEFAULT FALSE,
///     completed_at TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use super::order::{Order, SortColumn};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

const REMINDER_COLUMNS: &str = "id, pet_id, title, description, reminder_type, due_date, \
     is_recurring, recurring_interval, priority, is_completed, completed_at, created_at";

/// Kind of care the reminder is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reminder_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    Feeding,
    Vet,
    Grooming,
    Medication,
    Exercise,
    #[default]
    Other,
}

/// Recurrence label (no scheduling effect)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "recurring_interval", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecurringInterval {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Reminder priority
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
    sqlx::Type,
)]
#[sqlx(type_name = "reminder_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Error for labels that don't name a known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! label_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            /// All variants in declaration order
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Wire/database label
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($label => Ok($ty::$variant),)+
                    _ => Err(UnknownLabel {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

label_enum!(ReminderType, "reminder type", {
    Feeding => "feeding",
    Vet => "vet",
    Grooming => "grooming",
    Medication => "medication",
    Exercise => "exercise",
    Other => "other",
});

label_enum!(RecurringInterval, "recurring interval", {
    None => "none",
    Daily => "daily",
    Weekly => "weekly",
    Monthly => "monthly",
    Yearly => "yearly",
});

label_enum!(Priority, "priority", {
    Low => "low",
    Medium => "medium",
    High => "high",
});

/// A care reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reminder {
    /// Unique reminder ID
    pub id: Uuid,

    /// Pet the reminder belongs to
    pub pet_id: Uuid,

    pub title: String,

    pub description: String,

    pub reminder_type: ReminderType,

    /// Combined due date and time (wall clock, no zone)
    pub due_date: NaiveDateTime,

    pub is_recurring: bool,

    /// Meaningful only when `is_recurring` is set
    pub recurring_interval: RecurringInterval,

    pub priority: Priority,

    pub is_completed: bool,

    /// Set iff `is_completed`
    pub completed_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

/// Completion update written by the toggle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCompletion {
    pub is_completed: bool,
}

impl Reminder {
    /// The update that flips this reminder's completion state
    pub fn toggle_request(&self) -> SetCompletion {
        SetCompletion {
            is_completed: !self.is_completed,
        }
    }

    /// Applies a completion update in memory
    ///
    /// `completed_at` becomes `now` when completing and is cleared when
    /// reopening, mirroring [`Reminder::set_completion`].
    pub fn with_completion(mut self, update: SetCompletion, now: DateTime<Utc>) -> Self {
        self.is_completed = update.is_completed;
        self.completed_at = update.is_completed.then_some(now);
        self
    }

    /// Interval to display, `None` for non-recurring reminders
    pub fn recurrence(&self) -> Option<RecurringInterval> {
        self.is_recurring.then_some(self.recurring_interval)
    }
}

/// Input for creating a reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateReminder {
    pub pet_id: Uuid,

    #[validate(
        length(max = 255, message = "Title must be at most 255 characters"),
        custom(function = "crate::models::non_blank")
    )]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub reminder_type: ReminderType,

    pub due_date: NaiveDateTime,

    #[serde(default)]
    pub is_recurring: bool,

    #[serde(default)]
    pub recurring_interval: RecurringInterval,

    #[serde(default)]
    pub priority: Priority,
}

impl CreateReminder {
    /// Forces the interval to `none` when the reminder is not recurring
    pub fn normalized(mut self) -> Self {
        if !self.is_recurring {
            self.recurring_interval = RecurringInterval::None;
        }
        self
    }
}

/// Columns reminders can be listed by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderColumn {
    DueDate,
    CreatedAt,
    Priority,
}

impl SortColumn for ReminderColumn {
    fn column_name(&self) -> &'static str {
        match self {
            ReminderColumn::DueDate => "due_date",
            ReminderColumn::CreatedAt => "created_at",
            ReminderColumn::Priority => "priority",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "due_date" => Some(ReminderColumn::DueDate),
            "created_at" => Some(ReminderColumn::CreatedAt),
            "priority" => Some(ReminderColumn::Priority),
            _ => None,
        }
    }
}

/// Default reminder ordering: soonest due first
pub fn default_reminder_order() -> Order<ReminderColumn> {
    Order::asc(ReminderColumn::DueDate)
}

/// Optional filters for [`Reminder::list`]
#[derive(Debug, Clone, Default)]
pub struct ReminderQuery {
    /// Restrict to one pet's reminders
    pub pet_id: Option<Uuid>,
}

impl Reminder {
    /// Inserts a reminder
    ///
    /// The input is normalized first, so a non-recurring reminder is always
    /// stored with interval `none`. New reminders start incomplete.
    pub async fn create(pool: &PgPool, data: CreateReminder) -> Result<Self, sqlx::Error> {
        let data = data.normalized();

        let reminder = sqlx::query_as::<_, Reminder>(&format!(
            r#"
            INSERT INTO reminders (pet_id, title, description, reminder_type, due_date,
                                   is_recurring, recurring_interval, priority)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {REMINDER_COLUMNS}
            "#
        ))
        .bind(data.pet_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.reminder_type)
        .bind(data.due_date)
        .bind(data.is_recurring)
        .bind(data.recurring_interval)
        .bind(data.priority)
        .fetch_one(pool)
        .await?;

        Ok(reminder)
    }

    /// Finds a reminder by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let reminder = sqlx::query_as::<_, Reminder>(&format!(
            "SELECT {REMINDER_COLUMNS} FROM reminders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(reminder)
    }

    /// Lists one pet's reminders, soonest due first
    pub async fn list_by_pet(pool: &PgPool, pet_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        Self::list(
            pool,
            &ReminderQuery {
                pet_id: Some(pet_id),
            },
            default_reminder_order(),
        )
        .await
    }

    /// Lists reminders matching `filter` in the requested order
    pub async fn list(
        pool: &PgPool,
        filter: &ReminderQuery,
        order: Order<ReminderColumn>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {REMINDER_COLUMNS} FROM reminders"));

        if let Some(pet_id) = filter.pet_id {
            query.push(" WHERE pet_id = ").push_bind(pet_id);
        }

        query.push(format!(" ORDER BY {}, id", order.to_sql()));

        let reminders = query.build_query_as::<Reminder>().fetch_all(pool).await?;

        Ok(reminders)
    }

    /// Sets the completion state
    ///
    /// `completed_at` is written in the same statement: `NOW()` when
    /// completing, `NULL` when reopening. Returns `None` if the reminder
    /// doesn't exist.
    pub async fn set_completion(
        pool: &PgPool,
        id: Uuid,
        update: SetCompletion,
    ) -> Result<Option<Self>, sqlx::Error> {
        let reminder = sqlx::query_as::<_, Reminder>(&format!(
            r#"
            UPDATE reminders
            SET is_completed = $2,
                completed_at = CASE WHEN $2 THEN NOW() ELSE NULL END
            WHERE id = $1
            RETURNING {REMINDER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.is_completed)
        .fetch_optional(pool)
        .await?;

        Ok(reminder)
    }

    /// Deletes a reminder
    ///
    /// Returns true if a reminder was removed.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reminders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
