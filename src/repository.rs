use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    Assignment, NewAssignmentRequest, Preferences, TimeSlot, Timetable, UpdateAssignmentRequest,
};

// ---- timetables ----

pub async fn fetch_timetables(db: &SqlitePool) -> Result<Vec<Timetable>, sqlx::Error> {
    sqlx::query_as::<_, Timetable>(
        "SELECT id, name, is_current, updated_at FROM timetables ORDER BY rowid",
    )
    .fetch_all(db)
    .await
}

pub async fn find_timetable_by_id(
    db: &SqlitePool,
    id: &str,
) -> Result<Option<Timetable>, sqlx::Error> {
    sqlx::query_as::<_, Timetable>(
        "SELECT id, name, is_current, updated_at FROM timetables WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn count_timetables(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM timetables")
        .fetch_one(db)
        .await?;
    Ok(count)
}

/// Create an empty timetable and make it current. A missing name falls back
/// to "Timetable N".
pub async fn insert_timetable(
    db: &SqlitePool,
    name: Option<String>,
) -> Result<Timetable, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();
    let count = count_timetables(db).await?;
    let name = name.unwrap_or_else(|| format!("Timetable {}", count + 1));

    let mut tx = db.begin().await?;
    sqlx::query("UPDATE timetables SET is_current = 0")
        .execute(&mut *tx)
        .await?;
    sqlx::query("INSERT INTO timetables (id, name, is_current, updated_at) VALUES (?, ?, 1, ?)")
        .bind(&id)
        .bind(&name)
        .bind(&now)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(Timetable {
        id,
        name,
        is_current: true,
        updated_at: now,
    })
}

pub async fn rename_timetable(
    db: &SqlitePool,
    id: &str,
    name: &str,
) -> Result<Option<Timetable>, sqlx::Error> {
    let now = Utc::now().to_rfc3339();
    let rows = sqlx::query("UPDATE timetables SET name = ?, updated_at = ? WHERE id = ?")
        .bind(name)
        .bind(&now)
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    if rows == 0 {
        return Ok(None);
    }
    find_timetable_by_id(db, id).await
}

pub async fn delete_timetable(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let mut tx = db.begin().await?;
    sqlx::query("DELETE FROM class_slots WHERE timetable_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let rows = sqlx::query("DELETE FROM timetables WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    tx.commit().await?;

    Ok(rows > 0)
}

/// Promote the oldest timetable to current when none is marked. Invariant:
/// exactly one timetable is current whenever at least one exists.
pub async fn ensure_current(db: &SqlitePool) -> Result<(), sqlx::Error> {
    let (current,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM timetables WHERE is_current = 1")
            .fetch_one(db)
            .await?;
    if current == 0 {
        sqlx::query(
            "UPDATE timetables SET is_current = 1 \
             WHERE id = (SELECT id FROM timetables ORDER BY rowid LIMIT 1)",
        )
        .execute(db)
        .await?;
    }
    Ok(())
}

pub async fn set_current_timetable(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    if find_timetable_by_id(db, id).await?.is_none() {
        return Ok(false);
    }

    let mut tx = db.begin().await?;
    sqlx::query("UPDATE timetables SET is_current = 0")
        .execute(&mut *tx)
        .await?;
    sqlx::query("UPDATE timetables SET is_current = 1 WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(true)
}

/// Replace the full slot sequence of a timetable, keeping upload order.
pub async fn replace_schedule(
    db: &SqlitePool,
    timetable_id: &str,
    slots: &[TimeSlot],
) -> Result<Option<Vec<TimeSlot>>, sqlx::Error> {
    if find_timetable_by_id(db, timetable_id).await?.is_none() {
        return Ok(None);
    }

    let now = Utc::now().to_rfc3339();
    let mut tx = db.begin().await?;
    sqlx::query("DELETE FROM class_slots WHERE timetable_id = ?")
        .bind(timetable_id)
        .execute(&mut *tx)
        .await?;

    for (position, slot) in slots.iter().enumerate() {
        sqlx::query(
            "INSERT INTO class_slots \
                (id, timetable_id, day, start_time, end_time, subject, is_blocked, position) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(timetable_id)
        .bind(&slot.day)
        .bind(&slot.start_time)
        .bind(&slot.end_time)
        .bind(&slot.subject)
        .bind(slot.is_blocked)
        .bind(position as i64)
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query("UPDATE timetables SET updated_at = ? WHERE id = ?")
        .bind(&now)
        .bind(timetable_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(Some(slots.to_vec()))
}

pub async fn fetch_schedule(
    db: &SqlitePool,
    timetable_id: &str,
) -> Result<Vec<TimeSlot>, sqlx::Error> {
    sqlx::query_as::<_, TimeSlot>(
        "SELECT day, start_time, end_time, subject, is_blocked \
         FROM class_slots WHERE timetable_id = ? ORDER BY position",
    )
    .bind(timetable_id)
    .fetch_all(db)
    .await
}

/// Schedule of the current timetable; the recommendation engine only ever
/// reads this one.
pub async fn fetch_current_schedule(db: &SqlitePool) -> Result<Vec<TimeSlot>, sqlx::Error> {
    sqlx::query_as::<_, TimeSlot>(
        "SELECT s.day, s.start_time, s.end_time, s.subject, s.is_blocked \
         FROM class_slots s \
         JOIN timetables t ON t.id = s.timetable_id \
         WHERE t.is_current = 1 \
         ORDER BY s.position",
    )
    .fetch_all(db)
    .await
}

// ---- assignments ----

pub async fn fetch_assignments(db: &SqlitePool) -> Result<Vec<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(
        "SELECT id, title, due_date, estimated_time, priority, completed, kind, progress, \
                added_to_ai, memo, repeat_rule, reminder, updated_at \
         FROM assignments ORDER BY rowid",
    )
    .fetch_all(db)
    .await
}

pub async fn find_assignment_by_id(
    db: &SqlitePool,
    id: &str,
) -> Result<Option<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(
        "SELECT id, title, due_date, estimated_time, priority, completed, kind, progress, \
                added_to_ai, memo, repeat_rule, reminder, updated_at \
         FROM assignments WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert_assignment(
    db: &SqlitePool,
    req: NewAssignmentRequest,
) -> Result<Assignment, sqlx::Error> {
    let assignment = Assignment {
        id: Uuid::new_v4().to_string(),
        title: req.title,
        due_date: req.due_date,
        estimated_time: req.estimated_time,
        priority: req.priority,
        completed: false,
        kind: req.kind,
        progress: req.progress,
        added_to_ai: req.added_to_ai,
        memo: req.memo,
        repeat_rule: req.repeat_rule,
        reminder: req.reminder,
        updated_at: Utc::now().to_rfc3339(),
    };

    sqlx::query(
        "INSERT INTO assignments \
            (id, title, due_date, estimated_time, priority, completed, kind, progress, \
             added_to_ai, memo, repeat_rule, reminder, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&assignment.id)
    .bind(&assignment.title)
    .bind(&assignment.due_date)
    .bind(assignment.estimated_time)
    .bind(assignment.priority)
    .bind(assignment.completed)
    .bind(assignment.kind)
    .bind(assignment.progress)
    .bind(assignment.added_to_ai)
    .bind(&assignment.memo)
    .bind(&assignment.repeat_rule)
    .bind(&assignment.reminder)
    .bind(&assignment.updated_at)
    .execute(db)
    .await?;

    Ok(assignment)
}

pub async fn update_assignment(
    db: &SqlitePool,
    id: &str,
    req: UpdateAssignmentRequest,
) -> Result<Option<Assignment>, sqlx::Error> {
    let mut current = match find_assignment_by_id(db, id).await? {
        Some(a) => a,
        None => return Ok(None),
    };

    if let Some(title) = req.title {
        current.title = title;
    }
    if let Some(due_date) = req.due_date {
        current.due_date = due_date;
    }
    if let Some(estimated_time) = req.estimated_time {
        current.estimated_time = estimated_time;
    }
    if let Some(priority) = req.priority {
        current.priority = priority;
    }
    if let Some(kind) = req.kind {
        current.kind = kind;
    }
    if let Some(memo) = req.memo {
        current.memo = memo;
    }
    if req.repeat_rule.is_some() {
        current.repeat_rule = req.repeat_rule;
    }
    if req.reminder.is_some() {
        current.reminder = req.reminder;
    }
    current.updated_at = Utc::now().to_rfc3339();

    sqlx::query(
        "UPDATE assignments \
         SET title = ?, due_date = ?, estimated_time = ?, priority = ?, kind = ?, \
             memo = ?, repeat_rule = ?, reminder = ?, updated_at = ? \
         WHERE id = ?",
    )
    .bind(&current.title)
    .bind(&current.due_date)
    .bind(current.estimated_time)
    .bind(current.priority)
    .bind(current.kind)
    .bind(&current.memo)
    .bind(&current.repeat_rule)
    .bind(&current.reminder)
    .bind(&current.updated_at)
    .bind(id)
    .execute(db)
    .await?;

    Ok(Some(current))
}

pub async fn set_progress(
    db: &SqlitePool,
    id: &str,
    completed: bool,
    progress: i64,
) -> Result<Option<Assignment>, sqlx::Error> {
    let now = Utc::now().to_rfc3339();
    let rows = sqlx::query(
        "UPDATE assignments SET completed = ?, progress = ?, updated_at = ? WHERE id = ?",
    )
    .bind(completed)
    .bind(progress)
    .bind(&now)
    .bind(id)
    .execute(db)
    .await?
    .rows_affected();

    if rows == 0 {
        return Ok(None);
    }
    find_assignment_by_id(db, id).await
}

/// Opt a batch of assignments into the recommendation engine. Returns how
/// many rows actually changed; unknown ids are skipped silently.
pub async fn add_to_planner(db: &SqlitePool, ids: &[String]) -> Result<u64, sqlx::Error> {
    let now = Utc::now().to_rfc3339();
    let mut updated = 0;
    for id in ids {
        updated += sqlx::query(
            "UPDATE assignments SET added_to_ai = 1, updated_at = ? WHERE id = ?",
        )
        .bind(&now)
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();
    }
    Ok(updated)
}

// ---- preferences ----

pub async fn fetch_preferences(db: &SqlitePool) -> Result<Option<Preferences>, AppError> {
    let row: Option<(String, String, bool)> = sqlx::query_as(
        "SELECT avoid_slots, preferred_slots, hide_classes_in_monthly \
         FROM preferences WHERE id = 1",
    )
    .fetch_optional(db)
    .await?;

    match row {
        Some((avoid, preferred, hide_classes_in_monthly)) => Ok(Some(Preferences {
            avoid_time_slots: serde_json::from_str(&avoid)?,
            preferred_time_slots: serde_json::from_str(&preferred)?,
            hide_classes_in_monthly,
        })),
        None => Ok(None),
    }
}

pub async fn save_preferences(db: &SqlitePool, prefs: &Preferences) -> Result<(), AppError> {
    let avoid = serde_json::to_string(&prefs.avoid_time_slots)?;
    let preferred = serde_json::to_string(&prefs.preferred_time_slots)?;

    sqlx::query(
        "INSERT INTO preferences (id, avoid_slots, preferred_slots, hide_classes_in_monthly) \
         VALUES (1, ?, ?, ?) \
         ON CONFLICT(id) DO UPDATE SET \
             avoid_slots = excluded.avoid_slots, \
             preferred_slots = excluded.preferred_slots, \
             hide_classes_in_monthly = excluded.hide_classes_in_monthly",
    )
    .bind(&avoid)
    .bind(&preferred)
    .bind(prefs.hide_classes_in_monthly)
    .execute(db)
    .await?;

    Ok(())
}
