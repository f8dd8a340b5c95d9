//! Administrative maintenance routines.
//!
//! Each routine performs one fixed batch against an open connection and
//! returns a report; the `resort-admin` binary owns the connection and prints
//! the report. None of these routines is transactional: a failure partway
//! through leaves earlier writes committed.

use crate::{
    config::roster::RosterEntry,
    core::employee::{
        self, NewEmployee, format_employee_id, highest_employee_number, parse_employee_number,
    },
    entities::{Employee, Role, employee as employee_entity},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{Condition, QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument, warn};

/// Identifier of the fixed test employee
pub const TEST_EMPLOYEE_ID: &str = "TEST001";

/// Result of [`create_test_employee`]
#[derive(Debug, Clone)]
pub enum TestEmployeeOutcome {
    /// The test employee was inserted
    Created(employee_entity::Model),
    /// It was already there; nothing changed
    AlreadyExists(employee_entity::Model),
}

/// Creates the fixed test employee unless it already exists.
#[instrument(skip(db))]
pub async fn create_test_employee(db: &DatabaseConnection) -> Result<TestEmployeeOutcome> {
    if let Some(existing) = employee::get_employee_by_employee_id(db, TEST_EMPLOYEE_ID).await? {
        info!("Test employee {} already exists", TEST_EMPLOYEE_ID);
        return Ok(TestEmployeeOutcome::AlreadyExists(existing));
    }

    let created = employee::create_employee(
        db,
        NewEmployee {
            employee_id: Some(TEST_EMPLOYEE_ID.to_string()),
            name: "Test Employee".to_string(),
            position: "Kitchen Assistant".to_string(),
            monthly_rate: 1500.0,
            start_date: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap_or_default(),
            duties: vec!["Prep".to_string(), "Cleaning".to_string()],
            role: Role::Staff,
        },
    )
    .await?;
    info!("Created test employee with id {}", created.id);
    Ok(TestEmployeeOutcome::Created(created))
}

/// Outcome of inserting one roster entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Inserted
    Created {
        /// Identifier of the entry
        employee_id: String,
        /// Name of the entry
        name: String,
    },
    /// Rejected; earlier and later entries are unaffected
    Failed {
        /// Identifier of the entry
        employee_id: String,
        /// Name of the entry
        name: String,
        /// Why the insert failed
        reason: String,
    },
}

impl InsertOutcome {
    /// Whether the entry was inserted
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

/// Per-entry tally of a bulk insert, in roster order
#[derive(Debug, Clone, Default)]
pub struct BulkInsertReport {
    /// One outcome per roster entry
    pub outcomes: Vec<InsertOutcome>,
}

impl BulkInsertReport {
    /// Number of inserted entries
    #[must_use]
    pub fn successes(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of rejected entries
    #[must_use]
    pub fn failures(&self) -> usize {
        self.outcomes.len() - self.successes()
    }

    /// Human-readable summary, e.g. `Created 9 out of 10 employees`
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "Created {} out of {} employees",
            self.successes(),
            self.outcomes.len()
        )
    }
}

/// Gives roster entries with a blank identifier the next free `EMP###`,
/// numbering after both `stored_highest` and the identifiers in the roster.
fn assign_missing_ids(entries: &mut [RosterEntry], stored_highest: u32) {
    let mut next = entries
        .iter()
        .filter_map(|e| parse_employee_number(e.employee_id.trim()))
        .fold(stored_highest, u32::max);
    for entry in entries
        .iter_mut()
        .filter(|e| e.employee_id.trim().is_empty())
    {
        next += 1;
        entry.employee_id = format_employee_id(next);
    }
}

/// Inserts every roster entry concurrently and waits for all of them.
///
/// Entries without an identifier are numbered up front, in roster order.
/// Completion order is unspecified. Each entry yields exactly one outcome, so
/// successes plus failures always equals the roster size.
#[instrument(skip(db, entries), fields(count = entries.len()))]
pub async fn seed_roster(
    db: &DatabaseConnection,
    mut entries: Vec<RosterEntry>,
) -> BulkInsertReport {
    if entries.iter().any(|e| e.employee_id.trim().is_empty()) {
        match highest_employee_number(db).await {
            Ok(stored_highest) => assign_missing_ids(&mut entries, stored_highest),
            Err(e) => warn!("Could not number roster entries without an identifier: {}", e),
        }
    }

    let handles: Vec<_> = entries
        .into_iter()
        .map(|entry| {
            let db = db.clone();
            let employee_id = entry.employee_id.clone();
            let name = entry.name.clone();
            let handle = tokio::spawn(async move {
                employee::create_employee(
                    &db,
                    NewEmployee {
                        employee_id: Some(entry.employee_id),
                        name: entry.name,
                        position: entry.position,
                        monthly_rate: entry.monthly_rate,
                        start_date: entry.start_date,
                        duties: entry.duties,
                        role: entry.role,
                    },
                )
                .await
            });
            (employee_id, name, handle)
        })
        .collect();

    let mut report = BulkInsertReport::default();
    for (employee_id, name, handle) in handles {
        let outcome = match handle.await {
            Ok(Ok(created)) => {
                debug!("Inserted {} as row {}", employee_id, created.id);
                InsertOutcome::Created { employee_id, name }
            }
            Ok(Err(e)) => {
                warn!("Failed to insert {}: {}", employee_id, e);
                InsertOutcome::Failed {
                    employee_id,
                    name,
                    reason: e.to_string(),
                }
            }
            Err(e) => {
                warn!("Insert task for {} did not finish: {}", employee_id, e);
                InsertOutcome::Failed {
                    employee_id,
                    name,
                    reason: e.to_string(),
                }
            }
        };
        report.outcomes.push(outcome);
    }

    info!("{}", report.summary_line());
    report
}

/// Identifier assigned to one employee by [`backfill_employee_ids`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedId {
    /// Row id of the employee
    pub id: i64,
    /// Employee name
    pub name: String,
    /// The new identifier
    pub employee_id: String,
}

/// Gives every employee without an identifier the next free `EMP###`.
///
/// Employees are numbered in insertion order, continuing after the highest
/// number in use. Running it again finds nothing to do.
#[instrument(skip(db))]
pub async fn backfill_employee_ids(db: &DatabaseConnection) -> Result<Vec<AssignedId>> {
    let missing = Employee::find()
        .filter(
            Condition::any()
                .add(employee_entity::Column::EmployeeId.is_null())
                .add(employee_entity::Column::EmployeeId.eq("")),
        )
        .order_by_asc(employee_entity::Column::Id)
        .all(db)
        .await?;

    if missing.is_empty() {
        info!("All employees already have identifiers");
        return Ok(Vec::new());
    }

    let mut next = highest_employee_number(db).await? + 1;
    let mut assigned = Vec::with_capacity(missing.len());
    for employee in missing {
        let employee_id = format_employee_id(next);
        next += 1;

        let (id, name) = (employee.id, employee.name.clone());
        let mut active: employee_entity::ActiveModel = employee.into();
        active.employee_id = Set(Some(employee_id.clone()));
        active.update(db).await?;

        info!("Assigned {} to {}", employee_id, name);
        assigned.push(AssignedId {
            id,
            name,
            employee_id,
        });
    }

    Ok(assigned)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_test_employee_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;

        let first = create_test_employee(&db).await?;
        assert!(matches!(first, TestEmployeeOutcome::Created(_)));

        let second = create_test_employee(&db).await?;
        let TestEmployeeOutcome::AlreadyExists(existing) = second else {
            panic!("expected the existing test employee");
        };
        assert_eq!(existing.employee_id.as_deref(), Some(TEST_EMPLOYEE_ID));
        assert_eq!(employee::list_employees(&db).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_roster_with_one_duplicate() -> Result<()> {
        let db = setup_test_db().await?;

        let mut entries: Vec<_> = (1..=9)
            .map(|n| roster_entry(&format_employee_id(n), &format!("Cook {n}")))
            .collect();
        entries.push(roster_entry("EMP003", "Second Cook 3"));

        let report = seed_roster(&db, entries).await;

        assert_eq!(report.outcomes.len(), 10);
        assert_eq!(report.successes(), 9);
        assert_eq!(report.failures(), 1);
        assert_eq!(report.summary_line(), "Created 9 out of 10 employees");

        let failed: Vec<_> = report
            .outcomes
            .iter()
            .filter_map(|o| match o {
                InsertOutcome::Failed { employee_id, .. } => Some(employee_id.as_str()),
                InsertOutcome::Created { .. } => None,
            })
            .collect();
        assert_eq!(failed, vec!["EMP003"]);
        assert_eq!(employee::list_employees(&db).await?.len(), 9);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_roster_tally_matches_batch_size() -> Result<()> {
        let db = setup_test_db().await?;

        let entries = vec![
            roster_entry("EMP001", "A"),
            roster_entry("EMP001", "B"),
            roster_entry("EMP001", "C"),
            roster_entry("EMP002", "   "),
        ];
        let report = seed_roster(&db, entries).await;

        assert_eq!(report.successes() + report.failures(), 4);
        assert_eq!(report.successes(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_roster_numbers_blank_identifiers() -> Result<()> {
        let db = setup_test_db().await?;

        let entries = vec![
            roster_entry("", "A"),
            roster_entry("", "B"),
            roster_entry("  ", "C"),
        ];
        let report = seed_roster(&db, entries).await;

        assert_eq!(report.summary_line(), "Created 3 out of 3 employees");
        let ids: Vec<_> = report
            .outcomes
            .iter()
            .map(|o| match o {
                InsertOutcome::Created { employee_id, .. }
                | InsertOutcome::Failed { employee_id, .. } => employee_id.as_str(),
            })
            .collect();
        assert_eq!(ids, vec!["EMP001", "EMP002", "EMP003"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_identifiers_follow_stored_and_roster_numbers() -> Result<()> {
        let db = setup_test_db().await?;
        employee::create_employee(&db, new_employee("EMP004", "Stored")).await?;

        let entries = vec![roster_entry("", "Blank"), roster_entry("EMP007", "Listed")];
        let report = seed_roster(&db, entries).await;

        assert_eq!(report.successes(), 2);
        assert_eq!(
            report.outcomes[0],
            InsertOutcome::Created {
                employee_id: "EMP008".to_string(),
                name: "Blank".to_string(),
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_backfill_assigns_sequential_ids_and_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;

        employee::create_employee(&db, new_employee("EMP002", "Has Id")).await?;
        create_legacy_employee(&db, "Missing", None).await?;
        create_legacy_employee(&db, "Empty", Some("")).await?;

        let assigned = backfill_employee_ids(&db).await?;
        let ids: Vec<_> = assigned.iter().map(|a| a.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["EMP003", "EMP004"]);
        assert_eq!(assigned[0].name, "Missing");

        let all = employee::list_employees(&db).await?;
        assert!(
            all.iter()
                .all(|e| e.employee_id.as_deref().is_some_and(|id| !id.is_empty()))
        );

        let again = backfill_employee_ids(&db).await?;
        assert!(again.is_empty());
        assert_eq!(employee::list_employees(&db).await?, all);

        Ok(())
    }
}
