//! Employee business logic - creation, lookup and identifier numbering.
//!
//! Identifiers have the form `EMP` followed by at least three digits. New
//! identifiers continue after the highest number already in use.

use crate::{
    entities::{Employee, Role, employee, employee::Duties},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};

/// Prefix of generated employee identifiers
pub const EMPLOYEE_ID_PREFIX: &str = "EMP";

/// Input for creating an employee
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    /// Business identifier; the next free `EMP###` is assigned when absent or blank
    #[serde(default, rename = "employeeID")]
    pub employee_id: Option<String>,
    /// Full name
    pub name: String,
    /// Job title
    pub position: String,
    /// Monthly pay rate
    pub monthly_rate: f64,
    /// First working day
    pub start_date: NaiveDate,
    /// Assigned duties
    #[serde(default)]
    pub duties: Vec<String>,
    /// Access role
    #[serde(default = "default_role")]
    pub role: Role,
}

const fn default_role() -> Role {
    Role::Staff
}

/// Formats the `n`th employee identifier, e.g. `EMP007`.
#[must_use]
pub fn format_employee_id(n: u32) -> String {
    format!("{EMPLOYEE_ID_PREFIX}{n:03}")
}

/// Extracts the number from an `EMP###` identifier.
#[must_use]
pub fn parse_employee_number(employee_id: &str) -> Option<u32> {
    employee_id
        .strip_prefix(EMPLOYEE_ID_PREFIX)
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse().ok())
}

/// Highest number among existing `EMP###` identifiers, 0 if there are none.
pub async fn highest_employee_number(db: &DatabaseConnection) -> Result<u32> {
    let employees = Employee::find()
        .filter(employee::Column::EmployeeId.is_not_null())
        .all(db)
        .await?;

    Ok(employees
        .iter()
        .filter_map(|e| e.employee_id.as_deref().and_then(parse_employee_number))
        .max()
        .unwrap_or(0))
}

/// The identifier the next created employee would receive.
pub async fn next_employee_id(db: &DatabaseConnection) -> Result<String> {
    Ok(format_employee_id(highest_employee_number(db).await? + 1))
}

/// Retrieves all employees, ordered by identifier (legacy rows without one last).
pub async fn list_employees(db: &DatabaseConnection) -> Result<Vec<employee::Model>> {
    let mut employees = Employee::find()
        .order_by_asc(employee::Column::Id)
        .all(db)
        .await?;
    employees.sort_by(|a, b| match (&a.employee_id, &b.employee_id) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });
    Ok(employees)
}

/// Finds an employee by business identifier.
pub async fn get_employee_by_employee_id(
    db: &DatabaseConnection,
    employee_id: &str,
) -> Result<Option<employee::Model>> {
    Employee::find()
        .filter(employee::Column::EmployeeId.eq(employee_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an employee by primary key.
pub async fn get_employee_by_id(
    db: &DatabaseConnection,
    id: i64,
) -> Result<Option<employee::Model>> {
    Employee::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Creates a new employee, performing input validation.
///
/// Names are trimmed and must not be empty; the monthly rate must be a
/// non-negative number. A taken identifier yields [`Error::Duplicate`].
pub async fn create_employee(
    db: &DatabaseConnection,
    new: NewEmployee,
) -> Result<employee::Model> {
    let name = new.name.trim();
    if name.is_empty() {
        return Err(Error::validation("Employee name cannot be empty"));
    }
    if !new.monthly_rate.is_finite() || new.monthly_rate < 0.0 {
        return Err(Error::validation(format!(
            "Invalid monthly rate: {}",
            new.monthly_rate
        )));
    }

    let employee_id = match new.employee_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => next_employee_id(db).await?,
    };

    let employee = employee::ActiveModel {
        employee_id: Set(Some(employee_id.clone())),
        name: Set(name.to_string()),
        position: Set(new.position.trim().to_string()),
        monthly_rate: Set(new.monthly_rate),
        start_date: Set(new.start_date),
        duties: Set(Duties(new.duties)),
        is_active: Set(true),
        role: Set(new.role),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    employee
        .insert(db)
        .await
        .map_err(|e| Error::from_insert(e, "employeeID", employee_id))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_employee_id_formatting_and_parsing() {
        assert_eq!(format_employee_id(7), "EMP007");
        assert_eq!(format_employee_id(1234), "EMP1234");
        assert_eq!(parse_employee_number("EMP042"), Some(42));
        assert_eq!(parse_employee_number("EMP"), None);
        assert_eq!(parse_employee_number("TEST001"), None);
        assert_eq!(parse_employee_number("EMP12a"), None);
    }

    #[tokio::test]
    async fn test_create_employee_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let mut blank = new_employee("EMP001", "   ");
        let result = create_employee(&db, blank.clone()).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        blank.name = "Valid".to_string();
        blank.monthly_rate = -1.0;
        let result = create_employee(&db, blank).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_employee_assigns_next_id() -> Result<()> {
        let db = setup_test_db().await?;

        create_employee(&db, new_employee("EMP004", "Existing")).await?;

        let mut without_id = new_employee("", "Newcomer");
        without_id.employee_id = None;
        let created = create_employee(&db, without_id).await?;
        assert_eq!(created.employee_id.as_deref(), Some("EMP005"));
        assert!(created.is_active);
        assert_eq!(created.duties, Duties(vec!["Prep".to_string()]));

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_employee_id_rejected() -> Result<()> {
        let db = setup_test_db().await?;

        create_employee(&db, new_employee("EMP001", "First")).await?;
        let result = create_employee(&db, new_employee("EMP001", "Second")).await;
        assert!(matches!(
            result,
            Err(Error::Duplicate { field: "employeeID", ref value }) if value == "EMP001"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_employees_orders_by_identifier() -> Result<()> {
        let db = setup_test_db().await?;

        create_employee(&db, new_employee("EMP002", "B")).await?;
        create_legacy_employee(&db, "Legacy", None).await?;
        create_employee(&db, new_employee("EMP001", "A")).await?;

        let employees = list_employees(&db).await?;
        let names: Vec<_> = employees.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "Legacy"]);

        let found = get_employee_by_employee_id(&db, "EMP002").await?.unwrap();
        assert_eq!(found.name, "B");
        assert_eq!(found.monthly_rate, 2500.0);

        Ok(())
    }
}
