//! Employee management: add, update, delete, show and list.

use std::fmt::Write;

use anyhow::{Context, Result};
use clap::Args;

use att_core::EmployeeStatus;
use att_db::{Database, Employee, EmployeeFilter, EmployeeUpdate, NewEmployee};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Employee code, as enrolled on the time-clock.
    pub code: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    /// Department name; created if it does not exist.
    #[arg(long)]
    pub department: Option<String>,

    #[arg(long, default_value = "active")]
    pub status: EmployeeStatus,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub code: String,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    /// Department name; created if it does not exist.
    #[arg(long, conflicts_with = "no_department")]
    pub department: Option<String>,

    /// Remove the employee from their department.
    #[arg(long)]
    pub no_department: bool,

    #[arg(long)]
    pub status: Option<EmployeeStatus>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only employees of this department.
    #[arg(long)]
    pub department: Option<String>,

    #[arg(long)]
    pub status: Option<EmployeeStatus>,

    /// Substring of given name, family name or code.
    #[arg(long)]
    pub search: Option<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn add(db: &mut Database, args: &AddArgs) -> Result<()> {
    let department_id = args
        .department
        .as_deref()
        .map(|name| db.ensure_department(name))
        .transpose()?;
    let id = db
        .add_employee(&NewEmployee {
            code: args.code.clone(),
            first_name: args.first_name.clone(),
            last_name: args.last_name.clone(),
            department_id,
            status: args.status,
        })
        .with_context(|| format!("failed to add employee {}", args.code))?;
    tracing::debug!(id, code = %args.code, "added employee");
    println!("{}", args.code);
    Ok(())
}

pub fn update(db: &mut Database, args: &UpdateArgs) -> Result<()> {
    if args.first_name.is_none()
        && args.last_name.is_none()
        && args.department.is_none()
        && !args.no_department
        && args.status.is_none()
    {
        anyhow::bail!("nothing to update; pass at least one field");
    }
    if db.employee_by_code(&args.code)?.is_none() {
        anyhow::bail!("unknown employee: {}", args.code);
    }

    let department_id = args
        .department
        .as_deref()
        .map(|name| db.ensure_department(name))
        .transpose()?;
    let update = EmployeeUpdate {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        department_id,
        clear_department: args.no_department,
        status: args.status,
    };
    db.update_employee(&args.code, &update)?;
    Ok(())
}

pub fn delete(db: &mut Database, code: &str) -> Result<()> {
    if !db.delete_employee(code)? {
        anyhow::bail!("unknown employee: {code}");
    }
    Ok(())
}

pub fn format_employee(employee: &Employee) -> String {
    let mut output = String::new();
    writeln!(output, "Code:       {}", employee.code).unwrap();
    writeln!(
        output,
        "Name:       {} {}",
        employee.first_name, employee.last_name
    )
    .unwrap();
    writeln!(
        output,
        "Department: {}",
        employee.department.as_deref().unwrap_or("-")
    )
    .unwrap();
    writeln!(output, "Status:     {}", employee.status).unwrap();
    output
}

pub fn show(db: &Database, code: &str, json: bool) -> Result<()> {
    let employee = db
        .employee_by_code(code)?
        .with_context(|| format!("unknown employee: {code}"))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&employee)?);
    } else {
        print!("{}", format_employee(&employee));
    }
    Ok(())
}

pub fn format_employees(employees: &[Employee]) -> String {
    let mut output = String::new();
    if employees.is_empty() {
        writeln!(output, "No employees found.").unwrap();
        return output;
    }

    writeln!(
        output,
        "{:<8}  {:<24}  {:<16}  Status",
        "Code", "Name", "Department"
    )
    .unwrap();
    for employee in employees {
        let name = format!("{} {}", employee.first_name, employee.last_name);
        writeln!(
            output,
            "{:<8}  {:<24}  {:<16}  {}",
            employee.code,
            name,
            employee.department.as_deref().unwrap_or("-"),
            employee.status
        )
        .unwrap();
    }
    writeln!(output).unwrap();
    writeln!(output, "{} employees", employees.len()).unwrap();
    output
}

pub fn list(db: &Database, args: &ListArgs) -> Result<()> {
    let department_id = match args.department.as_deref() {
        Some(name) => Some(
            db.department_by_name(name)?
                .with_context(|| format!("unknown department: {name}"))?
                .id,
        ),
        None => None,
    };
    let employees = db.list_employees(&EmployeeFilter {
        department_id,
        status: args.status,
        search: args.search.clone(),
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&employees)?);
    } else {
        print!("{}", format_employees(&employees));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn add_args(code: &str, first: &str, last: &str, department: Option<&str>) -> AddArgs {
        AddArgs {
            code: code.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            department: department.map(String::from),
            status: EmployeeStatus::Active,
        }
    }

    #[test]
    fn add_creates_department_on_demand() {
        let mut db = Database::open_in_memory().unwrap();
        add(&mut db, &add_args("1", "Ada", "Lovelace", Some("Research"))).unwrap();

        let employee = db.employee_by_code("1").unwrap().unwrap();
        assert_eq!(employee.department.as_deref(), Some("Research"));
        assert_eq!(db.list_departments().unwrap().len(), 1);
    }

    fn update_args(code: &str) -> UpdateArgs {
        UpdateArgs {
            code: code.to_string(),
            first_name: None,
            last_name: None,
            department: None,
            no_department: false,
            status: None,
        }
    }

    #[test]
    fn update_unknown_employee_fails() {
        let mut db = Database::open_in_memory().unwrap();
        let err = update(
            &mut db,
            &UpdateArgs {
                first_name: Some("Nobody".to_string()),
                ..update_args("404")
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "unknown employee: 404");
    }

    #[test]
    fn update_unknown_employee_leaves_departments_untouched() {
        let mut db = Database::open_in_memory().unwrap();
        let err = update(
            &mut db,
            &UpdateArgs {
                department: Some("Ghosts".to_string()),
                ..update_args("404")
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "unknown employee: 404");
        assert!(db.list_departments().unwrap().is_empty());
    }

    #[test]
    fn update_moves_and_clears_department() {
        let mut db = Database::open_in_memory().unwrap();
        add(&mut db, &add_args("1", "Ada", "Lovelace", Some("Research"))).unwrap();

        update(
            &mut db,
            &UpdateArgs {
                department: Some("Analytics".to_string()),
                ..update_args("1")
            },
        )
        .unwrap();
        let employee = db.employee_by_code("1").unwrap().unwrap();
        assert_eq!(employee.department.as_deref(), Some("Analytics"));

        update(
            &mut db,
            &UpdateArgs {
                no_department: true,
                ..update_args("1")
            },
        )
        .unwrap();
        let employee = db.employee_by_code("1").unwrap().unwrap();
        assert_eq!(employee.department, None);
    }

    #[test]
    fn update_without_fields_fails() {
        let mut db = Database::open_in_memory().unwrap();
        add(&mut db, &add_args("1", "Ada", "Lovelace", None)).unwrap();
        let err = update(&mut db, &update_args("1")).unwrap_err();
        assert!(err.to_string().starts_with("nothing to update"));
    }

    #[test]
    fn format_employees_table() {
        let mut db = Database::open_in_memory().unwrap();
        add(&mut db, &add_args("1", "Ada", "Lovelace", Some("Research"))).unwrap();
        add(&mut db, &add_args("2", "Alan", "Turing", None)).unwrap();
        db.update_employee(
            "2",
            &EmployeeUpdate {
                status: Some(EmployeeStatus::Inactive),
                ..EmployeeUpdate::default()
            },
        )
        .unwrap();

        let employees = db.list_employees(&EmployeeFilter::default()).unwrap();
        assert_snapshot!(format_employees(&employees), @r"
        Code      Name                      Department        Status
        1         Ada Lovelace              Research          active
        2         Alan Turing               -                 inactive

        2 employees
        ");
    }

    #[test]
    fn format_employee_details() {
        let mut db = Database::open_in_memory().unwrap();
        add(&mut db, &add_args("7", "Grace", "Hopper", None)).unwrap();
        let employee = db.employee_by_code("7").unwrap().unwrap();
        assert_snapshot!(format_employee(&employee), @r"
        Code:       7
        Name:       Grace Hopper
        Department: -
        Status:     active
        ");
    }
}
