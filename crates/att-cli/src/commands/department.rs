//! Department management.

use std::fmt::Write;

use anyhow::{Context, Result};

use att_db::{Database, Department};

/// Creates a department and prints its id.
pub fn add(db: &mut Database, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("department name cannot be empty");
    }
    if db.department_by_name(name)?.is_some() {
        anyhow::bail!("department {name} already exists");
    }
    let id = db
        .add_department(name)
        .with_context(|| format!("failed to add department {name}"))?;
    println!("{id}");
    Ok(())
}

pub fn format_departments(departments: &[Department]) -> String {
    let mut output = String::new();
    if departments.is_empty() {
        writeln!(output, "No departments.").unwrap();
        return output;
    }
    writeln!(output, "{:<4}  Name", "ID").unwrap();
    for department in departments {
        writeln!(output, "{:<4}  {}", department.id, department.name).unwrap();
    }
    output
}

pub fn list(db: &Database, json: bool) -> Result<()> {
    let departments = db.list_departments()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&departments)?);
    } else {
        print!("{}", format_departments(&departments));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn format_departments_lists_ids_and_names() {
        let mut db = Database::open_in_memory().unwrap();
        db.ensure_department("Sales").unwrap();
        db.ensure_department("Finance").unwrap();

        let output = format_departments(&db.list_departments().unwrap());
        assert_snapshot!(output, @r"
        ID    Name
        2     Finance
        1     Sales
        ");
    }

    #[test]
    fn format_departments_empty() {
        assert_eq!(format_departments(&[]), "No departments.\n");
    }

    #[test]
    fn add_rejects_duplicates() {
        let mut db = Database::open_in_memory().unwrap();
        db.ensure_department("Sales").unwrap();
        let err = add(&mut db, "Sales").unwrap_err();
        assert_eq!(err.to_string(), "department Sales already exists");
    }
}
