use anyhow::{bail, Result};
use rusqlite::{params, Connection};

#[macro_export]
macro_rules! sqlite_column {
    ($name:expr, $sql_type:expr $(, $field:ident = $value:expr)*) => {
        {
            #[allow(unused_mut)]
            let mut column = $crate::sqlite_persistence::Column {
                name: $name,
                sql_type: $sql_type,
                is_primary_key: false,
                is_autoincrement: false,
                non_null: false,
                is_unique: false,
            };
            $(
                column.$field = $value;
            )*
            column
        }
    };
}

#[derive(Debug, PartialEq, Eq)]
pub enum SqlType {
    Text,
    Integer,
    Real,
}

impl SqlType {
    fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Text => "TEXT",
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
        }
    }

    fn from_sql(s: &str) -> Option<&'static SqlType> {
        match s.to_ascii_uppercase().as_str() {
            "TEXT" => Some(&SqlType::Text),
            "INTEGER" => Some(&SqlType::Integer),
            "REAL" => Some(&SqlType::Real),
            _ => None,
        }
    }
}

pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static SqlType,
    pub is_primary_key: bool,
    pub is_autoincrement: bool,
    pub non_null: bool,
    pub is_unique: bool,
}

impl Column {
    /// Column definition as it appears inside `CREATE TABLE`.
    fn definition(&self) -> String {
        let constraints = [
            (self.is_primary_key, "PRIMARY KEY"),
            (self.is_autoincrement, "AUTOINCREMENT"),
            (self.is_unique, "UNIQUE"),
            (self.non_null, "NOT NULL"),
        ];
        constraints
            .iter()
            .filter(|(enabled, _)| *enabled)
            .fold(
                format!("{} {}", self.name, self.sql_type.as_sql()),
                |mut definition, (_, constraint)| {
                    definition.push(' ');
                    definition.push_str(constraint);
                    definition
                },
            )
    }
}

/// A column as reported by `PRAGMA table_info`.
struct ColumnInfo {
    name: String,
    declared_type: String,
    not_null: bool,
}

impl ColumnInfo {
    fn check_against(&self, expected: &Column, table: &str) -> Result<()> {
        if self.name != expected.name {
            bail!(
                "Table {} has column {} where {} was expected",
                table,
                self.name,
                expected.name
            );
        }
        if SqlType::from_sql(&self.declared_type) != Some(expected.sql_type) {
            bail!(
                "Column {}.{} has type {}, expected {:?}",
                table,
                self.name,
                self.declared_type,
                expected.sql_type
            );
        }
        // Primary keys report as nullable, so only declared NOT NULL is checked.
        if expected.non_null && !self.not_null {
            bail!("Column {}.{} should be NOT NULL", table, self.name);
        }
        Ok(())
    }
}

pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl Table {
    pub fn create_sql(&self) -> String {
        let definitions: Vec<String> = self.columns.iter().map(Column::definition).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({});",
            self.name,
            definitions.join(", ")
        )
    }

    /// Creates the table unless it already exists. Safe to call on every startup.
    pub fn create_if_missing(&self, conn: &Connection) -> Result<()> {
        conn.execute(&self.create_sql(), params![])?;
        Ok(())
    }

    fn existing_columns(&self, conn: &Connection) -> Result<Vec<ColumnInfo>> {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({});", self.name))?;
        let columns = stmt
            .query_map(params![], |row| {
                Ok(ColumnInfo {
                    name: row.get(1)?,
                    declared_type: row.get(2)?,
                    not_null: row.get::<_, i32>(3)? == 1,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(columns)
    }

    /// Checks that the table on disk has exactly the declared columns, in order,
    /// with matching types and nullability.
    pub fn validate(&self, conn: &Connection) -> Result<()> {
        let existing = self.existing_columns(conn)?;
        if existing.len() != self.columns.len() {
            let found: Vec<&str> = existing.iter().map(|c| c.name.as_str()).collect();
            let wanted: Vec<&str> = self.columns.iter().map(|c| c.name).collect();
            bail!(
                "Table {} has {} columns, expected {} (found [{}], wanted [{}])",
                self.name,
                existing.len(),
                self.columns.len(),
                found.join(", "),
                wanted.join(", ")
            );
        }
        existing
            .iter()
            .zip(self.columns)
            .try_for_each(|(actual, expected)| actual.check_against(expected, self.name))
    }
}
