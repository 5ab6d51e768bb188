use anyhow::Result;
use rusqlite::{params, Connection};

#[macro_export]
macro_rules! sqlite_column {
    ($name:expr, $sql_type:expr $(, $field:ident = $value:expr)*) => {
        {
            // Only mutated when optional field assignments are passed
            #[allow(unused_mut)]
            let mut column = Column {
                name: $name,
                sql_type: $sql_type,
                is_primary_key: false,
                non_null: false,
                default_value: None,
                foreign_key: None,
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
    Blob,
}

impl SqlType {
    fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Text => "TEXT",
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
            SqlType::Blob => "BLOB",
        }
    }
}

pub struct ForeignKey {
    pub foreign_table: &'static str,
    pub foreign_column: &'static str,
}

pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static SqlType,
    pub is_primary_key: bool,
    pub non_null: bool,
    pub default_value: Option<&'static str>,
    pub foreign_key: Option<&'static ForeignKey>,
}

/// Description of a table owned by another application.
///
/// Neither database belongs to this tool, so a `Table` lists only the columns
/// the migration actually reads or writes. [`Table::missing_columns`] checks a
/// live database against it; [`Table::create`] builds a minimal copy, which is
/// what the test fixtures use.
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub indices: &'static [(&'static str, &'static str)],
}

impl Table {
    pub fn create(&self, conn: &Connection) -> Result<()> {
        let mut create_sql = format!("CREATE TABLE {} (", self.name);
        for (column_index, column) in self.columns.iter().enumerate() {
            if column_index > 0 {
                create_sql.push_str(", ");
            }
            create_sql.push_str(&format!("{} {}", column.name, column.sql_type.as_sql()));
            if column.is_primary_key {
                create_sql.push_str(" PRIMARY KEY");
            }
            if column.non_null {
                create_sql.push_str(" NOT NULL");
            }
            if let Some(default_value) = column.default_value {
                create_sql.push_str(&format!(" DEFAULT {}", default_value));
            }
            if let Some(foreign_key) = column.foreign_key {
                create_sql.push_str(&format!(
                    " REFERENCES {}({})",
                    foreign_key.foreign_table, foreign_key.foreign_column
                ));
            }
        }
        create_sql.push_str(");");
        conn.execute(&create_sql, params![])?;

        for (index_name, column_name) in self.indices {
            conn.execute(
                &format!(
                    "CREATE INDEX {} ON {}({});",
                    index_name, self.name, column_name
                ),
                params![],
            )?;
        }
        Ok(())
    }

    /// Returns the names of the declared columns the live table lacks.
    ///
    /// A table that does not exist at all reports every column. Names are
    /// compared case-insensitively, as SQLite does; declared types are not
    /// compared because the owning applications use loose affinities such as
    /// `varchar(255)`.
    pub fn missing_columns(&self, conn: &Connection) -> Result<Vec<&'static str>> {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({});", self.name))?;
        let actual: Vec<String> = stmt
            .query_map(params![], |row| row.get::<_, String>(1))?
            .collect::<rusqlite::Result<_>>()?;

        Ok(self
            .columns
            .iter()
            .map(|c| c.name)
            .filter(|name| !actual.iter().any(|a| a.eq_ignore_ascii_case(name)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARENT: Table = Table {
        name: "parent",
        columns: &[sqlite_column!("id", &SqlType::Integer, is_primary_key = true)],
        indices: &[],
    };

    const CHILD: Table = Table {
        name: "child",
        columns: &[
            sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
            sqlite_column!(
                "parent_id",
                &SqlType::Integer,
                non_null = true,
                foreign_key = Some(&ForeignKey {
                    foreign_table: "parent",
                    foreign_column: "id",
                })
            ),
            sqlite_column!("label", &SqlType::Text, default_value = Some("'none'")),
        ],
        indices: &[("idx_child_parent", "parent_id")],
    };

    #[test]
    fn creates_table_with_defaults_and_index() {
        let conn = Connection::open_in_memory().unwrap();
        PARENT.create(&conn).unwrap();
        CHILD.create(&conn).unwrap();

        conn.execute("INSERT INTO parent (id) VALUES (1)", []).unwrap();
        conn.execute("INSERT INTO child (parent_id) VALUES (1)", [])
            .unwrap();
        let label: String = conn
            .query_row("SELECT label FROM child", [], |row| row.get(0))
            .unwrap();
        assert_eq!(label, "none");

        let index_exists: bool = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type='index' AND name='idx_child_parent'",
                [],
                |_| Ok(true),
            )
            .unwrap_or(false);
        assert!(index_exists);
    }

    #[test]
    fn reports_nothing_missing_for_matching_table() {
        let conn = Connection::open_in_memory().unwrap();
        PARENT.create(&conn).unwrap();
        CHILD.create(&conn).unwrap();
        assert!(CHILD.missing_columns(&conn).unwrap().is_empty());
    }

    #[test]
    fn ignores_extra_columns_and_name_case() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE child (ID INTEGER, Parent_Id INTEGER, LABEL varchar(255), extra BLOB)",
            [],
        )
        .unwrap();
        assert!(CHILD.missing_columns(&conn).unwrap().is_empty());
    }

    #[test]
    fn reports_missing_columns_and_missing_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE child (id INTEGER)", []).unwrap();
        assert_eq!(
            CHILD.missing_columns(&conn).unwrap(),
            vec!["parent_id", "label"]
        );
        assert_eq!(PARENT.missing_columns(&conn).unwrap(), vec!["id"]);
    }
}
