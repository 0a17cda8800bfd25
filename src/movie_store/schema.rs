use crate::sqlite_column;
use crate::sqlite_persistence::{SqlType, Table};

pub const MOVIES_TABLE: Table = Table {
    name: "movies",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_autoincrement = true
        ),
        sqlite_column!("title", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!("year", &SqlType::Integer, non_null = true),
        sqlite_column!("rating", &SqlType::Real, non_null = true),
        sqlite_column!("poster_url", &SqlType::Text),
    ],
};
