//! Database operations for categories.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName},
};

/// Return the category called `name`, creating it first if it does not exist.
///
/// Calling this repeatedly with the same name never creates a second category.
/// Callers that go on to write a transaction should run both statements in
/// the same SQL transaction.
pub fn get_or_create_category(name: &CategoryName, connection: &Connection) -> Result<Category, Error> {
    let rows_affected =
        connection.execute("INSERT OR IGNORE INTO category (name) VALUES (?1);", (name,))?;

    if rows_affected > 0 {
        tracing::debug!("Created category \"{name}\"");
    }

    connection
        .prepare("SELECT id, name FROM category WHERE name = :name;")?
        .query_row(&[(":name", name)], map_row)
        .map_err(Error::from)
}

/// Retrieve a category by its exact name, or `None` if there is no such category.
pub fn get_category_by_name(
    name: &CategoryName,
    connection: &Connection,
) -> Result<Option<Category>, Error> {
    connection
        .prepare("SELECT id, name FROM category WHERE name = :name;")?
        .query_row(&[(":name", name)], map_row)
        .optional()
        .map_err(Error::from)
}

/// Delete a category and, through the foreign key cascade, all of its transactions.
///
/// # Errors
/// Returns [Error::NotFound] if `category_id` does not refer to a category.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM category WHERE id = ?1", [category_id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Get the total number of categories in the database.
pub fn count_categories(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM category;", [], |row| row.get(0))
        .map_err(Error::from)
}

/// Initialize the category table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

#[cfg(test)]
mod category_query_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        category::{
            CategoryName, count_categories, delete_category, get_category_by_name,
            get_or_create_category,
        },
        db::initialize,
        transaction::{NewTransaction, count_transactions, create_transaction},
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        connection
    }

    #[test]
    fn get_or_create_creates_missing_category() {
        let connection = get_test_connection();
        let name = CategoryName::new_unchecked("general");

        let category = get_or_create_category(&name, &connection).unwrap();

        assert!(category.id > 0);
        assert_eq!(category.name, name);
        assert_eq!(count_categories(&connection), Ok(1));
    }

    #[test]
    fn get_or_create_is_idempotent() {
        let connection = get_test_connection();
        let name = CategoryName::new_unchecked("general");

        let first = get_or_create_category(&name, &connection).unwrap();
        let second = get_or_create_category(&name, &connection).unwrap();

        assert_eq!(first, second);
        assert_eq!(count_categories(&connection), Ok(1));
    }

    #[test]
    fn get_by_name_returns_none_for_unknown_name() {
        let connection = get_test_connection();

        let category =
            get_category_by_name(&CategoryName::new_unchecked("transfer"), &connection).unwrap();

        assert_eq!(category, None);
    }

    #[test]
    fn delete_cascades_to_transactions() {
        let connection = get_test_connection();
        let rent = CategoryName::new_unchecked("rent");
        let salary = CategoryName::new_unchecked("salary");
        create_transaction(
            NewTransaction::new(-300.0, rent.clone(), date!(2021 - 01 - 01)),
            &connection,
        )
        .unwrap();
        create_transaction(
            NewTransaction::new(2300.0, salary, date!(2021 - 01 - 01)),
            &connection,
        )
        .unwrap();
        let category = get_category_by_name(&rent, &connection).unwrap().unwrap();

        delete_category(category.id, &connection).unwrap();

        assert_eq!(count_categories(&connection), Ok(1));
        assert_eq!(count_transactions(&connection), Ok(1));
    }

    #[test]
    fn delete_with_invalid_id_returns_not_found() {
        let connection = get_test_connection();

        assert_eq!(delete_category(999, &connection), Err(Error::NotFound));
    }
}
