//! Categories group transactions by name, e.g. "rent" or "salary".

mod db;
mod domain;

pub use db::{
    count_categories, create_category_table, delete_category, get_category_by_name,
    get_or_create_category,
};
pub use domain::{Category, CategoryId, CategoryName};
