//! Internal Diesel row structs; never exposed to the domain.

use diesel::prelude::*;

use super::schema::accounts;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct AccountRow {
    pub id: i32,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub is_doctor: bool,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub email: &'a str,
    pub display_name: &'a str,
    pub password_hash: &'a str,
    pub is_doctor: bool,
}
