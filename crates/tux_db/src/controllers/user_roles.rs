//! User/role link table controller.
//!
//! Rows are pure keys, so there is no update operation.

use crate::model::user_role::UserRole;
use crate::model::Snowflake;
use crate::query::{Data, Filter, QueryResult, Table, TableQuery};
use rusqlite::{Connection, Row};

impl Table for UserRole {
    const NAME: &'static str = "user_roles";
    const COLUMNS: &'static [&'static str] = &["user_id", "role_id"];
    const ORDER_BY: &'static str = "user_id ASC, role_id ASC";

    fn from_row(row: &Row<'_>) -> QueryResult<Self> {
        Ok(Self {
            user_id: row.get("user_id")?,
            role_id: row.get("role_id")?,
        })
    }
}

fn link_filter(user_id: Snowflake, role_id: Snowflake) -> Filter {
    Filter::eq("user_id", user_id).and_eq("role_id", role_id)
}

pub struct UserRolesController<'conn> {
    table: TableQuery<'conn, UserRole>,
}

impl<'conn> UserRolesController<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            table: TableQuery::new(conn),
        }
    }

    pub fn get_all_user_roles(&self) -> QueryResult<Vec<UserRole>> {
        self.table.find_many(&Filter::all())
    }

    pub fn get_user_role(
        &self,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> QueryResult<Option<UserRole>> {
        self.table.find_first(&link_filter(user_id, role_id))
    }

    pub fn get_user_roles_by_user_id(&self, user_id: Snowflake) -> QueryResult<Vec<UserRole>> {
        self.table.find_many(&Filter::eq("user_id", user_id))
    }

    pub fn get_user_roles_by_role_id(&self, role_id: Snowflake) -> QueryResult<Vec<UserRole>> {
        self.table.find_many(&Filter::eq("role_id", role_id))
    }

    /// Links a user to a role. Both must exist and the link must be new.
    pub fn create_user_role(
        &self,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> QueryResult<UserRole> {
        self.table.create(
            &Data::new()
                .set("user_id", user_id)
                .set("role_id", role_id),
        )
    }

    pub fn delete_user_role(&self, user_id: Snowflake, role_id: Snowflake) -> QueryResult<()> {
        self.table.delete(&link_filter(user_id, role_id))?;
        Ok(())
    }
}
