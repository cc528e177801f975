//! Roles table controller.

use crate::model::role::{Role, RoleFields};
use crate::model::Snowflake;
use crate::query::{Data, Filter, QueryResult, Table, TableQuery};
use rusqlite::{Connection, Row};

impl Table for Role {
    const NAME: &'static str = "roles";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "hoist",
        "managed",
        "mentionable",
        "mention",
        "color",
        "created_at",
    ];
    const ORDER_BY: &'static str = "id ASC";

    fn from_row(row: &Row<'_>) -> QueryResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            hoist: row.get("hoist")?,
            managed: row.get("managed")?,
            mentionable: row.get("mentionable")?,
            mention: row.get("mention")?,
            color: row.get("color")?,
            created_at: row.get("created_at")?,
        })
    }
}

fn field_data(fields: &RoleFields) -> Data {
    Data::new()
        .set("name", fields.name.clone())
        .set("hoist", fields.hoist)
        .set("managed", fields.managed)
        .set("mentionable", fields.mentionable)
        .set("mention", fields.mention.clone())
        .set("color", fields.color)
        .set("created_at", fields.created_at)
}

pub struct RolesController<'conn> {
    table: TableQuery<'conn, Role>,
}

impl<'conn> RolesController<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            table: TableQuery::new(conn),
        }
    }

    pub fn get_all_roles(&self) -> QueryResult<Vec<Role>> {
        self.table.find_many(&Filter::all())
    }

    pub fn get_role_by_id(&self, role_id: Snowflake) -> QueryResult<Option<Role>> {
        self.table.find_first(&Filter::eq("id", role_id))
    }

    pub fn create_role(&self, role_id: Snowflake, fields: &RoleFields) -> QueryResult<Role> {
        self.table.create(&field_data(fields).set("id", role_id))
    }

    pub fn update_role(
        &self,
        role_id: Snowflake,
        fields: &RoleFields,
    ) -> QueryResult<Option<Role>> {
        self.table
            .update(&Filter::eq("id", role_id), &field_data(fields))
    }

    /// Inserts the role, or overwrites every field of the existing row.
    pub fn sync_role(&self, role_id: Snowflake, fields: &RoleFields) -> QueryResult<Role> {
        self.table.upsert(
            &field_data(fields).set("id", role_id),
            &["id"],
            &field_data(fields),
        )
    }

    pub fn delete_role(&self, role_id: Snowflake) -> QueryResult<()> {
        self.table.delete(&Filter::eq("id", role_id))?;
        Ok(())
    }
}
