//! Infractions table controller.
//!
//! # Invariants
//! - `infraction_type` is stored as snake_case text and parsed strictly on read.
//! - `update_infraction` touches the reason only.

use crate::model::infraction::{Infraction, InfractionId, InfractionType};
use crate::model::{EpochMillis, Snowflake};
use crate::query::{Data, Filter, QueryError, QueryResult, Table, TableQuery};
use rusqlite::{Connection, Row};

impl Table for Infraction {
    const NAME: &'static str = "infractions";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "user_id",
        "moderator_id",
        "infraction_type",
        "infraction_reason",
        "created_at",
        "expires_at",
    ];
    const ORDER_BY: &'static str = "id ASC";

    fn from_row(row: &Row<'_>) -> QueryResult<Self> {
        let type_text: String = row.get("infraction_type")?;
        let infraction_type =
            parse_infraction_type(&type_text).ok_or_else(|| QueryError::InvalidData {
                table: Self::NAME,
                message: format!("unknown infraction type `{type_text}`"),
            })?;

        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            moderator_id: row.get("moderator_id")?,
            infraction_type,
            infraction_reason: row.get("infraction_reason")?,
            created_at: row.get("created_at")?,
            expires_at: row.get("expires_at")?,
        })
    }
}

/// CRUD access to moderation infractions.
pub struct InfractionsController<'conn> {
    table: TableQuery<'conn, Infraction>,
}

impl<'conn> InfractionsController<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            table: TableQuery::new(conn),
        }
    }

    pub fn get_all_infractions(&self) -> QueryResult<Vec<Infraction>> {
        self.table.find_many(&Filter::all())
    }

    pub fn get_infraction_by_id(
        &self,
        infraction_id: InfractionId,
    ) -> QueryResult<Option<Infraction>> {
        self.table.find_first(&Filter::eq("id", infraction_id))
    }

    /// Records one moderation action against `user_id`.
    pub fn create_infraction(
        &self,
        user_id: Snowflake,
        moderator_id: Snowflake,
        infraction_type: InfractionType,
        infraction_reason: Option<&str>,
        expires_at: Option<EpochMillis>,
    ) -> QueryResult<Infraction> {
        self.table.create(
            &Data::new()
                .set("user_id", user_id)
                .set("moderator_id", moderator_id)
                .set("infraction_type", infraction_type_to_db(infraction_type).to_owned())
                .set("infraction_reason", infraction_reason.map(str::to_owned))
                .set("expires_at", expires_at),
        )
    }

    /// Replaces the reason. `None` when no infraction has this id.
    pub fn update_infraction(
        &self,
        infraction_id: InfractionId,
        infraction_reason: Option<&str>,
    ) -> QueryResult<Option<Infraction>> {
        self.table.update(
            &Filter::eq("id", infraction_id),
            &Data::new().set("infraction_reason", infraction_reason.map(str::to_owned)),
        )
    }

    pub fn delete_infraction(&self, infraction_id: InfractionId) -> QueryResult<()> {
        self.table.delete(&Filter::eq("id", infraction_id))?;
        Ok(())
    }

    pub fn get_infractions_by_user_id(&self, user_id: Snowflake) -> QueryResult<Vec<Infraction>> {
        self.table.find_many(&Filter::eq("user_id", user_id))
    }

    pub fn get_infractions_by_moderator_id(
        &self,
        moderator_id: Snowflake,
    ) -> QueryResult<Vec<Infraction>> {
        self.table.find_many(&Filter::eq("moderator_id", moderator_id))
    }

    pub fn get_infractions_by_type(
        &self,
        infraction_type: InfractionType,
    ) -> QueryResult<Vec<Infraction>> {
        self.table.find_many(&Filter::eq(
            "infraction_type",
            infraction_type_to_db(infraction_type).to_owned(),
        ))
    }

    pub fn get_infractions_by_user_and_type(
        &self,
        user_id: Snowflake,
        infraction_type: InfractionType,
    ) -> QueryResult<Vec<Infraction>> {
        self.table.find_many(
            &Filter::eq("user_id", user_id)
                .and_eq("infraction_type", infraction_type_to_db(infraction_type).to_owned()),
        )
    }
}

fn infraction_type_to_db(kind: InfractionType) -> &'static str {
    match kind {
        InfractionType::Ban => "ban",
        InfractionType::Unban => "unban",
        InfractionType::Hackban => "hackban",
        InfractionType::Tempban => "tempban",
        InfractionType::Kick => "kick",
        InfractionType::Timeout => "timeout",
        InfractionType::Untimeout => "untimeout",
        InfractionType::Warn => "warn",
        InfractionType::Jail => "jail",
        InfractionType::Unjail => "unjail",
        InfractionType::Snippetban => "snippetban",
        InfractionType::Snippetunban => "snippetunban",
    }
}

fn parse_infraction_type(value: &str) -> Option<InfractionType> {
    match value {
        "ban" => Some(InfractionType::Ban),
        "unban" => Some(InfractionType::Unban),
        "hackban" => Some(InfractionType::Hackban),
        "tempban" => Some(InfractionType::Tempban),
        "kick" => Some(InfractionType::Kick),
        "timeout" => Some(InfractionType::Timeout),
        "untimeout" => Some(InfractionType::Untimeout),
        "warn" => Some(InfractionType::Warn),
        "jail" => Some(InfractionType::Jail),
        "unjail" => Some(InfractionType::Unjail),
        "snippetban" => Some(InfractionType::Snippetban),
        "snippetunban" => Some(InfractionType::Snippetunban),
        _ => None,
    }
}
