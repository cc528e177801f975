#![allow(dead_code)]

use tux_db::{DatabaseController, RoleFields, Snowflake, User, UserFields};

pub const GUILD_ID: Snowflake = 1_172_245_377_395_728_464;

pub fn open() -> DatabaseController {
    DatabaseController::open_in_memory().unwrap()
}

pub fn user_fields(name: &str) -> UserFields {
    UserFields {
        name: name.to_string(),
        display_name: name.to_uppercase(),
        mention: format!("@{name}"),
        ..UserFields::default()
    }
}

pub fn role_fields(name: &str) -> RoleFields {
    RoleFields {
        name: name.to_string(),
        mention: format!("@&{name}"),
        ..RoleFields::default()
    }
}

pub fn seed_user(db: &DatabaseController, user_id: Snowflake) -> User {
    db.users()
        .create_user(user_id, &user_fields(&format!("member{user_id}")))
        .unwrap()
}

pub fn table_count(db: &DatabaseController, table: &str) -> i64 {
    db.connection()
        .query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| row.get(0))
        .unwrap()
}
