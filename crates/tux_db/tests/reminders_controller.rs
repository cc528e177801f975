mod common;

use common::{open, seed_user, table_count, GUILD_ID};

const MEMBER: i64 = 100;
const CHANNEL: i64 = 555;

#[test]
fn create_get_update_delete_reminder() {
    let db = open();
    seed_user(&db, MEMBER);
    let reminders = db.reminders();

    let created = reminders
        .create_reminder(MEMBER, "touch grass", 5_000, CHANNEL, GUILD_ID)
        .unwrap();
    assert_eq!(created.expires_at, 5_000);
    assert_eq!(created.channel_id, CHANNEL);
    assert_eq!(reminders.get_reminder_by_id(created.id).unwrap().unwrap(), created);

    let updated = reminders
        .update_reminder(created.id, "touch more grass")
        .unwrap()
        .unwrap();
    assert_eq!(updated.content, "touch more grass");
    assert_eq!(updated.expires_at, created.expires_at);
    assert!(reminders.update_reminder(created.id + 1, "x").unwrap().is_none());

    reminders.delete_reminder(created.id).unwrap();
    reminders.delete_reminder(created.id).unwrap();
    assert!(reminders.get_reminder_by_id(created.id).unwrap().is_none());
}

#[test]
fn expired_reminders_include_the_boundary() {
    let db = open();
    seed_user(&db, MEMBER);
    let reminders = db.reminders();
    let early = reminders
        .create_reminder(MEMBER, "early", 1_000, CHANNEL, GUILD_ID)
        .unwrap();
    let due = reminders
        .create_reminder(MEMBER, "due", 2_000, CHANNEL, GUILD_ID)
        .unwrap();
    reminders
        .create_reminder(MEMBER, "later", 3_000, CHANNEL, GUILD_ID)
        .unwrap();

    assert_eq!(reminders.get_expired_reminders(2_000).unwrap(), vec![early, due]);
    assert!(reminders.get_expired_reminders(999).unwrap().is_empty());
    assert_eq!(reminders.get_all_reminders().unwrap().len(), 3);
}

#[test]
fn filters_by_user_and_guild() {
    let db = open();
    seed_user(&db, MEMBER);
    seed_user(&db, 101);
    let reminders = db.reminders();
    reminders
        .create_reminder(MEMBER, "a", 1, CHANNEL, GUILD_ID)
        .unwrap();
    reminders
        .create_reminder(101, "b", 1, CHANNEL, GUILD_ID)
        .unwrap();
    reminders.create_reminder(MEMBER, "c", 1, CHANNEL, 42).unwrap();

    assert_eq!(reminders.get_reminders_by_user_id(MEMBER).unwrap().len(), 2);
    assert_eq!(reminders.get_reminders_by_guild_id(GUILD_ID).unwrap().len(), 2);
    assert_eq!(reminders.get_reminders_by_guild_id(42).unwrap()[0].content, "c");
}

#[test]
fn reminders_follow_their_user_on_delete() {
    let db = open();
    seed_user(&db, MEMBER);
    seed_user(&db, MEMBER + 1);
    db.reminders()
        .create_reminder(MEMBER, "stand up", 1_000, CHANNEL, GUILD_ID)
        .unwrap();
    let kept = db
        .reminders()
        .create_reminder(MEMBER + 1, "sit down", 2_000, CHANNEL, GUILD_ID)
        .unwrap();

    db.users().delete_user(MEMBER).unwrap();

    assert!(db.reminders().get_reminders_by_user_id(MEMBER).unwrap().is_empty());
    assert_eq!(table_count(&db, "reminders"), 1);
    assert_eq!(db.reminders().get_all_reminders().unwrap(), vec![kept]);
}
