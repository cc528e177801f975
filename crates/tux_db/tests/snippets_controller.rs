mod common;

use common::{open, seed_user, table_count, GUILD_ID};
use rusqlite::ErrorCode;

const AUTHOR: i64 = 100;
const OTHER_GUILD: i64 = 42;

#[test]
fn create_and_lookup_by_name_within_guild() {
    let db = open();
    seed_user(&db, AUTHOR);
    let snippets = db.snippets();

    let created = snippets
        .create_snippet("rtfm", "Read the manual.", AUTHOR, GUILD_ID)
        .unwrap();

    assert_eq!(
        snippets.get_snippet_by_name(GUILD_ID, "rtfm").unwrap(),
        Some(created.clone())
    );
    assert_eq!(snippets.get_snippet_by_id(created.id).unwrap(), Some(created));
    assert!(snippets
        .get_snippet_by_name(OTHER_GUILD, "rtfm")
        .unwrap()
        .is_none());
    assert!(snippets
        .get_snippet_by_name(GUILD_ID, "RTFM")
        .unwrap()
        .is_none());
}

#[test]
fn duplicate_name_in_guild_is_rejected_but_other_guild_is_fine() {
    let db = open();
    seed_user(&db, AUTHOR);
    let snippets = db.snippets();
    snippets
        .create_snippet("faq", "first", AUTHOR, GUILD_ID)
        .unwrap();

    let err = snippets
        .create_snippet("faq", "second", AUTHOR, GUILD_ID)
        .unwrap_err();
    assert_eq!(err.sqlite_error_code(), Some(ErrorCode::ConstraintViolation));

    snippets
        .create_snippet("faq", "elsewhere", AUTHOR, OTHER_GUILD)
        .unwrap();
    assert_eq!(snippets.get_all_snippets().unwrap().len(), 2);
}

#[test]
fn update_content_and_delete() {
    let db = open();
    seed_user(&db, AUTHOR);
    let snippets = db.snippets();
    let snippet = snippets
        .create_snippet("arch", "btw", AUTHOR, GUILD_ID)
        .unwrap();

    let updated = snippets
        .update_snippet_content(snippet.id, "i use arch btw")
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "arch");
    assert_eq!(updated.content, "i use arch btw");
    assert!(snippets
        .update_snippet_content(snippet.id + 1, "x")
        .unwrap()
        .is_none());

    snippets.delete_snippet(snippet.id).unwrap();
    snippets.delete_snippet(snippet.id).unwrap();
    assert!(snippets.get_snippet_by_id(snippet.id).unwrap().is_none());
}

#[test]
fn filters_by_guild_and_author() {
    let db = open();
    seed_user(&db, AUTHOR);
    seed_user(&db, 101);
    let snippets = db.snippets();
    snippets.create_snippet("a", "a", AUTHOR, GUILD_ID).unwrap();
    snippets.create_snippet("b", "b", 101, GUILD_ID).unwrap();
    snippets.create_snippet("c", "c", AUTHOR, OTHER_GUILD).unwrap();

    assert_eq!(snippets.get_snippets_by_guild_id(GUILD_ID).unwrap().len(), 2);
    let by_author: Vec<_> = snippets
        .get_snippets_by_author_id(AUTHOR)
        .unwrap()
        .into_iter()
        .map(|snippet| snippet.name)
        .collect();
    assert_eq!(by_author, vec!["a", "c"]);
}

#[test]
fn snippets_follow_their_author_on_delete() {
    let db = open();
    seed_user(&db, AUTHOR);
    db.snippets()
        .create_snippet("faq", "See pins.", AUTHOR, GUILD_ID)
        .unwrap();

    db.users().delete_user(AUTHOR).unwrap();

    assert!(db.snippets().get_snippets_by_author_id(AUTHOR).unwrap().is_empty());
    assert!(db.snippets().get_snippet_by_name(GUILD_ID, "faq").unwrap().is_none());
    assert_eq!(table_count(&db, "snippets"), 0);
}
