use crate::ledger::ReplyLedger;
use crate::twitter::Post;

fn bot_reply(id: &str, parent_id: &str, parent_author: &str) -> Post {
    Post {
        id: id.to_string(),
        author_handle: "MetricMartin".to_string(),
        text: format!("@{} 25.4 mm \n", parent_author),
        created_at: None,
        in_reply_to_post_id: Some(parent_id.to_string()),
        in_reply_to_author_handle: Some(parent_author.to_string()),
    }
}

fn bot_original(id: &str) -> Post {
    Post {
        id: id.to_string(),
        author_handle: "MetricMartin".to_string(),
        text: "Hello world".to_string(),
        created_at: None,
        in_reply_to_post_id: None,
        in_reply_to_author_handle: None,
    }
}

#[test]
fn test_ledger_collects_replies_to_target() {
    let posts = vec![
        bot_reply("b1", "t1", "SummerhillRain"),
        bot_reply("b2", "t2", "SummerhillRain"),
    ];
    let ledger = ReplyLedger::build(&posts, "SummerhillRain");
    assert_eq!(ledger.len(), 2);
    assert!(ledger.contains("t1"));
    assert!(ledger.contains("t2"));
}

#[test]
fn test_ledger_ignores_replies_to_other_accounts() {
    let posts = vec![
        bot_reply("b1", "t1", "SummerhillRain"),
        bot_reply("b2", "x9", "SomeoneElse"),
    ];
    let ledger = ReplyLedger::build(&posts, "SummerhillRain");
    assert_eq!(ledger.len(), 1);
    assert!(ledger.contains("t1"));
    assert!(!ledger.contains("x9"));
}

#[test]
fn test_ledger_ignores_non_reply_posts() {
    let posts = vec![bot_original("b1"), bot_original("b2")];
    let ledger = ReplyLedger::build(&posts, "SummerhillRain");
    assert!(ledger.is_empty());
}

#[test]
fn test_empty_timeline_gives_empty_ledger() {
    let ledger = ReplyLedger::build(&[], "SummerhillRain");
    assert!(ledger.is_empty());
    assert!(!ledger.contains("t1"));
}
