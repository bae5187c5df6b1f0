/// Reply ledger module
///
/// Derives the set of target-post IDs the bot has already answered from the
/// bot account's own post history. Rebuilt from scratch every run; this is
/// the system's only idempotence mechanism, so there is nothing to persist.

use std::collections::HashSet;

use crate::twitter::Post;

/// Membership set of already-answered target post IDs.
#[derive(Debug, Default)]
pub struct ReplyLedger {
    answered: HashSet<String>,
}

impl ReplyLedger {
    /// Build the ledger from the bot's recent posts: every reply the bot has
    /// made to `target_handle` contributes its parent post ID.
    ///
    /// Bounded by the fetch page size; older replies fall off the ledger
    /// once they fall off the page. Accepted limitation.
    pub fn build(bot_posts: &[Post], target_handle: &str) -> Self {
        let mut answered = HashSet::new();
        for post in bot_posts {
            if post.in_reply_to_author_handle.as_deref() == Some(target_handle) {
                if let Some(parent_id) = &post.in_reply_to_post_id {
                    answered.insert(parent_id.clone());
                }
            }
        }
        ReplyLedger { answered }
    }

    pub fn contains(&self, post_id: &str) -> bool {
        self.answered.contains(post_id)
    }

    pub fn len(&self) -> usize {
        self.answered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answered.is_empty()
    }
}
