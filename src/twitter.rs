/// Twitter client module
///
/// Wraps the X (Twitter) API v2 behind the `SocialClient` trait the
/// reconciliation job runs against: fetch a recent timeline page for an
/// account, and post a reply to a post. Nothing else about the API leaks
/// into the core.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// A post as seen by the core. Owned by the API, read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author_handle: String,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
    /// Parent post when this post is itself a reply
    pub in_reply_to_post_id: Option<String>,
    /// Handle of the account the parent post belongs to
    pub in_reply_to_author_handle: Option<String>,
}

/// The external collaborator contract: list recent posts by account,
/// newest first, and post a reply. Implemented by `TwitterClient` in
/// production and by in-memory fakes in tests.
#[async_trait]
pub trait SocialClient: Send + Sync {
    async fn fetch_timeline(&self, handle: &str, max_results: u32) -> Result<Vec<Post>>;

    async fn post_reply(&self, parent_post_id: &str, text: &str) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct TwitterTweet {
    id: String,
    text: String,
    author_id: Option<String>,
    created_at: Option<String>,
    in_reply_to_user_id: Option<String>,
    referenced_tweets: Option<Vec<TwitterReference>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TwitterReference {
    #[serde(rename = "type")]
    kind: String,
    id: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct TwitterUser {
    id: String,
    username: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct TwitterIncludes {
    users: Option<Vec<TwitterUser>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TwitterResponse {
    data: Option<Vec<TwitterTweet>>,
    includes: Option<TwitterIncludes>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PostedTweet {
    id: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct PostTweetResponse {
    data: Option<PostedTweet>,
}

/// The recent-search endpoint accepts 10..=100 results per page; values
/// outside that range are not honored and get clamped with a warning.
pub(crate) fn clamp_page_size(requested: u32) -> u32 {
    let clamped = requested.clamp(10, 100);
    if clamped != requested {
        log::warn!(
            "FETCH_LIMIT {} is outside the endpoint's 10..=100 range, using {}",
            requested,
            clamped
        );
    }
    clamped
}

/// Concrete API v2 client using Bearer Token authentication.
pub struct TwitterClient {
    http: reqwest::Client,
    bearer_token: String,
    access_token: String,
    dry_run: bool,
}

impl TwitterClient {
    pub fn new(config: &Config) -> Self {
        TwitterClient {
            http: reqwest::Client::new(),
            bearer_token: config.twitter_bearer_token.trim().to_string(),
            access_token: config.twitter_access_token.trim().to_string(),
            dry_run: config.dry_run,
        }
    }
}

#[async_trait]
impl SocialClient for TwitterClient {
    /// Fetch the most recent posts authored by `handle`, newest first.
    ///
    /// Uses the v2 recent-search endpoint with a `from:` query, the same way
    /// a single bounded timeline page was read before. Reply parentage comes
    /// from `referenced_tweets`; the replied-to account's handle is resolved
    /// through the `in_reply_to_user_id` expansion.
    async fn fetch_timeline(&self, handle: &str, max_results: u32) -> Result<Vec<Post>> {
        let query = format!("from:{}", handle);
        let url = "https://api.twitter.com/2/tweets/search/recent";

        let max_results = clamp_page_size(max_results).to_string();

        log::debug!("Fetching timeline with query: {}", query);

        let response = self
            .http
            .get(url)
            .header("Authorization", format!("Bearer {}", self.bearer_token))
            .query(&[
                ("query", query.as_str()),
                ("max_results", max_results.as_str()),
                (
                    "tweet.fields",
                    "created_at,author_id,in_reply_to_user_id,referenced_tweets",
                ),
                ("expansions", "author_id,in_reply_to_user_id"),
                ("user.fields", "username"),
            ])
            .send()
            .await
            .context("Failed to fetch timeline from Twitter API")?;

        let rate_limit_remaining = response
            .headers()
            .get("x-rate-limit-remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            let error_msg = match status.as_u16() {
                401 => format!(
                    "Unauthorized (401): invalid or missing Bearer Token. \
                    Check TWITTER_BEARER_TOKEN and that the app has v2 access. \
                    API response: {}",
                    text
                ),
                403 => format!(
                    "Forbidden (403): the Bearer Token lacks permission for this endpoint. \
                    API response: {}",
                    text
                ),
                429 => format!(
                    "Rate limited (429): too many requests; the next scheduled run will retry. \
                    API response: {}",
                    text
                ),
                _ => format!("Twitter API error: {} - {}", status, text),
            };

            anyhow::bail!("{}", error_msg);
        }

        if let Some(remaining) = rate_limit_remaining {
            log::debug!("Twitter API rate limit: {} requests remaining", remaining);
            if remaining < 5 {
                log::warn!("Low Twitter API rate limit remaining: {}", remaining);
            }
        }

        let twitter_response: TwitterResponse = response
            .json()
            .await
            .context("Failed to parse Twitter API response")?;

        let users = twitter_response
            .includes
            .and_then(|i| i.users)
            .unwrap_or_default();
        let username_for = |user_id: &str| -> Option<String> {
            users
                .iter()
                .find(|u| u.id == user_id)
                .map(|u| u.username.clone())
        };

        let posts = twitter_response
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|tweet| {
                let author_handle = tweet
                    .author_id
                    .as_deref()
                    .and_then(|id| username_for(id))
                    .unwrap_or_else(|| handle.to_string());

                let in_reply_to_post_id = tweet.referenced_tweets.as_ref().and_then(|refs| {
                    refs.iter()
                        .find(|r| r.kind == "replied_to")
                        .map(|r| r.id.clone())
                });

                let in_reply_to_author_handle = tweet
                    .in_reply_to_user_id
                    .as_deref()
                    .and_then(|id| username_for(id));

                let created_at = tweet
                    .created_at
                    .as_deref()
                    .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                    .map(|dt| dt.with_timezone(&Utc));

                Post {
                    id: tweet.id,
                    author_handle,
                    text: tweet.text,
                    created_at,
                    in_reply_to_post_id,
                    in_reply_to_author_handle,
                }
            })
            .collect();

        Ok(posts)
    }

    /// Post `text` as a reply to `parent_post_id`.
    async fn post_reply(&self, parent_post_id: &str, text: &str) -> Result<()> {
        log::info!("Posting reply to {}: {:?}", parent_post_id, text);

        if self.dry_run {
            log::info!("DRY_RUN set, reply not sent");
            return Ok(());
        }

        let body = serde_json::json!({
            "text": text,
            "reply": { "in_reply_to_tweet_id": parent_post_id },
        });

        let response = self
            .http
            .post("https://api.twitter.com/2/tweets")
            .header("Authorization", format!("Bearer {}", self.access_token))
            .json(&body)
            .send()
            .await
            .context("Failed to post reply to Twitter API")?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("Twitter API rejected the reply: {} - {}", status, text);
        }

        let posted: PostTweetResponse = response
            .json()
            .await
            .context("Failed to parse reply-post response")?;

        if let Some(created) = posted.data {
            log::info!("Reply posted as {}", created.id);
        }

        Ok(())
    }
}
