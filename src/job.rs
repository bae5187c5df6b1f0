/// Reconciliation and posting loop
///
/// One run: rebuild the reply ledger from the bot's own timeline, walk the
/// target account's timeline under the configured scan policy, and reply to
/// eligible measurement posts. Stateless between runs; the ledger rebuild is
/// what makes repeated runs idempotent.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{Config, ScanPolicy};
use crate::error::{RunError, RunResult};
use crate::ledger::ReplyLedger;
use crate::parser::MeasurementParser;
use crate::twitter::{Post, SocialClient};

/// Outcome counters for one run, exposed on the status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub posts_scanned: usize,
    pub replies_posted: usize,
    pub skipped_answered: usize,
    pub skipped_third_party_replies: usize,
    pub parse_misses: usize,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    fn new() -> Self {
        RunReport {
            posts_scanned: 0,
            replies_posted: 0,
            skipped_answered: 0,
            skipped_third_party_replies: 0,
            parse_misses: 0,
            finished_at: Utc::now(),
        }
    }
}

pub struct ReconcileJob {
    config: Config,
    parser: MeasurementParser,
    client: Arc<dyn SocialClient>,
}

impl ReconcileJob {
    pub fn new(config: Config, client: Arc<dyn SocialClient>) -> Self {
        ReconcileJob {
            config,
            parser: MeasurementParser::new(),
            client,
        }
    }

    /// Execute one full reconciliation pass.
    ///
    /// Collaborator I/O failures abort the run and surface as the run's
    /// error; parse misses never do. Completing the scan is success whether
    /// or not any reply went out.
    pub async fn run(&self) -> RunResult<RunReport> {
        let bot_posts = self.fetch(&self.config.bot_handle).await?;
        let ledger = ReplyLedger::build(&bot_posts, &self.config.target_handle);
        log::info!(
            "Ledger built from {} bot posts: {} posts already answered",
            bot_posts.len(),
            ledger.len()
        );

        let target_posts = self.fetch(&self.config.target_handle).await?;
        log::info!(
            "Scanning {} posts from @{} (policy: {})",
            target_posts.len(),
            self.config.target_handle,
            self.config.scan_policy
        );

        let mut report = RunReport::new();

        match self.config.scan_policy {
            ScanPolicy::ExhaustiveOldestFirst => {
                // API order is newest-first; walk the page backwards
                for post in target_posts.iter().rev() {
                    report.posts_scanned += 1;

                    if ledger.contains(&post.id) {
                        report.skipped_answered += 1;
                        continue;
                    }
                    if post.in_reply_to_post_id.is_some() {
                        // The target replying to someone else, not a report
                        report.skipped_third_party_replies += 1;
                        continue;
                    }
                    if self.try_reply(post, &mut report).await? {
                        report.replies_posted += 1;
                    }
                }
            }
            ScanPolicy::FrontierNewestFirst => {
                for post in &target_posts {
                    report.posts_scanned += 1;

                    if ledger.contains(&post.id) {
                        // Everything older is assumed answered on past runs
                        report.skipped_answered += 1;
                        log::debug!("Reached answered post {}, stopping scan", post.id);
                        break;
                    }
                    if post.in_reply_to_post_id.is_some() {
                        report.skipped_third_party_replies += 1;
                        continue;
                    }
                    if self.try_reply(post, &mut report).await? {
                        report.replies_posted += 1;
                        break;
                    }
                }
            }
        }

        report.finished_at = Utc::now();
        log::info!(
            "Run complete: {} scanned, {} replied, {} already answered, {} misses",
            report.posts_scanned,
            report.replies_posted,
            report.skipped_answered,
            report.parse_misses
        );
        Ok(report)
    }

    async fn fetch(&self, handle: &str) -> RunResult<Vec<Post>> {
        self.client
            .fetch_timeline(handle, self.config.fetch_limit)
            .await
            .map_err(|source| RunError::Fetch {
                handle: handle.to_string(),
                source,
            })
    }

    /// Parse one candidate post and, on a recognized measurement, post the
    /// converted reply. Returns whether a reply went out; a parse miss is
    /// counted and skipped.
    async fn try_reply(&self, post: &Post, report: &mut RunReport) -> RunResult<bool> {
        let measurement = match self.parser.parse(&post.text) {
            Some(m) => m,
            None => {
                report.parse_misses += 1;
                return Ok(false);
            }
        };

        log::info!(
            "Post {} reports {} in ({:?})",
            post.id,
            measurement.value,
            post.created_at
        );

        let converted = self.config.profile.render(measurement.value);
        let message = format!(
            "@{} {} \n{}",
            self.config.target_handle, converted, measurement.annotation
        );

        self.client
            .post_reply(&post.id, &message)
            .await
            .map_err(|source| RunError::Post {
                parent_id: post.id.clone(),
                source,
            })?;

        Ok(true)
    }
}
