/// Run error taxonomy
///
/// Only collaborator I/O is fatal to a run. Parse misses and unparseable
/// matched numbers are handled inside the parser and never surface here.

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Timeline fetch for @{handle} failed: {source}")]
    Fetch {
        handle: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Posting reply to post {parent_id} failed: {source}")]
    Post {
        parent_id: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type RunResult<T> = Result<T, RunError>;
