use thiserror::Error;

pub(crate) mod candidates;
pub(crate) mod securitytrails;

/// How a candidate request can fail.
///
/// Workers hand back raw results or one of these; deciding what a failure
/// means for the run as a whole is the coordinator's job.
#[derive(Debug, Error)]
pub enum SuggestError {
    /// The reply body didn't carry the expected suggestion shape. The
    /// endpoint answers with a challenge page instead of JSON once the
    /// session cookie has expired.
    #[error("unrecognized reply for {query:?}; the session cookie is likely stale")]
    SessionInvalid { query: String },

    /// The request never produced a body, even after retrying.
    #[error("request for {query:?} failed after {attempts} attempts")]
    Transport {
        query: String,
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },
}
