//! Final correction submission
//!
//! This module contains:
//! - The correction payload and its validation (payload.rs)
//! - Sinks the payload is handed to (sink.rs)
//!
//! Submission is the only asynchronous step of a review: pending media
//! uploads are awaited together and the payload goes out only once all of
//! them have resolved.

pub mod payload;
pub mod sink;

use std::future::Future;

use anyhow::{Context, Result};

use crate::session::state::ReviewSession;
use payload::{CorrectionDraft, CorrectionPayload, UploadedMedia};
use sink::CorrectionSink;

/// Wait for uploads, then build the payload from the session and submit it
///
/// Nothing is submitted if the draft is invalid or any upload fails.
pub async fn submit_correction<S, U>(
    session: &ReviewSession,
    submission_id: &str,
    draft: CorrectionDraft,
    uploads: U,
    sink: &S,
) -> Result<String>
where
    S: CorrectionSink,
    U: IntoIterator,
    U::Item: Future<Output = Result<UploadedMedia>>,
{
    draft.validate()?;

    let media = futures::future::try_join_all(uploads)
        .await
        .context("Media upload failed, correction not submitted")?;

    let payload = CorrectionPayload::build(
        submission_id,
        session.store.all().to_vec(),
        draft,
        &media,
    )?;
    log::info!(
        "Submitting correction for {} with {} annotations",
        submission_id,
        payload.annotations.len()
    );
    sink.submit(&payload).await
}
