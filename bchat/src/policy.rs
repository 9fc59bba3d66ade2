//! Per-call history retention policy around a completion client.

use bprovider::{CompletionClient, CompletionResult, FileReference};

/// Decides whether the live history participates in one outgoing request,
/// and whether a turn produced under suppression is merged back afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryPolicy {
    pub include_history_in_request: bool,
    pub merge_new_turn_when_suppressed: bool,
}

impl HistoryPolicy {
    /// Ordinary conversational call: the request sees the full history and
    /// the client's own append is the only mutation.
    pub fn conversational() -> Self {
        Self {
            include_history_in_request: true,
            merge_new_turn_when_suppressed: false,
        }
    }

    /// Request goes out with zero prior turns; `merge` controls whether the
    /// new turn still lands in the durable history afterward.
    pub fn suppressed(merge: bool) -> Self {
        Self {
            include_history_in_request: false,
            merge_new_turn_when_suppressed: merge,
        }
    }

    /// Synthetic traffic: empty request history, nothing merged back.
    pub fn probe() -> Self {
        Self::suppressed(false)
    }

    /// Runs one completion call under this policy.
    ///
    /// With history suppressed, the live history is swapped out for an empty
    /// buffer (the old buffer becomes the snapshot, by move, so the two can
    /// never alias), the call runs against the empty sequence, and the
    /// snapshot is swapped back in afterward. Whatever the client appended
    /// while suppressed is captured by the second swap and merged back only
    /// when the merge flag is set. A failed call appends nothing, so the
    /// snapshot is restored unchanged.
    pub async fn execute(
        &self,
        client: &mut dyn CompletionClient,
        prompt: &str,
        instructions: Option<&str>,
        files: &[FileReference],
    ) -> CompletionResult {
        if self.include_history_in_request {
            return dispatch(client, prompt, instructions, files).await;
        }

        let snapshot = client.replace_history(Vec::new());
        let result = dispatch(client, prompt, instructions, files).await;
        let new_turns = client.replace_history(snapshot);

        if self.merge_new_turn_when_suppressed && !new_turns.is_empty() {
            client.extend_history(new_turns);
        }

        result
    }
}

/// Routes to the file-attachment capability when references are present and
/// the client supports it; otherwise sends text-only.
async fn dispatch(
    client: &mut dyn CompletionClient,
    prompt: &str,
    instructions: Option<&str>,
    files: &[FileReference],
) -> CompletionResult {
    if files.is_empty() {
        return client.complete(prompt, instructions).await;
    }

    if let Some(file_client) = client.file_completions() {
        return file_client
            .complete_with_files(prompt, instructions, files)
            .await;
    }

    tracing::warn!(
        event = "attachments_unsupported",
        attachments = files.len(),
        "client has no file-attachment capability; sending text-only request"
    );
    client.complete(prompt, instructions).await
}
