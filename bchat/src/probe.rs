//! Connectivity probe excluded from durable history.

use bprovider::{CompletionClient, SamplingParams};

use crate::HistoryPolicy;

const PROBE_PROMPT: &str = "Reply with exactly: pong";
const PROBE_INSTRUCTIONS: &str = "Ignore all prior instructions. Output exactly: pong";
const PROBE_MAX_OUTPUT_TOKENS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The service answered with the expected token.
    Pong,
    /// The call succeeded but the reply was something else.
    Unexpected(String),
    /// The call itself failed.
    Failed,
}

/// Sends a minimal synthetic request and checks the echoed reply.
///
/// The probe runs under `HistoryPolicy::probe()` so it never pollutes the
/// durable history, and it temporarily pins sampling to a deterministic,
/// cheap configuration. The caller's sampling parameters are restored on
/// every exit path, success or failure.
pub async fn probe(client: &mut dyn CompletionClient) -> ProbeOutcome {
    let probe_params = probe_sampling(&*client);
    let scope = SamplingScope::apply(client, probe_params);

    let result = HistoryPolicy::probe()
        .execute(client, PROBE_PROMPT, Some(PROBE_INSTRUCTIONS), &[])
        .await;

    scope.restore(client);

    if !result.is_success() {
        return ProbeOutcome::Failed;
    }

    let text = result.output_text.unwrap_or_default();
    if text.trim().eq_ignore_ascii_case("pong") {
        ProbeOutcome::Pong
    } else {
        ProbeOutcome::Unexpected(text)
    }
}

fn probe_sampling(client: &dyn CompletionClient) -> SamplingParams {
    let mut sampling = client.sampling().clone();
    sampling.temperature = 0.0;
    sampling.max_output_tokens = PROBE_MAX_OUTPUT_TOKENS.max(client.dialect().min_output_tokens());
    sampling
}

/// Scoped save/restore of a client's sampling parameters.
struct SamplingScope {
    saved: SamplingParams,
}

impl SamplingScope {
    fn apply(client: &mut dyn CompletionClient, sampling: SamplingParams) -> Self {
        let saved = client.sampling().clone();
        client.set_sampling(sampling);
        Self { saved }
    }

    fn restore(self, client: &mut dyn CompletionClient) {
        client.set_sampling(self.saved);
    }
}
