//! Client seam traits driven by the orchestration layer.

use std::path::Path;

use crate::{
    CompletionResult, FileReference, FileUploadResult, ProviderError, ProviderFuture,
    SamplingParams, Turn, WireDialect,
};

/// Object-safe contract for a completion client that owns one conversation
/// history.
///
/// Every completing operation takes `&mut self`: the history swap performed
/// by the policy executor is only sound with at most one in-flight call per
/// client value, and exclusive borrows make that the only way to use it.
pub trait CompletionClient: Send {
    fn dialect(&self) -> WireDialect;

    fn history(&self) -> &[Turn];

    /// Swaps in a replacement history and hands back the previous buffer.
    ///
    /// The returned buffer is moved out, so it can never share storage with
    /// the sequence now live inside the client.
    fn replace_history(&mut self, history: Vec<Turn>) -> Vec<Turn>;

    fn extend_history(&mut self, turns: Vec<Turn>);

    fn clear_history(&mut self);

    fn sampling(&self) -> &SamplingParams;

    fn set_sampling(&mut self, sampling: SamplingParams);

    /// Runs one completion call. Transport and parse failures are absorbed
    /// into a [`CompletionResult::failure`] rather than surfaced as errors;
    /// on success the new user and assistant turns are appended to the live
    /// history.
    fn complete<'a>(
        &'a mut self,
        prompt: &'a str,
        instructions: Option<&'a str>,
    ) -> ProviderFuture<'a, CompletionResult>;

    /// Typed capability query for file-carrying completions.
    ///
    /// Returns `Some` only when the client can compose attachment parts into
    /// a request (the Responses dialect); text-only clients keep the default.
    fn file_completions(&mut self) -> Option<&mut dyn FileCompletionCapability> {
        None
    }
}

/// Optional capability: completions that attach previously-uploaded files.
pub trait FileCompletionCapability: CompletionClient {
    fn complete_with_files<'a>(
        &'a mut self,
        prompt: &'a str,
        instructions: Option<&'a str>,
        files: &'a [FileReference],
    ) -> ProviderFuture<'a, CompletionResult>;
}

/// Optional capability: uploading a binary resource for later attachment.
///
/// Unlike completions, upload failures are faults: precondition violations
/// (missing path, unsupported extension) and transport errors both surface
/// as `Err` to the immediate caller.
pub trait FileUploadCapability {
    fn upload_file<'a>(
        &'a self,
        path: &'a Path,
        purpose: &'a str,
    ) -> ProviderFuture<'a, Result<FileUploadResult, ProviderError>>;
}
