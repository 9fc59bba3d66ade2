//! Completion client library for the banter conversation toolkit.
//!
//! `bprovider` owns the wire-facing half of the toolkit: the conversation
//! and result types shared by every crate, the [`CompletionClient`] seam the
//! orchestration layer drives, and the OpenAI adapter with its two wire
//! dialects (Chat Completions and Responses).

mod client;
mod error;
mod types;

pub mod openai;

pub use client::{CompletionClient, FileCompletionCapability, FileUploadCapability};
pub use error::{ProviderError, ProviderErrorKind};
pub use types::{
    CallStatus, CompletionResult, FileReference, FileUploadResult, ProviderFuture, Role,
    SamplingParams, SecretString, TokenUsage, Turn, WireDialect,
};
