mod chat_api;
mod client;
mod responses_api;
mod transport;

pub use chat_api::{ChatMessage, ChatReply, ChatRequest, ChatUsage};
pub use client::OpenAiClient;
pub use responses_api::{
    ContentPart, ResponsesContent, ResponsesInputItem, ResponsesReply, ResponsesRequest,
    ResponsesUsage,
};
pub use transport::{FileUploadRequest, OpenAiHttpTransport, OpenAiTransport, UploadReply};
