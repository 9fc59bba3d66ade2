use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use bprovider::openai::{
    ChatRequest, FileUploadRequest, OpenAiClient, OpenAiTransport, ResponsesContent,
    ResponsesRequest,
};
use bprovider::{
    CompletionClient, FileCompletionCapability, FileReference, FileUploadCapability,
    ProviderError, ProviderErrorKind, ProviderFuture, Role, Turn, WireDialect,
};

#[derive(Debug, Default)]
struct FakeTransport {
    chat_requests: Mutex<Vec<ChatRequest>>,
    responses_requests: Mutex<Vec<ResponsesRequest>>,
    upload_requests: Mutex<Vec<FileUploadRequest>>,
    chat_replies: Mutex<Vec<String>>,
    responses_replies: Mutex<Vec<String>>,
    upload_reply: Mutex<Option<String>>,
}

impl FakeTransport {
    fn with_chat_replies(replies: &[String]) -> Self {
        let transport = Self::default();
        *transport.chat_replies.lock().expect("chat replies lock") =
            replies.iter().rev().cloned().collect();
        transport
    }

    fn with_responses_replies(replies: &[String]) -> Self {
        let transport = Self::default();
        *transport
            .responses_replies
            .lock()
            .expect("responses replies lock") = replies.iter().rev().cloned().collect();
        transport
    }

    fn with_upload_reply(reply: &str) -> Self {
        let transport = Self::default();
        *transport.upload_reply.lock().expect("upload reply lock") = Some(reply.to_string());
        transport
    }
}

impl OpenAiTransport for FakeTransport {
    fn chat_completion<'a>(
        &'a self,
        request: ChatRequest,
    ) -> ProviderFuture<'a, Result<bprovider::openai::ChatReply, ProviderError>> {
        Box::pin(async move {
            self.chat_requests
                .lock()
                .expect("chat request lock")
                .push(request);

            match self.chat_replies.lock().expect("chat replies lock").pop() {
                Some(json) => Ok(serde_json::from_str(&json).expect("fake chat reply decodes")),
                None => Err(ProviderError::transport("502 - wire failure")),
            }
        })
    }

    fn response<'a>(
        &'a self,
        request: ResponsesRequest,
    ) -> ProviderFuture<'a, Result<bprovider::openai::ResponsesReply, ProviderError>> {
        Box::pin(async move {
            self.responses_requests
                .lock()
                .expect("responses request lock")
                .push(request);

            match self
                .responses_replies
                .lock()
                .expect("responses replies lock")
                .pop()
            {
                Some(json) => Ok(serde_json::from_str(&json).expect("fake responses reply decodes")),
                None => Err(ProviderError::transport("502 - wire failure")),
            }
        })
    }

    fn upload<'a>(
        &'a self,
        request: FileUploadRequest,
    ) -> ProviderFuture<'a, Result<bprovider::openai::UploadReply, ProviderError>> {
        Box::pin(async move {
            self.upload_requests
                .lock()
                .expect("upload request lock")
                .push(request);

            match self.upload_reply.lock().expect("upload reply lock").clone() {
                Some(json) => Ok(serde_json::from_str(&json).expect("fake upload reply decodes")),
                None => Err(ProviderError::transport("502 - wire failure")),
            }
        })
    }
}

fn chat_reply(text: &str) -> String {
    format!(
        r#"{{"choices":[{{"message":{{"content":"{text}"}}}}],"usage":{{"prompt_tokens":12,"prompt_tokens_details":{{"cached_tokens":4}},"completion_tokens":5,"completion_tokens_details":{{"reasoning_tokens":2}}}}}}"#
    )
}

fn responses_reply(text: &str) -> String {
    format!(
        r#"{{"output":[{{"type":"message","role":"assistant","content":[{{"type":"output_text","text":"{text}"}}]}}],"usage":{{"input_tokens":20,"input_tokens_details":{{"cached_tokens":6}},"output_tokens":7,"output_tokens_details":{{"reasoning_tokens":1}}}}}}"#
    )
}

#[tokio::test]
async fn chat_success_appends_user_and_assistant_turns() {
    let transport = Arc::new(FakeTransport::with_chat_replies(&[chat_reply("hello there")]));
    let mut client = OpenAiClient::new(transport.clone(), WireDialect::ChatCompletions, "gpt-5.2");

    let result = client.complete("Hi", None).await;

    assert!(result.is_success());
    assert_eq!(result.output_text.as_deref(), Some("hello there"));
    assert_eq!(result.usage.input_tokens, 12);
    assert_eq!(result.usage.cached_input_tokens, 4);
    assert_eq!(result.usage.output_tokens, 5);
    assert_eq!(result.usage.reasoning_tokens, 2);

    assert_eq!(
        client.history(),
        &[Turn::user("Hi"), Turn::assistant("hello there")]
    );
}

#[tokio::test]
async fn chat_failure_yields_empty_result_and_leaves_history_untouched() {
    let transport = Arc::new(FakeTransport::default());
    let mut client = OpenAiClient::new(transport.clone(), WireDialect::ChatCompletions, "gpt-5.2");
    client.push_turn(Role::User, "earlier");
    client.push_turn(Role::Assistant, "reply");

    let result = client.complete("Hi", None).await;

    assert!(!result.is_success());
    assert_eq!(result.output_text, None);
    assert_eq!(result.usage.input_tokens, 0);
    assert_eq!(result.usage.output_tokens, 0);
    assert_eq!(client.history().len(), 2);
}

#[tokio::test]
async fn second_chat_request_replays_full_prior_conversation() {
    let transport = Arc::new(FakeTransport::with_chat_replies(&[
        chat_reply("R1"),
        chat_reply("You said Hi"),
    ]));
    let mut client = OpenAiClient::new(transport.clone(), WireDialect::ChatCompletions, "gpt-5.2");

    let first = client.complete("Hi", None).await;
    assert_eq!(first.output_text.as_deref(), Some("R1"));

    let second = client.complete("What did I just say?", None).await;
    assert_eq!(second.output_text.as_deref(), Some("You said Hi"));

    assert_eq!(
        client.history(),
        &[
            Turn::user("Hi"),
            Turn::assistant("R1"),
            Turn::user("What did I just say?"),
            Turn::assistant("You said Hi"),
        ]
    );

    let requests = transport.chat_requests.lock().expect("chat request lock");
    assert_eq!(requests.len(), 2);

    let sent: Vec<(&str, &str)> = requests[1]
        .messages
        .iter()
        .map(|m| (m.role.as_str(), m.content.as_str()))
        .collect();
    assert_eq!(
        sent,
        [
            ("system", "You are a helpful assistant."),
            ("user", "Hi"),
            ("assistant", "R1"),
            ("user", "What did I just say?"),
        ]
    );
}

#[tokio::test]
async fn responses_dialect_carries_instructions_out_of_band() {
    let transport = Arc::new(FakeTransport::with_responses_replies(&[responses_reply(
        "done",
    )]));
    let mut client = OpenAiClient::new(transport.clone(), WireDialect::Responses, "gpt-5.2")
        .with_system_instructions("be terse");

    let result = client.complete("Hi", None).await;
    assert!(result.is_success());
    assert_eq!(result.usage.input_tokens, 20);
    assert_eq!(result.usage.cached_input_tokens, 6);

    let requests = transport
        .responses_requests
        .lock()
        .expect("responses request lock");
    assert_eq!(requests[0].instructions, "be terse");
    assert_eq!(requests[0].input.len(), 1);
    assert_eq!(
        requests[0].input[0].content,
        ResponsesContent::Text("Hi".to_string())
    );

    assert_eq!(
        client.history(),
        &[Turn::user("Hi"), Turn::assistant("done")]
    );
}

#[tokio::test]
async fn file_request_drops_assistant_turns_from_replay() {
    let transport = Arc::new(FakeTransport::with_responses_replies(&[responses_reply(
        "summary",
    )]));
    let mut client = OpenAiClient::new(transport.clone(), WireDialect::Responses, "gpt-5.2");
    client.push_turn(Role::Assistant, "A1");
    client.push_turn(Role::User, "U1");

    let files = vec![FileReference::new("file-123")];
    let file_client = client.file_completions().expect("responses client has file capability");
    let result = file_client
        .complete_with_files("summarize the attachment", None, &files)
        .await;

    assert!(result.is_success());

    let requests = transport
        .responses_requests
        .lock()
        .expect("responses request lock");
    let request = &requests[0];

    let serialized = serde_json::to_string(request).expect("request serializes");
    assert!(!serialized.contains("A1"));
    assert!(serialized.contains("U1"));
    assert!(serialized.contains("file-123"));

    assert_eq!(request.input.len(), 2);
    match &request.input[1].content {
        ResponsesContent::Parts(parts) => {
            assert_eq!(parts[0].file_id.as_deref(), Some("file-123"));
            assert_eq!(parts[1].text.as_deref(), Some("summarize the attachment"));
        }
        other => panic!("expected parts, got {other:?}"),
    }

    // Attachments stay request-scoped: durable history gains the plain turns.
    assert_eq!(client.history().len(), 4);
    assert_eq!(client.history()[2], Turn::user("summarize the attachment"));
    assert_eq!(client.history()[3], Turn::assistant("summary"));
}

#[tokio::test]
async fn file_capability_is_gated_on_the_responses_dialect() {
    let transport = Arc::new(FakeTransport::default());
    let mut chat_client =
        OpenAiClient::new(transport.clone(), WireDialect::ChatCompletions, "gpt-5.2");
    assert!(chat_client.file_completions().is_none());

    let mut responses_client = OpenAiClient::new(transport, WireDialect::Responses, "gpt-5.2");
    assert!(responses_client.file_completions().is_some());
}

#[tokio::test]
async fn empty_file_list_falls_back_to_text_only_request() {
    let transport = Arc::new(FakeTransport::with_responses_replies(&[responses_reply(
        "plain",
    )]));
    let mut client = OpenAiClient::new(transport.clone(), WireDialect::Responses, "gpt-5.2");

    let file_client = client.file_completions().expect("file capability");
    let result = file_client.complete_with_files("Hi", None, &[]).await;
    assert!(result.is_success());

    let requests = transport
        .responses_requests
        .lock()
        .expect("responses request lock");
    assert_eq!(
        requests[0].input[0].content,
        ResponsesContent::Text("Hi".to_string())
    );
}

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("bprovider-upload-{}-{name}", std::process::id()))
}

#[tokio::test]
async fn upload_preconditions_fail_before_any_transport_call() {
    let transport = Arc::new(FakeTransport::default());
    let client = OpenAiClient::new(transport.clone(), WireDialect::Responses, "gpt-5.2");

    let missing = client
        .upload_file(Path::new("/definitely/not/here.pdf"), "user_data")
        .await
        .expect_err("missing file must fault");
    assert_eq!(missing.kind, ProviderErrorKind::InvalidRequest);

    let txt_path = scratch_path("notes.txt");
    std::fs::write(&txt_path, b"plain text").expect("write scratch file");
    let wrong_type = client
        .upload_file(&txt_path, "user_data")
        .await
        .expect_err("non-pdf must fault");
    assert_eq!(wrong_type.kind, ProviderErrorKind::InvalidRequest);
    std::fs::remove_file(&txt_path).ok();

    assert!(transport
        .upload_requests
        .lock()
        .expect("upload request lock")
        .is_empty());
}

#[tokio::test]
async fn upload_sends_multipart_fields_and_returns_reference() {
    let transport = Arc::new(FakeTransport::with_upload_reply(
        r#"{"id":"file-abc","filename":"report.pdf","bytes":11}"#,
    ));
    let client = OpenAiClient::new(transport.clone(), WireDialect::Responses, "gpt-5.2");

    let pdf_path = scratch_path("report.pdf");
    std::fs::write(&pdf_path, b"%PDF-sample").expect("write scratch file");

    let result = client
        .upload_file(&pdf_path, "  ")
        .await
        .expect("upload should succeed");
    std::fs::remove_file(&pdf_path).ok();

    assert_eq!(result.file, FileReference::new("file-abc"));
    assert_eq!(result.filename, "report.pdf");
    assert_eq!(result.bytes, 11);

    let uploads = transport
        .upload_requests
        .lock()
        .expect("upload request lock");
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].purpose, "user_data");
    assert_eq!(uploads[0].filename, "report.pdf");
    assert_eq!(uploads[0].bytes, b"%PDF-sample");
}

#[tokio::test]
async fn upload_without_file_id_is_a_fault() {
    let transport = Arc::new(FakeTransport::with_upload_reply(r#"{"filename":"x.pdf"}"#));
    let client = OpenAiClient::new(transport, WireDialect::Responses, "gpt-5.2");

    let pdf_path = scratch_path("no-id.pdf");
    std::fs::write(&pdf_path, b"%PDF-sample").expect("write scratch file");

    let error = client
        .upload_file(&pdf_path, "user_data")
        .await
        .expect_err("missing id must fault");
    std::fs::remove_file(&pdf_path).ok();

    assert_eq!(error.kind, ProviderErrorKind::Other);
}
