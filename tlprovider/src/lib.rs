//! Chat model provider contracts and the local Ollama adapter.

mod error;
mod model;
mod provider;

pub mod adapters;
pub mod prelude;

pub use error::{ProviderError, ProviderErrorKind};
pub use model::{
    Message, ModelRequest, ModelRequestBuilder, ModelResponse, Role, StopReason, TokenUsage,
    ToolArguments, ToolCall, ToolDefinition,
};
pub use provider::{ModelProvider, ProviderFuture};
pub use tlcommon::GenerationOptions;

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    use serde_json::json;

    use super::*;

    #[derive(Debug)]
    struct FakeProvider;

    impl ModelProvider for FakeProvider {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn complete<'a>(
            &'a self,
            request: ModelRequest,
        ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
            Box::pin(async move {
                request.validate()?;
                Ok(ModelResponse::new(
                    request.model,
                    Message::assistant("hello from provider"),
                )
                .with_usage(TokenUsage::new(5, 4)))
            })
        }
    }

    #[test]
    fn model_request_validate_enforces_contract() {
        let empty_model = ModelRequest::new("   ", vec![Message::user("hi")]);
        let err = empty_model.validate().expect_err("empty model must fail");
        assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);

        let empty_messages = ModelRequest::new("llama3.1:8b", Vec::new());
        let err = empty_messages
            .validate()
            .expect_err("empty messages must fail");
        assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);

        let bad_temperature =
            ModelRequest::new("llama3.1:8b", vec![Message::user("hi")]).with_temperature(2.5);
        let err = bad_temperature
            .validate()
            .expect_err("temperature outside range must fail");
        assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);

        let bad_max_tokens =
            ModelRequest::new("llama3.1:8b", vec![Message::user("hi")]).with_max_tokens(0);
        let err = bad_max_tokens
            .validate()
            .expect_err("max_tokens=0 must fail");
        assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);

        let valid = ModelRequest::builder("llama3.1:8b")
            .message(Message::user("hi"))
            .temperature(0.7)
            .max_tokens(128)
            .build()
            .expect("request should validate");
        assert_eq!(valid.options.temperature, Some(0.7));
        assert!(valid.tools.is_empty());
    }

    #[test]
    fn provider_error_helper_builders_assign_expected_retryability() {
        let invalid = ProviderError::invalid_request("bad model");
        assert!(!invalid.retryable);
        assert_eq!(invalid.kind, ProviderErrorKind::InvalidRequest);

        let timeout = ProviderError::timeout("request timed out");
        assert!(timeout.retryable);
        assert_eq!(timeout.kind, ProviderErrorKind::Timeout);

        let unavailable = ProviderError::unavailable("connection refused");
        assert!(unavailable.retryable);
        assert_eq!(unavailable.to_string(), "Unavailable: connection refused");
    }

    #[test]
    fn message_helpers_attach_tool_metadata() {
        let mut arguments = ToolArguments::new();
        arguments.insert("expression".to_string(), json!("2^3"));
        let call = ToolCall::new("call_0", "evaluate_arithmetic", arguments);

        let assistant = Message::assistant("").with_tool_calls(vec![call.clone()]);
        assert!(assistant.has_tool_calls());
        assert_eq!(assistant.tool_calls[0], call);

        let tool = Message::tool("evaluate_arithmetic", "8");
        assert_eq!(tool.role, Role::Tool);
        assert_eq!(tool.name.as_deref(), Some("evaluate_arithmetic"));
        assert_eq!(tool.content, "8");
        assert!(!tool.has_tool_calls());
    }

    #[test]
    fn model_response_derives_stop_reason_from_tool_calls() {
        let direct = ModelResponse::new("m", Message::assistant("hi"));
        assert_eq!(direct.stop_reason, StopReason::EndTurn);
        assert!(direct.tool_calls().is_empty());

        let call = ToolCall::new("call_0", "get_current_time", ToolArguments::new());
        let tool_use = ModelResponse::new("m", Message::assistant("").with_tool_calls(vec![call]));
        assert_eq!(tool_use.stop_reason, StopReason::ToolUse);
        assert_eq!(tool_use.tool_calls().len(), 1);
    }

    #[test]
    fn token_usage_accumulates_without_overflow() {
        let usage = TokenUsage::new(u32::MAX, 1).saturating_add(TokenUsage::new(3, 4));
        assert_eq!(usage.input_tokens, u32::MAX);
        assert_eq!(usage.output_tokens, 5);
        assert_eq!(usage.total_tokens, u32::MAX);
    }

    #[test]
    fn provider_complete_validates_before_answering() {
        let provider = FakeProvider;
        let request = ModelRequest::new("llama3.1:8b", vec![Message::user("hi")]);
        let response = block_on(provider.complete(request)).expect("completion should work");
        assert_eq!(response.content(), "hello from provider");
        assert_eq!(response.usage.total_tokens, 9);

        let invalid = ModelRequest::new("", vec![Message::user("hi")]);
        let err = block_on(provider.complete(invalid)).expect_err("blank model must fail");
        assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);
    }

    fn block_on<F: Future>(future: F) -> F::Output {
        let mut future = std::pin::pin!(future);
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);

        loop {
            match future.as_mut().poll(&mut cx) {
                Poll::Ready(value) => return value,
                Poll::Pending => std::thread::yield_now(),
            }
        }
    }

    fn noop_waker() -> Waker {
        unsafe fn clone(_: *const ()) -> RawWaker {
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        unsafe fn wake(_: *const ()) {}

        unsafe fn wake_by_ref(_: *const ()) {}

        unsafe fn drop(_: *const ()) {}

        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, wake, wake_by_ref, drop);

        let raw_waker = RawWaker::new(std::ptr::null(), &VTABLE);
        unsafe { Waker::from_raw(raw_waker) }
    }
}
