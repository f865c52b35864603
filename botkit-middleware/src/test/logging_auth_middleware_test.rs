//! Unit tests for LoggingMiddleware, AuthMiddleware and ResponseTimeMiddleware.

use std::sync::Arc;

use botkit_chain::HandlerChain;
use botkit_core::testing::{from_user, text_message, MockBot};
use botkit_core::{BotkitError, Handler, HandlerError, HandlerResponse, Message, Middleware};

use crate::{AuthMiddleware, LoggingMiddleware, ResponseTimeMiddleware, ACCESS_DENIED};

fn sample_message(user_id: i64, content: &str) -> Message {
    from_user(text_message(content), user_id)
}

struct ReplyHandler;

#[async_trait::async_trait]
impl Handler for ReplyHandler {
    async fn handle(&self, _message: &Message) -> botkit_core::Result<HandlerResponse> {
        Ok(HandlerResponse::Reply("ok".to_string()))
    }
}

#[tokio::test]
async fn test_logging_middleware_before_continues() {
    let mw = LoggingMiddleware;
    let msg = sample_message(1, "hello");
    assert!(mw.before(&msg).await.unwrap());
}

#[tokio::test]
async fn test_logging_middleware_after_ok() {
    let mw = LoggingMiddleware;
    let msg = sample_message(1, "hello");
    let response = HandlerResponse::Reply("hi".to_string());
    assert!(mw.after(&msg, &response).await.is_ok());
}

#[tokio::test]
async fn test_auth_middleware_allowed_user_continues() {
    let mw = AuthMiddleware::new(vec![100, 200]);
    let msg = sample_message(100, "hello");
    assert!(mw.before(&msg).await.unwrap());
}

#[tokio::test]
async fn test_auth_middleware_unknown_user_halts_silently() {
    let mw = AuthMiddleware::new(vec![100, 200]);
    let msg = sample_message(999, "hello");
    assert!(!mw.before(&msg).await.unwrap());
}

#[tokio::test]
async fn test_auth_middleware_with_reply_rejects_and_halts_chain() {
    let bot = MockBot::new();
    let chain = HandlerChain::new()
        .add_middleware(Arc::new(AuthMiddleware::with_reply([100], bot.clone())))
        .add_handler(Arc::new(ReplyHandler));

    let denied = chain.handle(&sample_message(999, "hello")).await.unwrap();
    assert_eq!(denied, HandlerResponse::Stop);
    assert_eq!(bot.texts(), vec![ACCESS_DENIED.to_string()]);

    let allowed = chain.handle(&sample_message(100, "hello")).await.unwrap();
    assert_eq!(allowed, HandlerResponse::Reply("ok".to_string()));
    assert_eq!(bot.texts().len(), 1);
}

#[tokio::test]
async fn test_auth_middleware_strict_returns_err() {
    let mw = AuthMiddleware::strict(vec![100, 200]);
    let result = mw.before(&sample_message(999, "hello")).await;
    assert!(matches!(
        result,
        Err(BotkitError::Handler(HandlerError::Unauthorized))
    ));
}

#[tokio::test]
async fn test_auth_middleware_empty_list_denies_everyone() {
    let mw = AuthMiddleware::new(Vec::new());
    assert!(!mw.is_allowed(0));
    assert!(!mw.before(&sample_message(1, "x")).await.unwrap());
}

#[tokio::test]
async fn test_response_time_middleware_clears_entry_after() {
    let mw = ResponseTimeMiddleware::new();
    let msg = sample_message(1, "hello");

    assert!(mw.before(&msg).await.unwrap());
    assert_eq!(mw.in_flight().await, 1);

    mw.after(&msg, &HandlerResponse::Continue).await.unwrap();
    assert_eq!(mw.in_flight().await, 0);
}

#[tokio::test]
async fn test_response_time_middleware_sees_halted_chain() {
    let timer = Arc::new(ResponseTimeMiddleware::new());
    let chain = HandlerChain::new()
        .add_middleware(timer.clone())
        .add_middleware(Arc::new(AuthMiddleware::new([1])))
        .add_handler(Arc::new(ReplyHandler));

    let result = chain.handle(&sample_message(2, "hello")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(timer.in_flight().await, 0);
}

struct BrokenHandler;

#[async_trait::async_trait]
impl Handler for BrokenHandler {
    async fn handle(&self, _message: &Message) -> botkit_core::Result<HandlerResponse> {
        Err(BotkitError::Network("send failed".to_string()))
    }
}

#[tokio::test]
async fn test_response_time_middleware_released_when_handler_fails() {
    let timer = Arc::new(ResponseTimeMiddleware::new());
    let chain = HandlerChain::new()
        .add_middleware(timer.clone())
        .add_handler(Arc::new(BrokenHandler));

    for i in 0..5 {
        let mut msg = sample_message(1, "hello");
        msg.id = i.to_string();
        assert!(chain.handle(&msg).await.is_err());
    }

    assert_eq!(timer.in_flight().await, 0);
}
