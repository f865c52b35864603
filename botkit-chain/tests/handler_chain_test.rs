//! Integration tests for [`botkit_chain::HandlerChain`], filters and [`botkit_chain::ErrorBoundary`].
//!
//! Covers: middleware/handler hook order, halting in before, Reply passed to after, filtered handlers
//! being skipped, and the boundary's resume vs halt behavior.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use botkit_chain::{on_command, ErrorBoundary, ErrorPolicy, HandlerChain, DEFAULT_APOLOGY};
use botkit_core::testing::{text_message, MockBot};
use botkit_core::{BotkitError, Handler, HandlerError, HandlerResponse, Message, Middleware};

type Log = Arc<Mutex<Vec<String>>>;

struct OrderMiddleware {
    name: &'static str,
    pass: bool,
    log: Log,
}

#[async_trait]
impl Middleware for OrderMiddleware {
    async fn before(&self, _message: &Message) -> botkit_core::Result<bool> {
        self.log.lock().unwrap().push(format!("mw_before_{}", self.name));
        Ok(self.pass)
    }

    async fn after(&self, _message: &Message, response: &HandlerResponse) -> botkit_core::Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("mw_after_{}:{:?}", self.name, response));
        Ok(())
    }
}

struct OrderHandler {
    name: &'static str,
    response: HandlerResponse,
    log: Log,
}

#[async_trait]
impl Handler for OrderHandler {
    async fn before(&self, _message: &Message) -> botkit_core::Result<bool> {
        self.log.lock().unwrap().push(format!("before_{}", self.name));
        Ok(true)
    }

    async fn handle(&self, _message: &Message) -> botkit_core::Result<HandlerResponse> {
        self.log.lock().unwrap().push(format!("handle_{}", self.name));
        Ok(self.response.clone())
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> botkit_core::Result<()> {
        self.log.lock().unwrap().push(format!("after_{}", self.name));
        Ok(())
    }
}

fn handler(name: &'static str, response: HandlerResponse, log: &Log) -> Arc<dyn Handler> {
    Arc::new(OrderHandler {
        name,
        response,
        log: log.clone(),
    })
}

fn middleware(name: &'static str, pass: bool, log: &Log) -> Arc<dyn Middleware> {
    Arc::new(OrderMiddleware {
        name,
        pass,
        log: log.clone(),
    })
}

struct FailingHandler {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Handler for FailingHandler {
    async fn handle(&self, _message: &Message) -> botkit_core::Result<HandlerResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(HandlerError::Failed("boom".into()).into())
    }
}

struct CountingHandler {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Handler for CountingHandler {
    async fn handle(&self, _message: &Message) -> botkit_core::Result<HandlerResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(HandlerResponse::Continue)
    }
}

/// **Test: full hook order with two middleware and two handlers.**
#[tokio::test]
async fn test_hooks_run_in_onion_order() {
    let log: Log = Arc::default();
    let chain = HandlerChain::new()
        .add_middleware(middleware("a", true, &log))
        .add_middleware(middleware("b", true, &log))
        .add_handler(handler("first", HandlerResponse::Continue, &log))
        .add_handler(handler("second", HandlerResponse::Continue, &log));

    let result = chain.handle(&text_message("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "mw_before_a",
            "mw_before_b",
            "before_first",
            "before_second",
            "handle_first",
            "handle_second",
            "after_second",
            "after_first",
            "mw_after_b:Continue",
            "mw_after_a:Continue",
        ]
    );
}

/// **Test: a middleware answering false halts; only already-entered middleware see after.**
#[tokio::test]
async fn test_middleware_halts_chain() {
    let log: Log = Arc::default();
    let chain = HandlerChain::new()
        .add_middleware(middleware("outer", true, &log))
        .add_middleware(middleware("gate", false, &log))
        .add_handler(handler("h", HandlerResponse::Continue, &log));

    let result = chain.handle(&text_message("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(
        *log.lock().unwrap(),
        vec!["mw_before_outer", "mw_before_gate", "mw_after_outer:Stop"]
    );
}

/// **Test: handler before returning false stops the chain; handle is not run.**
#[tokio::test]
async fn test_handler_before_stops_chain() {
    struct BlockingHandler;

    #[async_trait]
    impl Handler for BlockingHandler {
        async fn before(&self, _message: &Message) -> botkit_core::Result<bool> {
            Ok(false)
        }
    }

    let calls = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(BlockingHandler))
        .add_handler(Arc::new(CountingHandler { calls: calls.clone() }));

    let result = chain.handle(&text_message("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

/// **Test: Reply stops the handle phase and reaches middleware after.**
#[tokio::test]
async fn test_reply_stops_chain_and_passes_to_after() {
    let log: Log = Arc::default();
    let chain = HandlerChain::new()
        .add_middleware(middleware("m", true, &log))
        .add_handler(handler("reply", HandlerResponse::Reply("pong".into()), &log))
        .add_handler(handler("never", HandlerResponse::Continue, &log));

    let result = chain.handle(&text_message("/ping")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("pong".into()));
    let log = log.lock().unwrap();
    assert!(!log.contains(&"handle_never".to_string()));
    assert!(log.contains(&"mw_after_m:Reply(\"pong\")".to_string()));
}

/// **Test: Ignore moves on to the next handler.**
#[tokio::test]
async fn test_ignore_continues_to_next_handler() {
    let log: Log = Arc::default();
    let chain = HandlerChain::new()
        .add_handler(handler("skip", HandlerResponse::Ignore, &log))
        .add_handler(handler("stop", HandlerResponse::Stop, &log));

    let result = chain.handle(&text_message("x")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert!(log.lock().unwrap().contains(&"handle_stop".to_string()));
}

/// **Test: a command-filtered handler is skipped for other text, including its hooks.**
#[tokio::test]
async fn test_filtered_handler_skipped() {
    let log: Log = Arc::default();
    let chain = HandlerChain::new()
        .add_handler(on_command("ping", handler("ping", HandlerResponse::Stop, &log)));

    let result = chain.handle(&text_message("hello")).await.unwrap();
    assert_eq!(result, HandlerResponse::Continue);
    assert!(log.lock().unwrap().is_empty());

    let result = chain.handle(&text_message("/ping")).await.unwrap();
    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(
        *log.lock().unwrap(),
        vec!["before_ping", "handle_ping", "after_ping"]
    );
}

/// **Test: errors propagate out of an unguarded chain.**
#[tokio::test]
async fn test_error_propagates_without_boundary() {
    let calls = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new().add_handler(Arc::new(FailingHandler { calls: calls.clone() }));

    let result = chain.handle(&text_message("x")).await;

    assert!(matches!(
        result,
        Err(BotkitError::Handler(HandlerError::Failed(_)))
    ));
}

/// **Test: a failing handler still unwinds entered middleware with Stop.**
#[tokio::test]
async fn test_error_runs_middleware_after_with_stop() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let calls = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_middleware(middleware("outer", true, &log))
        .add_middleware(middleware("inner", true, &log))
        .add_handler(Arc::new(FailingHandler { calls: calls.clone() }));

    let result = chain.handle(&text_message("x")).await;

    assert!(result.is_err());
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "mw_before_outer",
            "mw_before_inner",
            "mw_after_inner:Stop",
            "mw_after_outer:Stop",
        ]
    );
}

/// **Test: a resuming boundary apologises and lets later handlers run.**
#[tokio::test]
async fn test_boundary_resume() {
    let bot = MockBot::new();
    let failing = Arc::new(AtomicUsize::new(0));
    let after = Arc::new(AtomicUsize::new(0));

    let guarded = HandlerChain::new().add_handler(Arc::new(FailingHandler { calls: failing.clone() }));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(ErrorBoundary::new(guarded, bot.clone(), ErrorPolicy::Resume)))
        .add_handler(Arc::new(CountingHandler { calls: after.clone() }));

    let result = chain.handle(&text_message("x")).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert_eq!(failing.load(Ordering::SeqCst), 1);
    assert_eq!(after.load(Ordering::SeqCst), 1);
    assert_eq!(bot.texts(), vec![DEFAULT_APOLOGY.to_string()]);
}

/// **Test: a halting boundary apologises and stops the outer chain.**
#[tokio::test]
async fn test_boundary_halt_with_custom_apology() {
    let bot = MockBot::new();
    let after = Arc::new(AtomicUsize::new(0));

    let guarded = HandlerChain::new().add_handler(Arc::new(FailingHandler {
        calls: Arc::new(AtomicUsize::new(0)),
    }));
    let boundary = ErrorBoundary::new(guarded, bot.clone(), ErrorPolicy::Halt).with_apology("Oops.");
    let chain = HandlerChain::new()
        .add_handler(Arc::new(boundary))
        .add_handler(Arc::new(CountingHandler { calls: after.clone() }));

    let result = chain.handle(&text_message("x")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(after.load(Ordering::SeqCst), 0);
    assert_eq!(bot.last_text().as_deref(), Some("Oops."));
}

/// **Test: a failed apology send is swallowed by the boundary.**
#[tokio::test]
async fn test_boundary_survives_failed_apology() {
    let bot = MockBot::failing(1);
    let guarded = HandlerChain::new().add_handler(Arc::new(FailingHandler {
        calls: Arc::new(AtomicUsize::new(0)),
    }));
    let chain = HandlerChain::new().add_handler(Arc::new(ErrorBoundary::new(
        guarded,
        bot.clone(),
        ErrorPolicy::Halt,
    )));

    let result = chain.handle(&text_message("x")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert!(bot.texts().is_empty());
}
