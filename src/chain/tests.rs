//! Tests for chain dispatch.

#[cfg(test)]
mod chain_tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use crate::chain::path::{chain_segments, pair_at};
    use crate::chain::{ChainDispatcher, ChainFlow, HandlerRegistry};
    use crate::parser::{HttpRequest, HttpVersion, Method};
    use crate::server::{Error, StatusCode};

    fn request(path: &str) -> HttpRequest {
        let mut headers = HashMap::new();
        headers.insert("host".to_string(), "localhost".to_string());
        HttpRequest::new(Method::GET, path.to_string(), HttpVersion::Http11, headers)
    }

    /// (key, value, position) triples recorded by handlers registered with
    /// `register_recorder`.
    type Calls = Arc<Mutex<Vec<(String, String, usize)>>>;

    async fn register_recorder(registry: &HandlerRegistry, name: &str, calls: &Calls) {
        let calls = Arc::clone(calls);
        registry
            .register(name, move |hop, response| {
                let calls = Arc::clone(&calls);
                async move {
                    calls
                        .lock()
                        .unwrap()
                        .push((hop.key.clone(), hop.value.clone(), hop.position));
                    Ok(ChainFlow::Continue(response))
                }
            })
            .await;
    }

    async fn recording_registry() -> (Arc<HandlerRegistry>, Calls) {
        let registry = Arc::new(HandlerRegistry::new());
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        for name in ["a", "b", "c"] {
            register_recorder(&registry, name, &calls).await;
        }
        (registry, calls)
    }

    #[test]
    fn test_chain_segments_boundaries() {
        assert!(chain_segments("/").is_empty());
        assert!(chain_segments("").is_empty());
        assert_eq!(chain_segments("/status/206"), vec!["status", "206"]);
        assert_eq!(
            chain_segments("/status/206/delay/2"),
            vec!["status", "206", "delay", "2"]
        );
        // Query strings never reach the pair arithmetic
        assert_eq!(chain_segments("/status/206?x=1"), vec!["status", "206"]);
        assert!(chain_segments("/?x=1").is_empty());
        // A trailing slash shows up as a trailing empty segment
        assert_eq!(chain_segments("/status/206/"), vec!["status", "206", ""]);
    }

    #[test]
    fn test_pair_at_offsets() {
        let segments = chain_segments("/a/1/b/2/c/3");
        assert_eq!(pair_at(&segments, 0), Some(("a", "1")));
        assert_eq!(pair_at(&segments, 1), Some(("b", "2")));
        assert_eq!(pair_at(&segments, 2), Some(("c", "3")));
        assert_eq!(pair_at(&segments, 3), None);

        // A dangling key never forms a pair
        let truncated = chain_segments("/a/1/b");
        assert_eq!(pair_at(&truncated, 0), Some(("a", "1")));
        assert_eq!(pair_at(&truncated, 1), None);

        assert_eq!(pair_at(&[], 0), None);
    }

    #[tokio::test]
    async fn test_handlers_run_in_path_order() {
        let (registry, calls) = recording_registry().await;
        let dispatcher = ChainDispatcher::new(registry);

        let response = dispatcher.dispatch(request("/a/1/b/2/c/3")).await.unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                ("a".to_string(), "1".to_string(), 0),
                ("b".to_string(), "2".to_string(), 1),
                ("c".to_string(), "3".to_string(), 2),
            ]
        );
    }

    #[tokio::test]
    async fn test_chain_stops_at_first_unregistered_key() {
        let (registry, calls) = recording_registry().await;
        let dispatcher = ChainDispatcher::new(registry);

        // "b" is registered but sits behind an unknown key, so it never runs
        dispatcher
            .dispatch(request("/a/1/unknown/2/b/3"))
            .await
            .unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            vec![("a".to_string(), "1".to_string(), 0)]
        );
    }

    #[tokio::test]
    async fn test_root_path_serves_fallback() {
        let (registry, calls) = recording_registry().await;
        let dispatcher = ChainDispatcher::new(registry);

        let response = dispatcher.dispatch(request("/")).await.unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, b"OK");
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_first_key_serves_fallback() {
        let (registry, calls) = recording_registry().await;
        let dispatcher = ChainDispatcher::new(registry);

        let response = dispatcher.dispatch(request("/unknownkey/foo")).await.unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, b"OK");
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_first_segment_serves_fallback() {
        let (registry, calls) = recording_registry().await;
        let dispatcher = ChainDispatcher::new(registry);

        let response = dispatcher.dispatch(request("//a/1")).await.unwrap();

        assert_eq!(response.body, b"OK");
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dangling_first_key_serves_fallback() {
        let (registry, calls) = recording_registry().await;
        let dispatcher = ChainDispatcher::new(registry);

        // A first key with no value: no hop can run, so the fallback answers
        let response = dispatcher.dispatch(request("/a")).await.unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, b"OK");
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_trailing_dangling_key_ends_chain_silently() {
        let (registry, calls) = recording_registry().await;
        let dispatcher = ChainDispatcher::new(registry);

        dispatcher.dispatch(request("/a/1/b")).await.unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            vec![("a".to_string(), "1".to_string(), 0)]
        );
    }

    #[tokio::test]
    async fn test_status_sets_response_code() {
        let dispatcher = ChainDispatcher::new(Arc::new(HandlerRegistry::with_defaults()));

        let response = dispatcher.dispatch(request("/status/206")).await.unwrap();

        assert_eq!(response.status.as_u16(), 206);
    }

    #[tokio::test]
    async fn test_status_with_garbage_value_defaults_to_200() {
        let dispatcher = ChainDispatcher::new(Arc::new(HandlerRegistry::with_defaults()));

        let response = dispatcher.dispatch(request("/status/abc")).await.unwrap();

        assert_eq!(response.status.as_u16(), 200);
    }

    #[tokio::test]
    async fn test_status_out_of_range_defaults_to_200() {
        let dispatcher = ChainDispatcher::new(Arc::new(HandlerRegistry::with_defaults()));

        let response = dispatcher.dispatch(request("/status/9999")).await.unwrap();

        assert_eq!(response.status.as_u16(), 200);
    }

    #[tokio::test]
    async fn test_delay_zero_returns_quickly() {
        let dispatcher = ChainDispatcher::new(Arc::new(HandlerRegistry::with_defaults()));

        let start = Instant::now();
        dispatcher.dispatch(request("/delay/0")).await.unwrap();

        assert!(start.elapsed() < Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_delay_with_garbage_value_behaves_as_zero() {
        let dispatcher = ChainDispatcher::new(Arc::new(HandlerRegistry::with_defaults()));

        let start = Instant::now();
        dispatcher.dispatch(request("/delay/abc")).await.unwrap();

        assert!(start.elapsed() < Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_status_then_delay_end_to_end() {
        let dispatcher = ChainDispatcher::new(Arc::new(HandlerRegistry::with_defaults()));

        let start = Instant::now();
        let response = dispatcher
            .dispatch(request("/status/201/delay/0"))
            .await
            .unwrap();

        assert_eq!(response.status.as_u16(), 201);
        assert!(response.body.is_empty());
        assert!(start.elapsed() < Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_query_string_is_ignored() {
        let dispatcher = ChainDispatcher::new(Arc::new(HandlerRegistry::with_defaults()));

        let response = dispatcher
            .dispatch(request("/status/206?code=500"))
            .await
            .unwrap();

        assert_eq!(response.status.as_u16(), 206);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_chains_do_not_share_position() {
        let registry = Arc::new(HandlerRegistry::with_defaults());
        let dispatcher = Arc::new(ChainDispatcher::new(registry));

        let slow = tokio::spawn({
            let dispatcher = Arc::clone(&dispatcher);
            async move { dispatcher.dispatch(request("/status/500/delay/1")).await }
        });
        let fast = tokio::spawn({
            let dispatcher = Arc::clone(&dispatcher);
            async move { dispatcher.dispatch(request("/status/200")).await }
        });

        let slow = slow.await.unwrap().unwrap();
        let fast = fast.await.unwrap().unwrap();

        assert_eq!(slow.status.as_u16(), 500);
        assert_eq!(fast.status.as_u16(), 200);
    }

    #[tokio::test]
    async fn test_runtime_registration_becomes_visible() {
        let registry = Arc::new(HandlerRegistry::new());
        let dispatcher = ChainDispatcher::new(Arc::clone(&registry));

        // Before registration: unknown entry point, fallback
        let response = dispatcher.dispatch(request("/hello/world")).await.unwrap();
        assert_eq!(response.body, b"OK");

        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        register_recorder(&registry, "hello", &calls).await;

        dispatcher.dispatch(request("/hello/world")).await.unwrap();
        assert_eq!(
            *calls.lock().unwrap(),
            vec![("hello".to_string(), "world".to_string(), 0)]
        );
    }

    #[tokio::test]
    async fn test_reregistration_replaces_handler() {
        let registry = Arc::new(HandlerRegistry::new());
        registry
            .register("mark", |_hop, response| async move {
                Ok(ChainFlow::Continue(response.with_body_string("old")))
            })
            .await;
        registry
            .register("mark", |_hop, response| async move {
                Ok(ChainFlow::Continue(response.with_body_string("new")))
            })
            .await;

        let dispatcher = ChainDispatcher::new(registry);
        let response = dispatcher.dispatch(request("/mark/x")).await.unwrap();

        assert_eq!(response.body, b"new");
    }

    #[tokio::test]
    async fn test_final_flow_stops_the_chain() {
        let registry = Arc::new(HandlerRegistry::with_defaults());
        registry
            .register("halt", |_hop, response| async move {
                Ok(ChainFlow::Final(response.with_status(StatusCode::new(204))))
            })
            .await;

        let dispatcher = ChainDispatcher::new(registry);
        // status is registered and well-formed, but halt ends the chain first
        let response = dispatcher
            .dispatch(request("/halt/now/status/500"))
            .await
            .unwrap();

        assert_eq!(response.status.as_u16(), 204);
    }

    #[tokio::test]
    async fn test_handler_error_aborts_dispatch() {
        let registry = Arc::new(HandlerRegistry::new());
        registry
            .register("boom", |_hop, _response| async move {
                Err::<ChainFlow, Error>(Error::InternalError("boom".to_string()))
            })
            .await;

        let dispatcher = ChainDispatcher::new(registry);
        let result = dispatcher.dispatch(request("/boom/x")).await;

        assert!(matches!(result, Err(Error::InternalError(_))));
    }

    #[tokio::test]
    async fn test_handlers_see_the_request() {
        let registry = Arc::new(HandlerRegistry::new());
        registry
            .register("path", |hop, response| async move {
                let path = hop.request.path.clone();
                Ok(ChainFlow::Continue(response.with_body_string(path)))
            })
            .await;

        let dispatcher = ChainDispatcher::new(registry);
        let response = dispatcher.dispatch(request("/path/x")).await.unwrap();

        assert_eq!(response.body, b"/path/x");
    }

    #[tokio::test]
    async fn test_default_registry_lists_builtins() {
        let registry = HandlerRegistry::with_defaults();
        assert_eq!(registry.segment_names().await, vec!["delay", "status"]);

        let empty = HandlerRegistry::new();
        assert!(empty.segment_names().await.is_empty());
    }
}
