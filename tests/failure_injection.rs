//! Failure injection tests: every upstream failure is a single 500.

mod common;

use common::{client, proxy_config, refused_addr, start_proxy, start_upstream, MockResponse, APPSCODE};

#[tokio::test]
async fn test_connection_refused_is_500_on_every_proxied_route() {
    let upstream = refused_addr().await;
    let (proxy, shutdown) = start_proxy(proxy_config(upstream, APPSCODE)).await;
    let client = client();

    for path in [
        "/v2/",
        "/token?scope=repository:appscode/nginx:pull",
        "/v2/appscode/nginx/tags/list",
        "/v2/appscode/nginx/manifests/latest",
    ] {
        let res = client
            .get(format!("http://{proxy}{path}"))
            .send()
            .await
            .expect("Proxy unreachable");

        assert_eq!(res.status(), 500, "{path}");
        assert!(res.headers().get("www-authenticate").is_none(), "{path}");
        assert!(res.headers().get("link").is_none(), "{path}");
        assert!(res.headers().get("x-redirected").is_some(), "{path}");
        let body = res.text().await.unwrap();
        assert!(!body.is_empty(), "{path}: empty error body");
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_undecodable_tag_list_is_500() {
    let (upstream, _seen) = start_upstream(|_| {
        MockResponse::new(200, "<html>not json</html>")
            .header("Content-Type", "text/html")
            .header("Link", r#"</v2/appscode-images/nginx/tags/list?n=1>; rel="next""#)
    })
    .await;
    let (proxy, shutdown) = start_proxy(proxy_config(upstream, APPSCODE)).await;

    let res = client()
        .get(format!("http://{proxy}/v2/appscode/nginx/tags/list"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    assert!(res.headers().get("link").is_none());
    assert_ne!(res.headers().get("content-type").unwrap(), "text/html");
    let body = res.text().await.unwrap();
    assert!(body.starts_with("decoding list response"), "{body}");

    shutdown.trigger();
}

#[tokio::test]
async fn test_wrong_shape_tag_list_is_500() {
    let (upstream, _seen) = start_upstream(|_| MockResponse::new(200, "42")).await;
    let (proxy, shutdown) = start_proxy(proxy_config(upstream, APPSCODE)).await;

    let res = client()
        .get(format!("http://{proxy}/v2/kubedb/mysql/tags/list"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    assert!(!res.text().await.unwrap().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_no_retry_after_failure() {
    let (upstream, mut seen) = start_upstream(|_| MockResponse::new(200, "garbage")).await;
    let (proxy, shutdown) = start_proxy(proxy_config(upstream, APPSCODE)).await;

    let res = client()
        .get(format!("http://{proxy}/v2/appscode/nginx/tags/list"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 500);

    assert!(seen.recv().await.is_some());
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert!(seen.try_recv().is_err(), "upstream must be called exactly once");

    shutdown.trigger();
}
