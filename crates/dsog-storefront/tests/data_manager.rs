//! Product loading through the data manager: caching, sharing and fallback.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{mens_catalog, storefront, Reply, ScriptedGateway};
use dsog_storefront::CatalogSource;

#[tokio::test(start_paused = true)]
async fn concurrent_requests_share_one_fetch() {
    let gateway = Arc::new(
        ScriptedGateway::new()
            .with_delay(Duration::from_millis(50))
            .reply("mens", Reply::Products(mens_catalog())),
    );
    let storefront = storefront(gateway.clone());
    let data = &storefront.context().data;

    let (first, second) = tokio::join!(data.get_products("mens"), data.get_products("mens"));

    assert_eq!(gateway.calls("mens"), 1);
    assert_eq!(first.source, CatalogSource::Network);
    assert_eq!(second.source, CatalogSource::Shared);
    assert_eq!(first.products, second.products);
    assert_eq!(first.products.len(), 3);
    assert!(!data.is_loading("mens"));
}

#[tokio::test(start_paused = true)]
async fn many_waiters_released_by_one_fetch() {
    let gateway = Arc::new(
        ScriptedGateway::new()
            .with_delay(Duration::from_millis(200))
            .reply("kids", Reply::Products(mens_catalog())),
    );
    let storefront = storefront(gateway.clone());

    let loads = (0..8).map(|_| storefront.context().data.get_products("kids"));
    let results = futures::future::join_all(loads).await;

    assert_eq!(gateway.calls("kids"), 1);
    let shared = results
        .iter()
        .filter(|r| r.source == CatalogSource::Shared)
        .count();
    assert_eq!(shared, 7);
    assert!(results.iter().all(|r| r.products.len() == 3));
}

#[tokio::test(start_paused = true)]
async fn distinct_collections_fetch_independently() {
    let gateway = Arc::new(
        ScriptedGateway::new()
            .with_delay(Duration::from_millis(50))
            .with_default(Reply::Products(mens_catalog())),
    );
    let storefront = storefront(gateway.clone());
    let data = &storefront.context().data;

    let (mens, womens) = tokio::join!(data.get_products("mens"), data.get_products("womens"));

    assert_eq!(mens.source, CatalogSource::Network);
    assert_eq!(womens.source, CatalogSource::Network);
    assert_eq!(gateway.calls("mens"), 1);
    assert_eq!(gateway.calls("womens"), 1);
}

#[tokio::test(start_paused = true)]
async fn cached_until_ttl_elapses() {
    let gateway = Arc::new(ScriptedGateway::new().reply("mens", Reply::Products(mens_catalog())));
    let storefront = storefront(gateway.clone());
    let data = &storefront.context().data;

    assert_eq!(data.get_products("mens").await.source, CatalogSource::Network);

    tokio::time::advance(Duration::from_secs(299)).await;
    assert_eq!(data.get_products("mens").await.source, CatalogSource::Cache);
    assert_eq!(gateway.calls("mens"), 1);

    tokio::time::advance(Duration::from_secs(2)).await;
    assert_eq!(data.get_products("mens").await.source, CatalogSource::Network);
    assert_eq!(gateway.calls("mens"), 2);
}

#[tokio::test]
async fn clear_cache_forces_refetch() {
    let gateway = Arc::new(ScriptedGateway::new().reply("mens", Reply::Products(mens_catalog())));
    let storefront = storefront(gateway.clone());

    storefront.context().data.get_products("mens").await;
    storefront.clear_cache();
    let again = storefront.context().data.get_products("mens").await;

    assert_eq!(again.source, CatalogSource::Network);
    assert_eq!(gateway.calls("mens"), 2);
}

#[tokio::test]
async fn unreachable_endpoint_serves_uncached_fallback() {
    let gateway = Arc::new(ScriptedGateway::new().with_default(Reply::Down));
    let storefront = storefront(gateway.clone());
    let data = &storefront.context().data;

    let first = data.get_products("mens").await;
    assert_eq!(first.source, CatalogSource::Fallback);
    let names: Vec<&str> = first.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Premium Hoodie", "Designer T-Shirt"]);

    let second = data.get_products("mens").await;
    assert_eq!(second.source, CatalogSource::Fallback);
    assert_eq!(gateway.calls("mens"), 2);
}

#[tokio::test]
async fn recovers_once_endpoint_returns() {
    let gateway = Arc::new(ScriptedGateway::new().with_default(Reply::Down));
    let storefront = storefront(gateway.clone());
    let data = &storefront.context().data;

    assert_eq!(data.get_products("kids").await.source, CatalogSource::Fallback);

    gateway.set_reply("kids", Reply::Products(mens_catalog()));
    let loaded = data.get_products("kids").await;
    assert_eq!(loaded.source, CatalogSource::Network);
    assert_eq!(loaded.products[0].name, "Street Hoodie");
}

#[tokio::test]
async fn unknown_collection_falls_back_to_default_list() {
    let gateway = Arc::new(ScriptedGateway::new().with_default(Reply::Down));
    let storefront = storefront(gateway);

    let loaded = storefront.context().data.get_products("gifts").await;
    assert_eq!(loaded.source, CatalogSource::Fallback);
    assert_eq!(loaded.products[0].name, "Premium Hoodie");
}

#[tokio::test]
async fn bad_responses_serve_fallback() {
    let gateway = Arc::new(
        ScriptedGateway::new()
            .reply("mens", Reply::Raw(500, "Internal Server Error"))
            .reply("womens", Reply::Raw(200, "<html>not json</html>"))
            .reply("kids", Reply::Raw(200, r#"{"success": false, "error": "Sheet not found"}"#))
            .reply("gifts", Reply::Raw(200, r#"{"success": true}"#)),
    );
    let storefront = storefront(gateway.clone());
    let data = &storefront.context().data;

    for collection in ["mens", "womens", "kids", "gifts"] {
        let loaded = data.get_products(collection).await;
        assert_eq!(loaded.source, CatalogSource::Fallback, "{collection}");
        assert!(!loaded.products.is_empty());
        assert!(!data.is_loading(collection));
    }

    let womens = data.get_products("womens").await;
    assert_eq!(womens.products[0].name, "Elegant Dress");
}

#[tokio::test(start_paused = true)]
async fn waiters_give_up_after_wait_limit() {
    // The default wait limit is 10s; this fetch takes 30s.
    let gateway = Arc::new(
        ScriptedGateway::new()
            .with_delay(Duration::from_secs(30))
            .reply("mens", Reply::Products(mens_catalog())),
    );
    let storefront = storefront(gateway.clone());
    let data = &storefront.context().data;

    let (leader, waiter) = tokio::join!(data.get_products("mens"), data.get_products("mens"));

    assert_eq!(waiter.source, CatalogSource::Fallback);
    assert_eq!(waiter.products.len(), 2);
    assert_eq!(leader.source, CatalogSource::Network);
    assert_eq!(gateway.calls("mens"), 1);

    // The slow fetch still populated the cache.
    assert_eq!(data.get_products("mens").await.source, CatalogSource::Cache);
}

#[tokio::test(start_paused = true)]
async fn waiters_fall_back_when_fetch_fails() {
    let gateway = Arc::new(
        ScriptedGateway::new()
            .with_delay(Duration::from_millis(50))
            .with_default(Reply::Down),
    );
    let storefront = storefront(gateway.clone());
    let data = &storefront.context().data;

    let (leader, waiter) = tokio::join!(data.get_products("womens"), data.get_products("womens"));

    assert_eq!(leader.source, CatalogSource::Fallback);
    assert_eq!(waiter.source, CatalogSource::Fallback);
    assert_eq!(waiter.products, leader.products);
    assert_eq!(gateway.calls("womens"), 1);
}

#[tokio::test(start_paused = true)]
async fn abandoned_fetch_releases_waiters() {
    let gateway = Arc::new(
        ScriptedGateway::new()
            .with_delay(Duration::from_secs(5))
            .reply("kids", Reply::Products(mens_catalog())),
    );
    let storefront = storefront(gateway.clone());

    let leader = {
        let storefront = storefront.clone();
        tokio::spawn(async move { storefront.context().data.get_products("kids").await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(storefront.context().data.is_loading("kids"));

    let waiter = {
        let storefront = storefront.clone();
        tokio::spawn(async move { storefront.context().data.get_products("kids").await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    leader.abort();

    let waited = waiter.await.unwrap();
    assert_eq!(waited.source, CatalogSource::Fallback);
    assert!(!storefront.context().data.is_loading("kids"));
}
