//! Cache wiring from resolved settings and default entry lifetime.

use basecamp_cache::{CacheBackend, CacheClient, CacheConfig, DEFAULT_TTL, shared_cache};
use basecamp_config::{LoadedEnv, Settings};
use std::time::Duration;

fn client_for(pairs: &[(&str, &str)]) -> CacheClient {
    let env = LoadedEnv::from_pairs(pairs.iter().copied());
    let settings = Settings::from_env(&env).unwrap();
    CacheClient::from_settings(&settings).unwrap()
}

#[test]
fn fallback_url_when_unset() {
    let cache = client_for(&[]);
    assert_eq!(cache.url(), "redis://localhost:6379");
    assert_eq!(cache.backend(), CacheBackend::Redis);
    assert_eq!(cache.default_ttl(), Duration::from_millis(60_000));
}

#[test]
fn configured_url_is_used() {
    let cache = client_for(&[("REDIS_URL", "memory://")]);
    assert_eq!(cache.url(), "memory://");
    assert_eq!(cache.backend(), CacheBackend::Memory);
}

#[tokio::test(start_paused = true)]
async fn entry_without_ttl_expires_after_sixty_seconds() {
    let cache = client_for(&[("REDIS_URL", "memory://")]);
    cache.set_json("session:1", &"payload").await.unwrap();

    tokio::time::advance(DEFAULT_TTL - Duration::from_millis(1)).await;
    let early: Option<String> = cache.get_json("session:1").await.unwrap();
    assert_eq!(early.as_deref(), Some("payload"));

    tokio::time::advance(Duration::from_millis(1)).await;
    let late: Option<String> = cache.get_json("session:1").await.unwrap();
    assert_eq!(late, None);
}

#[tokio::test(start_paused = true)]
async fn caller_ttl_overrides_default() {
    let cache = CacheClient::connect(CacheConfig::memory()).unwrap();
    cache
        .set_raw_with_ttl("short", "x", Duration::from_millis(500))
        .await
        .unwrap();
    cache
        .set_json_with_ttl("long", &1_u32, Duration::from_secs(120))
        .await
        .unwrap();

    tokio::time::advance(Duration::from_millis(500)).await;
    assert!(!cache.exists("short").await.unwrap());

    tokio::time::advance(DEFAULT_TTL).await;
    assert_eq!(cache.get_json::<u32>("long").await.unwrap(), Some(1));
}

#[tokio::test]
async fn shared_handle_serves_concurrent_tasks() {
    let cache = shared_cache(CacheClient::connect(CacheConfig::memory()).unwrap());

    let mut handles = Vec::new();
    for i in 0..16_u32 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            cache.set_json(&format!("k:{i}"), &i).await.unwrap();
            cache.get_json::<u32>(&format!("k:{i}")).await.unwrap()
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.await.unwrap(), Some(u32::try_from(i).unwrap()));
    }
}
