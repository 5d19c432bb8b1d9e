mod support;

use std::time::Duration;

use nerkh_server::scheduler::{start_poller, CRYPTO_DATA_KEY, LATEST_DATA_KEY};
use nerkh_server::build_state;

use support::{spawn_bonbast_mock, spawn_wallex_mock, test_config};

#[tokio::test]
async fn poller_populates_cache_and_stops() {
    let (bonbast_url, _) = spawn_bonbast_mock().await;
    let crypto_url = spawn_wallex_mock(None).await;
    let config = test_config(bonbast_url, crypto_url);
    let state = build_state(&config);

    let handle = start_poller(state.clone(), config.poll_interval);

    let mut warmed = false;
    for _ in 0..200 {
        if state.cache.get(LATEST_DATA_KEY).await.is_some()
            && state.cache.get(CRYPTO_DATA_KEY).await.is_some()
        {
            warmed = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(warmed, "poller never populated the cache");

    handle.shutdown();
    tokio::time::timeout(Duration::from_secs(5), handle.join())
        .await
        .expect("poller did not stop after shutdown");
}

#[tokio::test]
async fn poller_survives_failed_cycles() {
    // Nothing listens on these addresses; every cycle fails.
    let config = test_config(
        "http://127.0.0.1:9".to_string(),
        "http://127.0.0.1:9/v1/markets".to_string(),
    );
    let state = build_state(&config);

    let handle = start_poller(state.clone(), Duration::from_millis(10));
    tokio::time::sleep(Duration::from_millis(60)).await;

    assert!(state.cache.get(LATEST_DATA_KEY).await.is_none());
    assert!(state.cache.get(CRYPTO_DATA_KEY).await.is_none());

    // The loop is still alive and responsive to the stop signal.
    handle.shutdown();
    tokio::time::timeout(Duration::from_secs(5), handle.join())
        .await
        .expect("poller did not stop after shutdown");
}
