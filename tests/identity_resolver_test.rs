// ABOUTME: Integration tests for the single-flight identity resolver
// ABOUTME: Covers concurrent callers sharing one fetch, failure reset, and invalidation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use common::{init_test_logging, test_identity, MockProvider, TEST_ATHLETE_ID};
use futures_util::future::join_all;
use peaks_mcp_server::errors::ErrorCode;
use peaks_mcp_server::identity::IdentityResolver;

const CONCURRENT_CALLERS: usize = 16;

fn resolver_over(provider: &Arc<MockProvider>) -> Arc<IdentityResolver> {
    Arc::new(IdentityResolver::new(Arc::clone(provider)))
}

#[tokio::test]
async fn test_concurrent_callers_share_one_fetch() -> Result<()> {
    init_test_logging();
    let provider = Arc::new(MockProvider::new().with_profile_delay(Duration::from_millis(50)));
    let resolver = resolver_over(&provider);

    let calls = (0..CONCURRENT_CALLERS).map(|_| {
        let resolver = Arc::clone(&resolver);
        tokio::spawn(async move { resolver.get_identity().await })
    });
    let results = join_all(calls).await;

    assert_eq!(provider.profile_fetch_count(), 1);
    for joined in results {
        assert_eq!(joined??, test_identity());
    }
    assert!(resolver.is_resolved().await);
    Ok(())
}

#[tokio::test]
async fn test_resolved_identity_is_cached() -> Result<()> {
    init_test_logging();
    let provider = Arc::new(MockProvider::new());
    let resolver = resolver_over(&provider);

    assert_eq!(resolver.get_athlete_id().await?, TEST_ATHLETE_ID);
    assert_eq!(resolver.get_athlete_id().await?, TEST_ATHLETE_ID);
    assert_eq!(resolver.get_identity().await?.email, "rider@example.com");

    assert_eq!(provider.profile_fetch_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_failure_is_shared_then_retried() -> Result<()> {
    init_test_logging();
    let provider = Arc::new(
        MockProvider::new()
            .with_profile_delay(Duration::from_millis(30))
            .with_profile_failures(1),
    );
    let resolver = resolver_over(&provider);

    let calls = (0..4).map(|_| {
        let resolver = Arc::clone(&resolver);
        tokio::spawn(async move { resolver.get_identity().await })
    });
    for joined in join_all(calls).await {
        let error = joined?.unwrap_err();
        assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
        assert_eq!(error.message, "profile service down");
    }
    assert_eq!(provider.profile_fetch_count(), 1);
    assert!(!resolver.is_resolved().await);

    assert_eq!(resolver.get_identity().await?, test_identity());
    assert_eq!(provider.profile_fetch_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_invalidate_forces_refetch() -> Result<()> {
    init_test_logging();
    let provider = Arc::new(MockProvider::new());
    let resolver = resolver_over(&provider);

    resolver.get_identity().await?;
    resolver.invalidate().await;
    assert!(!resolver.is_resolved().await);

    resolver.get_identity().await?;
    assert_eq!(provider.profile_fetch_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_invalidate_during_fetch_discards_result() -> Result<()> {
    init_test_logging();
    let provider = Arc::new(MockProvider::new().with_profile_delay(Duration::from_millis(50)));
    let resolver = resolver_over(&provider);

    let in_flight = {
        let resolver = Arc::clone(&resolver);
        tokio::spawn(async move { resolver.get_identity().await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    resolver.invalidate().await;

    // The caller still gets its value, but it is not cached
    assert_eq!(in_flight.await??, test_identity());
    assert!(!resolver.is_resolved().await);

    resolver.get_identity().await?;
    assert_eq!(provider.profile_fetch_count(), 2);
    Ok(())
}
