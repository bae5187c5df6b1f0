use crate::config::{Config, ConversionProfile, ScanPolicy};
use crate::twitter::{clamp_page_size, SocialClient, TwitterClient};

fn client_config(dry_run: bool) -> Config {
    Config {
        twitter_bearer_token: "test-token".to_string(),
        twitter_access_token: "test-token".to_string(),
        target_handle: "SummerhillRain".to_string(),
        bot_handle: "MetricMartin".to_string(),
        fetch_limit: 100,
        profile: ConversionProfile::millimeters(),
        scan_policy: ScanPolicy::ExhaustiveOldestFirst,
        dry_run,
        run_interval_hours: 0,
        webhook_port: 8080,
        webhook_secret: None,
    }
}

#[tokio::test]
async fn test_dry_run_logs_instead_of_sending() {
    // With DRY_RUN set the client returns before building a request, so
    // this succeeds without any network access. A regression that sends
    // for real would fail here on the bogus token and unreachable API.
    let client = TwitterClient::new(&client_config(true));
    client
        .post_reply("t1", "@SummerhillRain 25.4 mm \n")
        .await
        .unwrap();
}

#[test]
fn test_page_size_clamped_to_endpoint_range() {
    assert_eq!(clamp_page_size(5), 10);
    assert_eq!(clamp_page_size(10), 10);
    assert_eq!(clamp_page_size(42), 42);
    assert_eq!(clamp_page_size(100), 100);
    assert_eq!(clamp_page_size(250), 100);
}
