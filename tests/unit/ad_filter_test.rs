use genbrowser::headless::HeadlessRequest;
use genbrowser::services::ad_filter::AdFilter;
use genbrowser::types::settings::BrowserConfig;
use rstest::rstest;

#[rstest]
#[case("https://ads.google.com/pixel.gif", true)]
#[case("https://static.doubleclick.net/instream/ad_status.js", true)]
#[case("https://tpc.googlesyndication.com/simgad/1", true)]
#[case("https://ib.adnxs.com/ut/v3", true)]
#[case("https://www.google.com/search?q=ads.google.com", false)]
#[case("https://example.com/", false)]
#[case("http://ADS.GOOGLE.COM/upper", true)]
fn test_default_rules(#[case] url: &str, #[case] blocked: bool) {
    let filter = AdFilter::default();
    assert_eq!(filter.should_block(url), blocked, "{}", url);
}

#[rstest]
#[case("not a url")]
#[case("")]
#[case("about:blank")]
#[case("data:text/html,<p>doubleclick.net</p>")]
fn test_hostless_or_unparseable_urls_pass(#[case] url: &str) {
    assert!(!AdFilter::default().should_block(url));
}

#[rstest]
#[case("sub.doubleclick.net", true)]
#[case("doubleclick.net", true)]
#[case("example.com", false)]
#[case("", false)]
fn test_is_blocked_hosts(#[case] host: &str, #[case] blocked: bool) {
    assert_eq!(AdFilter::default().is_blocked(host), blocked);
}

#[test]
fn test_substring_match_includes_subdomains() {
    let filter = AdFilter::new(["tracker.example"]);
    assert!(filter.is_blocked("cdn.tracker.example"));
    assert!(filter.is_blocked("tracker.example.org"));
    assert!(!filter.is_blocked("example.org"));
}

#[test]
fn test_rules_are_normalized() {
    let filter = AdFilter::new(["  Ads.Example ", "", "   "]);
    assert_eq!(filter.rules(), ["ads.example".to_string()]);
    assert!(!filter.is_blocked("anything.else"));
}

#[test]
fn test_empty_rule_set_blocks_nothing() {
    let filter = AdFilter::new(Vec::<String>::new());
    assert!(!filter.should_block("https://ads.google.com/"));
}

#[test]
fn test_from_config_uses_configured_hosts() {
    let config = BrowserConfig {
        ad_hosts: vec!["evil.example".into()],
        ..BrowserConfig::default()
    };
    let filter = AdFilter::from_config(&config);
    assert!(filter.should_block("https://x.evil.example/a"));
    assert!(!filter.should_block("https://ads.google.com/"));
}

#[test]
fn test_intercept_blocks_and_counts() {
    let filter = AdFilter::default();
    let mut ad = HeadlessRequest::new("https://ads.google.com/x");
    let mut page = HeadlessRequest::new("https://example.com/");

    assert!(filter.intercept_request(&mut ad));
    assert!(ad.blocked);
    assert!(!filter.intercept_request(&mut page));
    assert!(!page.blocked);
    assert_eq!(filter.blocked_count(), 1);
}

#[test]
fn test_should_block_does_not_count() {
    let filter = AdFilter::default();
    assert!(filter.should_block("https://ads.google.com/popup"));
    assert_eq!(filter.blocked_count(), 0);

    let mut popup = HeadlessRequest::new("https://ads.google.com/popup");
    assert!(filter.intercept_request(&mut popup));
    assert!(popup.blocked);
    assert_eq!(filter.blocked_count(), 1);
}
