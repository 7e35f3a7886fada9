//! Adapter behavior that needs no live platform.

use pressroom_core::{Article, Media, MediaType, PlatformKind, PostContent};
use pressroom_platforms::{
    AdapterRegistry, FacebookAdapter, FacebookCredentials, FacebookEdge, LinkedInAdapter,
    LinkedInCredentials, MediumAdapter, MediumCredentials, PlatformAdapter, PlatformCredentials,
    XAdapter, XCredentials,
};

/// Nothing listens here, so requests fail at the transport level.
const UNREACHABLE: &str = "http://127.0.0.1:9";

fn x_credentials() -> XCredentials {
    XCredentials::new("key", "secret", "token", "token-secret")
}

#[tokio::test]
async fn test_unconfigured_adapters_report_not_ready() {
    let adapters: Vec<Box<dyn PlatformAdapter>> = vec![
        Box::new(XAdapter::new(None).with_base_url(UNREACHABLE)),
        Box::new(FacebookAdapter::new(None).with_base_url(UNREACHABLE)),
        Box::new(LinkedInAdapter::new(None).with_base_url(UNREACHABLE)),
        Box::new(MediumAdapter::new(None).with_base_url(UNREACHABLE)),
    ];

    for adapter in adapters {
        assert!(!adapter.is_ready());

        let outcome = adapter.publish(&PostContent::status("hello")).await;
        assert!(!outcome.success());
        let error = outcome.error().expect("error message");
        assert!(error.contains("not configured"), "{}: {}", adapter.kind(), error);

        let status = adapter.test_connection().await;
        assert!(!status.success());
        assert!(status.error().expect("error").contains("not configured"));
    }
}

#[tokio::test]
async fn test_x_rejects_long_tweet_before_network() {
    let adapter = XAdapter::new(Some(x_credentials())).with_base_url(UNREACHABLE);
    assert!(adapter.is_ready());

    let outcome = adapter.publish(&PostContent::status("a".repeat(281))).await;
    assert!(!outcome.success());
    let error = outcome.error().expect("error message");
    assert!(error.to_lowercase().contains("too long"), "{}", error);
    assert!(error.contains("Validation"), "{}", error);
}

#[tokio::test]
async fn test_network_failure_is_reported_not_raised() {
    let adapter = XAdapter::new(Some(x_credentials())).with_base_url(UNREACHABLE);
    let outcome = adapter.publish(&PostContent::status("Fits in a tweet")).await;
    assert!(!outcome.success());
    assert!(outcome.error().expect("error").starts_with("Network error"));

    let medium = MediumAdapter::new(Some(MediumCredentials::new("token", "author")))
        .with_base_url(UNREACHABLE);
    let status = medium.test_connection().await;
    assert!(!status.success());
    assert!(status.identity().is_none());
}

#[test]
fn test_facebook_routes_by_media_type() {
    let adapter = FacebookAdapter::new(Some(FacebookCredentials::new("page-token", "555")));

    let text = adapter
        .build_request(&PostContent::status("Plain update"))
        .expect("configured");
    assert_eq!(text.edge(), &FacebookEdge::Feed);
    assert_eq!(text.path(), "555/feed");
    assert_eq!(text.payload()["message"], "Plain update");
    assert_eq!(text.payload()["access_token"], "page-token");

    let image = adapter
        .build_request(&PostContent::status_with_media(
            "Look",
            Media::new("https://cdn.example.com/a.png", MediaType::Image),
        ))
        .expect("configured");
    assert_eq!(image.edge(), &FacebookEdge::Photos);
    assert_eq!(image.path(), "555/photos");
    assert_eq!(image.payload()["url"], "https://cdn.example.com/a.png");
    assert_eq!(image.payload()["caption"], "Look");
    assert!(image.payload().get("file_url").is_none());

    let video = adapter
        .build_request(&PostContent::status_with_media(
            "Watch",
            Media::new("https://cdn.example.com/clip.mp4", MediaType::Video),
        ))
        .expect("configured");
    assert_eq!(video.edge(), &FacebookEdge::Videos);
    assert!(video.path().ends_with("/videos"));
    assert_eq!(video.payload()["file_url"], "https://cdn.example.com/clip.mp4");
    assert_eq!(video.payload()["description"], "Watch");
    assert!(video.payload().get("url").is_none());
}

#[test]
fn test_facebook_build_request_requires_credentials() {
    let adapter = FacebookAdapter::new(None);
    assert!(adapter.build_request(&PostContent::status("x")).is_err());
}

#[test]
fn test_facebook_renders_article_as_text() {
    let adapter = FacebookAdapter::new(Some(FacebookCredentials::new("t", "1")));
    let article = Article::builder()
        .title("Title")
        .body("Body")
        .build()
        .expect("valid article");
    let request = adapter
        .build_request(&PostContent::Article(article))
        .expect("configured");
    assert_eq!(request.edge(), &FacebookEdge::Feed);
    assert_eq!(request.payload()["message"], "Title\n\nBody");
}

#[test]
fn test_linkedin_omits_media() {
    let adapter = LinkedInAdapter::new(Some(LinkedInCredentials::new("token", "777")));

    for media_type in [MediaType::Image, MediaType::Video] {
        let payload = adapter
            .build_request(&PostContent::status_with_media(
                "New office",
                Media::new("https://cdn.example.com/office.png", media_type),
            ))
            .expect("configured");

        assert_eq!(payload["author"], "urn:li:organization:777");
        let share = &payload["specificContent"]["com.linkedin.ugc.ShareContent"];
        assert_eq!(share["shareCommentary"]["text"], "New office");
        assert_eq!(share["shareMediaCategory"], "NONE", "{}", media_type);
        assert!(share.get("media").is_none(), "{}", media_type);
    }
}

#[test]
fn test_linkedin_build_request_requires_credentials() {
    let adapter = LinkedInAdapter::new(None);
    assert!(adapter.build_request(&PostContent::status("x")).is_err());
}

#[test]
fn test_registry_readiness_is_per_platform() {
    let credentials = PlatformCredentials {
        facebook: Some(FacebookCredentials::new("t", "1")),
        medium: Some(MediumCredentials::new("t", "a")),
        ..Default::default()
    };
    let registry = AdapterRegistry::from_credentials(&credentials);
    assert_eq!(registry.len(), 4);
    assert_eq!(
        registry.readiness(),
        vec![
            (PlatformKind::X, false),
            (PlatformKind::Facebook, true),
            (PlatformKind::LinkedIn, false),
            (PlatformKind::Medium, true),
        ]
    );
    assert!(registry.get(PlatformKind::LinkedIn).is_some());
}
