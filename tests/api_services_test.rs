//! Link resolution, DSL and meta services against a scripted HTTP client.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use rstest::rstest;
use serde_json::json;

use mgdsl::application::services::{
    DslService, LinkResolver, MetaService, DSL_RULES, META_RULES, TOKEN_HEADER,
};
use mgdsl::application::ApplicationError;
use mgdsl::config::Settings;
use mgdsl::domain::{DomainError, FileLocator, Target};
use mgdsl::infrastructure::traits::{HttpClient, HttpRequest, HttpResponse};
use mgdsl::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

const ENDPOINT: &str = "https://mastergo.test";
const DSL_URL: &str = "https://mastergo.test/mcp/dsl?fileId=123&layerId=1%3A2";
const META_URL: &str = "https://mastergo.test/mcp/meta?fileId=123&layerId=1%3A2";

/// HTTP client answering from a fixed URL → reply table and recording requests.
#[derive(Default)]
struct MockHttpClient {
    replies: HashMap<String, Result<HttpResponse, io::ErrorKind>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockHttpClient {
    fn reply(mut self, url: &str, response: HttpResponse) -> Self {
        self.replies.insert(url.to_string(), Ok(response));
        self
    }

    fn fail(mut self, url: &str, kind: io::ErrorKind) -> Self {
        self.replies.insert(url.to_string(), Err(kind));
        self
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockHttpClient {
    fn get(&self, request: &HttpRequest) -> io::Result<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.get(&request.url) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(kind)) => Err(io::Error::new(*kind, "scripted failure")),
            None => Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("unexpected request: {}", request.url),
            )),
        }
    }
}

fn status(code: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status: code,
        location: None,
        body: body.to_string(),
    }
}

fn redirect(code: u16, location: &str) -> HttpResponse {
    HttpResponse {
        status: code,
        location: Some(location.to_string()),
        body: String::new(),
    }
}

fn settings(token: Option<&str>) -> Arc<Settings> {
    Arc::new(Settings {
        token: token.map(str::to_string),
        endpoint: ENDPOINT.to_string(),
        rules: vec!["prefer flexbox".to_string()],
        ..Settings::default()
    })
}

fn locator() -> FileLocator {
    FileLocator::new("123", "1:2")
}

// ============================================================
// LinkResolver
// ============================================================

#[test]
fn given_ids_when_resolving_then_no_request() {
    let http = Arc::new(MockHttpClient::default());
    let resolver = LinkResolver::new(http.clone());

    let resolved = resolver.resolve(&Target::Ids(locator())).unwrap();

    assert_eq!(resolved, locator());
    assert!(http.requests().is_empty());
}

#[test]
fn given_full_url_when_resolving_then_parsed_locally() {
    let http = Arc::new(MockHttpClient::default());
    let resolver = LinkResolver::new(http.clone());

    let resolved = resolver
        .resolve(&Target::Url(
            "https://mastergo.com/file/123?layer_id=1:2".to_string(),
        ))
        .unwrap();

    assert_eq!(resolved, locator());
    assert!(http.requests().is_empty());
}

#[test]
fn given_unparseable_url_when_resolving_then_invalid_url() {
    let resolver = LinkResolver::new(Arc::new(MockHttpClient::default()));

    let err = resolver
        .resolve(&Target::Url("https://mastergo.com/file/abc".to_string()))
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Domain(DomainError::InvalidUrl(_))));
    assert_eq!(err.descriptor().code, "INVALID_URL");
}

#[rstest]
#[case(301)]
#[case(302)]
#[case(307)]
fn given_short_link_redirect_when_resolving_then_location_parsed(#[case] code: u16) {
    let short = "https://mastergo.com/goto/LhGgBAK";
    let http = Arc::new(MockHttpClient::default().reply(
        short,
        redirect(code, "https://mastergo.com/file/123?layer_id=1:2&from=goto"),
    ));
    let resolver = LinkResolver::new(http.clone());

    let resolved = resolver.resolve(&Target::Url(short.to_string())).unwrap();

    assert_eq!(resolved, locator());
    let requests = http.requests();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].follow_redirects, "redirect must not be followed");
}

#[test]
fn given_relative_location_when_expanding_then_joined_with_short_link() {
    let short = "https://mastergo.com/goto/abc";
    let http = Arc::new(MockHttpClient::default().reply(short, redirect(302, "/file/123?layer_id=1:2")));
    let resolver = LinkResolver::new(http);

    let full = resolver.expand_short_link(short).unwrap();

    assert_eq!(full, "https://mastergo.com/file/123?layer_id=1:2");
}

#[rstest]
#[case::not_a_redirect(status(200, "<html/>"))]
#[case::missing_location(status(302, ""))]
#[case::empty_location(redirect(302, ""))]
fn given_unusable_short_link_response_when_resolving_then_short_link_failed(
    #[case] response: HttpResponse,
) {
    let short = "https://mastergo.com/goto/abc";
    let resolver = LinkResolver::new(Arc::new(MockHttpClient::default().reply(short, response)));

    let err = resolver.resolve(&Target::Url(short.to_string())).unwrap_err();

    assert!(matches!(err, ApplicationError::ShortLink { .. }));
    assert_eq!(err.descriptor().code, "SHORT_LINK_FAILED");
}

#[test]
fn given_redirect_to_unparseable_target_when_resolving_then_short_link_failed() {
    let short = "https://mastergo.com/goto/abc";
    let resolver = LinkResolver::new(Arc::new(
        MockHttpClient::default().reply(short, redirect(302, "https://mastergo.com/login")),
    ));

    let err = resolver.resolve(&Target::Url(short.to_string())).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::UnresolvedShortLink { .. })
    ));
    assert_eq!(err.descriptor().code, "SHORT_LINK_FAILED");
}

#[test]
fn given_transport_failure_when_expanding_then_short_link_failed() {
    let short = "https://mastergo.com/goto/abc";
    let resolver = LinkResolver::new(Arc::new(
        MockHttpClient::default().fail(short, io::ErrorKind::TimedOut),
    ));

    let err = resolver.expand_short_link(short).unwrap_err();

    assert!(matches!(err, ApplicationError::ShortLink { .. }));
}

// ============================================================
// DslService
// ============================================================

#[test]
fn given_dsl_response_when_fetching_then_links_and_rules_added() {
    // Arrange
    let body = json!({
        "dsl": {
            "nodes": [{
                "id": "1:3",
                "componentInfo": { "componentSetDocumentLink": ["https://docs.example/button.mdx"] }
            }]
        }
    });
    let http = Arc::new(MockHttpClient::default().reply(DSL_URL, HttpResponse::ok(body.to_string())));
    let service = DslService::new(http.clone(), settings(Some("secret")));

    // Act
    let response = service.fetch(&locator()).unwrap();

    // Assert
    assert_eq!(response.dsl, body);
    assert_eq!(
        response.component_document_links,
        vec!["https://docs.example/button.mdx"]
    );
    assert_eq!(response.rules.len(), DSL_RULES.len() + 1);
    assert_eq!(response.rules[..DSL_RULES.len()], DSL_RULES.map(String::from));
    assert_eq!(response.rules.last().map(String::as_str), Some("prefer flexbox"));

    let requests = http.requests();
    assert_eq!(requests[0].header_value(TOKEN_HEADER), Some("secret"));
    assert_eq!(requests[0].header_value("accept"), Some("application/json"));
}

#[test]
fn given_dsl_nested_beyond_default_json_depth_when_fetching_then_parsed() {
    // Arrange: 80 layers, each an object plus a children array
    let depth = 80;
    let mut body = String::from(r#"{"dsl":{"nodes":["#);
    for i in 0..depth {
        body.push_str(&format!(r#"{{"id":"n{i}","children":["#));
    }
    body.push_str(
        r#"{"id":"leaf","componentInfo":{"componentSetDocumentLink":["https://docs.example/deep.mdx"]}}"#,
    );
    body.push_str(&"]}".repeat(depth));
    body.push_str("]}}");
    let http = Arc::new(MockHttpClient::default().reply(DSL_URL, HttpResponse::ok(body)));
    let service = DslService::new(http, settings(Some("secret")));

    // Act
    let response = service.fetch(&locator()).unwrap();

    // Assert
    assert_eq!(
        response.component_document_links,
        vec!["https://docs.example/deep.mdx"]
    );
}

#[test]
fn given_response_when_serializing_then_camel_case_keys() {
    let http = Arc::new(MockHttpClient::default().reply(DSL_URL, HttpResponse::ok("{}")));
    let service = DslService::new(http, settings(Some("secret")));

    let json = serde_json::to_value(service.fetch(&locator()).unwrap()).unwrap();

    assert!(json.get("componentDocumentLinks").is_some());
    assert!(json.get("rules").is_some());
}

#[test]
fn given_no_token_when_fetching_then_token_missing_without_request() {
    let http = Arc::new(MockHttpClient::default());
    let service = DslService::new(http.clone(), settings(None));

    let err = service.fetch(&locator()).unwrap_err();

    assert!(matches!(err, ApplicationError::TokenMissing));
    assert!(http.requests().is_empty());
}

#[rstest]
#[case(401, "TOKEN_INVALID")]
#[case(403, "PERMISSION_DENIED")]
#[case(404, "NOT_FOUND")]
#[case(408, "TIMEOUT")]
#[case(504, "TIMEOUT")]
#[case(500, "UNKNOWN_ERROR")]
fn given_error_status_when_fetching_then_mapped_code(#[case] code: u16, #[case] expected: &str) {
    let http = Arc::new(MockHttpClient::default().reply(DSL_URL, status(code, "boom")));
    let service = DslService::new(http, settings(Some("secret")));

    let err = service.fetch(&locator()).unwrap_err();

    assert!(matches!(err, ApplicationError::Api { status, .. } if status == code));
    assert_eq!(err.descriptor().code, expected);
}

#[test]
fn given_non_json_body_when_fetching_then_invalid_response() {
    let http = Arc::new(MockHttpClient::default().reply(DSL_URL, HttpResponse::ok("<html>")));
    let service = DslService::new(http, settings(Some("secret")));

    let err = service.fetch(&locator()).unwrap_err();

    assert_eq!(err.descriptor().code, "INVALID_RESPONSE");
}

#[test]
fn given_transport_failure_when_fetching_then_request_failed() {
    let http = Arc::new(MockHttpClient::default().fail(DSL_URL, io::ErrorKind::TimedOut));
    let service = DslService::new(http, settings(Some("secret")));

    let err = service.fetch(&locator()).unwrap_err();

    assert!(matches!(err, ApplicationError::Transport { .. }));
    assert_eq!(err.descriptor().code, "REQUEST_FAILED");
}

// ============================================================
// MetaService
// ============================================================

#[test]
fn given_meta_result_when_fetching_then_actions_parsed_and_default_rules() {
    let body = json!({
        "result": r#"<meta><action title="Home" layerId="0:1"/><action title="Cart" layerId="0:2"/></meta>"#
    });
    let http = Arc::new(MockHttpClient::default().reply(META_URL, HttpResponse::ok(body.to_string())));
    let service = MetaService::new(http, settings(Some("secret")));

    let response = service.fetch(&locator()).unwrap();

    let titles: Vec<&str> = response.actions.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Home", "Cart"]);
    assert_eq!(response.rules, META_RULES.map(String::from).to_vec());
    assert!(response.result.is_some());
}

#[test]
fn given_meta_rules_in_response_when_fetching_then_used_verbatim() {
    let body = json!({ "result": "", "rules": ["crawl every page"] });
    let http = Arc::new(MockHttpClient::default().reply(META_URL, HttpResponse::ok(body.to_string())));
    let service = MetaService::new(http, settings(Some("secret")));

    let response = service.fetch(&locator()).unwrap();

    assert!(response.actions.is_empty());
    assert_eq!(response.rules, vec!["crawl every page".to_string()]);
}

#[test]
fn given_meta_without_result_when_serializing_then_result_omitted() {
    let http = Arc::new(MockHttpClient::default().reply(META_URL, HttpResponse::ok("{}")));
    let service = MetaService::new(http, settings(Some("secret")));

    let response = service.fetch(&locator()).unwrap();
    let json = serde_json::to_value(&response).unwrap();

    assert!(json.get("result").is_none());
    assert_eq!(json["actions"], json!([]));
}
