//! Tests for HTTP request/response types.

use std::sync::Arc;

use super::test_fixtures::{MockClient, TEST_URL};
use super::{BasicAuth, HttpClient, HttpError, HttpRequest, HttpResponse};

fn test_url() -> url::Url {
    url::Url::parse(TEST_URL).unwrap()
}

mod basic_auth {
    use super::*;

    #[test]
    fn from_parts_requires_both_values() {
        assert_eq!(
            BasicAuth::from_parts(Some("user"), Some("pass")),
            Some(BasicAuth::new("user", "pass"))
        );
        assert!(BasicAuth::from_parts(Some("user"), None).is_none());
        assert!(BasicAuth::from_parts(None, Some("pass")).is_none());
        assert!(BasicAuth::from_parts(None, None).is_none());
    }

    #[test]
    fn from_parts_treats_empty_as_missing() {
        assert!(BasicAuth::from_parts(Some(""), Some("pass")).is_none());
        assert!(BasicAuth::from_parts(Some("user"), Some("")).is_none());
    }

    #[test]
    fn debug_hides_password() {
        let debug = format!("{:?}", BasicAuth::new("user", "hunter2"));

        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
    }
}

mod http_request {
    use super::*;

    #[test]
    fn post_starts_empty() {
        let req = HttpRequest::post(test_url());

        assert_eq!(req.method, http::Method::POST);
        assert_eq!(req.url, test_url());
        assert!(req.headers.is_empty());
        assert!(req.auth.is_none());
        assert!(req.body.is_none());
    }

    #[test]
    fn with_header_replaces_previous_value() {
        let req = HttpRequest::post(test_url())
            .with_header(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("text/plain"),
            )
            .with_header(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("application/json"),
            );

        assert_eq!(
            req.headers.get_all(http::header::CONTENT_TYPE).iter().count(),
            1
        );
        assert_eq!(
            req.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn builder_sets_body_and_auth() {
        let req = HttpRequest::new(http::Method::PUT, test_url())
            .with_body(b"{}".to_vec())
            .with_auth(Some(BasicAuth::new("user", "pass")));

        assert_eq!(req.method, http::Method::PUT);
        assert_eq!(req.body.as_deref(), Some(b"{}".as_slice()));
        assert_eq!(req.auth.unwrap().username, "user");
    }
}

mod http_response {
    use super::*;

    fn response(status: u16, body: &[u8]) -> HttpResponse {
        HttpResponse::new(
            http::StatusCode::from_u16(status).unwrap(),
            http::HeaderMap::new(),
            body.to_vec(),
        )
    }

    #[test]
    fn success_and_redirect_are_accepted() {
        assert!(response(200, b"").is_accepted());
        assert!(response(204, b"").is_accepted());
        assert!(response(301, b"").is_accepted());
        assert!(response(399, b"").is_accepted());
    }

    #[test]
    fn client_and_server_errors_are_rejected() {
        assert!(!response(100, b"").is_accepted());
        assert!(!response(400, b"").is_accepted());
        assert!(!response(404, b"").is_accepted());
        assert!(!response(503, b"").is_accepted());
    }

    #[test]
    fn body_text_requires_utf8() {
        assert_eq!(response(200, b"ok").body_text(), Some("ok"));
        assert!(response(200, &[0xff, 0xfe]).body_text().is_none());
    }
}

mod http_client {
    use super::*;

    #[test]
    fn arc_forwards_to_inner_client() {
        let inner = Arc::new(MockClient::success());
        let shared: Arc<MockClient> = Arc::clone(&inner);

        let response = shared.request(HttpRequest::post(test_url())).unwrap();

        assert_eq!(response.status, http::StatusCode::OK);
        assert_eq!(inner.calls(), 1);
    }

    #[test]
    fn errors_display_cause() {
        assert_eq!(HttpError::Timeout.to_string(), "Request timed out");
        assert!(
            HttpError::InvalidUrl("bad".to_string())
                .to_string()
                .contains("bad")
        );
    }
}
