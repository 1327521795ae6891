#![allow(clippy::unwrap_used)]
// End-to-end verifier tests: DohClient against a wiremock resolver.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sendcheck_api::DohClient;
use sendcheck_core::{
    DomainConventions, PolicyConfig, RecordKind, RecordRequest, VerificationStatus, Verifier,
    domain_requests,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Verifier<DohClient>) {
    let server = MockServer::start().await;
    let client = DohClient::from_reqwest(
        &format!("{}/dns-query", server.uri()),
        reqwest::Client::new(),
    )
    .unwrap();
    (server, Verifier::new(client))
}

async fn mount_answers(server: &MockServer, name: &str, qtype: &str, rtype: u16, data: &[&str]) {
    let answers: Vec<serde_json::Value> = data
        .iter()
        .map(|d| json!({ "name": name, "type": rtype, "TTL": 300, "data": d }))
        .collect();

    Mock::given(method("GET"))
        .and(path("/dns-query"))
        .and(query_param("name", name))
        .and(query_param("type", qtype))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "Status": 0, "Answer": answers })),
        )
        .mount(server)
        .await;
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_http_500_yields_error_verdict() {
    let (server, verifier) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dns-query"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let request = RecordRequest::new(RecordKind::Spf, "example.com");
    let verdict = verifier.verify(&request, &PolicyConfig::default()).await;

    assert_eq!(verdict.status, VerificationStatus::Error);
    assert_eq!(verdict.value, "");
    assert!(verdict.message.contains("HTTP 500"), "{}", verdict.message);
}

#[tokio::test]
async fn test_servfail_yields_not_found_verdict() {
    let (server, verifier) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dns-query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Status": 2 })))
        .mount(&server)
        .await;

    let request = RecordRequest::new(RecordKind::Dmarc, "_dmarc.example.com");
    let verdict = verifier.verify(&request, &PolicyConfig::default()).await;

    assert_eq!(verdict.status, VerificationStatus::Invalid);
    assert_eq!(verdict.message, "No DMARC record found");
}

#[tokio::test]
async fn test_non_json_body_yields_error_verdict() {
    let (server, verifier) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dns-query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let request = RecordRequest::new(RecordKind::Dkim, "crdl01._domainkey.example.com");
    let verdict = verifier.verify(&request, &PolicyConfig::default()).await;

    assert_eq!(verdict.status, VerificationStatus::Error);
    assert!(verdict.message.starts_with("Parse error"), "{}", verdict.message);
}

#[tokio::test]
async fn test_spf_valid_and_missing_include() {
    let (server, verifier) = setup().await;
    mount_answers(
        &server,
        "example.com",
        "TXT",
        16,
        &["\"v=spf1 include:_spf.cordialmail.net ~all\""],
    )
    .await;

    let request = RecordRequest::new(RecordKind::Spf, "example.com");
    let verdict = verifier.verify(&request, &PolicyConfig::default()).await;
    assert_eq!(verdict.status, VerificationStatus::Valid);
    assert_eq!(verdict.value, "v=spf1 include:_spf.cordialmail.net ~all");

    let mut policy = PolicyConfig::default();
    policy.spf.required_includes.push("include:other.net".into());
    let verdict = verifier.verify(&request, &policy).await;
    assert_eq!(verdict.status, VerificationStatus::Invalid);
    assert!(verdict.message.contains("include:other.net"));
}

#[tokio::test]
async fn test_mx_valid_through_resolver() {
    let (server, verifier) = setup().await;
    mount_answers(
        &server,
        "example.com",
        "MX",
        15,
        &["10 mxb.mailgun.org.", "10 mxa.mailgun.org."],
    )
    .await;

    let request = RecordRequest::new(RecordKind::Mx, "example.com");
    let verdict = verifier.verify(&request, &PolicyConfig::default()).await;

    assert_eq!(verdict.status, VerificationStatus::Valid);
    assert_eq!(verdict.value, "10 mxa.mailgun.org\n10 mxb.mailgun.org");
}

#[tokio::test]
async fn test_dmarc_without_reporting_address_needs_review() {
    let (server, verifier) = setup().await;
    mount_answers(
        &server,
        "_dmarc.example.com",
        "TXT",
        16,
        &["\"v=DMARC1; p=none; rua=mailto:reports@example.com\""],
    )
    .await;

    let request = RecordRequest::new(RecordKind::Dmarc, "_dmarc.example.com");
    let verdict = verifier.verify(&request, &PolicyConfig::default()).await;

    assert_eq!(verdict.status, VerificationStatus::Review);
}

#[tokio::test]
async fn test_whole_domain_in_order() {
    let (server, verifier) = setup().await;
    mount_answers(
        &server,
        "example.com",
        "TXT",
        16,
        &["\"v=spf1 include:_spf.cordialmail.net -all\""],
    )
    .await;
    mount_answers(
        &server,
        "crdl01._domainkey.example.com",
        "TXT",
        16,
        &["\"v=DKIM1; k=rsa; p=MIGf\" \"MA0G\""],
    )
    .await;
    mount_answers(
        &server,
        "_dmarc.example.com",
        "TXT",
        16,
        &["\"v=DMARC1; p=none; rua=mailto:d@dmarc.cordialmail.net\""],
    )
    .await;
    mount_answers(&server, "mg.example.com", "CNAME", 5, &["mailgun.org."]).await;
    mount_answers(
        &server,
        "example.com",
        "MX",
        15,
        &["10 mxa.mailgun.org.", "10 mxb.mailgun.org."],
    )
    .await;

    let requests = domain_requests("Example.com.", &DomainConventions::default()).unwrap();
    let verdicts = verifier
        .verify_all(&requests, &PolicyConfig::default(), 3)
        .await;

    assert_eq!(verdicts.len(), 5);
    assert!(verdicts.iter().all(|v| v.is_valid()), "{verdicts:#?}");
    assert_eq!(verdicts[1].value, "v=DKIM1; k=rsa; p=MIGfMA0G");
    assert_eq!(verdicts[3].value, "mailgun.org");
}
