mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn anonymous_request_is_not_an_error() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::get(common::url(server, "/api/identity")).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["data"], json!({"authenticated": false, "subject": null, "source": null}));
    Ok(())
}

#[tokio::test]
async fn whoami_rejects_anonymous_request() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::get(common::url(server, "/api/whoami")).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "authentication required");
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn whoami_accepts_vendor_header() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::Client::new()
        .get(common::url(server, "/api/whoami"))
        .header("x-factory-user-id", "vendor.user-9")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["subject"], "vendor.user-9");
    Ok(())
}

#[tokio::test]
async fn header_wins_over_cookie() -> Result<()> {
    let server = common::ensure_server().await?;

    let body = reqwest::Client::new()
        .get(common::url(server, "/api/identity"))
        .header("cookie", "factory_user_id=cookie-user")
        .header("x-userid", "header-user")
        .send()
        .await?
        .json::<Value>()
        .await?;

    assert_eq!(body["data"]["subject"], "header-user");
    assert_eq!(body["data"]["source"], "header");
    Ok(())
}

#[tokio::test]
async fn invalid_headers_fall_back_to_cookie() -> Result<()> {
    let server = common::ensure_server().await?;

    let body = reqwest::Client::new()
        .get(common::url(server, "/api/identity"))
        .header("x-user-id", "has space")
        .header("x-factory-user-id", "user@example.com")
        .header("cookie", "a=1; factory_user_id=abc.def-123; b=2")
        .send()
        .await?
        .json::<Value>()
        .await?;

    assert_eq!(body["data"]["subject"], "abc.def-123");
    assert_eq!(body["data"]["source"], "cookie");
    Ok(())
}

#[tokio::test]
async fn undecodable_cookie_stays_anonymous() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::Client::new()
        .get(common::url(server, "/api/whoami"))
        .header("cookie", "factory_user_id=%zz")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
