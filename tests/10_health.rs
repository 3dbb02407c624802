mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::get(common::url(server, "/health")).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_lists_identity_surfaces() -> Result<()> {
    let server = common::ensure_server().await?;
    assert_ne!(server.port, 0);

    let body = reqwest::get(common::url(server, "/"))
        .await?
        .json::<serde_json::Value>()
        .await?;

    assert_eq!(
        body["data"]["identity"]["headers"],
        serde_json::json!(["x-user-id", "x-userid", "x-factory-user-id"])
    );
    assert_eq!(body["data"]["identity"]["cookie"], "factory_user_id");
    Ok(())
}
