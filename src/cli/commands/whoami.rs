use anyhow::{anyhow, Context};
use clap::Args;
use serde_json::Value;

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    #[arg(long, default_value = "http://localhost:3000", help = "Server base URL")]
    pub url: String,

    #[arg(long, help = "Send this value as the x-user-id header")]
    pub user: Option<String>,

    #[arg(long, value_name = "RAW", help = "Send this raw Cookie header")]
    pub cookie: Option<String>,

    #[arg(long, help = "Send this bearer token as the session")]
    pub token: Option<String>,
}

pub async fn handle(args: WhoamiArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let url = format!("{}/api/whoami", args.url.trim_end_matches('/'));

    let mut request = reqwest::Client::new().get(&url);
    if let Some(user) = &args.user {
        request = request.header("x-user-id", user);
    }
    if let Some(cookie) = &args.cookie {
        request = request.header(reqwest::header::COOKIE, cookie);
    }
    if let Some(token) = &args.token {
        request = request.bearer_auth(token);
    }

    let response = request
        .send()
        .await
        .with_context(|| format!("failed to reach {}", url))?;
    let status = response.status();
    let body: Value = response
        .json()
        .await
        .context("server returned a non-JSON body")?;

    if status.is_success() {
        let subject = body["data"]["subject"].as_str().unwrap_or_default().to_string();
        output_success(
            output_format,
            &format!("Server identifies you as {}", subject),
            Some(body["data"].clone()),
        )
    } else {
        let message = body["message"].as_str().unwrap_or("request failed").to_string();
        output_error(output_format, &message, body["code"].as_str())?;
        Err(anyhow!("{} ({})", message, status))
    }
}
