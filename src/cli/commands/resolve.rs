use anyhow::{anyhow, Context};
use axum::http::{header::COOKIE, HeaderMap, HeaderName, HeaderValue};
use clap::Args;
use serde_json::{json, Value};

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::identity::{require, resolve, IdentityRequest, Resolution, SessionClaims};

#[derive(Args, Debug, Default)]
pub struct ResolveArgs {
    #[arg(long = "header", value_name = "NAME:VALUE", help = "Request header; repeat for multi-valued headers")]
    pub headers: Vec<String>,

    #[arg(long, value_name = "RAW", help = "Raw Cookie header, e.g. 'a=1; factory_user_id=alice'")]
    pub cookie: Option<String>,

    #[arg(long, value_name = "JSON", help = "Attached session object, e.g. '{\"sub\":\"alice\"}'")]
    pub session: Option<String>,

    #[arg(long, help = "Fail when the request is anonymous")]
    pub require: bool,
}

pub fn handle(args: ResolveArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let headers = build_headers(&args.headers, args.cookie.as_deref())?;
    let session: Option<Value> = args
        .session
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .context("--session must be valid JSON")?;

    let request = IdentityRequest::new(session.as_ref().map(|s| s as &dyn SessionClaims), &headers);

    if args.require {
        return match require(&request) {
            Ok(subject) => output_success(
                output_format,
                &format!("Identified as {}", subject),
                Some(json!({ "subject": subject })),
            ),
            Err(e) => {
                output_error(output_format, &e.to_string(), Some("UNAUTHORIZED"))?;
                Err(anyhow!(e))
            }
        };
    }

    match resolve(&request) {
        Resolution::Identified { subject, source } => output_success(
            output_format,
            &format!("Identified as {} (from {})", subject, source.as_str()),
            Some(json!({ "authenticated": true, "subject": subject, "source": source })),
        ),
        Resolution::Anonymous => output_success(
            output_format,
            "Anonymous request",
            Some(json!({ "authenticated": false, "subject": null, "source": null })),
        ),
    }
}

fn build_headers(raw_headers: &[String], cookie: Option<&str>) -> anyhow::Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    for raw in raw_headers {
        let (name, value) = raw
            .split_once(':')
            .ok_or_else(|| anyhow!("header '{}' must look like NAME:VALUE", raw))?;
        let name = HeaderName::from_bytes(name.trim().as_bytes())
            .with_context(|| format!("invalid header name in '{}'", raw))?;
        let value = HeaderValue::from_str(value)
            .with_context(|| format!("invalid header value in '{}'", raw))?;
        headers.append(name, value);
    }

    if let Some(cookie) = cookie {
        headers.append(COOKIE, HeaderValue::from_str(cookie).context("invalid cookie header")?);
    }

    Ok(headers)
}
