use super::*;
use crate::model::is_routable_id;

/// Joins `segments` onto `base`, percent-encoding each one as a single segment.
/// Fails on `.` or `..`, which `url` would otherwise drop from the path.
pub(super) fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
    if let Some(bad) = segments.iter().find(|s| !is_routable_id(s)) {
        anyhow::bail!("path segment {:?} cannot be sent to {}", bad, base);
    }
    let mut url = Url::parse(base).with_context(|| format!("parse service url {}", base))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| anyhow::anyhow!("service url {} cannot carry a path", base))?;
        path.clear().extend(segments);
    }
    Ok(url)
}

impl NotificationClient {
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        resp.error_for_status()
            .with_context(|| format!("{} status", label))
    }

    /// POSTs with no body and returns the response text.
    pub(super) fn post(&self, url: Url, label: &str, check_status: bool) -> Result<String> {
        tracing::info!(%url, "POST {}", label);
        let resp = self
            .client
            .post(url.clone())
            .send()
            .with_context(|| format!("POST {}", url))?;
        let status = resp.status();
        let resp = if check_status {
            self.ensure_ok(resp, label)?
        } else {
            resp
        };
        let body = resp.text().with_context(|| format!("read {} response", label))?;
        tracing::debug!(%status, bytes = body.len(), "{} responded", label);
        Ok(body)
    }
}
