use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

pub struct StubGuard {
    pub base_url: String,
    pub port: u16,
    _dir: tempfile::TempDir,
    child: Child,
}

impl Drop for StubGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[allow(dead_code)]
impl StubGuard {
    /// Calls the stub has received so far, oldest first.
    pub fn calls(&self) -> Result<Vec<serde_json::Value>> {
        let resp = reqwest::blocking::Client::new()
            .get(format!("{}/calls", self.base_url))
            .send()
            .context("GET /calls")?
            .error_for_status()
            .context("GET /calls status")?;
        resp.json().context("parse /calls")
    }

    /// `service/action[/product[/view]]` per call, for compact assertions.
    pub fn call_paths(&self) -> Result<Vec<String>> {
        Ok(self
            .calls()?
            .iter()
            .map(|c| {
                let mut parts = vec![
                    c["service"].as_str().unwrap_or("").to_string(),
                    c["action"].as_str().unwrap_or("").to_string(),
                ];
                for key in ["product_id", "view_id"] {
                    if let Some(v) = c[key].as_str() {
                        parts.push(v.to_string());
                    }
                }
                parts.join("/")
            })
            .collect())
    }
}

#[allow(dead_code)]
pub fn spawn_stub(flags: &[&str]) -> Result<StubGuard> {
    let dir = tempfile::tempdir().context("create stub tempdir")?;
    let addr_file = dir.path().join("addr.txt");

    let child = Command::new(env!("CARGO_BIN_EXE_product-stub-server"))
        .args(["--addr", "127.0.0.1:0", "--addr-file"])
        .arg(&addr_file)
        .args(flags)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn product-stub-server")?;

    let addr = read_addr_file(&addr_file)?;
    let port = addr
        .rsplit(':')
        .next()
        .and_then(|p| p.parse::<u16>().ok())
        .with_context(|| format!("port in {}", addr))?;
    let base_url = format!("http://{}", addr);
    wait_for_healthz(&base_url)?;

    Ok(StubGuard {
        base_url,
        port,
        _dir: dir,
        child,
    })
}

#[allow(dead_code)]
fn read_addr_file(addr_file: &Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(s.to_string());
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

#[allow(dead_code)]
pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("stub did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

#[allow(dead_code)]
pub const WIDGET_CATALOG: &str = r#"[
    {"product_id": "P1", "product_name": "Widget",
     "views": [{"view_id": "V1", "view_name": "Front"}, {"view_id": "V2"}]},
    {"product_id": "P2", "product_name": "Gadget", "views": []}
]"#;

/// Writes a catalog and a config pointing both services at `port`.
#[allow(dead_code)]
pub fn write_fixture(dir: &Path, port: u16, extra: serde_json::Value) -> Result<PathBuf> {
    let catalog = dir.join("products.json");
    std::fs::write(&catalog, WIDGET_CATALOG).context("write catalog")?;

    let mut cfg = serde_json::json!({
        "product_config_path": catalog,
        "product_service_ip": "127.0.0.1",
        "product_service_port": port,
        "capture_service_ip": "127.0.0.1",
        "capture_service_port": port.to_string(),
    });
    if let (Some(obj), Some(extra)) = (cfg.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            obj.insert(k.clone(), v.clone());
        }
    }

    let path = dir.join("configs.json");
    std::fs::write(&path, serde_json::to_vec_pretty(&cfg)?).context("write config")?;
    Ok(path)
}

#[allow(dead_code)]
pub fn run_selector(args: &[&str]) -> Result<std::process::Output> {
    Command::new(env!("CARGO_BIN_EXE_product-selector"))
        .args(args)
        .output()
        .with_context(|| format!("run product-selector {:?}", args))
}
