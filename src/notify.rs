use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;
use serde::Serialize;

use crate::error::SubmitError;
use crate::model::Config;

mod http_client;
use self::http_client::endpoint;

/// The three calls a submit makes, in the order it makes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Deactivate,
    Activate,
    NotifyCapture,
}

impl Step {
    pub const ORDER: [Step; 3] = [Step::Deactivate, Step::Activate, Step::NotifyCapture];

    pub fn label(self) -> &'static str {
        match self {
            Step::Deactivate => "deactivate",
            Step::Activate => "activate",
            Step::NotifyCapture => "notify capture",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CallOutcome {
    pub ok: bool,
    pub message: String,
}

impl CallOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// The outbound side of a submit. Implementations never fail outright; every
/// problem ends up in the returned message.
pub trait Notifier {
    fn deactivate_all_products(&self) -> CallOutcome;
    fn activate_product(&self, product_id: &str) -> CallOutcome;
    fn notify_capture_service(&self, product_id: &str, view_id: &str) -> CallOutcome;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub step: Step,
    #[serde(flatten)]
    pub outcome: CallOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    pub product_id: String,
    pub view_id: String,
    pub steps: Vec<StepOutcome>,
}

impl SubmitOutcome {
    pub fn ok(&self) -> bool {
        self.steps.iter().all(|s| s.outcome.ok)
    }

    /// Every step's message in call order, one per line.
    pub fn message(&self) -> String {
        self.steps
            .iter()
            .map(|s| s.outcome.message.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Runs deactivate, activate and notify in that order. A failed step does not
/// stop the ones after it.
pub fn run_sequence(notifier: &dyn Notifier, product_id: &str, view_id: &str) -> SubmitOutcome {
    let steps = Step::ORDER
        .iter()
        .map(|&step| {
            let outcome = match step {
                Step::Deactivate => notifier.deactivate_all_products(),
                Step::Activate => notifier.activate_product(product_id),
                Step::NotifyCapture => notifier.notify_capture_service(product_id, view_id),
            };
            if outcome.ok {
                tracing::info!(step = step.label(), "{}", outcome.message);
            } else {
                tracing::warn!(step = step.label(), "{}", outcome.message);
            }
            StepOutcome { step, outcome }
        })
        .collect();

    let out = SubmitOutcome {
        product_id: product_id.to_string(),
        view_id: view_id.to_string(),
        steps,
    };
    tracing::info!(
        product_id,
        view_id,
        ok = out.ok(),
        "submit finished"
    );
    out
}

pub struct NotificationClient {
    product_base: String,
    capture_base: String,
    lenient_deactivate: bool,
    client: reqwest::blocking::Client,
}

impl NotificationClient {
    pub fn new(cfg: &Config) -> Result<Self, SubmitError> {
        let mut builder = reqwest::blocking::Client::builder().user_agent("product-selector");
        if let Some(secs) = cfg.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(SubmitError::Client)?;
        Ok(Self {
            product_base: cfg.product_service_base(),
            capture_base: cfg.capture_service_base(),
            lenient_deactivate: cfg.lenient_deactivate,
            client,
        })
    }

    fn try_deactivate(&self) -> Result<String> {
        let url = endpoint(&self.product_base, &["product", "deactivate"])?;
        self.post(url, "deactivate", !self.lenient_deactivate)
    }

    fn try_activate(&self, product_id: &str) -> Result<()> {
        let url = endpoint(&self.product_base, &["product", product_id, "activate"])?;
        self.post(url, "activate", true).map(|_| ())
    }

    fn try_notify(&self, product_id: &str, view_id: &str) -> Result<()> {
        let url = endpoint(
            &self.capture_base,
            &["api", "capture", "set-product-id", product_id, view_id],
        )?;
        self.post(url, "notify capture", true)
            .context("capture service")
            .map(|_| ())
    }
}

impl Notifier for NotificationClient {
    fn deactivate_all_products(&self) -> CallOutcome {
        match self.try_deactivate() {
            Ok(body) => CallOutcome::success(format!(
                "All products deactivated successfully! {}",
                body
            )),
            Err(err) => CallOutcome::failure(format!("Failed to deactivate products: {:#}", err)),
        }
    }

    fn activate_product(&self, product_id: &str) -> CallOutcome {
        match self.try_activate(product_id) {
            Ok(()) => {
                CallOutcome::success(format!("Product '{}' activated successfully!", product_id))
            }
            Err(err) => CallOutcome::failure(format!("Failed to send product: {:#}", err)),
        }
    }

    fn notify_capture_service(&self, product_id: &str, view_id: &str) -> CallOutcome {
        match self.try_notify(product_id, view_id) {
            Ok(()) => CallOutcome::success("Capture service notified successfully!"),
            Err(err) => {
                CallOutcome::failure(format!("Failed to notify capture service: {:#}", err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct Scripted {
        fail: Vec<Step>,
        calls: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn outcome(&self, step: Step, call: String) -> CallOutcome {
            self.calls.borrow_mut().push(call);
            if self.fail.contains(&step) {
                CallOutcome::failure(format!("{} failed", step.label()))
            } else {
                CallOutcome::success(format!("{} ok", step.label()))
            }
        }
    }

    impl Notifier for Scripted {
        fn deactivate_all_products(&self) -> CallOutcome {
            self.outcome(Step::Deactivate, "deactivate".to_string())
        }
        fn activate_product(&self, product_id: &str) -> CallOutcome {
            self.outcome(Step::Activate, format!("activate {}", product_id))
        }
        fn notify_capture_service(&self, product_id: &str, view_id: &str) -> CallOutcome {
            self.outcome(
                Step::NotifyCapture,
                format!("notify {} {}", product_id, view_id),
            )
        }
    }

    #[test]
    fn sequence_runs_in_fixed_order() {
        let n = Scripted::default();
        let out = run_sequence(&n, "P1", "V1");
        assert_eq!(
            *n.calls.borrow(),
            vec!["deactivate", "activate P1", "notify P1 V1"]
        );
        assert!(out.ok());
        assert_eq!(out.message(), "deactivate ok\nactivate ok\nnotify capture ok");
    }

    #[test]
    fn first_failure_does_not_short_circuit() {
        let n = Scripted {
            fail: vec![Step::Deactivate],
            ..Default::default()
        };
        let out = run_sequence(&n, "P1", "V1");
        assert_eq!(n.calls.borrow().len(), 3);
        assert!(!out.ok());
        assert_eq!(
            out.message(),
            "deactivate failed\nactivate ok\nnotify capture ok"
        );
    }

    #[test]
    fn ok_only_when_every_step_succeeds() {
        for failing in Step::ORDER {
            let n = Scripted {
                fail: vec![failing],
                ..Default::default()
            };
            let out = run_sequence(&n, "P", "V");
            assert!(!out.ok(), "{:?} failing should fail the submit", failing);
            assert_eq!(out.steps.len(), 3);
        }
    }

    #[test]
    fn unreachable_service_is_reported_not_raised() {
        let cfg = Config {
            product_config_path: "p.json".into(),
            product_service_ip: "127.0.0.1".to_string(),
            // Port 1 is reserved; nothing listens there.
            product_service_port: 1,
            capture_service_ip: "127.0.0.1".to_string(),
            capture_service_port: 1,
            request_timeout_secs: Some(2),
            lenient_deactivate: false,
        };
        let client = NotificationClient::new(&cfg).unwrap();
        let out = run_sequence(&client, "P1", "V1");
        assert!(!out.ok());
        let msg = out.message();
        assert!(msg.contains("Failed to deactivate products:"));
        assert!(msg.contains("Failed to send product:"));
        assert!(msg.contains("Failed to notify capture service:"));

        // Lenient mode only forgives a bad status, not a dead connection.
        let lenient = NotificationClient::new(&Config {
            lenient_deactivate: true,
            ..cfg
        })
        .unwrap();
        let out = lenient.deactivate_all_products();
        assert!(!out.ok);
        assert!(out.message.starts_with("Failed to deactivate products:"));
    }
}
