// ── Console facade ──
//
// Owns the API client, the slice store and the debouncers. Domain
// operations live in `ops/` as further `impl Console` blocks; each one
// drives its slice through pending/fulfilled/rejected and returns the
// typed result.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use hrdesk_api::{HrClient, TlsMode, TransportConfig};
use tracing::debug;

use crate::config::{ConsoleConfig, TlsVerification};
use crate::debounce::Debouncer;
use crate::error::CoreError;
use crate::store::Store;

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ConsoleInner>`.
#[derive(Clone)]
pub struct Console {
    inner: Arc<ConsoleInner>,
}

struct ConsoleInner {
    config: ConsoleConfig,
    client: HrClient,
    store: Store,
    email_checks: Debouncer,
    phone_checks: Debouncer,
    local_seq: AtomicU64,
}

impl Console {
    /// Build a console from configuration. No request is made.
    pub fn new(config: ConsoleConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = HrClient::new(
            config.api_url.as_str(),
            config.attendance_url.as_str(),
            &config.auth,
            &transport,
        )?;
        debug!(
            api = %client.api_url(),
            attendance = %client.attendance_url(),
            company = client.company_id(),
            "console ready"
        );

        Ok(Self {
            inner: Arc::new(ConsoleInner {
                email_checks: Debouncer::new(config.availability_debounce),
                phone_checks: Debouncer::new(config.availability_debounce),
                config,
                client,
                store: Store::new(),
                local_seq: AtomicU64::new(0),
            }),
        })
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    /// All domain slices, for snapshots and subscriptions.
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    pub fn company_id(&self) -> &str {
        self.inner.client.company_id()
    }

    pub(crate) fn client(&self) -> &HrClient {
        &self.inner.client
    }

    pub(crate) fn email_checks(&self) -> &Debouncer {
        &self.inner.email_checks
    }

    pub(crate) fn phone_checks(&self) -> &Debouncer {
        &self.inner.phone_checks
    }

    /// Next value of a per-console counter for client-generated IDs.
    pub(crate) fn next_local_seq(&self) -> u64 {
        self.inner.local_seq.fetch_add(1, Ordering::Relaxed)
    }

    /// An explicit employee ID, or the operator's own from the session.
    pub(crate) fn resolve_employee(&self, employee_id: Option<&str>) -> Result<String, CoreError> {
        employee_id
            .or_else(|| self.inner.client.employee_id())
            .map(str::to_owned)
            .ok_or_else(|| CoreError::Config {
                message: "no employee ID in the session; pass one explicitly".into(),
            })
    }
}

fn build_transport(config: &ConsoleConfig) -> TransportConfig {
    TransportConfig {
        tls: match &config.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        },
        timeout: config.timeout,
    }
}
