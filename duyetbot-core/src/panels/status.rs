use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::catalog::{MONITORING_LABEL, SERVICES};
use crate::models::ServiceStatus;
use crate::scheduler::{TimerEvent, TimerKey, TimerScope};

/// Hardcoded service health with a ticking "last updated" clock.
#[derive(Debug)]
pub struct StatusPanel {
    services: Vec<ServiceStatus>,
    last_updated: DateTime<Utc>,
    auto_refresh: bool,
    period: Duration,
    timers: TimerScope,
}

impl StatusPanel {
    /// Mounts with auto-refresh on and the ticker running.
    pub fn new(timers: TimerScope, period: Duration, now: DateTime<Utc>) -> Self {
        let mut panel = Self {
            services: SERVICES
                .iter()
                .map(|spec| ServiceStatus::from_spec(spec, now))
                .collect(),
            last_updated: now,
            auto_refresh: true,
            period,
            timers,
        };
        panel.timers.every(TimerKey::StatusRefresh, period);
        panel
    }

    pub fn services(&self) -> &[ServiceStatus] {
        &self.services
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    /// "Live" while the ticker runs, "Paused" otherwise.
    pub fn is_live(&self) -> bool {
        self.auto_refresh
    }

    pub fn toggle_auto_refresh(&mut self) {
        self.set_auto_refresh(!self.auto_refresh);
    }

    pub fn set_auto_refresh(&mut self, enabled: bool) {
        if enabled == self.auto_refresh {
            return;
        }
        self.auto_refresh = enabled;
        if enabled {
            self.timers.every(TimerKey::StatusRefresh, self.period);
        } else {
            self.timers.cancel(TimerKey::StatusRefresh);
        }
        debug!(enabled, "Status auto-refresh toggled");
    }

    pub fn refresh(&mut self, now: DateTime<Utc>) {
        self.last_updated = now;
        for service in &mut self.services {
            service.last_checked_at = now;
        }
    }

    pub fn online_count(&self) -> usize {
        self.services.iter().filter(|s| s.is_online()).count()
    }

    pub fn total(&self) -> usize {
        self.services.len()
    }

    pub fn mean_uptime(&self) -> f64 {
        if self.services.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.services.iter().map(|s| s.uptime_percent).sum();
        sum / self.services.len() as f64
    }

    pub fn monitoring_label(&self) -> &'static str {
        MONITORING_LABEL
    }

    pub fn handle_timer(&mut self, event: &TimerEvent, now: DateTime<Utc>) -> bool {
        if event.key != TimerKey::StatusRefresh || !self.timers.accept(event) {
            return false;
        }
        self.refresh(now);
        true
    }
}
