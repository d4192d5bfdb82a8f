use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Online,
    Degraded,
    Offline,
}

impl StatusKind {
    pub fn all() -> &'static [StatusKind] {
        &[StatusKind::Online, StatusKind::Degraded, StatusKind::Offline]
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusKind::Online => "Online",
            StatusKind::Degraded => "Degraded",
            StatusKind::Offline => "Offline",
        }
    }

    /// Legend text.
    pub fn description(&self) -> &'static str {
        match self {
            StatusKind::Online => "Fully operational",
            StatusKind::Degraded => "Partial issues",
            StatusKind::Offline => "Not available",
        }
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusKind::Online => write!(f, "online"),
            StatusKind::Degraded => write!(f, "degraded"),
            StatusKind::Offline => write!(f, "offline"),
        }
    }
}

/// Static description of a monitored service, as listed in the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceSpec {
    pub name: &'static str,
    pub status: StatusKind,
    pub uptime_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceStatus {
    pub name: &'static str,
    pub status: StatusKind,
    pub uptime_percent: f64,
    pub last_checked_at: DateTime<Utc>,
}

impl ServiceStatus {
    pub fn from_spec(spec: &ServiceSpec, checked_at: DateTime<Utc>) -> Self {
        Self {
            name: spec.name,
            status: spec.status,
            uptime_percent: spec.uptime_percent,
            last_checked_at: checked_at,
        }
    }

    pub fn is_online(&self) -> bool {
        self.status == StatusKind::Online
    }

    pub fn uptime_label(&self) -> String {
        format!("{:.1}%", self.uptime_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_kind_labels() {
        assert_eq!(StatusKind::Online.label(), "Online");
        assert_eq!(StatusKind::Degraded.to_string(), "degraded");
        assert_eq!(StatusKind::Offline.description(), "Not available");
        assert_eq!(StatusKind::all().len(), 3);
    }

    #[test]
    fn test_from_spec() {
        let spec = ServiceSpec {
            name: "Automations",
            status: StatusKind::Degraded,
            uptime_percent: 98.5,
        };
        let now = Utc::now();
        let status = ServiceStatus::from_spec(&spec, now);

        assert_eq!(status.name, "Automations");
        assert!(!status.is_online());
        assert_eq!(status.uptime_label(), "98.5%");
        assert_eq!(status.last_checked_at, now);
    }
}
