//! NotificationFormatter.
//!
//! Maps a [`ProcessedEvent`] to a [`Notification`] through a fixed rule per
//! variant. Formatting is total and has no side effects.

use crate::config::DeploymentConfig;
use crate::utils::first_present_or;
use pevn_sdk::objects::{
    DeploymentBody, GenericBody, GenericEvent, Notification, NotificationBody, ProcessedEvent,
    RawEvent, ServiceDeploymentEvent,
};
use pevn_sdk::timestamp::iso8601;
use time::OffsetDateTime;

/// Subject text of every generic notification, after the environment tag.
pub const GENERIC_SUBJECT: &str = "Platform Event Notification";
/// Title of every generic notification body.
pub const GENERIC_TITLE: &str = "Platform Event Processed";

const UNKNOWN: &str = "Unknown";

/// Formats processed events into notifications for the configured environment.
#[derive(Debug, Clone)]
pub struct NotificationFormatter {
    config: DeploymentConfig,
}

impl NotificationFormatter {
    pub fn new(config: DeploymentConfig) -> Self {
        Self { config }
    }

    pub fn format(&self, evt: &ProcessedEvent) -> Notification {
        self.render(evt, None, OffsetDateTime::now_utc())
    }

    /// Format with an explicit clock. `now` only affects generic events, whose
    /// body timestamp records when the notification was formatted.
    pub fn format_at(&self, evt: &ProcessedEvent, now: OffsetDateTime) -> Notification {
        self.render(evt, None, now)
    }

    /// Format a processed event alongside the envelope it came from.
    ///
    /// A generic event with an empty type or source takes it from the
    /// envelope's `detail-type` or `source` before falling back to `Unknown`.
    pub fn format_with_raw(&self, evt: &ProcessedEvent, raw: &RawEvent) -> Notification {
        self.render(evt, Some(raw), OffsetDateTime::now_utc())
    }

    pub fn format_with_raw_at(
        &self,
        evt: &ProcessedEvent,
        raw: &RawEvent,
        now: OffsetDateTime,
    ) -> Notification {
        self.render(evt, Some(raw), now)
    }

    fn render(
        &self,
        evt: &ProcessedEvent,
        raw: Option<&RawEvent>,
        now: OffsetDateTime,
    ) -> Notification {
        match evt {
            ProcessedEvent::ServiceDeployment(deployment) => self.service_deployment(deployment),
            ProcessedEvent::Generic(generic) => self.generic(evt, generic, raw, now),
        }
    }

    fn service_deployment(&self, evt: &ServiceDeploymentEvent) -> Notification {
        let status = evt.deployment_status.clone().unwrap_or_default();
        let service = evt.service_name.clone().unwrap_or_default();

        Notification {
            subject: format!(
                "[{}] Proton Service {service} - {status}",
                self.config.environment_tag()
            ),
            body: NotificationBody::ServiceDeployment(DeploymentBody {
                title: format!("Service Deployment {status}"),
                service: evt.service_name.clone(),
                status: evt.deployment_status.clone(),
                template: evt.template_name.clone(),
                version: evt.template_version.clone(),
                timestamp: evt.timestamp.clone(),
                environment: self.config.environment.clone(),
            }),
        }
    }

    fn generic(
        &self,
        details: &ProcessedEvent,
        evt: &GenericEvent,
        raw: Option<&RawEvent>,
        now: OffsetDateTime,
    ) -> Notification {
        let event_type = first_present_or(
            [Some(&evt.event_type), raw.map(|r| &r.detail_type)],
            UNKNOWN,
        );
        let source = first_present_or([Some(&evt.event_source), raw.map(|r| &r.source)], UNKNOWN);

        Notification {
            subject: format!("[{}] {GENERIC_SUBJECT}", self.config.environment_tag()),
            body: NotificationBody::Generic(GenericBody {
                title: GENERIC_TITLE.to_string(),
                event_type,
                source,
                // Format time, not the event's own timestamp.
                timestamp: iso8601(now),
                details: details.clone(),
                environment: self.config.environment.clone(),
            }),
        }
    }
}
