//! Problem notifications.
//!
//! A notification is one channel configuration. The channel type is carried
//! in the `type` field and selects one of the [`NotificationConfig`]
//! variants.

mod channels;
mod model;
mod record;
mod service;

pub use channels::{
    AnsibleTowerConfig, EmailConfig, GenericConfig, HttpHeader, JiraConfig, OpsGenieConfig,
    PagerDutyConfig, ServiceNowConfig, SlackConfig, TrelloConfig, VictorOpsConfig, WebhookConfig,
    XMattersConfig,
};
pub use model::NotificationConfig;
pub use record::NotificationRecord;
pub use service::{PATH, ServiceClient};
