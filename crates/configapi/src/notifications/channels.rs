//! Concrete notification channel configurations.
//!
//! Every channel shares `id`, `name`, `alertingProfile` and `active`. The
//! discriminator is not stored here; [`NotificationConfig`] supplies it.
//! Secrets are returned as `null` by the server, so they are optional.
//!
//! [`NotificationConfig`]: super::NotificationConfig

use crate::api::Unknowns;
use hclkit::{Attribute, Kind, Marshaler, Properties, Schema, Schematic, Unmarshaler};
use serde::{Deserialize, Serialize};

fn encode_common(
    properties: &mut Properties,
    name: &str,
    alerting_profile: &str,
    active: bool,
) {
    properties.encode("name", name);
    properties.encode("alerting_profile", alerting_profile);
    properties.encode("active", &active);
}

fn common_schema() -> Schema {
    Schema::new()
        .attr("name", Attribute::string().required().describe("The name of the notification configuration"))
        .attr(
            "alerting_profile",
            Attribute::string()
                .required()
                .describe("The ID of the associated alerting profile"),
        )
        .attr(
            "active",
            Attribute::bool()
                .required()
                .describe("The configuration is enabled (`true`) or disabled (`false`)"),
        )
        .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
}

fn secret(description: &str) -> Attribute {
    Attribute::string().sensitive().describe(description)
}

// =============================================================================
// Email
// =============================================================================

/// Email notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmailConfig {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Alerting profile ID.
    pub alerting_profile: String,
    /// Enabled.
    pub active: bool,
    /// Subject line.
    pub subject: String,
    /// Body template.
    pub body: String,
    /// Recipients.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub receivers: Vec<String>,
    /// CC recipients.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc_receivers: Vec<String>,
    /// BCC recipients.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bcc_receivers: Vec<String>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for EmailConfig {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        encode_common(properties, &self.name, &self.alerting_profile, self.active);
        properties.encode("subject", &self.subject);
        properties.encode("body", &self.body);
        properties.encode_list("receivers", &self.receivers);
        properties.encode_list("cc_receivers", &self.cc_receivers);
        properties.encode_list("bcc_receivers", &self.bcc_receivers);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for EmailConfig {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            id: None,
            name: decoder.decode("name")?,
            alerting_profile: decoder.decode("alerting_profile")?,
            active: decoder.decode_or_default("active")?,
            subject: decoder.decode("subject")?,
            body: decoder.decode("body")?,
            receivers: decoder.decode_or_default("receivers")?,
            cc_receivers: decoder.decode_or_default("cc_receivers")?,
            bcc_receivers: decoder.decode_or_default("bcc_receivers")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for EmailConfig {
    fn schema() -> Schema {
        common_schema()
            .attr("subject", Attribute::string().required().describe("The subject of the email notifications"))
            .attr("body", Attribute::string().required().describe("The template of the email notification"))
            .attr("receivers", Attribute::set(Kind::String).describe("The list of the email recipients"))
            .attr("cc_receivers", Attribute::set(Kind::String).describe("The list of the email CC-recipients"))
            .attr("bcc_receivers", Attribute::set(Kind::String).describe("The list of the email BCC-recipients"))
    }
}

// =============================================================================
// Slack
// =============================================================================

/// Slack notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SlackConfig {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Alerting profile ID.
    pub alerting_profile: String,
    /// Enabled.
    pub active: bool,
    /// Incoming webhook URL (secret).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Channel to post to.
    pub channel: String,
    /// Message template.
    pub title: String,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for SlackConfig {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        encode_common(properties, &self.name, &self.alerting_profile, self.active);
        properties.encode_opt("url", self.url.as_ref());
        properties.encode("channel", &self.channel);
        properties.encode("title", &self.title);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for SlackConfig {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            id: None,
            name: decoder.decode("name")?,
            alerting_profile: decoder.decode("alerting_profile")?,
            active: decoder.decode_or_default("active")?,
            url: decoder.decode_opt("url")?,
            channel: decoder.decode("channel")?,
            title: decoder.decode("title")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for SlackConfig {
    fn schema() -> Schema {
        common_schema()
            .attr("url", secret("The URL of the Slack WebHook. This is confidential information, therefore GET requests return this field with the `null` value"))
            .attr("channel", Attribute::string().required().describe("The channel (for example, `#general`) or the user (for example, `@john.smith`) to send the message to"))
            .attr("title", Attribute::string().required().describe("The content of the message"))
    }
}

// =============================================================================
// Jira
// =============================================================================

/// Jira issue creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JiraConfig {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Alerting profile ID.
    pub alerting_profile: String,
    /// Enabled.
    pub active: bool,
    /// Jira API endpoint.
    pub url: String,
    /// Jira user.
    pub username: String,
    /// Jira password or API token (secret).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Project the issue is created in.
    pub project_key: String,
    /// Issue type.
    pub issue_type: String,
    /// Issue summary template.
    pub summary: String,
    /// Issue description template.
    pub description: String,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for JiraConfig {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        encode_common(properties, &self.name, &self.alerting_profile, self.active);
        properties.encode("url", &self.url);
        properties.encode("username", &self.username);
        properties.encode_opt("password", self.password.as_ref());
        properties.encode("project_key", &self.project_key);
        properties.encode("issue_type", &self.issue_type);
        properties.encode("summary", &self.summary);
        properties.encode("description", &self.description);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for JiraConfig {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            id: None,
            name: decoder.decode("name")?,
            alerting_profile: decoder.decode("alerting_profile")?,
            active: decoder.decode_or_default("active")?,
            url: decoder.decode("url")?,
            username: decoder.decode("username")?,
            password: decoder.decode_opt("password")?,
            project_key: decoder.decode("project_key")?,
            issue_type: decoder.decode("issue_type")?,
            summary: decoder.decode("summary")?,
            description: decoder.decode("description")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for JiraConfig {
    fn schema() -> Schema {
        common_schema()
            .attr("url", Attribute::string().required().describe("The URL of the Jira API endpoint"))
            .attr("username", Attribute::string().required().describe("The username of the Jira profile"))
            .attr("password", secret("The password for the Jira profile"))
            .attr("project_key", Attribute::string().required().describe("The project key of the Jira issue to be created by this notification"))
            .attr("issue_type", Attribute::string().required().describe("The type of the Jira issue to be created by this notification"))
            .attr("summary", Attribute::string().required().describe("The summary of the Jira issue to be created by this notification"))
            .attr("description", Attribute::string().required().describe("The description of the Jira issue to be created by this notification"))
    }
}

// =============================================================================
// PagerDuty
// =============================================================================

/// PagerDuty incident.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PagerDutyConfig {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Alerting profile ID.
    pub alerting_profile: String,
    /// Enabled.
    pub active: bool,
    /// PagerDuty account.
    pub account: String,
    /// Service integration key (secret).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_api_key: Option<String>,
    /// PagerDuty service.
    pub service_name: String,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for PagerDutyConfig {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        encode_common(properties, &self.name, &self.alerting_profile, self.active);
        properties.encode("account", &self.account);
        properties.encode_opt("service_api_key", self.service_api_key.as_ref());
        properties.encode("service_name", &self.service_name);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for PagerDutyConfig {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            id: None,
            name: decoder.decode("name")?,
            alerting_profile: decoder.decode("alerting_profile")?,
            active: decoder.decode_or_default("active")?,
            account: decoder.decode("account")?,
            service_api_key: decoder.decode_opt("service_api_key")?,
            service_name: decoder.decode("service_name")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for PagerDutyConfig {
    fn schema() -> Schema {
        common_schema()
            .attr("account", Attribute::string().required().describe("The name of the PagerDuty account"))
            .attr("service_api_key", secret("The API key to access PagerDuty"))
            .attr("service_name", Attribute::string().required().describe("The name of the service"))
    }
}

// =============================================================================
// Webhook / xMatters
// =============================================================================

/// An HTTP header sent with a webhook call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpHeader {
    /// Header name.
    pub name: String,
    /// Header value; `null` when the server hides it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for HttpHeader {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("name", &self.name);
        properties.encode_opt("value", self.value.as_ref());
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for HttpHeader {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            name: decoder.decode("name")?,
            value: decoder.decode_opt("value")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|h: Self| h.unknowns)?,
        })
    }
}

impl Schematic for HttpHeader {
    fn schema() -> Schema {
        Schema::new()
            .attr("name", Attribute::string().required().describe("The name of the HTTP header"))
            .attr("value", Attribute::string().describe("The value of the HTTP header. May contain an empty value"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Custom webhook call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebhookConfig {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Alerting profile ID.
    pub alerting_profile: String,
    /// Enabled.
    pub active: bool,
    /// Webhook URL.
    pub url: String,
    /// Accept any TLS certificate, including self-signed ones.
    pub accept_any_certificate: bool,
    /// Request body template.
    pub payload: String,
    /// Extra headers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<HttpHeader>,
    /// Also call for event merges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_event_merges_enabled: Option<bool>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for WebhookConfig {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        encode_common(properties, &self.name, &self.alerting_profile, self.active);
        properties.encode("url", &self.url);
        properties.encode("accept_any_certificate", &self.accept_any_certificate);
        properties.encode("payload", &self.payload);
        properties.encode_blocks("header", &self.headers)?;
        properties.encode_opt("notify_event_merges", self.notify_event_merges_enabled.as_ref());
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for WebhookConfig {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            id: None,
            name: decoder.decode("name")?,
            alerting_profile: decoder.decode("alerting_profile")?,
            active: decoder.decode_or_default("active")?,
            url: decoder.decode("url")?,
            accept_any_certificate: decoder.decode_or_default("accept_any_certificate")?,
            payload: decoder.decode("payload")?,
            headers: decoder.decode_blocks("header")?,
            notify_event_merges_enabled: decoder.decode_opt("notify_event_merges")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for WebhookConfig {
    fn schema() -> Schema {
        common_schema()
            .attr("url", Attribute::string().required().describe("The URL of the WebHook endpoint"))
            .attr("accept_any_certificate", Attribute::bool().describe("Accept any, including self-signed and invalid, SSL certificate (`true`) or only trusted (`false`) certificates"))
            .attr("payload", Attribute::string().required().describe("The content of the notification message"))
            .attr("header", Attribute::block(HttpHeader::schema()).describe("A list of the additional HTTP headers"))
            .attr("notify_event_merges", Attribute::bool().describe("Call webhook if new events merge into existing problems"))
    }
}

/// xMatters notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct XMattersConfig {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Alerting profile ID.
    pub alerting_profile: String,
    /// Enabled.
    pub active: bool,
    /// xMatters inbound integration URL.
    pub url: String,
    /// Accept any TLS certificate.
    pub accept_any_certificate: bool,
    /// Request body template.
    pub payload: String,
    /// Extra headers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<HttpHeader>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for XMattersConfig {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        encode_common(properties, &self.name, &self.alerting_profile, self.active);
        properties.encode("url", &self.url);
        properties.encode("accept_any_certificate", &self.accept_any_certificate);
        properties.encode("payload", &self.payload);
        properties.encode_blocks("header", &self.headers)?;
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for XMattersConfig {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            id: None,
            name: decoder.decode("name")?,
            alerting_profile: decoder.decode("alerting_profile")?,
            active: decoder.decode_or_default("active")?,
            url: decoder.decode("url")?,
            accept_any_certificate: decoder.decode_or_default("accept_any_certificate")?,
            payload: decoder.decode("payload")?,
            headers: decoder.decode_blocks("header")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for XMattersConfig {
    fn schema() -> Schema {
        common_schema()
            .attr("url", Attribute::string().required().describe("The URL of the xMatters WebHook"))
            .attr("accept_any_certificate", Attribute::bool())
            .attr("payload", Attribute::string().required().describe("The content of the message"))
            .attr("header", Attribute::block(HttpHeader::schema()))
    }
}

// =============================================================================
// OpsGenie / VictorOps
// =============================================================================

/// OpsGenie alert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OpsGenieConfig {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Alerting profile ID.
    pub alerting_profile: String,
    /// Enabled.
    pub active: bool,
    /// API key (secret).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// OpsGenie region domain.
    pub domain: String,
    /// Message template.
    pub message: String,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for OpsGenieConfig {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        encode_common(properties, &self.name, &self.alerting_profile, self.active);
        properties.encode_opt("api_key", self.api_key.as_ref());
        properties.encode("domain", &self.domain);
        properties.encode("message", &self.message);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for OpsGenieConfig {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            id: None,
            name: decoder.decode("name")?,
            alerting_profile: decoder.decode("alerting_profile")?,
            active: decoder.decode_or_default("active")?,
            api_key: decoder.decode_opt("api_key")?,
            domain: decoder.decode("domain")?,
            message: decoder.decode("message")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for OpsGenieConfig {
    fn schema() -> Schema {
        common_schema()
            .attr("api_key", secret("The API key to access OpsGenie"))
            .attr("domain", Attribute::string().required().describe("The region domain of the OpsGenie"))
            .attr("message", Attribute::string().required().describe("The content of the message"))
    }
}

/// VictorOps incident.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VictorOpsConfig {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Alerting profile ID.
    pub alerting_profile: String,
    /// Enabled.
    pub active: bool,
    /// API key (secret).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Routing key.
    pub routing_key: String,
    /// Message template.
    pub message: String,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for VictorOpsConfig {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        encode_common(properties, &self.name, &self.alerting_profile, self.active);
        properties.encode_opt("api_key", self.api_key.as_ref());
        properties.encode("routing_key", &self.routing_key);
        properties.encode("message", &self.message);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for VictorOpsConfig {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            id: None,
            name: decoder.decode("name")?,
            alerting_profile: decoder.decode("alerting_profile")?,
            active: decoder.decode_or_default("active")?,
            api_key: decoder.decode_opt("api_key")?,
            routing_key: decoder.decode("routing_key")?,
            message: decoder.decode("message")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for VictorOpsConfig {
    fn schema() -> Schema {
        common_schema()
            .attr("api_key", secret("The API key for the target VictorOps account"))
            .attr("routing_key", Attribute::string().required().describe("The routing key, defining the group to be notified"))
            .attr("message", Attribute::string().required().describe("The content of the message"))
    }
}

// =============================================================================
// ServiceNow
// =============================================================================

/// ServiceNow incident or event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceNowConfig {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Alerting profile ID.
    pub alerting_profile: String,
    /// Enabled.
    pub active: bool,
    /// ServiceNow instance identifier (SaaS).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<String>,
    /// ServiceNow URL (on-premise).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// ServiceNow user.
    pub username: String,
    /// ServiceNow password (secret).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Message template.
    pub message: String,
    /// Create incidents.
    pub send_incidents: bool,
    /// Send events to ITOM.
    pub send_events: bool,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for ServiceNowConfig {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        encode_common(properties, &self.name, &self.alerting_profile, self.active);
        properties.encode_opt("instance_name", self.instance_name.as_ref());
        properties.encode_opt("url", self.url.as_ref());
        properties.encode("username", &self.username);
        properties.encode_opt("password", self.password.as_ref());
        properties.encode("message", &self.message);
        properties.encode("incidents", &self.send_incidents);
        properties.encode("events", &self.send_events);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for ServiceNowConfig {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            id: None,
            name: decoder.decode("name")?,
            alerting_profile: decoder.decode("alerting_profile")?,
            active: decoder.decode_or_default("active")?,
            instance_name: decoder.decode_opt("instance_name")?,
            url: decoder.decode_opt("url")?,
            username: decoder.decode("username")?,
            password: decoder.decode_opt("password")?,
            message: decoder.decode("message")?,
            send_incidents: decoder.decode_or_default("incidents")?,
            send_events: decoder.decode_or_default("events")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for ServiceNowConfig {
    fn schema() -> Schema {
        common_schema()
            .attr("instance_name", Attribute::string().describe("The ServiceNow instance identifier. It refers to the first part of your own ServiceNow URL"))
            .attr("url", Attribute::string().describe("The URL of the on-premise ServiceNow installation"))
            .attr("username", Attribute::string().required().describe("The username of the ServiceNow account"))
            .attr("password", secret("The password to the ServiceNow account"))
            .attr("message", Attribute::string().required().describe("The content of the ServiceNow description"))
            .attr("incidents", Attribute::bool().describe("Send incidents into ServiceNow ITSM"))
            .attr("events", Attribute::bool().describe("Send events into ServiceNow ITOM"))
    }
}

// =============================================================================
// Trello
// =============================================================================

/// Trello card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrelloConfig {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Alerting profile ID.
    pub alerting_profile: String,
    /// Enabled.
    pub active: bool,
    /// Application key.
    pub application_key: String,
    /// Authorization token (secret).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_token: Option<String>,
    /// Board the card goes to.
    pub board_id: String,
    /// List for new cards.
    pub list_id: String,
    /// List for resolved cards.
    pub resolved_list_id: String,
    /// Card title template.
    pub text: String,
    /// Card description template.
    pub description: String,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for TrelloConfig {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        encode_common(properties, &self.name, &self.alerting_profile, self.active);
        properties.encode("application_key", &self.application_key);
        properties.encode_opt("authorization_token", self.authorization_token.as_ref());
        properties.encode("board_id", &self.board_id);
        properties.encode("list_id", &self.list_id);
        properties.encode("resolved_list_id", &self.resolved_list_id);
        properties.encode("text", &self.text);
        properties.encode("description", &self.description);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for TrelloConfig {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            id: None,
            name: decoder.decode("name")?,
            alerting_profile: decoder.decode("alerting_profile")?,
            active: decoder.decode_or_default("active")?,
            application_key: decoder.decode("application_key")?,
            authorization_token: decoder.decode_opt("authorization_token")?,
            board_id: decoder.decode("board_id")?,
            list_id: decoder.decode("list_id")?,
            resolved_list_id: decoder.decode("resolved_list_id")?,
            text: decoder.decode("text")?,
            description: decoder.decode("description")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for TrelloConfig {
    fn schema() -> Schema {
        common_schema()
            .attr("application_key", Attribute::string().required().describe("The application key for the Trello account"))
            .attr("authorization_token", secret("The application token for the Trello account"))
            .attr("board_id", Attribute::string().required().describe("The Trello board to which the card should be assigned"))
            .attr("list_id", Attribute::string().required().describe("The Trello list to which the card should be assigned"))
            .attr("resolved_list_id", Attribute::string().required().describe("The Trello list to which the card of the resolved problem should be assigned"))
            .attr("text", Attribute::string().required().describe("The text of the generated Trello card"))
            .attr("description", Attribute::string().required().describe("The description of the Trello card"))
    }
}

// =============================================================================
// Ansible Tower
// =============================================================================

/// Ansible Tower job launch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnsibleTowerConfig {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Alerting profile ID.
    pub alerting_profile: String,
    /// Enabled.
    pub active: bool,
    /// URL of the job template.
    #[serde(rename = "jobTemplateURL")]
    pub job_template_url: String,
    /// Numeric ID of the job template.
    #[serde(rename = "jobTemplateID")]
    pub job_template_id: i32,
    /// Accept any TLS certificate.
    pub accept_any_certificate: bool,
    /// Tower user.
    pub username: String,
    /// Tower password (secret).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Message passed to the job.
    pub custom_message: String,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for AnsibleTowerConfig {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        encode_common(properties, &self.name, &self.alerting_profile, self.active);
        properties.encode("job_template_url", &self.job_template_url);
        properties.encode("job_template_id", &self.job_template_id);
        properties.encode("accept_any_certificate", &self.accept_any_certificate);
        properties.encode("username", &self.username);
        properties.encode_opt("password", self.password.as_ref());
        properties.encode("custom_message", &self.custom_message);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for AnsibleTowerConfig {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            id: None,
            name: decoder.decode("name")?,
            alerting_profile: decoder.decode("alerting_profile")?,
            active: decoder.decode_or_default("active")?,
            job_template_url: decoder.decode("job_template_url")?,
            job_template_id: decoder.decode_or_default("job_template_id")?,
            accept_any_certificate: decoder.decode_or_default("accept_any_certificate")?,
            username: decoder.decode("username")?,
            password: decoder.decode_opt("password")?,
            custom_message: decoder.decode_or_default("custom_message")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for AnsibleTowerConfig {
    fn schema() -> Schema {
        common_schema()
            .attr("job_template_url", Attribute::string().required().describe("The URL of the target Ansible Tower job template"))
            .attr("job_template_id", Attribute::int().describe("The ID of the target Ansible Tower job template"))
            .attr("accept_any_certificate", Attribute::bool())
            .attr("username", Attribute::string().required().describe("The username of the Ansible Tower account"))
            .attr("password", secret("The password for the Ansible Tower account"))
            .attr("custom_message", Attribute::string().describe("The custom message of the notification"))
    }
}

// =============================================================================
// Generic
// =============================================================================

/// A channel whose type this client does not model.
///
/// Keeps the discriminator and the common fields; everything else is
/// preserved in `unknowns`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenericConfig {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The discriminator, as received.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Display name.
    pub name: String,
    /// Alerting profile ID.
    pub alerting_profile: String,
    /// Enabled.
    pub active: bool,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for GenericConfig {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("type", &self.type_name);
        encode_common(properties, &self.name, &self.alerting_profile, self.active);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for GenericConfig {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            id: None,
            type_name: decoder.decode("type")?,
            name: decoder.decode("name")?,
            alerting_profile: decoder.decode("alerting_profile")?,
            active: decoder.decode_or_default("active")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for GenericConfig {
    fn schema() -> Schema {
        common_schema().attr(
            "type",
            Attribute::string().required().describe("The type of the notification"),
        )
    }
}
