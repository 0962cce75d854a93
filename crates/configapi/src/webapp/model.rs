//! Web application monitoring settings.

use super::data_privacy::ApplicationDataPrivacy;
use super::key_user_actions::KeyUserAction;
use crate::api::{ConfigMetadata, Entity, Unknowns};
use hclkit::{Attribute, Kind, Marshaler, Properties, Schema, Schematic, Unmarshaler};
use serde::{Deserialize, Serialize};

string_enum! {
    /// How the monitoring code gets into the application.
    pub enum ApplicationType {
        /// Injected automatically by the agent.
        AutoInjected => "AUTO_INJECTED",
        /// Injected by a browser extension.
        BrowserExtensionInjected => "BROWSER_EXTENSION_INJECTED",
        /// Added to the pages by hand (agentless).
        ManuallyInjected => "MANUALLY_INJECTED",
    }
}

string_enum! {
    /// Key performance metric for load actions.
    pub enum LoadActionKeyPerformanceMetric {
        /// Total action duration.
        ActionDuration => "ACTION_DURATION",
        /// Cumulative layout shift.
        CumulativeLayoutShift => "CUMULATIVE_LAYOUT_SHIFT",
        /// DOM interactive.
        DomInteractive => "DOM_INTERACTIVE",
        /// First input delay.
        FirstInputDelay => "FIRST_INPUT_DELAY",
        /// Largest contentful paint.
        LargestContentfulPaint => "LARGEST_CONTENTFUL_PAINT",
        /// Load event end.
        LoadEventEnd => "LOAD_EVENT_END",
        /// Load event start.
        LoadEventStart => "LOAD_EVENT_START",
        /// Response end.
        ResponseEnd => "RESPONSE_END",
        /// Response start.
        ResponseStart => "RESPONSE_START",
        /// Speed index.
        SpeedIndex => "SPEED_INDEX",
        /// Visually complete.
        VisuallyComplete => "VISUALLY_COMPLETE",
    }
}

string_enum! {
    /// Key performance metric for XHR actions.
    pub enum XhrActionKeyPerformanceMetric {
        /// Total action duration.
        ActionDuration => "ACTION_DURATION",
        /// Response end.
        ResponseEnd => "RESPONSE_END",
        /// Response start.
        ResponseStart => "RESPONSE_START",
        /// Visually complete.
        VisuallyComplete => "VISUALLY_COMPLETE",
    }
}

string_enum! {
    /// Where the monitoring code is placed in the page.
    pub enum InjectionMode {
        /// `<script>` tag referencing the library.
        JavascriptTag => "JAVASCRIPT_TAG",
        /// Inline code.
        InlineCode => "INLINE_CODE",
        /// Synchronous snippet.
        CodeSnippet => "CODE_SNIPPET",
        /// Asynchronous snippet.
        CodeSnippetAsync => "CODE_SNIPPET_ASYNC",
    }
}

string_enum! {
    /// Kind of conversion goal.
    pub enum ConversionGoalType {
        /// Reaching a destination URL.
        Destination => "Destination",
        /// Performing a user action.
        UserAction => "UserAction",
        /// Staying for a minimum duration.
        VisitDuration => "VisitDuration",
        /// Performing a minimum number of actions.
        VisitNumActions => "VisitNumActions",
    }
}

string_enum! {
    /// How a conversion goal value is matched.
    pub enum MatchType {
        /// Prefix match.
        Begins => "Begins",
        /// Substring match.
        Contains => "Contains",
        /// Suffix match.
        Ends => "Ends",
    }
}

/// Settings of a web application.
///
/// `key_user_actions` and `data_privacy` live on their own endpoints. They
/// are not part of the JSON payload of the application itself; the service
/// client reads and writes them separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationConfig {
    /// Server-assigned identifier.
    #[serde(rename = "identifier", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Injection type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub application_type: Option<ApplicationType>,
    /// Real user monitoring on or off.
    pub real_user_monitoring_enabled: bool,
    /// Percentage of user sessions captured.
    pub cost_control_user_session_percentage: f64,
    /// Key performance metric for load actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_action_key_performance_metric: Option<LoadActionKeyPerformanceMetric>,
    /// Key performance metric for XHR actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xhr_action_key_performance_metric: Option<XhrActionKeyPerformanceMetric>,
    /// URL pattern for the manual injection snippet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_injection_pattern: Option<String>,
    /// Session replay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_replay_config: Option<SessionReplayConfig>,
    /// Monitoring code settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitoring_settings: Option<MonitoringSettings>,
    /// User tag rules.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_tags: Vec<UserTag>,
    /// Conversion goals.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conversion_goals: Vec<ConversionGoal>,
    /// Server bookkeeping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ConfigMetadata>,
    /// Key user actions (separate endpoint).
    #[serde(skip)]
    pub key_user_actions: Vec<KeyUserAction>,
    /// Data privacy settings (separate endpoint).
    #[serde(skip)]
    pub data_privacy: Option<ApplicationDataPrivacy>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Entity for ApplicationConfig {
    const KIND: &'static str = "web application";
    const RESOURCE_TYPE: &'static str = "web_application";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Marshaler for ApplicationConfig {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("name", &self.name);
        properties.encode_opt("type", self.application_type.as_ref());
        properties.encode(
            "real_user_monitoring_enabled",
            &self.real_user_monitoring_enabled,
        );
        properties.encode(
            "cost_control_user_session_percentage",
            &self.cost_control_user_session_percentage,
        );
        properties.encode_opt(
            "load_action_key_performance_metric",
            self.load_action_key_performance_metric.as_ref(),
        );
        properties.encode_opt(
            "xhr_action_key_performance_metric",
            self.xhr_action_key_performance_metric.as_ref(),
        );
        properties.encode_opt("url_injection_pattern", self.url_injection_pattern.as_ref());
        properties.encode_block_opt("session_replay_config", self.session_replay_config.as_ref())?;
        properties.encode_block_opt("monitoring_settings", self.monitoring_settings.as_ref())?;
        properties.encode_blocks("user_tag", &self.user_tags)?;
        properties.encode_blocks("conversion_goal", &self.conversion_goals)?;
        properties.encode_blocks("key_user_action", &self.key_user_actions)?;
        properties.encode_block_opt("data_privacy", self.data_privacy.as_ref())?;
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for ApplicationConfig {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            id: None,
            name: decoder.decode("name")?,
            application_type: decoder.decode_opt("type")?,
            real_user_monitoring_enabled: decoder.decode_or_default("real_user_monitoring_enabled")?,
            cost_control_user_session_percentage: decoder
                .decode_or_default("cost_control_user_session_percentage")?,
            load_action_key_performance_metric: decoder
                .decode_opt("load_action_key_performance_metric")?,
            xhr_action_key_performance_metric: decoder
                .decode_opt("xhr_action_key_performance_metric")?,
            url_injection_pattern: decoder.decode_opt("url_injection_pattern")?,
            session_replay_config: decoder.decode_block("session_replay_config")?,
            monitoring_settings: decoder.decode_block("monitoring_settings")?,
            user_tags: decoder.decode_blocks("user_tag")?,
            conversion_goals: decoder.decode_blocks("conversion_goal")?,
            metadata: None,
            key_user_actions: decoder.decode_blocks("key_user_action")?,
            data_privacy: decoder.decode_block("data_privacy")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|a: Self| a.unknowns)?,
        })
    }
}

impl Schematic for ApplicationConfig {
    fn schema() -> Schema {
        Schema::new()
            .attr(
                "name",
                Attribute::string()
                    .required()
                    .describe("The name of the web application, displayed in the UI"),
            )
            .attr(
                "type",
                Attribute::string().describe(
                    "AUTO_INJECTED, BROWSER_EXTENSION_INJECTED or MANUALLY_INJECTED",
                ),
            )
            .attr(
                "real_user_monitoring_enabled",
                Attribute::bool().describe("Real user monitoring enabled/disabled"),
            )
            .attr(
                "cost_control_user_session_percentage",
                Attribute::float()
                    .describe("Analyze this percentage of user sessions (0 to 100)"),
            )
            .attr(
                "load_action_key_performance_metric",
                Attribute::string().describe("The key performance metric of load actions"),
            )
            .attr(
                "xhr_action_key_performance_metric",
                Attribute::string().describe("The key performance metric of XHR actions"),
            )
            .attr(
                "url_injection_pattern",
                Attribute::string().describe("URL injection pattern for manual web application"),
            )
            .attr(
                "session_replay_config",
                Attribute::single_block(SessionReplayConfig::schema())
                    .describe("Settings regarding Session Replay"),
            )
            .attr(
                "monitoring_settings",
                Attribute::single_block(MonitoringSettings::schema())
                    .describe("Real user monitoring settings"),
            )
            .attr(
                "user_tag",
                Attribute::block(UserTag::schema()).describe("User tag settings"),
            )
            .attr(
                "conversion_goal",
                Attribute::block(ConversionGoal::schema())
                    .describe("A list of conversion goals of the application"),
            )
            .attr(
                "key_user_action",
                Attribute::block(KeyUserAction::schema())
                    .describe("User actions marked as key user actions"),
            )
            .attr(
                "data_privacy",
                Attribute::single_block(ApplicationDataPrivacy::schema())
                    .describe("Data privacy settings"),
            )
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Session replay settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionReplayConfig {
    /// Session replay on or off.
    pub enabled: bool,
    /// Percentage of sessions recorded.
    pub cost_control_percentage: i32,
    /// Capture CSS resources.
    #[serde(rename = "enableCssResourceCapturing")]
    pub css_resource_capturing: bool,
    /// URL patterns excluded from CSS capturing.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub css_resource_capturing_exclusion_rules: Vec<String>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for SessionReplayConfig {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("enabled", &self.enabled);
        properties.encode("cost_control_percentage", &self.cost_control_percentage);
        properties.encode("enable_css_resource_capturing", &self.css_resource_capturing);
        properties.encode_list(
            "css_resource_capturing_exclusion_rules",
            &self.css_resource_capturing_exclusion_rules,
        );
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for SessionReplayConfig {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            enabled: decoder.decode_or_default("enabled")?,
            cost_control_percentage: decoder.decode_or_default("cost_control_percentage")?,
            css_resource_capturing: decoder.decode_or_default("enable_css_resource_capturing")?,
            css_resource_capturing_exclusion_rules: decoder
                .decode_or_default("css_resource_capturing_exclusion_rules")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|s: Self| s.unknowns)?,
        })
    }
}

impl Schematic for SessionReplayConfig {
    fn schema() -> Schema {
        Schema::new()
            .attr("enabled", Attribute::bool().describe("Session Replay on/off"))
            .attr(
                "cost_control_percentage",
                Attribute::int()
                    .required()
                    .describe("Session Replay sampling rating in percent"),
            )
            .attr(
                "enable_css_resource_capturing",
                Attribute::bool().describe("Capture (`true`) or don't capture (`false`) CSS resources"),
            )
            .attr(
                "css_resource_capturing_exclusion_rules",
                Attribute::list(Kind::String).describe("URLs excluded from CSS resource capturing"),
            )
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Monitoring code settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonitoringSettings {
    /// Capture `fetch()` requests.
    pub fetch_requests: bool,
    /// Capture `XmlHttpRequest` calls.
    #[serde(rename = "xmlHttpRequest")]
    pub xml_http_request: bool,
    /// Placement of the monitoring code.
    pub injection_mode: InjectionMode,
    /// XHR URLs matching this regex are not captured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_xhr_regex: Option<String>,
    /// Location of the monitoring library.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_file_location: Option<String>,
    /// Path that monitoring data is sent to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitoring_data_path: Option<String>,
    /// Extra configuration properties for the monitoring code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_configuration_properties: Option<String>,
    /// Path identifying the server's request ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_request_path_id: Option<String>,
    /// Set the `Secure` attribute on cookies.
    pub secure_cookie_attribute: bool,
    /// Domain for cookie placement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_placement_domain: Option<String>,
    /// Optimize the `Cache-Control` header of the monitoring code.
    pub cache_control_header_optimizations: bool,
    /// Framework instrumentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_script_framework_support: Option<JavaScriptFrameworkSupport>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for MonitoringSettings {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("fetch_requests", &self.fetch_requests);
        properties.encode("xml_http_request", &self.xml_http_request);
        properties.encode("injection_mode", &self.injection_mode);
        properties.encode_opt("exclude_xhr_regex", self.exclude_xhr_regex.as_ref());
        properties.encode_opt("library_file_location", self.library_file_location.as_ref());
        properties.encode_opt("monitoring_data_path", self.monitoring_data_path.as_ref());
        properties.encode_opt(
            "custom_configuration_properties",
            self.custom_configuration_properties.as_ref(),
        );
        properties.encode_opt("server_request_path_id", self.server_request_path_id.as_ref());
        properties.encode("secure_cookie_attribute", &self.secure_cookie_attribute);
        properties.encode_opt("cookie_placement_domain", self.cookie_placement_domain.as_ref());
        properties.encode(
            "cache_control_header_optimizations",
            &self.cache_control_header_optimizations,
        );
        properties.encode_block_opt(
            "javascript_framework_support",
            self.java_script_framework_support.as_ref(),
        )?;
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for MonitoringSettings {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            fetch_requests: decoder.decode_or_default("fetch_requests")?,
            xml_http_request: decoder.decode_or_default("xml_http_request")?,
            injection_mode: decoder.decode_or_default("injection_mode")?,
            exclude_xhr_regex: decoder.decode_opt("exclude_xhr_regex")?,
            library_file_location: decoder.decode_opt("library_file_location")?,
            monitoring_data_path: decoder.decode_opt("monitoring_data_path")?,
            custom_configuration_properties: decoder.decode_opt("custom_configuration_properties")?,
            server_request_path_id: decoder.decode_opt("server_request_path_id")?,
            secure_cookie_attribute: decoder.decode_or_default("secure_cookie_attribute")?,
            cookie_placement_domain: decoder.decode_opt("cookie_placement_domain")?,
            cache_control_header_optimizations: decoder
                .decode_or_default("cache_control_header_optimizations")?,
            java_script_framework_support: decoder.decode_block("javascript_framework_support")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|m: Self| m.unknowns)?,
        })
    }
}

impl Schematic for MonitoringSettings {
    fn schema() -> Schema {
        Schema::new()
            .attr("fetch_requests", Attribute::bool().describe("`fetch()` request capture enabled/disabled"))
            .attr("xml_http_request", Attribute::bool().describe("`XmlHttpRequest` support enabled/disabled"))
            .attr(
                "injection_mode",
                Attribute::string()
                    .required()
                    .describe("JAVASCRIPT_TAG, INLINE_CODE, CODE_SNIPPET or CODE_SNIPPET_ASYNC"),
            )
            .attr("exclude_xhr_regex", Attribute::string())
            .attr("library_file_location", Attribute::string())
            .attr("monitoring_data_path", Attribute::string())
            .attr("custom_configuration_properties", Attribute::string())
            .attr("server_request_path_id", Attribute::string())
            .attr("secure_cookie_attribute", Attribute::bool())
            .attr("cookie_placement_domain", Attribute::string())
            .attr("cache_control_header_optimizations", Attribute::bool())
            .attr(
                "javascript_framework_support",
                Attribute::single_block(JavaScriptFrameworkSupport::schema()),
            )
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Instrumented JavaScript frameworks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JavaScriptFrameworkSupport {
    /// AngularJS and Angular.
    pub angular: bool,
    /// Dojo.
    pub dojo: bool,
    /// ExtJS and Sencha Touch.
    #[serde(rename = "extJS")]
    pub ext_js: bool,
    /// ICEfaces.
    pub icefaces: bool,
    /// jQuery and Backbone.js.
    #[serde(rename = "jQuery")]
    pub jquery: bool,
    /// MooTools.
    pub moo_tools: bool,
    /// Prototype.
    pub prototype: bool,
    /// `ActiveXObject`.
    pub active_x_object: bool,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for JavaScriptFrameworkSupport {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        for (key, enabled) in self.flags() {
            if enabled {
                properties.encode(key, &true);
            }
        }
        self.unknowns.marshal_hcl(properties)
    }
}

impl JavaScriptFrameworkSupport {
    fn flags(&self) -> [(&'static str, bool); 8] {
        [
            ("angular", self.angular),
            ("dojo", self.dojo),
            ("extjs", self.ext_js),
            ("icefaces", self.icefaces),
            ("jquery", self.jquery),
            ("moo_tools", self.moo_tools),
            ("prototype", self.prototype),
            ("active_x_object", self.active_x_object),
        ]
    }
}

impl Unmarshaler for JavaScriptFrameworkSupport {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            angular: decoder.decode_or_default("angular")?,
            dojo: decoder.decode_or_default("dojo")?,
            ext_js: decoder.decode_or_default("extjs")?,
            icefaces: decoder.decode_or_default("icefaces")?,
            jquery: decoder.decode_or_default("jquery")?,
            moo_tools: decoder.decode_or_default("moo_tools")?,
            prototype: decoder.decode_or_default("prototype")?,
            active_x_object: decoder.decode_or_default("active_x_object")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|f: Self| f.unknowns)?,
        })
    }
}

impl Schematic for JavaScriptFrameworkSupport {
    fn schema() -> Schema {
        Self::default()
            .flags()
            .into_iter()
            .fold(Schema::new(), |schema, (key, _)| schema.attr(key, Attribute::bool()))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// A rule extracting a user tag from the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserTag {
    /// Unique ID within the application.
    pub unique_id: i32,
    /// Metadata capture rule the tag is read from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_id: Option<i32>,
    /// Regex applied to the captured value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup_rule: Option<String>,
    /// Server-side request attribute the tag is read from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_side_request_attribute: Option<String>,
    /// Compare case-insensitively.
    pub ignore_case: bool,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for UserTag {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("id", &self.unique_id);
        properties.encode_opt("metadata_id", self.metadata_id.as_ref());
        properties.encode_opt("cleanup_rule", self.cleanup_rule.as_ref());
        properties.encode_opt(
            "server_side_request_attribute",
            self.server_side_request_attribute.as_ref(),
        );
        properties.encode("ignore_case", &self.ignore_case);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for UserTag {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            unique_id: decoder.decode("id")?,
            metadata_id: decoder.decode_opt("metadata_id")?,
            cleanup_rule: decoder.decode_opt("cleanup_rule")?,
            server_side_request_attribute: decoder.decode_opt("server_side_request_attribute")?,
            ignore_case: decoder.decode_or_default("ignore_case")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|t: Self| t.unknowns)?,
        })
    }
}

impl Schematic for UserTag {
    fn schema() -> Schema {
        Schema::new()
            .attr("id", Attribute::int().required().describe("A unique ID among all user tags and properties of this application"))
            .attr("metadata_id", Attribute::int())
            .attr("cleanup_rule", Attribute::string())
            .attr("server_side_request_attribute", Attribute::string())
            .attr("ignore_case", Attribute::bool())
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// A conversion goal.
///
/// Exactly one of the detail blocks matches `goal_type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionGoal {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Kind of goal.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub goal_type: Option<ConversionGoalType>,
    /// Destination goal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_details: Option<DestinationDetails>,
    /// User action goal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_action_details: Option<UserActionDetails>,
    /// Visit duration goal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_duration_details: Option<VisitDurationDetails>,
    /// Number of actions goal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_num_action_details: Option<VisitNumActionDetails>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for ConversionGoal {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode_opt("id", self.id.as_ref());
        properties.encode("name", &self.name);
        properties.encode_opt("type", self.goal_type.as_ref());
        properties.encode_block_opt("destination", self.destination_details.as_ref())?;
        properties.encode_block_opt("user_action", self.user_action_details.as_ref())?;
        properties.encode_block_opt("visit_duration", self.visit_duration_details.as_ref())?;
        properties.encode_block_opt("visit_num_action", self.visit_num_action_details.as_ref())?;
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for ConversionGoal {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            id: decoder.decode_opt("id")?,
            name: decoder.decode("name")?,
            goal_type: decoder.decode_opt("type")?,
            destination_details: decoder.decode_block("destination")?,
            user_action_details: decoder.decode_block("user_action")?,
            visit_duration_details: decoder.decode_block("visit_duration")?,
            visit_num_action_details: decoder.decode_block("visit_num_action")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|g: Self| g.unknowns)?,
        })
    }
}

impl Schematic for ConversionGoal {
    fn schema() -> Schema {
        Schema::new()
            .attr("id", Attribute::string().computed())
            .attr("name", Attribute::string().required())
            .attr(
                "type",
                Attribute::string()
                    .describe("Destination, UserAction, VisitDuration or VisitNumActions"),
            )
            .attr("destination", Attribute::single_block(DestinationDetails::schema()))
            .attr("user_action", Attribute::single_block(UserActionDetails::schema()))
            .attr("visit_duration", Attribute::single_block(VisitDurationDetails::schema()))
            .attr("visit_num_action", Attribute::single_block(VisitNumActionDetails::schema()))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Destination goal details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DestinationDetails {
    /// The URL or path to reach.
    pub url_or_path: String,
    /// How the URL is matched.
    pub match_type: MatchType,
    /// Case-sensitive matching.
    pub case_sensitive: bool,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for DestinationDetails {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("url_or_path", &self.url_or_path);
        properties.encode("match_type", &self.match_type);
        properties.encode("case_sensitive", &self.case_sensitive);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for DestinationDetails {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            url_or_path: decoder.decode("url_or_path")?,
            match_type: decoder.decode_or_default("match_type")?,
            case_sensitive: decoder.decode_or_default("case_sensitive")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|d: Self| d.unknowns)?,
        })
    }
}

impl Schematic for DestinationDetails {
    fn schema() -> Schema {
        Schema::new()
            .attr("url_or_path", Attribute::string().required())
            .attr("match_type", Attribute::string().describe("Begins, Contains or Ends"))
            .attr("case_sensitive", Attribute::bool())
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// User action goal details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserActionDetails {
    /// Value to match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Case-sensitive matching.
    pub case_sensitive: bool,
    /// How the value is matched.
    pub match_type: MatchType,
    /// What the value is matched against (ActionName, PageUrl, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_entity: Option<String>,
    /// Type of action (Load, Xhr, Custom).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for UserActionDetails {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode_opt("value", self.value.as_ref());
        properties.encode("case_sensitive", &self.case_sensitive);
        properties.encode("match_type", &self.match_type);
        properties.encode_opt("match_entity", self.match_entity.as_ref());
        properties.encode_opt("action_type", self.action_type.as_ref());
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for UserActionDetails {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            value: decoder.decode_opt("value")?,
            case_sensitive: decoder.decode_or_default("case_sensitive")?,
            match_type: decoder.decode_or_default("match_type")?,
            match_entity: decoder.decode_opt("match_entity")?,
            action_type: decoder.decode_opt("action_type")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|d: Self| d.unknowns)?,
        })
    }
}

impl Schematic for UserActionDetails {
    fn schema() -> Schema {
        Schema::new()
            .attr("value", Attribute::string())
            .attr("case_sensitive", Attribute::bool())
            .attr("match_type", Attribute::string())
            .attr("match_entity", Attribute::string())
            .attr("action_type", Attribute::string())
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Visit duration goal details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisitDurationDetails {
    /// Minimum visit duration.
    pub duration_in_millis: i64,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for VisitDurationDetails {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("duration", &self.duration_in_millis);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for VisitDurationDetails {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            duration_in_millis: decoder.decode("duration")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|d: Self| d.unknowns)?,
        })
    }
}

impl Schematic for VisitDurationDetails {
    fn schema() -> Schema {
        Schema::new()
            .attr(
                "duration",
                Attribute::int()
                    .required()
                    .describe("The duration of session to hit, in milliseconds"),
            )
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Number of actions goal details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisitNumActionDetails {
    /// Minimum number of user actions.
    pub num_user_actions: i32,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for VisitNumActionDetails {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("num_user_actions", &self.num_user_actions);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for VisitNumActionDetails {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            num_user_actions: decoder.decode("num_user_actions")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|d: Self| d.unknowns)?,
        })
    }
}

impl Schematic for VisitNumActionDetails {
    fn schema() -> Schema {
        Schema::new()
            .attr("num_user_actions", Attribute::int().required())
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}
