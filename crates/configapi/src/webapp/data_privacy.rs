//! Data privacy settings of a web application.

use crate::api::{ConfigMetadata, Unknowns};
use hclkit::{Attribute, Kind, Marshaler, Properties, Schema, Schematic, Unmarshaler};
use serde::{Deserialize, Serialize};

/// Masking settings version assumed when none is configured.
pub const RECORDING_MASKING_SETTINGS_VERSION: i32 = 2;

string_enum! {
    /// How the browser's "Do Not Track" header is honored.
    pub enum DoNotTrackBehaviour {
        /// Capture anonymized sessions.
        CaptureAnonymized => "CAPTURE_ANONYMIZED",
        /// Do not capture at all.
        DoNotCapture => "DO_NOT_CAPTURE",
        /// Ignore the header.
        IgnoreDoNotTrack => "IGNORE_DO_NOT_TRACK",
    }
}

string_enum! {
    /// Base masking level.
    pub enum MaskingPreset {
        /// Mask everything.
        MaskAll => "MASK_ALL",
        /// Mask user input only.
        MaskUserInput => "MASK_USER_INPUT",
        /// Mask everything except the listed elements.
        AllowList => "ALLOW_LIST",
        /// Mask only the listed elements.
        BlockList => "BLOCK_LIST",
    }
}

string_enum! {
    /// What a masking rule selects.
    pub enum MaskingRuleType {
        /// Whole elements.
        Element => "ELEMENT",
        /// Attributes.
        Attribute => "ATTRIBUTE",
    }
}

/// Data privacy settings of a web application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationDataPrivacy {
    /// Require the user's opt-in before capturing data.
    pub data_capture_opt_in_enabled: bool,
    /// Use a persistent cookie to recognize returning users.
    pub persistent_cookie_for_user_tracking: bool,
    /// Handling of "Do Not Track".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub do_not_track_behaviour: Option<DoNotTrackBehaviour>,
    /// Session replay privacy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_replay_data_privacy: Option<SessionReplayDataPrivacySettings>,
    /// Server bookkeeping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ConfigMetadata>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for ApplicationDataPrivacy {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("data_capture_opt_in", &self.data_capture_opt_in_enabled);
        properties.encode(
            "persistent_cookie_for_user_tracking",
            &self.persistent_cookie_for_user_tracking,
        );
        properties.encode_opt("do_not_track_behaviour", self.do_not_track_behaviour.as_ref());
        properties.encode_block_opt(
            "session_replay_data_privacy",
            self.session_replay_data_privacy.as_ref(),
        )?;
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for ApplicationDataPrivacy {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            data_capture_opt_in_enabled: decoder.decode_or_default("data_capture_opt_in")?,
            persistent_cookie_for_user_tracking: decoder
                .decode_or_default("persistent_cookie_for_user_tracking")?,
            do_not_track_behaviour: decoder.decode_opt("do_not_track_behaviour")?,
            session_replay_data_privacy: decoder.decode_block("session_replay_data_privacy")?,
            metadata: None,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|d: Self| d.unknowns)?,
        })
    }
}

impl Schematic for ApplicationDataPrivacy {
    fn schema() -> Schema {
        Schema::new()
            .attr(
                "data_capture_opt_in",
                Attribute::bool().describe("Set to `true` to disable data capture and cookies until the opt-in is given"),
            )
            .attr(
                "persistent_cookie_for_user_tracking",
                Attribute::bool().describe("Set to `true` to set a persistent cookie to recognize returning devices"),
            )
            .attr(
                "do_not_track_behaviour",
                Attribute::string().describe("CAPTURE_ANONYMIZED, DO_NOT_CAPTURE or IGNORE_DO_NOT_TRACK"),
            )
            .attr(
                "session_replay_data_privacy",
                Attribute::single_block(SessionReplayDataPrivacySettings::schema()),
            )
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Session replay privacy settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionReplayDataPrivacySettings {
    /// Record only after an explicit opt-in.
    pub opt_in_mode_enabled: bool,
    /// URLs excluded from recording.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub url_exclusion_rules: Vec<String>,
    /// Masking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_masking_settings: Option<ContentMaskingSettings>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for SessionReplayDataPrivacySettings {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("opt_in", &self.opt_in_mode_enabled);
        properties.encode_list("url_exclusion_rules", &self.url_exclusion_rules);
        properties.encode_block_opt("content_masking_settings", self.content_masking_settings.as_ref())?;
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for SessionReplayDataPrivacySettings {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            opt_in_mode_enabled: decoder.decode_or_default("opt_in")?,
            url_exclusion_rules: decoder.decode_or_default("url_exclusion_rules")?,
            content_masking_settings: decoder.decode_block("content_masking_settings")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|s: Self| s.unknowns)?,
        })
    }
}

impl Schematic for SessionReplayDataPrivacySettings {
    fn schema() -> Schema {
        Schema::new()
            .attr("opt_in", Attribute::bool().describe("If `true`, session recording is disabled until `enableSessionReplayOptIn()` is called"))
            .attr("url_exclusion_rules", Attribute::list(Kind::String))
            .attr(
                "content_masking_settings",
                Attribute::single_block(ContentMaskingSettings::schema()),
            )
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Content masking for recording and playback.
///
/// `recording_masking_settings_version` is not part of the declarative form:
/// it is never encoded there and decoding always yields
/// [`RECORDING_MASKING_SETTINGS_VERSION`]. Wire JSON keeps whatever the server
/// sent, absent included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentMaskingSettings {
    /// Version of the masking settings model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_masking_settings_version: Option<i32>,
    /// Masking applied while recording.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_masking_settings: Option<MaskingSettings>,
    /// Masking applied during playback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playback_masking_settings: Option<MaskingSettings>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for ContentMaskingSettings {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode_block_opt("recording", self.recording_masking_settings.as_ref())?;
        properties.encode_block_opt("playback", self.playback_masking_settings.as_ref())?;
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for ContentMaskingSettings {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        let mut unknowns = Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?;
        unknowns.remove("recordingMaskingSettingsVersion");
        Ok(Self {
            recording_masking_settings_version: Some(RECORDING_MASKING_SETTINGS_VERSION),
            recording_masking_settings: decoder.decode_block("recording")?,
            playback_masking_settings: decoder.decode_block("playback")?,
            unknowns,
        })
    }
}

impl Schematic for ContentMaskingSettings {
    fn schema() -> Schema {
        Schema::new()
            .attr(
                "recording",
                Attribute::single_block(MaskingSettings::schema())
                    .describe("Content masking settings for Session Replay recording"),
            )
            .attr(
                "playback",
                Attribute::single_block(MaskingSettings::schema())
                    .describe("Content masking settings for Session Replay playback"),
            )
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// A masking preset with its rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaskingSettings {
    /// Base masking level.
    pub preset: MaskingPreset,
    /// Rules for the allow/block list presets.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<MaskingRule>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for MaskingSettings {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("preset", &self.preset);
        properties.encode_blocks("rule", &self.rules)?;
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for MaskingSettings {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            preset: decoder.decode("preset")?,
            rules: decoder.decode_blocks("rule")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|m: Self| m.unknowns)?,
        })
    }
}

impl Schematic for MaskingSettings {
    fn schema() -> Schema {
        Schema::new()
            .attr(
                "preset",
                Attribute::string()
                    .required()
                    .describe("MASK_ALL, MASK_USER_INPUT, ALLOW_LIST or BLOCK_LIST"),
            )
            .attr(
                "rule",
                Attribute::block(MaskingRule::schema())
                    .describe("Only used with ALLOW_LIST and BLOCK_LIST"),
            )
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// A masking rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaskingRule {
    /// What the selector addresses.
    #[serde(rename = "type")]
    pub rule_type: MaskingRuleType,
    /// CSS selector or attribute name.
    pub selector: String,
    /// Hide user interactions with the element.
    pub user_interaction_hidden: bool,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for MaskingRule {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("type", &self.rule_type);
        properties.encode("selector", &self.selector);
        properties.encode("hide_user_interaction", &self.user_interaction_hidden);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for MaskingRule {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            rule_type: decoder.decode("type")?,
            selector: decoder.decode("selector")?,
            user_interaction_hidden: decoder.decode_or_default("hide_user_interaction")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|r: Self| r.unknowns)?,
        })
    }
}

impl Schematic for MaskingRule {
    fn schema() -> Schema {
        Schema::new()
            .attr("type", Attribute::string().required().describe("ELEMENT or ATTRIBUTE"))
            .attr("selector", Attribute::string().required())
            .attr("hide_user_interaction", Attribute::bool())
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_masking_version_not_encoded() {
        let settings = ContentMaskingSettings {
            recording_masking_settings_version: Some(1),
            ..ContentMaskingSettings::default()
        };
        let props = settings.to_properties().unwrap();
        assert!(props.is_empty());
    }

    #[test]
    fn test_masking_version_defaults_on_decode() {
        let decoded = ContentMaskingSettings::unmarshal_hcl(&Properties::new()).unwrap();
        assert_eq!(decoded.recording_masking_settings_version, Some(2));
        assert!(decoded.recording_masking_settings.is_none());
        assert!(decoded.unknowns.is_empty());
    }

    #[test]
    fn test_masking_version_never_leaks_into_unknowns() {
        let mut props = Properties::new();
        props.encode(Unknowns::ATTRIBUTE, r#"{"recordingMaskingSettingsVersion": 1}"#);
        let decoded = ContentMaskingSettings::unmarshal_hcl(&props).unwrap();
        assert_eq!(decoded.recording_masking_settings_version, Some(2));
        assert!(decoded.unknowns.is_empty());
    }

    #[test]
    fn test_all_unset_optionals_omitted() {
        let privacy = ApplicationDataPrivacy::default();
        let props = privacy.to_properties().unwrap();
        let keys: Vec<&String> = props.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["data_capture_opt_in", "persistent_cookie_for_user_tracking"]);
        assert_eq!(ApplicationDataPrivacy::unmarshal_hcl(&props).unwrap(), privacy);
    }

    #[test]
    fn test_nested_decode_applies_version_default() {
        let privacy = ApplicationDataPrivacy {
            session_replay_data_privacy: Some(SessionReplayDataPrivacySettings {
                opt_in_mode_enabled: true,
                content_masking_settings: Some(ContentMaskingSettings {
                    recording_masking_settings: Some(MaskingSettings {
                        preset: MaskingPreset::BlockList,
                        rules: vec![MaskingRule {
                            rule_type: MaskingRuleType::Element,
                            selector: "#card".to_string(),
                            user_interaction_hidden: true,
                            ..MaskingRule::default()
                        }],
                        ..MaskingSettings::default()
                    }),
                    recording_masking_settings_version: Some(RECORDING_MASKING_SETTINGS_VERSION),
                    ..ContentMaskingSettings::default()
                }),
                ..SessionReplayDataPrivacySettings::default()
            }),
            ..ApplicationDataPrivacy::default()
        };
        let props = privacy.to_properties().unwrap();
        hclkit::validate(&ApplicationDataPrivacy::schema(), &props).unwrap();
        let decoded = ApplicationDataPrivacy::unmarshal_hcl(&props).unwrap();
        assert_eq!(decoded, privacy);
    }

    #[test]
    fn test_json_shape() {
        let privacy: ApplicationDataPrivacy = serde_json::from_value(json!({
            "dataCaptureOptInEnabled": true,
            "doNotTrackBehaviour": "CAPTURE_ANONYMIZED",
            "sessionReplayDataPrivacy": {
                "contentMaskingSettings": {
                    "recordingMaskingSettingsVersion": 1,
                    "recordingMaskingSettings": {"preset": "MASK_ALL", "rules": []}
                }
            }
        }))
        .unwrap();
        assert!(privacy.data_capture_opt_in_enabled);
        let masking = privacy
            .session_replay_data_privacy
            .as_ref()
            .and_then(|s| s.content_masking_settings.as_ref())
            .unwrap();
        assert_eq!(masking.recording_masking_settings_version, Some(1));

        let back = serde_json::to_value(&privacy).unwrap();
        assert_eq!(
            back["sessionReplayDataPrivacy"]["contentMaskingSettings"]["recordingMaskingSettingsVersion"],
            1
        );
    }

    #[test]
    fn test_masking_version_absent_in_json_stays_absent() {
        let wire = json!({
            "recordingMaskingSettings": {"preset": "MASK_USER_INPUT"}
        });
        let masking: ContentMaskingSettings = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(masking.recording_masking_settings_version, None);
        assert_eq!(serde_json::to_value(&masking).unwrap(), wire);
    }

    #[test]
    fn test_masking_rule_unknowns_survive() {
        let wire = json!({
            "preset": "BLOCK_LIST",
            "rules": [{
                "type": "ATTRIBUTE",
                "selector": "data-secret",
                "userInteractionHidden": false,
                "scope": "IFRAME"
            }],
            "strict": true
        });
        let settings: MaskingSettings = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(settings.unknowns.get("strict"), Some(&json!(true)));
        assert_eq!(settings.rules[0].unknowns.get("scope"), Some(&json!("IFRAME")));
        assert_eq!(serde_json::to_value(&settings).unwrap(), wire);

        let props = settings.to_properties().unwrap();
        hclkit::validate(&MaskingSettings::schema(), &props).unwrap();
        assert_eq!(MaskingSettings::unmarshal_hcl(&props).unwrap(), settings);
    }

    #[test]
    fn test_masking_rule_bag_never_shadows_modeled_keys() {
        let mut props = MaskingRule {
            rule_type: MaskingRuleType::Element,
            selector: "#pin".to_string(),
            ..MaskingRule::default()
        }
        .to_properties()
        .unwrap();
        props.encode(Unknowns::ATTRIBUTE, r##"{"selector": "#other", "scope": "PAGE"}"##);
        let rule = MaskingRule::unmarshal_hcl(&props).unwrap();
        assert_eq!(rule.selector, "#pin");
        assert!(!rule.unknowns.contains_key("selector"));
        assert!(rule.unknowns.contains_key("scope"));
    }
}
