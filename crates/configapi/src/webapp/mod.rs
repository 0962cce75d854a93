//! Web application monitoring: application settings, key user actions and
//! data privacy.

mod data_privacy;
mod key_user_actions;
mod model;
mod service;

pub use data_privacy::{
    ApplicationDataPrivacy, ContentMaskingSettings, DoNotTrackBehaviour, MaskingPreset,
    MaskingRule, MaskingRuleType, MaskingSettings, RECORDING_MASKING_SETTINGS_VERSION,
    SessionReplayDataPrivacySettings,
};
pub use key_user_actions::{KeyUserAction, KeyUserActionList, KeyUserActionType, ReconcilePlan, plan};
pub use model::{
    ApplicationConfig, ApplicationType, ConversionGoal, ConversionGoalType, DestinationDetails,
    InjectionMode, JavaScriptFrameworkSupport, LoadActionKeyPerformanceMetric, MatchType,
    MonitoringSettings, SessionReplayConfig, UserActionDetails, UserTag, VisitDurationDetails,
    VisitNumActionDetails, XhrActionKeyPerformanceMetric,
};
pub use service::{PATH, ServiceClient};
