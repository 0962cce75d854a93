//! Auto-tags: tags applied to entities matching rules.

mod comparison;
mod model;
mod service;

pub use comparison::{
    Comparison, EqualityOperator, IndexedNameComparison, IndexedNameOperator,
    IndexedTagComparison, IntegerComparison, IntegerOperator, IpAddressComparison,
    ServiceTypeComparison, StringComparison, StringOperator, TagComparison, TagOperator,
};
pub use model::{
    AutoTag, AutoTagRule, ConditionKey, EntityRuleCondition, MeType, Normalization,
    PropagationType,
};
pub use service::{PATH, ServiceClient};
