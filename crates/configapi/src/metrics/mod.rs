//! Calculated service metrics.

mod comparison;
mod model;
mod service;

pub use comparison::{
    BooleanComparison, ComparisonInfo, EqualityOperator, FailedState, FailedStateComparison,
    HttpMethod, HttpMethodComparison, NumberComparison, NumberOperator, ServiceTypeComparison,
    StringComparison, StringOperator, TagComparison, TagOperator,
};
pub use model::{
    BaseMetric, CalculatedServiceMetric, Condition, DimensionDefinition, MetricDefinition,
    TopXAggregation, TopXDirection, Unit,
};
pub use service::{PATH, ServiceClient};
