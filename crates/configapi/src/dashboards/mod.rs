//! Dashboards.

mod model;
mod service;

pub use model::{
    Dashboard, DashboardFilter, DashboardMetadata, SharingInfo, Tile, TileBounds, TileType,
};
pub use service::{DashboardFilterQuery, DashboardList, PATH, ServiceClient};
