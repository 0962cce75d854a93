//! Dashboards and their tiles.

use crate::api::{ConfigMetadata, Entity, EntityShortRepresentation, Unknowns};
use hclkit::{Attribute, Kind, Marshaler, Properties, Schema, Schematic, Unmarshaler};
use serde::{Deserialize, Serialize};

string_enum! {
    /// Kind of tile.
    pub enum TileType {
        /// Markdown text.
        Markdown => "MARKDOWN",
        /// Section header.
        Header => "HEADER",
        /// Custom chart.
        CustomCharting => "CUSTOM_CHARTING",
        /// Data explorer query.
        DataExplorer => "DATA_EXPLORER",
        /// Application health.
        Applications => "APPLICATIONS",
        /// Host health.
        Hosts => "HOSTS",
        /// Service health.
        Services => "SERVICES",
        /// Database health.
        Databases => "DATABASES_OVERVIEW",
        /// Open problems.
        OpenProblems => "OPEN_PROBLEMS",
        /// Synthetic monitors.
        SyntheticTests => "SYNTHETIC_TESTS",
        /// User sessions query.
        DtaqlQuery => "DTAQL",
        /// Image.
        Image => "IMAGE",
    }
}

/// A dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dashboard {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Name, owner, sharing and filters.
    pub dashboard_metadata: DashboardMetadata,
    /// The tiles.
    pub tiles: Vec<Tile>,
    /// Server bookkeeping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ConfigMetadata>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Entity for Dashboard {
    const KIND: &'static str = "dashboard";
    const RESOURCE_TYPE: &'static str = "dashboard";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.dashboard_metadata.name
    }
}

impl Marshaler for Dashboard {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode_block("dashboard_metadata", &self.dashboard_metadata)?;
        properties.encode_blocks("tile", &self.tiles)?;
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for Dashboard {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            id: None,
            dashboard_metadata: decoder.decode_required_block("dashboard_metadata")?,
            tiles: decoder.decode_blocks("tile")?,
            metadata: None,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|d: Self| d.unknowns)?,
        })
    }
}

impl Schematic for Dashboard {
    fn schema() -> Schema {
        Schema::new()
            .attr(
                "dashboard_metadata",
                Attribute::single_block(DashboardMetadata::schema())
                    .required()
                    .min_items(1)
                    .describe("Contains parameters of a dashboard"),
            )
            .attr(
                "tile",
                Attribute::block(Tile::schema()).describe("The tiles the dashboard consists of"),
            )
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Name, owner, sharing and filters of a dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardMetadata {
    /// Display name.
    pub name: String,
    /// Owner (user login).
    pub owner: String,
    /// Shared with other users.
    pub shared: bool,
    /// Link sharing and publishing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharing_details: Option<SharingInfo>,
    /// Default filter of the dashboard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_filter: Option<DashboardFilter>,
    /// Tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Shown as a preset.
    pub preset: bool,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for DashboardMetadata {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("name", &self.name);
        properties.encode("owner", &self.owner);
        properties.encode("shared", &self.shared);
        properties.encode_block_opt("sharing_details", self.sharing_details.as_ref())?;
        properties.encode_block_opt("filter", self.dashboard_filter.as_ref())?;
        properties.encode_list("tags", &self.tags);
        properties.encode("preset", &self.preset);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for DashboardMetadata {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            name: decoder.decode("name")?,
            owner: decoder.decode("owner")?,
            shared: decoder.decode_or_default("shared")?,
            sharing_details: decoder.decode_block("sharing_details")?,
            dashboard_filter: decoder.decode_block("filter")?,
            tags: decoder.decode_or_default("tags")?,
            preset: decoder.decode_or_default("preset")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|m: Self| m.unknowns)?,
        })
    }
}

impl Schematic for DashboardMetadata {
    fn schema() -> Schema {
        Schema::new()
            .attr("name", Attribute::string().required().describe("the name of the dashboard"))
            .attr("owner", Attribute::string().required().describe("the owner of the dashboard"))
            .attr("shared", Attribute::bool().describe("the dashboard is shared (`true`) or private (`false`)"))
            .attr("sharing_details", Attribute::single_block(SharingInfo::schema()))
            .attr("filter", Attribute::single_block(DashboardFilter::schema()))
            .attr("tags", Attribute::set(Kind::String).describe("A set of tags assigned to the dashboard"))
            .attr("preset", Attribute::bool())
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Link sharing and publishing of a dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SharingInfo {
    /// Anyone with the link can view.
    pub link_shared: bool,
    /// Listed for all users.
    pub published: bool,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for SharingInfo {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("link_shared", &self.link_shared);
        properties.encode("published", &self.published);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for SharingInfo {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            link_shared: decoder.decode_or_default("link_shared")?,
            published: decoder.decode_or_default("published")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|i: Self| i.unknowns)?,
        })
    }
}

impl Schematic for SharingInfo {
    fn schema() -> Schema {
        Schema::new()
            .attr("link_shared", Attribute::bool())
            .attr("published", Attribute::bool())
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Default timeframe and management zone of a dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardFilter {
    /// Default timeframe, e.g. `-2h`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    /// Default management zone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_zone: Option<EntityShortRepresentation>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for DashboardFilter {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode_opt("timeframe", self.timeframe.as_ref());
        properties.encode_block_opt("management_zone", self.management_zone.as_ref())?;
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for DashboardFilter {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            timeframe: decoder.decode_opt("timeframe")?,
            management_zone: decoder.decode_block("management_zone")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|f: Self| f.unknowns)?,
        })
    }
}

impl Schematic for DashboardFilter {
    fn schema() -> Schema {
        Schema::new()
            .attr("timeframe", Attribute::string().describe("the default timeframe of the dashboard"))
            .attr(
                "management_zone",
                Attribute::single_block(EntityShortRepresentation::schema()),
            )
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Position and size of a tile, in pixels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileBounds {
    /// Distance from the top edge.
    pub top: i32,
    /// Distance from the left edge.
    pub left: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for TileBounds {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("top", &self.top);
        properties.encode("left", &self.left);
        properties.encode("width", &self.width);
        properties.encode("height", &self.height);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for TileBounds {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            top: decoder.decode("top")?,
            left: decoder.decode("left")?,
            width: decoder.decode("width")?,
            height: decoder.decode("height")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|b: Self| b.unknowns)?,
        })
    }
}

impl Schematic for TileBounds {
    fn schema() -> Schema {
        ["top", "left", "width", "height"]
            .into_iter()
            .fold(Schema::new(), |schema, key| {
                schema.attr(key, Attribute::int().required())
            })
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// A dashboard tile.
///
/// Which optional fields apply depends on `tile_type`; the server ignores
/// the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tile {
    /// Display name.
    pub name: String,
    /// Kind of tile.
    pub tile_type: TileType,
    /// Fully configured.
    pub configured: bool,
    /// Position and size.
    pub bounds: TileBounds,
    /// Overrides of the dashboard filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_filter: Option<DashboardFilter>,
    /// Entities shown by the tile.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assigned_entities: Vec<String>,
    /// Markdown content (MARKDOWN tiles).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    /// Query (DTAQL and DATA_EXPLORER tiles).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Custom name shown in the header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    /// Show the chart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_visible: Option<bool>,
    /// Metric shown by the tile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    /// Maximum number of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Tile {
    /// A markdown tile.
    pub fn markdown(name: impl Into<String>, text: impl Into<String>, bounds: TileBounds) -> Self {
        Self {
            name: name.into(),
            tile_type: TileType::Markdown,
            configured: true,
            bounds,
            markdown: Some(text.into()),
            ..Self::default()
        }
    }
}

impl Marshaler for Tile {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("name", &self.name);
        properties.encode("tile_type", &self.tile_type);
        properties.encode("configured", &self.configured);
        properties.encode_block("bounds", &self.bounds)?;
        properties.encode_block_opt("filter", self.tile_filter.as_ref())?;
        properties.encode_list("assigned_entities", &self.assigned_entities);
        properties.encode_opt("markdown", self.markdown.as_ref());
        properties.encode_opt("query", self.query.as_ref());
        properties.encode_opt("custom_name", self.custom_name.as_ref());
        properties.encode_opt("chart_visible", self.chart_visible.as_ref());
        properties.encode_opt("metric", self.metric.as_ref());
        properties.encode_opt("limit", self.limit.as_ref());
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for Tile {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            name: decoder.decode("name")?,
            tile_type: decoder.decode("tile_type")?,
            configured: decoder.decode_or_default("configured")?,
            bounds: decoder.decode_block("bounds")?.unwrap_or_default(),
            tile_filter: decoder.decode_block("filter")?,
            assigned_entities: decoder.decode_or_default("assigned_entities")?,
            markdown: decoder.decode_opt("markdown")?,
            query: decoder.decode_opt("query")?,
            custom_name: decoder.decode_opt("custom_name")?,
            chart_visible: decoder.decode_opt("chart_visible")?,
            metric: decoder.decode_opt("metric")?,
            limit: decoder.decode_opt("limit")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|t: Self| t.unknowns)?,
        })
    }
}

impl Schematic for Tile {
    fn schema() -> Schema {
        Schema::new()
            .attr("name", Attribute::string().required().describe("the name of the tile"))
            .attr("tile_type", Attribute::string().required().describe("the type of the tile"))
            .attr("configured", Attribute::bool())
            .attr("bounds", Attribute::single_block(TileBounds::schema()))
            .attr("filter", Attribute::single_block(DashboardFilter::schema()))
            .attr("assigned_entities", Attribute::set(Kind::String))
            .attr("markdown", Attribute::string().describe("The markdown-formatted content of the tile"))
            .attr("query", Attribute::string())
            .attr("custom_name", Attribute::string())
            .attr("chart_visible", Attribute::bool())
            .attr("metric", Attribute::string())
            .attr("limit", Attribute::int())
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Dashboard {
        Dashboard {
            dashboard_metadata: DashboardMetadata {
                name: "Service health".to_string(),
                owner: "ops@example.com".to_string(),
                shared: true,
                tags: vec!["prod".to_string()],
                dashboard_filter: Some(DashboardFilter {
                    timeframe: Some("-2h".to_string()),
                    ..DashboardFilter::default()
                }),
                ..DashboardMetadata::default()
            },
            tiles: vec![Tile::markdown(
                "Readme",
                "## On call\nPage the owner.",
                TileBounds {
                    top: 0,
                    left: 0,
                    width: 304,
                    height: 152,
                    ..TileBounds::default()
                },
            )],
            ..Dashboard::default()
        }
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["dashboardMetadata"]["name"], "Service health");
        assert_eq!(value["dashboardMetadata"]["dashboardFilter"]["timeframe"], "-2h");
        assert_eq!(value["tiles"][0]["tileType"], "MARKDOWN");
        assert_eq!(value["tiles"][0]["bounds"]["width"], 304);
        assert!(value["tiles"][0].get("query").is_none());
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_unknown_tile_fields_preserved() {
        let tile: Tile = serde_json::from_value(json!({
            "name": "Chart",
            "tileType": "CUSTOM_CHARTING",
            "configured": true,
            "bounds": {"top": 0, "left": 0, "width": 1, "height": 1},
            "filterConfig": {"type": "MIXED", "customName": "CPU"}
        }))
        .unwrap();
        assert_eq!(tile.tile_type, TileType::CustomCharting);
        assert!(tile.unknowns.contains_key("filterConfig"));
        let back = serde_json::to_value(&tile).unwrap();
        assert_eq!(back["filterConfig"]["customName"], "CPU");
    }

    #[test]
    fn test_declarative_round_trip() {
        let dashboard = sample();
        let props = dashboard.to_properties().unwrap();
        hclkit::validate(&Dashboard::schema(), &props).unwrap();
        assert_eq!(Dashboard::unmarshal_hcl(&props).unwrap(), dashboard);
    }

    #[test]
    fn test_missing_metadata_is_reported() {
        let err = Dashboard::unmarshal_hcl(&Properties::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required attribute 'dashboard_metadata'"
        );
    }

    #[test]
    fn test_nested_unknowns_survive_both_codecs() {
        let mut tile: Tile = serde_json::from_value(json!({
            "name": "Chart",
            "tileType": "MARKDOWN",
            "bounds": {"top": 0, "left": 0, "width": 1, "height": 1, "zIndex": 3}
        }))
        .unwrap();
        assert_eq!(tile.bounds.unknowns.get("zIndex"), Some(&json!(3)));
        let back = serde_json::to_value(&tile).unwrap();
        assert_eq!(back["bounds"]["zIndex"], 3);

        tile.bounds.unknowns.insert("width", json!(99));
        let props = tile.bounds.to_properties().unwrap();
        let decoded = TileBounds::unmarshal_hcl(&props).unwrap();
        assert_eq!(decoded.width, 1);
        assert!(!decoded.unknowns.contains_key("width"));
        assert_eq!(decoded.unknowns.get("zIndex"), Some(&json!(3)));

        let sharing: SharingInfo =
            serde_json::from_value(json!({"linkShared": true, "preset": false})).unwrap();
        assert_eq!(sharing.unknowns.get("preset"), Some(&json!(false)));
        let props = sharing.to_properties().unwrap();
        assert_eq!(SharingInfo::unmarshal_hcl(&props).unwrap(), sharing);
    }
}
