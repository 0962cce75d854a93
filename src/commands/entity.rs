//! Entity commands, generic over the service of each resource family.

use anyhow::{Context as _, Result, bail};
use configapi::dashboards::DashboardFilterQuery;
use configapi::{Entity, Service, StubList};
use hclkit::{Marshaler, Properties, Schematic, Unmarshaler};
use std::fs;
use std::path::PathBuf;

use crate::Context;
use crate::cli::{DeleteArgs, DiffArgs, Format, GetArgs, InputArgs, Kind, ListArgs, UpdateArgs};
use crate::progress::{PollSpinner, spinner};
use crate::ui;

/// Run `$body` with `$service` bound to the service client of `$kind`.
macro_rules! with_service {
    ($ctx:expr, $kind:expr, $service:ident => $body:expr) => {{
        let env = $ctx.environment()?;
        match $kind {
            Kind::WebApplication => {
                let $service = env
                    .web_applications()
                    .with_poll($ctx.config.poll.to_poll_config());
                $body
            }
            Kind::Dashboard => {
                let $service = env.dashboards();
                $body
            }
            Kind::Notification => {
                let $service = env.notifications();
                $body
            }
            Kind::CalculatedMetric => {
                let $service = env.calculated_service_metrics();
                $body
            }
            Kind::AutoTag => {
                let $service = env.auto_tags();
                $body
            }
        }
    }};
}

/// Run `$body` with `$entity` naming the entity type of `$kind`.
macro_rules! with_entity {
    ($kind:expr, $entity:ident => $body:expr) => {{
        match $kind {
            Kind::WebApplication => {
                type $entity = configapi::webapp::ApplicationConfig;
                $body
            }
            Kind::Dashboard => {
                type $entity = configapi::dashboards::Dashboard;
                $body
            }
            Kind::Notification => {
                type $entity = configapi::notifications::NotificationRecord;
                $body
            }
            Kind::CalculatedMetric => {
                type $entity = configapi::metrics::CalculatedServiceMetric;
                $body
            }
            Kind::AutoTag => {
                type $entity = configapi::autotags::AutoTag;
                $body
            }
        }
    }};
}

// ============================================================================
// Commands
// ============================================================================

pub fn list(ctx: &Context, args: ListArgs) -> Result<()> {
    let filtered = args.owner.is_some() || !args.tags.is_empty();
    let stubs = if args.kind == Kind::Dashboard {
        let filter = DashboardFilterQuery {
            owner: args.owner,
            tags: args.tags,
        };
        ctx.environment()?.dashboards().list_filtered(&filter)?
    } else {
        if filtered {
            ui::warn("--owner and --tag only apply to dashboards; ignoring them");
        }
        with_service!(ctx, args.kind, service => service.list())?
    };
    print_stubs(ctx, &stubs);
    Ok(())
}

pub fn get(ctx: &Context, args: GetArgs) -> Result<()> {
    with_service!(ctx, args.kind, service => show(&service, &args.id, args.format))
}

pub fn export(ctx: &Context, kind: Kind, id: &str) -> Result<()> {
    with_service!(ctx, kind, service => show(&service, id, Format::Hcl))
}

pub fn create(ctx: &Context, kind: Kind, input: &InputArgs) -> Result<()> {
    if kind == Kind::WebApplication && !ctx.quiet {
        let bar = spinner("Creating web application...");
        let service = ctx
            .environment()?
            .web_applications()
            .with_poll(ctx.config.poll.to_poll_config())
            .with_callback(Box::new(PollSpinner::new(bar.clone())));
        let result = create_with(&service, input);
        bar.finish_and_clear();
        return result;
    }
    with_service!(ctx, kind, service => create_with(&service, input))
}

pub fn update(ctx: &Context, args: UpdateArgs) -> Result<()> {
    with_service!(ctx, args.kind, service => update_with(&service, &args.id, &args.input))
}

pub fn delete(ctx: &Context, args: DeleteArgs) -> Result<()> {
    if args.id.trim().is_empty() {
        bail!("An ID is required to delete a {}", kind_name(args.kind));
    }
    if !args.yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete {} {}?", kind_name(args.kind), args.id))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            ui::info("Aborted");
            return Ok(());
        }
    }
    with_service!(ctx, args.kind, service => service.delete(&args.id))
        .with_context(|| format!("Failed to delete {} {}", kind_name(args.kind), args.id))?;
    if !ctx.quiet {
        ui::success(&format!("Deleted {} {}", kind_name(args.kind), args.id));
    }
    Ok(())
}

pub fn diff(ctx: &Context, args: DiffArgs) -> Result<()> {
    let changed =
        with_service!(ctx, args.kind, service => diff_with(&service, &args.id, &args.input))?;
    if changed && !ctx.quiet {
        ui::dim("Run 'cfgctl update' with the same file to apply these changes.");
    }
    Ok(())
}

pub fn schema(kind: Kind) -> Result<()> {
    let schema = with_entity!(kind, E => <E as Schematic>::schema());
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

// ============================================================================
// Generic operations
// ============================================================================

fn show<S: Service>(service: &S, id: &str, format: Format) -> Result<()> {
    let entity = service
        .get(id)
        .with_context(|| format!("Failed to get {} {id}", S::Entity::KIND))?;
    println!("{}", render(&entity, format)?);
    Ok(())
}

fn create_with<S: Service>(service: &S, input: &InputArgs) -> Result<()> {
    let entity: S::Entity = read_entity(input)?;
    let stub = service
        .create(&entity)
        .with_context(|| format!("Failed to create {} '{}'", S::Entity::KIND, entity.name()))?;
    ui::success(&format!("Created {} {stub}", S::Entity::KIND));
    Ok(())
}

fn update_with<S: Service>(service: &S, id: &str, input: &InputArgs) -> Result<()> {
    let mut entity: S::Entity = read_entity(input)?;
    entity.set_id(Some(id.to_string()));
    service
        .update(&entity)
        .with_context(|| format!("Failed to update {} {id}", S::Entity::KIND))?;
    ui::success(&format!("Updated {} {id}", S::Entity::KIND));
    Ok(())
}

fn diff_with<S: Service>(service: &S, id: &str, input: &InputArgs) -> Result<bool> {
    let remote = service
        .get(id)
        .with_context(|| format!("Failed to get {} {id}", S::Entity::KIND))?;
    let local: S::Entity = read_entity(input)?;

    ui::header(&format!("{} {id}", S::Entity::KIND));
    Ok(ui::print_diff(
        &hclkit::render_body(&remote.to_properties()?),
        &hclkit::render_body(&local.to_properties()?),
    ))
}

/// Render an entity in the requested format.
pub fn render<E: Entity>(entity: &E, format: Format) -> Result<String> {
    Ok(match format {
        Format::Json => serde_json::to_string_pretty(entity)?,
        Format::Hcl => {
            hclkit::render_resource(E::RESOURCE_TYPE, entity.name(), &entity.to_properties()?)
        }
        Format::Tree => serde_json::to_string_pretty(&entity.to_properties()?)?,
    })
}

/// Read an entity from a wire JSON file, or a declarative tree file.
pub fn read_entity<E: Entity>(input: &InputArgs) -> Result<E> {
    let path = expand(&input.file);
    let content =
        fs::read_to_string(&path).with_context(|| format!("Could not read {}", path.display()))?;
    parse_entity(&content, input.declarative)
        .with_context(|| format!("Invalid {} in {}", E::KIND, path.display()))
}

fn parse_entity<E: Entity>(content: &str, declarative: bool) -> Result<E> {
    if !declarative {
        return Ok(serde_json::from_str(content)?);
    }
    let properties: Properties = serde_json::from_str(content)?;
    let schema = E::schema();
    hclkit::validate(&schema, &properties)?;
    for deprecation in hclkit::deprecations(&schema, &properties) {
        ui::warn(&deprecation);
    }
    Ok(E::unmarshal_hcl(&properties)?)
}

fn expand(path: &std::path::Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref())
}

fn print_stubs(ctx: &Context, stubs: &StubList) {
    if stubs.is_empty() {
        if !ctx.quiet {
            ui::dim("No entities found");
        }
        return;
    }
    for stub in &stubs.values {
        if stub.name.is_empty() {
            println!("{}", stub.id);
        } else {
            println!("{}\t{}", stub.id, stub.name);
        }
    }
}

fn kind_name(kind: Kind) -> &'static str {
    with_entity!(kind, E => <E as Entity>::KIND)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use configapi::notifications::{NotificationRecord, SlackConfig};
    use configapi::webapp::ApplicationConfig;
    use tempfile::TempDir;

    #[test]
    fn test_parse_wire_json() {
        let record: NotificationRecord = parse_entity(
            r##"{"type": "SLACK", "name": "Ops", "alertingProfile": "ap", "active": true,
                 "channel": "#ops", "title": "t"}"##,
            false,
        )
        .unwrap();
        assert_eq!(record.type_name(), "SLACK");
    }

    #[test]
    fn test_parse_declarative_tree() {
        let record = NotificationRecord::new(SlackConfig {
            name: "Ops".to_string(),
            alerting_profile: "ap".to_string(),
            channel: "#ops".to_string(),
            title: "t".to_string(),
            ..SlackConfig::default()
        });
        let tree = render(&record, Format::Tree).unwrap();
        let parsed: NotificationRecord = parse_entity(&tree, true).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_declarative_tree_is_validated() {
        let result = parse_entity::<NotificationRecord>(r#"{"slack": [{"name": "x"}]}"#, true);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_hcl_uses_resource_type() {
        let app = ApplicationConfig {
            name: "Shop Front".to_string(),
            ..ApplicationConfig::default()
        };
        let hcl = render(&app, Format::Hcl).unwrap();
        assert!(hcl.starts_with("resource \"web_application\" \"shop_front\" {"));
    }

    #[test]
    fn test_read_entity_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tag.json");
        fs::write(&path, r#"{"name": "team", "rules": []}"#).unwrap();

        let tag: configapi::autotags::AutoTag = read_entity(&InputArgs {
            file: path,
            declarative: false,
        })
        .unwrap();
        assert_eq!(tag.name, "team");
    }

    #[test]
    fn test_read_missing_file_names_path() {
        let err = read_entity::<configapi::autotags::AutoTag>(&InputArgs {
            file: PathBuf::from("/nonexistent/tag.json"),
            declarative: false,
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/tag.json"));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(kind_name(Kind::Notification), "notification");
        assert_eq!(kind_name(Kind::AutoTag), "auto-tag");
    }
}
