//! Service client for web applications.

use super::data_privacy::ApplicationDataPrivacy;
use super::key_user_actions::{KeyUserAction, KeyUserActionList, plan};
use super::model::ApplicationConfig;
use crate::api::{Entity, EntityShortRepresentation, StubList};
use crate::error::{Result, require_id};
use crate::service::{Collection, Service};
use log::{debug, info, warn};
use restkit::{Client, LogCallback, PollCallback, PollConfig, poll};
use std::sync::Arc;

/// Collection path of web applications.
pub const PATH: &str = "/applications/web";

/// Service client for web applications, their key user actions and their
/// data privacy settings.
///
/// A freshly created application is not immediately readable; create polls
/// until it is before writing the children. The poll budget defaults to
/// [`PollConfig::default`] (40 attempts, 3 seconds apart).
pub struct ServiceClient {
    apps: Collection,
    poll: PollConfig,
    callback: Box<dyn PollCallback>,
}

impl ServiceClient {
    /// Create a service client.
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            apps: Collection::new(client, PATH, ApplicationConfig::KIND),
            poll: PollConfig::default(),
            callback: Box::new(LogCallback),
        }
    }

    /// Use a custom poll budget for create.
    #[must_use]
    pub fn with_poll(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Report poll retries to `callback`.
    #[must_use]
    pub fn with_callback(mut self, callback: Box<dyn PollCallback>) -> Self {
        self.callback = callback;
        self
    }

    fn client(&self) -> &Client {
        self.apps.client()
    }

    fn key_user_actions_path(id: &str) -> String {
        format!("{PATH}/{id}/keyUserActions")
    }

    fn data_privacy_path(id: &str) -> String {
        format!("{PATH}/{id}/dataPrivacy")
    }

    /// Wait until the application is readable.
    fn await_visible(&self, id: &str) -> Result<()> {
        let path = self.apps.item(id);
        poll(&self.poll, Some(self.callback.as_ref()), || {
            self.client().get::<serde_json::Value>(&path, 200)
        })?;
        debug!("Web application {id} is visible");
        Ok(())
    }

    /// The key user actions of an application.
    pub fn list_key_user_actions(&self, id: &str) -> Result<Vec<KeyUserAction>> {
        let id = require_id(ApplicationConfig::KIND, "list key user actions", Some(id))?;
        let list: KeyUserActionList = self
            .client()
            .get(&Self::key_user_actions_path(id), 200)?;
        Ok(list.key_user_action_list)
    }

    /// Mark a user action as key user action.
    pub fn create_key_user_action(&self, id: &str, action: &KeyUserAction) -> Result<()> {
        self.client()
            .post(&Self::key_user_actions_path(id), action, 201)?;
        Ok(())
    }

    /// Unmark a key user action by its server-assigned ID.
    pub fn delete_key_user_action(&self, id: &str, action_id: &str) -> Result<()> {
        let action_id = require_id("key user action", "delete", Some(action_id))?;
        self.client().delete(
            &format!("{}/{action_id}", Self::key_user_actions_path(id)),
            204,
        )?;
        Ok(())
    }

    /// Make the remote key user actions match `desired`.
    ///
    /// Deletes remote actions that are not desired, then creates desired
    /// actions that are missing. Actions on both sides are untouched. A
    /// remote action without `meIdentifier` cannot be deleted and is skipped
    /// with a warning. The first failure aborts; changes already applied stay
    /// applied.
    pub fn reconcile_key_user_actions(&self, id: &str, desired: &[KeyUserAction]) -> Result<()> {
        let remote = self.list_key_user_actions(id)?;
        let plan = plan(desired, &remote);
        if plan.is_empty() {
            debug!("Key user actions of {id} are up to date");
            return Ok(());
        }

        for action in &plan.to_delete {
            match action.me_identifier.as_deref().filter(|s| !s.trim().is_empty()) {
                Some(action_id) => self.delete_key_user_action(id, action_id)?,
                None => warn!(
                    "Cannot delete key user action '{}' of {id}: the server sent no meIdentifier",
                    action.name
                ),
            }
        }
        for action in &plan.to_add {
            self.create_key_user_action(id, action)?;
        }
        info!(
            "Reconciled key user actions of {id}: {} removed, {} added",
            plan.to_delete.len(),
            plan.to_add.len()
        );
        Ok(())
    }

    /// The data privacy settings of an application.
    pub fn get_data_privacy(&self, id: &str) -> Result<ApplicationDataPrivacy> {
        Ok(self.client().get(&Self::data_privacy_path(id), 200)?)
    }

    /// Replace the data privacy settings of an application.
    pub fn update_data_privacy(&self, id: &str, settings: &ApplicationDataPrivacy) -> Result<()> {
        self.client()
            .put(&Self::data_privacy_path(id), settings, 204)?;
        Ok(())
    }
}

impl Service for ServiceClient {
    type Entity = ApplicationConfig;

    fn list(&self) -> Result<StubList> {
        self.apps.list()
    }

    /// Fetch an application together with its key user actions and data
    /// privacy settings.
    fn get(&self, id: &str) -> Result<ApplicationConfig> {
        let mut app: ApplicationConfig = self.apps.get(id)?;
        app.key_user_actions = self.list_key_user_actions(id)?;
        app.data_privacy = Some(self.get_data_privacy(id)?);
        Ok(app)
    }

    fn create(&self, app: &ApplicationConfig) -> Result<EntityShortRepresentation> {
        self.apps.reject_existing(app.id.as_deref())?;
        let stub = self.apps.create(app, 201)?;
        self.await_visible(&stub.id)?;

        for action in &app.key_user_actions {
            self.create_key_user_action(&stub.id, action)?;
        }
        if let Some(settings) = &app.data_privacy {
            self.update_data_privacy(&stub.id, settings)?;
        }
        Ok(stub)
    }

    fn update(&self, app: &ApplicationConfig) -> Result<()> {
        let id = require_id(ApplicationConfig::KIND, "update", app.id.as_deref())?;
        self.apps.update(Some(id), app)?;
        self.reconcile_key_user_actions(id, &app.key_user_actions)?;
        if let Some(settings) = &app.data_privacy {
            self.update_data_privacy(id, settings)?;
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.apps.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::webapp::key_user_actions::KeyUserActionType;
    use restkit::{Credentials, Method, MockTransport};
    use serde_json::json;

    fn service(mock: &MockTransport) -> ServiceClient {
        let client = Client::with_transport(
            "https://env/api/config/v1",
            Credentials::api_token("t"),
            Box::new(mock.clone()),
        );
        ServiceClient::new(Arc::new(client)).with_poll(PollConfig::immediate(5))
    }

    fn app() -> ApplicationConfig {
        ApplicationConfig {
            name: "shop".to_string(),
            key_user_actions: vec![KeyUserAction::new("Loading of page /", KeyUserActionType::Load)],
            data_privacy: Some(ApplicationDataPrivacy::default()),
            ..ApplicationConfig::default()
        }
    }

    #[test]
    fn test_create_with_id_fails_before_http() {
        let mock = MockTransport::new();
        let mut app = app();
        app.id = Some("APPLICATION-1".to_string());
        let err = service(&mock).create(&app).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { .. }));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_create_polls_then_writes_children() {
        let mock = MockTransport::new();
        mock.respond(Method::Post, PATH, 201, r#"{"id": "APPLICATION-1", "name": "shop"}"#);
        mock.respond(Method::Get, "/web/APPLICATION-1", 404, "not yet");
        mock.respond(Method::Get, "/web/APPLICATION-1", 404, "not yet");
        mock.respond(Method::Get, "/web/APPLICATION-1", 200, r#"{"name": "shop"}"#);
        mock.respond(Method::Post, "/APPLICATION-1/keyUserActions", 201, r#"{"id": "M-1"}"#);
        mock.respond(Method::Put, "/APPLICATION-1/dataPrivacy", 204, "");

        let stub = service(&mock).create(&app()).unwrap();
        assert_eq!(stub.id, "APPLICATION-1");

        assert_eq!(mock.requests_with(Method::Get).len(), 3);
        let posts = mock.requests_with(Method::Post);
        assert_eq!(posts.len(), 2);
        let kua: serde_json::Value = posts[1].json().unwrap();
        assert_eq!(kua["name"], "Loading of page /");
        assert_eq!(kua["actionType"], "Load");
        assert_eq!(mock.requests_with(Method::Put).len(), 1);

        // The application payload carries no children.
        let body: serde_json::Value = posts[0].json().unwrap();
        assert!(body.get("keyUserActions").is_none());
    }

    #[test]
    fn test_create_surfaces_last_poll_error() {
        let mock = MockTransport::new();
        mock.respond(Method::Post, PATH, 201, r#"{"id": "APPLICATION-1", "name": "shop"}"#);
        mock.respond(Method::Get, "/web/APPLICATION-1", 404, "still missing");

        let err = service(&mock).create(&app()).unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(mock.requests_with(Method::Get).len(), 5);
        assert!(mock.requests_with(Method::Put).is_empty());
    }

    #[test]
    fn test_update_reconciles_key_user_actions() {
        let mock = MockTransport::new();
        mock.respond(Method::Put, "/web/APPLICATION-1", 204, "");
        mock.respond_json(
            Method::Get,
            "/APPLICATION-1/keyUserActions",
            200,
            &json!({"keyUserActionList": [
                {"name": "Loading of page /", "actionType": "Load", "meIdentifier": "M-1"},
                {"name": "stale", "actionType": "Xhr", "meIdentifier": "M-2"}
            ]}),
        )
        .unwrap();
        mock.respond(Method::Delete, "/keyUserActions/M-2", 204, "");
        mock.respond(Method::Post, "/APPLICATION-1/keyUserActions", 201, "{}");
        mock.respond(Method::Put, "/APPLICATION-1/dataPrivacy", 204, "");

        let mut app = app();
        app.id = Some("APPLICATION-1".to_string());
        app.key_user_actions
            .push(KeyUserAction::new("checkout", KeyUserActionType::Custom));
        service(&mock).update(&app).unwrap();

        let deletes = mock.requests_with(Method::Delete);
        assert_eq!(deletes.len(), 1);
        assert!(deletes[0].url.ends_with("/keyUserActions/M-2"));

        let posts = mock.requests_with(Method::Post);
        assert_eq!(posts.len(), 1);
        let added: serde_json::Value = posts[0].json().unwrap();
        assert_eq!(added["name"], "checkout");
    }

    #[test]
    fn test_update_aborts_on_first_failure() {
        let mock = MockTransport::new();
        mock.respond(Method::Put, "/web/APPLICATION-1", 204, "");
        mock.respond(
            Method::Get,
            "/APPLICATION-1/keyUserActions",
            200,
            r#"{"keyUserActionList": [{"name": "stale", "actionType": "Load", "meIdentifier": "M-2"}]}"#,
        );
        mock.respond(Method::Delete, "/keyUserActions/M-2", 500, "boom");

        let mut app = app();
        app.id = Some("APPLICATION-1".to_string());
        let err = service(&mock).update(&app).unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(mock.requests_with(Method::Post).is_empty());
    }

    #[test]
    fn test_reconcile_skips_remote_action_without_identifier() {
        let mock = MockTransport::new();
        mock.respond(
            Method::Get,
            "/APPLICATION-1/keyUserActions",
            200,
            r#"{"keyUserActionList": [{"name": "orphan", "actionType": "Load"}]}"#,
        );
        mock.respond(Method::Post, "/APPLICATION-1/keyUserActions", 201, "{}");

        let desired = vec![KeyUserAction::new("checkout", KeyUserActionType::Custom)];
        service(&mock)
            .reconcile_key_user_actions("APPLICATION-1", &desired)
            .unwrap();

        assert!(mock.requests_with(Method::Delete).is_empty());
        assert_eq!(mock.requests_with(Method::Post).len(), 1);
    }

    #[test]
    fn test_get_merges_children() {
        let mock = MockTransport::new();
        mock.respond(
            Method::Get,
            "/web/APPLICATION-1",
            200,
            r#"{"identifier": "APPLICATION-1", "name": "shop"}"#,
        );
        mock.respond(
            Method::Get,
            "/APPLICATION-1/keyUserActions",
            200,
            r#"{"keyUserActionList": [{"name": "a", "actionType": "Load", "meIdentifier": "M-1"}]}"#,
        );
        mock.respond(
            Method::Get,
            "/APPLICATION-1/dataPrivacy",
            200,
            r#"{"dataCaptureOptInEnabled": true}"#,
        );

        let app = service(&mock).get("APPLICATION-1").unwrap();
        assert_eq!(app.id.as_deref(), Some("APPLICATION-1"));
        assert_eq!(app.key_user_actions.len(), 1);
        assert!(app.data_privacy.unwrap().data_capture_opt_in_enabled);
    }

    #[test]
    fn test_delete_empty_id_fails_before_http() {
        let mock = MockTransport::new();
        assert!(service(&mock).delete("").is_err());
        assert!(mock.requests().is_empty());
    }
}
