//! Resource dispatch.
//!
//! Every supported `(resource, operation)` pair lives in one flat table that
//! records the HTTP method, the endpoint template, the path parameter to
//! substitute, how to build the request body and how to decode the response.
//! Body builders are grouped per resource in the submodules.

mod network_devices;
mod notification;
mod page;
mod settings;
mod tags;
mod totp;
mod user;

use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{ApexHomeError, Result};
use crate::models::{
    ActionRequest, HttpMethod, Operation, Parameters, ResolvedCall, Resource, ResponseKind,
};

pub use network_devices::NetworkDeviceBody;
pub use notification::{ActionButton, NotificationBody};
pub use page::{PageBody, PagePublishBody};
pub use settings::{BackupBody, ChangeThemeBody, LocationBody, WeatherLocationBody};
pub use tags::parse_tags;
pub use totp::TotpBody;
pub use user::UserBody;

pub(crate) type BodyBuilder = fn(&Parameters) -> Result<Value>;

/// One row of the dispatch table.
#[derive(Clone, Copy)]
pub(crate) struct Route {
    method: HttpMethod,
    path: &'static str,
    path_param: Option<&'static str>,
    body: Option<BodyBuilder>,
    response: ResponseKind,
}

impl Route {
    pub(crate) const fn new(method: HttpMethod, path: &'static str) -> Self {
        Self {
            method,
            path,
            path_param: None,
            body: None,
            response: ResponseKind::Json,
        }
    }

    /// Substitute `{param}` in the path from the named parameter.
    pub(crate) const fn with_id(mut self, param: &'static str) -> Self {
        self.path_param = Some(param);
        self
    }

    pub(crate) const fn with_body(mut self, builder: BodyBuilder) -> Self {
        self.body = Some(builder);
        self
    }

    pub(crate) const fn binary(mut self) -> Self {
        self.response = ResponseKind::Binary;
        self
    }
}

/// Routes shared by resources that follow the create/update/list/info/delete pattern.
pub(crate) fn crud_routes(
    item_path: &'static str,
    item_id_path: &'static str,
    list_path: &'static str,
    id_param: &'static str,
    body: BodyBuilder,
) -> Vec<(Operation, Route)> {
    vec![
        (
            Operation::Create,
            Route::new(HttpMethod::Post, item_path).with_body(body),
        ),
        (
            Operation::Update,
            Route::new(HttpMethod::Put, item_id_path)
                .with_id(id_param)
                .with_body(body),
        ),
        (Operation::List, Route::new(HttpMethod::Get, list_path)),
        (
            Operation::Info,
            Route::new(HttpMethod::Get, item_id_path).with_id(id_param),
        ),
        (
            Operation::Delete,
            Route::new(HttpMethod::Delete, item_id_path).with_id(id_param),
        ),
    ]
}

static ROUTES: Lazy<HashMap<(Resource, Operation), Route>> = Lazy::new(|| {
    let groups = [
        (Resource::Notification, notification::routes()),
        (Resource::User, user::routes()),
        (Resource::Page, page::routes()),
        (Resource::Totp, totp::routes()),
        (Resource::NetworkDevices, network_devices::routes()),
        (Resource::Settings, settings::routes()),
    ];

    let mut table = HashMap::new();
    for (resource, routes) in groups {
        for (operation, route) in routes {
            table.insert((resource, operation), route);
        }
    }
    table
});

/// Resolve an action into the REST call that performs it.
pub fn resolve(request: &ActionRequest) -> Result<ResolvedCall> {
    let route = ROUTES
        .get(&(request.resource, request.operation))
        .ok_or_else(|| {
            ApexHomeError::unsupported(request.resource.as_str(), request.operation.as_str())
        })?;

    let path = match route.path_param {
        Some(param) => {
            let id = request.parameters.identifier(param)?;
            route
                .path
                .replace(&format!("{{{}}}", param), &urlencoding::encode(&id))
        }
        None => route.path.to_string(),
    };

    let body = match route.body {
        Some(build) => Some(build(&request.parameters)?),
        None => None,
    };

    tracing::debug!(
        resource = %request.resource,
        operation = %request.operation,
        method = %route.method,
        path = %path,
        "Resolved action"
    );

    Ok(ResolvedCall {
        method: route.method,
        path_template: route.path.to_string(),
        path,
        body,
        response: route.response,
    })
}

/// Operations available for a resource, in declaration order.
pub fn supported_operations(resource: Resource) -> Vec<Operation> {
    Operation::ALL
        .into_iter()
        .filter(|op| ROUTES.contains_key(&(resource, *op)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn full_parameters() -> Parameters {
        Parameters::new()
            .with("appName", "Home")
            .with("appIcon", "home.png")
            .with("title", "Hello")
            .with("text", "body")
            .with("html", "<b>body</b>")
            .with("type", "success")
            .with("tags", "a,b")
            .with("username", "jane")
            .with("password", "secret")
            .with("fullName", "Jane Doe")
            .with("siteName", "Jane's")
            .with("userId", 11)
            .with("pageTitle", "About")
            .with("pageContent", "# About")
            .with("publish", true)
            .with("pageId", 12)
            .with("serviceName", "GitHub")
            .with("accountName", "jane@example.com")
            .with("secretKey", "JBSWY3DPEHPK3PXP")
            .with("totpId", 13)
            .with("deviceMac", "AA:BB:CC:DD:EE:FF")
            .with("deviceName", "NAS")
            .with("deviceIp", "10.0.0.5")
            .with("deviceId", 14)
            .with("theme", "dark")
            .with("locationName", "Berlin")
            .with("longitude", "13.40")
            .with("latitude", "52.52")
            .with("unit", "metric")
            .with("backupPassword", "hunter2")
    }

    fn resolve_pair(resource: Resource, operation: Operation) -> Result<ResolvedCall> {
        resolve(&ActionRequest::new(resource, operation, full_parameters()))
    }

    fn body_keys(call: &ResolvedCall) -> BTreeSet<String> {
        call.body
            .as_ref()
            .and_then(Value::as_object)
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn keys(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    type Row = (
        Resource,
        Operation,
        HttpMethod,
        &'static str,
        &'static [&'static str],
    );

    fn row(
        resource: Resource,
        operation: Operation,
        method: HttpMethod,
        path: &'static str,
        body: &'static [&'static str],
    ) -> Row {
        (resource, operation, method, path, body)
    }

    #[test]
    fn test_dispatch_table() {
        use HttpMethod as M;
        use Operation::*;
        use Resource::*;

        const USER: &[&str] = &["username", "password", "fullName", "siteName"];
        const PAGE: &[&str] = &["pageTitle", "pageContent", "isPublished"];
        const TOTP: &[&str] = &["serviceName", "accountName", "secretKey"];
        const DEVICE: &[&str] = &["deviceMac", "deviceName", "deviceIp"];
        const NONE: &[&str] = &[];

        let expected = [
            row(
                Notification,
                Send,
                M::Post,
                "/api/v1/public/notification/push",
                &["appName", "appIcon", "title", "text", "html", "type", "tags"],
            ),
            row(User, Create, M::Post, "/api/v1/public/user", USER),
            row(User, Update, M::Put, "/api/v1/public/user/11", USER),
            row(User, Info, M::Get, "/api/v1/public/user/11", NONE),
            row(User, Delete, M::Delete, "/api/v1/public/user/11", NONE),
            row(User, List, M::Get, "/api/v1/public/users", NONE),
            row(Page, Create, M::Post, "/api/v1/public/page", PAGE),
            row(Page, Update, M::Put, "/api/v1/public/page/12", PAGE),
            row(Page, List, M::Get, "/api/v1/public/pages", NONE),
            row(Page, Info, M::Get, "/api/v1/public/page/12", NONE),
            row(Page, Delete, M::Delete, "/api/v1/public/page/12", NONE),
            row(
                Page,
                Publish,
                M::Patch,
                "/api/v1/public/page/12/publish",
                &["isPublished"],
            ),
            row(Totp, Create, M::Post, "/api/v1/public/totp", TOTP),
            row(Totp, Update, M::Put, "/api/v1/public/totp/13", TOTP),
            row(Totp, List, M::Get, "/api/v1/public/totps", NONE),
            row(Totp, Info, M::Get, "/api/v1/public/totp/13", NONE),
            row(Totp, Delete, M::Delete, "/api/v1/public/totp/13", NONE),
            row(
                NetworkDevices,
                Create,
                M::Post,
                "/api/v1/public/network-devices",
                DEVICE,
            ),
            row(
                NetworkDevices,
                Update,
                M::Put,
                "/api/v1/public/network-devices/14",
                DEVICE,
            ),
            row(
                NetworkDevices,
                List,
                M::Get,
                "/api/v1/public/network-devices",
                NONE,
            ),
            row(
                NetworkDevices,
                Info,
                M::Get,
                "/api/v1/public/network-devices/14",
                NONE,
            ),
            row(
                NetworkDevices,
                Delete,
                M::Delete,
                "/api/v1/public/network-devices/14",
                NONE,
            ),
            row(Settings, ChangeTheme, M::Put, "/api/v1/public/set-theme", &["theme"]),
            row(
                Settings,
                ChangeLocation,
                M::Put,
                "/api/v1/public/weather-location",
                &["location", "unit"],
            ),
            row(Settings, Backup, M::Post, "/api/v1/public/backup", &["password"]),
        ];

        for (resource, operation, method, path, body) in expected {
            let call = resolve_pair(resource, operation).unwrap();
            assert_eq!(call.method, method, "{resource}/{operation}");
            assert_eq!(call.path, path, "{resource}/{operation}");
            assert_eq!(body_keys(&call), keys(body), "{resource}/{operation}");
            if body.is_empty() {
                assert!(call.body.is_none(), "{resource}/{operation} has no body");
            }
        }

        let supported: usize = Resource::ALL
            .into_iter()
            .map(|r| supported_operations(r).len())
            .sum();
        assert_eq!(supported, expected.len());
    }

    #[test]
    fn test_every_other_pair_is_unsupported() {
        for resource in Resource::ALL {
            let supported = supported_operations(resource);
            for operation in Operation::ALL {
                if supported.contains(&operation) {
                    continue;
                }
                let err = resolve_pair(resource, operation).unwrap_err();
                assert!(
                    matches!(err, ApexHomeError::UnsupportedOperation { .. }),
                    "{resource}/{operation} should be unsupported"
                );
            }
        }
    }

    #[test]
    fn test_only_backup_is_binary() {
        for resource in Resource::ALL {
            for operation in supported_operations(resource) {
                let call = resolve_pair(resource, operation).unwrap();
                let expect_binary = resource == Resource::Settings && operation == Operation::Backup;
                assert_eq!(call.response == ResponseKind::Binary, expect_binary);
            }
        }
    }

    #[test]
    fn test_path_template_kept() {
        let call = resolve_pair(Resource::Page, Operation::Publish).unwrap();
        assert_eq!(call.path_template, "/api/v1/public/page/{pageId}/publish");
    }

    #[test]
    fn test_path_parameter_is_encoded() {
        let request = ActionRequest::new(
            Resource::User,
            Operation::Info,
            Parameters::new().with("userId", "a/b c"),
        );
        let call = resolve(&request).unwrap();
        assert_eq!(call.path, "/api/v1/public/user/a%2Fb%20c");
    }

    #[test]
    fn test_missing_path_parameter() {
        let request = ActionRequest::new(Resource::Totp, Operation::Delete, Parameters::new());
        assert!(matches!(
            resolve(&request),
            Err(ApexHomeError::MissingParameter(name)) if name == "totpId"
        ));
    }

    #[test]
    fn test_update_body_matches_create() {
        let create = resolve_pair(Resource::User, Operation::Create).unwrap();
        let update = resolve_pair(Resource::User, Operation::Update).unwrap();
        assert_eq!(create.body, update.body);
        assert_eq!(
            create.body.unwrap(),
            json!({
                "username": "jane",
                "password": "secret",
                "fullName": "Jane Doe",
                "siteName": "Jane's"
            })
        );
    }
}
