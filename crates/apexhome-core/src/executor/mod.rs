//! Request execution.
//!
//! The executor walks input items strictly in order. Each item is turned
//! into an [`ActionRequest`], resolved by the dispatcher and sent by the
//! [`ApexHomeClient`]. Failures are caught at the item boundary: in
//! best-effort mode they become failed results, otherwise the batch stops
//! and reports the index of the failing item.

mod binary;
mod client;

pub use binary::RawResponse;
pub use client::{ApexHomeClient, ResponseBody};

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::dispatch::resolve;
use crate::error::{ItemError, Result};
use crate::models::{ActionRequest, BACKUP_FILE_NAME, BACKUP_MIME_TYPE, ExecutionResult, ResolvedCall};

/// Per-invocation execution switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionOptions {
    /// Record failed items and keep going instead of aborting the batch
    #[serde(default)]
    pub continue_on_fail: bool,
    /// Copy the request body into each result
    #[serde(default)]
    pub echo_request: bool,
}

pub struct ActionExecutor {
    client: ApexHomeClient,
    options: ExecutionOptions,
}

impl ActionExecutor {
    pub fn new(client: ApexHomeClient, options: ExecutionOptions) -> Self {
        Self { client, options }
    }

    pub fn options(&self) -> ExecutionOptions {
        self.options
    }

    /// Perform one resolved call and package its result.
    pub async fn execute(&self, call: &ResolvedCall, paired_item: usize) -> Result<ExecutionResult> {
        let response = self.client.send(call).await?;

        let result = match response {
            ResponseBody::Json(value) => ExecutionResult::success(value, paired_item),
            ResponseBody::Binary(raw) => {
                let (binary, size) = raw.into_backup();
                ExecutionResult::success(
                    json!({
                        "fileName": BACKUP_FILE_NAME,
                        "mimeType": BACKUP_MIME_TYPE,
                        "size": size,
                    }),
                    paired_item,
                )
                .with_binary(binary)
            }
        };

        let request = if self.options.echo_request {
            call.body.clone()
        } else {
            None
        };
        Ok(result.with_request(request))
    }

    pub async fn execute_request(
        &self,
        request: &ActionRequest,
        paired_item: usize,
    ) -> Result<ExecutionResult> {
        let call = resolve(request)?;
        self.execute(&call, paired_item).await
    }

    /// Run a batch of JSON items, one call per item, in input order.
    pub async fn execute_batch(
        &self,
        items: &[Value],
    ) -> std::result::Result<Vec<ExecutionResult>, ItemError> {
        let mut results = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let outcome = match ActionRequest::from_item(item) {
                Ok(request) => self.execute_request(&request, index).await,
                Err(e) => Err(e),
            };

            match outcome {
                Ok(result) => results.push(result),
                Err(e) if self.options.continue_on_fail => {
                    warn!(item_index = index, error = %e, "Item failed, continuing");
                    results.push(ExecutionResult::failure(e.to_string(), index));
                }
                Err(e) => {
                    warn!(item_index = index, error = %e, "Item failed, aborting batch");
                    return Err(ItemError {
                        index,
                        source: e,
                    });
                }
            }
        }

        let failed = results.iter().filter(|r| !r.success).count();
        info!(items = items.len(), failed, "Batch finished");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::ApexHomeCredentials;
    use crate::error::ApexHomeError;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/public/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/public/page/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/public/page/404"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "gone"})))
            .mount(&server)
            .await;
        server
    }

    fn executor(server: &MockServer, options: ExecutionOptions) -> ActionExecutor {
        let client = ApexHomeClient::new(ApexHomeCredentials::new(server.uri(), "key"));
        ActionExecutor::new(client, options)
    }

    fn items() -> Vec<Value> {
        vec![
            json!({"resource": "user", "operation": "list"}),
            json!({"resource": "page", "operation": "info", "pageId": 404}),
            json!({"resource": "page", "operation": "info", "pageId": 1}),
        ]
    }

    #[tokio::test]
    async fn test_best_effort_keeps_pairing() {
        let server = mock_server().await;
        let options = ExecutionOptions {
            continue_on_fail: true,
            ..Default::default()
        };

        let results = executor(&server, options).execute_batch(&items()).await.unwrap();

        assert_eq!(results.len(), 3);
        assert!(results[0].success);
        assert!(!results[1].success);
        assert!(results[2].success);
        assert_eq!(
            results.iter().map(|r| r.paired_item).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert!(results[1].error.as_deref().unwrap().contains("gone"));
        assert_eq!(results[0].response, json!([{"id": 1}]));
    }

    #[tokio::test]
    async fn test_abort_reports_failing_index() {
        let server = mock_server().await;

        let err = executor(&server, ExecutionOptions::default())
            .execute_batch(&items())
            .await
            .unwrap_err();

        assert_eq!(err.index, 1);
        assert!(matches!(
            err.source,
            ApexHomeError::TransportFailure {
                status: Some(404),
                ..
            }
        ));

        // Processing stopped at the failing item.
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
    }

    #[tokio::test]
    async fn test_unsupported_pair_follows_same_policy() {
        let server = mock_server().await;
        let batch = vec![
            json!({"resource": "user", "operation": "publish"}),
            json!({"resource": "user", "operation": "list"}),
        ];

        let options = ExecutionOptions {
            continue_on_fail: true,
            ..Default::default()
        };
        let results = executor(&server, options).execute_batch(&batch).await.unwrap();
        assert!(!results[0].success);
        assert!(results[0].error.as_deref().unwrap().contains("not supported"));
        assert!(results[1].success);

        let err = executor(&server, ExecutionOptions::default())
            .execute_batch(&batch)
            .await
            .unwrap_err();
        assert_eq!(err.index, 0);
        assert!(matches!(err.source, ApexHomeError::UnsupportedOperation { .. }));
    }

    #[tokio::test]
    async fn test_backup_produces_binary() {
        let server = MockServer::start().await;
        let payload = b"APEX\x00\x01backup".to_vec();
        Mock::given(method("POST"))
            .and(path("/api/v1/public/backup"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
            .mount(&server)
            .await;

        let batch = vec![json!({
            "resource": "settings",
            "operation": "backup",
            "backupPassword": "pw"
        })];
        let results = executor(&server, ExecutionOptions::default())
            .execute_batch(&batch)
            .await
            .unwrap();

        let binary = results[0].binary.as_ref().unwrap();
        assert_eq!(binary.data, STANDARD.encode(&payload));
        assert_eq!(binary.mime_type, "application/apex");
        assert_eq!(results[0].response["size"], payload.len());
    }

    #[tokio::test]
    async fn test_echo_request() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/public/set-theme"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let options = ExecutionOptions {
            echo_request: true,
            ..Default::default()
        };
        let batch = vec![json!({"resource": "settings", "operation": "changeTheme", "theme": "dark"})];
        let results = executor(&server, options).execute_batch(&batch).await.unwrap();
        assert_eq!(results[0].request, Some(json!({"theme": "dark"})));
    }
}
