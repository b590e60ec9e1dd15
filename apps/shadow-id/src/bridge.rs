//! Line-delimited JSON method dispatch between the GUI shell and [`App`].
//!
//! Each input line is one call:
//!
//! ```text
//! {"id": 1, "method": "CreateUser", "params": ["Ada", "ada@example.com"]}
//! ```
//!
//! and produces exactly one output line, either
//! `{"id":1,"result":{...}}` or
//! `{"id":1,"error":{"type":"conflict","message":"..."}}`.

use domain_users::{ErrorKind, ListUsersQuery, UserError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::app::App;

/// A single method call from the shell
#[derive(Debug, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub id: Option<u64>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// Error payload sent back to the shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorBody {
    fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
        }
    }
}

impl From<UserError> for ErrorBody {
    fn from(err: UserError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Result { result: Value },
    Error { error: ErrorBody },
}

/// Reply to one [`Request`]
#[derive(Debug, Serialize)]
pub struct Response {
    pub id: Option<u64>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Response {
    fn new(id: Option<u64>, outcome: Result<Value, ErrorBody>) -> Self {
        let outcome = match outcome {
            Ok(result) => Outcome::Result { result },
            Err(error) => Outcome::Error { error },
        };
        Self { id, outcome }
    }
}

fn params<T: DeserializeOwned>(method: &str, params: Value) -> Result<T, ErrorBody> {
    serde_json::from_value(params)
        .map_err(|e| ErrorBody::validation(format!("invalid params for {}: {}", method, e)))
}

fn to_value<T: Serialize>(value: T) -> Result<Value, ErrorBody> {
    serde_json::to_value(value).map_err(|e| ErrorBody {
        kind: ErrorKind::Internal,
        message: format!("failed to encode result: {}", e),
    })
}

/// Invoke the named method on `app`
pub fn dispatch(app: &App, request: Request) -> Response {
    let Request { id, method, params: raw } = request;
    debug!(?id, method = %method, "Dispatching call");

    let outcome = match method.as_str() {
        "Greet" => params::<(String,)>(&method, raw).and_then(|(name,)| to_value(app.greet(&name))),
        "CreateUser" => params::<(String, String)>(&method, raw).and_then(|(name, email)| {
            to_value(app.create_user(name, email)?)
        }),
        "GetUser" => {
            params::<(String,)>(&method, raw).and_then(|(id,)| to_value(app.get_user(id)?))
        }
        "UpdateUser" => params::<(String, Option<String>, Option<String>)>(&method, raw).and_then(
            |(id, name, email)| to_value(app.update_user(id, name, email)?),
        ),
        "DeleteUser" => params::<(String,)>(&method, raw).and_then(|(id,)| {
            app.delete_user(id)?;
            Ok(Value::Null)
        }),
        "ListUsers" => {
            let query = if raw.is_null() {
                Ok(ListUsersQuery::default())
            } else {
                params::<(usize, usize)>(&method, raw)
                    .map(|(limit, offset)| ListUsersQuery { limit, offset })
            };
            query.and_then(|q| to_value(app.list_users(q)?))
        }
        "GetAppInfo" => to_value(app.app_info()),
        other => Err(ErrorBody::validation(format!("unknown method '{}'", other))),
    };

    Response::new(id, outcome)
}

/// Handle one raw input line; blank lines produce no reply
pub fn handle_line(app: &App, line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let response = match serde_json::from_str::<Request>(line) {
        Ok(request) => dispatch(app, request),
        Err(e) => {
            warn!(error = %e, "Malformed request");
            let id = serde_json::from_str::<Value>(line)
                .ok()
                .and_then(|v| v.get("id").and_then(Value::as_u64));
            Response::new(id, Err(ErrorBody::validation(format!("malformed request: {}", e))))
        }
    };

    match serde_json::to_string(&response) {
        Ok(encoded) => Some(encoded),
        Err(e) => {
            warn!(error = %e, "Failed to encode response");
            Some(
                r#"{"id":null,"error":{"type":"internal","message":"failed to encode response"}}"#
                    .to_string(),
            )
        }
    }
}

/// Serve calls from `reader` until EOF, writing one reply line per call
pub async fn run<R, W>(app: &App, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if let Some(reply) = handle_line(app, &line) {
            writer.write_all(reply.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    debug!("Bridge input closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    fn call(app: &App, request: Value) -> Value {
        let line = handle_line(app, &request.to_string()).unwrap();
        serde_json::from_str(&line).unwrap()
    }

    #[test]
    fn test_greet() {
        let app = App::new(Config::default());
        let reply = call(&app, json!({"id": 1, "method": "Greet", "params": ["Ada"]}));
        assert_eq!(reply, json!({"id": 1, "result": "Hello Ada, It's show time!"}));
    }

    #[test]
    fn test_blank_line_is_ignored() {
        let app = App::new(Config::default());
        assert!(handle_line(&app, "   ").is_none());
    }

    #[test]
    fn test_unknown_method() {
        let app = App::new(Config::default());
        let reply = call(&app, json!({"id": 2, "method": "DropTables"}));
        assert_eq!(reply["id"], 2);
        assert_eq!(reply["error"]["type"], "validation");
        assert!(reply["error"]["message"].as_str().unwrap().contains("DropTables"));
    }

    #[test]
    fn test_bad_params() {
        let app = App::new(Config::default());
        let reply = call(&app, json!({"id": 3, "method": "CreateUser", "params": ["only-name"]}));
        assert_eq!(reply["error"]["type"], "validation");
    }

    #[test]
    fn test_malformed_json_keeps_recoverable_id() {
        let app = App::new(Config::default());

        let line = handle_line(&app, "not json").unwrap();
        let reply: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(reply["id"], Value::Null);
        assert_eq!(reply["error"]["type"], "validation");

        let line = handle_line(&app, r#"{"id": 9, "params": []}"#).unwrap();
        let reply: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(reply["id"], 9);
    }

    #[test]
    fn test_delete_returns_null_result() {
        let app = App::new(Config::default());
        let created = call(
            &app,
            json!({"id": 1, "method": "CreateUser", "params": ["Ada", "ada@example.com"]}),
        );
        let id = created["result"]["id"].as_str().unwrap().to_string();

        let reply = call(&app, json!({"id": 2, "method": "DeleteUser", "params": [id]}));
        assert_eq!(reply, json!({"id": 2, "result": null}));
    }

    #[test]
    fn test_error_body_from_user_error() {
        let body = ErrorBody::from(UserError::DuplicateEmail("ada@example.com".to_string()));
        assert_eq!(body.kind, ErrorKind::Conflict);
        assert!(body.message.contains("ada@example.com"));
    }
}
