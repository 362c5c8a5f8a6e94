//! The concrete handler wiring [`UserService`] to the HTTP layer.
//!
//! Implements the per-identifier state machine: absent → active on create,
//! active → active on replace/patch, active → tombstoned on delete, with
//! the status-code contract each transition carries.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use serde_json::{Map, Value, json};
use tracing::info;

use userhub_core::{UpsertOutcome, UserService};
use userhub_http::body::UsersResponseBody;
use userhub_http::codec::decode_record;
use userhub_http::dispatch::{RequestContext, UsersHandler};
use userhub_http::response::{
    Representation, data_response, empty_response, head_response, options_response, text_response,
};
use userhub_model::{UserId, UserRecord, UsersError, UsersOperation, UsersResult};

/// Plain-text banner served at `GET /`.
const BANNER: &str = "UserHub users API";

/// Allowed methods advertised on `OPTIONS /users`.
const COLLECTION_ALLOW: &str = "HEAD,GET,POST";

/// Allowed methods advertised on `OPTIONS /users/{id}`.
const ITEM_ALLOW: &str = "GET,PUT,PATCH,DELETE";

/// The users business handler.
#[derive(Debug, Clone)]
pub struct UserHubHandler {
    service: UserService,
}

impl UserHubHandler {
    /// Create a handler over the given service.
    #[must_use]
    pub fn new(service: UserService) -> Self {
        Self { service }
    }

    fn handle(
        &self,
        body: &Bytes,
        ctx: &RequestContext,
    ) -> UsersResult<http::Response<UsersResponseBody>> {
        match ctx.operation {
            UsersOperation::Banner => text_response(http::StatusCode::OK, BANNER),
            UsersOperation::OptionsUsers => options_response(COLLECTION_ALLOW),
            UsersOperation::OptionsUser => options_response(ITEM_ALLOW),
            UsersOperation::HeadUsers => head_response(ctx.media_type),
            UsersOperation::ListUsers => self.list_users(ctx),
            UsersOperation::CreateUser => self.create_user(body),
            UsersOperation::GetUser => self.get_user(ctx),
            UsersOperation::ReplaceUser => self.replace_user(body, ctx),
            UsersOperation::PatchUser => self.patch_user(body, ctx),
            UsersOperation::DeleteUser => self.delete_user(ctx),
            UsersOperation::ListUsersV1 => {
                let repr = Representation::uniform(Value::Array(self.service.list_v1()));
                data_response(http::StatusCode::OK, ctx.media_type, &repr)
            }
            UsersOperation::ListUsersV2 => {
                let repr = Representation::uniform(Value::Array(self.service.list_v2()));
                data_response(http::StatusCode::OK, ctx.media_type, &repr)
            }
        }
    }

    /// `GET /users` — every active record, annotated with its identifier in
    /// JSON, keyed by identifier in XML.
    fn list_users(&self, ctx: &RequestContext) -> UsersResult<http::Response<UsersResponseBody>> {
        let users = self.service.list_users();

        let json_shape: Vec<Value> = users
            .iter()
            .map(|(id, record)| record.to_value_with_id(id))
            .collect();

        let mut xml_inner = Map::new();
        for (id, record) in &users {
            xml_inner.insert(id.as_str().to_owned(), record.to_value());
        }
        let xml_shape = json!({ "users": xml_inner });

        let repr = Representation::new(Value::Array(json_shape), xml_shape);
        data_response(http::StatusCode::OK, ctx.media_type, &repr)
    }

    /// `POST /users` — 201 with a Location naming the new resource, 409 on
    /// an active duplicate.
    fn create_user(&self, body: &Bytes) -> UsersResult<http::Response<UsersResponseBody>> {
        let record = decode_record(body)?;
        let id = self.service.create_user(record)?;
        info!(user = %id, "user created");

        let mut response = empty_response(http::StatusCode::CREATED)?;
        if let Ok(location) = http::header::HeaderValue::from_str(&format!("/users/{id}")) {
            response
                .headers_mut()
                .insert(http::header::LOCATION, location);
        }
        Ok(response)
    }

    /// `GET /users/{id}` — the record plus its identifier, 404/410 otherwise.
    fn get_user(&self, ctx: &RequestContext) -> UsersResult<http::Response<UsersResponseBody>> {
        let id = require_id(ctx)?;
        let record = self.service.get_user(&id)?;
        data_response(http::StatusCode::OK, ctx.media_type, &item_repr(&id, &record))
    }

    /// `PUT /users/{id}` — wholesale replace keyed by the path identifier;
    /// 201 when the identifier was unseen, 204 when it existed.
    fn replace_user(
        &self,
        body: &Bytes,
        ctx: &RequestContext,
    ) -> UsersResult<http::Response<UsersResponseBody>> {
        let id = require_id(ctx)?;
        let record = decode_record(body)?;
        let status = match self.service.replace_user(&id, record)? {
            UpsertOutcome::Created => http::StatusCode::CREATED,
            UpsertOutcome::Replaced => http::StatusCode::NO_CONTENT,
        };
        empty_response(status)
    }

    /// `PATCH /users/{id}` — shallow merge, returning the merged record.
    fn patch_user(
        &self,
        body: &Bytes,
        ctx: &RequestContext,
    ) -> UsersResult<http::Response<UsersResponseBody>> {
        let id = require_id(ctx)?;
        // Tombstone and existence checks come before body parsing.
        self.service.get_user(&id)?;
        let partial = decode_record(body)?;
        let merged = self.service.patch_user(&id, &partial)?;
        data_response(http::StatusCode::OK, ctx.media_type, &item_repr(&id, &merged))
    }

    /// `DELETE /users/{id}` — always 204, whatever the prior state.
    fn delete_user(&self, ctx: &RequestContext) -> UsersResult<http::Response<UsersResponseBody>> {
        let id = require_id(ctx)?;
        self.service.delete_user(&id);
        empty_response(http::StatusCode::NO_CONTENT)
    }
}

impl UsersHandler for UserHubHandler {
    fn handle_operation(
        &self,
        body: Bytes,
        ctx: RequestContext,
    ) -> Pin<
        Box<dyn Future<Output = Result<http::Response<UsersResponseBody>, UsersError>> + Send>,
    > {
        let handler = self.clone();
        Box::pin(async move { handler.handle(&body, &ctx) })
    }
}

/// The item representation pair: record+id in JSON, id-keyed element in XML.
fn item_repr(id: &UserId, record: &UserRecord) -> Representation {
    Representation::new(
        record.to_value_with_id(id),
        json!({ id.as_str(): record.to_value() }),
    )
}

/// The router only omits the identifier for collection-level operations.
fn require_id(ctx: &RequestContext) -> UsersResult<UserId> {
    ctx.user_id
        .clone()
        .ok_or_else(|| UsersError::internal_error("item operation without identifier"))
}
