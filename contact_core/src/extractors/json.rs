//! JSON object extractor that never rejects

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::{Map, Value};
use std::convert::Infallible;

/// The request body as a JSON object.
///
/// Anything that is not a JSON object sent with a JSON content type
/// (wrong content type, malformed body, an array, a bare string) becomes
/// an empty map, so field validation decides what to tell the client.
pub struct LenientJson(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for LenientJson
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(&req) {
            return Ok(LenientJson(Map::new()));
        }

        let bytes = match Bytes::from_request(req, state).await {
            Ok(bytes) => bytes,
            Err(rejection) => {
                tracing::debug!("Failed to read request body: {}", rejection);
                return Ok(LenientJson(Map::new()));
            }
        };

        Ok(LenientJson(parse_object(&bytes)))
    }
}

fn has_json_content_type(req: &Request) -> bool {
    let Some(content_type) = req.headers().get(CONTENT_TYPE) else {
        return false;
    };
    let Ok(content_type) = content_type.to_str() else {
        return false;
    };
    let Ok(mime) = content_type.parse::<mime::Mime>() else {
        return false;
    };

    mime.type_() == "application"
        && (mime.subtype() == "json" || mime.suffix().is_some_and(|name| name == "json"))
}

fn parse_object(bytes: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(e) => {
            tracing::debug!("Ignoring unparseable JSON body: {}", e);
            Map::new()
        }
    }
}
