// src/db/firestore_store.rs

//! Firestore REST v1 adapter.
//!
//! Converte entre o JSON simples usado pelos codecs e os valores tipados do
//! Firestore (`stringValue`, `integerValue`, `mapValue`...). Timestamps vão e
//! voltam no formato `{ "_seconds", "_nanoseconds" }`, o mesmo que o SDK
//! admin produz ao serializar um `Timestamp`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::document_store::{
    sort_documents, Document, DocumentStore, Fields, StoreError, DOCUMENT_ID_KEY,
};

const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const PAGE_SIZE: &str = "300";

pub struct FirestoreStore {
    client: Client,
    // .../projects/{p}/databases/(default)/documents
    documents_url: String,
    // projects/{p}/databases/(default)/documents (prefixo dos "name")
    documents_root: String,
    api_key: Option<String>,
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RestDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<RestDocument>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RunQueryItem {
    document: Option<RestDocument>,
}

impl FirestoreStore {
    pub fn new(project_id: &str, api_key: Option<String>, access_token: Option<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, project_id, api_key, access_token)
    }

    pub fn with_base_url(
        base_url: &str,
        project_id: &str,
        api_key: Option<String>,
        access_token: Option<String>,
    ) -> Self {
        let documents_root = format!("projects/{project_id}/databases/(default)/documents");
        let documents_url = format!("{}/{}", base_url.trim_end_matches('/'), documents_root);
        Self {
            client: Client::new(),
            documents_url,
            documents_root,
            api_key,
            access_token,
        }
    }

    fn authorize(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(map_status_error(status, &body))
    }

    fn to_document(&self, raw: RestDocument) -> Document {
        let relative = raw
            .name
            .strip_prefix(&self.documents_root)
            .unwrap_or(&raw.name)
            .trim_start_matches('/');
        let (path, id) = relative.rsplit_once('/').unwrap_or(("", relative));
        Document::new(id, path, decode_fields(raw.fields))
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn list(&self, collection: &str, order_by: Option<&str>) -> Result<Vec<Document>, StoreError> {
        let url = format!("{}/{}", self.documents_url, collection);
        let mut docs = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.client.get(&url).query(&[("pageSize", PAGE_SIZE)]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }
            let page: ListResponse = self
                .send(request)
                .await?
                .json()
                .await
                .map_err(|e| StoreError::Decode(e.to_string()))?;

            docs.extend(page.documents.into_iter().map(|raw| self.to_document(raw)));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        // O orderBy do REST descarta documentos sem o campo; ordenamos aqui para não perder nenhum
        if let Some(key) = order_by {
            sort_documents(&mut docs, key);
        } else {
            sort_documents(&mut docs, DOCUMENT_ID_KEY);
        }
        Ok(docs)
    }

    async fn list_group(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let url = format!("{}:runQuery", self.documents_url);
        let body = json!({
            "structuredQuery": {
                "from": [{ "collectionId": collection, "allDescendants": true }]
            }
        });
        let items: Vec<RunQueryItem> = self
            .send(self.client.post(&url).json(&body))
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(items
            .into_iter()
            .filter_map(|item| item.document)
            .map(|raw| self.to_document(raw))
            .collect())
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let url = format!("{}/{}", self.documents_url, collection);
        let body = json!({ "fields": encode_fields(&fields) });
        let created: RestDocument = self
            .send(self.client.post(&url).json(&body))
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(self.to_document(created).id)
    }

    async fn replace(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        // PATCH sem updateMask substitui o documento inteiro (e cria se não existir)
        let url = format!("{}/{}/{}", self.documents_url, collection, id);
        let body = json!({ "fields": encode_fields(&fields) });
        self.send(self.client.patch(&url).json(&body)).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let url = format!("{}/{}/{}", self.documents_url, collection, id);
        self.send(self.client.delete(&url)).await?;
        Ok(())
    }
}

fn map_status_error(status: StatusCode, body: &str) -> StoreError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.chars().take(200).collect());

    if status == StatusCode::SERVICE_UNAVAILABLE || status == StatusCode::GATEWAY_TIMEOUT {
        StoreError::Unavailable(format!("HTTP {status}: {message}"))
    } else {
        StoreError::Backend(format!("HTTP {status}: {message}"))
    }
}

// =============================================================================
//  CONVERSÃO DE VALORES
// =============================================================================

pub(crate) fn encode_fields(fields: &Fields) -> Value {
    Value::Object(fields.iter().map(|(k, v)| (k.clone(), encode_value(v))).collect())
}

pub(crate) fn decode_fields(fields: Map<String, Value>) -> Fields {
    fields.into_iter().map(|(k, v)| (k, decode_value(v))).collect()
}

fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            // integerValue é int64 codificado como texto
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64().unwrap_or_default() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => match timestamp_marker(map) {
            Some(ts) => json!({ "timestampValue": ts.to_rfc3339() }),
            None => {
                let inner: Map<String, Value> =
                    map.iter().map(|(k, v)| (k.clone(), encode_value(v))).collect();
                json!({ "mapValue": { "fields": inner } })
            }
        },
    }
}

fn decode_value(value: Value) -> Value {
    let Value::Object(mut typed) = value else {
        return value;
    };

    if let Some(v) = typed.remove("stringValue") {
        return v;
    }
    if let Some(v) = typed.remove("booleanValue") {
        return v;
    }
    if let Some(v) = typed.remove("integerValue") {
        let parsed = v.as_str().and_then(|s| s.parse::<i64>().ok());
        return parsed.map(Value::from).unwrap_or(v);
    }
    if let Some(v) = typed.remove("doubleValue") {
        return v;
    }
    if typed.contains_key("nullValue") {
        return Value::Null;
    }
    if let Some(Value::String(s)) = typed.remove("timestampValue") {
        return match DateTime::parse_from_rfc3339(&s) {
            Ok(dt) => {
                let dt = dt.with_timezone(&Utc);
                json!({ "_seconds": dt.timestamp(), "_nanoseconds": dt.timestamp_subsec_nanos() })
            }
            Err(_) => Value::String(s),
        };
    }
    if let Some(v) = typed.remove("geoPointValue") {
        return v;
    }
    if let Some(v) = typed.remove("referenceValue") {
        return v;
    }
    if let Some(Value::Object(mut array)) = typed.remove("arrayValue") {
        let values = match array.remove("values") {
            Some(Value::Array(values)) => values.into_iter().map(decode_value).collect(),
            _ => Vec::new(),
        };
        return Value::Array(values);
    }
    if let Some(Value::Object(mut map)) = typed.remove("mapValue") {
        let inner = match map.remove("fields") {
            Some(Value::Object(fields)) => decode_fields(fields),
            _ => Map::new(),
        };
        return Value::Object(inner);
    }
    Value::Object(typed)
}

fn timestamp_marker(map: &Map<String, Value>) -> Option<DateTime<Utc>> {
    if map.len() != 2 {
        return None;
    }
    let seconds = map.get("_seconds")?.as_i64()?;
    let nanos = map.get("_nanoseconds")?.as_u64()?;
    DateTime::from_timestamp(seconds, u32::try_from(nanos).ok()?)
}

#[cfg(test)]
#[path = "firestore_store_test.rs"]
mod tests;
