//! HTTP seam of the list editors
//!
//! Экраны формируют [`ApiRequest`] и получают [`ApiResponse`]; реальная отправка
//! идёт через gloo-net, в тестах её заменяет сценарный транспорт.

use async_trait::async_trait;
use gloo_net::http::{Method as GlooMethod, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsCast;

use super::error::{TransportError, UnexpectedResponseError};
use crate::shared::api_utils::{api_base, join_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Файл, прочитанный в память целиком
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartPart {
    Text { name: String, value: String },
    /// Serialized JSON sent as an `application/json` blob
    Json { name: String, value: String },
    File { name: String, attachment: Attachment },
}

impl MultipartPart {
    pub fn json<T: Serialize>(name: &str, payload: &T) -> Result<Self, TransportError> {
        let value = serde_json::to_string(payload)
            .map_err(|e| TransportError::Build(format!("Failed to serialize part '{}': {}", name, e)))?;
        Ok(Self::Json {
            name: name.to_string(),
            value,
        })
    }

    pub fn file(name: &str, attachment: Attachment) -> Self {
        Self::File {
            name: name.to_string(),
            attachment,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::Json { name, .. } | Self::File { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Already serialized JSON
    Json(String),
    Multipart(Vec<MultipartPart>),
}

/// Запрос к бэкенду; `path` относительный (`/api/...`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn json<T: Serialize>(
        method: Method,
        path: impl Into<String>,
        payload: &T,
    ) -> Result<Self, TransportError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| TransportError::Build(format!("Failed to serialize request: {}", e)))?;
        Ok(Self {
            method,
            path: path.into(),
            body: RequestBody::Json(body),
        })
    }

    pub fn multipart(method: Method, path: impl Into<String>, parts: Vec<MultipartPart>) -> Self {
        Self {
            method,
            path: path.into(),
            body: RequestBody::Multipart(parts),
        }
    }

    /// JSON body parsed back, for assertions and logs
    pub fn json_body(&self) -> Option<serde_json::Value> {
        match &self.body {
            RequestBody::Json(s) => serde_json::from_str(s).ok(),
            _ => None,
        }
    }

    pub fn parts(&self) -> &[MultipartPart] {
        match &self.body {
            RequestBody::Multipart(parts) => parts,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false)
    }

    pub fn has_body(&self) -> bool {
        self.body.iter().any(|b| !b.is_ascii_whitespace())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Typed JSON body; a non-JSON content type is an error
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, UnexpectedResponseError> {
        if !self.is_json() {
            return Err(UnexpectedResponseError::NotJson {
                content_type: self.content_type.clone().unwrap_or_default(),
            });
        }
        serde_json::from_slice(&self.body)
            .map_err(|e| UnexpectedResponseError::Malformed(e.to_string()))
    }
}

#[async_trait(?Send)]
pub trait HttpTransport: Clone + 'static {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

// ============================================================================
// Browser transport
// ============================================================================

/// Транспорт поверх `gloo_net::http`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlooTransport {
    base_url: String,
    bearer: Option<String>,
}

impl GlooTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bearer: None,
        }
    }

    /// Транспорт на адрес из конфигурации
    pub fn from_config() -> Self {
        Self::new(api_base())
    }

    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token.filter(|t| !t.is_empty());
        self
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url(&request.path);
        let method = match request.method {
            Method::Get => GlooMethod::GET,
            Method::Post => GlooMethod::POST,
            Method::Put => GlooMethod::PUT,
            Method::Delete => GlooMethod::DELETE,
        };
        let mut builder = RequestBuilder::new(&url).method(method);
        if let Some(token) = &self.bearer {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let built = match request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(json) => builder.header("Content-Type", "application/json").body(json),
            // Content-Type с boundary браузер выставит сам
            RequestBody::Multipart(parts) => builder.body(form_data(&parts)?),
        }
        .map_err(|e| TransportError::Build(e.to_string()))?;

        let response = built
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let content_type = response.headers().get("content-type");
        let body = response
            .binary()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        log::debug!("{} {} -> {}", request.method.as_str(), request.path, status);

        Ok(ApiResponse {
            status,
            content_type,
            body,
        })
    }
}

fn js_error(context: &str, e: wasm_bindgen::JsValue) -> TransportError {
    TransportError::Build(format!("{}: {:?}", context, e))
}

fn form_data(parts: &[MultipartPart]) -> Result<web_sys::FormData, TransportError> {
    let form = web_sys::FormData::new().map_err(|e| js_error("Failed to create form data", e))?;
    for part in parts {
        match part {
            MultipartPart::Text { name, value } => form
                .append_with_str(name, value)
                .map_err(|e| js_error("Failed to append field", e))?,
            MultipartPart::Json { name, value } => {
                let blob = bytes_to_blob(value.as_bytes(), "application/json")?;
                form.append_with_blob(name, &blob)
                    .map_err(|e| js_error("Failed to append JSON part", e))?
            }
            MultipartPart::File { name, attachment } => {
                let blob = bytes_to_blob(&attachment.bytes, &attachment.mime_type)?;
                form.append_with_blob_and_filename(name, &blob, &attachment.file_name)
                    .map_err(|e| js_error("Failed to append file", e))?
            }
        }
    }
    Ok(form)
}

/// Blob из байтов (для multipart и скачивания)
pub fn bytes_to_blob(bytes: &[u8], mime_type: &str) -> Result<web_sys::Blob, TransportError> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array);

    let properties = web_sys::BlobPropertyBag::new();
    properties.set_type(mime_type);

    web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &properties)
        .map_err(|e| js_error("Failed to create blob", e))
}

/// Прочитать выбранный файл целиком
pub async fn read_file(file: web_sys::File) -> Result<Attachment, TransportError> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| js_error("Failed to read file", e))?;
    let buffer = buffer
        .dyn_into::<js_sys::ArrayBuffer>()
        .map_err(|e| js_error("Unexpected file buffer", e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let mime_type = if file.type_().is_empty() {
        "application/octet-stream".to_string()
    } else {
        file.type_()
    };
    Ok(Attachment::new(file.name(), mime_type, bytes))
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport for editor tests

    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    pub struct ScriptedTransport {
        replies: Rc<RefCell<VecDeque<Result<ApiResponse, TransportError>>>>,
        sent: Rc<RefCell<Vec<ApiRequest>>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(&self, response: Result<ApiResponse, TransportError>) -> &Self {
            self.replies.borrow_mut().push_back(response);
            self
        }

        pub fn reply_json(&self, status: u16, body: serde_json::Value) -> &Self {
            self.reply(Ok(ApiResponse {
                status,
                content_type: Some("application/json".to_string()),
                body: body.to_string().into_bytes(),
            }))
        }

        pub fn reply_text(&self, status: u16, content_type: &str, body: &str) -> &Self {
            self.reply(Ok(ApiResponse {
                status,
                content_type: Some(content_type.to_string()),
                body: body.as_bytes().to_vec(),
            }))
        }

        pub fn sent(&self) -> Vec<ApiRequest> {
            self.sent.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for ScriptedTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            self.sent.borrow_mut().push(request);
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Network("no scripted reply".into())))
        }
    }
}
