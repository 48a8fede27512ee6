//! HTTP 请求封装模块
//!
//! 基于 `window.fetch` 实现服务层的 `HttpClient`。

use skyroster::{HttpClient, HttpRequest, HttpResponse, SkyError, SkyResult};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// 浏览器 fetch 客户端
#[derive(Clone, Copy, Default)]
pub struct FetchClient;

fn js_error(context: &str, e: JsValue) -> SkyError {
    SkyError::network(format!("{}: {:?}", context, e))
}

impl FetchClient {
    fn build_request(req: &HttpRequest) -> SkyResult<Request> {
        let headers = Headers::new().map_err(|e| js_error("Failed to create headers", e))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| js_error("Failed to set header", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| js_error("Failed to build request", e))
    }

    /// 读取响应体文本
    async fn text(response: &Response) -> SkyResult<String> {
        let promise = response
            .text()
            .map_err(|e| js_error("Failed to read response body", e))?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|e| js_error("Failed to read response body", e))?;
        text.as_string()
            .ok_or_else(|| SkyError::serialization("Response body is not text"))
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> SkyResult<HttpResponse> {
        let request = Self::build_request(&req)?;

        let window =
            web_sys::window().ok_or_else(|| SkyError::network("No window object available"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_error("Request failed", e))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| js_error("Unexpected fetch result", e))?;

        Ok(HttpResponse {
            status: response.status(),
            body: Self::text(&response).await?,
        })
    }
}
