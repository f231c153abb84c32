//! API utilities for frontend-backend communication

use gloo_net::http::Request;
use serde::de::DeserializeOwned;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
/// Empty string if window is not available.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path (should start with "/api/")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// GET `path` and decode the JSON body. Non-2xx is an error.
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let url = api_url(path);
    let response = Request::get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if response.status() == 404 {
        return Err(format!("Not found: {}", path));
    }
    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Тело `application/x-www-form-urlencoded` из пар имя/значение
pub fn encode_form(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// POST формы как это сделал бы браузер; возвращает URL после редиректов.
pub async fn post_form(url: &str, pairs: &[(String, String)]) -> Result<String, String> {
    let response = Request::post(url)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(encode_form(pairs))
        .map_err(|e| format!("Request build failed: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }
    Ok(response.url())
}

/// Значение параметра из строки запроса текущей страницы
pub fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params: std::collections::HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).ok()?;
    params.get(name).cloned().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_form() {
        let pairs = vec![
            ("items-0-product".to_string(), "5".to_string()),
            ("batch".to_string(), "B 1&2".to_string()),
        ];
        assert_eq!(encode_form(&pairs), "items-0-product=5&batch=B%201%262");
        assert_eq!(encode_form(&[]), "");
    }
}
