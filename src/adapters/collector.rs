//! HTTP collector adapter.
//!
//! Implements [`CollectorPort`] with a one-shot JSON POST per call. On
//! the device this wraps the ESP-IDF `esp_http_client` component; on the
//! host it is a simulation stub whose response code tests can inject.
//!
//! The port contract mirrors the wire reality: a positive return value
//! is the server's HTTP status code, a non-positive one is a client-side
//! failure (connect refused, DNS, timeout). The transport judges success
//! purely by sign, so a 500 from the collector still counts as "sent".

use log::warn;

#[cfg(not(target_os = "espidf"))]
use log::debug;

use crate::app::ports::CollectorPort;

#[cfg(not(target_os = "espidf"))]
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// POST timeout. One failed delivery must cost well under one
/// networked cycle.
#[cfg(target_os = "espidf")]
const POST_TIMEOUT_MS: i32 = 1500;

// ── Simulation hooks (host builds only) ───────────────────────

#[cfg(not(target_os = "espidf"))]
static SIM_RESPONSE_CODE: AtomicI32 = AtomicI32::new(200);
#[cfg(not(target_os = "espidf"))]
static SIM_POST_COUNT: AtomicUsize = AtomicUsize::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_LAST_BODY: std::sync::Mutex<String> = std::sync::Mutex::new(String::new());

/// Inject the response code the next POSTs will report.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_response_code(code: i32) {
    SIM_RESPONSE_CODE.store(code, Ordering::Relaxed);
}

/// Number of POSTs issued since process start.
#[cfg(not(target_os = "espidf"))]
pub fn sim_post_count() -> usize {
    SIM_POST_COUNT.load(Ordering::Relaxed)
}

/// Body of the most recent simulated POST.
#[cfg(not(target_os = "espidf"))]
pub fn sim_last_body() -> String {
    SIM_LAST_BODY
        .lock()
        .map(|body| body.clone())
        .unwrap_or_default()
}

// ── Adapter ───────────────────────────────────────────────────

pub struct HttpCollector {
    url: heapless::String<96>,
}

impl HttpCollector {
    pub fn new(url: &heapless::String<96>) -> Self {
        Self { url: url.clone() }
    }

    #[cfg(target_os = "espidf")]
    fn platform_post(&mut self, json: &str) -> i32 {
        let url_c = match std::ffi::CString::new(self.url.as_str()) {
            Ok(c) => c,
            Err(_) => return -1,
        };

        // SAFETY: config and all pointers passed below outlive the
        // client handle, which is cleaned up before this function
        // returns.
        unsafe {
            let mut config: esp_http_client_config_t = core::mem::zeroed();
            config.url = url_c.as_ptr();
            config.method = esp_http_client_method_t_HTTP_METHOD_POST;
            config.timeout_ms = POST_TIMEOUT_MS;

            let client = esp_http_client_init(&config);
            if client.is_null() {
                return -1;
            }

            esp_http_client_set_header(
                client,
                b"Content-Type\0".as_ptr() as *const _,
                b"application/json\0".as_ptr() as *const _,
            );
            esp_http_client_set_post_field(
                client,
                json.as_ptr() as *const _,
                json.len() as i32,
            );

            let err = esp_http_client_perform(client);
            let code = if err == ESP_OK {
                esp_http_client_get_status_code(client)
            } else {
                // Report the ESP error as a negative code so the
                // transport logs it distinguishably from HTTP statuses.
                -err
            };
            esp_http_client_cleanup(client);
            code
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_post(&mut self, json: &str) -> i32 {
        SIM_POST_COUNT.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut body) = SIM_LAST_BODY.lock() {
            body.clear();
            body.push_str(json);
        }
        let code = SIM_RESPONSE_CODE.load(Ordering::Relaxed);
        debug!("collector(sim): POST to '{}' -> {}", self.url, code);
        code
    }
}

impl CollectorPort for HttpCollector {
    fn post_json(&mut self, json: &str) -> i32 {
        if self.url.is_empty() {
            warn!("collector: no URL configured, dropping record");
            return -1;
        }
        self.platform_post(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector(url: &str) -> HttpCollector {
        HttpCollector::new(&heapless::String::try_from(url).unwrap())
    }

    #[test]
    fn empty_url_reports_client_failure() {
        let mut c = collector("");
        assert_eq!(c.post_json("{}"), -1);
    }

    #[test]
    fn reports_injected_response_code() {
        sim_set_response_code(503);
        let mut c = collector("http://collector.local/ingest");
        assert_eq!(c.post_json("{\"pm2_5\":15.0}"), 503);
        sim_set_response_code(200);
    }
}
