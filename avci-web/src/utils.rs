use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

#[derive(Serialize, Deserialize)]
pub(crate) struct RpcResult {
    pub is_ok: bool,
    pub reason: String,
}

fn map_connection_error<E: fmt::Display>(url: &Url) -> impl FnOnce(E) -> avci::Error + '_ {
    move |e: E| avci::Error::Connection {
        message: format!("url:{}: {}", url, e),
    }
}

pub(crate) fn post<T: Serialize, U: DeserializeOwned>(url: Url, msg: T) -> Result<U, avci::Error> {
    ureq::post(url.as_str())
        .send_json(serde_json::to_value(msg).unwrap())
        .map_err(map_connection_error(&url))?
        .into_json()
        .map_err(map_connection_error(&url))
}
