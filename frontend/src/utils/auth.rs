use js_sys::{wasm_bindgen::JsValue, Array, Uint8Array};
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, CryptoKey, SubtleCrypto};

use super::server::AppError;
const SECRET_KEY: &str = env!("HMAC_KEY");

/// HMAC-SHA256 signer for gateway calls. The key is imported once and reused.
pub struct AuthSignature {
  subtle: SubtleCrypto,
  algo: js_sys::Object,
  crypto_key: CryptoKey
}

impl AuthSignature {
  pub async fn new() -> Result<Self, AppError> {
    let window = window().ok_or_else(|| AppError::WasmError("global window is not available".to_string()))?;
    let crypto = window.crypto().map_err(|e| AppError::WasmError(format!("{:?}", e)))?;
    let subtle = crypto.subtle();

    let algo = js_sys::Object::new();
    js_sys::Reflect::set(&algo, &JsValue::from_str("name"), &JsValue::from_str("HMAC")).map_err(|e| AppError::WasmError(format!("{:?}", e)))?;
    js_sys::Reflect::set(&algo, &JsValue::from_str("hash"), &JsValue::from_str("SHA-256")).map_err(|e| AppError::WasmError(format!("{:?}", e)))?;

    let crypto_key = Self::import_key(&subtle, &algo).await?;

    Ok(Self { subtle, algo, crypto_key })
  }

  async fn import_key(subtle: &SubtleCrypto, algo: &js_sys::Object) -> Result<CryptoKey, AppError> {
    let key_array = to_uint8_array(SECRET_KEY.as_bytes());

    let usages = Array::new();
    usages.push(&JsValue::from_str("sign"));

    let key_promise = subtle.import_key_with_object("raw", &key_array, algo, false, &usages)
      .map_err(|e| AppError::WasmError(format!("{:?}", e)))?;

    let key: CryptoKey = JsFuture::from(key_promise).await.map_err(|e| AppError::WasmError(format!("{:?}", e)))?.into();
    Ok(key)
  }

  /// Hex signature over `method ‖ timestamp`.
  pub async fn sign_call(&self, method: &str, timestamp: u64) -> Result<String, AppError> {
    let message_array = to_uint8_array(signing_message(method, timestamp).as_bytes());

    let sign_promise = self.subtle.sign_with_object_and_buffer_source(&self.algo, &self.crypto_key, &message_array)
      .map_err(|e| AppError::WasmError(format!("{:?}", e)))?;

    let signature_buffer = JsFuture::from(sign_promise).await.map_err(|e| AppError::WasmError(format!("{:?}", e)))?;
    Ok(to_hex(&Uint8Array::new(&signature_buffer).to_vec()))
  }
}

fn to_uint8_array(bytes: &[u8]) -> Uint8Array {
  let array = Uint8Array::new_with_length(bytes.len() as u32);
  array.copy_from(bytes);
  array
}

pub fn signing_message(method: &str, timestamp: u64) -> String {
  format!("{}{}", method, timestamp)
}

pub fn to_hex(bytes: &[u8]) -> String {
  bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut acc, byte| {
    acc.push_str(&format!("{:02x}", byte));
    acc
  })
}
