//! Request templates keyed by option identifier.
//!
//! A template holds the fixed fields a backend expects for one option:
//! which model to use, which hosted assistant to invoke, sampling settings.
//! Templates are never modified after insertion; dispatch clones one and
//! overlays the caller's fields on the copy.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, Result};

/// Default request fields for one option key.
///
/// Presets have different shapes, so every field is optional and absent
/// fields are left out of the serialized payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionTemplate {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub model:           Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub question:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub kontekst:        Option<String>,
  #[serde(
    default,
    rename = "messageHistory",
    skip_serializing_if = "Option::is_none"
  )]
  pub message_history: Option<String>,
  #[serde(
    default,
    rename = "base64String",
    skip_serializing_if = "Option::is_none"
  )]
  pub base64_string:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub assistant_id:    Option<String>,
  /// When true the backend starts a fresh thread and ignores `thread_id`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub new_thread:      Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub thread_id:       Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub parameters:      Option<SamplingParameters>,
}

/// Sampling configuration forwarded verbatim to text-generation backends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplingParameters {
  pub stream:             bool,
  pub max_tokens:         u32,
  pub max_new_tokens:     u32,
  pub top_k:              u32,
  pub top_p:              f64,
  pub stop:               Vec<String>,
  pub temperature:        f64,
  pub do_sample:          bool,
  pub repetition_penalty: f64,
  pub return_full_text:   bool,
}

impl OptionTemplate {
  /// An image-capable chat preset: blank message, history, context and
  /// base64 payload fields for the caller to fill.
  pub fn image_chat(model: &str) -> Self {
    Self {
      model: Some(model.to_string()),
      message: Some(String::new()),
      message_history: Some(String::new()),
      kontekst: Some(String::new()),
      base64_string: Some(String::new()),
      ..Default::default()
    }
  }

  /// A preset bound to a hosted assistant that always opens a new thread.
  pub fn assistant(model: &str, assistant_id: &str) -> Self {
    Self {
      model: Some(model.to_string()),
      message: Some(String::new()),
      kontekst: Some(String::new()),
      assistant_id: Some(assistant_id.to_string()),
      new_thread: Some(true),
      thread_id: Some(String::new()),
      ..Default::default()
    }
  }

  /// A question-style preset carrying its own sampling parameters.
  pub fn question(parameters: SamplingParameters) -> Self {
    Self {
      question: Some(String::new()),
      parameters: Some(parameters),
      ..Default::default()
    }
  }
}

/// Maps option keys to their templates.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
  templates: HashMap<String, OptionTemplate>,
}

impl Catalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// The presets shipped with the frontend this crate serves.
  pub fn builtin() -> Self {
    let assistants = [
      ("option3", "asst_masx2DR1ynqNvP308OWlKzix"),
      ("option4", "asst_r7NROIPTuk2OME5sElp4ORSl"),
      ("option5", "asst_iZz9L7JGhfTgjdgXDeR5SsgJ"),
      ("option6", "asst_PjgBFDXTELeMF6vXKvhlOZrH"),
      ("option7", "asst_kleLVY0hLwXAgcgxoBgzwqLA"),
      ("option8", "asst_MZM21yV96uFVHet8O09zkKtK"),
      ("option10", "asst_0nUf4eeGzahHpm50tKYVdAOg"),
      ("option11", "asst_w4CndCxQh1DZ5XTMM21cRUJw"),
      ("option12", ""),
    ];

    let mut templates = HashMap::new();
    templates.insert("option1".to_string(), OptionTemplate::image_chat("gpt-4o"));
    templates.insert(
      "option2".to_string(),
      OptionTemplate::question(SamplingParameters {
        stream:             false,
        max_tokens:         500,
        max_new_tokens:     1024,
        top_k:              64,
        top_p:              0.9,
        stop:               vec!["<|im_end|>".to_string()],
        temperature:        0.2,
        do_sample:          true,
        repetition_penalty: 1.0,
        return_full_text:   true,
      }),
    );
    templates.insert(
      "option9".to_string(),
      OptionTemplate::image_chat("o1-preview"),
    );
    for (key, assistant_id) in assistants {
      templates.insert(
        key.to_string(),
        OptionTemplate::assistant("gpt-4o", assistant_id),
      );
    }

    Self { templates }
  }

  /// Builds a catalog from a JSON object of option keys to templates.
  pub fn from_json(json: &str) -> Result<Self> {
    let templates =
      serde_json::from_str(json).map_err(DispatchError::InvalidCatalog)?;
    Ok(Self { templates })
  }

  /// Adds a template. Keys are unique; an existing key is never overwritten.
  pub fn insert(
    &mut self,
    key: impl Into<String>,
    template: OptionTemplate,
  ) -> Result<()> {
    let key = key.into();
    if self.templates.contains_key(&key) {
      return Err(DispatchError::DuplicateOption(key));
    }
    self.templates.insert(key, template);
    Ok(())
  }

  pub fn get(&self, key: &str) -> Result<&OptionTemplate> {
    self
      .templates
      .get(key)
      .ok_or_else(|| DispatchError::UnknownOption(key.to_string()))
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.templates.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.templates.len()
  }

  pub fn is_empty(&self) -> bool {
    self.templates.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn builtin_has_every_preset() {
    let catalog = Catalog::builtin();
    assert_eq!(catalog.len(), 12);
    for n in 1..=12 {
      assert!(catalog.get(&format!("option{n}")).is_ok(), "option{n}");
    }
  }

  #[test]
  fn unknown_key_is_rejected() {
    let catalog = Catalog::builtin();
    match catalog.get("option13") {
      Err(DispatchError::UnknownOption(key)) => assert_eq!(key, "option13"),
      other => panic!("expected UnknownOption, got {other:?}"),
    }
  }

  #[test]
  fn duplicate_insert_keeps_the_original() {
    let mut catalog = Catalog::new();
    catalog
      .insert("a", OptionTemplate::image_chat("gpt-4o"))
      .unwrap();
    let err = catalog
      .insert("a", OptionTemplate::image_chat("o1-preview"))
      .unwrap_err();

    assert!(matches!(err, DispatchError::DuplicateOption(ref k) if k == "a"));
    assert_eq!(catalog.get("a").unwrap().model.as_deref(), Some("gpt-4o"));
  }

  #[test]
  fn from_json_reads_backend_field_names() {
    let catalog = Catalog::from_json(
      r#"{
        "bilde": { "model": "gpt-4o", "message": "", "base64String": "" },
        "nora": {
          "question": "",
          "parameters": {
            "stream": false, "max_tokens": 200, "max_new_tokens": 512,
            "top_k": 40, "top_p": 0.95, "stop": [], "temperature": 0.7,
            "do_sample": true, "repetition_penalty": 1.1,
            "return_full_text": false
          }
        }
      }"#,
    )
    .unwrap();

    assert_eq!(catalog.len(), 2);
    let bilde = catalog.get("bilde").unwrap();
    assert_eq!(bilde.base64_string.as_deref(), Some(""));
    assert_eq!(bilde.kontekst, None);
    let parameters = catalog.get("nora").unwrap().parameters.as_ref().unwrap();
    assert_eq!(parameters.top_k, 40);
    assert_eq!(parameters.repetition_penalty, 1.1);
  }

  #[test]
  fn from_json_rejects_malformed_input() {
    let err = Catalog::from_json(r#"{ "a": { "new_thread": "yes" } }"#)
      .unwrap_err();
    assert!(matches!(err, DispatchError::InvalidCatalog(_)));
  }

  #[test]
  fn templates_serialize_with_backend_field_names() {
    let catalog = Catalog::builtin();

    assert_eq!(
      serde_json::to_value(catalog.get("option1").unwrap()).unwrap(),
      json!({
        "message": "",
        "messageHistory": "",
        "kontekst": "",
        "model": "gpt-4o",
        "base64String": ""
      })
    );
    assert_eq!(
      serde_json::to_value(catalog.get("option5").unwrap()).unwrap(),
      json!({
        "message": "",
        "kontekst": "",
        "model": "gpt-4o",
        "assistant_id": "asst_iZz9L7JGhfTgjdgXDeR5SsgJ",
        "new_thread": true,
        "thread_id": ""
      })
    );

    let option2 = serde_json::to_value(catalog.get("option2").unwrap()).unwrap();
    assert_eq!(option2["question"], "");
    assert_eq!(option2["parameters"]["stop"], json!(["<|im_end|>"]));
    assert_eq!(option2["parameters"]["max_new_tokens"], 1024);
    assert_eq!(option2["parameters"]["return_full_text"], true);
  }
}
