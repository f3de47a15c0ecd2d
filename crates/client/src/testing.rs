//! In-memory stand-in for the json-server backend, for tests.
//!
//! [`FakeJsonServer`] is a `wiremock` responder that keeps collections of JSON
//! objects and answers list/get/create/patch/delete the way json-server does.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

type Collections = HashMap<String, Vec<Value>>;

#[derive(Debug, Clone, Default)]
pub struct FakeJsonServer {
    collections: Arc<Mutex<Collections>>,
}

impl FakeJsonServer {
    /// Create a backend with empty `ingredients` and `recipes` collections.
    pub fn new() -> Self {
        Self::default()
            .with_collection("ingredients", Vec::new())
            .with_collection("recipes", Vec::new())
    }

    /// Seed (or replace) a collection.
    pub fn with_collection(self, name: &str, items: Vec<Value>) -> Self {
        self.lock().insert(name.to_string(), items);
        self
    }

    /// Current contents of a collection, in insertion order.
    pub fn items(&self, name: &str) -> Vec<Value> {
        self.lock().get(name).cloned().unwrap_or_default()
    }

    /// Start a mock server answering every request from this backend.
    pub async fn start(&self) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(self.clone())
            .mount(&server)
            .await;
        server
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        // Poisoning is ignored
        self.collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn find<'a>(items: &'a mut [Value], id: &str) -> Option<&'a mut Value> {
    items
        .iter_mut()
        .find(|item| item.get("id").and_then(Value::as_str) == Some(id))
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(Value::Object(Map::new()))
}

impl Respond for FakeJsonServer {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let segments: Vec<String> = request
            .url
            .path_segments()
            .map(|segments| {
                segments
                    .filter(|s| !s.is_empty())
                    .map(|s| {
                        urlencoding::decode(s)
                            .map(|decoded| decoded.into_owned())
                            .unwrap_or_else(|_| s.to_string())
                    })
                    .collect()
            })
            .unwrap_or_default();
        let body: Option<Value> = serde_json::from_slice(&request.body).ok();

        let mut collections = self.lock();

        match (request.method.as_str(), segments.as_slice()) {
            ("GET", [collection]) => match collections.get(collection) {
                Some(items) => ResponseTemplate::new(200).set_body_json(items),
                None => not_found(),
            },
            ("GET", [collection, id]) => {
                match collections.get_mut(collection).and_then(|items| find(items, id)) {
                    Some(item) => ResponseTemplate::new(200).set_body_json(item.clone()),
                    None => not_found(),
                }
            }
            ("POST", [collection]) => {
                let Some(item) = body.filter(Value::is_object) else {
                    return ResponseTemplate::new(400);
                };
                let items = collections.entry(collection.clone()).or_default();
                let id = item.get("id").and_then(Value::as_str).unwrap_or_default().to_string();
                if find(items, &id).is_some() {
                    return ResponseTemplate::new(409);
                }
                items.push(item.clone());
                ResponseTemplate::new(201).set_body_json(item)
            }
            ("PATCH", [collection, id]) => {
                let Some(Value::Object(changes)) = body else {
                    return ResponseTemplate::new(400);
                };
                match collections.get_mut(collection).and_then(|items| find(items, id)) {
                    Some(Value::Object(stored)) => {
                        for (field, value) in changes {
                            if field != "id" {
                                stored.insert(field, value);
                            }
                        }
                        ResponseTemplate::new(200).set_body_json(Value::Object(stored.clone()))
                    }
                    _ => not_found(),
                }
            }
            ("DELETE", [collection, id]) => {
                let Some(items) = collections.get_mut(collection) else {
                    return not_found();
                };
                match items
                    .iter()
                    .position(|item| item.get("id").and_then(Value::as_str) == Some(id.as_str()))
                {
                    Some(index) => ResponseTemplate::new(200).set_body_json(items.remove(index)),
                    None => not_found(),
                }
            }
            _ => not_found(),
        }
    }
}
