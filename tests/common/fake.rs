//! In-process stand-in for the PetFriends service.
//!
//! A single catch-all wiremock mock routes every request into a stateful
//! responder, so scenarios that create, list and delete pets see their own
//! effects the way they would against the live service.

use base64::prelude::*;
use petfriends_cli::Pet;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const VALID_EMAIL: &str = "valid@example.com";
pub const VALID_PASSWORD: &str = "validpass";
pub const INVALID_EMAIL: &str = "invalid@example.com";
pub const INVALID_PASSWORD: &str = "wrong-password";

const OTHER_EMAIL: &str = "neighbour@example.com";
const OTHER_PASSWORD: &str = "neighbourpass";

const FORBIDDEN_PAGE: &str = "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 3.2 Final//EN\">\n\
<title>403 Forbidden</title>\n<h1>Forbidden</h1>\n\
<p>This user wasn't found in database or auth_key is invalid</p>\n";

/// Running fake service plus a handle on its state.
pub struct FakeService {
    pub server: MockServer,
    pub state: FakePetFriends,
}

impl FakeService {
    /// Start with the valid test user (no pets) and a neighbour owning one
    /// pet, so the full catalog is never empty.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let state = FakePetFriends::default();
        state.register(VALID_EMAIL, VALID_PASSWORD);
        state.register(OTHER_EMAIL, OTHER_PASSWORD);
        state.seed_pet(OTHER_EMAIL, "Шарик", "дворняга", "2");

        Mock::given(any())
            .respond_with(state.clone())
            .mount(&server)
            .await;

        Self { server, state }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }
}

#[derive(Clone, Default)]
pub struct FakePetFriends {
    inner: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    users: Vec<User>,
    pets: Vec<Pet>,
    next_id: u64,
}

struct User {
    id: String,
    email: String,
    password: String,
    key: String,
}

impl FakePetFriends {
    pub fn register(&self, email: &str, password: &str) {
        let mut state = self.inner.lock().unwrap();
        let n = state.users.len() + 1;
        state.users.push(User {
            id: format!("user-{}", n),
            email: email.to_string(),
            password: password.to_string(),
            key: format!("ea738148a1f19838e1c5d1413877f3691a3731380e733e877b0ae72{:03}", n),
        });
    }

    pub fn seed_pet(&self, owner_email: &str, name: &str, animal_type: &str, age: &str) -> Pet {
        let mut state = self.inner.lock().unwrap();
        let owner = state
            .users
            .iter()
            .find(|u| u.email == owner_email)
            .map(|u| u.id.clone())
            .expect("seed owner is registered");
        state.insert_pet(&owner, name, animal_type, age, String::new())
    }

    pub fn pets_owned_by(&self, email: &str) -> Vec<Pet> {
        let state = self.inner.lock().unwrap();
        let Some(user) = state.users.iter().find(|u| u.email == email) else {
            return Vec::new();
        };
        state
            .pets
            .iter()
            .filter(|p| p.user_id.as_deref() == Some(user.id.as_str()))
            .cloned()
            .collect()
    }

    pub fn pet_count(&self) -> usize {
        self.inner.lock().unwrap().pets.len()
    }
}

impl Respond for FakePetFriends {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut state = self.inner.lock().unwrap();
        state.handle(request)
    }
}

impl State {
    fn handle(&mut self, request: &Request) -> ResponseTemplate {
        let method = request.method.as_str().to_string();
        let path = request.url.path().to_string();

        if method == "GET" && path == "/api/key" {
            return self.issue_key(request);
        }

        let Some(user_id) = self.authenticate(request) else {
            return forbidden();
        };

        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        match (method.as_str(), segments.as_slice()) {
            ("GET", ["api", "pets"]) => self.list(request, &user_id),
            ("POST", ["api", "pets"]) => self.create_with_photo(request, &user_id),
            ("POST", ["api", "create_pet_simple"]) => self.create_simple(request, &user_id),
            ("POST", ["api", "pets", "set_photo", id]) => self.set_photo(request, &user_id, id),
            ("PUT", ["api", "pets", id]) => self.update(request, &user_id, id),
            ("DELETE", ["api", "pets", id]) => self.delete(&user_id, id),
            _ => ResponseTemplate::new(404).set_body_string("Not Found"),
        }
    }

    fn issue_key(&self, request: &Request) -> ResponseTemplate {
        let email = header(request, "email");
        let password = header(request, "password");
        let user = self
            .users
            .iter()
            .find(|u| Some(u.email.as_str()) == email && Some(u.password.as_str()) == password);

        match user {
            Some(user) => ResponseTemplate::new(200).set_body_json(serde_json::json!({"key": user.key})),
            None => forbidden(),
        }
    }

    fn authenticate(&self, request: &Request) -> Option<String> {
        let key = header(request, "auth_key")?;
        self.users.iter().find(|u| u.key == key).map(|u| u.id.clone())
    }

    fn list(&self, request: &Request, user_id: &str) -> ResponseTemplate {
        let filter = request
            .url
            .query_pairs()
            .find(|(k, _)| k == "filter")
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default();

        let pets: Vec<&Pet> = match filter.as_str() {
            "" => self.pets.iter().collect(),
            "my_pets" => self
                .pets
                .iter()
                .filter(|p| p.user_id.as_deref() == Some(user_id))
                .collect(),
            _ => return server_error("Filter value is incorrect"),
        };

        ResponseTemplate::new(200).set_body_json(serde_json::json!({"pets": pets}))
    }

    fn create_with_photo(&mut self, request: &Request, user_id: &str) -> ResponseTemplate {
        let parts = parse_multipart(request);
        let fields = text_fields(&parts);

        let Some((name, animal_type, age)) = required_fields(&fields) else {
            return bad_request();
        };
        let Some(photo) = parts.iter().find(|p| p.name == "pet_photo") else {
            return bad_request();
        };
        if !is_image(&photo.data) {
            return bad_request();
        }

        let data_url = to_data_url(photo);
        let pet = self.insert_pet(user_id, name, animal_type, age, data_url);
        ResponseTemplate::new(200).set_body_json(&pet)
    }

    fn create_simple(&mut self, request: &Request, user_id: &str) -> ResponseTemplate {
        let fields = url_form(request);

        let Some((name, animal_type, age)) = required_fields(&fields) else {
            return bad_request();
        };

        let pet = self.insert_pet(user_id, name, animal_type, age, String::new());
        ResponseTemplate::new(200).set_body_json(&pet)
    }

    fn set_photo(&mut self, request: &Request, user_id: &str, id: &str) -> ResponseTemplate {
        let parts = parse_multipart(request);
        let Some(photo) = parts.iter().find(|p| p.name == "pet_photo") else {
            return bad_request();
        };
        if !is_image(&photo.data) {
            return server_error("Internal Server Error");
        }
        let Some(pet) = self.owned_pet_mut(user_id, id) else {
            return bad_request();
        };

        pet.pet_photo = to_data_url(photo);
        ResponseTemplate::new(200).set_body_json(&*pet)
    }

    fn update(&mut self, request: &Request, user_id: &str, id: &str) -> ResponseTemplate {
        let fields = url_form(request);
        if let Some(age) = fields.get("age") {
            if age.trim().parse::<u32>().is_err() {
                return bad_request();
            }
        }
        let Some(pet) = self.owned_pet_mut(user_id, id) else {
            return bad_request();
        };

        if let Some(name) = fields.get("name").filter(|v| !v.is_empty()) {
            pet.name = name.clone();
        }
        if let Some(animal_type) = fields.get("animal_type").filter(|v| !v.is_empty()) {
            pet.animal_type = animal_type.clone();
        }
        if let Some(age) = fields.get("age") {
            pet.age = age.trim().to_string();
        }
        ResponseTemplate::new(200).set_body_json(&*pet)
    }

    fn delete(&mut self, user_id: &str, id: &str) -> ResponseTemplate {
        let before = self.pets.len();
        self.pets
            .retain(|p| !(p.id == id && p.user_id.as_deref() == Some(user_id)));

        if self.pets.len() == before {
            return bad_request();
        }
        ResponseTemplate::new(200)
    }

    fn owned_pet_mut(&mut self, user_id: &str, id: &str) -> Option<&mut Pet> {
        self.pets
            .iter_mut()
            .find(|p| p.id == id && p.user_id.as_deref() == Some(user_id))
    }

    fn insert_pet(&mut self, user_id: &str, name: &str, animal_type: &str, age: &str, photo: String) -> Pet {
        self.next_id += 1;
        let pet = Pet {
            id: format!("{:032x}", self.next_id),
            name: name.to_string(),
            animal_type: animal_type.to_string(),
            age: age.trim().to_string(),
            pet_photo: photo,
            created_at: format!("{}.0", 1_700_000_000 + self.next_id),
            user_id: Some(user_id.to_string()),
        };
        self.pets.push(pet.clone());
        pet
    }
}

/// Name, type and a whole-number age, all present and non-empty.
fn required_fields(fields: &HashMap<String, String>) -> Option<(&str, &str, &str)> {
    let name = fields.get("name").filter(|v| !v.is_empty())?;
    let animal_type = fields.get("animal_type").filter(|v| !v.is_empty())?;
    let age = fields.get("age")?;
    age.trim().parse::<u32>().ok()?;
    Some((name.as_str(), animal_type.as_str(), age.as_str()))
}

fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

fn forbidden() -> ResponseTemplate {
    ResponseTemplate::new(403).set_body_string(FORBIDDEN_PAGE)
}

fn bad_request() -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_string("Bad Request")
}

fn server_error(msg: &str) -> ResponseTemplate {
    ResponseTemplate::new(500).set_body_string(msg)
}

fn is_image(data: &[u8]) -> bool {
    data.starts_with(&[0xFF, 0xD8, 0xFF])
        || data.starts_with(b"\x89PNG\r\n\x1a\n")
        || data.starts_with(b"GIF8")
}

fn to_data_url(part: &FormPart) -> String {
    let mime = part.content_type.as_deref().unwrap_or("image/jpeg");
    format!("data:{};base64,{}", mime, BASE64_STANDARD.encode(&part.data))
}

fn url_form(request: &Request) -> HashMap<String, String> {
    url::form_urlencoded::parse(&request.body)
        .into_owned()
        .collect()
}

fn text_fields(parts: &[FormPart]) -> HashMap<String, String> {
    parts
        .iter()
        .filter(|p| p.filename.is_none())
        .map(|p| (p.name.clone(), String::from_utf8_lossy(&p.data).into_owned()))
        .collect()
}

// ============================================================================
// multipart/form-data parsing
// ============================================================================

#[derive(Debug)]
pub struct FormPart {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

pub fn parse_multipart(request: &Request) -> Vec<FormPart> {
    let Some(content_type) = header(request, "content-type") else {
        return Vec::new();
    };
    let Some(boundary) = content_type.split("boundary=").nth(1) else {
        return Vec::new();
    };
    let delimiter = format!("--{}", boundary.trim_matches('"'));
    let delimiter = delimiter.as_bytes();
    let body = request.body.as_slice();

    let mut parts = Vec::new();
    let Some(first) = find(body, delimiter, 0) else {
        return parts;
    };
    let mut cursor = first + delimiter.len();

    while !body[cursor..].starts_with(b"--") {
        let Some(next) = find(body, delimiter, cursor) else {
            break;
        };
        let chunk = &body[cursor..next];
        let chunk = chunk.strip_prefix(&b"\r\n"[..]).unwrap_or(chunk);
        let chunk = chunk.strip_suffix(&b"\r\n"[..]).unwrap_or(chunk);

        if let Some(split) = find(chunk, b"\r\n\r\n", 0) {
            let headers = String::from_utf8_lossy(&chunk[..split]);
            parts.push(FormPart::from_headers(&headers, chunk[split + 4..].to_vec()));
        }
        cursor = next + delimiter.len();
    }
    parts
}

impl FormPart {
    fn from_headers(headers: &str, data: Vec<u8>) -> Self {
        let mut part = FormPart {
            name: String::new(),
            filename: None,
            content_type: None,
            data,
        };
        for line in headers.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            match key.trim().to_ascii_lowercase().as_str() {
                "content-disposition" => {
                    part.name = quoted_param(value, "name").unwrap_or_default();
                    part.filename = quoted_param(value, "filename");
                }
                "content-type" => part.content_type = Some(value.trim().to_string()),
                _ => {}
            }
        }
        part
    }
}

/// `name="value"` parameter from a Content-Disposition value.
fn quoted_param(value: &str, param: &str) -> Option<String> {
    value.split(';').map(str::trim).find_map(|item| {
        let (key, val) = item.split_once('=')?;
        (key.trim() == param).then(|| val.trim().trim_matches('"').to_string())
    })
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| pos + from)
}
