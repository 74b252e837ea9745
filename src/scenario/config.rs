//! Scenario configuration types
//!
//! Everything the runner needs to know about the target API and the data it
//! sends. All fields have defaults so an empty YAML document is a valid
//! configuration:
//!
//! ```yaml
//! web:
//!   base_url: "http://localhost:8080"
//!   timeout: 10000
//! credentials:
//!   username: pujar
//!   password: mypasrsword
//! product:
//!   name: Phone
//!   sku: PHN-003711
//!   unique_sku: true
//! new_quantity: 15
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

// ============================================================================
// Web/HTTP Configuration
// ============================================================================

/// Connection settings for the API under test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Base URL for API requests (e.g., "http://localhost:8080")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Extra headers to include in all requests
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_web_timeout")]
    pub timeout: u64,

    /// Whether to follow redirects (default: true)
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,

    /// Whether to validate SSL certificates (default: true)
    #[serde(default = "default_validate_ssl")]
    pub validate_ssl: bool,
}

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_web_timeout() -> u64 {
    10000
}

fn default_follow_redirects() -> bool {
    true
}

fn default_validate_ssl() -> bool {
    true
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            headers: HashMap::new(),
            timeout: default_web_timeout(),
            follow_redirects: default_follow_redirects(),
            validate_ssl: default_validate_ssl(),
        }
    }
}

// ============================================================================
// Test data
// ============================================================================

/// Account used for the register and login steps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
}

fn default_username() -> String {
    "pujar".to_string()
}

fn default_password() -> String {
    "mypasrsword".to_string()
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
        }
    }
}

impl Credentials {
    /// Request body shared by `/register` and `/login`
    pub fn to_payload(&self) -> Value {
        json!({
            "username": self.username,
            "password": self.password,
        })
    }
}

/// Product created by the add-product step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConfig {
    #[serde(default = "default_product_name")]
    pub name: String,
    #[serde(rename = "type", default = "default_product_type")]
    pub product_type: String,
    #[serde(default = "default_sku")]
    pub sku: String,
    #[serde(default = "default_image_url")]
    pub image_url: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_initial_quantity")]
    pub quantity: i64,
    #[serde(default = "default_price")]
    pub price: f64,

    /// Append a run-unique suffix to the SKU so repeated runs don't collide
    #[serde(default)]
    pub unique_sku: bool,
}

fn default_product_name() -> String {
    "Phone".to_string()
}

fn default_product_type() -> String {
    "Electronics".to_string()
}

fn default_sku() -> String {
    "PHN-003711".to_string()
}

fn default_image_url() -> String {
    "https://example.com/phone.jpg".to_string()
}

fn default_description() -> String {
    "Latest Phone".to_string()
}

fn default_initial_quantity() -> i64 {
    5
}

fn default_price() -> f64 {
    999.99
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            name: default_product_name(),
            product_type: default_product_type(),
            sku: default_sku(),
            image_url: default_image_url(),
            description: default_description(),
            quantity: default_initial_quantity(),
            price: default_price(),
            unique_sku: false,
        }
    }
}

impl ProductConfig {
    /// SKU sent to the server for the given run
    pub fn sku_for_run(&self, run_id: &str) -> String {
        if self.unique_sku {
            let suffix: String = run_id.chars().filter(|c| *c != '-').take(8).collect();
            format!("{}-{}", self.sku, suffix)
        } else {
            self.sku.clone()
        }
    }

    /// Request body for `POST /products`
    pub fn to_payload(&self, run_id: &str) -> Value {
        json!({
            "name": self.name,
            "type": self.product_type,
            "sku": self.sku_for_run(run_id),
            "image_url": self.image_url,
            "description": self.description,
            "quantity": self.quantity,
            "price": self.price,
        })
    }
}

// ============================================================================
// Runner Configuration
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    #[serde(default)]
    pub web: WebConfig,

    #[serde(default)]
    pub credentials: Credentials,

    #[serde(default)]
    pub product: ProductConfig,

    /// Quantity written by the update step and expected by the listing check
    #[serde(default = "default_new_quantity")]
    pub new_quantity: i64,
}

fn default_new_quantity() -> i64 {
    15
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            web: WebConfig::default(),
            credentials: Credentials::default(),
            product: ProductConfig::default(),
            new_quantity: default_new_quantity(),
        }
    }
}
