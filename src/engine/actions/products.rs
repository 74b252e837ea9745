//! Product steps
//!
//! - Add Product: `POST /products`, requires 201, yields `product_id`
//! - Update Quantity: `PUT /products/{id}/quantity`, requires 200
//! - Get Products: `GET /products`, checks the first product with the
//!   configured name carries the updated quantity

use serde_json::{json, Value};

use super::{malformed, require_response, unexpected_status, StepRequest, StepVerdict};
use crate::bridge::{HttpMethod, HttpOutcome};
use crate::engine::result::{display_value, FailureKind, StepKind, StepResult};
use crate::scenario::ProductConfig;

pub const PRODUCTS_PATH: &str = "/products";

pub fn add_product_request(product: &ProductConfig, run_id: &str) -> StepRequest {
    StepRequest::new(
        HttpMethod::Post,
        PRODUCTS_PATH,
        Some(product.to_payload(run_id)),
    )
}

pub fn update_quantity_request(product_id: &str, quantity: i64) -> StepRequest {
    StepRequest::new(
        HttpMethod::Put,
        format!(
            "{}/{}/quantity",
            PRODUCTS_PATH,
            urlencoding::encode(product_id)
        ),
        Some(json!({ "quantity": quantity })),
    )
}

pub fn get_products_request() -> StepRequest {
    StepRequest::new(HttpMethod::Get, PRODUCTS_PATH, None)
}

/// Passes on 201. The product id is produced separately: a 201 without a
/// usable `product_id` still passes, and the runner aborts on the missing id.
pub fn evaluate_add_product(request: &StepRequest, outcome: &HttpOutcome) -> StepVerdict<String> {
    let step = StepKind::AddProduct;
    let payload = request.body.as_ref();

    let response = match require_response(step, outcome, &json!(201), payload) {
        Ok(response) => response,
        Err(result) => return StepVerdict::without_value(result),
    };

    if response.status != 201 {
        return StepVerdict::without_value(unexpected_status(step, json!(201), response, payload));
    }

    match response.json_field("product_id").and_then(product_id_string) {
        Some(id) => StepVerdict {
            result: StepResult::passed(step).with_detail(format!("Product ID: {}", id)),
            produced: Some(id),
        },
        None => StepVerdict::without_value(
            StepResult::passed(step)
                .with_detail("response did not include product_id")
                .with_response_body(Some(response.raw_body.as_str())),
        ),
    }
}

/// The server returns numeric ids; strings are accepted as-is.
fn product_id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn evaluate_update_quantity(request: &StepRequest, outcome: &HttpOutcome) -> StepResult {
    let step = StepKind::UpdateQuantity;
    let payload = request.body.as_ref();

    let response = match require_response(step, outcome, &json!(200), payload) {
        Ok(response) => response,
        Err(result) => return result,
    };

    if response.status != 200 {
        return unexpected_status(step, json!(200), response, payload);
    }

    let detail = match &response.parsed_json {
        Some(body) => {
            let quantity = body
                .get("quantity")
                .map(display_value)
                .unwrap_or_else(|| "unknown".to_string());
            format!("New Quantity: {}", quantity)
        }
        None => "response body is not valid JSON".to_string(),
    };

    StepResult::passed(step).with_detail(detail)
}

/// Checks the listing for `product_name`, using the first match only.
pub fn evaluate_get_products(
    outcome: &HttpOutcome,
    product_name: &str,
    expected_quantity: i64,
) -> StepResult {
    let step = StepKind::GetProducts;

    let response = match require_response(step, outcome, &json!(200), None) {
        Ok(response) => response,
        Err(result) => return result,
    };

    if response.status != 200 {
        return unexpected_status(step, json!(200), response, None);
    }

    let body = match &response.parsed_json {
        Some(body) => body,
        None => return malformed(step, "valid JSON list", "Invalid JSON", response, None),
    };

    let products = match body.as_array() {
        Some(products) => products,
        None => {
            return malformed(
                step,
                "JSON array of products",
                json_type_name(body),
                response,
                None,
            )
        }
    };

    let entry = products
        .iter()
        .find(|p| p.get("name").and_then(Value::as_str) == Some(product_name));

    let Some(entry) = entry else {
        return StepResult::failed(step, FailureKind::AssertionMismatch)
            .with_expected(format!("product named '{}'", product_name))
            .with_actual("no matching product")
            .with_response_body(Some(response.raw_body.as_str()));
    };

    let actual = entry.get("quantity").cloned().unwrap_or(Value::Null);

    if quantity_matches(&actual, expected_quantity) {
        StepResult::passed(step)
            .with_expected(expected_quantity)
            .with_actual(actual)
    } else {
        StepResult::failed(step, FailureKind::AssertionMismatch)
            .with_expected(expected_quantity)
            .with_actual(actual)
            .with_response_body(Some(response.raw_body.as_str()))
    }
}

fn quantity_matches(actual: &Value, expected: i64) -> bool {
    match actual.as_i64() {
        Some(n) => n == expected,
        None => actual.as_f64() == Some(expected as f64),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
