use libcbrn::config::{RenumberConfig, SlotRounding};
use libcbrn::page::{PageInput, Size};
use libcbrn::plan::plan_issue;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct WasmPage {
    name: String,
    width: u32,
    height: u32,
}

impl From<WasmPage> for PageInput {
    fn from(page: WasmPage) -> Self {
        PageInput::new(page.name, "jpg", Size::new(page.width, page.height))
    }
}

fn plan_json(
    title: &str,
    pages_json: &str,
    tolerance: f64,
    first_number: u32,
    rounding: &str,
) -> Result<String, String> {
    let pages: Vec<WasmPage> =
        serde_json::from_str(pages_json).map_err(|e| format!("Invalid pages: {}", e))?;
    let slot_rounding: SlotRounding =
        serde_json::from_value(serde_json::Value::String(rounding.to_string()))
            .map_err(|e| format!("Invalid rounding: {}", e))?;
    let config = RenumberConfig {
        tolerance,
        first_number,
        slot_rounding,
        ..RenumberConfig::default()
    };
    config.validate().map_err(|e| e.to_string())?;

    let inputs: Vec<PageInput> = pages.into_iter().map(Into::into).collect();
    let plan = plan_issue(title, &inputs, &config).map_err(|e| e.to_string())?;
    serde_json::to_string(&plan).map_err(|e| format!("Serialization error: {}", e))
}

/// Plans the renumbering of one issue from page sizes alone.
///
/// `pages_json` is an array of `{"name", "width", "height"}` in reading
/// order. Returns the plan as a JSON string, or `Error: ...`.
#[wasm_bindgen]
pub fn plan_pages(
    title: String,
    pages_json: String,
    tolerance: f64,
    first_number: u32,
    rounding: String,
) -> JsValue {
    match plan_json(&title, &pages_json, tolerance, first_number, &rounding) {
        Ok(json) => JsValue::from_str(&json),
        Err(e) => JsValue::from_str(&format!("Error: {}", e)),
    }
}
