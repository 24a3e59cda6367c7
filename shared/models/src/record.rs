use serde::{Deserialize, Serialize};

/// Placeholder for attributes a datasheet does not state.
pub const NOT_AVAILABLE: &str = "N/A";

/// One cable variant extracted from a vendor datasheet.
///
/// A datasheet covering several fiber counts yields one record per count.
/// The serialized field names are the inventory API's wire contract,
/// including the non-standard `typeofCable` and `nescCondition` casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CableRecord {
    /// Always 0 on emission; the receiving system assigns the real id.
    #[serde(rename = "cableID")]
    pub cable_id: i64,
    /// `"{fiberCount} {base description}"`, e.g. `"48F Armoured loose-tube cable"`.
    pub cable_description: String,
    /// Digits with an `F` suffix, e.g. `"48F"`.
    pub fiber_count: String,
    /// `UT`, `MT` or `N/A`.
    #[serde(rename = "typeofCable")]
    pub type_of_cable: String,
    pub span: String,
    /// `Unitube`, `Multitube`, `Micro` or `Standard`.
    pub tube: String,
    pub tube_color_coding: String,
    /// Fiber standard code such as `G.652D`, `G.657A1` or `OM1`.
    pub fiber_type: String,
    /// `"<num>.<num> ± <num>.<num> mm"` or `N/A`.
    pub diameter: String,
    /// `"<num> N"` or `N/A`.
    pub tensile: String,
    /// Operating temperature range or comma-joined temperature mentions.
    #[serde(rename = "nescCondition")]
    pub nesc_condition: String,
    /// `"<num> N/<num>[x<num>] cm|mm"` or `N/A`.
    pub crush: String,
    pub blowing_length: String,
    /// Source document filename. Not a URL, despite the wire name.
    #[serde(rename = "datasheetURL")]
    pub datasheet_url: String,
    pub is_active: String,
}

impl Default for CableRecord {
    fn default() -> Self {
        Self {
            cable_id: 0,
            cable_description: String::new(),
            fiber_count: String::new(),
            type_of_cable: NOT_AVAILABLE.to_string(),
            span: NOT_AVAILABLE.to_string(),
            tube: String::new(),
            tube_color_coding: NOT_AVAILABLE.to_string(),
            fiber_type: String::new(),
            diameter: NOT_AVAILABLE.to_string(),
            tensile: NOT_AVAILABLE.to_string(),
            nesc_condition: NOT_AVAILABLE.to_string(),
            crush: NOT_AVAILABLE.to_string(),
            blowing_length: NOT_AVAILABLE.to_string(),
            datasheet_url: String::new(),
            is_active: "Y".to_string(),
        }
    }
}
