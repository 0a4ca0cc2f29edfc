use serde::Serialize;

use crate::client::Client;
use crate::entity::order::{CreateOrderResult, Order};
use crate::entity::user::ShipperAddress;
use crate::error::Result;
use crate::utils::constants::{PATH_CANCEL_ORDER, PATH_CREATE_ORDER, PATH_QUERY_ORDER};
use crate::validation::{Validate, ValidationErrors};

const MAX_FIELD_CHARS: usize = 35;

pub const WEIGHT_UNIT_IMPERIAL: u8 = 1;
pub const WEIGHT_UNIT_METRIC: u8 = 2;

pub const QUERY_BY_TIME: u8 = 1;
pub const QUERY_BY_NUMBER: u8 = 2;

/// Box dimensions (two decimals) and weight in the request's weight unit.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct OrderBox {
    #[serde(rename = "box_length")]
    pub length: f64,
    #[serde(rename = "box_width")]
    pub width: f64,
    #[serde(rename = "box_height")]
    pub height: f64,
    #[serde(rename = "box_actual_weight")]
    pub actual_weight: f64,
}

impl Validate for OrderBox {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.positive("box_length", self.length);
        errors.positive("box_width", self.width);
        errors.positive("box_height", self.height);
        errors.positive("box_actual_weight", self.actual_weight);
        errors.into_result()
    }
}

/// Consignee, sender and parcels; shared by order creation and rate calculation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Shipment {
    /// Caller's unique order reference
    pub reference_no: String,
    /// Logistics product code
    pub sm_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub oa_firstname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oa_company: Option<String>,
    pub oa_street_address1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oa_street_address2: Option<String>,
    pub oa_postcode: String,
    pub oa_state: String,
    pub oa_city: String,
    /// ISO alpha-2
    pub oa_country: String,
    #[serde(rename = "oa_telphone")]
    pub oa_telephone: String,
    pub is_more_box: u8,
    /// ASS adult signature, SSF standard signature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_service: Option<String>,
    pub weight_unit_type: u8,
    pub box_list: Vec<OrderBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipper_address: Option<ShipperAddress>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub shipper_code: String,
}

impl Default for Shipment {
    fn default() -> Self {
        Self {
            reference_no: String::new(),
            sm_code: String::new(),
            remark: None,
            oa_firstname: String::new(),
            oa_company: None,
            oa_street_address1: String::new(),
            oa_street_address2: None,
            oa_postcode: String::new(),
            oa_state: String::new(),
            oa_city: String::new(),
            oa_country: String::new(),
            oa_telephone: String::new(),
            is_more_box: 0,
            signature_service: None,
            weight_unit_type: WEIGHT_UNIT_METRIC,
            box_list: Vec::new(),
            shipper_address: None,
            shipper_code: String::new(),
        }
    }
}

impl Validate for Shipment {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if errors.required("reference_no", &self.reference_no) {
            errors.char_range("reference_no", &self.reference_no, 1, MAX_FIELD_CHARS);
        }
        errors.required("sm_code", &self.sm_code);
        errors.optional_char_range("remark", self.remark.as_deref(), MAX_FIELD_CHARS);
        if errors.required("oa_firstname", &self.oa_firstname) {
            errors.char_range("oa_firstname", &self.oa_firstname, 3, MAX_FIELD_CHARS);
        }
        errors.optional_char_range("oa_company", self.oa_company.as_deref(), MAX_FIELD_CHARS);
        if errors.required("oa_street_address1", &self.oa_street_address1) {
            errors.char_range("oa_street_address1", &self.oa_street_address1, 1, MAX_FIELD_CHARS);
        }
        errors.optional_char_range("oa_street_address2", self.oa_street_address2.as_deref(), MAX_FIELD_CHARS);
        errors.required("oa_postcode", &self.oa_postcode);
        errors.required("oa_state", &self.oa_state);
        errors.required("oa_city", &self.oa_city);
        errors.required("oa_country", &self.oa_country);
        if errors.required("oa_telphone", &self.oa_telephone) {
            errors.char_range("oa_telphone", &self.oa_telephone, 10, 15);
        }
        if let Some(service) = self.signature_service.as_deref() {
            errors.one_of("signature_service", &service, &["ASS", "SSF"]);
        }
        errors.one_of(
            "weight_unit_type",
            &self.weight_unit_type,
            &[WEIGHT_UNIT_IMPERIAL, WEIGHT_UNIT_METRIC],
        );

        if self.box_list.is_empty() {
            errors.add("box_list", "must not be empty");
        }
        for (i, parcel) in self.box_list.iter().enumerate() {
            if let Err(nested) = parcel.validate() {
                errors.nest(&format!("box_list.{i}"), nested);
            }
        }

        if self.shipper_address.is_none() && self.shipper_code.trim().is_empty() {
            errors.add("shipper_address", "shipper_address or shipper_code is required");
            errors.add("shipper_code", "shipper_address or shipper_code is required");
        }

        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CreateOrderRequest {
    #[serde(flatten)]
    pub shipment: Shipment,
}

impl Validate for CreateOrderRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.shipment.validate()
    }
}

/// Order search: by time window (`type` 1) or by order number (`type` 2).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderQueryRequest {
    #[serde(rename = "type")]
    pub query_type: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_no: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

impl OrderQueryRequest {
    pub fn by_number(order_code: Option<String>, reference_no: Option<String>) -> Self {
        Self {
            query_type: QUERY_BY_NUMBER,
            order_code,
            reference_no,
            date_from: None,
            date_to: None,
        }
    }

    pub fn by_time(date_from: impl Into<String>, date_to: impl Into<String>) -> Self {
        Self {
            query_type: QUERY_BY_TIME,
            order_code: None,
            reference_no: None,
            date_from: Some(date_from.into()),
            date_to: Some(date_to.into()),
        }
    }
}

impl Validate for OrderQueryRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.one_of("type", &self.query_type, &[QUERY_BY_TIME, QUERY_BY_NUMBER]);
        errors.date_time("date_from", self.date_from.as_deref());
        errors.date_time("date_to", self.date_to.as_deref());
        errors.into_result()
    }
}

/// Identifies one order by its upstream code or by the caller's reference.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct OrderReference {
    pub order_code: String,
    pub reference_no: String,
}

impl OrderReference {
    pub fn by_order_code(order_code: impl Into<String>) -> Self {
        Self {
            order_code: order_code.into(),
            ..Default::default()
        }
    }

    pub fn by_reference_no(reference_no: impl Into<String>) -> Self {
        Self {
            reference_no: reference_no.into(),
            ..Default::default()
        }
    }
}

impl Validate for OrderReference {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required_when(self.reference_no.trim().is_empty(), "order_code", &self.order_code);
        errors.required_when(self.order_code.trim().is_empty(), "reference_no", &self.reference_no);
        errors.into_result()
    }
}

pub type CancelOrderRequest = OrderReference;

pub struct Orders<'a> {
    client: &'a Client,
}

impl<'a> Orders<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: &CreateOrderRequest) -> Result<CreateOrderResult> {
        request.validate()?;
        let result: Option<CreateOrderResult> = self.client.call(PATH_CREATE_ORDER, Some(request)).await?;
        Ok(result.unwrap_or_default())
    }

    pub async fn query(&self, request: &OrderQueryRequest) -> Result<Vec<Order>> {
        request.validate()?;
        let orders: Option<Vec<Order>> = self.client.call(PATH_QUERY_ORDER, Some(request)).await?;
        Ok(orders.unwrap_or_default())
    }

    /// Possible while the order is a draft, forecast or submitted and not yet
    /// being processed. Returns the cancelled order codes.
    pub async fn cancel(&self, request: &CancelOrderRequest) -> Result<Vec<String>> {
        request.validate()?;
        let cancelled: Option<Vec<String>> = self.client.call(PATH_CANCEL_ORDER, Some(request)).await?;
        Ok(cancelled.unwrap_or_default())
    }
}
