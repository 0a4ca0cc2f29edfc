#[cfg(test)]
mod tests {
    use crate::entity::user::ShipperAddress;
    use crate::services::order::{CreateOrderRequest, OrderBox, OrderQueryRequest, OrderReference, Shipment};
    use crate::services::rate::RateCalcRequest;
    use crate::services::scan_form::normalize_tracking_numbers;
    use crate::validation::{Validate, ValidationErrors};

    fn valid_shipment() -> Shipment {
        Shipment {
            reference_no: "R-1".into(),
            sm_code: "UPS-GROUND".into(),
            oa_firstname: "Jane Doe".into(),
            oa_street_address1: "1 Main St".into(),
            oa_postcode: "91761".into(),
            oa_state: "CA".into(),
            oa_city: "Ontario".into(),
            oa_country: "US".into(),
            oa_telephone: "9095550100".into(),
            box_list: vec![OrderBox { length: 10.0, width: 8.5, height: 4.0, actual_weight: 1.25 }],
            shipper_code: "S1".into(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_order_passes() {
        let request = CreateOrderRequest { shipment: valid_shipment() };
        assert!(request.validate().is_ok());

        let with_address = Shipment {
            shipper_code: String::new(),
            shipper_address: Some(ShipperAddress { shipper_code: "S1".into(), ..Default::default() }),
            ..valid_shipment()
        };
        assert!(with_address.validate().is_ok());
    }

    #[test]
    fn empty_order_reports_every_missing_field() {
        let errors = CreateOrderRequest::default().validate().expect_err("must fail");

        for field in [
            "reference_no",
            "sm_code",
            "oa_firstname",
            "oa_street_address1",
            "oa_postcode",
            "oa_state",
            "oa_city",
            "oa_country",
            "oa_telphone",
            "box_list",
            "shipper_address",
            "shipper_code",
        ] {
            assert!(errors.get(field).is_some(), "missing error for {field}");
        }
        assert!(errors.get("weight_unit_type").is_none());
        assert_eq!(errors.get("reference_no"), Some("must not be empty"));
    }

    #[test]
    fn lengths_and_enums_are_checked() {
        let shipment = Shipment {
            reference_no: "R".repeat(36),
            oa_firstname: "Jo".into(),
            oa_telephone: "12345".into(),
            remark: Some("x".repeat(40)),
            oa_company: Some(String::new()),
            signature_service: Some("XYZ".into()),
            weight_unit_type: 3,
            ..valid_shipment()
        };
        let errors = shipment.validate().expect_err("must fail");

        assert_eq!(errors.get("reference_no"), Some("must not exceed 35 characters"));
        assert_eq!(errors.get("oa_firstname"), Some("length must be between 3 and 35 characters"));
        assert_eq!(errors.get("oa_telphone"), Some("length must be between 10 and 15 characters"));
        assert_eq!(errors.get("remark"), Some("must not exceed 35 characters"));
        assert!(errors.get("oa_company").is_none());
        assert_eq!(errors.get("signature_service"), Some("must be one of [ASS, SSF], got 'XYZ'"));
        assert_eq!(errors.get("weight_unit_type"), Some("must be one of [1, 2], got '3'"));
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn boxes_are_reported_by_index() {
        let shipment = Shipment {
            box_list: vec![
                OrderBox { length: 10.0, width: 8.0, height: 4.0, actual_weight: 1.0 },
                OrderBox { length: 0.0, width: 8.0, height: -1.0, actual_weight: 1.0 },
            ],
            ..valid_shipment()
        };
        let errors = shipment.validate().expect_err("must fail");

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["box_list.1.box_height", "box_list.1.box_length"]
        );
        assert_eq!(errors.get("box_list.1.box_length"), Some("must be greater than zero"));
    }

    #[test]
    fn rate_request_shares_order_rules() {
        let request = RateCalcRequest { shipment: valid_shipment(), pick_up: Some(1) };
        assert!(request.validate().is_ok());

        let request = RateCalcRequest {
            shipment: Shipment { sm_code: " ".into(), ..valid_shipment() },
            pick_up: Some(5),
        };
        let errors = request.validate().expect_err("must fail");
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["pick_up", "sm_code"]);
    }

    #[test]
    fn query_checks_type_and_dates() {
        assert!(OrderQueryRequest::by_time("2024-06-01 00:00:00", "2024-06-30 23:59:59").validate().is_ok());
        assert!(OrderQueryRequest::by_number(Some("AS001".into()), None).validate().is_ok());

        let mut request = OrderQueryRequest::by_time("2024-06-01", "yesterday");
        request.query_type = 9;
        let errors = request.validate().expect_err("must fail");
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["date_from", "date_to", "type"]);
    }

    #[test]
    fn order_reference_needs_one_identifier() {
        assert!(OrderReference::by_order_code("AS001").validate().is_ok());
        assert!(OrderReference::by_reference_no("R-1").validate().is_ok());
        assert_eq!(OrderReference::default().validate().expect_err("must fail").len(), 2);
    }

    #[test]
    fn nested_errors_are_flattened_and_sorted() {
        let mut inner = ValidationErrors::new();
        inner.add("city", "must not be empty");
        let mut errors = ValidationErrors::new();
        errors.add("zeta", "bad");
        errors.add("alpha", "bad");
        errors.add("alpha", "ignored");
        errors.nest("address", inner);

        assert_eq!(errors.to_string(), "address.city: must not be empty; alpha: bad; zeta: bad");
    }

    #[test]
    fn request_serializes_with_upstream_names() {
        let body = serde_json::to_value(CreateOrderRequest { shipment: valid_shipment() }).expect("json");

        assert_eq!(body["oa_telphone"], "9095550100");
        assert_eq!(body["box_list"][0]["box_actual_weight"], 1.25);
        assert_eq!(body["weight_unit_type"], 2);
        assert!(body.get("remark").is_none());
        assert!(body.get("shipper_address").is_none());
    }

    #[test]
    fn tracking_numbers_are_normalized() {
        assert_eq!(normalize_tracking_numbers([" A1 ", "", "  ", "B2"]), vec!["A1", "B2"]);
        assert!(normalize_tracking_numbers(Vec::<String>::new()).is_empty());
    }
}
