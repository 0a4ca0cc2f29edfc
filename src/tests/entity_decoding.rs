#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::entity::order::{CreateOrderResult, Order};
    use crate::entity::rate::RateCalcResult;
    use crate::entity::token::AccessToken;

    #[test]
    fn amounts_decode_from_numbers_and_strings() {
        let result: RateCalcResult = serde_json::from_value(json!({
            "sm_code": "UPS-GROUND",
            "address_type": 1,
            "currency_code": "USD",
            "shipping_charge": 10.25,
            "total_charge": "12.75",
            "charge_detail": [{"ft_code": "FUEL", "amount": 2.5}]
        }))
        .expect("rate");

        assert_eq!(result.address_type, "1");
        assert_eq!(result.shipping_charge, "10.25");
        assert_eq!(result.total_charge, "12.75");
        assert_eq!(result.charge_detail[0].amount, "2.5");
        assert_eq!(result.charge_detail[0].charge_desc, "");
    }

    #[test]
    fn create_result_tolerates_pending_labels() {
        let result: CreateOrderResult = serde_json::from_value(json!({
            "order_code": "AS001",
            "fee": [{"ft_code": "FREIGHT", "currency_code": "USD", "amount": 9}],
            "fee_detail": [{"ft_code": "FREIGHT", "amount": "9", "tracking_number": null, "box_code": "B1"}],
            "labels": null,
            "merge_label": null
        }))
        .expect("create result");

        assert_eq!(result.order_code, "AS001");
        assert_eq!(result.fee[0].amount, "9");
        assert_eq!(result.fee_detail[0].fee.ft_code, "FREIGHT");
        assert_eq!(result.fee_detail[0].tracking_number, "");
        assert!(result.labels.is_none());
        assert_eq!(result.merge_label, "");
    }

    #[test]
    fn order_reads_upstream_field_names() {
        let order: Order = serde_json::from_value(json!({
            "reference_no": "R-1",
            "order_code": "AS001",
            "order_status": "3",
            "telphone": "9095550100"
        }))
        .expect("order");

        assert_eq!(order.order_status, 3);
        assert_eq!(order.telephone, "9095550100");
    }

    #[test]
    fn token_result_carries_user() {
        let token: AccessToken = serde_json::from_value(json!({
            "access_token": "abc",
            "user_info": {"u_id": "7", "u_account": "demo", "u_customer_code": 1007}
        }))
        .expect("token");

        let user = token.user_info.expect("user");
        assert_eq!(token.access_token, "abc");
        assert_eq!(user.id, 7);
        assert_eq!(user.customer_code, "1007");
    }
}
