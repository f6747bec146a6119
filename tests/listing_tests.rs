use rust_decimal_macros::dec;
use serde_json::json;
use solaria::core::listing::*;
use solaria::core::*;

fn customers() -> Vec<Customer> {
    serde_json::from_value(json!([
        { "_id": "c1", "customerId": "112340567", "name": "María Rodríguez", "code": "+506",
          "email": "maria@example.cr", "role": "customer", "createdAt": "2024-07-01T12:00:00.000Z" },
        { "_id": "c2", "customerId": "3101123456", "name": "Soda La Esquina", "BusinessName": "Soda La Esquina S.A.",
          "isBusiness": true, "code": "+506", "email": "caja@laesquina.cr", "role": "customer",
          "createdAt": "2024-07-02T12:00:00.000Z", "phoneNumber": "22223333",
          "facturas": [{ "path": "/uploads/facturas/f1.pdf" }] },
        { "_id": "c3", "customerId": "155812345678", "name": "John Smith", "code": "+1",
          "email": "john@example.com", "role": "customer", "createdAt": "2024-07-03T12:00:00.000Z" }
    ]))
    .unwrap()
}

#[test]
fn customer_records_deserialize() {
    let list = customers();
    assert_eq!(list.len(), 3);
    assert_eq!(list[0].business_name, None);
    assert!(list[0].facturas.is_empty());
    assert_eq!(list[1].is_business, Some(true));
    assert_eq!(list[1].facturas[0].path, "/uploads/facturas/f1.pdf");
}

#[test]
fn transaction_amounts_are_decimal() {
    let t: Transaction = serde_json::from_value(json!({
        "_id": "t1", "totalAmount": 4500, "dineIn": false, "createdAt": "2024-07-10T15:30:00.000Z"
    }))
    .unwrap();
    assert_eq!(t.total_amount, dec!(4500));
    assert!(t.table_id.is_none());
}

#[test]
fn factura_page_deserializes() {
    let page: FacturaPage = serde_json::from_value(json!({
        "data": [{
            "_id": "f1",
            "customerId": { "_id": "c2", "name": "Soda La Esquina", "code": "+506" },
            "isBusiness": true,
            "SolariaInvoiceId": "00100001010000000042",
            "createdAt": "2024-07-10T15:31:00.000Z"
        }],
        "totalPages": 1
    }))
    .unwrap();
    assert_eq!(page.data[0].solaria_invoice_id, "00100001010000000042");
    assert!(page.data[0].path.is_none());
    assert!(page.data[0].customer.phone_number.is_none());
}

#[test]
fn name_filter_is_case_insensitive() {
    let list = customers();
    let hits: Vec<&str> = filter_by_name(&list, "SODA")
        .into_iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(hits, vec!["c2"]);

    let hits = filter_by_name(&list, "rí");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "c1");
}

#[test]
fn filter_ignores_surrounding_whitespace() {
    let list = customers();
    let hits = filter_by_name(&list, "  john ");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "c3");
    assert_eq!(filter_by_name(&list, " soda la").len(), 1);
}

#[test]
fn blank_filter_has_no_suggestions() {
    let list = customers();
    assert!(filter_by_name(&list, "").is_empty());
    assert!(filter_by_name(&list, "   ").is_empty());
}

#[test]
fn customers_paginate_by_five() {
    let mut list = Vec::new();
    for _ in 0..4 {
        list.extend(customers());
    }
    assert_eq!(list.len(), 12);
    assert_eq!(total_pages(list.len(), DEFAULT_PAGE_SIZE), 3);
    assert_eq!(paginate(&list, 2, DEFAULT_PAGE_SIZE).len(), 5);
    assert_eq!(paginate(&list, 3, DEFAULT_PAGE_SIZE).len(), 2);
    assert_eq!(paginate(&list, 3, DEFAULT_PAGE_SIZE)[0].id, "c2");
}

#[test]
fn selecting_a_suggestion_prefills_the_form() {
    let list = customers();
    let pick = filter_by_name(&list, "esquina")[0];
    let form = CustomerForm::from_customer(pick);
    let req = validate_customer_form(&form).unwrap();
    assert!(req.is_business);
    assert_eq!(req.business_name.as_deref(), Some("Soda La Esquina S.A."));
    assert_eq!(req.phone_number.as_deref(), Some("22223333"));
}

fn customer_with(code: &str, phone: &str) -> Customer {
    serde_json::from_value(json!({
        "_id": "c9", "customerId": "112340567", "name": "Ana Mora", "code": code,
        "email": "ana@example.cr", "role": "customer",
        "createdAt": "2024-07-04T12:00:00.000Z", "phoneNumber": phone
    }))
    .unwrap()
}

#[test]
fn prefill_strips_dial_code_from_phone() {
    let form = CustomerForm::from_customer(&customer_with("+506", "+506 88887777"));
    assert_eq!(form.country_code, "+506");
    assert_eq!(form.phone_number, "88887777");

    let req = validate_customer_form(&form).unwrap();
    assert_eq!(req.phone_number.as_deref(), Some("88887777"));
    assert_eq!(req.country_code.as_deref(), Some("+506"));
}

#[test]
fn prefill_cleans_untidy_stored_code() {
    let form = CustomerForm::from_customer(&customer_with("+50688887777", "+50688887777"));
    assert_eq!(form.country_code, "+506");
    assert_eq!(form.phone_number, "88887777");
    assert!(validate_customer_form(&form).is_ok());

    let form = CustomerForm::from_customer(&customer_with("+1 ", "+1 555 010 9999"));
    assert_eq!(form.country_code, "+1");
    assert_eq!(form.phone_number, "555 010 9999");
}

#[test]
fn prefill_with_unusable_code_uses_default() {
    let form = CustomerForm::from_customer(&customer_with("CR", "88887777"));
    assert_eq!(form.country_code, DEFAULT_DIAL_CODE);
    assert_eq!(form.phone_number, "88887777");
}
