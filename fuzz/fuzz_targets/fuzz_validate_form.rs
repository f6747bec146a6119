#![no_main]

use libfuzzer_sys::fuzz_target;
use solaria::core::{CustomerForm, validate_customer_form};

fuzz_target!(|fields: [String; 5]| {
    let [full_name, identification_number, email, phone_number, business_name] = fields;
    let form = CustomerForm {
        full_name,
        identification_number,
        email,
        phone_number,
        is_business: (!business_name.is_empty()).to_string(),
        business_name,
        ..CustomerForm::default()
    };
    // Must not panic; a valid result must keep the business invariant.
    if let Ok(req) = validate_customer_form(&form) {
        if req.is_business {
            assert!(req.business_name.is_some_and(|n| !n.is_empty()));
            assert!(req.identification_number.len() >= 10);
        }
    }
});
