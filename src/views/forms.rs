//! Create/edit forms used by the management screens.

use serde_json::{json, Map, Value};

use super::modal::{trimmed, FieldDefault, FieldRule, FieldSpec, FormDraft, FormSpec};

pub const INVALID_EMAIL: &str = "Please enter a valid email address.";

fn tenant_payload(draft: &FormDraft) -> Value {
    json!({
        "name": trimmed(draft, "name"),
        "email": trimmed(draft, "email"),
        "number": trimmed(draft, "number"),
        "location": trimmed(draft, "location"),
        // passwords go out exactly as typed
        "password": draft.get("password").cloned().unwrap_or_default(),
        "account_type": "Tenant",
    })
}

pub static TENANT_FORM: FormSpec = FormSpec {
    title: "Add New Tenant",
    fields: &[
        FieldSpec::required("name", "Name"),
        FieldSpec::required("email", "Email").rule(FieldRule::Email, INVALID_EMAIL),
        FieldSpec::required("number", "Phone number"),
        FieldSpec::required("location", "Location"),
        FieldSpec::required("password", "Password"),
    ],
    success_message: "Tenant created successfully!",
    failure_fallback: "Failed to create tenant. Please try again.",
    error_overrides: &[("account already exist", "This contact already exists")],
    payload: tenant_payload,
};

fn admin_payload(draft: &FormDraft) -> Value {
    json!({
        "name": trimmed(draft, "name"),
        "email": trimmed(draft, "email"),
        "password": draft.get("password").cloned().unwrap_or_default(),
    })
}

pub static ADMIN_FORM: FormSpec = FormSpec {
    title: "Add Admin User",
    fields: &[
        FieldSpec::required("name", "Name"),
        FieldSpec::required("email", "Email"),
        FieldSpec::required("password", "Password")
            .rule(FieldRule::MinLength(8), "Password must be at least 8 characters"),
    ],
    success_message: "Admin user created successfully!",
    failure_fallback: "Failed to add admin user",
    error_overrides: &[],
    payload: admin_payload,
};

fn maintenance_payload(draft: &FormDraft) -> Value {
    let mut body = Map::new();
    let user_id = trimmed(draft, "user_id");
    if !user_id.is_empty() {
        body.insert("user_id".into(), json!(user_id));
    }
    body.insert("property".into(), json!(trimmed(draft, "property")));
    body.insert("description".into(), json!(trimmed(draft, "description")));
    body.insert("urgency".into(), json!(trimmed(draft, "urgency")));
    body.insert("cost".into(), json!(parse_amount(trimmed(draft, "cost"))));
    Value::Object(body)
}

pub static MAINTENANCE_FORM: FormSpec = FormSpec {
    title: "Create Maintenance Request",
    fields: &[
        FieldSpec::optional("request_id", "Request ID").default_to(FieldDefault::RequestId),
        FieldSpec::optional("user_id", "Tenant"),
        FieldSpec::required("property", "Property").when_missing("Please select a property."),
        FieldSpec::optional("due_date", "Due date"),
        FieldSpec::required("description", "Description"),
        FieldSpec::optional("urgency", "Urgency").default_to(FieldDefault::Text("medium")),
        FieldSpec::optional("cost", "Cost").default_to(FieldDefault::Text("0")),
    ],
    success_message: "Maintenance request created successfully!",
    failure_fallback: "Failed to create request. Please try again.",
    error_overrides: &[],
    payload: maintenance_payload,
};

fn property_payload(draft: &FormDraft) -> Value {
    let bhk: Vec<&str> = trimmed(draft, "bhk_type")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut body = Map::new();
    body.insert("title".into(), json!(trimmed(draft, "title")));
    body.insert("location".into(), json!(trimmed(draft, "location")));
    body.insert("rent_amount".into(), json!(parse_amount(trimmed(draft, "rent_amount"))));
    body.insert("bhk_type".into(), json!(bhk));
    body.insert("about".into(), json!(trimmed(draft, "about")));
    let landlord = trimmed(draft, "landlord");
    if !landlord.is_empty() {
        body.insert("landlord".into(), json!(landlord));
    }
    Value::Object(body)
}

const PROPERTY_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", "Property Name"),
    FieldSpec::required("location", "Location"),
    FieldSpec::required("rent_amount", "Rental Budget").rule(FieldRule::Amount, "Rental Budget must be a number."),
    FieldSpec::optional("bhk_type", "BHK"),
    FieldSpec::optional("about", "About The Property"),
    FieldSpec::optional("landlord", "Landlord"),
];

pub static PROPERTY_FORM: FormSpec = FormSpec {
    title: "Add Property",
    fields: PROPERTY_FIELDS,
    success_message: "Property added successfully!",
    failure_fallback: "Failed to add property. Please try again.",
    error_overrides: &[],
    payload: property_payload,
};

pub static PROPERTY_EDIT_FORM: FormSpec = FormSpec {
    title: "Edit Property",
    fields: PROPERTY_FIELDS,
    success_message: "Property updated successfully!",
    failure_fallback: "Failed to add property. Please try again.",
    error_overrides: &[],
    payload: property_payload,
};

/// Numeric form input; anything unparseable counts as zero
fn parse_amount(text: &str) -> f64 {
    text.parse::<f64>().ok().filter(|n| n.is_finite()).unwrap_or(0.0)
}
