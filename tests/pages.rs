// tests/pages.rs
//! Page retrieval, creation and partial property updates.

mod support;

use notion_typed::{
    Block, ClientError, CreatePageRequest, DatabaseId, ErrorCode, FileSource, FormulaValue, PageId,
    Parent, PropertyData, PropertyType, PropertyValue, RichText, RollupValue, SelectOption,
    UpdatePageRequest, UserKind,
};
use pretty_assertions::assert_eq;
use reqwest::Method;
use serde_json::json;
use support::{client, MockTransport};

const PAGE_PATH: &str = "/v1/pages/251d2b5f-268c-4de2-afe9-c71ff92ca95c";

fn page_id() -> PageId {
    PageId::parse("251d2b5f268c4de2afe9c71ff92ca95c").unwrap()
}

#[tokio::test]
async fn get_page_decodes_every_property_kind() {
    let transport = MockTransport::new();
    transport.respond(
        Method::GET,
        PAGE_PATH,
        200,
        include_str!("fixtures/api_responses/page.json"),
    );
    let client = client(&transport);

    let page = client.pages().get(&page_id()).await.unwrap();

    assert_eq!(page.id.as_str(), "251d2b5f-268c-4de2-afe9-c71ff92ca95c");
    assert_eq!(page.title().as_deref(), Some("Tuscan Kale"));
    assert!(!page.archived);
    assert!(matches!(page.parent, Parent::Database { ref database_id }
        if database_id.as_str() == "48f8fee9-cd79-4180-bc2f-ec0398253067"));

    let kinds: Vec<PropertyType> = page
        .properties
        .values()
        .map(PropertyValue::property_type)
        .collect();
    assert_eq!(
        kinds,
        vec![
            PropertyType::Title,
            PropertyType::RichText,
            PropertyType::Select,
            PropertyType::MultiSelect,
            PropertyType::Number,
            PropertyType::Formula,
            PropertyType::Date,
            PropertyType::Checkbox,
            PropertyType::Files,
            PropertyType::Relation,
            PropertyType::Rollup,
            PropertyType::People,
            PropertyType::Url,
            PropertyType::Email,
            PropertyType::PhoneNumber,
            PropertyType::CreatedTime,
            PropertyType::CreatedBy,
            PropertyType::LastEditedTime,
            PropertyType::LastEditedBy,
        ]
    );

    let data = |name: &str| &page.property(name).unwrap().data;
    assert_eq!(
        data("Description").as_plain_text().as_deref(),
        Some("A dark green leafy vegetable")
    );
    assert!(matches!(data("Food group"),
        PropertyData::Select(Some(SelectOption { name, .. })) if name == "Vegetable"));
    assert_eq!(data("Price"), &PropertyData::Number(Some(2.5)));
    assert_eq!(
        data("Cost of next trip"),
        &PropertyData::Formula(FormulaValue::Number(Some(0.0)))
    );
    assert_eq!(
        data("Calories"),
        &PropertyData::Rollup(RollupValue::Number(Some(70.0)))
    );
    assert_eq!(data("In stock"), &PropertyData::Checkbox(false));
    assert_eq!(data("Phone"), &PropertyData::PhoneNumber(None));
    match data("Photo") {
        PropertyData::Files(files) => {
            assert_eq!(files[0].name, "kale.jpg");
            assert!(matches!(files[0].source, FileSource::External { .. }));
        }
        other => panic!("expected files, got {:?}", other),
    }
    match data("Edited by") {
        PropertyData::LastEditedBy(user) => {
            assert!(matches!(user.kind, Some(UserKind::Person(_))));
            assert_eq!(user.email(), Some("jane@example.com"));
        }
        other => panic!("expected last_edited_by, got {:?}", other),
    }
    match data("Grower") {
        PropertyData::People(people) => assert_eq!(people[0].kind, None),
        other => panic!("expected people, got {:?}", other),
    }
}

#[tokio::test]
async fn create_page_posts_parent_properties_and_children() {
    let transport = MockTransport::new();
    transport.respond(
        Method::POST,
        "/v1/pages",
        200,
        include_str!("fixtures/api_responses/page.json"),
    );
    let client = client(&transport);

    let database_id = DatabaseId::parse("48f8fee9-cd79-4180-bc2f-ec0398253067").unwrap();
    let request = CreatePageRequest::new(database_id)
        .property(
            "Name",
            PropertyValue::new(PropertyData::Title(vec![RichText::text("Tuscan Kale")])),
        )
        .property("Price", PropertyValue::new(PropertyData::Number(Some(2.5))))
        .child(Block::paragraph(vec![RichText::text(
            "Lacinato kale is a variety of kale.",
        )]));

    let page = client.pages().create(&request).await.unwrap();
    assert_eq!(page.title().as_deref(), Some("Tuscan Kale"));

    let body = transport.last_body();
    assert_eq!(
        body["parent"],
        json!({ "type": "database_id", "database_id": "48f8fee9cd794180bc2fec0398253067" })
    );
    let names: Vec<&str> = body["properties"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(names, vec!["Name", "Price"]);
    assert_eq!(body["properties"]["Price"], json!({ "type": "number", "number": 2.5 }));
    assert_eq!(body["children"][0]["type"], json!("paragraph"));
}

#[tokio::test]
async fn update_properties_sends_only_changed_keys() {
    let mut response: serde_json::Value =
        serde_json::from_str(include_str!("fixtures/api_responses/page.json")).unwrap();
    response["properties"]["In stock"]["checkbox"] = json!(true);

    let transport = MockTransport::new();
    transport.respond(Method::PATCH, PAGE_PATH, 200, &response.to_string());
    let client = client(&transport);

    let request = UpdatePageRequest::new()
        .property("In stock", PropertyValue::new(PropertyData::Checkbox(true)));
    let page = client
        .pages()
        .update_properties(&page_id(), &request)
        .await
        .unwrap();

    let body = transport.last_body();
    assert_eq!(
        body,
        json!({ "properties": { "In stock": { "type": "checkbox", "checkbox": true } } })
    );

    // The response carries every property the server holds.
    assert_eq!(page.properties.len(), 19);
    assert_eq!(
        page.property("In stock").map(|value| &value.data),
        Some(&PropertyData::Checkbox(true))
    );
}

#[tokio::test]
async fn missing_page_is_a_typed_api_error() {
    let transport = MockTransport::new();
    transport.respond(
        Method::GET,
        PAGE_PATH,
        404,
        r#"{"object":"error","status":404,"code":"object_not_found","message":"Could not find page with ID: 251d2b5f-268c-4de2-afe9-c71ff92ca95c."}"#,
    );
    let client = client(&transport);

    let err = client.pages().get(&page_id()).await.unwrap_err();

    assert_eq!(err.api_code(), Some(&ErrorCode::ObjectNotFound));
    match err {
        ClientError::Api(api) => {
            assert_eq!(api.status, 404);
            assert!(api.message.starts_with("Could not find page"));
            assert!(api.code.is_not_found());
        }
        other => panic!("expected API error, got {:?}", other),
    }
}
