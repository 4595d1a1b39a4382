use cellcheck_spec::{ConfigDocument, generate_schema_value};

fn load_fixture(name: &str) -> ConfigDocument {
    let path = format!("tests/fixtures/{}.yaml", name);
    let text = std::fs::read_to_string(path).expect("failed to read fixture");
    ConfigDocument::from_yaml_str(&text).expect("fixture should deserialize")
}

#[test]
fn legacy_fixture_validates() {
    load_fixture("legacy")
        .validate()
        .expect("fixture should validate");
}

#[test]
fn invalid_fixture_reports_every_issue() {
    let err = load_fixture("invalid")
        .validate()
        .expect_err("validation should fail");
    insta::assert_json_snapshot!(err.issues(), @r#"
    [
      {
        "path": "spreadsheetURL",
        "message": "expected a Google Sheets URL containing `/spreadsheets/d/<id>`"
      },
      {
        "path": "cellsToVerify[0].cellName",
        "message": "cell name is empty"
      },
      {
        "path": "cellsToVerify[1].cellName",
        "message": "Invalid cell reference: 1A"
      },
      {
        "path": "cellsToVerify[3].cellName",
        "message": "duplicate cell `B2` (already checked by cellsToVerify[2])"
      },
      {
        "path": "cellsToVerify[3].expectedFunction",
        "message": "expected function must start with `=`"
      }
    ]
    "#);
}

#[test]
fn schema_describes_document_fields() {
    let schema = generate_schema_value();
    assert!(schema.is_object(), "schema root should be an object");
    let properties = schema["properties"]
        .as_object()
        .expect("schema should list properties");
    assert!(properties.contains_key("spreadsheetURL"));
    assert!(properties.contains_key("cellsToVerify"));
}
