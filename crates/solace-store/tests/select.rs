use solace_store::record::Nested;

#[test]
fn renders_nested_select_expression() {
    let spec = Nested::all("custom_tests")
        .with_child(Nested::all("custom_test_questions"))
        .with_child(Nested::all("custom_test_options"));

    assert_eq!(
        spec.to_select(),
        "custom_tests(*, custom_test_questions(*), custom_test_options(*))"
    );
}

#[test]
fn renders_column_projection() {
    let spec = Nested::columns("custom_tests", &["test_name"]);
    assert_eq!(spec.to_select(), "custom_tests(test_name)");
}
