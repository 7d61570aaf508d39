#[cfg(test)]
mod tests {
    use cwfetch::projection::project_fields;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Map, Value};

    fn document(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture is not an object: {other}"),
        }
    }

    fn selectors(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_selector_list_is_a_no_op() {
        let mut doc = document(json!({"a": "1", "b": {"x": true}}));
        let original = doc.clone();

        project_fields(&mut doc, &[]);

        assert_eq!(doc, original);
    }

    #[test]
    fn full_top_level_key_set_keeps_document_unchanged() {
        let mut doc = document(json!({"a": "1", "b": {"x": "1", "y": "2"}, "c": 3}));
        let original = doc.clone();

        project_fields(&mut doc, &selectors(&["a", "b", "c"]));

        assert_eq!(doc, original);
    }

    #[test]
    fn unselected_keys_are_removed() {
        let mut doc = document(json!({"keep": "yes", "drop": "no", "also_drop": 1}));

        project_fields(&mut doc, &selectors(&["keep"]));

        assert_eq!(doc, document(json!({"keep": "yes"})));
    }

    #[test]
    fn sub_selector_prunes_nested_document() {
        let mut doc = document(json!({"a": "1", "b": {"x": "1", "y": "2"}}));

        project_fields(&mut doc, &selectors(&["b.y"]));

        assert_eq!(doc, document(json!({"b": {"y": "2"}})));
    }

    #[test]
    fn sub_selector_recurses_to_arbitrary_depth() {
        let mut doc = document(json!({
            "kubernetes": {
                "pod_name": "api-5d9f",
                "labels": {"app": "api", "tier": "backend"}
            },
            "log": "request handled"
        }));

        project_fields(&mut doc, &selectors(&["kubernetes.labels.app"]));

        assert_eq!(
            doc,
            document(json!({"kubernetes": {"labels": {"app": "api"}}}))
        );
    }

    #[test]
    fn sub_selector_on_scalar_keeps_full_value() {
        let mut doc = document(json!({"a": "1"}));

        project_fields(&mut doc, &selectors(&["a.x"]));

        assert_eq!(doc, document(json!({"a": "1"})));
    }

    #[test]
    fn sub_selector_on_array_keeps_full_value() {
        let mut doc = document(json!({"a": [1, 2, 3], "b": "x"}));

        project_fields(&mut doc, &selectors(&["a.0"]));

        assert_eq!(doc, document(json!({"a": [1, 2, 3]})));
    }

    #[test]
    fn selector_matching_nothing_empties_the_document() {
        let mut doc = document(json!({"a": "1", "b": "2"}));

        project_fields(&mut doc, &selectors(&["missing"]));

        assert!(doc.is_empty());
    }

    #[test]
    fn bare_selector_keeps_nested_value_unpruned() {
        let mut doc = document(json!({"b": {"x": "1", "y": "2"}, "c": 1}));

        project_fields(&mut doc, &selectors(&["b"]));

        assert_eq!(doc, document(json!({"b": {"x": "1", "y": "2"}})));
    }

    #[test]
    fn sibling_keys_each_match_their_own_selector() {
        let mut doc = document(json!({
            "a": {"x": 1, "y": 2},
            "b": {"x": 3, "y": 4},
            "c": 5
        }));

        project_fields(&mut doc, &selectors(&["a.x", "b.y"]));

        assert_eq!(doc, document(json!({"a": {"x": 1}, "b": {"y": 4}})));
    }
}
