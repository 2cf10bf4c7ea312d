//! Action tag parsing of site metadata.

use rstest::rstest;

use mgdsl::domain::{parse_actions, MetaAction};

fn action(title: &str, layer_id: &str) -> MetaAction {
    MetaAction {
        title: title.to_string(),
        layer_id: layer_id.to_string(),
    }
}

#[test]
fn given_two_tags_when_parsing_then_both_in_order() {
    let actions = parse_actions(
        r#"<action title="Home" layerId="0:1"/><action title="About" layerId="0:2"/>"#,
    );

    assert_eq!(actions, vec![action("Home", "0:1"), action("About", "0:2")]);
}

#[test]
fn given_tags_embedded_in_markup_when_parsing_then_surroundings_ignored() {
    let text = r#"<site name="Shop">
  <page><action  title="Cart &amp; Checkout"   layerId="12:34" /></page>
  <note>not an action</note>
  <action title="Profile" layerId="56:78"/>
</site>"#;

    let actions = parse_actions(text);

    assert_eq!(
        actions,
        vec![action("Cart &amp; Checkout", "12:34"), action("Profile", "56:78")],
        "values are returned verbatim"
    );
}

#[rstest]
#[case::empty("")]
#[case::bare_tag("<action/>")]
#[case::empty_title(r#"<action title="" layerId="0:1"/>"#)]
#[case::reordered(r#"<action layerId="0:1" title="Home"/>"#)]
#[case::unclosed(r#"<action title="Home" layerId="0:1">"#)]
#[case::single_quotes("<action title='Home' layerId='0:1'/>")]
fn given_malformed_tag_when_parsing_then_empty(#[case] text: &str) {
    assert!(parse_actions(text).is_empty());
}

#[test]
fn given_action_when_serializing_then_camel_case() {
    let json = serde_json::to_value(action("Home", "0:1")).unwrap();
    assert_eq!(json, serde_json::json!({ "title": "Home", "layerId": "0:1" }));
}
