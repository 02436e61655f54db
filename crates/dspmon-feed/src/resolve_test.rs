use super::*;

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn resolves_canonical_feed_headers() {
    let headers = headers(&["store_id", "store_name", "company_name", "inactive_dsps"]);
    let (mapping, advisories) = resolve_columns(&headers);

    assert_eq!(mapping.identity, Some(0));
    assert_eq!(mapping.name, Some(1));
    assert_eq!(mapping.company, Some(2));
    assert_eq!(mapping.inactive_platforms, Some(3));
    assert!(advisories.is_empty(), "expected no advisories: {advisories:?}");
}

#[test]
fn matching_is_case_insensitive() {
    let headers = headers(&["Store_ID", "STORE_NAME", "Business Unit", "Inactive Delivery"]);
    let (mapping, advisories) = resolve_columns(&headers);

    assert_eq!(mapping.identity, Some(0));
    assert_eq!(mapping.name, Some(1));
    assert_eq!(mapping.company, Some(2));
    assert_eq!(mapping.inactive_platforms, Some(3));
    assert!(advisories.is_empty());
}

#[test]
fn unmatched_headers_fall_back_positionally_with_three_advisories() {
    let headers = headers(&["a", "b", "c"]);
    let (mapping, advisories) = resolve_columns(&headers);

    assert_eq!(mapping.identity, Some(0));
    assert_eq!(mapping.name, Some(1));
    assert_eq!(mapping.company, Some(2));
    assert_eq!(mapping.inactive_platforms, None);

    assert_eq!(advisories.len(), 3, "expected 3 advisories: {advisories:?}");
    assert_eq!(advisories[0].role, ColumnRole::Identity);
    assert_eq!(advisories[1].role, ColumnRole::Name);
    assert_eq!(advisories[2].role, ColumnRole::Company);
    assert!(advisories[0].message.contains("\"a\""));
}

#[test]
fn first_matching_header_wins_per_role() {
    let headers = headers(&["location_id", "store_id", "store_name"]);
    let (mapping, _) = resolve_columns(&headers);
    assert_eq!(mapping.identity, Some(0), "first identity match should win");
}

#[test]
fn a_header_serves_at_most_one_role() {
    // "store_id_name" matches both identity and name keywords; identity
    // claims it first, so name falls through to its positional default.
    let headers = headers(&["store_id_name", "other", "third"]);
    let (mapping, advisories) = resolve_columns(&headers);

    assert_eq!(mapping.identity, Some(0));
    assert_eq!(mapping.name, Some(1));
    assert!(advisories.iter().any(|a| a.role == ColumnRole::Name));
}

#[test]
fn exact_inactive_dsp_header_resolves_without_keyword_match() {
    // "inactive_dsps" already matches the keyword rule; the exact-name
    // fallback exists for feeds where the keyword rule is defeated, e.g.
    // a lone "INACTIVE_DSP" among renamed columns is still found.
    let headers = headers(&["store_id", "store_name", "company", "INACTIVE_DSP"]);
    let (mapping, _) = resolve_columns(&headers);
    assert_eq!(mapping.inactive_platforms, Some(3));
}

#[test]
fn inactive_platforms_has_no_positional_fallback() {
    let headers = headers(&["store_id", "store_name", "company"]);
    let (mapping, advisories) = resolve_columns(&headers);
    assert_eq!(mapping.inactive_platforms, None);
    assert!(
        advisories.is_empty(),
        "unresolved platform column is reported by the view, not an advisory"
    );
}

#[test]
fn short_header_lists_fall_back_only_where_columns_exist() {
    let headers = headers(&["x"]);
    let (mapping, advisories) = resolve_columns(&headers);

    assert_eq!(mapping.identity, Some(0));
    assert_eq!(mapping.name, None);
    assert_eq!(mapping.company, None);
    assert_eq!(advisories.len(), 1);
    assert_eq!(advisories[0].role, ColumnRole::Identity);
}

#[test]
fn empty_header_list_resolves_to_nothing() {
    let (mapping, advisories) = resolve_columns(&[]);
    assert_eq!(mapping, ColumnMapping::default());
    assert!(advisories.is_empty());
}

#[test]
fn resolution_is_deterministic() {
    let headers = headers(&["store_id", "b", "company", "inactive_dsps"]);
    let first = resolve_columns(&headers);
    let second = resolve_columns(&headers);
    assert_eq!(first, second);
}
