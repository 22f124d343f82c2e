
use fake_dom::{FakeDom, FakeSheet};
use refont::{Applier, ElementOutcome, Replacements, SheetOutcome};

fn table() -> Replacements {
    [("Roboto", "Verdana"), ("Segoe UI", "Arial"), ("Inter", "Arial")]
        .into_iter()
        .collect()
}

#[test]
fn element_rewritten_with_inline_override() {
    let (mut dom, body) = FakeDom::new();
    let p = dom.element(body, "p", Some(r#""Segoe UI", sans-serif"#));
    let table = table();

    let outcome = Applier::new(&table).apply_to_element(&mut dom, &p);
    assert_eq!(
        outcome,
        ElementOutcome::Rewritten {
            from: r#""Segoe UI", sans-serif"#.into(),
            to: "Arial, sans-serif".into(),
        }
    );
    assert_eq!(dom.inline_font(p), Some("Arial, sans-serif"));
}

#[test]
fn case_only_difference_is_not_written() {
    let (mut dom, body) = FakeDom::new();
    let a = dom.element(body, "a", Some("arial, sans-serif"));
    let b = dom.element(body, "b", Some("'Arial', serif"));
    let table = table();
    let applier = Applier::new(&table);

    assert_eq!(applier.apply_to_element(&mut dom, &a), ElementOutcome::Unchanged);
    // Quote removal alone still counts as a change.
    assert!(applier.apply_to_element(&mut dom, &b).is_rewritten());
    assert_eq!(dom.writes, 1);
}

#[test]
fn missing_value_is_skipped() {
    let (mut dom, body) = FakeDom::new();
    let div = dom.element(body, "div", None);
    let empty = dom.element(body, "span", Some(""));
    let table = table();
    let applier = Applier::new(&table);

    assert_eq!(applier.apply_to_element(&mut dom, &div), ElementOutcome::NoValue);
    assert_eq!(applier.apply_to_element(&mut dom, &empty), ElementOutcome::NoValue);
    assert_eq!(dom.writes, 0);
}

#[test]
fn tree_walk_visits_descendants_only_once() {
    let (mut dom, body) = FakeDom::new();
    let section = dom.element(body, "section", Some("Roboto"));
    let h1 = dom.element(section, "h1", Some("Inter, Arial"));
    let text = dom.create_text();
    dom.attach(section, text);
    let footer = dom.element(body, "footer", Some("Georgia"));
    let table = table();

    let summary = Applier::new(&table).apply_to_tree(&mut dom, &body);
    assert_eq!(summary.elements_visited(), 4);
    assert_eq!(summary.elements_rewritten(), 2);
    assert_eq!(dom.inline_font(section), Some("Verdana"));
    assert_eq!(dom.inline_font(h1), Some("Arial, Arial"));
    assert_eq!(dom.inline_font(footer), None);
}

#[test]
fn second_pass_writes_nothing() {
    let (mut dom, body) = FakeDom::new();
    for font in ["Roboto", "'Segoe UI'", "Inter, serif"] {
        dom.element(body, "p", Some(font));
    }
    let table = table();
    let applier = Applier::new(&table);

    applier.apply_to_tree(&mut dom, &body);
    let after_first = dom.writes;
    let summary = applier.apply_to_tree(&mut dom, &body);
    assert_eq!(summary.elements_rewritten(), 0);
    assert_eq!(dom.writes, after_first);
}

#[test]
fn deep_tree_does_not_overflow() {
    let (mut dom, body) = FakeDom::new();
    let mut parent = body;
    for _ in 0..100_000 {
        parent = dom.element(parent, "div", Some("Roboto"));
    }
    let table = table();

    let summary = Applier::new(&table).apply_to_tree(&mut dom, &body);
    assert_eq!(summary.elements_visited(), 100_001);
    assert_eq!(summary.elements_rewritten(), 100_000);
}

#[test]
fn sheet_rewrites_font_family_and_custom_props() {
    let mut sheet = FakeSheet::inline()
        .rule(&[
            ("font-family", r#""Inter", sans-serif"#, true),
            ("--brand-font", "Roboto", false),
            ("color", "Roboto", false),
        ])
        .rule(&[("--spacing", "4px", false)]);
    let table = table();

    let outcome = Applier::new(&table).apply_to_style_sheet(&mut sheet);
    assert_eq!(
        outcome,
        SheetOutcome::Processed {
            rules: 2,
            rewritten: 2
        }
    );
    let font = sheet.get(0, "font-family").unwrap();
    assert_eq!(font.value, "Arial, sans-serif");
    assert!(font.important);
    assert_eq!(sheet.get(0, "--brand-font").unwrap().value, "Verdana");
    assert_eq!(sheet.get(0, "color").unwrap().value, "Roboto");
    assert_eq!(sheet.get(1, "--spacing").unwrap().value, "4px");
    assert_eq!(sheet.writes, 2);
}

#[test]
fn cross_origin_sheet_is_skipped_and_others_proceed() {
    let mut blocked = FakeSheet::cross_origin("https://cdn.other/site.css");
    let mut local = FakeSheet::linked("/app.css").rule(&[("font-family", "Roboto", false)]);
    let table = table();

    let summary = Applier::new(&table).apply_to_style_sheets([&mut blocked, &mut local]);
    assert_eq!(summary.sheets_processed(), 1);
    assert_eq!(summary.declarations_rewritten(), 1);
    assert_eq!(summary.skipped_sheets().len(), 1);
    assert_eq!(
        summary.skipped_sheets()[0].href.as_deref(),
        Some("https://cdn.other/site.css")
    );
    assert_eq!(local.get(0, "font-family").unwrap().value, "Verdana");
    assert_eq!(blocked.writes, 0);
}
