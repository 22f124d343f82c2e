use refont::{rewrite, RuleStoreBuilder, Session};

fn main() {
    // Define rules
    let store = RuleStoreBuilder::new()
        .rule(r"^https://docs\.example\.com/", |r| {
            r.replace("Inter", "Arial").replace("JetBrains Mono", "Courier New")
        })
        .rule(".*", |r| {
            r.replace("Segoe UI", "Arial")
                .replace("Roboto", "Verdana")
                .delay_ms(250)
        })
        .build();

    println!("{store}");
    for rule in store.rules() {
        println!("  {rule}");
    }

    // Pick the rule for a page and rewrite some declarations
    let url = "https://news.example.org/today";
    let Some(session) = Session::for_url(&store, url) else {
        println!("No rule for {url}.");
        return;
    };
    println!("Active: {} (start after {:?})", session.rule(), session.startup_delay());

    for value in [
        r#"-apple-system, "Segoe UI", Roboto, sans-serif"#,
        r#"var(--body-font, 'Roboto'), serif"#,
        "Georgia, serif",
    ] {
        println!("{value:>48}  =>  {}", rewrite(value, session.replacements()));
    }
}
