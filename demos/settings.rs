use refont::config::{load_config, save_settings_text, settings_text, MemoryStore};
use refont::Session;

fn main() {
    let mut store = MemoryStore::new();

    // First load writes the built-in rules to the store
    let config = load_config(&mut store).expect("memory store never fails");
    println!("enabled: {}, {} rules", config.enabled, config.font_config.len());
    println!("{}", settings_text(&store).expect("stored rules render"));

    // A rejected edit leaves the store untouched
    match save_settings_text(&mut store, true, r#"{"pattern_url": ".*"}"#) {
        Ok(_) => println!("saved"),
        Err(err) => println!("rejected: {err}"),
    }

    let edited = r#"[
        { "pattern_url": "^https://intranet\\.", "replacements": { "Calibri": "Arial" }, "skip_observer": true },
        { "pattern_url": ".*", "replacements": { "Roboto": "Verdana" } }
    ]"#;
    let config = save_settings_text(&mut store, true, edited).expect("edited rules are valid");

    for url in ["https://intranet.corp/wiki", "https://example.com/"] {
        match Session::start(&config, url) {
            Some(session) => println!("{url}: {} watch={:?}", session.rule(), session.watch_plan()),
            None => println!("{url}: inactive"),
        }
    }
}
