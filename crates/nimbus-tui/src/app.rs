//! Screen state: preferences, the fetch orchestrator, and the input field.

use nimbus_core::{PrefLoaded, Preferences};
use nimbus_weather::{FetchEvent, WeatherFetcher};

use crate::theme::Palette;

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub struct App {
    pub prefs: Preferences,
    pub fetcher: WeatherFetcher,
    input: String,
    should_quit: bool,
    spinner_frame: usize,
}

impl App {
    pub fn new(prefs: Preferences, fetcher: WeatherFetcher) -> Self {
        Self {
            prefs,
            fetcher,
            input: String::new(),
            should_quit: false,
            spinner_frame: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// The active palette, derived from the in-memory theme flag.
    pub fn palette(&self) -> Palette {
        Palette::resolve(self.prefs.dark_mode())
    }

    pub fn theme_label(&self) -> &'static str {
        if self.prefs.dark_mode() {
            "Dark"
        } else {
            "Light"
        }
    }

    /// Submit the search field: trim, record + persist the city, drive the
    /// fetcher, clear the field. Blank input is a no-op.
    pub fn submit_search(&mut self) {
        let city = self.input.trim().to_string();
        if city.is_empty() {
            return;
        }

        self.prefs.set_last_city(city.clone());
        self.prefs.persist_last_city();

        if self.fetcher.city() == city {
            self.fetcher.refetch();
        } else {
            self.fetcher.set_city(&city);
        }
        self.input.clear();
    }

    /// Flip the theme. The flag and label change synchronously; the persist
    /// is fire-and-forget.
    pub fn toggle_theme(&mut self) {
        self.prefs.toggle_dark_mode();
        self.prefs.persist_dark_mode();
    }

    pub fn refresh(&mut self) {
        self.fetcher.refetch();
    }

    /// Merge a resolved startup load. A loaded city also keys the fetcher;
    /// if the user already searched, the merge is a no-op and the fetcher
    /// key is unchanged.
    pub fn on_pref_loaded(&mut self, loaded: PrefLoaded) {
        self.prefs.apply_loaded(loaded);
        let city = self.prefs.last_city().to_string();
        if !city.is_empty() {
            self.fetcher.set_city(&city);
        }
    }

    pub fn on_fetch_event(&mut self, event: FetchEvent) {
        self.fetcher.apply(event);
    }

    pub fn tick_spinner(&mut self) {
        if self.fetcher.is_loading() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn spinner_char(&self) -> char {
        SPINNER_FRAMES[self.spinner_frame]
    }

    /// Temperature formatted for display, e.g. `7°C`.
    pub fn format_celsius(conditions: &nimbus_weather::CurrentConditions) -> String {
        format!("{}°C", conditions.temperature_celsius())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nimbus_core::{KeyValueStore, MemoryStore, LAST_CITY_KEY};
    use nimbus_weather::{CurrentConditions, WeatherClient};
    use tokio::sync::mpsc;

    use super::*;

    fn app_with_store(store: Arc<MemoryStore>) -> App {
        let prefs = Preferences::new(store as Arc<dyn KeyValueStore>);
        let client = WeatherClient::new("http://127.0.0.1:9", "test-key").unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        // Receiver is dropped: fine for tests that never resolve a fetch.
        let fetcher = WeatherFetcher::new(Arc::new(client), tx);
        App::new(prefs, fetcher)
    }

    fn app() -> App {
        app_with_store(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn theme_label_follows_the_flag_synchronously() {
        let mut app = app();
        assert_eq!(app.theme_label(), "Light");
        // No runtime running: the flip must not depend on the persist.
        app.prefs.toggle_dark_mode();
        assert_eq!(app.theme_label(), "Dark");
    }

    #[tokio::test]
    async fn toggle_theme_persists_in_the_background() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with_store(Arc::clone(&store));

        app.toggle_theme();
        assert_eq!(app.theme_label(), "Dark");

        tokio::task::yield_now().await;
        assert_eq!(
            store.get("darkMode").await.unwrap().as_deref(),
            Some("true")
        );
    }

    #[tokio::test]
    async fn submit_search_records_persists_and_clears() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with_store(Arc::clone(&store));

        for c in "  Paris  ".chars() {
            app.push_char(c);
        }
        app.submit_search();

        assert_eq!(app.prefs.last_city(), "Paris");
        assert_eq!(app.input(), "", "input field must be cleared");
        assert!(app.fetcher.is_loading());

        tokio::task::yield_now().await;
        assert_eq!(
            store.get(LAST_CITY_KEY).await.unwrap().as_deref(),
            Some("Paris")
        );
    }

    #[test]
    fn blank_search_is_a_no_op() {
        let mut app = app();
        app.push_char(' ');
        app.submit_search();
        assert_eq!(app.prefs.last_city(), "");
        assert!(!app.fetcher.is_loading());
    }

    #[tokio::test]
    async fn loaded_city_drives_the_fetcher() {
        let mut app = app();
        app.on_pref_loaded(PrefLoaded::City(Some("London".to_string())));
        assert_eq!(app.prefs.last_city(), "London");
        assert_eq!(app.fetcher.city(), "London");
        assert!(app.fetcher.is_loading());
    }

    #[tokio::test]
    async fn late_load_does_not_override_a_user_search() {
        let mut app = app();
        for c in "Paris".chars() {
            app.push_char(c);
        }
        app.submit_search();

        app.on_pref_loaded(PrefLoaded::City(Some("London".to_string())));
        assert_eq!(app.prefs.last_city(), "Paris");
        assert_eq!(app.fetcher.city(), "Paris");
    }

    #[test]
    fn absent_loads_leave_the_fetcher_disabled() {
        let mut app = app();
        app.on_pref_loaded(PrefLoaded::City(None));
        app.on_pref_loaded(PrefLoaded::DarkMode(None));
        assert_eq!(app.fetcher.city(), "");
        assert!(!app.fetcher.is_loading());
    }

    #[test]
    fn celsius_formatting_matches_the_fixture() {
        let conditions = CurrentConditions {
            city: "London".to_string(),
            temperature_kelvin: 280.15,
            description: "scattered clouds".to_string(),
            icon: "03d".to_string(),
        };
        assert_eq!(App::format_celsius(&conditions), "7°C");
    }

    #[tokio::test]
    async fn spinner_only_advances_while_loading() {
        let mut app = app();
        let frame = app.spinner_char();
        app.tick_spinner();
        assert_eq!(app.spinner_char(), frame, "idle spinner must not move");

        app.on_pref_loaded(PrefLoaded::City(Some("London".to_string())));
        app.tick_spinner();
        assert_ne!(app.spinner_char(), frame);
    }
}
