//! Page controller
//!
//! Owns the page state and runs every user-visible transition: page load,
//! search, input edits, dark-mode toggle and history management. The page is
//! always in exactly one [`ViewState`].

use crate::constants::messages::{LOOKUP_FAILED, SELF_IP_FAILED};
use crate::error::Result;
use crate::geo::{GeoClient, LocationRecord};
use crate::history::HistoryList;
use crate::store::Settings;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// What the result area shows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ViewState {
    /// Nothing looked up yet
    #[default]
    Empty,
    /// Card and map for a resolved address
    Result(LocationRecord),
    /// Card and map hidden, banner message set
    Error(String),
}

/// Server-held page state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageState {
    /// Current contents of the address field
    pub input: String,
    pub view: ViewState,
    /// Cleared by editing the input; set again by the next failure
    pub error_visible: bool,
    /// Page theme
    pub dark_mode: bool,
}

impl PageState {
    /// Message for the error banner, if it should be shown
    pub fn banner(&self) -> Option<&str> {
        match &self.view {
            ViewState::Error(message) if self.error_visible => Some(message.as_str()),
            _ => None,
        }
    }

    /// The displayed record, if any
    pub fn record(&self) -> Option<&LocationRecord> {
        match &self.view {
            ViewState::Result(record) => Some(record),
            _ => None,
        }
    }
}

enum Outcome {
    Found(LocationRecord),
    Failed(&'static str),
}

/// Drives lookups and keeps page state, history and display mode consistent
pub struct Controller<C> {
    client: C,
    settings: Mutex<Settings>,
    page: RwLock<PageState>,
    generation: AtomicU64,
    reset_dark_mode_on_load: bool,
}

impl<C: GeoClient> Controller<C> {
    /// Create a controller; page loads reset the dark-mode flag by default
    pub fn new(client: C, settings: Settings) -> Self {
        Self {
            client,
            settings: Mutex::new(settings),
            page: RwLock::new(PageState::default()),
            generation: AtomicU64::new(0),
            reset_dark_mode_on_load: true,
        }
    }

    /// Choose whether page loads force the dark-mode flag back to false
    pub fn with_dark_mode_reset(mut self, reset: bool) -> Self {
        self.reset_dark_mode_on_load = reset;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Snapshot of the current page state
    pub async fn page(&self) -> PageState {
        self.page.read().await.clone()
    }

    /// Current history list
    pub async fn history(&self) -> Result<HistoryList> {
        self.settings.lock().await.history()
    }

    /// Persisted display mode, which picks the map tile style
    pub async fn map_dark_mode(&self) -> Result<bool> {
        self.settings.lock().await.dark_mode()
    }

    /// Page load: discover the caller's address and look it up
    pub async fn load(&self) -> Result<PageState> {
        let dark = {
            let mut settings = self.settings.lock().await;
            if self.reset_dark_mode_on_load {
                settings.set_dark_mode(false)?;
                false
            } else {
                settings.dark_mode()?
            }
        };
        self.page.write().await.dark_mode = dark;

        self.locate_self().await
    }

    /// Replace the input text and hide the error banner
    pub async fn edit_input(&self, value: &str) -> PageState {
        let mut page = self.page.write().await;
        page.input = value.to_string();
        page.error_visible = false;
        page.clone()
    }

    /// Look up an address typed by the user
    pub async fn search(&self, ip: &str) -> Result<PageState> {
        let ticket = self.begin();
        self.page.write().await.input = ip.to_string();

        let outcome = self.resolve(ip).await;
        self.finish(ticket, ip, false, outcome).await
    }

    /// Re-run a search for a history entry
    pub async fn select_history(&self, ip: &str) -> Result<PageState> {
        self.search(ip).await
    }

    /// Flip the theme, persist it and re-run discovery and lookup
    pub async fn toggle_dark_mode(&self) -> Result<PageState> {
        let dark = {
            // Page and persisted flag change under the same page guard
            let mut page = self.page.write().await;
            let dark = !page.dark_mode;
            self.settings.lock().await.set_dark_mode(dark)?;
            page.dark_mode = dark;
            dark
        };
        info!(dark_mode = dark, "display mode toggled");

        self.locate_self().await
    }

    /// Empty the history; the result area is untouched
    pub async fn clear_history(&self) -> Result<HistoryList> {
        self.settings.lock().await.clear_history()
    }

    /// Drop one address from history; the result area is untouched
    pub async fn remove_history(&self, ip: &str) -> Result<HistoryList> {
        self.settings.lock().await.remove_history(ip)
    }

    async fn locate_self(&self) -> Result<PageState> {
        let ticket = self.begin();

        let ip = match self.client.discover_self_ip().await {
            Ok(ip) => ip,
            Err(e) => {
                warn!(error = %e, "self IP discovery failed");
                return self.finish(ticket, "", false, Outcome::Failed(SELF_IP_FAILED)).await;
            }
        };

        let outcome = self.resolve(&ip).await;
        self.finish(ticket, &ip, true, outcome).await
    }

    async fn resolve(&self, ip: &str) -> Outcome {
        match self.client.lookup(ip).await {
            Ok(record) => {
                info!(query = %ip, ip = %record.ip, country = %record.country, "lookup succeeded");
                Outcome::Found(record)
            }
            Err(e) => {
                warn!(query = %ip, error = %e, "lookup failed");
                Outcome::Failed(LOOKUP_FAILED)
            }
        }
    }

    fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply a finished sequence unless a newer one has started since
    ///
    /// Successful lookups are recorded in history either way.
    async fn finish(
        &self,
        ticket: u64,
        query: &str,
        set_input: bool,
        outcome: Outcome,
    ) -> Result<PageState> {
        if let Outcome::Found(_) = outcome {
            self.settings.lock().await.add_history(query)?;
        }

        let mut page = self.page.write().await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!(ticket, query = %query, "superseded lookup result dropped");
            return Ok(page.clone());
        }

        if set_input {
            page.input = query.to_string();
        }
        match outcome {
            Outcome::Found(record) => page.view = ViewState::Result(record),
            Outcome::Failed(message) => {
                page.view = ViewState::Error(message.to_string());
                page.error_visible = true;
            }
        }

        Ok(page.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use tokio::sync::Notify;

    /// Scripted client: `slow` blocks until released, `bad` fails
    #[derive(Default)]
    struct FakeClient {
        self_ip_fails: bool,
        discover_calls: AtomicUsize,
        lookup_calls: AtomicUsize,
        gate: Notify,
    }

    impl FakeClient {
        fn failing_discovery() -> Self {
            Self {
                self_ip_fails: true,
                ..Self::default()
            }
        }
    }

    fn record(ip: &str) -> LocationRecord {
        LocationRecord {
            ip: ip.to_string(),
            region: "California".to_string(),
            timezone: "-08:00".to_string(),
            country: "US".to_string(),
            latitude: 37.4,
            longitude: -122.1,
            provider_name: "Google".to_string(),
        }
    }

    impl GeoClient for FakeClient {
        async fn discover_self_ip(&self) -> Result<String> {
            self.discover_calls.fetch_add(1, Ordering::SeqCst);
            if self.self_ip_fails {
                Err(Error::Lookup("connection refused".to_string()))
            } else {
                Ok("8.8.8.8".to_string())
            }
        }

        async fn lookup(&self, ip: &str) -> Result<LocationRecord> {
            self.lookup_calls.fetch_add(1, Ordering::SeqCst);
            match ip {
                "bad" => Err(Error::Lookup("422".to_string())),
                "slow" => {
                    self.gate.notified().await;
                    Ok(record(ip))
                }
                "slow-bad" => {
                    self.gate.notified().await;
                    Err(Error::Lookup("timed out".to_string()))
                }
                _ => Ok(record(ip)),
            }
        }
    }

    fn controller(client: FakeClient) -> Controller<FakeClient> {
        Controller::new(client, Settings::in_memory())
    }

    #[tokio::test]
    async fn test_load_success() {
        let ctl = controller(FakeClient::default());

        let page = ctl.load().await.unwrap();
        assert_eq!(page.input, "8.8.8.8");
        assert_eq!(page.record(), Some(&record("8.8.8.8")));
        assert_eq!(page.banner(), None);
        assert_eq!(ctl.history().await.unwrap().entries(), ["8.8.8.8"]);
    }

    #[tokio::test]
    async fn test_load_discovery_failure() {
        let ctl = controller(FakeClient::failing_discovery());

        let page = ctl.load().await.unwrap();
        assert_eq!(page.view, ViewState::Error(SELF_IP_FAILED.to_string()));
        assert_eq!(page.banner(), Some(SELF_IP_FAILED));
        assert!(page.record().is_none());
        assert_eq!(ctl.client().lookup_calls.load(Ordering::SeqCst), 0);
        assert!(ctl.history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_success() {
        let ctl = controller(FakeClient::default());

        let page = ctl.search("1.1.1.1").await.unwrap();
        assert_eq!(page.input, "1.1.1.1");
        assert_eq!(page.record().unwrap().ip, "1.1.1.1");
        assert_eq!(page.record().unwrap().flag_url(), "https://flagcdn.com/w640/us.png");
        assert_eq!(ctl.history().await.unwrap().entries(), ["1.1.1.1"]);
    }

    #[tokio::test]
    async fn test_search_failure_shows_fixed_message() {
        let ctl = controller(FakeClient::default());
        ctl.search("1.1.1.1").await.unwrap();

        let page = ctl.search("bad").await.unwrap();
        assert_eq!(page.view, ViewState::Error(LOOKUP_FAILED.to_string()));
        assert_eq!(page.banner(), Some(LOOKUP_FAILED));
        assert!(page.record().is_none());
        assert_eq!(ctl.history().await.unwrap().entries(), ["1.1.1.1"]);
    }

    #[tokio::test]
    async fn test_search_empty_input_not_recorded() {
        let ctl = controller(FakeClient::default());

        let page = ctl.search("").await.unwrap();
        assert!(page.record().is_some());
        assert!(ctl.history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repeat_search_refetches() {
        let ctl = controller(FakeClient::default());

        ctl.search("1.1.1.1").await.unwrap();
        ctl.search("1.1.1.1").await.unwrap();
        assert_eq!(ctl.client().lookup_calls.load(Ordering::SeqCst), 2);
        assert_eq!(ctl.history().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_input_hides_banner_only() {
        let ctl = controller(FakeClient::default());
        ctl.search("bad").await.unwrap();

        let page = ctl.edit_input("1.1").await;
        assert_eq!(page.input, "1.1");
        assert_eq!(page.banner(), None);
        assert_eq!(page.view, ViewState::Error(LOOKUP_FAILED.to_string()));
    }

    #[tokio::test]
    async fn test_select_history_runs_search() {
        let ctl = controller(FakeClient::default());
        ctl.search("1.1.1.1").await.unwrap();
        ctl.search("2.2.2.2").await.unwrap();

        let page = ctl.select_history("1.1.1.1").await.unwrap();
        assert_eq!(page.input, "1.1.1.1");
        assert_eq!(page.record().unwrap().ip, "1.1.1.1");
        assert_eq!(ctl.history().await.unwrap().entries(), ["1.1.1.1", "2.2.2.2"]);
    }

    #[tokio::test]
    async fn test_history_changes_leave_view() {
        let ctl = controller(FakeClient::default());
        ctl.search("1.1.1.1").await.unwrap();
        ctl.search("2.2.2.2").await.unwrap();
        let before = ctl.page().await;

        let history = ctl.remove_history("1.1.1.1").await.unwrap();
        assert_eq!(history.entries(), ["2.2.2.2"]);
        assert!(ctl.clear_history().await.unwrap().is_empty());
        assert!(ctl.history().await.unwrap().is_empty());
        assert_eq!(ctl.page().await, before);
    }

    #[tokio::test]
    async fn test_toggle_dark_mode_twice() {
        let ctl = controller(FakeClient::default());
        let initial = ctl.map_dark_mode().await.unwrap();

        let page = ctl.toggle_dark_mode().await.unwrap();
        assert!(page.dark_mode);
        assert_eq!(ctl.map_dark_mode().await.unwrap(), !initial);

        let page = ctl.toggle_dark_mode().await.unwrap();
        assert!(!page.dark_mode);
        assert_eq!(ctl.map_dark_mode().await.unwrap(), initial);

        assert_eq!(ctl.client().discover_calls.load(Ordering::SeqCst), 2);
        assert_eq!(ctl.client().lookup_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_toggle_dark_mode_with_failing_discovery() {
        let ctl = controller(FakeClient::failing_discovery());

        let page = ctl.toggle_dark_mode().await.unwrap();
        assert!(page.dark_mode);
        assert_eq!(page.banner(), Some(SELF_IP_FAILED));
    }

    #[tokio::test]
    async fn test_load_resets_dark_mode() {
        let mut settings = Settings::in_memory();
        settings.set_dark_mode(true).unwrap();
        let ctl = Controller::new(FakeClient::default(), settings);

        let page = ctl.load().await.unwrap();
        assert!(!page.dark_mode);
        assert!(!ctl.map_dark_mode().await.unwrap());
    }

    #[tokio::test]
    async fn test_load_keeps_dark_mode_without_reset() {
        let mut settings = Settings::in_memory();
        settings.set_dark_mode(true).unwrap();
        let ctl = Controller::new(FakeClient::default(), settings).with_dark_mode_reset(false);

        let page = ctl.load().await.unwrap();
        assert!(page.dark_mode);
        assert!(ctl.map_dark_mode().await.unwrap());
    }

    #[tokio::test]
    async fn test_superseded_result_dropped() {
        let ctl = Arc::new(controller(FakeClient::default()));

        let slow = {
            let ctl = Arc::clone(&ctl);
            tokio::spawn(async move { ctl.search("slow").await })
        };
        while ctl.client().lookup_calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let page = ctl.search("1.1.1.1").await.unwrap();
        assert_eq!(page.record().unwrap().ip, "1.1.1.1");

        ctl.client().gate.notify_one();
        let stale = slow.await.unwrap().unwrap();
        assert_eq!(stale.record().unwrap().ip, "1.1.1.1");
        assert_eq!(ctl.page().await.input, "1.1.1.1");

        // Both searches succeeded, so both are remembered
        assert_eq!(ctl.history().await.unwrap().entries(), ["1.1.1.1", "slow"]);
    }

    #[tokio::test]
    async fn test_superseded_failure_dropped() {
        let ctl = Arc::new(controller(FakeClient::default()));

        let slow = {
            let ctl = Arc::clone(&ctl);
            tokio::spawn(async move { ctl.search("slow-bad").await })
        };
        while ctl.client().lookup_calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        ctl.search("1.1.1.1").await.unwrap();

        ctl.client().gate.notify_one();
        let stale = slow.await.unwrap().unwrap();
        assert_eq!(stale.record().unwrap().ip, "1.1.1.1");

        let page = ctl.page().await;
        assert_eq!(page.record().unwrap().ip, "1.1.1.1");
        assert!(!page.error_visible);
        assert_eq!(page.banner(), None);
        assert_eq!(ctl.history().await.unwrap().entries(), ["1.1.1.1"]);
    }

    #[tokio::test]
    async fn test_concurrent_toggles_keep_page_and_store_in_step() {
        let ctl = Arc::new(controller(FakeClient::default()));

        let handles: Vec<_> = (0..5)
            .map(|_| {
                let ctl = Arc::clone(&ctl);
                tokio::spawn(async move { ctl.toggle_dark_mode().await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let page = ctl.page().await;
        assert!(page.dark_mode);
        assert_eq!(ctl.map_dark_mode().await.unwrap(), page.dark_mode);
    }

    #[tokio::test]
    async fn test_corrupted_history_surfaces() {
        use crate::store::{KvStore, MemoryStore};

        let mut store = MemoryStore::new();
        store.set("ipHistory", "oops").unwrap();
        let ctl = Controller::new(FakeClient::default(), Settings::new(store));

        assert!(matches!(ctl.search("1.1.1.1").await, Err(Error::Store(_))));
    }
}
