//! List state: pagination, search, sort and loading phases for one entity
//! list.
//!
//! Each resource declares its search policy once: paginated resources search
//! server-side through the `search` parameter; bare-array resources are
//! fetched whole and filtered locally over declared fields. The two
//! strategies never mix for a single resource.
//!
//! Responses carry a request generation. A response whose generation is no
//! longer the latest is discarded, so overlapping requests cannot leave the
//! list showing an older answer; a closed controller ignores everything.

use std::cmp::Ordering;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;
use crate::page::Page;
use crate::resource::{PageRequest, ResourceClient, SortDir};

/// Record types that support substring filtering over named fields.
pub trait Searchable {
    /// Text value of `field`, if the record has one.
    fn field_text(&self, field: &str) -> Option<String>;

    /// Case-insensitive substring match across the given fields.
    fn matches_filter(&self, term: &str, fields: &[&str]) -> bool {
        let term = term.to_lowercase();
        fields.iter().any(|field| {
            self.field_text(field)
                .is_some_and(|text| text.to_lowercase().contains(&term))
        })
    }
}

/// Record types that can be ordered by a named field.
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Filter a list by a search term over the given fields. Blank terms keep
/// everything.
pub fn filter_list<T: Searchable>(items: Vec<T>, term: &str, fields: &[&str]) -> Vec<T> {
    if term.trim().is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.matches_filter(term.trim(), fields))
        .collect()
}

/// Stable sort by a field; descending reverses the comparison.
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let ordering = a.compare_by_field(b, field);
        if ascending { ordering } else { ordering.reverse() }
    });
}

impl Searchable for Value {
    fn field_text(&self, field: &str) -> Option<String> {
        match self.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl Sortable for Value {
    /// Numbers compare numerically, everything else by its text value; the
    /// comparison uses the raw field value, never the rendered cell.
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match (self.get(field), other.get(field)) {
            (Some(Value::Number(a)), Some(Value::Number(b))) => a
                .as_f64()
                .partial_cmp(&b.as_f64())
                .unwrap_or(Ordering::Equal),
            (a, b) => {
                let a = a.and_then(Value::as_str).unwrap_or_default();
                let b = b.and_then(Value::as_str).unwrap_or_default();
                a.cmp(b)
            }
        }
    }
}

/// Where filtering happens for a resource.
#[derive(Debug, Clone, Copy)]
pub enum SearchMode {
    /// The backend paginates and searches (`search` query parameter).
    Server,
    /// The whole collection is fetched and filtered locally over these fields.
    Client { fields: &'static [&'static str] },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// Pagination/search/sort state for one entity list.
pub struct ListState<T> {
    client: ResourceClient,
    mode: SearchMode,
    request: PageRequest,
    phase: LoadPhase,
    /// Rows currently shown. Kept on a failed reload (stale-while-error).
    items: Vec<T>,
    /// Client-mode only: the full fetched collection before filtering.
    all_items: Vec<T>,
    current_page: i64,
    total_pages: i64,
    total_items: i64,
    error: Option<String>,
    latest_generation: u64,
    closed: bool,
}

impl<T> ListState<T>
where
    T: DeserializeOwned + Searchable + Sortable + Clone,
{
    pub fn new(client: ResourceClient, mode: SearchMode) -> Self {
        Self {
            client,
            mode,
            request: PageRequest::default(),
            phase: LoadPhase::Idle,
            items: Vec::new(),
            all_items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            total_items: 0,
            error: None,
            latest_generation: 0,
            closed: false,
        }
    }

    /// Fixed extra filters sent with every request (e.g. a parent id).
    pub fn with_extra_filters(mut self, extra: Vec<(String, String)>) -> Self {
        self.request.extra = extra;
        self
    }

    /// Configure the initial request before the first load, without firing
    /// one request per setter.
    pub fn prepare(mut self, configure: impl FnOnce(&mut PageRequest)) -> Self {
        configure(&mut self.request);
        self.request.page = self.request.page.max(1);
        self.request.per_page = self.request.per_page.max(1);
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    pub fn total_pages(&self) -> i64 {
        self.total_pages
    }

    pub fn total_items(&self) -> i64 {
        self.total_items
    }

    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    pub fn sort(&self) -> Option<(&str, SortDir)> {
        self.request
            .sort
            .as_ref()
            .map(|(field, dir)| (field.as_str(), *dir))
    }

    /// Start a request: bumps the generation and enters `Loading`. Pair with
    /// [`apply`](Self::apply); [`load`](Self::load) does both.
    pub fn begin(&mut self) -> u64 {
        self.latest_generation += 1;
        self.phase = LoadPhase::Loading;
        self.latest_generation
    }

    /// Apply a response for the request started with `generation`.
    ///
    /// Responses from a superseded generation, or arriving after
    /// [`close`](Self::close), are dropped on the floor.
    pub fn apply(&mut self, generation: u64, result: Result<Page<T>, ClientError>) {
        if self.closed || generation != self.latest_generation {
            return;
        }

        match result {
            Ok(page) => {
                self.phase = LoadPhase::Loaded;
                self.error = None;
                match self.mode {
                    SearchMode::Server => {
                        self.items = page.items;
                        self.current_page = page.current_page;
                        self.total_pages = page.total_pages;
                        self.total_items = page.total_items;
                    }
                    SearchMode::Client { .. } => {
                        self.all_items = page.items;
                        self.recompute_view();
                    }
                }
            }
            Err(err) => {
                // Previously displayed rows stay visible alongside the error
                self.phase = LoadPhase::Errored;
                self.error = Some(err.to_string());
            }
        }
    }

    /// Client-mode view: filter over the declared fields, then sort.
    fn recompute_view(&mut self) {
        let SearchMode::Client { fields } = self.mode else {
            return;
        };
        let term = self.request.search.as_deref().unwrap_or("");
        let mut view = filter_list(self.all_items.clone(), term, fields);
        if let Some((field, dir)) = &self.request.sort {
            sort_list(&mut view, field, *dir == SortDir::Asc);
        }
        self.total_items = view.len() as i64;
        self.total_pages = 1;
        self.current_page = 1;
        self.items = view;
    }

    /// Issue the current request and apply its response.
    pub async fn load(&mut self) {
        let generation = self.begin();
        let result = self.client.list(&self.request).await;
        self.apply(generation, result);
    }

    pub async fn set_page(&mut self, page: i64) {
        self.request.page = page.max(1);
        self.load().await;
    }

    /// Search resets to the first page. Client-mode resources re-filter the
    /// cached collection without a network round-trip.
    pub async fn set_search(&mut self, term: impl Into<String>) {
        self.request.search = Some(term.into());
        self.request.page = 1;
        match self.mode {
            SearchMode::Server => self.load().await,
            SearchMode::Client { .. } => self.recompute_view(),
        }
    }

    pub async fn set_items_per_page(&mut self, per_page: i64) {
        self.request.per_page = per_page.max(1);
        self.request.page = 1;
        self.load().await;
    }

    /// Clicking the same column toggles direction; a new column starts
    /// ascending.
    pub async fn toggle_sort(&mut self, field: &str) {
        let dir = match &self.request.sort {
            Some((current, dir)) if current == field => dir.toggled(),
            _ => SortDir::Asc,
        };
        self.request.sort = Some((field.to_string(), dir));
        match self.mode {
            SearchMode::Server => self.load().await,
            SearchMode::Client { .. } => self.recompute_view(),
        }
    }

    /// Re-issue the current request as-is; used after mutations. The page
    /// number is deliberately preserved.
    pub async fn refresh(&mut self) {
        self.load().await;
    }

    /// Unmount guard: no response applied after this.
    pub fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use serde_json::json;
    use std::sync::Arc;

    fn group(nombre: &str) -> Value {
        json!({"id": nombre, "nombre": nombre})
    }

    fn page_of(items: Vec<Value>, total: i64, current: i64, per_page: i64) -> Page<Value> {
        Page {
            total_pages: (total + per_page - 1) / per_page.max(1),
            items,
            current_page: current,
            total_items: total,
            items_per_page: per_page,
        }
    }

    fn client_with(transport: ScriptedTransport) -> ResourceClient {
        ResourceClient::new(Arc::new(transport), "/grupos")
    }

    #[test]
    fn test_client_side_filter_on_nombre() {
        let groups = vec![group("10A"), group("10B"), group("11A")];
        let filtered = filter_list(groups, "10A", &["nombre"]);
        let names: Vec<_> = filtered
            .iter()
            .map(|g| g["nombre"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["10A"]);
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let groups = vec![group("10A"), group("10B"), group("11A")];
        let filtered = filter_list(groups, "10", &["nombre"]);
        assert_eq!(filtered.len(), 2);
        let filtered = filter_list(vec![group("10A")], "a", &["nombre"]);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_sort_list_stable_and_reversible() {
        let mut items = vec![group("10B"), group("11A"), group("10A")];
        sort_list(&mut items, "nombre", true);
        let names: Vec<_> = items.iter().map(|g| g["nombre"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["10A", "10B", "11A"]);
        sort_list(&mut items, "nombre", false);
        let names: Vec<_> = items.iter().map(|g| g["nombre"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["11A", "10B", "10A"]);
    }

    #[test]
    fn test_sortable_value_compares_numbers_numerically() {
        let a = json!({"cupo": 9});
        let b = json!({"cupo": 40});
        assert_eq!(a.compare_by_field(&b, "cupo"), Ordering::Less);
    }

    #[tokio::test]
    async fn test_client_mode_search_filters_without_refetch() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!([
            {"id": "1", "nombre": "10A"},
            {"id": "2", "nombre": "10B"},
            {"id": "3", "nombre": "11A"}
        ]));
        let mut state = ListState::<Value>::new(
            client_with(transport),
            SearchMode::Client { fields: &["nombre"] },
        );
        state.load().await;
        assert_eq!(state.items().len(), 3);

        state.set_search("10A").await;
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0]["nombre"], "10A");
        assert_eq!(state.total_items(), 1);
    }

    #[tokio::test]
    async fn test_server_mode_search_resets_to_page_one() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.route_json(
            "GET",
            "/grupos",
            200,
            json!({"data": [], "total": 0, "per_page": 10, "current_page": 1, "last_page": 1}),
        );
        let client = ResourceClient::new(transport.clone(), "/grupos");
        let mut state = ListState::<Value>::new(client, SearchMode::Server);

        state.set_page(3).await;
        state.set_search("ana").await;

        let last = transport.last_request().unwrap();
        let page = last.query.iter().find(|(k, _)| k == "page").unwrap();
        assert_eq!(page.1, "1");
        let search = last.query.iter().find(|(k, _)| k == "search").unwrap();
        assert_eq!(search.1, "ana");
    }

    #[tokio::test]
    async fn test_refresh_keeps_current_page() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.route_json(
            "GET",
            "/grupos",
            200,
            json!({"data": [], "total": 21, "per_page": 10, "current_page": 2, "last_page": 3}),
        );
        let client = ResourceClient::new(transport.clone(), "/grupos");
        let mut state = ListState::<Value>::new(client, SearchMode::Server);

        state.set_page(2).await;
        state.refresh().await;

        let requests = transport.recorded();
        assert_eq!(requests.len(), 2);
        for request in requests {
            let page = request.query.iter().find(|(k, _)| k == "page").unwrap();
            assert_eq!(page.1, "2");
        }
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let transport = ScriptedTransport::new();
        let mut state =
            ListState::<Value>::new(client_with(transport), SearchMode::Server);

        let first = state.begin();
        let second = state.begin();

        // The slower first request lands after the second was issued
        state.apply(second, Ok(page_of(vec![group("fresh")], 1, 1, 10)));
        state.apply(first, Ok(page_of(vec![group("stale")], 1, 1, 10)));

        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0]["nombre"], "fresh");
        assert_eq!(state.phase(), LoadPhase::Loaded);
    }

    #[test]
    fn test_failed_load_keeps_previous_items() {
        let transport = ScriptedTransport::new();
        let mut state =
            ListState::<Value>::new(client_with(transport), SearchMode::Server);

        let generation = state.begin();
        state.apply(generation, Ok(page_of(vec![group("10A")], 1, 1, 10)));

        let generation = state.begin();
        state.apply(
            generation,
            Err(ClientError::Network("connection refused".to_string())),
        );

        assert_eq!(state.phase(), LoadPhase::Errored);
        assert!(state.error().unwrap().contains("connection refused"));
        // Stale-while-error: the old rows are still there
        assert_eq!(state.items().len(), 1);
    }

    #[test]
    fn test_closed_state_ignores_late_responses() {
        let transport = ScriptedTransport::new();
        let mut state =
            ListState::<Value>::new(client_with(transport), SearchMode::Server);

        let generation = state.begin();
        state.close();
        state.apply(generation, Ok(page_of(vec![group("late")], 1, 1, 10)));

        assert!(state.items().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_sort_cycles_direction() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.route_json(
            "GET",
            "/grupos",
            200,
            json!({"data": [], "total": 0, "per_page": 10, "current_page": 1, "last_page": 1}),
        );
        let client = ResourceClient::new(transport.clone(), "/grupos");
        let mut state = ListState::<Value>::new(client, SearchMode::Server);

        state.toggle_sort("nombre").await;
        assert_eq!(state.sort(), Some(("nombre", SortDir::Asc)));
        state.toggle_sort("nombre").await;
        assert_eq!(state.sort(), Some(("nombre", SortDir::Desc)));
        state.toggle_sort("cupo_maximo").await;
        assert_eq!(state.sort(), Some(("cupo_maximo", SortDir::Asc)));
    }
}
