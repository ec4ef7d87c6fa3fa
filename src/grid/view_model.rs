//! GridViewModel: the filter -> sort -> paginate -> render pipeline
//!
//! Every mutator is a pure state transition followed by a full recomputation
//! of the derived view from the immutable dataset. Column types and extents
//! are profiled once per dataset and never change with search, sort or paging.

use crate::core::{ColumnConfig, ColumnConfigs, ColumnType, Dataset, PageSize, Row, SortDirection};
use crate::grid::state::GridState;
use crate::grid::view::{ColumnHeader, GridStatus, GridView, PaginationView};
use crate::render::{CellRenderer, RenderSettings};
use crate::services::{Extent, PaginationService, ProfileService, SearchService, SortService};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Grid-level behaviour settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub default_page_size: PageSize,
    /// Pagination controls are shown only above this many filtered rows
    pub pagination_threshold: usize,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            default_page_size: PageSize::default(),
            pagination_threshold: 10,
        }
    }
}

/// Per-column facts computed once per dataset
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    pub column_type: ColumnType,
    /// Only meaningful for numeric columns
    pub extent: Extent,
}

impl ColumnProfile {
    fn profile(rows: &[Row], name: &str) -> Self {
        let column_type = ProfileService::classify(rows, name);
        let extent = match column_type {
            ColumnType::Numeric => ProfileService::extent(rows, name),
            ColumnType::Textual => Extent::default(),
        };
        Self {
            name: name.to_string(),
            column_type,
            extent,
        }
    }
}

/// Owns the grid state and the derived view for one dataset
#[derive(Debug, Clone)]
pub struct GridViewModel {
    dataset: Dataset,
    profiles: Vec<ColumnProfile>,
    configs: ColumnConfigs,
    renderer: CellRenderer,
    settings: GridSettings,
    state: GridState,
    view: GridView,
}

impl GridViewModel {
    /// Create a view model with default settings
    pub fn new(dataset: Dataset, configs: ColumnConfigs) -> Self {
        Self::with_settings(dataset, configs, GridSettings::default(), RenderSettings::default())
    }

    pub fn with_settings(
        dataset: Dataset,
        configs: ColumnConfigs,
        settings: GridSettings,
        render_settings: RenderSettings,
    ) -> Self {
        let mut model = Self {
            dataset: Dataset::default(),
            profiles: Vec::new(),
            configs,
            renderer: CellRenderer::new(render_settings),
            state: GridState::with_page_size(settings.default_page_size),
            settings,
            view: GridView::default(),
        };
        model.load(dataset);
        model
    }

    /// Replace the dataset. State starts fresh and columns are re-profiled.
    pub fn load(&mut self, dataset: Dataset) -> &GridView {
        self.profiles = dataset
            .columns()
            .iter()
            .map(|name| ColumnProfile::profile(dataset.rows(), name))
            .collect();
        for profile in &self.profiles {
            trace!(
                "Column '{}' profiled as {} with extent {:?}",
                profile.name, profile.column_type, profile.extent
            );
        }
        self.dataset = dataset;
        self.state = GridState::with_page_size(self.settings.default_page_size);
        self.recompute()
    }

    /// Swap the column configuration. Types and extents are kept.
    pub fn set_column_configs(&mut self, configs: ColumnConfigs) -> &GridView {
        self.configs = configs;
        self.recompute()
    }

    pub fn set_search(&mut self, text: impl Into<String>) -> &GridView {
        self.state.search_text = text.into();
        self.state.current_page = 0;
        self.recompute()
    }

    /// Header activation for `column` (tri-state cycle). Unknown columns are ignored.
    pub fn set_sort(&mut self, column: &str) -> &GridView {
        if !self.dataset.has_column(column) {
            warn!("Ignoring sort on unknown column '{}'", column);
            return &self.view;
        }
        self.state.sort.activate(column);
        self.state.current_page = 0;
        self.recompute()
    }

    /// Jump to a 0-based page; out-of-range pages are clamped
    pub fn set_page(&mut self, page: usize) -> &GridView {
        self.state.current_page = page;
        self.recompute()
    }

    pub fn next_page(&mut self) -> &GridView {
        let page = self.state.current_page.saturating_add(1);
        self.set_page(page)
    }

    pub fn prev_page(&mut self) -> &GridView {
        let page = self.state.current_page.saturating_sub(1);
        self.set_page(page)
    }

    pub fn set_page_size(&mut self, page_size: PageSize) -> &GridView {
        self.state.page_size = page_size;
        self.state.current_page = 0;
        self.recompute()
    }

    /// Restore a previously saved state (for example from JSON)
    pub fn restore_state(&mut self, state: GridState) -> &GridView {
        self.state = state;
        if let Some(column) = self.state.sort.column.clone() {
            if !self.dataset.has_column(&column) {
                warn!("Dropping sort on unknown column '{}'", column);
                self.state.sort = Default::default();
            }
        }
        self.recompute()
    }

    pub fn view(&self) -> &GridView {
        &self.view
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    pub fn profiles(&self) -> &[ColumnProfile] {
        &self.profiles
    }

    pub fn column_type(&self, column: &str) -> Option<ColumnType> {
        self.profile(column).map(|p| p.column_type)
    }

    pub fn extent(&self, column: &str) -> Option<Extent> {
        self.profile(column).map(|p| p.extent)
    }

    fn profile(&self, column: &str) -> Option<&ColumnProfile> {
        self.profiles.iter().find(|p| p.name == column)
    }

    fn recompute(&mut self) -> &GridView {
        let (view, page) = self.derive_view();
        debug!(
            "Grid recomputed: {} of {} rows, page {}/{}",
            view.filtered_count,
            view.total_count,
            page + 1,
            view.pagination.total_pages
        );
        self.state.current_page = page;
        self.view = view;
        &self.view
    }

    /// Run the pipeline against the current state. Returns the view and the
    /// effective (clamped) page index.
    fn derive_view(&self) -> (GridView, usize) {
        let columns = self.dataset.columns();
        let total_count = self.dataset.row_count();
        let search = &self.state.search_text;

        let filtered = SearchService::filter(self.dataset.rows(), columns, search);
        trace!("Search '{}' kept {} rows", search, filtered.len());

        let sorted = match (&self.state.sort.column, self.state.sort.direction) {
            (Some(column), direction) if direction != SortDirection::Unsorted => {
                let column_type = self.column_type(column).unwrap_or_default();
                SortService::sort(filtered, column, direction, column_type)
            }
            _ => filtered,
        };
        let filtered_count = sorted.len();

        let page_size = self.state.page_size;
        // No controls at or below the threshold: one page holds every row
        let paged = filtered_count > self.settings.pagination_threshold;
        let page = if paged {
            PaginationService::paginate(&sorted, self.state.current_page, page_size)
        } else {
            PaginationService::single_page(&sorted)
        };

        let column_configs: Vec<ColumnConfig> = self
            .profiles
            .iter()
            .map(|p| self.configs.for_column(&p.name))
            .collect();

        let rows = page
            .items
            .iter()
            .map(|row| {
                self.profiles
                    .iter()
                    .zip(&column_configs)
                    .map(|(p, config)| {
                        self.renderer
                            .render(row, &p.name, p.column_type, config, p.extent)
                    })
                    .collect()
            })
            .collect();

        let headers = self
            .profiles
            .iter()
            .zip(&column_configs)
            .map(|(p, config)| ColumnHeader {
                name: p.name.clone(),
                column_type: p.column_type,
                align: config.resolve_align(p.column_type),
                sort: self.state.sort.direction_for(&p.name),
            })
            .collect();

        let status = if total_count == 0 {
            GridStatus::NoData
        } else if filtered_count == 0 {
            GridStatus::NoMatches
        } else {
            GridStatus::Ready
        };

        let pagination = PaginationView {
            current_page: page.page,
            total_pages: page.total_pages,
            page_size: page_size.get(),
            available_page_sizes: PageSize::ALLOWED.to_vec(),
            has_prev: page.has_prev(),
            has_next: page.has_next(),
            visible: paged,
        };

        let first_row_number = if page.items.is_empty() {
            0
        } else {
            page.page * page_size.get() + 1
        };

        let view = GridView {
            columns: headers,
            rows,
            status,
            filtered_count,
            total_count,
            summary: GridView::summary_text(
                filtered_count,
                total_count,
                SearchService::is_active(search),
            ),
            pagination,
            first_row_number,
        };

        (view, page.page)
    }
}
