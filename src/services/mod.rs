pub mod pagination_service;
pub mod profile_service;
pub mod search_service;
pub mod sort_service;

pub use pagination_service::{Page, PaginationService};
pub use profile_service::{Extent, ProfileService};
pub use search_service::{SearchQuery, SearchService};
pub use sort_service::{SortService, SortState};
