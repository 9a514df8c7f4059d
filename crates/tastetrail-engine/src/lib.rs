pub mod coordinator;
pub mod cuisine;
pub mod dedup;
pub mod error;
pub mod geodesy;
pub(crate) mod http;
pub mod nominatim;
pub mod planner;
pub mod provider;
pub mod radius;
pub mod rate_limit;
pub mod region;
pub mod session;
pub mod yelp;

pub use coordinator::SearchCoordinator;
pub use cuisine::{classify, FALLBACK_TAG};
pub use dedup::merge;
pub use error::ProviderError;
pub use geodesy::{geodesic_distance, offset};
pub use nominatim::NominatimClient;
pub use planner::{plan, SearchRegion};
pub use provider::{NoEnrichment, PlaceEnrichment, PlaceSearch, SearchArea};
pub use radius::{filter_by_radius, rank_by_distance};
pub use rate_limit::Pacer;
pub use region::RegionSearcher;
pub use session::{SearchOutcome, SearchSession};
pub use yelp::YelpClient;
