/// Logic Layer - Best Path Selection
///
/// This layer is responsible for:
/// - Generating candidate paths from the collected swap links
/// - Pricing every candidate through the router
/// - Choosing the path with the greatest output

pub mod path_generator;
pub mod path_pricer;
pub mod route_finder;
pub mod selector;
pub mod types;

pub use path_generator::generate_paths;
pub use path_pricer::PathPricer;
pub use route_finder::{BestPathFinder, BestPathFinderBuilder};
pub use selector::choose_best_path;
pub use types::{PricedPath, SwapPath};
