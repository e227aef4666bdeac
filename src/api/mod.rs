pub mod safest_route;

pub use safest_route::{interpret_response, SafestRouteClient};

use crate::error::EndpointError;
use crate::models::{Coordinate, RankedResult};

/// Anything that can produce ranked routes between two points
#[allow(async_fn_in_trait)]
pub trait RouteSource {
    /// Request the ranked safest routes from `start` to `end`
    async fn fetch_safest_routes(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<RankedResult, EndpointError>;
}
