use super::Coordinate;

/// One scored route alternative as delivered by the backend
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    polyline: Vec<Coordinate>,
    distance_meters: f64,
    duration_millis: f64,
    score: f64,
}

impl RouteCandidate {
    /// Distances and durations are validated by the endpoint client before
    /// a candidate is built.
    pub(crate) fn new(
        polyline: Vec<Coordinate>,
        distance_meters: f64,
        duration_millis: f64,
        score: f64,
    ) -> Self {
        debug_assert!(distance_meters >= 0.0 && duration_millis >= 0.0);
        Self {
            polyline,
            distance_meters,
            duration_millis,
            score,
        }
    }

    #[must_use]
    pub fn polyline(&self) -> &[Coordinate] {
        &self.polyline
    }

    #[must_use]
    pub const fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    #[must_use]
    pub const fn duration_millis(&self) -> f64 {
        self.duration_millis
    }

    /// Safety score; lower is safer
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    /// Travel time rounded to whole minutes
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        // Travel times are far below the i64 range
        #[allow(clippy::cast_possible_truncation)]
        let minutes = (self.duration_millis / 60_000.0).round() as i64;
        minutes
    }
}

/// Route candidates in the order the backend ranked them (safest first)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedResult {
    routes: Vec<RouteCandidate>,
}

impl RankedResult {
    #[must_use]
    pub fn new(routes: Vec<RouteCandidate>) -> Self {
        Self { routes }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&RouteCandidate> {
        self.routes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteCandidate> {
        self.routes.iter()
    }

    /// The first `n` routes, or all of them if there are fewer
    #[must_use]
    pub fn top(&self, n: usize) -> &[RouteCandidate] {
        &self.routes[..n.min(self.routes.len())]
    }

    /// One-line summary of the leading routes, e.g.
    /// `#1 score=1.20 dist 3.40km | #2 score=3.40 dist 5.00km`
    #[must_use]
    pub fn summary(&self, n: usize) -> String {
        self.top(n)
            .iter()
            .enumerate()
            .map(|(i, route)| {
                format!(
                    "#{} score={:.2} dist {:.2}km",
                    i + 1,
                    route.score(),
                    route.distance_km()
                )
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl<'a> IntoIterator for &'a RankedResult {
    type Item = &'a RouteCandidate;
    type IntoIter = std::slice::Iter<'a, RouteCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
