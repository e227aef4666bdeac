/// Backend used when no configuration has been saved
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Path of the ranked safest-route endpoint, relative to the API base URL
pub const SAFEST_ROUTE_PATH: &str = "/safest-route";

/// Initial map center (Chandigarh) as `[lat, lon]`
pub const DEFAULT_CENTER: [f64; 2] = [30.7333, 76.7794];

pub const DEFAULT_ZOOM: u8 = 13;

pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

pub const OSM_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

/// Number of ranked routes drawn on the map; the scoreboard lists all of them
pub const MAX_DRAWN_ROUTES: usize = 3;

/// Stroke colors for the drawn ranks: safest, second, third
pub const RANK_COLORS: [&str; MAX_DRAWN_ROUTES] = ["#2E7D32", "#FB8C00", "#C62828"];

/// Decimal places written into the coordinate text fields
pub const COORDINATE_DECIMALS: usize = 6;

/// Oldest messages are dropped once the panel holds this many
pub const MESSAGE_HISTORY_LIMIT: usize = 200;
