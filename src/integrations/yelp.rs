//! Yelp Fusion API environments, routes and models.
//!
//! Create a developer account at <https://yelp.com/developers> to get an
//! API token.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::encoding::path_segment;
use crate::environment::ApiEnvironment;
use crate::http::HttpMethod;
use crate::request_data::{Params, RequestData};
use crate::route::ApiRoute;

pub const V3_URL: &str = "https://api.yelp.com/v3/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    V3 { api_token: String },
    Custom { url: String, api_token: String },
}

impl RequestData for Environment {
    fn headers(&self) -> Option<Params> {
        let (Environment::V3 { api_token } | Environment::Custom { api_token, .. }) = self;
        Some(Params::from([(
            "Authorization".to_string(),
            format!("Bearer {api_token}"),
        )]))
    }

    fn query_params(&self) -> Option<Params> {
        Some(Params::new())
    }
}

impl ApiEnvironment for Environment {
    fn url(&self) -> &str {
        match self {
            Environment::V3 { .. } => V3_URL,
            Environment::Custom { url, .. } => url,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Restaurant { id: String },
    RestaurantReviews { restaurant_id: String },
    Search(SearchParams),
}

impl RequestData for Route {
    fn query_params(&self) -> Option<Params> {
        match self {
            Route::Restaurant { .. } | Route::RestaurantReviews { .. } => None,
            Route::Search(params) => Some(params.query_params()),
        }
    }
}

impl ApiRoute for Route {
    fn http_method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        match self {
            Route::Restaurant { id } => format!("businesses/{}", path_segment(id)),
            Route::RestaurantReviews { restaurant_id } => {
                format!("businesses/{}/reviews", path_segment(restaurant_id))
            }
            Route::Search(_) => "businesses/search".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BudgetLevel {
    Level1,
    Level2,
    Level3,
    Level4,
}

impl BudgetLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetLevel::Level1 => "1",
            BudgetLevel::Level2 => "2",
            BudgetLevel::Level3 => "3",
            BudgetLevel::Level4 => "4",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "1" => Some(BudgetLevel::Level1),
            "2" => Some(BudgetLevel::Level2),
            "3" => Some(BudgetLevel::Level3),
            "4" => Some(BudgetLevel::Level4),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpeningHours {
    OpenNow,
    #[default]
    ShowAll,
}

/// Restaurant search filters.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub skip: u32,
    pub take: u32,
    pub radius: u32,
    /// Latitude and longitude.
    pub coordinate: Option<(f64, f64)>,
    pub budget_levels: Vec<BudgetLevel>,
    pub opening_hours: OpeningHours,
}

impl SearchParams {
    pub fn new(skip: u32, take: u32, radius: u32) -> Self {
        Self {
            skip,
            take,
            radius,
            coordinate: None,
            budget_levels: Vec::new(),
            opening_hours: OpeningHours::ShowAll,
        }
    }

    pub fn query_params(&self) -> Params {
        let mut params = Params::from([
            ("categories".to_string(), "restaurants".to_string()),
            ("radius".to_string(), self.radius.to_string()),
            ("offset".to_string(), self.skip.to_string()),
            ("limit".to_string(), self.take.to_string()),
        ]);
        if let Some((lat, long)) = self.coordinate {
            params.insert("latitude".into(), lat.to_string());
            params.insert("longitude".into(), long.to_string());
        }
        if !self.budget_levels.is_empty() {
            let levels: BTreeSet<_> = self.budget_levels.iter().copied().collect();
            let price = levels
                .iter()
                .map(BudgetLevel::as_str)
                .collect::<Vec<_>>()
                .join(",");
            params.insert("price".into(), price);
        }
        if self.opening_hours == OpeningHours::OpenNow {
            params.insert("open_now".into(), "true".into());
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub alias: Option<String>,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub is_closed: Option<bool>,
    pub url: Option<String>,
    pub review_count: Option<u32>,
    #[serde(default)]
    pub categories: Vec<RestaurantCategory>,
    pub rating: Option<f64>,
    pub location: Option<RestaurantLocation>,
    pub coordinates: Option<RestaurantCoordinates>,
    pub photos: Option<Vec<String>>,
    pub price: Option<String>,
    pub hours: Option<Vec<RestaurantHours>>,
    pub phone: Option<String>,
    pub display_phone: Option<String>,
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantCategory {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantCoordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantHour {
    pub is_overnight: bool,
    pub start: String,
    pub end: String,
    pub day: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantHours {
    #[serde(rename = "hours_type")]
    pub kind: String,
    pub is_open_now: bool,
    pub open: Vec<RestaurantHour>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantLocation {
    pub display_address: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantReview {
    pub id: String,
    pub url: Option<String>,
    pub text: Option<String>,
    pub rating: Option<f64>,
    pub user: RestaurantReviewUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantReviewUser {
    pub id: String,
    pub name: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResult {
    pub reviews: Vec<RestaurantReview>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub businesses: Vec<Restaurant>,
}
