//! The Movie Database (TMDB) environments, routes and models.
//!
//! Create an account at <https://themoviedb.org> to get an API key.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::environment::ApiEnvironment;
use crate::http::HttpMethod;
use crate::request::ApiRequest;
use crate::request_data::{Params, RequestData};
use crate::route::ApiRoute;

pub const PRODUCTION_URL: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Production { api_key: String },
    /// A self-hosted or mocked deployment.
    Custom { url: String, api_key: String },
}

impl Environment {
    fn api_key(&self) -> &str {
        match self {
            Environment::Production { api_key } | Environment::Custom { api_key, .. } => api_key,
        }
    }
}

impl RequestData for Environment {
    fn query_params(&self) -> Option<Params> {
        Some(Params::from([(
            "api_key".to_string(),
            self.api_key().to_string(),
        )]))
    }
}

impl ApiEnvironment for Environment {
    fn url(&self) -> &str {
        match self {
            Environment::Production { .. } => PRODUCTION_URL,
            Environment::Custom { url, .. } => url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    DiscoverMovies { page: u32 },
    Movie { id: u64 },
    MovieVideos { id: u64 },
    SearchMovies { query: String, page: u32 },
}

impl RequestData for Route {
    fn query_params(&self) -> Option<Params> {
        match self {
            Route::DiscoverMovies { page } => Some(Params::from([
                ("language".to_string(), "en-US".to_string()),
                ("sort-by".to_string(), "popularity".to_string()),
                ("page".to_string(), page.to_string()),
            ])),
            Route::Movie { .. } | Route::MovieVideos { .. } => None,
            Route::SearchMovies { query, page } => Some(Params::from([
                ("query".to_string(), query.clone()),
                ("page".to_string(), page.to_string()),
            ])),
        }
    }
}

impl ApiRoute for Route {
    fn http_method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        match self {
            Route::DiscoverMovies { .. } => "discover/movie".into(),
            Route::Movie { id } => format!("movie/{id}"),
            Route::MovieVideos { id } => format!("movie/{id}/videos"),
            Route::SearchMovies { .. } => "search/movie".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub imdb_id: Option<String>,
    pub title: String,
    pub original_title: Option<String>,
    pub original_language: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub genres: Option<Vec<MovieGenre>>,
    pub release_date: Option<String>,
    pub budget: Option<u64>,
    pub runtime: Option<u32>,
    pub revenue: Option<u64>,
    pub popularity: Option<f64>,
    #[serde(rename = "vote_average")]
    pub average_rating: Option<f64>,
    #[serde(rename = "homepage")]
    pub homepage_url: Option<String>,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    #[serde(rename = "adult")]
    pub is_adult_movie: Option<bool>,
}

impl Movie {
    pub fn backdrop_url(&self, width: u32) -> Option<Url> {
        image_url(self.backdrop_path.as_deref()?, width)
    }

    pub fn poster_url(&self, width: u32) -> Option<Url> {
        image_url(self.poster_path.as_deref()?, width)
    }
}

fn image_url(path: &str, width: u32) -> Option<Url> {
    Url::parse(&format!("{IMAGE_BASE_URL}/w{width}{path}")).ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieGenre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviesPaginationResult {
    pub page: u32,
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub total_results: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideosResult {
    pub id: u64,
    pub results: Vec<Video>,
}

/// Typed request for [`Route::DiscoverMovies`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverMovies {
    pub page: u32,
}

impl ApiRequest for DiscoverMovies {
    type Route = Route;
    type Response = MoviesPaginationResult;

    fn route(&self) -> Route {
        Route::DiscoverMovies { page: self.page }
    }
}

/// Typed request for [`Route::SearchMovies`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMovies {
    pub query: String,
    pub page: u32,
}

impl ApiRequest for SearchMovies {
    type Route = Route;
    type Response = MoviesPaginationResult;

    fn route(&self) -> Route {
        Route::SearchMovies {
            query: self.query.clone(),
            page: self.page,
        }
    }
}

/// Typed request for [`Route::Movie`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetMovie {
    pub id: u64,
}

impl ApiRequest for GetMovie {
    type Route = Route;
    type Response = Movie;

    fn route(&self) -> Route {
        Route::Movie { id: self.id }
    }
}

/// Typed request for [`Route::MovieVideos`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetMovieVideos {
    pub id: u64,
}

impl ApiRequest for GetMovieVideos {
    type Route = Route;
    type Response = VideosResult;

    fn route(&self) -> Route {
        Route::MovieVideos { id: self.id }
    }
}
