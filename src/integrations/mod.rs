//! Ready-made environments, routes and models for third-party APIs.

pub mod the_movie_db;
pub mod yelp;
