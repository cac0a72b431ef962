mod cli;

use anyhow::{anyhow, bail, Context};
use apikit::integrations::{the_movie_db, yelp};
use apikit::{ApiClient, ApiError, ClientError, Config};
use clap::ArgMatches;
use log::{debug, info};
use serde::Serialize;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches();
    let log_level = matches.get_one::<String>("log-level").cloned();
    let version_flag = matches.get_flag("version");

    cli::init_logging(log_level.as_deref());

    if version_flag {
        println!("apikit {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let cfg = Config::from_env().map_err(|e| anyhow!(e))?;
    let client = ApiClient::from_config(&cfg).context("failed to build http client")?;
    debug!("timeout={}s user_agent={}", cfg.timeout_secs, cfg.user_agent);

    match matches.subcommand() {
        Some(("movies", m)) => run_movies(&client, &cfg, m).await,
        Some(("restaurants", m)) => run_restaurants(&client, &cfg, m).await,
        _ => {
            cli::build_cli().print_help()?;
            Ok(())
        }
    }
}

type Client = ApiClient<reqwest::Client>;

async fn run_movies(client: &Client, cfg: &Config, matches: &ArgMatches) -> anyhow::Result<()> {
    let api_key = cfg
        .tmdb_api_key
        .clone()
        .context("Missing TMDB_API_KEY")?;
    let env = match &cfg.tmdb_api_url {
        Some(url) => the_movie_db::Environment::Custom {
            url: url.clone(),
            api_key,
        },
        None => the_movie_db::Environment::Production { api_key },
    };

    match matches.subcommand() {
        Some(("discover", m)) => {
            let page = m.get_one::<u32>("page").copied().unwrap_or(1);
            info!("Discovering movies, page {}", page);
            let req = the_movie_db::DiscoverMovies { page };
            print_json(&client.fetch_request(&req, &env).await.map_err(describe)?)
        }
        Some(("search", m)) => {
            let query = m
                .get_one::<String>("query")
                .cloned()
                .unwrap_or_default();
            let page = m.get_one::<u32>("page").copied().unwrap_or(1);
            info!("Searching movies for {:?}, page {}", query, page);
            let req = the_movie_db::SearchMovies { query, page };
            print_json(&client.fetch_request(&req, &env).await.map_err(describe)?)
        }
        Some(("get", m)) => {
            let id = *m.get_one::<u64>("id").context("missing movie id")?;
            let req = the_movie_db::GetMovie { id };
            print_json(&client.fetch_request(&req, &env).await.map_err(describe)?)
        }
        Some(("videos", m)) => {
            let id = *m.get_one::<u64>("id").context("missing movie id")?;
            let req = the_movie_db::GetMovieVideos { id };
            print_json(&client.fetch_request(&req, &env).await.map_err(describe)?)
        }
        _ => bail!("unknown movies command"),
    }
}

async fn run_restaurants(
    client: &Client,
    cfg: &Config,
    matches: &ArgMatches,
) -> anyhow::Result<()> {
    let api_token = cfg
        .yelp_api_token
        .clone()
        .context("Missing YELP_API_TOKEN")?;
    let env = match &cfg.yelp_api_url {
        Some(url) => yelp::Environment::Custom {
            url: url.clone(),
            api_token,
        },
        None => yelp::Environment::V3 { api_token },
    };

    match matches.subcommand() {
        Some(("search", m)) => {
            let params = search_params(m)?;
            info!("Searching restaurants, offset {}", params.skip);
            let route = yelp::Route::Search(params);
            let result: yelp::SearchResult =
                client.fetch_item(&route, &env).await.map_err(describe)?;
            print_json(&result)
        }
        Some(("get", m)) => {
            let id = m.get_one::<String>("id").cloned().context("missing id")?;
            let route = yelp::Route::Restaurant { id };
            let result: yelp::Restaurant =
                client.fetch_item(&route, &env).await.map_err(describe)?;
            print_json(&result)
        }
        Some(("reviews", m)) => {
            let restaurant_id = m.get_one::<String>("id").cloned().context("missing id")?;
            let route = yelp::Route::RestaurantReviews { restaurant_id };
            let result: yelp::ReviewResult =
                client.fetch_item(&route, &env).await.map_err(describe)?;
            print_json(&result)
        }
        _ => bail!("unknown restaurants command"),
    }
}

fn search_params(m: &ArgMatches) -> anyhow::Result<yelp::SearchParams> {
    let mut params = yelp::SearchParams::new(
        m.get_one::<u32>("offset").copied().unwrap_or(0),
        m.get_one::<u32>("limit").copied().unwrap_or(20),
        m.get_one::<u32>("radius").copied().unwrap_or(1000),
    );
    if let (Some(lat), Some(long)) = (m.get_one::<f64>("lat"), m.get_one::<f64>("long")) {
        params.coordinate = Some((*lat, *long));
    }
    if let Some(price) = m.get_one::<String>("price") {
        params.budget_levels = price
            .split(',')
            .map(|level| {
                yelp::BudgetLevel::parse(level)
                    .ok_or_else(|| anyhow!("invalid budget level {:?}", level))
            })
            .collect::<anyhow::Result<_>>()?;
    }
    if m.get_flag("open-now") {
        params.opening_hours = yelp::OpeningHours::OpenNow;
    }
    Ok(params)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// Unsuccessful responses usually carry an error payload worth showing.
fn describe<T, D>(err: ClientError<T, D>) -> anyhow::Error
where
    T: std::error::Error + Send + Sync + 'static,
    D: std::error::Error + Send + Sync + 'static,
{
    match err {
        ClientError::Api(ApiError::UnsuccessfulHttpStatusCode { code, body, .. }) => {
            anyhow!("request failed with status {}: {}", code, String::from_utf8_lossy(&body))
        }
        other => anyhow::Error::new(other),
    }
}
